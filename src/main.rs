use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::rc::Rc;
use std::time::Instant;

use chrono::{DateTime, Local, Utc};
use log::{error, info};

use wordgroups::game::{GameController, PuzzleCatalog, PuzzleList, Settings};
use wordgroups::model::GameCommand;
use wordgroups::store::FileStore;

const DEFAULT_PUZZLE_FILE: &str = "puzzles.json";

fn init_logging() {
    env_logger::init();
}

fn main() -> ExitCode {
    init_logging();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(target: "main", "{}", err);
            eprintln!("wordgroups: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let data_dir = Settings::data_dir_from_env();
    let settings = Settings::load(&data_dir);
    let puzzle_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| data_dir.join(DEFAULT_PUZZLE_FILE));

    let catalog = PuzzleList::load(&puzzle_path)?;
    let store = Rc::new(FileStore::new(&data_dir));
    info!(target: "main", "Using data directory {:?}", data_dir);

    let mut controller = GameController::new(catalog, store, settings, Settings::seed_from_env());
    render(&controller);

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "quit" || line == "q" {
            break;
        }
        match line.parse::<GameCommand>() {
            Ok(command) => controller.handle_command(command),
            Err(err) => {
                println!("{}", err);
                continue;
            }
        }
        render(&controller);

        if let Some(due) = controller.next_due() {
            std::thread::sleep(due.saturating_duration_since(Instant::now()));
            if controller.run_due_tasks(Instant::now()) > 0 {
                render(&controller);
            }
        }
    }
    Ok(())
}

fn render<C: PuzzleCatalog>(controller: &GameController<C>) {
    let engine = controller.engine();
    let puzzle = engine.puzzle();
    let mut out = io::stdout().lock();

    let _ = writeln!(
        out,
        "\nPuzzle #{} ({}) [{}/{}]",
        puzzle.id,
        puzzle.date,
        engine.puzzle_index() + 1,
        controller.catalog().count()
    );
    for category in engine.solved() {
        let _ = writeln!(
            out,
            "  {} {}: {}",
            category.color(),
            category.name,
            category.words.join(", ")
        );
    }

    let words: Vec<String> = engine
        .unsolved_words()
        .iter()
        .map(|word| {
            if engine.is_selected(&word.text) {
                format!("[{}]", word.text)
            } else {
                word.text.clone()
            }
        })
        .collect();
    if !words.is_empty() {
        let _ = writeln!(out, "  {}", words.join("  "));
    }
    let _ = writeln!(
        out,
        "  Mistakes remaining: {}  Status: {:?}",
        engine.mistakes_remaining(),
        engine.status()
    );
    if let Some(message) = engine.message() {
        let _ = writeln!(out, "  {}", message);
    }

    let stats = controller.stats();
    let history = controller.history();
    let record = history.puzzle_stats(puzzle.id);
    let _ = writeln!(
        out,
        "  Played {} | Win rate {}% | Streak {} (max {}) | Avg mistakes {:.1}",
        stats.stats().games_played,
        stats.win_rate(),
        stats.stats().current_streak,
        stats.stats().max_streak,
        stats.average_mistakes()
    );
    let _ = writeln!(
        out,
        "  Unique puzzles attempted {} | won {}",
        history.total_puzzles_attempted(),
        history.total_puzzles_won()
    );
    if let Some(last) = record
        .last_attempted
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .map(|at| at.with_timezone(&Local))
    {
        let _ = writeln!(
            out,
            "  This puzzle: {} attempts, {} wins, last played {}",
            record.attempts,
            record.wins,
            last.format("%Y-%m-%d %H:%M")
        );
    }
    let _ = out.flush();
}
