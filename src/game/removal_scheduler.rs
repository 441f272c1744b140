use log::trace;
use std::time::Instant;
use uuid::Uuid;

/// Deferred removal of a solved category's words from the pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledRemoval {
    pub category: String,
    pub puzzle_id: u32,
    pub session_id: Uuid,
    pub due: Instant,
}

#[derive(Debug, Default)]
pub struct RemovalScheduler {
    tasks: Vec<ScheduledRemoval>,
}

impl RemovalScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, task: ScheduledRemoval) {
        trace!(target: "scheduler", "Scheduling removal of {:?}", task.category);
        self.tasks.push(task);
    }

    /// Drops every pending task, returning how many were cancelled.
    pub fn cancel_all(&mut self) -> usize {
        let cancelled = self.tasks.len();
        if cancelled > 0 {
            trace!(target: "scheduler", "Cancelled {} pending removals", cancelled);
        }
        self.tasks.clear();
        cancelled
    }

    /// Removes and returns the tasks due at `now`, earliest first.
    pub fn take_due(&mut self, now: Instant) -> Vec<ScheduledRemoval> {
        let (mut due, pending): (Vec<_>, Vec<_>) =
            self.tasks.drain(..).partition(|task| task.due <= now);
        self.tasks = pending;
        due.sort_by_key(|task| task.due);
        due
    }

    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    pub fn next_due(&self) -> Option<Instant> {
        self.tasks.iter().map(|task| task.due).min()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn task(category: &str, due: Instant) -> ScheduledRemoval {
        ScheduledRemoval {
            category: category.to_string(),
            puzzle_id: 1,
            session_id: Uuid::new_v4(),
            due,
        }
    }

    #[test]
    fn test_take_due_returns_only_elapsed_tasks_in_order() {
        let start = Instant::now();
        let mut scheduler = RemovalScheduler::new();
        scheduler.schedule(task("late", start + Duration::from_secs(5)));
        scheduler.schedule(task("second", start + Duration::from_millis(20)));
        scheduler.schedule(task("first", start + Duration::from_millis(10)));

        let due = scheduler.take_due(start + Duration::from_secs(1));
        let names: Vec<&str> = due.iter().map(|t| t.category.as_str()).collect();
        assert_eq!(names, vec!["first", "second"]);
        assert_eq!(scheduler.pending(), 1);
        assert_eq!(scheduler.next_due(), Some(start + Duration::from_secs(5)));
    }

    #[test]
    fn test_cancel_all() {
        let start = Instant::now();
        let mut scheduler = RemovalScheduler::new();
        scheduler.schedule(task("a", start));
        scheduler.schedule(task("b", start));
        assert_eq!(scheduler.cancel_all(), 2);
        assert!(scheduler.take_due(start + Duration::from_secs(1)).is_empty());
        assert_eq!(scheduler.next_due(), None);
    }
}
