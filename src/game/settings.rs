use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// How a wrong guess is graded.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum FeedbackRule {
    /// Tier by the largest group of selected words sharing a category.
    #[default]
    MaxShared,
    /// Superseded: "one away" whenever exactly two categories are selected.
    DistinctCategories,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Settings {
    #[serde(default = "default_version")]
    version: u32,

    #[serde(default = "default_max_mistakes")]
    pub max_mistakes: u32,

    #[serde(default = "default_snapshot_max_age_hours")]
    pub snapshot_max_age_hours: u64,

    #[serde(default = "default_removal_delay_ms")]
    pub removal_delay_ms: u64,

    #[serde(default)]
    pub feedback_rule: FeedbackRule,
}

// Helper functions for default values
fn default_version() -> u32 {
    1
}
fn default_max_mistakes() -> u32 {
    4
}
fn default_snapshot_max_age_hours() -> u64 {
    24
}
fn default_removal_delay_ms() -> u64 {
    1000
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            version: default_version(),
            max_mistakes: default_max_mistakes(),
            snapshot_max_age_hours: default_snapshot_max_age_hours(),
            removal_delay_ms: default_removal_delay_ms(),
            feedback_rule: FeedbackRule::default(),
        }
    }
}

impl Settings {
    /// Loads `settings.json` from `data_dir`, writing defaults when it is missing or unreadable.
    pub fn load(data_dir: &Path) -> Self {
        let path = Self::settings_path(data_dir);
        if let Ok(contents) = fs::read_to_string(&path) {
            if let Ok(mut settings) = serde_json::from_str::<Settings>(&contents) {
                settings.migrate();
                return settings;
            }
        }
        let default = Settings::default();
        if let Err(err) = default.save(data_dir) {
            log::warn!(target: "settings", "Could not write default settings: {}", err);
        }
        default
    }

    pub fn save(&self, data_dir: &Path) -> Result<(), std::io::Error> {
        let path = Self::settings_path(data_dir);
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)
    }

    fn settings_path(data_dir: &Path) -> PathBuf {
        data_dir.join("settings.json")
    }

    fn migrate(&mut self) {
        match self.version {
            0 => {
                self.version = 1;
            }
            _ => (),
        }
    }

    pub fn snapshot_max_age(&self) -> Duration {
        Duration::from_secs(self.snapshot_max_age_hours * 60 * 60)
    }

    pub fn removal_delay(&self) -> Duration {
        Duration::from_millis(self.removal_delay_ms)
    }

    pub fn data_dir_from_env() -> PathBuf {
        std::env::var_os("WORDGROUPS_DATA_DIR")
            .map(PathBuf::from)
            .or_else(|| dirs::data_local_dir().map(|d| d.join("wordgroups")))
            .unwrap_or_else(|| PathBuf::from(".wordgroups"))
    }

    pub fn seed_from_env() -> Option<u64> {
        std::env::var("SEED").ok().and_then(|v| v.parse::<u64>().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_missing_fields_take_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"max_mistakes": 6}"#).unwrap();
        assert_eq!(settings.max_mistakes, 6);
        assert_eq!(settings.removal_delay_ms, 1000);
        assert_eq!(settings.feedback_rule, FeedbackRule::MaxShared);
        assert_eq!(settings.snapshot_max_age(), Duration::from_secs(86_400));
    }

    #[test]
    fn test_feedback_rule_names() {
        let settings: Settings =
            serde_json::from_str(r#"{"feedback_rule": "distinct-categories"}"#).unwrap();
        assert_eq!(settings.feedback_rule, FeedbackRule::DistinctCategories);
    }

    #[test]
    fn test_load_writes_defaults_then_reads_them_back() {
        let dir = tempfile::tempdir().unwrap();
        let first = Settings::load(dir.path());
        assert!(dir.path().join("settings.json").exists());

        let mut changed = first.clone();
        changed.removal_delay_ms = 250;
        changed.save(dir.path()).unwrap();
        assert_eq!(Settings::load(dir.path()).removal_delay_ms, 250);
    }

    #[test]
    fn test_old_version_is_migrated() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("settings.json"), r#"{"version": 0}"#).unwrap();
        let settings = Settings::load(dir.path());
        assert_eq!(settings, Settings::default());
    }

    #[test]
    #[serial]
    fn test_env_overrides() {
        std::env::set_var("SEED", "42");
        std::env::set_var("WORDGROUPS_DATA_DIR", "/tmp/wordgroups-test");
        assert_eq!(Settings::seed_from_env(), Some(42));
        assert_eq!(
            Settings::data_dir_from_env(),
            PathBuf::from("/tmp/wordgroups-test")
        );

        std::env::set_var("SEED", "not-a-number");
        assert_eq!(Settings::seed_from_env(), None);

        std::env::remove_var("SEED");
        std::env::remove_var("WORDGROUPS_DATA_DIR");
    }
}
