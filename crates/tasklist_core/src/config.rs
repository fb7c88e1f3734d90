//! Runtime configuration for the task list service.

/// Storage key holding the serialized task list.
pub const DEFAULT_TASKS_KEY: &str = "tasks";
/// Storage key holding the theme preference.
pub const DEFAULT_THEME_KEY: &str = "theme";
/// How long a deleted task stays restorable.
pub const DEFAULT_UNDO_WINDOW_MS: i64 = 5_000;
/// How long a notice stays visible unless dismissed.
pub const DEFAULT_NOTICE_TTL_MS: i64 = 3_000;

/// Environment variable overriding the on-disk database location.
pub const DB_PATH_ENV: &str = "TASKLIST_DB_PATH";
/// Database file name used when no override is set.
pub const DEFAULT_DB_FILE_NAME: &str = "tasklist.sqlite3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskListConfig {
    pub tasks_key: String,
    pub theme_key: String,
    pub undo_window_ms: i64,
    pub notice_ttl_ms: i64,
}

impl Default for TaskListConfig {
    fn default() -> Self {
        Self {
            tasks_key: DEFAULT_TASKS_KEY.to_string(),
            theme_key: DEFAULT_THEME_KEY.to_string(),
            undo_window_ms: DEFAULT_UNDO_WINDOW_MS,
            notice_ttl_ms: DEFAULT_NOTICE_TTL_MS,
        }
    }
}

/// Resolves the database path from `TASKLIST_DB_PATH`, falling back to a file
/// in the system temp directory.
pub fn resolve_db_path() -> std::path::PathBuf {
    if let Ok(raw) = std::env::var(DB_PATH_ENV) {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            return std::path::PathBuf::from(trimmed);
        }
    }
    std::env::temp_dir().join(DEFAULT_DB_FILE_NAME)
}
