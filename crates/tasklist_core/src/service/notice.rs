//! Transient user-visible notices.

/// Why a notice was raised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoticeKind {
    /// Add was rejected because an active task already has this title.
    DuplicateTitle(String),
}

/// Dismissible message that also expires on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn duplicate_title(title: &str) -> Self {
        Self {
            kind: NoticeKind::DuplicateTitle(title.to_string()),
            message: format!("Task \"{title}\" already exists!"),
        }
    }
}
