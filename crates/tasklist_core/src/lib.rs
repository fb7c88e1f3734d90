//! Core domain logic for the task list.
//! This crate is the single source of truth for list invariants.

pub mod clock;
pub mod config;
pub mod db;
pub mod extension;
pub mod logging;
pub mod model;
pub mod render;
pub mod repo;
pub mod service;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::TaskListConfig;
pub use extension::celebration::CelebrationProvider;
pub use extension::reorder::{
    ChannelReorderProvider, ReorderMove, ReorderProvider, ReorderReporter,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::counters::Counters;
pub use model::task::{Task, TaskId, TaskValidationError};
pub use model::theme::Theme;
pub use render::{render_text, RenderSurface, TaskListSnapshot, TaskView, TextSurface};
pub use repo::kv_repo::{
    KvRepository, MemoryKvRepository, SqliteKvRepository, StoreError, StoreResult,
};
pub use repo::task_list_repo::TaskListRepository;
pub use service::notice::{Notice, NoticeKind};
pub use service::task_service::{
    AddOutcome, EditOutcome, TaskResult, TaskService, TaskServiceError, UndoOutcome,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
