//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `tasklist_core` linkage independently from the Flutter runtime.
//! - Print the persisted list through the plain-text surface.

use std::process::ExitCode;
use tasklist_core::config::resolve_db_path;
use tasklist_core::{render_text, SqliteKvRepository, TaskService};

fn main() -> ExitCode {
    println!("tasklist_core ping={}", tasklist_core::ping());
    println!("tasklist_core version={}", tasklist_core::core_version());

    let db_path = resolve_db_path();
    let kv = match SqliteKvRepository::open(&db_path) {
        Ok(kv) => kv,
        Err(err) => {
            eprintln!("failed to open `{}`: {err}", db_path.display());
            return ExitCode::FAILURE;
        }
    };

    let service = TaskService::new(kv);
    print!("{}", render_text(&service.snapshot()));
    ExitCode::SUCCESS
}
