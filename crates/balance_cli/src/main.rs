//! `balance` command-line front end.
//!
//! # Responsibility
//! - Resolve configuration, start logging, open the local store.
//! - Dispatch one user intent per invocation and print the resulting state.
//!
//! # Invariants
//! - An unopenable store never aborts the run; intents execute against a
//!   detached in-memory store and every save is reported as not persisted.

mod args;
mod output;

use anyhow::{Context, Result};
use args::Cli;
use balance_core::db::open_db;
use balance_core::{
    dispatch, init_logging, Intent, KeyValueStore, MemoryKeyValueStore, Notice, PlannerConfig,
    PlannerService, RenderState, SqliteKeyValueStore,
};
use chrono::Local;
use clap::Parser;
use log::{info, warn};
use rusqlite::Connection;
use std::path::Path;
use std::process::ExitCode;

fn main() -> ExitCode {
    run(Cli::parse())
}

fn run(cli: Cli) -> ExitCode {
    let config = PlannerConfig::resolve(cli.overrides());
    // File logging is diagnostics only; the planner keeps working without it.
    if let Err(err) = init_logging(&config.log_level, &config.log_dir) {
        eprintln!("warning: file logging disabled: {err}");
    }

    let opened = open_store(&config.db_path);
    let today = Local::now().date_naive();

    let failed = with_store(&opened, |store| {
        let mut service = PlannerService::load(store, today);
        let (intents, screen) = cli.command.into_intents(service.task_draft());
        let outcome = apply_intents(&mut service, intents);

        for notice in &outcome.notices {
            println!("{}", output::render_notice(notice));
        }
        print!(
            "{}",
            output::render_screen(&RenderState::capture(&service), screen)
        );
        outcome.failed
    });

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn open_store(path: &Path) -> Result<Connection> {
    open_db(path).with_context(|| format!("cannot open store at `{}`", path.display()))
}

/// Runs `body` against the opened store, or against a detached in-memory
/// store when opening failed.
fn with_store<R>(opened: &Result<Connection>, body: impl FnOnce(&dyn KeyValueStore) -> R) -> R {
    match opened {
        Ok(conn) => body(&SqliteKeyValueStore::new(conn)),
        Err(err) => {
            let reason = format!("{err:#}");
            warn!("event=db_open module=cli status=fallback error={reason}");
            eprintln!("warning: {reason}; changes will not be saved");
            body(&MemoryKeyValueStore::detached(reason))
        }
    }
}

/// Notices produced by one invocation.
#[derive(Debug, Default)]
struct Outcome {
    notices: Vec<Notice>,
    failed: bool,
}

/// Dispatches `intents` in order, stopping after the first error notice.
fn apply_intents<S: KeyValueStore>(
    service: &mut PlannerService<S>,
    intents: Vec<Intent>,
) -> Outcome {
    info!(
        "event=cli_dispatch module=cli status=start intents={}",
        intents.len()
    );

    let mut outcome = Outcome::default();
    for intent in intents {
        let Some(notice) = dispatch(service, intent) else {
            continue;
        };
        let is_error = notice.is_error();
        outcome.notices.push(notice);
        if is_error {
            outcome.failed = true;
            break;
        }
    }
    outcome
}
