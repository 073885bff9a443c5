//! Command-line surface.

use balance_core::service::draft::TaskDraft;
use balance_core::{ConfigOverrides, Intent, RecordId, ResourceFields, TaskFields, TaskKind};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "balance", version, about = "Work-life balance planner")]
pub struct Cli {
    /// Store database file (env: BALANCE_DB_PATH)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Directory for rolling log files (env: BALANCE_LOG_DIR)
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error (env: BALANCE_LOG_LEVEL)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the tasks of one day (default: today)
    Day { date: Option<NaiveDate> },
    /// Add or remove tasks
    Task {
        #[command(subcommand)]
        action: TaskCommand,
    },
    /// Manage the resource notebook
    Resource {
        #[command(subcommand)]
        action: ResourceCommand,
    },
    /// Switch between light and dark mode
    Theme { mode: ThemeMode },
    /// Print the whole planner state
    Status,
}

#[derive(Debug, Subcommand)]
pub enum TaskCommand {
    Add {
        title: String,
        /// Day of the task, YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Start time, HH:MM (default: 09:00)
        #[arg(long)]
        from: Option<String>,
        /// End time, HH:MM (default: 17:00)
        #[arg(long)]
        to: Option<String>,
        /// Mark as personal time instead of work
        #[arg(long)]
        personal: bool,
    },
    Remove { id: String },
}

#[derive(Debug, Subcommand)]
pub enum ResourceCommand {
    Add {
        title: String,
        #[arg(long, default_value = "")]
        url: String,
        #[arg(long, default_value = "")]
        notes: String,
    },
    Remove { id: String },
    List,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThemeMode {
    Dark,
    Light,
    Toggle,
}

/// What to print after the intent ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Day,
    Resources,
    Theme,
    Everything,
}

impl Cli {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            db_path: self.db.clone(),
            log_dir: self.log_dir.clone().map(absolutize),
            log_level: self.log_level.clone(),
        }
    }
}

impl Command {
    /// Maps the command to intents, filling unset task fields from `draft`.
    pub fn into_intents(self, draft: &TaskDraft) -> (Vec<Intent>, Screen) {
        match self {
            Self::Day { date } => (
                vec![Intent::SelectDate(Some(date.unwrap_or(draft.date)))],
                Screen::Day,
            ),
            Self::Task {
                action:
                    TaskCommand::Add {
                        title,
                        date,
                        from,
                        to,
                        personal,
                    },
            } => {
                let date = date.unwrap_or(draft.date);
                let kind = if personal { TaskKind::Personal } else { draft.kind };
                let fields = TaskFields {
                    title,
                    date,
                    from_time: from.unwrap_or_else(|| draft.from_time.clone()),
                    to_time: to.unwrap_or_else(|| draft.to_time.clone()),
                    is_work: kind.is_work(),
                };
                (
                    vec![Intent::SelectDate(Some(date)), Intent::SubmitTask(fields)],
                    Screen::Day,
                )
            }
            Self::Task {
                action: TaskCommand::Remove { id },
            } => (vec![Intent::RemoveTask(RecordId::from(id))], Screen::Day),
            Self::Resource {
                action: ResourceCommand::Add { title, url, notes },
            } => (
                vec![Intent::SubmitResource(ResourceFields { title, url, notes })],
                Screen::Resources,
            ),
            Self::Resource {
                action: ResourceCommand::Remove { id },
            } => (
                vec![Intent::RemoveResource(RecordId::from(id))],
                Screen::Resources,
            ),
            Self::Resource {
                action: ResourceCommand::List,
            } => (Vec::new(), Screen::Resources),
            Self::Theme { mode } => {
                let intent = match mode {
                    ThemeMode::Dark => Intent::SetTheme(true),
                    ThemeMode::Light => Intent::SetTheme(false),
                    ThemeMode::Toggle => Intent::ToggleTheme,
                };
                (vec![intent], Screen::Theme)
            }
            Self::Status => (Vec::new(), Screen::Everything),
        }
    }
}

fn absolutize(path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        return path;
    }
    match std::env::current_dir() {
        Ok(cwd) => cwd.join(path),
        Err(_) => path,
    }
}
