//! Command-line shell over `lontara_core`.
//!
//! # Responsibility
//! - Publish materials and inspect student inboxes against a SQLite store.
//! - Keep output deterministic for local sanity checks.

use chrono::Utc;
use clap::{Parser, Subcommand};
use lontara_core::db::open_db;
use lontara_core::service::notification_panel::EMPTY_PANEL_MESSAGE;
use lontara_core::{
    init_logging, EventLogRepository, KvEventLog, KvNotificationRepository, MaterialDraft,
    MaterialService, NotificationCenter, NotificationPanel, NotificationPolicy, RichDocument,
    SessionUser, SqliteKvStore, UserRole,
};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "lontara", version, about = "School portal notification tools")]
struct Cli {
    /// SQLite file holding the portal key-value store.
    #[arg(long, default_value = "lontara.sqlite3")]
    db: PathBuf,

    /// Absolute directory for rolling log files. Logging is off when unset.
    #[arg(long)]
    log_dir: Option<String>,

    #[arg(long, default_value_t = lontara_core::default_log_level().to_string())]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Health check.
    Ping,
    /// Publish a new learning material and announce it to students.
    Publish {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "sekolah-1")]
        school: String,
        /// Paragraph text of the material body.
        #[arg(long)]
        content: Option<String>,
        #[arg(long, default_value_t = 2)]
        duration_jp: u32,
    },
    /// Reconcile and print a user's notifications.
    Inbox {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "siswa")]
        role: String,
        #[arg(long, default_value = "sekolah-1")]
        school: String,
        /// Open the panel, marking everything read.
        #[arg(long)]
        open: bool,
        /// Clear all notifications.
        #[arg(long)]
        clear: bool,
    },
    /// Print the global event log.
    Events,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        if let Err(err) = init_logging(&cli.log_level, log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), String> {
    if let Command::Ping = cli.command {
        println!("lontara_core ping={}", lontara_core::ping());
        println!("lontara_core version={}", lontara_core::core_version());
        return Ok(());
    }

    let conn = open_db(&cli.db).map_err(|err| format!("cannot open `{}`: {err}", cli.db.display()))?;
    let store = SqliteKvStore::new(&conn);

    match cli.command {
        Command::Ping => Ok(()),
        Command::Publish {
            title,
            school,
            content,
            duration_jp,
        } => {
            let mut doc = RichDocument::new();
            doc.push_heading(2, title.as_str());
            doc.push_paragraph(content.unwrap_or_else(|| title.clone()));

            let author = SessionUser::new(UserRole::Guru, "cli", school);
            let draft = MaterialDraft {
                title: title.clone(),
                content: doc.render_html(),
                learning_objectives: title.clone(),
                learning_goals: title,
                graduate_profile: vec!["Bernalar kritis".to_string()],
                duration_jp,
                ..MaterialDraft::default()
            };
            let mut materials = MaterialService::new(KvEventLog::new(&store), Vec::new());
            let created = materials
                .save(&author, draft, Utc::now())
                .map_err(|err| err.to_string())?;
            println!("published {} \"{}\"", created.id, created.title);
            Ok(())
        }
        Command::Inbox {
            name,
            role,
            school,
            open,
            clear,
        } => {
            let role = UserRole::parse(&role)
                .ok_or_else(|| format!("unknown role `{role}`; expected guru|siswa|admin"))?;
            let mut center = NotificationCenter::new(
                KvEventLog::new(&store),
                KvNotificationRepository::new(&store),
                NotificationPolicy::default(),
            );
            center.set_session(Some(SessionUser::new(role, name, school)));

            let mut panel = NotificationPanel::new();
            println!("unread={}", center.unread_count());
            if open {
                panel.toggle_open(&mut center);
            }
            if clear {
                panel.clear_all(&mut center);
            }

            let rows = NotificationPanel::rows(&center, Utc::now());
            if rows.is_empty() {
                println!("{EMPTY_PANEL_MESSAGE}");
            }
            for row in rows {
                println!("{}\t{}\t{}", row.id, row.elapsed, row.message);
            }
            Ok(())
        }
        Command::Events => {
            for event in KvEventLog::new(&store).load_events() {
                println!(
                    "{}\t{}",
                    lontara_core::model::timestamp::format_iso_millis(&event.timestamp),
                    event.kind.as_wire()
                );
            }
            Ok(())
        }
    }
}
