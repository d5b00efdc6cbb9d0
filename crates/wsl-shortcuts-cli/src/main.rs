//! WSL Shortcuts - terminal front-end for creating Start Menu shortcuts to
//! WSL GUI applications.
//!
//! Each subcommand performs one of the flows of the desktop window (detect,
//! scan, list, add custom, create, remove) and prints the same status line.
//! Logs go to stderr so `--json` output on stdout stays machine readable.

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;
use wsl_shortcuts_core::{
    ApplicationEntry, Config, DiscoveryMode, LnkShortcutWriter, Notice, NoticeLevel, Session,
    SystemCommandRunner,
};

#[derive(Parser, Debug)]
#[command(name = "wsl-shortcuts")]
#[command(about = "Create Windows Start Menu shortcuts for WSL GUI applications")]
#[command(version)]
struct Args {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Start Menu folder name to use instead of the distribution name
    #[arg(long, global = true)]
    folder: Option<String>,

    /// Read all manifests of a location with a single subsystem call
    #[arg(long, global = true)]
    batched: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the default WSL distribution and its shortcut folder
    Distro,
    /// List GUI applications installed in the distribution
    Apps,
    /// List existing shortcuts
    List,
    /// Create shortcuts for discovered and custom applications
    Create {
        /// Display names of discovered applications (case-insensitive)
        names: Vec<String>,

        /// Create shortcuts for every discovered application
        #[arg(long, conflicts_with = "names")]
        all: bool,

        #[command(flatten)]
        custom: CustomArgs,
    },
    /// Remove shortcuts by file name
    Remove {
        #[arg(required = true)]
        files: Vec<String>,
    },
    /// Show the launch command a shortcut would use, without writing it
    Preview {
        /// Display name of a discovered application
        name: Option<String>,

        #[command(flatten)]
        custom: CustomArgs,
    },
}

#[derive(clap::Args, Debug)]
struct CustomArgs {
    /// Name of a custom application
    #[arg(id = "custom_name", long = "custom", value_name = "NAME", requires = "custom_command")]
    name: Option<String>,

    /// Command line run inside the distribution for the custom application
    #[arg(id = "custom_command", long = "command", value_name = "CMD", requires = "custom_name")]
    command: Option<String>,

    /// Image converted to the custom application's icon
    #[arg(id = "custom_icon", long = "icon", value_name = "PATH", requires = "custom_name")]
    icon: Option<PathBuf>,
}

#[derive(Serialize)]
struct Output<T: Serialize> {
    notice: Notice,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<T>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let level = if args.debug {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    let env_filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    match run(args).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Run one subcommand; `Ok(false)` when the printed notice is an error.
async fn run(args: Args) -> Result<bool> {
    let mut builder = Config::builder().folder_override(args.folder.clone());
    if args.batched {
        builder = builder.discovery_mode(DiscoveryMode::Batched);
    }
    let config = Arc::new(builder.build()?);
    info!("Starting {}", config.app_name);

    let session = Arc::new(
        Session::start(
            config,
            Arc::new(SystemCommandRunner),
            Arc::new(LnkShortcutWriter),
        )
        .await,
    );

    let work = execute(&session, args.command, args.json);
    tokio::select! {
        outcome = work => outcome,
        signal = tokio::signal::ctrl_c() => {
            signal?;
            warn!("Interrupted, stopping background work");
            session.shutdown();
            bail!("interrupted");
        }
    }
}

async fn execute(session: &Session, command: Command, json: bool) -> Result<bool> {
    match command {
        Command::Distro => {
            let (notice, distro) = match session.distro() {
                Ok(distro) => (
                    Notice::info(format!(
                        "Detected default WSL distribution: {}",
                        distro.name
                    )),
                    Some(distro.clone()),
                ),
                Err(_) => (Notice::no_distro(), None),
            };
            if !json {
                if let Some(distro) = &distro {
                    println!("{}", distro.shortcut_dir(session.config()).display());
                }
            }
            emit(json, notice, distro)
        }

        Command::Apps => match session.discover().await {
            Ok(report) => {
                if !json {
                    for entry in &report.entries {
                        println!("{}\t{}", entry.display_name, entry.invocation);
                    }
                }
                emit(json, Notice::from_discovery(&report), Some(report))
            }
            Err(e) => emit_error(json, &e),
        },

        Command::List => match session.list_shortcuts().await {
            Ok(outcome) => {
                if !json {
                    for file in &outcome.files {
                        println!("{}", file);
                    }
                }
                emit(json, Notice::from_list(&outcome), Some(outcome))
            }
            Err(e) => emit_error(json, &e),
        },

        Command::Create { names, all, custom } => {
            let mut selected = Vec::new();
            if all || !names.is_empty() {
                let report = match session.discover().await {
                    Ok(report) => report,
                    Err(e) => return emit_error(json, &e),
                };
                if all {
                    selected.extend(report.entries);
                } else {
                    match select_by_name(&report.entries, &names) {
                        Ok(found) => selected.extend(found),
                        Err(notice) => return emit::<()>(json, notice, None),
                    }
                }
            }

            if let Some(name) = custom.name {
                let invocation = custom.command.unwrap_or_default();
                match session.add_custom(name, invocation, custom.icon).await {
                    Ok(outcome) => {
                        let notice = Notice::from_submit(&outcome);
                        if notice.level == NoticeLevel::Warning && !json {
                            println!("{}", notice);
                        }
                        selected.push(outcome.entry);
                    }
                    Err(e) => return emit_error(json, &e),
                }
            }

            if selected.is_empty() {
                return emit::<()>(json, Notice::warning("No applications selected"), None);
            }

            match session.create(selected).await {
                Ok(report) => emit(json, Notice::from_create(&report), Some(report)),
                Err(e) => emit_error(json, &e),
            }
        }

        Command::Remove { files } => match session.remove(files).await {
            Ok(report) => emit(json, Notice::from_remove(&report), Some(report)),
            Err(e) => emit_error(json, &e),
        },

        Command::Preview { name, custom } => {
            let entry = match (name, custom.name) {
                (_, Some(custom_name)) => ApplicationEntry::custom(
                    custom_name,
                    custom.command.unwrap_or_default(),
                    custom.icon,
                ),
                (Some(name), None) => {
                    let report = match session.discover().await {
                        Ok(report) => report,
                        Err(e) => return emit_error(json, &e),
                    };
                    match select_by_name(&report.entries, std::slice::from_ref(&name)) {
                        Ok(mut found) => found.remove(0),
                        Err(notice) => return emit::<()>(json, notice, None),
                    }
                }
                (None, None) => bail!("give an application name or --custom NAME --command CMD"),
            };

            match session.preview(&entry) {
                Ok((spec, path)) => {
                    if !json {
                        println!("{}", path.display());
                        println!("{} {}", spec.target, spec.arguments);
                    }
                    emit(
                        json,
                        Notice::info(format!("Shortcut for '{}'", entry.display_name)),
                        Some(spec),
                    )
                }
                Err(e) => emit_error(json, &e),
            }
        }
    }
}

/// Pick discovered entries by display name, failing on the first unknown name.
fn select_by_name(
    entries: &[ApplicationEntry],
    names: &[String],
) -> std::result::Result<Vec<ApplicationEntry>, Notice> {
    names
        .iter()
        .map(|name| {
            entries
                .iter()
                .find(|e| e.display_name.eq_ignore_ascii_case(name.trim()))
                .cloned()
                .ok_or_else(|| Notice::error(format!("Application not found: {}", name)))
        })
        .collect()
}

fn emit<T: Serialize>(json: bool, notice: Notice, result: Option<T>) -> Result<bool> {
    let ok = !notice.is_error();
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&Output { notice, result })?
        );
    } else if ok {
        println!("{}", notice);
    } else {
        eprintln!("{}", notice);
    }
    Ok(ok)
}

fn emit_error(json: bool, err: &wsl_shortcuts_core::ShortcutError) -> Result<bool> {
    let notice = if err.is_environment() {
        Notice::no_distro()
    } else {
        Notice::from_error(err)
    };
    emit::<()>(json, notice, None)
}
