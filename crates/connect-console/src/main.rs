//! connect-console: terminal administration console for Amazon Connect
//!
//! Without a subcommand the interactive TUI starts. The other subcommands run
//! one console action and exit, for scripting.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use connect_console::aws::{ActionError, AwsContext, ConnectClient, FromAwsContext};
use connect_console::config::{self, ConsoleConfig};
use connect_console::store::SnapshotStore;
use connect_console::tui::{self, App, LogCapture, LogCaptureLayer};
use connect_console::workflow::{self, BatchSummary, InstanceId, Session};
use connect_console_common::{Resource, ResourceKind};
use serde::Serialize;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "connect-console")]
#[command(about = "Manage Amazon Connect queues and contact flows from the terminal")]
#[command(version)]
struct Args {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(clap::Args, Debug)]
struct GlobalArgs {
    /// AWS region (default: SDK resolution chain)
    #[arg(long, global = true)]
    region: Option<String>,

    /// AWS profile to use (overrides AWS_PROFILE env var)
    #[arg(long, global = true)]
    aws_profile: Option<String>,

    /// Directory for snapshot files and connect.json
    #[arg(long, global = true, env = "CONNECT_CONSOLE_DATA_DIR")]
    data_dir: Option<std::path::PathBuf>,

    /// Amazon Connect instance id (default: the one saved in connect.json)
    #[arg(long, global = true, env = "CONNECT_INSTANCE_ID")]
    instance_id: Option<String>,
}

impl From<GlobalArgs> for ConsoleConfig {
    fn from(args: GlobalArgs) -> Self {
        Self {
            aws: config::AwsConfig {
                region: args.region,
                aws_profile: args.aws_profile,
            },
            store: config::StoreConfig {
                data_dir: args.data_dir,
            },
            instance_id: args.instance_id,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum KindArg {
    Queues,
    Flows,
}

impl From<KindArg> for ResourceKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Queues => ResourceKind::Queue,
            KindArg::Flows => ResourceKind::ContactFlow,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the interactive console (default)
    Tui,

    /// Describe an instance and save it as the current configuration
    Configure {
        /// Amazon Connect instance id
        #[arg(value_name = "INSTANCE_ID")]
        id: String,
    },

    /// Fetch queues or contact flows into the local snapshot
    Load {
        #[arg(value_enum)]
        kind: KindArg,
    },

    /// Print a local snapshot or selected subset
    Show {
        #[arg(value_enum)]
        kind: KindArg,

        /// Show the last persisted selection instead of the snapshot
        #[arg(long)]
        selected: bool,

        /// Output format
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Delete snapshot rows from the instance
    Delete {
        #[arg(value_enum)]
        kind: KindArg,

        /// Id of a row to delete (repeatable)
        #[arg(long = "id", required_unless_present = "all")]
        ids: Vec<String>,

        /// Select every row of the snapshot
        #[arg(long)]
        all: bool,

        /// Actually delete (default is dry-run)
        #[arg(long)]
        execute: bool,
    },

    /// List the quick connects of snapshot queues
    Analyse {
        /// Id of a queue to analyse (repeatable)
        #[arg(long = "id", required_unless_present = "all")]
        ids: Vec<String>,

        /// Select every queue of the snapshot
        #[arg(long)]
        all: bool,

        /// Output format
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Remove all local snapshot and selection files
    Clear,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        print_error(&e);
        std::process::exit(1);
    }
}

/// Print error in a user-friendly way
fn print_error(e: &anyhow::Error) {
    use std::io::Write;

    let mut stderr = std::io::stderr();

    let _ = writeln!(stderr, "\n\x1b[1;31mError:\x1b[0m {e}");

    let mut source = e.source();
    while let Some(cause) = source {
        let _ = writeln!(stderr, "  \x1b[33mCaused by:\x1b[0m {cause}");
        source = cause.source();
    }

    if let Some(hint) = e.downcast_ref::<ActionError>().and_then(ActionError::suggestion) {
        let _ = writeln!(stderr, "\n\x1b[36mHint:\x1b[0m {hint}");
    }

    if std::env::var("RUST_BACKTRACE").is_err() {
        let _ = writeln!(
            stderr,
            "\n\x1b[2mSet RUST_BACKTRACE=1 for a detailed backtrace\x1b[0m"
        );
    } else {
        let backtrace = e.backtrace();
        if backtrace.status() == std::backtrace::BacktraceStatus::Captured {
            let _ = writeln!(stderr, "\n\x1b[2mBacktrace:\x1b[0m\n{backtrace}");
        }
    }
}

/// Turn a failed action into an error whose top line is the kind's banner
fn action_failed(e: ActionError) -> anyhow::Error {
    let banner = e.kind.banner();
    anyhow::Error::new(e).context(banner)
}

fn init_logging(use_tui: bool) -> Result<Option<LogCapture>> {
    use tracing_subscriber::prelude::*;

    if use_tui {
        let log_capture = LogCapture::new(50);

        tui_logger::init_logger(log::LevelFilter::Info)?;
        tui_logger::set_default_level(log::LevelFilter::Info);
        tui_logger::set_level_for_target("connect_console", log::LevelFilter::Info);

        // Reduce noise from AWS SDK (show only warnings and errors)
        tui_logger::set_level_for_target("aws_config", log::LevelFilter::Warn);
        tui_logger::set_level_for_target("aws_sdk_connect", log::LevelFilter::Warn);
        tui_logger::set_level_for_target("aws_smithy_runtime", log::LevelFilter::Warn);

        tracing_subscriber::registry()
            .with(tui_logger::TuiTracingSubscriberLayer)
            .with(LogCaptureLayer::new(log_capture.clone()))
            .init();

        return Ok(Some(log_capture));
    }

    let filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into())
        .add_directive("aws_config=warn".parse()?)
        .add_directive("aws_smithy_runtime=warn".parse()?);
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    Ok(None)
}

async fn run() -> Result<()> {
    let args = Args::parse();
    let command = args.command.unwrap_or(Command::Tui);
    let log_capture = init_logging(matches!(command, Command::Tui))?;

    let config: ConsoleConfig = args.global.into();
    let data_dir = config.data_dir()?;
    config::ensure_data_dir(&data_dir)?;
    let store = SnapshotStore::new(&data_dir);

    let instance_id = config.instance_id().and_then(InstanceId::parse);
    let mut session = Session::restore(&store, instance_id);

    if let Some(profile) = config.aws_profile() {
        info!(profile = %profile, "Using AWS profile");
    }

    match command {
        Command::Tui => {
            let client = connect_client(&config).await;
            let mut app = App::new(client, store, session);
            let result = tui::run_tui(&mut app).await;

            if let Some(capture) = log_capture {
                capture.print_to_stderr();
            }
            result?;
        }

        Command::Configure { id } => {
            let client = connect_client(&config).await;
            let info = workflow::load_configuration(&client, &store, &mut session, &id)
                .await
                .map_err(action_failed)?;
            println!("Configured instance {} ({})", info.id, info.arn);
        }

        Command::Load { kind } => {
            let kind = ResourceKind::from(kind);
            let client = connect_client(&config).await;
            let summary = match kind {
                ResourceKind::Queue => {
                    workflow::load_queues(&client, &store, &mut session).await
                }
                ResourceKind::ContactFlow => {
                    workflow::load_flows(&client, &store, &mut session).await
                }
            }
            .map_err(action_failed)?;

            println!(
                "Loaded {} {} ({} fetched) into {}",
                summary.rows,
                kind.label().to_lowercase(),
                summary.fetched,
                store.snapshot_path(kind).display()
            );
            if !summary.written {
                println!("Nothing fetched; previous snapshot file left in place.");
            }
        }

        Command::Show {
            kind,
            selected,
            format,
        } => {
            handle_show(&store, kind.into(), selected, format)?;
        }

        Command::Delete {
            kind,
            ids,
            all,
            execute,
        } => {
            let kind = ResourceKind::from(kind);
            select_rows(&mut session, kind, &ids, all);

            if !execute {
                print_dry_run(&session, kind);
                return Ok(());
            }

            let client = connect_client(&config).await;
            let summary = match kind {
                ResourceKind::Queue => {
                    workflow::delete_queues(&client, &store, &mut session).await
                }
                ResourceKind::ContactFlow => {
                    workflow::delete_flows(&client, &store, &mut session).await
                }
            }
            .map_err(action_failed)?;

            println!("Deleted {} {}", summary.applied, kind.label().to_lowercase());
        }

        Command::Analyse { ids, all, format } => {
            select_rows(&mut session, ResourceKind::Queue, &ids, all);

            let client = connect_client(&config).await;
            let summary = workflow::analyse_queues(&client, &store, &mut session)
                .await
                .map_err(action_failed)?;
            print_analysis(&summary, format)?;
        }

        Command::Clear => {
            let report = workflow::clear(&store, &mut session).map_err(action_failed)?;
            println!(
                "Removed {} files ({} already absent) from {}",
                report.removed,
                report.absent,
                store.dir().display()
            );
        }
    }

    Ok(())
}

async fn connect_client(config: &ConsoleConfig) -> ConnectClient {
    let aws = AwsContext::with_profile(config.region(), config.aws_profile()).await;
    info!(region = ?aws.region(), "AWS configuration loaded");
    ConnectClient::from_context(&aws)
}

/// Mark rows of the restored snapshot by id, or all of them
fn select_rows(session: &mut Session, kind: ResourceKind, ids: &[String], all: bool) {
    if all {
        session.select_all(kind);
        return;
    }
    let selection = match kind {
        ResourceKind::Queue => &mut session.queues.selection,
        ResourceKind::ContactFlow => &mut session.flows.selection,
    };
    for id in ids {
        selection.select(id);
    }
}

fn print_dry_run(session: &Session, kind: ResourceKind) {
    let rows: Vec<(String, String)> = match kind {
        ResourceKind::Queue => selected_rows(&session.queues.snapshot, |r| {
            session.queues.is_selected(r)
        }),
        ResourceKind::ContactFlow => selected_rows(&session.flows.snapshot, |r| {
            session.flows.is_selected(r)
        }),
    };

    println!("Would delete {} {}:", rows.len(), kind.label().to_lowercase());
    for (id, name) in &rows {
        println!("  {id}  {name}");
    }
    println!();
    println!("Run with --execute to actually delete them.");
}

fn selected_rows<R: Resource>(
    rows: &[R],
    is_selected: impl Fn(&R) -> bool,
) -> Vec<(String, String)> {
    rows.iter()
        .filter(|r| is_selected(r))
        .map(|r| (r.id().to_string(), r.name().to_string()))
        .collect()
}

/// Handle the show command
fn handle_show(
    store: &SnapshotStore,
    kind: ResourceKind,
    selected: bool,
    format: OutputFormat,
) -> Result<()> {
    let path = if selected {
        store.subset_path(kind)
    } else {
        store.snapshot_path(kind)
    };
    if !path.exists() {
        println!("No file at {}", path.display());
        return Ok(());
    }

    match kind {
        ResourceKind::Queue => {
            let rows: Vec<connect_console_common::QueueRecord> = if selected {
                store.read_subset(kind)?
            } else {
                store.read_snapshot(kind)?
            };
            print_rows(&rows, format, |q| q.queue_type.clone().unwrap_or_default())
        }
        ResourceKind::ContactFlow => {
            let rows: Vec<connect_console_common::FlowRecord> = if selected {
                store.read_subset(kind)?
            } else {
                store.read_snapshot(kind)?
            };
            print_rows(&rows, format, |f| f.contact_flow_type.clone())
        }
    }
}

fn print_rows<R: Resource + Serialize>(
    rows: &[R],
    format: OutputFormat,
    type_of: impl Fn(&R) -> String,
) -> Result<()> {
    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(rows)?);
        return Ok(());
    }

    println!("{:<38} {:<20} {:<30}", "ID", "TYPE", "NAME");
    println!("{}", "-".repeat(90));
    for row in rows {
        println!(
            "{:<38} {:<20} {:<30}",
            row.id(),
            type_of(row),
            tui::truncate_str(row.name(), 30)
        );
    }
    println!("\nTotal: {} rows", rows.len());
    Ok(())
}

fn print_analysis(summary: &BatchSummary, format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Json {
        let json: Vec<_> = summary
            .analysis
            .iter()
            .map(|queue| {
                serde_json::json!({
                    "QueueId": queue.queue_id,
                    "QueueName": queue.queue_name,
                    "QuickConnects": queue.quick_connects,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&json)?);
        return Ok(());
    }

    if summary.analysis.is_empty() {
        println!("No queues analysed.");
        return Ok(());
    }
    for queue in &summary.analysis {
        println!(
            "{} ({}): {} quick connects",
            queue.queue_name,
            queue.queue_id,
            queue.quick_connects.len()
        );
        for quick_connect in &queue.quick_connects {
            println!(
                "  {:<30} {:<10} {}",
                quick_connect.name,
                quick_connect.quick_connect_type.as_deref().unwrap_or("-"),
                quick_connect.id
            );
        }
    }
    Ok(())
}
