/*
[INPUT]:  CLI arguments, YAML configuration file, OS shutdown signals
[OUTPUT]: Task list output, job submissions, or a running poll loop with graceful shutdown
[POS]:    Binary entry point
[UPDATE]: When changing CLI flags, subcommands, startup flow, or shutdown handling
*/

use anyhow::{Context, Result, anyhow, bail};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use facility_tasks_adapter::FacilityClient;
use facility_tasks_panel::routes::{RouteTarget, navigate};
use facility_tasks_panel::wizard::show_import_export_wizard;
use facility_tasks_panel::{
    PanelConfig, PollScheduler, RouteTable, Store, Task, TriggerOutcome, cancel_task,
    fetch_current_tasks, trigger_channel_delete_task, trigger_local_content_export_task,
    trigger_local_content_import_task, trigger_remote_content_import_task,
};

#[derive(Parser, Debug)]
#[command(name = "facility-panel", version, about = "Facility management task panel")]
struct Cli {
    #[arg(long = "config", value_name = "PATH", global = true)]
    config_path: Option<PathBuf>,
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info", global = true)]
    log_level: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the current task collection
    Tasks,
    /// Open a page and keep the task list polled until interrupted
    Watch {
        /// Route to open; defaults to `start_path` from the config
        #[arg(long)]
        path: Option<String>,
    },
    /// Import content from an attached drive
    ImportLocal { drive_id: String },
    /// Export content to an attached drive
    ExportLocal { drive_id: String },
    /// Import a channel from the remote content server
    ImportRemote { channel_id: String },
    /// Delete a channel from this device
    DeleteChannel { channel_id: String },
    /// Cancel a running task
    Cancel { task_id: String },
    /// Print the route table, or resolve a single path
    Routes { path: Option<String> },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(&args.log_level)?;

    let config = load_config(args.config_path.as_ref())?;
    let table = RouteTable::facility_management();
    let store = Store::new();

    match args.command {
        Command::Routes { path } => print_routes(&table, path.as_deref())?,
        Command::Tasks => {
            let resource = build_resource(&config)?;
            let tasks = fetch_current_tasks(resource.as_ref())
                .await
                .context("fetch current tasks")?;
            print_tasks(&tasks)?;
        }
        Command::Watch { path } => {
            let resource = build_resource(&config)?;
            let path = path.unwrap_or_else(|| config.start_path.clone());
            run_watch(&config, &table, &store, resource, &path).await?;
        }
        Command::ImportLocal { drive_id } => {
            let resource = build_resource(&config)?;
            show_import_export_wizard(&store);
            let outcome =
                trigger_local_content_import_task(&store, resource.as_ref(), &drive_id).await;
            report_trigger(outcome)?;
        }
        Command::ExportLocal { drive_id } => {
            let resource = build_resource(&config)?;
            show_import_export_wizard(&store);
            let outcome =
                trigger_local_content_export_task(&store, resource.as_ref(), &drive_id).await;
            report_trigger(outcome)?;
        }
        Command::ImportRemote { channel_id } => {
            let resource = build_resource(&config)?;
            show_import_export_wizard(&store);
            let outcome =
                trigger_remote_content_import_task(&store, resource.as_ref(), &channel_id).await;
            report_trigger(outcome)?;
        }
        Command::DeleteChannel { channel_id } => {
            let resource = build_resource(&config)?;
            show_import_export_wizard(&store);
            let outcome =
                trigger_channel_delete_task(&store, resource.as_ref(), &channel_id).await;
            report_trigger(outcome)?;
        }
        Command::Cancel { task_id } => {
            let resource = build_resource(&config)?;
            cancel_task(&store, resource.as_ref(), &task_id).await?;
            println!("cancel requested for task {task_id}");
        }
    }

    Ok(())
}

fn build_resource(config: &PanelConfig) -> Result<Arc<FacilityClient>> {
    let client = FacilityClient::with_config(
        config.server.client_config(),
        &config.server.base_url,
    )
    .context("build FacilityClient")?;
    info!(base_url = %client.base_url(), "task client ready");
    Ok(Arc::new(client))
}

async fn run_watch(
    config: &PanelConfig,
    table: &RouteTable,
    store: &Store,
    resource: Arc<FacilityClient>,
    path: &str,
) -> Result<()> {
    let mut mutations = store.subscribe_mutations();
    let route = navigate(store, table, path).with_context(|| format!("open route {path}"))?;
    info!(page = %route.page, path = %route.path, "page opened");

    let shutdown = CancellationToken::new();
    setup_signal_handlers(shutdown.clone());

    let scheduler = PollScheduler::from_config(&config.polling).spawn(
        store.clone(),
        resource,
        shutdown.clone(),
    );

    let watched = store.clone();
    let printer = tokio::spawn(async move {
        loop {
            match mutations.recv().await {
                Ok(mutation) => {
                    info!(mutation = mutation.name(), "store updated");
                    if let Err(err) = print_tasks(&watched.task_list()) {
                        warn!(error = %err, "failed to print task list");
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "mutation stream lagged");
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    shutdown.cancelled().await;
    info!("shutdown signal received");

    scheduler.await.context("join poll scheduler")?;
    printer.abort();
    info!("poll scheduler shutdown complete");
    Ok(())
}

fn init_tracing(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(log_level).context("invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;
    Ok(())
}

fn load_config(path: Option<&PathBuf>) -> Result<PanelConfig> {
    if let Some(path) = path {
        info!(config_path = %path.display(), "loading configuration");
        return PanelConfig::from_file(path)
            .with_context(|| format!("load config {}", path.display()));
    }

    match PanelConfig::default_path() {
        Some(path) if path.exists() => {
            info!(config_path = %path.display(), "loading configuration");
            PanelConfig::from_file(&path).with_context(|| format!("load config {}", path.display()))
        }
        _ => {
            info!("no configuration file; using defaults");
            Ok(PanelConfig::default())
        }
    }
}

fn print_tasks(tasks: &[Task]) -> Result<()> {
    let rendered = serde_json::to_string_pretty(tasks).context("serialize task list")?;
    println!("{rendered}");
    Ok(())
}

fn report_trigger(outcome: TriggerOutcome) -> Result<()> {
    match outcome {
        TriggerOutcome::Started(task) => {
            println!("started {} task {} ({})", task.task_type, task.id, task.status);
            Ok(())
        }
        TriggerOutcome::Failed { error } => bail!(error),
    }
}

fn print_routes(table: &RouteTable, path: Option<&str>) -> Result<()> {
    if let Some(path) = path {
        let resolved = table.resolve(path)?;
        println!("{} -> {} {:?}", path, resolved.page, resolved.params);
        return Ok(());
    }

    for route in table.routes() {
        match route.target {
            RouteTarget::Page(page) => println!("{:<22} {}", route.path, page),
            RouteTarget::Redirect(to) => println!("{:<22} -> {}", route.path, to),
        }
    }
    Ok(())
}

fn setup_signal_handlers(shutdown: CancellationToken) {
    let shutdown_clone = shutdown.clone();
    tokio::spawn(async move {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "failed to install SIGINT handler");
            return;
        }
        info!("received SIGINT");
        shutdown_clone.cancel();
    });

    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let shutdown_clone = shutdown.clone();
        tokio::spawn(async move {
            match signal(SignalKind::terminate()) {
                Ok(mut stream) => {
                    stream.recv().await;
                    info!("received SIGTERM");
                    shutdown_clone.cancel();
                }
                Err(err) => {
                    warn!(error = %err, "failed to install SIGTERM handler");
                }
            }
        });
    }
}
