mod cli_messages;
mod config;
mod consts;
mod controller;
mod endpoints;
mod error_classifier;
mod events;
mod logging;
mod model;
mod runtime;
mod session;
mod source;
mod ui;

use crate::config::{Config, get_config_path, get_log_path};
use crate::consts::cli_consts::http::BASE_URL_ENV;
use crate::controller::DashboardController;
use crate::endpoints::DiscoveryMode;
use crate::logging::LogTarget;
use crate::session::{ConsoleSink, run_headless_mode, run_tui_mode, setup_session};
use crate::source::DataSource;
use crate::source::client::HttpDataSource;
use clap::{Parser, Subcommand};
use std::error::Error;
use std::path::Path;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
/// Command-line arguments
struct Args {
    /// Command to execute
    #[command(subcommand)]
    command: Command,
}

/// Overrides shared by every command that talks to the data source.
#[derive(clap::Args, Debug, Default)]
struct SourceArgs {
    /// Base URL of the data source, e.g. http://raspberrypi.local:5000
    #[arg(long, value_name = "URL")]
    url: Option<String>,

    /// Discovery endpoint variant: `root` or `setup`
    #[arg(long, value_name = "MODE")]
    discovery: Option<DiscoveryMode>,
}

#[derive(Subcommand)]
enum Command {
    /// Start polling and show the quadrant dashboard
    Start {
        #[command(flatten)]
        source: SourceArgs,

        /// Seconds between data refreshes
        #[arg(long, value_name = "SECS")]
        data_interval: Option<u64>,

        /// Seconds between label discoveries
        #[arg(long, value_name = "SECS")]
        label_interval: Option<u64>,

        /// Readings older than this many minutes are flagged
        #[arg(long, value_name = "MINUTES")]
        alert_threshold: Option<i64>,

        /// Print events to the console instead of drawing the dashboard
        #[arg(long = "headless", action = clap::ArgAction::SetTrue)]
        headless: bool,

        /// Enable background colors
        #[arg(long = "with-background", action = clap::ArgAction::SetTrue)]
        with_background: bool,
    },
    /// Fetch the field labels and box ids once and print them
    Labels {
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Discover, fetch one field's readings and print the quadrants
    Snapshot {
        #[command(flatten)]
        source: SourceArgs,

        /// Field to show instead of the first discovered one
        #[arg(long, value_name = "FIELD")]
        field: Option<String>,
    },
    /// Inspect or edit the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Write the default configuration file
    Init,
    /// Delete the configuration file
    Reset,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config_path = get_config_path()?;
    let args = Args::parse();

    let log_target = match &args.command {
        Command::Start {
            headless: false, ..
        } => LogTarget::File(get_log_path(&config_path)),
        _ => LogTarget::Stderr,
    };
    if let Err(e) = logging::init_logging(log_target) {
        print_cmd_warn!("Logging disabled", "{}", e);
    }
    match args.command {
        Command::Start {
            source,
            data_interval,
            label_interval,
            alert_threshold,
            headless,
            with_background,
        } => {
            let mut config = resolve_config(&config_path, &source)?;
            if let Some(secs) = data_interval {
                config.data_interval_secs = secs;
            }
            if let Some(secs) = label_interval {
                config.label_interval_secs = secs;
            }
            if let Some(minutes) = alert_threshold {
                config.alert_threshold_minutes = minutes;
            }

            let session = setup_session(&config);
            if headless {
                run_headless_mode(session).await
            } else {
                run_tui_mode(session, with_background).await
            }
        }
        Command::Labels { source } => {
            let config = resolve_config(&config_path, &source)?;
            let client = HttpDataSource::new(config.endpoints(), config.request_timeout());
            let mut controller =
                DashboardController::new(ConsoleSink::new(), config.alert_threshold_minutes);
            if !controller.refresh_labels(&client).await {
                return Err(Box::from(format!(
                    "Discovery failed against {}",
                    client.endpoints()
                )));
            }
            print_cmd_info!("Fields", "{}", controller.fields().join(", "));
            let boxes: Vec<&str> = controller.box_ids().iter().map(|b| b.as_str()).collect();
            print_cmd_info!("Boxes", "{}", boxes.join(", "));
            Ok(())
        }
        Command::Snapshot { source, field } => {
            let config = resolve_config(&config_path, &source)?;
            let client = HttpDataSource::new(config.endpoints(), config.request_timeout());
            let mut controller =
                DashboardController::new(ConsoleSink::new(), config.alert_threshold_minutes);
            if !controller.refresh_labels(&client).await {
                return Err(Box::from(format!(
                    "Discovery failed against {}",
                    client.endpoints()
                )));
            }
            if let Some(field) = field {
                if !controller.select_field(&field) {
                    return Err(Box::from(format!(
                        "Unknown field '{}'. Known fields: {}",
                        field,
                        controller.fields().join(", ")
                    )));
                }
            }
            controller.refresh_data(&client).await;
            let sink = controller.sink();
            if sink.frames() == 0 {
                return Err(Box::from(format!(
                    "No quadrant could be rendered ({} errors)",
                    sink.errors()
                )));
            }
            Ok(())
        }
        Command::Config { action } => match action {
            ConfigAction::Show => {
                let config = resolve_config(&config_path, &SourceArgs::default())?;
                println!("{}", serde_json::to_string_pretty(&config)?);
                Ok(())
            }
            ConfigAction::Init => {
                if config_path.exists() {
                    print_cmd_warn!(
                        "Config exists",
                        "{} was left unchanged",
                        config_path.display()
                    );
                    return Ok(());
                }
                Config::default()
                    .save(&config_path)
                    .map_err(|e| format!("Failed to save config: {}", e))?;
                print_cmd_success!("Config written", "{}", config_path.display());
                Ok(())
            }
            ConfigAction::Reset => {
                Config::clear(&config_path)?;
                print_cmd_success!("Config reset", "{}", config_path.display());
                Ok(())
            }
        },
    }
}

/// Layer the config file, the base URL environment variable and the
/// command-line overrides, in increasing priority.
fn resolve_config(config_path: &Path, source: &SourceArgs) -> Result<Config, Box<dyn Error>> {
    let mut config = Config::load_or_default(config_path).map_err(|e| {
        let path = config_path.display().to_string();
        print_cmd_error!("Invalid config file", path.as_str());
        format!("Failed to load config: {}", e)
    })?;
    if let Ok(url) = std::env::var(BASE_URL_ENV) {
        if !url.trim().is_empty() {
            config.base_url = url.trim().to_string();
        }
    }
    if let Some(url) = &source.url {
        config.base_url = url.clone();
    }
    if let Some(discovery) = source.discovery {
        config.discovery = discovery;
    }
    Ok(config)
}
