//! EV charging service CLI
//!
//! ```sh
//! # REST API with the sample catalogue (~/.config/ev-charging/config.toml)
//! evcs serve
//!
//! # Custom config, different port, no sample data
//! evcs --config /etc/ev-charging/config.toml serve --port 9090 --no-seed
//!
//! # Run the four charging scenarios and print the notifications
//! evcs demo
//!
//! # Validate the configuration, or write a default one
//! evcs check
//! evcs init
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::{error, info};

use ev_charging::application::{run_scenarios, seed_demo_data, AppContext, ContextOptions};
use ev_charging::config::AppConfig;
use ev_charging::notifications::{MemorySink, Notification};
use ev_charging::server::{init_tracing, ServerHandle, ServerOptions};

#[derive(Parser, Debug)]
#[command(
    name = "evcs",
    version,
    about = "EV charging service: admission chain and station notifications",
    long_about = "REST API and demo runner for the EV charging service.\n\n\
                  Default config: ~/.config/ev-charging/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "EVCS_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the REST API (default).
    Serve {
        /// Override the listen port.
        #[arg(long)]
        port: Option<u16>,

        /// Start with empty stores.
        #[arg(long)]
        no_seed: bool,
    },
    /// Seed the sample catalogue, run the charging scenarios and print
    /// every notification they produce.
    Demo,
    /// Validate the configuration file and exit.
    Check,
    /// Write the default configuration to the config path.
    Init {
        /// Replace an existing file.
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli.config.unwrap_or_else(ev_charging::default_config_path);

    let mut config = match AppConfig::load(&config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            if matches!(cli.command, Some(Command::Check)) {
                eprintln!("Configuration is invalid: {}", e);
                std::process::exit(1);
            }
            eprintln!("Failed to load config from {}: {}", config_path.display(), e);
            eprintln!("Using default configuration.");
            AppConfig::default()
        }
    };
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }

    match cli.command.unwrap_or(Command::Serve {
        port: None,
        no_seed: false,
    }) {
        Command::Check => {
            println!("Configuration is valid");
            println!("   Config file   : {}", config_path.display());
            println!("   API address   : {}", config.server.address());
            println!("   Log level     : {}", config.logging.level);
            println!("   Log format    : {}", config.logging.format);
            println!("   Failure policy: {:?}", config.notifications.failure_policy);
            println!("   Demo data     : {}", config.seed.demo_data);
            Ok(())
        }
        Command::Init { force } => {
            if config_path.exists() && !force {
                eprintln!(
                    "{} already exists, use --force to overwrite",
                    config_path.display()
                );
                std::process::exit(1);
            }
            AppConfig::default().save(&config_path)?;
            println!("Wrote {}", config_path.display());
            Ok(())
        }
        Command::Demo => {
            init_tracing(&config);
            run_demo(&config)
        }
        Command::Serve { port, no_seed } => {
            init_tracing(&config);
            info!("Configuration loaded from {}", config_path.display());
            if let Some(port) = port {
                info!("CLI override: port = {}", port);
                config.server.port = port;
            }

            let mut opts = ServerOptions::new(config);
            if no_seed {
                opts.seed_demo_data = Some(false);
            }
            let handle = match ServerHandle::start(opts).await {
                Ok(handle) => handle,
                Err(e) => {
                    error!("Failed to start: {}", e);
                    return Err(e.into());
                }
            };

            handle.install_signal_handler();
            info!("Press Ctrl+C to shut down gracefully.");
            handle.wait().await;
            Ok(())
        }
    }
}

fn run_demo(config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let sink = MemorySink::shared();
    let ctx = AppContext::new(ContextOptions::from_config(config)?, sink.clone());
    let summary = seed_demo_data(&ctx)?;
    println!(
        "Loaded {} providers, {} stations, {} users\n",
        summary.providers, summary.stations, summary.users
    );
    sink.take();

    for (index, report) in run_scenarios(&ctx)?.into_iter().enumerate() {
        let mark = if report.as_expected { "ok" } else { "UNEXPECTED" };
        println!("Scenario {}: {} [{}]", index + 1, report.title, mark);
        println!("   outcome: {:?}", report.outcome);
        for notification in sink.take() {
            print_notification(&notification);
        }
        println!();
    }

    info!("Demo finished");
    Ok(())
}

fn print_notification(notification: &Notification) {
    for line in notification.to_string().lines() {
        println!("   | {}", line);
    }
}
