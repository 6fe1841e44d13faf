//! Tracker CLI
//!
//! Drives the project and task use cases end to end against in-memory
//! stores, publishing events through the backend chosen by `EVENT_PUBLISHER`.

use clap::{Parser, Subcommand};
use core_config::tracing::{init_tracing, install_color_eyre};
use core_config::{AppConfig, FromEnv};
use eyre::{Result, WrapErr};
use messaging::{EventDispatcher, PublisherConfig, build_publisher};
use tracing::info;

mod demo;

#[derive(Parser)]
#[command(name = "tracker")]
#[command(about = "Project and task tracker")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a full project/task lifecycle and print the resulting state
    Demo {
        /// Name of the demo project
        #[arg(short, long, default_value = "Alpha")]
        project: String,

        /// Forward window for the "due soon" listing. Defaults to DUE_SOON_DAYS.
        #[arg(short, long)]
        due_within: Option<u32>,
    },

    /// Print the effective configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    install_color_eyre();

    let config = AppConfig::from_env().wrap_err("Failed to load application config")?;
    init_tracing(&config);

    let publisher_config =
        PublisherConfig::from_env().wrap_err("Failed to load event publisher config")?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Demo {
            project,
            due_within,
        } => {
            let publisher = build_publisher(&publisher_config)
                .await
                .wrap_err("Failed to create event publisher")?;
            info!(
                service = %config.service_name,
                publisher = publisher.name(),
                "Starting demo"
            );

            let events = EventDispatcher::new(publisher, publisher_config);
            let days = due_within.unwrap_or(config.due_soon_days);
            let report = demo::run(events, &project, days).await?;

            println!("{}", serde_json::to_string_pretty(&report)?);
        }

        Commands::Config => {
            println!("service:          {}", config.service_name);
            println!("environment:      {:?}", config.environment);
            println!("due soon (days):  {}", config.due_soon_days);
            println!("publisher:        {}", publisher_config.backend);
            println!("project topic:    {}", publisher_config.topic_for("project"));
            println!("task topic:       {}", publisher_config.topic_for("task"));
        }
    }

    Ok(())
}
