// src/main.rs
// DOCUMENTATION: Application entry point
// PURPOSE: Initialize config, logging and the trip client, then run one command

mod config;
mod errors;
mod handlers;
mod i18n;
mod models;
mod services;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use config::{ColorMode, Config, Preferences};
use dotenv::dotenv;
use handlers::preferences::ModeChange;
use handlers::AppContext;
use models::{Language, PlaceCategory};
use services::TripPlannerClient;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Parser)]
#[command(name = "tripplanner", version, about = "Plan trips, pick places, export itineraries")]
struct Args {
    /// Output and places language (en, es, cs); defaults to the saved preference
    #[arg(long, global = true)]
    lang: Option<Language>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List planned trips
    Trips,
    /// Show one trip
    Show { id: i64 },
    /// Create a trip
    Create {
        #[arg(long)]
        city: String,
        #[arg(long, default_value_t = 1)]
        days: u32,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Delete a trip
    Delete {
        id: i64,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Browse nearby places for a trip
    Places {
        id: i64,
        #[arg(long, default_value = "all")]
        category: PlaceCategory,
        /// Filter by name or category
        #[arg(long, short, default_value = "")]
        query: String,
    },
    /// Mark places to visit and save the selection
    Select {
        id: i64,
        #[arg(required = true)]
        xids: Vec<String>,
        /// Unmark instead of mark
        #[arg(long)]
        remove: bool,
    },
    /// Download the trip itinerary as PDF
    Export {
        id: i64,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Show or change the color mode
    ColorMode { mode: Option<ModeArg> },
    /// Show or change the saved language
    Language { code: Option<Language> },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    Light,
    Dark,
    Toggle,
}

impl From<ModeArg> for ModeChange {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Light => ModeChange::Set(ColorMode::Light),
            ModeArg::Dark => ModeChange::Set(ColorMode::Dark),
            ModeArg::Toggle => ModeChange::Toggle,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Load environment variables
    dotenv().ok();

    // 2. Load configuration
    let config = Config::from_env();

    // 3. Initialize logging (RUST_LOG wins over LOG_LEVEL)
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.log_level.as_str()),
    )
    .init();

    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Configuration error: {}", e))?;

    let args = Args::parse();

    // 4. Load preferences
    let mut preferences = Preferences::load(&config.preferences_path).unwrap_or_else(|e| {
        log::warn!("{}", e);
        Preferences::default()
    });
    let language = args.lang.unwrap_or(preferences.language);

    // 5. Run the command
    let result = match args.command {
        Command::ColorMode { mode } => handlers::preferences::color_mode(
            &config.preferences_path,
            &mut preferences,
            mode.map(ModeChange::from),
        ),
        Command::Language { code } => {
            handlers::preferences::language(&config.preferences_path, &mut preferences, code)
        }
        command => {
            let client =
                TripPlannerClient::new(&config).context("Failed to initialize trip client")?;
            log::debug!("Trip service: {}", client.base_url());
            let ctx = AppContext {
                config,
                client: Arc::new(client),
                language,
            };
            run(&ctx, command).await
        }
    };

    if let Err(e) = result {
        if let Some(status) = e.status() {
            log::debug!("Trip service answered with status {}", status);
        }
        eprintln!(
            "{}: {}",
            i18n::t(language, "error"),
            handlers::describe_error(&e, language)
        );
        std::process::exit(1);
    }
    Ok(())
}

async fn run(ctx: &AppContext, command: Command) -> Result<(), errors::TripPlannerError> {
    match command {
        Command::Trips => handlers::trips::list_trips(ctx).await,
        Command::Show { id } => handlers::trips::show_trip(ctx, id).await,
        Command::Create {
            city,
            days,
            description,
        } => handlers::trips::create_trip(ctx, &city, days, &description).await,
        Command::Delete { id, yes } => handlers::trips::delete_trip(ctx, id, yes).await,
        Command::Places {
            id,
            category,
            query,
        } => handlers::places::show_places(ctx, id, category, &query).await,
        Command::Select { id, xids, remove } => {
            handlers::places::select_places(ctx, id, &xids, remove).await
        }
        Command::Export { id, out } => handlers::export::export_trip(ctx, id, out).await,
        Command::ColorMode { .. } | Command::Language { .. } => Ok(()),
    }
}
