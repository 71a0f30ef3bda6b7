//! Seeder CLI
//!
//! Fills the `users` and `time_logs` collections with synthetic data. The
//! database connection is configured by HOST, PORT, USERNAME, PASSWORD and
//! DATABASE_NAME.

use anyhow::Context;
use clap::Parser;
use tms_mongodb::ClientProvider;
use tms_seed::{DataGenerator, GeneratorConfig, Seeder, MAX_LOGS_PER_USER, MAX_USERS};
use tracing::{info, warn, Level};

#[derive(Parser, Debug)]
#[command(name = "tms-seed")]
#[command(about = "Seed MongoDB with synthetic users and time logs")]
struct Args {
    /// Number of users to generate
    #[arg(
        short,
        long,
        default_value = "501",
        value_parser = clap::value_parser!(u32).range(0..=i64::from(MAX_USERS))
    )]
    users: u32,

    /// Time logs per user, one per day from 2025-06-01
    #[arg(
        long,
        default_value = "10",
        value_parser = clap::value_parser!(u32).range(0..=i64::from(MAX_LOGS_PER_USER))
    )]
    logs_per_user: u32,

    /// Random seed for reproducible data
    #[arg(long)]
    seed: Option<u64>,

    /// Drop both collections before seeding
    #[arg(long, default_value = "false")]
    drop: bool,

    /// Print the final report as JSON
    #[arg(long, default_value = "false")]
    json: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info", value_parser = parse_log_level)]
    log_level: Level,
}

fn parse_log_level(value: &str) -> Result<Level, String> {
    tms_common::logging::parse_level(value)
        .ok_or_else(|| format!("unknown log level '{}'", value))
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    tms_common::logging::init(args.log_level);

    let mut config = GeneratorConfig::new()
        .with_users(args.users as usize)
        .with_logs_per_user(args.logs_per_user as usize);
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    info!(
        "Seeding {} users with {} time logs each",
        config.users, config.logs_per_user
    );

    let provider = ClientProvider::from_env();
    let client = provider
        .acquire()
        .context("Failed to connect to MongoDB")?;
    info!("Using database '{}'", client.database_name());

    let seeder = Seeder::new(client);
    if args.drop {
        seeder
            .drop_collections()
            .context("Failed to drop collections")?;
    }

    let report = seeder.run(&mut DataGenerator::new(config));
    provider.release();

    if report.has_failures() {
        warn!("Seeding finished with failures: {}", report);
    }
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report);
    }
    Ok(())
}
