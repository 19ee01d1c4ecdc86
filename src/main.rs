mod auth;
mod error;
mod schedule;
mod utils;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info};

use crate::auth::client::WilmaClient;
use crate::auth::login::{login, Credentials};
use crate::error::WilmaError;
use crate::schedule::dates::expand;
use crate::schedule::fetch::{fetch_range, RetryPolicy, RETRY_DELAY};
use crate::schedule::resource::ResourceType;
use crate::utils::logger::setup_logger;

/// Dumps daily Wilma schedule snapshots over a date range, one JSON file per
/// day.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// What to list: rooms, teachers or students
    resource_type: String,
    /// First day of the range, dd.mm.yyyy
    start_date: String,
    /// Last day of the range (inclusive), dd.mm.yyyy
    end_date: String,
    /// Wilma host or https:// URL
    wilma_url: String,
    /// Wilma account name
    user: String,
    /// Wilma account password
    password: String,
    /// Shared API secret issued out-of-band
    apikey: String,
    /// Directory the JSON files are written into
    output_path: PathBuf,
}

async fn run(args: Args) -> Result<(), WilmaError> {
    // Everything that can be rejected locally is rejected before the first
    // network call.
    let resource: ResourceType = args.resource_type.parse()?;
    let dates = expand(&args.start_date, &args.end_date)?;
    let wilma = WilmaClient::new(&args.wilma_url)?;

    let credentials = Credentials {
        user: args.user,
        password: args.password,
        apikey: args.apikey,
    };
    login(&wilma, &credentials).await?;

    info!(
        "Fetching {} schedules for {} day(s) into {}",
        resource,
        dates.len(),
        args.output_path.display()
    );

    let policy = RetryPolicy::uncapped(RETRY_DELAY);
    fetch_range(&wilma, resource, &dates, &args.output_path, &policy).await
}

#[tokio::main]
async fn main() -> ExitCode {
    setup_logger();

    let args = Args::parse();
    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}. Nothing to do.", e);
            ExitCode::from(1)
        }
    }
}
