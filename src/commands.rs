use serde::Serialize;
use spn2::SpnClient;
use spn2::config::{Config, Credentials};
use tracing::debug;

use crate::cli::Commands;

type AnyError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub async fn run(command: Commands) -> Result<(), AnyError> {
    let config = Config::load()?;

    match command {
        Commands::Submit(args) => {
            let client = SpnClient::new(&config.api, &config.credentials()?)?;
            print_json(&client.submit(&args.into_request()).await?)
        }
        Commands::Status { job_id } => {
            let client = public_client(&config)?;
            print_json(&client.job_status(&job_id).await?)
        }
        Commands::System => {
            let client = public_client(&config)?;
            print_json(&client.system_status().await?)
        }
        Commands::User => {
            let client = SpnClient::new(&config.api, &config.credentials()?)?;
            print_json(&client.user_status().await?)
        }
    }
}

/// Status endpoints never see the credentials, so run without them if absent.
fn public_client(config: &Config) -> Result<SpnClient, AnyError> {
    let credentials = config.credentials().unwrap_or_else(|_| {
        debug!("No archive credentials configured, using public endpoints only");
        Credentials::default()
    });
    Ok(SpnClient::new(&config.api, &credentials)?)
}

fn print_json<T: Serialize>(value: &T) -> Result<(), AnyError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
