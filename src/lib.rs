//! Client for the Wayback Machine "Save Page Now" (SPN2) API.
//!
//! ```no_run
//! use spn2::client::SpnClient;
//! use spn2::config::Config;
//! use spn2::models::CaptureRequest;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::load()?;
//! let client = SpnClient::new(&config.api, &config.credentials()?)?;
//!
//! let request = CaptureRequest::builder()
//!     .url("https://example.com")
//!     .capture_all(true)
//!     .build();
//! let ack = client.submit(&request).await?;
//!
//! if let Some(job_id) = ack.job_id {
//!     let status = client.job_status(&job_id).await?;
//!     println!("{:?}", status.status);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod encoder;
pub mod error;
pub mod models;
pub mod normalize;
pub mod precheck;
pub mod transport;

pub use client::SpnClient;
pub use error::{Result, Spn2Error};
