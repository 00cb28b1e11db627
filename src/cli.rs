use clap::{Parser, Subcommand};
use spn2::models::{CaptureRequest, TargetCredentials};

#[derive(Parser, Debug)]
#[command(name = "spn2")]
#[command(about = "Save Page Now client for the Wayback Machine", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Ask the archive to capture a URL
    Submit(SubmitArgs),
    /// Show the state of a capture job
    Status {
        /// Job identifier returned by `submit`
        job_id: String,
    },
    /// Show service-wide queue depths
    System,
    /// Show the quota of the configured account
    User,
}

#[derive(clap::Args, Debug)]
pub struct SubmitArgs {
    /// Absolute URL of the page to capture
    pub url: String,

    /// Capture pages that answer with an error status too
    #[arg(long)]
    pub capture_all: bool,

    /// Also capture the pages linked from the target
    #[arg(long)]
    pub capture_outlinks: bool,

    /// Take a screenshot of the page
    #[arg(long)]
    pub capture_screenshot: bool,

    /// Do not make the capture available in the Wayback Machine right away
    #[arg(long)]
    pub delay_wb_availability: bool,

    /// Use a plain GET instead of a browser
    #[arg(long)]
    pub force_get: bool,

    /// Capture even if this is the first archive of the page
    #[arg(long)]
    pub skip_first_archive: bool,

    /// Skip the capture if one newer than this exists (e.g. "3d")
    #[arg(long, value_name = "WINDOW")]
    pub if_not_archived_within: Option<String>,

    /// Freshness range; wins over --if-not-archived-within
    #[arg(long, num_args = 2, value_names = ["MIN", "MAX"])]
    pub if_not_archived_between: Option<Vec<String>>,

    /// Check outlinks against existing captures before capturing them
    #[arg(long)]
    pub outlinks_availability: bool,

    /// Email the result to the account owner
    #[arg(long)]
    pub email_result: bool,

    /// Cookie header to send to the target
    #[arg(long, value_name = "COOKIE")]
    pub capture_cookie: Option<String>,

    /// User agent to present to the target
    #[arg(long, value_name = "UA")]
    pub use_user_agent: Option<String>,

    /// Basic-auth username for the target site
    #[arg(long)]
    pub target_username: Option<String>,

    /// Basic-auth password for the target site
    #[arg(long)]
    pub target_password: Option<String>,
}

impl SubmitArgs {
    pub fn into_request(self) -> CaptureRequest {
        let between = self
            .if_not_archived_between
            .and_then(|bounds| match <[String; 2]>::try_from(bounds) {
                Ok([min, max]) => Some((min, max)),
                Err(_) => None,
            });

        let target_credentials = match (self.target_username, self.target_password) {
            (None, None) => None,
            (username, password) => Some(TargetCredentials { username, password }),
        };

        CaptureRequest::builder()
            .url(self.url)
            .capture_all(self.capture_all)
            .capture_outlinks(self.capture_outlinks)
            .capture_screenshot(self.capture_screenshot)
            .delay_wb_availability(self.delay_wb_availability)
            .force_get(self.force_get)
            .skip_first_archive(self.skip_first_archive)
            .maybe_if_not_archived_within(self.if_not_archived_within)
            .maybe_if_not_archived_within_between(between)
            .outlinks_availability(self.outlinks_availability)
            .email_result(self.email_result)
            .maybe_capture_cookie(self.capture_cookie)
            .maybe_use_user_agent(self.use_user_agent)
            .maybe_target_credentials(target_credentials)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_args_map_to_request() {
        let cli = Cli::parse_from([
            "spn2",
            "submit",
            "https://example.com",
            "--capture-all",
            "--if-not-archived-between",
            "1h",
            "2h",
            "--target-username",
            "u",
        ]);

        let Commands::Submit(args) = cli.command else {
            panic!("expected submit");
        };
        let request = args.into_request();

        assert_eq!(request.url, "https://example.com");
        assert!(request.capture_all);
        assert!(!request.force_get);
        assert_eq!(request.freshness().as_deref(), Some("1h,2h"));
        assert_eq!(
            request.target_credentials,
            Some(TargetCredentials::username_only("u"))
        );
    }

    #[test]
    fn test_status_command() {
        let cli = Cli::parse_from(["spn2", "status", "spn2-abc"]);
        assert!(matches!(cli.command, Commands::Status { ref job_id } if job_id == "spn2-abc"));
    }
}
