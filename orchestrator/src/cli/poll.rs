use clap::Args;

/// Backoff used while waiting for the upload to show up and for job notifications.
#[derive(Debug, Clone, Args)]
pub struct PollCliArgs {
    /// First delay between two polls, in seconds.
    #[arg(env = "MEDIA_ORCHESTRATOR_POLL_INTERVAL", long, default_value_t = 2)]
    pub poll_interval: u64,

    /// Upper bound for the delay between two polls, in seconds.
    #[arg(env = "MEDIA_ORCHESTRATOR_POLL_MAX_INTERVAL", long, default_value_t = 30)]
    pub poll_max_interval: u64,

    /// Fraction of each delay added as random jitter (0.0 - 1.0).
    #[arg(env = "MEDIA_ORCHESTRATOR_POLL_JITTER", long, default_value_t = 0.2)]
    pub poll_jitter: f64,

    /// Number of polls before giving up.
    #[arg(env = "MEDIA_ORCHESTRATOR_POLL_MAX_ATTEMPTS", long, default_value_t = 60)]
    pub poll_max_attempts: u32,
}
