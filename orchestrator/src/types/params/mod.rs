pub mod cloud_provider;

use crate::cli::resources::ResourceCliArgs;
use crate::cli::{DemoCmd, TeardownCmd};
use crate::types::transcoder::Preset;
use crate::utils::poll::Backoff;
use crate::{MediaError, MediaResult};
pub use cloud_provider::ProviderConfig;
use std::path::PathBuf;
use std::time::Duration;

/// ResourceNames - Names of the resources the demo workflow creates or adopts
#[derive(Debug, Clone)]
pub struct ResourceNames {
    pub topic: String,
    pub queue: String,
    pub input_bucket: String,
    pub output_bucket: String,
    pub pipeline: String,
}

/// TranscodeArgs - What to upload and how to transcode it
#[derive(Debug, Clone)]
pub struct TranscodeArgs {
    pub input_file: PathBuf,
    pub input_key: String,
    pub output_key: String,
    pub output_prefix: String,
    pub preset: Preset,
}

/// PollArgs - Backoff policies for the two waits in the workflow
#[derive(Debug, Clone)]
pub struct PollArgs {
    pub upload: Backoff,
    pub notifications: Backoff,
}

fn required(value: Option<String>, what: &str) -> MediaResult<String> {
    value.filter(|v| !v.trim().is_empty()).ok_or_else(|| MediaError::ConfigError(format!("{} is required", what)))
}

impl TryFrom<ResourceCliArgs> for ResourceNames {
    type Error = MediaError;
    fn try_from(args: ResourceCliArgs) -> Result<Self, Self::Error> {
        Ok(Self {
            topic: required(args.topic_name, "Topic name")?,
            queue: required(args.queue_name, "Queue name")?,
            input_bucket: required(args.input_bucket_name, "Input bucket name")?,
            output_bucket: required(args.output_bucket_name, "Output bucket name")?,
            pipeline: required(args.pipeline_name, "Pipeline name")?,
        })
    }
}

impl TryFrom<DemoCmd> for ResourceNames {
    type Error = MediaError;
    fn try_from(demo_cmd: DemoCmd) -> Result<Self, Self::Error> {
        ResourceNames::try_from(demo_cmd.resource_args)
    }
}

impl TryFrom<TeardownCmd> for ResourceNames {
    type Error = MediaError;
    fn try_from(teardown_cmd: TeardownCmd) -> Result<Self, Self::Error> {
        ResourceNames::try_from(teardown_cmd.resource_args)
    }
}

impl TryFrom<DemoCmd> for TranscodeArgs {
    type Error = MediaError;
    fn try_from(demo_cmd: DemoCmd) -> Result<Self, Self::Error> {
        let args = demo_cmd.transcode_args;
        Ok(Self {
            input_file: args
                .input_file
                .ok_or_else(|| MediaError::ConfigError("Input file is required".to_string()))?,
            input_key: required(args.input_key, "Input key")?,
            output_key: required(args.output_key, "Output key")?,
            output_prefix: args.output_prefix.unwrap_or_default(),
            preset: args.preset,
        })
    }
}

impl TryFrom<DemoCmd> for PollArgs {
    type Error = MediaError;
    fn try_from(demo_cmd: DemoCmd) -> Result<Self, Self::Error> {
        let args = demo_cmd.poll_args;
        if args.poll_max_attempts == 0 {
            return Err(MediaError::ConfigError("Poll attempts must be at least 1".to_string()));
        }
        if !(0.0..=1.0).contains(&args.poll_jitter) {
            return Err(MediaError::ConfigError(format!("Poll jitter {} is outside 0.0..=1.0", args.poll_jitter)));
        }
        let base = Backoff {
            initial_delay: Duration::from_secs(args.poll_interval),
            max_delay: Duration::from_secs(args.poll_max_interval.max(args.poll_interval)),
            multiplier: 2,
            jitter_factor: args.poll_jitter,
            max_attempts: args.poll_max_attempts,
        };
        Ok(Self { upload: base.clone(), notifications: base })
    }
}
