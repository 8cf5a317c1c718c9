use crate::types::transcoder::JobStatus;
use clap::{Parser, Subcommand};
use provider::aws::AWSConfigCliArgs;

pub mod poll;
pub mod provider;
pub mod resources;
pub mod transcode;

#[derive(Parser, Debug)]
#[command(
    name = "media-orchestrator",
    about = "Media Orchestrator - S3, SNS, SQS and Elastic Transcoder wrappers with a demo workflow",
    long_about = "Media Orchestrator provisions the buckets, notification topic, queue and transcoding pipeline\n\
    needed to transcode a media file, submits a job and waits for its completion notification.\n\n\
    Quick Start:\n  \
    media-orchestrator demo\n\n\
    Against LocalStack:\n  \
    media-orchestrator demo --aws-endpoint-url http://localhost:4566",
    after_help = "Examples:\n  \
    media-orchestrator demo --input-file res/funny_cat_movie.mp4 --preset HD1080p\n  \
    media-orchestrator jobs --status Progressing\n  \
    media-orchestrator teardown"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the demo transcoding workflow
    #[command(long_about = "Create or adopt the topic, queue, buckets and pipeline, upload the input file,\n\
        submit a transcoding job and wait for its completion notification.")]
    Demo {
        #[command(flatten)]
        demo_command: Box<DemoCmd>,
    },
    /// Delete the resources created by the demo
    #[command(long_about = "Delete the pipeline, topic and queue created by the demo, then the buckets.\n\n\
        Buckets are only deleted when empty.")]
    Teardown {
        #[command(flatten)]
        teardown_command: Box<TeardownCmd>,
    },
    /// List transcoding jobs with a given status
    Jobs {
        #[command(flatten)]
        jobs_command: Box<JobsCmd>,
    },
}

#[derive(Parser, Debug, Clone)]
pub struct DemoCmd {
    #[clap(flatten)]
    pub aws_config_args: AWSConfigCliArgs,

    #[clap(flatten)]
    pub resource_args: resources::ResourceCliArgs,

    #[clap(flatten)]
    pub transcode_args: transcode::TranscodeCliArgs,

    #[clap(flatten)]
    pub poll_args: poll::PollCliArgs,

    /// Subscribe the queue to the topic before starting.
    #[arg(env = "MEDIA_ORCHESTRATOR_SUBSCRIBE_QUEUE", long, default_value_t = true, action = clap::ArgAction::Set)]
    pub subscribe_queue: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct TeardownCmd {
    #[clap(flatten)]
    pub aws_config_args: AWSConfigCliArgs,

    #[clap(flatten)]
    pub resource_args: resources::ResourceCliArgs,
}

#[derive(Parser, Debug, Clone)]
pub struct JobsCmd {
    #[clap(flatten)]
    pub aws_config_args: AWSConfigCliArgs,

    /// One of Submitted, Progressing, Complete, Canceled, Error.
    #[arg(long, default_value = "Complete")]
    pub status: JobStatus,
}
