use clap::Args;

/// Names of the resources the demo creates, or adopts when they already exist.
#[derive(Debug, Clone, Args)]
#[group()]
pub struct ResourceCliArgs {
    /// Name of the SNS topic receiving pipeline events.
    #[arg(env = "MEDIA_ORCHESTRATOR_TOPIC_NAME", long, default_value = Some("test-demo-app-topic"))]
    pub topic_name: Option<String>,

    /// Name of the SQS queue subscribed to the topic.
    #[arg(env = "MEDIA_ORCHESTRATOR_QUEUE_NAME", long, default_value = Some("test-demo-app-queue"))]
    pub queue_name: Option<String>,

    /// Bucket the source media is uploaded to.
    #[arg(env = "MEDIA_ORCHESTRATOR_INPUT_BUCKET", long, default_value = Some("test-demo-app-input-bucket"))]
    pub input_bucket_name: Option<String>,

    /// Bucket the transcoded media is written to.
    #[arg(env = "MEDIA_ORCHESTRATOR_OUTPUT_BUCKET", long, default_value = Some("test-demo-app-output-bucket"))]
    pub output_bucket_name: Option<String>,

    /// Name of the Elastic Transcoder pipeline.
    #[arg(env = "MEDIA_ORCHESTRATOR_PIPELINE_NAME", long, default_value = Some("test-demo-app-pipeline"))]
    pub pipeline_name: Option<String>,
}
