use clap::Parser as _;
use dotenvy::dotenv;
use media_orchestrator::cli::{Cli, Commands, DemoCmd, JobsCmd, TeardownCmd};
use media_orchestrator::core::Config;
use media_orchestrator::resource::TranscodingService;
use media_orchestrator::types::Location;
use media_orchestrator::types::params::{PollArgs, ProviderConfig, ResourceNames, TranscodeArgs};
use media_orchestrator::utils::logging::init_logging;
use media_orchestrator::workflow::DemoWorkflow;
use media_orchestrator::{MediaError, MediaResult};
use std::str::FromStr;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    dotenv().ok();
    if let Err(e) = init_logging() {
        report_without_logger(&e);
        std::process::exit(2);
    }
    let cli = Cli::parse();

    let (name, result) = match cli.command {
        Commands::Demo { demo_command } => {
            info!("Executing demo command with args: {:?}", demo_command);
            ("demo", run_demo(*demo_command).await)
        }
        Commands::Teardown { teardown_command } => {
            info!("Executing teardown command with args: {:?}", teardown_command);
            ("teardown", run_teardown(*teardown_command).await)
        }
        Commands::Jobs { jobs_command } => {
            info!("Executing jobs command with args: {:?}", jobs_command);
            ("jobs", run_jobs(*jobs_command).await)
        }
    };

    match result {
        Ok(()) => info!(command = name, "Command completed successfully"),
        Err(e) => {
            error!(command = name, error = %e, error_chain = ?e, kind = %e.kind(), "Command failed");
            std::process::exit(1);
        }
    }
}

// No subscriber is installed yet, stderr is all we have
#[allow(clippy::print_stderr)]
fn report_without_logger(e: &MediaError) {
    eprintln!("{}", e);
}

async fn run_demo(demo_cmd: DemoCmd) -> MediaResult<()> {
    let provider_config = ProviderConfig::from(demo_cmd.aws_config_args.clone());
    let names = ResourceNames::try_from(demo_cmd.clone())?;
    let transcode = TranscodeArgs::try_from(demo_cmd.clone())?;
    let poll = PollArgs::try_from(demo_cmd.clone())?;

    let config = Config::from_provider_config(provider_config).await;
    let outcome = DemoWorkflow::new(config, names)?.run(&transcode, &poll, demo_cmd.subscribe_queue).await?;

    info!(
        job_id = %outcome.job.id,
        pipeline_id = ?outcome.pipeline_id,
        notifications = outcome.notifications.len(),
        status = %outcome.final_status,
        "Demo finished"
    );
    Ok(())
}

async fn run_teardown(teardown_cmd: TeardownCmd) -> MediaResult<()> {
    let provider_config = ProviderConfig::from(teardown_cmd.aws_config_args.clone());
    let names = ResourceNames::try_from(teardown_cmd)?;

    let config = Config::from_provider_config(provider_config).await;
    let report = DemoWorkflow::new(config, names)?.teardown().await?;

    if report.failed.is_empty() {
        Ok(())
    } else {
        let failed: Vec<&str> = report.failed.iter().map(|(resource, _)| resource.as_str()).collect();
        Err(MediaError::Other(anyhow::anyhow!("Failed to delete {}", failed.join(", "))))
    }
}

async fn run_jobs(jobs_cmd: JobsCmd) -> MediaResult<()> {
    let provider_config = ProviderConfig::from(jobs_cmd.aws_config_args);
    let config = Config::from_provider_config(provider_config).await;

    let location = Location::from_str(&config.provider_config().region).unwrap_or_default();
    let transcoder = TranscodingService::new(config.transcoder(), config.identity(), location);
    let jobs = transcoder.list_jobs_by_status(jobs_cmd.status).await?;
    for job in &jobs {
        info!(job_id = %job.id, pipeline_id = ?job.pipeline_id, output_key = ?job.output_key, status = ?job.status, "Job");
    }
    info!(count = jobs.len(), status = %jobs_cmd.status, "Listed jobs");
    Ok(())
}
