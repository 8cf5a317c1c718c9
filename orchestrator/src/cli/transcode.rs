use crate::types::transcoder::Preset;
use clap::Args;
use std::path::PathBuf;

/// What the demo uploads and how it asks for it to be transcoded.
#[derive(Debug, Clone, Args)]
pub struct TranscodeCliArgs {
    /// Local media file to upload.
    #[arg(env = "MEDIA_ORCHESTRATOR_INPUT_FILE", long, default_value = Some("res/funny_cat_movie.mp4"))]
    pub input_file: Option<PathBuf>,

    /// Key of the uploaded object in the input bucket.
    #[arg(env = "MEDIA_ORCHESTRATOR_INPUT_KEY", long, default_value = Some("test-demo-app-movie.mp4"))]
    pub input_key: Option<String>,

    /// Key of the transcoded object in the output bucket.
    #[arg(env = "MEDIA_ORCHESTRATOR_OUTPUT_KEY", long, default_value = Some("transcoded-test-demo-app-movie.mp4"))]
    pub output_key: Option<String>,

    /// Prefix prepended to the output key.
    #[arg(env = "MEDIA_ORCHESTRATOR_OUTPUT_PREFIX", long, default_value = Some("720p/"))]
    pub output_prefix: Option<String>,

    /// System preset, one of HD1080p, HD720p, SD480p16x9, SD480p4x3, SD320p16x9, SD320p4x3.
    #[arg(env = "MEDIA_ORCHESTRATOR_PRESET", long, default_value = "HD720p")]
    pub preset: Preset,
}
