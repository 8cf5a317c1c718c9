use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// Name of the IAM role Elastic Transcoder assumes to read and write the pipeline buckets.
pub const TRANSCODER_DEFAULT_ROLE: &str = "Elastic_Transcoder_Default_Role";

/// Status of a transcoding job as reported by the provider.
///
/// Transitions happen server side: `Submitted -> Progressing -> {Complete | Canceled | Error}`.
/// Nothing here enforces that order, we only mirror what the provider last reported.
#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, EnumIter, AsRefStr,
)]
pub enum JobStatus {
    /// Job submitted to processing.
    Submitted,
    /// Currently processing.
    Progressing,
    /// Completed job.
    #[default]
    Complete,
    /// Cancelled job.
    Canceled,
    /// An error occurred during processing.
    Error,
}

impl JobStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Complete | JobStatus::Canceled | JobStatus::Error)
    }
}

/// System presets selecting output resolution and aspect ratio.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
pub enum Preset {
    HD1080p,
    HD720p,
    SD480p16x9,
    SD480p4x3,
    SD320p16x9,
    SD320p4x3,
}

impl Preset {
    /// Opaque provider id of the preset.
    pub fn preset_id(&self) -> &'static str {
        match self {
            Preset::HD1080p => "1351620000001-000001",
            Preset::HD720p => "1351620000001-000010",
            Preset::SD480p16x9 => "1351620000001-000020",
            Preset::SD480p4x3 => "1351620000001-000030",
            Preset::SD320p16x9 => "1351620000001-000040",
            Preset::SD320p4x3 => "1351620000001-000050",
        }
    }

    pub fn from_preset_id(id: &str) -> Option<Self> {
        use strum::IntoEnumIterator;
        Preset::iter().find(|preset| preset.preset_id() == id)
    }
}

/// Topic ARNs receiving each category of pipeline event.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PipelineNotifications {
    pub progressing: Option<String>,
    pub completed: Option<String>,
    pub warning: Option<String>,
    pub error: Option<String>,
}

impl PipelineNotifications {
    /// Route every event category to the same topic.
    pub fn all_to(topic_arn: &str) -> Self {
        Self {
            progressing: Some(topic_arn.to_string()),
            completed: Some(topic_arn.to_string()),
            warning: Some(topic_arn.to_string()),
            error: Some(topic_arn.to_string()),
        }
    }
}

/// Everything needed to create a pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineSpec {
    pub name: String,
    pub input_bucket: String,
    pub output_bucket: String,
    pub role_arn: String,
    pub notifications: PipelineNotifications,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pipeline {
    pub id: String,
    pub name: String,
    pub arn: Option<String>,
    pub status: Option<String>,
    pub input_bucket: Option<String>,
    pub output_bucket: Option<String>,
    pub role: Option<String>,
    pub notifications: PipelineNotifications,
}

/// Everything needed to submit a job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobSpec {
    pub pipeline_id: String,
    pub input_key: String,
    pub output_key: String,
    pub output_key_prefix: String,
    pub preset_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub id: String,
    pub pipeline_id: Option<String>,
    pub input_key: Option<String>,
    pub output_key: Option<String>,
    pub output_key_prefix: Option<String>,
    pub preset_id: Option<String>,
    /// Raw status string, kept even when it is not one of the known [`JobStatus`] values.
    pub status: Option<String>,
}

impl Job {
    pub fn status(&self) -> Option<JobStatus> {
        self.status.as_deref().and_then(|s| JobStatus::from_str(s).ok())
    }
}
