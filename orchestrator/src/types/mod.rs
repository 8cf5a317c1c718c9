pub mod acl;
pub mod location;
pub mod notification;
pub mod params;
pub mod queue;
pub mod storage;
pub mod transcoder;

pub use acl::Acl;
pub use location::Location;
pub use notification::TranscoderNotification;
pub use queue::QueueMessage;
pub use storage::{BucketSummary, ObjectSummary};
pub use transcoder::{Job, JobSpec, JobStatus, Pipeline, PipelineNotifications, PipelineSpec, Preset};
