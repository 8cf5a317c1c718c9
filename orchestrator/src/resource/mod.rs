// Resource wrappers - one per provider resource, holding the identifiers of what they created or adopted

pub mod bucket;
pub mod queue;
pub mod topic;
pub mod transcoder;

pub use bucket::Bucket;
pub use queue::NotificationQueue;
pub use topic::NotificationTopic;
pub use transcoder::TranscodingService;
