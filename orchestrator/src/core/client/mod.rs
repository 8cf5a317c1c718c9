// Client abstractions module - contains all client interface traits

pub mod error;
pub mod identity;
pub mod queue;
pub mod storage;
pub mod topic;
pub mod transcoder;

// Re-export commonly used types
pub use error::{ErrorKind, ProviderError};
pub use identity::{iam::IAM, IdentityClient};
pub use queue::{sqs::SQS, QueueClient};
pub use storage::{s3::AWSS3, StorageClient};
pub use topic::{sns::SNS, TopicClient};
pub use transcoder::{elastic_transcoder::ElasticTranscoder, TranscoderClient};
