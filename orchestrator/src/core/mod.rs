// Core module - contains the provider clients and their configuration

pub mod client;
pub mod cloud;
pub mod config;

pub use client::{IdentityClient, QueueClient, StorageClient, TopicClient, TranscoderClient};
pub use config::Config;
