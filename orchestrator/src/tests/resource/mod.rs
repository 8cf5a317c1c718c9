pub mod bucket;
pub mod transcoder;
