use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// AWS regions where the storage and transcoding services are provisioned.
#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, EnumIter, AsRefStr,
)]
pub enum Location {
    #[default]
    #[serde(rename = "eu-west-1")]
    #[strum(serialize = "eu-west-1")]
    Ireland,
    #[serde(rename = "us-east-1")]
    #[strum(serialize = "us-east-1")]
    NorthVirginia,
    #[serde(rename = "us-west-2")]
    #[strum(serialize = "us-west-2")]
    Oregon,
    #[serde(rename = "ap-northeast-1")]
    #[strum(serialize = "ap-northeast-1")]
    Tokyo,
}

impl Location {
    /// Region code as understood by the SDK (e.g. `eu-west-1`).
    pub fn region(&self) -> &str {
        self.as_ref()
    }

    /// S3 rejects an explicit `us-east-1` location constraint, buckets there are created without one.
    pub fn needs_location_constraint(&self) -> bool {
        !matches!(self, Location::NorthVirginia)
    }
}
