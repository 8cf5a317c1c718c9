use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// Canned access control list applied to a bucket when it is created.
#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, EnumIter, AsRefStr,
)]
pub enum Acl {
    /// Owner gets full control, nobody else has access.
    #[default]
    #[serde(rename = "private")]
    #[strum(serialize = "private")]
    Private,
    /// Anyone can read.
    #[serde(rename = "public-read")]
    #[strum(serialize = "public-read")]
    PublicRead,
    /// Anyone can read and write.
    #[serde(rename = "public-read-write")]
    #[strum(serialize = "public-read-write")]
    PublicReadWrite,
    /// Any authenticated AWS principal can read.
    #[serde(rename = "authenticated-read")]
    #[strum(serialize = "authenticated-read")]
    AuthenticatedRead,
}
