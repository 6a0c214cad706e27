//! Authenticated user profile

use serde::{Deserialize, Deserializer, Serialize};

/// Profile of the signed-in user, as returned by the provider's users endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Provider user id
    #[serde(deserialize_with = "numeric_id")]
    pub id: u64,
    /// Display name
    pub display_name: String,
    /// Verified email (requires the `user:read:email` scope)
    #[serde(default)]
    pub email: String,
    /// Avatar URL
    #[serde(default)]
    pub profile_image_url: String,
}

/// Envelope of the users endpoint: `{ "data": [User, ...] }`
#[derive(Debug, Deserialize)]
pub(crate) struct UsersResponse {
    #[serde(default)]
    pub data: Vec<User>,
}

// Helix encodes ids as strings; accept plain numbers too.
fn numeric_id<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(u64),
        Text(String),
    }

    match RawId::deserialize(deserializer)? {
        RawId::Number(n) => Ok(n),
        RawId::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}
