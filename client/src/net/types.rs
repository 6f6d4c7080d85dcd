//! Response bodies returned by the users API.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use forms::FieldError;
use serde::{Deserialize, Serialize};

/// Identity returned by login and register.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: String,
    pub name: String,
    pub role: String,
}

/// Full profile of the signed-in user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    /// RFC 3339 timestamp.
    pub created_at: String,
}

/// Error body shared by every failing endpoint.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub errors: Vec<FieldError>,
}
