use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The publicly visible part of a user profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub display_name: String,
    pub email: String,
}
