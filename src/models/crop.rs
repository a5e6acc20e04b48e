use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A plantable species from the crop catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Crop {
    pub id: String,
    pub name: String,
    /// Number of plants that fit in one square metre.
    pub density: f64,
    /// Display colour, e.g. `#ffae17`.
    pub color: String,
}
