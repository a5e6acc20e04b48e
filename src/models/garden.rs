use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use utoipa::ToSchema;

use crate::models::{crop::Crop, Matrix};

/// One cell of a garden grid. `crop: None` means the cell is empty.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Tile {
    pub crop: Option<Crop>,
    pub planted: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Garden {
    pub id: String,
    pub name: String,
    /// Number of tile columns.
    pub width: usize,
    /// Number of tile rows.
    pub height: usize,
    /// Real-world length of one tile edge.
    pub scale: f64,
    /// Always `height` rows of `width` tiles.
    #[schema(value_type = Vec<Vec<Tile>>)]
    pub tiles: Matrix<Tile>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GardenPreview {
    pub id: String,
    pub name: String,
}

/// A persisted tile document: sparse, keyed by `"x,y"`.
#[derive(Debug, Clone, PartialEq)]
pub struct TileRecord {
    pub key: String,
    pub name: Option<String>,
    pub planted: Option<bool>,
}

impl TileRecord {
    pub fn new(key: impl Into<String>, name: impl Into<String>, planted: bool) -> Self {
        Self {
            key: key.into(),
            name: Some(name.into()),
            planted: Some(planted),
        }
    }
}

/// Builds a `height` x `width` grid of empty, unplanted tiles.
pub fn empty_tiles(width: usize, height: usize) -> Matrix<Tile> {
    (0..height)
        .map(|_| (0..width).map(|_| Tile::default()).collect())
        .collect()
}
