use crate::logic::catalog::CropLookup;
use crate::models::{
    garden::{empty_tiles, Tile, TileRecord},
    Matrix, TileKey,
};

/// Dense grid built from sparse tile records, plus the keys of records that
/// did not fit.
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciliation {
    pub tiles: Matrix<Tile>,
    /// Keys of out-of-bounds or malformed records, in input order.
    pub stale: Vec<String>,
}

/// Lays `records` onto a `height` x `width` grid of empty tiles.
///
/// A record whose key does not parse as `"x,y"` or lies outside the grid is
/// left out and its key reported in `stale`; deleting it is up to the caller.
/// Crop names are resolved through `catalog`; an unknown name leaves the
/// cell without a crop but keeps its `planted` flag. When two records share
/// a coordinate the later one wins.
pub fn reconcile<I, C>(width: usize, height: usize, records: I, catalog: &C) -> Reconciliation
where
    I: IntoIterator<Item = TileRecord>,
    C: CropLookup + ?Sized,
{
    let mut tiles = empty_tiles(width, height);
    let mut stale = Vec::new();

    for record in records {
        let cell = TileKey::parse(&record.key).and_then(|key| key.cell(width, height));
        let Some((row, col)) = cell else {
            stale.push(record.key);
            continue;
        };
        tiles[row][col] = Tile {
            crop: record.name.as_deref().and_then(|name| catalog.get_by_name(name)),
            planted: record.planted.unwrap_or(false),
        };
    }

    Reconciliation { tiles, stale }
}
