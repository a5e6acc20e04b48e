pub mod crop;
pub mod garden;
pub mod request;
pub mod user;

/// Convenience alias for a two-dimensional grid.
pub type Matrix<T> = Vec<Vec<T>>;

/// Position of a tile as stored in the document key `"x,y"`.
/// `x` is the column and `y` the row; stored keys may be negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileKey {
    pub x: i64,
    pub y: i64,
}

impl TileKey {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Parses a `"x,y"` document key. Anything other than exactly two
    /// integer components yields `None`.
    pub fn parse(key: &str) -> Option<Self> {
        let mut parts = key.split(',');
        let x = parts.next()?.trim().parse().ok()?;
        let y = parts.next()?.trim().parse().ok()?;
        if parts.next().is_some() {
            return None;
        }
        Some(Self { x, y })
    }

    /// Returns the `(row, col)` cell this key addresses in a `width` x `height`
    /// grid, or `None` when it falls outside.
    pub fn cell(&self, width: usize, height: usize) -> Option<(usize, usize)> {
        let col = usize::try_from(self.x).ok()?;
        let row = usize::try_from(self.y).ok()?;
        (col < width && row < height).then_some((row, col))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_key() {
        assert_eq!(TileKey::parse("3,7"), Some(TileKey::new(3, 7)));
    }

    #[test]
    fn test_parse_tolerates_spaces_and_negatives() {
        assert_eq!(TileKey::parse(" -1, 2 "), Some(TileKey::new(-1, 2)));
    }

    #[test]
    fn test_parse_rejects_malformed_keys() {
        for key in ["", "1", "a,b", "1,", ",2", "1,2,3", "1.5,2"] {
            assert_eq!(TileKey::parse(key), None, "key {key:?} must not parse");
        }
    }

    #[test]
    fn test_cell_bounds() {
        assert_eq!(TileKey::new(1, 0).cell(2, 1), Some((0, 1)));
        assert_eq!(TileKey::new(2, 0).cell(2, 1), None);
        assert_eq!(TileKey::new(0, 1).cell(2, 1), None);
        assert_eq!(TileKey::new(-1, 0).cell(2, 1), None);
        assert_eq!(TileKey::new(0, 0).cell(0, 0), None);
    }
}
