//! Tile catalog input and the built-in fallback shape set.
//!
//! A catalog is a JSON array of tile definitions, each with a display name
//! and a binary shape grid (rows of 0/1). The engine assigns stable integer
//! ids by catalog order and starts every tile at rotation 0 with all houses
//! unowned. Rectangular grids are padded with water cells to the square
//! shape the rotation code requires.
//!
//! When no catalog can be loaded the engine falls back to a fixed set of
//! polyomino shapes (2 to 5 island cells each) rather than fail to start.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::tile::Tile;

/// One tile definition as it appears in a catalog file.
#[derive(Debug, Clone, Deserialize)]
pub struct TileSpec {
    pub name: String,
    pub shape: Vec<Vec<u8>>,
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read tile catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse tile catalog: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("tile catalog contains no tiles")]
    NoTiles,
    #[error("tile `{name}`: shape grid is empty")]
    EmptyShape { name: String },
    #[error("tile `{name}`: shape rows have unequal lengths")]
    RaggedShape { name: String },
    #[error("tile `{name}`: shape cells must be 0 or 1, found {value}")]
    BadCell { name: String, value: u8 },
    #[error("tile `{name}`: shape has no island cells")]
    NoIslands { name: String },
}

/// Load a catalog file and build the tiles it defines.
pub fn load_catalog(path: &Path) -> Result<Vec<Tile>, CatalogError> {
    let text = fs::read_to_string(path)?;
    let specs: Vec<TileSpec> = serde_json::from_str(&text)?;
    tiles_from_specs(specs)
}

/// Build tiles from parsed specs, assigning ids by order.
pub fn tiles_from_specs(specs: Vec<TileSpec>) -> Result<Vec<Tile>, CatalogError> {
    if specs.is_empty() {
        return Err(CatalogError::NoTiles);
    }
    specs
        .into_iter()
        .enumerate()
        .map(|(id, spec)| {
            let shape = square_shape(&spec)?;
            Ok(Tile::new(id as u32, spec.name, shape))
        })
        .collect()
}

/// Validate a spec's grid and pad it with water cells to a square.
fn square_shape(spec: &TileSpec) -> Result<Vec<Vec<bool>>, CatalogError> {
    let rows = spec.shape.len();
    if rows == 0 || spec.shape[0].is_empty() {
        return Err(CatalogError::EmptyShape {
            name: spec.name.clone(),
        });
    }
    let cols = spec.shape[0].len();
    if spec.shape.iter().any(|row| row.len() != cols) {
        return Err(CatalogError::RaggedShape {
            name: spec.name.clone(),
        });
    }
    if let Some(&value) = spec.shape.iter().flatten().find(|&&v| v > 1) {
        return Err(CatalogError::BadCell {
            name: spec.name.clone(),
            value,
        });
    }
    if !spec.shape.iter().flatten().any(|&v| v == 1) {
        return Err(CatalogError::NoIslands {
            name: spec.name.clone(),
        });
    }
    let side = rows.max(cols);
    let mut shape = vec![vec![false; side]; side];
    for (r, row) in spec.shape.iter().enumerate() {
        for (c, &v) in row.iter().enumerate() {
            shape[r][c] = v == 1;
        }
    }
    Ok(shape)
}

/// Load the catalog at `path`, or fall back to the built-in shape set when
/// no path is given or loading fails. The engine never fails to start over
/// a missing or malformed catalog.
pub fn load_or_builtin(path: Option<&Path>) -> Vec<Tile> {
    match path {
        None => builtin_catalog(),
        Some(p) => match load_catalog(p) {
            Ok(tiles) => tiles,
            Err(err) => {
                log::warn!("falling back to built-in tiles: {err}");
                builtin_catalog()
            }
        },
    }
}

/// The built-in tile set: ten polyominoes of 2 to 5 island cells.
pub fn builtin_catalog() -> Vec<Tile> {
    let specs = vec![
        spec("domino", vec![vec![1, 1]]),
        spec("bar", vec![vec![1, 1, 1]]),
        spec("corner", vec![vec![1, 0], vec![1, 1]]),
        spec("block", vec![vec![1, 1], vec![1, 1]]),
        spec("tee", vec![vec![1, 1, 1], vec![0, 1, 0]]),
        spec("ess", vec![vec![0, 1, 1], vec![1, 1, 0]]),
        spec("hook", vec![vec![1, 0, 0], vec![1, 0, 0], vec![1, 1, 0]]),
        spec("plus", vec![vec![0, 1, 0], vec![1, 1, 1], vec![0, 1, 0]]),
        spec("steps", vec![vec![1, 0, 0], vec![1, 1, 0], vec![0, 1, 1]]),
        spec("zigzag", vec![vec![1, 1, 0], vec![0, 1, 0], vec![0, 1, 1]]),
    ];
    tiles_from_specs(specs).expect("built-in tile set is well formed")
}

fn spec(name: &str, shape: Vec<Vec<u8>>) -> TileSpec {
    TileSpec {
        name: name.to_string(),
        shape,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_shapes() {
        let tiles = builtin_catalog();
        assert_eq!(tiles.len(), 10);
        for (i, tile) in tiles.iter().enumerate() {
            assert_eq!(tile.id(), i as u32);
            assert_eq!(tile.rotation(), 0);
            assert!((2..=5).contains(&tile.island_count()), "{}", tile.name());
            // Square grids, padded where the source rows were rectangular
            assert!(tile.side() >= 2);
        }
    }

    #[test]
    fn test_rectangular_shape_is_padded() {
        let tiles = tiles_from_specs(vec![spec("domino", vec![vec![1, 1]])]).unwrap();
        assert_eq!(tiles[0].side(), 2);
        assert!(tiles[0].is_island(0, 0));
        assert!(tiles[0].is_island(0, 1));
        assert!(!tiles[0].is_island(1, 0));
        assert!(!tiles[0].is_island(1, 1));
    }

    #[test]
    fn test_bad_specs_rejected() {
        assert!(matches!(
            tiles_from_specs(vec![]),
            Err(CatalogError::NoTiles)
        ));
        assert!(matches!(
            tiles_from_specs(vec![spec("ragged", vec![vec![1, 1], vec![1]])]),
            Err(CatalogError::RaggedShape { .. })
        ));
        assert!(matches!(
            tiles_from_specs(vec![spec("water", vec![vec![0, 0]])]),
            Err(CatalogError::NoIslands { .. })
        ));
        assert!(matches!(
            tiles_from_specs(vec![spec("bad", vec![vec![1, 7]])]),
            Err(CatalogError::BadCell { value: 7, .. })
        ));
    }

    #[test]
    fn test_load_or_builtin_falls_back() {
        let tiles = load_or_builtin(Some(Path::new("/nonexistent/catalog.json")));
        assert_eq!(tiles.len(), builtin_catalog().len());
    }
}
