//! Level grid data and load-time validation.
//!
//! A level is a rectangular grid of small integer tile codes read once at
//! load time to populate the initial object set. Levels come from the
//! built-in [`LevelGrid::default_level`] or from a JSON file:
//!
//! ```json
//! { "tile_size": 32, "rows": [[0, 0, 4], [1, 1, 1]] }
//! ```
//!
//! A grid is validated before anything is spawned; every problem is reported
//! through [`LevelError`] instead of aborting the process.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Edge length of a tile in logical pixels.
pub const TILE_SIZE: u32 = 32;

/// Meaning of a single cell in the level grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileCode {
    Empty,
    Ground,
    Panel,
    EnemySpawn,
    PlayerSpawn,
    /// Decorative tile drawn in front of the characters.
    Grass,
    /// Decorative tile drawn behind the level.
    Brick,
}

impl TileCode {
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(TileCode::Empty),
            1 => Some(TileCode::Ground),
            2 => Some(TileCode::Panel),
            3 => Some(TileCode::EnemySpawn),
            4 => Some(TileCode::PlayerSpawn),
            5 => Some(TileCode::Grass),
            6 => Some(TileCode::Brick),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum LevelError {
    #[error("failed to read level file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse level JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("level grid has no tiles")]
    Empty,
    #[error("tile size must be positive")]
    ZeroTileSize,
    #[error("row {row} has {found} columns, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("unknown tile code {code} at row {row}, column {col}")]
    UnknownTile { code: u8, row: usize, col: usize },
    #[error("level must contain exactly one player spawn, found {0}")]
    PlayerSpawnCount(usize),
}

/// One decoded cell with its grid coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    pub row: usize,
    pub col: usize,
    pub code: TileCode,
}

/// Raw level grid as stored on disk.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LevelGrid {
    pub tile_size: u32,
    pub rows: Vec<Vec<u8>>,
}

const DEFAULT_ROWS: [&str; 10] = [
    "00000000000000000000000000000000000000000000000000",
    "00000000000000000000000000000000000000000000000000",
    "00000000000000000000000000000000000000000000000000",
    "00000000000000000000000000000000000000000000000000",
    "00000000000000000000000000000000000000000000000000",
    "00000000000000000000002222000000000000000000000000",
    "00006666660000000000000000000066666666000000000000",
    "00000666600000002200000000000006666622000000000000",
    "04000000000300020055500000300000000200003000003000",
    "11111111111111111111111111111111111111111111111111",
];

impl LevelGrid {
    /// The level shipped with the game: a 50x10 strip with a few steps,
    /// a floating platform and four enemies.
    pub fn default_level() -> Self {
        let rows = DEFAULT_ROWS
            .iter()
            .map(|row| row.bytes().map(|b| b - b'0').collect())
            .collect();
        Self {
            tile_size: TILE_SIZE,
            rows,
        }
    }

    pub fn from_json_str(text: &str) -> Result<Self, LevelError> {
        let grid: LevelGrid = serde_json::from_str(text)?;
        grid.validate()?;
        Ok(grid)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LevelError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| LevelError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    pub fn width(&self) -> usize {
        self.rows.first().map(Vec::len).unwrap_or(0)
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Check shape, tile codes and the single player spawn.
    pub fn validate(&self) -> Result<(), LevelError> {
        if self.tile_size == 0 {
            return Err(LevelError::ZeroTileSize);
        }
        let expected = self.width();
        if expected == 0 {
            return Err(LevelError::Empty);
        }

        let mut players = 0;
        for (row, cells) in self.rows.iter().enumerate() {
            if cells.len() != expected {
                return Err(LevelError::RaggedRow {
                    row,
                    expected,
                    found: cells.len(),
                });
            }
            for (col, &code) in cells.iter().enumerate() {
                match TileCode::from_code(code) {
                    Some(TileCode::PlayerSpawn) => players += 1,
                    Some(_) => {}
                    None => return Err(LevelError::UnknownTile { code, row, col }),
                }
            }
        }

        if players != 1 {
            return Err(LevelError::PlayerSpawnCount(players));
        }
        Ok(())
    }

    /// Non-empty cells in row-major order. Unknown codes are skipped; call
    /// [`LevelGrid::validate`] first to reject them.
    pub fn tiles(&self) -> impl Iterator<Item = Tile> + '_ {
        self.rows.iter().enumerate().flat_map(|(row, cells)| {
            cells.iter().enumerate().filter_map(move |(col, &code)| {
                TileCode::from_code(code)
                    .filter(|c| *c != TileCode::Empty)
                    .map(|code| Tile { row, col, code })
            })
        })
    }
}
