//! Lot keys and the configuration table that places each lot in the world.

use std::{collections::BTreeMap, fmt, str::FromStr};

use floorplan_core::FloorExtent;
use glam::Vec2;
use serde::Deserialize;
use thiserror::Error;

/// Enumerated floor-layout selector supplied by the host at initialization.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LotKey {
    /// First lot of the first neighbourhood.
    #[default]
    Neighborhood1Lot1,
    /// Second lot of the first neighbourhood.
    Neighborhood1Lot2,
    /// First lot of the second neighbourhood.
    Neighborhood2Lot1,
}

impl LotKey {
    /// Every known lot key.
    pub const ALL: [LotKey; 3] = [
        LotKey::Neighborhood1Lot1,
        LotKey::Neighborhood1Lot2,
        LotKey::Neighborhood2Lot1,
    ];

    /// Stable textual name used in configuration files and the CLI.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Neighborhood1Lot1 => "neighborhood1_lot1",
            Self::Neighborhood1Lot2 => "neighborhood1_lot2",
            Self::Neighborhood2Lot1 => "neighborhood2_lot1",
        }
    }
}

impl fmt::Display for LotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LotKey {
    type Err = LotConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == value)
            .ok_or_else(|| LotConfigError::UnknownLot(value.to_owned()))
    }
}

/// Where a lot anchors its origin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LotLayout {
    /// Origin at the north-west corner of the lot.
    Anchored,
    /// Origin at the centre of the lot.
    Centered,
}

/// Placement and size of a single lot.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct LotConfig {
    /// Origin convention of the lot.
    pub layout: LotLayout,
    /// World-space origin, interpreted according to `layout`.
    pub origin: [f32; 2],
    /// Side length of one tile in world units.
    pub tile_size: f32,
    /// Number of tile columns.
    pub columns: u32,
    /// Number of tile rows.
    pub rows: u32,
}

impl LotConfig {
    /// World-space origin as a vector.
    #[must_use]
    pub fn origin(&self) -> Vec2 {
        Vec2::from(self.origin)
    }

    /// Tile dimensions of the lot.
    #[must_use]
    pub const fn extent(&self) -> FloorExtent {
        FloorExtent::new(self.columns, self.rows)
    }

    fn validate(&self, lot: LotKey) -> Result<(), LotConfigError> {
        if !self.tile_size.is_finite() || self.tile_size <= 0.0 {
            return Err(LotConfigError::InvalidTileSize {
                lot,
                tile_size: self.tile_size,
            });
        }
        if self.extent().is_empty() {
            return Err(LotConfigError::EmptyExtent { lot });
        }
        if !self.origin().is_finite() {
            return Err(LotConfigError::InvalidOrigin { lot });
        }
        Ok(())
    }
}

/// Failures raised while loading or validating lot configuration.
#[derive(Debug, Error)]
pub enum LotConfigError {
    /// The TOML document could not be parsed.
    #[error("failed to parse lot configuration: {0}")]
    Parse(#[from] toml::de::Error),
    /// A lot name did not match any [`LotKey`].
    #[error("`{0}` is not a known lot key")]
    UnknownLot(String),
    /// The lot's tile size is zero, negative or not finite.
    #[error("lot `{lot}` must have a positive finite tile size (received {tile_size})")]
    InvalidTileSize {
        /// Lot whose configuration failed validation.
        lot: LotKey,
        /// Offending tile size.
        tile_size: f32,
    },
    /// The lot contains no tiles.
    #[error("lot `{lot}` must contain at least one tile")]
    EmptyExtent {
        /// Lot whose configuration failed validation.
        lot: LotKey,
    },
    /// The lot origin is not finite.
    #[error("lot `{lot}` has a non-finite origin")]
    InvalidOrigin {
        /// Lot whose configuration failed validation.
        lot: LotKey,
    },
}

#[derive(Debug, Deserialize)]
struct LotFile {
    #[serde(default)]
    lots: BTreeMap<String, LotConfig>,
}

/// Lot configuration for every [`LotKey`].
///
/// Starts from built-in placements; a TOML document may override any lot.
#[derive(Clone, Debug, PartialEq)]
pub struct LotTable {
    entries: BTreeMap<LotKey, LotConfig>,
}

impl Default for LotTable {
    fn default() -> Self {
        let entries = LotKey::ALL
            .into_iter()
            .map(|key| (key, builtin_lot(key)))
            .collect();
        Self { entries }
    }
}

impl LotTable {
    /// Parses a TOML document of `[lots.<key>]` tables over the defaults.
    ///
    /// ```toml
    /// [lots.neighborhood1_lot1]
    /// layout = "anchored"
    /// origin = [0.0, 0.0]
    /// tile_size = 100.0
    /// columns = 16
    /// rows = 12
    /// ```
    pub fn from_toml_str(contents: &str) -> Result<Self, LotConfigError> {
        let file: LotFile = toml::from_str(contents)?;
        let mut table = Self::default();
        for (name, config) in file.lots {
            let key: LotKey = name.parse()?;
            let _ = table.insert(key, config)?;
        }
        Ok(table)
    }

    /// Configuration registered for the lot.
    #[must_use]
    pub fn get(&self, key: LotKey) -> Option<&LotConfig> {
        self.entries.get(&key)
    }

    /// Validates and stores a lot configuration, returning the one it replaced.
    pub fn insert(
        &mut self,
        key: LotKey,
        config: LotConfig,
    ) -> Result<Option<LotConfig>, LotConfigError> {
        config.validate(key)?;
        Ok(self.entries.insert(key, config))
    }

    /// Iterates the configured lots in key order.
    pub fn iter(&self) -> impl Iterator<Item = (LotKey, &LotConfig)> {
        self.entries.iter().map(|(key, config)| (*key, config))
    }
}

const fn builtin_lot(key: LotKey) -> LotConfig {
    match key {
        LotKey::Neighborhood1Lot1 => LotConfig {
            layout: LotLayout::Anchored,
            origin: [0.0, 0.0],
            tile_size: 100.0,
            columns: 16,
            rows: 12,
        },
        LotKey::Neighborhood1Lot2 => LotConfig {
            layout: LotLayout::Anchored,
            origin: [2000.0, 0.0],
            tile_size: 100.0,
            columns: 12,
            rows: 12,
        },
        LotKey::Neighborhood2Lot1 => LotConfig {
            layout: LotLayout::Centered,
            origin: [-1500.0, 2500.0],
            tile_size: 50.0,
            columns: 24,
            rows: 16,
        },
    }
}
