//! Host-supplied configuration shared by every floor of a building.

use floorplan_calculator::{LotConfigError, LotTable};
use floorplan_system_interactions::OrphanPolicy;
use serde::Deserialize;
use thiserror::Error;

/// Configuration consumed when floors are constructed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GridSettings {
    /// World placement of every lot.
    pub lots: LotTable,
    /// Treatment of wall removals that orphan room-bound objects.
    pub orphan_policy: OrphanPolicy,
}

/// Failures raised while loading [`GridSettings`].
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The TOML document could not be parsed.
    #[error("failed to parse grid settings: {0}")]
    Parse(#[from] toml::de::Error),
    /// A lot table entry was invalid.
    #[error(transparent)]
    Lots(#[from] LotConfigError),
}

#[derive(Debug, Deserialize)]
struct SettingsFile {
    #[serde(default)]
    orphan_policy: OrphanPolicy,
}

impl GridSettings {
    /// Parses settings from a TOML document.
    ///
    /// ```toml
    /// orphan_policy = "allow"
    ///
    /// [lots.neighborhood1_lot1]
    /// layout = "anchored"
    /// origin = [0.0, 0.0]
    /// tile_size = 100.0
    /// columns = 16
    /// rows = 12
    /// ```
    pub fn from_toml_str(contents: &str) -> Result<Self, SettingsError> {
        let file: SettingsFile = toml::from_str(contents)?;
        Ok(Self {
            lots: LotTable::from_toml_str(contents)?,
            orphan_policy: file.orphan_policy,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use floorplan_calculator::LotKey;

    #[test]
    fn empty_document_yields_defaults() {
        let settings = GridSettings::from_toml_str("").expect("empty document is valid");
        assert_eq!(settings, GridSettings::default());
        assert_eq!(settings.orphan_policy, OrphanPolicy::Reject);
    }

    #[test]
    fn orphan_policy_and_lots_load_together() {
        let settings = GridSettings::from_toml_str(
            r#"
            orphan_policy = "allow"

            [lots.neighborhood1_lot1]
            layout = "centered"
            origin = [0.0, 0.0]
            tile_size = 20.0
            columns = 5
            rows = 5
            "#,
        )
        .expect("valid settings");

        assert_eq!(settings.orphan_policy, OrphanPolicy::Allow);
        let lot = settings
            .lots
            .get(LotKey::Neighborhood1Lot1)
            .expect("lot configured");
        assert_eq!(lot.columns, 5);
    }

    #[test]
    fn unknown_policy_is_a_parse_error() {
        assert!(matches!(
            GridSettings::from_toml_str(r#"orphan_policy = "ignore""#),
            Err(SettingsError::Parse(_))
        ));
    }
}
