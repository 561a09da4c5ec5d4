//! Projection of raw detail responses into the output schema
//!
//! This is the schema-validation boundary: untyped wire data becomes a
//! [`DetailRecord`] or is rejected with a validation error naming the field.
//! The conversion is purely structural, with no I/O.

use crate::error::{Error, Result};
use crate::types::{Action, DetailRecord, RawDetail};

/// Project a raw detail response into a validated [`DetailRecord`].
///
/// Keeps `name`, `hit_points`, `armor_class`, and for each action only its
/// name and description; every other wire field is discarded. Missing
/// required fields and negative values are rejected.
pub fn project(raw: RawDetail) -> Result<DetailRecord> {
    DetailRecord::try_from(raw)
}

impl TryFrom<RawDetail> for DetailRecord {
    type Error = Error;

    fn try_from(raw: RawDetail) -> Result<Self> {
        let name = raw
            .name
            .ok_or_else(|| missing_field("<unnamed>", "name"))?;

        let hit_points = raw
            .hit_points
            .ok_or_else(|| missing_field(&name, "hit_points"))?;
        let hit_points = u32::try_from(hit_points).map_err(|_| {
            Error::SchemaValidation(format!(
                "record {name:?} has invalid hit_points ({hit_points})"
            ))
        })?;

        let armor_class = raw
            .armor_class
            .and_then(|ac| ac.value())
            .ok_or_else(|| missing_field(&name, "armor_class"))?;
        let armor_class = u32::try_from(armor_class).map_err(|_| {
            Error::SchemaValidation(format!(
                "record {name:?} has invalid armor_class ({armor_class})"
            ))
        })?;

        // Missing action names/descriptions come through as empty strings,
        // matching the upstream service's sparse entries.
        let actions = raw
            .actions
            .unwrap_or_default()
            .into_iter()
            .map(|action| Action {
                name: action.name.unwrap_or_default(),
                description: action.desc.unwrap_or_default(),
            })
            .collect();

        Ok(DetailRecord {
            name,
            hit_points,
            armor_class,
            actions,
        })
    }
}

fn missing_field(record: &str, field: &str) -> Error {
    Error::SchemaValidation(format!(
        "record {record:?} is missing required field `{field}`"
    ))
}
