//! Sample frames produced by the replay feed
//!
//! A [`Frame`] is one recorded sample: a flat mapping of field name to
//! decimal string covering all sensor fields. Fields are parsed lazily,
//! group by group, when [`crate::SensorView::refresh`] runs.

use std::collections::HashMap;

use crate::error::{EngineError, Result};

/// Field names carried by every recorded sample
pub const FIELD_NAMES: [&str; 13] = [
    "ACC_X",
    "ACC_Y",
    "ACC_Z",
    "GYRO_X",
    "GYRO_Y",
    "GYRO_Z",
    "MAGNET_X",
    "MAGNET_Y",
    "MAGNET_Z",
    "HUMIDITY",
    "PRESSURE",
    "TEMP_HUM",
    "TEMP_PRESS",
];

/// One sample of all recorded sensor fields
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    fields: HashMap<String, String>,
}

impl Frame {
    /// Build a frame from a decoded field map
    pub fn new(fields: HashMap<String, String>) -> Self {
        Self { fields }
    }

    /// Build a synthetic frame where every field equals `value`
    ///
    /// Used by fault injection: an anomaly hit replaces the whole frame,
    /// not individual fields.
    pub fn uniform(value: f32) -> Self {
        let value = value.to_string();
        let fields = FIELD_NAMES
            .iter()
            .map(|name| (name.to_string(), value.clone()))
            .collect();
        Self { fields }
    }

    /// Raw field value, if present
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// Parse one field as a float
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::MalformedFrame`] if the field is missing or
    /// not a decimal value.
    pub fn parse_field(&self, field: &str) -> Result<f32> {
        let raw = self.fields.get(field).ok_or_else(|| EngineError::MalformedFrame {
            field: field.to_string(),
            value: "<missing>".to_string(),
        })?;

        raw.trim().parse::<f32>().map_err(|_| EngineError::MalformedFrame {
            field: field.to_string(),
            value: raw.clone(),
        })
    }

    /// Parse several fields at once, in order
    pub fn parse_fields<const N: usize>(&self, fields: [&str; N]) -> Result<[f32; N]> {
        let mut out = [0.0; N];
        for (slot, field) in out.iter_mut().zip(fields) {
            *slot = self.parse_field(field)?;
        }
        Ok(out)
    }

    /// Number of fields in this frame
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the frame carries no fields at all
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
