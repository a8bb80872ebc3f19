//! Maintenance record model

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Backend-assigned identifier of a maintenance record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MaintenanceId(Uuid);

impl MaintenanceId {
    /// Create a fresh identifier (UUID v7). Only fakes and tests mint IDs;
    /// real records get theirs from the backend.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Get the string representation of this ID
    #[must_use]
    pub fn as_str(&self) -> String {
        self.0.to_string()
    }
}

impl Default for MaintenanceId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MaintenanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MaintenanceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s.trim())?))
    }
}

/// One vehicle-service event owned by a user, as stored in `maintenances`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceRecord {
    pub id: MaintenanceId,
    pub user_id: String,
    #[serde(default)]
    pub vehicle_id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// `null` in the column (a non-numeric entry) reads back as `NaN`.
    #[serde(deserialize_with = "nullable_number")]
    pub mileage: f64,
    #[serde(default)]
    pub cost: Option<f64>,
    #[serde(default)]
    pub location: Option<String>,
    /// Calendar date in storage format (`YYYY-MM-DD`)
    pub date: String,
}

impl MaintenanceRecord {
    /// Case-insensitive substring match against the title.
    #[must_use]
    pub fn title_matches(&self, query: &str) -> bool {
        self.title.to_lowercase().contains(&query.to_lowercase())
    }
}

fn nullable_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}

/// Editable columns of a maintenance record, already coerced for the wire.
///
/// Non-numeric mileage/cost text coerces to `NaN`, which `serde_json`
/// serializes as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaintenanceFields {
    pub title: String,
    pub description: String,
    pub mileage: f64,
    pub cost: f64,
    pub location: String,
    pub date: String,
}

/// Insert payload for a new maintenance record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewMaintenance {
    pub user_id: String,
    pub vehicle_id: Option<String>,
    #[serde(flatten)]
    pub fields: MaintenanceFields,
}

/// Format a number the way it is shown to users: integral values lose the
/// trailing `.0`.
#[must_use]
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}
