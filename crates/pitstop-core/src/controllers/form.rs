//! Create and edit screens for a maintenance record.

use std::sync::Arc;

use super::{Route, SessionContext};
use crate::date::{to_display, to_storage};
use crate::error::{Error, Result};
use crate::models::{
    format_number, MaintenanceFields, MaintenanceId, MaintenanceRecord, NewMaintenance,
};
use crate::remote::RemoteDataClient;

const REQUIRED_FIELDS_MESSAGE: &str = "Fill in all required fields.";

/// Raw text a user typed into the maintenance form. `date` is `DD/MM/YYYY`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaintenanceForm {
    pub title: String,
    pub description: String,
    pub mileage: String,
    pub cost: String,
    pub location: String,
    pub date: String,
}

impl MaintenanceForm {
    /// Pre-populate the form from a stored record. A missing (`NaN`) mileage
    /// comes up blank so it has to be re-entered.
    #[must_use]
    pub fn from_record(record: &MaintenanceRecord) -> Self {
        let mileage = if record.mileage.is_finite() {
            format_number(record.mileage)
        } else {
            String::new()
        };
        Self {
            title: record.title.clone(),
            description: record.description.clone().unwrap_or_default(),
            mileage,
            cost: record.cost.map(format_number).unwrap_or_default(),
            location: record.location.clone().unwrap_or_default(),
            date: to_display(&record.date),
        }
    }

    /// `title`, `mileage` and `date` must be non-empty. One combined message,
    /// not per-field detail.
    pub fn validate(&self) -> Result<()> {
        if self.title.is_empty() || self.mileage.is_empty() || self.date.is_empty() {
            return Err(Error::Validation(REQUIRED_FIELDS_MESSAGE.to_string()));
        }
        Ok(())
    }

    /// Coerce text to wire values and convert the date to storage format.
    #[must_use]
    pub fn to_fields(&self) -> MaintenanceFields {
        MaintenanceFields {
            title: self.title.clone(),
            description: self.description.clone(),
            mileage: coerce_number(&self.mileage),
            cost: coerce_number(&self.cost),
            location: self.location.clone(),
            date: to_storage(&self.date),
        }
    }
}

/// Numeric coercion for form text, matching how a browser form reads numbers:
/// blank is `0`, `0x`/`0o`/`0b` literals are integers, `Infinity` is accepted
/// and anything else unparseable is `NaN`.
#[must_use]
pub fn coerce_number(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }

    let radix = match trimmed.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        return parse_radix(&trimmed[2..], radix).unwrap_or(f64::NAN);
    }

    match trimmed {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    // `f64::from_str` also takes `inf` and `nan` spellings; keep to plain decimals.
    if !trimmed
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | '+' | '-' | 'e' | 'E'))
    {
        return f64::NAN;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

fn parse_radix(digits: &str, radix: u32) -> Option<f64> {
    if digits.is_empty() {
        return None;
    }
    digits.chars().try_fold(0.0_f64, |value, c| {
        c.to_digit(radix)
            .map(|digit| value.mul_add(f64::from(radix), f64::from(digit)))
    })
}

pub struct CreateMaintenanceController<C: RemoteDataClient> {
    client: Arc<C>,
    session: SessionContext,
}

impl<C: RemoteDataClient> CreateMaintenanceController<C> {
    pub const fn new(client: Arc<C>, session: SessionContext) -> Self {
        Self { client, session }
    }

    /// Insert a new record owned by the session user.
    pub async fn create(&self, form: &MaintenanceForm) -> Result<Route> {
        let user_id = self.session.user_id()?;
        form.validate()?;

        let record = NewMaintenance {
            user_id: user_id.to_string(),
            vehicle_id: None,
            fields: form.to_fields(),
        };
        self.client
            .insert_maintenance(&record)
            .await
            .map_err(|error| Error::SubmitFailed(error.to_string()))?;
        tracing::info!(title = %record.fields.title, "Maintenance created");
        Ok(Route::MaintenanceList)
    }
}

pub struct EditMaintenanceController<C: RemoteDataClient> {
    client: Arc<C>,
    session: SessionContext,
    id: MaintenanceId,
}

impl<C: RemoteDataClient> EditMaintenanceController<C> {
    pub const fn new(client: Arc<C>, session: SessionContext, id: MaintenanceId) -> Self {
        Self {
            client,
            session,
            id,
        }
    }

    #[must_use]
    pub const fn id(&self) -> &MaintenanceId {
        &self.id
    }

    /// Fetch the record and turn it into a form with a display-format date.
    pub async fn load(&self) -> Result<MaintenanceForm> {
        self.session.user_id()?;
        let record = self
            .client
            .get_maintenance(&self.id)
            .await
            .map_err(|error| Error::LoadFailed(error.to_string()))?
            .ok_or_else(|| Error::NotFound(self.id.to_string()))?;
        Ok(MaintenanceForm::from_record(&record))
    }

    /// Validate and update the record by id.
    pub async fn submit(&self, form: &MaintenanceForm) -> Result<Route> {
        self.session.user_id()?;
        form.validate()?;

        self.client
            .update_maintenance(&self.id, &form.to_fields())
            .await
            .map_err(|error| Error::SubmitFailed(error.to_string()))?;
        tracing::info!(id = %self.id, "Maintenance updated");
        Ok(Route::MaintenanceList)
    }
}
