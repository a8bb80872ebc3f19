//! Detail screen for one record, with a two-step delete.

use std::sync::Arc;

use super::{Route, SessionContext};
use crate::date::to_display;
use crate::error::{Error, Result};
use crate::models::{format_number, MaintenanceId, MaintenanceRecord};
use crate::remote::RemoteDataClient;

const NOT_AVAILABLE: &str = "N/A";
const CURRENCY_PREFIX: &str = "R$";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailRow {
    pub label: &'static str,
    pub value: String,
}

/// Display-ready view of a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaintenanceDetail {
    pub id: MaintenanceId,
    pub title: String,
    pub rows: Vec<DetailRow>,
}

impl MaintenanceDetail {
    #[must_use]
    pub fn from_record(record: &MaintenanceRecord) -> Self {
        let text_or_na = |value: Option<&String>| {
            value
                .filter(|text| !text.trim().is_empty())
                .map_or_else(|| NOT_AVAILABLE.to_string(), String::clone)
        };

        let rows = vec![
            DetailRow {
                label: "Date",
                value: to_display(&record.date),
            },
            DetailRow {
                label: "Mileage",
                value: format!("{} km", format_number(record.mileage)),
            },
            DetailRow {
                label: "Description",
                value: text_or_na(record.description.as_ref()),
            },
            DetailRow {
                label: "Location",
                value: text_or_na(record.location.as_ref()),
            },
            DetailRow {
                label: "Cost",
                value: record.cost.map_or_else(
                    || NOT_AVAILABLE.to_string(),
                    |cost| format!("{CURRENCY_PREFIX} {}", format_number(cost)),
                ),
            },
        ];

        Self {
            id: record.id,
            title: record.title.clone(),
            rows,
        }
    }
}

/// Shows a record handed over by the caller; no fetch of its own.
pub struct MaintenanceDetailController<C: RemoteDataClient> {
    client: Arc<C>,
    session: SessionContext,
    detail: MaintenanceDetail,
}

impl<C: RemoteDataClient> MaintenanceDetailController<C> {
    pub fn new(client: Arc<C>, session: SessionContext, record: &MaintenanceRecord) -> Self {
        Self {
            client,
            session,
            detail: MaintenanceDetail::from_record(record),
        }
    }

    #[must_use]
    pub const fn detail(&self) -> &MaintenanceDetail {
        &self.detail
    }

    /// First step of a delete. Nothing is sent until the returned prompt is
    /// confirmed.
    #[must_use]
    pub const fn request_delete(&self) -> PendingDelete<'_, C> {
        PendingDelete { controller: self }
    }
}

/// A delete waiting on the user's confirm/cancel answer.
#[must_use = "a pending delete does nothing until confirmed"]
pub struct PendingDelete<'a, C: RemoteDataClient> {
    controller: &'a MaintenanceDetailController<C>,
}

impl<C: RemoteDataClient> PendingDelete<'_, C> {
    /// Issue the irreversible delete. On failure the record stays intact.
    pub async fn confirm(self) -> Result<Route> {
        let controller = self.controller;
        controller.session.user_id()?;
        let id = controller.detail.id;

        controller
            .client
            .delete_maintenance(&id)
            .await
            .map_err(|error| Error::DeleteFailed(error.to_string()))?;
        tracing::info!(%id, "Maintenance deleted");
        Ok(Route::Back)
    }

    /// Dismiss the prompt without touching the backend.
    pub fn cancel(self) {
        tracing::debug!(id = %self.controller.detail.id, "Delete cancelled");
    }
}
