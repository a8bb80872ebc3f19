//! Data models for Pitstop

mod favorite;
mod maintenance;
mod profile;

pub use favorite::FavoriteMark;
pub use maintenance::{
    format_number, MaintenanceFields, MaintenanceId, MaintenanceRecord, NewMaintenance,
};
pub use profile::{Role, UserProfile};
