//! pitstop-core - Core library for Pitstop
//!
//! This crate contains the record models, the Supabase auth and data clients,
//! and the screen controllers used by Pitstop interfaces (CLI today).

pub mod auth;
pub mod config;
pub mod controllers;
pub mod date;
pub mod error;
pub mod models;
pub mod remote;
pub mod util;

pub use error::{Error, Result};
pub use models::{MaintenanceId, MaintenanceRecord};
