pub mod add;
pub mod auth_cmd;
pub mod common;
pub mod completions;
pub mod config;
pub mod delete;
pub mod edit;
pub mod favorite;
pub mod favorites;
pub mod list;
pub mod profile;
pub mod show;
