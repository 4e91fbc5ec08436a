pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod schedule;
pub mod state;
pub mod validation;
