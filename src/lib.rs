pub mod assets;
pub mod auth;
pub mod booking;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod routes;
pub mod storage;
pub mod store;
pub mod ui;

pub use error::{AppError, Result};
