//! Catalog of Wayne Industries projects: a SQLite-backed JSON API, a client for
//! it and a terminal browser built on that client.

pub mod api;
pub mod client;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod telemetry;
pub mod ui;
