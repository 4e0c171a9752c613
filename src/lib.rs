//! Perch - a small self-hosted social network server.
//!
//! Serves a paginated post feed, per-user profile pages with follow
//! relationships, and a like toggle, all backed by SQLite.

pub mod auth;
pub mod cli;
pub mod config;
pub mod models;
pub mod repository;
pub mod schema;
pub mod server;
pub mod utils;
