//! JSON CRUD service for note records stored in SQLite.

pub mod api;
pub mod config;
pub mod db;
pub mod models;
