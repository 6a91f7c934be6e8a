//! Course membership and grading service.
//!
//! Layers, outermost first: [`api`] (axum handlers), [`service`] (use cases
//! with access decisions), [`repository`] (SeaORM persistence).

pub mod api;
pub mod config;
pub mod db;
pub mod entity;
pub mod file_store;
pub mod repository;
pub mod service;
pub mod session;
