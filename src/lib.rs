//! Staffbook API Library
//!
//! Core of a multi-tenant HR record service: companies own users, users hold
//! contracts and request vacations. Provides token authentication, access
//! decisions, entity validation, storage adapters and the HTTP surface.

pub mod api;
pub mod auth;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod services;
