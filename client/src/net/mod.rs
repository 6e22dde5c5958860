//! Networking modules for the auth gateway.
//!
//! SYSTEM CONTEXT
//! ==============
//! `gateway` defines the provider boundary, `api` implements it over the
//! server's `/api/auth/*` proxy, and `types` defines the shared wire schema.

pub mod api;
pub mod gateway;
pub mod types;
