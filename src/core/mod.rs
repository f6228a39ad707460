//! Core library components.
//!
//! This module contains the reusable business logic for secret-name decoding,
//! credential generation, and rotation orchestration.

pub mod azure;
pub mod config;
pub mod constants;
pub mod credential;
pub mod name;
pub mod rotation;
