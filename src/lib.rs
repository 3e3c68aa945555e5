//! Library crate for gametrack-back, exposing modules for binaries and integration tests.

pub mod config;
pub mod dao;
mod dto;
mod error;
pub mod rawg;
pub mod routes;
pub mod services;
pub mod state;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
