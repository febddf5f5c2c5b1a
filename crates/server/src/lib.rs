//! Vitrine server library.
//!
//! This crate provides the catalog API as a library, allowing it to be
//! tested and reused. The binary entry point lives in `main.rs`.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod routes;
pub mod services;
pub mod state;
