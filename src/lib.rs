// src/lib.rs

//! uniAdvise Client Library

pub mod config;
pub mod error;
pub mod form;
pub mod models;
pub mod services;
#[cfg(feature = "tui")]
pub mod tui;
