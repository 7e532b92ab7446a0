//! Service layer for the client application.
//!
//! This module contains the network-facing logic:
//! - Backend access trait and reqwest implementation (`RecommendApi`, `HttpApi`)

mod api;

pub use api::{HttpApi, RecommendApi, COUNTRIES_PATH, FIELDS_PATH, HEALTH_PATH, RECOMMEND_PATH};
