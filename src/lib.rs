//! Movie recommendations mashed up from TasteDive and OMDb.
//!
//! Seed titles are expanded into related movies (TasteDive), each candidate is
//! rated by its Rotten Tomatoes score (OMDb), and the candidates come back
//! ordered by rating. All outbound queries go through a process-lifetime
//! [`cache::RequestCache`].

pub mod cache;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
