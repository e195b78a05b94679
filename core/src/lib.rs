//! Statistical sampling engine for synthetic financial transactions.
//!
//! Layers, leaves first:
//!   - `rng`:          seeded random sources injected into every sampler
//!   - `distribution`: continuous families, categorical samplers, and the
//!                     amount/time samplers built on top of them
//!   - `factory`:      prebuilt distributions for common attributes
//!   - `generator`:    whole-record composition driven by `config`

pub mod config;
pub mod distribution;
pub mod error;
pub mod factory;
pub mod generator;
pub mod model;
pub mod rng;
pub mod types;
