//! Core types for the odds arbitrage engine
//!
//! This crate provides shared types used across all components:
//! - Market and outcome identification
//! - Bookmaker quote and best-odds types
//! - Stake allocation results
//! - Arbitrage opportunity types
//! - Error taxonomy and configuration

pub mod markets;
pub mod quotes;
pub mod results;
pub mod opportunities;
pub mod config;
pub mod errors;

pub use markets::*;
pub use quotes::*;
pub use results::*;
pub use opportunities::*;
pub use config::*;
pub use errors::*;
