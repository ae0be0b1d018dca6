//! Background Tasks Module
//!
//! Contains background tasks that run for the life of the server process.
//!
//! # Tasks
//! - Cache sweeper: evicts expired persistent-cache entries at a fixed
//!   interval

mod sweeper;

pub use sweeper::{Sweeper, DEFAULT_SWEEP_INTERVAL};
