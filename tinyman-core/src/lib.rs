//! # Tinyman Core
//!
//! Pure data types and math for the Tinyman v1.1 constant-product AMM:
//! the asset model, quote computation, the on-chain state codec, and the
//! byte-level encoding helpers shared by the contract template engine.
//!
//! Nothing in this crate performs I/O; every function here is
//! deterministic so that quotes match on-chain settlement exactly.

#![allow(clippy::missing_errors_doc)]

pub mod asset;
pub mod encoding;
pub mod error;
pub mod pool_math;
pub mod quote;
pub mod state;
pub mod swap_math;
