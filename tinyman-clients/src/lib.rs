//! # Tinyman Clients
//!
//! Off-chain clients for the Tinyman v1.1 constant-product AMM: a ledger
//! facade trait, atomic transaction-group assembly, per-operation
//! builders, and the live [`pool::Pool`] handle.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use rust_decimal::Decimal;
//! use tinyman_clients::prelude::*;
//!
//! # async fn example(ledger: Arc<dyn Ledger>) -> anyhow::Result<()> {
//! let client = TinymanClient::new_testnet(ledger);
//!
//! // Resolve the pair and open the USDC/ALGO pool.
//! let usdc = client.fetch_asset(21582668).await?;
//! let algo = client.fetch_asset(0).await?;
//! let mut pool = Pool::new(&client, usdc.clone(), algo, true).await?;
//!
//! // Quote selling 1 USDC with 1% slippage.
//! let quote = pool
//!   .fetch_fixed_input_swap_quote(usdc.amount(1_000_000), Decimal::new(1, 2))
//!   .await?;
//! println!("{}", quote.amount_out_with_slippage()?);
//! # Ok(())
//! # }
//! ```

#![allow(clippy::missing_errors_doc)]

pub mod client;
pub mod group;
pub mod ledger;
pub mod operations;
pub mod pool;
pub mod prelude;
pub mod txn;
