//! EVM chain ingest and ABI label decoding.
//!
//! Two cores share one data model: a batched, concurrent JSON-RPC ingest
//! pipeline that normalizes blocks, transactions, and event logs into
//! stable binary records plus secondary index rows, and a label decoder
//! that turns persisted records into analyst-facing JSON rows using a
//! table of known contract ABIs.

pub mod abi;
pub mod client;
pub mod config;
pub mod indexer;
pub mod labels;
pub mod models;
pub mod records;
pub mod utils;

pub use client::{ChainClient, ChainTransport};
pub use config::IndexerSettings;
pub use indexer::{BlockBatch, EventBatch};
pub use labels::{AbiEntry, AbiMap};
pub use models::common::Chain;
