//! Batch assembly: drive the range fetchers, normalize the wire shapes
//! into binary records, and derive the secondary index rows the analytics
//! store consumes.

pub mod fetcher;
pub mod transformations;

use std::collections::HashMap;

use anyhow::Result;
use chrono::Utc;
use tracing::info;

use crate::client::ChainTransport;
use crate::models::common::Chain;
use crate::models::indexes::{BlockCache, BlockIndex, LogIndex, TransactionIndex};
use crate::records;
use crate::utils::from_hex_u64;

use transformations::blocks::{block_index, cache_entry, BlockNormalizer};
use transformations::logs::{log_index, EventNormalizer};
use transformations::transactions::{transaction_index, TransactionNormalizer};

/// Everything a block range fetch produces. Records are the durable
/// artifact; the cache lives only as long as the batch.
#[derive(Debug, Default)]
pub struct BlockBatch {
    pub blocks: Vec<records::Block>,
    pub transactions: Vec<records::Transaction>,
    pub block_indexes: Vec<BlockIndex>,
    pub transaction_indexes: Vec<TransactionIndex>,
    pub block_cache: HashMap<u64, BlockCache>,
}

#[derive(Debug, Default)]
pub struct EventBatch {
    pub events: Vec<records::EventLog>,
    pub log_indexes: Vec<LogIndex>,
    /// Blocks dropped because a single-block log window still overflowed
    /// the endpoint's result cap.
    pub skipped_blocks: u64,
}

/// Fetch `[from, to]` and normalize into records plus index rows.
///
/// After a concurrent fetch the blocks are sorted by number before row ids
/// are assigned, so `row_id` is deterministic on every path.
pub async fn fetch_block_batch<C>(
    client: &C,
    chain: Chain,
    from: u64,
    to: u64,
    max_concurrent: usize,
    debug_logs: bool,
) -> Result<BlockBatch>
where
    C: ChainTransport + ?Sized,
{
    let mut blocks_json = if max_concurrent > 1 {
        fetcher::fetch_blocks_in_range_async(client, from, to, max_concurrent, debug_logs).await?
    } else {
        fetcher::fetch_blocks_in_range(client, from, to, debug_logs).await?
    };

    blocks_json.sort_by_cached_key(|block| {
        from_hex_u64("number", &block.block_number).unwrap_or(u64::MAX)
    });

    let indexed_at = Utc::now().timestamp() as u64;
    let mut batch = BlockBatch::default();

    for block_json in &blocks_json {
        let row_id = batch.blocks.len() as u64;
        let block = block_json.normalize(indexed_at)?;

        batch
            .block_cache
            .insert(block.block_number, cache_entry(&block));
        batch.block_indexes.push(block_index(chain, &block, row_id));

        for tx_json in &block_json.transactions {
            let row_id = batch.transactions.len() as u64;
            // number and hash are already on the wire shape; the timestamp
            // comes from the parent block
            let mut tx_json = tx_json.clone();
            tx_json.block_timestamp = block_json.timestamp.clone();

            let tx = tx_json.normalize(indexed_at)?;
            batch.transaction_indexes.push(transaction_index(&tx, row_id));
            batch.transactions.push(tx);
        }

        batch.blocks.push(block);
    }

    info!(
        chain = %chain,
        blocks = batch.blocks.len(),
        transactions = batch.transactions.len(),
        "assembled block batch"
    );

    Ok(batch)
}

/// Fetch logs for `[from, to]` and normalize into event records plus index
/// rows. Timestamps are denormalized from `block_cache`; blocks missing
/// from the cache index with timestamp 0.
pub async fn fetch_event_batch<C>(
    client: &C,
    from: u64,
    to: u64,
    addresses: &[String],
    topics: &[Vec<String>],
    block_cache: &HashMap<u64, BlockCache>,
    debug_logs: bool,
) -> Result<EventBatch>
where
    C: ChainTransport + ?Sized,
{
    let fetched =
        fetcher::fetch_logs_in_range(client, from, to, addresses, topics, debug_logs).await?;

    let mut batch = EventBatch {
        skipped_blocks: fetched.skipped_blocks,
        ..Default::default()
    };

    for event_json in &fetched.logs {
        let row_id = batch.events.len() as u64;
        let event = event_json.normalize()?;
        batch.log_indexes.push(log_index(&event, block_cache, row_id));
        batch.events.push(event);
    }

    if batch.skipped_blocks > 0 {
        info!(
            skipped_blocks = batch.skipped_blocks,
            "event batch dropped capped blocks"
        );
    }

    Ok(batch)
}
