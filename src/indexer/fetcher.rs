//! Range fetching over the chain transport: a bounded-concurrency block
//! fetcher and an adaptive-bisection log fetcher.

use alloy_primitives::U256;
use futures::stream::{FuturesUnordered, StreamExt};
use tokio::sync::Semaphore;
use tracing::{debug, warn};

use crate::client::ChainTransport;
use crate::models::errors::RpcError;
use crate::models::rpc::{BlockJson, EventJson, LogFilter};
use crate::utils::to_hex;

/// Result of an adaptive log range fetch. `skipped_blocks` counts blocks
/// dropped because a single-block window still overflowed the server's
/// result cap; callers surface it in their batch summary.
#[derive(Debug, Default)]
pub struct LogRangeFetch {
    pub logs: Vec<EventJson>,
    pub skipped_blocks: u64,
}

/// Fetch `[from, to]` inclusive, one block at a time in ascending order.
pub async fn fetch_blocks_in_range<C>(
    client: &C,
    from: u64,
    to: u64,
    debug_logs: bool,
) -> Result<Vec<BlockJson>, RpcError>
where
    C: ChainTransport + ?Sized,
{
    let mut blocks = Vec::with_capacity((to.saturating_sub(from) + 1) as usize);

    for number in from..=to {
        let block = client.block_by_number(number, true).await?;
        if debug_logs {
            debug!(block = number, "fetched block");
        }
        blocks.push(block);
    }

    Ok(blocks)
}

/// Fetch `[from, to]` inclusive with at most `max_concurrent` calls in
/// flight. Results arrive in completion order, not block order; callers
/// that need deterministic ordering sort afterwards. The first failure is
/// kept, later ones are dropped, and once every request has settled the
/// captured failure discards the partial results.
pub async fn fetch_blocks_in_range_async<C>(
    client: &C,
    from: u64,
    to: u64,
    max_concurrent: usize,
    debug_logs: bool,
) -> Result<Vec<BlockJson>, RpcError>
where
    C: ChainTransport + ?Sized,
{
    if max_concurrent <= 1 {
        return fetch_blocks_in_range(client, from, to, debug_logs).await;
    }

    let semaphore = Semaphore::new(max_concurrent);
    let mut requests = FuturesUnordered::new();

    for number in from..=to {
        let semaphore = &semaphore;
        requests.push(async move {
            let _permit = semaphore
                .acquire()
                .await
                .expect("block fetch semaphore closed");
            (number, client.block_by_number(number, true).await)
        });
    }

    let mut blocks = Vec::new();
    let mut first_error: Option<RpcError> = None;

    while let Some((number, result)) = requests.next().await {
        match result {
            Ok(block) => {
                if debug_logs {
                    debug!(block = number, "fetched block");
                }
                blocks.push(block);
            }
            Err(e) => {
                warn!(block = number, error = %e, "failed to fetch block");
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
        }
    }

    match first_error {
        Some(e) => Err(e),
        None => Ok(blocks),
    }
}

/// Fetch logs for `[from, to]` inclusive, narrowing the request window
/// whenever the endpoint reports a result-cap overflow.
///
/// The window starts at the full range and halves on each overflow; it is
/// never widened again. When even a single-block window overflows, that
/// block is skipped and counted in the returned summary.
pub async fn fetch_logs_in_range<C>(
    client: &C,
    from: u64,
    to: u64,
    addresses: &[String],
    topics: &[Vec<String>],
    debug_logs: bool,
) -> Result<LogRangeFetch, RpcError>
where
    C: ChainTransport + ?Sized,
{
    let mut fetch = LogRangeFetch::default();
    if from > to {
        return Ok(fetch);
    }

    let mut cursor = from;
    let mut step = to - from;

    while cursor <= to {
        let next = cursor.saturating_add(step).min(to);
        let filter = LogFilter {
            from_block: to_hex(U256::from(cursor)),
            to_block: to_hex(U256::from(next)),
            addresses: addresses.to_vec(),
            topics: topics.to_vec(),
        };

        match client.get_logs(&filter).await {
            Ok(mut batch) => {
                if debug_logs {
                    debug!(from = cursor, to = next, count = batch.len(), "fetched logs");
                }
                fetch.logs.append(&mut batch);
                cursor = next + 1;
            }
            Err(e) if e.is_too_many_results() => {
                step /= 2;
                if step < 1 {
                    warn!(block = next, "result cap hit on a single block, skipping");
                    fetch.skipped_blocks += 1;
                    cursor = next + 1;
                }
            }
            Err(e) => return Err(e),
        }
    }

    Ok(fetch)
}
