//! Thin JSON-RPC transport. One method per endpoint call, shapes
//! deserialized straight off the wire; no retry or backoff lives here.

use std::time::Duration;

use alloy_primitives::U256;
use alloy_rpc_client::{ClientBuilder, RpcClient};
use alloy_transport::TransportError;
use alloy_transport_http::Http;
use async_trait::async_trait;
use url::Url;

use crate::models::errors::RpcError;
use crate::models::rpc::{BlockJson, EventJson, LogFilter, ReceiptJson};
use crate::utils::{from_hex, to_hex};

/// The transport surface the fetchers drive. Implementations must be safe
/// to share across concurrent requests.
#[async_trait]
pub trait ChainTransport: Send + Sync {
    async fn latest_block_number(&self) -> Result<U256, RpcError>;

    async fn block_by_number(
        &self,
        number: u64,
        full_transactions: bool,
    ) -> Result<BlockJson, RpcError>;

    async fn block_by_hash(&self, hash: &str) -> Result<BlockJson, RpcError>;

    async fn transaction_receipt(&self, hash: &str) -> Result<ReceiptJson, RpcError>;

    async fn get_logs(&self, filter: &LogFilter) -> Result<Vec<EventJson>, RpcError>;
}

/// JSON-RPC client over HTTP. The timeout given at construction applies to
/// every call; in-flight calls are aborted by dropping their futures, and
/// dropping the client releases the underlying connection pool.
#[derive(Clone, Debug)]
pub struct ChainClient {
    client: RpcClient,
}

impl ChainClient {
    pub fn new(url: &str, timeout: Duration) -> Result<Self, RpcError> {
        let endpoint: Url = url.parse().map_err(|e| RpcError::Dial {
            url: url.to_string(),
            message: format!("invalid endpoint url: {e}"),
        })?;

        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RpcError::Dial {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        let transport = Http::with_client(http_client, endpoint);
        let client = ClientBuilder::default().transport(transport, false);

        Ok(Self { client })
    }
}

fn transport_error(method: &'static str, err: TransportError) -> RpcError {
    match err {
        TransportError::DeserError { err, text } => RpcError::Shape {
            method,
            reason: format!("{err}: {text}"),
        },
        TransportError::NullResp => RpcError::Shape {
            method,
            reason: "null response".to_string(),
        },
        // Server errors keep their message verbatim so the adaptive log
        // fetcher can recognize result-cap overflows.
        other => RpcError::Call {
            method,
            message: other.to_string(),
        },
    }
}

#[async_trait]
impl ChainTransport for ChainClient {
    async fn latest_block_number(&self) -> Result<U256, RpcError> {
        let raw: String = self
            .client
            .request("eth_blockNumber", ())
            .await
            .map_err(|e| transport_error("eth_blockNumber", e))?;

        from_hex("eth_blockNumber", &raw).map_err(|e| RpcError::Shape {
            method: "eth_blockNumber",
            reason: e.to_string(),
        })
    }

    async fn block_by_number(
        &self,
        number: u64,
        full_transactions: bool,
    ) -> Result<BlockJson, RpcError> {
        let tag = to_hex(U256::from(number));
        let block: Option<BlockJson> = self
            .client
            .request("eth_getBlockByNumber", (tag, full_transactions))
            .await
            .map_err(|e| transport_error("eth_getBlockByNumber", e))?;

        block.ok_or(RpcError::Shape {
            method: "eth_getBlockByNumber",
            reason: format!("no block at height {number}"),
        })
    }

    async fn block_by_hash(&self, hash: &str) -> Result<BlockJson, RpcError> {
        let block: Option<BlockJson> = self
            .client
            .request("eth_getBlockByHash", (hash.to_string(), true))
            .await
            .map_err(|e| transport_error("eth_getBlockByHash", e))?;

        block.ok_or(RpcError::Shape {
            method: "eth_getBlockByHash",
            reason: format!("no block with hash {hash}"),
        })
    }

    async fn transaction_receipt(&self, hash: &str) -> Result<ReceiptJson, RpcError> {
        let receipt: Option<ReceiptJson> = self
            .client
            .request("eth_getTransactionReceipt", (hash.to_string(),))
            .await
            .map_err(|e| transport_error("eth_getTransactionReceipt", e))?;

        receipt.ok_or(RpcError::Shape {
            method: "eth_getTransactionReceipt",
            reason: format!("no receipt for {hash}"),
        })
    }

    async fn get_logs(&self, filter: &LogFilter) -> Result<Vec<EventJson>, RpcError> {
        self.client
            .request("eth_getLogs", (filter.clone(),))
            .await
            .map_err(|e| transport_error("eth_getLogs", e))
    }
}
