// Copyright @ 2025 - present, R3E Network
// All Rights Reserved

use std::time::Duration;

use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use neo_base::UInt256;
use neo_config::ProtocolSettings;
use neo_core::{RpcError, RpcProvider, RpcResult, Transaction};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::models::{NetworkFeeResult, RpcRequest, RpcResponse, SendRawTransactionResult};

pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct RpcClient {
    base_address: Url,
    http_client: Client,
    request_timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct RpcClientBuilder {
    url: Url,
    timeout: Duration,
    client: Option<Client>,
}

impl RpcClientBuilder {
    pub fn new(url: Url) -> Self {
        Self {
            url,
            timeout: DEFAULT_HTTP_TIMEOUT,
            client: None,
        }
    }

    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Takes the timeout from the protocol settings.
    #[must_use]
    pub fn settings(self, settings: &ProtocolSettings) -> Self {
        self.timeout(settings.rpc_timeout())
    }

    /// Reuses an existing HTTP client. The per-request timeout still applies.
    #[must_use]
    pub fn http_client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    pub fn build(self) -> RpcResult<RpcClient> {
        let http_client = match self.client {
            Some(client) => client,
            None => Client::builder()
                .timeout(self.timeout)
                .build()
                .map_err(|err| RpcError::Transport(err.to_string()))?,
        };
        Ok(RpcClient {
            base_address: self.url,
            http_client,
            request_timeout: self.timeout,
        })
    }
}

impl RpcClient {
    #[must_use]
    pub fn builder(url: Url) -> RpcClientBuilder {
        RpcClientBuilder::new(url)
    }

    /// A client for `url` with the timeout from `settings`.
    pub fn new(url: &str, settings: &ProtocolSettings) -> RpcResult<Self> {
        let url = Url::parse(url).map_err(|err| RpcError::Transport(format!("invalid url `{url}`: {err}")))?;
        Self::builder(url).settings(settings).build()
    }

    #[inline]
    pub fn url(&self) -> &Url {
        &self.base_address
    }

    /// Sends one request and decodes its `result`. JSON-RPC error objects
    /// become [`RpcError::Server`].
    pub async fn send<T: DeserializeOwned>(&self, method: &str, params: Vec<Value>) -> RpcResult<T> {
        let request = RpcRequest::new(method, params);
        debug!(method, url = %self.base_address, "rpc request");

        let response = self
            .http_client
            .post(self.base_address.clone())
            .timeout(self.request_timeout)
            .json(&request)
            .send()
            .await
            .map_err(|err| transport_error(method, err))?;

        let content = response
            .text()
            .await
            .map_err(|err| transport_error(method, err))?;
        Self::parse_response(&content)
    }

    fn parse_response<T: DeserializeOwned>(content: &str) -> RpcResult<T> {
        let response: RpcResponse = serde_json::from_str(content)
            .map_err(|err| RpcError::InvalidResponse(format!("malformed body: {err}")))?;
        if let Some(error) = response.error {
            return Err(RpcError::Server {
                code: error.code,
                message: error.message,
            });
        }

        let result = response
            .result
            .ok_or_else(|| RpcError::InvalidResponse("neither result nor error present".into()))?;
        serde_json::from_value(result).map_err(|err| RpcError::InvalidResponse(err.to_string()))
    }

    pub async fn get_block_count(&self) -> RpcResult<u32> {
        self.send("getblockcount", Vec::new()).await
    }

    /// Network fee for a serialized transaction (sent base64 encoded).
    pub async fn calculate_network_fee(&self, tx: &[u8]) -> RpcResult<u64> {
        let params = vec![json!(general_purpose::STANDARD.encode(tx))];
        let result: NetworkFeeResult = self.send("calculatenetworkfee", params).await?;
        Ok(result.network_fee)
    }

    /// Relays a signed transaction and returns the hash the node reports.
    pub async fn send_raw_transaction(&self, tx: &Transaction) -> RpcResult<UInt256> {
        let params = vec![json!(general_purpose::STANDARD.encode(tx.to_bytes()))];
        let result: SendRawTransactionResult = self.send("sendrawtransaction", params).await?;
        result
            .hash
            .parse()
            .map_err(|_| RpcError::InvalidResponse(format!("invalid hash `{}`", result.hash)))
    }
}

fn transport_error(method: &str, err: reqwest::Error) -> RpcError {
    if err.is_timeout() {
        warn!(method, "rpc request timed out");
        return RpcError::Timeout;
    }
    warn!(method, error = %err, "rpc request failed");
    RpcError::Transport(err.to_string())
}

#[async_trait]
impl RpcProvider for RpcClient {
    async fn get_block_count(&self) -> RpcResult<u32> {
        RpcClient::get_block_count(self).await
    }

    async fn calculate_network_fee(&self, tx: &[u8]) -> RpcResult<u64> {
        RpcClient::calculate_network_fee(self, tx).await
    }
}
