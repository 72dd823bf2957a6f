// Copyright @ 2025 - present, R3E Network
// All Rights Reserved

use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A JSON-RPC 2.0 request body.
#[derive(Debug, Clone, Serialize)]
pub struct RpcRequest<'a> {
    pub jsonrpc: &'static str,
    pub id: u64,
    pub method: &'a str,
    pub params: Vec<Value>,
}

impl<'a> RpcRequest<'a> {
    pub fn new(method: &'a str, params: Vec<Value>) -> Self {
        Self {
            jsonrpc: "2.0",
            id: 1,
            method,
            params,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RpcErrorObject {
    pub code: i64,
    pub message: String,
}

/// A JSON-RPC 2.0 response: exactly one of `result` and `error` is expected.
#[derive(Debug, Clone, Deserialize)]
pub struct RpcResponse {
    #[serde(default)]
    pub id: Value,
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<RpcErrorObject>,
}

/// `calculatenetworkfee` result. Nodes render the fee as a decimal string,
/// some as a bare number.
#[derive(Debug, Clone, Copy, Deserialize)]
pub(crate) struct NetworkFeeResult {
    #[serde(rename = "networkfee", deserialize_with = "u64_from_number_or_string")]
    pub network_fee: u64,
}

fn u64_from_number_or_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(u64),
        String(String),
    }

    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(value) => Ok(value),
        NumberOrString::String(text) => text.trim().parse().map_err(de::Error::custom),
    }
}

/// `sendrawtransaction` result.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SendRawTransactionResult {
    pub hash: String,
}
