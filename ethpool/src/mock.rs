//! Scripted transport for tests: replays queued replies and records calls.

use std::collections::VecDeque;
use std::sync::Mutex;

use alloy::primitives::U256;
use serde_json::Value;

use crate::transport::{RpcTransport, TransportError};

#[derive(Debug, Default)]
pub(crate) struct ScriptedTransport {
    replies: Mutex<VecDeque<Result<Value, TransportError>>>,
    calls: Mutex<Vec<(String, Value)>>,
}

impl ScriptedTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn reply(self, result: Value) -> Self {
        self.replies.lock().unwrap().push_back(Ok(result));
        self
    }

    pub(crate) fn reply_words(self, words: &[U256]) -> Self {
        self.reply(words_hex(words))
    }

    pub(crate) fn fail(self, err: TransportError) -> Self {
        self.replies.lock().unwrap().push_back(Err(err));
        self
    }

    pub(crate) fn revert(self) -> Self {
        self.fail(TransportError::Rpc {
            code: 3,
            message: "execution reverted".into(),
            data: Some(Value::String("0x".into())),
        })
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub(crate) fn calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().unwrap().clone()
    }
}

impl RpcTransport for ScriptedTransport {
    async fn request(&self, method: &str, params: Value) -> Result<Value, TransportError> {
        self.calls
            .lock()
            .unwrap()
            .push((method.to_string(), params));
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Malformed("no scripted reply left".into())))
    }
}

/// ABI encoding of a run of `uint256` words, as `eth_call` returns it.
pub(crate) fn words_hex(words: &[U256]) -> Value {
    let mut out = String::from("0x");
    for w in words {
        out.push_str(&alloy::primitives::hex::encode(w.to_be_bytes::<32>()));
    }
    Value::String(out)
}

pub(crate) fn unreachable() -> TransportError {
    TransportError::Unreachable("connection refused".into())
}
