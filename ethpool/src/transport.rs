//! JSON-RPC plumbing. [`HttpTransport`] posts JSON-RPC 2.0 envelopes with
//! `reqwest`; anything else implementing [`RpcTransport`] can stand in for it.

use reqwest::Client as HttpClient;
use serde_json::Value;
use url::Url;

use crate::error::{ReaderError, Result};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Connection-level failure: DNS, refused, TLS, dropped mid-response.
    #[error("endpoint unreachable: {0}")]
    Unreachable(#[source] Box<dyn std::error::Error + Send + Sync>),
    /// The node answered with a JSON-RPC `error` member.
    #[error("rpc error {code}: {message}")]
    Rpc {
        code: i64,
        message: String,
        data: Option<Value>,
    },
    /// The node answered, but not with a usable JSON-RPC envelope.
    #[error("malformed rpc response: {0}")]
    Malformed(String),
}

/// A single request/response exchange with a JSON-RPC endpoint.
#[allow(async_fn_in_trait)]
pub trait RpcTransport {
    async fn request(&self, method: &str, params: Value) -> Result<Value, TransportError>;
}

impl<T: RpcTransport + ?Sized> RpcTransport for &T {
    async fn request(&self, method: &str, params: Value) -> Result<Value, TransportError> {
        (**self).request(method, params).await
    }
}

#[derive(Clone, Debug)]
pub struct HttpTransport {
    rpc_url: Url,
    http: HttpClient,
}

impl HttpTransport {
    /// Parses the endpoint and prepares a client. Nothing is sent yet.
    pub fn new(endpoint_url: &str) -> Result<Self> {
        let trimmed = endpoint_url.trim();
        if trimmed.is_empty() {
            return Err(ReaderError::Configuration("endpoint url is empty".into()));
        }
        let rpc_url = Url::parse(trimmed).map_err(|e| {
            ReaderError::Configuration(format!("failed to parse endpoint url `{trimmed}`: {e}"))
        })?;
        if !matches!(rpc_url.scheme(), "http" | "https") {
            return Err(ReaderError::Configuration(format!(
                "endpoint url `{rpc_url}` must be http(s)"
            )));
        }
        Ok(Self {
            rpc_url,
            http: HttpClient::new(),
        })
    }

    pub fn url(&self) -> &Url {
        &self.rpc_url
    }
}

impl RpcTransport for HttpTransport {
    async fn request(&self, method: &str, params: Value) -> Result<Value, TransportError> {
        let body = serde_json::json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });
        let res = self
            .http
            .post(self.rpc_url.as_str())
            .json(&body)
            .send()
            .await
            .map_err(|e| TransportError::Unreachable(Box::new(e)))?;
        let status = res.status();
        let bytes = res
            .bytes()
            .await
            .map_err(|e| TransportError::Unreachable(Box::new(e)))?;
        parse_envelope(status.as_u16(), &bytes)
    }
}

/// Pulls `result` out of a JSON-RPC response body, or turns the body into
/// the matching [`TransportError`].
pub(crate) fn parse_envelope(status: u16, bytes: &[u8]) -> Result<Value, TransportError> {
    let v: Value = match serde_json::from_slice(bytes) {
        Ok(json) => json,
        Err(e) => {
            let mut sample = String::from_utf8_lossy(bytes).to_string();
            if sample.len() > 512 {
                let mut cut = 512;
                while !sample.is_char_boundary(cut) {
                    cut -= 1;
                }
                sample.truncate(cut);
            }
            let hint = if sample.trim_start().starts_with('<') {
                "Response looks like HTML; the endpoint may be a gateway page rather than a JSON-RPC node."
            } else if sample.trim().is_empty() {
                "Empty body from RPC. Endpoint may be down or require authentication."
            } else {
                "Non-JSON response from RPC."
            };
            return Err(TransportError::Malformed(format!(
                "decode error (status {status}): {e}. {hint} Sample: {sample}"
            )));
        }
    };
    if let Some(err) = v.get("error") {
        return Err(TransportError::Rpc {
            code: err.get("code").and_then(Value::as_i64).unwrap_or_default(),
            message: err
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_owned)
                .unwrap_or_else(|| err.to_string()),
            data: err.get("data").cloned(),
        });
    }
    match v.get("result") {
        Some(result) => Ok(result.clone()),
        None => Err(TransportError::Malformed(format!(
            "status {status}: envelope has neither `result` nor `error`: {v}"
        ))),
    }
}
