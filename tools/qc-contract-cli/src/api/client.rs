//! JSON-RPC quorum client over HTTP.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use qc_contract_tokens::domain::entities::BasicResponse;
use qc_contract_tokens::domain::requests::{
    DeployRequest, EventRequest, ExecuteRequest, FetchRequest, GenerateRequest,
};
use qc_contract_tokens::errors::TransportError;
use qc_contract_tokens::ports::outbound::QuorumClient;
use reqwest::Client;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, instrument};

use super::types::{methods, JsonRpcRequest, JsonRpcResponse};

/// Errors that can occur when talking to the quorum node.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("JSON-RPC error {code}: {message}")]
    Rpc { code: i64, message: String },
    #[error("Failed to parse response: {0}")]
    Parse(String),
    #[error("Connection failed: {0}")]
    Connection(String),
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),
}

impl From<ApiError> for TransportError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Connection(msg) => TransportError::Connection(msg),
            ApiError::Timeout(timeout) => TransportError::Timeout {
                timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            },
            ApiError::Rpc { code, message } => TransportError::Rpc { code, message },
            ApiError::Parse(msg) => TransportError::Decode(msg),
            ApiError::Http(e) => TransportError::Other(e.to_string()),
        }
    }
}

/// Quorum client that sends each operation as one JSON-RPC call.
pub struct JsonRpcQuorumClient {
    client: Client,
    endpoint: String,
    timeout: Duration,
    request_id: AtomicU64,
}

impl JsonRpcQuorumClient {
    /// Create a new client for `endpoint` with a per-request timeout.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout.min(Duration::from_secs(5)))
            .build()
            .map_err(ApiError::Http)?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            timeout,
            request_id: AtomicU64::new(1),
        })
    }

    /// Endpoint this client posts to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Get the next request ID.
    fn next_id(&self) -> u64 {
        self.request_id.fetch_add(1, Ordering::Relaxed)
    }

    /// Call a JSON-RPC method whose result is a `BasicResponse`.
    #[instrument(skip(self, params), fields(endpoint = %self.endpoint))]
    async fn call<P: Serialize + Sync>(
        &self,
        method: &str,
        params: &P,
    ) -> Result<BasicResponse, ApiError> {
        let request = JsonRpcRequest::new(method, params, self.next_id());
        debug!(id = request.id, "Sending JSON-RPC request");

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let response = response.error_for_status().map_err(ApiError::Http)?;

        let rpc_response: JsonRpcResponse<BasicResponse> = response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))?;

        if let Some(error) = rpc_response.error {
            return Err(ApiError::Rpc {
                code: error.code,
                message: error.message,
            });
        }

        rpc_response
            .result
            .ok_or_else(|| ApiError::Parse("Missing result in response".to_string()))
    }

    fn classify(&self, e: reqwest::Error) -> ApiError {
        if e.is_timeout() {
            ApiError::Timeout(self.timeout)
        } else if e.is_connect() {
            ApiError::Connection(format!("Cannot connect to {}", self.endpoint))
        } else {
            ApiError::Http(e)
        }
    }

    async fn dispatch<P: Serialize + Sync>(
        &self,
        method: &str,
        params: &P,
    ) -> Result<BasicResponse, TransportError> {
        self.call(method, params).await.map_err(TransportError::from)
    }
}

#[async_trait]
impl QuorumClient for JsonRpcQuorumClient {
    async fn generate_token(&self, req: &GenerateRequest) -> Result<BasicResponse, TransportError> {
        self.dispatch(methods::GENERATE, req).await
    }

    async fn fetch_token(&self, req: &FetchRequest) -> Result<BasicResponse, TransportError> {
        self.dispatch(methods::FETCH, req).await
    }

    async fn deploy_contract(&self, req: &DeployRequest) -> Result<BasicResponse, TransportError> {
        self.dispatch(methods::DEPLOY, req).await
    }

    async fn execute_contract(
        &self,
        req: &ExecuteRequest,
    ) -> Result<BasicResponse, TransportError> {
        self.dispatch(methods::EXECUTE, req).await
    }

    async fn publish_event(&self, req: &EventRequest) -> Result<BasicResponse, TransportError> {
        self.dispatch(methods::PUBLISH_EVENT, req).await
    }

    async fn subscribe_contract(
        &self,
        req: &EventRequest,
    ) -> Result<BasicResponse, TransportError> {
        self.dispatch(methods::SUBSCRIBE, req).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qc_contract_tokens::domain::requests::build;
    use qc_contract_tokens::domain::validation::validate_token;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;

    /// Serve one HTTP request with `body`, handing the request body back.
    async fn serve_once(status: &'static str, body: String) -> (String, oneshot::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = oneshot::channel();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = Vec::new();
            let mut chunk = [0u8; 4096];
            let request_body = loop {
                let n = socket.read(&mut chunk).await.unwrap();
                buf.extend_from_slice(&chunk[..n]);
                let text = String::from_utf8_lossy(&buf).to_string();
                if let Some(split) = text.find("\r\n\r\n") {
                    let length = text[..split]
                        .lines()
                        .find_map(|line| {
                            let (name, value) = line.split_once(':')?;
                            name.eq_ignore_ascii_case("content-length")
                                .then(|| value.trim().parse::<usize>().ok())
                                .flatten()
                        })
                        .unwrap_or(0);
                    if buf.len() >= split + 4 + length {
                        break text[split + 4..split + 4 + length].to_string();
                    }
                }
                if n == 0 {
                    break String::new();
                }
            };

            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = tx.send(request_body);
        });

        (format!("http://{addr}"), rx)
    }

    fn fetch_request() -> FetchRequest {
        build::fetch(validate_token(&format!("Qm{}", "h".repeat(44))).unwrap())
    }

    #[tokio::test]
    async fn test_fetch_round_trip() {
        let body = r#"{"jsonrpc":"2.0","id":1,"result":{"status":true,"message":"fetched"}}"#;
        let (url, request) = serve_once("200 OK", body.to_string()).await;
        let client = JsonRpcQuorumClient::new(url, Duration::from_secs(5)).unwrap();

        let resp = client.fetch_token(&fetch_request()).await.unwrap();
        assert!(resp.status);
        assert_eq!(resp.message, "fetched");

        let sent: serde_json::Value = serde_json::from_str(&request.await.unwrap()).unwrap();
        assert_eq!(sent["method"], "smartcontract_fetch");
        assert_eq!(sent["params"]["smart_contract_token"], format!("Qm{}", "h".repeat(44)));
    }

    #[tokio::test]
    async fn test_rpc_error_is_transport_failure() {
        let body = r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32000,"message":"node busy"}}"#;
        let (url, _) = serve_once("200 OK", body.to_string()).await;
        let client = JsonRpcQuorumClient::new(url, Duration::from_secs(5)).unwrap();

        let err = client.fetch_token(&fetch_request()).await.unwrap_err();
        assert_eq!(
            err,
            TransportError::Rpc {
                code: -32000,
                message: "node busy".into()
            }
        );
    }

    #[tokio::test]
    async fn test_missing_result_is_decode_error() {
        let (url, _) = serve_once("200 OK", r#"{"jsonrpc":"2.0","id":1}"#.to_string()).await;
        let client = JsonRpcQuorumClient::new(url, Duration::from_secs(5)).unwrap();

        let err = client.fetch_token(&fetch_request()).await.unwrap_err();
        assert!(matches!(err, TransportError::Decode(_)));
    }

    #[tokio::test]
    async fn test_connection_refused() {
        // Bind then drop to get a port nothing listens on.
        let addr = TcpListener::bind("127.0.0.1:0")
            .await
            .unwrap()
            .local_addr()
            .unwrap();
        let client =
            JsonRpcQuorumClient::new(format!("http://{addr}"), Duration::from_secs(2)).unwrap();

        let err = client.fetch_token(&fetch_request()).await.unwrap_err();
        assert!(matches!(err, TransportError::Connection(_)));
    }

    #[test]
    fn test_api_error_mapping() {
        let err: TransportError = ApiError::Timeout(Duration::from_secs(30)).into();
        assert_eq!(err, TransportError::Timeout { timeout_ms: 30_000 });

        let err: TransportError = ApiError::Parse("eof".into()).into();
        assert_eq!(err, TransportError::Decode("eof".into()));
    }
}
