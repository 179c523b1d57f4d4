use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use eyre::{eyre, Error};
use jsonrpc_core::futures::FutureExt;
use jsonrpc_core::response::Output;
use reqwest::{Client, Url};

use crate::types::{Address, DeploymentReceipt, TransactionRequest, B256, U64};

pub type Rpc<T> = Pin<Box<dyn Future<Output = Result<T, Error>> + Send + 'static>>;

/// Default endpoint of a local Ganache node
pub const GANACHE_RPC_URL: &str = "http://127.0.0.1:7545";

macro_rules! jsonrpc {
    ($method:expr, $self:ident, $return:ty$(, $params:ident$(,)?)*) => {{
        let id = $self.id.fetch_add(1, Ordering::Relaxed);
        // An empty tuple serializes to null, the node wants an empty array
        let params = serde_json::to_value(($($params,)*)).map(|v| {
            if v.is_null() {
                serde_json::Value::Array(vec![])
            } else {
                v
            }
        });
        let c = $self.raw.post($self.uri.clone());
        async move {
            let params = params?;
            let req_json = serde_json::json!({
                "id": id,
                "jsonrpc": "2.0",
                "method": $method,
                "params": params,
            });
            log::debug!("rpc request: {req_json}");
            let resp = c
                .json(&req_json)
                .send()
                .await
                .map_err::<Error, _>(|e| eyre!("bad rpc request: {e}"))?;
            let output = resp
                .json::<Output>()
                .await
                .map_err::<Error, _>(|_| eyre!("failed to parse json response"))?;

            match output {
                Output::Success(success) => serde_json::from_value::<$return>(success.result)
                    .map_err(|e| eyre!("unexpected {} result: {e}", $method)),
                Output::Failure(failure) => {
                    Err(eyre!("{} failed: {}", $method, failure.error.message))
                }
            }
        }
    }}
}

/// The subset of the Ethereum JSON-RPC interface a contract deployment needs
#[allow(clippy::upper_case_acronyms)]
pub trait RPC: Clone + Send + Sync {
    fn url(&self) -> String;
    fn client_version(&self) -> Rpc<String>;
    fn accounts(&self) -> Rpc<Vec<Address>>;
    fn estimate_gas(&self, tx: TransactionRequest) -> Rpc<U64>;
    fn send_transaction(&self, tx: TransactionRequest) -> Rpc<B256>;
    fn get_transaction_receipt(&self, hash: &B256) -> Rpc<Option<DeploymentReceipt>>;
}

#[derive(Clone)]
pub struct RpcClient {
    raw: Client,
    uri: Url,
    id: Arc<AtomicU64>,
}

impl RpcClient {
    pub fn new(uri: &str) -> eyre::Result<Self> {
        let uri = Url::parse(uri).map_err(|e| eyre!("invalid rpc url {uri}: {e}"))?;
        Ok(RpcClient {
            raw: Client::new(),
            uri,
            id: Arc::new(AtomicU64::new(0)),
        })
    }
}

impl RPC for RpcClient {
    fn url(&self) -> String {
        self.uri.to_string()
    }

    fn client_version(&self) -> Rpc<String> {
        jsonrpc!("web3_clientVersion", self, String).boxed()
    }

    fn accounts(&self) -> Rpc<Vec<Address>> {
        jsonrpc!("eth_accounts", self, Vec<Address>).boxed()
    }

    fn estimate_gas(&self, tx: TransactionRequest) -> Rpc<U64> {
        jsonrpc!("eth_estimateGas", self, U64, tx).boxed()
    }

    fn send_transaction(&self, tx: TransactionRequest) -> Rpc<B256> {
        jsonrpc!("eth_sendTransaction", self, B256, tx).boxed()
    }

    fn get_transaction_receipt(&self, hash: &B256) -> Rpc<Option<DeploymentReceipt>> {
        let hash = *hash;
        jsonrpc!(
            "eth_getTransactionReceipt",
            self,
            Option<DeploymentReceipt>,
            hash
        )
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use std::{
        io::{BufRead, BufReader, Read, Write},
        net::TcpListener,
        sync::Mutex,
        thread,
    };

    use serde_json::{json, Value};

    use super::*;

    /// Minimal HTTP node: answers each request with the next canned body and records what it got
    fn serve(responses: Vec<Value>) -> (String, Arc<Mutex<Vec<Value>>>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        let requests = Arc::new(Mutex::new(Vec::new()));
        let recorder = requests.clone();
        thread::spawn(move || {
            for response in responses {
                let (stream, _) = listener.accept().unwrap();
                let mut reader = BufReader::new(&stream);
                let mut content_length = 0;
                loop {
                    let mut line = String::new();
                    reader.read_line(&mut line).unwrap();
                    let line = line.trim_end();
                    if line.is_empty() {
                        break;
                    }
                    if let Some((name, value)) = line.split_once(':') {
                        if name.eq_ignore_ascii_case("content-length") {
                            content_length = value.trim().parse().unwrap();
                        }
                    }
                }
                let mut body = vec![0u8; content_length];
                reader.read_exact(&mut body).unwrap();
                recorder
                    .lock()
                    .unwrap()
                    .push(serde_json::from_slice(&body).unwrap());
                let payload = response.to_string();
                write!(
                    &stream,
                    "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    payload.len(),
                    payload
                )
                .unwrap();
            }
        });
        (url, requests)
    }

    #[test]
    fn rejects_malformed_url() {
        assert!(RpcClient::new("not a url").is_err());
        assert_eq!(
            RpcClient::new(GANACHE_RPC_URL).unwrap().url(),
            "http://127.0.0.1:7545/"
        );
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_an_error() {
        let port = TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let rpc = RpcClient::new(&format!("http://127.0.0.1:{port}")).unwrap();
        assert!(rpc.client_version().await.is_err());
    }

    #[tokio::test]
    async fn requests_and_responses_follow_jsonrpc() {
        let (url, requests) = serve(vec![
            json!({"jsonrpc": "2.0", "id": 0, "result": "Ganache/v7.9.1/EthereumJS TestRPC/v7.9.1/ethereum-js"}),
            json!({"jsonrpc": "2.0", "id": 1, "result": null}),
            json!({"jsonrpc": "2.0", "id": 2, "error": {"code": -32000, "message": "sender account not recognized"}}),
        ]);
        let rpc = RpcClient::new(&url).unwrap();

        let version = rpc.client_version().await.unwrap();
        assert!(version.starts_with("Ganache"));

        let hash = B256::repeat_byte(0x11);
        assert!(rpc.get_transaction_receipt(&hash).await.unwrap().is_none());

        let tx = TransactionRequest {
            from: Some(Address::repeat_byte(0xaa)),
            ..Default::default()
        };
        let err = rpc.send_transaction(tx).await.unwrap_err();
        assert!(err.to_string().contains("eth_sendTransaction"));
        assert!(err.to_string().contains("sender account not recognized"));

        let requests = requests.lock().unwrap();
        assert_eq!(
            requests[0],
            json!({"id": 0, "jsonrpc": "2.0", "method": "web3_clientVersion", "params": []})
        );
        assert_eq!(requests[1]["method"], "eth_getTransactionReceipt");
        assert_eq!(requests[1]["params"], json!([hash.to_string()]));
        assert_eq!(requests[2]["id"], 2);
        assert_eq!(
            requests[2]["params"][0]["from"].as_str().map(str::to_lowercase),
            Some(format!("0x{}", "aa".repeat(20)))
        );
    }
}
