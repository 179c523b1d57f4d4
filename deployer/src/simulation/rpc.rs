use std::sync::Arc;

use eyre::Result;

use crate::{
    rpc::{Rpc, RPC},
    types::{Address, DeploymentReceipt, TransactionRequest, B256, U64},
};

type FnClientVersion = Box<dyn Fn() -> Result<String> + Send + Sync>;
type FnAccounts = Box<dyn Fn() -> Result<Vec<Address>> + Send + Sync>;
type FnEstimateGas = Box<dyn Fn(TransactionRequest) -> Result<U64> + Send + Sync>;
type FnSendTransaction = Box<dyn Fn(TransactionRequest) -> Result<B256> + Send + Sync>;
type FnGetTransactionReceipt = Box<dyn Fn(B256) -> Result<Option<DeploymentReceipt>> + Send + Sync>;

/// Offline stand-in for a node, every method answers from its closure
#[derive(Clone, Default)]
pub struct FakeRpcClient {
    pub method_client_version: Option<Arc<FnClientVersion>>,
    pub method_accounts: Option<Arc<FnAccounts>>,
    pub method_estimate_gas: Option<Arc<FnEstimateGas>>,
    pub method_send_transaction: Option<Arc<FnSendTransaction>>,
    pub method_get_transaction_receipt: Option<Arc<FnGetTransactionReceipt>>,
}

impl FakeRpcClient {
    pub fn with_client_version<F>(mut self, method: F) -> Self
    where
        F: Fn() -> Result<String> + Send + Sync + 'static,
    {
        let method: FnClientVersion = Box::new(method);
        self.method_client_version = Some(Arc::new(method));
        self
    }

    pub fn with_accounts<F>(mut self, method: F) -> Self
    where
        F: Fn() -> Result<Vec<Address>> + Send + Sync + 'static,
    {
        let method: FnAccounts = Box::new(method);
        self.method_accounts = Some(Arc::new(method));
        self
    }

    pub fn with_estimate_gas<F>(mut self, method: F) -> Self
    where
        F: Fn(TransactionRequest) -> Result<U64> + Send + Sync + 'static,
    {
        let method: FnEstimateGas = Box::new(method);
        self.method_estimate_gas = Some(Arc::new(method));
        self
    }

    pub fn with_send_transaction<F>(mut self, method: F) -> Self
    where
        F: Fn(TransactionRequest) -> Result<B256> + Send + Sync + 'static,
    {
        let method: FnSendTransaction = Box::new(method);
        self.method_send_transaction = Some(Arc::new(method));
        self
    }

    pub fn with_get_transaction_receipt<F>(mut self, method: F) -> Self
    where
        F: Fn(B256) -> Result<Option<DeploymentReceipt>> + Send + Sync + 'static,
    {
        let method: FnGetTransactionReceipt = Box::new(method);
        self.method_get_transaction_receipt = Some(Arc::new(method));
        self
    }
}

impl RPC for FakeRpcClient {
    fn url(&self) -> String {
        "fake://node".to_string()
    }

    fn client_version(&self) -> Rpc<String> {
        let Some(client_version) = self.method_client_version.clone() else {
            return Box::pin(async move { Ok("FakeRpcClient/v0.1.0".to_string()) });
        };
        Box::pin(async move { client_version() })
    }

    fn accounts(&self) -> Rpc<Vec<Address>> {
        let Some(accounts) = self.method_accounts.clone() else {
            unimplemented!("fake accounts method")
        };
        Box::pin(async move { accounts() })
    }

    fn estimate_gas(&self, tx: TransactionRequest) -> Rpc<U64> {
        let Some(estimate_gas) = self.method_estimate_gas.clone() else {
            return Box::pin(async move { Ok(U64::from(6_721_975)) });
        };
        Box::pin(async move { estimate_gas(tx) })
    }

    fn send_transaction(&self, tx: TransactionRequest) -> Rpc<B256> {
        let Some(send_transaction) = self.method_send_transaction.clone() else {
            unimplemented!("fake send_transaction method")
        };
        Box::pin(async move { send_transaction(tx) })
    }

    fn get_transaction_receipt(&self, hash: &B256) -> Rpc<Option<DeploymentReceipt>> {
        let Some(get_transaction_receipt) = self.method_get_transaction_receipt.clone() else {
            unimplemented!("fake get_transaction_receipt method")
        };
        let hash = *hash;
        Box::pin(async move { get_transaction_receipt(hash) })
    }
}
