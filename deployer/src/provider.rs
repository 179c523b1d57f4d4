use std::time::Duration;

use crate::{
    rpc::RPC,
    types::{Address, DeploymentReceipt, B256},
};

pub const DEFAULT_RECEIPT_TIMEOUT: Duration = Duration::from_secs(120);
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// A node session: connectivity probe, account selection and receipt polling
pub struct Web3<T: RPC> {
    rpc: T,
    default_account: Option<Address>,
    receipt_timeout: Duration,
    poll_interval: Duration,
}

impl<T: RPC> Web3<T> {
    pub fn new(rpc: T) -> Self {
        Web3 {
            rpc,
            default_account: None,
            receipt_timeout: DEFAULT_RECEIPT_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    pub fn rpc(&self) -> &T {
        &self.rpc
    }

    pub fn receipt_timeout(&mut self, timeout: Duration) -> &mut Self {
        self.receipt_timeout = timeout;
        self
    }

    pub fn poll_interval(&mut self, interval: Duration) -> &mut Self {
        self.poll_interval = interval;
        self
    }

    pub async fn is_connected(&self) -> bool {
        match self.rpc.client_version().await {
            Ok(version) => {
                log::info!("connected to {} ({version})", self.rpc.url());
                true
            }
            Err(e) => {
                log::debug!("connectivity probe to {} failed: {e}", self.rpc.url());
                false
            }
        }
    }

    pub async fn ensure_connected(&self) -> eyre::Result<()> {
        if !self.is_connected().await {
            return Err(eyre::eyre!(
                "❌ not connected to Ganache, check that it is running on {}",
                self.rpc.url()
            ));
        }
        Ok(())
    }

    pub async fn accounts(&self) -> eyre::Result<Vec<Address>> {
        self.rpc.accounts().await
    }

    /// Pick the node's first unlocked account as sender of later transactions
    pub async fn use_first_account(&mut self) -> eyre::Result<Address> {
        let account = self
            .accounts()
            .await?
            .first()
            .copied()
            .ok_or(eyre::eyre!("node exposes no accounts"))?;
        self.default_account = Some(account);
        Ok(account)
    }

    pub fn default_account(&self) -> eyre::Result<Address> {
        self.default_account
            .ok_or(eyre::eyre!("no default account selected"))
    }

    /// Poll until the transaction is mined, giving up after the receipt timeout
    pub async fn wait_for_transaction_receipt(
        &self,
        hash: &B256,
    ) -> eyre::Result<DeploymentReceipt> {
        let polling = async {
            loop {
                if let Some(receipt) = self.rpc.get_transaction_receipt(hash).await? {
                    return Ok::<_, eyre::Error>(receipt);
                }
                tokio::time::sleep(self.poll_interval).await;
            }
        };
        tokio::time::timeout(self.receipt_timeout, polling)
            .await
            .map_err(|_| {
                eyre::eyre!(
                    "transaction {hash} is not in the chain after {:?}",
                    self.receipt_timeout
                )
            })?
    }
}
