pub use alloy_primitives::{Address, Bytes, B256, U64};
pub use alloy_rpc_types::{TransactionInput, TransactionRequest};
use serde::Deserialize;

/// The part of `eth_getTransactionReceipt` the deployment reads.
///
/// Local test nodes omit several fields a full receipt type insists on
/// (`effectiveGasPrice`, `type`, `logsBloom` on older Ganache builds), so
/// only these are decoded and the rest is ignored.
#[derive(Deserialize, Clone, Default, Debug)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentReceipt {
    pub transaction_hash: B256,
    #[serde(default)]
    pub block_number: Option<U64>,
    #[serde(default)]
    pub contract_address: Option<Address>,
    #[serde(default)]
    pub gas_used: Option<U64>,
    // Pre-byzantium nodes omit it
    #[serde(default)]
    pub status: Option<U64>,
}

impl DeploymentReceipt {
    pub fn is_reverted(&self) -> bool {
        self.status == Some(U64::ZERO)
    }
}
