use alloy_json_abi::JsonAbi;

use crate::{
    artifact::ContractArtifact,
    rpc::RPC,
    types::{Address, Bytes, TransactionInput, TransactionRequest, B256},
};

/// Builds deployment transactions for one compiled contract
pub struct ContractFactory {
    abi: JsonAbi,
    bytecode: Bytes,
}

impl From<ContractArtifact> for ContractFactory {
    fn from(value: ContractArtifact) -> Self {
        ContractFactory {
            abi: value.abi,
            bytecode: value.bytecode,
        }
    }
}

impl ContractFactory {
    pub fn new(abi: JsonAbi, bytecode: Bytes) -> Self {
        ContractFactory { abi, bytecode }
    }

    /// Constructor call without arguments, a contract without explicit constructor accepts it as well
    pub fn constructor(&self) -> eyre::Result<ConstructorCall> {
        let expected = self
            .abi
            .constructor()
            .map(|constructor| constructor.inputs.len())
            .unwrap_or(0);
        if expected != 0 {
            return Err(eyre::eyre!(
                "constructor expects {expected} arguments but none were given"
            ));
        }
        Ok(ConstructorCall {
            data: self.bytecode.clone(),
        })
    }
}

pub struct ConstructorCall {
    data: Bytes,
}

impl ConstructorCall {
    pub fn build_transaction(&self, from: Address) -> TransactionRequest {
        TransactionRequest {
            from: Some(from),
            input: TransactionInput::both(self.data.clone()),
            ..Default::default()
        }
    }

    /// Estimate gas, then let the node sign and broadcast with `from`
    pub async fn transact<T: RPC>(&self, rpc: &T, from: Address) -> eyre::Result<B256> {
        let mut tx = self.build_transaction(from);
        let gas = rpc.estimate_gas(tx.clone()).await?;
        log::debug!("estimated deployment gas: {gas}");
        tx.gas = Some(gas.to::<u64>());
        rpc.send_transaction(tx).await
    }
}
