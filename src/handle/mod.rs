use std::path::Path;

use secagg_deployer::{
    artifact::ContractArtifact,
    contract::ContractFactory,
    provider::Web3,
    re_exports::eyre,
    rpc::RPC,
    types::Address,
};
use secagg_requirements::{DependencyScanner, NotebookConverter, RequirementsGenerator};

mod helper;
pub use helper::*;

/// Deploy the artifact with the node's first account and print the contract address
pub async fn deploy_contract<T: RPC>(rpc: T, artifact_path: &Path) -> eyre::Result<Address> {
    let mut web3 = Web3::new(rpc);
    web3.ensure_connected().await?;
    let account = web3.use_first_account().await?;
    log::info!("deploying from {account}");

    let factory: ContractFactory = ContractArtifact::load(artifact_path)?.into();
    println!("🚀 Deploying contract...");
    let tx_hash = factory
        .constructor()?
        .transact(web3.rpc(), web3.default_account()?)
        .await?;
    log::info!("deployment transaction {tx_hash}");
    let receipt = web3.wait_for_transaction_receipt(&tx_hash).await?;
    if receipt.is_reverted() {
        return Err(eyre::eyre!("deployment transaction {tx_hash} reverted"));
    }
    let contract_address = receipt
        .contract_address
        .ok_or(eyre::eyre!("receipt of {tx_hash} carries no contract address"))?;

    println!("✅ Contract deployed successfully!");
    println!("📍 Contract Address: {contract_address}");
    Ok(contract_address)
}

/// Convert the notebooks, scan their imports into the manifest, then clean up
pub fn generate_requirements<C: NotebookConverter, S: DependencyScanner>(
    generator: &RequirementsGenerator<C, S>,
) -> eyre::Result<()> {
    let staging = generator.prepare_staging()?;
    let notebooks = generator.discover_notebooks()?;
    log::info!("found {} notebooks", notebooks.len());
    generator.stage_notebooks(&staging, &notebooks)?;
    generator.infer_requirements(&staging)?;
    if generator.append_extra_package()? {
        log::info!("appended extra package to {}", generator.manifest().display());
    }

    let manifest = absolute_path(generator.manifest())?;
    let manifest_name = display_file_name(&manifest);
    println!("📄 {manifest_name} saved to: {}", manifest.display());
    println!("✅ {manifest_name} generated successfully!");

    let removed = generator.cleanup(staging)?;
    log::info!("removed {removed} temporary scripts");
    println!("🧹 Temporary files cleaned up!");
    println!("🔚 Requirements generation finished!");
    Ok(())
}
