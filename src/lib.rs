mod command;
mod handle;
mod settings;

pub use handle::{deploy_contract, generate_requirements};
pub use secagg_deployer as deployer;
pub use secagg_requirements as requirements;
pub use settings::{DeploySettings, RequirementsSettings};

/// Wrap for runners that do not own a tokio runtime
pub fn dispatch() -> secagg_deployer::re_exports::eyre::Result<()> {
    tokio::runtime::Runtime::new()?.block_on(command::dispatch_commands())
}
