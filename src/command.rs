use clap::{Parser, Subcommand};
use secagg_deployer::re_exports::eyre;

use crate::{
    handle::{create_generator, create_rpc, deploy_contract, generate_requirements},
    settings::{DeploySettings, RequirementsSettings},
};

#[derive(Parser)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Deploy Blockchain/NewSecureAggregation.json to the Ganache node on 127.0.0.1:7545
    Deploy,
    /// Write requirements.txt from the imports of the notebooks in the current directory
    Requirements,
}

/// Parse and dispatch commands
pub async fn dispatch_commands() -> eyre::Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Deploy => {
            let settings = DeploySettings::default();
            let rpc = create_rpc(&settings)?;
            deploy_contract(rpc, &settings.artifact_path).await?;
            Ok(())
        }
        Commands::Requirements => {
            let generator = create_generator(RequirementsSettings::default());
            generate_requirements(&generator)
        }
    }
}
