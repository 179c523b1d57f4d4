use std::path::PathBuf;

use secagg_deployer::rpc::GANACHE_RPC_URL;

/// Compiled contract written by the truffle build
pub const ARTIFACT_PATH: &str = "Blockchain/NewSecureAggregation.json";

pub const NOTEBOOK_DIR: &str = ".";
pub const STAGING_DIR: &str = "temp_py_scripts";
pub const MANIFEST_PATH: &str = "requirements.txt";
/// Needed to open the notebooks, but never imported by them
pub const EXTRA_PACKAGE: &str = "notebook";

pub struct DeploySettings {
    pub rpc_url: String,
    pub artifact_path: PathBuf,
}

impl Default for DeploySettings {
    fn default() -> Self {
        DeploySettings {
            rpc_url: GANACHE_RPC_URL.to_string(),
            artifact_path: ARTIFACT_PATH.into(),
        }
    }
}

pub struct RequirementsSettings {
    pub notebook_dir: PathBuf,
    pub staging_dir: PathBuf,
    pub manifest_path: PathBuf,
    pub extra_package: String,
}

impl Default for RequirementsSettings {
    fn default() -> Self {
        RequirementsSettings {
            notebook_dir: NOTEBOOK_DIR.into(),
            staging_dir: STAGING_DIR.into(),
            manifest_path: MANIFEST_PATH.into(),
            extra_package: EXTRA_PACKAGE.to_string(),
        }
    }
}
