use std::{
    fs,
    path::{Path, PathBuf},
};

use secagg_deployer::{re_exports::eyre, rpc::RpcClient};
use secagg_requirements::{NbConvert, Pipreqs, RequirementsGenerator};

use crate::settings::{DeploySettings, RequirementsSettings};

pub fn create_rpc(settings: &DeploySettings) -> eyre::Result<RpcClient> {
    RpcClient::new(&settings.rpc_url)
}

pub fn create_generator(settings: RequirementsSettings) -> RequirementsGenerator<NbConvert, Pipreqs> {
    RequirementsGenerator::new(
        NbConvert::default(),
        Pipreqs::default(),
        settings.notebook_dir,
        settings.staging_dir,
        settings.manifest_path,
        settings.extra_package,
    )
}

pub fn absolute_path(path: &Path) -> eyre::Result<PathBuf> {
    fs::canonicalize(path).map_err(|e| eyre::eyre!("{e}:{}", path.to_string_lossy()))
}

pub fn display_file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
