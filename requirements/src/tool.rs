//! External tools the pipeline shells out to
//!
//! Each tool is a blocking child process. A spawn failure or a non-zero exit
//! status aborts the run with the tool's stderr attached.

use std::{
    path::{Path, PathBuf},
    process::Command,
};

use log::debug;

/// Turns one notebook into a plain script next to it
pub trait NotebookConverter {
    /// Returns the path of the produced script
    fn convert(&self, notebook: &Path) -> eyre::Result<PathBuf>;
}

/// Infers the packages imported by the scripts of a directory and writes them to a manifest
pub trait DependencyScanner {
    fn scan(&self, source_dir: &Path, manifest: &Path) -> eyre::Result<()>;
}

fn run(mut command: Command) -> eyre::Result<()> {
    debug!("running {command:?}");
    let output = command
        .output()
        .map_err(|e| eyre::eyre!("failed to start {:?}: {e}", command.get_program()))?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(eyre::eyre!(
            "{:?} exited with {}: {}",
            command.get_program(),
            output.status,
            stderr.trim()
        ));
    }
    Ok(())
}

/// `jupyter nbconvert --to script`
#[derive(Clone)]
pub struct NbConvert {
    program: String,
}

impl Default for NbConvert {
    fn default() -> Self {
        NbConvert {
            program: "jupyter".to_string(),
        }
    }
}

impl NotebookConverter for NbConvert {
    fn convert(&self, notebook: &Path) -> eyre::Result<PathBuf> {
        let mut command = Command::new(&self.program);
        command.args(["nbconvert", "--to", "script"]).arg(notebook);
        run(command)?;
        let script = notebook.with_extension("py");
        if !script.exists() {
            return Err(eyre::eyre!(
                "nbconvert produced no python script for {}",
                notebook.display()
            ));
        }
        Ok(script)
    }
}

/// `pipreqs <dir> --force --savepath <manifest>`
#[derive(Clone)]
pub struct Pipreqs {
    program: String,
}

impl Default for Pipreqs {
    fn default() -> Self {
        Pipreqs {
            program: "pipreqs".to_string(),
        }
    }
}

impl DependencyScanner for Pipreqs {
    fn scan(&self, source_dir: &Path, manifest: &Path) -> eyre::Result<()> {
        let mut command = Command::new(&self.program);
        command
            .arg(source_dir)
            .arg("--force")
            .arg("--savepath")
            .arg(manifest);
        run(command)
    }
}
