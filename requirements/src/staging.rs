use std::{
    fs,
    path::{Path, PathBuf},
};

use log::debug;

/// Transient directory holding the converted scripts while they are scanned
pub struct StagingDir {
    path: PathBuf,
}

impl StagingDir {
    /// Create the directory if absent, an existing one is reused
    pub fn create<P: AsRef<Path>>(path: P) -> eyre::Result<Self> {
        let path = path.as_ref().to_path_buf();
        fs::create_dir_all(&path)
            .map_err(|e| eyre::eyre!("{e}:{}", path.to_string_lossy()))?;
        Ok(StagingDir { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Move a file into the directory, keeping its file name
    pub fn move_in(&self, file: &Path) -> eyre::Result<PathBuf> {
        let name = file
            .file_name()
            .ok_or(eyre::eyre!("not a file: {}", file.display()))?;
        let target = self.path.join(name);
        if fs::rename(file, &target).is_err() {
            // rename cannot cross filesystems
            fs::copy(file, &target)?;
            fs::remove_file(file)?;
        }
        debug!("staged {} -> {}", file.display(), target.display());
        Ok(target)
    }

    /// Files currently staged with the given extension, sorted by name
    pub fn files_with_extension(&self, extension: &str) -> eyre::Result<Vec<PathBuf>> {
        list_files_with_extension(&self.path, extension)
    }

    /// Delete the staged files with `extension`, then the directory itself.
    /// Any other leftover keeps the directory non-empty and fails the removal.
    pub fn cleanup(self, extension: &str) -> eyre::Result<usize> {
        let files = self.files_with_extension(extension)?;
        for file in &files {
            fs::remove_file(file)?;
        }
        if self.path.exists() {
            fs::remove_dir(&self.path)
                .map_err(|e| eyre::eyre!("{e}:{}", self.path.to_string_lossy()))?;
        }
        Ok(files.len())
    }
}

/// Non-recursive listing of regular files ending in `.<extension>`
pub fn list_files_with_extension(dir: &Path, extension: &str) -> eyre::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| eyre::eyre!("{e}:{}", dir.to_string_lossy()))? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == extension) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
