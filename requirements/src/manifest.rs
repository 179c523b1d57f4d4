use std::{
    fs::OpenOptions,
    io::{Read, Write},
    path::Path,
};

/// Append `package` on its own line unless the manifest already mentions it.
///
/// The check is a plain substring match, so a longer name containing `package`
/// (e.g. `notebook-shim` for `notebook`) also counts as present.
/// Returns whether a line was appended.
pub fn append_if_absent(manifest: &Path, package: &str) -> eyre::Result<bool> {
    let mut file = OpenOptions::new()
        .read(true)
        .append(true)
        .create(true)
        .open(manifest)
        .map_err(|e| eyre::eyre!("{e}:{}", manifest.to_string_lossy()))?;
    let mut content = String::new();
    file.read_to_string(&mut content)?;
    if content.contains(package) {
        log::debug!("{package} already listed in {}", manifest.display());
        return Ok(false);
    }
    write!(file, "\n{package}\n")?;
    Ok(true)
}
