use std::path::{Path, PathBuf};

use log::info;

use crate::{
    manifest,
    staging::{list_files_with_extension, StagingDir},
    tool::{DependencyScanner, NotebookConverter},
};

pub const NOTEBOOK_EXTENSION: &str = "ipynb";
pub const SCRIPT_EXTENSION: &str = "py";

/// Notebook directory scan -> staged scripts -> dependency manifest.
///
/// Every phase is a precondition of the next, the first error aborts the run
/// and nothing already written is rolled back.
pub struct RequirementsGenerator<C: NotebookConverter, S: DependencyScanner> {
    converter: C,
    scanner: S,
    notebook_dir: PathBuf,
    staging_dir: PathBuf,
    manifest: PathBuf,
    extra_package: String,
}

impl<C: NotebookConverter, S: DependencyScanner> RequirementsGenerator<C, S> {
    pub fn new(
        converter: C,
        scanner: S,
        notebook_dir: PathBuf,
        staging_dir: PathBuf,
        manifest: PathBuf,
        extra_package: String,
    ) -> Self {
        RequirementsGenerator {
            converter,
            scanner,
            notebook_dir,
            staging_dir,
            manifest,
            extra_package,
        }
    }

    pub fn manifest(&self) -> &Path {
        &self.manifest
    }

    pub fn prepare_staging(&self) -> eyre::Result<StagingDir> {
        StagingDir::create(&self.staging_dir)
    }

    pub fn discover_notebooks(&self) -> eyre::Result<Vec<PathBuf>> {
        list_files_with_extension(&self.notebook_dir, NOTEBOOK_EXTENSION)
    }

    /// Convert each notebook and move the resulting script into staging
    pub fn stage_notebooks(
        &self,
        staging: &StagingDir,
        notebooks: &[PathBuf],
    ) -> eyre::Result<Vec<PathBuf>> {
        notebooks
            .iter()
            .map(|notebook| {
                info!("converting {}", notebook.display());
                let script = self.converter.convert(notebook)?;
                staging.move_in(&script)
            })
            .collect()
    }

    pub fn infer_requirements(&self, staging: &StagingDir) -> eyre::Result<()> {
        self.scanner.scan(staging.path(), &self.manifest)
    }

    pub fn append_extra_package(&self) -> eyre::Result<bool> {
        manifest::append_if_absent(&self.manifest, &self.extra_package)
    }

    pub fn cleanup(&self, staging: StagingDir) -> eyre::Result<usize> {
        staging.cleanup(SCRIPT_EXTENSION)
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, fs};

    use super::*;

    /// Writes `<stem>.py` next to the notebook, like nbconvert does
    pub struct FakeConverter;

    impl NotebookConverter for FakeConverter {
        fn convert(&self, notebook: &Path) -> eyre::Result<PathBuf> {
            let content = fs::read_to_string(notebook)?;
            if content.trim().is_empty() {
                return Err(eyre::eyre!("malformed notebook {}", notebook.display()));
            }
            let script = notebook.with_extension(SCRIPT_EXTENSION);
            fs::write(&script, format!("import {}\n", content.trim()))?;
            Ok(script)
        }
    }

    /// Lists each staged script's single import, recording how many scripts it saw
    #[derive(Default)]
    pub struct FakeScanner {
        pub seen: Cell<Option<usize>>,
    }

    impl DependencyScanner for FakeScanner {
        fn scan(&self, source_dir: &Path, manifest: &Path) -> eyre::Result<()> {
            let scripts = list_files_with_extension(source_dir, SCRIPT_EXTENSION)?;
            self.seen.set(Some(scripts.len()));
            let mut packages = Vec::new();
            for script in scripts {
                let content = fs::read_to_string(script)?;
                packages.push(content.trim().trim_start_matches("import ").to_string());
            }
            packages.sort();
            packages.dedup();
            fs::write(manifest, packages.join("\n") + "\n")?;
            Ok(())
        }
    }

    fn generator(root: &Path) -> RequirementsGenerator<FakeConverter, FakeScanner> {
        RequirementsGenerator::new(
            FakeConverter,
            FakeScanner::default(),
            root.to_path_buf(),
            root.join("temp_py_scripts"),
            root.join("requirements.txt"),
            "notebook".to_string(),
        )
    }

    #[test]
    fn staging_holds_one_script_per_notebook() {
        let dir = tempfile::tempdir().unwrap();
        for (name, import) in [("a", "numpy"), ("b", "pandas"), ("c", "numpy")] {
            fs::write(dir.path().join(format!("{name}.ipynb")), import).unwrap();
        }
        let generator = generator(dir.path());
        let staging = generator.prepare_staging().unwrap();
        let notebooks = generator.discover_notebooks().unwrap();
        let staged = generator.stage_notebooks(&staging, &notebooks).unwrap();
        assert_eq!(staged.len(), 3);
        assert_eq!(staging.files_with_extension("py").unwrap().len(), 3);
        assert!(!dir.path().join("a.py").exists());

        generator.infer_requirements(&staging).unwrap();
        assert_eq!(generator.scanner.seen.get(), Some(3));
        assert_eq!(generator.cleanup(staging).unwrap(), 3);
        assert!(!dir.path().join("temp_py_scripts").exists());
        assert!(dir.path().join("a.ipynb").exists());
    }

    #[test]
    fn malformed_notebook_aborts_staging() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.ipynb"), "numpy").unwrap();
        fs::write(dir.path().join("b.ipynb"), "").unwrap();
        let generator = generator(dir.path());
        let staging = generator.prepare_staging().unwrap();
        let notebooks = generator.discover_notebooks().unwrap();
        assert!(generator.stage_notebooks(&staging, &notebooks).is_err());
        // the notebook converted before the failure stays staged
        assert_eq!(staging.files_with_extension("py").unwrap().len(), 1);
    }

    #[test]
    fn extra_package_is_appended_once() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.ipynb"), "torch").unwrap();
        let generator = generator(dir.path());
        let staging = generator.prepare_staging().unwrap();
        let notebooks = generator.discover_notebooks().unwrap();
        generator.stage_notebooks(&staging, &notebooks).unwrap();
        generator.infer_requirements(&staging).unwrap();
        assert!(generator.append_extra_package().unwrap());
        assert!(!generator.append_extra_package().unwrap());
        assert_eq!(
            fs::read_to_string(generator.manifest()).unwrap(),
            "torch\n\nnotebook\n"
        );
    }
}
