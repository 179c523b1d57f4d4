pub mod generator;
pub mod manifest;
pub mod staging;
pub mod tool;

pub use generator::RequirementsGenerator;
pub use tool::{DependencyScanner, NbConvert, NotebookConverter, Pipreqs};

