pub mod artifact;
pub mod contract;
pub mod provider;
pub mod rpc;
pub mod simulation;
pub mod types;

// Re-exports to eliminate the need for downstream dependencies to pin the same versions
pub mod re_exports {
    pub use eyre;
    pub use serde_json;
}
