//! Test helpers shared by the workspace crates

pub mod temp;

pub use temp::TempDir;
