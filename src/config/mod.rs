//! Project configuration

mod capi_toml;

pub use capi_toml::{CapiConfig, ToolchainConfig};
