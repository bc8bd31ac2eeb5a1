//! Configuration for the dzi-flatten CLI.
//!
//! Options can also be set via environment variables with the `DZI_`
//! prefix:
//!
//! - `DZI_BASE_DIR` - Directory to scan for manifests (default: `.`)
//! - `DZI_VERBOSE` - Enable debug logging

use std::path::PathBuf;

use clap::Parser;

/// Flatten tiled DZI image pyramids into one PNG per resolution level.
///
/// Scans a directory for `*.dzi` manifests, decodes the WebP tiles each
/// one references from the directory's `tiles/` subdirectory, and writes
/// one stitched PNG per pyramid level next to the manifest.
#[derive(Parser, Debug, Clone)]
#[command(name = "dzi-flatten")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Directory containing the manifests and their tiles/ subdirectory.
    #[arg(default_value = ".", env = "DZI_BASE_DIR")]
    pub base_dir: PathBuf,

    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false, env = "DZI_VERBOSE")]
    pub verbose: bool,
}

impl Config {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if !self.base_dir.is_dir() {
            return Err(format!(
                "base directory {} does not exist or is not a directory",
                self.base_dir.display()
            ));
        }
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
