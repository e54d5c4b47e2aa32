//! Configuration for saltio
//!
//! Centralized configuration with sensible defaults.

/// Default size of the intermediate transfer buffer (one page)
pub const DEFAULT_TRANSFER_BUFFER_SIZE: usize = 4096;

/// Tunables shared by cross-store operations
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Transfer Configuration
    // -------------------------------------------------------------------------
    /// Size of the bounce buffer used by `transfer` (in bytes)
    ///
    /// Each loop iteration reads at most this many bytes from the source
    /// before writing them to the destination.
    pub transfer_buffer_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            transfer_buffer_size: DEFAULT_TRANSFER_BUFFER_SIZE,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Buffer size actually used by transfers (never zero)
    pub fn effective_buffer_size(&self) -> usize {
        self.transfer_buffer_size.max(1)
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the transfer buffer size (in bytes)
    pub fn transfer_buffer_size(mut self, size: usize) -> Self {
        self.config.transfer_buffer_size = size;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
