use std::sync::Arc;

use leaf_health::ExtractorConfig;

/// Largest upload accepted by the analyze endpoints.
pub const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// Server-wide settings.  Built once at startup and never mutated, so
/// request threads share it without locking.
#[derive(Debug, Clone, Default)]
pub struct ClinicState {
    pub extractor: ExtractorConfig,
}

impl ClinicState {
    pub fn from_config_file(path: &str) -> std::io::Result<Self> {
        Ok(ClinicState { extractor: ExtractorConfig::load_json(path)? })
    }
}

/// Shared state type passed to every handler.
pub type SharedState = Arc<ClinicState>;
