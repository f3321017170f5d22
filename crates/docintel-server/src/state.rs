//! Shared state for request handlers

use docintel_core::DocumentService;

pub struct AppState {
    pub service: DocumentService,
    /// Provider used when a request omits `provider`
    pub default_provider: String,
}

impl AppState {
    pub fn new(service: DocumentService, default_provider: impl Into<String>) -> Self {
        Self {
            service,
            default_provider: default_provider.into(),
        }
    }

    pub fn provider_or_default<'a>(&'a self, provider: Option<&'a str>) -> &'a str {
        provider
            .filter(|p| !p.trim().is_empty())
            .unwrap_or(self.default_provider.as_str())
    }
}
