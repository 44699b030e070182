//! Gateway configuration.

/// Configuration for the cache gateway.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Whether caching is enabled. When disabled, every call passes
    /// straight through to the executor with no cache interaction.
    pub enabled: bool,
    /// Optional keyspace partition folded into key derivation. Gateways
    /// with different namespaces never share entries.
    pub namespace: Option<String>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            namespace: None,
        }
    }
}

impl CacheConfig {
    /// Create a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable caching.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Set the keyspace namespace.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }
}
