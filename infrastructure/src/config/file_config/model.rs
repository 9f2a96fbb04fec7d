//! Completion model configuration from TOML (`[model]` section)

use reply_domain::ModelSelector;
use serde::{Deserialize, Serialize};

/// Raw model selection from TOML
///
/// # Example
///
/// ```toml
/// [model]
/// name = "gpt-4o"
/// provider = "openai"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileModelConfig {
    /// Model name; empty or absent selects the provider default
    pub name: Option<String>,
    /// Provider name
    pub provider: Option<String>,
}

impl FileModelConfig {
    pub fn to_selector(&self) -> ModelSelector {
        let selector = ModelSelector::new(self.name.as_deref().map(str::trim).unwrap_or(""));
        match self.provider.as_deref().map(str::trim) {
            Some(provider) if !provider.is_empty() => selector.with_provider(provider),
            _ => selector,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_selector() {
        let config = FileModelConfig {
            name: Some("gpt-4".to_string()),
            provider: Some("bing".to_string()),
        };
        assert_eq!(config.to_selector().to_string(), "bing/gpt-4");
        assert!(FileModelConfig::default().to_selector().is_provider_default());
    }
}
