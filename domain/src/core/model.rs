//! Model selector value object

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Which completion model (and optionally which provider) answers a session.
///
/// Written as `model` or `provider/model`. An empty model name means the
/// provider's own default.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ModelSelector {
    provider: Option<String>,
    model: String,
}

impl ModelSelector {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            provider: None,
            model: model.into(),
        }
    }

    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn provider(&self) -> Option<&str> {
        self.provider.as_deref()
    }

    /// True when no explicit model was requested
    pub fn is_provider_default(&self) -> bool {
        self.model.is_empty()
    }
}

impl std::fmt::Display for ModelSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let model = if self.model.is_empty() {
            "default"
        } else {
            &self.model
        };
        match &self.provider {
            Some(provider) => write!(f, "{}/{}", provider, model),
            None => write!(f, "{}", model),
        }
    }
}

impl std::str::FromStr for ModelSelector {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        let (provider, model) = match s.split_once('/') {
            Some((provider, model)) if !provider.is_empty() => (Some(provider), model),
            _ => (None, s),
        };
        let model = if model == "default" { "" } else { model };
        Ok(Self {
            provider: provider.map(str::to_string),
            model: model.to_string(),
        })
    }
}

impl Serialize for ModelSelector {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ModelSelector {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let Ok(selector) = s.parse();
        Ok(selector)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_model() {
        let selector: ModelSelector = "gpt-4o".parse().unwrap();
        assert_eq!(selector.model(), "gpt-4o");
        assert_eq!(selector.provider(), None);
        assert_eq!(selector.to_string(), "gpt-4o");
    }

    #[test]
    fn test_parse_provider_and_model() {
        let selector: ModelSelector = "bing/gpt-4".parse().unwrap();
        assert_eq!(selector.provider(), Some("bing"));
        assert_eq!(selector.model(), "gpt-4");
        assert_eq!(selector.to_string(), "bing/gpt-4");
    }

    #[test]
    fn test_provider_default_model() {
        let selector: ModelSelector = "bing/default".parse().unwrap();
        assert!(selector.is_provider_default());
        assert_eq!(selector.to_string(), "bing/default");

        assert!(ModelSelector::default().is_provider_default());
        assert_eq!(ModelSelector::default().to_string(), "default");
    }

    #[test]
    fn test_serde_as_string() {
        let selector = ModelSelector::new("gpt-4").with_provider("bing");
        let json = serde_json::to_string(&selector).unwrap();
        assert_eq!(json, "\"bing/gpt-4\"");
        let back: ModelSelector = serde_json::from_str(&json).unwrap();
        assert_eq!(back, selector);
    }
}
