pub const DEFAULT_ENDPOINT: &str = "https://api.perplexity.ai/chat/completions";
pub const DEFAULT_MODEL: &str = "sonar-medium-online";

/// Settings for the feedback provider. The key is optional: a missing key
/// only shows up as a failed narrative request.
#[derive(Debug, Clone, PartialEq)]
pub struct NarrativeConfig {
    pub endpoint: String,
    pub model: String,
    pub api_key: Option<String>,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for NarrativeConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
            max_tokens: 150,
            temperature: 0.7,
        }
    }
}

impl NarrativeConfig {
    pub fn new(endpoint: String, model: String, api_key: Option<String>) -> Self {
        Self {
            endpoint,
            model,
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_key_counts_as_missing() {
        let config = NarrativeConfig::new(
            DEFAULT_ENDPOINT.to_string(),
            DEFAULT_MODEL.to_string(),
            Some("  ".to_string()),
        );
        assert_eq!(config.api_key, None);
        assert_eq!(config.max_tokens, 150);
    }
}
