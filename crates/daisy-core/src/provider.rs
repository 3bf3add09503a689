use std::fmt;

pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/openai";
pub const OPENAI_CHAT_MODEL: &str = "gpt-3.5-turbo";
pub const GEMINI_CHAT_MODEL: &str = "gemma-3-4b-it";
pub const TRANSCRIBE_MODEL: &str = "whisper-1";
pub const DEFAULT_LANGUAGE: &str = "en";

pub const GEMINI_KEY_VAR: &str = "GEMINI_API_KEY";
pub const OPENAI_KEY_VAR: &str = "OPENAI_API_KEY";

/// Upstream API family. Both speak the OpenAI wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    OpenAi,
    Gemini,
}

impl Provider {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "openai" => Some(Self::OpenAi),
            "gemini" => Some(Self::Gemini),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Gemini => "gemini",
        }
    }

    pub fn default_base_url(self) -> &'static str {
        match self {
            Self::OpenAi => OPENAI_BASE_URL,
            Self::Gemini => GEMINI_BASE_URL,
        }
    }

    pub fn default_chat_model(self) -> &'static str {
        match self {
            Self::OpenAi => OPENAI_CHAT_MODEL,
            Self::Gemini => GEMINI_CHAT_MODEL,
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Upstream settings, resolved once at startup and injected into the adapter.
#[derive(Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    pub provider: Provider,
    pub api_key: String,
    pub base_url: String,
    pub chat_model: String,
    pub transcribe_model: String,
    pub language: String,
}

impl ProviderConfig {
    pub fn new(provider: Provider, api_key: impl Into<String>) -> Self {
        Self {
            provider,
            api_key: api_key.into(),
            base_url: provider.default_base_url().to_string(),
            chat_model: provider.default_chat_model().to_string(),
            transcribe_model: TRANSCRIBE_MODEL.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }

    /// Pick a provider from whichever credential is present. Gemini wins when
    /// both are set; blank keys count as missing.
    pub fn resolve(gemini_key: Option<&str>, openai_key: Option<&str>) -> Option<Self> {
        if let Some(key) = non_blank(gemini_key) {
            return Some(Self::new(Provider::Gemini, key));
        }
        non_blank(openai_key).map(|key| Self::new(Provider::OpenAi, key))
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

// Keeps the key out of debug logs.
impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("provider", &self.provider)
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("chat_model", &self.chat_model)
            .field("transcribe_model", &self.transcribe_model)
            .field("language", &self.language)
            .finish()
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gemini_key_takes_precedence() {
        let config = ProviderConfig::resolve(Some("g-key"), Some("o-key")).unwrap();
        assert_eq!(config.provider, Provider::Gemini);
        assert_eq!(config.api_key, "g-key");
        assert_eq!(config.base_url, GEMINI_BASE_URL);
        assert_eq!(config.chat_model, GEMINI_CHAT_MODEL);
    }

    #[test]
    fn openai_used_when_gemini_blank() {
        let config = ProviderConfig::resolve(Some("  "), Some(" o-key ")).unwrap();
        assert_eq!(config.provider, Provider::OpenAi);
        assert_eq!(config.api_key, "o-key");
        assert_eq!(config.chat_model, OPENAI_CHAT_MODEL);
        assert_eq!(config.transcribe_model, TRANSCRIBE_MODEL);
    }

    #[test]
    fn no_keys_resolves_to_none() {
        assert!(ProviderConfig::resolve(None, None).is_none());
        assert!(ProviderConfig::resolve(Some(""), Some("")).is_none());
    }

    #[test]
    fn endpoint_joins_without_double_slash() {
        let mut config = ProviderConfig::new(Provider::OpenAi, "k");
        config.base_url = "http://localhost:8080/v1/".into();
        assert_eq!(
            config.endpoint("/chat/completions"),
            "http://localhost:8080/v1/chat/completions"
        );
    }

    #[test]
    fn debug_output_redacts_key() {
        let config = ProviderConfig::new(Provider::OpenAi, "sk-secret");
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("sk-secret"));
    }

    #[test]
    fn parse_provider_names() {
        assert_eq!(Provider::parse("OpenAI"), Some(Provider::OpenAi));
        assert_eq!(Provider::parse("gemini"), Some(Provider::Gemini));
        assert_eq!(Provider::parse("auto"), None);
    }
}
