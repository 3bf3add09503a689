use daisy_core::provider::{
    DEFAULT_LANGUAGE, GEMINI_BASE_URL, GEMINI_CHAT_MODEL, OPENAI_BASE_URL, OPENAI_CHAT_MODEL,
    Provider, ProviderConfig, TRANSCRIBE_MODEL,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

const CONFIG_VERSION: u32 = 1;

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("home directory not found; set HOME")]
    HomeMissing,
    #[error("config io error: {0}")]
    Io(#[from] io::Error),
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("config serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("config validation error: {0}")]
    Validation(String),
}

#[derive(Debug, Clone)]
pub struct ConfigPaths {
    pub base_dir: PathBuf,
    pub config_path: PathBuf,
    pub log_path: PathBuf,
}

impl ConfigPaths {
    pub fn from_home() -> Result<Self, ConfigError> {
        let home = std::env::var("HOME").map_err(|_| ConfigError::HomeMissing)?;
        Ok(Self::from_base(PathBuf::from(home).join(".daisy")))
    }

    pub fn from_base(base_dir: PathBuf) -> Self {
        let config_path = base_dir.join("config.toml");
        let log_path = base_dir.join("daisy.log");
        Self {
            base_dir,
            config_path,
            log_path,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub version: u32,
    pub assistant: AssistantConfig,
    pub openai: ProviderSection,
    pub gemini: ProviderSection,
    pub ui: UiConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            assistant: AssistantConfig::default(),
            openai: ProviderSection::defaults_for(Provider::OpenAi),
            gemini: ProviderSection::defaults_for(Provider::Gemini),
            ui: UiConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    pub mode: String,
    pub provider: String,
    pub language: String,
    pub timeout_secs: u64,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            mode: "live".to_string(),
            provider: "auto".to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderSection {
    pub api_key: String,
    pub base_url: String,
    pub chat_model: String,
    pub transcribe_model: String,
}

impl ProviderSection {
    fn defaults_for(provider: Provider) -> Self {
        let (base_url, chat_model) = match provider {
            Provider::OpenAi => (OPENAI_BASE_URL, OPENAI_CHAT_MODEL),
            Provider::Gemini => (GEMINI_BASE_URL, GEMINI_CHAT_MODEL),
        };
        Self {
            api_key: String::new(),
            base_url: base_url.to_string(),
            chat_model: chat_model.to_string(),
            transcribe_model: TRANSCRIBE_MODEL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub color_theme: String,
    pub show_suggestions: bool,
    pub show_timestamps: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            color_theme: "minimal".to_string(),
            show_suggestions: true,
            show_timestamps: true,
        }
    }
}

/// API keys found in the process environment. They win over keys in the file.
#[derive(Debug, Clone, Default)]
pub struct EnvKeys {
    pub gemini: Option<String>,
    pub openai: Option<String>,
}

impl EnvKeys {
    pub fn from_env() -> Self {
        Self {
            gemini: std::env::var(daisy_core::provider::GEMINI_KEY_VAR).ok(),
            openai: std::env::var(daisy_core::provider::OPENAI_KEY_VAR).ok(),
        }
    }
}

impl Config {
    pub fn load_or_create(paths: &ConfigPaths) -> Result<Self, ConfigError> {
        ensure_dirs(paths)?;
        if paths.config_path.exists() {
            let config = Self::load(paths)?;
            return Ok(config);
        }

        let config = Self::default();
        Self::write(paths, &config)?;
        Ok(config)
    }

    pub fn load(paths: &ConfigPaths) -> Result<Self, ConfigError> {
        ensure_dirs(paths)?;
        let content = fs::read_to_string(&paths.config_path)?;
        let mut raw: toml::Table = toml::from_str(&content)?;
        // Missing, negative or oversized versions are treated as pre-versioned files.
        let file_version = raw
            .remove("version")
            .and_then(|value| value.as_integer())
            .and_then(|version| u32::try_from(version).ok())
            .unwrap_or(0);

        let mut config: Config = toml::Value::Table(raw).try_into()?;
        config.version = file_version;
        let mut migrated = false;

        if file_version < CONFIG_VERSION {
            config.version = CONFIG_VERSION;
            migrated = true;
        } else if file_version > CONFIG_VERSION {
            tracing::warn!(
                file_version,
                supported = CONFIG_VERSION,
                "config version is newer than supported; proceeding"
            );
        }

        warn_if_loose_permissions(&paths.config_path)?;

        if migrated {
            Self::write(paths, &config)?;
        }

        Ok(config)
    }

    pub fn write(paths: &ConfigPaths, config: &Config) -> Result<(), ConfigError> {
        ensure_dirs(paths)?;
        let content = toml::to_string_pretty(config)?;
        write_atomic(&paths.config_path, content.as_bytes())?;
        Ok(())
    }

    pub fn redacted(&self) -> Self {
        let mut redacted = self.clone();
        redact_key(&mut redacted.openai);
        redact_key(&mut redacted.gemini);
        redacted
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.assistant.mode.as_str() {
            "live" | "demo" => {}
            other => {
                return Err(ConfigError::Validation(format!(
                    "assistant.mode must be live or demo (got {other})"
                )));
            }
        }
        match self.assistant.provider.as_str() {
            "auto" | "openai" | "gemini" => {}
            other => {
                return Err(ConfigError::Validation(format!(
                    "assistant.provider must be auto, openai or gemini (got {other})"
                )));
            }
        }
        if self.assistant.language.trim().is_empty() {
            return Err(ConfigError::Validation(
                "assistant.language must not be empty".into(),
            ));
        }
        if self.assistant.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "assistant.timeout_secs must be greater than 0".into(),
            ));
        }
        validate_section("openai", &self.openai)?;
        validate_section("gemini", &self.gemini)?;
        if self.ui.color_theme.trim().is_empty() {
            return Err(ConfigError::Validation(
                "ui.color_theme must not be empty".into(),
            ));
        }
        Ok(())
    }

    pub fn is_demo(&self) -> bool {
        self.assistant.mode == "demo"
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.assistant.timeout_secs)
    }

    /// Resolve upstream settings. `provider_override` replaces `assistant.provider`.
    /// Env keys win over file keys; with `auto`, Gemini is preferred.
    pub fn resolve_provider(
        &self,
        env: &EnvKeys,
        provider_override: Option<Provider>,
    ) -> Option<ProviderConfig> {
        let gemini_key = pick_key(env.gemini.as_deref(), &self.gemini.api_key);
        let openai_key = pick_key(env.openai.as_deref(), &self.openai.api_key);

        let forced = provider_override.or_else(|| Provider::parse(&self.assistant.provider));
        let mut resolved = match forced {
            Some(Provider::Gemini) => ProviderConfig::resolve(gemini_key, None),
            Some(Provider::OpenAi) => ProviderConfig::resolve(None, openai_key),
            None => ProviderConfig::resolve(gemini_key, openai_key),
        }?;

        let section = match resolved.provider {
            Provider::OpenAi => &self.openai,
            Provider::Gemini => &self.gemini,
        };
        override_non_empty(&mut resolved.base_url, &section.base_url);
        override_non_empty(&mut resolved.chat_model, &section.chat_model);
        override_non_empty(&mut resolved.transcribe_model, &section.transcribe_model);
        override_non_empty(&mut resolved.language, &self.assistant.language);
        Some(resolved)
    }
}

fn pick_key<'a>(env: Option<&'a str>, file: &'a str) -> Option<&'a str> {
    env.map(str::trim)
        .filter(|key| !key.is_empty())
        .or_else(|| Some(file.trim()).filter(|key| !key.is_empty()))
}

fn override_non_empty(target: &mut String, value: &str) {
    let value = value.trim();
    if !value.is_empty() {
        *target = value.to_string();
    }
}

fn ensure_dirs(paths: &ConfigPaths) -> Result<(), ConfigError> {
    fs::create_dir_all(&paths.base_dir)?;
    Ok(())
}

fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), ConfigError> {
    let parent = path
        .parent()
        .ok_or_else(|| io::Error::other("config path missing parent directory"))?;
    let tmp_path = parent.join("config.toml.tmp");
    fs::write(&tmp_path, contents)?;
    set_strict_permissions(&tmp_path)?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}

fn set_strict_permissions(path: &Path) -> Result<(), ConfigError> {
    #[cfg(unix)]
    {
        let perm = fs::Permissions::from_mode(0o600);
        fs::set_permissions(path, perm)?;
    }
    Ok(())
}

fn warn_if_loose_permissions(path: &Path) -> Result<(), ConfigError> {
    #[cfg(unix)]
    {
        let metadata = fs::metadata(path)?;
        let mode = metadata.permissions().mode() & 0o777;
        if mode & 0o077 != 0 {
            tracing::warn!(
                path = %path.display(),
                "config file is group/world readable; set permissions to 0600"
            );
        }
    }
    Ok(())
}

fn validate_section(label: &str, section: &ProviderSection) -> Result<(), ConfigError> {
    let base_url = section.base_url.trim();
    if !base_url.is_empty() && !base_url.starts_with("https://") && !base_url.starts_with("http://")
    {
        return Err(ConfigError::Validation(format!(
            "{label}.base_url must start with http:// or https://"
        )));
    }
    if section.chat_model.trim().is_empty() {
        return Err(ConfigError::Validation(format!(
            "{label}.chat_model must not be empty"
        )));
    }
    if section.transcribe_model.trim().is_empty() {
        return Err(ConfigError::Validation(format!(
            "{label}.transcribe_model must not be empty"
        )));
    }
    Ok(())
}

fn redact_key(section: &mut ProviderSection) {
    if !section.api_key.trim().is_empty() {
        section.api_key = "<redacted>".to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::{CONFIG_VERSION, Config, ConfigPaths, EnvKeys};
    use daisy_core::provider::Provider;
    use std::fs;

    #[test]
    fn load_or_create_writes_defaults() {
        let temp = tempfile::tempdir().unwrap();
        let paths = ConfigPaths::from_base(temp.path().join("daisy"));
        let config = Config::load_or_create(&paths).unwrap();

        assert!(paths.config_path.exists());
        assert_eq!(config.version, CONFIG_VERSION);
        assert_eq!(config.assistant.mode, "live");
        assert_eq!(config.gemini.chat_model, "gemma-3-4b-it");
        assert_eq!(config.openai.chat_model, "gpt-3.5-turbo");
        assert!(config.validate().is_ok());

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(&paths.config_path)
                .unwrap()
                .permissions()
                .mode()
                & 0o777;
            assert_eq!(mode, 0o600);
        }
    }

    #[test]
    fn load_fills_missing_sections_and_bumps_version() {
        let temp = tempfile::tempdir().unwrap();
        let paths = ConfigPaths::from_base(temp.path().join("daisy"));
        fs::create_dir_all(&paths.base_dir).unwrap();
        let content = r#"[assistant]
mode = "demo"
"#;
        fs::write(&paths.config_path, content).unwrap();

        let config = Config::load(&paths).unwrap();
        assert_eq!(config.version, CONFIG_VERSION);
        assert!(config.is_demo());
        assert_eq!(config.assistant.timeout_secs, 30);
        assert!(config.ui.show_suggestions);

        let updated = fs::read_to_string(&paths.config_path).unwrap();
        assert!(updated.contains("version = 1"));
        assert!(updated.contains("[gemini]"));
    }

    #[test]
    fn negative_version_is_migrated_not_rejected() {
        let temp = tempfile::tempdir().unwrap();
        let paths = ConfigPaths::from_base(temp.path().join("daisy"));
        fs::create_dir_all(&paths.base_dir).unwrap();
        fs::write(
            &paths.config_path,
            "version = -3\n[ui]\nshow_timestamps = false\n",
        )
        .unwrap();

        let config = Config::load(&paths).unwrap();
        assert_eq!(config.version, CONFIG_VERSION);
        assert!(!config.ui.show_timestamps);
        let updated = fs::read_to_string(&paths.config_path).unwrap();
        assert!(updated.contains("version = 1"));
    }

    #[test]
    fn redacted_hides_api_keys() {
        let mut config = Config::default();
        config.openai.api_key = "sk-secret".to_string();
        let redacted = config.redacted();
        assert_eq!(redacted.openai.api_key, "<redacted>");
        assert_eq!(redacted.gemini.api_key, "");
    }

    #[test]
    fn validate_rejects_bad_values() {
        let mut config = Config::default();
        config.assistant.mode = "offline".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.openai.base_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.assistant.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn env_keys_override_file_keys() {
        let mut config = Config::default();
        config.openai.api_key = "file-key".to_string();
        let env = EnvKeys {
            gemini: None,
            openai: Some("env-key".to_string()),
        };
        let resolved = config.resolve_provider(&env, None).unwrap();
        assert_eq!(resolved.provider, Provider::OpenAi);
        assert_eq!(resolved.api_key, "env-key");

        let resolved = config.resolve_provider(&EnvKeys::default(), None).unwrap();
        assert_eq!(resolved.api_key, "file-key");
    }

    #[test]
    fn auto_prefers_gemini_and_override_forces_provider() {
        let mut config = Config::default();
        config.gemini.api_key = "g".to_string();
        config.openai.api_key = "o".to_string();
        config.gemini.chat_model = "gemini-2.0-flash".to_string();

        let resolved = config.resolve_provider(&EnvKeys::default(), None).unwrap();
        assert_eq!(resolved.provider, Provider::Gemini);
        assert_eq!(resolved.chat_model, "gemini-2.0-flash");

        let resolved = config
            .resolve_provider(&EnvKeys::default(), Some(Provider::OpenAi))
            .unwrap();
        assert_eq!(resolved.provider, Provider::OpenAi);
        assert_eq!(resolved.api_key, "o");
    }

    #[test]
    fn no_keys_resolves_to_none() {
        let config = Config::default();
        assert!(config.resolve_provider(&EnvKeys::default(), None).is_none());

        let mut config = Config::default();
        config.assistant.provider = "gemini".to_string();
        config.openai.api_key = "o".to_string();
        assert!(config.resolve_provider(&EnvKeys::default(), None).is_none());
    }
}
