use crate::config::{Config, ConfigError, ConfigPaths};
use clap::Args;
use std::process::Command;

#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    /// Print config with secrets redacted
    #[arg(long)]
    pub print: bool,

    /// Open the config file in $VISUAL or $EDITOR
    #[arg(long)]
    pub edit: bool,

    /// Set a config value (dotted key=value)
    #[arg(long, value_name = "key=value")]
    pub set: Vec<String>,
}

pub fn run(args: &ConfigArgs, paths: &ConfigPaths) -> Result<(), ConfigError> {
    if args.edit && (!args.set.is_empty() || args.print) {
        return Err(ConfigError::Validation(
            "--edit cannot be combined with --set or --print".into(),
        ));
    }

    let mut config = Config::load_or_create(paths)?;

    if args.edit {
        edit_config(paths)?;
        config = Config::load(paths)?;
        config.validate()?;
        return Ok(());
    }

    if !args.set.is_empty() {
        for assignment in &args.set {
            apply_set(&mut config, assignment)?;
        }
        config.validate()?;
        Config::write(paths, &config)?;
    }

    if args.print || args.set.is_empty() {
        let redacted = config.redacted();
        let output = toml::to_string_pretty(&redacted)?;
        println!("{output}");
    }

    Ok(())
}

fn edit_config(paths: &ConfigPaths) -> Result<(), ConfigError> {
    let command = editor_command(
        std::env::var("VISUAL").ok().as_deref(),
        std::env::var("EDITOR").ok().as_deref(),
    )?;
    let (program, extra) = command
        .split_first()
        .ok_or_else(|| ConfigError::Validation("editor command is empty".into()))?;
    tracing::info!(editor = %program, path = %paths.config_path.display(), "opening daisy config");
    let status = Command::new(program)
        .args(extra)
        .arg(&paths.config_path)
        .status()?;
    if !status.success() {
        return Err(ConfigError::Validation(format!(
            "{program} exited with {status}; daisy config left unchanged on disk"
        )));
    }
    Ok(())
}

/// Resolve the editor from VISUAL, then EDITOR. Blank values are skipped.
fn editor_command(visual: Option<&str>, editor: Option<&str>) -> Result<Vec<String>, ConfigError> {
    let raw = [visual, editor]
        .into_iter()
        .flatten()
        .find(|value| !value.trim().is_empty())
        .ok_or_else(|| {
            ConfigError::Validation(
                "no editor configured; set VISUAL or EDITOR, or use daisy config --set".into(),
            )
        })?;
    split_shell_words(raw)
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Quote {
    None,
    Single,
    Double,
}

/// Split an editor command line into words, honoring quotes and backslash escapes.
fn split_shell_words(line: &str) -> Result<Vec<String>, ConfigError> {
    let mut words = Vec::new();
    let mut word: Option<String> = None;
    let mut quote = Quote::None;
    let mut chars = line.chars();

    while let Some(ch) = chars.next() {
        match (quote, ch) {
            (Quote::None, '\\') | (Quote::Double, '\\') => {
                if let Some(escaped) = chars.next() {
                    word.get_or_insert_with(String::new).push(escaped);
                }
            }
            (Quote::None, '\'') => {
                quote = Quote::Single;
                word.get_or_insert_with(String::new);
            }
            (Quote::None, '"') => {
                quote = Quote::Double;
                word.get_or_insert_with(String::new);
            }
            (Quote::Single, '\'') | (Quote::Double, '"') => quote = Quote::None,
            (Quote::None, ch) if ch.is_whitespace() => words.extend(word.take()),
            (_, ch) => word.get_or_insert_with(String::new).push(ch),
        }
    }

    if quote != Quote::None {
        return Err(ConfigError::Validation(format!(
            "editor command has an unterminated quote: {line}"
        )));
    }
    words.extend(word);
    if words.is_empty() {
        return Err(ConfigError::Validation("editor command is empty".into()));
    }
    Ok(words)
}

fn apply_set(config: &mut Config, assignment: &str) -> Result<(), ConfigError> {
    let (key, value) = assignment
        .split_once('=')
        .ok_or_else(|| ConfigError::Validation("expected key=value for --set".into()))?;
    let key = key.trim();
    let value = value.trim();
    match key {
        "assistant.mode" => {
            config.assistant.mode = value.to_string();
        }
        "assistant.provider" => {
            config.assistant.provider = value.to_string();
        }
        "assistant.language" => {
            config.assistant.language = value.to_string();
        }
        "assistant.timeout_secs" => {
            let parsed = parse_u64(value, key)?;
            if parsed == 0 {
                return Err(ConfigError::Validation(
                    "assistant.timeout_secs must be greater than 0".into(),
                ));
            }
            config.assistant.timeout_secs = parsed;
        }
        "openai.api_key" => {
            config.openai.api_key = value.to_string();
        }
        "openai.base_url" => {
            config.openai.base_url = value.to_string();
        }
        "openai.chat_model" => {
            config.openai.chat_model = value.to_string();
        }
        "openai.transcribe_model" => {
            config.openai.transcribe_model = value.to_string();
        }
        "gemini.api_key" => {
            config.gemini.api_key = value.to_string();
        }
        "gemini.base_url" => {
            config.gemini.base_url = value.to_string();
        }
        "gemini.chat_model" => {
            config.gemini.chat_model = value.to_string();
        }
        "gemini.transcribe_model" => {
            config.gemini.transcribe_model = value.to_string();
        }
        "ui.color_theme" => {
            config.ui.color_theme = value.to_string();
        }
        "ui.show_suggestions" => {
            config.ui.show_suggestions = parse_bool(value, key)?;
        }
        "ui.show_timestamps" => {
            config.ui.show_timestamps = parse_bool(value, key)?;
        }
        _ => {
            return Err(ConfigError::Validation(format!(
                "unknown config key: {key}"
            )));
        }
    }
    Ok(())
}

fn parse_bool(value: &str, key: &str) -> Result<bool, ConfigError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ConfigError::Validation(format!(
            "{key} expects true or false"
        ))),
    }
}

fn parse_u64(value: &str, key: &str) -> Result<u64, ConfigError> {
    value
        .parse()
        .map_err(|_| ConfigError::Validation(format!("{key} expects an unsigned integer")))
}
