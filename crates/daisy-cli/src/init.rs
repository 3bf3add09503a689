use crate::config::{Config, ConfigError, ConfigPaths};
use clap::Args;
use daisy_core::provider::{GEMINI_KEY_VAR, OPENAI_KEY_VAR};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Args, Debug, Clone)]
pub struct InitArgs {
    /// Write GEMINI_API_KEY to .env (defaults to GEMINI_API_KEY from current env)
    #[arg(long)]
    pub gemini_key: Option<String>,

    /// Write OPENAI_API_KEY to .env (defaults to OPENAI_API_KEY from current env)
    #[arg(long)]
    pub openai_key: Option<String>,

    /// Path of the env file to update
    #[arg(long, default_value = ".env")]
    pub env_file: PathBuf,
}

/// Create the config file if needed and record API keys in the env file.
/// Returns the number of keys written.
pub fn run(args: &InitArgs, paths: &ConfigPaths) -> Result<usize, ConfigError> {
    let config = Config::load_or_create(paths)?;
    config.validate()?;
    println!("config ready at {}", paths.config_path.display());

    let env_gemini = std::env::var(GEMINI_KEY_VAR).ok();
    let env_openai = std::env::var(OPENAI_KEY_VAR).ok();
    let keys = [
        (
            GEMINI_KEY_VAR,
            args.gemini_key.as_deref().or(env_gemini.as_deref()),
        ),
        (
            OPENAI_KEY_VAR,
            args.openai_key.as_deref().or(env_openai.as_deref()),
        ),
    ];

    let written = write_env_file(&args.env_file, &keys)?;
    if written == 0 {
        println!(
            "no API key given; set {GEMINI_KEY_VAR} or {OPENAI_KEY_VAR}, or use assistant.mode = \"demo\""
        );
    } else {
        println!("wrote {written} key(s) to {}", args.env_file.display());
    }
    Ok(written)
}

fn write_env_file(path: &Path, keys: &[(&str, Option<&str>)]) -> Result<usize, io::Error> {
    let mut lines: Vec<String> = match fs::read_to_string(path) {
        Ok(contents) => contents.lines().map(|l| l.to_string()).collect(),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Vec::new(),
        Err(err) => return Err(err),
    };

    let mut written = 0;
    for (name, value) in keys {
        let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
            continue;
        };
        upsert_env_var(&mut lines, name, value);
        written += 1;
    }
    if written == 0 {
        return Ok(0);
    }

    let mut content = lines.join("\n");
    content.push('\n');
    fs::write(path, content)?;
    Ok(written)
}

fn upsert_env_var(lines: &mut Vec<String>, key: &str, value: &str) {
    let prefix = format!("{key}=");
    for line in lines.iter_mut() {
        if line.starts_with(&prefix) {
            *line = format!("{key}={value}");
            return;
        }
    }
    lines.push(format!("{key}={value}"));
}
