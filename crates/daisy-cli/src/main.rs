mod config;
mod config_cmd;
mod files;
mod init;
mod logging;
mod tui;

use clap::{Args, Parser, Subcommand};
use config::{Config, ConfigError, ConfigPaths, EnvKeys};
use daisy_core::AssistantError;
use daisy_core::assistant::{CannedResponder, ChatSession, Responder};
use daisy_core::completion::CompletionClient;
use daisy_core::provider::Provider;
use daisy_core::render::format_summary;
use logging::LogTarget;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tui::TuiContext;

#[derive(Parser)]
#[command(name = "daisy", version, about = "meeting assistant chat")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    run: RunArgs,
}

#[derive(Subcommand)]
enum Command {
    /// Send one message and print Daisy's reply
    Ask {
        /// Message text
        message: String,
    },
    /// Transcribe and summarize an audio recording
    Transcribe {
        /// Audio file (mp3, m4a, wav, webm, ogg, flac)
        path: PathBuf,

        /// Print transcript and summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// Summarize an existing transcript text file
    Summarize {
        path: PathBuf,

        #[arg(long)]
        json: bool,
    },
    Init(init::InitArgs),
    Config(config_cmd::ConfigArgs),
}

#[derive(Args, Debug, Clone, Default)]
struct RunArgs {
    /// Use canned replies and never call an upstream provider
    #[arg(long, global = true)]
    demo: bool,

    /// Upstream provider: auto, gemini or openai
    #[arg(long, global = true, value_name = "name")]
    provider: Option<String>,

    /// Seed for demo replies
    #[arg(long, global = true, value_name = "n")]
    seed: Option<u64>,
}

impl RunArgs {
    fn provider_override(&self) -> Result<Option<Provider>, CliError> {
        match self.provider.as_deref().map(str::trim) {
            None | Some("auto") => Ok(None),
            Some(value) => Provider::parse(value)
                .map(Some)
                .ok_or_else(|| CliError::Usage(format!("unknown provider: {value}"))),
        }
    }
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("{}", .0.user_message())]
    Assistant(#[from] AssistantError),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Usage(String),
    #[error("terminal error: {0}")]
    Terminal(String),
}

fn build_client(config: &Config, run: &RunArgs) -> Result<CompletionClient, CliError> {
    let provider = config.resolve_provider(&EnvKeys::from_env(), run.provider_override()?);
    match &provider {
        Some(resolved) => tracing::info!(provider = %resolved.provider, "upstream resolved"),
        None => tracing::warn!("no API key found; live replies will report a configuration error"),
    }
    Ok(CompletionClient::with_timeout(provider, config.timeout()))
}

fn build_responder(config: &Config, run: &RunArgs) -> Result<Responder, CliError> {
    if run.demo || config.is_demo() {
        let canned = match run.seed {
            Some(seed) => CannedResponder::seeded(seed),
            None => CannedResponder::new(),
        };
        return Ok(Responder::Canned(canned));
    }
    Ok(Responder::Live(build_client(config, run)?))
}

fn provider_label(responder: &Responder) -> String {
    match responder {
        Responder::Canned(_) => "offline".to_string(),
        Responder::Live(client) => client
            .provider()
            .map(|provider| provider.name().to_string())
            .unwrap_or_else(|| "unconfigured".to_string()),
    }
}

fn run_ask(config: &Config, run: &RunArgs, message: &str) -> Result<(), CliError> {
    let mut session = ChatSession::new(build_responder(config, run)?);
    if session.send(message).is_none() {
        return Err(CliError::Usage("message is empty".into()));
    }
    if let Some(reply) = session.conversation().last() {
        println!("{}", reply.content);
    }
    Ok(())
}

fn live_client(config: &Config, run: &RunArgs) -> Result<CompletionClient, CliError> {
    if run.demo || config.is_demo() {
        return Err(CliError::Usage(
            "demo mode has no upstream provider; drop --demo or set assistant.mode = \"live\""
                .into(),
        ));
    }
    let client = build_client(config, run)?;
    if !client.is_configured() {
        return Err(AssistantError::Configuration("no API key for this command".into()).into());
    }
    Ok(client)
}

fn run_transcribe(config: &Config, run: &RunArgs, path: &Path, json: bool) -> Result<(), CliError> {
    let client = live_client(config, run)?;
    let file = files::read_upload(path)?;
    if !file.is_audio() {
        return Err(CliError::Usage(format!(
            "{} is not an audio file ({})",
            file.name, file.mime
        )));
    }

    tracing::info!(file = %file.name, size = %file.size_label, "transcribing");
    let transcript = client.transcribe(&file.audio_input())?;
    let summary = client.summarize(&transcript)?;

    if json {
        let output = serde_json::json!({
            "file": file.name,
            "transcript": transcript,
            "summary": summary,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", format_summary(&summary));
    }
    Ok(())
}

fn run_summarize(config: &Config, run: &RunArgs, path: &Path, json: bool) -> Result<(), CliError> {
    let client = live_client(config, run)?;
    let transcript = fs::read_to_string(path)?;
    if transcript.trim().is_empty() {
        return Err(CliError::Usage(format!("{} is empty", path.display())));
    }

    let summary = client.summarize(&transcript)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{}", format_summary(&summary));
    }
    Ok(())
}

fn run_chat(config: &Config, run: &RunArgs) -> Result<(), CliError> {
    let responder = build_responder(config, run)?;
    let provider_label = provider_label(&responder);
    tui::run(TuiContext {
        responder,
        ui_config: config.ui.clone(),
        provider_label,
    })
    .map_err(|err| CliError::Terminal(err.to_string()))
}

fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let paths = match ConfigPaths::from_home() {
        Ok(paths) => paths,
        Err(err) => {
            eprintln!("config paths error: {err}");
            std::process::exit(1);
        }
    };

    let log_target = match cli.command {
        None => LogTarget::File(&paths.log_path),
        Some(_) => LogTarget::Stderr,
    };
    if let Err(err) = logging::init(log_target) {
        eprintln!("logging init failed: {err}");
        std::process::exit(1);
    }

    match &cli.command {
        Some(Command::Init(args)) => {
            if let Err(e) = init::run(args, &paths) {
                eprintln!("init failed: {e}");
                std::process::exit(1);
            }
            return;
        }
        Some(Command::Config(args)) => {
            if let Err(e) = config_cmd::run(args, &paths) {
                eprintln!("config failed: {e}");
                std::process::exit(1);
            }
            return;
        }
        _ => {}
    }

    let config = match Config::load_or_create(&paths).and_then(|config| {
        config.validate()?;
        Ok(config)
    }) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("config load failed: {err}");
            std::process::exit(1);
        }
    };

    let result = match &cli.command {
        Some(Command::Ask { message }) => run_ask(&config, &cli.run, message),
        Some(Command::Transcribe { path, json }) => run_transcribe(&config, &cli.run, path, *json),
        Some(Command::Summarize { path, json }) => run_summarize(&config, &cli.run, path, *json),
        Some(Command::Init(_)) | Some(Command::Config(_)) => Ok(()),
        None => run_chat(&config, &cli.run),
    };

    if let Err(err) = result {
        eprintln!("daisy: {err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_args(provider: Option<&str>, demo: bool) -> RunArgs {
        RunArgs {
            demo,
            provider: provider.map(str::to_string),
            seed: Some(7),
        }
    }

    #[test]
    fn provider_flag_accepts_auto_and_names() {
        assert_eq!(run_args(None, false).provider_override().unwrap(), None);
        assert_eq!(
            run_args(Some("auto"), false).provider_override().unwrap(),
            None
        );
        assert_eq!(
            run_args(Some("OpenAI"), false).provider_override().unwrap(),
            Some(Provider::OpenAi)
        );
        assert!(matches!(
            run_args(Some("claude"), false).provider_override(),
            Err(CliError::Usage(_))
        ));
    }

    #[test]
    fn demo_flag_selects_canned_responder() {
        let config = Config::default();
        let responder = build_responder(&config, &run_args(None, true)).unwrap();
        assert!(matches!(responder, Responder::Canned(_)));
        assert_eq!(provider_label(&responder), "offline");
    }

    #[test]
    fn demo_mode_refuses_upstream_commands() {
        let config = Config::default();
        assert!(matches!(
            live_client(&config, &run_args(None, true)),
            Err(CliError::Usage(_))
        ));
    }

    #[test]
    fn cli_parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["daisy", "ask", "--demo", "hello there"]).unwrap();
        assert!(cli.run.demo);
        assert!(
            matches!(cli.command, Some(Command::Ask { ref message }) if message == "hello there")
        );

        let cli = Cli::try_parse_from(["daisy", "transcribe", "a.mp3", "--json"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Command::Transcribe { json: true, .. })
        ));
    }

    #[test]
    fn upstream_commands_need_a_key() {
        let env = EnvKeys::from_env();
        if env.gemini.is_some() || env.openai.is_some() {
            return;
        }
        let err = live_client(&Config::default(), &run_args(None, false))
            .err()
            .expect("expected a configuration error");
        assert!(matches!(
            err,
            CliError::Assistant(AssistantError::Configuration(_))
        ));
    }

    #[test]
    fn summarize_rejects_empty_transcript() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("empty.txt");
        fs::write(&path, "   \n").unwrap();
        let mut config = Config::default();
        config.gemini.api_key = "test-key".into();
        let err =
            run_summarize(&config, &run_args(Some("gemini"), false), &path, false).unwrap_err();
        assert!(matches!(err, CliError::Usage(_)));
    }
}
