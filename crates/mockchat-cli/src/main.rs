//! mockchat CLI: Command-line interface for the mockchat chat panel

use clap::{Parser, Subcommand};
use mockchat_engine::{ChatController, Config, SharedPanel};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Chat panel with simulated assistant replies
#[derive(Parser)]
#[command(name = "mockchat")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Config file (default: .mockchat/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the TUI (default when no command specified)
    Tui,

    /// Send messages without a terminal UI and print the conversation
    Say {
        /// Messages to send, in order
        #[arg(required = true)]
        messages: Vec<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Initialize .mockchat/ directory and config
    Init {
        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },
}

const LOG_FILE: &str = "mockchat.log";

fn main() {
    let cli = Cli::parse();
    let config_path = cli
        .config
        .unwrap_or_else(|| Config::default_path(Path::new(".")));

    let result = match cli.command {
        None | Some(Commands::Tui) => cmd_tui(&config_path),
        Some(Commands::Say { messages, json }) => cmd_say(&config_path, &messages, json),
        Some(Commands::Init { force }) => cmd_init(&config_path, force),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

type CliResult = Result<(), Box<dyn std::error::Error>>;

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("mockchat=info"))
}

/// Log file kept next to the config file.
fn log_path(config_path: &Path) -> PathBuf {
    let dir = match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    dir.join(LOG_FILE)
}

/// Log to a file so output never lands on the alternate screen.
fn init_file_logging(config_path: &Path) -> CliResult {
    let path = log_path(config_path);
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn init_stderr_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .init();
}

fn runtime() -> std::io::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_multi_thread().enable_all().build()
}

fn cmd_tui(config_path: &Path) -> CliResult {
    init_file_logging(config_path)?;
    let config = Config::load_or_default(config_path)?;
    info!(path = %config_path.display(), "config loaded");

    let rt = runtime()?;
    rt.block_on(mockchat_tui::run_tui(config))
}

fn cmd_say(config_path: &Path, messages: &[String], json: bool) -> CliResult {
    init_stderr_logging();
    let config = Config::load_or_default(config_path)?;

    let rt = runtime()?;
    let panel = rt.block_on(say(&config, messages));

    let panel = panel.lock();
    if json {
        println!("{}", serde_json::to_string_pretty(panel.messages())?);
    } else if !panel.is_empty() {
        println!("{}", panel.transcript());
    }
    Ok(())
}

/// Submit `messages` in order and wait until every reply has landed.
async fn say(config: &Config, messages: &[String]) -> SharedPanel {
    let panel = SharedPanel::new();
    let controller = ChatController::from_config(panel.clone(), config);

    // Handles are dropped on purpose: a dropped handle still fires
    for message in messages {
        if controller.submit(message).is_none() {
            debug!(message = %message, "blank message skipped");
        }
    }

    while controller.pending_replies() > 0 {
        tokio::time::sleep(controller.delay()).await;
    }
    panel
}

fn cmd_init(config_path: &Path, force: bool) -> CliResult {
    if config_path.exists() && !force {
        println!("Config already exists at {}", config_path.display());
        return Ok(());
    }

    Config::default().save(config_path)?;
    println!("Created {}", config_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use mockchat_engine::Role;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_command_defaults_to_tui() {
        let cli = Cli::try_parse_from(["mockchat"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_parse_say_with_json() {
        let cli = Cli::try_parse_from(["mockchat", "say", "hi", "there", "--json"]).unwrap();
        match cli.command {
            Some(Commands::Say { messages, json }) => {
                assert_eq!(messages, vec!["hi", "there"]);
                assert!(json);
            }
            _ => panic!("expected say"),
        }
    }

    #[test]
    fn test_say_requires_a_message() {
        assert!(Cli::try_parse_from(["mockchat", "say"]).is_err());
    }

    #[test]
    fn test_global_config_flag() {
        let cli =
            Cli::try_parse_from(["mockchat", "init", "--force", "--config", "alt.json"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("alt.json")));
        assert!(matches!(cli.command, Some(Commands::Init { force: true })));
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_say_waits_for_every_reply() {
        let panel = say(&Config::default(), &strings(&["hello", "again"])).await;
        let panel = panel.lock();

        assert_eq!(panel.count(Role::User), 2);
        assert_eq!(panel.count(Role::Assistant), 2);
        // Both replies share a deadline, so only the user lines have a fixed order
        let transcript = panel.transcript();
        let lines: Vec<&str> = transcript.lines().collect();
        assert_eq!(lines[..2], ["user: hello", "user: again"]);
        assert!(lines.contains(&r#"assistant: This is a simulated AI response to "hello"."#));
        assert!(lines.contains(&r#"assistant: This is a simulated AI response to "again"."#));
    }

    #[tokio::test(start_paused = true)]
    async fn test_say_skips_blank_messages() {
        let panel = say(&Config::default(), &strings(&["  ", "kept", ""])).await;
        let messages = panel.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].text(), "kept");
    }

    #[tokio::test(start_paused = true)]
    async fn test_say_with_only_blanks_returns_immediately() {
        let start = tokio::time::Instant::now();
        let panel = say(&Config::default(), &strings(&["\t"])).await;
        assert!(panel.is_empty());
        assert_eq!(start.elapsed(), std::time::Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_say_json_shape() {
        let panel = say(&Config::default(), &strings(&["hi"])).await;
        let json = serde_json::to_value(panel.messages()).unwrap();
        assert_eq!(json[0]["role"], "user");
        assert_eq!(json[1]["role"], "assistant");
        assert_eq!(json[0]["text"], "hi");
    }

    #[test]
    fn test_log_path_follows_config() {
        assert_eq!(
            log_path(Path::new("/tmp/alt/config.json")),
            PathBuf::from("/tmp/alt/mockchat.log")
        );
        assert_eq!(
            log_path(&Config::default_path(Path::new("."))),
            PathBuf::from("./.mockchat/mockchat.log")
        );
        assert_eq!(log_path(Path::new("alt.json")), PathBuf::from("./mockchat.log"));
    }
}
