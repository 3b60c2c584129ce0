use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;
use std::path::PathBuf;
use std::process::ExitCode;
use tokio::io::{AsyncReadExt, BufReader};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use veritas::assistant::Action;
use veritas::{ApiKey, Assistant, Config, GeminiClient, VeritasError, shell};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const MISSING_KEY: &str = "Please provide a Gemini API key (--api-key or GEMINI_API_KEY).";

/// Logical fallacy detection and search-grounded claim verification with Gemini.
#[derive(Parser)]
#[command(name = "veritas", version, about)]
struct Cli {
    /// Gemini API key
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true, global = true)]
    api_key: Option<String>,

    /// Configuration file path (defaults to ./veritas.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Disable the reply memo for this run
    #[arg(long, global = true)]
    no_cache: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Detect logical fallacies in an argument (`-` reads stdin)
    Fallacies { text: String },
    /// Verify a claim with search grounding (`-` reads stdin)
    Verify { claim: String },
    /// Interactive session sharing one reply cache
    Shell,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut cfg = match Config::load(cli.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::from(e.exit_code());
        }
    };
    if cli.no_cache {
        cfg.cache.enabled = false;
    }

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cfg.basic.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_level(true)
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    info!(
        loglevel = %cfg.basic.loglevel,
        api_base = %cfg.gemini.api_base,
        candidates = ?cfg.gemini.model_candidates,
        proxy = %cfg.gemini.redacted_proxy().map_or_else(|| "<none>".to_string(), String::from),
        cache = cfg.cache.enabled,
        search_fallback = cfg.assistant.search_fallback
    );

    let Some(key) = cli.api_key.and_then(|raw| ApiKey::new(raw).ok()) else {
        eprintln!("{MISSING_KEY}");
        return ExitCode::from(VeritasError::InvalidApiKey.exit_code());
    };

    let assistant = match GeminiClient::new(&cfg.gemini, key)
        .and_then(|client| Assistant::from_config(client, &cfg))
    {
        Ok(assistant) => assistant,
        Err(e) => {
            error!(error = %e, "Failed to initialize Gemini client");
            eprintln!("{e}");
            return ExitCode::from(e.exit_code());
        }
    };

    let (action, input) = match cli.command {
        Command::Fallacies { text } => (Action::Fallacies, text),
        Command::Verify { claim } => (Action::Verify, claim),
        Command::Shell => {
            let stdin = BufReader::new(tokio::io::stdin());
            let mut stdout = tokio::io::stdout();
            return match shell::run(&assistant, stdin, &mut stdout).await {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    error!(error = %e, "Shell session aborted");
                    ExitCode::FAILURE
                }
            };
        }
    };

    let input = if input == "-" {
        let mut buf = String::new();
        if let Err(e) = tokio::io::stdin().read_to_string(&mut buf).await {
            eprintln!("Failed to read stdin: {e}");
            return ExitCode::FAILURE;
        }
        buf
    } else {
        input
    };

    let outcome = shell::perform(&assistant, action, &input).await;
    if outcome.ok {
        print!("{}", outcome.text);
        ExitCode::SUCCESS
    } else {
        eprint!("{}", outcome.text);
        ExitCode::FAILURE
    }
}
