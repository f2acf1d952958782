use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use eyre::{Result, WrapErr};
use log::{debug, info};

mod cli;

use cli::Cli;
use ytscript::config::{Config, config_path};
use ytscript::metadata::MetadataFetcher;
use ytscript::output::run_cli;
use ytscript::server::{self, AppState};
use ytscript::transcript::TranscriptResolver;
use ytscript::youtube::YouTubeCaptions;

fn setup_logging() -> Result<()> {
    let log_dir = log_dir();
    std::fs::create_dir_all(&log_dir)?;
    let log_file = log_dir.join("ytscript.log");

    let target = Box::new(std::fs::OpenOptions::new().create(true).append(true).open(&log_file)?);

    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized: {}", log_file.display());
    Ok(())
}

fn log_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("ytscript")
        .join("logs")
}

fn build_after_help() -> String {
    format!(
        "\nConfig is read from: {}\nLogs are written to: {}",
        config_path().display(),
        log_dir().join("ytscript.log").display()
    )
}

fn listen_addr(cli: &Cli, config: &Config) -> Result<SocketAddr> {
    match &cli.bind {
        Some(bind) => bind.parse().wrap_err_with(|| format!("invalid --bind address: {bind}")),
        None => config.bind_addr(std::env::var("PORT").ok().as_deref()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_logging()?;

    let after_help = build_after_help();
    let cmd = <Cli as clap::CommandFactory>::command().after_help(after_help);
    let matches = cmd.get_matches();
    let cli = <Cli as clap::FromArgMatches>::from_arg_matches(&matches)?;

    // Load config file (non-fatal if missing/invalid)
    let config = Config::load().unwrap_or_default();

    // CLI flags take priority over config
    let languages = if cli.langs.is_empty() {
        config.languages()
    } else {
        cli.langs.clone()
    };

    if cli.verbose {
        let path = config_path();
        if path.exists() {
            eprintln!("Config: {}", path.display());
        }
        eprintln!("Languages: {}", languages.join(", "));
    }
    debug!("Language preference: {languages:?}");

    let provider = Arc::new(YouTubeCaptions::new(config.caption_timeout())?);
    let resolver = TranscriptResolver::with_languages(provider, languages);

    if cli.serve {
        let addr = listen_addr(&cli, &config)?;
        let metadata = MetadataFetcher::new(
            reqwest::Client::new(),
            config.oembed_endpoint(),
            config.metadata_timeout(),
        );
        if cli.verbose {
            eprintln!("Listening on http://{addr}");
        }
        return server::serve(AppState { resolver, metadata }, addr).await;
    }

    let (line, code) = run_cli(cli.video_id, &resolver).await;
    println!("{line}");
    if code != 0 {
        std::process::exit(code);
    }

    Ok(())
}
