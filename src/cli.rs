//! Command-line front end.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use annotate_api::{HttpStore, Store};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::engine::Engine;
use crate::export::{ExportFormat, export};
use crate::message::Message;
use crate::session::Session;

#[derive(Debug, Parser)]
#[command(name = "annotate")]
#[command(about = "Comments and lines on embedded pages")]
pub struct Cli {
    /// Configuration file (defaults to the platform config directory)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Persistence service base URL
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Display name to act as
    #[arg(long, global = true)]
    user: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Export a page's annotations.
    Export {
        project: String,
        /// Page id (defaults to the project's first page)
        #[arg(long)]
        page: Option<String>,
        #[arg(long, value_enum, default_value_t = ExportFormat::Markdown)]
        format: ExportFormat,
        /// Write to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print open/resolved comment counts for a page.
    Summary {
        project: String,
        #[arg(long)]
        page: Option<String>,
    },
    /// Feed a JSON array of engine messages through a session and print the result.
    Replay {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Print the effective configuration.
    Config {
        /// Also write it to the configuration file
        #[arg(long)]
        save: bool,
    },
}

pub async fn run<I, T>(args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = Cli::parse_from(args);
    let config_path = cli.config.clone().or_else(AppConfig::default_path);
    let config = effective_config(&cli, config_path.as_deref())?;
    init_logging(&config);

    match cli.command {
        Commands::Export {
            project,
            page,
            format,
            output,
        } => run_export(&config, &project, page.as_deref(), format, output.as_deref()).await,
        Commands::Summary { project, page } => run_summary(&config, &project, page.as_deref()).await,
        Commands::Replay { file } => run_replay(&config, &file).await,
        Commands::Config { save } => run_config(&config, save, config_path.as_deref()),
    }
}

/// File, then environment, then flags.
fn effective_config(cli: &Cli, path: Option<&Path>) -> Result<AppConfig> {
    let mut config = match path {
        Some(path) => AppConfig::load(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => AppConfig::new(),
    };
    config.apply_env();
    if let Some(api_url) = &cli.api_url {
        config.api_url = api_url.clone();
    }
    if let Some(user) = &cli.user {
        config.user = Some(user.clone());
    }
    Ok(config)
}

fn init_logging(config: &AppConfig) {
    let _ = env_logger::Builder::new()
        .filter_level(config.preferences.log_level.to_level_filter())
        .parse_default_env()
        .try_init();
    log::debug!("Log level {}", config.preferences.log_level.name());
}

fn http_session(config: &AppConfig) -> Session<HttpStore> {
    Session::new(Engine::from_config(config), HttpStore::new(config.api_url.clone()))
}

async fn open<S: Store>(session: &mut Session<S>, project: &str, page: Option<&str>) -> Result<()> {
    match page {
        Some(page) => {
            session
                .open_page(project, page)
                .await
                .with_context(|| format!("failed to open page {page}"))?;
        }
        None => {
            session
                .open_first_page(project)
                .await
                .context("failed to list pages")?
                .with_context(|| format!("project {project} has no pages"))?;
        }
    }
    Ok(())
}

async fn run_export(
    config: &AppConfig,
    project: &str,
    page: Option<&str>,
    format: ExportFormat,
    output: Option<&Path>,
) -> Result<()> {
    let mut session = http_session(config);
    open(&mut session, project, page).await?;
    let rendered = export(session.engine().state(), format)?;

    match output {
        Some(path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("{}", path.display());
        }
        None => println!("{rendered}"),
    }
    Ok(())
}

async fn run_summary(config: &AppConfig, project: &str, page: Option<&str>) -> Result<()> {
    let mut session = http_session(config);
    open(&mut session, project, page).await?;
    let counts = session.engine().counts();
    println!(
        "{} comments: {} open, {} resolved; {} lines",
        counts.total,
        counts.open,
        counts.resolved,
        session.engine().lines().len()
    );
    Ok(())
}

async fn run_replay(config: &AppConfig, file: &Path) -> Result<()> {
    let json = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    let messages: Vec<Message> =
        serde_json::from_str(&json).context("replay file must be a JSON array of messages")?;

    let mut session = http_session(config);
    let executed = session.run(messages).await;
    log::info!("Replay executed {} requests", executed);

    println!("{}", serde_json::to_string_pretty(&session.engine().view())?);
    Ok(())
}

fn run_config(config: &AppConfig, save: bool, path: Option<&Path>) -> Result<()> {
    println!("{}", config.to_json()?);
    if save {
        let path = path.context("could not determine config directory")?;
        config.save_to(path)?;
    }
    Ok(())
}
