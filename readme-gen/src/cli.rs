//! This module implements the CLI interface for readme-gen: command parsing, credential
//! loading, and rendering of the session to the terminal.
//!
//! All pipeline logic (repository reading, prompt composition, generation, session state)
//! lives in the [`readme-gen-core`] crate. This module is strictly CLI glue.
//!
//! ## Commands
//! - `generate`: analyze a repository, generate its README, save it (the download action).
//! - `analyze`: analyze a repository only and show the summary panel and structure.
//!
//! ## How To Use
//! - For command-line users: use the installed `readme-gen` binary with `--help`.
//! - For programmatic/integration use: call [`run`] with a constructed [`Cli`].
//!
//! [`readme-gen-core`]: ../../readme-gen-core/

use crate::load_config::{ensure_secrets_file, load_credentials, DEFAULT_SECRETS_PATH};
use crate::render;
use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use readme_gen_core::artifact::{DownloadArtifact, DEFAULT_FILENAME};
use readme_gen_core::config::Settings;
use readme_gen_core::generation::HuggingFaceClient;
use readme_gen_core::github::GitHubClient;
use readme_gen_core::reader;
use readme_gen_core::session::{GenerateRequest, Session};
use std::path::{Path, PathBuf};

/// CLI for readme-gen: generate a README for a GitHub repository with a hosted LLM.
#[derive(Parser)]
#[clap(
    name = "readme-gen",
    version,
    about = "Generate professional README files for GitHub repositories using AI"
)]
pub struct Cli {
    /// Path to the secrets file (created with placeholders if missing)
    #[clap(long, global = true, default_value = DEFAULT_SECRETS_PATH)]
    pub secrets: PathBuf,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a repository and generate its README
    Generate(GenerateArgs),
    /// Analyze a repository and show its summary without generating
    Analyze(AnalyzeArgs),
}

#[derive(Args, Clone)]
pub struct GenerateArgs {
    /// GitHub repository URL, e.g. https://github.com/username/repo
    #[clap(long)]
    pub repo_url: String,

    /// Additional instructions for the AI, e.g. "Focus on the machine learning aspects"
    #[clap(long, default_value = "")]
    pub instructions: String,

    /// Hugging Face API key (falls back to HUGGINGFACE_API_KEY, then the secrets file)
    #[clap(long)]
    pub api_key: Option<String>,

    /// GitHub token (falls back to GITHUB_TOKEN, then the secrets file)
    #[clap(long)]
    pub github_token: Option<String>,

    /// File name of the saved README
    #[clap(long, default_value = DEFAULT_FILENAME)]
    pub output: String,

    /// Directory the README is saved into
    #[clap(long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Print the generated README to stdout
    #[clap(long)]
    pub print: bool,

    /// Print an HTML download link with the README as a base64 data URI
    #[clap(long)]
    pub data_uri: bool,
}

#[derive(Args, Clone)]
pub struct AnalyzeArgs {
    /// GitHub repository URL
    #[clap(long)]
    pub repo_url: String,

    /// GitHub token (falls back to GITHUB_TOKEN, then the secrets file)
    #[clap(long)]
    pub github_token: Option<String>,

    /// Print the repository information as JSON
    #[clap(long)]
    pub json: bool,
}

/// Async CLI entrypoint for integration tests and main()
///
/// A failed action returns its [`ReadmeError`](readme_gen_core::ReadmeError)
/// wrapped in `anyhow`; the caller renders it with [`render::error_message`].
pub async fn run(cli: Cli) -> Result<()> {
    tracing::info!(secrets_path = ?cli.secrets, "readme-gen starting");

    if ensure_secrets_file(&cli.secrets)? {
        eprintln!(
            "Created {} with placeholder values; add your API keys there.",
            cli.secrets.display()
        );
    }

    let settings = Settings::from_env();
    settings.trace_loaded();

    match cli.command {
        Commands::Generate(args) => run_generate(args, &cli.secrets, &settings).await,
        Commands::Analyze(args) => run_analyze(args, &cli.secrets, &settings).await,
    }
}

async fn run_generate(args: GenerateArgs, secrets: &Path, settings: &Settings) -> Result<()> {
    let credentials = load_credentials(args.api_key.clone(), args.github_token.clone(), secrets)?;

    let request = GenerateRequest {
        api_key: credentials.api_key.clone().unwrap_or_default(),
        repo_url: args.repo_url.clone(),
        instructions: args.instructions.clone(),
    };

    let source = GitHubClient::new(settings, credentials.github_token.as_deref())?;
    let generator = HuggingFaceClient::new(settings)?;

    tracing::info!(command = "generate", repo_url = %request.repo_url, "Starting README generation");
    let mut session = Session::new();
    let outcome = session.trigger(&request, &source, &generator).await;

    // Whatever was fetched stays visible, even if generation failed.
    eprint!("{}", render::warnings(session.warnings()));
    if let Some(info) = session.repo_info() {
        print!("{}", render::summary_panel(info));
        println!();
        print!("{}", render::structure_listing(info));
        println!();
    }

    if let Err(e) = outcome {
        tracing::error!(command = "generate", kind = e.kind(), error = %e, "Generation failed");
        return Err(anyhow::Error::new(e));
    }

    let Some(readme) = session.readme() else {
        anyhow::bail!("session holds no README after a successful generation");
    };

    if args.print {
        print!("{}", render::preview(readme));
        println!();
    }

    let artifact = DownloadArtifact::new(readme.content.clone(), &args.output);
    let path = artifact.write_to(&args.output_dir)?;
    println!("Saved {}", path.display());
    if args.data_uri {
        println!("{}", artifact.html_link());
    }
    println!("{}", readme.caption());

    tracing::info!(command = "generate", path = %path.display(), "README generation complete");
    Ok(())
}

async fn run_analyze(args: AnalyzeArgs, secrets: &Path, settings: &Settings) -> Result<()> {
    let credentials = load_credentials(None, args.github_token.clone(), secrets)?;
    let source = GitHubClient::new(settings, credentials.github_token.as_deref())?;

    tracing::info!(command = "analyze", repo_url = %args.repo_url, "Starting repository analysis");
    let analysis = match reader::fetch_with(&source, &args.repo_url).await {
        Ok(analysis) => analysis,
        Err(e) => {
            tracing::error!(command = "analyze", kind = e.kind(), error = %e, "Analysis failed");
            return Err(anyhow::Error::new(e));
        }
    };

    eprint!("{}", render::warnings(&analysis.warnings));
    if args.json {
        println!("{}", serde_json::to_string_pretty(&analysis.info)?);
    } else {
        print!("{}", render::summary_panel(&analysis.info));
        println!();
        print!("{}", render::structure_listing(&analysis.info));
    }
    Ok(())
}
