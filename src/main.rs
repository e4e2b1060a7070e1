use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use version_advisor::action::{failure_annotation, GithubOutput, JobOutput, RecordedOutputs};
use version_advisor::analyzer::{ConventionalClassifier, RecommendationEngine};
use version_advisor::cli::{run_workflow, Collaborators, WorkflowOptions};
use version_advisor::config::load_config;
use version_advisor::context::RunContext;
use version_advisor::git::Git2Repository;
use version_advisor::github::GitHubClient;

#[derive(clap::Parser)]
#[command(
    name = "version-advisor",
    about = "Recommend a semantic version bump for a pull request from its conventional commits"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(
        long,
        env = "INPUT_GITHUB_TOKEN",
        hide_env_values = true,
        help = "Token used against the GitHub API (falls back to GITHUB_TOKEN)"
    )]
    token: Option<String>,

    #[arg(long, env = "GITHUB_REPOSITORY", help = "Repository as owner/name")]
    repository: String,

    #[arg(long, help = "Pull request number (defaults to the one in GITHUB_EVENT_PATH)")]
    pull_request: Option<u64>,

    #[arg(long, default_value = ".", help = "Path of the checked out repository")]
    repo_path: PathBuf,

    #[arg(long, help = "Print the comment instead of publishing it")]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            println!("{}", failure_annotation(&format!("{:#}", e)));
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<()> {
    let token = args
        .token
        .filter(|t| !t.trim().is_empty())
        .or_else(|| std::env::var("GITHUB_TOKEN").ok())
        .unwrap_or_default();
    let event_path = std::env::var_os("GITHUB_EVENT_PATH").map(PathBuf::from);

    let ctx = RunContext::resolve(
        &args.repository,
        args.pull_request,
        event_path.as_deref(),
        &token,
    )?;

    let mut config = load_config(args.config.as_deref()).context("loading configuration")?;
    if let Some(api_url) = std::env::var("GITHUB_API_URL")
        .ok()
        .filter(|url| !url.is_empty())
    {
        config.github.api_url = api_url;
    }

    let tags = Git2Repository::open(&args.repo_path)
        .with_context(|| format!("opening repository at {}", args.repo_path.display()))?;
    let github = GitHubClient::new(&config.github.api_url, &ctx)?;
    let engine = RecommendationEngine::new(ConventionalClassifier::new(
        config.conventional_commits.clone(),
    )?);

    let options = WorkflowOptions {
        dry_run: args.dry_run,
    };
    let mut outputs: Box<dyn JobOutput> = if options.dry_run {
        Box::new(RecordedOutputs::default())
    } else {
        Box::new(GithubOutput::from_env())
    };

    let outcome = run_workflow(
        &ctx,
        &config,
        Collaborators {
            tags: &tags,
            github: &github,
            engine: &engine,
        },
        outputs.as_mut(),
        options,
    )
    .await?;

    if options.dry_run {
        println!("{}", outcome.body());
    }
    let result = outcome.into_result()?;
    if let Some(report) = &result.published {
        info!(comment_id = report.created_id, "done");
    }
    Ok(())
}
