use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use career_engine::enrich::{KeyPolicy, LinkCache, LinkState};
use career_engine::orchestrator::Orchestrator;
use career_engine::{score, ServiceClient, ServiceConfig, SessionState};
use clap::{Parser, Subcommand};
use tracing::warn;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "rolescout")]
#[command(about = "Turn resume text into structured job-role suggestions, links and fit scores")]
struct Cli {
    /// Override the career service base URL (ROLESCOUT_API_URL otherwise)
    #[arg(long)]
    api_url: Option<String>,

    /// Treat differently-capitalized role titles as the same link-cache entry
    #[arg(long)]
    fold_title_case: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Upload a resume (or raw skills text) and print structured suggestions
    Suggest {
        /// Resume file to upload (PDF or DOCX)
        #[arg(long)]
        file: Option<PathBuf>,
        /// Manually entered skills text, used when no file is given
        #[arg(long)]
        skills: Option<String>,
        /// Also request an ATS fit score for every suggested role
        #[arg(long)]
        score: bool,
        /// How long to wait for search-link fetches to settle
        #[arg(long, default_value_t = 10)]
        link_timeout_secs: u64,
    },
    /// Upload a resume and print section-grouped feedback
    Feedback {
        /// Resume file to upload (PDF or DOCX)
        #[arg(long)]
        file: PathBuf,
    },
    /// Score a plain-text resume against a skill list locally, no network
    Match {
        /// Path to a plain-text resume
        #[arg(long)]
        resume: PathBuf,
        /// Comma-separated required skills
        #[arg(long)]
        skills: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = ServiceConfig::load()?;
    if let Some(api_url) = cli.api_url {
        config = config.with_base_url(api_url);
    }

    let key_policy = if cli.fold_title_case {
        KeyPolicy::CaseInsensitive
    } else {
        KeyPolicy::Exact
    };

    match cli.command {
        Command::Suggest {
            file,
            skills,
            score,
            link_timeout_secs,
        } => run_suggest(&config, key_policy, file, skills, score, link_timeout_secs).await,
        Command::Feedback { file } => run_feedback(&config, &file).await,
        Command::Match { resume, skills } => run_match(&resume, &skills),
    }
}

async fn run_suggest(
    config: &ServiceConfig,
    key_policy: KeyPolicy,
    file: Option<PathBuf>,
    skills: Option<String>,
    score_roles: bool,
    link_timeout_secs: u64,
) -> Result<()> {
    let client = ServiceClient::new(config.base_url.clone(), config.timeout_seconds)?;

    let response = match (&file, &skills) {
        (Some(path), _) => {
            let file_name = file_name_of(path)?;
            client.upload_resume_file(path, file_name).await?
        }
        (None, Some(text)) => client.upload_skills(text).await?,
        (None, None) => {
            anyhow::bail!("provide --file with a resume or --skills with a skills list")
        }
    };

    let cache = LinkCache::new(client.clone(), key_policy);
    let mut orchestrator = Orchestrator::new(SessionState::new(), cache, client);
    orchestrator.ingest_upload(response)?;

    if orchestrator.suggestions().is_empty() {
        println!("No job suggestions received.");
        return Ok(());
    }

    orchestrator
        .settle_links(Duration::from_secs(link_timeout_secs))
        .await;

    if score_roles {
        let titles: Vec<String> = orchestrator
            .suggestions()
            .iter()
            .map(|s| s.title.clone())
            .collect();
        for title in titles {
            if let Err(e) = orchestrator.score_role(&title).await {
                warn!("Skipping score for '{}': {}", title, e);
            }
        }
    }

    for row in orchestrator.view() {
        println!("• {}", row.suggestion.title);
        if !row.suggestion.description.is_empty() {
            println!("    {}", row.suggestion.description);
        }
        if !row.suggestion.required_skills.is_empty() {
            println!(
                "    Required skills: {}",
                row.suggestion.required_skills.join(", ")
            );
        }
        match &row.links {
            LinkState::Ready(links) => {
                for link in links {
                    println!("    {} — {}", link.site, link.url);
                }
            }
            LinkState::Pending => println!("    (links still loading)"),
            LinkState::Failed(reason) => println!("    (links unavailable: {reason})"),
        }
        if let Some(score) = &row.score {
            println!(
                "    ATS fit: {}% (matched: {}; missing: {})",
                score.score,
                score.matched_skills.join(", "),
                score.missing_skills.join(", ")
            );
        }
        println!();
    }

    Ok(())
}

async fn run_feedback(config: &ServiceConfig, file: &PathBuf) -> Result<()> {
    let client = ServiceClient::new(config.base_url.clone(), config.timeout_seconds)?;
    let file_name = file_name_of(file)?;

    let response = client.resume_feedback(file, file_name).await?;
    if let Some(error) = response.error {
        anyhow::bail!("feedback service reported: {error}");
    }

    let sections = career_engine::parse::parse_feedback(response.feedback.as_deref());
    if sections.is_empty() {
        println!("No feedback received.");
        return Ok(());
    }

    for section in sections {
        println!("{}", section.name);
        for point in section.points {
            println!("  - {point}");
        }
        println!();
    }

    Ok(())
}

fn run_match(resume: &PathBuf, skills: &str) -> Result<()> {
    let resume_text = std::fs::read_to_string(resume)
        .with_context(|| format!("failed to read {}", resume.display()))?;

    let required: Vec<String> = skills
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    let result = score::match_skills(&resume_text, &required)?;

    println!("ATS fit: {}%", result.score);
    if !result.matched_skills.is_empty() {
        println!("Matched: {}", result.matched_skills.join(", "));
    }
    if !result.missing_skills.is_empty() {
        println!("Missing: {}", result.missing_skills.join(", "));
    }

    Ok(())
}

fn file_name_of(path: &PathBuf) -> Result<&str> {
    path.file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("invalid file name: {}", path.display()))
}
