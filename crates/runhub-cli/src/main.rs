//! runhub CLI: serve the console and inspect fixture files.

use std::path::PathBuf;

use anyhow::Result;
use chrono::Local;
use clap::{Parser, Subcommand};
use comfy_table::{presets::UTF8_FULL, Table};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use runhub_core::format::format_millis_in;
use runhub_core::RunAction;
use runhub_server::fixture::{self, Fixture};
use runhub_server::{serve, ServerConfig};

#[derive(Parser)]
#[command(
    name = "runhub",
    about = "runhub: web console for training runs",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the console with a fixture-backed API
    Serve {
        /// Fixture file (YAML or JSON); sample data when omitted
        #[arg(long, short)]
        fixtures: Option<PathBuf>,
        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        /// Port to bind to
        #[arg(long, short, default_value_t = 3000)]
        port: u16,
    },
    /// Validate a fixture file and summarise its contents
    Check {
        /// Fixture file to validate
        file: PathBuf,
    },
    /// List the runs of a project
    Runs {
        /// Fixture file to read
        file: PathBuf,
        /// Project name
        #[arg(long, short)]
        project: String,
        /// Only show runs of this repository
        #[arg(long, short)]
        repo: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            fixtures,
            host,
            port,
        } => {
            cmd_serve(fixtures, host, port).await?;
        }
        Commands::Check { file } => {
            cmd_check(file)?;
        }
        Commands::Runs {
            file,
            project,
            repo,
        } => {
            cmd_runs(file, project, repo)?;
        }
    }

    Ok(())
}

// ─── Command implementations ──────────────────────────────────────────────────

async fn cmd_serve(fixtures: Option<PathBuf>, host: String, port: u16) -> Result<()> {
    let sample_token = fixtures
        .is_none()
        .then(|| Fixture::sample().users.into_iter().next())
        .flatten()
        .and_then(|u| u.token);

    println!("runhub console");
    println!("  URL: http://{}:{}", host, port);
    if let Some(token) = sample_token {
        println!("  Sign in: http://{}:{}/?token={}", host, port, token);
    }
    println!();

    let config = ServerConfig {
        host,
        port,
        fixtures,
    };
    serve(config).await
}

fn cmd_check(file: PathBuf) -> Result<()> {
    let fixture = fixture::load_fixture(&file)?;
    debug!(path = %file.display(), "fixture parsed");

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(["Project", "Repository", "Runs", "Active"]);

    for project in &fixture.projects {
        for repo in &project.repos {
            let active = repo.runs.iter().filter(|r| !r.status.is_finished()).count();
            table.add_row([
                project.name.as_str(),
                &repo.head.display_name(),
                &repo.runs.len().to_string(),
                &active.to_string(),
            ]);
        }
    }

    println!("{}: OK", file.display());
    println!(
        "{} user(s), {} project(s), {} run(s)",
        fixture.users.len(),
        fixture.projects.len(),
        fixture.run_count()
    );
    println!("{}", table);
    Ok(())
}

fn cmd_runs(file: PathBuf, project: String, repo: Option<String>) -> Result<()> {
    let fixture = fixture::load_fixture(&file)?;
    let Some(proj) = fixture.projects.iter().find(|p| p.name == project) else {
        anyhow::bail!("Project not found: {}", project);
    };

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(["Repository", "Run", "Status", "Submitted", "Actions"]);

    let repos = proj
        .repos
        .iter()
        .filter(|r| repo.as_deref().map_or(true, |id| r.head.repo_id == id));
    let mut shown = 0;
    for r in repos {
        for run in &r.runs {
            let actions: Vec<&str> = RunAction::ALL
                .into_iter()
                .filter(|a| a.allowed_for(run.status))
                .map(RunAction::label)
                .collect();
            table.add_row([
                r.head.repo_id.as_str(),
                run.run_name.as_str(),
                run.status.label(),
                &format_millis_in(run.submitted_at, &Local),
                &actions.join(", "),
            ]);
            shown += 1;
        }
    }

    if shown == 0 {
        println!("No runs found in project '{}'.", project);
        return Ok(());
    }
    println!("{}", table);
    Ok(())
}
