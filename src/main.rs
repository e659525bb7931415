use clap::Parser;
use gh_orgpulse::LogSink;
use gh_orgpulse::github::prelude::*;
use gh_orgpulse::report::{ActivityReport, RepositoryScope};

#[derive(clap::Parser, Debug)]
#[command(version, about = "Pull request activity across a GitHub organization")]
struct Cli {
    #[arg(long, value_name = "ORG", env = "GH_ORG", help = "Organization to report on")]
    org: String,
    #[arg(
        long,
        value_name = "DAYS",
        default_value_t = 7,
        help = "Length of the reporting window in days"
    )]
    days: u32,
    #[arg(
        long,
        value_name = "HOST",
        default_value = "github.com",
        help = "Target GitHub hostname",
        env = "GH_HOST"
    )]
    hostname: String,
    #[arg(
        long,
        value_name = "TOKEN",
        help = "Personal access token (defaults to GH_TOKEN or `gh auth token`)"
    )]
    token: Option<String>,
    #[arg(long, help = "Only report on the first page of repositories")]
    subset: bool,
    #[arg(
        long,
        value_name = "N",
        default_value_t = 1,
        help = "Repository reports fetched at once"
    )]
    concurrency: usize,
    #[arg(short, long, help = "Use compact list output")]
    compact: bool,
    #[arg(short, long, help = "Log progress and rate-limit credits to stderr")]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let Cli {
        org,
        days,
        hostname,
        token,
        subset,
        concurrency,
        compact,
        verbose,
    } = Cli::parse();

    init_tracing(verbose);

    let token = fetch_token(&hostname, token.as_deref())?;
    let client = OctocrabClient::new(&hostname, token.value)?;

    let scope = if subset {
        RepositoryScope::Subset
    } else {
        RepositoryScope::All
    };
    let mut report = ActivityReport::new(org, days)
        .with_scope(scope)
        .with_concurrency(concurrency)
        .with_log(LogSink::new(|line| tracing::info!(target: "gh_orgpulse::progress", "{line}")));

    report.run(&client).await?;

    print!("{}", gh_orgpulse::formatter::format_markdown(&report, compact));

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
