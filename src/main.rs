use std::io::Write;
use std::path::PathBuf;

use clap::Parser;

use cordis_match::errors::{MatchError, MatchResult};
use cordis_match::models::config::AppConfig;
use cordis_match::{DEFAULT_TOP_K, catalogue, datasets, processing, report};

/// Find Horizon Europe coordinators whose projects match a call description.
#[derive(Debug, Parser)]
#[command(name = "cordis-match", version)]
struct Cli {
    /// Free-text description or keywords of the planned call. Prompted for
    /// interactively when omitted.
    query: Option<String>,

    /// Number of top-ranked projects to report.
    #[arg(long, default_value_t = DEFAULT_TOP_K)]
    top: usize,

    /// Also write the results to this CSV file.
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Load the projects table from this CSV path or URL instead of the archive.
    #[arg(long, requires = "organizations")]
    projects: Option<String>,

    /// Load the organizations table from this CSV path or URL instead of the archive.
    #[arg(long, requires = "projects")]
    organizations: Option<String>,

    /// Configuration file (YAML).
    #[arg(long)]
    config: Option<String>,

    /// Print the CSV distribution URLs from the data.europa.eu catalogue and exit.
    #[arg(long)]
    list_sources: bool,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        log::error!("{e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> MatchResult<()> {
    if cli.list_sources {
        let client = reqwest::Client::new();
        for url in catalogue::csv_distribution_urls(&client, catalogue::HUB_DATASET_URL).await? {
            println!("{url}");
        }
        return Ok(());
    }

    // Parameter errors are caught before any download starts.
    if cli.top == 0 {
        return Err(MatchError::InvalidParameter(
            "top-K must be a positive integer".to_string(),
        ));
    }
    let query = match cli.query {
        Some(query) => query,
        None => prompt_query()?,
    };
    let query = query.trim().to_string();
    if query.is_empty() {
        return Err(MatchError::InvalidParameter(
            "query must not be empty".to_string(),
        ));
    }

    let config = AppConfig::load(cli.config.as_deref())?;
    let source = datasets::open_source(
        &config,
        cli.projects.as_deref(),
        cli.organizations.as_deref(),
    );
    let (projects, organizations) = datasets::load(source.as_ref(), config.delimiter_byte()).await?;

    let rows = processing::run_query(&projects, &organizations, &query, cli.top)?;
    report::print_results(&rows, &query);

    if let Some(path) = cli.csv {
        report::export_csv(&rows, &path)?;
        log::info!("Results saved to {}", path.display());
    }

    Ok(())
}

fn prompt_query() -> MatchResult<String> {
    println!("Enter the keywords or description for your call:");
    print!("> ");
    std::io::stdout()
        .flush()
        .map_err(|err| MatchError::InvalidParameter(format!("cannot prompt for query: {err}")))?;
    let mut line = String::new();
    std::io::stdin()
        .read_line(&mut line)
        .map_err(|err| MatchError::InvalidParameter(format!("cannot read query: {err}")))?;
    Ok(line)
}
