use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use prochunter::{
    CancelToken, CsvExporter, HttpProcessStore, Profile, TimeWindow, append_mode, build_queries,
    default_credentials_path, logging, output_filename, run_query,
};
use tracing::debug;

#[derive(Parser)]
#[command(
    name = "prochunter",
    version,
    about = "Query an EDR process store and export matching processes to CSV",
    long_about = None
)]
struct Cli {
    /// Single ad-hoc process search query
    #[arg(long)]
    query: Option<String>,

    /// Newline-delimited file of process search queries
    #[arg(long)]
    queryfile: Option<PathBuf>,

    /// Output filename prefix ({prefix}-processes.csv)
    #[arg(long)]
    prefix: Option<String>,

    /// Append to the output file instead of overwriting it
    #[arg(long)]
    append: bool,

    /// Restrict results to the last N days (takes precedence over --minutes)
    #[arg(long)]
    days: Option<u32>,

    /// Restrict results to the last N minutes
    #[arg(long)]
    minutes: Option<u32>,

    /// Named credential profile
    #[arg(long)]
    profile: Option<String>,

    /// Credential file path (default: ~/.carbonblack/credentials.psc)
    #[arg(long, env = "PROCHUNTER_CREDENTIALS")]
    credentials: Option<PathBuf>,

    /// Enable debug-level logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init_tracing(cli.verbose);

    let output_path = PathBuf::from(output_filename(cli.prefix.as_deref()));
    let append = append_mode(cli.append, cli.queryfile.is_some());
    let window = TimeWindow::from_args(cli.days, cli.minutes);

    let credentials = cli.credentials.unwrap_or_else(default_credentials_path);
    let profile_name = cli.profile.as_deref().unwrap_or("default");
    let profile = Profile::load(&credentials, profile_name)?;
    let store = HttpProcessStore::new(&profile)?;

    let queries = build_queries(cli.query.as_deref(), cli.queryfile.as_deref())?;
    debug!(count = queries.len(), append, "queries to run");

    let cancel = CancelToken::new();
    cancel.install_handler()?;

    let mut exporter = CsvExporter::create(&output_path, append)?;
    for query in &queries {
        let rows = run_query(&store, query, window.as_ref(), &cancel)?;
        exporter.write_rows(&rows)?;
    }
    exporter.finish()?;

    Ok(())
}
