use anyhow::Result;
use clap::Parser;
use skillfind_cli::{load_config, resolve_token, ConfigLocations, FindArgs, OutputMode, SearchService};
use skillfind_discovery::DiscoverOptions;
use skillfind_types::Query;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let args = FindArgs::parse();

    // Reject an empty query before any I/O
    let query = Query::parse(&args.query)?;

    skillfind_logging::init_logging(&args.log_level, args.log_format)?;
    info!("Searching skills for \"{}\"", query.as_str());

    let config = load_config(&ConfigLocations::discover(args.config.clone()));
    let token = if args.local_only { None } else { resolve_token() };

    let service = SearchService::new(config, token, args.local_only)?;

    let mode = if args.json {
        OutputMode::Json
    } else if args.fetch {
        OutputMode::Fetch
    } else {
        OutputMode::Listing
    };
    let options = DiscoverOptions {
        local_only: args.local_only,
        limit: args.limit,
    };

    let stdout = std::io::stdout();
    service.run(&query, options, mode, &mut stdout.lock()).await
}
