use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use mtgmatcher::{Matcher, MatcherError, QueryCard};

#[derive(Parser)]
#[command(name = "mtgmatch", version, about = "Resolve vendor card listings to MTGJSON printings")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Sets/printings document (AllPrintings.json[.gz])
    #[arg(long, global = true, requires = "names")]
    sets: Option<PathBuf>,

    /// Name index document (AtomicCards.json[.gz])
    #[arg(long, global = true, requires = "sets")]
    names: Option<PathBuf>,

    /// Extra lookup tables overlaid on the bundled ones
    #[arg(long, global = true)]
    tables: Option<PathBuf>,

    /// Cache directory for downloaded documents
    #[arg(long, global = true)]
    cache_dir: Option<PathBuf>,

    /// Never download; use cached documents only
    #[arg(long, global = true)]
    offline: bool,

    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve one listing to a single printing
    Match(QueryArgs),
    /// List every printing that survives resolution
    Probe(QueryArgs),
}

#[derive(Args)]
struct QueryArgs {
    #[arg(long, default_value = "")]
    name: String,
    #[arg(long, default_value = "")]
    edition: String,
    #[arg(long, default_value = "")]
    variation: String,
    #[arg(long)]
    foil: bool,
    /// Direct card id, optionally foil-suffixed
    #[arg(long, default_value = "")]
    id: String,
}

impl From<QueryArgs> for QueryCard {
    fn from(args: QueryArgs) -> Self {
        QueryCard {
            id: args.id,
            name: args.name,
            variation: args.variation,
            edition: args.edition,
            foil: args.foil,
        }
    }
}

fn build(cli: &Cli) -> mtgmatcher::Result<Matcher> {
    let mut builder = Matcher::builder().offline(cli.offline);
    if let Some(dir) = &cli.cache_dir {
        builder = builder.cache_dir(dir);
    }
    if let Some(path) = &cli.tables {
        builder = builder.tables_path(path);
    }
    if let (Some(sets), Some(names)) = (&cli.sets, &cli.names) {
        builder = builder.sets_path(sets).names_path(names);
    }
    builder.build()
}

fn run(cli: Cli) -> mtgmatcher::Result<()> {
    let matcher = build(&cli)?;
    match cli.command {
        Commands::Match(args) => {
            let card = matcher.match_card(&args.into())?;
            println!("{}", serde_json::to_string_pretty(&card)?);
        }
        Commands::Probe(args) => {
            let cards = matcher.probe(&args.into())?;
            println!("{}", serde_json::to_string_pretty(&cards)?);
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("mtgmatcher=debug,info")
    } else {
        EnvFilter::new("mtgmatcher=warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(MatcherError::Aliasing(err)) => {
            eprintln!("{err}");
            for id in err.candidate_ids() {
                eprintln!("  {id}");
            }
            ExitCode::from(2)
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
