use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use miette::IntoDiagnostic;
use tracing_subscriber::EnvFilter;

use pokedex::aggregate::get_full_detail;
use pokedex::cache::CatalogCache;
use pokedex::domain::PokemonIdentifier;
use pokedex::error::PokedexError;
use pokedex::output::{JsonOutput, OutputMode, TableOutput};
use pokedex::pokeapi::PokeApiHttpClient;
use pokedex::view::{SortDirection, SortField, ViewState, derive_view};

#[derive(Parser)]
#[command(name = "pokedex")]
#[command(about = "Terminal Pokedex over the public PokeAPI catalog")]
#[command(version, author)]
struct Cli {
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Fetch the catalog and print it as a sortable table")]
    List(ListArgs),
    #[command(about = "Show full detail for one entry by name or id")]
    Show(ShowArgs),
}

#[derive(Args)]
struct ListArgs {
    #[arg(long, default_value_t = 151)]
    limit: u32,

    #[arg(long)]
    search: Option<String>,

    #[arg(long = "type")]
    type_filter: Option<String>,

    #[arg(long)]
    sort: Option<SortField>,

    #[arg(long)]
    desc: bool,
}

#[derive(Args)]
struct ShowArgs {
    identifier: String,
}

fn main() -> ExitCode {
    if let Err(report) = run() {
        eprintln!("{report:?}");
        if let Some(error) = report.downcast_ref::<PokedexError>() {
            return ExitCode::from(map_exit_code(error));
        }
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn map_exit_code(error: &PokedexError) -> u8 {
    match error {
        PokedexError::InvalidIdentifier(_) => 2,
        PokedexError::Network { .. } | PokedexError::Status { .. } => 3,
        PokedexError::Decode { .. } => 4,
        PokedexError::Aggregation { source, .. } => map_exit_code(source),
    }
}

fn run() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Table
    };

    // Single-threaded cooperative runtime; fan-out concurrency comes from
    // joined futures, not worker threads.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .into_diagnostic()?;

    match cli.command {
        Commands::List(args) => runtime.block_on(run_list(args, output_mode)),
        Commands::Show(args) => runtime.block_on(run_show(args, output_mode)),
    }
}

async fn run_list(args: ListArgs, output_mode: OutputMode) -> miette::Result<()> {
    let client = PokeApiHttpClient::new()?;
    let cache = CatalogCache::new(client, args.limit);
    let snapshot = cache.get().await;

    let data = match snapshot.data {
        Some(data) => data,
        None => {
            return Err(miette::miette!("catalog fetch failed; nothing cached"));
        }
    };
    if snapshot.is_error {
        eprintln!("warning: refresh failed, showing last cached catalog");
    }

    let view = ViewState {
        search_text: args.search.unwrap_or_default(),
        selected_type: args.type_filter,
        sort_field: args.sort,
        direction: if args.desc {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        },
    };
    let entries = derive_view(&data, &view);

    match output_mode {
        OutputMode::Json => JsonOutput::print_entries(&entries).into_diagnostic()?,
        OutputMode::Table => TableOutput::print_entries(&entries).into_diagnostic()?,
    }
    Ok(())
}

async fn run_show(args: ShowArgs, output_mode: OutputMode) -> miette::Result<()> {
    let identifier: PokemonIdentifier = args.identifier.parse()?;
    let client = PokeApiHttpClient::new()?;
    let aggregate = get_full_detail(&client, &identifier).await?;

    match output_mode {
        OutputMode::Json => JsonOutput::print_aggregate(&aggregate).into_diagnostic()?,
        OutputMode::Table => TableOutput::print_aggregate(&aggregate).into_diagnostic()?,
    }
    Ok(())
}
