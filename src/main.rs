use clap::Parser;
use quill::cli::{Cli, Command, CountArgs, HistoryArgs};
use quill::config::{self, Config, ConfigFile};
use quill::report;
use quill::scan;
use quill::store::Store;
use std::error::Error;
use std::path::Path;
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();
}

/// Print the error and its causes, then exit non-zero.
fn fail(context: &str, err: &dyn Error) -> ! {
    eprintln!("error: {context}: {err}");
    let mut source = err.source();
    while let Some(cause) = source {
        eprintln!("  caused by: {cause}");
        source = cause.source();
    }
    std::process::exit(1);
}

fn open_store(database: &Path) -> Store {
    Store::open(database).unwrap_or_else(|e| fail("could not prepare database", &e))
}

fn count(args: CountArgs) {
    let file = ConfigFile::load(args.config.as_deref())
        .unwrap_or_else(|e| fail("could not load config", &e));
    let config = Config::from_count_args(&args, file)
        .unwrap_or_else(|e| fail("invalid configuration", &e));

    let store = open_store(&config.database);
    let result = scan::run(&config, &store.ledger());

    report::print(&result, &config);
}

fn history(args: HistoryArgs) {
    let file = ConfigFile::load(args.config.as_deref())
        .unwrap_or_else(|e| fail("could not load config", &e));
    let database = config::resolve_database(args.database.as_deref(), &file)
        .unwrap_or_else(|e| fail("invalid configuration", &e));

    let store = Store::open_existing(&database)
        .unwrap_or_else(|e| fail("could not read history", &e));
    let entries = store
        .ledger()
        .entries(&args.path)
        .unwrap_or_else(|e| fail("could not read history", &e));

    if args.json {
        println!("{}", report::history::render_json(&entries));
    } else {
        print!("{}", report::history::render(&args.path, &entries));
    }
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Command::Count(args) => {
            init_logging(args.verbose);
            count(args);
        }
        Command::History(args) => {
            init_logging(args.verbose);
            history(args);
        }
    }
}
