use std::{
    fmt::Display,
    process::ExitCode,
};

use anyhow::{
    Context,
    Result,
};
use clap::Parser;
use history_stats_services::{
    analyze_path,
    ArchiveLoader,
    Error,
    Query,
};
use time::{
    OffsetDateTime,
    PrimitiveDateTime,
};
use tracing::{
    debug,
    level_filters::LevelFilter,
};
use tracing_subscriber::{
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

mod args;
use args::Args;


fn print_err<E: Display>(e: E) {
    eprintln!("{e:#}");
}

fn init_logging(verbose: bool) {
    let default = if verbose { LevelFilter::DEBUG } else { LevelFilter::WARN };
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::builder().with_default_directive(default.into()).from_env_lossy())
        .try_init();
}

fn now_utc() -> PrimitiveDateTime {
    let now = OffsetDateTime::now_utc();
    PrimitiveDateTime::new(now.date(), now.time())
}

fn run(args: Args) -> Result<()> {
    let query = Query {
        timeframe: args.timeframe,
        artist: args.artist,
        output: args.output,
        now: args.now.unwrap_or_else(now_utc),
    };
    debug!(?query, "Starting analysis");

    let loader = ArchiveLoader::new(args.temp_dir);
    let analysis = analyze_path(&loader, &args.archive, &query).with_context(|| args.archive.display().to_string())?;

    let json = if args.pretty {
        serde_json::to_string_pretty(&analysis)?
    } else {
        serde_json::to_string(&analysis)?
    };
    println!("{json}");
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse_from(wild::args_os());
    init_logging(args.verbose);

    #[cfg(debug_assertions)]
    dbg!(&args);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            print_err(&e);
            match e.downcast_ref::<Error>() {
                Some(e) if e.is_client_error() => ExitCode::from(2),
                _ => ExitCode::FAILURE,
            }
        },
    }
}
