use clap::Parser;
use gemsearch::{
    cli::{Args, Commands},
    session::run_search,
};
use tracing::warn;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let res = match args.command {
        Commands::Search { args } => run_search(args),
    };
    res.unwrap_or_else(|e| {
        warn!(transient = e.is_transient(), "chat ended with an error");
        eprintln!("{}", e);
        std::process::exit(1);
    });
}
