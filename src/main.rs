use clap::Parser;
use std::process;
use tick::cli::{Cli, Commands};
use tick::cli_handlers;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Add { name, date, time } => {
            cli_handlers::handle_add(&cli.db, &name, date.as_deref(), time.as_deref())
        }
        Commands::List { json } => cli_handlers::handle_list(&cli.db, json),
        Commands::Toggle { id } => cli_handlers::handle_toggle(&cli.db, id),
        Commands::Delete { id } => cli_handlers::handle_delete(&cli.db, id),
        Commands::Reset => cli_handlers::handle_reset(&cli.db),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
