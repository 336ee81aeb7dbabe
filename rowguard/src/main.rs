// rowguard/src/main.rs

mod cli;
mod commands;

use clap::Parser;

use cli::{Cli, Commands};

fn main() -> miette::Result<()> {
    // RUST_LOG=debug rowguard validate ... to see the details
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::InitSchema { columns, out } => commands::init_schema::execute(columns, out),
        Commands::Validate {
            data,
            schema,
            profile,
            sample_limit,
            out,
        } => commands::validate::execute(data, schema, profile, sample_limit, out),
        Commands::Repair {
            data,
            schema,
            profile,
            out,
            report,
            state,
        } => commands::repair::execute(data, schema, profile, out, report, state),
        Commands::Fit { data, schema, out } => commands::fit::execute(data, schema, out),
        Commands::Profiles => commands::profiles::execute(),
    }
}
