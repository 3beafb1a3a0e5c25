use clap::Parser;

pub mod cli;

fn main() -> anyhow::Result<()> {
    cli::CLI::parse().execute()
}
