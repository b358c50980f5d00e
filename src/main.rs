use anyhow::Result;

mod cli;
mod clock;
mod config;
mod extraction;
mod table;

fn main() -> Result<()> {
    cli::run()
}
