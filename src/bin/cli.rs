// src/bin/cli.rs
use fc_ranking::cli;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    cli::run()
}
