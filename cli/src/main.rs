use clap::Parser;
use color_eyre::Result;
use lexapprox_cli::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    lexapprox_cli::init_logging(cli.verbose)?;
    lexapprox_cli::run(cli)?;
    Ok(())
}
