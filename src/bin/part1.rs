use anyhow::{Context, Result};
use clap::Parser;
use day1::{count_calories, init_logging, max_elf, max_report, read_input, Input};

/// Find the elf carrying the most calories
#[derive(Parser, Debug)]
struct Cli {
    #[command(flatten)]
    input: Input,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    let contents = read_input(&cli.input.path)?;
    let totals = count_calories(contents.lines())
        .with_context(|| format!("counting calories in {}", cli.input.path.display()))?;
    let elf = max_elf(&totals)?;

    println!("{}", max_report(&elf));

    Ok(())
}
