use anyhow::{Context, Result};
use clap::Parser;
use day1::{count_calories, init_logging, read_input, top_elves, top_report, top_total, Input, Top};

/// Add up the calories carried by the best-stocked elves
#[derive(Parser, Debug)]
struct Cli {
    #[command(flatten)]
    input: Input,

    #[command(flatten)]
    top: Top,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    let contents = read_input(&cli.input.path)?;
    let totals = count_calories(contents.lines())
        .with_context(|| format!("counting calories in {}", cli.input.path.display()))?;
    let top = top_elves(&totals, cli.top.n.get())?;
    let total = top_total(&top)?;

    println!("{}", top_report(&top, total));

    Ok(())
}
