use std::{
    collections::BTreeMap,
    fmt, fs,
    io::{self, Read},
    num::{NonZeroUsize, ParseIntError},
    path::{Path, PathBuf},
};

use clap::Args;
use itertools::Itertools;
use thiserror::Error;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

pub const DEFAULT_INPUT: &str = "../input";

/// Calorie totals keyed by elf number, in ascending elf order.
///
/// An elf only gets an entry once a number has been counted for it, so elves
/// made up of nothing but blank lines never show up here.
pub type ElfCalories = BTreeMap<usize, i64>;

#[derive(Error, Debug)]
pub enum CalorieError {
    #[error("input file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("unable to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("line {line}: {text:?} is not a calorie count")]
    Parse {
        line: usize,
        text: String,
        #[source]
        source: ParseIntError,
    },

    #[error("calorie total of elf {elf} overflowed")]
    Overflow { elf: usize },

    #[error("no elves in the input")]
    NoElves,
}

#[derive(Args, Debug, Clone)]
pub struct Input {
    /// Calorie list, one number per line, elves separated by blank lines (`-` reads stdin)
    #[arg(value_name = "INPUT", default_value = DEFAULT_INPUT)]
    pub path: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct Top {
    /// How many of the best-stocked elves to add up
    #[arg(short = 'n', long = "top", default_value = "3")]
    pub n: NonZeroUsize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Elf {
    pub id: usize,
    pub calories: i64,
}

impl fmt::Display for Elf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "elf {} with {} calories", self.id, self.calories)
    }
}

/// Logs go to stderr so stdout only carries the answer. `RUST_LOG` overrides
/// the default `warn` level.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(filter)
        .init();
}

pub fn read_input(path: &Path) -> Result<String, CalorieError> {
    let read_err = |source| CalorieError::Read {
        path: path.to_owned(),
        source,
    };

    let contents = if path == Path::new("-") {
        let mut buf = String::new();
        io::stdin()
            .lock()
            .read_to_string(&mut buf)
            .map_err(read_err)?;
        buf
    } else {
        fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => CalorieError::FileNotFound {
                path: path.to_owned(),
            },
            _ => read_err(e),
        })?
    };

    debug!(path = %path.display(), bytes = contents.len(), "read input");

    Ok(contents)
}

pub fn count_calories(
    input: impl Iterator<Item = impl Into<String>>,
) -> Result<ElfCalories, CalorieError> {
    let mut totals = ElfCalories::new();
    let mut elf = 1;

    for (i, line) in input.enumerate() {
        let line: String = line.into();
        let line = line.trim();

        if line.is_empty() {
            if let Some(total) = totals.get(&elf) {
                debug!(elf, total, "elf done");
            }
            elf += 1;
            continue;
        }

        let calories: i64 = line.parse().map_err(|source| CalorieError::Parse {
            line: i + 1,
            text: line.to_string(),
            source,
        })?;

        let total = totals.entry(elf).or_insert(0);
        *total = total
            .checked_add(calories)
            .ok_or(CalorieError::Overflow { elf })?;
    }

    Ok(totals)
}

pub fn max_elf(totals: &ElfCalories) -> Result<Elf, CalorieError> {
    // max_by_key keeps the last of equal maxima, so scan from the highest
    // elf down to let the lowest elf number win a tie.
    let elf = totals
        .iter()
        .rev()
        .max_by_key(|(_, &calories)| calories)
        .map(|(&id, &calories)| Elf { id, calories })
        .ok_or(CalorieError::NoElves)?;

    info!(elf = elf.id, calories = elf.calories, "found max elf");

    Ok(elf)
}

/// The `n` elves carrying the most calories, best first. Ties keep elf order.
pub fn top_elves(totals: &ElfCalories, n: usize) -> Result<Vec<Elf>, CalorieError> {
    if totals.is_empty() {
        return Err(CalorieError::NoElves);
    }

    let top: Vec<Elf> = totals
        .iter()
        .map(|(&id, &calories)| Elf { id, calories })
        .sorted_by(|a, b| b.calories.cmp(&a.calories).then(a.id.cmp(&b.id)))
        .take(n)
        .collect();

    info!(requested = n, found = top.len(), "picked top elves");

    Ok(top)
}

pub fn top_total(elves: &[Elf]) -> Result<i64, CalorieError> {
    elves.iter().try_fold(0i64, |acc, elf| {
        acc.checked_add(elf.calories)
            .ok_or(CalorieError::Overflow { elf: elf.id })
    })
}

pub fn max_report(elf: &Elf) -> String {
    format!("The elf with the max calories is {elf}")
}

pub fn top_report(elves: &[Elf], total: i64) -> String {
    format!("The top {} elves carry {} calories", elves.len(), total)
}
