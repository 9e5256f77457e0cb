//! CLI entry point for the puzzle solver.
//!
//! Usage:
//!   puzzle-solver clock <hours> <start> <end>
//!   puzzle-solver water <amount> <bucket>...
//!   puzzle-solver hoppers <file>
//!   puzzle-solver jam <file>
//!   puzzle-solver play <hoppers|jam> <file>
//!
//! Options:
//!   --json    Print the solve result as JSON instead of text

use std::io;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};

use puzzle_solver::{
    ClockConfig, Configuration, HoppersConfig, JamConfig, Playable, PuzzleError, PuzzleModel,
    Solver, WaterConfig,
};

#[derive(Parser)]
#[command(name = "puzzle-solver")]
#[command(about = "Breadth-first solver for clock, water, hoppers and jam puzzles")]
#[command(version)]
struct Cli {
    /// Print the result as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Move a clock hand one hour at a time from start to end
    Clock {
        /// Number of hours on the clock face
        hours: u32,
        /// Starting hour
        start: u32,
        /// Goal hour
        end: u32,
    },

    /// Fill, empty and pour buckets until one holds the amount
    Water {
        /// Amount of water wanted in a single bucket
        amount: u32,
        /// Bucket capacities
        #[arg(required = true, value_name = "BUCKET")]
        buckets: Vec<u32>,
    },

    /// Solve a hoppers board file
    Hoppers {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Solve a traffic jam file
    Jam {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Play a grid puzzle interactively on stdin/stdout
    Play {
        #[arg(value_enum)]
        puzzle: GridPuzzle,
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum GridPuzzle {
    Hoppers,
    Jam,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Puzzle(#[from] PuzzleError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let json = cli.json;
    match cli.command {
        Commands::Clock { hours, start, end } => {
            let config = ClockConfig::new(hours, start, end)?;
            let header = format!("Hours: {}, Start: {}, End: {}", hours, start, end);
            solve_and_print("clock", &header, &config, json)
        }
        Commands::Water { amount, buckets } => {
            let header = format!("Amount: {}, Buckets: {:?}", amount, buckets);
            let config = WaterConfig::new(buckets, amount)?;
            solve_and_print("water", &header, &config, json)
        }
        Commands::Hoppers { file } => {
            let config = HoppersConfig::load(&file)?;
            let header = format!("File: {}\n{}", file.display(), config.render());
            solve_and_print("hoppers", &header, &config, json)
        }
        Commands::Jam { file } => {
            let config = JamConfig::load(&file)?;
            let header = format!("File: {}\n{}", file.display(), config.render());
            solve_and_print("jam", &header, &config, json)
        }
        Commands::Play { puzzle, file } => match puzzle {
            GridPuzzle::Hoppers => play::<HoppersConfig>(&file),
            GridPuzzle::Jam => play::<JamConfig>(&file),
        },
    }
}

fn solve_and_print<C: Configuration>(
    puzzle: &str,
    header: &str,
    config: &C,
    json: bool,
) -> Result<(), CliError> {
    let mut solver = Solver::new();

    if json {
        let report = solver.report(puzzle, config);
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let path = solver.solve(config).unwrap_or_default();
    println!("{}", header);
    print!("{}", solver.format_report(&path));
    Ok(())
}

fn play<C: Playable>(file: &Path) -> Result<(), CliError> {
    let mut model = PuzzleModel::new(C::load(file)?);
    let stdin = io::stdin();
    let stdout = io::stdout();
    puzzle_solver::ptui::run(&mut model, &mut stdin.lock(), &mut stdout.lock())?;
    Ok(())
}
