//! Sliding Corner Puzzle Tool
//!
//! Generates levels where four pieces slide together on a small grid and
//! must end up as a 2x2 square, each in its own corner. Every level is
//! certified by a breadth-first search for its shortest solution. Levels
//! are stored as JSON and can be solved, replayed and listed from here.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::{Duration, Instant};

use anyhow::{anyhow, bail, Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use log::warn;

use quadslide::catalog::{level_name, next_level_name, LevelCatalog};
use quadslide::generator::{DEFAULT_MAX_ATTEMPTS, DEFAULT_MAX_BLOCKERS, DEFAULT_MIN_BLOCKERS};
use quadslide::geometry::{format_moves, parse_moves};
use quadslide::grid::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use quadslide::seeds::SeedPool;
use quadslide::session::Game;
use quadslide::solver::{SearchOutcome, Unsolved, DEFAULT_MAX_EXPANSIONS};
use quadslide::{
    persistence, Generator, GeneratorConfig, LevelData, PathBand, Rules, SearchLimits,
};

/// Generates, solves and replays sliding corner puzzle levels.
#[derive(Parser)]
#[command(name = "quadslide")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log more (-v info, -vv debug, -vvv trace). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate one level from a seed.
    Generate {
        #[arg(long, allow_negative_numbers = true)]
        seed: i64,
        /// Level name; defaults to the next free name in --out.
        #[arg(long)]
        name: Option<String>,
        /// Directory to save the level in.
        #[arg(long)]
        out: Option<PathBuf>,
        #[command(flatten)]
        options: GenerationOptions,
    },
    /// Generate several levels with fresh seeds and save them.
    Batch {
        #[arg(long)]
        count: usize,
        #[arg(long)]
        out: PathBuf,
        /// Seed for the seed pool; random when omitted.
        #[arg(long)]
        pool_seed: Option<u64>,
        #[command(flatten)]
        options: GenerationOptions,
    },
    /// Print the shortest solution of a saved level.
    Solve {
        file: PathBuf,
        #[arg(long, default_value_t = DEFAULT_MAX_EXPANSIONS)]
        max_expansions: usize,
    },
    /// Replay swipes (e.g. "LLUU") on a saved level.
    Play { file: PathBuf, moves: String },
    /// List the levels in a directory in play order.
    List { dir: PathBuf },
}

/// Board, band and search settings shared by the generating commands.
#[derive(Args, Clone, Debug)]
struct GenerationOptions {
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    width: i32,
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    height: i32,
    #[arg(long, default_value_t = DEFAULT_MIN_BLOCKERS)]
    min_blockers: usize,
    #[arg(long, default_value_t = DEFAULT_MAX_BLOCKERS)]
    max_blockers: usize,
    /// Placement attempts per seed.
    #[arg(long, default_value_t = DEFAULT_MAX_ATTEMPTS)]
    attempts: u32,
    /// Solver expansion budget per attempt.
    #[arg(long, default_value_t = DEFAULT_MAX_EXPANSIONS)]
    max_expansions: usize,
    /// Wall-clock limit for one seed, in milliseconds.
    #[arg(long)]
    timeout_ms: Option<u64>,
    /// Shortest accepted solution length.
    #[arg(long)]
    min_path: Option<u32>,
    /// Longest accepted solution length.
    #[arg(long)]
    max_path: Option<u32>,
    /// Evaluate attempts on all cores. Picks the same level as a serial run.
    #[arg(long)]
    parallel: bool,
}

impl GenerationOptions {
    fn config(&self) -> GeneratorConfig {
        let mut limits = SearchLimits {
            max_expansions: self.max_expansions,
            deadline: None,
        };
        if let Some(timeout) = self.timeout_ms {
            limits = limits.with_deadline(Instant::now() + Duration::from_millis(timeout));
        }
        GeneratorConfig {
            width: self.width,
            height: self.height,
            min_blockers: self.min_blockers,
            max_blockers: self.max_blockers,
            max_attempts: self.attempts,
            limits,
        }
    }

    /// A band when either bound is given; the missing side is open.
    fn band(&self) -> Result<Option<PathBand>> {
        match (self.min_path, self.max_path) {
            (None, None) => Ok(None),
            (min, max) => Ok(Some(PathBand::new(
                min.unwrap_or(0),
                max.unwrap_or(u32::MAX),
            )?)),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Command::Generate {
            seed,
            name,
            out,
            options,
        } => run_generate(seed, name, out.as_deref(), &options),
        Command::Batch {
            count,
            out,
            pool_seed,
            options,
        } => run_batch(count, &out, pool_seed, &options),
        Command::Solve {
            file,
            max_expansions,
        } => run_solve(&file, max_expansions),
        Command::Play { file, moves } => run_play(&file, &moves),
        Command::List { dir } => run_list(&dir),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

/// Generates one level, serially or in parallel.
fn generate_level(
    generator: &Generator,
    seed: i64,
    name: &str,
    band: Option<PathBand>,
    parallel: bool,
) -> Option<LevelData> {
    if parallel {
        return generate_parallel(generator, seed, name, band);
    }
    generator.generate(seed, name, band)
}

#[cfg(feature = "rayon")]
fn generate_parallel(
    generator: &Generator,
    seed: i64,
    name: &str,
    band: Option<PathBand>,
) -> Option<LevelData> {
    generator.generate_parallel(seed, name, band)
}

#[cfg(not(feature = "rayon"))]
fn generate_parallel(
    generator: &Generator,
    seed: i64,
    name: &str,
    band: Option<PathBand>,
) -> Option<LevelData> {
    warn!("built without the rayon feature; generating serially");
    generator.generate(seed, name, band)
}

/// Generates a level from `seed`, prints it and optionally saves it.
fn run_generate(
    seed: i64,
    name: Option<String>,
    out: Option<&Path>,
    options: &GenerationOptions,
) -> Result<()> {
    let generator = Generator::new(options.config())?;
    let band = options.band()?;
    let name = match (name, out) {
        (Some(name), _) => name,
        (None, Some(dir)) => next_level_name(dir)?,
        (None, None) => level_name(1),
    };

    let level = generate_level(&generator, seed, &name, band, options.parallel)
        .ok_or_else(|| anyhow!("could not generate a suitable level with seed {seed}"))?;
    print!("{}", describe_level(&level, options.max_expansions)?);

    if let Some(dir) = out {
        let path = persistence::save(&level, dir)?;
        println!("Wrote {}", path.display());
    }
    Ok(())
}

/// Generates `count` levels with seeds from a pool and saves them with
/// consecutive names after the highest level already in `out`.
fn run_batch(
    count: usize,
    out: &Path,
    pool_seed: Option<u64>,
    options: &GenerationOptions,
) -> Result<()> {
    // validate before touching `out`; each seed then gets a fresh deadline
    let _ = Generator::new(options.config())?;
    let band = options.band()?;
    let mut pool = pool_seed.map_or_else(SeedPool::from_entropy, SeedPool::new);
    let mut next_number = LevelCatalog::from_dir(out)?.highest_number() + 1;

    // at most ten seeds per requested level
    let max_seeds = count.saturating_mul(10).max(10);
    let mut saved = 0;
    for _ in 0..max_seeds {
        if saved == count {
            break;
        }
        let seed = pool.request_unused();
        let name = level_name(next_number);
        let generator = Generator::new(options.config())?;
        match generate_level(&generator, seed, &name, band, options.parallel) {
            Some(level) => {
                let path = persistence::save(&level, out)?;
                println!("Wrote {} (seed {seed})", path.display());
                next_number += 1;
                saved += 1;
            }
            None => warn!("could not generate a suitable level with seed {seed}"),
        }
    }

    if saved < count {
        bail!("generated {saved} of {count} levels after {} seeds", pool.len());
    }
    Ok(())
}

fn run_solve(file: &Path, max_expansions: usize) -> Result<()> {
    let level = persistence::load(file).with_context(|| format!("loading {}", file.display()))?;
    print!("{}", describe_level(&level, max_expansions)?);
    Ok(())
}

fn run_play(file: &Path, moves: &str) -> Result<()> {
    let level = persistence::load(file).with_context(|| format!("loading {}", file.display()))?;
    let moves = parse_moves(moves)?;
    let mut game = Game::from_level(&level)?;

    for &direction in &moves {
        if game.swipe(direction).won {
            break;
        }
    }

    print!("{}", game.board().format_level(game.state()));
    if game.is_won() {
        println!("Solved in {} swipes", game.swipes());
    } else {
        println!("Not solved after {} swipes", game.swipes());
    }
    Ok(())
}

fn run_list(dir: &Path) -> Result<()> {
    let levels = persistence::load_all(dir)?;
    if levels.is_empty() {
        println!("No levels in {}", dir.display());
        return Ok(());
    }
    for (index, level) in levels.iter().enumerate() {
        let (board, state) = level.to_board_and_state()?;
        let length = board
            .shortest_solution_length(&state)
            .map_or_else(|| "unsolved".to_string(), |length| format!("{length} swipes"));
        println!(
            "{:>3}. {} (seed {}): {}",
            index + 1,
            level.level_name,
            level.seed,
            length
        );
    }
    Ok(())
}

/// Formats a level with its board and shortest solution.
fn describe_level(level: &LevelData, max_expansions: usize) -> Result<String> {
    let (board, state) = level.to_board_and_state()?;
    let limits = SearchLimits {
        max_expansions,
        deadline: None,
    };

    let mut output = format!("{} (seed {})\n", level.level_name, level.seed);
    output.push_str(&board.format_level(&state));
    match board.solve(&state, limits) {
        SearchOutcome::Solved(solution) => output.push_str(&format!(
            "Shortest solution: {} swipes ({})\n",
            solution.length(),
            format_moves(&solution.moves)
        )),
        SearchOutcome::Unsolved(Unsolved::Exhausted) => output.push_str("No solution exists\n"),
        SearchOutcome::Unsolved(reason) => {
            output.push_str(&format!("No solution found ({reason:?})\n"))
        }
    }
    Ok(output)
}
