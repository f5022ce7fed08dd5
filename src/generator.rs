//! Seeded level generation.
//!
//! Each attempt reseeds its own RNG from `seed + attempt`, places random
//! blockers and pieces, and asks the solver for the shortest solution.
//! The first attempt that is solvable (and inside the requested solution
//! length band, if any) becomes the level. Attempts share no state, so
//! the same arguments always produce the same level.

use std::time::Instant;

use log::{info, trace};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::error::LevelError;
use crate::geometry::Coord;
use crate::grid::{Board, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::level::LevelData;
use crate::pieces::{Piece, PieceType, PIECE_COUNT};
use crate::solver::{solve, SearchLimits, SearchOutcome};
use crate::state::GameState;

/// Default number of placement attempts per seed.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 150;

/// Default inclusive range for the number of blockers.
pub const DEFAULT_MIN_BLOCKERS: usize = 3;
pub const DEFAULT_MAX_BLOCKERS: usize = 4;

/// Inclusive range of acceptable solution lengths.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PathBand {
    min: u32,
    max: u32,
}

impl PathBand {
    pub fn new(min: u32, max: u32) -> Result<Self, LevelError> {
        if min > max {
            return Err(LevelError::InvalidBand { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> u32 {
        self.min
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    #[inline]
    pub fn contains(&self, length: u32) -> bool {
        (self.min..=self.max).contains(&length)
    }
}

/// Generator settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub width: i32,
    pub height: i32,
    pub min_blockers: usize,
    pub max_blockers: usize,
    pub max_attempts: u32,
    /// Limits for each solver run. The deadline also stops new attempts.
    pub limits: SearchLimits,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            min_blockers: DEFAULT_MIN_BLOCKERS,
            max_blockers: DEFAULT_MAX_BLOCKERS,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            limits: SearchLimits::default(),
        }
    }
}

/// A candidate that passed the solver.
struct Accepted {
    board: Board,
    state: GameState,
    length: u32,
}

/// Level generator for one board configuration.
#[derive(Clone, Debug)]
pub struct Generator {
    config: GeneratorConfig,
}

impl Generator {
    /// Validates the board size and blocker range up front.
    pub fn new(config: GeneratorConfig) -> Result<Self, LevelError> {
        Board::open(config.width, config.height)?;
        if config.min_blockers > config.max_blockers {
            return Err(LevelError::InvalidBlockerRange {
                min: config.min_blockers,
                max: config.max_blockers,
            });
        }
        Ok(Self { config })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generates a level, or returns `None` once every attempt has failed.
    ///
    /// The returned record carries `seed` itself, not the per-attempt seed.
    pub fn generate(&self, seed: i64, name: &str, band: Option<PathBand>) -> Option<LevelData> {
        for attempt in 0..self.config.max_attempts {
            if self.deadline_passed() {
                info!("seed {seed}: deadline passed after {attempt} attempts");
                return None;
            }
            if let Some(accepted) = self.try_attempt(seed, attempt, band) {
                return Some(self.finish(seed, name, attempt, accepted));
            }
        }
        info!(
            "seed {seed}: no suitable level in {} attempts",
            self.config.max_attempts
        );
        None
    }

    /// Same result as [`generate`](Self::generate), with attempts evaluated
    /// in parallel. The lowest accepted attempt index wins.
    ///
    /// With a deadline, a run that ends after it returns `None`: attempts
    /// cut short on one thread could otherwise let a later attempt win.
    #[cfg(feature = "rayon")]
    pub fn generate_parallel(
        &self,
        seed: i64,
        name: &str,
        band: Option<PathBand>,
    ) -> Option<LevelData> {
        use rayon::prelude::*;

        let found = (0..self.config.max_attempts)
            .into_par_iter()
            .find_map_first(|attempt| {
                if self.deadline_passed() {
                    return None;
                }
                self.try_attempt(seed, attempt, band)
                    .map(|accepted| (attempt, accepted))
            });

        if self.deadline_passed() {
            info!("seed {seed}: deadline passed during parallel attempts");
            return None;
        }

        match found {
            Some((attempt, accepted)) => Some(self.finish(seed, name, attempt, accepted)),
            None => {
                info!(
                    "seed {seed}: no suitable level in {} attempts",
                    self.config.max_attempts
                );
                None
            }
        }
    }

    fn finish(&self, seed: i64, name: &str, attempt: u32, accepted: Accepted) -> LevelData {
        info!(
            "seed {seed}: accepted attempt {attempt} with solution length {}",
            accepted.length
        );
        LevelData::from_parts(seed, name, &accepted.board, &accepted.state)
    }

    fn deadline_passed(&self) -> bool {
        self.config
            .limits
            .deadline
            .is_some_and(|deadline| Instant::now() >= deadline)
    }

    /// Runs one attempt with its own RNG stream.
    fn try_attempt(&self, seed: i64, attempt: u32, band: Option<PathBand>) -> Option<Accepted> {
        let mut rng = StdRng::seed_from_u64(seed.wrapping_add(i64::from(attempt)) as u64);

        let Some((board, state)) = self.place_candidate(&mut rng) else {
            trace!("seed {seed} attempt {attempt}: not enough free cells for the pieces");
            return None;
        };

        let length = match solve(&state, &board, self.config.limits) {
            SearchOutcome::Solved(solution) => solution.length(),
            SearchOutcome::Unsolved(reason) => {
                trace!("seed {seed} attempt {attempt}: unsolved ({reason:?})");
                return None;
            }
        };

        if band.is_some_and(|band| !band.contains(length)) {
            trace!("seed {seed} attempt {attempt}: length {length} outside the band");
            return None;
        }

        Some(Accepted {
            board,
            state,
            length,
        })
    }

    /// Draws blockers and piece cells without replacement.
    ///
    /// Returns `None` when the blockers leave fewer than four free cells.
    fn place_candidate(&self, rng: &mut StdRng) -> Option<(Board, GameState)> {
        let GeneratorConfig {
            width,
            height,
            min_blockers,
            max_blockers,
            ..
        } = self.config;

        let mut available: Vec<Coord> = (0..width)
            .flat_map(|x| (0..height).map(move |y| Coord::new(x, y)))
            .collect();

        let blocker_count = rng.gen_range(min_blockers..=max_blockers);
        let mut blockers = Vec::with_capacity(blocker_count);
        for _ in 0..blocker_count {
            if available.is_empty() {
                break;
            }
            let index = rng.gen_range(0..available.len());
            blockers.push(available.remove(index));
        }

        let mut piece_types = PieceType::ALL;
        piece_types.shuffle(rng);

        if available.len() < PIECE_COUNT {
            return None;
        }
        let mut pieces = Vec::with_capacity(PIECE_COUNT);
        for piece_type in piece_types {
            let index = rng.gen_range(0..available.len());
            pieces.push(Piece::new(piece_type, available.remove(index)));
        }

        // blockers and pieces come from the same shrinking pool, so both
        // constructors only fail on a misconfigured generator
        let board = Board::new(width, height, blockers).ok()?;
        let state = GameState::from_pieces(&pieces).ok()?;
        Some((board, state))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::solver::shortest_solution_length;
    use crate::win::is_win;

    #[test]
    fn test_same_seed_gives_identical_level() {
        let generator = Generator::new(GeneratorConfig::default()).unwrap();
        let first = generator.generate(12345, "Level_01", None);
        let second = Generator::new(GeneratorConfig::default())
            .unwrap()
            .generate(12345, "Level_01", None);
        assert!(first.is_some());
        assert_eq!(first, second);
    }

    #[test]
    fn test_generated_levels_are_valid_and_solvable() {
        let generator = Generator::new(GeneratorConfig::default()).unwrap();
        for seed in 0..5 {
            let level = generator
                .generate(seed, "Level_01", None)
                .expect("default settings find a level quickly");
            assert_eq!(level.seed, seed);
            assert_eq!(level.level_name, "Level_01");
            let (board, state) = level.to_board_and_state().unwrap();
            assert!((3..=4).contains(&board.blocker_count()));
            assert!(shortest_solution_length(&state, &board).is_some());
        }
    }

    #[test]
    fn test_band_is_respected() {
        let generator = Generator::new(GeneratorConfig::default()).unwrap();
        let band = PathBand::new(3, 6).unwrap();
        let mut accepted = 0;
        for seed in 100..110 {
            let Some(level) = generator.generate(seed, "banded", Some(band)) else {
                continue;
            };
            let (board, state) = level.to_board_and_state().unwrap();
            let length = shortest_solution_length(&state, &board).unwrap();
            assert!(band.contains(length), "seed {seed} gave length {length}");
            assert!(!is_win(&state));
            accepted += 1;
        }
        assert!(accepted > 0, "no seed produced a level in the band");
    }

    #[test]
    fn test_unreachable_band_exhausts() {
        let config = GeneratorConfig {
            max_attempts: 5,
            ..GeneratorConfig::default()
        };
        let generator = Generator::new(config).unwrap();
        let band = PathBand::new(500, 600).unwrap();
        assert_eq!(generator.generate(9, "never", Some(band)), None);
    }

    #[test]
    fn test_too_few_free_cells_discards_every_attempt() {
        // a 2x2 board with one blocker leaves three cells for four pieces
        let config = GeneratorConfig {
            width: 2,
            height: 2,
            min_blockers: 1,
            max_blockers: 1,
            max_attempts: 20,
            ..GeneratorConfig::default()
        };
        let generator = Generator::new(config).unwrap();
        assert_eq!(generator.generate(1, "cramped", None), None);
    }

    #[test]
    fn test_invalid_configs_are_rejected() {
        assert!(PathBand::new(5, 2).is_err());
        let inverted = GeneratorConfig {
            min_blockers: 4,
            max_blockers: 3,
            ..GeneratorConfig::default()
        };
        assert!(Generator::new(inverted).is_err());
        let empty = GeneratorConfig {
            width: 0,
            ..GeneratorConfig::default()
        };
        assert!(Generator::new(empty).is_err());
    }

    fn expired_config() -> GeneratorConfig {
        let past = Instant::now() - Duration::from_millis(1);
        GeneratorConfig {
            limits: SearchLimits::default().with_deadline(past),
            ..GeneratorConfig::default()
        }
    }

    #[test]
    fn test_past_deadline_generates_nothing() {
        let generator = Generator::new(expired_config()).unwrap();
        assert_eq!(generator.generate(12345, "late", None), None);
        assert_eq!(generator.generate(-12345, "late", None), None);
    }

    #[test]
    fn test_negative_seed_is_reproducible() {
        let generator = Generator::new(GeneratorConfig::default()).unwrap();
        let level = generator
            .generate(-1_234_567, "Level_05", None)
            .expect("default settings find a level quickly");
        assert_eq!(level.seed, -1_234_567);
        assert_eq!(generator.generate(-1_234_567, "Level_05", None), Some(level));
    }

    #[cfg(feature = "rayon")]
    #[test]
    fn test_parallel_generation_respects_the_deadline() {
        let generator = Generator::new(expired_config()).unwrap();
        assert_eq!(generator.generate_parallel(12345, "late", None), None);
    }

    #[cfg(feature = "rayon")]
    #[test]
    fn test_parallel_generation_picks_the_same_attempt() {
        let generator = Generator::new(GeneratorConfig::default()).unwrap();
        let band = Some(PathBand::new(4, 8).unwrap());
        for seed in [3, 77, 2024] {
            assert_eq!(
                generator.generate(seed, "Level_02", band),
                generator.generate_parallel(seed, "Level_02", band)
            );
        }
    }
}
