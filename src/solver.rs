//! Bounded breadth-first search for the shortest winning swipe sequence.
//!
//! Key points:
//! - Plain BFS with a FIFO queue: the first dequeued winning state is at
//!   minimum depth (every swipe costs 1).
//! - States are deduplicated with an `FxHashSet` of `GameState`s; each
//!   state is enqueued at most once.
//! - Discovered states live in a flat arena with parent links, so the
//!   winning swipe sequence can be rebuilt without storing paths.
//! - Effort is bounded by an expansion budget and an optional deadline. A
//!   search that hits either bound reports the level as unsolved.

use std::collections::VecDeque;
use std::time::Instant;

use log::debug;
use rustc_hash::FxHashSet;

use crate::geometry::Direction;
use crate::grid::Board;
use crate::movement::resolve;
use crate::state::GameState;
use crate::win::is_win;

/// Default number of dequeued states before the search gives up.
pub const DEFAULT_MAX_EXPANSIONS: usize = 75_000;

/// How often (in expansions) the deadline is checked.
const DEADLINE_CHECK_INTERVAL: usize = 1024;

/// Marker for the root node, which has no parent.
const NO_PARENT: u32 = u32::MAX;

/// Bounds on a single search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchLimits {
    /// Maximum number of states taken off the queue.
    pub max_expansions: usize,
    /// Wall-clock point after which the search stops.
    pub deadline: Option<Instant>,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            max_expansions: DEFAULT_MAX_EXPANSIONS,
            deadline: None,
        }
    }
}

impl SearchLimits {
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    fn deadline_passed(&self) -> bool {
        self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }
}

/// A shortest winning swipe sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution {
    /// Swipes from the initial state to a win, in order.
    pub moves: Vec<Direction>,
    /// States dequeued before the win was found.
    pub expansions: usize,
}

impl Solution {
    /// Number of swipes in the solution.
    pub fn length(&self) -> u32 {
        self.moves.len() as u32
    }
}

/// Why a search ended without a solution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Unsolved {
    /// Every reachable state was visited and none is a win.
    Exhausted,
    /// The expansion budget ran out first.
    ExpansionBudget,
    /// The deadline passed first.
    Deadline,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    Solved(Solution),
    Unsolved(Unsolved),
}

impl SearchOutcome {
    /// Solution length, or `None` for any kind of unsolved outcome.
    pub fn length(&self) -> Option<u32> {
        match self {
            SearchOutcome::Solved(solution) => Some(solution.length()),
            SearchOutcome::Unsolved(_) => None,
        }
    }

    pub fn solution(&self) -> Option<&Solution> {
        match self {
            SearchOutcome::Solved(solution) => Some(solution),
            SearchOutcome::Unsolved(_) => None,
        }
    }
}

/// A discovered state with the swipe that first reached it.
struct Node {
    state: GameState,
    parent: u32,
    via: Direction,
    depth: u32,
}

/// Searches for the shortest swipe sequence from `initial` to a win.
pub fn solve(initial: &GameState, board: &Board, limits: SearchLimits) -> SearchOutcome {
    let mut nodes = vec![Node {
        state: *initial,
        parent: NO_PARENT,
        via: Direction::Up,
        depth: 0,
    }];
    let mut seen: FxHashSet<GameState> = FxHashSet::default();
    seen.insert(*initial);
    let mut queue: VecDeque<u32> = VecDeque::from([0]);

    let mut expansions = 0usize;

    while let Some(node_index) = queue.pop_front() {
        expansions += 1;
        if expansions > limits.max_expansions {
            debug!(
                "search stopped after {} expansions with {} states discovered",
                limits.max_expansions,
                nodes.len()
            );
            return SearchOutcome::Unsolved(Unsolved::ExpansionBudget);
        }
        if expansions % DEADLINE_CHECK_INTERVAL == 0 && limits.deadline_passed() {
            debug!("search deadline passed after {} expansions", expansions);
            return SearchOutcome::Unsolved(Unsolved::Deadline);
        }

        let node = &nodes[node_index as usize];
        let (state, depth) = (node.state, node.depth);

        if is_win(&state) {
            return SearchOutcome::Solved(Solution {
                moves: reconstruct_moves(&nodes, node_index),
                expansions,
            });
        }

        for direction in Direction::ALL {
            let next = resolve(&state, board, direction);
            if !seen.insert(next) {
                continue;
            }
            let next_index = nodes.len() as u32;
            nodes.push(Node {
                state: next,
                parent: node_index,
                via: direction,
                depth: depth + 1,
            });
            queue.push_back(next_index);
        }
    }

    SearchOutcome::Unsolved(Unsolved::Exhausted)
}

/// Walks parent links back to the root and returns the swipes in order.
fn reconstruct_moves(nodes: &[Node], mut node_index: u32) -> Vec<Direction> {
    let mut moves = Vec::with_capacity(nodes[node_index as usize].depth as usize);
    while nodes[node_index as usize].parent != NO_PARENT {
        let node = &nodes[node_index as usize];
        moves.push(node.via);
        node_index = node.parent;
    }
    moves.reverse();
    moves
}

/// Minimum number of swipes to win from `initial`, or `None` when the
/// level is unsolvable within the default search budget.
pub fn shortest_solution_length(initial: &GameState, board: &Board) -> Option<u32> {
    solve(initial, board, SearchLimits::default()).length()
}
