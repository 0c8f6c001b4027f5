//! Game-model abstractions consumed by the search engines.
//!
//! The searches never see a concrete game. They work against the
//! `GameModel` trait: a cloneable simulated state that can advance one
//! joint step, report terminal status, and expose enough spatial layout
//! (board tiles, agent position) for hazard-avoidance checks.

use rand::Rng;
use rand_chacha::ChaCha20Rng;

/// A single-step action for one agent.
///
/// The ordering of `ALL` is the canonical action-id ordering used for
/// child slot indexing in the action-tree search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Stop,
    Up,
    Down,
    Left,
    Right,
}

impl Action {
    /// All actions in canonical order.
    pub const ALL: [Action; 5] = [
        Action::Stop,
        Action::Up,
        Action::Down,
        Action::Left,
        Action::Right,
    ];

    /// Number of distinct actions.
    pub const COUNT: usize = Self::ALL.len();

    /// Grid offset `(dx, dy)` this action moves by.
    #[inline]
    pub fn direction(self) -> (i32, i32) {
        match self {
            Action::Stop => (0, 0),
            Action::Up => (0, -1),
            Action::Down => (0, 1),
            Action::Left => (-1, 0),
            Action::Right => (1, 0),
        }
    }

    /// Canonical action id (index into `ALL`).
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Action::Stop => 0,
            Action::Up => 1,
            Action::Down => 2,
            Action::Left => 3,
            Action::Right => 4,
        }
    }

    /// Inverse of `index`. Returns `None` for out-of-range ids.
    pub fn from_index(idx: usize) -> Option<Action> {
        Self::ALL.get(idx).copied()
    }

    /// Draw a uniformly random action.
    pub fn random(rng: &mut ChaCha20Rng) -> Action {
        Self::ALL[rng.gen_range(0..Self::COUNT)]
    }
}

/// A grid cell position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Position after applying an action's direction.
    #[inline]
    pub fn shifted(self, action: Action) -> Coord {
        let (dx, dy) = action.direction();
        Coord::new(self.x + dx, self.y + dy)
    }

    /// Manhattan distance to another cell.
    pub fn manhattan(self, other: Coord) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

/// Static content of one grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Empty,
    Wall,
    Hazard,
}

/// Rectangular tile grid, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    tiles: Vec<Tile>,
}

impl Board {
    /// Create a board filled with `Tile::Empty`.
    pub fn empty(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            tiles: vec![Tile::Empty; width * height],
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn in_bounds(&self, pos: Coord) -> bool {
        pos.x >= 0 && (pos.x as usize) < self.width && pos.y >= 0 && (pos.y as usize) < self.height
    }

    /// Tile at `pos`, or `None` when out of bounds.
    pub fn tile(&self, pos: Coord) -> Option<Tile> {
        if self.in_bounds(pos) {
            Some(self.tiles[pos.y as usize * self.width + pos.x as usize])
        } else {
            None
        }
    }

    pub fn set_tile(&mut self, pos: Coord, tile: Tile) {
        assert!(self.in_bounds(pos), "tile position out of bounds");
        self.tiles[pos.y as usize * self.width + pos.x as usize] = tile;
    }

    /// True when `pos` is an in-bounds hazard cell.
    #[inline]
    pub fn is_hazard(&self, pos: Coord) -> bool {
        self.tile(pos) == Some(Tile::Hazard)
    }

    /// A step is safe when the target cell is in bounds and not a hazard.
    /// Walls are safe to step "into" (the mover just stays put).
    #[inline]
    pub fn step_is_safe(&self, from: Coord, action: Action) -> bool {
        let target = from.shifted(action);
        self.in_bounds(target) && !self.is_hazard(target)
    }
}

/// Simulated game state as seen by the search engines.
///
/// Implementations must be deep copies on `clone()`: advancing a clone
/// never affects the state it was cloned from.
pub trait GameModel: Clone {
    /// Whether the game is over for the controlled agent.
    fn is_terminal(&self) -> bool;

    /// Total number of agents acting each step.
    fn num_agents(&self) -> usize;

    /// Index of the agent this search controls.
    fn controlled_agent(&self) -> usize;

    /// Apply one synchronized joint action, one entry per agent.
    fn step(&mut self, joint: &[Action]);

    /// Static board layout for hazard-avoidance checks.
    fn board(&self) -> &Board;

    /// Current cell of the controlled agent.
    fn agent_position(&self) -> Coord;
}

/// Advance `state` one joint step: the controlled agent plays `action`,
/// every other agent plays a uniformly random action.
pub fn advance<G: GameModel>(state: &mut G, action: Action, rng: &mut ChaCha20Rng) {
    let me = state.controlled_agent();
    let joint: Vec<Action> = (0..state.num_agents())
        .map(|i| if i == me { action } else { Action::random(rng) })
        .collect();
    state.step(&joint);
}

/// Pick a legal action avoiding statically unsafe cells: the first of a
/// shuffled action list whose target is in bounds and not a hazard,
/// falling back to a uniformly random action when every candidate is
/// unsafe.
pub fn safe_random_action<G: GameModel>(state: &G, rng: &mut ChaCha20Rng) -> Action {
    use rand::seq::SliceRandom;

    let pos = state.agent_position();
    let board = state.board();

    let mut candidates = Action::ALL;
    candidates.shuffle(rng);

    for action in candidates {
        if board.step_is_safe(pos, action) {
            return action;
        }
    }

    Action::random(rng)
}
