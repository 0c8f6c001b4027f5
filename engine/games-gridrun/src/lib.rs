//! GridRun: a small multi-agent grid game for the search engines.
//!
//! Agents move simultaneously on a rectangular grid of empty, wall and
//! hazard tiles. Moving into a wall or off the board keeps the agent in
//! place; entering a hazard eliminates it. The controlled agent wins by
//! reaching the goal cell and loses by being eliminated; the episode
//! also ends at a step cap.
//!
//! Boards for tests are written in ASCII:
//!
//! ```text
//! #####
//! #A.G#
//! #.~.#
//! #####
//! ```
//!
//! `#` wall, `~` hazard, `.` empty, `A` controlled agent, `B`/`C`/`D`
//! opponents, `G` goal.

use engine_core::{Action, Board, Coord, GameModel, Tile};
use thiserror::Error;

pub mod heuristics;

pub use heuristics::{AdvancedHeuristic, CustomHeuristic, GridHeuristic};

/// Errors from parsing an ASCII board.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("board is empty")]
    Empty,

    #[error("ragged board: line {line} has width {got}, expected {expected}")]
    Ragged {
        line: usize,
        got: usize,
        expected: usize,
    },

    #[error("unknown tile character '{0}'")]
    UnknownTile(char),

    #[error("board has no controlled agent 'A'")]
    MissingAgent,

    #[error("opponents must be contiguous starting at 'B', found '{0}'")]
    OpponentGap(char),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct AgentState {
    pos: Coord,
    alive: bool,
}

/// One GridRun episode state. `clone()` is a deep copy; the search
/// engines rely on that to simulate without touching the real state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridRun {
    board: Board,
    agents: Vec<AgentState>,
    goal: Option<Coord>,
    steps: u32,
    max_steps: u32,
    reached_goal: bool,
}

/// Index of the controlled agent. Parsing places `A` first.
const CONTROLLED: usize = 0;

impl GridRun {
    /// Default step cap for parsed boards.
    pub const DEFAULT_MAX_STEPS: u32 = 50;

    /// Parse an ASCII board. Leading/trailing blank lines are ignored;
    /// every remaining line must have the same width.
    pub fn from_ascii(art: &str) -> Result<Self, ParseError> {
        let lines: Vec<&str> = art
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        if lines.is_empty() {
            return Err(ParseError::Empty);
        }

        let width = lines[0].len();
        let height = lines.len();
        let mut board = Board::empty(width, height);
        let mut controlled = None;
        let mut opponents: Vec<(char, Coord)> = Vec::new();
        let mut goal = None;

        for (y, line) in lines.iter().enumerate() {
            if line.len() != width {
                return Err(ParseError::Ragged {
                    line: y,
                    got: line.len(),
                    expected: width,
                });
            }
            for (x, ch) in line.chars().enumerate() {
                let pos = Coord::new(x as i32, y as i32);
                match ch {
                    '.' => {}
                    '#' => board.set_tile(pos, Tile::Wall),
                    '~' => board.set_tile(pos, Tile::Hazard),
                    'A' => controlled = Some(pos),
                    'B' | 'C' | 'D' => opponents.push((ch, pos)),
                    'G' => goal = Some(pos),
                    other => return Err(ParseError::UnknownTile(other)),
                }
            }
        }

        let controlled = controlled.ok_or(ParseError::MissingAgent)?;

        // Opponents sorted by letter so agent indices are stable.
        opponents.sort_by_key(|(ch, _)| *ch);
        for (i, (ch, _)) in opponents.iter().enumerate() {
            if *ch as usize != 'B' as usize + i {
                return Err(ParseError::OpponentGap(*ch));
            }
        }

        let mut agents = vec![AgentState {
            pos: controlled,
            alive: true,
        }];
        agents.extend(opponents.iter().map(|(_, pos)| AgentState {
            pos: *pos,
            alive: true,
        }));

        Ok(Self {
            board,
            agents,
            goal,
            steps: 0,
            max_steps: Self::DEFAULT_MAX_STEPS,
            reached_goal: false,
        })
    }

    /// Replace the step cap.
    pub fn with_max_steps(mut self, max_steps: u32) -> Self {
        self.max_steps = max_steps;
        self
    }

    pub fn goal(&self) -> Option<Coord> {
        self.goal
    }

    pub fn steps(&self) -> u32 {
        self.steps
    }

    /// Whether the controlled agent is still alive.
    pub fn controlled_alive(&self) -> bool {
        self.agents[CONTROLLED].alive
    }

    /// Whether the controlled agent has reached the goal.
    pub fn reached_goal(&self) -> bool {
        self.reached_goal
    }

    fn move_agent(&mut self, idx: usize, action: Action) {
        let agent = self.agents[idx];
        if !agent.alive {
            return;
        }

        let target = agent.pos.shifted(action);
        let tile = self.board.tile(target);

        let dest = match tile {
            None | Some(Tile::Wall) => agent.pos, // blocked, stay put
            Some(_) => target,
        };

        let alive = !self.board.is_hazard(dest);
        self.agents[idx] = AgentState { pos: dest, alive };

        if idx == CONTROLLED && alive && Some(dest) == self.goal {
            self.reached_goal = true;
        }
    }
}

impl GameModel for GridRun {
    fn is_terminal(&self) -> bool {
        !self.agents[CONTROLLED].alive || self.reached_goal || self.steps >= self.max_steps
    }

    fn num_agents(&self) -> usize {
        self.agents.len()
    }

    fn controlled_agent(&self) -> usize {
        CONTROLLED
    }

    fn step(&mut self, joint: &[Action]) {
        debug_assert_eq!(joint.len(), self.agents.len());
        if self.is_terminal() {
            return;
        }
        for (idx, action) in joint.iter().enumerate() {
            self.move_agent(idx, *action);
        }
        self.steps += 1;
    }

    fn board(&self) -> &Board {
        &self.board
    }

    fn agent_position(&self) -> Coord {
        self.agents[CONTROLLED].pos
    }
}
