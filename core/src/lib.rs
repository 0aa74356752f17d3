#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Maze Raider engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams, query immutable
//! snapshots, and respond exclusively with new command batches.

use thiserror::Error;

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Maze Raider.";

/// Health assigned to the explorer at the start of every round.
pub const STARTING_HEALTH: Health = Health::new(100);

/// Health lost when the explorer walks into a wall or the maze boundary.
pub const WALL_HIT_PENALTY: i32 = 5;

/// Health lost when the explorer steps onto a trap.
pub const TRAP_PENALTY: i32 = 15;

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Discards the current maze and begins a fresh round at the given level.
    StartRound {
        /// Difficulty level used to size the maze and scale its hazards.
        level: Level,
        /// Seed consumed by the maze generator for this round.
        seed: u64,
    },
    /// Applies a batch of movement steps to the explorer in order.
    ApplyMoves {
        /// Directions to attempt; the batch truncates on collisions, death,
        /// and the exit.
        moves: Vec<Direction>,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Announces that a fresh maze was generated and a round began.
    RoundStarted {
        /// Difficulty level of the generated maze.
        level: Level,
        /// Number of grid columns in the maze.
        width: u32,
        /// Number of grid rows in the maze.
        height: u32,
        /// Treasures the explorer must collect before the exit unlocks.
        treasures_needed: u32,
    },
    /// Confirms that the explorer relocated between two cells.
    PlayerMoved {
        /// Cell the explorer occupied before the step.
        from: GridPos,
        /// Cell the explorer occupies after completing the step.
        to: GridPos,
    },
    /// Reports that the explorer picked up a treasure.
    TreasureCollected {
        /// Cell where the treasure was found.
        at: GridPos,
        /// Treasures collected so far this round, including this one.
        collected: u32,
        /// Treasures required before the exit unlocks.
        needed: u32,
    },
    /// Reports that the explorer stepped onto a trap and took damage.
    TrapTriggered {
        /// Cell where the trap was buried.
        at: GridPos,
        /// Health remaining after the trap fired.
        health: Health,
    },
    /// Reports that the explorer bumped into a wall or the maze boundary.
    WallBumped {
        /// Health remaining after the collision penalty.
        health: Health,
    },
    /// Reports that the explorer stood before the exit without enough
    /// treasure to unlock it.
    ExitBlocked {
        /// Treasures still missing before the exit unlocks.
        missing: u32,
    },
    /// Announces that the explorer escaped through the exit.
    ExitReached {
        /// Level that was cleared.
        level: Level,
        /// Health remaining at the moment of escape.
        health: Health,
        /// Steps spent inside the maze this round.
        moves: u32,
    },
    /// Announces that the explorer ran out of health and the round is lost.
    PlayerDied {
        /// Level the explorer fell on.
        level: Level,
        /// Cell the explorer occupied when health ran out.
        at: GridPos,
    },
}

/// Contents of a single maze cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cell {
    /// Impassable masonry; walking into it costs health.
    Wall,
    /// Open floor the explorer can walk across.
    Path,
    /// Marker for the cell the explorer currently occupies.
    Player,
    /// Exit that stays sealed until enough treasure is collected.
    Exit,
    /// Collectible treasure counting toward the exit quota.
    Treasure,
    /// Buried trap that damages the explorer when stepped on.
    Trap,
}

impl Cell {
    /// Reports whether the cell blocks movement outright.
    #[must_use]
    pub const fn is_wall(&self) -> bool {
        matches!(self, Self::Wall)
    }
}

/// Cardinal movement directions available to the explorer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    Up,
    /// Movement toward increasing row indices.
    Down,
    /// Movement toward decreasing column indices.
    Left,
    /// Movement toward increasing column indices.
    Right,
}

/// Identifies a single cell within the maze grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridPos {
    x: u32,
    y: u32,
}

impl GridPos {
    /// Creates a new position from column and row indices.
    #[must_use]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Column index of the position.
    #[must_use]
    pub const fn x(&self) -> u32 {
        self.x
    }

    /// Row index of the position.
    #[must_use]
    pub const fn y(&self) -> u32 {
        self.y
    }

    /// Neighboring position one step in the provided direction.
    ///
    /// Returns `None` when the step would leave the coordinate space.
    #[must_use]
    pub fn step(&self, direction: Direction) -> Option<Self> {
        match direction {
            Direction::Up => self.y.checked_sub(1).map(|y| Self::new(self.x, y)),
            Direction::Down => self.y.checked_add(1).map(|y| Self::new(self.x, y)),
            Direction::Left => self.x.checked_sub(1).map(|x| Self::new(x, self.y)),
            Direction::Right => self.x.checked_add(1).map(|x| Self::new(x, self.y)),
        }
    }
}

/// Remaining health of the explorer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Health(i32);

impl Health {
    /// Creates a new health value.
    #[must_use]
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the health value.
    #[must_use]
    pub const fn get(&self) -> i32 {
        self.0
    }

    /// Health remaining after taking the provided amount of damage.
    ///
    /// The result may drop below zero so the final blow stays visible to
    /// presentation layers.
    #[must_use]
    pub const fn damaged(&self, amount: i32) -> Self {
        Self(self.0 - amount)
    }

    /// Reports whether the health pool is exhausted.
    #[must_use]
    pub const fn is_depleted(&self) -> bool {
        self.0 <= 0
    }
}

/// Difficulty level of a round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Level(u32);

impl Level {
    /// Level every fresh career starts on.
    pub const FIRST: Self = Self(1);

    /// Creates a new level with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the level.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Level that follows this one.
    #[must_use]
    pub const fn next(&self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

/// Progress of the current round as observed by adapters and systems.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RoundOutcome {
    /// The round is still being played.
    InProgress,
    /// The explorer escaped through the exit.
    Escaped,
    /// The explorer ran out of health.
    Defeated,
}

/// Error returned when a grid access lies outside the maze bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("cell ({x}, {y}) lies outside the {width}x{height} maze")]
pub struct OutOfBounds {
    /// Column index that failed the bounds check.
    pub x: u32,
    /// Row index that failed the bounds check.
    pub y: u32,
    /// Number of columns in the grid that rejected the access.
    pub width: u32,
    /// Number of rows in the grid that rejected the access.
    pub height: u32,
}
