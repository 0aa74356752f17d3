#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Maze Raider.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use maze_raider_core::{
    Cell, Command, Direction, Event, GridPos, Health, Level, RoundOutcome, STARTING_HEALTH,
    TRAP_PENALTY, WALL_HIT_PENALTY, WELCOME_BANNER,
};

mod generation;
mod grid;
mod reachability;

pub use grid::Grid;
pub use reachability::reachable_path_cells;

const DEFAULT_ROUND_SEED: u64 = 0x9e37_79b9_7f4a_7c15;

/// Authoritative state for a single maze round.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    grid: Grid,
    player: GridPos,
    exit: GridPos,
    level: Level,
    health: Health,
    treasures_found: u32,
    treasures_needed: u32,
    move_count: u32,
    outcome: RoundOutcome,
}

impl World {
    /// Creates a world hosting a first-level maze grown from a fixed seed.
    #[must_use]
    pub fn new() -> Self {
        Self::with_round(Level::FIRST, DEFAULT_ROUND_SEED)
    }

    fn with_round(level: Level, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let blueprint = generation::generate(level, &mut rng);
        Self {
            banner: WELCOME_BANNER,
            grid: blueprint.grid,
            player: blueprint.player,
            exit: blueprint.exit,
            level,
            health: STARTING_HEALTH,
            treasures_found: 0,
            treasures_needed: blueprint.treasures_needed,
            move_count: 0,
            outcome: RoundOutcome::InProgress,
        }
    }

    fn begin_round(&mut self, level: Level, seed: u64) {
        *self = Self::with_round(level, seed);
    }

    fn resolve_moves(&mut self, moves: &[Direction], out_events: &mut Vec<Event>) {
        if self.outcome != RoundOutcome::InProgress {
            return;
        }

        for &direction in moves {
            let from = self.player;
            let step = from
                .step(direction)
                .and_then(|pos| self.grid.get(pos).ok().map(|cell| (pos, cell)));

            // Leaving the grid and hitting masonry are the same collision.
            let Some((target, cell)) = step else {
                self.bump_wall(out_events);
                break;
            };

            if cell.is_wall() {
                self.bump_wall(out_events);
                break;
            }

            self.move_count = self.move_count.saturating_add(1);

            match cell {
                Cell::Treasure => {
                    self.treasures_found = self.treasures_found.saturating_add(1);
                    self.relocate(target, out_events);
                    out_events.push(Event::TreasureCollected {
                        at: target,
                        collected: self.treasures_found,
                        needed: self.treasures_needed,
                    });
                }
                Cell::Trap => {
                    // Damage lands first, then the relocation, then the death
                    // check; a fatal step is never reverted.
                    self.health = self.health.damaged(TRAP_PENALTY);
                    self.relocate(target, out_events);
                    out_events.push(Event::TrapTriggered {
                        at: target,
                        health: self.health,
                    });
                    if self.health.is_depleted() {
                        self.fall(out_events);
                        break;
                    }
                }
                Cell::Exit => {
                    if self.treasures_found < self.treasures_needed {
                        out_events.push(Event::ExitBlocked {
                            missing: self.treasures_needed - self.treasures_found,
                        });
                    } else {
                        self.relocate(target, out_events);
                        self.outcome = RoundOutcome::Escaped;
                        out_events.push(Event::ExitReached {
                            level: self.level,
                            health: self.health,
                            moves: self.move_count,
                        });
                    }
                    break;
                }
                _ => self.relocate(target, out_events),
            }
        }
    }

    fn bump_wall(&mut self, out_events: &mut Vec<Event>) {
        self.health = self.health.damaged(WALL_HIT_PENALTY);
        out_events.push(Event::WallBumped {
            health: self.health,
        });
        if self.health.is_depleted() {
            self.fall(out_events);
        }
    }

    fn fall(&mut self, out_events: &mut Vec<Event>) {
        self.outcome = RoundOutcome::Defeated;
        out_events.push(Event::PlayerDied {
            level: self.level,
            at: self.player,
        });
    }

    fn relocate(&mut self, target: GridPos, out_events: &mut Vec<Event>) {
        let from = self.player;
        self.grid.put(from, Cell::Path);
        self.grid.put(target, Cell::Player);
        self.player = target;
        out_events.push(Event::PlayerMoved { from, to: target });
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::StartRound { level, seed } => {
            world.begin_round(level, seed);
            out_events.push(Event::RoundStarted {
                level,
                width: world.grid.width(),
                height: world.grid.height(),
                treasures_needed: world.treasures_needed,
            });
        }
        Command::ApplyMoves { moves } => {
            world.resolve_moves(&moves, out_events);
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use maze_raider_core::{GridPos, Health, Level, RoundOutcome};

    use super::{Grid, World};

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Provides read-only access to the maze grid.
    #[must_use]
    pub fn grid(world: &World) -> &Grid {
        &world.grid
    }

    /// Difficulty level of the current round.
    #[must_use]
    pub fn level(world: &World) -> Level {
        world.level
    }

    /// Cell currently occupied by the explorer.
    #[must_use]
    pub fn player_position(world: &World) -> GridPos {
        world.player
    }

    /// Cell holding the exit marker.
    #[must_use]
    pub fn exit_position(world: &World) -> GridPos {
        world.exit
    }

    /// Health remaining this round.
    #[must_use]
    pub fn health(world: &World) -> Health {
        world.health
    }

    /// Treasures collected so far this round.
    #[must_use]
    pub fn treasures_found(world: &World) -> u32 {
        world.treasures_found
    }

    /// Treasures required before the exit unlocks.
    #[must_use]
    pub fn treasures_needed(world: &World) -> u32 {
        world.treasures_needed
    }

    /// Movement steps spent this round.
    #[must_use]
    pub fn move_count(world: &World) -> u32 {
        world.move_count
    }

    /// Progress of the current round.
    #[must_use]
    pub fn outcome(world: &World) -> RoundOutcome {
        world.outcome
    }
}
