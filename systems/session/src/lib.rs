#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic session progression system.
//!
//! Tracks career state across rounds: which level comes next, how many
//! rounds were finished, and the accumulated score. Terminal round events
//! are folded into the career and answered with a [`Command::StartRound`]
//! for the follow-up maze.

use maze_raider_core::{Command, Event, Health, Level};
use sha2::{Digest, Sha256};

/// Score granted per point of health remaining when a round is cleared.
const HEALTH_SCORE_WEIGHT: i64 = 10;

/// Step allowance a clear is measured against; finishing under it pays out.
const MOVE_ALLOWANCE: i64 = 100;

/// Score granted per difficulty level of a cleared round.
const LEVEL_SCORE_WEIGHT: i64 = 50;

const RNG_STREAM_ROUND: &str = "round";

/// Pure system that sequences rounds and keeps career totals.
#[derive(Debug)]
pub struct Session {
    master_seed: u64,
    level: Level,
    rounds_issued: u64,
    rounds_played: u32,
    total_score: i64,
}

impl Session {
    /// Creates a session whose round seeds all derive from `master_seed`.
    #[must_use]
    pub fn new(master_seed: u64) -> Self {
        Self {
            master_seed,
            level: Level::FIRST,
            rounds_issued: 0,
            rounds_played: 0,
            total_score: 0,
        }
    }

    /// Issues the command that opens the next round at the current level.
    ///
    /// Every issue draws a fresh seed, so replaying a level after a death
    /// or restart never rebuilds the maze that was just abandoned.
    pub fn next_round(&mut self) -> Command {
        let seed = derive_round_seed(self.master_seed, self.level, self.rounds_issued);
        self.rounds_issued = self.rounds_issued.saturating_add(1);
        Command::StartRound {
            level: self.level,
            seed,
        }
    }

    /// Folds terminal round events into the career and emits follow-up
    /// [`Command::StartRound`] values.
    ///
    /// A cleared round banks its score and raises the level; a fatal round
    /// keeps the banked score but drops the session back to the first level.
    pub fn handle(&mut self, events: &[Event], out_commands: &mut Vec<Command>) {
        for event in events {
            match event {
                Event::ExitReached {
                    level,
                    health,
                    moves,
                } => {
                    self.total_score = self
                        .total_score
                        .saturating_add(round_score(*health, *moves, *level));
                    self.rounds_played = self.rounds_played.saturating_add(1);
                    self.level = level.next();
                    out_commands.push(self.next_round());
                }
                Event::PlayerDied { .. } => {
                    self.rounds_played = self.rounds_played.saturating_add(1);
                    self.level = Level::FIRST;
                    out_commands.push(self.next_round());
                }
                _ => {}
            }
        }
    }

    /// Abandons the current round and reopens the career at the first level.
    ///
    /// Career totals survive a restart; the abandoned round counts for
    /// nothing.
    pub fn restart(&mut self, out_commands: &mut Vec<Command>) {
        self.level = Level::FIRST;
        out_commands.push(self.next_round());
    }

    /// Level the next issued round will be played at.
    #[must_use]
    pub fn level(&self) -> Level {
        self.level
    }

    /// Rounds finished so far, cleared and fatal alike.
    #[must_use]
    pub fn rounds_played(&self) -> u32 {
        self.rounds_played
    }

    /// Score banked across all cleared rounds.
    #[must_use]
    pub fn total_score(&self) -> i64 {
        self.total_score
    }
}

/// Score paid out for clearing a round with the given health, step count,
/// and level.
#[must_use]
pub fn round_score(health: Health, moves: u32, level: Level) -> i64 {
    let health_points = i64::from(health.get()) * HEALTH_SCORE_WEIGHT;
    let speed_bonus = MOVE_ALLOWANCE - i64::from(moves);
    let level_reward = i64::from(level.get()) * LEVEL_SCORE_WEIGHT;
    health_points + speed_bonus + level_reward
}

fn derive_round_seed(master_seed: u64, level: Level, issue: u64) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(master_seed.to_le_bytes());
    hasher.update(level.get().to_le_bytes());
    hasher.update(issue.to_le_bytes());
    hasher.update(RNG_STREAM_ROUND.as_bytes());
    finalize_seed(hasher)
}

fn finalize_seed(hasher: Sha256) -> u64 {
    let digest = hasher.finalize();
    let bytes: [u8; 8] = digest[0..8].try_into().expect("sha256 digest slice length");
    u64::from_le_bytes(bytes)
}
