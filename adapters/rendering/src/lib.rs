#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared terminal presentation contracts for Maze Raider adapters.

use anyhow::Result as AnyResult;
use maze_raider_core::{
    Cell, Direction, Event, Health, Level, STARTING_HEALTH, TRAP_PENALTY, WALL_HIT_PENALTY,
};
use std::fmt;

const RULE_WIDTH: usize = 50;
const MAX_DIFFICULTY_STARS: u32 = 5;

/// Prompt shown when waiting for the player's next input.
pub const MOVE_PROMPT: &str = ">>> Your move (W/A/S/D/Q/R): ";

/// Prompt shown between rounds while the next maze waits.
pub const CONTINUE_PROMPT: &str = ">>> Press Enter to continue...";

/// Notice printed when the player abandons a round.
pub const RESTART_NOTICE: &str = ">>> Restarting from level 1...";

/// Two-column glyph used to draw one maze cell.
#[must_use]
pub const fn cell_glyph(cell: Cell) -> &'static str {
    match cell {
        Cell::Wall => "▓▓",
        Cell::Path => "  ",
        Cell::Player => "☻ ",
        Cell::Exit => "[]",
        Cell::Treasure => "$ ",
        Cell::Trap => "X ",
    }
}

/// Renders a row-major cell slice into drawable maze rows.
///
/// Returns no rows when `width` is zero or the slice is empty.
#[must_use]
pub fn maze_rows(width: u32, cells: &[Cell]) -> Vec<String> {
    let Ok(width) = usize::try_from(width) else {
        return Vec::new();
    };
    if width == 0 {
        return Vec::new();
    }

    cells
        .chunks(width)
        .map(|row| row.iter().map(|cell| cell_glyph(*cell)).collect())
        .collect()
}

/// Status numbers shown above the maze.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HudPresentation {
    /// Difficulty level of the round being shown.
    pub level: Level,
    /// Treasures collected so far.
    pub treasures_found: u32,
    /// Treasures required before the exit opens.
    pub treasures_needed: u32,
    /// Health remaining.
    pub health: Health,
    /// Steps spent so far.
    pub moves: u32,
}

/// Complete terminal frame describing one rendered game screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    hud: HudPresentation,
    rows: Vec<String>,
}

impl Frame {
    /// Assembles a frame from HUD numbers and pre-rendered maze rows.
    #[must_use]
    pub fn new(hud: HudPresentation, rows: Vec<String>) -> Self {
        Self { hud, rows }
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let heavy_rule: String = (0..RULE_WIDTH).map(|_| '=').collect();
        let light_rule: String = (0..RULE_WIDTH).map(|_| '-').collect();
        let span = self
            .rows
            .first()
            .map(|row| row.chars().count())
            .unwrap_or(0);
        let cap: String = (0..span).map(|_| '-').collect();

        writeln!(f, "{heavy_rule}")?;
        writeln!(f, "          MAZE RAIDER - Level {}", self.hud.level.get())?;
        writeln!(f, "{heavy_rule}")?;
        writeln!(
            f,
            " Treasures: {}/{} | Health: {}/{}",
            self.hud.treasures_found,
            self.hud.treasures_needed,
            self.hud.health.get(),
            STARTING_HEALTH.get()
        )?;
        writeln!(
            f,
            " Moves: {} | Difficulty: {}",
            self.hud.moves,
            difficulty_stars(self.hud.level)
        )?;
        writeln!(f, "{light_rule}")?;
        writeln!(f, "+{cap}+")?;
        for row in &self.rows {
            writeln!(f, "|{row}|")?;
        }
        writeln!(f, "+{cap}+")?;
        writeln!(f, "{light_rule}")?;
        writeln!(f, " Controls: W,A,S,D - move, sequences allowed")?;
        writeln!(f, "           R - restart, Q - quit")?;
        writeln!(f, "{heavy_rule}")?;
        writeln!(f, " Legend: ☻ - you, $ - treasure, X - trap")?;
        writeln!(f, "         [] - exit, ▓▓ - walls")
    }
}

fn difficulty_stars(level: Level) -> String {
    (0..level.get().min(MAX_DIFFICULTY_STARS))
        .map(|_| '*')
        .collect()
}

/// What the player asked the game to do with one line of input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlayerIntent {
    /// Leave the game, keeping nothing.
    Quit,
    /// Abandon the round and start over from the first level.
    Restart,
    /// Walk the listed directions in order. May be empty.
    Moves(Vec<Direction>),
}

/// Interprets one line of player input.
///
/// A lone `q` or `r` (any case) quits or restarts; anything else is read as
/// a movement sequence where unknown characters are skipped.
#[must_use]
pub fn parse_intent(input: &str) -> PlayerIntent {
    let trimmed = input.trim();
    if trimmed.eq_ignore_ascii_case("q") {
        return PlayerIntent::Quit;
    }
    if trimmed.eq_ignore_ascii_case("r") {
        return PlayerIntent::Restart;
    }

    let mut moves = Vec::new();
    for glyph in trimmed.chars() {
        match glyph.to_ascii_lowercase() {
            'w' => moves.push(Direction::Up),
            's' => moves.push(Direction::Down),
            'a' => moves.push(Direction::Left),
            'd' => moves.push(Direction::Right),
            _ => {}
        }
    }
    PlayerIntent::Moves(moves)
}

/// Narrates one mid-round event as lines to print beneath the frame.
///
/// Quiet steps produce nothing. Terminal events also produce nothing here;
/// [`victory_banner`] and [`defeat_banner`] carry the career context those
/// announcements need.
#[must_use]
pub fn feedback_lines(event: &Event) -> Vec<String> {
    match event {
        Event::RoundStarted {
            level,
            width,
            height,
            treasures_needed,
        } => vec![
            format!(">>> Level {} - map {width}x{height}", level.get()),
            format!(">>> Objective: collect {treasures_needed} treasures, then reach the exit"),
            format!(">>> Hazards: traps (-{TRAP_PENALTY} HP), walls (-{WALL_HIT_PENALTY} HP)"),
            ">>> Chain moves freely, like dddss".to_owned(),
        ],
        Event::TreasureCollected {
            collected, needed, ..
        } => vec![
            format!(">>> Treasure found! ({collected}/{needed})"),
            "[COIN CHIME]".to_owned(),
        ],
        Event::TrapTriggered { health, .. } => vec![
            format!(
                ">>> A trap! -{TRAP_PENALTY} health. Remaining: {}",
                health.get()
            ),
            "[SNAP OF RUSTED IRON]".to_owned(),
        ],
        Event::WallBumped { health } => vec![
            format!(
                ">>> You hit a wall! -{WALL_HIT_PENALTY} health. Remaining: {}",
                health.get()
            ),
            "[DULL THUD]".to_owned(),
        ],
        Event::ExitBlocked { missing } => {
            vec![format!(
                ">>> Collect every treasure first! Missing: {missing}"
            )]
        }
        Event::PlayerMoved { .. } | Event::ExitReached { .. } | Event::PlayerDied { .. } => {
            Vec::new()
        }
    }
}

/// Round ordinal line shown when a new maze opens.
#[must_use]
pub fn game_header(game_number: u32) -> String {
    format!(">>> Game #{game_number}")
}

/// Announcement for a cleared round, including its payout.
#[must_use]
pub fn victory_banner(
    level: Level,
    health: Health,
    moves: u32,
    score: i64,
    total_score: i64,
) -> Vec<String> {
    vec![
        format!("*** VICTORY! Level {} cleared! ***", level.get()),
        format!("*** Reward: {score} points ***"),
        format!(
            "*** Health: {} | Moves: {moves} | Level: {} ***",
            health.get(),
            level.get()
        ),
        format!("*** Total score: {total_score} points ***"),
        "[TRIUMPHANT FANFARE]".to_owned(),
    ]
}

/// Announcement for a fatal round, including career totals.
#[must_use]
pub fn defeat_banner(level: Level, rounds_played: u32, total_score: i64) -> Vec<String> {
    vec![
        format!("*** DEFEAT! You died on level {}! ***", level.get()),
        format!("*** Rounds played: {rounds_played} ***"),
        format!("*** Total score: {total_score} points ***"),
        ">>> Starting a new raid...".to_owned(),
    ]
}

/// Farewell line printed when the player quits.
#[must_use]
pub fn farewell(total_score: i64) -> String {
    format!("*** Quitting. Final score: {total_score} points ***")
}

/// Terminal backend capable of presenting Maze Raider screens.
pub trait TextBackend {
    /// Presents one rendered frame to the player.
    fn present(&mut self, frame: &Frame) -> AnyResult<()>;

    /// Writes narration lines beneath the most recent frame.
    fn announce(&mut self, lines: &[String]) -> AnyResult<()>;

    /// Blocks until the player submits their next intent.
    fn read_intent(&mut self) -> AnyResult<PlayerIntent>;

    /// Blocks until the player acknowledges a between-rounds pause.
    fn pause(&mut self) -> AnyResult<()>;
}
