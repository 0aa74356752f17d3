#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs the Maze Raider terminal game.

use std::io::{self, BufRead, Write};

use anyhow::Result as AnyResult;
use clap::Parser;
use maze_raider_core::{Command, Event};
use maze_raider_rendering::{
    defeat_banner, farewell, feedback_lines, game_header, maze_rows, parse_intent, victory_banner,
    Frame, HudPresentation, PlayerIntent, TextBackend, CONTINUE_PROMPT, MOVE_PROMPT,
    RESTART_NOTICE,
};
use maze_raider_system_session::{round_score, Session};
use maze_raider_world::{self as world, query, World};

/// Command-line options for the Maze Raider terminal game.
#[derive(Debug, Parser)]
#[command(name = "maze-raider", about = "Turn-based maze raiding in your terminal")]
struct Args {
    /// Master seed for the whole session; drawn at random when omitted.
    #[arg(long)]
    seed: Option<u64>,
}

/// Entry point for the Maze Raider command-line interface.
fn main() -> AnyResult<()> {
    let args = Args::parse();
    let mut terminal = Terminal::new();
    run(args, &mut terminal)
}

fn run<B: TextBackend>(args: Args, backend: &mut B) -> AnyResult<()> {
    let master_seed = args.seed.unwrap_or_else(rand::random);
    let mut session = Session::new(master_seed);
    let mut world = World::new();

    backend.announce(&[query::welcome_banner(&world).to_owned()])?;

    let opening = session.next_round();
    let game_number = session.rounds_played() + 1;
    open_round(&mut world, backend, opening, game_number)?;

    loop {
        backend.present(&frame_of(&world))?;

        match backend.read_intent()? {
            PlayerIntent::Quit => {
                backend.announce(&[farewell(session.total_score())])?;
                return Ok(());
            }
            PlayerIntent::Restart => {
                backend.announce(&[RESTART_NOTICE.to_owned()])?;
                let mut commands = Vec::new();
                session.restart(&mut commands);
                let game_number = session.rounds_played() + 1;
                for command in commands {
                    open_round(&mut world, backend, command, game_number)?;
                }
            }
            PlayerIntent::Moves(moves) => {
                let mut events = Vec::new();
                world::apply(&mut world, Command::ApplyMoves { moves }, &mut events);
                narrate(&events, backend)?;

                let mut followups = Vec::new();
                session.handle(&events, &mut followups);
                announce_outcomes(&events, &session, backend)?;

                if !followups.is_empty() {
                    backend.pause()?;
                    let game_number = session.rounds_played() + 1;
                    for command in followups {
                        open_round(&mut world, backend, command, game_number)?;
                    }
                }
            }
        }
    }
}

fn open_round<B: TextBackend>(
    world: &mut World,
    backend: &mut B,
    command: Command,
    game_number: u32,
) -> AnyResult<()> {
    let mut events = Vec::new();
    world::apply(world, command, &mut events);
    backend.announce(&[game_header(game_number)])?;
    narrate(&events, backend)?;
    backend.pause()
}

fn narrate<B: TextBackend>(events: &[Event], backend: &mut B) -> AnyResult<()> {
    for event in events {
        let lines = feedback_lines(event);
        if !lines.is_empty() {
            backend.announce(&lines)?;
        }
    }
    Ok(())
}

fn announce_outcomes<B: TextBackend>(
    events: &[Event],
    session: &Session,
    backend: &mut B,
) -> AnyResult<()> {
    for event in events {
        match event {
            Event::ExitReached {
                level,
                health,
                moves,
            } => {
                let reward = round_score(*health, *moves, *level);
                backend.announce(&victory_banner(
                    *level,
                    *health,
                    *moves,
                    reward,
                    session.total_score(),
                ))?;
            }
            Event::PlayerDied { level, .. } => {
                backend.announce(&defeat_banner(
                    *level,
                    session.rounds_played(),
                    session.total_score(),
                ))?;
            }
            _ => {}
        }
    }
    Ok(())
}

fn frame_of(world: &World) -> Frame {
    let grid = query::grid(world);
    let hud = HudPresentation {
        level: query::level(world),
        treasures_found: query::treasures_found(world),
        treasures_needed: query::treasures_needed(world),
        health: query::health(world),
        moves: query::move_count(world),
    };
    Frame::new(hud, maze_rows(grid.width(), grid.cells()))
}

/// Line-based terminal backed by locked standard streams.
struct Terminal {
    input: io::StdinLock<'static>,
    output: io::StdoutLock<'static>,
}

impl Terminal {
    fn new() -> Self {
        Self {
            input: io::stdin().lock(),
            output: io::stdout().lock(),
        }
    }
}

impl TextBackend for Terminal {
    fn present(&mut self, frame: &Frame) -> AnyResult<()> {
        write!(self.output, "\n{frame}")?;
        self.output.flush()?;
        Ok(())
    }

    fn announce(&mut self, lines: &[String]) -> AnyResult<()> {
        for line in lines {
            writeln!(self.output, "{line}")?;
        }
        Ok(())
    }

    fn read_intent(&mut self) -> AnyResult<PlayerIntent> {
        write!(self.output, "\n{MOVE_PROMPT}")?;
        self.output.flush()?;

        let mut line = String::new();
        let read = self.input.read_line(&mut line)?;
        if read == 0 {
            // End of input plays like a quit.
            return Ok(PlayerIntent::Quit);
        }
        Ok(parse_intent(&line))
    }

    fn pause(&mut self) -> AnyResult<()> {
        write!(self.output, "\n{CONTINUE_PROMPT}")?;
        self.output.flush()?;

        let mut line = String::new();
        let _ = self.input.read_line(&mut line)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_raider_core::{Direction, WELCOME_BANNER};
    use std::collections::VecDeque;

    struct ScriptedBackend {
        intents: VecDeque<PlayerIntent>,
        frames: Vec<String>,
        lines: Vec<String>,
        pauses: usize,
    }

    impl ScriptedBackend {
        fn new(intents: Vec<PlayerIntent>) -> Self {
            Self {
                intents: VecDeque::from(intents),
                frames: Vec::new(),
                lines: Vec::new(),
                pauses: 0,
            }
        }
    }

    impl TextBackend for ScriptedBackend {
        fn present(&mut self, frame: &Frame) -> AnyResult<()> {
            self.frames.push(frame.to_string());
            Ok(())
        }

        fn announce(&mut self, lines: &[String]) -> AnyResult<()> {
            self.lines.extend_from_slice(lines);
            Ok(())
        }

        fn read_intent(&mut self) -> AnyResult<PlayerIntent> {
            Ok(self.intents.pop_front().unwrap_or(PlayerIntent::Quit))
        }

        fn pause(&mut self) -> AnyResult<()> {
            self.pauses += 1;
            Ok(())
        }
    }

    #[test]
    fn parses_the_seed_flag() {
        let args = Args::try_parse_from(["maze-raider", "--seed", "7"]).expect("valid flags");
        assert_eq!(args.seed, Some(7));

        let bare = Args::try_parse_from(["maze-raider"]).expect("flags are optional");
        assert_eq!(bare.seed, None);
    }

    #[test]
    fn quitting_immediately_says_goodbye() {
        let mut backend = ScriptedBackend::new(Vec::new());

        run(Args { seed: Some(9) }, &mut backend).expect("clean shutdown");

        assert_eq!(backend.frames.len(), 1, "one frame before the quit");
        assert_eq!(backend.lines.first().map(String::as_str), Some(WELCOME_BANNER));
        assert!(backend.lines.contains(&game_header(1)));
        assert_eq!(backend.lines.last(), Some(&farewell(0)));
        assert_eq!(backend.pauses, 1, "only the opening pause runs");
    }

    #[test]
    fn restarting_reopens_the_first_game() {
        let mut backend = ScriptedBackend::new(vec![PlayerIntent::Restart]);

        run(Args { seed: Some(11) }, &mut backend).expect("clean shutdown");

        assert_eq!(backend.frames.len(), 2);
        assert!(backend.lines.iter().any(|line| line == RESTART_NOTICE));
        let first_game_headers = backend
            .lines
            .iter()
            .filter(|line| **line == game_header(1))
            .count();
        assert_eq!(first_game_headers, 2, "a restart replays game #1");
    }

    #[test]
    fn a_fatal_run_reports_defeat_and_reopens() {
        let intents: Vec<PlayerIntent> = (0..20)
            .map(|_| PlayerIntent::Moves(vec![Direction::Up]))
            .collect();
        let mut backend = ScriptedBackend::new(intents);

        run(Args { seed: Some(13) }, &mut backend).expect("clean shutdown");

        assert!(
            backend
                .lines
                .iter()
                .any(|line| line == "*** DEFEAT! You died on level 1! ***"),
            "twenty border bumps should end the run"
        );
        assert!(
            backend.lines.contains(&game_header(2)),
            "a fresh game should open after the defeat"
        );
        assert_eq!(backend.lines.last(), Some(&farewell(0)));
    }
}
