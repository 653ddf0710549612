//! Line-oriented terminal loop.
//!
//! The terminal is a collaborator of the engine: it turns typed commands
//! into engine calls and prints whatever the engine reports back.

use anyhow::Result;
use std::io::{BufRead, Write};
use strictly_grid::{BoardSize, Coord, Direction, GameEngine, Mark, MoveOutcome, Rejection};
use tracing::{debug, instrument};

const HELP: &str = "\
Setup:  + / -  change board size, start  begin a session
Game:   <row> <col>  place a mark (1-based)
        h j k l  move the cursor, x  place at the cursor
        new  next round, back  return to setup
Always: help, quit";

/// A parsed line of user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// Place at a 0-indexed coordinate.
    Place(Coord),
    /// Move the cursor.
    Cursor(Direction),
    /// Place at the cursor.
    PlaceAtCursor,
    /// Grow the board (setup only).
    Grow,
    /// Shrink the board (setup only).
    Shrink,
    /// Start a session (setup only).
    Start,
    /// Start another round.
    NewRound,
    /// Return to setup.
    Back,
    /// Print the command list.
    Help,
    /// Leave the program.
    Quit,
}

impl Input {
    /// Parses one line; `None` if it is not a command.
    ///
    /// Coordinates are typed 1-based and stored 0-based.
    #[instrument]
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim().to_lowercase();
        let input = match line.as_str() {
            "h" => Input::Cursor(Direction::Left),
            "j" => Input::Cursor(Direction::Down),
            "k" => Input::Cursor(Direction::Up),
            "l" => Input::Cursor(Direction::Right),
            "x" => Input::PlaceAtCursor,
            "+" => Input::Grow,
            "-" => Input::Shrink,
            "start" => Input::Start,
            "new" => Input::NewRound,
            "back" => Input::Back,
            "help" | "?" => Input::Help,
            "quit" | "q" => Input::Quit,
            other => {
                let mut parts = other.split_whitespace();
                let row = parts.next()?.parse::<usize>().ok()?.checked_sub(1)?;
                let col = parts.next()?.parse::<usize>().ok()?.checked_sub(1)?;
                if parts.next().is_some() {
                    return None;
                }
                Input::Place(Coord::new(row, col))
            }
        };
        Some(input)
    }
}

/// Formats a coordinate the way the user types it.
fn one_based(coord: Coord) -> String {
    format!("({}, {})", coord.row + 1, coord.col + 1)
}

/// Rejection text with 1-based coordinates.
fn describe(rejection: &Rejection) -> String {
    match rejection {
        Rejection::RoundOver => rejection.to_string(),
        Rejection::OutOfBounds(coord) => format!("{} is off the board", one_based(*coord)),
        Rejection::Occupied(coord) => format!("{} is already occupied", one_based(*coord)),
    }
}

/// Terminal front-end over any reader and writer.
pub struct Terminal<R, W> {
    engine: GameEngine,
    /// Size picked on the setup screen.
    pending_size: BoardSize,
    cursor: Coord,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    /// Creates a terminal in the setup screen.
    pub fn new(engine: GameEngine, input: R, output: W) -> Self {
        let pending_size = engine.config().board_size;
        Self {
            engine,
            pending_size,
            cursor: Coord::new(0, 0),
            input,
            output,
        }
    }

    /// Reads commands until `quit` or end of input.
    pub fn run(mut self) -> Result<()> {
        self.render_setup()?;
        let mut line = String::new();
        loop {
            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(());
            }
            match Input::parse(&line) {
                Some(Input::Quit) => return Ok(()),
                Some(input) => self.handle(input)?,
                None => writeln!(self.output, "Unrecognized input; type 'help'")?,
            }
        }
    }

    #[instrument(skip(self))]
    fn handle(&mut self, input: Input) -> Result<()> {
        let in_setup = self.engine.round().is_none();
        match (input, in_setup) {
            (Input::Help, _) => writeln!(self.output, "{}", HELP)?,
            (Input::Grow, true) => {
                self.pending_size = self.pending_size.increment();
                self.render_setup()?;
            }
            (Input::Shrink, true) => {
                self.pending_size = self.pending_size.decrement();
                self.render_setup()?;
            }
            (Input::Start, true) => {
                self.engine.configure(self.pending_size.get())?;
                self.engine.start_session();
                self.cursor = Coord::new(0, 0);
                self.render_round()?;
            }
            (Input::Place(coord), false) => self.place(coord)?,
            (Input::PlaceAtCursor, false) => self.place(self.cursor)?,
            (Input::Cursor(direction), false) => {
                let size = self.engine.config().board_size;
                if let Some(next) = self.cursor.step(direction, size) {
                    self.cursor = next;
                }
                self.render_round()?;
            }
            (Input::NewRound, false) => {
                self.engine.start_round();
                self.cursor = Coord::new(0, 0);
                self.render_round()?;
            }
            (Input::Back, false) => {
                self.engine.back_to_configuration();
                self.pending_size = self.engine.config().board_size;
                self.render_setup()?;
            }
            (other, _) => {
                debug!(?other, in_setup, "Command not available here");
                writeln!(self.output, "Not available right now; type 'help'")?;
            }
        }
        Ok(())
    }

    fn place(&mut self, coord: Coord) -> Result<()> {
        let outcome = self.engine.apply_move(coord.row, coord.col)?;
        match &outcome {
            MoveOutcome::Rejected(rejection) => {
                writeln!(self.output, "Move ignored: {}", describe(rejection))?
            }
            MoveOutcome::Win { line, .. } => {
                self.render_round()?;
                let cells = line
                    .cells()
                    .iter()
                    .map(|c| one_based(*c))
                    .collect::<Vec<_>>()
                    .join(" ");
                writeln!(self.output, "{} Well played! Line: {}", outcome, cells)?;
                writeln!(self.output, "Type 'new' for another round.")?;
            }
            MoveOutcome::Draw => {
                self.render_round()?;
                writeln!(self.output, "{} No one wins this round.", outcome)?;
                writeln!(self.output, "Type 'new' for another round.")?;
            }
            MoveOutcome::Continue { .. } => self.render_round()?,
        }
        Ok(())
    }

    fn render_setup(&mut self) -> Result<()> {
        writeln!(
            self.output,
            "Board size: {} (+/- to change, 'start' to play)",
            self.pending_size
        )?;
        Ok(())
    }

    fn render_round(&mut self) -> Result<()> {
        let Some(round) = self.engine.round() else {
            return Ok(());
        };
        let scores = self.engine.scores();
        writeln!(self.output, "{}", round.board())?;
        writeln!(
            self.output,
            "Cursor: row {}, column {}",
            self.cursor.row + 1,
            self.cursor.col + 1
        )?;
        writeln!(
            self.output,
            "Player X: {}  Player O: {}",
            scores.wins(Mark::X),
            scores.wins(Mark::O)
        )?;
        if round.is_active() {
            writeln!(self.output, "Turn: Player {}", round.current_player())?;
        }
        Ok(())
    }
}
