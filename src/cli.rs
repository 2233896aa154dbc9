use std::io::{self, Write};

use crossterm::event::{read, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::terminal;

use crate::engine::board::Board;
use crate::engine::game::{Direction, Game};
use crate::error::Result;

/// Runs the interactive loop, restoring the terminal even when the loop
/// errors out.
pub(crate) fn run(game: &mut Game) -> Result<()> {
    terminal::enable_raw_mode()?;
    let result = event_loop(game);
    terminal::disable_raw_mode()?;
    result
}

fn event_loop(game: &mut Game) -> Result<()> {
    draw(game.current())?;
    loop {
        if game.has_ended() {
            let mut out = io::stdout().lock();
            write!(out, "Game has ended!\r\n")?;
            if game.has_succeeded() {
                write!(out, "You won!\r\n")?;
            }
            if game.has_failed() {
                write!(out, "You lost! Try again next time!\r\n")?;
            }
            out.flush()?;
            return Ok(());
        }

        let direction = match read()? {
            Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press,
                ..
            }) => match code {
                KeyCode::Left => Direction::Left,
                KeyCode::Right => Direction::Right,
                KeyCode::Up => Direction::Up,
                KeyCode::Down => Direction::Down,
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                _ => continue,
            },
            _ => continue,
        };

        game.swipe(direction)?;
        log::debug!("swiped {}", direction);
        draw(game.current())?;
    }
}

fn draw(board: &Board) -> Result<()> {
    let ruler = format!(" {} ", "-".repeat(29));
    let mut out = io::stdout().lock();
    write!(out, "\r\n{}\r\n", ruler)?;
    for row in board.rows() {
        let cells = row
            .iter()
            .map(|tile| format!("{:>4}", tile.to_string()))
            .collect::<Vec<String>>()
            .join(" | ");
        write!(out, " | {} | \r\n", cells)?;
    }
    write!(out, "{}\r\n", ruler)?;
    out.flush()?;
    Ok(())
}
