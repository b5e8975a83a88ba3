//! Crossterm terminal driver.
//!
//! Puts the terminal in raw mode on an alternate screen, turns crossterm
//! events into [`Input`]s and writes [`FrameCell`] diffs. The terminal is
//! restored by [`Terminal::close`] or, failing that, on drop.

use std::io::{self, Write};
use std::time::Duration;

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEventKind},
    execute, queue,
    style::{Color as CtColor, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};

use pathgrid_core::Point;

use crate::render::{FrameCell, Rgb};

/// User input, in screen coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Input {
    Key(char),
    Escape,
    /// Main mouse button pressed.
    Press(Point),
    /// Mouse moved with the main button held.
    Drag(Point),
    Release,
    Resize { width: i32, height: i32 },
}

fn to_ct_color(c: Rgb) -> CtColor {
    CtColor::Rgb {
        r: c.r,
        g: c.g,
        b: c.b,
    }
}

fn to_input(ev: Event) -> Option<Input> {
    match ev {
        Event::Key(KeyEvent { code, kind, .. }) if kind != KeyEventKind::Release => match code {
            KeyCode::Char(c) => Some(Input::Key(c)),
            KeyCode::Esc => Some(Input::Escape),
            _ => None,
        },
        Event::Mouse(me) => {
            let pos = Point::new(me.column as i32, me.row as i32);
            match me.kind {
                MouseEventKind::Down(MouseButton::Left) => Some(Input::Press(pos)),
                MouseEventKind::Drag(MouseButton::Left) => Some(Input::Drag(pos)),
                MouseEventKind::Up(MouseButton::Left) => Some(Input::Release),
                _ => None,
            }
        }
        Event::Resize(w, h) => Some(Input::Resize {
            width: w as i32,
            height: h as i32,
        }),
        _ => None,
    }
}

pub struct Terminal {
    active: bool,
}

impl Terminal {
    pub fn new() -> Self {
        Self { active: false }
    }

    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        self.active = true;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(ClearType::All),
            event::EnableMouseCapture
        )?;
        log::debug!("terminal initialised");
        Ok(())
    }

    /// Current terminal size in columns and rows.
    pub fn size(&self) -> io::Result<(i32, i32)> {
        let (w, h) = terminal::size()?;
        Ok((w as i32, h as i32))
    }

    /// Wait up to `timeout` for input, then drain whatever else is queued.
    pub fn poll(&mut self, timeout: Duration) -> io::Result<Vec<Input>> {
        let mut inputs = Vec::new();
        if !event::poll(timeout)? {
            return Ok(inputs);
        }
        while event::poll(Duration::ZERO)? {
            if let Some(input) = to_input(event::read()?) {
                inputs.push(input);
            }
        }
        Ok(inputs)
    }

    pub fn flush(&mut self, cells: &[FrameCell]) -> io::Result<()> {
        if cells.is_empty() {
            return Ok(());
        }
        let mut stdout = io::stdout().lock();
        let mut last: Option<(Rgb, Rgb)> = None;
        for fc in cells {
            let (x, y) = (fc.pos.x.max(0) as u16, fc.pos.y.max(0) as u16);
            queue!(stdout, cursor::MoveTo(x, y))?;
            let colors = (fc.cell.fg, fc.cell.bg);
            if last != Some(colors) {
                queue!(
                    stdout,
                    SetForegroundColor(to_ct_color(colors.0)),
                    SetBackgroundColor(to_ct_color(colors.1))
                )?;
                last = Some(colors);
            }
            queue!(stdout, Print(fc.cell.ch))?;
        }
        queue!(stdout, ResetColor)?;
        stdout.flush()
    }

    pub fn close(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        let _ = execute!(
            io::stdout(),
            event::DisableMouseCapture,
            ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
        log::debug!("terminal restored");
    }
}

impl Default for Terminal {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        self.close();
    }
}
