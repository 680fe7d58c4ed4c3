use anyhow::Context;
use crossterm::{
    ExecutableCommand, cursor,
    terminal::{self, ClearType},
};
use std::io::{BufWriter, Stdout, Write, stdout};

/// Smallest terminal that still fits one picture row plus the HUD.
pub const MIN_COLS: u16 = 4;
pub const MIN_ROWS: u16 = 2;

/// Holds the terminal in raw mode on the alternate screen with the cursor
/// hidden until dropped.
pub struct TerminalSession {
    sync_updates: bool,
}

impl TerminalSession {
    pub fn enter(sync_updates: bool) -> anyhow::Result<Self> {
        terminal::enable_raw_mode().context("enable raw mode")?;
        // Drop must run even if a later step fails.
        let session = Self { sync_updates };

        let mut out = stdout();
        out.execute(terminal::EnterAlternateScreen)
            .context("enter alternate screen")?;
        out.execute(cursor::Hide).context("hide cursor")?;
        out.execute(terminal::Clear(ClearType::All))
            .context("clear screen")?;

        Ok(session)
    }

    pub fn writer(&self) -> BufWriter<Stdout> {
        BufWriter::new(stdout())
    }

    /// Current size in cells, rejected if too small to draw into.
    pub fn size(&self) -> anyhow::Result<(u16, u16)> {
        let size = terminal::size().context("get terminal size")?;
        check_size(size)?;
        Ok(size)
    }
}

pub fn check_size((cols, rows): (u16, u16)) -> anyhow::Result<()> {
    if cols < MIN_COLS || rows < MIN_ROWS {
        anyhow::bail!("terminal too small (need at least {MIN_COLS}x{MIN_ROWS}, got {cols}x{rows})");
    }
    Ok(())
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let mut out = stdout();
        if self.sync_updates {
            let _ = out.write_all(b"\x1b[?2026l");
        }
        let _ = out.write_all(b"\x1b[?7h\x1b[0m");
        let _ = out.flush();
        let _ = out.execute(cursor::Show);
        let _ = out.execute(terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}
