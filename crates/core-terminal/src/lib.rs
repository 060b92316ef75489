//! Terminal backend abstraction and crossterm implementation.
//!
//! Entering puts the terminal in raw mode on the alternate screen; leaving
//! restores it. `TerminalGuard` ties leaving to scope exit so early returns
//! and error propagation never strand the user in raw mode. The binary's panic
//! hook calls `restore` directly so the panic message lands on the normal
//! screen.

use anyhow::{Context, Result};
use crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{
        self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
        disable_raw_mode, enable_raw_mode,
    },
};
use std::io::stdout;

pub trait TerminalBackend {
    fn enter(&mut self) -> Result<()>;
    fn leave(&mut self) -> Result<()>;
    fn set_title(&mut self, title: &str) -> Result<()>;
    /// Current (columns, rows).
    fn size(&self) -> Result<(u16, u16)>;
}

#[derive(Debug, Default)]
pub struct CrosstermBackend {
    entered: bool,
}

impl CrosstermBackend {
    pub fn new() -> Self {
        Self { entered: false }
    }
}

/// RAII guard leaving the terminal on drop.
pub struct TerminalGuard<'a, B: TerminalBackend> {
    backend: &'a mut B,
}

impl<'a, B: TerminalBackend> TerminalGuard<'a, B> {
    /// Enter `backend` and return a guard that leaves it on drop.
    pub fn enter(backend: &'a mut B) -> Result<Self> {
        backend.enter()?;
        Ok(Self { backend })
    }

    pub fn backend(&mut self) -> &mut B {
        self.backend
    }
}

impl<B: TerminalBackend> Drop for TerminalGuard<'_, B> {
    fn drop(&mut self) {
        if let Err(e) = self.backend.leave() {
            tracing::error!(target: "runtime.shutdown", error = %e, "terminal_restore_failed");
        }
    }
}

impl TerminalBackend for CrosstermBackend {
    fn enter(&mut self) -> Result<()> {
        if !self.entered {
            enable_raw_mode().context("enabling raw mode")?;
            execute!(stdout(), EnterAlternateScreen, Clear(ClearType::All), Hide)?;
            self.entered = true;
        }
        Ok(())
    }

    fn leave(&mut self) -> Result<()> {
        if self.entered {
            execute!(stdout(), LeaveAlternateScreen, Show)?;
            disable_raw_mode().context("disabling raw mode")?;
            self.entered = false;
        }
        Ok(())
    }

    fn set_title(&mut self, title: &str) -> Result<()> {
        execute!(stdout(), SetTitle(title))?;
        Ok(())
    }

    fn size(&self) -> Result<(u16, u16)> {
        terminal::size().context("querying terminal size")
    }
}

impl Drop for CrosstermBackend {
    fn drop(&mut self) {
        let _ = self.leave();
    }
}

/// Best-effort restore without a backend handle (panic path).
pub fn restore() {
    let _ = execute!(stdout(), LeaveAlternateScreen, Show);
    let _ = disable_raw_mode();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct MockBackend {
        log: Vec<&'static str>,
        fail_leave: bool,
    }

    impl TerminalBackend for MockBackend {
        fn enter(&mut self) -> Result<()> {
            self.log.push("enter");
            Ok(())
        }
        fn leave(&mut self) -> Result<()> {
            self.log.push("leave");
            if self.fail_leave {
                anyhow::bail!("leave failed");
            }
            Ok(())
        }
        fn set_title(&mut self, _title: &str) -> Result<()> {
            self.log.push("title");
            Ok(())
        }
        fn size(&self) -> Result<(u16, u16)> {
            Ok((80, 24))
        }
    }

    #[test]
    fn guard_leaves_on_drop() {
        let mut backend = MockBackend::default();
        {
            let mut guard = TerminalGuard::enter(&mut backend).unwrap();
            guard.backend().set_title("t").unwrap();
            assert_eq!(guard.backend().size().unwrap(), (80, 24));
        }
        assert_eq!(backend.log, vec!["enter", "title", "leave"]);
    }

    #[test]
    fn guard_leaves_on_early_error_return() {
        fn run(backend: &mut MockBackend) -> Result<()> {
            let _guard = TerminalGuard::enter(backend)?;
            anyhow::bail!("boom")
        }
        let mut backend = MockBackend::default();
        assert!(run(&mut backend).is_err());
        assert_eq!(backend.log, vec!["enter", "leave"]);
    }

    #[test]
    fn failed_leave_does_not_panic_in_drop() {
        let mut backend = MockBackend {
            fail_leave: true,
            ..Default::default()
        };
        drop(TerminalGuard::enter(&mut backend).unwrap());
        assert_eq!(backend.log.last(), Some(&"leave"));
    }
}
