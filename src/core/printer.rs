//! Print trigger and label counter seams.

use crate::db::counter;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::info;
use std::path::Path;
use std::process::Command;

/// Sends a rendered label page to the printer. Returns only once the
/// operating-system print interaction has finished.
pub trait PrintTrigger {
    fn print(&mut self, page: &Path) -> AppResult<()>;
}

/// Runs an external command (e.g. `lp -d zebra`) with the page path appended
/// and waits for it to exit.
pub struct CommandPrinter {
    command: String,
}

impl CommandPrinter {
    pub fn new(command: &str) -> Self {
        Self {
            command: command.to_string(),
        }
    }
}

impl PrintTrigger for CommandPrinter {
    fn print(&mut self, page: &Path) -> AppResult<()> {
        let mut parts = self.command.split_whitespace();
        let program = parts
            .next()
            .ok_or_else(|| AppError::Print("empty print command".into()))?;

        let status = Command::new(program)
            .args(parts)
            .arg(page)
            .status()
            .map_err(|e| AppError::Print(format!("cannot run '{}': {}", program, e)))?;

        if !status.success() {
            return Err(AppError::Print(format!(
                "'{}' exited with {}",
                self.command, status
            )));
        }
        Ok(())
    }
}

/// No printer configured: the page is only saved.
pub struct PreviewOnly;

impl PrintTrigger for PreviewOnly {
    fn print(&mut self, page: &Path) -> AppResult<()> {
        info(format!("Label page saved to {}", page.display()));
        Ok(())
    }
}

/// Tallies printed labels per category.
pub trait LabelCounter {
    /// Add `amount` and return the new total.
    fn increment(&mut self, amount: usize, category: &str) -> AppResult<i64>;
}

/// Counter kept in the local SQLite database.
pub struct SqliteCounter<'a> {
    pool: &'a DbPool,
}

impl<'a> SqliteCounter<'a> {
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }
}

impl LabelCounter for SqliteCounter<'_> {
    fn increment(&mut self, amount: usize, category: &str) -> AppResult<i64> {
        counter::increment(&self.pool.conn, category, amount as i64)
            .map_err(|e| AppError::Counter(e.to_string()))
    }
}
