//! Bounded, newest-first history of print actions.

use crate::errors::AppResult;
use crate::models::history::{HistoryEntry, NewHistoryEntry};
use crate::ui::messages::warning;
use crate::utils::date::history_timestamp;
use chrono::{DateTime, Duration, Utc};
use clap::ValueEnum;
use std::fs;
use std::path::PathBuf;

/// Entries older than this are dropped on every append.
pub const RETENTION_DAYS: i64 = 60;

/// Storage backend for the history log.
pub trait HistoryRepository {
    fn load(&self) -> AppResult<Vec<HistoryEntry>>;
    fn save(&mut self, entries: &[HistoryEntry]) -> AppResult<()>;
}

/// History persisted as a single JSON array file, rewritten on each save.
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl HistoryRepository for JsonFileRepository {
    fn load(&self) -> AppResult<Vec<HistoryEntry>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        // malformed records are dropped, not fatal
        let records: Vec<serde_json::Value> = serde_json::from_str(&content)?;
        let total = records.len();
        let entries: Vec<HistoryEntry> = records
            .into_iter()
            .filter_map(|r| serde_json::from_value(r).ok())
            .collect();

        let dropped = total - entries.len();
        if dropped > 0 {
            warning(format!("Ignored {} unreadable history record(s)", dropped));
        }
        Ok(entries)
    }

    fn save(&mut self, entries: &[HistoryEntry]) -> AppResult<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string(entries)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

/// In-memory backend (embedding and tests).
#[derive(Debug, Default)]
pub struct MemoryRepository {
    pub saved: Vec<HistoryEntry>,
    pub saves: usize,
}

impl HistoryRepository for MemoryRepository {
    fn load(&self) -> AppResult<Vec<HistoryEntry>> {
        Ok(self.saved.clone())
    }

    fn save(&mut self, entries: &[HistoryEntry]) -> AppResult<()> {
        self.saved = entries.to_vec();
        self.saves += 1;
        Ok(())
    }
}

/// Which field a history search looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SearchField {
    #[default]
    All,
    Matricula,
    Coddv,
    Descricao,
    Data,
}

/// Owns the loaded log and writes it back through the repository.
pub struct HistoryStore<R: HistoryRepository> {
    repo: R,
    entries: Vec<HistoryEntry>,
}

impl<R: HistoryRepository> HistoryStore<R> {
    /// Read the persisted log once.
    pub fn open(repo: R) -> AppResult<Self> {
        let entries = repo.load()?;
        Ok(Self { repo, entries })
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Insert at the front with `id = now` (ms), prune by age, persist the whole log.
    pub fn append(&mut self, entry: NewHistoryEntry, now: DateTime<Utc>) -> AppResult<HistoryEntry> {
        let newest_id = self.entries.iter().map(|e| e.id).max().unwrap_or(0);
        let id = now.timestamp_millis().max(newest_id + 1);

        let entry = entry.with_id(id);
        self.entries.insert(0, entry.clone());
        prune(&mut self.entries, now);
        self.repo.save(&self.entries)?;

        Ok(entry)
    }
}

/// Keep only entries with `timestamp > now - 60 days`.
pub fn prune(entries: &mut Vec<HistoryEntry>, now: DateTime<Utc>) {
    let limit = now - Duration::days(RETENTION_DAYS);
    entries.retain(|e| e.timestamp > limit);
}

fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

/// Case-insensitive substring search; an empty term matches everything.
pub fn filter(entries: &[HistoryEntry], term: &str, field: SearchField) -> Vec<HistoryEntry> {
    let term = term.to_lowercase();
    if term.is_empty() {
        return entries.to_vec();
    }

    entries
        .iter()
        .filter(|e| {
            let date = || history_timestamp(e.timestamp).to_lowercase();
            match field {
                SearchField::All => {
                    contains_ci(&e.desc, &term)
                        || contains_ci(&e.coddv, &term)
                        || contains_ci(&e.matricula, &term)
                        || date().contains(&term)
                }
                SearchField::Matricula => contains_ci(&e.matricula, &term),
                SearchField::Coddv => contains_ci(&e.coddv, &term),
                SearchField::Descricao => contains_ci(&e.desc, &term),
                SearchField::Data => date().contains(&term),
            }
        })
        .cloned()
        .collect()
}
