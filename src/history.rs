//! Bounded translation history kept as one JSON array file.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::error::{Error, Result};
use crate::lang::Lang;

pub const HISTORY_FILE: &str = "translation_history.json";
pub const HISTORY_LIMIT: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub timestamp: String,
    pub query: String,
    pub from_lang: String,
    pub to_lang: String,
    pub result: String,
}

impl HistoryEntry {
    pub fn new(query: impl Into<String>, from: Lang, to: Lang, result: impl Into<String>) -> Self {
        let now = OffsetDateTime::now_utc();
        Self {
            timestamp: now.format(&Rfc3339).unwrap_or_else(|_| now.unix_timestamp().to_string()),
            query: query.into(),
            from_lang: from.code().to_string(),
            to_lang: to.code().to_string(),
            result: result.into(),
        }
    }
}

pub struct HistoryLog {
    path: PathBuf,
    // serializes load-push-write within this process
    write_lock: Mutex<()>,
}

impl HistoryLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(HISTORY_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Oldest first. Never fails: unreadable files are logged and read as empty.
    pub fn load_all(&self) -> Vec<HistoryEntry> {
        if !self.path.exists() {
            return Vec::new();
        }
        let contents = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) => {
                tracing::warn!("Failed to read history {}: {}", self.path.display(), e);
                return Vec::new();
            }
        };
        match serde_json::from_str(&contents) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("Failed to parse history {}: {}", self.path.display(), e);
                Vec::new()
            }
        }
    }

    /// Last `n` entries, newest last.
    pub fn recent(&self, n: usize) -> Vec<HistoryEntry> {
        let mut entries = self.load_all();
        let skip = entries.len().saturating_sub(n);
        entries.drain(..skip);
        entries
    }

    pub fn append(&self, entry: HistoryEntry) -> Result<()> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| Error::PersistenceFailure("history lock poisoned".into()))?;

        let mut entries = self.load_all();
        entries.push(entry);
        let overflow = entries.len().saturating_sub(HISTORY_LIMIT);
        entries.drain(..overflow);

        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }
        let s = serde_json::to_string_pretty(&entries)?;
        fs::write(&self.path, s)?;
        tracing::debug!("History now holds {} entries", entries.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(i: usize) -> HistoryEntry {
        HistoryEntry {
            timestamp: format!("2024-05-01T10:{:02}:{:02}Z", i / 60, i % 60),
            query: format!("query {i}"),
            from_lang: "en".into(),
            to_lang: "zh".into(),
            result: format!("结果 {i}"),
        }
    }

    #[test]
    fn keeps_most_recent_fifty() {
        let dir = tempfile::tempdir().unwrap();
        let log = HistoryLog::in_dir(dir.path());
        for i in 1..=55 {
            log.append(entry(i)).unwrap();
        }
        let all = log.load_all();
        assert_eq!(all.len(), HISTORY_LIMIT);
        assert_eq!(all.first().unwrap(), &entry(6));
        assert_eq!(all.last().unwrap(), &entry(55));
        for (pos, e) in all.iter().enumerate() {
            assert_eq!(e, &entry(pos + 6));
        }
    }

    #[test]
    fn reload_ends_with_appended_entry() {
        let dir = tempfile::tempdir().unwrap();
        let log = HistoryLog::in_dir(dir.path());
        log.append(entry(1)).unwrap();
        log.append(entry(2)).unwrap();
        assert_eq!(log.load_all().last(), Some(&entry(2)));
    }

    #[test]
    fn missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let log = HistoryLog::in_dir(dir.path());
        assert!(log.load_all().is_empty());
    }

    #[test]
    fn corrupt_file_is_empty_and_gets_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let log = HistoryLog::in_dir(dir.path());
        fs::write(log.path(), "{ not json").unwrap();
        assert!(log.load_all().is_empty());

        log.append(entry(1)).unwrap();
        assert_eq!(log.load_all(), vec![entry(1)]);
    }

    #[test]
    fn file_is_pretty_and_unescaped() {
        let dir = tempfile::tempdir().unwrap();
        let log = HistoryLog::in_dir(dir.path());
        log.append(entry(3)).unwrap();
        let raw = fs::read_to_string(log.path()).unwrap();
        assert!(raw.starts_with("[\n"));
        assert!(raw.contains("结果 3"));
        assert!(!raw.contains("\\u"));
    }

    #[test]
    fn creates_missing_parent_dir() {
        let dir = tempfile::tempdir().unwrap();
        let log = HistoryLog::in_dir(&dir.path().join("nested").join("data"));
        log.append(entry(1)).unwrap();
        assert_eq!(log.load_all().len(), 1);
    }

    #[test]
    fn concurrent_appends_stay_bounded() {
        let dir = tempfile::tempdir().unwrap();
        let log = std::sync::Arc::new(HistoryLog::in_dir(dir.path()));
        let handles: Vec<_> = (0..4)
            .map(|t| {
                let log = log.clone();
                std::thread::spawn(move || {
                    for i in 0..20 {
                        log.append(entry(t * 100 + i)).unwrap();
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        let raw = fs::read_to_string(log.path()).unwrap();
        let all: Vec<HistoryEntry> = serde_json::from_str(&raw).unwrap();
        assert_eq!(all.len(), HISTORY_LIMIT);
        // per thread, surviving entries keep their append order
        let ids: Vec<usize> = all
            .iter()
            .map(|e| e.query.trim_start_matches("query ").parse().unwrap())
            .collect();
        for t in 0..4 {
            let mine: Vec<usize> = ids.iter().copied().filter(|id| id / 100 == t).collect();
            assert!(mine.windows(2).all(|w| w[0] < w[1]), "thread {t}: {mine:?}");
        }
        let mut unique = ids.clone();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), HISTORY_LIMIT);
    }

    #[test]
    fn recent_returns_tail() {
        let dir = tempfile::tempdir().unwrap();
        let log = HistoryLog::in_dir(dir.path());
        for i in 1..=5 {
            log.append(entry(i)).unwrap();
        }
        assert_eq!(log.recent(2), vec![entry(4), entry(5)]);
        assert_eq!(log.recent(10).len(), 5);
        assert!(log.recent(0).is_empty());
    }

    #[test]
    fn new_entry_is_stamped() {
        let e = HistoryEntry::new("hello", Lang::Auto, Lang::ZhTw, "你好");
        assert_eq!(e.from_lang, "auto");
        assert_eq!(e.to_lang, "zh-TW");
        assert!(OffsetDateTime::parse(&e.timestamp, &Rfc3339).is_ok());
    }
}
