//! SQLite-backed lexicon with an LRU cache of recent result sets

use lru::LruCache;
use rusqlite::{Connection, Row};
use shabda_lib::{DictionaryEntry, FilterTag};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use crate::error::LexiconError;

/// Maximum entries returned for one lookup
pub const MAX_RESULTS: usize = 50;

type CacheKey = (String, Option<FilterTag>);

pub struct Lexicon {
    db_path: PathBuf,
    cache: Mutex<LruCache<CacheKey, Arc<Vec<DictionaryEntry>>>>,
}

const ENTRY_COLUMNS: &str = "id, headword, gender, definition, reference, meaning";

fn row_to_entry(row: &Row) -> rusqlite::Result<DictionaryEntry> {
    Ok(DictionaryEntry {
        id: row.get(0)?,
        headword: row.get(1)?,
        gender: row.get(2)?,
        definition: row.get(3)?,
        reference: row.get(4)?,
        meaning: row.get(5)?,
    })
}

/// Escape LIKE wildcards in user input (used with `ESCAPE '\'`)
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn where_clause(filter: Option<FilterTag>) -> &'static str {
    match filter {
        Some(FilterTag::Headword) => r"headword LIKE ?1 || '%' ESCAPE '\'",
        Some(FilterTag::Definition) => r"definition LIKE '%' || ?1 || '%' ESCAPE '\'",
        Some(FilterTag::Reference) => r"reference LIKE '%' || ?1 || '%' ESCAPE '\'",
        None => {
            r"headword LIKE ?1 || '%' ESCAPE '\'
              OR definition LIKE '%' || ?1 || '%' ESCAPE '\'
              OR meaning LIKE '%' || ?1 || '%' ESCAPE '\'"
        }
    }
}

impl Lexicon {
    /// Open the lexicon database, creating the schema if missing
    pub fn open(db_path: impl AsRef<Path>, cache_capacity: usize) -> Result<Self, LexiconError> {
        let db_path = db_path.as_ref().to_path_buf();
        let conn = Connection::open(&db_path)?;
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS entries (
                id TEXT PRIMARY KEY,
                headword TEXT NOT NULL,
                gender TEXT,
                definition TEXT,
                reference TEXT,
                meaning TEXT
            );

            CREATE INDEX IF NOT EXISTS idx_entries_headword ON entries(headword);
            "#,
        )?;

        let capacity = NonZeroUsize::new(cache_capacity).unwrap_or(NonZeroUsize::MIN);
        Ok(Self {
            db_path,
            cache: Mutex::new(LruCache::new(capacity)),
        })
    }

    fn connection(&self) -> Result<Connection, LexiconError> {
        Ok(Connection::open(&self.db_path)?)
    }

    pub fn count(&self) -> Result<u64, LexiconError> {
        let conn = self.connection()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM entries", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    pub fn lookup(
        &self,
        term: &str,
        filter: Option<FilterTag>,
    ) -> Result<Arc<Vec<DictionaryEntry>>, LexiconError> {
        let key = (term.to_string(), filter);
        {
            let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
            if let Some(entries) = cache.get(&key) {
                return Ok(Arc::clone(entries));
            }
        }

        let entries = Arc::new(self.query(term, filter)?);
        {
            let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
            cache.put(key, Arc::clone(&entries));
        }
        Ok(entries)
    }

    fn query(&self, term: &str, filter: Option<FilterTag>) -> Result<Vec<DictionaryEntry>, LexiconError> {
        let conn = self.connection()?;
        let sql = format!(
            "SELECT {} FROM entries WHERE {} ORDER BY headword ASC, id ASC LIMIT {}",
            ENTRY_COLUMNS,
            where_clause(filter),
            MAX_RESULTS
        );

        let mut stmt = conn.prepare(&sql)?;
        let entries = stmt
            .query_map([escape_like(term)], row_to_entry)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(entries)
    }

    /// Insert or replace entries. Clears the result cache.
    pub fn upsert(&self, entries: &[DictionaryEntry]) -> Result<usize, LexiconError> {
        let mut conn = self.connection()?;
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT OR REPLACE INTO entries (id, headword, gender, definition, reference, meaning)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )?;
            for entry in entries {
                stmt.execute(rusqlite::params![
                    entry.id,
                    entry.headword,
                    entry.gender,
                    entry.definition,
                    entry.reference,
                    entry.meaning
                ])?;
            }
        }
        tx.commit()?;

        self.clear_cache();
        Ok(entries.len())
    }

    /// Load a JSON array of entries from disk
    pub fn import_json(&self, path: &Path) -> Result<usize, LexiconError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| LexiconError::Import(format!("{:?}: {}", path, e)))?;
        let mut entries: Vec<DictionaryEntry> =
            serde_json::from_str(&raw).map_err(|e| LexiconError::Import(e.to_string()))?;

        for (idx, entry) in entries.iter_mut().enumerate() {
            if entry.id.is_empty() {
                entry.id = format!("{}-{}", entry.headword, idx);
            }
        }

        self.upsert(&entries)
    }

    pub fn clear_cache(&self) {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }

    pub fn cache_stats(&self) -> (usize, usize) {
        let cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        (cache.len(), cache.cap().get())
    }
}
