use std::fs::File;
use std::io::{BufReader, ErrorKind};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Instant;

use parking_lot::{Mutex, RwLock};

use crate::logger::Logger;
use crate::matcher::{NameMatcher, NameSet};
use crate::parser::parse_reader;
use crate::types::FileStamp;

/// Outcome of a single [`SourceItem::refresh`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// File does not exist; previous names kept
    Missing,
    /// File could not be opened; previous names kept
    Failed,
    /// Modification time and size unchanged; parsing skipped
    Unchanged,
    /// File parsed and its names swapped in
    Reloaded {
        names: usize,
        lines: u64,
        warnings: u64,
    },
}

#[derive(Debug, Default)]
struct ItemState {
    names: NameSet,
    /// `None` until the first successful stat
    stamp: Option<FileStamp>,
}

/// One name list file and the names most recently parsed from it
#[derive(Debug)]
pub struct SourceItem {
    path: PathBuf,
    state: RwLock<ItemState>,
    /// Serializes refreshes; lookups only take `state`
    refresh_guard: Mutex<()>,
    parse_count: AtomicU64,
    missing_reported: AtomicBool,
}

impl SourceItem {
    /// Create an empty item; names are loaded by [`SourceItem::refresh`]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            state: RwLock::new(ItemState::default()),
            refresh_guard: Mutex::new(()),
            parse_count: AtomicU64::new(0),
            missing_reported: AtomicBool::new(false),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Re-parse the file if its modification time or size changed.
    ///
    /// Parsing happens without holding the lock; the write lock is taken only
    /// to swap in the new names. Errors are logged and leave the previous
    /// names in place. Concurrent refreshes of one item run one at a time, so
    /// an older parse never overwrites a newer one.
    pub fn refresh(&self, logger: &Logger) -> RefreshOutcome {
        let _guard = self.refresh_guard.lock();

        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                // Already reported at setup, so only mention it once here
                if !self.missing_reported.swap(true, Ordering::Relaxed) {
                    logger.debug(format_args!("{}: {}", self.path.display(), e));
                }
                return RefreshOutcome::Missing;
            }
            Err(e) => {
                logger.warn(format_args!("{}: {}", self.path.display(), e));
                return RefreshOutcome::Failed;
            }
        };
        self.missing_reported.store(false, Ordering::Relaxed);

        let stamp = match file.metadata() {
            Ok(meta) => {
                let stamp = FileStamp::from(&meta);
                if self.state.read().stamp == Some(stamp) {
                    return RefreshOutcome::Unchanged;
                }
                Some(stamp)
            }
            Err(e) => {
                // Parse anyway; without a stamp the next refresh parses again
                logger.warn(format_args!("{}: {}", self.path.display(), e));
                None
            }
        };

        let started = Instant::now();
        self.parse_count.fetch_add(1, Ordering::Relaxed);
        let parsed = parse_reader(
            BufReader::new(file),
            &self.path.display().to_string(),
            logger,
        );
        let outcome = RefreshOutcome::Reloaded {
            names: parsed.names.len(),
            lines: parsed.total_lines,
            warnings: parsed.warnings,
        };
        logger.debug(format_args!(
            "Parsed {}  time spent: {:?} name added: {} / {}",
            self.path.display(),
            started.elapsed(),
            parsed.names.len(),
            parsed.total_lines
        ));

        let stale = {
            let mut state = self.state.write();
            state.stamp = stamp;
            std::mem::replace(&mut state.names, parsed.names)
        };
        // Large sets are freed after the lock is released
        drop(stale);

        outcome
    }

    /// Check `name` against the current names under the read lock.
    ///
    /// Assumes `name` is canonical; panics if it is empty.
    pub fn matches(&self, name: &str) -> bool {
        self.state.read().names.matches(name)
    }

    /// Number of names currently loaded
    pub fn len(&self) -> usize {
        self.state.read().names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.read().names.is_empty()
    }

    /// Stamp recorded by the last parse, if any
    pub fn stamp(&self) -> Option<FileStamp> {
        self.state.read().stamp
    }

    /// How many times the file has been parsed
    pub fn parse_count(&self) -> u64 {
        self.parse_count.load(Ordering::Relaxed)
    }

    /// Run `f` against the current names under the read lock
    pub fn with_names<R>(&self, f: impl FnOnce(&NameSet) -> R) -> R {
        f(&self.state.read().names)
    }
}

impl NameMatcher for SourceItem {
    fn matches(&self, name: &str) -> bool {
        SourceItem::matches(self, name)
    }
}
