use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use super::item::SourceItem;
use super::reload::Reloader;
use crate::config::DEFAULT_RELOAD_INTERVAL;
use crate::error::{NamelistError, Result};
use crate::logger::Logger;
use crate::matcher::NameMatcher;

/// State shared between a list and its reload loop
#[derive(Debug)]
pub(crate) struct Shared {
    pub(crate) items: Vec<SourceItem>,
    pub(crate) logger: Logger,
}

impl Shared {
    /// One reload cycle: refresh every item in order
    pub(crate) fn reload_all(&self) {
        for item in &self.items {
            item.refresh(&self.logger);
        }
    }
}

/// Ordered name list files sharing one reload interval.
///
/// Lookups take each item's read lock in turn, so reloading one file never
/// blocks lookups against another.
///
/// ```no_run
/// use std::time::Duration;
/// use dnsredir_namelist::SourceList;
///
/// let list = SourceList::new(["/etc/dnsredir/ads.conf"], Duration::from_secs(2));
/// list.start_reload().unwrap();
///
/// if list.matches("tracker.ads.example.com") {
///     // redirect
/// }
/// list.stop();
/// ```
#[derive(Debug)]
pub struct SourceList {
    shared: Arc<Shared>,
    reload: Duration,
    reloader: Mutex<Option<Reloader>>,
}

impl SourceList {
    /// Create a list over `paths`. A zero `reload` disables periodic reloading.
    ///
    /// Nothing is read until [`SourceList::start_reload`] is called.
    pub fn new<I, P>(paths: I, reload: Duration) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self::with_logger(paths, reload, Logger::new())
    }

    /// Same as [`SourceList::new`] with an explicit logger
    pub fn with_logger<I, P>(paths: I, reload: Duration, logger: Logger) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let items = paths.into_iter().map(SourceItem::new).collect();
        Self {
            shared: Arc::new(Shared { items, logger }),
            reload,
            reloader: Mutex::new(None),
        }
    }

    pub fn builder() -> SourceListBuilder {
        SourceListBuilder::new()
    }

    /// Check whether `name` matches any item, in configured order.
    ///
    /// Assumes `name` is canonical (lower-cased, no trailing dot).
    ///
    /// # Panics
    ///
    /// Panics if `name` is empty.
    pub fn matches(&self, name: &str) -> bool {
        self.shared.items.iter().any(|item| item.matches(name))
    }

    /// Parse every item once, then start the reload thread.
    ///
    /// The list is queryable as soon as this returns. No thread is started
    /// when the interval is zero or a reload loop is already running.
    pub fn start_reload(&self) -> Result<()> {
        self.shared.reload_all();

        if self.reload.is_zero() {
            return Ok(());
        }

        let mut reloader = self.reloader.lock();
        if reloader.is_none() {
            *reloader = Some(Reloader::spawn_thread(self.shared.clone(), self.reload)?);
        }
        Ok(())
    }

    /// Parse every item once on the blocking pool, then start a reload task
    /// on the current tokio runtime.
    #[cfg(feature = "async")]
    pub async fn start_reload_async(&self) -> Result<()> {
        let shared = self.shared.clone();
        tokio::task::spawn_blocking(move || shared.reload_all())
            .await
            .map_err(|e| NamelistError::ReloadTask(e.to_string()))?;

        if self.reload.is_zero() {
            return Ok(());
        }

        let mut reloader = self.reloader.lock();
        if reloader.is_none() {
            *reloader = Some(Reloader::spawn_task(self.shared.clone(), self.reload));
        }
        Ok(())
    }

    /// Run one reload cycle on the calling thread
    pub fn reload_now(&self) {
        self.shared.reload_all();
    }

    /// Signal the reload loop to exit. Safe to call repeatedly.
    pub fn stop(&self) {
        if let Some(reloader) = self.reloader.lock().take() {
            reloader.stop();
        }
    }

    /// Whether a reload loop has been started, not stopped, and is still alive
    pub fn is_reloading(&self) -> bool {
        self.reloader.lock().as_ref().is_some_and(Reloader::is_running)
    }

    pub fn items(&self) -> &[SourceItem] {
        &self.shared.items
    }

    /// Total number of names across all items
    pub fn len(&self) -> usize {
        self.shared.items.iter().map(SourceItem::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.shared.items.iter().all(SourceItem::is_empty)
    }

    pub fn reload_interval(&self) -> Duration {
        self.reload
    }
}

impl NameMatcher for SourceList {
    fn matches(&self, name: &str) -> bool {
        SourceList::matches(self, name)
    }
}

impl Drop for SourceList {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Builder for [`SourceList`] that checks the configured files up front.
#[derive(Debug)]
pub struct SourceListBuilder {
    paths: Vec<PathBuf>,
    reload: Duration,
    logger: Logger,
    strict: bool,
}

impl Default for SourceListBuilder {
    fn default() -> Self {
        Self {
            paths: Vec::new(),
            reload: DEFAULT_RELOAD_INTERVAL,
            logger: Logger::new(),
            strict: false,
        }
    }
}

impl SourceListBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a list file
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.paths.push(path.into());
        self
    }

    /// Add several list files
    pub fn paths<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.paths.extend(paths.into_iter().map(Into::into));
        self
    }

    /// Set the reload interval; zero disables periodic reloading
    pub fn reload(mut self, interval: Duration) -> Self {
        self.reload = interval;
        self
    }

    /// Set the logger used by the list and its items
    pub fn logger(mut self, logger: Logger) -> Self {
        self.logger = logger;
        self
    }

    /// Fail [`SourceListBuilder::build`] when a file is missing instead of warning
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Check the configured files and create the list.
    ///
    /// A missing file is reported here once; later reloads only log it at
    /// debug level.
    pub fn build(self) -> Result<SourceList> {
        if self.paths.is_empty() {
            return Err(NamelistError::NoSources);
        }

        for path in &self.paths {
            match fs::metadata(path) {
                Ok(_) => {}
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    if self.strict {
                        return Err(NamelistError::SourceNotFound(path.clone()));
                    }
                    self.logger.warn(format_args!("{}: {}", path.display(), e));
                }
                Err(e) => return Err(NamelistError::IoError(e)),
            }
        }

        Ok(SourceList::with_logger(self.paths, self.reload, self.logger))
    }
}
