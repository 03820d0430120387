// File watching for `diff --watch`: notify events are drained from a channel
// and coalesced so one save produces one recomputation.
//
// The parent directories are watched, not the files. An editor that saves by
// renaming a temp file over the original replaces the inode, which would end
// a watch held on the file itself.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

/// Events closer together than this belong to the same batch.
pub const DEBOUNCE: Duration = Duration::from_millis(100);

/// Coalesces a stream of raw watcher events into change batches.
pub struct Debouncer {
    rx: Receiver<notify::Result<Event>>,
    window: Duration,
    /// Only events touching one of these count. Empty means every path.
    targets: Vec<PathBuf>,
}

impl Debouncer {
    pub fn new(rx: Receiver<notify::Result<Event>>, window: Duration) -> Self {
        Self {
            rx,
            window,
            targets: Vec::new(),
        }
    }

    pub fn with_targets(mut self, targets: Vec<PathBuf>) -> Self {
        self.targets = targets;
        self
    }

    fn is_relevant(&self, event: &Event) -> bool {
        let kind = matches!(
            event.kind,
            EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_) | EventKind::Any
        );
        kind && (self.targets.is_empty() || event.paths.iter().any(|p| self.targets.contains(p)))
    }

    /// Block until a relevant change arrives, then keep draining until the
    /// channel has been quiet for one window. Returns `false` once the sender
    /// side is gone.
    pub fn wait_for_change(&mut self) -> bool {
        self.next_batch(None)
    }

    /// Like `wait_for_change`, but gives up after `timeout` without a change.
    fn next_batch(&mut self, timeout: Option<Duration>) -> bool {
        let deadline = timeout.map(|t| Instant::now() + t);
        loop {
            let received = match deadline {
                None => self.rx.recv().map_err(|_| RecvTimeoutError::Disconnected),
                Some(deadline) => self
                    .rx
                    .recv_timeout(deadline.saturating_duration_since(Instant::now())),
            };
            match received {
                Ok(Ok(event)) if self.is_relevant(&event) => break,
                Ok(Ok(_)) => continue,
                Ok(Err(e)) => {
                    log::warn!("watch error: {}", e);
                    continue;
                }
                Err(_) => return false,
            }
        }

        let started = Instant::now();
        loop {
            match self.rx.recv_timeout(self.window) {
                Ok(Ok(event)) => log::trace!("coalescing {:?}", event.kind),
                Ok(Err(e)) => log::warn!("watch error: {}", e),
                Err(RecvTimeoutError::Timeout) => break,
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
        log::debug!("change batch settled after {:?}", started.elapsed());
        true
    }
}

/// Absolute form of `path` with its parent directory resolved, matching the
/// paths notify reports for entries of a watched directory.
fn resolve_target(path: &Path) -> Result<(PathBuf, PathBuf)> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let dir = parent
        .canonicalize()
        .with_context(|| format!("Failed to resolve {}", parent.display()))?;
    let name = path
        .file_name()
        .with_context(|| format!("{} is not a file path", path.display()))?;
    Ok((dir.clone(), dir.join(name)))
}

/// Keeps the notify watcher alive alongside its debouncer.
pub struct FileWatcher {
    _watcher: RecommendedWatcher,
    debouncer: Debouncer,
}

impl FileWatcher {
    pub fn new(paths: &[&Path]) -> Result<Self> {
        let mut dirs = BTreeSet::new();
        let mut targets = Vec::new();
        for path in paths {
            if !path.is_file() {
                bail!("{} is not a file", path.display());
            }
            let (dir, target) = resolve_target(path)?;
            dirs.insert(dir);
            targets.push(target);
        }

        let (tx, rx) = mpsc::channel();
        let mut watcher = notify::recommended_watcher(move |res| {
            let _ = tx.send(res);
        })
        .context("Failed to start file watcher")?;

        for dir in &dirs {
            watcher
                .watch(dir, RecursiveMode::NonRecursive)
                .with_context(|| format!("Failed to watch {}", dir.display()))?;
        }

        Ok(Self {
            _watcher: watcher,
            debouncer: Debouncer::new(rx, DEBOUNCE).with_targets(targets),
        })
    }

    pub fn wait_for_change(&mut self) -> bool {
        self.debouncer.wait_for_change()
    }
}
