use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;

use anyhow::{Result, bail};
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

use crate::worker::SessionEvent;

/// Paths whose changes mean branches moved. The git directory itself is never
/// watched: the stack tool rewrites lock files and the index there on every
/// command, which would retrigger reloads forever.
pub(crate) fn watch_targets(git_dir: &Path) -> Vec<PathBuf> {
    let mut targets = Vec::new();

    let head = git_dir.join("HEAD");
    if head.exists() {
        targets.push(head);
    }

    for directory in [
        git_dir.join("refs").join("heads"),
        git_dir.join("refs").join("branch-metadata"),
    ] {
        if directory.is_dir() {
            targets.push(directory);
        }
    }

    targets
}

/// Keeps the OS watch alive; dropping it stops notifications.
pub(crate) struct RepoWatcher {
    _watcher: RecommendedWatcher,
    watched: Vec<PathBuf>,
}

impl RepoWatcher {
    pub(crate) fn start(git_dir: &Path, sender: Sender<SessionEvent>) -> Result<Self> {
        let targets = watch_targets(git_dir);
        if targets.is_empty() {
            bail!("no watchable paths found in {}", git_dir.display());
        }

        let mut watcher = RecommendedWatcher::new(
            move |result: notify::Result<Event>| {
                let event = match result {
                    Ok(event) if is_relevant(&event.kind) => SessionEvent::RepoChanged,
                    Ok(_) => return,
                    Err(error) => SessionEvent::WatchError(error.to_string()),
                };
                let _ = sender.send(event);
            },
            Config::default(),
        )?;

        let mut watched = Vec::new();
        for target in targets {
            match watcher.watch(&target, RecursiveMode::NonRecursive) {
                Ok(()) => watched.push(target),
                Err(error) => {
                    tracing::warn!(path = %target.display(), %error, "failed to watch path");
                }
            }
        }

        if watched.is_empty() {
            bail!("no watchable paths found in {}", git_dir.display());
        }

        tracing::info!(paths = ?watched, "watching repository refs");
        Ok(Self {
            _watcher: watcher,
            watched,
        })
    }

    pub(crate) fn watched(&self) -> &[PathBuf] {
        &self.watched
    }
}

fn is_relevant(kind: &EventKind) -> bool {
    matches!(
        kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_) | EventKind::Any
    )
}
