use anyhow::Result;
use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher as NotifyWatcher};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

/// Watch a scene file and raise `reload` whenever it is written.
///
/// The parent directory is watched rather than the file itself so editors
/// that save by replacing the file are still noticed.
pub fn start(scene: &Path, reload: Arc<AtomicBool>) -> Result<RecommendedWatcher> {
    let target: PathBuf = scene.canonicalize()?;
    let dir = target
        .parent()
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf);

    let watched = target.clone();
    let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| match res {
        Ok(event) => {
            if (event.kind.is_modify() || event.kind.is_create()) && event.paths.iter().any(|p| p == &watched) {
                info!("Scene changed: {:?}", watched);
                reload.store(true, Ordering::SeqCst);
            }
        }
        Err(e) => tracing::error!("Error watching scene file: {e:?}"),
    })?;

    watcher.watch(&dir, RecursiveMode::NonRecursive)?;
    info!("Scene watcher started for {:?}", target);
    Ok(watcher)
}
