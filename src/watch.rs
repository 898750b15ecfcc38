//! Re-run the conversion of an input file whenever it changes.
use crate::{run, Options};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, SystemTime};

const POLL_INTERVAL: Duration = Duration::from_millis(500);

fn modified(path: &Path) -> Option<SystemTime> {
    std::fs::metadata(path).and_then(|m| m.modified()).ok()
}

/// Polls the modification times of `inputs` forever.
pub fn watch(inputs: &[PathBuf], output: &Path, options: &Options) {
    let mut seen: Vec<(PathBuf, Option<SystemTime>)> = inputs.iter().map(|p| (p.clone(), modified(p))).collect();
    log::info!("Watching {} file(s) for changes", seen.len());
    loop {
        thread::sleep(POLL_INTERVAL);
        for (path, last) in &mut seen {
            let now = modified(path);
            if now == *last {
                continue;
            }
            *last = now;
            if now.is_none() {
                log::warn!("{} disappeared", path.display());
                continue;
            }
            log::info!("{} changed", path.display());
            if let Err(e) = run(path, output, options) {
                log::error!("{e}");
            }
        }
    }
}
