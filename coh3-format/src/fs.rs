//! Filesystem helpers shared by the batch drivers.

use std::path::{Path, PathBuf};

use jwalk::WalkDir;

/// List every file under `root`, including files in nested directories.
///
/// Unreadable entries are skipped. Results are in sorted walk order.
pub fn list_files(root: &Path) -> Vec<PathBuf> {
    WalkDir::new(root)
        .sort(true)
        .skip_hidden(false)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .collect()
}

/// List several source roots concurrently, one worker per root.
///
/// Each worker produces an independent file list; results are joined and
/// returned in the order the roots were given, which is also the matcher's
/// precedence order.
pub fn list_sources(roots: &[PathBuf]) -> Vec<(String, Vec<PathBuf>)> {
    std::thread::scope(|scope| {
        let handles: Vec<_> = roots
            .iter()
            .map(|root| {
                scope.spawn(move || (root.display().to_string(), list_files(root)))
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| handle.join().expect("file lister worker panicked"))
            .collect()
    })
}
