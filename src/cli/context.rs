use std::path::{Path, PathBuf};
use std::sync::OnceLock;

const DEFAULT_DIR: &str = ".pushguard";

static PUSHGUARD_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Initialize the global pushguard directory path.
/// If `custom` is provided, uses that path; otherwise defaults to `.pushguard`.
pub fn init(custom: Option<&str>) {
    let dir = custom
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DIR));
    let _ = PUSHGUARD_DIR.set(dir);
}

/// Get the current pushguard directory path.
pub fn pushguard_dir() -> &'static Path {
    PUSHGUARD_DIR
        .get()
        .map(|p| p.as_path())
        .unwrap_or(Path::new(DEFAULT_DIR))
}
