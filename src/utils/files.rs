use crate::error::LogoError;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const LOGO_EXTENSION: &str = ".png";

/// A source image whose file stem is taken as an ICAO code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogoCandidate {
    pub code: String,
    pub path: PathBuf,
}

/// Create a directory (and its parents) if it does not exist yet.
pub fn ensure_directory(path: &Path) -> Result<(), LogoError> {
    fs::create_dir_all(path).map_err(|e| LogoError::CreateDir {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Strip a case-insensitive `.png` suffix, returning the stem.
fn logo_stem(file_name: &str) -> Option<&str> {
    let split = file_name.len().checked_sub(LOGO_EXTENSION.len())?;
    let ext = file_name.get(split..)?;
    if !ext.eq_ignore_ascii_case(LOGO_EXTENSION) || split == 0 {
        return None;
    }
    file_name.get(..split)
}

/// List the `.png` files directly inside `dir`, sorted by file name.
///
/// Subdirectories and other files are ignored.
pub fn find_logo_candidates(dir: &Path) -> io::Result<Vec<LogoCandidate>> {
    let mut candidates: Vec<LogoCandidate> = fs::read_dir(dir)?
        .filter_map(|entry| {
            let entry = entry.ok()?;
            let path = entry.path();
            if !path.is_file() {
                return None;
            }
            let file_name = entry.file_name();
            let code = logo_stem(file_name.to_str()?)?.to_string();
            Some(LogoCandidate { code, path })
        })
        .collect();

    candidates.sort_by(|a, b| a.path.file_name().cmp(&b.path.file_name()));
    Ok(candidates)
}
