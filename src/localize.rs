use crate::airline::{icao_lookup, load_airlines, IataCode};
use crate::error::LogoError;
use crate::report::write_tally;
use crate::utils::files::{ensure_directory, find_logo_candidates, LogoCandidate};
use indicatif::ProgressBar;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Settings for one localize run.
#[derive(Debug, Clone)]
pub struct LocalizeConfig {
    pub metadata: PathBuf,
    /// Directory of ICAO-named images; must exist.
    pub source_dir: PathBuf,
    pub dest_dir: PathBuf,
}

/// Counters accumulated over one localize run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LocalizeReport {
    pub total: usize,
    pub copied: usize,
    pub skipped_existing: usize,
    pub skipped_unmapped: usize,
    pub skipped_invalid_iata: usize,
}

impl LocalizeReport {
    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Copied => self.copied += 1,
            Outcome::Existing => self.skipped_existing += 1,
            Outcome::Unmapped => self.skipped_unmapped += 1,
            Outcome::InvalidIata => self.skipped_invalid_iata += 1,
        }
    }
}

impl fmt::Display for LocalizeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_tally(
            f,
            "Copy Report",
            &[
                ("✅ New images copied", self.copied),
                ("👍 Skipped (already existed)", self.skipped_existing),
                ("❓ Skipped (ICAO not in metadata)", self.skipped_unmapped),
                ("⚠️ Skipped (invalid IATA)", self.skipped_invalid_iata),
            ],
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Copied,
    Existing,
    Unmapped,
    InvalidIata,
}

/// Copy ICAO-named source images into the destination directory under their
/// IATA names, leaving files that already exist untouched.
pub fn localize_logos(config: &LocalizeConfig, pb: &ProgressBar) -> Result<LocalizeReport, LogoError> {
    if !config.source_dir.is_dir() {
        return Err(LogoError::SourceDirNotFound {
            path: config.source_dir.clone(),
        });
    }

    let airlines = load_airlines(&config.metadata)?;
    let lookup = icao_lookup(&airlines);
    println!("🗂️  Loaded {} ICAO → IATA mappings.", lookup.len());

    ensure_directory(&config.dest_dir)?;
    println!("📁 Directory '{}' is ready.", config.dest_dir.display());

    let candidates = find_logo_candidates(&config.source_dir)?;
    if candidates.is_empty() {
        warn!(source = %config.source_dir.display(), "no source images found");
        println!(
            "⚠️ No .png files found in '{}'. Nothing to do.",
            config.source_dir.display()
        );
        return Ok(LocalizeReport::default());
    }

    println!("\n✈️  Starting copy for {} images...", candidates.len());
    pb.set_length(candidates.len() as u64);

    let mut report = LocalizeReport {
        total: candidates.len(),
        ..Default::default()
    };

    for candidate in &candidates {
        let outcome = localize_one(&lookup, &config.dest_dir, candidate)?;
        report.record(outcome);
        pb.inc(1);
    }

    pb.finish();
    Ok(report)
}

fn localize_one(
    lookup: &HashMap<String, String>,
    dest_dir: &Path,
    candidate: &LogoCandidate,
) -> Result<Outcome, LogoError> {
    let Some(mapped) = lookup.get(&candidate.code) else {
        debug!(icao = %candidate.code, "no IATA mapping");
        return Ok(Outcome::Unmapped);
    };

    let Some(iata) = IataCode::parse(mapped) else {
        debug!(icao = %candidate.code, iata = %mapped, "mapped IATA code is invalid");
        return Ok(Outcome::InvalidIata);
    };

    let dest_path = dest_dir.join(iata.logo_file_name());
    if dest_path.exists() {
        return Ok(Outcome::Existing);
    }

    fs::copy(&candidate.path, &dest_path)?;
    Ok(Outcome::Copied)
}
