//! Per-file analysis.
//!
//! Two concrete entry points share one line walk: [`count_levels`] tallies
//! severity levels only, [`analyze`] additionally samples WARN/ERROR lines
//! and counts the exception keywords they contain.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::warn;

use super::classify;
use super::types::FileAnalysis;

/// Count severity levels only. WARN/ERROR lines are neither sampled nor
/// scanned for keywords.
pub fn count_levels(path: &Path) -> FileAnalysis {
    scan(path, false)
}

/// Full analysis: severity counts plus, for each WARN/ERROR line, the
/// line text and every recognized exception keyword it contains.
pub fn analyze(path: &Path) -> FileAnalysis {
    scan(path, true)
}

fn scan(path: &Path, error_aware: bool) -> FileAnalysis {
    let mut report = FileAnalysis::new(path);

    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) => {
            warn!(file = %path.display(), error = %e, "cannot open file");
            report.failure = Some(format!("failed to open {}: {}", path.display(), e));
            return report;
        }
    };

    for line in BufReader::new(file).lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                // Keep whatever was counted before the read error.
                warn!(file = %path.display(), error = %e, "read failed mid-file, keeping partial counts");
                report.failure = Some(format!("read error in {}: {}", path.display(), e));
                break;
            }
        };

        let Some(level) = classify::classify(&line) else {
            continue;
        };
        *report.levels.entry(level).or_insert(0) += 1;

        if error_aware && level.is_severe() {
            for keyword in classify::find_keywords(&line) {
                *report.error_types.entry(keyword).or_insert(0) += 1;
            }
            report.samples.push(line);
        }
    }

    report
}
