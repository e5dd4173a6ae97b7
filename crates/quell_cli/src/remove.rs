//! `quell remove` — strip every suppression marker from a tree.
//!
//! Walks the target (honoring `.gitignore`) for `.ts`, `.tsx`, and `.vue`
//! files, strips markers per file kind, and writes back only the files
//! that changed.

use std::path::{Path, PathBuf};

use ignore::Walk;
use rayon::prelude::*;
use serde::Serialize;

use quell_engine::{strip_markers, FileKind};

use crate::{GlobalArgs, RemoveArgs, ReportFormat};

/// The result of stripping one file.
#[derive(Debug, Serialize)]
struct StripReport {
    file: PathBuf,
    removed: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Accumulated counts for the whole run.
#[derive(Debug, Serialize)]
struct RunReport {
    files: Vec<StripReport>,
    removed: usize,
}

/// Runs the `quell remove` command.
///
/// Returns exit code 0 when every candidate file was processed, 1 when any
/// file failed.
pub fn run(args: &RemoveArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let target = PathBuf::from(&args.path);
    let candidates = collect_candidates(&target)?;

    let mut files: Vec<StripReport> = candidates
        .into_par_iter()
        .map(|(path, kind)| strip_file(&path, kind))
        .collect();
    // Only files that carried markers (or failed) are worth reporting.
    files.retain(|f| f.removed > 0 || f.error.is_some());

    let removed = files.iter().map(|f| f.removed).sum();
    let failed = files.iter().filter(|f| f.error.is_some()).count();
    let run = RunReport { files, removed };

    match args.format {
        ReportFormat::Text => render_text(&run, global),
        ReportFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&run).unwrap_or_else(|_| "{}".to_string())
        ),
    }

    Ok(if failed > 0 { 1 } else { 0 })
}

/// Collects the files to strip: the target itself if it is a file, else
/// every processable file under it, gitignore respected.
fn collect_candidates(
    target: &Path,
) -> Result<Vec<(PathBuf, FileKind)>, Box<dyn std::error::Error>> {
    if target.is_file() {
        return Ok(candidate(target).into_iter().collect());
    }
    if !target.is_dir() {
        return Err(format!("no such file or directory: {}", target.display()).into());
    }

    let mut files = Vec::new();
    for entry in Walk::new(target) {
        let entry = entry?;
        if entry.file_type().is_some_and(|t| t.is_file()) {
            files.extend(candidate(entry.path()));
        }
    }
    files.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(files)
}

/// Returns the path with its kind if this is a processable source file.
fn candidate(path: &Path) -> Option<(PathBuf, FileKind)> {
    let name = path.file_name()?.to_str()?;
    let processable =
        name.ends_with(".ts") || name.ends_with(".tsx") || name.ends_with(".vue");
    if !processable {
        return None;
    }
    let kind = FileKind::detect(path)?;
    Some((path.to_path_buf(), kind))
}

/// Strips one file, writing back only when a marker was removed.
fn strip_file(path: &Path, kind: FileKind) -> StripReport {
    let mut report = StripReport {
        file: path.to_path_buf(),
        removed: 0,
        error: None,
    };

    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            report.error = Some(format!("cannot read {}: {e}", path.display()));
            return report;
        }
    };

    let (output, removed) = strip_markers(&content, kind);
    report.removed = removed;
    if removed > 0 {
        if let Err(e) = std::fs::write(path, output) {
            report.error = Some(format!("cannot write {}: {e}", path.display()));
        }
    }
    report
}

fn render_text(run: &RunReport, global: &GlobalArgs) {
    for file in &run.files {
        if let Some(error) = &file.error {
            eprintln!("error: {error}");
        } else if global.verbose {
            eprintln!("   {}: {} removed", file.file.display(), file.removed);
        }
    }
    if !global.quiet {
        eprintln!(
            "   Result: {} marker(s) removed from {} file(s)",
            run.removed,
            run.files.iter().filter(|f| f.error.is_none()).count()
        );
    }
}
