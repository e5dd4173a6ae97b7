//! `quell add` — annotate checker errors with suppression markers.
//!
//! The flow:
//!
//! 1. Load config (checker command, placement policy)
//! 2. Obtain the checker report: run `npx <checker> --noEmit`, or read a
//!    captured log with `--log-file`
//! 3. Parse the report and group diagnostics per file
//! 4. Process files in parallel; each file is read once, edited
//!    bottom-to-top, and written back once
//! 5. Print the per-file and total counts

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::Serialize;

use quell_diagnostics::{group_by_file, parse_report, Diagnostic};
use quell_engine::{suppress, EngineOptions, FileKind};

use crate::pipeline::{engine_options, load_tool_config, run_checker};
use crate::{AddArgs, GlobalArgs, ReportFormat};

/// The result of processing one file.
#[derive(Debug, Serialize)]
struct FileReport {
    /// The file as named by the checker report.
    file: PathBuf,
    /// Markers inserted.
    inserted: usize,
    /// Markers removed.
    removed: usize,
    /// Diagnostics that produced no edit.
    skipped: usize,
    /// The I/O or dispatch failure for this file, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Accumulated counts for the whole run.
#[derive(Debug, Default, Serialize)]
struct RunReport {
    files: Vec<FileReport>,
    inserted: usize,
    removed: usize,
    skipped: usize,
}

/// Runs the `quell add` command.
///
/// Returns exit code 0 when every diagnosed file was processed, 1 when any
/// file failed. A clean checker report is a success with nothing written.
pub fn run(args: &AddArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let project_dir = PathBuf::from(&args.dir);
    let config = load_tool_config(global, &project_dir)?;
    let options = engine_options(&config);

    let report_text = match &args.log_file {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|e| format!("cannot read log file {path}: {e}"))?,
        None => {
            if !global.quiet {
                eprintln!("   Running npx {} --noEmit", config.checker.command);
            }
            run_checker(&config.checker.command, &project_dir)?
        }
    };

    let diagnostics = parse_report(&report_text);
    if diagnostics.is_empty() {
        if !global.quiet {
            eprintln!("   No errors found");
        }
        return Ok(0);
    }

    let groups = group_by_file(diagnostics);
    let files: Vec<FileReport> = groups
        .into_par_iter()
        .map(|(file, diags)| annotate_file(&project_dir, file, &diags, &options))
        .collect();
    let mut run = RunReport {
        files,
        ..RunReport::default()
    };

    for file in &run.files {
        run.inserted += file.inserted;
        run.removed += file.removed;
        run.skipped += file.skipped;
    }

    let failed = run.files.iter().filter(|f| f.error.is_some()).count();

    match args.format {
        ReportFormat::Text => render_text(&run, global),
        ReportFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&run).unwrap_or_else(|_| "{}".to_string())
        ),
    }

    Ok(if failed > 0 { 1 } else { 0 })
}

/// Processes the diagnostics of one file: read, suppress, write back once
/// if the content changed.
fn annotate_file(
    project_dir: &Path,
    file: PathBuf,
    diagnostics: &[Diagnostic],
    options: &EngineOptions,
) -> FileReport {
    let mut report = FileReport {
        file,
        inserted: 0,
        removed: 0,
        skipped: 0,
        error: None,
    };

    let path = project_dir.join(&report.file);
    let Some(kind) = FileKind::detect(&path) else {
        report.skipped = diagnostics.len();
        return report;
    };

    let content = match std::fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) => {
            report.error = Some(format!("cannot read {}: {e}", path.display()));
            return report;
        }
    };

    let (output, summary) = suppress(&content, kind, diagnostics, options);
    report.inserted = summary.inserted;
    report.removed = summary.removed;
    report.skipped = summary.skipped;

    if output != content {
        if let Err(e) = std::fs::write(&path, output) {
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
            eprintln!(
                "   {}: {} inserted, {} removed, {} skipped",
                file.file.display(),
                file.inserted,
                file.removed,
                file.skipped
            );
        }
    }
    if !global.quiet {
        eprintln!(
            "   Result: {} inserted, {} removed, {} skipped across {} file(s)",
            run.inserted,
            run.removed,
            run.skipped,
            run.files.len()
        );
    }
}
