mod metadata;
mod runner;

pub use metadata::{infer_version, load_manifest, output_dir, parse_sources, timestamp};
pub use runner::{CheckOptions, build_report};

use time::OffsetDateTime;

use crate::EXIT_CONFIG_ERROR;
use crate::capabilities::{Capabilities, CapabilityOptions};
use crate::cli::CheckArgs;
use crate::commands::context::{load_registry, resolve_thresholds, write_atomic};
use crate::output::{LoadProgress, ReportFormat, print_error};

#[must_use]
pub fn run_check(args: &CheckArgs, quiet: bool) -> i32 {
    match run_check_impl(args, quiet) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            print_error(&e);
            EXIT_CONFIG_ERROR
        }
    }
}

/// # Errors
/// Returns an error for an unknown category, an unreadable taxonomy file, or
/// a report that cannot be written.
pub fn run_check_impl(args: &CheckArgs, quiet: bool) -> crate::Result<i32> {
    let registry = load_registry(args.taxonomy.as_deref())?;
    let taxonomy = registry.get(&args.category)?;
    let resolved = resolve_thresholds(&args.category, &args.threshold_args);
    let capabilities = Capabilities::detect(CapabilityOptions {
        heuristic_language: args.heuristic_language,
        exact_only: args.exact_only,
    });
    let progress = LoadProgress::new(quiet);

    let report = build_report(&CheckOptions {
        args,
        taxonomy,
        thresholds: &resolved.thresholds,
        capabilities: &capabilities,
        progress: &progress,
        now: OffsetDateTime::now_utc(),
    })?;

    let dir = output_dir(
        args.output_dir.as_deref(),
        &report.metadata.category,
        &report.metadata.version,
    );

    let mut formats = vec![ReportFormat::Json];
    if args.write_markdown {
        formats.push(ReportFormat::Markdown);
    }
    for format in formats {
        let path = dir.join(format.file_name());
        write_atomic(&path, &format.formatter().format(&report)?)?;
        if !quiet {
            match format {
                ReportFormat::Json => println!("QC report written to {}", path.display()),
                ReportFormat::Markdown => {
                    println!("Markdown summary written to {}", path.display());
                }
            }
        }
    }

    Ok(report.gates.exit_code(args.fail_on_warning))
}
