//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - reads session/run files
//! - runs the analysis pipeline
//! - prints reports
//! - writes optional exports and saved runs

use chrono::Utc;
use clap::Parser;

use crate::cli::{AnalyzeArgs, Command, CompareArgs, DemoArgs, TheoryArgs};
use crate::domain::{AnalysisConfig, SavedRun};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `mcs` binary.
pub fn run() -> Result<(), AppError> {
    // A bare `mcs` (or `mcs -n 4`) should behave like `mcs demo ...` so the
    // tool does something useful with no scanner attached. Clap requires a
    // subcommand name, so we do a small, explicit rewrite of the argv list
    // before parsing.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Analyze(args) => handle_analyze(args),
        Command::Theory(args) => handle_theory(args),
        Command::Compare(args) => handle_compare(args),
        Command::Demo(args) => handle_demo(args),
    }
}

fn handle_analyze(args: AnalyzeArgs) -> Result<(), AppError> {
    let session = crate::io::read_session(&args.session)?;
    let config = session.config();
    let run = pipeline::run_analysis(&config, session.films.clone())?;

    println!(
        "{}",
        crate::report::format_analysis_report(
            &session.material,
            &config,
            &run.summaries,
            run.theta_rms_rad,
            run.theoretical_theta_rad,
            &run.warnings,
        )
    );

    write_outputs(
        &run,
        &session.material,
        &config,
        args.export.as_deref(),
        args.save_run.as_deref(),
        args.run_id,
    )
}

fn handle_theory(args: TheoryArgs) -> Result<(), AppError> {
    let params = args.params();
    let theta = crate::physics::theta_highland(&params);
    println!("{}", crate::report::format_theory(&params, theta));
    Ok(())
}

fn handle_compare(args: CompareArgs) -> Result<(), AppError> {
    let mut runs = Vec::new();
    for path in &args.runs {
        runs.extend(crate::io::read_runs(path)?);
    }
    if !args.ids.is_empty() {
        runs.retain(|r| args.ids.contains(&r.id));
    }
    if runs.is_empty() {
        return Err(AppError::new(3, "No saved runs matched the selection."));
    }

    let comparison = crate::runs::compare(&runs);
    println!("{}", crate::report::format_comparison(&comparison));
    Ok(())
}

fn handle_demo(args: DemoArgs) -> Result<(), AppError> {
    let config = AnalysisConfig {
        scale_mm_per_px: args.scale,
        highland: args.theory.params(),
    };
    let run = pipeline::run_demo(&config, args.films, args.seed, args.noise)?;

    println!(
        "{}",
        crate::report::format_analysis_report(
            "synthetic",
            &config,
            &run.summaries,
            run.theta_rms_rad,
            run.theoretical_theta_rad,
            &run.warnings,
        )
    );

    write_outputs(
        &run,
        "synthetic",
        &config,
        args.export.as_deref(),
        args.save_run.as_deref(),
        args.run_id,
    )
}

fn write_outputs(
    run: &pipeline::RunOutput,
    material: &str,
    config: &AnalysisConfig,
    export: Option<&std::path::Path>,
    save_run: Option<&std::path::Path>,
    run_id: Option<String>,
) -> Result<(), AppError> {
    if let Some(path) = export {
        crate::io::write_summary_csv(path, &run.summaries)?;
    }
    if let Some(path) = save_run {
        let saved = SavedRun::from_analysis(
            run_id,
            material,
            Utc::now(),
            run.summaries.clone(),
            config.highland,
            run.theoretical_theta_rad,
        );
        crate::io::append_run(path, saved)?;
    }
    Ok(())
}

/// Rewrite argv so `mcs` defaults to `mcs demo`.
///
/// Rules:
/// - `mcs`                      -> `mcs demo`
/// - `mcs -n 4 ...`             -> `mcs demo -n 4 ...`
/// - `mcs --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("demo".to_string());
        return argv;
    };

    let is_top_level_help_or_version =
        matches!(arg1.as_str(), "-h" | "--help" | "-V" | "--version" | "help");
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "analyze" | "theory" | "compare" | "demo");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "demo flags".
    if arg1.starts_with('-') {
        argv.insert(1, "demo".to_string());
        return argv;
    }

    // Otherwise, leave as-is (clap will report the unknown subcommand).
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_becomes_demo() {
        assert_eq!(rewrite_args(argv(&["mcs"])), argv(&["mcs", "demo"]));
    }

    #[test]
    fn leading_flag_routes_to_demo() {
        assert_eq!(
            rewrite_args(argv(&["mcs", "-n", "4"])),
            argv(&["mcs", "demo", "-n", "4"])
        );
    }

    #[test]
    fn subcommands_and_help_pass_through() {
        assert_eq!(
            rewrite_args(argv(&["mcs", "analyze", "-s", "x.json"])),
            argv(&["mcs", "analyze", "-s", "x.json"])
        );
        assert_eq!(rewrite_args(argv(&["mcs", "--help"])), argv(&["mcs", "--help"]));
        assert_eq!(rewrite_args(argv(&["mcs", "-V"])), argv(&["mcs", "-V"]));
    }
}
