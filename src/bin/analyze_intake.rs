//! Runs the wellness analysis on a questionnaire saved as JSON.
//!
//! Usage: `analyze_intake [--json] [PATH]` (reads stdin when PATH is absent).

use health_advisor_api::analysis::analyze;
use health_advisor_api::intake::validate_intake;
use health_advisor_api::models::IntakeForm;
use health_advisor_api::report::render_report;
use std::io::Read;

/// Main entry point for the analysis utility.
///
/// Validates the submission the same way the HTTP endpoint does, then
/// prints the text report, or the raw result with `--json`.
fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let mut as_json = false;
    let mut path = None;
    for arg in std::env::args().skip(1) {
        if arg == "--json" {
            as_json = true;
        } else if path.is_none() {
            path = Some(arg);
        } else {
            anyhow::bail!("Unexpected argument: {}", arg);
        }
    }

    let raw = match &path {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path, e))?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let form: IntakeForm = serde_json::from_str(&raw)?;
    let intake = validate_intake(form).map_err(|errors| {
        anyhow::anyhow!("Please fill required fields:\n- {}", errors.join("\n- "))
    })?;

    tracing::info!("Analyzing intake for {}", intake.name);
    let analysis = analyze(&intake);

    if as_json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    } else {
        print!("{}", render_report(&analysis));
    }

    Ok(())
}
