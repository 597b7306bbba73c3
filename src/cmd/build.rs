//! Dataset assembly command: `roadmap build`.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use roadmap::board::ingest::{ProjectExport, build_dataset};
use roadmap::config::Config;
use roadmap::ui::icons::CHECK;

use super::super::Cli;

pub fn cmd_build(
    cli: &Cli,
    project_dir: PathBuf,
    input: &Path,
    output: Option<&Path>,
) -> Result<()> {
    let config = Config::new(project_dir, cli.verbose, cli.data_file.clone(), cli.lang)?;

    let input = config.project_dir.join(input);
    let content = std::fs::read_to_string(&input)
        .with_context(|| format!("Failed to read project export: {}", input.display()))?;
    let export: ProjectExport = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse project export: {}", input.display()))?;

    let dataset = build_dataset(
        export,
        config.board_config().unplanned_title(),
        chrono::Utc::now(),
    )?;

    let output = match output {
        Some(path) => config.project_dir.join(path),
        None => config.default_output_file(),
    };
    if let Some(parent) = output.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    dataset.save(&output)?;

    println!(
        "{}Wrote {} milestones ({} issues) to {}",
        CHECK,
        dataset.milestones.len(),
        dataset.total_issues(),
        output.display()
    );
    if config.verbose {
        for milestone in &dataset.milestones {
            println!("  {}: {} issues", milestone.title, milestone.issues.len());
        }
    }
    Ok(())
}
