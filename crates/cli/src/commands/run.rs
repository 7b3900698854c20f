use anyhow::Result;
use bmd_build_core::pipeline_manager::PipelineManager;
use colored::*;

pub async fn execute(manager: &PipelineManager, targets: &[String]) -> Result<()> {
    for target in targets {
        println!("{} {}", "Running".bold(), target.cyan());
        println!();

        let summary = manager
            .run(target)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to run '{}': {}", target, e))?;

        println!();
        println!(
            "{} {}",
            "✓".green().bold(),
            format!(
                "'{}' finished {} tasks in {:.2?}",
                summary.target,
                summary.tasks.len(),
                summary.duration
            )
            .green()
            .bold()
        );
    }

    Ok(())
}
