use anyhow::Result;
use bmd_build_core::pipeline_manager::PipelineManager;
use colored::*;

pub fn execute(manager: &PipelineManager, target: &str) -> Result<()> {
    println!("{} {}", "Execution plan for".bold(), target.cyan());

    let plan = manager
        .plan(target)
        .map_err(|e| anyhow::anyhow!("Failed to get execution plan: {}", e))?;

    for (i, stage) in plan.stages.iter().enumerate() {
        let label = if stage.len() > 1 { " (parallel)" } else { "" };
        println!("\n{}{}:", format!("Step {}", i + 1).bold(), label.dimmed());

        for task in stage {
            println!("  {} {}", task.name.blue().bold(), format!("[{}]", task.kind).dimmed());
            if task.actions.is_empty() {
                println!("    {}", "nothing to do".dimmed());
            }
            for action in &task.actions {
                println!("    {}", action);
            }
        }
    }

    Ok(())
}
