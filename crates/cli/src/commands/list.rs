use anyhow::Result;
use bmd_build_core::execution::runner::task_color;
use bmd_build_core::pipeline_manager::PipelineManager;
use colored::*;

pub fn execute(manager: &PipelineManager) -> Result<()> {
    let result = manager.list()?;

    println!("{}", "Series".bold().underline());
    if result.series.is_empty() {
        println!("  {}", "No series registered".dimmed());
    }
    for series in &result.series {
        let stages = series
            .stages
            .iter()
            .map(|stage| match stage.len() {
                1 => stage[0].clone(),
                _ => format!("{{{}}}", stage.join(", ")),
            })
            .collect::<Vec<_>>()
            .join(" -> ");
        println!("{} {}", series.name.blue().bold(), stages.dimmed());
    }

    println!();
    println!("{}", "Tasks".bold().underline());
    for task in &result.tasks {
        println!(
            "{} {}",
            task.name.color(task_color(&task.name)),
            format!("({})", task.kind).dimmed()
        );
    }

    Ok(())
}
