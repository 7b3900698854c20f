use anyhow::Result;
use bmd_build_core::pipeline_manager::PipelineManager;
use bmd_build_core::watch::watch_target;
use colored::*;

pub async fn execute(manager: &PipelineManager, target: &str) -> Result<()> {
    println!(
        "{} {} {}",
        "Watching".bold(),
        target.cyan(),
        "(Ctrl+C to stop)".dimmed()
    );

    tokio::select! {
        result = watch_target(manager, target) => {
            result.map_err(|e| anyhow::anyhow!("Watch failed: {}", e))?;
        }
        _ = tokio::signal::ctrl_c() => {
            println!();
            println!("{}", "Stopped watching".dimmed());
        }
    }

    Ok(())
}
