use anyhow::Result;
use bmd_build_core::pipeline_manager::PipelineManager;

pub fn execute(manager: &PipelineManager, target: &str) -> Result<()> {
    let dot = manager
        .graph_dot(target)
        .map_err(|e| anyhow::anyhow!("Failed to build graph: {}", e))?;

    // plain DOT so the output can be piped into graphviz
    println!("{}", dot);
    Ok(())
}
