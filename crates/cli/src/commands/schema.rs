use anyhow::Result;
use bmd_build_core::configs::pipeline::config_schema;

pub fn execute() -> Result<()> {
    println!("{}", config_schema()?);
    Ok(())
}
