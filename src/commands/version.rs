use anyhow::Result;

pub fn execute() -> Result<()> {
    println!("pulse version {}", env!("CARGO_PKG_VERSION"));
    Ok(())
}
