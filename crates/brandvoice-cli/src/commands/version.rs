use anyhow::Result;

pub fn run() -> Result<()> {
    println!("brandvoice {}", env!("CARGO_PKG_VERSION"));
    Ok(())
}
