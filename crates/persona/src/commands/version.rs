pub fn run() -> anyhow::Result<()> {
    println!("persona {}", env!("CARGO_PKG_VERSION"));
    println!("Reddit user persona analyzer");
    Ok(())
}
