use broadside::{init_logging, simulate, GameConfig, NullObserver};
use log::LevelFilter;

fn main() -> anyhow::Result<()> {
    init_logging(LevelFilter::Warn);
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: {} <seed1> <seed2>", args[0]);
        std::process::exit(1);
    }
    let seed1: u64 = args[1].parse()?;
    let seed2: u64 = args[2].parse()?;

    let config = GameConfig::standard();
    let summary = simulate(&config, seed1, seed2, Box::new(NullObserver))
        .map_err(|e| anyhow::anyhow!(e))?;

    println!("{}", serde_json::to_string(&summary)?);
    Ok(())
}
