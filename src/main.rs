use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use broadside::cli::{
    coord_to_string, parse_coord, parse_orientation, print_boards, TerminalObserver,
};
use broadside::{
    init_logging, simulate, Board, GameConfig, NullObserver, Orientation, Player, RoundOutcome,
    ShipId, TurnEngine,
};
use clap::{Parser, ValueEnum};
use rand::rngs::SmallRng;
use rand::SeedableRng;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Variant {
    /// Lengths 5, 4, 3, 3, 2.
    Standard,
    /// Lengths 5, 4, 3, 2, 2.
    Compact,
}

#[derive(clap::Args, Clone, Debug)]
struct ConfigArgs {
    #[arg(long, value_enum, default_value_t = Variant::Standard)]
    variant: Variant,
    #[arg(long, help = "Override the board dimension")]
    size: Option<usize>,
    #[arg(long, help = "Load the game configuration from a JSON file")]
    config: Option<PathBuf>,
}

#[derive(Parser)]
enum Commands {
    /// Play against the computer in the terminal.
    Play {
        #[command(flatten)]
        settings: ConfigArgs,
        #[arg(long, default_value = "Player 1")]
        name: String,
        #[arg(long, help = "Use the fixed column layout for the computer's fleet")]
        fixed_bot: bool,
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
    },
    /// Let two bots play each other and print a JSON summary.
    Sim {
        #[command(flatten)]
        settings: ConfigArgs,
        #[arg(long, default_value_t = 1)]
        seed1: u64,
        #[arg(long, default_value_t = 2)]
        seed2: u64,
        #[arg(long, help = "Print both boards after every move")]
        verbose: bool,
    },
}

fn load_config(args: &ConfigArgs) -> anyhow::Result<GameConfig> {
    let mut config = match &args.config {
        Some(path) => GameConfig::from_json_file(path)?,
        None => match args.variant {
            Variant::Standard => GameConfig::standard(),
            Variant::Compact => GameConfig::compact(),
        },
    };
    if let Some(size) = args.size {
        config.board_size = size;
    }
    config.validate().map_err(|e| anyhow::anyhow!(e))?;
    Ok(config)
}

fn make_rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(s) => SmallRng::seed_from_u64(s),
        None => {
            let mut seed_rng = rand::rng();
            SmallRng::from_rng(&mut seed_rng)
        }
    }
}

fn read_line(input: &mut impl BufRead) -> anyhow::Result<String> {
    io::stdout().flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(anyhow::anyhow!("input closed"));
    }
    Ok(line.trim().to_string())
}

/// Let the human reshuffle or rotate ships until they accept the layout.
fn arrange_fleet(
    player: &mut Player,
    config: &GameConfig,
    rng: &mut SmallRng,
    input: &mut impl BufRead,
) -> anyhow::Result<()> {
    player
        .board
        .randomize(&config.fleet, rng)
        .map_err(|e| anyhow::anyhow!(e))?;
    loop {
        println!("\nYour fleet:");
        print!("{}", player.board.view(true));
        print!("ENTER to start, 'r' to reshuffle, a ship cell to rotate (A5) or a cell and H/V (A5 h): ");
        let line = read_line(input)?;
        if line.is_empty() {
            return Ok(());
        }
        if line.eq_ignore_ascii_case("r") {
            player
                .board
                .randomize(&config.fleet, rng)
                .map_err(|e| anyhow::anyhow!(e))?;
            continue;
        }
        let mut words = line.split_whitespace();
        let cell = words.next().unwrap_or_default();
        let wanted = match words.next() {
            None => None,
            Some(word) => match parse_orientation(word) {
                Some(o) => Some(o),
                None => {
                    println!("Invalid orientation '{}' - use H or V", word);
                    continue;
                }
            },
        };
        let (x, y) = match parse_coord(cell, player.board.size()) {
            Ok(coord) => coord,
            Err(e) => {
                println!("Invalid coordinate: {}", e);
                continue;
            }
        };
        let ship: Option<(ShipId, Orientation)> = player
            .board
            .peek(x, y)
            .map_err(|e| anyhow::anyhow!(e))?
            .map(|ship| (ship.id(), ship.orientation()));
        match ship {
            None => println!("No ship at {}", coord_to_string(x, y)),
            Some((_, current)) if wanted == Some(current) => {
                println!("Ship is already {:?}", current)
            }
            Some((id, _)) => match player.board.rotate_ship(id) {
                Ok(o) => println!("Ship rotated to {:?}", o),
                Err(e) => println!("Cannot rotate: {}", e),
            },
        }
    }
}

fn play(config: GameConfig, name: String, fixed_bot: bool, seed: Option<u64>) -> anyhow::Result<()> {
    if let Some(s) = seed {
        println!("Using fixed seed: {} (game will be reproducible)", s);
    }
    let mut rng = make_rng(seed);
    let stdin = io::stdin();
    let mut input = stdin.lock();

    let mut human = Player::human(name, &config).map_err(|e| anyhow::anyhow!(e))?;
    arrange_fleet(&mut human, &config, &mut rng, &mut input)?;
    let bot = if fixed_bot {
        let mut board = Board::from_config(&config).map_err(|e| anyhow::anyhow!(e))?;
        board
            .populate_fixed(&config.fleet)
            .map_err(|e| anyhow::anyhow!(e))?;
        Player::new("Computer", true, board)
    } else {
        Player::bot("Computer", &config, &mut rng).map_err(|e| anyhow::anyhow!(e))?
    };

    let engine_rng = SmallRng::from_rng(&mut rng);
    let mut engine = TurnEngine::new(config, engine_rng)
        .map_err(|e| anyhow::anyhow!(e))?
        .with_observer(Box::new(TerminalObserver::default()));
    engine.start_game(human, bot).map_err(|e| anyhow::anyhow!(e))?;

    loop {
        match engine.run().map_err(|e| anyhow::anyhow!(e))? {
            RoundOutcome::Finished(_) => break,
            _ => {
                let (player, enemy) = match (engine.active_player(), engine.enemy_player()) {
                    (Some(p), Some(e)) => (p, e),
                    _ => return Err(anyhow::anyhow!("no active session")),
                };
                print_boards(&player.board.view(true), &enemy.board.view(false));
                let size = enemy.board.size();
                print!("Enter target (e.g. A5): ");
                let line = read_line(&mut input)?;
                match parse_coord(&line, size) {
                    Ok((x, y)) => {
                        engine
                            .submit_attack(x, y)
                            .map_err(|e| anyhow::anyhow!(e))?;
                    }
                    Err(e) => println!("Invalid coordinate: {}", e),
                }
            }
        }
    }
    if let Some(winner) = engine.winner() {
        println!("{} won after {} moves.", winner.name, engine.turns());
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    init_logging(log::LevelFilter::Info);
    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            settings,
            name,
            fixed_bot,
            seed,
        } => {
            let config = load_config(&settings)?;
            play(config, name, fixed_bot, seed)?;
        }
        Commands::Sim {
            settings,
            seed1,
            seed2,
            verbose,
        } => {
            let config = load_config(&settings)?;
            let observer = TerminalObserver {
                show_boards: verbose,
            };
            let summary = if verbose {
                simulate(&config, seed1, seed2, Box::new(observer))
            } else {
                simulate(&config, seed1, seed2, Box::new(NullObserver))
            }
            .map_err(|e| anyhow::anyhow!(e))?;
            println!("{}", serde_json::to_string(&summary)?);
        }
    }
    Ok(())
}
