#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays a Halite game over stdin and stdout.

mod protocol;

use std::{
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
    sync::Mutex,
    time::{SystemTime, UNIX_EPOCH},
};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use halite_fleet_core::{PlayerId, Tuning};
use halite_fleet_system_commander::{Commander, Config};
use halite_fleet_world::{self as world, World};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::protocol::HostReader;

/// Command-line arguments accepted by the bot.
#[derive(Debug, Parser)]
#[command(name = "halite-fleet", about = "Halite fleet bot speaking the host's text protocol")]
struct CliArgs {
    /// Seed for tie-breaking; defaults to the clock mixed with the process id.
    seed: Option<u64>,
    /// TOML file overriding the default tuning knobs.
    #[arg(long, value_name = "PATH")]
    tuning: Option<PathBuf>,
    /// Name announced to the host.
    #[arg(long, default_value = "halite-fleet")]
    name: String,
    /// Directory receiving the per-player log file.
    #[arg(long, value_name = "DIR", default_value = ".")]
    log_dir: PathBuf,
}

/// Entry point for the Halite fleet bot.
fn main() -> Result<()> {
    let args = CliArgs::parse();
    let tuning = load_tuning(args.tuning.as_deref())?;

    let stdin = io::stdin();
    let mut reader = HostReader::new(stdin.lock());
    let setup = reader.read_setup().context("failed to read game setup")?;
    init_logging(&args.log_dir, setup.my_id)?;

    let seed = args.seed.unwrap_or_else(default_seed);
    let player_count = setup.shipyards.len();
    let my_id = setup.my_id;
    let mut world = World::new(setup).context("host announced an inconsistent game")?;
    let mut commander = Commander::new(&world, Config::new(tuning, seed));
    info!(player = my_id.get(), seed, players = player_count, "bot ready");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{}", args.name).context("failed to announce bot name")?;
    out.flush().context("failed to announce bot name")?;

    while let Some(updates) = reader
        .read_frame(player_count)
        .context("failed to read turn frame")?
    {
        for update in updates {
            world::apply(&mut world, update);
        }
        let commands = commander.plan_turn(&world);
        protocol::write_commands(&mut out, &commands).context("failed to send commands")?;
    }

    info!(turn = world::query::turn(&world), "host closed the stream");
    Ok(())
}

fn load_tuning(path: Option<&Path>) -> Result<Tuning> {
    let Some(path) = path else {
        return Ok(Tuning::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read tuning file {}", path.display()))?;
    let tuning: Tuning = toml::from_str(&text)
        .with_context(|| format!("failed to parse tuning file {}", path.display()))?;
    tuning
        .validate()
        .with_context(|| format!("invalid tuning in {}", path.display()))?;
    Ok(tuning)
}

fn init_logging(dir: &Path, player: PlayerId) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create log directory {}", dir.display()))?;
    let path = dir.join(format!("halite-fleet-{}.log", player.get()));
    let file = File::create(&path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|error| anyhow!("failed to install logger: {error}"))
}

fn default_seed() -> u64 {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_nanos() as u64);
    nanos ^ u64::from(std::process::id())
}
