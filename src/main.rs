use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, ValueEnum};
use snake_env::agent::{Agent, RandomAgent, ScriptedAgent};
use snake_env::game::{Environment, LevelConfig};
use snake_env::modes::{PlayConfig, PlayMode};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "snake_env")]
#[command(version, about = "Snake simulation environment for reinforcement learning")]
struct Cli {
    /// Level definition (JSON); a blank 10x10 level when omitted
    #[arg(long)]
    level: Option<PathBuf>,

    /// Agent that picks the actions
    #[arg(long, value_enum, default_value = "random")]
    agent: AgentKind,

    /// Action codes for the scripted agent: M(aintain), L(eft), R(ight), B(ack)
    #[arg(long, default_value = "")]
    actions: String,

    /// Number of episodes to play
    #[arg(long, default_value = "10")]
    num_episodes: usize,

    /// Seed for fruit placement and the random agent
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Clone, Copy, ValueEnum)]
enum AgentKind {
    /// Uniformly random actions
    Random,
    /// Replays the `--actions` script, then keeps direction
    Scripted,
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let level = match &cli.level {
        Some(path) => LevelConfig::load(path)?,
        None => LevelConfig::default(),
    };

    let seed = cli.seed.unwrap_or_else(rand::random);
    info!(seed, episodes = cli.num_episodes, "Starting session");

    let agent: Box<dyn Agent> = match cli.agent {
        AgentKind::Random => Box::new(RandomAgent::new(seed)),
        AgentKind::Scripted => Box::new(
            ScriptedAgent::parse(&cli.actions)
                .map_err(|c| anyhow!("Unknown action code {c:?} in --actions"))?,
        ),
    };

    let env = Environment::with_seed(level, seed);
    let mut play = PlayMode::new(env, agent, PlayConfig::new(cli.num_episodes));
    let summary = play.run()?.format_summary();

    for record in play.records() {
        let line = serde_json::to_string(record).context("Failed to serialize episode record")?;
        println!("{line}");
    }
    println!("{summary}");

    Ok(())
}
