use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use holdem_sim::agents::PlayerModelKind;
use holdem_sim::config::SimulationConfig;
use holdem_sim::game::Game;
use holdem_sim::stats::Statistics;
use log::info;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum GameType {
    Holdem,
}

/// Simulate Texas Hold'em deals and report showdown statistics.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Game to simulate.
    game_type: GameType,
    /// Number of players.
    #[arg(short, long, default_value_t = 10, value_parser = clap::value_parser!(u8).range(2..=23))]
    players: u8,
    /// Number of deals to play.
    #[arg(short, long, default_value_t = 100_000_000)]
    iterations: u64,
    /// Directory the reports are written to.
    #[arg(short, long = "output-dir", default_value = ".")]
    output_dir: PathBuf,
    /// Append distribution rows to existing report files.
    #[arg(short, long)]
    append_output: bool,
    /// Collect winning hand type distributions.
    #[arg(long)]
    stats_winning_hand: bool,
    /// Collect hole card statistics.
    #[arg(long)]
    stats_hole_cards: bool,
    /// Player model for every seat (showdown, miller_tight).
    #[arg(long, default_value_t = PlayerModelKind::Showdown)]
    player_model: PlayerModelKind,
    /// RNG seed for a reproducible run.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .format_target(false)
        .format_timestamp_millis()
        .parse_default_env()
        .init();

    let cli = Cli::parse();
    let config = SimulationConfig {
        players: cli.players as usize,
        iterations: cli.iterations,
        output_dir: cli.output_dir,
        append_output: cli.append_output,
        stats_winning_hand: cli.stats_winning_hand,
        stats_hole_cards: cli.stats_hole_cards,
        player_model: cli.player_model,
        seed: cli.seed,
    };
    config.validate()?;
    config.check_output_dir()?;

    let seed = config.seed.unwrap_or_else(|| rand::rng().random());
    info!(
        "players: {} iterations: {} model: {} seed: {seed}",
        config.players, config.iterations, config.player_model
    );

    let mut stats = Statistics::new(&config);
    let rng = ChaCha8Rng::seed_from_u64(seed);
    let mut game = match cli.game_type {
        GameType::Holdem => Game::new(config.players, config.player_model, rng),
    };
    let start = Instant::now();
    let step = (config.iterations / 50).max(1);
    for i in 0..config.iterations {
        if i > 0 && i % step == 0 {
            info!("{}% ({:.0?})", i * 100 / config.iterations, start.elapsed());
        }
        game.play(&mut stats).with_context(|| format!("deal {i} failed"))?;
    }
    info!("played {} deals in {:.2?}", config.iterations, start.elapsed());

    let written = stats
        .write_reports(&config.output_dir, config.append_output)
        .context("writing reports")?;
    info!("wrote {} report files to {}", written.len(), config.output_dir.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn holdem_is_the_only_game() {
        let cli = Cli::try_parse_from(["poker-sim", "holdem", "-p", "3", "--seed", "7"]).unwrap();
        assert!(matches!(cli.game_type, GameType::Holdem));
        assert_eq!(cli.players, 3);
        assert_eq!(cli.seed, Some(7));
        assert!(Cli::try_parse_from(["poker-sim", "omaha"]).is_err());
        assert!(Cli::try_parse_from(["poker-sim", "holdem", "-p", "24"]).is_err());
    }
}
