//! Game-playing harness for the UCT search agent.
//!
//! Plays a series of full games between configurable agents (seeded MCTS
//! or uniform random) on the bundled boards and prints the tally. Each
//! move hands the current position to the agent; the search keeps no
//! state between moves beyond its RNG stream.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::fmt;
use uct_core::{Game, Player, PointsValues};
use uct_mcts::{
    games::{NestedTicTacToe, TicTacToe},
    Mcts, SearchConfig,
};

/// UCT game-playing harness.
#[derive(Parser)]
#[command(name = "uct-play")]
#[command(about = "Play board games with the UCT search agent")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a series of games and print the tally.
    Play {
        /// Board to play on.
        #[arg(long, value_enum, default_value_t = Board::Nested)]
        board: Board,

        /// Agent moving first (player 1).
        #[arg(long, value_enum, default_value_t = Agent::Mcts)]
        one: Agent,

        /// Agent moving second (player 2).
        #[arg(long, value_enum, default_value_t = Agent::Random)]
        two: Agent,

        /// Number of games to play.
        #[arg(short, long, default_value = "10")]
        games: u64,

        /// MCTS iteration budget per move.
        #[arg(short, long, default_value = "750")]
        iterations: u32,

        /// Random seed for reproducibility.
        #[arg(long, default_value = "42")]
        seed: u64,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Board {
    Tictactoe,
    Nested,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Agent {
    Mcts,
    Random,
}

impl fmt::Display for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Agent::Mcts => write!(f, "mcts"),
            Agent::Random => write!(f, "random"),
        }
    }
}

/// Aggregate results over a series.
#[derive(Default)]
struct Tally {
    one: u64,
    two: u64,
    draws: u64,
}

impl Tally {
    fn record(&mut self, points: PointsValues) {
        match points.winner() {
            Some(Player::One) => self.one += 1,
            Some(Player::Two) => self.two += 1,
            None => self.draws += 1,
        }
    }
}

/// Play one full game, returning the terminal outcome.
fn play_game<G: Game>(
    game: &G,
    one: Agent,
    two: Agent,
    iterations: u32,
    seed: u64,
) -> Result<PointsValues> {
    let config = SearchConfig::with_iterations(iterations);
    let mut mcts_one: Mcts<G, _> =
        Mcts::new(config.clone(), ChaCha8Rng::seed_from_u64(seed));
    let mut mcts_two: Mcts<G, _> =
        Mcts::new(config, ChaCha8Rng::seed_from_u64(seed.wrapping_add(0x5ee0)));
    let mut rng = ChaCha8Rng::seed_from_u64(seed.wrapping_add(1));

    let mut state = game.initial_state();
    while !game.is_ended(&state) {
        let to_move = game.current_player(&state);
        let agent = if to_move == Player::One { one } else { two };

        let action = match agent {
            Agent::Mcts => {
                let mcts = if to_move == Player::One {
                    &mut mcts_one
                } else {
                    &mut mcts_two
                };
                mcts.think(game, &state)?
            }
            Agent::Random => {
                let actions = game.legal_actions(&state);
                actions[rng.gen_range(0..actions.len())]
            }
        };
        state = game.next_state(&state, action);
    }

    game.points_values(&state)
        .context("engine reported a final state without an outcome")
}

fn play_series<G: Game>(
    game: &G,
    one: Agent,
    two: Agent,
    games: u64,
    iterations: u32,
    seed: u64,
) -> Result<Tally> {
    let mut tally = Tally::default();
    for i in 0..games {
        let points = play_game(game, one, two, iterations, seed.wrapping_add(i))?;
        tally.record(points);

        let result = match points.winner() {
            Some(player) => format!("player {player} wins"),
            None => "draw".to_string(),
        };
        println!("  game {}: {}", i + 1, result);
    }
    Ok(tally)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            board,
            one,
            two,
            games,
            iterations,
            seed,
        } => {
            println!(
                "Playing {games} game(s): {one} (player 1) vs {two} (player 2), \
                 {iterations} iterations, seed {seed}"
            );

            let tally = match board {
                Board::Tictactoe => {
                    play_series(&TicTacToe, one, two, games, iterations, seed)?
                }
                Board::Nested => {
                    play_series(&NestedTicTacToe, one, two, games, iterations, seed)?
                }
            };

            println!("================================");
            println!("Player 1 ({one}) wins: {}", tally.one);
            println!("Player 2 ({two}) wins: {}", tally.two);
            println!("Draws:                {}", tally.draws);
        }
    }

    Ok(())
}
