//! holdem-sim: Texas Hold'em deal simulator
//!
//! Plays millions of random deals to showdown and records which hand types
//! win and which starting hands beat which. The pieces:
//! - [`evaluator`]: incremental 7-card evaluator and the 24-bit sort code
//! - [`classifier`]: the 169 canonical starting-hand classes
//! - [`stats`]: beat matrices, win counters and CSV reports
//! - [`game`]: deal loop with stub player models from [`agents`]
//!
//! ## Quick start: evaluate hands on a shared board
//! ```
//! use holdem_sim::evaluator::{HandEvaluator, HandType};
//! use holdem_sim::hand::{Board, HoleCards};
//!
//! let board: Board = "Kh 4d 2d Ts Qc".parse().unwrap();
//! let mut eval = HandEvaluator::new();
//! eval.reset(board.as_slice());
//!
//! let straight = eval.evaluate(&"Jh Ad".parse::<HoleCards>().unwrap());
//! let pair = eval.evaluate(&"Kd 9c".parse::<HoleCards>().unwrap());
//! assert_eq!(straight.hand_type(), HandType::Straight);
//! assert!(straight > pair);
//! ```
//!
//! ## Simulator
//! ```sh
//! cargo run --release --bin poker-sim -- holdem -p 6 -i 1000000 --stats-hole-cards
//! ```

pub mod agents;
pub mod cards;
pub mod classifier;
pub mod config;
pub mod deck;
pub mod evaluator;
pub mod game;
pub mod hand;
pub mod stats;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
