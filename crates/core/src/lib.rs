//! UCT Core - Game abstractions and common types
//!
//! This crate provides the core `Game` trait that defines the interface
//! any two-player game must implement to be searchable by the UCT agent.
//!
//! # Types
//!
//! - [`Game`] - Trait for game-engine implementations
//! - [`Player`] - One of the two fixed player identities
//! - [`PointsValues`] - Terminal outcome values for both players

mod error;
mod game;
mod types;

pub use error::{Result, UctError};
pub use game::Game;
pub use types::{Player, PointsValues};
