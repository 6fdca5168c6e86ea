//! Player models: the decision hook each seat consults during a betting round.
//!
//! The simulator only needs everyone to reach showdown, so the shipped models
//! always check. Anything else is reported by the game loop as
//! [`GameError::UnimplementedAction`](crate::game::GameError::UnimplementedAction).

use crate::game::{Player, Street, Table};
use core::fmt;
use std::str::FromStr;

/// What a player chose to do when it was their turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum PlayerAction {
    Fold,
    Check,
    Raise,
    RaiseAllIn,
}

impl fmt::Display for PlayerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PlayerAction::Fold => "fold",
            PlayerAction::Check => "check",
            PlayerAction::Raise => "raise",
            PlayerAction::RaiseAllIn => "raise all-in",
        })
    }
}

/// Decides an action for the player in `position` given the table state.
pub trait PlayerModel: fmt::Debug {
    fn act(&mut self, table: &Table, street: Street, position: usize, player: &Player) -> PlayerAction;
}

/// Stays in every hand until showdown.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShowdownModel;

impl PlayerModel for ShowdownModel {
    fn act(&mut self, _table: &Table, _street: Street, _position: usize, _player: &Player) -> PlayerAction {
        PlayerAction::Check
    }
}

/// Placeholder for a tight starting-hand policy; checks for now.
#[derive(Debug, Clone, Copy, Default)]
pub struct MillerTightModel;

impl PlayerModel for MillerTightModel {
    fn act(&mut self, _table: &Table, _street: Street, _position: usize, _player: &Player) -> PlayerAction {
        PlayerAction::Check
    }
}

/// Registry of the named player models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayerModelKind {
    #[default]
    Showdown,
    MillerTight,
}

impl PlayerModelKind {
    pub const ALL: [PlayerModelKind; 2] = [PlayerModelKind::Showdown, PlayerModelKind::MillerTight];

    pub const fn name(self) -> &'static str {
        match self {
            PlayerModelKind::Showdown => "showdown",
            PlayerModelKind::MillerTight => "miller_tight",
        }
    }

    pub fn create(self) -> Box<dyn PlayerModel> {
        match self {
            PlayerModelKind::Showdown => Box::new(ShowdownModel),
            PlayerModelKind::MillerTight => Box::new(MillerTightModel),
        }
    }
}

impl fmt::Display for PlayerModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unrecognized player model: {0}")]
pub struct UnknownModelError(pub String);

impl FromStr for PlayerModelKind {
    type Err = UnknownModelError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PlayerModelKind::ALL
            .iter()
            .copied()
            .find(|k| k.name() == s)
            .ok_or_else(|| UnknownModelError(s.to_string()))
    }
}
