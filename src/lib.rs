//! Wraptris: a falling-block game with two rule sets.
//!
//! Classic mode is the bounded 10x20 board with independent single-row
//! clears; advanced mode plays on a 12x20 wrap-around board where only runs
//! of at least two consecutive full rows clear, cascading.
//!
//! The simulation core under [`core`] is pure and deterministic (seeded
//! sessions, injected shape catalog); [`sequencer`] and [`stage`] choreograph
//! the game-over transition against an abstract presentation seam; [`term`]
//! and [`input`] provide the crossterm front end used by the default binary.

pub mod core;
pub mod error;
pub mod input;
pub mod sequencer;
pub mod stage;
pub mod term;
pub mod types;
