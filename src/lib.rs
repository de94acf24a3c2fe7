//! Warfront - battle resolution for an asynchronous army-building wargame
//!
//! The [`battle`] engine is the core: two armies and a seeded variance
//! source in, a winner and a battle log out. [`registry`] and [`auth`]
//! provide the stores and the caller check around it.

pub mod auth;
pub mod battle;
pub mod core;
pub mod registry;
pub mod roster;
