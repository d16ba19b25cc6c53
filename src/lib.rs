//! Pokedex CLI Library
//!
//! This module exposes the cache, API client, and command loop for use in
//! integration tests.

pub mod cache;
pub mod cli;
pub mod commands;
pub mod data;
pub mod input;
pub mod repl;
