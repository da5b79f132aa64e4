//! Block Blast (workspace facade crate).
//!
//! Re-exports the workspace crates under one roof as
//! `block_blast::{core,engine,input,term,types}` and hosts the environment
//! configuration used by the terminal binary.

pub mod config;

pub use block_blast_core as core;
pub use block_blast_engine as engine;
pub use block_blast_input as input;
pub use block_blast_term as term;
pub use block_blast_types as types;

pub use config::AppConfig;
