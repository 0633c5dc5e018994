//! treechain: composite trees and handler chains
//!
//! Architecture:
//! - `domain`: arena-backed composite tree, positional handler chain, errors
//! - `sample`: the fixed demonstration tree and chain
//! - `config`: layered settings (defaults, global file, explicit file, env)
//! - `cli`: argument parsing and command dispatch

pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod sample;
pub mod util;
