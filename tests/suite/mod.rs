//! Integration test modules

mod cli;
mod workflow;
