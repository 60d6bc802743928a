pub mod changelog;
pub mod cleanup;
pub mod config;
pub mod fragments;
pub mod generator;
pub mod git_ops;

pub mod testing;
