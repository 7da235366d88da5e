pub mod board;
pub mod execution;
pub mod game;
pub mod generator;
pub mod rules;

#[cfg(test)]
mod execution_test;
