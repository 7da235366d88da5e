pub mod engine;
pub mod logic;

#[cfg(test)]
mod log_capture;
