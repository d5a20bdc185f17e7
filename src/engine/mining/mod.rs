pub mod candidates;
pub mod closure;
pub mod gap;
pub mod miner;
pub mod projection;

#[cfg(test)]
mod gap_test;
