pub mod allen;
pub mod tirp_writer;

#[cfg(test)]
mod allen_test;
