//! Structural operators that move elements without arithmetic.

pub mod concat;
pub mod identity;

#[cfg(test)]
#[path = "concat_test.rs"]
mod tests;
