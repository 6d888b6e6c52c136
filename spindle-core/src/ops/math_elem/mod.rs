//! Elementwise transcendental functions.

pub mod exp;
pub mod ln;

#[cfg(test)]
#[path = "math_elem_test.rs"]
mod tests;
