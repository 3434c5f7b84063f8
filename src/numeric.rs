//! Basic numerical concepts used throughout the program

/// Floating-point type of every momentum, energy and boost coefficient
pub type Float = f64;
