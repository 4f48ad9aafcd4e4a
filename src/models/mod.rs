mod vector_3d;
mod body;

pub use vector_3d::*;
pub use body::*;

#[cfg(test)]
mod body_tests;
