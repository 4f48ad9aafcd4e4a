mod graph;
mod layout;

pub use graph::*;
pub use layout::*;

#[cfg(test)]
mod layout_tests;
