mod binary_io;

pub use binary_io::*;

#[cfg(test)]
mod binary_io_tests;
