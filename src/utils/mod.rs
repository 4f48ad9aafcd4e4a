pub mod errors;
mod constants;
mod layout_config;
mod random;

pub use errors::*;
pub use constants::*;
pub use layout_config::*;
pub use random::*;

#[cfg(test)]
mod layout_config_tests;
