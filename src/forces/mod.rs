mod force_laws;

pub use force_laws::*;
