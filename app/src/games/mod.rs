mod logic;

pub use logic::*;
