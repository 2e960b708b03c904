mod fish;
mod hunter;

pub use fish::*;
pub use hunter::*;
