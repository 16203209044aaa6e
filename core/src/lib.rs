pub mod core;
pub mod error;
pub mod structs;

mod artifacts;
mod filesystem;
mod utils;
