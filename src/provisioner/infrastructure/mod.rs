pub mod persistence;
pub mod process;
