pub mod controllers;
pub mod listeners;
pub mod resources;
