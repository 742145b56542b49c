pub mod controllers;
pub mod process_command_runner;
pub mod server_process_controller;
