pub mod commands;
pub mod entities;
pub mod enums;
pub mod events;
pub mod value_objects;
