pub mod provision_database_command;
