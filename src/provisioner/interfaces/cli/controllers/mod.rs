pub mod provisioner_cli_controller;
