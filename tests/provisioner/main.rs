
mod cli_resource_tests;
mod idempotence_tests;
mod provision_scenario_tests;
