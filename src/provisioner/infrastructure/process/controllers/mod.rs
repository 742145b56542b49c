pub mod pg_ctl_server_process_controller_impl;
pub mod systemctl_server_process_controller_impl;
pub mod unmanaged_server_process_controller_impl;
