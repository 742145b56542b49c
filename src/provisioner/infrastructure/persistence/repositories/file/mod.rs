pub mod disabled_provisioning_transcript_repository_impl;
pub mod file_provisioning_transcript_repository_impl;
