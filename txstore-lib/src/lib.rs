pub mod config;
pub mod indexes;
pub mod provisioner;
pub mod seed;
pub mod tracing;
