// Build-and-launch frontend for the Archon container pair: verifies the
// container engine, checks the required host ports, builds both images and
// starts the app container.

pub mod config;
pub mod docker;
pub mod envfile;
pub mod launch;
pub mod ports;
