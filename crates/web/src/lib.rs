//! pgforge web service
//!
//! HTTP control plane that shells out to `terraform` and `ansible-playbook`
//! to provision and configure a PostgreSQL primary/replica cluster.

pub mod ansible;
pub mod inventory;
pub mod runner;
pub mod server;
pub mod terraform;
