//! Core firewall rule functionality
//!
//! This module contains the types and logic for toggling the matchmaking
//! block rule through netsh. It provides:
//!
//! - [`ports`]: The selectable port pairs and port range validation
//! - [`netsh`]: Command construction and the [`netsh::CommandRunner`] seam
//! - [`status`]: Rule status polling
//! - [`actions`]: Block, restore and console flows
//! - [`recover`]: Auto-recover countdown after a block
//! - [`error`]: Error types for firewall operations

pub mod actions;
pub mod error;
pub mod netsh;
pub mod ports;
pub mod recover;
pub mod status;

#[cfg(test)]
pub mod test_helpers;
