//! Message handlers
//!
//! Handlers take the UI state explicitly and return the follow-up task, so
//! the firewall flows never reach for process-wide state.

pub mod firewall;
pub mod recover;

#[cfg(test)]
pub mod test_utils;

pub(crate) use firewall::*;
pub(crate) use recover::*;
