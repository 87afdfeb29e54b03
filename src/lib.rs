//! wfblock - Warframe matchmaking pair blocker
//!
//! Toggles one Windows firewall rule that blocks the game's outbound UDP
//! matchmaking ports, which forces the local machine to host.
//!
//! # Architecture
//!
//! - [`core`] - Port pairs, netsh command construction, status polling and action flows
//! - [`config`] - Environment-based runtime configuration
//! - [`elevation`] - Administrator detection and UAC relaunch
//! - [`fonts`] - CJK system font discovery
//! - [`theme`] - UI colors
//! - [`utils`] - Log directory helpers
//!
//! # Firewall Commands
//!
//! - `netsh advfirewall firewall add rule name=WarframePairBlockPort protocol=UDP dir=out localport=<a>-<b> action=block`
//! - `netsh advfirewall firewall set rule name=WarframePairBlockPort new enable=yes`
//! - `netsh advfirewall firewall delete rule name=WarframePairBlockPort`
//! - `netsh advfirewall firewall show rule name=WarframePairBlockPort dir=out`

// Allow pedantic clippy warnings that are not worth fixing for this codebase
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::missing_errors_doc)]

pub mod config;
pub mod core;
pub mod elevation;
pub mod fonts;
pub mod theme;
pub mod utils;

// Re-export commonly used types
pub use core::actions::{ActionOutcome, Notice};
pub use core::error::{Error, Result};
pub use core::netsh::{CommandRunner, FirewallCommand, RULE_NAME, SystemRunner};
pub use core::ports::{PortPair, PortRange};
pub use core::recover::AutoRecover;
pub use core::status::RuleStatus;
