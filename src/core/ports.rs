//! Port pair selection and port range validation
//!
//! The UI offers a closed set of port pairs. Each pair is presented as a
//! label such as `"4950 & 4955"` and becomes the inclusive local-port range
//! `4950-4955` handed to netsh.

use crate::core::error::{Error, Result};
use std::str::FromStr;
use strum::{Display, EnumIter, IntoEnumIterator, IntoStaticStr};

/// Separator between the two endpoints of a port pair label
pub const PORT_PAIR_SEPARATOR: &str = " & ";

/// The UDP port pairs the game may be configured to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumIter, IntoStaticStr)]
pub enum PortPair {
    #[default]
    #[strum(serialize = "4950 & 4955")]
    P4950,
    #[strum(serialize = "4960 & 4965")]
    P4960,
    #[strum(serialize = "4970 & 4975")]
    P4970,
    #[strum(serialize = "4980 & 4985")]
    P4980,
    #[strum(serialize = "4990 & 4995")]
    P4990,
    #[strum(serialize = "3074 & 3080")]
    P3074,
}

impl PortPair {
    pub fn all() -> Vec<Self> {
        Self::iter().collect()
    }

    /// Label shown in the dropdown, e.g. `"4950 & 4955"`
    pub fn label(self) -> &'static str {
        self.into()
    }

    /// Splits the label into its two endpoint strings
    pub fn endpoints(self) -> (&'static str, &'static str) {
        // Every variant label contains exactly one separator
        self.label()
            .split_once(PORT_PAIR_SEPARATOR)
            .unwrap_or((self.label(), self.label()))
    }

    /// Inclusive local-port range covered by this pair
    pub fn range(self) -> PortRange {
        // Labels are compile-time constants and always parse
        parse_port_range(self.label()).unwrap_or(PortRange { start: 0, end: 0 })
    }
}

impl FromStr for PortPair {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Self::iter()
            .find(|pair| pair.label() == wanted)
            .ok_or_else(|| Error::InvalidPortPair(wanted.to_string()))
    }
}

/// An inclusive range of local ports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PortRange {
    pub start: u16,
    pub end: u16,
}

impl PortRange {
    /// Renders the range the way netsh expects it (`start-end`)
    pub fn to_netsh_arg(&self) -> String {
        format!("{}-{}", self.start, self.end)
    }
}

impl std::fmt::Display for PortRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Validates a port number is in the valid range (1-65535).
///
/// # Errors
///
/// Returns `Err` if port is 0.
pub fn validate_port(port: u16) -> std::result::Result<u16, String> {
    if port == 0 {
        Err("Port must be between 1 and 65535".to_string())
    } else {
        Ok(port)
    }
}

/// Validates a port range.
///
/// # Errors
///
/// Returns `Err` if either port is invalid or start > end.
pub fn validate_port_range(start: u16, end: u16) -> std::result::Result<(u16, u16), String> {
    validate_port(start)?;
    validate_port(end)?;

    if start > end {
        Err("Start port must be less than or equal to end port".to_string())
    } else {
        Ok((start, end))
    }
}

/// Parses a label of the form `"<start> & <end>"` into a validated range.
///
/// # Errors
///
/// Returns `Err` if the label does not split into exactly two numeric
/// endpoints, or the endpoints do not form a valid range.
pub fn parse_port_range(label: &str) -> Result<PortRange> {
    let parts: Vec<&str> = label.trim().split(PORT_PAIR_SEPARATOR).collect();
    let [start, end] = parts.as_slice() else {
        return Err(Error::InvalidPortRange(format!(
            "expected two ports separated by '{}', got '{label}'",
            PORT_PAIR_SEPARATOR.trim()
        )));
    };

    let parse = |s: &str| {
        s.trim()
            .parse::<u16>()
            .map_err(|_| Error::InvalidPortRange(format!("'{s}' is not a port number")))
    };
    let (start, end) =
        validate_port_range(parse(start)?, parse(end)?).map_err(Error::InvalidPortRange)?;

    Ok(PortRange { start, end })
}
