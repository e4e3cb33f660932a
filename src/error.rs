//! Error types of the text and byte conversion layer. The trie itself never fails.

use thiserror::Error;

/// Error when building a [`crate::BitSlice`] from bytes or from a string of binary digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BitSliceError {
    /// No bits were given where a non-empty sequence is required.
    #[error("cannot build a bit slice from an empty buffer")]
    Empty,
    /// More than 128 bits were given.
    #[error("a bit slice holds at most 128 bits, got {0}")]
    TooLong(usize),
    /// The string contains a character other than `0` or `1`.
    #[error("invalid binary digit {0:?}")]
    InvalidDigit(char),
}

/// Error raised when inserting a route that is given as text or as raw bytes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The input looks like a network (`address/length`), but is not valid CIDR. This includes
    /// prefix lengths that are out of range for the address family.
    #[error("parse network {input:?}: {source}")]
    Parse {
        /// The offending input
        input: String,
        /// Reason why the network could not be parsed
        source: ipnet::AddrParseError,
    },
    /// The input is neither a valid IPv4 nor IPv6 address.
    #[error("parse IP {input:?}: {source}")]
    ParseAddr {
        /// The offending input
        input: String,
        /// Reason why the address could not be parsed
        source: std::net::AddrParseError,
    },
    /// The number of address bytes matches no address family.
    #[error("{input}: {len} bytes are neither an IPv4 nor an IPv6 address")]
    UnknownFamily {
        /// The offending input
        input: String,
        /// Number of bytes given
        len: usize,
    },
    /// The prefix length exceeds the width of the address family.
    #[error("{input}: prefix length {prefix_len} exceeds the maximum of {max}")]
    InvalidPrefix {
        /// The offending input
        input: String,
        /// The requested prefix length
        prefix_len: u8,
        /// The address width of the family
        max: u8,
    },
    /// Expressing the address as bits failed.
    #[error("express {input} as bits: {source}")]
    Conversion {
        /// The offending input
        input: String,
        /// Reason of the failure
        source: BitSliceError,
    },
}
