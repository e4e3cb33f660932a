//! This crate summarizes a list of IP addresses and networks into the smallest equivalent set of
//! covering prefixes, the same way routers aggregate routes to compress their routing tables.
//! IPv4 and IPv6 are supported (as types from [ipnet](https://docs.rs/ipnet/2.10.0) or from the
//! standard library, and optionally from [ipnetwork](https://crates.io/crates/ipnetwork) or
//! [cidr](https://crates.io/crates/cidr)), and routes can be given as text.
//!
//! ```
//! # use routesum::*;
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut rs = RouteSum::new();
//! for route in ["10.0.0.0/24", "10.0.1.0/24", "10.0.2.0/24", "10.0.3.0/24", "10.0.3.7"] {
//!     rs.insert_str(route)?;
//! }
//! rs.insert_str("2001:db8::/48")?;
//! rs.insert_str("2001:db8::1")?;
//! assert_eq!(rs.summary_strings(), vec!["10.0.0.0/22", "2001:db8::/48"]);
//! # Ok(())
//! # }
//! ```
//!
//! # Description of the Tree
//!
//! Each address family is stored in an [`RSTrie`], a radix trie of radix 2 whose keys are the
//! binary representations of the routes ([`BitSlice`]). Each node carries a label of one or more
//! bits, and the key of a leaf is the concatenation of all labels from the root to that leaf.
//! Only leaves hold routes. As a route that is covered by another route never needs to be
//! stored, every node has either zero or two children, never one.
//!
//! Inserting a route walks down the tree and does one of the following:
//!
//! - If the route is a prefix of the node's key, the route covers the whole subtree. The node
//!   becomes a leaf holding the route.
//! - If the node is a leaf whose key is a prefix of the route, the route is already covered, and
//!   nothing changes.
//! - If the node is internal and its key is a prefix of the route, the walk continues at the
//!   child selected by the next bit of the route.
//! - Otherwise, the key and the route diverge, and the node is split into a branch whose two
//!   children are the old node and a new leaf.
//!
//! Afterwards, the ancestors of the modified node are visited bottom-up. An ancestor whose two
//! children are leaves of a single bit each spans all addresses below it, and its children are
//! removed. This way, inserting the last missing address of a network can merge many levels at
//! once.
//!
//! # Operations on the tree
//!
//! | Operation                        | Complexity          |
//! |----------------------------------|---------------------|
//! | `insert_route`, `insert`         | `O(w)` (amortized)  |
//! | `contents`, `iter`, `summary`    | `O(n)`              |
//! | `len` and `is_empty`             | `O(1)`              |
//!
//! where `w` is the width of the key in bits, and `n` is the number of nodes. A route that covers
//! stored routes frees their nodes, which is paid for by the inserts that created them. Removing routes
//! and longest-prefix lookups are not supported.

#![deny(missing_docs)]

mod bitslice;
mod error;
mod fmt;
mod route;
#[cfg(feature = "serde")]
mod serde;
mod summary;
#[cfg(test)]
mod fuzzing;

pub mod rstrie;

pub use bitslice::{BitSlice, MAX_BITS, MAX_BYTES};
pub use error::{BitSliceError, Error};
pub use route::{parse_route, Family, IpRoute, Route};
pub use rstrie::RSTrie;
pub use summary::RouteSum;
