//! Description of the generic type `Route`, and conversion of keys back into addresses.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use ipnet::{IpNet, Ipv4Net, Ipv6Net};

use crate::{BitSlice, Error};

/// Address family of a route. Keys of different families are never stored in the same trie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Family {
    /// IPv4, using 32-bit keys
    V4,
    /// IPv6, using 128-bit keys
    V6,
}

impl Family {
    /// Width of an address in bits.
    pub fn bits(&self) -> u8 {
        match self {
            Family::V4 => 32,
            Family::V6 => 128,
        }
    }

    /// Width of an address in bytes.
    pub fn bytes(&self) -> usize {
        self.bits() as usize / 8
    }

    /// Get the family whose addresses are `len` bytes wide.
    pub fn from_byte_len(len: usize) -> Option<Self> {
        match len {
            4 => Some(Family::V4),
            16 => Some(Family::V6),
            _ => None,
        }
    }

    /// Build the address whose leading bits are `key`. Missing bits are set to zero.
    pub fn addr_from_bits(&self, key: &BitSlice) -> IpAddr {
        match self {
            Family::V4 => {
                let mut octets = [0u8; 4];
                octets.copy_from_slice(&key.to_bytes(4));
                IpAddr::V4(octets.into())
            }
            Family::V6 => {
                let mut octets = [0u8; 16];
                octets.copy_from_slice(&key.to_bytes(16));
                IpAddr::V6(octets.into())
            }
        }
    }
}

/// Trait for anything that can be summarized: addresses and networks.
pub trait Route {
    /// The address family of the route.
    fn family(&self) -> Family;

    /// The key of the route: the address truncated to the prefix length. Addresses use all bits
    /// of their family.
    fn key(&self) -> BitSlice;
}

impl<R: Route + ?Sized> Route for &R {
    fn family(&self) -> Family {
        (**self).family()
    }

    fn key(&self) -> BitSlice {
        (**self).key()
    }
}

impl Route for Ipv4Addr {
    fn family(&self) -> Family {
        Family::V4
    }

    fn key(&self) -> BitSlice {
        BitSlice::from_repr(u32::from(*self), 32)
    }
}

impl Route for Ipv6Addr {
    fn family(&self) -> Family {
        Family::V6
    }

    fn key(&self) -> BitSlice {
        BitSlice::from_repr(u128::from(*self), 128)
    }
}

impl Route for IpAddr {
    fn family(&self) -> Family {
        match self {
            IpAddr::V4(_) => Family::V4,
            IpAddr::V6(_) => Family::V6,
        }
    }

    fn key(&self) -> BitSlice {
        match self {
            IpAddr::V4(a) => a.key(),
            IpAddr::V6(a) => a.key(),
        }
    }
}

impl Route for Ipv4Net {
    fn family(&self) -> Family {
        Family::V4
    }

    fn key(&self) -> BitSlice {
        BitSlice::from_repr(u32::from(self.addr()), self.prefix_len())
    }
}

impl Route for Ipv6Net {
    fn family(&self) -> Family {
        Family::V6
    }

    fn key(&self) -> BitSlice {
        BitSlice::from_repr(u128::from(self.addr()), self.prefix_len())
    }
}

impl Route for IpNet {
    fn family(&self) -> Family {
        match self {
            IpNet::V4(_) => Family::V4,
            IpNet::V6(_) => Family::V6,
        }
    }

    fn key(&self) -> BitSlice {
        match self {
            IpNet::V4(n) => n.key(),
            IpNet::V6(n) => n.key(),
        }
    }
}

#[cfg(feature = "ipnetwork")]
mod ipnetwork_impl {
    use ipnetwork::{IpNetwork, Ipv4Network, Ipv6Network};

    use super::*;

    impl Route for Ipv4Network {
        fn family(&self) -> Family {
            Family::V4
        }

        fn key(&self) -> BitSlice {
            BitSlice::from_repr(u32::from(self.ip()), self.prefix())
        }
    }

    impl Route for Ipv6Network {
        fn family(&self) -> Family {
            Family::V6
        }

        fn key(&self) -> BitSlice {
            BitSlice::from_repr(u128::from(self.ip()), self.prefix())
        }
    }

    impl Route for IpNetwork {
        fn family(&self) -> Family {
            match self {
                IpNetwork::V4(_) => Family::V4,
                IpNetwork::V6(_) => Family::V6,
            }
        }

        fn key(&self) -> BitSlice {
            match self {
                IpNetwork::V4(n) => n.key(),
                IpNetwork::V6(n) => n.key(),
            }
        }
    }
}

#[cfg(feature = "cidr")]
mod cidr_impl {
    use cidr::{IpCidr, Ipv4Cidr, Ipv6Cidr};

    use super::*;

    impl Route for Ipv4Cidr {
        fn family(&self) -> Family {
            Family::V4
        }

        fn key(&self) -> BitSlice {
            BitSlice::from_repr(u32::from(self.first_address()), self.network_length())
        }
    }

    impl Route for Ipv6Cidr {
        fn family(&self) -> Family {
            Family::V6
        }

        fn key(&self) -> BitSlice {
            BitSlice::from_repr(u128::from(self.first_address()), self.network_length())
        }
    }

    impl Route for IpCidr {
        fn family(&self) -> Family {
            match self {
                IpCidr::V4(_) => Family::V4,
                IpCidr::V6(_) => Family::V6,
            }
        }

        fn key(&self) -> BitSlice {
            match self {
                IpCidr::V4(n) => n.key(),
                IpCidr::V6(n) => n.key(),
            }
        }
    }
}

/// Either a single host address, or a network of more than one address. This is how routes are
/// read from text, and how the summary is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IpRoute {
    /// A single host address
    Addr(IpAddr),
    /// A network of more than one address
    Net(IpNet),
}

impl IpRoute {
    /// Turn a stored key of the given family back into an address or a network.
    pub fn from_key(family: Family, key: &BitSlice) -> Self {
        let key = key.truncate(family.bits());
        let addr = family.addr_from_bits(&key);
        if key.len() == family.bits() {
            return IpRoute::Addr(addr);
        }
        match IpNet::new(addr, key.len()) {
            Ok(net) => IpRoute::Net(net),
            Err(_) => IpRoute::Addr(addr),
        }
    }
}

impl Route for IpRoute {
    fn family(&self) -> Family {
        match self {
            IpRoute::Addr(a) => a.family(),
            IpRoute::Net(n) => n.family(),
        }
    }

    fn key(&self) -> BitSlice {
        match self {
            IpRoute::Addr(a) => a.key(),
            IpRoute::Net(n) => n.key(),
        }
    }
}

/// Parse either a network (`address/length`) or a bare address. Host bits of a network beyond
/// its prefix length are kept in the result, but are ignored by [`Route::key`].
///
/// ```
/// # use routesum::*;
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// assert_eq!(parse_route("10.0.0.1")?, IpRoute::Addr("10.0.0.1".parse()?));
/// assert_eq!(parse_route("2001:db8::/32")?, IpRoute::Net("2001:db8::/32".parse()?));
/// assert!(parse_route("10.0.0.0/33").is_err());
/// assert!(parse_route("not an address").is_err());
/// # Ok(())
/// # }
/// ```
pub fn parse_route(s: &str) -> Result<IpRoute, Error> {
    if s.contains('/') {
        s.parse::<IpNet>()
            .map(IpRoute::Net)
            .map_err(|source| Error::Parse {
                input: s.to_string(),
                source,
            })
    } else {
        s.parse::<IpAddr>()
            .map(IpRoute::Addr)
            .map_err(|source| Error::ParseAddr {
                input: s.to_string(),
                source,
            })
    }
}
