//! The summary over both address families.

use std::net::IpAddr;

use ipnet::IpNet;
use log::debug;

use crate::{parse_route, BitSlice, Error, Family, IpRoute, RSTrie, Route};

/// Summary of IPv4 and IPv6 routes. Every route is stored in the trie of its address family, and
/// the summary is reported with all IPv4 routes first.
///
/// ```
/// # use routesum::*;
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut rs = RouteSum::new();
/// for route in ["10.0.0.0/24", "10.0.1.0/24", "10.0.2.0/23", "192.168.1.1", "2001:db8::1"] {
///     rs.insert_str(route)?;
/// }
/// assert_eq!(rs.summary_strings(), vec!["10.0.0.0/22", "192.168.1.1", "2001:db8::1"]);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Default, PartialEq, Eq)]
pub struct RouteSum {
    pub(crate) ipv4: RSTrie,
    pub(crate) ipv6: RSTrie,
}

impl RouteSum {
    /// Create an empty summary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a summary of all routes in `iter`, each given as text. Fails on the first route
    /// that cannot be parsed.
    pub fn from_strs<I, S>(iter: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut rs = Self::new();
        for s in iter {
            rs.insert_str(s.as_ref())?;
        }
        Ok(rs)
    }

    /// Add an address or a network to the summary.
    pub fn insert<R: Route>(&mut self, route: R) {
        self.trie_mut(route.family()).insert_route(route.key());
    }

    /// Add either a network (`address/length`) or an address, given as text, to the summary. If
    /// the text cannot be parsed, the summary remains unchanged.
    ///
    /// ```
    /// # use routesum::*;
    /// let mut rs = RouteSum::new();
    /// assert!(rs.insert_str("192.168.1.1").is_ok());
    /// assert!(rs.insert_str("192.168.1.0/24").is_ok());
    /// assert!(rs.insert_str("192.168.1.0/33").is_err());
    /// assert!(rs.insert_str("192.168.1").is_err());
    /// assert_eq!(rs.summary_strings(), vec!["192.168.1.0/24"]);
    /// ```
    pub fn insert_str(&mut self, s: &str) -> Result<(), Error> {
        let route = parse_route(s).map_err(|e| {
            debug!("reject route: {e}");
            e
        })?;
        self.insert(route);
        Ok(())
    }

    /// Add a route given as the raw bytes of its address (4 bytes for IPv4, 16 for IPv6) and a
    /// prefix length. Bits of the address beyond the prefix length are ignored.
    ///
    /// ```
    /// # use routesum::*;
    /// let mut rs = RouteSum::new();
    /// assert!(rs.insert_octets(&[10, 0, 0, 0], 8).is_ok());
    /// assert!(rs.insert_octets(&[10, 0, 0, 0], 33).is_err());
    /// assert!(rs.insert_octets(&[10, 0], 8).is_err());
    /// assert!(rs.insert_octets(&[], 0).is_err());
    /// assert_eq!(rs.summary_strings(), vec!["10.0.0.0/8"]);
    /// ```
    pub fn insert_octets(&mut self, octets: &[u8], prefix_len: u8) -> Result<(), Error> {
        let input = || format!("{octets:?}/{prefix_len}");
        let bits = BitSlice::from_bytes(octets).map_err(|source| Error::Conversion {
            input: input(),
            source,
        })?;
        let family = Family::from_byte_len(octets.len()).ok_or_else(|| Error::UnknownFamily {
            input: input(),
            len: octets.len(),
        })?;
        if prefix_len > family.bits() {
            return Err(Error::InvalidPrefix {
                input: input(),
                prefix_len,
                max: family.bits(),
            });
        }
        self.trie_mut(family).insert_route(bits.truncate(prefix_len));
        Ok(())
    }

    /// Iterate over the summarized routes, IPv4 routes first. Keys that span the full width of
    /// their family are yielded as addresses, all others as networks.
    pub fn routes(&self) -> impl Iterator<Item = IpRoute> + '_ {
        let v4 = self.ipv4.iter().map(|k| IpRoute::from_key(Family::V4, &k));
        let v6 = self.ipv6.iter().map(|k| IpRoute::from_key(Family::V6, &k));
        v4.chain(v6)
    }

    /// Get the summary as a list of addresses and a list of networks.
    ///
    /// ```
    /// # use routesum::*;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let rs = RouteSum::from_strs(["10.0.0.1", "10.0.0.4", "10.0.0.5", "::1"])?;
    /// let (addrs, nets) = rs.summary();
    /// assert_eq!(addrs, vec!["10.0.0.1".parse::<std::net::IpAddr>()?, "::1".parse()?]);
    /// assert_eq!(nets, vec!["10.0.0.4/31".parse::<ipnet::IpNet>()?]);
    /// # Ok(())
    /// # }
    /// ```
    pub fn summary(&self) -> (Vec<IpAddr>, Vec<IpNet>) {
        let mut addrs = Vec::new();
        let mut nets = Vec::new();
        for route in self.routes() {
            match route {
                IpRoute::Addr(addr) => addrs.push(addr),
                IpRoute::Net(net) => nets.push(net),
            }
        }
        debug!("summary of {} addresses and {} networks", addrs.len(), nets.len());
        (addrs, nets)
    }

    /// Get the summary as text, one route per element. Addresses are written without a prefix
    /// length.
    pub fn summary_strings(&self) -> Vec<String> {
        self.routes().map(|r| r.to_string()).collect()
    }

    /// The trie holding all IPv4 routes.
    pub fn ipv4(&self) -> &RSTrie {
        &self.ipv4
    }

    /// The trie holding all IPv6 routes.
    pub fn ipv6(&self) -> &RSTrie {
        &self.ipv6
    }

    /// Number of routes in the summary.
    pub fn len(&self) -> usize {
        self.ipv4.len() + self.ipv6.len()
    }

    /// Check whether the summary is empty.
    pub fn is_empty(&self) -> bool {
        self.ipv4.is_empty() && self.ipv6.is_empty()
    }

    /// Remove all routes.
    pub fn clear(&mut self) {
        self.ipv4.clear();
        self.ipv6.clear();
    }

    fn trie_mut(&mut self, family: Family) -> &mut RSTrie {
        match family {
            Family::V4 => &mut self.ipv4,
            Family::V6 => &mut self.ipv6,
        }
    }
}

impl<R: Route> FromIterator<R> for RouteSum {
    fn from_iter<I: IntoIterator<Item = R>>(iter: I) -> Self {
        let mut rs = RouteSum::new();
        rs.extend(iter);
        rs
    }
}

impl<R: Route> Extend<R> for RouteSum {
    fn extend<I: IntoIterator<Item = R>>(&mut self, iter: I) {
        iter.into_iter().for_each(|route| self.insert(route))
    }
}
