//! Formatting implementation for the RSTrie and RouteSum

use std::fmt::{Debug, Display, Formatter, Result};

use super::*;

impl Debug for RSTrie {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self.root {
            Some(root) => DebugRSTrie(self, root).fmt(f),
            None => f.debug_map().finish(),
        }
    }
}

struct DebugRSTrie<'a>(&'a RSTrie, usize);

impl Debug for DebugRSTrie<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let trie = self.0;
        let node = &trie.table[self.1];
        let label = node.label.to_string();
        match node.children {
            None => Debug::fmt(&label, f),
            Some([left, right]) => f
                .debug_map()
                .entry(&label, &(Self(trie, left), Self(trie, right)))
                .finish(),
        }
    }
}

impl Display for IpRoute {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            IpRoute::Addr(addr) => Display::fmt(addr, f),
            IpRoute::Net(net) => Display::fmt(net, f),
        }
    }
}

impl Debug for RouteSum {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.debug_struct("RouteSum")
            .field("ipv4", &self.ipv4)
            .field("ipv6", &self.ipv6)
            .finish()
    }
}

impl Display for RouteSum {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        for route in self.routes() {
            writeln!(f, "{route}")?;
        }
        Ok(())
    }
}
