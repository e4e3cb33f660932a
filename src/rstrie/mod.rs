//! Implementation of the route summarization trie.

use log::trace;

use crate::BitSlice;

mod iter;

pub use iter::*;

/// A radix trie of radix 2 whose keys are the binary representations of networks and addresses.
///
/// Routes that are covered by other routes are never stored. Hence, every node has either zero
/// or two children, and the keys of all leaves together form the smallest set of prefixes that
/// covers exactly the inserted routes.
#[derive(Clone, Default)]
pub struct RSTrie {
    pub(crate) table: Vec<Node>,
    free: Vec<usize>,
    pub(crate) root: Option<usize>,
    count: usize,
}

/// Node of the trie. The label holds the bits that distinguish the node from the key already
/// matched by its ancestors.
#[derive(Clone, Debug)]
pub(crate) struct Node {
    pub(crate) label: BitSlice,
    pub(crate) children: Option<[usize; 2]>,
}

impl Node {
    #[inline(always)]
    pub(crate) fn is_leaf(&self) -> bool {
        self.children.is_none()
    }
}

enum DirectionForInsert {
    /// The remaining route is a prefix of the node's label. The route covers the whole subtree.
    Covers,
    /// The node is a leaf whose label is a prefix of the remaining route.
    Covered,
    /// Enter the next index with the remaining bits `rest`.
    Enter { next: usize, rest: BitSlice },
    /// The node is a leaf that only differs from the remaining route in the last bit.
    Sibling,
    /// Label and remaining route diverge after `common` bits.
    Split { common: u8 },
}

impl RSTrie {
    /// Create an empty trie.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new route into the trie. If the route is already covered by a stored route, the
    /// trie remains unchanged. If the route covers stored routes, those are replaced by the new
    /// one. Two routes that together span a shorter prefix are merged into that prefix.
    ///
    /// ```
    /// # use routesum::*;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut t = RSTrie::new();
    /// t.insert_route("0010".parse()?);
    /// t.insert_route("0011".parse()?);
    /// assert_eq!(t.contents(), vec!["001".parse()?]);
    /// t.insert_route("00101".parse()?);
    /// assert_eq!(t.contents(), vec!["001".parse()?]);
    /// t.insert_route("0".parse()?);
    /// assert_eq!(t.contents(), vec!["0".parse()?]);
    /// # Ok(())
    /// # }
    /// ```
    pub fn insert_route(&mut self, route: BitSlice) {
        let Some(root) = self.root else {
            self.root = Some(self.new_node(route, None));
            self.count = 1;
            return;
        };

        let mut visited = Vec::new();
        let mut cur = root;
        let mut remaining = route;
        loop {
            match self.get_direction_for_insert(cur, &remaining) {
                DirectionForInsert::Covered => return,
                DirectionForInsert::Enter { next, rest } => {
                    visited.push(cur);
                    cur = next;
                    remaining = rest;
                }
                DirectionForInsert::Covers => {
                    trace!("route {route} covers the subtree at {}", self.table[cur].label);
                    let removed = self.remove_children(cur);
                    self.table[cur].label = remaining;
                    if removed > 0 {
                        self.count = self.count + 1 - removed;
                    }
                    break;
                }
                DirectionForInsert::Sibling => {
                    // splitting would create a node with two single-bit leaves, that would get
                    // collapsed right away.
                    let label = &mut self.table[cur].label;
                    *label = label.truncate(label.len() - 1);
                    break;
                }
                DirectionForInsert::Split { common } => {
                    self.split(cur, remaining, common);
                    self.count += 1;
                    break;
                }
            }
        }

        self.simplify_visited(&visited);
    }

    /// Get all keys stored in the trie, in lexicographic order.
    ///
    /// ```
    /// # use routesum::*;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let t: RSTrie = ["011", "10", "010"].iter().map(|s| s.parse()).collect::<Result<_, _>>()?;
    /// assert_eq!(t.contents(), vec!["01".parse()?, "10".parse()?]);
    /// assert!(RSTrie::new().contents().is_empty());
    /// # Ok(())
    /// # }
    /// ```
    pub fn contents(&self) -> Vec<BitSlice> {
        self.iter().collect()
    }

    /// Number of keys stored in the trie.
    pub fn len(&self) -> usize {
        self.count
    }

    /// Check whether the trie stores no key.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Remove all keys, but keep the allocated memory.
    pub fn clear(&mut self) {
        self.table.clear();
        self.free.clear();
        self.root = None;
        self.count = 0;
    }
}

/// Private function implementations
impl RSTrie {
    /// Turn `idx` into a node labeled with the first `common` bits, whose children are the old
    /// node (with the remaining label) and a new leaf for the rest of `route`. The parent keeps
    /// pointing to `idx`.
    fn split(&mut self, idx: usize, route: BitSlice, common: u8) {
        let node = &self.table[idx];
        let (label, children) = (node.label, node.children);
        trace!("split {label} at {common} bits for {route}");

        let old_label = label.skip(common);
        let new_label = route.skip(common);
        let old = self.new_node(old_label, children);
        let new = self.new_node(new_label, None);

        let children = if new_label.bit(0) {
            [old, new]
        } else {
            [new, old]
        };
        let node = &mut self.table[idx];
        node.label = label.truncate(common);
        node.children = Some(children);
    }

    /// Collapse complete subtrees on the path of visited nodes, starting at the deepest one.
    /// Stops at the first node that is not complete.
    fn simplify_visited(&mut self, visited: &[usize]) {
        for &idx in visited.iter().rev() {
            if !self.is_complete(idx) {
                return;
            }
            trace!("collapse complete subtree at {}", self.table[idx].label);
            self.remove_children(idx);
            self.count -= 1;
        }
    }

    /// A node is complete if it has two leaves as children that are both a single bit long.
    pub(crate) fn is_complete(&self, idx: usize) -> bool {
        match self.table[idx].children {
            Some(children) => children.iter().all(|c| {
                let child = &self.table[*c];
                child.is_leaf() && child.label.len() == 1
            }),
            None => false,
        }
    }

    /// Remove the entire subtree below `idx`, making `idx` a leaf. Returns the number of leaves
    /// that were removed.
    fn remove_children(&mut self, idx: usize) -> usize {
        let mut leaves = 0;
        let mut to_free: Vec<usize> = self.table[idx]
            .children
            .take()
            .map(Vec::from)
            .unwrap_or_default();
        while let Some(idx) = to_free.pop() {
            match self.table[idx].children.take() {
                Some(children) => to_free.extend(children),
                None => leaves += 1,
            }
            self.free.push(idx);
        }
        leaves
    }

    /// Get the direction from the node `cur` for inserting the `remaining` bits.
    #[inline(always)]
    fn get_direction_for_insert(&self, cur: usize, remaining: &BitSlice) -> DirectionForInsert {
        let node = &self.table[cur];
        let label = &node.label;
        if label.has_prefix(remaining) {
            DirectionForInsert::Covers
        } else if remaining.has_prefix(label) {
            match node.children {
                None => DirectionForInsert::Covered,
                Some(children) => {
                    let rest = remaining.skip(label.len());
                    DirectionForInsert::Enter {
                        next: children[rest.bit(0) as usize],
                        rest,
                    }
                }
            }
        } else {
            let common = label.common_prefix_len(remaining);
            if node.is_leaf() && label.len() == remaining.len() && common + 1 == label.len() {
                DirectionForInsert::Sibling
            } else {
                DirectionForInsert::Split { common }
            }
        }
    }

    /// insert a new node into the table and return its index.
    #[inline(always)]
    fn new_node(&mut self, label: BitSlice, children: Option<[usize; 2]>) -> usize {
        if let Some(idx) = self.free.pop() {
            let node = &mut self.table[idx];
            node.label = label;
            node.children = children;
            idx
        } else {
            let idx = self.table.len();
            self.table.push(Node { label, children });
            idx
        }
    }
}

impl PartialEq for RSTrie {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl Eq for RSTrie {}

impl FromIterator<BitSlice> for RSTrie {
    fn from_iter<I: IntoIterator<Item = BitSlice>>(iter: I) -> Self {
        let mut trie = RSTrie::new();
        trie.extend(iter);
        trie
    }
}

impl Extend<BitSlice> for RSTrie {
    fn extend<I: IntoIterator<Item = BitSlice>>(&mut self, iter: I) {
        iter.into_iter().for_each(|route| self.insert_route(route))
    }
}
