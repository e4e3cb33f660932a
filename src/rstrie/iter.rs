//! Module that contains the implementation for the iterators

use crate::*;

/// An iterator over all keys of an [`RSTrie`] in lexicographic order.
#[derive(Clone)]
pub struct Iter<'a> {
    trie: &'a RSTrie,
    /// Nodes to visit, together with the bits of all their ancestors.
    nodes: Vec<(usize, BitSlice)>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = BitSlice;

    fn next(&mut self) -> Option<BitSlice> {
        while let Some((cur, preceding)) = self.nodes.pop() {
            let node = &self.trie.table[cur];
            let key = preceding.concat(&node.label);
            match node.children {
                Some([left, right]) => {
                    self.nodes.push((right, key));
                    self.nodes.push((left, key));
                }
                None => return Some(key),
            }
        }
        None
    }
}

impl RSTrie {
    /// An iterator visiting all keys in lexicographic order. This yields the same keys as
    /// [`RSTrie::contents`] without collecting them.
    ///
    /// ```
    /// # use routesum::*;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut t = RSTrie::new();
    /// t.insert_route("110".parse()?);
    /// t.insert_route("0".parse()?);
    /// let mut it = t.iter();
    /// assert_eq!(it.next(), Some("0".parse()?));
    /// assert_eq!(it.next(), Some("110".parse()?));
    /// assert_eq!(it.next(), None);
    /// # Ok(())
    /// # }
    /// ```
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            trie: self,
            nodes: self.root.map(|r| (r, BitSlice::new())).into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a RSTrie {
    type Item = BitSlice;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
