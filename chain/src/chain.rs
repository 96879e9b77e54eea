use std::{
    hash::{Hash, Hasher},
    ops::Index,
    rc::Rc,
};

use crate::{
    error::{check_offset, check_range, ChainError},
    iter::Iter,
    node::Node,
    Const, ValidSegmentCapacity,
};

/// An editable sequence with cheap positional insertion and removal.
///
/// This is implemented internally as a tree of segments holding at most `N`
/// elements each. For performance `N` should be a power of 2; values between
/// `16` and `64` are pretty reasonable.
///
/// Cloning a chain is `O(1)`: the clone shares the whole tree with the
/// original, and each side copies the nodes it modifies afterwards.
#[derive(Clone)]
pub struct Chain<T, const N: usize>
where
    Const<N>: ValidSegmentCapacity,
{
    root: Rc<Node<T, N>>,
}

/// The depth above which a chain of length `len` gets rebalanced.
fn depth_limit(len: usize) -> usize {
    2 * len.max(1).ilog2() as usize + 8
}

impl<T, const N: usize> Chain<T, N>
where
    Const<N>: ValidSegmentCapacity,
{
    /// Creates an empty chain.
    pub fn new() -> Self {
        Chain {
            root: Rc::new(Node::empty()),
        }
    }

    /// The number of elements in this chain.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain::Chain;
    /// let chain = Chain::<_, 32>::from_iter([0, 1, 2, 3, 4, 5]);
    /// assert_eq!(chain.len(), 6);
    /// ```
    pub fn len(&self) -> usize {
        self.root.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Gets the element at a given index, or `None` if `idx` is out-of-bounds.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain::Chain;
    /// let chain = Chain::<_, 32>::from_iter([0, 1, 2, 3, 4, 5]);
    /// assert_eq!(chain.get(2), Some(&2));
    /// assert_eq!(chain.get(6), None);
    /// ```
    pub fn get(&self, idx: usize) -> Option<&T> {
        self.root.get(idx)
    }

    /// Gets the element at a given index.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain::{Chain, ChainError};
    /// let chain = Chain::<_, 32>::from_iter(['a', 'b']);
    /// assert_eq!(chain.at(1), Ok(&'b'));
    /// assert_eq!(chain.at(2), Err(ChainError::IndexOutOfRange { index: 2, len: 2 }));
    /// ```
    pub fn at(&self, idx: usize) -> Result<&T, ChainError> {
        self.get(idx).ok_or(ChainError::IndexOutOfRange {
            index: idx,
            len: self.len(),
        })
    }

    /// Returns an iterator over references to the elements.
    pub fn iter(&self) -> Iter<'_, T, N> {
        Iter::new(&self.root, 0..self.len())
    }

    /// Returns an iterator over the elements starting at index `idx`.
    ///
    /// Panics if `idx` is larger than the length.
    pub fn iter_from(&self, idx: usize) -> Iter<'_, T, N> {
        if idx > self.len() {
            panic!("out of bounds");
        }
        Iter::new(&self.root, idx..self.len())
    }

    /// The number of slice and join layers above the deepest segment.
    ///
    /// Mutations keep this logarithmic in the length; see
    /// [`Chain::rebalance`].
    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    /// Replaces the tree above the leaves with a balanced one.
    ///
    /// This doesn't copy or move any elements. It's done automatically when
    /// the tree gets too deep, so it's never necessary to call it explicitly.
    pub fn rebalance(&mut self) {
        let mut leaves = Vec::new();
        Node::leaves(&self.root, &mut leaves);
        log::debug!(
            "rebalancing a chain of {} leaves (depth {})",
            leaves.len(),
            self.depth()
        );
        self.root = Node::balanced(&leaves);
    }

    /// Panics if the internal structure of this chain is inconsistent.
    pub fn check_invariants(&self) {
        assert_eq!(self.root.check_invariants(), self.len());
    }
}

impl<T: Clone, const N: usize> Chain<T, N>
where
    Const<N>: ValidSegmentCapacity,
{
    fn root_mut(&mut self) -> &mut Node<T, N> {
        Rc::make_mut(&mut self.root)
    }

    /// Rebalances (or, failing that, flattens) the tree if it got too deep.
    fn limit_depth(&mut self) {
        let limit = depth_limit(self.len());
        if self.depth() > limit {
            self.rebalance();
            if self.depth() > limit {
                self.flatten();
            }
        }
    }

    /// Gets a mutable reference to the element at a given index, or `None` if
    /// `idx` is out-of-bounds.
    ///
    /// Any node on the way to the element that is shared with another chain
    /// is copied first.
    pub fn get_mut(&mut self, idx: usize) -> Option<&mut T> {
        if idx >= self.len() {
            return None;
        }
        self.root_mut().get_mut(idx)
    }

    pub fn at_mut(&mut self, idx: usize) -> Result<&mut T, ChainError> {
        let len = self.len();
        self.get_mut(idx)
            .ok_or(ChainError::IndexOutOfRange { index: idx, len })
    }

    /// Adds an element to the end of this chain.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain::Chain;
    /// let mut chain = Chain::<_, 32>::from_iter([0, 1, 2]);
    /// chain.append(3);
    /// assert_eq!(chain.to_vec(), vec![0, 1, 2, 3]);
    /// ```
    pub fn append(&mut self, elt: T) {
        self.root_mut().append(elt);
        self.limit_depth();
    }

    /// Adds an element to the start of this chain.
    pub fn prepend(&mut self, elt: T) {
        self.root_mut().insert(0, elt);
        self.limit_depth();
    }

    /// Inserts an element at position `offset`, shifting all elements after it
    /// by one.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain::Chain;
    /// let mut chain = Chain::<_, 32>::from_iter([0, 1, 2]);
    /// chain.insert(1, 7).unwrap();
    /// assert_eq!(chain.to_vec(), vec![0, 7, 1, 2]);
    /// assert!(chain.insert(5, 7).is_err());
    /// ```
    pub fn insert(&mut self, offset: usize, elt: T) -> Result<(), ChainError> {
        check_offset(offset, self.len())?;
        self.root_mut().insert(offset, elt);
        self.limit_depth();
        Ok(())
    }

    /// Removes `count` elements starting at `offset`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain::Chain;
    /// let mut chain = Chain::<_, 32>::from_iter([0, 1, 2, 3, 4]);
    /// chain.remove(1, 2).unwrap();
    /// assert_eq!(chain.to_vec(), vec![0, 3, 4]);
    /// assert!(chain.remove(2, 2).is_err());
    /// ```
    pub fn remove(&mut self, offset: usize, count: usize) -> Result<(), ChainError> {
        check_range(offset, count, self.len())?;
        if count == 0 {
            return Ok(());
        }
        if count == self.len() {
            self.clear();
        } else {
            self.root_mut().remove(offset, count);
            self.limit_depth();
        }
        Ok(())
    }

    /// Removes all elements.
    pub fn clear(&mut self) {
        self.root = Rc::new(Node::empty());
    }

    /// Shortens this chain to `len` elements. Does nothing if it is already
    /// that short.
    pub fn truncate(&mut self, len: usize) {
        if len < self.len() {
            // Can't fail: the range ends at our length.
            let _ = self.remove(len, self.len() - len);
        }
    }

    /// Truncates or extends this chain to `len` elements, filling new slots
    /// with clones of `value`.
    pub fn resize(&mut self, len: usize, value: T) {
        let current = self.len();
        if len <= current {
            self.truncate(len);
        } else {
            self.extend(std::iter::repeat(value).take(len - current));
        }
    }

    /// Returns a new chain with the `count` elements starting at `offset`.
    ///
    /// This doesn't copy anything: the new chain is a view into this one's
    /// tree. Both chains can still be modified independently.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain::Chain;
    /// let chain = Chain::<_, 32>::from_iter([0, 1, 2, 3, 4, 5]);
    /// let slice = chain.slice(1, 3).unwrap();
    /// assert_eq!(slice.to_vec(), vec![1, 2, 3]);
    /// ```
    pub fn slice(&self, offset: usize, count: usize) -> Result<Self, ChainError> {
        check_range(offset, count, self.len())?;
        Ok(if count == 0 {
            Chain::new()
        } else if count == self.len() {
            self.clone()
        } else {
            Chain {
                root: Rc::new(Node::slice(&self.root, offset, count)),
            }
        })
    }

    /// Removes `count` elements starting at `offset`, and returns them as a
    /// new chain.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain::Chain;
    /// let mut chain = Chain::<_, 32>::from_iter([0, 1, 2, 3, 4, 5]);
    /// let removed = chain.extract(1, 3).unwrap();
    /// assert_eq!(removed.to_vec(), vec![1, 2, 3]);
    /// assert_eq!(chain.to_vec(), vec![0, 4, 5]);
    /// ```
    pub fn extract(&mut self, offset: usize, count: usize) -> Result<Self, ChainError> {
        check_range(offset, count, self.len())?;
        let (head, rest) = Node::split_at(&self.root, offset);
        let (removed, tail) = Node::split_at(&rest, count);
        self.root = Node::joined(head, tail);
        self.limit_depth();
        Ok(Chain { root: removed })
    }

    /// Inserts the contents of `other` at position `offset`.
    ///
    /// The elements of `other` are not copied: its tree becomes a subtree of
    /// ours.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain::Chain;
    /// let mut chain = Chain::<_, 32>::from_iter([0, 1, 2]);
    /// let other = Chain::from_iter([7, 8]);
    /// chain.insert_chain(1, &other).unwrap();
    /// assert_eq!(chain.to_vec(), vec![0, 7, 8, 1, 2]);
    /// ```
    pub fn insert_chain(&mut self, offset: usize, other: &Self) -> Result<(), ChainError> {
        check_offset(offset, self.len())?;
        self.splice(offset, Rc::clone(&other.root));
        Ok(())
    }

    /// Inserts all the elements of an iterator at position `offset`, keeping
    /// their order.
    pub fn insert_multi<I: IntoIterator<Item = T>>(
        &mut self,
        offset: usize,
        iter: I,
    ) -> Result<(), ChainError> {
        check_offset(offset, self.len())?;
        let mut iter = iter.into_iter().peekable();
        // A handful of elements are cheaper to insert one by one than to
        // splice in as their own segment.
        let mut offset = offset;
        for _ in 0..N / 2 {
            match iter.next() {
                Some(elt) => {
                    self.root_mut().insert(offset, elt);
                    offset += 1;
                }
                None => break,
            }
        }
        if iter.peek().is_some() {
            self.splice(offset, Node::packed(iter));
        } else {
            self.limit_depth();
        }
        Ok(())
    }

    pub fn append_chain(&mut self, other: &Self) {
        self.splice(self.len(), Rc::clone(&other.root));
    }

    pub fn prepend_chain(&mut self, other: &Self) {
        self.splice(0, Rc::clone(&other.root));
    }

    fn splice(&mut self, offset: usize, node: Rc<Node<T, N>>) {
        if node.is_empty() {
            return;
        }
        let (head, tail) = Node::split_at(&self.root, offset);
        self.root = Node::joined(Node::joined(head, node), tail);
        self.limit_depth();
    }

    /// Copies all elements into a balanced tree of full segments.
    ///
    /// This drops every slice in the tree, and with them any elements that
    /// were hidden by a slice but kept alive. Chains with at most `N` elements
    /// end up as a single segment.
    pub fn flatten(&mut self) {
        log::debug!(
            "flattening a chain of length {} (depth {})",
            self.len(),
            self.depth()
        );
        self.root = Node::packed(self.iter().cloned());
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }
}

impl<T, const N: usize> Default for Chain<T, N>
where
    Const<N>: ValidSegmentCapacity,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> FromIterator<T> for Chain<T, N>
where
    Const<N>: ValidSegmentCapacity,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Chain {
            root: Node::packed(iter),
        }
    }
}

impl<T, const N: usize> From<Vec<T>> for Chain<T, N>
where
    Const<N>: ValidSegmentCapacity,
{
    fn from(vec: Vec<T>) -> Self {
        vec.into_iter().collect()
    }
}

impl<T: Clone, const N: usize> Extend<T> for Chain<T, N>
where
    Const<N>: ValidSegmentCapacity,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let len = self.len();
        // Unwrap: inserting at our own length is always in range.
        self.insert_multi(len, iter).unwrap();
    }
}

impl<'a, T, const N: usize> IntoIterator for &'a Chain<T, N>
where
    Const<N>: ValidSegmentCapacity,
{
    type Item = &'a T;
    type IntoIter = Iter<'a, T, N>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, const N: usize> Index<usize> for Chain<T, N>
where
    Const<N>: ValidSegmentCapacity,
{
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        self.get(index).expect("index out of range")
    }
}

impl<T: std::fmt::Debug, const N: usize> std::fmt::Debug for Chain<T, N>
where
    Const<N>: ValidSegmentCapacity,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq, const N: usize> PartialEq for Chain<T, N>
where
    Const<N>: ValidSegmentCapacity,
{
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.root, &other.root)
            || (self.len() == other.len() && self.iter().eq(other.iter()))
    }
}

impl<T: Eq, const N: usize> Eq for Chain<T, N> where Const<N>: ValidSegmentCapacity {}

impl<T: Hash, const N: usize> Hash for Chain<T, N>
where
    Const<N>: ValidSegmentCapacity,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for elt in self {
            elt.hash(state);
        }
    }
}

impl<T: serde::Serialize, const N: usize> serde::Serialize for Chain<T, N>
where
    Const<N>: ValidSegmentCapacity,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeSeq;

        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for elt in self.iter() {
            seq.serialize_element(elt)?;
        }
        seq.end()
    }
}

impl<'de, T: serde::Deserialize<'de>, const N: usize> serde::Deserialize<'de> for Chain<T, N>
where
    Const<N>: ValidSegmentCapacity,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let vec: Vec<T> = Vec::deserialize(deserializer)?;
        Ok(vec.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn letters<const N: usize>(s: &str) -> Chain<char, N>
    where
        Const<N>: ValidSegmentCapacity,
    {
        s.chars().collect()
    }

    /// The root segment or slice that each leaf of `chain` refers to.
    fn storage<T, const N: usize>(chain: &Chain<T, N>) -> Vec<*const Node<T, N>>
    where
        Const<N>: ValidSegmentCapacity,
    {
        fn walk<T, const N: usize>(node: &Node<T, N>, out: &mut Vec<*const Node<T, N>>) {
            match node {
                Node::Segment { .. } => out.push(node as *const _),
                Node::Slice { base, .. } => walk(base, out),
                Node::Join { left, right, .. } => {
                    walk(left, out);
                    walk(right, out);
                }
            }
        }
        let mut out = Vec::new();
        walk(&chain.root, &mut out);
        out
    }

    #[test]
    fn edit_scenario() {
        let mut chain: Chain<char, 4> = letters("ABCDE");
        chain.remove(1, 2).unwrap();
        assert_eq!(chain.to_vec(), vec!['A', 'D', 'E']);
        chain.insert(1, 'X').unwrap();
        assert_eq!(chain.to_vec(), vec!['A', 'X', 'D', 'E']);
        chain.append('Y');
        assert_eq!(chain.to_vec(), vec!['A', 'X', 'D', 'E', 'Y']);
        assert_eq!(chain.at(4), Ok(&'Y'));
        assert_eq!(chain.len(), 5);
        chain.check_invariants();
    }

    #[test]
    fn slice_survives_edits_to_the_original() {
        let mut chain: Chain<u32, 4> = (1..=6).collect();
        let slice = chain.slice(2, 3).unwrap();
        assert_eq!(slice.to_vec(), vec![3, 4, 5]);

        chain.remove(0, 1).unwrap();
        assert_eq!(chain.to_vec(), vec![2, 3, 4, 5, 6]);
        assert_eq!(slice.to_vec(), vec![3, 4, 5]);

        // Edits inside the shared range don't leak either way.
        *chain.at_mut(2).unwrap() = 40;
        assert_eq!(slice.to_vec(), vec![3, 4, 5]);
        let mut slice = slice;
        slice.insert(1, 10).unwrap();
        assert_eq!(chain.to_vec(), vec![2, 3, 40, 5, 6]);
        assert_eq!(slice.to_vec(), vec![3, 10, 4, 5]);
        chain.check_invariants();
        slice.check_invariants();
    }

    #[test]
    fn slice_shares_segments_until_written() {
        let chain: Chain<u32, 4> = (0..32).collect();
        let slice = chain.slice(5, 20).unwrap();
        let original = storage(&chain);
        for segment in storage(&slice) {
            assert!(original.contains(&segment));
        }

        let mut written = slice.clone();
        *written.get_mut(0).unwrap() = 100;
        assert_eq!(written[0], 100);
        assert_eq!(slice[0], 5);
        assert_eq!(chain[5], 5);
    }

    #[test]
    fn slice_of_a_slice() {
        let chain: Chain<u32, 4> = (0..20).collect();
        let outer = chain.slice(3, 10).unwrap();
        let inner = outer.slice(2, 5).unwrap();
        assert_eq!(inner.to_vec(), vec![5, 6, 7, 8, 9]);
        assert_eq!(inner.depth(), chain.depth() + 1);
    }

    #[test]
    fn slice_append_and_remove() {
        let chain: Chain<u32, 4> = (0..10).collect();
        let mut slice = chain.slice(2, 4).unwrap();
        slice.append(100);
        slice.remove(0, 2).unwrap();
        assert_eq!(slice.to_vec(), vec![4, 5, 100]);
        assert_eq!(chain.to_vec(), (0..10).collect::<Vec<_>>());
        slice.check_invariants();
    }

    #[test]
    fn out_of_range() {
        for len in [0, 1, 5, 40] {
            let mut chain: Chain<u32, 4> = (0..len).collect();
            let len = len as usize;
            assert_eq!(
                chain.at(len),
                Err(ChainError::IndexOutOfRange { index: len, len })
            );
            assert_eq!(
                chain.insert(len + 1, 0),
                Err(ChainError::IndexOutOfRange {
                    index: len + 1,
                    len
                })
            );
            assert_eq!(
                chain.remove(0, len + 1),
                Err(ChainError::RangeOutOfRange {
                    start: 0,
                    end: len + 1,
                    len
                })
            );
            assert!(chain.slice(1, len).unwrap_err().is_out_of_range());
            assert!(chain.remove(usize::MAX, 2).unwrap_err().is_out_of_range());
            assert_eq!(chain.len(), len);
        }
    }

    #[test]
    fn empty_remove_is_a_no_op() {
        let mut chain: Chain<u32, 4> = (0..10).collect();
        let before = chain.clone();
        for offset in 0..=10 {
            chain.remove(offset, 0).unwrap();
        }
        assert_eq!(chain, before);
        assert!(Rc::ptr_eq(&chain.root, &before.root));
    }

    #[test]
    fn insert_shifts() {
        let mut chain: Chain<u32, 4> = (0..10).collect();
        chain.insert(3, 100).unwrap();
        assert_eq!(chain[3], 100);
        assert_eq!(chain[4], 3);
        assert_eq!(chain[10], 9);
        assert_eq!(chain.len(), 11);
    }

    #[test]
    fn extract_and_splice() {
        let mut chain: Chain<u32, 4> = (0..20).collect();
        let removed = chain.extract(5, 10).unwrap();
        assert_eq!(removed.to_vec(), (5..15).collect::<Vec<_>>());
        assert_eq!(chain.to_vec(), (0..5).chain(15..20).collect::<Vec<_>>());
        chain.check_invariants();
        removed.check_invariants();

        chain.insert_chain(5, &removed).unwrap();
        assert_eq!(chain.to_vec(), (0..20).collect::<Vec<_>>());
        chain.check_invariants();

        chain.prepend_chain(&removed);
        chain.append_chain(&removed);
        assert_eq!(chain.len(), 40);
        assert_eq!(chain[0], 5);
        assert_eq!(chain[39], 14);
        chain.check_invariants();
    }

    #[test]
    fn insert_multi() {
        let mut chain: Chain<u32, 4> = (0..4).collect();
        chain.insert_multi(2, [10, 11]).unwrap();
        chain.insert_multi(1, 20..30).unwrap();
        let mut expected = vec![0];
        expected.extend(20..30);
        expected.extend([1, 10, 11, 2, 3]);
        assert_eq!(chain.to_vec(), expected);
        assert!(chain.insert_multi(100, [1]).is_err());
        chain.check_invariants();
    }

    #[test]
    fn truncate_and_resize() {
        let mut chain: Chain<u32, 4> = (0..10).collect();
        chain.truncate(12);
        assert_eq!(chain.len(), 10);
        chain.truncate(3);
        assert_eq!(chain.to_vec(), vec![0, 1, 2]);
        chain.resize(6, 9);
        assert_eq!(chain.to_vec(), vec![0, 1, 2, 9, 9, 9]);
        chain.resize(0, 9);
        assert!(chain.is_empty());
    }

    #[test]
    fn appends_stay_shallow() {
        let mut chain: Chain<u32, 4> = Chain::new();
        for i in 0..10_000 {
            chain.append(i);
        }
        chain.check_invariants();
        assert!(chain.depth() <= 20, "depth {}", chain.depth());

        for _ in 0..5_000 {
            chain.prepend(0);
        }
        chain.check_invariants();
        assert!(chain.depth() <= 24, "depth {}", chain.depth());
    }

    #[test]
    fn flatten_and_rebalance() {
        let mut chain: Chain<u32, 4> = (0..3).collect();
        let other: Chain<u32, 4> = (3..100).collect();
        let slice = other.slice(10, 50).unwrap();
        chain.append_chain(&slice);
        chain.insert(1, 1000).unwrap();
        let expected = chain.to_vec();

        chain.rebalance();
        assert_eq!(chain.to_vec(), expected);
        chain.check_invariants();

        chain.flatten();
        assert_eq!(chain.to_vec(), expected);
        chain.check_invariants();
        assert!(storage(&chain).iter().all(|s| !storage(&other).contains(s)));

        let mut small: Chain<u32, 4> = (0..10).collect();
        small.remove(1, 7).unwrap();
        small.flatten();
        assert!(matches!(*small.root, Node::Segment { .. }));
    }

    #[test]
    fn iter_from() {
        let chain: Chain<u32, 4> = (0..50).collect();
        let slice = chain.slice(7, 30).unwrap();
        assert_eq!(slice.iter_from(25).copied().collect::<Vec<_>>(), vec![32, 33, 34, 35, 36]);
        assert_eq!(slice.iter_from(30).len(), 0);
        assert_eq!(slice.iter().len(), 30);
    }

    #[test]
    fn serde_round_trip() {
        let mut chain: Chain<u32, 4> = (0..10).collect();
        chain.remove(2, 3).unwrap();
        let json = serde_json::to_string(&chain).unwrap();
        assert_eq!(json, "[0,1,5,6,7,8,9]");
        let back: Chain<u32, 4> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, chain);
    }

    #[test]
    fn debug_is_a_list() {
        let chain: Chain<u32, 4> = (0..3).collect();
        assert_eq!(format!("{chain:?}"), "[0, 1, 2]");
    }
}
