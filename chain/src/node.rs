use std::rc::Rc;

use imbl_sized_chunks::Chunk;

// Segments are stored inline in their node. For large `T` this makes every
// node (including slices and joins, which are pointer-sized apart from the
// discriminant) as large as a full segment. Boxing the chunk would fix that
// at the cost of one more indirection on every access.
//
// All children are behind `Rc`. Cloning an `Rc` is what we call "retaining" a
// node and dropping it is "releasing" it; a node is freed (and releases its
// own children) when the last reference goes away. The tree never contains
// back-references, so this is enough to reclaim everything.
//
// Mutations go through `Rc::make_mut`, so a node that is shared with another
// chain is copied before being modified. For joins and slices that copy is
// shallow; for segments it copies at most `N` elements.
#[derive(Debug, Clone)]
pub(crate) enum Node<T, const N: usize> {
    /// A leaf holding at most `N` elements.
    Segment { data: Chunk<T, N> },
    /// The elements `start..start + len` of `base`.
    Slice {
        base: Rc<Node<T, N>>,
        start: usize,
        len: usize,
    },
    /// The elements of `left` followed by the elements of `right`.
    ///
    /// `len` and `depth` are cached, and kept up to date by every mutation.
    Join {
        left: Rc<Node<T, N>>,
        right: Rc<Node<T, N>>,
        len: usize,
        depth: usize,
    },
}

impl<T, const N: usize> Default for Node<T, N> {
    fn default() -> Self {
        Node::empty()
    }
}

impl<T, const N: usize> Node<T, N> {
    pub(crate) fn empty() -> Self {
        Node::Segment { data: Chunk::new() }
    }

    pub(crate) fn len(&self) -> usize {
        match self {
            Node::Segment { data } => data.len(),
            Node::Slice { len, .. } | Node::Join { len, .. } => *len,
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The number of slice and join layers between this node and its deepest
    /// segment.
    pub(crate) fn depth(&self) -> usize {
        match self {
            Node::Segment { .. } => 0,
            Node::Slice { base, .. } => base.depth() + 1,
            Node::Join { depth, .. } => *depth,
        }
    }

    fn join(left: Rc<Self>, right: Rc<Self>) -> Self {
        Node::Join {
            len: left.len() + right.len(),
            depth: left.depth().max(right.depth()) + 1,
            left,
            right,
        }
    }

    /// Creates a view of `len` elements of `base`, starting at `start`.
    ///
    /// Slicing a slice refers directly to the underlying node, so views never
    /// stack on top of each other.
    pub(crate) fn slice(base: &Rc<Self>, start: usize, len: usize) -> Self {
        debug_assert!(start + len <= base.len());
        match base.as_ref() {
            Node::Slice {
                base: inner,
                start: inner_start,
                ..
            } => Node::Slice {
                base: Rc::clone(inner),
                start: inner_start + start,
                len,
            },
            _ => Node::Slice {
                base: Rc::clone(base),
                start,
                len,
            },
        }
    }

    pub(crate) fn get(&self, idx: usize) -> Option<&T> {
        match self {
            Node::Segment { data } => data.get(idx),
            Node::Slice { base, start, len } => {
                if idx < *len {
                    base.get(start + idx)
                } else {
                    None
                }
            }
            Node::Join {
                left, right, len, ..
            } => {
                if idx >= *len {
                    return None;
                }
                let left_len = left.len();
                if idx < left_len {
                    left.get(idx)
                } else {
                    right.get(idx - left_len)
                }
            }
        }
    }

    /// Builds a balanced tree out of a sequence of nodes, keeping their order.
    pub(crate) fn balanced(nodes: &[Rc<Self>]) -> Rc<Self> {
        match nodes {
            [] => Rc::new(Node::empty()),
            [single] => Rc::clone(single),
            _ => {
                let (left, right) = nodes.split_at(nodes.len() / 2);
                Rc::new(Node::join(Self::balanced(left), Self::balanced(right)))
            }
        }
    }

    /// Builds a balanced tree of full segments (except possibly the last one).
    pub(crate) fn packed<I: IntoIterator<Item = T>>(iter: I) -> Rc<Self> {
        let mut iter = iter.into_iter().peekable();
        let mut segments = Vec::new();
        while iter.peek().is_some() {
            let data: Chunk<T, N> = (&mut iter).take(N).collect();
            segments.push(Rc::new(Node::Segment { data }));
        }
        Self::balanced(&segments)
    }

    /// Collects the non-empty segments and slices under `node`, in order.
    pub(crate) fn leaves(node: &Rc<Self>, out: &mut Vec<Rc<Self>>) {
        match node.as_ref() {
            Node::Join { left, right, .. } => {
                Self::leaves(left, out);
                Self::leaves(right, out);
            }
            _ if node.is_empty() => {}
            _ => out.push(Rc::clone(node)),
        }
    }

    /// Checks the cached lengths and depths, and the structural guarantees
    /// that mutations maintain. Returns the length of this node.
    pub(crate) fn check_invariants(&self) -> usize {
        match self {
            Node::Segment { data } => {
                assert!(data.len() <= N);
                data.len()
            }
            Node::Slice { base, start, len } => {
                let base_len = base.check_invariants();
                assert!(*len > 0, "empty slice");
                assert!(start + len <= base_len);
                *len
            }
            Node::Join {
                left,
                right,
                len,
                depth,
            } => {
                let left_len = left.check_invariants();
                let right_len = right.check_invariants();
                assert!(left_len > 0 && right_len > 0, "join with an empty child");
                assert_eq!(*len, left_len + right_len);
                assert_eq!(*depth, left.depth().max(right.depth()) + 1);
                *len
            }
        }
    }
}

impl<T: Clone, const N: usize> Node<T, N> {
    /// Gets a mutable reference to the element at `idx`, copying any shared
    /// node on the way down.
    pub(crate) fn get_mut(&mut self, idx: usize) -> Option<&mut T> {
        match self {
            Node::Segment { data } => data.get_mut(idx),
            Node::Slice { base, start, len } => {
                if idx < *len {
                    Rc::make_mut(base).get_mut(*start + idx)
                } else {
                    None
                }
            }
            Node::Join {
                left, right, len, ..
            } => {
                if idx >= *len {
                    return None;
                }
                let left_len = left.len();
                if idx < left_len {
                    Rc::make_mut(left).get_mut(idx)
                } else {
                    Rc::make_mut(right).get_mut(idx - left_len)
                }
            }
        }
    }

    /// Inserts an element at the end of this node.
    pub(crate) fn append(&mut self, elt: T) {
        match self {
            Node::Segment { data } => {
                if !data.is_full() {
                    data.push_back(elt);
                    return;
                }
                // Sequential appends fill a segment up and then start a new
                // one, instead of leaving half-full segments behind.
                let full = std::mem::replace(data, Chunk::new());
                let mut fresh = Chunk::new();
                fresh.push_back(elt);
                *self = Node::join(
                    Rc::new(Node::Segment { data: full }),
                    Rc::new(Node::Segment { data: fresh }),
                );
            }
            Node::Slice { base, start, len } => {
                let end = *start + *len;
                if end == base.len() {
                    Rc::make_mut(base).append(elt);
                } else {
                    Rc::make_mut(base).insert(end, elt);
                }
                *len += 1;
            }
            Node::Join { right, len, .. } => {
                Rc::make_mut(right).append(elt);
                *len += 1;
                self.restructure();
            }
        }
    }

    /// Inserts an element so that it ends up at index `offset`.
    ///
    /// `offset` must be at most `self.len()`.
    pub(crate) fn insert(&mut self, offset: usize, elt: T) {
        debug_assert!(offset <= self.len());
        match self {
            Node::Segment { data } => {
                if !data.is_full() {
                    data.insert(offset, elt);
                    return;
                }
                let mut right = data.split_off(N / 2);
                if offset <= data.len() {
                    data.insert(offset, elt);
                } else {
                    right.insert(offset - data.len(), elt);
                }
                let left = std::mem::replace(data, Chunk::new());
                log::trace!("split a full segment at {offset}");
                *self = Node::join(
                    Rc::new(Node::Segment { data: left }),
                    Rc::new(Node::Segment { data: right }),
                );
            }
            Node::Slice { base, start, len } => {
                Rc::make_mut(base).insert(*start + offset, elt);
                *len += 1;
            }
            Node::Join {
                left, right, len, ..
            } => {
                // An insertion at the boundary goes to the left child.
                let left_len = left.len();
                if offset <= left_len {
                    Rc::make_mut(left).insert(offset, elt);
                } else {
                    Rc::make_mut(right).insert(offset - left_len, elt);
                }
                *len += 1;
                self.restructure();
            }
        }
    }

    /// Removes `count` elements starting at `offset`.
    ///
    /// The range must lie within this node.
    pub(crate) fn remove(&mut self, offset: usize, count: usize) {
        debug_assert!(offset + count <= self.len());
        if count == 0 {
            return;
        }
        match self {
            Node::Segment { data } => {
                let mut tail = data.split_off(offset);
                tail.drop_left(count);
                data.append(&mut tail);
            }
            Node::Slice { base, start, len } => {
                // If the base is shared, trimming either end of the view is
                // just a matter of moving its bounds.
                if Rc::strong_count(base) > 1 && (offset == 0 || offset + count == *len) {
                    if offset == 0 {
                        *start += count;
                    }
                } else {
                    remove_from(base, *start + offset, count);
                }
                *len -= count;
                self.restructure();
            }
            Node::Join {
                left, right, len, ..
            } => {
                let left_len = left.len();
                if offset >= left_len {
                    remove_from(right, offset - left_len, count);
                } else if offset + count <= left_len {
                    remove_from(left, offset, count);
                } else {
                    let from_left = left_len - offset;
                    remove_from(left, offset, from_left);
                    remove_from(right, 0, count - from_left);
                }
                *len -= count;
                self.restructure();
            }
        }
    }

    /// Splits `node` into its first `offset` elements and the rest.
    ///
    /// Joins along the path are rebuilt, slices are split into two slices of
    /// the same base, and only the one segment containing the split point (if
    /// any) is copied.
    pub(crate) fn split_at(node: &Rc<Self>, offset: usize) -> (Rc<Self>, Rc<Self>) {
        debug_assert!(offset <= node.len());
        if offset == 0 {
            return (Rc::new(Node::empty()), Rc::clone(node));
        }
        if offset == node.len() {
            return (Rc::clone(node), Rc::new(Node::empty()));
        }
        match node.as_ref() {
            Node::Segment { data } => {
                let left = data.iter().take(offset).cloned().collect();
                let right = data.iter().skip(offset).cloned().collect();
                (
                    Rc::new(Node::Segment { data: left }),
                    Rc::new(Node::Segment { data: right }),
                )
            }
            Node::Slice { base, start, len } => (
                Rc::new(Node::Slice {
                    base: Rc::clone(base),
                    start: *start,
                    len: offset,
                }),
                Rc::new(Node::Slice {
                    base: Rc::clone(base),
                    start: start + offset,
                    len: len - offset,
                }),
            ),
            Node::Join { left, right, .. } => {
                let left_len = left.len();
                if offset <= left_len {
                    let (head, tail) = Self::split_at(left, offset);
                    (head, Self::joined(tail, Rc::clone(right)))
                } else {
                    let (head, tail) = Self::split_at(right, offset - left_len);
                    (Self::joined(Rc::clone(left), head), tail)
                }
            }
        }
    }

    /// Concatenates two nodes, skipping the join if either side is empty.
    pub(crate) fn joined(left: Rc<Self>, right: Rc<Self>) -> Rc<Self> {
        if left.is_empty() {
            right
        } else if right.is_empty() {
            left
        } else {
            let mut node = Node::join(left, right);
            node.restructure();
            Rc::new(node)
        }
    }

    /// Restores the local structural guarantees after a mutation of this
    /// node's children:
    /// - slices and joins are never empty;
    /// - a slice covering all of an unshared base is replaced by the base;
    /// - a join never has an empty child;
    /// - a join of two segments that fit in one is merged;
    /// - the depths of a join's children differ by at most one, when a
    ///   rotation can achieve it.
    fn restructure(&mut self) {
        match self {
            Node::Segment { .. } => {}
            Node::Slice { base, start, len } => {
                if *len == 0 {
                    *self = Node::empty();
                } else if *start == 0 && *len == base.len() && Rc::strong_count(base) == 1 {
                    let Node::Slice { base, .. } = std::mem::take(self) else {
                        unreachable!();
                    };
                    *self = Rc::unwrap_or_clone(base);
                }
            }
            Node::Join {
                left,
                right,
                len,
                depth,
            } => {
                let collapse = left.is_empty() || right.is_empty();
                let merge = *len <= N
                    && matches!(
                        (left.as_ref(), right.as_ref()),
                        (Node::Segment { .. }, Node::Segment { .. })
                    );
                if collapse || merge {
                    let Node::Join { left, right, .. } = std::mem::take(self) else {
                        unreachable!();
                    };
                    *self = if left.is_empty() {
                        Rc::unwrap_or_clone(right)
                    } else if right.is_empty() {
                        Rc::unwrap_or_clone(left)
                    } else {
                        merge_segments(left, right)
                    };
                    return;
                }
                *depth = left.depth().max(right.depth()) + 1;
                self.rebalance_join();
            }
        }
    }

    fn rebalance_join(&mut self) {
        let Node::Join { left, right, .. } = self else {
            return;
        };
        let (left_depth, right_depth) = (left.depth(), right.depth());
        if right_depth > left_depth + 1 {
            let Node::Join {
                left: inner_left,
                right: inner_right,
                ..
            } = right.as_ref()
            else {
                return;
            };
            if inner_left.depth() > inner_right.depth() {
                Rc::make_mut(right).rotate_right();
            }
            self.rotate_left();
        } else if left_depth > right_depth + 1 {
            let Node::Join {
                left: inner_left,
                right: inner_right,
                ..
            } = left.as_ref()
            else {
                return;
            };
            if inner_right.depth() > inner_left.depth() {
                Rc::make_mut(left).rotate_left();
            }
            self.rotate_right();
        }
    }

    /// `(a (b c))` becomes `((a b) c)`. Does nothing unless the right child is
    /// a join.
    fn rotate_left(&mut self) {
        if !matches!(&*self, Node::Join { right, .. } if matches!(right.as_ref(), Node::Join { .. })) {
            return;
        }
        let Node::Join { left, right, .. } = std::mem::take(self) else {
            unreachable!();
        };
        let Node::Join {
            left: middle,
            right,
            ..
        } = Rc::unwrap_or_clone(right)
        else {
            unreachable!();
        };
        *self = Node::join(Rc::new(Node::join(left, middle)), right);
    }

    /// `((a b) c)` becomes `(a (b c))`. Does nothing unless the left child is
    /// a join.
    fn rotate_right(&mut self) {
        if !matches!(&*self, Node::Join { left, .. } if matches!(left.as_ref(), Node::Join { .. })) {
            return;
        }
        let Node::Join { left, right, .. } = std::mem::take(self) else {
            unreachable!();
        };
        let Node::Join {
            left,
            right: middle,
            ..
        } = Rc::unwrap_or_clone(left)
        else {
            unreachable!();
        };
        *self = Node::join(left, Rc::new(Node::join(middle, right)));
    }
}

/// Removes a range from a child node. A child that loses all of its elements
/// is released rather than copied and emptied.
fn remove_from<T: Clone, const N: usize>(child: &mut Rc<Node<T, N>>, offset: usize, count: usize) {
    if count == 0 {
        return;
    }
    if count == child.len() {
        *child = Rc::new(Node::empty());
    } else {
        Rc::make_mut(child).remove(offset, count);
    }
}

fn merge_segments<T: Clone, const N: usize>(left: Rc<Node<T, N>>, right: Rc<Node<T, N>>) -> Node<T, N> {
    let (Node::Segment { data: mut merged }, Node::Segment { data: mut tail }) =
        (Rc::unwrap_or_clone(left), Rc::unwrap_or_clone(right))
    else {
        unreachable!();
    };
    merged.append(&mut tail);
    log::trace!("merged two segments into one of length {}", merged.len());
    Node::Segment { data: merged }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Small = Node<u32, 4>;

    fn segment(elts: &[u32]) -> Rc<Small> {
        Rc::new(Node::Segment {
            data: elts.iter().copied().collect(),
        })
    }

    fn contents(node: &Small) -> Vec<u32> {
        (0..node.len()).map(|i| *node.get(i).unwrap()).collect()
    }

    #[test]
    fn full_segment_splits_on_insert() {
        let mut node = Rc::unwrap_or_clone(segment(&[1, 2, 3, 4]));
        node.insert(1, 10);
        node.check_invariants();
        assert!(matches!(node, Node::Join { depth: 1, .. }));
        assert_eq!(contents(&node), vec![1, 10, 2, 3, 4]);

        let mut node = Rc::unwrap_or_clone(segment(&[1, 2, 3, 4]));
        node.insert(4, 10);
        node.check_invariants();
        assert_eq!(contents(&node), vec![1, 2, 3, 4, 10]);
    }

    #[test]
    fn full_segment_grows_a_new_one_on_append() {
        let mut node = Rc::unwrap_or_clone(segment(&[1, 2, 3, 4]));
        node.append(5);
        node.check_invariants();
        let Node::Join { left, right, .. } = &node else {
            panic!("expected a join, got {node:?}");
        };
        assert_eq!(left.len(), 4);
        assert_eq!(right.len(), 1);
    }

    #[test]
    fn join_insert_at_boundary_goes_left() {
        let mut node = Node::join(segment(&[1, 2]), segment(&[3, 4]));
        node.insert(2, 10);
        let Node::Join { left, right, .. } = &node else {
            panic!("expected a join, got {node:?}");
        };
        assert_eq!(contents(left), vec![1, 2, 10]);
        assert_eq!(contents(right), vec![3, 4]);
    }

    #[test]
    fn straddling_remove() {
        let mut node = Node::join(segment(&[1, 2, 3, 4]), segment(&[5, 6, 7, 8]));
        node.remove(2, 4);
        node.check_invariants();
        assert_eq!(contents(&node), vec![1, 2, 7, 8]);
        // The two remaining halves fit in one segment.
        assert!(matches!(node, Node::Segment { .. }));
    }

    #[test]
    fn emptied_child_collapses() {
        let left = segment(&[1, 2, 3]);
        let right = Rc::new(Node::join(segment(&[4, 5, 6]), segment(&[7, 8, 9])));
        let mut node = Node::join(Rc::clone(&left), right);
        node.remove(0, 3);
        node.check_invariants();
        assert_eq!(contents(&node), vec![4, 5, 6, 7, 8, 9]);
        // The removed child was released untouched.
        assert_eq!(contents(&left), vec![1, 2, 3]);
        assert_eq!(Rc::strong_count(&left), 1);
    }

    #[test]
    fn slice_appends_extend_the_base_at_its_end() {
        let base = segment(&[1, 2, 3]);
        let mut slice = Node::slice(&base, 1, 2);
        drop(base);
        slice.append(4);
        slice.check_invariants();
        let Node::Slice { base, start, len } = &slice else {
            panic!("expected a slice, got {slice:?}");
        };
        assert_eq!(contents(base), vec![1, 2, 3, 4]);
        assert_eq!((*start, *len), (1, 3));
    }

    #[test]
    fn slice_appends_insert_in_the_middle_of_the_base() {
        let base = segment(&[1, 2, 3]);
        let mut slice = Node::slice(&base, 0, 2);
        drop(base);
        slice.append(4);
        let Node::Slice { base, .. } = &slice else {
            panic!("expected a slice, got {slice:?}");
        };
        assert_eq!(contents(base), vec![1, 2, 4, 3]);
        assert_eq!(contents(&slice), vec![1, 2, 4]);
    }

    #[test]
    fn slice_of_slice_refers_to_the_base() {
        let base = segment(&[1, 2, 3, 4]);
        let outer = Rc::new(Node::slice(&base, 1, 3));
        let inner = Node::slice(&outer, 1, 2);
        let Node::Slice { base: inner_base, start, len } = &inner else {
            panic!("expected a slice, got {inner:?}");
        };
        assert!(Rc::ptr_eq(inner_base, &base));
        assert_eq!((*start, *len), (2, 2));
        assert_eq!(contents(&inner), vec![3, 4]);
    }

    #[test]
    fn shared_slice_base_is_trimmed_without_copying() {
        let base = segment(&[1, 2, 3, 4]);
        let mut slice = Node::slice(&base, 0, 4);
        slice.remove(0, 1);
        slice.remove(2, 1);
        let Node::Slice { base: slice_base, .. } = &slice else {
            panic!("expected a slice, got {slice:?}");
        };
        assert!(Rc::ptr_eq(slice_base, &base));
        assert_eq!(contents(&slice), vec![2, 3]);
    }

    #[test]
    fn rotation_keeps_order() {
        let right = Rc::new(Node::join(
            segment(&[3, 4]),
            Rc::new(Node::join(segment(&[5, 6]), segment(&[7, 8]))),
        ));
        let mut node = Node::join(segment(&[1, 2]), right);
        node.restructure();
        node.check_invariants();
        assert_eq!(node.depth(), 2);
        assert_eq!(contents(&node), vec![1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn split_inside_a_segment() {
        let node = Rc::new(Node::join(segment(&[1, 2, 3]), segment(&[4, 5, 6])));
        let (head, tail) = Node::split_at(&node, 4);
        head.check_invariants();
        tail.check_invariants();
        assert_eq!(contents(&head), vec![1, 2, 3, 4]);
        assert_eq!(contents(&tail), vec![5, 6]);
        // The original is untouched.
        assert_eq!(contents(&node), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn packed_fills_segments() {
        let node = Small::packed(0..10);
        node.check_invariants();
        let mut leaves = Vec::new();
        Node::leaves(&node, &mut leaves);
        let lens: Vec<_> = leaves.iter().map(|l| l.len()).collect();
        assert_eq!(lens, vec![4, 4, 2]);
        assert_eq!(contents(&node), (0..10).collect::<Vec<_>>());
    }
}
