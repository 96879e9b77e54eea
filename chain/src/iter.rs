use std::ops::Range;

use crate::{node::Node, Const, ValidSegmentCapacity};

/// An iterator over references to the elements of a [`Chain`](crate::Chain).
///
/// Iteration walks the tree with an explicit stack, so it takes constant time
/// per element apart from one descent per segment.
#[derive(Debug, Clone)]
pub struct Iter<'a, T, const N: usize>
where
    Const<N>: ValidSegmentCapacity,
{
    // Nodes still to visit, together with the range of each that we want. The
    // next one is at the top.
    stack: Vec<(&'a Node<T, N>, Range<usize>)>,
    leaf: std::slice::Iter<'a, T>,
    remaining: usize,
}

impl<'a, T, const N: usize> Iter<'a, T, N>
where
    Const<N>: ValidSegmentCapacity,
{
    pub(crate) fn new(root: &'a Node<T, N>, range: Range<usize>) -> Self {
        debug_assert!(range.end <= root.len());
        let remaining = range.len();
        let stack = if range.is_empty() {
            Vec::new()
        } else {
            vec![(root, range)]
        };
        Iter {
            stack,
            leaf: Default::default(),
            remaining,
        }
    }
}

impl<'a, T, const N: usize> Iterator for Iter<'a, T, N>
where
    Const<N>: ValidSegmentCapacity,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(ret) = self.leaf.next() {
                self.remaining -= 1;
                return Some(ret);
            }

            let (node, range) = self.stack.pop()?;
            match node {
                Node::Segment { data } => {
                    let data: &'a [T] = data;
                    self.leaf = data[range].iter();
                }
                Node::Slice { base, start, .. } => {
                    self.stack
                        .push((base.as_ref(), range.start + start..range.end + start));
                }
                Node::Join { left, right, .. } => {
                    let left_len = left.len();
                    if range.end > left_len {
                        let right_range = range.start.saturating_sub(left_len)..range.end - left_len;
                        self.stack.push((right.as_ref(), right_range));
                    }
                    if range.start < left_len {
                        self.stack
                            .push((left.as_ref(), range.start..range.end.min(left_len)));
                    }
                }
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T, const N: usize> ExactSizeIterator for Iter<'_, T, N> where Const<N>: ValidSegmentCapacity {}

impl<T, const N: usize> std::iter::FusedIterator for Iter<'_, T, N> where
    Const<N>: ValidSegmentCapacity
{
}
