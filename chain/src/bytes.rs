//! A [`Chain`] of fixed-size byte items.
//!
//! This is for callers that only know the size of their items, not their
//! type. Every item stored in a [`ByteChain`] has exactly
//! [`ByteChain::item_size`] bytes, and all the bulk operations take items
//! packed back to back in a single buffer.

use smallvec::SmallVec;

use crate::{chain::Chain, error::ChainError, InvalidArgument};

/// Items up to this size are stored inline in the segments.
type Item = SmallVec<[u8; 16]>;

const SEGMENT_CAPACITY: usize = 32;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ByteChain {
    item_size: usize,
    items: Chain<Item, SEGMENT_CAPACITY>,
}

impl ByteChain {
    /// Creates an empty chain of `item_size`-byte items.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain::{ByteChain, ChainError, InvalidArgument};
    /// let chain = ByteChain::new(4).unwrap();
    /// assert_eq!(chain.item_size(), 4);
    /// assert_eq!(
    ///     ByteChain::new(0),
    ///     Err(ChainError::InvalidArgument(InvalidArgument::ZeroItemSize))
    /// );
    /// ```
    pub fn new(item_size: usize) -> Result<Self, ChainError> {
        if item_size == 0 {
            return Err(InvalidArgument::ZeroItemSize.into());
        }
        Ok(ByteChain {
            item_size,
            items: Chain::new(),
        })
    }

    pub fn item_size(&self) -> usize {
        self.item_size
    }

    /// The number of items (not bytes) in this chain.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, pos: usize) -> Result<&[u8], ChainError> {
        self.items.at(pos).map(|item| item.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = &'_ [u8]> {
        self.items.iter().map(|item| item.as_slice())
    }

    /// Copies all items, back to back, into a single buffer.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut ret = Vec::with_capacity(self.len() * self.item_size);
        for item in self.iter() {
            ret.extend_from_slice(item);
        }
        ret
    }

    fn item(&self, bytes: &[u8]) -> Result<Item, ChainError> {
        if bytes.len() == self.item_size {
            Ok(SmallVec::from_slice(bytes))
        } else {
            Err(InvalidArgument::ItemSize {
                expected: self.item_size,
                found: bytes.len(),
            }
            .into())
        }
    }

    fn split_items(&self, bytes: &[u8]) -> Result<Vec<Item>, ChainError> {
        if bytes.len() % self.item_size == 0 {
            Ok(bytes
                .chunks_exact(self.item_size)
                .map(SmallVec::from_slice)
                .collect())
        } else {
            Err(InvalidArgument::ItemSize {
                expected: self.item_size,
                found: bytes.len(),
            }
            .into())
        }
    }

    fn check_compatible(&self, other: &ByteChain) -> Result<(), ChainError> {
        if self.item_size == other.item_size {
            Ok(())
        } else {
            Err(InvalidArgument::ItemSizeMismatch {
                expected: self.item_size,
                found: other.item_size,
            }
            .into())
        }
    }

    pub fn insert_item(&mut self, pos: usize, item: &[u8]) -> Result<(), ChainError> {
        let item = self.item(item)?;
        self.items.insert(pos, item)
    }

    /// Inserts several items, packed back to back in `bytes`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain::ByteChain;
    /// let mut chain = ByteChain::new(2).unwrap();
    /// chain.append_multi(&[1, 1, 2, 2]).unwrap();
    /// chain.insert_multi(1, &[3, 3]).unwrap();
    /// assert_eq!(chain.to_bytes(), vec![1, 1, 3, 3, 2, 2]);
    /// assert!(chain.insert_multi(0, &[1, 2, 3]).is_err());
    /// ```
    pub fn insert_multi(&mut self, pos: usize, bytes: &[u8]) -> Result<(), ChainError> {
        let items = self.split_items(bytes)?;
        self.items.insert_multi(pos, items)
    }

    pub fn insert_chain(&mut self, pos: usize, other: &ByteChain) -> Result<(), ChainError> {
        self.check_compatible(other)?;
        self.items.insert_chain(pos, &other.items)
    }

    /// Deletes `n` items starting at `pos`.
    pub fn delete(&mut self, pos: usize, n: usize) -> Result<(), ChainError> {
        self.items.remove(pos, n)
    }

    /// Deletes `n` items starting at `pos`, and returns them in a new chain.
    pub fn remove(&mut self, pos: usize, n: usize) -> Result<ByteChain, ChainError> {
        Ok(ByteChain {
            item_size: self.item_size,
            items: self.items.extract(pos, n)?,
        })
    }

    /// Truncates or extends this chain to `len` items. New items are filled
    /// with zeros.
    pub fn resize(&mut self, len: usize) {
        self.items.resize(len, SmallVec::from_elem(0, self.item_size));
    }

    pub fn flatten(&mut self) {
        self.items.flatten();
    }

    pub fn append_item(&mut self, item: &[u8]) -> Result<(), ChainError> {
        self.insert_item(self.len(), item)
    }

    pub fn append_multi(&mut self, bytes: &[u8]) -> Result<(), ChainError> {
        self.insert_multi(self.len(), bytes)
    }

    pub fn append_chain(&mut self, other: &ByteChain) -> Result<(), ChainError> {
        self.insert_chain(self.len(), other)
    }

    pub fn prepend_item(&mut self, item: &[u8]) -> Result<(), ChainError> {
        self.insert_item(0, item)
    }

    pub fn prepend_multi(&mut self, bytes: &[u8]) -> Result<(), ChainError> {
        self.insert_multi(0, bytes)
    }

    pub fn prepend_chain(&mut self, other: &ByteChain) -> Result<(), ChainError> {
        self.insert_chain(0, other)
    }
}
