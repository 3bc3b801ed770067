// Copyright 2019-2022 Manta Network.
// This file is part of imt-rs.
//
// imt-rs is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// imt-rs is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with imt-rs.  If not, see <http://www.gnu.org/licenses/>.

//! Merkle Tree Node Indices

use core::{iter::FusedIterator, ops::Range};
use imt_util::num::{group_offset, group_start};

#[cfg(feature = "serde")]
use imt_util::serde::{Deserialize, Serialize};

/// Node Index
///
/// Level-wise index of a node in a tree whose inner nodes have `ARITY` children. The arity is
/// supplied to each method which needs it, so the same index can be moved between levels.
#[cfg_attr(
    feature = "serde",
    derive(Deserialize, Serialize),
    serde(crate = "imt_util::serde", deny_unknown_fields)
)]
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Node(
    /// Level-wise Index
    pub usize,
);

impl Node {
    /// Returns the offset of `self` inside its group of siblings, which is also the position of
    /// `self` among the inputs of the hash computing its parent.
    #[inline]
    pub const fn offset<const ARITY: usize>(&self) -> usize {
        group_offset(self.0, ARITY)
    }

    /// Returns the left-most member of the sibling group of `self`.
    #[inline]
    #[must_use]
    pub const fn group_start<const ARITY: usize>(&self) -> Self {
        Self(group_start(self.0, ARITY))
    }

    /// Returns the range of indices covered by the sibling group of `self`, including `self`.
    #[inline]
    pub const fn group<const ARITY: usize>(&self) -> Range<usize> {
        let start = group_start(self.0, ARITY);
        start..start + ARITY
    }

    /// Returns an iterator over the siblings of `self` from left to right, skipping `self`.
    #[inline]
    pub const fn siblings<const ARITY: usize>(&self) -> Siblings<ARITY> {
        Siblings {
            node: *self,
            group: self.group::<ARITY>(),
        }
    }

    /// Returns the parent [`Node`] of this node.
    #[inline]
    #[must_use]
    pub const fn parent<const ARITY: usize>(&self) -> Self {
        Self(self.0 / ARITY)
    }

    /// Converts `self` into its parent, returning the parent [`Node`].
    #[inline]
    pub fn into_parent<const ARITY: usize>(&mut self) -> Self {
        *self = self.parent::<ARITY>();
        *self
    }
}

impl From<usize> for Node {
    #[inline]
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl From<Node> for usize {
    #[inline]
    fn from(node: Node) -> Self {
        node.0
    }
}

/// Node Sibling Iterator
///
/// This `struct` is created by the [`siblings`](Node::siblings) method on [`Node`].
/// See its documentation for more.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Siblings<const ARITY: usize> {
    /// Node whose Siblings are Returned
    node: Node,

    /// Remaining Group Indices
    group: Range<usize>,
}

impl<const ARITY: usize> Iterator for Siblings<ARITY> {
    type Item = Node;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let index = self.group.find(|i| *i != self.node.0)?;
        Some(Node(index))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.group.len() - usize::from(self.group.contains(&self.node.0));
        (len, Some(len))
    }
}

impl<const ARITY: usize> ExactSizeIterator for Siblings<ARITY> {}

impl<const ARITY: usize> FusedIterator for Siblings<ARITY> {}
