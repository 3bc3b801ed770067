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

//! Merkle Tree Paths

use crate::merkle_tree::{Hash, Node};
use alloc::vec::Vec;
use core::{array, cmp::Ordering};
use imt_util::num::checked_pow;
use tracing::debug;

#[cfg(feature = "serde")]
use imt_util::serde::{Deserialize, Serialize};

/// Merkle Tree Path
///
/// Witnesses that `leaf`, sitting at position `index` of its level, is part of a tree with the
/// given `root`. For a leaf path `leaf` is a leaf of the tree and `depth` is the depth of the tree.
/// For a sub-root path `leaf` is the root of an aligned subtree and `depth` only counts the
/// levels above that subtree, so both kinds of path are verified in the same way.
#[cfg_attr(
    feature = "serde",
    derive(Deserialize, Serialize),
    serde(crate = "imt_util::serde", deny_unknown_fields)
)]
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct MerklePath<T> {
    /// Index of the Proven Node on its Level
    pub index: usize,

    /// Number of Levels between the Proven Node and the Root
    pub depth: usize,

    /// Proven Node
    pub leaf: T,

    /// Sibling Values
    ///
    /// Levels are stored from the proven node to the root, not including the root. Each level
    /// holds the `ARITY - 1` siblings of the node travelling up the path, from left to right.
    pub path_elements: Vec<Vec<T>>,

    /// Claimed Root
    pub root: T,
}

impl<T> MerklePath<T> {
    /// Builds a new [`MerklePath`] proving `leaf` at `index` against `root` through
    /// `path_elements`, taking the depth from the number of levels.
    #[inline]
    pub fn new(index: usize, leaf: T, path_elements: Vec<Vec<T>>, root: T) -> Self {
        Self {
            index,
            depth: path_elements.len(),
            leaf,
            path_elements,
            root,
        }
    }

    /// Returns `true` if `self` has the shape of a path in a tree with `ARITY` children per node:
    /// one level of `ARITY - 1` siblings for each unit of depth, and an index which fits on the
    /// level of the proven node.
    #[inline]
    pub fn is_well_formed<const ARITY: usize>(&self) -> bool {
        if ARITY < 2 {
            debug!(arity = ARITY, "path arity is too small");
            return false;
        }
        if self.path_elements.len() != self.depth {
            debug!(
                depth = self.depth,
                levels = self.path_elements.len(),
                "path depth does not match its number of levels"
            );
            return false;
        }
        if let Some(level) = self
            .path_elements
            .iter()
            .position(|siblings| siblings.len() != ARITY - 1)
        {
            debug!(level, arity = ARITY, "path level has the wrong number of siblings");
            return false;
        }
        if matches!(checked_pow(ARITY, self.depth), Some(width) if self.index >= width) {
            debug!(
                index = self.index,
                depth = self.depth,
                "path index does not fit on its level"
            );
            return false;
        }
        true
    }

    /// Computes the root reached by folding `leaf` with the sibling values of `self`, returning
    /// `None` if `self` is not well-formed.
    ///
    /// See [`is_well_formed`](Self::is_well_formed) for more.
    #[inline]
    pub fn compute_root<H, const ARITY: usize>(&self, hasher: &H) -> Option<T>
    where
        H: Hash<ARITY, Output = T> + ?Sized,
        T: Clone,
    {
        if !self.is_well_formed::<ARITY>() {
            return None;
        }
        let mut node = Node(self.index);
        Some(
            self.path_elements
                .iter()
                .fold(self.leaf.clone(), |current, siblings| {
                    let offset = node.offset::<ARITY>();
                    node.into_parent::<ARITY>();
                    hasher.hash(&array::from_fn(|i| match i.cmp(&offset) {
                        Ordering::Less => siblings[i].clone(),
                        Ordering::Equal => current.clone(),
                        Ordering::Greater => siblings[i - 1].clone(),
                    }))
                }),
        )
    }

    /// Returns `true` if `self` is well-formed and folds up to its claimed `root` using `hasher`.
    ///
    /// Verification never fails loudly: forged or malformed paths are rejected with `false`.
    #[inline]
    pub fn verify<H, const ARITY: usize>(&self, hasher: &H) -> bool
    where
        H: Hash<ARITY, Output = T> + ?Sized,
        T: Clone + PartialEq,
    {
        match self.compute_root::<H, ARITY>(hasher) {
            Some(root) => root == self.root,
            _ => false,
        }
    }
}
