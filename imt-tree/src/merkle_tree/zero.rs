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

//! Zero Hashes

use crate::merkle_tree::{Digest, Hash};
use alloc::vec::Vec;
use core::{array, fmt::Debug, hash, mem, ops::Index};

/// Zero Hash Table
///
/// Stores, for every level from the leaves (level `0`) up to the root (level `depth`), the root of
/// a subtree of that height whose leaves are all equal to the empty value. Positions which were
/// never written to are padded with these values instead of being recomputed.
#[derive(derivative::Derivative)]
#[derivative(
    Clone(bound = "T: Clone"),
    Debug(bound = "T: Debug"),
    Eq(bound = "T: Eq"),
    Hash(bound = "T: hash::Hash"),
    PartialEq(bound = "T: PartialEq")
)]
pub struct ZeroHashes<T> {
    /// Empty Subtree Roots by Level
    digests: Vec<T>,
}

impl<T> ZeroHashes<T> {
    /// Computes the zero hashes of a tree with the given `depth` whose empty leaves are
    /// `empty_value`.
    #[inline]
    pub fn new<H, const ARITY: usize>(hasher: &H, empty_value: T, depth: usize) -> Self
    where
        H: Hash<ARITY, Output = T> + ?Sized,
        T: Clone,
    {
        let mut digests = Vec::with_capacity(depth + 1);
        let mut current = empty_value;
        for _ in 0..depth {
            let next: Digest<H, ARITY> = hasher.hash(&array::from_fn(|_| current.clone()));
            digests.push(mem::replace(&mut current, next));
        }
        digests.push(current);
        Self { digests }
    }

    /// Returns the root of an empty subtree rooted at `level`, if `level` is in the table.
    #[inline]
    pub fn get(&self, level: usize) -> Option<&T> {
        self.digests.get(level)
    }

    /// Returns the empty leaf value.
    #[inline]
    pub fn empty_value(&self) -> &T {
        &self.digests[0]
    }

    /// Returns the root of the completely empty tree.
    #[inline]
    pub fn root(&self) -> &T {
        &self.digests[self.depth()]
    }

    /// Returns the depth of the tree this table was computed for.
    #[inline]
    pub fn depth(&self) -> usize {
        self.digests.len() - 1
    }

    /// Returns the zero hashes ordered from the leaves to the root.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.digests
    }
}

impl<T> Index<usize> for ZeroHashes<T> {
    type Output = T;

    #[inline]
    fn index(&self, level: usize) -> &Self::Output {
        &self.digests[level]
    }
}
