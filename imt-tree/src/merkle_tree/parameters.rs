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

//! Merkle Tree Parameters

use crate::merkle_tree::{calculate_root, Digest, Error, Hash, MerklePath, ZeroHashes};
use alloc::vec::Vec;
use core::fmt::Debug;
use imt_util::num::checked_pow;

/// Merkle Tree Parameters
///
/// Fixes the hash function, the depth and the empty value of a tree. Trees sharing the same
/// parameters produce interchangeable roots and paths, so a [`MultiIncrementalTree`] hands the
/// same parameters to each of its shards.
///
/// [`MultiIncrementalTree`]: crate::merkle_tree::MultiIncrementalTree
#[derive(derivative::Derivative)]
#[derivative(
    Clone(bound = "H: Clone"),
    Debug(bound = "H: Debug, Digest<H, ARITY>: Debug")
)]
pub struct Parameters<H, const ARITY: usize>
where
    H: Hash<ARITY>,
{
    /// Hash Function
    hasher: H,

    /// Number of Levels above the Leaves
    depth: usize,

    /// Number of Leaves
    capacity: usize,

    /// Empty Subtree Roots
    zeros: ZeroHashes<Digest<H, ARITY>>,
}

impl<H, const ARITY: usize> Parameters<H, ARITY>
where
    H: Hash<ARITY>,
{
    /// Builds a new [`Parameters`] for trees of the given `depth` which pad absent leaves with
    /// `empty_value`.
    ///
    /// # Errors
    ///
    /// Fails if `ARITY` is smaller than two, if `depth` is zero, or if `ARITY^depth` leaves
    /// cannot be indexed by a `usize`.
    #[inline]
    pub fn new(hasher: H, empty_value: Digest<H, ARITY>, depth: usize) -> Result<Self, Error> {
        if ARITY < 2 {
            return Err(Error::InvalidArity { arity: ARITY });
        }
        if depth == 0 {
            return Err(Error::InvalidDepth);
        }
        let capacity = checked_pow(ARITY, depth).ok_or(Error::CapacityOverflow { depth })?;
        let zeros = ZeroHashes::new::<H, ARITY>(&hasher, empty_value, depth);
        Ok(Self {
            hasher,
            depth,
            capacity,
            zeros,
        })
    }

    /// Returns the hash function.
    #[inline]
    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    /// Returns the number of levels above the leaves.
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Returns the number of leaves a tree built with `self` can hold.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the value used to pad absent leaves.
    #[inline]
    pub fn empty_value(&self) -> &Digest<H, ARITY> {
        self.zeros.empty_value()
    }

    /// Returns the zero hash table.
    #[inline]
    pub fn zero_hashes(&self) -> &ZeroHashes<Digest<H, ARITY>> {
        &self.zeros
    }

    /// Returns the root of an empty subtree rooted at `level`.
    ///
    /// # Panics
    ///
    /// Panics if `level` is larger than the depth.
    #[inline]
    pub fn zero(&self, level: usize) -> &Digest<H, ARITY> {
        &self.zeros[level]
    }

    /// Computes the parent of `children`.
    #[inline]
    pub fn hash(&self, children: &[Digest<H, ARITY>; ARITY]) -> Digest<H, ARITY> {
        self.hasher.hash(children)
    }

    /// Computes the root of a full tree holding `leaves` followed by as many empty values as
    /// needed to reach the capacity.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::TreeFull`] if there are more leaves than the capacity.
    #[inline]
    pub fn padded_root(&self, leaves: &[Digest<H, ARITY>]) -> Result<Digest<H, ARITY>, Error> {
        if leaves.len() > self.capacity {
            return Err(Error::TreeFull {
                capacity: self.capacity,
            });
        }
        let mut padded = Vec::with_capacity(self.capacity);
        padded.extend_from_slice(leaves);
        padded.resize(self.capacity, self.empty_value().clone());
        calculate_root::<H, ARITY>(&self.hasher, &padded)
    }

    /// Verifies that `path` reaches the root it claims to reach.
    ///
    /// See [`MerklePath::verify`] for more.
    #[inline]
    pub fn verify_path(&self, path: &MerklePath<Digest<H, ARITY>>) -> bool {
        path.verify::<H, ARITY>(&self.hasher)
    }
}
