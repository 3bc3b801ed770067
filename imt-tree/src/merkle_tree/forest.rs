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

//! Sharded Incremental Merkle Forests

use crate::{
    accumulator::{Accumulator, MembershipProof},
    merkle_tree::{Digest, Error, Hash, IncrementalTree, MerklePath, Parameters},
};
use alloc::{sync::Arc, vec::Vec};
use core::fmt::Debug;
use tracing::debug;

/// Multi Incremental Merkle Tree
///
/// Unbounded sequence of [`IncrementalTree`] shards sharing the same [`Parameters`]. Leaves are
/// always appended to the last shard, and a new shard is opened once the last one is full. Global
/// leaf indices are assigned contiguously across shards, so the leaf with global index `i` lives
/// in shard `i / capacity` at local index `i % capacity`.
///
/// There is no global root. Every shard keeps its own root, and the paths generated by this
/// forest carry local indices and the root of the shard they were generated in.
#[derive(derivative::Derivative)]
#[derivative(
    Clone(bound = ""),
    Debug(bound = "H: Debug, Digest<H, ARITY>: Debug")
)]
pub struct MultiIncrementalTree<H, const ARITY: usize>
where
    H: Hash<ARITY>,
{
    /// Shared Parameters
    parameters: Arc<Parameters<H, ARITY>>,

    /// Shards
    ///
    /// Never empty. Every shard except the last one is full.
    shards: Vec<IncrementalTree<H, ARITY>>,
}

impl<H, const ARITY: usize> MultiIncrementalTree<H, ARITY>
where
    H: Hash<ARITY>,
{
    /// Builds a new [`MultiIncrementalTree`] from `parameters` with a single empty shard.
    #[inline]
    pub fn new(parameters: Parameters<H, ARITY>) -> Self {
        let parameters = Arc::new(parameters);
        Self {
            shards: Vec::from([IncrementalTree::from_shared(parameters.clone())]),
            parameters,
        }
    }

    /// Builds a new [`MultiIncrementalTree`] from `parameters` holding `leaves`.
    #[inline]
    pub fn from_leaves<I>(parameters: Parameters<H, ARITY>, leaves: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = Digest<H, ARITY>>,
    {
        let mut forest = Self::new(parameters);
        forest.extend(leaves)?;
        Ok(forest)
    }

    /// Returns a shared reference to the parameters used by every shard.
    #[inline]
    pub fn parameters(&self) -> &Parameters<H, ARITY> {
        &self.parameters
    }

    /// Returns the number of leaves each shard can hold.
    #[inline]
    pub fn shard_capacity(&self) -> usize {
        self.parameters.capacity()
    }

    /// Returns the number of shards opened so far.
    #[inline]
    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    /// Returns the index of the shard receiving new leaves.
    #[inline]
    pub fn active_shard_index(&self) -> usize {
        self.shards.len().saturating_sub(1)
    }

    /// Returns the shard at `index`, if it was opened.
    #[inline]
    pub fn shard(&self, index: usize) -> Option<&IncrementalTree<H, ARITY>> {
        self.shards.get(index)
    }

    /// Returns the shards in the order they were opened.
    #[inline]
    pub fn shards(&self) -> &[IncrementalTree<H, ARITY>] {
        &self.shards
    }

    /// Returns the number of leaves inserted across all shards.
    #[inline]
    pub fn len(&self) -> usize {
        self.shards.iter().map(IncrementalTree::len).sum()
    }

    /// Returns `true` if no leaf has been inserted.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.shards.iter().all(IncrementalTree::is_empty)
    }

    /// Returns an iterator over the roots of every shard, in shard order.
    #[inline]
    pub fn roots(&self) -> impl ExactSizeIterator<Item = &Digest<H, ARITY>> + '_ {
        self.shards.iter().map(IncrementalTree::root)
    }

    /// Returns the root of the shard at `index`, if it was opened.
    #[inline]
    pub fn root(&self, index: usize) -> Option<&Digest<H, ARITY>> {
        self.shard(index).map(IncrementalTree::root)
    }

    /// Splits `global_index` into the index of its shard and its index inside that shard.
    #[inline]
    pub fn locate(&self, global_index: usize) -> (usize, usize) {
        let capacity = self.shard_capacity();
        (global_index / capacity, global_index % capacity)
    }

    /// Returns the shard at `index` or fails with [`Error::ShardNotFound`].
    #[inline]
    fn lookup(&self, index: usize) -> Result<&IncrementalTree<H, ARITY>, Error> {
        self.shards.get(index).ok_or(Error::ShardNotFound {
            shard: index,
            shards: self.shards.len(),
        })
    }

    /// Returns the leaf stored at `global_index`.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::ShardNotFound`] if the owning shard was never opened, and with
    /// [`Error::IndexNotInserted`] if the leaf was not inserted in its shard.
    #[inline]
    pub fn leaf(&self, global_index: usize) -> Result<&Digest<H, ARITY>, Error> {
        let (shard, local) = self.locate(global_index);
        self.lookup(shard)?.leaf(local)
    }

    /// Returns the shard receiving new leaves, opening a new one if the last shard is full.
    #[inline]
    fn active_shard_mut(&mut self) -> &mut IncrementalTree<H, ARITY> {
        if self.shards.last().map_or(true, IncrementalTree::is_full) {
            debug!(shard = self.shards.len(), "opening shard");
            self.shards
                .push(IncrementalTree::from_shared(self.parameters.clone()));
        }
        let index = self.shards.len() - 1;
        &mut self.shards[index]
    }

    /// Inserts `leaf` into the active shard and returns its global index.
    ///
    /// # Errors
    ///
    /// Only fails if the shard parameters do not allow a single leaf, which [`Parameters::new`]
    /// already rules out.
    #[inline]
    pub fn insert(&mut self, leaf: Digest<H, ARITY>) -> Result<usize, Error> {
        let local = self.active_shard_mut().insert(leaf)?;
        Ok(self.active_shard_index() * self.shard_capacity() + local)
    }

    /// Appends `leaves`, opening as many shards as needed.
    ///
    /// # Errors
    ///
    /// Propagates the errors of [`insert`](Self::insert).
    #[inline]
    pub fn extend<I>(&mut self, leaves: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = Digest<H, ARITY>>,
    {
        for leaf in leaves {
            self.insert(leaf)?;
        }
        Ok(())
    }

    /// Replaces the leaf at `global_index` with `leaf` in its owning shard.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::ShardNotFound`] if the owning shard was never opened, and with
    /// [`Error::IndexNotInserted`] if the leaf was not inserted in its shard.
    #[inline]
    pub fn update(&mut self, global_index: usize, leaf: Digest<H, ARITY>) -> Result<(), Error> {
        let (shard, local) = self.locate(global_index);
        let shards = self.shards.len();
        self.shards
            .get_mut(shard)
            .ok_or(Error::ShardNotFound { shard, shards })?
            .update(local, leaf)
    }

    /// Returns the [`MerklePath`] of the leaf at `global_index` against the root of its shard.
    ///
    /// The path carries the local index of the leaf inside its shard.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::ShardNotFound`] if the owning shard was never opened.
    #[inline]
    pub fn gen_merkle_path(
        &self,
        global_index: usize,
    ) -> Result<MerklePath<Digest<H, ARITY>>, Error> {
        let (shard, local) = self.locate(global_index);
        self.lookup(shard)?.gen_merkle_path(local)
    }

    /// Returns the sub-root [`MerklePath`] of the aligned subtree covering the global range
    /// `start..end` against the root of its shard.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::MisalignedRange`] if the range is empty or spans more than one shard,
    /// with [`Error::ShardNotFound`] if its shard was never opened, and otherwise as
    /// [`IncrementalTree::gen_merkle_subroot_path`] does.
    #[inline]
    pub fn gen_merkle_subroot_path(
        &self,
        start: usize,
        end: usize,
    ) -> Result<MerklePath<Digest<H, ARITY>>, Error> {
        if start >= end {
            return Err(Error::MisalignedRange { start, end });
        }
        let (shard, local_start) = self.locate(start);
        if self.locate(end - 1).0 != shard {
            return Err(Error::MisalignedRange { start, end });
        }
        self.lookup(shard)?
            .gen_merkle_subroot_path(local_start, local_start + (end - start))
    }

    /// Verifies `path` with `hasher`, without needing access to any forest.
    ///
    /// Paths generated by a forest verify exactly like paths generated by a single tree.
    #[inline]
    pub fn verify_merkle_path(path: &MerklePath<Digest<H, ARITY>>, hasher: &H) -> bool {
        path.verify::<H, ARITY>(hasher)
    }
}

impl<H, const ARITY: usize> Accumulator for MultiIncrementalTree<H, ARITY>
where
    H: Hash<ARITY>,
{
    type Item = Digest<H, ARITY>;

    type Checkpoint = Digest<H, ARITY>;

    type Witness = MerklePath<Digest<H, ARITY>>;

    #[inline]
    fn matching_checkpoint(&self, checkpoint: &Self::Checkpoint) -> bool {
        self.roots().any(|root| root == checkpoint)
    }

    #[inline]
    fn insert(&mut self, item: &Self::Item) -> bool {
        MultiIncrementalTree::insert(self, item.clone()).is_ok()
    }

    #[inline]
    fn prove(&self, item: &Self::Item) -> Option<MembershipProof<Self>> {
        self.shards.iter().find_map(|shard| {
            let path = shard.gen_merkle_path(shard.position(item)?).ok()?;
            Some(MembershipProof::new(path.root.clone(), path))
        })
    }

    #[inline]
    fn verify(
        &self,
        item: &Self::Item,
        checkpoint: &Self::Checkpoint,
        witness: &Self::Witness,
    ) -> bool {
        &witness.leaf == item && &witness.root == checkpoint && self.parameters.verify_path(witness)
    }
}
