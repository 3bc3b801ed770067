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

//! Incremental Merkle Trees

use crate::{
    accumulator::{Accumulator, MembershipProof},
    merkle_tree::{calculate_root, Digest, Error, Hash, MerklePath, Node, Parameters},
};
use alloc::{sync::Arc, vec::Vec};
use core::{array, fmt::Debug};
use imt_util::num::exact_log;
use tracing::trace;

/// Incremental Merkle Tree
///
/// Append-only tree of fixed depth whose inner nodes have `ARITY` children. Leaves are inserted
/// from left to right and every position which has not been written to counts as the empty value
/// of the [`Parameters`], so the root always commits to a full tree of `capacity` leaves.
///
/// Every node computed so far is retained level by level. Inserting or updating a leaf therefore
/// costs `depth` hashes, and the siblings of any path can be read back without recomputation.
#[derive(derivative::Derivative)]
#[derivative(
    Clone(bound = ""),
    Debug(bound = "H: Debug, Digest<H, ARITY>: Debug")
)]
pub struct IncrementalTree<H, const ARITY: usize>
where
    H: Hash<ARITY>,
{
    /// Tree Parameters
    parameters: Arc<Parameters<H, ARITY>>,

    /// Computed Nodes
    ///
    /// Level `0` holds the inserted leaves and level `l` holds every node at height `l` which
    /// has at least one inserted leaf below it. The root is stored separately.
    levels: Vec<Vec<Digest<H, ARITY>>>,

    /// Root
    root: Digest<H, ARITY>,
}

impl<H, const ARITY: usize> IncrementalTree<H, ARITY>
where
    H: Hash<ARITY>,
{
    /// Builds a new empty [`IncrementalTree`] from `parameters`.
    #[inline]
    pub fn new(parameters: Parameters<H, ARITY>) -> Self {
        Self::from_shared(Arc::new(parameters))
    }

    /// Builds a new empty [`IncrementalTree`] from `parameters` which may be shared with other
    /// trees.
    #[inline]
    pub fn from_shared(parameters: Arc<Parameters<H, ARITY>>) -> Self {
        Self {
            levels: (0..parameters.depth()).map(|_| Vec::new()).collect(),
            root: parameters.zero_hashes().root().clone(),
            parameters,
        }
    }

    /// Builds a new [`IncrementalTree`] from `parameters` holding `leaves`.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::TreeFull`] if there are more leaves than the capacity.
    #[inline]
    pub fn from_leaves<I>(parameters: Parameters<H, ARITY>, leaves: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = Digest<H, ARITY>>,
    {
        let mut tree = Self::new(parameters);
        tree.extend(leaves)?;
        Ok(tree)
    }

    /// Returns a shared reference to the parameters used by this tree.
    #[inline]
    pub fn parameters(&self) -> &Parameters<H, ARITY> {
        &self.parameters
    }

    /// Returns the shared pointer to the parameters used by this tree.
    #[inline]
    pub fn shared_parameters(&self) -> &Arc<Parameters<H, ARITY>> {
        &self.parameters
    }

    /// Returns the number of levels above the leaves.
    #[inline]
    pub fn depth(&self) -> usize {
        self.parameters.depth()
    }

    /// Returns the number of leaves this tree can hold.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.parameters.capacity()
    }

    /// Returns the number of inserted leaves.
    #[inline]
    pub fn len(&self) -> usize {
        self.leaves().len()
    }

    /// Returns `true` if no leaf has been inserted.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if no more leaves can be inserted.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.len() >= self.capacity()
    }

    /// Returns the root of the tree.
    #[inline]
    pub fn root(&self) -> &Digest<H, ARITY> {
        &self.root
    }

    /// Returns the inserted leaves in insertion order.
    #[inline]
    pub fn leaves(&self) -> &[Digest<H, ARITY>] {
        // NOTE: Parameters guarantee a depth of at least one, so the leaf level always exists.
        &self.levels[0]
    }

    /// Returns the leaf stored at `index`.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::IndexNotInserted`] if no leaf was inserted at `index`.
    #[inline]
    pub fn leaf(&self, index: usize) -> Result<&Digest<H, ARITY>, Error> {
        self.leaves().get(index).ok_or(Error::IndexNotInserted {
            index,
            len: self.len(),
        })
    }

    /// Returns the index of the first leaf equal to `leaf`.
    #[inline]
    pub fn position(&self, leaf: &Digest<H, ARITY>) -> Option<usize> {
        self.leaves().iter().position(|l| l == leaf)
    }

    /// Returns the node at `index` on the given `level`, falling back to the zero hash of that
    /// level for nodes without any inserted leaf below them.
    #[inline]
    fn node(&self, level: usize, index: usize) -> &Digest<H, ARITY> {
        self.levels
            .get(level)
            .and_then(|nodes| nodes.get(index))
            .unwrap_or_else(|| self.parameters.zero(level))
    }

    /// Computes the parent of the sibling group of `node` on the given `level`.
    #[inline]
    fn hash_group(&self, level: usize, node: Node) -> Digest<H, ARITY> {
        let start = node.group_start::<ARITY>().0;
        self.parameters
            .hash(&array::from_fn(|i| self.node(level, start + i).clone()))
    }

    /// Recomputes every ancestor of the leaf at `index`, from the leaf level up to the root.
    #[inline]
    fn recompute_path(&mut self, index: usize) {
        let mut node = Node(index);
        for level in 0..self.depth() {
            let parent = self.hash_group(level, node);
            node.into_parent::<ARITY>();
            match self.levels.get_mut(level + 1) {
                Some(nodes) if node.0 < nodes.len() => nodes[node.0] = parent,
                Some(nodes) => {
                    debug_assert_eq!(node.0, nodes.len(), "Ancestors are computed left to right.");
                    nodes.push(parent);
                }
                _ => self.root = parent,
            }
        }
    }

    /// Inserts `leaf` at the next available position, returning its index.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::TreeFull`] if the tree has exhausted its capacity.
    #[inline]
    pub fn insert(&mut self, leaf: Digest<H, ARITY>) -> Result<usize, Error> {
        let index = self.len();
        if index >= self.capacity() {
            return Err(Error::TreeFull {
                capacity: self.capacity(),
            });
        }
        trace!(index, "inserting leaf");
        self.levels[0].push(leaf);
        self.recompute_path(index);
        Ok(index)
    }

    /// Appends `leaves` at the end of the tree.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::TreeFull`] if the leaves do not fit in the remaining capacity, in which
    /// case the tree is left untouched.
    #[inline]
    pub fn extend<I>(&mut self, leaves: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = Digest<H, ARITY>>,
    {
        let leaves = leaves.into_iter().collect::<Vec<_>>();
        if leaves.len() > self.capacity() - self.len() {
            return Err(Error::TreeFull {
                capacity: self.capacity(),
            });
        }
        for leaf in leaves {
            self.insert(leaf)?;
        }
        Ok(())
    }

    /// Replaces the leaf at `index` with `leaf` and recomputes the root.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::IndexNotInserted`] if `index` has not been inserted yet. Writing past
    /// the insertion frontier is rejected rather than padded.
    #[inline]
    pub fn update(&mut self, index: usize, leaf: Digest<H, ARITY>) -> Result<(), Error> {
        let len = self.len();
        match self.levels[0].get_mut(index) {
            Some(current) => *current = leaf,
            _ => return Err(Error::IndexNotInserted { index, len }),
        }
        trace!(index, "updating leaf");
        self.recompute_path(index);
        Ok(())
    }

    /// Collects the siblings of the node at `index` on `level` and of each of its ancestors,
    /// stopping below the root.
    #[inline]
    fn path_elements(&self, level: usize, index: usize) -> Vec<Vec<Digest<H, ARITY>>> {
        let mut node = Node(index);
        (level..self.depth())
            .map(|level| {
                let siblings = node
                    .siblings::<ARITY>()
                    .map(|sibling| self.node(level, sibling.0).clone())
                    .collect();
                node.into_parent::<ARITY>();
                siblings
            })
            .collect()
    }

    /// Returns the [`MerklePath`] of the leaf at `index` against the current root.
    ///
    /// Positions which have not been inserted yet are proven to hold the empty value.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::IndexOutOfRange`] if `index` is not smaller than the capacity.
    #[inline]
    pub fn gen_merkle_path(&self, index: usize) -> Result<MerklePath<Digest<H, ARITY>>, Error> {
        if index >= self.capacity() {
            return Err(Error::IndexOutOfRange {
                index,
                capacity: self.capacity(),
            });
        }
        Ok(MerklePath::new(
            index,
            self.node(0, index).clone(),
            self.path_elements(0, index),
            self.root.clone(),
        ))
    }

    /// Returns the [`MerklePath`] of the right-most inserted leaf, if any.
    #[inline]
    pub fn current_path(&self) -> Option<MerklePath<Digest<H, ARITY>>> {
        self.len()
            .checked_sub(1)
            .and_then(|index| self.gen_merkle_path(index).ok())
    }

    /// Returns a [`MerklePath`] proving that the root of the subtree covering the leaves in
    /// `start..end` is part of this tree.
    ///
    /// The range must cover exactly one aligned subtree: its length has to be a power of `ARITY`
    /// and `start` a multiple of that length. The returned path has the subtree root as its leaf,
    /// the index of the subtree on its level as its index, and only the levels above the subtree
    /// as its depth.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::MisalignedRange`] if the range is empty, not a power of `ARITY` long,
    /// or not aligned, and with [`Error::IndexOutOfRange`] if it ends past the capacity.
    #[inline]
    pub fn gen_merkle_subroot_path(
        &self,
        start: usize,
        end: usize,
    ) -> Result<MerklePath<Digest<H, ARITY>>, Error> {
        let misaligned = Error::MisalignedRange { start, end };
        let width = end.checked_sub(start).filter(|w| *w > 0).ok_or(misaligned)?;
        let sub_depth = exact_log(width, ARITY).ok_or(misaligned)?;
        if start % width != 0 {
            return Err(misaligned);
        }
        if end > self.capacity() {
            return Err(Error::IndexOutOfRange {
                index: end - 1,
                capacity: self.capacity(),
            });
        }
        let leaves = (start..end)
            .map(|i| self.node(0, i).clone())
            .collect::<Vec<_>>();
        let subroot = calculate_root::<H, ARITY>(self.parameters.hasher(), &leaves)?;
        let index = start / width;
        Ok(MerklePath::new(
            index,
            subroot,
            self.path_elements(sub_depth, index),
            self.root.clone(),
        ))
    }

    /// Verifies `path` with `hasher`, without needing access to any tree.
    ///
    /// See [`MerklePath::verify`] for more.
    #[inline]
    pub fn verify_merkle_path(path: &MerklePath<Digest<H, ARITY>>, hasher: &H) -> bool {
        path.verify::<H, ARITY>(hasher)
    }
}

impl<H, const ARITY: usize> Accumulator for IncrementalTree<H, ARITY>
where
    H: Hash<ARITY>,
{
    type Item = Digest<H, ARITY>;

    type Checkpoint = Digest<H, ARITY>;

    type Witness = MerklePath<Digest<H, ARITY>>;

    #[inline]
    fn matching_checkpoint(&self, checkpoint: &Self::Checkpoint) -> bool {
        &self.root == checkpoint
    }

    #[inline]
    fn insert(&mut self, item: &Self::Item) -> bool {
        IncrementalTree::insert(self, item.clone()).is_ok()
    }

    #[inline]
    fn prove(&self, item: &Self::Item) -> Option<MembershipProof<Self>> {
        let path = self.gen_merkle_path(self.position(item)?).ok()?;
        Some(MembershipProof::new(path.root.clone(), path))
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
