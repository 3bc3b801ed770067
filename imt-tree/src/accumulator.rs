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

//! Dynamic Accumulators
//!
//! Interface shared by the structures of this crate which can prove that an item was accumulated
//! into a public checkpoint. For Merkle trees the checkpoint is a root and the witness is a
//! [`MerklePath`](crate::merkle_tree::MerklePath).

/// Accumulator Membership Verifier
pub trait Verifier {
    /// Item Type
    type Item: ?Sized;

    /// Public Checkpoint Type
    type Checkpoint;

    /// Witness Type
    type Witness;

    /// Verifies that `item` is stored in a known accumulator with `checkpoint` and `witness`.
    fn verify(
        &self,
        item: &Self::Item,
        checkpoint: &Self::Checkpoint,
        witness: &Self::Witness,
    ) -> bool;
}

/// Accumulator
pub trait Accumulator {
    /// Item Type
    type Item: ?Sized;

    /// Public Checkpoint Type
    type Checkpoint;

    /// Witness Type
    type Witness;

    /// Returns `true` if the accumulated value of `self` matches the given `checkpoint`.
    fn matching_checkpoint(&self, checkpoint: &Self::Checkpoint) -> bool;

    /// Inserts `item` into `self` with the guarantee that `self` can later return a valid
    /// membership proof for `item` with a call to [`prove`](Self::prove). This method returns
    /// `false` if the maximum capacity of the accumulator would be exceeded by inserting `item`.
    fn insert(&mut self, item: &Self::Item) -> bool;

    /// Returns a membership proof for `item` if it is contained in `self`.
    fn prove(&self, item: &Self::Item) -> Option<MembershipProof<Self>>;

    /// Returns `true` if `item` is stored in `self`.
    #[inline]
    fn contains(&self, item: &Self::Item) -> bool {
        self.prove(item).is_some()
    }

    /// Verifies that `item` is stored in `self` with `checkpoint` and `witness`.
    fn verify(
        &self,
        item: &Self::Item,
        checkpoint: &Self::Checkpoint,
        witness: &Self::Witness,
    ) -> bool;
}

impl<A> Verifier for A
where
    A: Accumulator + ?Sized,
{
    type Item = A::Item;

    type Checkpoint = A::Checkpoint;

    type Witness = A::Witness;

    #[inline]
    fn verify(
        &self,
        item: &Self::Item,
        checkpoint: &Self::Checkpoint,
        witness: &Self::Witness,
    ) -> bool {
        Accumulator::verify(self, item, checkpoint, witness)
    }
}

/// Accumulator Membership Proof
pub struct MembershipProof<V>
where
    V: Verifier + ?Sized,
{
    /// Public Checkpoint
    checkpoint: V::Checkpoint,

    /// Witness
    witness: V::Witness,
}

impl<V> MembershipProof<V>
where
    V: Verifier + ?Sized,
{
    /// Builds a new [`MembershipProof`] from `checkpoint` and `witness`.
    #[inline]
    pub fn new(checkpoint: V::Checkpoint, witness: V::Witness) -> Self {
        Self {
            checkpoint,
            witness,
        }
    }

    /// Returns the public checkpoint of `self`.
    #[inline]
    pub fn checkpoint(&self) -> &V::Checkpoint {
        &self.checkpoint
    }

    /// Returns the witness of `self`.
    #[inline]
    pub fn witness(&self) -> &V::Witness {
        &self.witness
    }

    /// Converts `self` into its checkpoint, dropping the [`V::Witness`](Verifier::Witness).
    #[inline]
    pub fn into_checkpoint(self) -> V::Checkpoint {
        self.checkpoint
    }

    /// Converts `self` into its witness, dropping the [`V::Checkpoint`](Verifier::Checkpoint).
    #[inline]
    pub fn into_witness(self) -> V::Witness {
        self.witness
    }

    /// Returns `true` if the accumulated value of `accumulator` matches the internal checkpoint
    /// inside of `self`.
    #[inline]
    pub fn matching_checkpoint<A>(&self, accumulator: &A) -> bool
    where
        A: Accumulator<Item = V::Item, Checkpoint = V::Checkpoint, Witness = V::Witness>,
    {
        accumulator.matching_checkpoint(&self.checkpoint)
    }

    /// Verifies that `item` is stored in a known accumulator using `verifier`.
    #[inline]
    pub fn verify(&self, item: &V::Item, verifier: &V) -> bool {
        verifier.verify(item, &self.checkpoint, &self.witness)
    }
}

/// Testing Framework
#[cfg(feature = "test")]
#[cfg_attr(doc_cfg, doc(cfg(feature = "test")))]
pub mod test {
    use super::*;

    /// Asserts that `item` can be inserted into `accumulator` and that the proof returned for it
    /// afterwards is valid and matches the current state of `accumulator`.
    #[inline]
    pub fn assert_provable_membership<A>(accumulator: &mut A, item: &A::Item)
    where
        A: Accumulator,
    {
        assert!(
            accumulator.insert(item),
            "Item could not be inserted into the accumulator."
        );
        assert!(
            accumulator.contains(item),
            "Item was supposed to be contained in the accumulator after insertion."
        );
        match accumulator.prove(item) {
            Some(proof) => {
                assert!(
                    proof.matching_checkpoint(accumulator),
                    "The membership proof must match the current checkpoint of the accumulator."
                );
                assert!(
                    proof.verify(item, accumulator),
                    "The accumulator was supposed to return a valid membership proof for an inserted item."
                );
            }
            _ => panic!("Item was supposed to be contained in the accumulator after insertion."),
        }
    }

    /// Asserts that no item of `iter` can be proven against `accumulator` while it is empty.
    #[inline]
    pub fn assert_empty_membership<'i, A, I>(accumulator: &A, iter: I)
    where
        A: Accumulator,
        A::Item: 'i,
        I: IntoIterator<Item = &'i A::Item>,
    {
        for item in iter {
            assert!(
                !accumulator.contains(item),
                "No item was supposed to be contained in the empty accumulator."
            );
        }
    }
}
