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

//! Testing Framework

use crate::merkle_tree::{
    calculate_root, Digest, Hash, IncrementalTree, MerklePath, MultiIncrementalTree, Parameters,
};
use alloc::vec::Vec;
use ark_ff::{Field, One, PrimeField, UniformRand, Zero};
use core::{array, fmt::Debug};
use rand_core::RngCore;



#[cfg(test)]
mod subroot;

/// Test Hash Function
///
/// Weighted sum of the children followed by the `x^5` power map, over any prime field. The
/// weights are sampled so that the position of every child matters. This is enough to exercise
/// tree layouts but offers no security at all.
#[derive(derivative::Derivative)]
#[derivative(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TestHash<F, const ARITY: usize>
where
    F: PrimeField,
{
    /// Child Weights
    weights: [F; ARITY],

    /// Round Constant
    constant: F,
}

impl<F, const ARITY: usize> TestHash<F, ARITY>
where
    F: PrimeField,
{
    /// Builds a new [`TestHash`] from `weights` and a round `constant`.
    ///
    /// # Panics
    ///
    /// Panics if any of the weights is zero.
    #[inline]
    pub fn new(weights: [F; ARITY], constant: F) -> Self {
        assert!(
            weights.iter().all(|w| !w.is_zero()),
            "Test hash weights must be nonzero."
        );
        Self { weights, constant }
    }

    /// Samples a new [`TestHash`] from `rng`.
    #[inline]
    pub fn sample<R>(rng: &mut R) -> Self
    where
        R: RngCore + ?Sized,
    {
        Self::new(array::from_fn(|_| sample_nonzero(rng)), F::rand(rng))
    }
}

impl<F, const ARITY: usize> Hash<ARITY> for TestHash<F, ARITY>
where
    F: PrimeField,
{
    type Output = F;

    #[inline]
    fn hash(&self, children: &[F; ARITY]) -> F {
        let state = self
            .weights
            .iter()
            .zip(children)
            .fold(self.constant, |acc, (w, c)| acc + *w * c);
        state.square().square() * state
    }
}

/// Samples a nonzero field element from `rng`.
#[inline]
fn sample_nonzero<F, R>(rng: &mut R) -> F
where
    F: PrimeField,
    R: RngCore + ?Sized,
{
    loop {
        let value = F::rand(rng);
        if !value.is_zero() {
            return value;
        }
    }
}

/// Samples [`Parameters`] for trees of the given `depth` using a fresh [`TestHash`] and zero as
/// the empty value.
#[inline]
pub fn sample_parameters<F, R, const ARITY: usize>(
    depth: usize,
    rng: &mut R,
) -> Parameters<TestHash<F, ARITY>, ARITY>
where
    F: PrimeField,
    R: RngCore + ?Sized,
{
    Parameters::new(TestHash::sample(rng), F::zero(), depth)
        .expect("Test parameters must have a valid shape.")
}

/// Returns the field elements `0, 1, ..., count - 1`, in order.
#[inline]
pub fn counting_leaves<F>(count: usize) -> Vec<F>
where
    F: PrimeField,
{
    (0..count as u64).map(F::from).collect()
}

/// Asserts that the root of `tree` is the root of its leaves padded with the empty value.
#[inline]
pub fn assert_padded_root<H, const ARITY: usize>(tree: &IncrementalTree<H, ARITY>)
where
    H: Hash<ARITY>,
    Digest<H, ARITY>: Debug,
{
    assert_eq!(
        tree.parameters().padded_root(tree.leaves()).as_ref(),
        Ok(tree.root()),
        "The incremental root must match the root recomputed from scratch."
    );
}

/// Asserts that the root of `tree` is the root of exactly `leaves`, which must fill the tree.
#[inline]
pub fn assert_full_root<H, const ARITY: usize>(
    tree: &IncrementalTree<H, ARITY>,
    leaves: &[Digest<H, ARITY>],
) where
    H: Hash<ARITY>,
    Digest<H, ARITY>: Debug,
{
    assert_eq!(
        calculate_root::<H, ARITY>(tree.parameters().hasher(), leaves).as_ref(),
        Ok(tree.root()),
        "The incremental root must match the root of the full leaf sequence."
    );
}

/// Asserts that `path` verifies under `hasher` and that changing any single sibling breaks it.
#[inline]
pub fn assert_tamper_evident<H, const ARITY: usize>(
    path: &MerklePath<Digest<H, ARITY>>,
    hasher: &H,
    tweak: impl Fn(&Digest<H, ARITY>) -> Digest<H, ARITY>,
) where
    H: Hash<ARITY>,
{
    assert!(
        path.verify::<H, ARITY>(hasher),
        "Untampered paths must verify."
    );
    for level in 0..path.path_elements.len() {
        for sibling in 0..path.path_elements[level].len() {
            let mut tampered = path.clone();
            tampered.path_elements[level][sibling] = tweak(&path.path_elements[level][sibling]);
            assert!(
                !tampered.verify::<H, ARITY>(hasher),
                "Changing sibling {} on level {} must invalidate the path.",
                sibling,
                level,
            );
        }
    }
    let mut tampered = path.clone();
    tampered.leaf = tweak(&path.leaf);
    assert!(
        !tampered.verify::<H, ARITY>(hasher),
        "Changing the leaf must invalidate the path."
    );
}

/// Asserts that every leaf inserted into `forest` has a valid path against the root of its own
/// shard.
#[inline]
pub fn assert_forest_paths<H, const ARITY: usize>(forest: &MultiIncrementalTree<H, ARITY>)
where
    H: Hash<ARITY>,
    Digest<H, ARITY>: Debug,
{
    for global_index in 0..forest.len() {
        let (shard, local) = forest.locate(global_index);
        let path = forest
            .gen_merkle_path(global_index)
            .expect("Inserted leaves must have paths.");
        assert_eq!(path.index, local, "Forest paths carry local indices.");
        assert_eq!(Some(&path.root), forest.root(shard));
        assert!(
            MultiIncrementalTree::verify_merkle_path(&path, forest.parameters().hasher()),
            "Path for global index {} must verify.",
            global_index,
        );
    }
}

/// Adds one to `value`.
#[inline]
pub fn increment<F>(value: &F) -> F
where
    F: Field,
{
    *value + F::one()
}
