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

//! Sub-root Path Scenarios

use crate::merkle_tree::{
    calculate_root,
    test::{assert_tamper_evident, counting_leaves, increment, sample_parameters, TestHash},
    Error, IncrementalTree,
};
use ark_bn254::Fr;
use rand_chacha::{rand_core::SeedableRng, ChaCha20Rng};

/// Test Tree Type
type Tree<const ARITY: usize> = IncrementalTree<TestHash<Fr, ARITY>, ARITY>;

/// Builds a full tree of the given `depth` holding `0..capacity`.
fn full_tree<const ARITY: usize>(depth: usize, seed: u64) -> Tree<ARITY> {
    let parameters =
        sample_parameters::<Fr, _, ARITY>(depth, &mut ChaCha20Rng::seed_from_u64(seed));
    let leaves = counting_leaves::<Fr>(parameters.capacity());
    Tree::<ARITY>::from_leaves(parameters, leaves).expect("Leaves fill the tree exactly.")
}

/// Checks the sub-root path of every aligned block of `ARITY^sub_depth` leaves.
fn aligned_blocks<const ARITY: usize>(depth: usize, sub_depth: usize) {
    let tree = full_tree::<ARITY>(depth, 10);
    let hasher = tree.parameters().hasher();
    let width = ARITY.pow(sub_depth as u32);
    for start in (0..tree.capacity()).step_by(width) {
        let end = start + width;
        let path = tree
            .gen_merkle_subroot_path(start, end)
            .expect("Aligned blocks have sub-root paths.");
        assert_eq!(path.depth, depth - sub_depth);
        assert_eq!(path.index, start / width);
        assert_eq!(
            Ok(path.leaf),
            calculate_root::<_, ARITY>(hasher, &tree.leaves()[start..end])
        );
        assert_eq!(&path.root, tree.root());
        assert!(Tree::<ARITY>::verify_merkle_path(&path, hasher));
        assert_tamper_evident(&path, hasher, increment::<Fr>);
    }
}

/// Checks that every misaligned or oversized range is rejected.
fn misaligned<const ARITY: usize>(depth: usize) {
    let tree = full_tree::<ARITY>(depth, 11);
    let capacity = tree.capacity();
    for (start, end) in [(0, 0), (ARITY, ARITY), (ARITY, 1), (1, ARITY + 1), (0, ARITY + 1)] {
        assert_eq!(
            tree.gen_merkle_subroot_path(start, end),
            Err(Error::MisalignedRange { start, end }),
            "Range {}..{} must be rejected.",
            start,
            end,
        );
    }
    assert_eq!(
        tree.gen_merkle_subroot_path(capacity, capacity + ARITY),
        Err(Error::IndexOutOfRange {
            index: capacity + ARITY - 1,
            capacity
        })
    );
}

/// Checks the degenerate ranges: a single leaf and the whole tree.
fn degenerate<const ARITY: usize>(depth: usize) {
    let tree = full_tree::<ARITY>(depth, 12);
    let whole = tree
        .gen_merkle_subroot_path(0, tree.capacity())
        .expect("The whole tree is an aligned block.");
    assert_eq!(whole.depth, 0);
    assert!(whole.path_elements.is_empty());
    assert_eq!(&whole.leaf, tree.root());
    for index in [0, ARITY - 1, tree.capacity() - 1] {
        assert_eq!(
            tree.gen_merkle_subroot_path(index, index + 1),
            tree.gen_merkle_path(index)
        );
    }
}

/// Checks that blocks past the insertion frontier prove the empty subtree.
fn padded_blocks<const ARITY: usize>(depth: usize, sub_depth: usize) {
    let parameters =
        sample_parameters::<Fr, _, ARITY>(depth, &mut ChaCha20Rng::seed_from_u64(13));
    let mut tree = Tree::<ARITY>::new(parameters);
    tree.extend(counting_leaves::<Fr>(ARITY + 1))
        .expect("Leaves fit in the tree.");
    let width = ARITY.pow(sub_depth as u32);
    let start = tree.capacity() - width;
    let path = tree
        .gen_merkle_subroot_path(start, tree.capacity())
        .expect("The last block is aligned.");
    assert_eq!(&path.leaf, tree.parameters().zero(sub_depth));
    assert!(path.verify::<_, ARITY>(tree.parameters().hasher()));
}

#[test]
fn aligned_blocks_binary_a() {
    aligned_blocks::<2>(4, 3);
}

#[test]
fn aligned_blocks_binary_b() {
    aligned_blocks::<2>(4, 2);
}

#[test]
fn aligned_blocks_quinary_a() {
    aligned_blocks::<5>(4, 3);
}

#[test]
fn aligned_blocks_quinary_b() {
    aligned_blocks::<5>(4, 2);
}

#[test]
fn aligned_blocks_hexadecimal_a() {
    aligned_blocks::<16>(2, 1);
}

#[test]
fn aligned_blocks_hexadecimal_b() {
    aligned_blocks::<16>(3, 1);
}

#[test]
fn misaligned_ranges() {
    misaligned::<2>(4);
    misaligned::<5>(3);
    misaligned::<16>(2);
}

#[test]
fn degenerate_ranges() {
    degenerate::<2>(3);
    degenerate::<5>(2);
    degenerate::<16>(2);
}

#[test]
fn blocks_past_the_frontier() {
    padded_blocks::<2>(4, 2);
    padded_blocks::<5>(3, 1);
    padded_blocks::<16>(2, 1);
}
