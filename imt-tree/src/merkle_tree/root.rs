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

//! Root Calculation

use crate::merkle_tree::{Digest, Error, Hash};
use alloc::vec::Vec;
use core::array;
use imt_util::num::exact_log;

/// Computes the root of the complete tree whose leaves are exactly `leaves`.
///
/// Leaves are grouped `ARITY` at a time and hashed, level after level, until a single node is
/// left. No padding is applied, so callers who need a tree of a given capacity must pad the
/// leaves themselves.
///
/// # Errors
///
/// Fails with [`Error::InvalidLeafCount`] unless the number of leaves is a power of `ARITY`.
#[inline]
pub fn calculate_root<H, const ARITY: usize>(
    hasher: &H,
    leaves: &[Digest<H, ARITY>],
) -> Result<Digest<H, ARITY>, Error>
where
    H: Hash<ARITY> + ?Sized,
{
    if exact_log(leaves.len(), ARITY).is_none() {
        return Err(Error::InvalidLeafCount { len: leaves.len() });
    }
    if let [root] = leaves {
        return Ok(root.clone());
    }
    let mut level = hash_level::<H, ARITY>(hasher, leaves);
    while level.len() > 1 {
        level = hash_level::<H, ARITY>(hasher, &level);
    }
    level.pop().ok_or(Error::InvalidLeafCount { len: leaves.len() })
}

/// Hashes each group of `ARITY` consecutive nodes of `nodes` into its parent.
#[inline]
fn hash_level<H, const ARITY: usize>(
    hasher: &H,
    nodes: &[Digest<H, ARITY>],
) -> Vec<Digest<H, ARITY>>
where
    H: Hash<ARITY> + ?Sized,
{
    nodes
        .chunks_exact(ARITY)
        .map(|group| hasher.hash(&array::from_fn(|i| group[i].clone())))
        .collect()
}

/// Testing Suite
#[cfg(test)]
mod test {
    use super::*;
    use crate::merkle_tree::FnHash;

    /// Builds a hash which is injective on small inputs.
    fn pairing() -> FnHash<fn(&[u64; 2]) -> u64, u64> {
        FnHash::new(|children: &[u64; 2]| 1_000 * children[0] + children[1] + 1)
    }

    /// Checks the root of a small binary tree against a manual computation.
    #[test]
    fn binary_root_matches_manual_computation() {
        let hasher = pairing();
        assert_eq!(
            calculate_root::<_, 2>(&hasher, &[1, 2, 3, 4]),
            Ok(1_006_006)
        );
        assert_eq!(calculate_root::<_, 2>(&hasher, &[7]), Ok(7));
    }

    /// Checks that only powers of the arity are accepted.
    #[test]
    fn rejects_non_power_lengths() {
        let hasher = pairing();
        assert_eq!(
            calculate_root::<_, 2>(&hasher, &[1, 2, 3]),
            Err(Error::InvalidLeafCount { len: 3 })
        );
        assert_eq!(
            calculate_root::<_, 2>(&hasher, &[]),
            Err(Error::InvalidLeafCount { len: 0 })
        );
        let ternary = FnHash::<_, u64>::new(|children: &[u64; 3]| children.iter().sum::<u64>());
        assert_eq!(calculate_root::<_, 3>(&ternary, &[1; 9]), Ok(9));
        assert_eq!(
            calculate_root::<_, 3>(&ternary, &[1; 8]),
            Err(Error::InvalidLeafCount { len: 8 })
        );
    }
}
