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

//! Numeric Utilities
//!
//! Integer helpers for trees whose nodes have `arity` children.

/// Returns `base` raised to `exponent`, or `None` if the result does not fit in a `usize`.
#[inline]
pub fn checked_pow(base: usize, exponent: usize) -> Option<usize> {
    base.checked_pow(u32::try_from(exponent).ok()?)
}

/// Returns the exponent `k` such that `value == base^k`, or `None` if `value` is not an exact
/// power of `base`.
///
/// Bases smaller than `2` have no well-defined logarithm and always return `None`.
#[inline]
pub fn exact_log(mut value: usize, base: usize) -> Option<usize> {
    if base < 2 || value == 0 {
        return None;
    }
    let mut exponent = 0;
    while value % base == 0 {
        value /= base;
        exponent += 1;
    }
    (value == 1).then_some(exponent)
}

/// Returns the offset of `index` inside its group of `arity` consecutive siblings.
#[inline]
pub const fn group_offset(index: usize, arity: usize) -> usize {
    index % arity
}

/// Returns the index of the first member of the group of `arity` consecutive siblings which
/// contains `index`.
#[inline]
pub const fn group_start(index: usize, arity: usize) -> usize {
    index - group_offset(index, arity)
}

/// Testing Suite
#[cfg(test)]
mod test {
    use super::*;

    /// Checks that exact logarithms are only returned for exact powers.
    #[test]
    fn exact_log_accepts_only_powers() {
        assert_eq!(exact_log(1, 2), Some(0));
        assert_eq!(exact_log(8, 2), Some(3));
        assert_eq!(exact_log(125, 5), Some(3));
        assert_eq!(exact_log(256, 16), Some(2));
        assert_eq!(exact_log(12, 2), None);
        assert_eq!(exact_log(32, 16), None);
        assert_eq!(exact_log(0, 2), None);
        assert_eq!(exact_log(4, 1), None);
    }

    /// Checks that overflowing powers are reported instead of wrapping.
    #[test]
    fn checked_pow_detects_overflow() {
        assert_eq!(checked_pow(2, 3), Some(8));
        assert_eq!(checked_pow(16, 0), Some(1));
        assert_eq!(checked_pow(2, usize::BITS as usize), None);
        assert_eq!(checked_pow(3, usize::MAX), None);
    }

    /// Checks sibling group arithmetic for a non-binary arity.
    #[test]
    fn group_arithmetic() {
        assert_eq!(group_offset(7, 5), 2);
        assert_eq!(group_start(7, 5), 5);
        assert_eq!(group_start(4, 5), 0);
        assert_eq!(group_start(10, 2), 10);
    }
}
