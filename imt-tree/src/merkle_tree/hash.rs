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

//! Merkle Tree Hash Functions

use core::{fmt::Debug, marker::PhantomData};

/// Merkle Tree Hash Function
///
/// Combines the `ARITY` children of an inner node, ordered from left to right, into the value of
/// that node. The same function must be used to build a tree and to verify the paths it produces.
pub trait Hash<const ARITY: usize> {
    /// Node Type
    type Output: Clone + PartialEq;

    /// Computes the parent of `children`.
    fn hash(&self, children: &[Self::Output; ARITY]) -> Self::Output;
}

impl<H, const ARITY: usize> Hash<ARITY> for &H
where
    H: Hash<ARITY> + ?Sized,
{
    type Output = H::Output;

    #[inline]
    fn hash(&self, children: &[Self::Output; ARITY]) -> Self::Output {
        (*self).hash(children)
    }
}

/// Node Type of the Hash Function `H`
pub type Digest<H, const ARITY: usize> = <H as Hash<ARITY>>::Output;

/// Function Hash Adapter
///
/// Wraps any `Fn(&[T; ARITY]) -> T` so that it can be used as a [`Hash`].
#[derive(derivative::Derivative)]
#[derivative(
    Clone(bound = "F: Clone"),
    Copy(bound = "F: Copy"),
    Debug(bound = "F: Debug"),
    Default(bound = "F: Default")
)]
pub struct FnHash<F, T> {
    /// Hash Function
    function: F,

    /// Type Parameter Marker
    __: PhantomData<fn() -> T>,
}

impl<F, T> FnHash<F, T> {
    /// Builds a new [`FnHash`] from `function`.
    #[inline]
    pub const fn new(function: F) -> Self {
        Self {
            function,
            __: PhantomData,
        }
    }

    /// Returns the underlying function.
    #[inline]
    pub fn into_inner(self) -> F {
        self.function
    }
}

impl<F, T, const ARITY: usize> Hash<ARITY> for FnHash<F, T>
where
    F: Fn(&[T; ARITY]) -> T,
    T: Clone + PartialEq,
{
    type Output = T;

    #[inline]
    fn hash(&self, children: &[T; ARITY]) -> T {
        (self.function)(children)
    }
}
