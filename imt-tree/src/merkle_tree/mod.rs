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

//! Incremental Merkle Trees and Forests
//!
//! Fixed-depth trees whose inner nodes have `ARITY` children and whose leaves are appended from
//! left to right. Every position which has not been written to holds an empty value, so each tree
//! always commits to `ARITY^depth` leaves. An [`IncrementalTree`] proves single leaves and aligned
//! blocks of leaves, and a [`MultiIncrementalTree`] chains trees together to accept an unbounded
//! number of leaves.

mod error;
mod hash;
mod node;
mod parameters;
mod root;
mod zero;

pub mod forest;
pub mod path;
pub mod tree;

#[cfg(feature = "test")]
#[cfg_attr(doc_cfg, doc(cfg(feature = "test")))]
pub mod test;

pub use error::*;
pub use forest::MultiIncrementalTree;
pub use hash::*;
pub use node::*;
pub use parameters::*;
pub use path::MerklePath;
pub use root::*;
pub use tree::IncrementalTree;
pub use zero::*;
