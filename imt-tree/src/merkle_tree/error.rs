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

//! Merkle Tree Errors

use displaydoc::Display;

/// Merkle Tree Error
///
/// Every variant reports a violated caller contract. None of them are transient, so retrying the
/// same operation on the same tree always fails again.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum Error {
    /// Arity {arity} is too small, trees need at least two children per node
    InvalidArity {
        /// Requested Arity
        arity: usize,
    },

    /// Trees must have a depth of at least one
    InvalidDepth,

    /// Capacity of a tree with depth {depth} does not fit in a `usize`
    CapacityOverflow {
        /// Requested Depth
        depth: usize,
    },

    /// Tree is full, it can only hold {capacity} leaves
    TreeFull {
        /// Tree Capacity
        capacity: usize,
    },

    /// Leaf {index} has not been inserted, the tree only holds {len} leaves
    IndexNotInserted {
        /// Requested Index
        index: usize,

        /// Number of Inserted Leaves
        len: usize,
    },

    /// Index {index} is outside of a tree with capacity {capacity}
    IndexOutOfRange {
        /// Requested Index
        index: usize,

        /// Tree Capacity
        capacity: usize,
    },

    /// Range {start}..{end} is not a single aligned subtree
    MisalignedRange {
        /// Range Start
        start: usize,

        /// Range End (exclusive)
        end: usize,
    },

    /// Cannot compute a root over {len} leaves, the count must be a power of the arity
    InvalidLeafCount {
        /// Number of Leaves
        len: usize,
    },

    /// Shard {shard} does not exist, only {shards} shards have been opened
    ShardNotFound {
        /// Requested Shard
        shard: usize,

        /// Number of Opened Shards
        shards: usize,
    },
}

#[cfg(feature = "std")]
#[cfg_attr(doc_cfg, doc(cfg(feature = "std")))]
impl std::error::Error for Error {}
