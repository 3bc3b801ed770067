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

//! Arkworks Backend
//!
//! Field elements of any arkworks prime field can be used as tree nodes directly. This module
//! re-exports the backend crates so that downstream users do not need to depend on them.

pub use ark_ff as ff;

#[cfg(feature = "ark-bn254")]
#[cfg_attr(doc_cfg, doc(cfg(feature = "ark-bn254")))]
pub use ark_bn254 as bn254;
