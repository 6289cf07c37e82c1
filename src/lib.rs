///! Sparse `LDLᵀ` update/downdate numerical core.
///!
///! Given an existing column-compressed `LDLᵀ` factorization of a symmetric
///! positive-definite matrix and a dense set of update vectors forming a
///! low-rank perturbation, this crate rewrites the affected columns of `L`
///! and diagonal entries of `D` in place, without refactoring from scratch:
///!
///!     Lnew Dnew Lnewᵀ = Lold Dold Loldᵀ ± C Cᵀ
///!
///! or, for the combined variant,
///!
///!     Lnew Dnew Lnewᵀ = Lold Dold Loldᵀ + C Cᵀ − D Dᵀ
///!
///! This crate is deliberately narrow: it consumes a *path plan* produced by
///! an external symbolic analysis stage (the set of elimination-tree paths
///! touched by the update, and how they are split into subpaths of known
///! rank) and rewrites `L`'s numerical arrays in place. It does not perform
///! symbolic analysis, does not own `L`'s sparse representation, and does not
///! decide the `dbound` clamp value; all of that is the caller's
///! responsibility.
///!
///! The algorithm realized here is Method C1 of Davis & Hager, the same
///! alpha/gamma recurrence that underlies the `LDL` and `CHOLMOD` update/
///! downdate routines. See [`recurrence`] for the per-column recurrence and
///! [`kernel`] for the mini-supernode-fused column sweep built on top of it.

// This crate is adapted from the LDL library by Tim Davis, by way of the
// Method C1 alpha/gamma update/downdate recurrence it describes:
//
// LDL Copyright (c) 2005 by Timothy A. Davis.  All Rights Reserved.
//
// LDL License:
//
//     Your use or distribution of LDL or any modified version of
//     LDL implies that you agree to this License.
//
//     This library is free software; you can redistribute it and/or
//     modify it under the terms of the GNU Lesser General Public
//     License as published by the Free Software Foundation; either
//     version 2.1 of the License, or (at your option) any later version.
//
//     This library is distributed in the hope that it will be useful,
//     but WITHOUT ANY WARRANTY; without even the implied warranty of
//     MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
//     Lesser General Public License for more details.
//
//     You should have received a copy of the GNU Lesser General Public
//     License along with this library; if not, write to the Free Software
//     Foundation, Inc., 51 Franklin St, Fifth Floor, Boston, MA  02110-1301
//     USA
//
//     Permission is hereby granted to use or copy this program under the
//     terms of the GNU LGPL, provided that the Copyright, this License,
//     and the Availability of the original version is retained on all copies.
//     User documentation of any code that uses this code or any modified
//     version of this code must cite the Copyright, this License, the
//     Availability note, and "Used by permission." Permission to modify
//     the code and to distribute modified code is granted, provided the
//     Copyright, this License, and the Availability note are retained,
//     and a notice that the code was modified is included.

mod error;
mod factor;
mod kernel;
mod options;
mod path;
mod recurrence;
mod scatter;
mod update;
mod workspace;

pub use error::UpdownError;
pub use factor::FactorMut;
pub use options::UpdownOptions;
pub use path::{path_width_for_rank, PathDescriptor};
pub use scatter::UpdateSource;
pub use update::{numeric_updown, numeric_updown_combined, Sign, UpdownStatus};
pub use workspace::Workspace;
