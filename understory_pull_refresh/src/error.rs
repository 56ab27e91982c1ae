// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Setup errors.

use core::fmt;

/// A programmer error in how the controller was wired up.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SetupError {
    /// A content surface was attached while one is already attached.
    ContentAlreadyAttached,
    /// The operation needs a content surface and none is attached.
    NoContent,
    /// The operation needs a header strategy and none is bound.
    HeaderNotBound,
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ContentAlreadyAttached => {
                f.write_str("the container can host only one content surface")
            }
            Self::NoContent => f.write_str("no content surface is attached"),
            Self::HeaderNotBound => f.write_str("no header strategy is bound"),
        }
    }
}

impl core::error::Error for SetupError {}
