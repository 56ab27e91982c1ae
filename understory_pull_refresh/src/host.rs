// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! What the controller needs to know about the hosting toolkit.

/// Vertical scroll direction of the content.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ScrollDirection {
    /// Toward the start of the content (revealing earlier items).
    Up,
    /// Toward the end of the content (revealing later items).
    Down,
}

/// Scroll-capability queries answered by the host on every unclaimed move.
///
/// Typically backed by the content widget's own scroll state: a list scrolled
/// to its first item answers `false` for [`ScrollDirection::Up`].
pub trait PullHost {
    /// Returns `true` if the content can still scroll in `direction`.
    fn can_content_scroll(&self, direction: ScrollDirection) -> bool;
}

/// A host whose content never scrolls, such as a static page.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct StaticContent;

impl PullHost for StaticContent {
    fn can_content_scroll(&self, _direction: ScrollDirection) -> bool {
        false
    }
}
