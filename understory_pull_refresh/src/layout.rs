// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placement of the content, header, and footer surfaces.
//!
//! Rectangles are in container coordinates, with the container's top-left at
//! the origin and before the container's own scroll offset is applied.
//!
//! | Mode      | Header                 | Footer              | Content            | Scroll |
//! |-----------|------------------------|---------------------|--------------------|--------|
//! | `Overlap` | `0 .. header`          | `h - footer .. h`   | shifted by offset  | 0      |
//! | `Follow`  | `-header .. 0`         | `h .. h + footer`   | at rest            | offset |
//!
//! ```
//! use kurbo::{Rect, Size};
//! use understory_pull_refresh::{DrawMode, MeasuredSurfaces, SurfaceLayout};
//!
//! let measured = MeasuredSurfaces::new(Size::new(320.0, 480.0), 60.0, 40.0);
//! let layout = SurfaceLayout::compute(
//!     DrawMode::Follow,
//!     Size::new(320.0, 480.0),
//!     &measured,
//!     true,
//!     true,
//!     -30.0,
//! );
//! assert_eq!(layout.header, Some(Rect::new(0.0, -60.0, 320.0, 0.0)));
//! assert_eq!(layout.footer, Some(Rect::new(0.0, 480.0, 320.0, 520.0)));
//! assert_eq!(layout.scroll_offset, -30.0);
//! ```

use kurbo::{Rect, Size};

use crate::displacement::DrawMode;

/// Sizes the host measured for the three surfaces.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct MeasuredSurfaces {
    /// Measured size of the content surface.
    pub content: Size,
    /// Measured height of the header surface.
    pub header: f64,
    /// Measured height of the footer surface.
    pub footer: f64,
}

impl MeasuredSurfaces {
    /// Bundles the measured sizes.
    #[must_use]
    pub const fn new(content: Size, header: f64, footer: f64) -> Self {
        Self {
            content,
            header,
            footer,
        }
    }
}

/// Result of a layout pass.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SurfaceLayout {
    /// Content surface bounds.
    pub content: Rect,
    /// Header surface bounds, if a header is bound.
    pub header: Option<Rect>,
    /// Footer surface bounds, if a footer is bound.
    pub footer: Option<Rect>,
    /// Vertical scroll offset the container applies to its children.
    pub scroll_offset: f64,
}

impl SurfaceLayout {
    /// Places the surfaces for a surface `offset` in `mode`.
    #[must_use]
    pub fn compute(
        mode: DrawMode,
        container: Size,
        measured: &MeasuredSurfaces,
        has_header: bool,
        has_footer: bool,
        offset: f64,
    ) -> Self {
        let width = container.width;
        let height = container.height;
        let header_h = measured.header.max(0.0);
        let footer_h = measured.footer.max(0.0);

        let (header, footer, content_top, scroll_offset) = match mode {
            DrawMode::Overlap => (
                Rect::new(0.0, 0.0, width, header_h),
                Rect::new(0.0, height - footer_h, width, height),
                offset,
                0.0,
            ),
            DrawMode::Follow => (
                Rect::new(0.0, -header_h, width, 0.0),
                Rect::new(0.0, height, width, height + footer_h),
                0.0,
                offset,
            ),
        };

        Self {
            content: Rect::new(
                0.0,
                content_top,
                measured.content.width,
                content_top + measured.content.height,
            ),
            header: has_header.then_some(header),
            footer: has_footer.then_some(footer),
            scroll_offset,
        }
    }
}
