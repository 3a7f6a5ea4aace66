//! Page placement math.
//!
//! Pure functions, no pixels involved: given source image dimensions and a
//! page size, decide whether to rotate, how large the image ends up, and
//! where it sits on the page.

use crate::config::PageSize;

/// Where an image lands on a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Whether the source is rotated a quarter turn before scaling.
    pub rotated: bool,
    /// Scaled image width in pixels (= points).
    pub width: u32,
    /// Scaled image height in pixels (= points).
    pub height: u32,
    /// Left offset from the page's top-left corner.
    pub x: u32,
    /// Top offset from the page's top-left corner.
    pub y: u32,
    /// Page the placement was computed for.
    pub page: PageSize,
}

impl Placement {
    /// Compute placement for a `width x height` source image.
    ///
    /// Landscape sources (width > height) are rotated first, so the fit is
    /// computed on the swapped dimensions. Both dimensions must be non-zero.
    pub fn plan(width: u32, height: u32, page: PageSize) -> Self {
        debug_assert!(width > 0 && height > 0, "image dimensions must be non-zero");

        let rotated = needs_rotation(width, height);
        let (w, h) = if rotated {
            (height, width)
        } else {
            (width, height)
        };

        let (scaled_w, scaled_h) = fit_within(w, h, page);

        Self {
            rotated,
            width: scaled_w,
            height: scaled_h,
            x: (page.width - scaled_w) / 2,
            y: (page.height - scaled_h) / 2,
            page,
        }
    }

    /// White space left of the image.
    pub fn left_margin(&self) -> u32 {
        self.x
    }

    /// White space right of the image.
    pub fn right_margin(&self) -> u32 {
        self.page.width - self.x - self.width
    }

    /// White space above the image.
    pub fn top_margin(&self) -> u32 {
        self.y
    }

    /// White space below the image.
    pub fn bottom_margin(&self) -> u32 {
        self.page.height - self.y - self.height
    }
}

/// Landscape images get a quarter turn before fitting.
pub fn needs_rotation(width: u32, height: u32) -> bool {
    width > height
}

/// Aspect-preserving scale-to-fit.
///
/// The scale factor is the smaller of the two axis ratios, applied to both
/// axes. Results are rounded and clamped to `[1, page bound]` so a rounding
/// step can never push the image off the page.
pub fn fit_within(width: u32, height: u32, page: PageSize) -> (u32, u32) {
    let scale = f64::min(
        f64::from(page.width) / f64::from(width),
        f64::from(page.height) / f64::from(height),
    );

    let scaled = |dim: u32, bound: u32| -> u32 {
        let value = (f64::from(dim) * scale).round() as u32;
        value.clamp(1, bound)
    };

    (scaled(width, page.width), scaled(height, page.height))
}
