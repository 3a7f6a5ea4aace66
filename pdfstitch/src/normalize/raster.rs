//! Pixel operations: color flattening, rotation, resampling and compositing
//! onto the page canvas.

use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgb, RgbImage};

use crate::config::PageSize;
use crate::normalize::geometry::Placement;

/// Page background and fill for transparent pixels.
pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

/// Convert any decoded image to 8-bit RGB.
///
/// Alpha is composited over `background` rather than dropped, so transparent
/// regions come out as page background instead of whatever color the
/// encoder left under them.
pub fn flatten(image: DynamicImage, background: Rgb<u8>) -> RgbImage {
    if !image.color().has_alpha() {
        return image.into_rgb8();
    }

    let rgba = image.into_rgba8();
    let Rgb([bg_r, bg_g, bg_b]) = background;

    RgbImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        let [r, g, b, a] = rgba.get_pixel(x, y).0;
        let a = u16::from(a);
        let blend = |fg: u8, bg: u8| -> u8 {
            ((u16::from(fg) * a + u16::from(bg) * (255 - a) + 127) / 255) as u8
        };
        Rgb([blend(r, bg_r), blend(g, bg_g), blend(b, bg_b)])
    })
}

/// Lay an RGB image out on a page-sized canvas.
///
/// Rotates a quarter turn counter-clockwise when the placement asks for it,
/// resamples with Lanczos3 to the placement size, and pastes the result at
/// the placement offset on a canvas filled with `background`.
pub fn compose(image: &RgbImage, placement: &Placement, background: Rgb<u8>) -> RgbImage {
    let PageSize { width, height } = placement.page;

    let oriented;
    let source = if placement.rotated {
        oriented = imageops::rotate270(image);
        &oriented
    } else {
        image
    };

    let resized = if source.dimensions() == (placement.width, placement.height) {
        source.clone()
    } else {
        imageops::resize(
            source,
            placement.width,
            placement.height,
            FilterType::Lanczos3,
        )
    };

    let mut canvas = RgbImage::from_pixel(width, height, background);
    imageops::replace(
        &mut canvas,
        &resized,
        i64::from(placement.x),
        i64::from(placement.y),
    );
    canvas
}
