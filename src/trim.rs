//! Content-aware removal of white/light borders from a source image.

use image::RgbaImage;

/// Tuning knobs for [`auto_trim`].
#[derive(Clone, Copy, Debug)]
pub struct TrimOptions {
    /// Channel brightness at or above which a pixel counts as background.
    pub threshold: u8,
    /// Minimum fraction of each original dimension the content box must keep;
    /// a smaller box is treated as a detection failure and the input is
    /// returned unchanged.
    pub min_content_ratio: f64,
}

impl Default for TrimOptions {
    fn default() -> Self {
        Self {
            threshold: 240,
            min_content_ratio: 0.1,
        }
    }
}

/// Result of a trim attempt; `trimmed` is false for every no-op path.
#[derive(Debug)]
pub struct TrimOutcome {
    pub image: RgbaImage,
    pub trimmed: bool,
}

/// Crop `image` to the bounding box of non-background content.
///
/// The background test flattens each pixel onto white through its alpha; the
/// crop itself applies to the original pixels so transparency survives. A
/// fully blank image, a box below the safety floor, or a box covering the
/// whole image all return the input unchanged.
pub fn auto_trim(image: RgbaImage, opts: TrimOptions) -> TrimOutcome {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return TrimOutcome {
            image,
            trimmed: false,
        };
    }

    let w = width as usize;
    let h = height as usize;
    let stride = w * 4;
    let data = image.as_raw();
    let threshold = u16::from(opts.threshold);

    let is_background = |px: &[u8]| -> bool {
        let a = u16::from(px[3]);
        let inv = 255 - a;
        let flat = |c: u8| (u16::from(c) * a + 255 * inv + 127) / 255;
        flat(px[0]) >= threshold && flat(px[1]) >= threshold && flat(px[2]) >= threshold
    };
    // Row scans walk contiguous memory; this is the hot loop for large inputs.
    let row_has_content = |y: usize| {
        data[y * stride..(y + 1) * stride]
            .chunks_exact(4)
            .any(|px| !is_background(px))
    };

    let Some(top) = (0..h).find(|&y| row_has_content(y)) else {
        // All background: leave the input alone rather than crop to nothing.
        return TrimOutcome {
            image,
            trimmed: false,
        };
    };
    let bottom = (top..h).rev().find(|&y| row_has_content(y)).unwrap_or(top) + 1;

    // Column scans only need the rows already known to hold content.
    let col_has_content = |x: usize| {
        (top..bottom).any(|y| {
            let i = y * stride + x * 4;
            !is_background(&data[i..i + 4])
        })
    };
    let left = (0..w).find(|&x| col_has_content(x)).unwrap_or(0);
    let right = (left..w).rev().find(|&x| col_has_content(x)).unwrap_or(left) + 1;

    let content_w = right - left;
    let content_h = bottom - top;
    let min_w = (width as f64 * opts.min_content_ratio) as usize;
    let min_h = (height as f64 * opts.min_content_ratio) as usize;
    if content_w < min_w || content_h < min_h {
        return TrimOutcome {
            image,
            trimmed: false,
        };
    }
    if left == 0 && top == 0 && right == w && bottom == h {
        return TrimOutcome {
            image,
            trimmed: false,
        };
    }

    let cropped = image::imageops::crop_imm(
        &image,
        left as u32,
        top as u32,
        content_w as u32,
        content_h as u32,
    )
    .to_image();
    TrimOutcome {
        image: cropped,
        trimmed: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
    const DARK: Rgba<u8> = Rgba([30, 30, 30, 255]);

    fn bordered(w: u32, h: u32, border: u32) -> RgbaImage {
        let mut img = RgbaImage::from_pixel(w, h, WHITE);
        for y in border..h - border {
            for x in border..w - border {
                img.put_pixel(x, y, DARK);
            }
        }
        img
    }

    #[test]
    fn trims_white_border_to_content_box() {
        let out = auto_trim(bordered(100, 80, 10), TrimOptions::default());
        assert!(out.trimmed);
        assert_eq!(out.image.dimensions(), (80, 60));
        assert_eq!(*out.image.get_pixel(0, 0), DARK);
    }

    #[test]
    fn trim_is_idempotent() {
        let once = auto_trim(bordered(100, 80, 10), TrimOptions::default());
        let twice = auto_trim(once.image.clone(), TrimOptions::default());
        assert!(!twice.trimmed);
        assert_eq!(once.image, twice.image);
    }

    #[test]
    fn blank_white_image_is_returned_unchanged() {
        let img = RgbaImage::from_pixel(64, 64, WHITE);
        let out = auto_trim(img.clone(), TrimOptions::default());
        assert!(!out.trimmed);
        assert_eq!(out.image, img);
    }

    #[test]
    fn tiny_content_box_trips_the_safety_floor() {
        let mut img = RgbaImage::from_pixel(100, 100, WHITE);
        img.put_pixel(50, 50, DARK);
        let out = auto_trim(img.clone(), TrimOptions::default());
        assert!(!out.trimmed);
        assert_eq!(out.image, img);
    }

    #[test]
    fn transparent_border_counts_as_background() {
        let mut img = RgbaImage::from_pixel(60, 60, Rgba([0, 0, 0, 0]));
        for y in 20..40 {
            for x in 20..40 {
                img.put_pixel(x, y, DARK);
            }
        }
        let out = auto_trim(img, TrimOptions::default());
        assert!(out.trimmed);
        assert_eq!(out.image.dimensions(), (20, 20));
        // the crop keeps original pixels, alpha included
        assert_eq!(out.image.get_pixel(0, 0).0[3], 255);
    }

    #[test]
    fn threshold_controls_what_counts_as_content() {
        let mut img = RgbaImage::from_pixel(60, 60, WHITE);
        for y in 10..50 {
            for x in 10..50 {
                img.put_pixel(x, y, Rgba([245, 245, 245, 255]));
            }
        }
        // 245 >= 240: everything reads as background
        let strict = auto_trim(
            img.clone(),
            TrimOptions {
                threshold: 240,
                ..TrimOptions::default()
            },
        );
        assert!(!strict.trimmed);
        // raising the threshold makes the near-white block content
        let loose = auto_trim(
            img,
            TrimOptions {
                threshold: 250,
                ..TrimOptions::default()
            },
        );
        assert!(loose.trimmed);
        assert_eq!(loose.image.dimensions(), (40, 40));
    }
}
