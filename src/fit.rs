//! Aspect-preserving scaling of a source image into a target rectangle.

use image::{RgbaImage, imageops};

/// How a screenshot is scaled into the screen rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitMode {
    /// Entire image visible; result may under-fill the target on one axis.
    Contain,
    /// Image fills the target; overflow on one axis is center-cropped away.
    Cover,
}

/// Scale `image` into `target_w x target_h` under `mode`.
///
/// Contain output never exceeds the target on either axis. Cover output is
/// exactly the target size: scaled dimensions are clamped up by the rounding
/// pixel before the centered crop, so the crop window never exceeds bounds.
pub fn fit_to_rect(image: &RgbaImage, target_w: u32, target_h: u32, mode: FitMode) -> RgbaImage {
    let (img_w, img_h) = image.dimensions();
    if img_w == 0 || img_h == 0 || target_w == 0 || target_h == 0 {
        return image.clone();
    }

    let min_recommended = f64::from(target_w.max(target_h)) * 0.5;
    if f64::from(img_w) < min_recommended && f64::from(img_h) < min_recommended {
        tracing::warn!(
            width = img_w,
            height = img_h,
            recommended_px = min_recommended as u32,
            "low resolution source; output will be upscaled"
        );
    }

    let width_ratio = f64::from(target_w) / f64::from(img_w);
    let height_ratio = f64::from(target_h) / f64::from(img_h);
    let scale = match mode {
        FitMode::Contain => width_ratio.min(height_ratio),
        FitMode::Cover => width_ratio.max(height_ratio),
    };

    let scaled_w = (f64::from(img_w) * scale).round() as u32;
    let scaled_h = (f64::from(img_h) * scale).round() as u32;
    let (new_w, new_h) = match mode {
        FitMode::Contain => (scaled_w.clamp(1, target_w), scaled_h.clamp(1, target_h)),
        FitMode::Cover => (scaled_w.max(target_w), scaled_h.max(target_h)),
    };

    let resized = imageops::resize(image, new_w, new_h, imageops::FilterType::Lanczos3);

    match mode {
        FitMode::Contain => resized,
        FitMode::Cover => {
            if (new_w, new_h) == (target_w, target_h) {
                return resized;
            }
            let crop_x = (new_w - target_w) / 2;
            let crop_y = (new_h - target_h) / 2;
            imageops::crop_imm(&resized, crop_x, crop_y, target_w, target_h).to_image()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(w: u32, h: u32) -> RgbaImage {
        RgbaImage::from_pixel(w, h, image::Rgba([120, 40, 200, 255]))
    }

    #[test]
    fn contain_fits_within_target_and_fills_constraining_axis() {
        let out = fit_to_rect(&solid(1000, 2000), 1290, 2796, FitMode::Contain);
        assert!(out.width() <= 1290 && out.height() <= 2796);
        // width is the constraining axis here: 1290/1000 < 2796/2000
        assert_eq!(out.width(), 1290);
        assert_eq!(out.height(), 2580);
    }

    #[test]
    fn contain_preserves_aspect_ratio_within_rounding() {
        let out = fit_to_rect(&solid(640, 480), 300, 300, FitMode::Contain);
        let src_aspect = 640.0 / 480.0;
        let out_aspect = f64::from(out.width()) / f64::from(out.height());
        assert!((src_aspect - out_aspect).abs() < 0.02);
    }

    #[test]
    fn cover_output_is_exactly_target_sized() {
        for (w, h) in [(1000, 2000), (3000, 1000), (1289, 2797), (50, 33)] {
            let out = fit_to_rect(&solid(w, h), 1290, 2796, FitMode::Cover);
            assert_eq!((out.width(), out.height()), (1290, 2796), "src {w}x{h}");
        }
    }

    #[test]
    fn low_resolution_source_still_produces_output() {
        let out = fit_to_rect(&solid(10, 10), 1290, 2796, FitMode::Contain);
        assert_eq!(out.width(), out.height());
        assert!(out.width() <= 1290);
    }
}
