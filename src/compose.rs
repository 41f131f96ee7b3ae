//! Pastes a fitted screenshot into a frame template.

use image::{RgbaImage, imageops};

use crate::catalog::DeviceProfile;
use crate::error::FrameryResult;
use crate::fit;
use crate::frame::FrameTemplate;
use crate::overlay;

/// Composite `screenshot` into `template` per the profile's fit mode.
///
/// The source's alpha masks the paste, so transparent screenshot pixels leave
/// the template's screen fill visible rather than punching dark holes. The
/// template itself is not mutated; each call starts from a fresh clone.
pub fn composite(
    template: &FrameTemplate,
    screenshot: &RgbaImage,
    profile: &DeviceProfile,
) -> FrameryResult<RgbaImage> {
    let screen = template.screen;
    let fitted = fit::fit_to_rect(screenshot, screen.width, screen.height, profile.fit_mode);

    // Center the fitted image in the screen rectangle; with Cover this is a
    // no-op because the fitted image is exactly screen-sized.
    let paste_x = i64::from(screen.x) + i64::from(screen.width - fitted.width()) / 2;
    let paste_y = i64::from(screen.y) + i64::from(screen.height - fitted.height()) / 2;

    let mut out = template.image.clone();
    imageops::overlay(&mut out, &fitted, paste_x, paste_y);

    if let Some(spec) = &profile.overlay {
        overlay::render(&mut out, screen, spec)?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{self, DeviceKey};
    use crate::frame;
    use image::Rgba;

    #[test]
    fn output_matches_template_dimensions() {
        for key in [DeviceKey::Iphone14, DeviceKey::Macbook14] {
            let profile = catalog::profile(key);
            let template = frame::build(profile).unwrap();
            let shot = RgbaImage::from_pixel(800, 600, Rgba([90, 90, 90, 255]));
            let out = composite(&template, &shot, profile).unwrap();
            assert_eq!(out.dimensions(), template.image.dimensions());
        }
    }

    #[test]
    fn transparent_source_pixels_keep_the_screen_fill() {
        let profile = catalog::profile(DeviceKey::Iphone14);
        let template = frame::build(profile).unwrap();
        // fully transparent source the exact screen size, so no scaling occurs
        let shot = RgbaImage::from_pixel(
            template.screen.width,
            template.screen.height,
            Rgba([0, 0, 0, 0]),
        );
        let out = composite(&template, &shot, profile).unwrap();
        let cx = template.screen.x + template.screen.width / 2;
        let cy = template.screen.y + template.screen.height / 2;
        assert_eq!(out.get_pixel(cx, cy).0, [255, 255, 255, 255]);
    }

    #[test]
    fn contain_letterbox_shows_the_template_underneath() {
        let profile = catalog::profile(DeviceKey::Iphone14);
        let template = frame::build(profile).unwrap();
        // very wide source: contain leaves bands above and below
        let shot = RgbaImage::from_pixel(2000, 200, Rgba([10, 200, 10, 255]));
        let out = composite(&template, &shot, profile).unwrap();
        let cx = template.screen.x + template.screen.width / 2;
        let band_y = template.screen.y + 200;
        assert_eq!(out.get_pixel(cx, band_y).0, [255, 255, 255, 255]);
        let mid_y = template.screen.y + template.screen.height / 2;
        assert_eq!(out.get_pixel(cx, mid_y).0, [10, 200, 10, 255]);
    }

    #[test]
    fn story_profile_applies_its_overlay() {
        let profile = catalog::profile(DeviceKey::InstagramStory);
        let template = frame::build(profile).unwrap();
        let shot = RgbaImage::from_pixel(1290, 2796, Rgba([128, 128, 128, 255]));
        let out = composite(&template, &shot, profile).unwrap();
        let x = template.screen.x + template.screen.width / 2;
        let y = template.screen.y + 5;
        // top band darkens the pasted gray
        assert!(out.get_pixel(x, y).0[0] < 128);
    }
}
