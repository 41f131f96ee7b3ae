//! Renders a transparent-background device silhouette from a profile.

use image::RgbaImage;
use kurbo::{Ellipse, Rect, RoundedRect};

use crate::catalog::{DeviceFamily, DeviceProfile, NotchKind};
use crate::error::FrameryResult;
use crate::raster;

/// The sub-region of a frame template where screenshot content is placed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScreenRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// A rendered device frame plus its screen placement rectangle.
///
/// Built once per device selection; per-image composites clone the raster
/// instead of mutating it, so one template serves a whole run.
#[derive(Clone, Debug)]
pub struct FrameTemplate {
    pub image: RgbaImage,
    pub screen: ScreenRect,
}

const PHONE_BODY: raster::Rgba = [0, 0, 0, 255];
const SHELL_BODY: raster::Rgba = [30, 30, 30, 255];
const SCREEN_FILL: raster::Rgba = [255, 255, 255, 255];
const DECK_FILL: raster::Rgba = [20, 20, 20, 255];
const TRACKPAD_FILL: raster::Rgba = [40, 40, 40, 255];
const STAND_FILL: raster::Rgba = [200, 200, 200, 255];

// Intrinsic notch/decoration sizes shared by every profile of a family;
// placement is always derived from the profile geometry.
const ISLAND_WIDTH: f64 = 120.0;
const ISLAND_HEIGHT: f64 = 35.0;
const ISLAND_RADIUS: f64 = 17.0;
const ISLAND_TOP_INSET: f64 = 15.0;
const NOTCH_WIDTH: f64 = 200.0;
const NOTCH_HEIGHT: f64 = 30.0;
const NOTCH_RADIUS: f64 = 10.0;
const DECK_GAP: f64 = 10.0;
const DECK_BOTTOM_MARGIN: f64 = 20.0;
const DECK_RADIUS: f64 = 8.0;
const TRACKPAD_WIDTH: f64 = 300.0;
const TRACKPAD_HEIGHT: f64 = 40.0;
const TRACKPAD_RADIUS: f64 = 6.0;
const STAND_POLE_HALF_WIDTH: f64 = 15.0;
const STAND_HEIGHT: f64 = 60.0;
const STAND_BASE_WIDTH: f64 = 200.0;
const STAND_BASE_HEIGHT: f64 = 60.0;

/// Build the frame template for a profile. Deterministic in the profile.
pub fn build(profile: &DeviceProfile) -> FrameryResult<FrameTemplate> {
    let frame_w = profile.frame_width();
    let frame_h = profile.frame_height();
    let fw = f64::from(frame_w);
    let fh = f64::from(frame_h);

    let screen = ScreenRect {
        x: profile.padding.left,
        y: profile.padding.top,
        width: profile.screen_width,
        height: profile.screen_height,
    };
    let sx = f64::from(screen.x);
    let sy = f64::from(screen.y);
    let sw = f64::from(screen.width);
    let sh = f64::from(screen.height);

    let mut ctx = raster::new_canvas(frame_w, frame_h)?;

    let body_color = match profile.family {
        DeviceFamily::Phone => PHONE_BODY,
        DeviceFamily::Laptop | DeviceFamily::Desktop => SHELL_BODY,
    };
    raster::fill_shape(
        &mut ctx,
        &RoundedRect::new(0.0, 0.0, fw, fh, profile.corner_radius),
        body_color,
    );

    // Screen cutout; the composited screenshot lands on top of this.
    raster::fill_shape(
        &mut ctx,
        &RoundedRect::new(
            sx,
            sy,
            sx + sw,
            sy + sh,
            (profile.corner_radius - 2.0).max(0.0),
        ),
        SCREEN_FILL,
    );

    match profile.notch {
        NotchKind::None => {}
        NotchKind::DynamicIsland => {
            let ix = ((fw - ISLAND_WIDTH) / 2.0).floor();
            let iy = sy + ISLAND_TOP_INSET;
            raster::fill_shape(
                &mut ctx,
                &RoundedRect::new(ix, iy, ix + ISLAND_WIDTH, iy + ISLAND_HEIGHT, ISLAND_RADIUS),
                PHONE_BODY,
            );
        }
        NotchKind::MacbookNotch => {
            let nx = ((fw - NOTCH_WIDTH) / 2.0).floor();
            raster::fill_shape(
                &mut ctx,
                &RoundedRect::new(nx, sy, nx + NOTCH_WIDTH, sy + NOTCH_HEIGHT, NOTCH_RADIUS),
                SHELL_BODY,
            );
        }
    }

    match profile.family {
        DeviceFamily::Phone => {}
        DeviceFamily::Laptop => {
            let deck_h = f64::from(profile.padding.bottom) - DECK_BOTTOM_MARGIN;
            if deck_h > 0.0 {
                let deck_y = sy + sh + DECK_GAP;
                raster::fill_shape(
                    &mut ctx,
                    &RoundedRect::new(
                        f64::from(profile.padding.left),
                        deck_y,
                        fw - f64::from(profile.padding.right),
                        deck_y + deck_h,
                        DECK_RADIUS,
                    ),
                    DECK_FILL,
                );
                let tx = ((fw - TRACKPAD_WIDTH) / 2.0).floor();
                let ty = deck_y + ((deck_h - TRACKPAD_HEIGHT) / 2.0).floor();
                raster::fill_shape(
                    &mut ctx,
                    &RoundedRect::new(
                        tx,
                        ty,
                        tx + TRACKPAD_WIDTH,
                        ty + TRACKPAD_HEIGHT,
                        TRACKPAD_RADIUS,
                    ),
                    TRACKPAD_FILL,
                );
            }
        }
        DeviceFamily::Desktop => {
            let stand_y = fh - STAND_HEIGHT;
            raster::fill_shape(
                &mut ctx,
                &Rect::new(
                    fw / 2.0 - STAND_POLE_HALF_WIDTH,
                    stand_y,
                    fw / 2.0 + STAND_POLE_HALF_WIDTH,
                    fh,
                ),
                STAND_FILL,
            );
            // Base ellipse is centered on the bottom edge and clipped there.
            raster::fill_shape(
                &mut ctx,
                &Ellipse::new(
                    (fw / 2.0, fh),
                    (STAND_BASE_WIDTH / 2.0, STAND_BASE_HEIGHT / 2.0),
                    0.0,
                ),
                STAND_FILL,
            );
        }
    }

    let image = raster::render_to_rgba(&mut ctx, frame_w, frame_h)?;
    Ok(FrameTemplate { image, screen })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{self, DeviceKey};

    #[test]
    fn template_matches_profile_dimensions() {
        for key in DeviceKey::ALL {
            let profile = catalog::profile(key);
            let template = build(profile).unwrap();
            assert_eq!(template.image.width(), profile.frame_width());
            assert_eq!(template.image.height(), profile.frame_height());
            let s = template.screen;
            assert!(s.x + s.width <= template.image.width());
            assert!(s.y + s.height <= template.image.height());
        }
    }

    #[test]
    fn build_is_deterministic() {
        let profile = catalog::profile(DeviceKey::Iphone14);
        let a = build(profile).unwrap();
        let b = build(profile).unwrap();
        assert_eq!(a.image.as_raw(), b.image.as_raw());
    }

    #[test]
    fn phone_frame_has_transparent_corners_and_white_screen() {
        let template = build(catalog::profile(DeviceKey::Iphone14)).unwrap();
        assert_eq!(template.image.get_pixel(0, 0).0[3], 0);
        let cx = template.screen.x + template.screen.width / 2;
        let cy = template.screen.y + template.screen.height / 2;
        assert_eq!(template.image.get_pixel(cx, cy).0, [255, 255, 255, 255]);
    }

    #[test]
    fn dynamic_island_is_drawn_near_the_screen_top() {
        let template = build(catalog::profile(DeviceKey::Iphone14)).unwrap();
        let cx = template.image.width() / 2;
        let iy = template.screen.y + 15 + 17;
        let px = template.image.get_pixel(cx, iy).0;
        assert_eq!(px, [0, 0, 0, 255]);
    }

    #[test]
    fn laptop_frame_draws_a_keyboard_deck() {
        let profile = catalog::profile(DeviceKey::Macbook14);
        let template = build(profile).unwrap();
        let deck_y = profile.padding.top + profile.screen_height + 10 + 20;
        let px = template.image.get_pixel(profile.padding.left + 40, deck_y).0;
        assert_eq!(px, [20, 20, 20, 255]);
    }

    #[test]
    fn desktop_frame_draws_a_stand_pole() {
        let profile = catalog::profile(DeviceKey::Imac24);
        let template = build(profile).unwrap();
        let cx = template.image.width() / 2;
        let py = template.image.height() - 5;
        assert_eq!(template.image.get_pixel(cx, py).0, [200, 200, 200, 255]);
    }
}
