//! Post-composite UI chrome drawn over the screen area.
//!
//! The overlay is rendered onto its own transparent layer at full frame size
//! and alpha-composited onto the mockup, so translucent bands blend with
//! whatever the screenshot put underneath. All geometry is derived from the
//! screen rectangle as fractions, never absolute pixels, so the same settings
//! scale across profiles.

use image::{RgbaImage, imageops};
use kurbo::{BezPath, Circle, Line, RoundedRect};

use crate::error::FrameryResult;
use crate::frame::ScreenRect;
use crate::raster;
use crate::text::{self, FontPainter};

/// Which overlay a profile requests.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OverlaySpec {
    Story(StorySettings),
}

/// Text and progress content for the story overlay. All fields have defaults
/// so a settings file only needs the keys it overrides.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StorySettings {
    pub brand_text: String,
    pub subtitle_text: String,
    pub cta_text: String,
    pub cta_subtext: String,
    /// Fill fraction of the progress bar; clamped to `0.0..=1.0` at render.
    pub progress_fraction: f64,
}

impl Default for StorySettings {
    fn default() -> Self {
        Self {
            brand_text: "Your Brand • Sponsored".to_string(),
            subtitle_text: String::new(),
            cta_text: "Learn more".to_string(),
            cta_subtext: String::new(),
            progress_fraction: 0.5,
        }
    }
}

const TOP_BAND_COLOR: raster::Rgba = [0, 0, 0, 150];
const BOTTOM_BAND_COLOR: raster::Rgba = [0, 0, 0, 170];
const TRACK_COLOR: raster::Rgba = [100, 100, 100, 180];
const TRACK_FILL_COLOR: raster::Rgba = [255, 255, 255, 220];
const BRAND_COLOR: raster::Rgba = [255, 255, 255, 255];
const SUBTITLE_COLOR: raster::Rgba = [230, 230, 230, 255];
const DOT_COLOR: raster::Rgba = [255, 255, 255, 255];
const PILL_COLOR: raster::Rgba = [255, 255, 255, 230];
const PILL_TEXT_COLOR: raster::Rgba = [0, 0, 0, 255];
const SUBTEXT_COLOR: raster::Rgba = [220, 220, 220, 255];
const ICON_COLOR: raster::Rgba = [255, 255, 255, 220];

/// Draw `spec` over `image`, confined to geometry derived from `screen`.
pub fn render(image: &mut RgbaImage, screen: ScreenRect, spec: &OverlaySpec) -> FrameryResult<()> {
    match spec {
        OverlaySpec::Story(settings) => render_story(image, screen, settings),
    }
}

fn render_story(
    image: &mut RgbaImage,
    screen: ScreenRect,
    settings: &StorySettings,
) -> FrameryResult<()> {
    let (img_w, img_h) = image.dimensions();
    let mut ctx = raster::new_canvas(img_w, img_h)?;
    let mut painter = FontPainter::new();

    let sx = f64::from(screen.x);
    let sy = f64::from(screen.y);
    let sw = f64::from(screen.width);
    let sh = f64::from(screen.height);
    let side_padding = sw * 0.05;

    // Top band with the progress bar, brand line and subtitle.
    let top_h = sh * 0.17;
    raster::fill_rect(&mut ctx, sx, sy, sx + sw, sy + top_h, TOP_BAND_COLOR);

    let bar_margin = sw * 0.05;
    let bar_h = (sh * 0.005).max(4.0);
    let bar_y = sy + top_h * 0.22;
    let track_x0 = sx + bar_margin;
    let track_x1 = sx + sw - bar_margin;
    raster::fill_shape(
        &mut ctx,
        &RoundedRect::new(track_x0, bar_y, track_x1, bar_y + bar_h, bar_h / 2.0),
        TRACK_COLOR,
    );
    let progress = settings.progress_fraction.clamp(0.0, 1.0);
    let fill_w = (track_x1 - track_x0) * progress;
    if fill_w > 0.0 {
        raster::fill_shape(
            &mut ctx,
            &RoundedRect::new(track_x0, bar_y, track_x0 + fill_w, bar_y + bar_h, bar_h / 2.0),
            TRACK_FILL_COLOR,
        );
    }

    let brand_size = (sw * 0.05) as f32;
    let mut text_y = bar_y + bar_h + top_h * 0.15;
    painter.draw(
        &mut ctx,
        &settings.brand_text,
        sx + side_padding,
        text_y,
        brand_size,
        true,
        BRAND_COLOR,
    );

    // Story menu dots in the top-right corner, level with the brand line.
    let dot_r = (sw * 0.008).max(4.0);
    let dots_cy = text_y + top_h * 0.3;
    let dots_x = sx + sw - side_padding - dot_r * 3.0;
    for i in 0..3 {
        raster::fill_shape(
            &mut ctx,
            &Circle::new((dots_x + f64::from(i) * dot_r, dots_cy), dot_r),
            DOT_COLOR,
        );
    }

    if !settings.subtitle_text.is_empty() {
        let subtitle_size = (sw * 0.035) as f32;
        let max_width = (sw - 2.0 * side_padding) as f32;
        for line in text::wrap_text(
            &mut painter,
            &settings.subtitle_text,
            subtitle_size,
            false,
            max_width,
        ) {
            let (_, line_h) = painter.measure(&line, subtitle_size, false);
            text_y += f64::from(line_h) + sh * 0.005;
            painter.draw(
                &mut ctx,
                &line,
                sx + side_padding,
                text_y,
                subtitle_size,
                false,
                SUBTITLE_COLOR,
            );
        }
    }

    // Bottom band with the call-to-action pill and engagement icons.
    let bottom_h = sh * 0.20;
    let band_top = sy + sh - bottom_h;
    raster::fill_rect(&mut ctx, sx, band_top, sx + sw, sy + sh, BOTTOM_BAND_COLOR);

    let cta_w = sw * 0.45;
    let cta_h = bottom_h * 0.35;
    let cta_x = sx + side_padding;
    let cta_y = band_top + bottom_h * 0.18;
    raster::fill_shape(
        &mut ctx,
        &RoundedRect::new(cta_x, cta_y, cta_x + cta_w, cta_y + cta_h, cta_h / 2.0),
        PILL_COLOR,
    );
    let cta_size = (sw * 0.045) as f32;
    let (label_w, label_h) = painter.measure(&settings.cta_text, cta_size, true);
    painter.draw(
        &mut ctx,
        &settings.cta_text,
        cta_x + (cta_w - f64::from(label_w)) / 2.0,
        cta_y + (cta_h - f64::from(label_h)) / 2.0,
        cta_size,
        true,
        PILL_TEXT_COLOR,
    );

    if !settings.cta_subtext.is_empty() {
        painter.draw(
            &mut ctx,
            &settings.cta_subtext,
            cta_x,
            cta_y + cta_h + bottom_h * 0.12,
            (sw * 0.035) as f32,
            false,
            SUBTEXT_COLOR,
        );
    }

    // Like ring and share arrow on the right edge of the band.
    let icon_r = bottom_h * 0.22;
    let icon_x = sx + sw - side_padding - icon_r;
    let icon_y_start = band_top + bottom_h * 0.25;
    raster::stroke_shape(
        &mut ctx,
        &Circle::new((icon_x, icon_y_start + icon_r), icon_r),
        3.0,
        ICON_COLOR,
    );

    let arrow_cy = icon_y_start - bottom_h * 0.35;
    let mut arrow = BezPath::new();
    arrow.move_to((icon_x, arrow_cy - icon_r));
    arrow.line_to((icon_x + icon_r, arrow_cy));
    arrow.line_to((icon_x, arrow_cy + icon_r));
    raster::stroke_shape(&mut ctx, &arrow, 4.0, ICON_COLOR);
    raster::stroke_shape(
        &mut ctx,
        &Line::new((icon_x, arrow_cy), (icon_x, arrow_cy + icon_r)),
        4.0,
        ICON_COLOR,
    );

    let layer = raster::render_to_rgba(&mut ctx, img_w, img_h)?;
    imageops::overlay(image, &layer, 0, 0);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn gray_base(w: u32, h: u32) -> RgbaImage {
        RgbaImage::from_pixel(w, h, Rgba([128, 128, 128, 255]))
    }

    fn screen(w: u32, h: u32) -> ScreenRect {
        ScreenRect {
            x: 10,
            y: 10,
            width: w - 20,
            height: h - 20,
        }
    }

    fn rendered(progress: f64) -> RgbaImage {
        let mut img = gray_base(400, 800);
        let spec = OverlaySpec::Story(StorySettings {
            progress_fraction: progress,
            ..StorySettings::default()
        });
        render(&mut img, screen(400, 800), &spec).unwrap();
        img
    }

    #[test]
    fn top_band_darkens_the_screen_area() {
        let base = gray_base(400, 800);
        let out = rendered(0.5);
        let s = screen(400, 800);
        let x = s.x + s.width / 2;
        let y = s.y + 5;
        assert!(out.get_pixel(x, y).0[0] < base.get_pixel(x, y).0[0]);
    }

    #[test]
    fn progress_fraction_is_clamped() {
        assert_eq!(rendered(-0.5).as_raw(), rendered(0.0).as_raw());
        assert_eq!(rendered(1.5).as_raw(), rendered(1.0).as_raw());
        assert_ne!(rendered(0.0).as_raw(), rendered(1.0).as_raw());
    }

    #[test]
    fn cta_pill_renders_near_white() {
        let out = rendered(0.5);
        let s = screen(400, 800);
        let sh = f64::from(s.height);
        let bottom_h = sh * 0.20;
        let band_top = f64::from(s.y) + sh - bottom_h;
        let cta_x = f64::from(s.x) + f64::from(s.width) * 0.05;
        let cta_w = f64::from(s.width) * 0.45;
        // top-center of the pill, above the vertically centered label
        let px = out.get_pixel((cta_x + cta_w / 2.0) as u32, (band_top + bottom_h * 0.18) as u32 + 5);
        assert!(px.0[0] > 200 && px.0[1] > 200 && px.0[2] > 200);
    }

    #[test]
    fn settings_deserialize_with_defaults() {
        let s: StorySettings = serde_json::from_str(r#"{"brand_text": "Acme"}"#).unwrap();
        assert_eq!(s.brand_text, "Acme");
        assert_eq!(s.cta_text, "Learn more");
        assert!((s.progress_fraction - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn overlay_leaves_pixels_outside_the_screen_untouched() {
        let mut img = gray_base(400, 800);
        let spec = OverlaySpec::Story(StorySettings::default());
        render(&mut img, screen(400, 800), &spec).unwrap();
        assert_eq!(img.get_pixel(2, 2).0, [128, 128, 128, 255]);
    }
}
