//! Text measurement and drawing for overlay chrome.
//!
//! Fonts resolve through a ranked list of known system font file names; when
//! nothing resolves, a builtin 5x7 bitmap face takes over. Resolution is
//! contractually infallible: overlay rendering never errors because of fonts.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{FrameryError, FrameryResult};
use crate::raster;

/// RGBA8 brush color carried through Parley layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct TextBrushRgba8 {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
    pub(crate) a: u8,
}

pub(crate) struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
}

impl TextLayoutEngine {
    pub(crate) fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
        }
    }

    /// Shape and lay out plain text using the provided font bytes.
    pub(crate) fn layout_plain(
        &mut self,
        text: &str,
        font_bytes: &[u8],
        size_px: f32,
        brush: TextBrushRgba8,
    ) -> FrameryResult<parley::Layout<TextBrushRgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(FrameryError::render("text size_px must be finite and > 0"));
        }

        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.to_vec()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            FrameryError::render("no font families registered from font bytes")
        })?;

        let family_name = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| FrameryError::render("registered font family has no name"))?
            .to_string();

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family_name)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}

// Ranked font file names tried in order; bold variants are prepended when a
// bold face is requested. The DejaVu/Liberation names cover Linux hosts.
const BOLD_FONT_FILES: &[&str] = &[
    "arialbd.ttf",
    "Arial Bold.ttf",
    "HelveticaNeue-Bold.ttf",
    "Helvetica Bold.ttf",
    "DejaVuSans-Bold.ttf",
    "LiberationSans-Bold.ttf",
];
const REGULAR_FONT_FILES: &[&str] = &[
    "arial.ttf",
    "Arial.ttf",
    "HelveticaNeue.ttf",
    "Helvetica.ttf",
    "DejaVuSans.ttf",
    "LiberationSans-Regular.ttf",
];

fn font_dirs() -> Vec<PathBuf> {
    let mut dirs: Vec<PathBuf> = [
        "/usr/share/fonts",
        "/usr/local/share/fonts",
        "/System/Library/Fonts",
        "/Library/Fonts",
        "C:\\Windows\\Fonts",
    ]
    .iter()
    .map(PathBuf::from)
    .collect();
    if let Some(home) = std::env::var_os("HOME") {
        let home = PathBuf::from(home);
        dirs.push(home.join(".fonts"));
        dirs.push(home.join(".local/share/fonts"));
    }
    dirs
}

fn find_in_dir(dir: &Path, name: &str, depth: usize) -> Option<PathBuf> {
    if depth > 4 {
        return None;
    }
    let entries = std::fs::read_dir(dir).ok()?;
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            if let Some(hit) = find_in_dir(&path, name, depth + 1) {
                return Some(hit);
            }
        } else if path
            .file_name()
            .is_some_and(|f| f.eq_ignore_ascii_case(name))
        {
            return Some(path);
        }
    }
    None
}

fn find_font_file(name: &str) -> Option<PathBuf> {
    font_dirs()
        .iter()
        .find_map(|dir| find_in_dir(dir, name, 0))
}

#[derive(Clone)]
pub(crate) enum ResolvedFont {
    System(Arc<Vec<u8>>),
    Builtin,
}

/// Caches font resolution per weight and draws text through either Parley
/// glyph runs or the builtin bitmap face.
pub(crate) struct FontPainter {
    engine: TextLayoutEngine,
    resolved: HashMap<bool, ResolvedFont>,
}

impl FontPainter {
    pub(crate) fn new() -> Self {
        Self {
            engine: TextLayoutEngine::new(),
            resolved: HashMap::new(),
        }
    }

    fn resolve(&mut self, bold: bool) -> ResolvedFont {
        if let Some(font) = self.resolved.get(&bold) {
            return font.clone();
        }
        let mut names: Vec<&str> = Vec::new();
        if bold {
            names.extend_from_slice(BOLD_FONT_FILES);
        }
        names.extend_from_slice(REGULAR_FONT_FILES);

        let font = names
            .iter()
            .find_map(|name| find_font_file(name))
            .and_then(|path| std::fs::read(&path).ok())
            .map(|bytes| ResolvedFont::System(Arc::new(bytes)))
            .unwrap_or(ResolvedFont::Builtin);
        if matches!(font, ResolvedFont::Builtin) {
            tracing::warn!("no system font resolved; using builtin bitmap face");
        }
        self.resolved.insert(bold, font.clone());
        font
    }

    /// Rendered (width, height) of `text` at `size` pixels.
    pub(crate) fn measure(&mut self, text: &str, size: f32, bold: bool) -> (f32, f32) {
        match self.resolve(bold) {
            ResolvedFont::System(bytes) => {
                match self
                    .engine
                    .layout_plain(text, &bytes, size, TextBrushRgba8::default())
                {
                    Ok(layout) => (layout.width(), layout.height()),
                    Err(_) => builtin_measure(text, size),
                }
            }
            ResolvedFont::Builtin => builtin_measure(text, size),
        }
    }

    /// Draw `text` with its top-left corner at `(x, y)`.
    pub(crate) fn draw(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        text: &str,
        x: f64,
        y: f64,
        size: f32,
        bold: bool,
        color: raster::Rgba,
    ) {
        match self.resolve(bold) {
            ResolvedFont::System(bytes) => {
                let brush = TextBrushRgba8 {
                    r: color[0],
                    g: color[1],
                    b: color[2],
                    a: color[3],
                };
                match self.engine.layout_plain(text, &bytes, size, brush) {
                    Ok(layout) => draw_layout(ctx, &layout, &bytes, x, y),
                    Err(_) => draw_builtin(ctx, text, x, y, size, color),
                }
            }
            ResolvedFont::Builtin => draw_builtin(ctx, text, x, y, size, color),
        }
    }
}

fn draw_layout(
    ctx: &mut vello_cpu::RenderContext,
    layout: &parley::Layout<TextBrushRgba8>,
    font_bytes: &Arc<Vec<u8>>,
    x: f64,
    y: f64,
) {
    let font = vello_cpu::peniko::FontData::new(
        vello_cpu::peniko::Blob::from(font_bytes.as_ref().clone()),
        0,
    );
    ctx.set_transform(vello_cpu::kurbo::Affine::translate((x, y)));
    for line in layout.lines() {
        for item in line.items() {
            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                continue;
            };
            let brush = run.style().brush;
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                brush.r, brush.g, brush.b, brush.a,
            ));
            let glyphs = run.glyphs().map(|g| vello_cpu::Glyph {
                id: g.id,
                x: g.x,
                y: g.y,
            });
            ctx.glyph_run(&font)
                .font_size(run.run().font_size())
                .fill_glyphs(glyphs);
        }
    }
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
}

// Builtin face geometry: 5x7 cells with a 1-cell gap, scaled so glyph height
// matches the requested pixel size.
const GLYPH_COLS: usize = 5;
const GLYPH_ROWS: u32 = 7;
const GLYPH_ADVANCE: f32 = 6.0;

fn builtin_scale(size: f32) -> f32 {
    (size / GLYPH_ROWS as f32).max(1.0)
}

pub(crate) fn builtin_measure(text: &str, size: f32) -> (f32, f32) {
    let scale = builtin_scale(size);
    let width = text.chars().count() as f32 * GLYPH_ADVANCE * scale;
    (width, size)
}

fn draw_builtin(
    ctx: &mut vello_cpu::RenderContext,
    text: &str,
    x: f64,
    y: f64,
    size: f32,
    color: raster::Rgba,
) {
    let scale = f64::from(builtin_scale(size));
    let mut pen_x = x;
    for ch in text.chars() {
        let columns = builtin_glyph(ch);
        for (col, bits) in columns.iter().enumerate() {
            for row in 0..GLYPH_ROWS {
                if bits & (1 << row) != 0 {
                    let px = pen_x + col as f64 * scale;
                    let py = y + f64::from(row) * scale;
                    raster::fill_rect(ctx, px, py, px + scale, py + scale, color);
                }
            }
        }
        pen_x += f64::from(GLYPH_ADVANCE) * scale;
    }
}

/// Column-encoded 5x7 glyph (bit 0 = top row) for the printable ASCII range,
/// plus a middle dot; anything else renders as a box.
fn builtin_glyph(ch: char) -> [u8; GLYPH_COLS] {
    if ch == '•' || ch == '·' {
        return [0x00, 0x18, 0x18, 0x00, 0x00];
    }
    let idx = (ch as usize).wrapping_sub(0x20);
    if idx < GLYPHS_5X7.len() {
        GLYPHS_5X7[idx]
    } else {
        [0x7F, 0x41, 0x41, 0x41, 0x7F]
    }
}

#[rustfmt::skip]
const GLYPHS_5X7: [[u8; GLYPH_COLS]; 95] = [
    [0x00, 0x00, 0x00, 0x00, 0x00], // ' '
    [0x00, 0x00, 0x5F, 0x00, 0x00], // '!'
    [0x00, 0x07, 0x00, 0x07, 0x00], // '"'
    [0x14, 0x7F, 0x14, 0x7F, 0x14], // '#'
    [0x24, 0x2A, 0x7F, 0x2A, 0x12], // '$'
    [0x23, 0x13, 0x08, 0x64, 0x62], // '%'
    [0x36, 0x49, 0x55, 0x22, 0x50], // '&'
    [0x00, 0x05, 0x03, 0x00, 0x00], // '\''
    [0x00, 0x1C, 0x22, 0x41, 0x00], // '('
    [0x00, 0x41, 0x22, 0x1C, 0x00], // ')'
    [0x08, 0x2A, 0x1C, 0x2A, 0x08], // '*'
    [0x08, 0x08, 0x3E, 0x08, 0x08], // '+'
    [0x00, 0x50, 0x30, 0x00, 0x00], // ','
    [0x08, 0x08, 0x08, 0x08, 0x08], // '-'
    [0x00, 0x60, 0x60, 0x00, 0x00], // '.'
    [0x20, 0x10, 0x08, 0x04, 0x02], // '/'
    [0x3E, 0x51, 0x49, 0x45, 0x3E], // '0'
    [0x00, 0x42, 0x7F, 0x40, 0x00], // '1'
    [0x42, 0x61, 0x51, 0x49, 0x46], // '2'
    [0x21, 0x41, 0x45, 0x4B, 0x31], // '3'
    [0x18, 0x14, 0x12, 0x7F, 0x10], // '4'
    [0x27, 0x45, 0x45, 0x45, 0x39], // '5'
    [0x3C, 0x4A, 0x49, 0x49, 0x30], // '6'
    [0x01, 0x71, 0x09, 0x05, 0x03], // '7'
    [0x36, 0x49, 0x49, 0x49, 0x36], // '8'
    [0x06, 0x49, 0x49, 0x29, 0x1E], // '9'
    [0x00, 0x36, 0x36, 0x00, 0x00], // ':'
    [0x00, 0x56, 0x36, 0x00, 0x00], // ';'
    [0x00, 0x08, 0x14, 0x22, 0x41], // '<'
    [0x14, 0x14, 0x14, 0x14, 0x14], // '='
    [0x41, 0x22, 0x14, 0x08, 0x00], // '>'
    [0x02, 0x01, 0x51, 0x09, 0x06], // '?'
    [0x32, 0x49, 0x79, 0x41, 0x3E], // '@'
    [0x7E, 0x11, 0x11, 0x11, 0x7E], // 'A'
    [0x7F, 0x49, 0x49, 0x49, 0x36], // 'B'
    [0x3E, 0x41, 0x41, 0x41, 0x22], // 'C'
    [0x7F, 0x41, 0x41, 0x22, 0x1C], // 'D'
    [0x7F, 0x49, 0x49, 0x49, 0x41], // 'E'
    [0x7F, 0x09, 0x09, 0x01, 0x01], // 'F'
    [0x3E, 0x41, 0x41, 0x51, 0x32], // 'G'
    [0x7F, 0x08, 0x08, 0x08, 0x7F], // 'H'
    [0x00, 0x41, 0x7F, 0x41, 0x00], // 'I'
    [0x20, 0x40, 0x41, 0x3F, 0x01], // 'J'
    [0x7F, 0x08, 0x14, 0x22, 0x41], // 'K'
    [0x7F, 0x40, 0x40, 0x40, 0x40], // 'L'
    [0x7F, 0x02, 0x0C, 0x02, 0x7F], // 'M'
    [0x7F, 0x04, 0x08, 0x10, 0x7F], // 'N'
    [0x3E, 0x41, 0x41, 0x41, 0x3E], // 'O'
    [0x7F, 0x09, 0x09, 0x09, 0x06], // 'P'
    [0x3E, 0x41, 0x51, 0x21, 0x5E], // 'Q'
    [0x7F, 0x09, 0x19, 0x29, 0x46], // 'R'
    [0x46, 0x49, 0x49, 0x49, 0x31], // 'S'
    [0x01, 0x01, 0x7F, 0x01, 0x01], // 'T'
    [0x3F, 0x40, 0x40, 0x40, 0x3F], // 'U'
    [0x1F, 0x20, 0x40, 0x20, 0x1F], // 'V'
    [0x7F, 0x20, 0x18, 0x20, 0x7F], // 'W'
    [0x63, 0x14, 0x08, 0x14, 0x63], // 'X'
    [0x03, 0x04, 0x78, 0x04, 0x03], // 'Y'
    [0x61, 0x51, 0x49, 0x45, 0x43], // 'Z'
    [0x00, 0x7F, 0x41, 0x41, 0x00], // '['
    [0x02, 0x04, 0x08, 0x10, 0x20], // '\\'
    [0x00, 0x41, 0x41, 0x7F, 0x00], // ']'
    [0x04, 0x02, 0x01, 0x02, 0x04], // '^'
    [0x40, 0x40, 0x40, 0x40, 0x40], // '_'
    [0x00, 0x01, 0x02, 0x04, 0x00], // '`'
    [0x20, 0x54, 0x54, 0x54, 0x78], // 'a'
    [0x7F, 0x48, 0x44, 0x44, 0x38], // 'b'
    [0x38, 0x44, 0x44, 0x44, 0x20], // 'c'
    [0x38, 0x44, 0x44, 0x48, 0x7F], // 'd'
    [0x38, 0x54, 0x54, 0x54, 0x18], // 'e'
    [0x08, 0x7E, 0x09, 0x01, 0x02], // 'f'
    [0x0C, 0x52, 0x52, 0x52, 0x3E], // 'g'
    [0x7F, 0x08, 0x04, 0x04, 0x78], // 'h'
    [0x00, 0x44, 0x7D, 0x40, 0x00], // 'i'
    [0x20, 0x40, 0x44, 0x3D, 0x00], // 'j'
    [0x00, 0x7F, 0x10, 0x28, 0x44], // 'k'
    [0x00, 0x41, 0x7F, 0x40, 0x00], // 'l'
    [0x7C, 0x04, 0x18, 0x04, 0x78], // 'm'
    [0x7C, 0x08, 0x04, 0x04, 0x78], // 'n'
    [0x38, 0x44, 0x44, 0x44, 0x38], // 'o'
    [0x7C, 0x14, 0x14, 0x14, 0x08], // 'p'
    [0x08, 0x14, 0x14, 0x18, 0x7C], // 'q'
    [0x7C, 0x08, 0x04, 0x04, 0x08], // 'r'
    [0x48, 0x54, 0x54, 0x54, 0x20], // 's'
    [0x04, 0x3F, 0x44, 0x40, 0x20], // 't'
    [0x3C, 0x40, 0x40, 0x20, 0x7C], // 'u'
    [0x1C, 0x20, 0x40, 0x20, 0x1C], // 'v'
    [0x3C, 0x40, 0x30, 0x40, 0x3C], // 'w'
    [0x44, 0x28, 0x10, 0x28, 0x44], // 'x'
    [0x0C, 0x50, 0x50, 0x50, 0x3C], // 'y'
    [0x44, 0x64, 0x54, 0x4C, 0x44], // 'z'
    [0x00, 0x08, 0x36, 0x41, 0x00], // '{'
    [0x00, 0x00, 0x7F, 0x00, 0x00], // '|'
    [0x00, 0x41, 0x36, 0x08, 0x00], // '}'
    [0x08, 0x04, 0x08, 0x10, 0x08], // '~'
];

/// Greedy word wrap by measured width; a single over-wide word still forms
/// its own line (no mid-word breaking).
pub(crate) fn wrap_text(
    painter: &mut FontPainter,
    text: &str,
    size: f32,
    bold: bool,
    max_width: f32,
) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        if painter.measure(&candidate, size, bold).0 <= max_width {
            current = candidate;
        } else {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            current = word.to_string();
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(text.to_string());
    }
    lines
}
