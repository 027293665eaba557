//! Raster composition: tile polygons, river and road overlays, optional
//! coordinate labels, and supersampled anti-aliasing.
//!
//! Vector drawing goes through tiny-skia; the final image is an `image`
//! crate buffer so callers can save it or composite further.

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use tiny_skia::{Color, FillRule, LineCap, LineJoin, Paint, PathBuilder, Pixmap, Stroke, Transform};

use crate::geometry::Point;
use crate::map::HexMap;
use crate::palette::{self, PaletteError};

/// Tile outline and label ink.
const OUTLINE_COLOR: [u8; 3] = [45, 45, 45];
const LABEL_COLOR: [u8; 3] = [40, 40, 40];

/// Rendering options. The output image is always
/// `ceil(image_size) + 2 * margin` pixels per axis; the supersample
/// factor only affects edge quality, never dimensions.
#[derive(Clone, Copy, Debug)]
pub struct RenderOptions {
    /// Blank border around the grid, in output pixels.
    pub margin: u32,
    /// Tile outline stroke width in output pixels. 0 disables outlines.
    pub outline_width: f64,
    /// Road stroke width in output pixels.
    pub road_width: f64,
    /// River stroke width in output pixels.
    pub river_width: f64,
    /// Linear supersampling factor for anti-aliasing (clamped to >= 1).
    pub supersample: u32,
    /// Draw per-tile "row,column" labels at this font scale.
    pub label_scale: Option<u32>,
    /// How much road colors are darkened relative to their palette entry.
    pub road_darken: f32,
    /// How much river colors are darkened. Darker than roads so the two
    /// stay distinguishable at the same palette index.
    pub river_darken: f32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            margin: 12,
            outline_width: 2.0,
            road_width: 6.0,
            river_width: 9.0,
            supersample: 2,
            label_scale: None,
            road_darken: 0.2,
            river_darken: 0.35,
        }
    }
}

/// Rendering failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderError {
    /// The requested canvas has zero area (empty map with no margin).
    EmptyCanvas { width: u32, height: u32 },
    /// A tile or feature references a color the palette does not have.
    Palette(PaletteError),
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::EmptyCanvas { width, height } => {
                write!(f, "cannot render a {}x{} pixel canvas", width, height)
            }
            RenderError::Palette(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for RenderError {}

impl From<PaletteError> for RenderError {
    fn from(e: PaletteError) -> Self {
        RenderError::Palette(e)
    }
}

/// Render the map to an RGBA image.
///
/// Tiles are drawn first (fill + outline), then rivers along their shared
/// edges, then roads between centers, then labels. The scene is
/// rasterized at `supersample` times the output resolution and downscaled
/// with a smoothing filter.
pub fn render(map: &HexMap, options: &RenderOptions) -> Result<RgbaImage, RenderError> {
    let size = map.image_size();
    let width = size.x.ceil() as u32 + 2 * options.margin;
    let height = size.y.ceil() as u32 + 2 * options.margin;
    let s = options.supersample.max(1);

    let mut pixmap =
        Pixmap::new(width * s, height * s).ok_or(RenderError::EmptyCanvas { width, height })?;
    pixmap.fill(Color::WHITE);

    draw_tiles(&mut pixmap, map, options, s)?;
    draw_rivers(&mut pixmap, map, options, s)?;
    draw_roads(&mut pixmap, map, options, s)?;

    let (full_w, full_h) = (pixmap.width(), pixmap.height());
    let full = RgbaImage::from_raw(full_w, full_h, pixmap.take())
        .ok_or(RenderError::EmptyCanvas { width, height })?;

    let mut img = if s > 1 {
        imageops::resize(&full, width, height, FilterType::Triangle)
    } else {
        full
    };

    if let Some(scale) = options.label_scale {
        draw_labels(&mut img, map, options.margin, scale.max(1));
    }

    Ok(img)
}

/// Map a scene point into supersampled canvas coordinates.
fn canvas_xy(p: Point, margin: u32, s: u32) -> (f32, f32) {
    (
        ((p.x + margin as f64) * s as f64) as f32,
        ((p.y + margin as f64) * s as f64) as f32,
    )
}

fn solid_paint(rgb: [u8; 3]) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(rgb[0], rgb[1], rgb[2], 255);
    paint.anti_alias = true;
    paint
}

fn round_stroke(width: f64, s: u32) -> Stroke {
    Stroke {
        width: (width * s as f64) as f32,
        line_cap: LineCap::Round,
        line_join: LineJoin::Round,
        ..Default::default()
    }
}

fn draw_tiles(
    pixmap: &mut Pixmap,
    map: &HexMap,
    options: &RenderOptions,
    s: u32,
) -> Result<(), RenderError> {
    let outline = solid_paint(OUTLINE_COLOR);

    for (coords, color_index) in map.tiles() {
        let fill = solid_paint(palette::color(color_index)?);

        let polygon = coords.polygon(&map.layout);
        let mut pb = PathBuilder::new();
        let (x, y) = canvas_xy(polygon[0], options.margin, s);
        pb.move_to(x, y);
        for vertex in &polygon[1..] {
            let (x, y) = canvas_xy(*vertex, options.margin, s);
            pb.line_to(x, y);
        }
        pb.close();

        if let Some(path) = pb.finish() {
            pixmap.fill_path(&path, &fill, FillRule::Winding, Transform::identity(), None);
            if options.outline_width > 0.0 {
                let stroke = round_stroke(options.outline_width, s);
                pixmap.stroke_path(&path, &outline, &stroke, Transform::identity(), None);
            }
        }
    }

    Ok(())
}

fn draw_rivers(
    pixmap: &mut Pixmap,
    map: &HexMap,
    options: &RenderOptions,
    s: u32,
) -> Result<(), RenderError> {
    let stroke = round_stroke(options.river_width, s);

    for river in map.rivers() {
        let rgb = palette::darken(palette::color(river.color)?, options.river_darken);
        let [from, to] = river.segment();

        let mut pb = PathBuilder::new();
        let (x, y) = canvas_xy(from, options.margin, s);
        pb.move_to(x, y);
        let (x, y) = canvas_xy(to, options.margin, s);
        pb.line_to(x, y);

        if let Some(path) = pb.finish() {
            let paint = solid_paint(rgb);
            pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
        }
    }

    Ok(())
}

fn draw_roads(
    pixmap: &mut Pixmap,
    map: &HexMap,
    options: &RenderOptions,
    s: u32,
) -> Result<(), RenderError> {
    let stroke = round_stroke(options.road_width, s);

    for road in map.roads() {
        let rgb = palette::darken(palette::color(road.color)?, options.road_darken);

        let mut pb = PathBuilder::new();
        let (x, y) = canvas_xy(road.start.center(&map.layout), options.margin, s);
        pb.move_to(x, y);
        let (x, y) = canvas_xy(road.end.center(&map.layout), options.margin, s);
        pb.line_to(x, y);

        if let Some(path) = pb.finish() {
            let paint = solid_paint(rgb);
            pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
        }
    }

    Ok(())
}

/// Simple 5x7 pixel font for coordinate labels (digits + separators)
const FONT_5X7: &[(char, [u8; 7])] = &[
    ('0', [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110]),
    ('1', [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110]),
    ('2', [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111]),
    ('3', [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110]),
    ('4', [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010]),
    ('5', [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110]),
    ('6', [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110]),
    ('7', [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000]),
    ('8', [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110]),
    ('9', [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100]),
    (',', [0b00000, 0b00000, 0b00000, 0b00000, 0b01100, 0b00100, 0b01000]),
    ('-', [0b00000, 0b00000, 0b00000, 0b11111, 0b00000, 0b00000, 0b00000]),
    (' ', [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00000]),
];

/// Draw a glyph at an integer scale. Out-of-image pixels are clipped.
fn draw_char(img: &mut RgbaImage, x: i32, y: i32, ch: char, scale: u32, color: Rgba<u8>) {
    let Some((_, bits)) = FONT_5X7.iter().find(|(c, _)| *c == ch) else {
        return;
    };

    for (row, &byte) in bits.iter().enumerate() {
        for col in 0..5u32 {
            if byte & (0b10000 >> col) == 0 {
                continue;
            }
            for dy in 0..scale {
                for dx in 0..scale {
                    let px = x + (col * scale + dx) as i32;
                    let py = y + (row as u32 * scale + dy) as i32;
                    if px >= 0 && py >= 0 && (px as u32) < img.width() && (py as u32) < img.height()
                    {
                        img.put_pixel(px as u32, py as u32, color);
                    }
                }
            }
        }
    }
}

fn draw_text(img: &mut RgbaImage, x: i32, y: i32, text: &str, scale: u32, color: Rgba<u8>) {
    let mut cx = x;
    for ch in text.chars() {
        draw_char(img, cx, y, ch, scale, color);
        cx += (6 * scale) as i32; // 5 pixels + 1 spacing
    }
}

/// Draw "row,column" centered on each tile of the final image.
fn draw_labels(img: &mut RgbaImage, map: &HexMap, margin: u32, scale: u32) {
    let ink = Rgba([LABEL_COLOR[0], LABEL_COLOR[1], LABEL_COLOR[2], 255]);

    for (coords, _) in map.tiles() {
        let center = coords.center(&map.layout);
        let text = format!("{},{}", coords.row, coords.column);

        let text_width = (text.len() as u32 * 6 * scale).saturating_sub(scale);
        let x = (center.x + margin as f64) as i32 - (text_width / 2) as i32;
        let y = (center.y + margin as f64) as i32 - (7 * scale / 2) as i32;
        draw_text(img, x, y, &text, scale, ink);
    }
}
