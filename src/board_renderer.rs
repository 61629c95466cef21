use std::fs::{self, File};
use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage};
use rusttype::{Font, Scale, point};

use crate::error::GameError;
use crate::grid::{Grid, ROW_COUNT};
use crate::ticket::COLUMN_COUNT;

const FONT_CANDIDATES: &[&str] = &[
    "Arial", "Helvetica", "DejaVuSans", "LiberationSans", "SegoeUI", "Segoe UI", "NotoSans-Regular", "NotoSans", "Cantarell-Regular"
];

const CELL_W: u32 = 52;
const CELL_H: u32 = 44;
const PADDING: u32 = 20;
const TICKET_GAP: u32 = 18;

const BG: Rgb<u8> = Rgb([245, 245, 245]);
const LINE: Rgb<u8> = Rgb([30, 30, 30]);
const TEXT: Rgb<u8> = Rgb([20, 20, 20]);
const EMPTY_CELL: Rgb<u8> = Rgb([224, 224, 224]);
const HIGHLIGHT: Rgb<u8> = Rgb([255, 213, 115]);
const WINNER: Rgb<u8> = Rgb([46, 160, 67]);

fn find_system_font_data() -> Option<Vec<u8>> {
    // Allow explicit override for debugging or custom font selection
    if let Ok(path) = std::env::var("LOTO_FONT_PATH") {
        if let Ok(bytes) = fs::read(&path) { return Some(bytes); }
    }

    let mut search_dirs: Vec<PathBuf> = Vec::new();
    if cfg!(target_os = "macos") {
        search_dirs.extend([
            PathBuf::from("/System/Library/Fonts"),
            PathBuf::from("/Library/Fonts"),
        ]);
        if let Some(home) = dirs_next::home_dir() { search_dirs.push(home.join("Library/Fonts")); }
    } else if cfg!(target_os = "windows") {
        if let Some(win) = std::env::var_os("WINDIR") { search_dirs.push(PathBuf::from(win).join("Fonts")); }
        search_dirs.push(PathBuf::from("C:/Windows/Fonts"));
    } else { // Linux / BSD
        search_dirs.extend([
            PathBuf::from("/usr/share/fonts"),
            PathBuf::from("/usr/local/share/fonts"),
        ]);
        if let Some(home) = dirs_next::home_dir() { search_dirs.push(home.join(".fonts")); }
        if let Some(home) = dirs_next::home_dir() { search_dirs.push(home.join(".local/share/fonts")); }
    }

    // Collect font files recursively to catch fonts in subdirectories
    let mut font_files: Vec<PathBuf> = Vec::new();
    for dir in search_dirs {
        if !dir.exists() { continue; }
        for entry in walkdir::WalkDir::new(&dir).follow_links(true).into_iter().filter_map(|e| e.ok()) {
            let path = entry.path();
            if !path.is_file() { continue; }
            if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
                let ext_l = ext.to_ascii_lowercase();
                if matches!(ext_l.as_str(), "ttf" | "otf") { font_files.push(path.to_path_buf()); }
            }
        }
    }

    if font_files.is_empty() { return None; }

    // Fast path: try candidate names first
    for &cand in FONT_CANDIDATES {
        if let Some(p) = font_files.iter().find(|p| p.file_stem().and_then(|s| s.to_str()).map(|s| s.eq_ignore_ascii_case(cand)).unwrap_or(false)) {
            if let Ok(data) = fs::read(p) { return Some(data); }
        }
    }

    // Scoring: cells only ever show numbers, so pick the face covering the
    // most digit glyphs
    let mut best: Option<(usize, &Path)> = None;
    for path in &font_files {
        if let Ok(bytes) = fs::read(path) {
            if let Some(font) = Font::try_from_vec(bytes) {
                let score = ('0'..='9').filter(|&c| font.glyph(c).id().0 != 0).count();
                if best.map(|(s, _)| score > s).unwrap_or(true) {
                    best = Some((score, path));
                }
            }
        }
    }
    if let Some((_, p)) = best { if let Ok(bytes) = fs::read(p) { return Some(bytes); } }

    None
}

struct NumberPainter {
    font: Font<'static>,
    scale: Scale,
}

impl NumberPainter {
    fn new(font_data: Vec<u8>, px: f32) -> Result<Self, GameError> {
        let font = Font::try_from_vec(font_data).ok_or(GameError::FontUnavailable)?;
        Ok(Self { font, scale: Scale::uniform(px) })
    }

    /// Draw `text` centered inside the given box.
    fn draw_centered(&self, img: &mut RgbImage, text: &str, left: u32, top: u32, w: u32, h: u32, color: Rgb<u8>) {
        let probe: Vec<_> = self.font.layout(text, self.scale, point(0.0, 0.0)).collect();
        let text_w = probe
            .last()
            .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
            .unwrap_or(0.0);
        let v = self.font.v_metrics(self.scale);
        let x0 = left as f32 + (w as f32 - text_w) / 2.0;
        let baseline = top as f32 + (h as f32 - (v.ascent - v.descent)) / 2.0 + v.ascent;

        for glyph in self.font.layout(text, self.scale, point(x0, baseline)) {
            if let Some(bb) = glyph.pixel_bounding_box() {
                glyph.draw(|x, y, a| {
                    if a < 0.05 { return; }
                    let gx = x as i32 + bb.min.x;
                    let gy = y as i32 + bb.min.y;
                    if gx >= 0 && gy >= 0 && (gx as u32) < img.width() && (gy as u32) < img.height() {
                        let dst = img.get_pixel_mut(gx as u32, gy as u32);
                        for i in 0..3 { dst[i] = ((dst[i] as f32)*(1.0 - a) + (color[i] as f32)*a) as u8; }
                    }
                });
            }
        }
    }
}

fn fill_rect(img: &mut RgbImage, left: u32, top: u32, w: u32, h: u32, color: Rgb<u8>) {
    for y in top..(top + h).min(img.height()) {
        for x in left..(left + w).min(img.width()) {
            img.put_pixel(x, y, color);
        }
    }
}

fn draw_border(img: &mut RgbImage, left: u32, top: u32, w: u32, h: u32, thickness: u32, color: Rgb<u8>) {
    fill_rect(img, left, top, w, thickness, color);
    fill_rect(img, left, top + h - thickness, w, thickness, color);
    fill_rect(img, left, top, thickness, h, color);
    fill_rect(img, left + w - thickness, top, thickness, h, color);
}

/// Render every grid into one stacked board image. Cells holding a drawn
/// number get a highlight fill, winning grids a border marker; both are
/// re-derived from the drawn set and winner list rather than carried on the
/// grids themselves.
pub fn render_boards(
    grids: &[Grid],
    drawn: &[u8],
    winners: &[usize],
    path: &Path,
) -> Result<(), GameError> {
    let ticket_h = ROW_COUNT as u32 * CELL_H;
    let grid_w = COLUMN_COUNT as u32 * CELL_W;
    let img_w = grid_w + PADDING * 2;
    let count = grids.len().max(1) as u32;
    let img_h = PADDING * 2 + count * ticket_h + (count - 1) * TICKET_GAP;

    let mut img = RgbImage::from_pixel(img_w, img_h, BG);

    let font_data = find_system_font_data().ok_or(GameError::FontUnavailable)?;
    let painter = NumberPainter::new(font_data, 20.0)?;

    for (index, grid) in grids.iter().enumerate() {
        let top = PADDING + index as u32 * (ticket_h + TICKET_GAP);

        // Cell backgrounds first: shade empties, light up drawn numbers
        for row in 0..ROW_COUNT {
            for column in 0..COLUMN_COUNT {
                let x0 = PADDING + column as u32 * CELL_W;
                let y0 = top + row as u32 * CELL_H;
                match grid.cell(row, column) {
                    None => fill_rect(&mut img, x0, y0, CELL_W, CELL_H, EMPTY_CELL),
                    Some(n) if drawn.contains(&n) => {
                        fill_rect(&mut img, x0, y0, CELL_W, CELL_H, HIGHLIGHT)
                    }
                    Some(_) => {}
                }
            }
        }

        // Grid lines
        for i in 0..=ROW_COUNT as u32 {
            let y = (top + i * CELL_H).min(img_h - 1);
            for x in PADDING..=(PADDING + grid_w).min(img_w - 1) { img.put_pixel(x, y, LINE); }
        }
        for i in 0..=COLUMN_COUNT as u32 {
            let x = (PADDING + i * CELL_W).min(img_w - 1);
            for y in top..=(top + ticket_h).min(img_h - 1) { img.put_pixel(x, y, LINE); }
        }

        // Numbers
        for (row, column, number) in grid.occupied() {
            let x0 = PADDING + column as u32 * CELL_W;
            let y0 = top + row as u32 * CELL_H;
            painter.draw_centered(&mut img, &number.to_string(), x0, y0, CELL_W, CELL_H, TEXT);
        }

        if winners.contains(&index) {
            draw_border(&mut img, PADDING - 4, top - 4, grid_w + 8, ticket_h + 8, 3, WINNER);
        }
    }

    let mut file = File::create(path)?;
    img.write_to(&mut file, image::ImageFormat::Png)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::pack_grid;
    use crate::random_source::SeededRandom;
    use crate::ticket::generate_ticket;

    #[test]
    fn test_render_boards_writes_a_png() {
        let mut rng = SeededRandom::new(21);
        let grids: Vec<Grid> = (0..3)
            .map(|_| {
                let ticket = generate_ticket(&mut rng, 10_000).expect("should generate");
                pack_grid(&ticket, &mut rng, 10_000).expect("should pack")
            })
            .collect();
        let drawn: Vec<u8> = grids[0].row_numbers(0).collect();

        let path = std::env::temp_dir().join("loto_render_test.png");
        match render_boards(&grids, &drawn, &[0], &path) {
            // Bare CI machines may not ship any font at all; nothing to
            // assert about pixels in that case.
            Err(GameError::FontUnavailable) => return,
            other => other.expect("render"),
        }
        assert!(path.exists());
        std::fs::remove_file(&path).ok();
    }
}
