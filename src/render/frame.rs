use super::Rgb;
use super::font;
use super::sprite::{BlitMode, KEY_COLOR, Sprite};
use crossterm::{cursor, queue, style};
use std::io::{self, Write};

/// Off-screen drawing target at the game's native resolution.
pub struct Frame {
    w: usize,
    h: usize,
    px: Vec<Rgb>,
}

impl Frame {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            px: vec![Rgb(0, 0, 0); w * h],
        }
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn height(&self) -> usize {
        self.h
    }

    pub fn set(&mut self, x: i32, y: i32, c: Rgb) {
        if x >= 0 && y >= 0 && (x as usize) < self.w && (y as usize) < self.h {
            self.px[y as usize * self.w + x as usize] = c;
        }
    }

    pub fn get(&self, x: usize, y: usize) -> Rgb {
        self.px[y * self.w + x]
    }

    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, c: Rgb) {
        for dy in 0..h {
            for dx in 0..w {
                self.set(x + dx, y + dy, c);
            }
        }
    }

    /// Copy a sprite with its top-left corner at (x, y), clipped to the
    /// frame. `Xray` skips key-colored pixels.
    pub fn blit(&mut self, sprite: &Sprite, x: i32, y: i32, mode: BlitMode) {
        for sy in 0..sprite.height() {
            for sx in 0..sprite.width() {
                let c = sprite.get(sx, sy);
                if mode == BlitMode::Xray && c == KEY_COLOR {
                    continue;
                }
                self.set(x + sx as i32, y + sy as i32, c);
            }
        }
    }

    /// Draw text with a one-pixel drop shadow. Glyphs are scaled 2x so
    /// they survive the downscale to terminal cells.
    pub fn text(&mut self, x: i32, y: i32, text: &str, c: Rgb) {
        const SCALE: i32 = 2;
        for (i, ch) in text.chars().enumerate() {
            let Some(glyph) = font::glyph(ch) else {
                continue;
            };
            let gx = x + i as i32 * font::ADVANCE * SCALE;
            for row in 0..font::HEIGHT {
                for col in 0..font::WIDTH {
                    if glyph[row * font::WIDTH + col] == 1 {
                        let px = gx + col as i32 * SCALE;
                        let py = y + row as i32 * SCALE;
                        self.fill_rect(px + 1, py + 1, SCALE, SCALE, super::SHADOW);
                        self.fill_rect(px, py, SCALE, SCALE, c);
                    }
                }
            }
        }
    }
}

/// Terminal-sized pixel grid. Each character cell shows two stacked
/// pixels using the upper half block.
pub struct Screen {
    w: usize,
    h: usize, // pixel height = terminal rows * 2
    px: Vec<Rgb>,
}

impl Screen {
    pub fn new(cols: u16, rows: u16) -> Self {
        let (w, h) = (cols as usize, rows as usize * 2);
        Self {
            w,
            h,
            px: vec![Rgb(0, 0, 0); w * h],
        }
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.w = cols as usize;
        self.h = rows as usize * 2;
        self.px.clear();
        self.px.resize(self.w * self.h, Rgb(0, 0, 0));
    }

    fn get(&self, x: usize, y: usize) -> Rgb {
        self.px[y * self.w + x]
    }

    /// Nearest-neighbour scale of the frame into the largest centered
    /// rectangle with the same aspect ratio. The rest is black.
    pub fn scale_from(&mut self, frame: &Frame) {
        let (fw, fh) = (frame.width(), frame.height());
        if self.w == 0 || self.h == 0 || fw == 0 || fh == 0 {
            return;
        }
        let (tw, th) = if self.w * fh > self.h * fw {
            (self.h * fw / fh, self.h)
        } else {
            (self.w, self.w * fh / fw)
        };
        let ox = (self.w - tw) / 2;
        let oy = (self.h - th) / 2;

        self.px.fill(Rgb(0, 0, 0));
        for y in 0..th {
            let src_y = y * fh / th;
            for x in 0..tw {
                let src_x = x * fw / tw;
                self.px[(oy + y) * self.w + ox + x] = frame.get(src_x, src_y);
            }
        }
    }

    pub fn render(&self, out: &mut impl Write) -> io::Result<()> {
        queue!(out, cursor::MoveTo(0, 0))?;
        let rows = self.h / 2;
        let mut prev_fg = Rgb(0, 0, 0);
        let mut prev_bg = Rgb(0, 0, 0);
        let mut need_fg = true;
        let mut need_bg = true;

        for row in 0..rows {
            for col in 0..self.w {
                let top = self.get(col, row * 2);
                let bot = self.get(col, row * 2 + 1);

                if top == bot {
                    if need_bg || prev_bg != top {
                        queue!(out, style::SetBackgroundColor(top.into()))?;
                        prev_bg = top;
                        need_bg = false;
                    }
                    queue!(out, style::Print(' '))?;
                } else {
                    if need_fg || prev_fg != top {
                        queue!(out, style::SetForegroundColor(top.into()))?;
                        prev_fg = top;
                        need_fg = false;
                    }
                    if need_bg || prev_bg != bot {
                        queue!(out, style::SetBackgroundColor(bot.into()))?;
                        prev_bg = bot;
                        need_bg = false;
                    }
                    queue!(out, style::Print('\u{2580}'))?; // ▀
                }
            }
            if row + 1 < rows {
                queue!(out, style::ResetColor, style::Print("\r\n"))?;
                need_fg = true;
                need_bg = true;
            }
        }
        queue!(out, style::ResetColor)?;
        out.flush()
    }

    /// Scale the finished frame onto the terminal and flush it.
    pub fn present(&mut self, frame: &Frame, out: &mut impl Write) -> io::Result<()> {
        self.scale_from(frame);
        self.render(out)
    }
}
