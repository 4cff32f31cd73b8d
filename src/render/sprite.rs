use super::*;
use crate::config::Tuning;
use crate::entity::Pose;
use anyhow::{Context, Result, bail};
use std::path::Path;

/// Pixels of this color are see-through when blitted with `BlitMode::Xray`.
pub const KEY_COLOR: Rgb = Rgb(255, 0, 255);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlitMode {
    Normal,
    Xray,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flip {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sprite {
    width: usize,
    height: usize,
    pixels: Vec<Rgb>,
}

impl Sprite {
    pub fn from_fn(width: usize, height: usize, f: impl Fn(usize, usize) -> Rgb) -> Self {
        let mut pixels = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                pixels.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Decode an image file. Fully transparent pixels become the key color.
    pub fn load(path: &Path) -> Result<Self> {
        let img = image::open(path).with_context(|| format!("loading sprite {}", path.display()))?;
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        if width == 0 || height == 0 {
            bail!("sprite {} is empty", path.display());
        }

        let pixels = rgba
            .pixels()
            .map(|p| {
                if p[3] == 0 {
                    KEY_COLOR
                } else {
                    Rgb(p[0], p[1], p[2])
                }
            })
            .collect();

        Ok(Self {
            width: width as usize,
            height: height as usize,
            pixels,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x: usize, y: usize) -> Rgb {
        self.pixels[y * self.width + x]
    }

    pub fn flipped(&self, flip: Flip) -> Self {
        Self::from_fn(self.width, self.height, |x, y| match flip {
            Flip::Horizontal => self.get(self.width - 1 - x, y),
            Flip::Vertical => self.get(x, self.height - 1 - y),
        })
    }
}

/// Every image the scene needs.
#[derive(Debug, Clone)]
pub struct SpriteSet {
    pub background: Sprite,
    pub pipe_lower: Sprite,
    pub pipe_upper: Sprite,
    pub bird_falling: Sprite,
    pub bird_rising: Sprite,
}

impl SpriteSet {
    /// Load `back.png`, `pipe.png`, `bird.png` and `bird_u.png` from `dir`.
    /// The upper pipe is the lower one turned upside down.
    pub fn load(dir: &Path) -> Result<Self> {
        let pipe_lower = Sprite::load(&dir.join("pipe.png"))?;
        let set = Self {
            background: Sprite::load(&dir.join("back.png"))?,
            pipe_upper: pipe_lower.flipped(Flip::Vertical),
            pipe_lower,
            bird_falling: Sprite::load(&dir.join("bird.png"))?,
            bird_rising: Sprite::load(&dir.join("bird_u.png"))?,
        };
        tracing::info!(dir = %dir.display(), "sprites loaded");
        Ok(set)
    }

    /// Procedural art sized to the tuning's geometry.
    pub fn builtin(tuning: &Tuning) -> Self {
        let pipe_lower = pipe(tuning.obstacle_width as usize, tuning.obstacle_height as usize);
        let (bw, bh) = (tuning.player_width as usize, tuning.player_height as usize);
        Self {
            background: background(
                tuning.background_width as usize,
                tuning.screen_height as usize,
            ),
            pipe_upper: pipe_lower.flipped(Flip::Vertical),
            pipe_lower,
            bird_falling: bird(bw, bh, Pose::Falling),
            bird_rising: bird(bw, bh, Pose::Rising),
        }
    }

    pub fn bird(&self, pose: Pose) -> &Sprite {
        match pose {
            Pose::Rising => &self.bird_rising,
            Pose::Falling => &self.bird_falling,
        }
    }
}

// ── Built-in art ────────────────────────────────────────────────────────────

/// Sky gradient, two rows of hills and a striped ground strip. Every
/// periodic term divides the width so the tile repeats seamlessly.
fn background(w: usize, h: usize) -> Sprite {
    let ground_h = (h / 10).max(4).min(h);
    let sky_h = h.saturating_sub(ground_h);
    let tau = std::f64::consts::TAU;
    let far = |x: usize| {
        let fx = x as f64 / w as f64 * tau;
        (fx * 2.0).sin() * 9.0 + (fx * 5.0).sin() * 4.0 + 22.0
    };
    let near = |x: usize| {
        let fx = x as f64 / w as f64 * tau;
        (fx * 3.0).sin() * 6.0 + (fx * 7.0).sin() * 3.0 + 12.0
    };

    Sprite::from_fn(w, h, |x, y| {
        if y >= sky_h {
            let gy = y - sky_h;
            return match gy {
                0 => {
                    if (x / 4) % 2 == 0 {
                        GRASS
                    } else {
                        GRASS_LIGHT
                    }
                }
                1 => GRASS,
                _ => {
                    if (x + gy * 2) % 16 < 8 {
                        DIRT
                    } else {
                        DIRT_DARK
                    }
                }
            };
        }
        let height_above_ground = (sky_h - y) as f64;
        if height_above_ground <= near(x) {
            HILL_NEAR
        } else if height_above_ground <= far(x) {
            HILL_FAR
        } else {
            let t = (y * 256 / sky_h.max(1)) as u16;
            Rgb::lerp(SKY_TOP, SKY_BOT, t)
        }
    })
}

/// Pipe opening upward: a darker-edged cap over a shaded body.
fn pipe(w: usize, h: usize) -> Sprite {
    let cap_h = (h / 12).clamp(2, 14);
    Sprite::from_fn(w, h, |x, y| {
        if y == 0 || y + 1 == cap_h {
            CAP_DARK
        } else if y < cap_h {
            pipe_shade(x as i32, w as i32)
        } else if x == 0 || x + 1 == w {
            PIPE_L
        } else {
            // Body is a touch darker than the cap.
            let c = pipe_shade(x as i32, w as i32);
            Rgb::lerp(c, PIPE_L, 64)
        }
    })
}

fn bird(w: usize, h: usize, pose: Pose) -> Sprite {
    let (cx, cy) = (w as f64 * 0.45, h as f64 * 0.5);
    let (rx, ry) = (w as f64 * 0.38, h as f64 * 0.40);

    // Wing up while falling, down on the flap.
    let (wing_top, wing_bot) = match pose {
        Pose::Falling => (cy - ry * 0.35, cy + ry * 0.15),
        Pose::Rising => (cy + ry * 0.05, cy + ry * 0.65),
    };
    let eye = (cx + rx * 0.45, cy - ry * 0.4);
    let eye_r = (w.min(h) as f64 * 0.14).max(1.5);

    Sprite::from_fn(w, h, |x, y| {
        let (fx, fy) = (x as f64 + 0.5, y as f64 + 0.5);
        let dx = (fx - cx) / rx;
        let dy = (fy - cy) / ry;
        let in_body = dx * dx + dy * dy <= 1.0;

        // Beak
        if fx > cx + rx * 0.7 && fx <= w as f64 && (fy - cy).abs() < ry * 0.35 {
            return if fy < cy { BIRD_BEAK_HI } else { BIRD_BEAK };
        }
        // Tail
        if fx < cx - rx * 0.8 && (fy - cy).abs() < ry * 0.25 {
            return BIRD_WING;
        }
        if !in_body {
            return KEY_COLOR;
        }
        // Eye
        let (ex, ey) = (fx - eye.0, fy - eye.1);
        if ex * ex + ey * ey <= eye_r * eye_r {
            let pupil = eye_r * 0.45;
            let (px, py) = (ex - eye_r * 0.35, ey);
            return if px * px + py * py <= pupil * pupil {
                BIRD_PUPIL
            } else {
                BIRD_EYE
            };
        }
        // Wing
        if fx < cx && fy >= wing_top && fy <= wing_bot {
            return BIRD_WING;
        }
        // Highlight on the top of the body
        if dy < -0.6 {
            return BIRD_HI;
        }
        BIRD_Y
    })
}

fn pipe_shade(x: i32, total_w: i32) -> Rgb {
    if total_w <= 1 {
        return PIPE_M;
    }
    let t = (x as f64 / (total_w - 1) as f64 * 256.0) as u16;
    if t < 64 {
        Rgb::lerp(PIPE_L, PIPE_M, (t * 4).min(256))
    } else if t < 100 {
        Rgb::lerp(PIPE_M, PIPE_HI, ((t - 64) * 7).min(256))
    } else if t < 160 {
        Rgb::lerp(PIPE_HI, PIPE_R, ((t - 100) * 4).min(256))
    } else {
        Rgb::lerp(PIPE_R, PIPE_L, ((t - 160) * 3).min(256))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker() -> Sprite {
        // 3x2, pixel value encodes its position.
        Sprite::from_fn(3, 2, |x, y| Rgb(x as u8, y as u8, 0))
    }

    #[test]
    fn test_flip_horizontal() {
        let s = checker().flipped(Flip::Horizontal);
        assert_eq!(s.get(0, 0), Rgb(2, 0, 0));
        assert_eq!(s.get(2, 1), Rgb(0, 1, 0));
    }

    #[test]
    fn test_flip_vertical() {
        let s = checker().flipped(Flip::Vertical);
        assert_eq!(s.get(0, 0), Rgb(0, 1, 0));
        assert_eq!(s.get(1, 1), Rgb(1, 0, 0));
    }

    #[test]
    fn test_builtin_sizes_follow_tuning() {
        let t = Tuning::default();
        let set = SpriteSet::builtin(&t);
        assert_eq!((set.background.width(), set.background.height()), (320, 200));
        assert_eq!((set.pipe_lower.width(), set.pipe_lower.height()), (50, 165));
        assert_eq!(set.pipe_upper, set.pipe_lower.flipped(Flip::Vertical));
        assert_eq!((set.bird_rising.width(), set.bird_rising.height()), (29, 23));
    }

    #[test]
    fn test_builtin_background_has_sky_and_ground() {
        let set = SpriteSet::builtin(&Tuning::default());
        let bg = &set.background;
        assert_eq!(bg.get(0, 0), SKY_TOP);
        let bottom = bg.get(0, bg.height() - 1);
        assert!(bottom == DIRT || bottom == DIRT_DARK);
    }

    #[test]
    fn test_builtin_smallest_screen_is_all_ground() {
        let t = Tuning {
            screen_height: crate::config::MIN_SCREEN_HEIGHT,
            ..Tuning::default()
        };
        assert!(t.validate().is_ok());
        let set = SpriteSet::builtin(&t);
        assert_eq!(set.background.height(), 4);
        assert_eq!(set.background.get(0, 0), GRASS);
    }

    #[test]
    fn test_builtin_background_shorter_than_ground_strip() {
        let set = background(320, 2);
        assert_eq!(set.height(), 2);
        assert_eq!(set.get(0, 1), GRASS);
    }

    #[test]
    fn test_bird_poses_differ_and_have_transparency() {
        let set = SpriteSet::builtin(&Tuning::default());
        assert_ne!(set.bird(Pose::Rising), set.bird(Pose::Falling));
        assert_eq!(set.bird_falling.get(0, 0), KEY_COLOR);
    }

    #[test]
    fn test_load_png_maps_alpha_to_key_color() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bird.png");
        let mut img = image::RgbaImage::new(2, 1);
        img.put_pixel(0, 0, image::Rgba([10, 20, 30, 255]));
        img.put_pixel(1, 0, image::Rgba([0, 0, 0, 0]));
        img.save(&path).unwrap();

        let s = Sprite::load(&path).unwrap();
        assert_eq!(s.get(0, 0), Rgb(10, 20, 30));
        assert_eq!(s.get(1, 0), KEY_COLOR);
    }

    #[test]
    fn test_missing_asset_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = SpriteSet::load(dir.path()).unwrap_err();
        assert!(err.to_string().contains("pipe.png"));
    }
}
