//! Drawing: sprites composed into a 320x200 frame, then scaled onto the
//! terminal with half-block characters.

mod font;
mod frame;
mod sprite;

pub use frame::{Frame, Screen};
pub use sprite::{BlitMode, Flip, KEY_COLOR, Sprite, SpriteSet};

use crate::session::{Session, State};
use crossterm::style::Color as CColor;

// ── Colors ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    const fn lerp(a: Rgb, b: Rgb, t_256: u16) -> Rgb {
        let t = t_256 as i32;
        Rgb(
            (a.0 as i32 + (b.0 as i32 - a.0 as i32) * t / 256) as u8,
            (a.1 as i32 + (b.1 as i32 - a.1 as i32) * t / 256) as u8,
            (a.2 as i32 + (b.2 as i32 - a.2 as i32) * t / 256) as u8,
        )
    }
}

impl From<Rgb> for CColor {
    fn from(c: Rgb) -> Self {
        CColor::Rgb {
            r: c.0,
            g: c.1,
            b: c.2,
        }
    }
}

const SKY_TOP: Rgb = Rgb(70, 180, 200);
const SKY_BOT: Rgb = Rgb(190, 232, 245);
const GRASS: Rgb = Rgb(84, 168, 55);
const GRASS_LIGHT: Rgb = Rgb(110, 200, 70);
const DIRT: Rgb = Rgb(210, 185, 110);
const DIRT_DARK: Rgb = Rgb(185, 160, 90);
const PIPE_L: Rgb = Rgb(74, 122, 26);
const PIPE_M: Rgb = Rgb(100, 170, 40);
const PIPE_R: Rgb = Rgb(115, 191, 46);
const PIPE_HI: Rgb = Rgb(145, 215, 62);
const CAP_DARK: Rgb = Rgb(60, 100, 20);
const BIRD_Y: Rgb = Rgb(245, 200, 66);
const BIRD_HI: Rgb = Rgb(255, 225, 100);
const BIRD_WING: Rgb = Rgb(215, 165, 35);
const BIRD_EYE: Rgb = Rgb(255, 255, 255);
const BIRD_PUPIL: Rgb = Rgb(20, 20, 20);
const BIRD_BEAK: Rgb = Rgb(225, 75, 35);
const BIRD_BEAK_HI: Rgb = Rgb(240, 110, 50);
const HILL_FAR: Rgb = Rgb(120, 195, 75);
const HILL_NEAR: Rgb = Rgb(95, 175, 55);
const WHITE: Rgb = Rgb(255, 255, 255);
const SHADOW: Rgb = Rgb(30, 30, 30);

pub const SCORE_POS: (i32, i32) = (30, 20);
pub const GAME_OVER_POS: (i32, i32) = (124, 50);

// ── Scene ───────────────────────────────────────────────────────────────────

/// Compose the current session into `frame`.
pub fn draw_scene(frame: &mut Frame, session: &Session, sprites: &SpriteSet) {
    // Two copies of the tile side by side fake an endless scroll.
    let bg_x = session.backdrop.pos;
    let bg_w = session.tuning().background_width;
    frame.blit(&sprites.background, bg_x, 0, BlitMode::Normal);
    frame.blit(&sprites.background, bg_x + bg_w, 0, BlitMode::Normal);

    for o in session.pool.iter() {
        frame.blit(&sprites.pipe_lower, o.x, o.lower_edge(), BlitMode::Normal);
        frame.blit(&sprites.pipe_upper, o.x, o.upper_top(), BlitMode::Normal);
    }

    let player = &session.player;
    frame.blit(sprites.bird(player.pose), player.x, player.y, BlitMode::Xray);

    let (sx, sy) = SCORE_POS;
    frame.text(sx, sy, &format!("SCORE : {}", session.score), WHITE);

    if session.state() == State::GameOver {
        let (gx, gy) = GAME_OVER_POS;
        frame.text(gx, gy, "GAME OVER !", WHITE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Tuning;

    fn scene(session: &Session) -> Frame {
        let t = session.tuning();
        let sprites = SpriteSet::builtin(t);
        let mut frame = Frame::new(t.screen_width as usize, t.screen_height as usize);
        draw_scene(&mut frame, session, &sprites);
        frame
    }

    fn count(frame: &Frame, c: Rgb) -> usize {
        (0..frame.height())
            .flat_map(|y| (0..frame.width()).map(move |x| (x, y)))
            .filter(|&(x, y)| frame.get(x, y) == c)
            .count()
    }

    #[test]
    fn test_bird_drawn_without_key_color() {
        let session = Session::new(Tuning::default(), Some(1));
        let frame = scene(&session);
        assert_eq!(count(&frame, KEY_COLOR), 0);
        // Body color appears at the bird's position.
        let found = (100..129).any(|x| (41..64).any(|y| frame.get(x, y) == BIRD_Y));
        assert!(found);
    }

    #[test]
    fn test_game_over_banner_only_when_over() {
        let mut session = Session::new(Tuning::default(), Some(1));
        let playing = scene(&session);
        session.over = 1;
        let over = scene(&session);

        let (gx, gy) = GAME_OVER_POS;
        let banner = |f: &Frame| {
            (gx as usize..gx as usize + 88)
                .any(|x| (gy as usize..gy as usize + 10).any(|y| f.get(x, y) == WHITE))
        };
        assert!(!banner(&playing));
        assert!(banner(&over));
    }

    #[test]
    fn test_pipes_follow_obstacles() {
        let mut session = Session::new(Tuning::default(), Some(1));
        let o = session.pool.get_mut(0).unwrap();
        o.x = 200;
        o.offset = 50;
        let frame = scene(&session);
        // Lower cap top edge and upper cap bottom edge.
        assert_eq!(frame.get(220, 130), CAP_DARK);
        assert_eq!(frame.get(220, 44), CAP_DARK);
    }
}
