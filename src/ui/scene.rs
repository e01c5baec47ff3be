use std::time::Duration;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use crate::effects::Scene;

const SKY: Color = Color::Rgb(22, 24, 58);
const BUILDING: Color = Color::Rgb(38, 36, 70);
const LIT_WINDOW: Color = Color::Rgb(250, 204, 120);
const WALL: Color = Color::Rgb(52, 40, 60);
const DESK: Color = Color::Rgb(96, 64, 48);
const CUP: Color = Color::Rgb(230, 220, 205);
const GLOW: Color = Color::Rgb(255, 196, 150);

/// Building heights (in cells) of the skyline, repeated across the width.
const SKYLINE: [u16; 12] = [3, 5, 4, 7, 2, 6, 8, 4, 5, 3, 6, 4];
const BUILDING_WIDTH: u16 = 4;

const CUP_ART: [&str; 4] = ["┌───┐ ", "│▒▒▒├╮", "│   ├╯", "└───┘ "];

/// The window, the skyline behind it and the desk in front of it, with all
/// the ambient effects placed at animation time `at`.
pub struct SceneWidget<'a> {
    pub scene: &'a Scene,
    pub at: Duration,
}

impl Widget for SceneWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 8 || area.height < 8 {
            return;
        }

        let sky = Rect {
            height: area.height * 3 / 5,
            ..area
        };
        let room = Rect {
            y: sky.bottom(),
            height: area.height - sky.height,
            ..area
        };

        buf.set_style(sky, Style::default().bg(SKY));
        buf.set_style(room, Style::default().bg(WALL));

        self.render_stars(sky, buf);
        render_skyline(sky, buf);
        self.render_rain(sky, buf);
        let cup = render_desk(room, buf);
        self.render_steam(area, cup, buf);
        self.render_particles(area, buf);
    }
}

impl SceneWidget<'_> {
    fn render_stars(&self, sky: Rect, buf: &mut Buffer) {
        let max_building = SKYLINE.iter().copied().max().unwrap_or(0);
        let band = sky.height.saturating_sub(max_building).max(1);
        for star in &self.scene.stars {
            let brightness = star.brightness(self.at);
            if brightness < 0.25 {
                continue;
            }
            let x = sky.x + scale(star.left, sky.width);
            let y = sky.y + scale(star.top, band);
            let (symbol, color) = if brightness > 0.6 {
                (if star.size >= 3.0 { "✦" } else { "·" }, Color::White)
            } else {
                ("·", Color::Gray)
            };
            put(buf, sky, x, y, symbol, color);
        }
    }

    fn render_rain(&self, sky: Rect, buf: &mut Buffer) {
        for drop in &self.scene.rain {
            let Some(progress) = drop.fall_progress(self.at) else {
                continue;
            };
            let len = (drop.length / 10.0).round().max(1.0) as i32;
            let travel = i32::from(sky.height) + len;
            let head = (progress * f64::from(travel)) as i32 - len;
            let x = sky.x + scale(drop.left, sky.width);
            let color = if drop.opacity > 0.25 {
                Color::Gray
            } else {
                Color::DarkGray
            };
            for dy in 0..len {
                let y = head + dy;
                if y >= 0 {
                    put(buf, sky, x, sky.y + y as u16, "│", color);
                }
            }
        }
    }

    fn render_steam(&self, area: Rect, cup: Option<(u16, u16)>, buf: &mut Buffer) {
        let Some((cup_x, cup_top)) = cup else {
            return;
        };
        for puff in self.scene.steam.puffs() {
            let age = puff.age(self.at);
            let rise = (age * 4.0).round() as u16 + 1;
            let Some(y) = cup_top.checked_sub(rise) else {
                continue;
            };
            let drift = (puff.offset / 5.0 * 2.0).round() as i32;
            let x = i32::from(cup_x) + 2 + drift;
            if x < 0 {
                continue;
            }
            let (symbol, color) = if age < 0.5 {
                ("~", Color::Gray)
            } else {
                ("∙", Color::DarkGray)
            };
            put(buf, area, x as u16, y, symbol, color);
        }
    }

    fn render_particles(&self, area: Rect, buf: &mut Buffer) {
        for particle in &self.scene.particles {
            let Some(progress) = particle.rise_progress(self.at) else {
                continue;
            };
            let x = area.x + scale(particle.left, area.width);
            let climbed = (progress * f64::from(area.height)) as u16;
            let y = area.bottom().saturating_sub(1 + climbed);
            let symbol = if particle.size < 4.0 { "·" } else { "•" };
            put(buf, area, x, y, symbol, GLOW);
        }
    }
}

fn render_skyline(sky: Rect, buf: &mut Buffer) {
    for x in sky.left()..sky.right() {
        let column = (x - sky.x) / BUILDING_WIDTH;
        let height = SKYLINE[usize::from(column) % SKYLINE.len()].min(sky.height);
        for y in sky.bottom() - height..sky.bottom() {
            let lit = (u32::from(x) * 31 + u32::from(y) * 17) % 7 == 0;
            if lit {
                put(buf, sky, x, y, "▪", LIT_WINDOW);
            } else {
                put(buf, sky, x, y, "█", BUILDING);
            }
        }
    }
}

/// Draw the desk and the cup. Returns the cup's left column and top row.
fn render_desk(room: Rect, buf: &mut Buffer) -> Option<(u16, u16)> {
    let desk_y = room.bottom().checked_sub(1)?;
    for x in room.left()..room.right() {
        put(buf, room, x, desk_y, "▀", DESK);
    }

    let cup_width = CUP_ART[0].chars().count() as u16;
    let cup_height = CUP_ART.len() as u16;
    if room.height < cup_height + 1 || room.width < cup_width + 4 {
        return None;
    }
    let cup_x = room.right() - cup_width - 4;
    let cup_top = desk_y - cup_height;
    for (row, line) in CUP_ART.iter().enumerate() {
        buf.set_string(cup_x, cup_top + row as u16, line, Style::default().fg(CUP));
    }
    Some((cup_x, cup_top))
}

/// Map a percentage onto `0..len` cells.
fn scale(percent: f64, len: u16) -> u16 {
    let cell = (percent / 100.0 * f64::from(len)) as u16;
    cell.min(len.saturating_sub(1))
}

fn put(buf: &mut Buffer, clip: Rect, x: u16, y: u16, symbol: &str, fg: Color) {
    if x < clip.left() || x >= clip.right() || y < clip.top() || y >= clip.bottom() {
        return;
    }
    if let Some(cell) = buf.cell_mut((x, y)) {
        cell.set_symbol(symbol).set_fg(fg);
    }
}
