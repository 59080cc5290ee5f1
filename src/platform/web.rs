//! Browser collaborators

use web_sys::{CanvasRenderingContext2d, Document, Storage};

use crate::persistence::{KeyValueStore, StoreError};
use crate::renderer::{DrawCommand, DrawSink, viewport};
use crate::ui::{AchievementLog, Hud, HudSnapshot, format_combo};

/// `window.localStorage`
pub struct LocalStore {
    storage: Option<Storage>,
}

impl LocalStore {
    pub fn new() -> Self {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
        if storage.is_none() {
            log::warn!("LocalStorage unavailable - records will not persist");
        }
        Self { storage }
    }

    fn storage(&self) -> Result<&Storage, StoreError> {
        self.storage
            .as_ref()
            .ok_or_else(|| StoreError::Unavailable("localStorage".into()))
    }
}

impl Default for LocalStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.storage()?
            .get_item(key)
            .map_err(|e| StoreError::Unavailable(format!("{:?}", e)))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.storage()?
            .set_item(key, value)
            .map_err(|e| StoreError::Unavailable(format!("{:?}", e)))
    }
}

/// HUD backed by elements with ids `score`, `lives`, `energy`, `multiplier`,
/// `best`, `mostLives` and the `achievements` list
pub struct DomHud {
    document: Option<Document>,
    achievements: AchievementLog,
}

impl DomHud {
    pub fn new() -> Self {
        Self {
            document: web_sys::window().and_then(|w| w.document()),
            achievements: AchievementLog::default(),
        }
    }

    fn set_text(&self, id: &str, text: &str) {
        if let Some(el) = self.document.as_ref().and_then(|d| d.get_element_by_id(id)) {
            el.set_text_content(Some(text));
        }
    }
}

impl Default for DomHud {
    fn default() -> Self {
        Self::new()
    }
}

impl Hud for DomHud {
    fn update(&mut self, snapshot: &HudSnapshot) {
        self.set_text("score", &snapshot.score.to_string());
        self.set_text("lives", &snapshot.shield_lives.to_string());
        self.set_text("energy", &snapshot.energy.to_string());
        self.set_text("multiplier", &format_combo(snapshot.combo));
        self.set_text("best", &snapshot.best_score.to_string());
        self.set_text("mostLives", &snapshot.most_shields.to_string());
    }

    fn achievement(&mut self, title: &str) {
        self.achievements.push(title);
        let Some(document) = &self.document else {
            return;
        };
        let Some(list) = document.get_element_by_id("achievements") else {
            return;
        };
        list.set_inner_html("");
        for line in self.achievements.lines() {
            let Ok(item) = document.create_element("li") else {
                return;
            };
            item.set_text_content(Some(line));
            if list.append_child(&item).is_err() {
                log::warn!("Failed to show achievement {}", title);
                return;
            }
        }
    }

    fn notify(&mut self, message: &str) {
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(message);
        }
    }
}

fn css(color: [f32; 4]) -> String {
    format!(
        "rgba({}, {}, {}, {})",
        (color[0] * 255.0).round() as u8,
        (color[1] * 255.0).round() as u8,
        (color[2] * 255.0).round() as u8,
        color[3]
    )
}

/// Replays draw commands on a 2D canvas context
pub struct CanvasSink<'a> {
    ctx: &'a CanvasRenderingContext2d,
}

impl<'a> CanvasSink<'a> {
    pub fn new(ctx: &'a CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }
}

impl DrawSink for CanvasSink<'_> {
    fn draw(&mut self, command: DrawCommand) {
        let ctx = self.ctx;
        match command {
            DrawCommand::Gradient { top, bottom, alpha } => {
                let size = viewport();
                let gradient = ctx.create_linear_gradient(0.0, 0.0, 0.0, size.y as f64);
                let _ = gradient.add_color_stop(0.0, &css(top));
                let _ = gradient.add_color_stop(1.0, &css(bottom));
                ctx.set_global_alpha(alpha as f64);
                ctx.set_fill_style_canvas_gradient(&gradient);
                ctx.fill_rect(0.0, 0.0, size.x as f64, size.y as f64);
                ctx.set_global_alpha(1.0);
            }
            DrawCommand::Sprite { sprite, pos, size } => {
                ctx.set_fill_style_str(&css(sprite.placeholder()));
                ctx.fill_rect(pos.x as f64, pos.y as f64, size.x as f64, size.y as f64);
            }
            DrawCommand::Ring {
                center,
                radius,
                width,
                color,
            } => {
                ctx.begin_path();
                let _ = ctx.arc(
                    center.x as f64,
                    center.y as f64,
                    radius as f64,
                    0.0,
                    std::f64::consts::TAU,
                );
                ctx.set_stroke_style_str(&css(color));
                ctx.set_line_width(width as f64);
                ctx.stroke();
            }
            DrawCommand::Rect { pos, size, color } => {
                ctx.set_fill_style_str(&css(color));
                ctx.fill_rect(pos.x as f64, pos.y as f64, size.x as f64, size.y as f64);
            }
        }
    }
}
