//! Frame description
//!
//! `render` walks the post-tick state and emits a flat draw list in paint
//! order. It never mutates state. Hosts either replay the list on a 2D canvas
//! (`platform::web`) or tessellate it into vertices with [`shapes::tessellate`].

pub mod shapes;
pub mod vertex;

use glam::Vec2;

use crate::consts::{LASER_H, LASER_W, LOGICAL_H, LOGICAL_W};
use crate::sim::{Faller, GameState, Particle};
use vertex::{colors, rgb};

/// Sprite slots. Image assets are out of scope; each slot carries the flat
/// color used when its image is unavailable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sprite {
    Critter,
    Meteor,
    Star,
    Shield,
    Laser,
    Token,
    Sidekick,
}

impl Sprite {
    pub fn placeholder(&self) -> [f32; 4] {
        match self {
            Sprite::Critter => colors::CRITTER,
            Sprite::Meteor => colors::METEOR,
            Sprite::Star => colors::STAR,
            Sprite::Shield => colors::SHIELD,
            Sprite::Laser => colors::LASER,
            Sprite::Token => colors::TOKEN,
            Sprite::Sidekick => colors::SIDEKICK,
        }
    }
}

/// One paint operation in logical coordinates (400 x 600, y down)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    /// Full-screen vertical gradient
    Gradient {
        top: [f32; 4],
        bottom: [f32; 4],
        alpha: f32,
    },
    Sprite {
        sprite: Sprite,
        pos: Vec2,
        size: Vec2,
    },
    /// Stroked circle
    Ring {
        center: Vec2,
        radius: f32,
        width: f32,
        color: [f32; 4],
    },
    /// Filled rectangle; alpha is in `color`
    Rect {
        pos: Vec2,
        size: Vec2,
        color: [f32; 4],
    },
}

/// Receiver for draw commands
pub trait DrawSink {
    fn draw(&mut self, command: DrawCommand);
}

impl DrawSink for Vec<DrawCommand> {
    fn draw(&mut self, command: DrawCommand) {
        self.push(command);
    }
}

/// Background gradient (top, bottom) for a zone
pub fn zone_palette(zone: u8) -> ([f32; 4], [f32; 4]) {
    match zone {
        0 | 1 => (rgb(0x020024, 1.0), rgb(0x090979, 1.0)),
        2 => (rgb(0x002B33, 1.0), rgb(0x004466, 1.0)),
        _ => (rgb(0x2B0033, 1.0), rgb(0x660044, 1.0)),
    }
}

/// Side length of a particle square
pub const PARTICLE_SIZE: f32 = 3.0;
/// Shield ring around the player
pub const SHIELD_RING_RADIUS: f32 = 20.0;
pub const SHIELD_RING_WIDTH: f32 = 2.0;
/// Parallax tint opacity
pub const TINT_ALPHA: f32 = 0.2;

/// Emit the whole frame into `sink`
pub fn render(state: &GameState, sink: &mut dyn DrawSink) {
    let (top, bottom) = zone_palette(state.zone);
    sink.draw(DrawCommand::Gradient {
        top,
        bottom,
        alpha: 1.0,
    });
    sink.draw(DrawCommand::Gradient {
        top: colors::TINT_TOP,
        bottom: colors::TINT_BOTTOM,
        alpha: TINT_ALPHA,
    });

    let player = &state.player;
    sink.draw(DrawCommand::Sprite {
        sprite: Sprite::Critter,
        pos: player.pos,
        size: player.size,
    });
    if state.shield_lives > 0 {
        sink.draw(DrawCommand::Ring {
            center: player.center(),
            radius: SHIELD_RING_RADIUS,
            width: SHIELD_RING_WIDTH,
            color: colors::SHIELD,
        });
    }

    if let Some(companion) = &state.companion {
        let bounds = companion.bounds();
        sink.draw(DrawCommand::Sprite {
            sprite: Sprite::Sidekick,
            pos: bounds.pos,
            size: bounds.size,
        });
    }

    fallers(sink, Sprite::Meteor, &state.meteors);
    fallers(sink, Sprite::Star, &state.stars);
    fallers(sink, Sprite::Shield, &state.shields);
    fallers(sink, Sprite::Token, &state.tokens);

    for laser in &state.lasers {
        sink.draw(DrawCommand::Sprite {
            sprite: Sprite::Laser,
            pos: laser.pos,
            size: Vec2::new(LASER_W, LASER_H),
        });
    }

    for particle in &state.particles {
        sink.draw(particle_rect(particle, state.tuning.particle_ttl));
    }
}

fn fallers(sink: &mut dyn DrawSink, sprite: Sprite, entities: &[Faller]) {
    for entity in entities {
        sink.draw(DrawCommand::Sprite {
            sprite,
            pos: entity.pos,
            size: Vec2::splat(entity.size),
        });
    }
}

fn particle_rect(particle: &Particle, full_ttl: u32) -> DrawCommand {
    let alpha = if full_ttl == 0 {
        0.0
    } else {
        (particle.ttl as f32 / full_ttl as f32).clamp(0.0, 1.0)
    };
    DrawCommand::Rect {
        pos: particle.pos,
        size: Vec2::splat(PARTICLE_SIZE),
        color: rgb(particle.color, alpha),
    }
}

/// Logical viewport size
pub fn viewport() -> Vec2 {
    Vec2::new(LOGICAL_W, LOGICAL_H)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::Records;
    use crate::sim::{Companion, Laser, Owner, Tuning};

    fn state() -> GameState {
        GameState::new(3, Tuning::default(), Records::default())
    }

    #[test]
    fn test_empty_frame_is_background_and_player() {
        let mut list = Vec::new();
        render(&state(), &mut list);
        assert_eq!(list.len(), 3);
        assert!(matches!(list[0], DrawCommand::Gradient { alpha, .. } if alpha == 1.0));
        assert!(matches!(list[1], DrawCommand::Gradient { alpha, .. } if alpha == TINT_ALPHA));
        assert!(matches!(
            list[2],
            DrawCommand::Sprite {
                sprite: Sprite::Critter,
                ..
            }
        ));
    }

    #[test]
    fn test_paint_order() {
        let mut s = state();
        s.shield_lives = 1;
        s.companion = Some(Companion {
            pos: Vec2::new(100.0, 500.0),
            next_shot_ms: 0.0,
        });
        s.meteors.push(Faller::new(10.0, 10.0, 32.0, 3.0));
        s.stars.push(Faller::new(20.0, 10.0, 20.0, 2.0));
        s.shields.push(Faller::new(30.0, 10.0, 22.0, 1.8));
        s.tokens.push(Faller::new(40.0, 10.0, 24.0, 2.0));
        s.lasers.push(Laser {
            pos: Vec2::new(50.0, 300.0),
            vel_y: -10.0,
            owner: Owner::Player,
        });
        s.particles.push(Particle {
            pos: Vec2::new(60.0, 60.0),
            vel: Vec2::ZERO,
            ttl: 15,
            color: 0xFFFF00,
        });

        let mut list = Vec::new();
        render(&s, &mut list);
        let sprites: Vec<Sprite> = list
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Sprite { sprite, .. } => Some(*sprite),
                _ => None,
            })
            .collect();
        assert_eq!(
            sprites,
            vec![
                Sprite::Critter,
                Sprite::Sidekick,
                Sprite::Meteor,
                Sprite::Star,
                Sprite::Shield,
                Sprite::Token,
                Sprite::Laser,
            ]
        );
        assert!(matches!(list[3], DrawCommand::Ring { radius, .. } if radius == 20.0));
        match list.last() {
            Some(DrawCommand::Rect { color, size, .. }) => {
                assert_eq!(*size, Vec2::splat(3.0));
                assert!((color[3] - 0.5).abs() < 1e-6);
            }
            other => panic!("expected particle rect, got {:?}", other),
        }
    }

    #[test]
    fn test_render_does_not_mutate() {
        let mut s = state();
        s.meteors.push(Faller::new(10.0, 10.0, 32.0, 3.0));
        let before = s.meteors.clone();
        render(&s, &mut Vec::new());
        assert_eq!(s.meteors, before);
    }

    #[test]
    fn test_zone_palettes_differ() {
        assert_ne!(zone_palette(1), zone_palette(2));
        assert_ne!(zone_palette(2), zone_palette(3));
        assert_eq!(zone_palette(1).0, rgb(0x020024, 1.0));
    }
}
