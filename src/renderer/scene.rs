//! Scene description for 2D renderers
//!
//! Turns a round into an ordered list of draw commands. Pure: reading the
//! round never changes it, so any backend (canvas, tests, a terminal) can
//! replay the same frame.

use crate::consts::{BASE_HEIGHT, BASE_WIDTH, GROUND_HEIGHT};
use crate::economy::Skin;
use crate::sim::RoundState;

const SKY_TOP: &str = "#0f172a";
const SKY_BOTTOM: &str = "#040710";
const PIPE_BODY: &str = "#113e26";
const PIPE_LIP: &str = "#0c643d";
const COIN_FILL: &str = "#ffd166";
const COIN_OUTLINE: &str = "rgba(255, 255, 255, 0.4)";
const GROUND: &str = "#0b111f";
const GROUND_EDGE: &str = "#141c2e";

/// Height of the lighter strip on top of the ground
const GROUND_EDGE_HEIGHT: f32 = 8.0;
const LIP_INSET: f32 = 10.0;
const LIP_HEIGHT: f32 = 12.0;

/// A single 2D drawing primitive
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    /// Wipe the whole field
    Clear,
    /// Full-field vertical gradient
    VerticalGradient { top: &'static str, bottom: &'static str },
    Rect {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        color: &'static str,
    },
    Circle {
        x: f32,
        y: f32,
        r: f32,
        fill: &'static str,
        outline: Option<(&'static str, f32)>,
    },
    /// Axis-aligned ellipse in the current transform
    Ellipse {
        x: f32,
        y: f32,
        rx: f32,
        ry: f32,
        color: &'static str,
    },
    /// Translate then rotate; paired with `PopTransform`
    PushTransform { x: f32, y: f32, angle: f32 },
    PopTransform,
}

/// Build the frame for `round` with the bird painted in `skin`
pub fn build_scene(round: &RoundState, skin: &Skin) -> Vec<DrawCmd> {
    let mut cmds = Vec::with_capacity(8 + round.pipes.len() * 3 + round.coins.len());

    cmds.push(DrawCmd::Clear);
    cmds.push(DrawCmd::VerticalGradient {
        top: SKY_TOP,
        bottom: SKY_BOTTOM,
    });

    for pipe in &round.pipes {
        let bottom_y = pipe.gap_bottom();
        cmds.push(DrawCmd::Rect {
            x: pipe.x,
            y: 0.0,
            w: pipe.width,
            h: pipe.gap_y,
            color: PIPE_BODY,
        });
        cmds.push(DrawCmd::Rect {
            x: pipe.x,
            y: bottom_y,
            w: pipe.width,
            h: BASE_HEIGHT - bottom_y - GROUND_HEIGHT,
            color: PIPE_BODY,
        });
        cmds.push(DrawCmd::Rect {
            x: pipe.x + LIP_INSET,
            y: bottom_y,
            w: pipe.width - LIP_INSET * 2.0,
            h: LIP_HEIGHT,
            color: PIPE_LIP,
        });
    }

    for coin in &round.coins {
        cmds.push(DrawCmd::Circle {
            x: coin.pos.x,
            y: coin.pos.y,
            r: coin.radius,
            fill: COIN_FILL,
            outline: Some((COIN_OUTLINE, 2.0)),
        });
    }

    let bird = &round.bird;
    let r = bird.radius;
    cmds.push(DrawCmd::PushTransform {
        x: bird.pos.x,
        y: bird.pos.y,
        angle: bird.tilt(),
    });
    cmds.push(DrawCmd::Ellipse {
        x: 0.0,
        y: 0.0,
        rx: r * 1.1,
        ry: r,
        color: skin.primary,
    });
    cmds.push(DrawCmd::Ellipse {
        x: r * 0.3,
        y: -r * 0.3,
        rx: r * 0.5,
        ry: r * 0.4,
        color: skin.secondary,
    });
    cmds.push(DrawCmd::PopTransform);

    cmds.push(DrawCmd::Rect {
        x: 0.0,
        y: BASE_HEIGHT - GROUND_HEIGHT,
        w: BASE_WIDTH,
        h: GROUND_HEIGHT,
        color: GROUND,
    });
    cmds.push(DrawCmd::Rect {
        x: 0.0,
        y: BASE_HEIGHT - GROUND_HEIGHT - GROUND_EDGE_HEIGHT,
        w: BASE_WIDTH,
        h: GROUND_EDGE_HEIGHT,
        color: GROUND_EDGE,
    });

    cmds
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::economy::SKINS;
    use crate::sim::{Coin, Pipe};
    use glam::Vec2;

    #[test]
    fn test_empty_round_scene() {
        let round = RoundState::new(1);
        let cmds = build_scene(&round, &SKINS[0]);
        // clear, sky, bird (push, body, eye, pop), ground x2
        assert_eq!(cmds.len(), 8);
        assert_eq!(cmds[0], DrawCmd::Clear);
        assert!(matches!(cmds[2], DrawCmd::PushTransform { angle, .. } if angle == 0.0));
        assert!(matches!(cmds[3], DrawCmd::Ellipse { color: "#ff4b4b", .. }));
        assert!(matches!(cmds[4], DrawCmd::Ellipse { color: "#ffd8d8", .. }));
    }

    #[test]
    fn test_pipe_segments_frame_the_gap() {
        let mut round = RoundState::new(1);
        round.pipes.push(Pipe::new(300.0, 100.0, 150.0));
        round.coins.push(Coin::new(Vec2::new(337.0, 175.0)));

        let cmds = build_scene(&round, &SKINS[1]);

        assert_eq!(cmds.len(), 8 + 3 + 1);
        assert_eq!(
            cmds[2],
            DrawCmd::Rect { x: 300.0, y: 0.0, w: 74.0, h: 100.0, color: PIPE_BODY }
        );
        assert_eq!(
            cmds[3],
            DrawCmd::Rect {
                x: 300.0,
                y: 250.0,
                w: 74.0,
                h: BASE_HEIGHT - 250.0 - GROUND_HEIGHT,
                color: PIPE_BODY,
            }
        );
        assert!(matches!(cmds[5], DrawCmd::Circle { r, .. } if r == 10.0));
    }

    #[test]
    fn test_scene_does_not_mutate_round() {
        let mut round = RoundState::new(3);
        round.bird.velocity = 4.0;
        let before = round.bird.clone();
        let cmds = build_scene(&round, &SKINS[5]);
        assert_eq!(round.bird, before);
        assert!(cmds.contains(&DrawCmd::PushTransform {
            x: before.pos.x,
            y: before.pos.y,
            angle: before.tilt(),
        }));
    }
}
