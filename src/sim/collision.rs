//! Collision predicates between the bird and the play field
//!
//! The bird is a circle but is tested against pipes as its bounding box,
//! matching the way the field is drawn (rectangles above and below the gap).

use super::state::{Bird, Coin, Pipe};
use crate::consts::GROUND_Y;

/// Check if the bird touches either pipe segment
///
/// True when the horizontal extents overlap and the bird's vertical extent
/// does not fit entirely inside the gap.
pub fn bird_pipe_collision(bird: &Bird, pipe: &Pipe) -> bool {
    let overlaps_x = bird.right() > pipe.x && bird.left() < pipe.trailing_edge();
    let outside_gap = bird.top() < pipe.gap_y || bird.bottom() > pipe.gap_bottom();
    overlaps_x && outside_gap
}

/// Check if the bird reached the ground strip
pub fn bird_ground_collision(bird: &Bird) -> bool {
    bird.bottom() >= GROUND_Y
}

/// Check if the bird touched the top of the field
pub fn bird_ceiling_collision(bird: &Bird) -> bool {
    bird.top() <= 0.0
}

/// Check if the bird is close enough to pick up a coin
pub fn bird_coin_pickup(bird: &Bird, coin: &Coin) -> bool {
    bird.pos.distance(coin.pos) < bird.radius + coin.radius
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn bird_at(x: f32, y: f32) -> Bird {
        Bird {
            pos: Vec2::new(x, y),
            ..Bird::default()
        }
    }

    #[test]
    fn test_bird_inside_gap_is_safe() {
        let pipe = Pipe::new(100.0, 100.0, 150.0);
        // Gap spans 100..250, bird spans 155..195
        assert!(!bird_pipe_collision(&bird_at(130.0, 175.0), &pipe));
    }

    #[test]
    fn test_bird_clipping_top_segment() {
        let pipe = Pipe::new(100.0, 100.0, 150.0);
        assert!(bird_pipe_collision(&bird_at(130.0, 110.0), &pipe));
    }

    #[test]
    fn test_bird_clipping_bottom_segment() {
        let pipe = Pipe::new(100.0, 100.0, 150.0);
        assert!(bird_pipe_collision(&bird_at(130.0, 240.0), &pipe));
    }

    #[test]
    fn test_bird_clear_of_pipe_horizontally() {
        let pipe = Pipe::new(100.0, 100.0, 150.0);
        // Right edge at 80 never reaches pipe.x = 100
        assert!(!bird_pipe_collision(&bird_at(60.0, 20.0), &pipe));
        // Left edge at 175 is beyond the trailing edge (174)
        assert!(!bird_pipe_collision(&bird_at(195.0, 20.0), &pipe));
    }

    #[test]
    fn test_ground_and_ceiling() {
        assert!(!bird_ground_collision(&bird_at(130.0, 200.0)));
        assert!(bird_ground_collision(&bird_at(130.0, GROUND_Y - 20.0)));
        assert!(bird_ceiling_collision(&bird_at(130.0, 20.0)));
        assert!(!bird_ceiling_collision(&bird_at(130.0, 21.0)));
    }

    #[test]
    fn test_coin_pickup_radius() {
        let bird = bird_at(100.0, 100.0);
        assert!(bird_coin_pickup(&bird, &Coin::new(Vec2::new(129.0, 100.0))));
        assert!(!bird_coin_pickup(&bird, &Coin::new(Vec2::new(130.0, 100.0))));
    }
}
