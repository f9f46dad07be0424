// TABLE:
// ┌──────────┬─────────┬────────────┬──────────────────────────┬──────────┐
// │ Kind     │ Size    │ Colour     │ Shape                    │ Anchor   │
// ├──────────┼─────────┼────────────┼──────────────────────────┼──────────┤
// │ Player   │ 20 x 16 │ red        │ triangle, nose at (20,8) │ (0, 8)   │
// │ Enemy    │ 20 x 20 │ yellow     │ disc r=10                │ centre   │
// │ Bullet   │  6 x 6  │ blue       │ disc r=3                 │ centre   │
// │ Particle │ 20 x 20 │ darkviolet │ disc r=10                │ centre   │
// └──────────┴─────────┴────────────┴──────────────────────────┴──────────┘
// - anchor is the point of the bitmap that lands on the (x, y) the game asks
// us to draw at
pub mod raster;

pub use raster::Sprites;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum SpriteKind {
    Player,
    Enemy,
    Bullet,
    Particle,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Shape {
    Disc { cx: f64, cy: f64, radius: f64 },
    /// closed polygon, traced from the current pen position
    Triangle([(f64, f64); 3]),
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SpriteSpec {
    pub width: u32,
    pub height: u32,
    pub color: &'static str,
    pub shape: Shape,
}

impl SpriteKind {
    pub const ALL: [SpriteKind; 4] = [
        SpriteKind::Player,
        SpriteKind::Enemy,
        SpriteKind::Bullet,
        SpriteKind::Particle,
    ];

    pub fn spec(self) -> SpriteSpec {
        match self {
            SpriteKind::Player => SpriteSpec {
                width: 20,
                height: 16,
                color: "red",
                shape: Shape::Triangle([(20.0, 8.0), (0.0, 16.0), (0.0, 0.0)]),
            },
            SpriteKind::Enemy => SpriteSpec::disc(10, "yellow"),
            SpriteKind::Bullet => SpriteSpec::disc(3, "blue"),
            SpriteKind::Particle => SpriteSpec::disc(10, "darkviolet"),
        }
    }
}

impl SpriteSpec {
    fn disc(radius: u32, color: &'static str) -> Self {
        let r = f64::from(radius);
        SpriteSpec {
            width: radius * 2,
            height: radius * 2,
            color,
            shape: Shape::Disc {
                cx: r,
                cy: r,
                radius: r,
            },
        }
    }

    /// Offset from the sprite's top-left corner to its draw origin
    pub fn anchor(&self) -> (f64, f64) {
        match self.shape {
            // ship rotates around the middle of its tail
            Shape::Triangle(_) => (0.0, f64::from(self.height) / 2.0),
            Shape::Disc { cx, cy, .. } => (cx, cy),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn discs_fill_their_bitmap() {
        for kind in [SpriteKind::Enemy, SpriteKind::Bullet, SpriteKind::Particle] {
            let spec = kind.spec();
            assert_eq!(spec.width, spec.height);
            match spec.shape {
                Shape::Disc { radius, .. } => {
                    assert_relative_eq!(radius * 2.0, f64::from(spec.width))
                }
                other => panic!("{:?} should be a disc, got {:?}", kind, other),
            }
        }
    }

    #[test]
    fn enemy_and_bullet_anchor_at_centre() {
        assert_eq!(SpriteKind::Enemy.spec().anchor(), (10.0, 10.0));
        assert_eq!(SpriteKind::Bullet.spec().anchor(), (3.0, 3.0));
    }

    #[test]
    fn player_anchors_at_tail_midline() {
        let spec = SpriteKind::Player.spec();
        assert_eq!((spec.width, spec.height), (20, 16));
        assert_eq!(spec.anchor(), (0.0, 8.0));
    }

    #[test]
    fn every_kind_has_a_distinct_colour() {
        let mut colours: Vec<_> = SpriteKind::ALL.iter().map(|k| k.spec().color).collect();
        colours.sort_unstable();
        colours.dedup();
        assert_eq!(colours.len(), SpriteKind::ALL.len());
    }
}
