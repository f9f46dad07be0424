use super::{Shape, SpriteKind, SpriteSpec};
use crate::browser;
use anyhow::{anyhow, Result};
use std::f64::consts::PI;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// The four offscreen bitmaps the game draws with.
/// Built once, on first activation, and then only ever blitted.
pub struct Sprites {
    pub player: HtmlCanvasElement,
    pub enemy: HtmlCanvasElement,
    pub bullet: HtmlCanvasElement,
    pub particle: HtmlCanvasElement,
}

impl Sprites {
    pub fn rasterize() -> Result<Self> {
        Ok(Sprites {
            player: rasterize(SpriteKind::Player.spec())?,
            enemy: rasterize(SpriteKind::Enemy.spec())?,
            bullet: rasterize(SpriteKind::Bullet.spec())?,
            particle: rasterize(SpriteKind::Particle.spec())?,
        })
    }

    pub fn get(&self, kind: SpriteKind) -> &HtmlCanvasElement {
        match kind {
            SpriteKind::Player => &self.player,
            SpriteKind::Enemy => &self.enemy,
            SpriteKind::Bullet => &self.bullet,
            SpriteKind::Particle => &self.particle,
        }
    }
}

fn rasterize(spec: SpriteSpec) -> Result<HtmlCanvasElement> {
    let canvas = browser::create_canvas(spec.width, spec.height)?;
    let context = browser::context(&canvas)?;
    context.set_fill_style_str(spec.color);
    context.begin_path();
    trace(&context, spec.shape)?;
    context.fill();
    Ok(canvas)
}

fn trace(context: &CanvasRenderingContext2d, shape: Shape) -> Result<()> {
    match shape {
        Shape::Disc { cx, cy, radius } => context
            .arc(cx, cy, radius, 0.0, 2.0 * PI)
            .map_err(|err| anyhow!("Could not trace sprite arc : {:#?}", err)),
        Shape::Triangle(points) => {
            // an empty path treats the first line_to as a move_to
            for (x, y) in points {
                context.line_to(x, y);
            }
            Ok(())
        }
    }
}
