use crate::browser::{self, LoopClosure};
use crate::config::HostConfig;
use crate::input::Control;
use crate::session::Session;
use crate::sprite::{SpriteKind, Sprites};
use anyhow::{anyhow, Result};
// ELI5: web assembly is a single threaded environment, so Rc RefCell > Mutex
use std::cell::RefCell;
use std::rc::Rc;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// Exports of the game binary, as seen by the host.
/// Everything gameplay related happens on the other side of this trait.
pub trait GameModule {
    fn update(&self, delta_seconds: f64) -> Result<()>;
    fn draw(&self) -> Result<()>;
    fn resize(&self, width: u32, height: u32) -> Result<()>;
    fn toggle(&self, control: Control, pressed: bool) -> Result<()>;
}

// ==================== Frame Timing ====================
/// Turns animation frame timestamps (milliseconds) into update deltas
/// (seconds). The first tick after a (re)start only records where we are.
#[derive(Debug, Default, Clone, Copy)]
pub struct FrameClock {
    last_frame: Option<f64>,
}

impl FrameClock {
    pub fn tick(&mut self, timestamp: f64) -> Option<f64> {
        let delta = self
            .last_frame
            .map(|last| ((timestamp - last) / 1000.0).max(0.0));
        self.last_frame = Some(timestamp);
        delta
    }

    pub fn reset(&mut self) {
        self.last_frame = None;
    }
}

// ==================== Game Loop ====================
type SharedLoopClosure = Rc<RefCell<Option<LoopClosure>>>;

/// One animation callback for the whole session. Pausing lets the callback
/// fall through without rescheduling, resuming requests it again.
pub struct GameLoop {
    frame: SharedLoopClosure,
    session: Rc<RefCell<Session>>,
}

impl GameLoop {
    pub fn new(session: Rc<RefCell<Session>>, module: Rc<dyn GameModule>) -> Self {
        let f: SharedLoopClosure = Rc::new(RefCell::new(None));
        let g = f.clone();
        let loop_session = session.clone();
        let mut clock = FrameClock::default();

        *g.borrow_mut() = Some(browser::create_raf_closure(move |perf: f64| {
            // cancellation point : run flag is checked before anything else
            if !loop_session.borrow().is_running() {
                clock.reset();
                loop_session.borrow_mut().frame_ended();
                return;
            }

            if let Some(delta) = clock.tick(perf) {
                if let Err(err) = module.update(delta).and_then(|_| module.draw()) {
                    error!("Game module failed, stopping : {:#?}", err);
                    clock.reset();
                    loop_session.borrow_mut().halt();
                    return;
                }
            }

            let scheduled = match f.borrow().as_ref() {
                Some(closure) => browser::request_animation_frame(closure),
                None => Err(anyhow!("GameLoop: Loop is None")),
            };
            if let Err(err) = scheduled {
                error!("{:#?}", err);
                clock.reset();
                loop_session.borrow_mut().halt();
            }
        }));

        GameLoop { frame: g, session }
    }

    pub fn resume(&self) -> Result<()> {
        self.session.borrow_mut().frame_scheduled();
        let frame = self.frame.borrow();
        let closure = frame
            .as_ref()
            .ok_or_else(|| anyhow!("GameLoop: Loop is None"))?;
        browser::request_animation_frame(closure).map_err(|err| {
            self.session.borrow_mut().frame_ended();
            err
        })?;
        Ok(())
    }
}

// ==================== Rendering ====================
/// Title screen shown before the first click
pub fn draw_prompt(canvas: &HtmlCanvasElement, config: &HostConfig) -> Result<()> {
    let context = browser::context(canvas)?;
    fill_background(&context, canvas, &config.background);
    context.set_fill_style_str(&config.text_color);
    context.set_text_baseline("top");
    context.set_font(&config.prompt_font);
    let (x, y) = config.prompt_position;
    context
        .fill_text(&config.prompt_text, x, y)
        .map_err(|err| anyhow!("Could not draw prompt : {:#?}", err))
}

fn fill_background(context: &CanvasRenderingContext2d, canvas: &HtmlCanvasElement, color: &str) {
    context.set_fill_style_str(color);
    context.fill_rect(
        0.0,
        0.0,
        f64::from(canvas.width()),
        f64::from(canvas.height()),
    );
}

/// Draw calls the game binary makes back into the host
pub struct Renderer {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
    sprites: Sprites,
    config: Rc<HostConfig>,
}

impl Renderer {
    pub fn new(canvas: HtmlCanvasElement, sprites: Sprites, config: Rc<HostConfig>) -> Result<Self> {
        let context = browser::context(&canvas)?;
        Ok(Renderer {
            canvas,
            context,
            sprites,
            config,
        })
    }

    pub fn size(&self) -> (u32, u32) {
        (self.canvas.width(), self.canvas.height())
    }

    pub fn clear_screen(&self) {
        fill_background(&self.context, &self.canvas, &self.config.background);
    }

    pub fn draw_player(&self, x: f64, y: f64, angle: f64) -> Result<()> {
        let (anchor_x, anchor_y) = SpriteKind::Player.spec().anchor();
        let drawn = self
            .context
            .translate(x, y)
            .and_then(|_| self.context.rotate(angle))
            .and_then(|_| self.context.translate(-anchor_x, -anchor_y))
            .and_then(|_| {
                self.context
                    .draw_image_with_html_canvas_element(&self.sprites.player, 0.0, 0.0)
            });
        // identity, even if the blit failed half way
        let reset = self.context.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);
        self.context.set_fill_style_str(&self.config.background);
        drawn
            .and(reset)
            .map_err(|err| anyhow!("Could not draw player : {:#?}", err))
    }

    pub fn draw_enemy(&self, x: f64, y: f64) -> Result<()> {
        self.blit_centered(SpriteKind::Enemy, x, y)
    }

    pub fn draw_bullet(&self, x: f64, y: f64) -> Result<()> {
        self.blit_centered(SpriteKind::Bullet, x, y)
    }

    /// Particles shrink as they age, so the bitmap is scaled to 2r x 2r
    pub fn draw_particle(&self, x: f64, y: f64, radius: f64) -> Result<()> {
        self.context
            .draw_image_with_html_canvas_element_and_dw_and_dh(
                &self.sprites.particle,
                x - radius,
                y - radius,
                2.0 * radius,
                2.0 * radius,
            )
            .map_err(|err| anyhow!("Could not draw particle : {:#?}", err))
    }

    pub fn draw_score(&self, score: f64) -> Result<()> {
        self.context.set_fill_style_str(&self.config.text_color);
        self.context.set_text_baseline("top");
        self.context.set_font(&self.config.score_font);
        let (x, y) = self.config.score_position;
        self.context
            .fill_text(&score_text(score), x, y)
            .map_err(|err| anyhow!("Could not draw score : {:#?}", err))
    }

    fn blit_centered(&self, kind: SpriteKind, x: f64, y: f64) -> Result<()> {
        let (anchor_x, anchor_y) = kind.spec().anchor();
        self.context
            .draw_image_with_html_canvas_element(self.sprites.get(kind), x - anchor_x, y - anchor_y)
            .map_err(|err| anyhow!("Could not draw {:?} : {:#?}", kind, err))
    }
}

pub fn score_text(score: f64) -> String {
    format!("Score: {}", score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn score_text_drops_trailing_zero_fraction() {
        // the module hands scores over as f64
        assert_eq!(score_text(42.0), "Score: 42");
        assert_eq!(score_text(0.0), "Score: 0");
    }

    #[test]
    fn first_tick_only_records_timestamp() {
        let mut clock = FrameClock::default();
        assert_eq!(clock.tick(1234.5), None);
    }

    #[test]
    fn delta_is_measured_in_seconds() {
        let mut clock = FrameClock::default();
        clock.tick(1000.0);
        assert_relative_eq!(clock.tick(1016.0).unwrap_or_default(), 0.016);
        assert_relative_eq!(clock.tick(1516.0).unwrap_or_default(), 0.5);
    }

    #[test]
    fn delta_never_goes_negative() {
        let mut clock = FrameClock::default();
        clock.tick(2000.0);
        assert_eq!(clock.tick(1990.0), Some(0.0));
    }

    #[test]
    fn reset_forgets_time_spent_paused() {
        let mut clock = FrameClock::default();
        clock.tick(100.0);
        clock.tick(116.0);
        clock.reset();
        assert_eq!(clock.tick(90_000.0), None);
        assert_relative_eq!(clock.tick(90_020.0).unwrap_or_default(), 0.02);
    }
}
