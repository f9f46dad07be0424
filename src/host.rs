use crate::browser;
use crate::config::HostConfig;
use crate::engine::{self, GameLoop, GameModule, Renderer};
use crate::input;
use crate::rocket::RocketModule;
use crate::session::{ClickAction, Session};
use crate::sprite::Sprites;
use anyhow::Result;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use web_sys::{HtmlCanvasElement, MouseEvent};

/// Owns the page side of a play session : the canvas, the run flag and,
/// once the first click has loaded it, the game loop.
pub struct Host {
    canvas: HtmlCanvasElement,
    config: Rc<HostConfig>,
    session: Rc<RefCell<Session>>,
    game_loop: RefCell<Option<GameLoop>>,
}

impl Host {
    pub fn new(config: HostConfig) -> Result<Rc<Self>> {
        let canvas = browser::canvas(&config.canvas_id)?;
        // focusable, so key events reach the canvas
        canvas.set_tab_index(1);
        let laid_out_width = canvas.offset_width();
        if laid_out_width > 0 {
            canvas.set_width(laid_out_width as u32);
        }
        engine::draw_prompt(&canvas, &config)?;

        Ok(Rc::new(Host {
            canvas,
            config: Rc::new(config),
            session: Rc::new(RefCell::new(Session::new())),
            game_loop: RefCell::new(None),
        }))
    }

    pub fn install(self: &Rc<Self>) -> Result<()> {
        let host = self.clone();
        let on_click = Closure::<dyn FnMut(MouseEvent)>::new(move |_evt: MouseEvent| {
            host.on_click();
        });
        browser::add_listener(&self.canvas, "click", on_click)
    }

    fn on_click(self: &Rc<Self>) {
        let action = self.session.borrow_mut().on_click();
        match action {
            ClickAction::StartLoading => {
                log!("Loading {}", self.config.module_url);
                browser::spawn_local(self.clone().load());
            }
            ClickAction::StartLoop => self.resume(),
            ClickAction::Stop => {
                log!("Paused");
            }
            ClickAction::None => {}
        }
    }

    async fn load(self: Rc<Self>) {
        match self.prepare().await {
            Ok(game_loop) => {
                *self.game_loop.borrow_mut() = Some(game_loop);
                let start = self.session.borrow_mut().loaded();
                if start {
                    self.resume();
                }
            }
            Err(err) => {
                error!("Could not start game : {:#?}", err);
                self.session.borrow_mut().load_failed();
            }
        }
    }

    /// Sprites, module, input, initial size : everything the first frame needs
    async fn prepare(&self) -> Result<GameLoop> {
        let sprites = Sprites::rasterize()?;
        let renderer = Rc::new(Renderer::new(
            self.canvas.clone(),
            sprites,
            self.config.clone(),
        )?);
        let (width, height) = renderer.size();

        let module: Rc<dyn GameModule> =
            Rc::new(RocketModule::load(&self.config.module_url, renderer).await?);
        module.resize(width, height)?;
        input::install(&self.canvas, module.clone())?;

        Ok(GameLoop::new(self.session.clone(), module))
    }

    fn resume(&self) {
        let game_loop = self.game_loop.borrow();
        let resumed = match game_loop.as_ref() {
            Some(game_loop) => game_loop.resume(),
            None => Err(anyhow::anyhow!("Game loop started before module loaded")),
        };
        if let Err(err) = resumed {
            error!("{:#?}", err);
            self.session.borrow_mut().halt();
        }
    }
}
