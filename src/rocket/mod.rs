// ┌────────── Host <-> Game Binary ──────────────────────────────────────┐
// │                                                                      │
// │   host (this crate)                          rocket.wasm             │
// │   ┌──────────────┐   env.clear_screen ...   ┌──────────────┐         │
// │   │ HostImports  ├─────────────────────────►│   imports    │         │
// │   │  Renderer    │   env.Math_atan/sin/cos  │              │         │
// │   └──────────────┘                          │              │         │
// │   ┌──────────────┐   update(dt) draw()      │              │         │
// │   │   Exports    │◄─────────────────────────┤   exports    │         │
// │   │ (GameModule) │   resize(w,h) toggle_*(b)│              │         │
// │   └──────────────┘                          └──────────────┘         │
// └──────────────────────────────────────────────────────────────────────┘
pub mod imports;

use crate::browser;
use crate::engine::{GameModule, Renderer};
use crate::input::Control;
use anyhow::{anyhow, Context, Result};
use imports::HostImports;
use js_sys::{Function, Object, Reflect, WebAssembly};
use std::rc::Rc;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

pub struct Exports {
    update: Function,
    draw: Function,
    resize: Function,
    toggle_shoot: Function,
    toggle_boost: Function,
    toggle_turn_left: Function,
    toggle_turn_right: Function,
}

impl Exports {
    /// `exports` is `instance.exports`, or anything shaped like it
    pub fn resolve(exports: &Object) -> Result<Self> {
        Ok(Exports {
            update: export(exports, "update")?,
            draw: export(exports, "draw")?,
            resize: export(exports, "resize")?,
            toggle_shoot: export(exports, Control::Shoot.export_name())?,
            toggle_boost: export(exports, Control::Boost.export_name())?,
            toggle_turn_left: export(exports, Control::TurnLeft.export_name())?,
            toggle_turn_right: export(exports, Control::TurnRight.export_name())?,
        })
    }

    fn toggle_fn(&self, control: Control) -> &Function {
        match control {
            Control::TurnLeft => &self.toggle_turn_left,
            Control::TurnRight => &self.toggle_turn_right,
            Control::Boost => &self.toggle_boost,
            Control::Shoot => &self.toggle_shoot,
        }
    }
}

fn export(exports: &Object, name: &str) -> Result<Function> {
    Reflect::get(exports, &JsValue::from_str(name))
        .map_err(|err| anyhow!("Could not read export '{}' : {:#?}", name, err))?
        .dyn_into::<Function>()
        .map_err(|_| anyhow!("Game module does not export a function named '{}'", name))
}

fn call(name: &str, result: std::result::Result<JsValue, JsValue>) -> Result<()> {
    result
        .map(|_| ())
        .map_err(|err| anyhow!("'{}' threw : {:#?}", name, err))
}

impl GameModule for Exports {
    fn update(&self, delta_seconds: f64) -> Result<()> {
        call(
            "update",
            self.update
                .call1(&JsValue::NULL, &JsValue::from_f64(delta_seconds)),
        )
    }

    fn draw(&self) -> Result<()> {
        call("draw", self.draw.call0(&JsValue::NULL))
    }

    fn resize(&self, width: u32, height: u32) -> Result<()> {
        call(
            "resize",
            self.resize
                .call2(&JsValue::NULL, &JsValue::from(width), &JsValue::from(height)),
        )
    }

    fn toggle(&self, control: Control, pressed: bool) -> Result<()> {
        call(
            control.export_name(),
            self.toggle_fn(control)
                .call1(&JsValue::NULL, &JsValue::from_bool(pressed)),
        )
    }
}

/// A live instance of the game binary plus the host callbacks it imported
pub struct RocketModule {
    exports: Exports,
    _imports: HostImports,
}

impl RocketModule {
    pub async fn load(url: &str, renderer: Rc<Renderer>) -> Result<Self> {
        let bytes = browser::fetch_bytes(url).await?;
        log!("Fetched {} ({} bytes)", url, bytes.len());
        Self::instantiate(&bytes, renderer)
            .await
            .with_context(|| format!("Could not instantiate {}", url))
    }

    pub async fn instantiate(bytes: &[u8], renderer: Rc<Renderer>) -> Result<Self> {
        let imports = HostImports::new(renderer)?;
        let results = JsFuture::from(WebAssembly::instantiate_buffer(bytes, imports.object()))
            .await
            .map_err(|err| anyhow!("WebAssembly.instantiate failed : {:#?}", err))?;
        let instance = Reflect::get(&results, &JsValue::from_str("instance"))
            .map_err(|err| anyhow!("No instance in instantiate result : {:#?}", err))?
            .dyn_into::<WebAssembly::Instance>()
            .map_err(|value| anyhow!("Error converting {:#?} to WebAssembly.Instance", value))?;
        let exports = Exports::resolve(&instance.exports())?;

        Ok(RocketModule {
            exports,
            _imports: imports,
        })
    }
}

impl GameModule for RocketModule {
    fn update(&self, delta_seconds: f64) -> Result<()> {
        self.exports.update(delta_seconds)
    }

    fn draw(&self) -> Result<()> {
        self.exports.draw()
    }

    fn resize(&self, width: u32, height: u32) -> Result<()> {
        self.exports.resize(width, height)
    }

    fn toggle(&self, control: Control, pressed: bool) -> Result<()> {
        self.exports.toggle(control, pressed)
    }
}
