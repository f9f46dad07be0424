use crate::engine::Renderer;
use anyhow::{anyhow, Result};
use js_sys::{Object, Reflect};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsValue;

/// Namespace the game binary imports everything from
pub const NAMESPACE: &str = "env";

pub const DRAW_IMPORTS: [&str; 6] = [
    "clear_screen",
    "draw_player",
    "draw_enemy",
    "draw_bullet",
    "draw_particle",
    "draw_score",
];

pub const MATH_IMPORTS: [&str; 3] = ["Math_atan", "sin", "cos"];

type Draw0 = Closure<dyn FnMut()>;
type Draw1 = Closure<dyn FnMut(f64)>;
type Draw2 = Closure<dyn FnMut(f64, f64)>;
type Draw3 = Closure<dyn FnMut(f64, f64, f64)>;
type MathFn = Closure<dyn FnMut(f64) -> f64>;

/// Import object handed to `WebAssembly.instantiate`.
/// The closures behind it must outlive the instance, so they are owned here
/// and this struct is kept next to the exports.
pub struct HostImports {
    object: Object,
    _draw: (Draw0, Draw3, Draw2, Draw2, Draw3, Draw1),
    _math: [MathFn; 3],
}

impl HostImports {
    pub fn new(renderer: Rc<Renderer>) -> Result<Self> {
        let clear_screen = {
            let renderer = renderer.clone();
            Closure::<dyn FnMut()>::new(move || renderer.clear_screen())
        };
        let draw_player = {
            let renderer = renderer.clone();
            Closure::<dyn FnMut(f64, f64, f64)>::new(move |x: f64, y: f64, angle: f64| {
                report(renderer.draw_player(x, y, angle))
            })
        };
        let draw_enemy = {
            let renderer = renderer.clone();
            Closure::<dyn FnMut(f64, f64)>::new(move |x: f64, y: f64| report(renderer.draw_enemy(x, y)))
        };
        let draw_bullet = {
            let renderer = renderer.clone();
            Closure::<dyn FnMut(f64, f64)>::new(move |x: f64, y: f64| report(renderer.draw_bullet(x, y)))
        };
        let draw_particle = {
            let renderer = renderer.clone();
            Closure::<dyn FnMut(f64, f64, f64)>::new(move |x: f64, y: f64, radius: f64| {
                report(renderer.draw_particle(x, y, radius))
            })
        };
        let draw_score =
            Closure::<dyn FnMut(f64)>::new(move |score: f64| report(renderer.draw_score(score)));

        let math: [MathFn; 3] = [
            Closure::<dyn FnMut(f64) -> f64>::new(|x: f64| x.atan()),
            Closure::<dyn FnMut(f64) -> f64>::new(|x: f64| x.sin()),
            Closure::<dyn FnMut(f64) -> f64>::new(|x: f64| x.cos()),
        ];

        let env = Object::new();
        let draw_values: [&JsValue; 6] = [
            clear_screen.as_ref(),
            draw_player.as_ref(),
            draw_enemy.as_ref(),
            draw_bullet.as_ref(),
            draw_particle.as_ref(),
            draw_score.as_ref(),
        ];
        for (name, value) in DRAW_IMPORTS.iter().zip(draw_values) {
            set(&env, name, value)?;
        }
        for (name, closure) in MATH_IMPORTS.iter().zip(math.iter()) {
            set(&env, name, closure.as_ref())?;
        }

        let object = Object::new();
        set(&object, NAMESPACE, &env)?;

        Ok(HostImports {
            object,
            _draw: (
                clear_screen,
                draw_player,
                draw_enemy,
                draw_bullet,
                draw_particle,
                draw_score,
            ),
            _math: math,
        })
    }

    pub fn object(&self) -> &Object {
        &self.object
    }
}

fn set(target: &Object, name: &str, value: &JsValue) -> Result<()> {
    Reflect::set(target, &JsValue::from_str(name), value)
        .map_err(|err| anyhow!("Could not set import '{}' : {:#?}", name, err))?;
    Ok(())
}

// draw callbacks run inside the module's draw(), there is nobody to return
// an error to
fn report(result: Result<()>) {
    if let Err(err) = result {
        error!("{:#?}", err);
    }
}
