use crate::browser;
use crate::engine::GameModule;
use anyhow::Result;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use web_sys::{HtmlCanvasElement, KeyboardEvent};

/// Ship controls the game binary exposes a `toggle_*` export for
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Control {
    TurnLeft,
    TurnRight,
    Boost,
    Shoot,
}

impl Control {
    pub const ALL: [Control; 4] = [
        Control::TurnLeft,
        Control::TurnRight,
        Control::Boost,
        Control::Shoot,
    ];

    /// `KeyboardEvent.key` values, anything else is ignored
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" => Some(Control::TurnLeft),
            "ArrowRight" => Some(Control::TurnRight),
            "ArrowUp" => Some(Control::Boost),
            " " => Some(Control::Shoot),
            _ => None,
        }
    }

    pub fn export_name(self) -> &'static str {
        match self {
            Control::TurnLeft => "toggle_turn_left",
            Control::TurnRight => "toggle_turn_right",
            Control::Boost => "toggle_boost",
            Control::Shoot => "toggle_shoot",
        }
    }
}

/// Returns `Ok(false)` for keys without a control
pub fn process_key(module: &dyn GameModule, key: &str, pressed: bool) -> Result<bool> {
    match Control::from_key(key) {
        Some(control) => {
            module.toggle(control, pressed)?;
            Ok(true)
        }
        None => Ok(false),
    }
}

/// keydown -> pressed, keyup -> released. Browser defaults (scrolling on
/// arrows and space) are suppressed for every key while the canvas has focus.
pub fn install(canvas: &HtmlCanvasElement, module: Rc<dyn GameModule>) -> Result<()> {
    for (event, pressed) in [("keydown", true), ("keyup", false)] {
        let module = module.clone();
        let listener = Closure::<dyn FnMut(KeyboardEvent)>::new(move |evt: KeyboardEvent| {
            if let Err(err) = process_key(module.as_ref(), &evt.key(), pressed) {
                error!("{} '{}' : {:#?}", event, evt.key(), err);
            }
            evt.prevent_default();
        });
        browser::add_listener(canvas, event, listener)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingModule {
        toggles: RefCell<Vec<(Control, bool)>>,
    }

    impl GameModule for RecordingModule {
        fn update(&self, _delta_seconds: f64) -> Result<()> {
            Ok(())
        }
        fn draw(&self) -> Result<()> {
            Ok(())
        }
        fn resize(&self, _width: u32, _height: u32) -> Result<()> {
            Ok(())
        }
        fn toggle(&self, control: Control, pressed: bool) -> Result<()> {
            self.toggles.borrow_mut().push((control, pressed));
            Ok(())
        }
    }

    #[test]
    fn arrow_left_keydown_turns_left() {
        let module = RecordingModule::default();
        assert!(process_key(&module, "ArrowLeft", true).unwrap());
        assert_eq!(*module.toggles.borrow(), vec![(Control::TurnLeft, true)]);
    }

    #[test]
    fn keyup_releases_the_same_control() {
        let module = RecordingModule::default();
        process_key(&module, " ", true).unwrap();
        process_key(&module, " ", false).unwrap();
        assert_eq!(
            *module.toggles.borrow(),
            vec![(Control::Shoot, true), (Control::Shoot, false)]
        );
    }

    #[test]
    fn unmapped_keys_are_ignored() {
        let module = RecordingModule::default();
        for key in ["ArrowDown", "a", "Spacebar", "Enter", ""] {
            assert!(!process_key(&module, key, true).unwrap());
        }
        assert!(module.toggles.borrow().is_empty());
    }

    #[test]
    fn key_table() {
        assert_eq!(Control::from_key("ArrowRight"), Some(Control::TurnRight));
        assert_eq!(Control::from_key("ArrowUp"), Some(Control::Boost));
        assert_eq!(Control::TurnLeft.export_name(), "toggle_turn_left");
        assert_eq!(Control::Shoot.export_name(), "toggle_shoot");
    }
}
