// Per-frame game step and the requestAnimationFrame driver that runs it.
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;

use crate::model::GameState;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickOutcome {
    pub moved: bool,
    pub picked_up: usize,
}

/// One frame: sum the held directions into a step and move the player by it.
pub fn tick(state: &mut GameState) -> TickOutcome {
    let (dx, dy) = state.input.movement(state.config.step_meters);
    if dx == 0.0 && dy == 0.0 {
        return TickOutcome::default();
    }
    let picked_up = state.move_player(dx, dy);
    TickOutcome {
        moved: true,
        picked_up,
    }
}

/// Source of wall-clock milliseconds for double-tap timing and swing animation.
pub trait Clock {
    fn now_ms(&self) -> f64;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserClock;

impl Clock for BrowserClock {
    fn now_ms(&self) -> f64 {
        js_sys::Date::now()
    }
}

type FrameClosure = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// `requestAnimationFrame` loop. Runs until dropped.
pub struct FrameLoop {
    window: web_sys::Window,
    raf_id: Rc<RefCell<Option<i32>>>,
    closure: FrameClosure,
}

impl FrameLoop {
    pub fn start(window: web_sys::Window, mut on_frame: impl FnMut() + 'static) -> Self {
        let raf_id = Rc::new(RefCell::new(None));
        let closure: FrameClosure = Rc::new(RefCell::new(None));
        {
            let raf_id_loop = raf_id.clone();
            let closure_loop = closure.clone();
            let window_loop = window.clone();
            *closure.borrow_mut() = Some(Closure::wrap(Box::new(move || {
                on_frame();
                let next = closure_loop
                    .borrow()
                    .as_ref()
                    .and_then(|c| window_loop.request_animation_frame(c.as_ref().unchecked_ref()).ok());
                *raf_id_loop.borrow_mut() = next;
            }) as Box<dyn FnMut()>));
        }
        let first = closure
            .borrow()
            .as_ref()
            .and_then(|c| window.request_animation_frame(c.as_ref().unchecked_ref()).ok());
        *raf_id.borrow_mut() = first;
        Self {
            window,
            raf_id,
            closure,
        }
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        if let Some(id) = self.raf_id.borrow_mut().take() {
            let _ = self.window.cancel_animation_frame(id);
        }
        // break the closure's reference to itself
        self.closure.borrow_mut().take();
    }
}
