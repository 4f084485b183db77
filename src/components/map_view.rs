use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent};
use yew::prelude::*;

use crate::game_loop::{BrowserClock, Clock, FrameLoop};
use crate::geo;
use crate::model::{GameAction, GameState};
use crate::state::{Direction, InputSource, Viewport};

use super::{direction_pad::DirectionPad, score_panel::ScorePanel};

/// Spacing of the background grid in meters.
const GRID_METERS: f64 = 10.0;

#[derive(Properties, PartialEq, Clone)]
pub struct MapViewProps {
    pub state: UseReducerHandle<GameState>,
}

fn draw_map(canvas: &HtmlCanvasElement, gs: &GameState, now_ms: f64) {
    if !canvas.is_connected() {
        return;
    }
    let Some(ctx) = canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
    else {
        return;
    };
    let vp = Viewport::new(
        canvas.width() as f64,
        canvas.height() as f64,
        gs.config.pixels_per_meter,
    );
    let center = gs.player;

    ctx.set_fill_style_str("#1b2a1f");
    ctx.fill_rect(0.0, 0.0, vp.width, vp.height);

    // Grid anchored to the start so it scrolls as the player walks.
    let (ox, oy) = geo::local_offset(gs.config.start, center);
    let (half_w, half_h) = vp.half_extent_meters();
    let ppm = vp.pixels_per_meter;
    ctx.set_stroke_style_str("#2d4333");
    ctx.set_line_width(1.0);
    let first_x = ((ox - half_w) / GRID_METERS).floor() as i64;
    let last_x = ((ox + half_w) / GRID_METERS).ceil() as i64;
    for i in first_x..=last_x {
        let x = vp.width * 0.5 + (i as f64 * GRID_METERS - ox) * ppm;
        ctx.begin_path();
        ctx.move_to(x, 0.0);
        ctx.line_to(x, vp.height);
        ctx.stroke();
    }
    let first_y = ((oy - half_h) / GRID_METERS).floor() as i64;
    let last_y = ((oy + half_h) / GRID_METERS).ceil() as i64;
    for j in first_y..=last_y {
        let y = vp.height * 0.5 - (j as f64 * GRID_METERS - oy) * ppm;
        ctx.begin_path();
        ctx.move_to(0.0, y);
        ctx.line_to(vp.width, y);
        ctx.stroke();
    }

    // Pickup reach
    let (px, py) = vp.project(center, center);
    ctx.set_stroke_style_str("rgba(63,185,80,0.35)");
    ctx.begin_path();
    ctx.arc(
        px,
        py,
        gs.config.pickup_radius_meters * ppm,
        0.0,
        std::f64::consts::PI * 2.0,
    )
    .ok();
    ctx.stroke();

    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    ctx.set_font("28px sans-serif");
    for c in gs.collectibles.iter().filter(|c| !c.collected) {
        let (x, y) = vp.project(center, c.position);
        if vp.contains(x, y, 32.0) {
            ctx.fill_text("💸", x, y).ok();
        }
    }

    ctx.set_font("32px sans-serif");
    ctx.fill_text("😀", px, py).ok();

    // Weapon rests to the right; a swing thrusts it out in the swing direction.
    let swing = gs
        .swing
        .and_then(|s| s.progress(now_ms, gs.config.swing_duration_ms).map(|p| (s.direction, p)));
    let (wx, wy) = match swing {
        Some((direction, progress)) => {
            let (ux, uy) = direction.delta();
            let reach = 18.0 + 14.0 * (progress * std::f64::consts::PI).sin();
            (px + ux * reach, py - uy * reach)
        }
        None => (px + 18.0, py + 4.0),
    };
    ctx.set_font("20px sans-serif");
    ctx.fill_text("✊", wx, wy).ok();
}

#[function_component(MapView)]
pub fn map_view(props: &MapViewProps) -> Html {
    let canvas_ref = use_node_ref();
    let draw_ref = use_mut_ref(|| None::<Rc<dyn Fn()>>);
    let state_ref = use_mut_ref(|| props.state.clone());

    // Effect: refresh the handle on each version and redraw
    {
        let state_ref = state_ref.clone();
        let current_handle = props.state.clone();
        let draw_ref = draw_ref.clone();
        let version = props.state.version;
        use_effect_with(version, move |_| {
            *state_ref.borrow_mut() = current_handle;
            if let Some(f) = &*draw_ref.borrow() {
                f();
            }
            || ()
        });
    }

    // Main mount effect (events, loop)
    {
        let canvas_ref = canvas_ref.clone();
        let draw_ref_setup = draw_ref.clone();
        let state_ref = state_ref.clone();
        let state = props.state.clone();
        use_effect_with((), move |_| {
            let window = web_sys::window().expect("window");
            let canvas = canvas_ref.cast::<HtmlCanvasElement>();
            let resize_canvas = {
                let canvas = canvas.clone();
                let window = window.clone();
                move || {
                    let Some(canvas) = &canvas else { return };
                    let width = window
                        .inner_width()
                        .ok()
                        .and_then(|v| v.as_f64())
                        .unwrap_or(800.0);
                    let height = window
                        .inner_height()
                        .ok()
                        .and_then(|v| v.as_f64())
                        .unwrap_or(600.0);
                    canvas.set_width(width.max(0.0) as u32);
                    canvas.set_height(height.max(0.0) as u32);
                }
            };
            resize_canvas();

            let draw_closure: Rc<dyn Fn()> = {
                let canvas = canvas.clone();
                let state_ref = state_ref.clone();
                Rc::new(move || {
                    let Some(canvas) = &canvas else { return };
                    let handle = state_ref.borrow();
                    draw_map(canvas, &handle, BrowserClock.now_ms());
                })
            };
            *draw_ref_setup.borrow_mut() = Some(draw_closure.clone());
            (draw_closure)();

            let frame_loop = {
                let state_ref = state_ref.clone();
                let draw = draw_closure.clone();
                FrameLoop::start(window.clone(), move || {
                    let handle = state_ref.borrow().clone();
                    handle.dispatch(GameAction::Tick);
                    draw();
                })
            };

            let keydown_cb = {
                let state = state.clone();
                Closure::wrap(Box::new(move |e: KeyboardEvent| {
                    let Some(direction) = Direction::from_key(&e.key()) else {
                        return;
                    };
                    e.prevent_default();
                    state.dispatch(GameAction::KeyDown {
                        direction,
                        repeat: e.repeat(),
                        now_ms: BrowserClock.now_ms(),
                    });
                }) as Box<dyn FnMut(_)>)
            };
            let keyup_cb = {
                let state = state.clone();
                Closure::wrap(Box::new(move |e: KeyboardEvent| {
                    let Some(direction) = Direction::from_key(&e.key()) else {
                        return;
                    };
                    e.prevent_default();
                    state.dispatch(GameAction::Release {
                        direction,
                        source: InputSource::Keyboard,
                    });
                }) as Box<dyn FnMut(_)>)
            };
            let resize_cb = {
                let draw = draw_closure.clone();
                Closure::wrap(Box::new(move |_e: web_sys::Event| {
                    resize_canvas();
                    draw();
                }) as Box<dyn FnMut(_)>)
            };
            window
                .add_event_listener_with_callback("keydown", keydown_cb.as_ref().unchecked_ref())
                .ok();
            window
                .add_event_listener_with_callback("keyup", keyup_cb.as_ref().unchecked_ref())
                .ok();
            window
                .add_event_listener_with_callback("resize", resize_cb.as_ref().unchecked_ref())
                .ok();

            // Cleanup
            move || {
                let _ = window.remove_event_listener_with_callback(
                    "keydown",
                    keydown_cb.as_ref().unchecked_ref(),
                );
                let _ = window.remove_event_listener_with_callback(
                    "keyup",
                    keyup_cb.as_ref().unchecked_ref(),
                );
                let _ = window.remove_event_listener_with_callback(
                    "resize",
                    resize_cb.as_ref().unchecked_ref(),
                );
                drop(frame_loop);
                drop(keydown_cb);
                drop(keyup_cb);
                drop(resize_cb);
                *draw_ref_setup.borrow_mut() = None;
            }
        });
    }

    let on_press: Callback<Direction> = {
        let state = props.state.clone();
        Callback::from(move |direction| {
            state.dispatch(GameAction::Press {
                direction,
                source: InputSource::Pointer,
                now_ms: BrowserClock.now_ms(),
            })
        })
    };
    let on_release: Callback<Direction> = {
        let state = props.state.clone();
        Callback::from(move |direction| {
            state.dispatch(GameAction::Release {
                direction,
                source: InputSource::Pointer,
            })
        })
    };
    let on_leave: Callback<Direction> = {
        let state = props.state.clone();
        Callback::from(move |direction| state.dispatch(GameAction::PointerLeave { direction }))
    };

    let gs = &*props.state;
    html! {<div style="position:relative; width:100vw; height:100vh; overflow:hidden;">
        <canvas ref={canvas_ref} id="map" style="display:block; width:100%; height:100%;"></canvas>
        <ScorePanel score_text={gs.score_text()} swings={gs.swings} remaining={gs.remaining()} nearest_meters={gs.nearest_remaining_meters()} />
        <DirectionPad {on_press} {on_release} {on_leave} />
    </div>}
}
