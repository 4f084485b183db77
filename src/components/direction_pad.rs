use yew::prelude::*;

use crate::state::Direction;

#[derive(Properties, PartialEq, Clone)]
pub struct DirectionPadProps {
    pub on_press: Callback<Direction>,
    pub on_release: Callback<Direction>,
    pub on_leave: Callback<Direction>,
}

#[derive(Properties, PartialEq, Clone)]
struct PadButtonProps {
    direction: Direction,
    label: &'static str,
    on_press: Callback<Direction>,
    on_release: Callback<Direction>,
    on_leave: Callback<Direction>,
}

#[function_component(PadButton)]
fn pad_button(props: &PadButtonProps) -> Html {
    let dir = props.direction;
    let touch_start = {
        let cb = props.on_press.clone();
        Callback::from(move |e: TouchEvent| {
            e.prevent_default();
            cb.emit(dir);
        })
    };
    let touch_end = {
        let cb = props.on_release.clone();
        Callback::from(move |e: TouchEvent| {
            e.prevent_default();
            cb.emit(dir);
        })
    };
    let mouse_down = {
        let cb = props.on_press.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            cb.emit(dir);
        })
    };
    let mouse_up = {
        let cb = props.on_release.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            cb.emit(dir);
        })
    };
    let mouse_leave = {
        let cb = props.on_leave.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            cb.emit(dir);
        })
    };
    html! {
        <button data-dir={dir.control_name()}
            style="width:56px; height:56px; font-size:22px; touch-action:none; user-select:none;"
            ontouchstart={touch_start} ontouchend={touch_end}
            onmousedown={mouse_down} onmouseup={mouse_up} onmouseleave={mouse_leave}>
            { props.label }
        </button>
    }
}

#[function_component(DirectionPad)]
pub fn direction_pad(props: &DirectionPadProps) -> Html {
    let button = |direction: Direction, label: &'static str| {
        html! { <PadButton direction={direction} label={label}
            on_press={props.on_press.clone()}
            on_release={props.on_release.clone()}
            on_leave={props.on_leave.clone()} /> }
    };
    html! {<div id="mobile-controls" style="position:absolute; right:16px; bottom:16px; display:grid; grid-template-columns:repeat(3, 56px); gap:6px;">
        <span></span>
        { button(Direction::Up, "↑") }
        <span></span>
        { button(Direction::Left, "←") }
        <span></span>
        { button(Direction::Right, "→") }
        <span></span>
        { button(Direction::Down, "↓") }
        <span></span>
    </div>}
}
