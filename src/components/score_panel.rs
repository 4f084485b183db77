use yew::prelude::*;

use crate::util::format_meters;

#[derive(Properties, PartialEq, Clone)]
pub struct ScorePanelProps {
    pub score_text: String,
    pub remaining: usize,
    pub swings: u32,
    /// Distance to the closest money left on the map.
    pub nearest_meters: Option<f64>,
}

#[function_component]
pub fn ScorePanel(props: &ScorePanelProps) -> Html {
    let row_style = "display:flex; align-items:center; gap:8px;";
    let icon_style = "width:20px; text-align:center; flex-shrink:0;";
    let hint = match props.nearest_meters {
        Some(m) => format!("{} left, nearest {}", props.remaining, format_meters(m)),
        None => "All collected".to_string(),
    };
    html! {
        <div style="position:absolute; top:12px; left:12px; background:rgba(22,27,34,0.9); color:#e6edf3; border:1px solid #30363d; border-radius:8px; padding:10px 14px; min-width:180px; display:flex; flex-direction:column; gap:6px; font-size:14px;">
            <div style={row_style}>
                <span style={format!("{} color:#3fb950;", icon_style)}>{"💸"}</span>
                <span id="score" style="font-weight:600; color:#3fb950; font-variant-numeric:tabular-nums;">{ props.score_text.clone() }</span>
            </div>
            <div style="font-size:11px; opacity:0.7;">{ hint }</div>
            <div style="font-size:11px; opacity:0.7;">{ format!("Swings: {}", props.swings) }</div>
        </div>
    }
}
