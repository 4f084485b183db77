use rand::SeedableRng;
use rand::rngs::SmallRng;
use yew::prelude::*;

use super::map_view::MapView;
use crate::config::GameConfig;
use crate::model::GameState;

#[function_component(App)]
pub fn app() -> Html {
    let state = use_reducer(|| {
        let config = GameConfig::load();
        if let Ok(json) = serde_json::to_string(&config) {
            log::debug!("game config: {json}");
        }
        let mut rng = SmallRng::from_entropy();
        GameState::new(config, &mut rng)
    });

    html! { <MapView state={state} /> }
}
