mod components;
mod config;
mod game_loop;
mod geo;
mod model;
mod state;
mod util;

fn main() {
    util::init_logging();
    log::info!("money map starting");
    yew::Renderer::<components::App>::new().render();
}
