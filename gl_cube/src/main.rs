use glarea::{glow::Context, log_debug_message, GlArea};

use app::CubeApp;
use config::CubeConfig;

mod animator;
mod app;
mod config;
mod cube;
mod gfx;
#[cfg(test)]
mod recording;
mod scene;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = CubeConfig::default();
    let app = CubeApp::<Context>::new(config.clone());
    if let Err(err) = CubeApp::<Context>::gl_area(config.title)
        .window_size(config.width, config.height)
        .debug_message_callback(log_debug_message)
        .start(app)
    {
        log::error!("{err:#}");
    }
}
