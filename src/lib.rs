pub mod board;
pub mod brush;
pub mod config;
pub mod drawing;
pub mod error;
pub mod factory;
pub mod geometry;
pub mod history;
pub mod hit_test;
pub mod input;
pub mod raster;
pub mod renderer;
pub mod rough;
pub mod state;
pub mod tool_config;
#[cfg(target_arch = "wasm32")]
mod web;

pub use board::Board;
pub use config::Config;
pub use drawing::{Color, DrawingElement, ElementKind, Shape, Style, Tool};
pub use error::DrawError;
pub use input::Command;
pub use state::{DrawingState, Mode};

pub fn init_logging() {
    cfg_if::cfg_if! {
        if #[cfg(target_arch = "wasm32")] {
            std::panic::set_hook(Box::new(console_error_panic_hook::hook));
            if console_log::init_with_level(log::Level::Info).is_err() {
                log::warn!("logger already initialized");
            }
        } else {
            let _ = env_logger::Builder::from_env(
                env_logger::Env::default().default_filter_or("info"),
            )
            .try_init();
        }
    }
}
