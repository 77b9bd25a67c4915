pub static PANEL_WGSL: &str = include_str!("../shaders/panel.wgsl");

pub mod carousel;
pub mod clock;
pub mod config;
pub mod constants;
pub mod error;
pub mod orbit;
pub mod panel;
pub mod pick;
pub mod router;
pub mod scene;
pub mod state;

pub use carousel::*;
pub use clock::*;
pub use config::*;
pub use constants::*;
pub use error::*;
pub use orbit::*;
pub use panel::*;
pub use pick::*;
pub use router::*;
pub use scene::*;
pub use state::*;
