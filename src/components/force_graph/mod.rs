mod camera;
mod component;
pub mod controller;
mod render;
mod state;
pub mod style;

pub use component::{ForceGraphCanvas, GraphHandle};
pub use controller::{InteractionController, InteractionState, Viewport};
pub use style::{DrawIntent, style_for};
