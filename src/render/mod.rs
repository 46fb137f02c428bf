pub mod renderer;

pub use renderer::{Banner, Renderer};
