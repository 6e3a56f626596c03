pub mod carousel;
pub mod camera;
pub mod render;
pub mod input;
pub mod config;

pub use carousel::{Carousel, CarouselError, Frame, Outcome};
pub use config::{ConfigError, StageConfig};
pub use input::Command;
