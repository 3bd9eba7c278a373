pub mod headless;
pub mod interactive;

pub use headless::{HeadlessConfig, HeadlessTrainer};
pub use interactive::InteractiveMode;
