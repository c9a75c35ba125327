pub mod languages;
pub mod llm;
pub mod main;
pub mod system;
pub mod ui;
pub mod utils;

pub use languages::{all_languages, language_name, LANGUAGES};
pub use main::Config;
pub use ui::{UiConfig, WordCloudConfig};
