pub mod frequency;
pub mod layout;

pub use layout::{generate_word_cloud, WordCloud};
