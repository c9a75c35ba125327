pub mod components;
pub mod pages;

pub use pages::{render_page, FormState, InputMethod};
