pub mod interface;
pub mod translator;

pub use interface::{TranslateRequest, TranslateResponse};
pub use translator::Translator;
