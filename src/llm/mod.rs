pub mod factory;
pub mod gemini_llm;
pub mod openai_compatible_llm;
pub mod stateless_llm_interface;

#[cfg(test)]
pub mod scripted_llm;

pub use factory::StatelessLLMFactory;
pub use stateless_llm_interface::*;
