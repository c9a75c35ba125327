pub mod analyzer;
pub mod color;
pub mod parser;
pub mod types;

pub use analyzer::SentimentAnalyzer;
pub use color::{sentiment_color, SentimentColor};
pub use parser::ParsedSentiment;
pub use types::{Sentiment, SentimentRecord};
