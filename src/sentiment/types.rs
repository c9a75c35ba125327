use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sentiment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "positive" => Ok(Sentiment::Positive),
            "negative" => Ok(Sentiment::Negative),
            "neutral" => Ok(Sentiment::Neutral),
            other => Err(format!("unknown sentiment label '{}'", other)),
        }
    }
}

/// Model verdict for one piece of text.
///
/// `score` is polarity in [-1, 1]; `confidence` is in [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentRecord {
    pub sentiment: Sentiment,
    pub score: f64,
    pub confidence: f64,
    pub explanation: String,
}

impl SentimentRecord {
    /// Shown when the model's reply cannot be parsed
    pub fn fallback() -> Self {
        Self {
            sentiment: Sentiment::Neutral,
            score: 0.0,
            confidence: 0.0,
            explanation: "Error processing sentiment".to_string(),
        }
    }
}
