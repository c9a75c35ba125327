use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use super::types::{Sentiment, SentimentRecord};

/// Outcome of parsing a model reply. `warning` carries the user-facing
/// message when the fallback record had to be used.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedSentiment {
    pub record: SentimentRecord,
    pub warning: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawSentiment {
    sentiment: String,
    score: Value,
    #[serde(default)]
    confidence: Option<Value>,
    #[serde(default)]
    explanation: Option<String>,
}

/// Strip markdown code fences from a model reply.
///
/// Every "```json" and "```" marker is removed. When prose still surrounds
/// the payload, the outermost `{...}` span is returned.
pub fn extract_json(response: &str) -> String {
    let stripped = response
        .trim()
        .replace("```json", "")
        .replace("```", "");
    let stripped = stripped.trim();

    if stripped.starts_with('{') && stripped.ends_with('}') {
        return stripped.to_string();
    }

    match (stripped.find('{'), stripped.rfind('}')) {
        (Some(start), Some(end)) if start < end => stripped[start..=end].to_string(),
        _ => stripped.to_string(),
    }
}

fn number_field(name: &str, value: &Value) -> Result<f64, String> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number
        .filter(|n| n.is_finite())
        .ok_or_else(|| format!("field '{}' is not a number: {}", name, value))
}

/// Parse a fence-free JSON payload into a record.
///
/// Score and confidence may be JSON numbers or numeric strings and are
/// clamped into range.
pub fn parse_sentiment_record(payload: &str) -> Result<SentimentRecord, String> {
    let raw: RawSentiment = serde_json::from_str(payload).map_err(|e| e.to_string())?;

    let sentiment: Sentiment = raw.sentiment.parse()?;
    let score = number_field("score", &raw.score)?.clamp(-1.0, 1.0);
    let confidence = match &raw.confidence {
        Some(value) => number_field("confidence", value)?.clamp(0.0, 1.0),
        None => 0.0,
    };

    Ok(SentimentRecord {
        sentiment,
        score,
        confidence,
        explanation: raw.explanation.unwrap_or_default().trim().to_string(),
    })
}

/// Parse a raw model reply, falling back to a neutral record on bad JSON
pub fn parse_sentiment(response: &str) -> ParsedSentiment {
    let payload = extract_json(response);
    match parse_sentiment_record(&payload) {
        Ok(record) => ParsedSentiment {
            record,
            warning: None,
        },
        Err(reason) => {
            warn!("Unparseable sentiment reply ({}): {}", reason, payload);
            ParsedSentiment {
                record: SentimentRecord::fallback(),
                warning: Some(format!("Invalid JSON response from API: {}", payload)),
            }
        }
    }
}
