use serde::Serialize;

/// Scores strictly above this are positive, strictly below its negation negative
pub const POLARITY_THRESHOLD: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentColor {
    Green,
    Red,
    Gray,
}

impl SentimentColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentColor::Green => "green",
            SentimentColor::Red => "red",
            SentimentColor::Gray => "gray",
        }
    }
}

pub fn sentiment_color(score: f64) -> SentimentColor {
    if score > POLARITY_THRESHOLD {
        SentimentColor::Green
    } else if score < -POLARITY_THRESHOLD {
        SentimentColor::Red
    } else {
        SentimentColor::Gray
    }
}

/// Background bands of the score gauge, on the -100..100 axis
pub const GAUGE_BANDS: [(f64, f64, &str); 3] = [
    (-100.0, -30.0, "lightpink"),
    (-30.0, 30.0, "lightgray"),
    (30.0, 100.0, "lightgreen"),
];
