use serde::Serialize;
use tracing::debug;

use super::frequency::{word_frequencies, WordFrequency};
use crate::config_manager::WordCloudConfig;
use crate::error::{AppError, Result};
use crate::utils::html::escape;

const MIN_FONT_SIZE: f64 = 10.0;
const PADDING: f64 = 2.0;
const SPIRAL_STEP: f64 = 0.1;
const MAX_SPIRAL_STEPS: usize = 4000;

/// Viridis stops, dark to light
const PALETTE: &[&str] = &[
    "#440154", "#482878", "#3e4989", "#31688e", "#26828e", "#1f9e89", "#35b779", "#6ece58",
    "#b5de2b",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedWord {
    pub text: String,
    pub count: usize,
    /// Center of the word's box
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub font_size: f64,
    pub color: &'static str,
}

impl PlacedWord {
    fn overlaps(&self, x: f64, y: f64, width: f64, height: f64) -> bool {
        (self.x - x).abs() * 2.0 < self.width + width + PADDING * 2.0
            && (self.y - y).abs() * 2.0 < self.height + height + PADDING * 2.0
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct WordCloud {
    pub width: u32,
    pub height: u32,
    pub background_color: String,
    pub words: Vec<PlacedWord>,
}

/// Rough advance width: wide glyphs take a full em, others ~0.6 em
fn text_width(text: &str, font_size: f64) -> f64 {
    text.chars()
        .map(|c| if (c as u32) >= 0x1100 { 1.0 } else { 0.6 })
        .sum::<f64>()
        * font_size
}

/// Build a word cloud for `text` using the canvas settings in `config`
pub fn generate_word_cloud(text: &str, config: &WordCloudConfig) -> Result<WordCloud> {
    let frequencies = word_frequencies(text, config.max_words);
    if frequencies.is_empty() {
        return Err(AppError::WordCloud(
            "We need at least 1 word to plot a word cloud, got 0.".to_string(),
        ));
    }
    Ok(layout(&frequencies, config))
}

/// Greedy spiral placement, biggest words first. Deterministic for equal input.
pub fn layout(frequencies: &[WordFrequency], config: &WordCloudConfig) -> WordCloud {
    let canvas_w = f64::from(config.width);
    let canvas_h = f64::from(config.height);
    let max_font = (canvas_h * 0.25).max(MIN_FONT_SIZE);
    let max_count = frequencies.iter().map(|f| f.count).max().unwrap_or(1) as f64;

    let mut placed: Vec<PlacedWord> = Vec::with_capacity(frequencies.len());

    for (index, freq) in frequencies.iter().enumerate() {
        let relative = freq.count as f64 / max_count;
        let mut font_size = (max_font * (0.5 * relative + 0.5 * relative.sqrt())).max(MIN_FONT_SIZE);

        while font_size >= MIN_FONT_SIZE {
            let width = text_width(&freq.word, font_size);
            let height = font_size;
            if let Some((x, y)) = find_position(&placed, width, height, canvas_w, canvas_h) {
                placed.push(PlacedWord {
                    text: freq.word.clone(),
                    count: freq.count,
                    x,
                    y,
                    width,
                    height,
                    font_size,
                    color: PALETTE[index % PALETTE.len()],
                });
                break;
            }
            font_size *= 0.8;
        }
    }

    debug!("Placed {} of {} words", placed.len(), frequencies.len());
    WordCloud {
        width: config.width,
        height: config.height,
        background_color: config.background_color.clone(),
        words: placed,
    }
}

fn find_position(
    placed: &[PlacedWord],
    width: f64,
    height: f64,
    canvas_w: f64,
    canvas_h: f64,
) -> Option<(f64, f64)> {
    if width > canvas_w || height > canvas_h {
        return None;
    }

    let (cx, cy) = (canvas_w / 2.0, canvas_h / 2.0);
    // Flatten the spiral to the canvas aspect ratio
    let aspect = canvas_w / canvas_h;

    for step in 0..MAX_SPIRAL_STEPS {
        let theta = step as f64 * SPIRAL_STEP;
        let radius = 2.0 * theta;
        let x = cx + radius * theta.cos() * aspect;
        let y = cy + radius * theta.sin();

        let inside = x - width / 2.0 >= 0.0
            && x + width / 2.0 <= canvas_w
            && y - height / 2.0 >= 0.0
            && y + height / 2.0 <= canvas_h;
        if inside && !placed.iter().any(|p| p.overlaps(x, y, width, height)) {
            return Some((x, y));
        }
    }
    None
}

impl WordCloud {
    pub fn to_svg(&self) -> String {
        let mut svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" role="img"><rect width="100%" height="100%" fill="{bg}"/>"#,
            w = self.width,
            h = self.height,
            bg = escape(&self.background_color),
        );
        for word in &self.words {
            svg.push_str(&format!(
                r#"<text x="{:.1}" y="{:.1}" font-size="{:.1}" fill="{}" font-family="sans-serif" text-anchor="middle" dominant-baseline="central">{}</text>"#,
                word.x,
                word.y,
                word.font_size,
                word.color,
                escape(&word.text),
            ));
        }
        svg.push_str("</svg>");
        svg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> WordCloudConfig {
        WordCloudConfig::default()
    }

    const TEXT: &str = "Rust rust RUST memory safety safety concurrency speed ownership borrow \
        borrow checker lifetimes traits generics macros cargo crates tokio async await";

    #[test]
    fn test_words_stay_on_canvas_without_overlap() {
        let cloud = generate_word_cloud(TEXT, &config()).unwrap();
        assert!(!cloud.words.is_empty());

        for (i, a) in cloud.words.iter().enumerate() {
            assert!(a.x - a.width / 2.0 >= 0.0 && a.x + a.width / 2.0 <= 800.0);
            assert!(a.y - a.height / 2.0 >= 0.0 && a.y + a.height / 2.0 <= 400.0);
            for b in cloud.words.iter().skip(i + 1) {
                assert!(!a.overlaps(b.x, b.y, b.width, b.height), "{} overlaps {}", a.text, b.text);
            }
        }
    }

    #[test]
    fn test_most_frequent_word_is_biggest_and_centered() {
        let cloud = generate_word_cloud(TEXT, &config()).unwrap();
        let first = &cloud.words[0];
        assert_eq!(first.text, "rust");
        assert_eq!((first.x, first.y), (400.0, 200.0));
        assert!(cloud.words.iter().all(|w| w.font_size <= first.font_size));
    }

    #[test]
    fn test_layout_is_deterministic() {
        let a = generate_word_cloud(TEXT, &config()).unwrap();
        let b = generate_word_cloud(TEXT, &config()).unwrap();
        assert_eq!(a.words, b.words);
    }

    #[test]
    fn test_empty_text_is_an_error() {
        let err = generate_word_cloud("the of and", &config()).unwrap_err();
        assert!(matches!(err, AppError::WordCloud(_)));
    }

    #[test]
    fn test_svg_escapes_and_sizes() {
        let freqs = vec![WordFrequency {
            word: "<b>".to_string(),
            count: 1,
        }];
        let svg = layout(&freqs, &config()).to_svg();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r#"width="800" height="400""#));
        assert!(svg.contains(r#"fill="white""#));
        assert!(svg.contains("&lt;b&gt;"));
        assert!(svg.ends_with("</svg>"));
    }
}
