//! HTML fragments the pages are assembled from.

use std::f64::consts::PI;

use crate::analysis::SentimentPanel;
use crate::config_manager::{UiConfig, LANGUAGES};
use crate::sentiment::color::GAUGE_BANDS;
use crate::ui::pages::InputMethod;
use crate::utils::html::escape;
use crate::wordcloud::WordCloud;

pub fn render_header(ui: &UiConfig) -> String {
    format!(
        "<header><h1>{} {}</h1><p>Translate text between multiple languages and analyze its sentiment using AI. \
         Upload text or type directly to get started!</p></header>",
        escape(&ui.page_icon),
        escape(&ui.page_title),
    )
}

/// A `<select>` over the supported languages, showing display names
pub fn render_language_selector(name: &str, label: &str, selected: &str) -> String {
    let mut options = String::new();
    for (code, display) in LANGUAGES {
        let marker = if *code == selected { " selected" } else { "" };
        options.push_str(&format!(
            r#"<option value="{code}"{marker}>{display}</option>"#,
            code = code,
            marker = marker,
            display = display,
        ));
    }
    format!(
        r#"<label class="selector">{label}<select name="{name}">{options}</select></label>"#,
        label = escape(label),
        name = name,
        options = options,
    )
}

pub fn render_text_input(method: InputMethod, text: &str) -> String {
    let checked = |m: InputMethod| if m == method { " checked" } else { "" };
    format!(
        r#"<fieldset class="input-method"><legend>Choose input method:</legend>
<label><input type="radio" name="input_method" value="type"{typed}> Type text</label>
<label><input type="radio" name="input_method" value="upload"{upload}> Upload file</label>
</fieldset>
<label class="text-input">Enter your text:<textarea name="text" rows="7">{text}</textarea></label>
<label class="file-input">Upload a text file<input type="file" name="file" accept=".txt"></label>"#,
        typed = checked(InputMethod::Type),
        upload = checked(InputMethod::Upload),
        text = escape(text),
    )
}

pub fn render_error(message: &str) -> String {
    format!(r#"<div class="error" role="alert">{}</div>"#, escape(message))
}

/// Map a gauge value in -100..100 to a point on a half circle opening downward
fn gauge_point(value: f64, radius: f64, cx: f64, cy: f64) -> (f64, f64) {
    let angle = PI * (1.0 - (value.clamp(-100.0, 100.0) + 100.0) / 200.0);
    (cx + radius * angle.cos(), cy - radius * angle.sin())
}

fn arc_path(from: f64, to: f64, outer: f64, inner: f64, cx: f64, cy: f64) -> String {
    let (ox1, oy1) = gauge_point(from, outer, cx, cy);
    let (ox2, oy2) = gauge_point(to, outer, cx, cy);
    let (ix2, iy2) = gauge_point(to, inner, cx, cy);
    let (ix1, iy1) = gauge_point(from, inner, cx, cy);
    format!(
        "M{:.2} {:.2} A{outer} {outer} 0 0 1 {:.2} {:.2} L{:.2} {:.2} A{inner} {inner} 0 0 0 {:.2} {:.2} Z",
        ox1, oy1, ox2, oy2, ix2, iy2, ix1, iy1,
        outer = outer,
        inner = inner,
    )
}

/// Half-circle gauge: pink/gray/green bands, a bar from -100 up to the
/// score colored by polarity, and the numeric value underneath.
pub fn render_sentiment_gauge(panel: &SentimentPanel) -> String {
    let (cx, cy, outer, inner) = (150.0, 150.0, 120.0, 80.0);
    let mut svg = String::from(
        r#"<svg xmlns="http://www.w3.org/2000/svg" class="gauge" width="300" height="200" viewBox="0 0 300 200" role="img">"#,
    );
    svg.push_str(r#"<text x="150" y="16" text-anchor="middle" font-size="14">Sentiment Score</text>"#);

    for (from, to, color) in GAUGE_BANDS {
        svg.push_str(&format!(
            r#"<path d="{}" fill="{}"/>"#,
            arc_path(from, to, outer, inner, cx, cy),
            color
        ));
    }

    let value = panel.gauge_value.clamp(-100.0, 100.0);
    svg.push_str(&format!(
        r#"<path class="bar" d="{}" fill="{}"/>"#,
        arc_path(-100.0, value, outer - 12.0, inner + 12.0, cx, cy),
        panel.color.as_str()
    ));

    for tick in [-100.0, 0.0, 100.0] {
        let (x, y) = gauge_point(tick, outer + 10.0, cx, cy);
        svg.push_str(&format!(
            r#"<text x="{:.1}" y="{:.1}" text-anchor="middle" font-size="10">{}</text>"#,
            x,
            y,
            tick
        ));
    }

    svg.push_str(&format!(
        r#"<text class="value" x="150" y="185" text-anchor="middle" font-size="28">{:.0}</text></svg>"#,
        panel.gauge_value
    ));
    svg
}

pub fn render_sentiment_panel(panel: &SentimentPanel) -> String {
    format!(
        r#"{gauge}<p class="verdict">{label} &middot; confidence {confidence:.2}</p><p><strong>Explanation:</strong> {explanation}</p>"#,
        gauge = render_sentiment_gauge(panel),
        label = panel.record.sentiment,
        confidence = panel.record.confidence,
        explanation = escape(&panel.record.explanation),
    )
}

pub fn render_word_cloud(cloud: &WordCloud) -> String {
    format!(r#"<figure class="word-cloud">{}</figure>"#, cloud.to_svg())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentiment::SentimentRecord;

    #[test]
    fn test_selector_marks_selected_language() {
        let html = render_language_selector("target_lang", "Target Language", "es");
        assert!(html.contains(r#"<option value="es" selected>Spanish</option>"#));
        assert!(html.contains(r#"<option value="en">English</option>"#));
        assert_eq!(html.matches("<option").count(), 13);
    }

    #[test]
    fn test_text_input_escapes_and_checks_method() {
        let html = render_text_input(InputMethod::Upload, "</textarea><script>");
        assert!(html.contains(r#"value="upload" checked"#));
        assert!(!html.contains(r#"value="type" checked"#));
        assert!(html.contains("&lt;/textarea&gt;&lt;script&gt;"));
        assert!(html.contains(r#"accept=".txt""#));
    }

    #[test]
    fn test_gauge_endpoints() {
        let (x, y) = gauge_point(-100.0, 100.0, 150.0, 150.0);
        assert!((x - 50.0).abs() < 1e-9 && (y - 150.0).abs() < 1e-9);
        let (x, y) = gauge_point(0.0, 100.0, 150.0, 150.0);
        assert!((x - 150.0).abs() < 1e-9 && (y - 50.0).abs() < 1e-9);
        let (x, _) = gauge_point(250.0, 100.0, 150.0, 150.0);
        assert!((x - 250.0).abs() < 1e-9);
    }

    #[test]
    fn test_gauge_uses_bands_and_bar_color() {
        let mut record = SentimentRecord::fallback();
        record.score = -0.65;
        let panel = SentimentPanel::from(record);
        let svg = render_sentiment_gauge(&panel);
        assert!(svg.contains(r#"fill="lightpink""#));
        assert!(svg.contains(r#"fill="lightgray""#));
        assert!(svg.contains(r#"fill="lightgreen""#));
        assert!(svg.contains(r#"class="bar""#) && svg.contains(r#"fill="red""#));
        assert!(svg.contains(">-65</text>"));
    }

    #[test]
    fn test_panel_shows_explanation() {
        let panel = SentimentPanel::from(SentimentRecord::fallback());
        let html = render_sentiment_panel(&panel);
        assert!(html.contains("<strong>Explanation:</strong> Error processing sentiment"));
        assert!(html.contains("neutral"));
    }
}
