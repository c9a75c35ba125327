use serde::{Deserialize, Serialize};

/// Page settings for the HTML front end
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_page_title")]
    pub page_title: String,

    #[serde(default = "default_page_icon")]
    pub page_icon: String,

    /// "wide" or "centered"
    #[serde(default = "default_layout")]
    pub layout: String,

    #[serde(default = "default_source_lang")]
    pub default_source_lang: String,

    #[serde(default = "default_target_lang")]
    pub default_target_lang: String,
}

fn default_page_title() -> String {
    "Language Translation & Sentiment Analysis".to_string()
}

fn default_page_icon() -> String {
    "🌐".to_string()
}

fn default_layout() -> String {
    "wide".to_string()
}

fn default_source_lang() -> String {
    "en".to_string()
}

fn default_target_lang() -> String {
    "es".to_string()
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            page_title: default_page_title(),
            page_icon: default_page_icon(),
            layout: default_layout(),
            default_source_lang: default_source_lang(),
            default_target_lang: default_target_lang(),
        }
    }
}

/// Word cloud canvas settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordCloudConfig {
    #[serde(default = "default_width")]
    pub width: u32,

    #[serde(default = "default_height")]
    pub height: u32,

    #[serde(default = "default_background_color")]
    pub background_color: String,

    #[serde(default = "default_max_words")]
    pub max_words: usize,
}

fn default_width() -> u32 {
    800
}

fn default_height() -> u32 {
    400
}

fn default_background_color() -> String {
    "white".to_string()
}

fn default_max_words() -> usize {
    100
}

impl Default for WordCloudConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            background_color: default_background_color(),
            max_words: default_max_words(),
        }
    }
}
