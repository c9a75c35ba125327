use serde::Serialize;

/// Supported languages as (code, display name), in selector order
pub const LANGUAGES: &[(&str, &str)] = &[
    ("en", "English"),
    ("es", "Spanish"),
    ("fr", "French"),
    ("de", "German"),
    ("it", "Italian"),
    ("pt", "Portuguese"),
    ("nl", "Dutch"),
    ("ru", "Russian"),
    ("ja", "Japanese"),
    ("ko", "Korean"),
    ("zh", "Chinese"),
    ("ar", "Arabic"),
    ("hi", "Hindi"),
];

#[derive(Debug, Clone, Serialize)]
pub struct Language {
    pub code: &'static str,
    pub name: &'static str,
}

pub fn language_name(code: &str) -> Option<&'static str> {
    LANGUAGES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
}

pub fn all_languages() -> Vec<Language> {
    LANGUAGES
        .iter()
        .map(|&(code, name)| Language { code, name })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        assert_eq!(language_name("en"), Some("English"));
        assert_eq!(language_name("zh"), Some("Chinese"));
        assert_eq!(language_name("xx"), None);
        assert_eq!(language_name("EN"), None);
    }

    #[test]
    fn test_order_and_size() {
        let languages = all_languages();
        assert_eq!(languages.len(), 13);
        assert_eq!(languages[0].code, "en");
        assert_eq!(languages[1].code, "es");
        assert_eq!(languages.last().map(|l| l.code), Some("hi"));
    }
}
