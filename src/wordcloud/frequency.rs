use std::collections::HashMap;
use unicode_segmentation::UnicodeSegmentation;

/// Common English words left out of clouds
const STOPWORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and", "any",
    "are", "aren't", "as", "at", "be", "because", "been", "before", "being", "below", "between",
    "both", "but", "by", "can", "can't", "cannot", "could", "couldn't", "did", "didn't", "do",
    "does", "doesn't", "doing", "don't", "down", "during", "each", "else", "ever", "few", "for",
    "from", "further", "get", "had", "hadn't", "has", "hasn't", "have", "haven't", "having", "he",
    "he'd", "he'll", "he's", "hence", "her", "here", "here's", "hers", "herself", "him",
    "himself", "his", "how", "how's", "however", "i", "i'd", "i'll", "i'm", "i've", "if", "in",
    "into", "is", "isn't", "it", "it's", "its", "itself", "just", "let's", "like", "me", "more",
    "most", "mustn't", "my", "myself", "no", "nor", "not", "of", "off", "on", "once", "only",
    "or", "other", "otherwise", "ought", "our", "ours", "ourselves", "out", "over", "own", "same",
    "shall", "shan't", "she", "she'd", "she'll", "she's", "should", "shouldn't", "since", "so",
    "some", "such", "than", "that", "that's", "the", "their", "theirs", "them", "themselves",
    "then", "there", "there's", "therefore", "these", "they", "they'd", "they'll", "they're",
    "they've", "this", "those", "through", "to", "too", "under", "until", "up", "very", "was",
    "wasn't", "we", "we'd", "we'll", "we're", "we've", "were", "weren't", "what", "what's",
    "when", "when's", "where", "where's", "which", "while", "who", "who's", "whom", "why",
    "why's", "with", "won't", "would", "wouldn't", "you", "you'd", "you'll", "you're", "you've",
    "your", "yours", "yourself", "yourselves",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordFrequency {
    pub word: String,
    pub count: usize,
}

fn normalize(token: &str) -> Option<String> {
    let lower = token.to_lowercase().replace('\u{2019}', "'");
    if STOPWORDS.contains(&lower.as_str()) {
        return None;
    }

    let word = lower
        .strip_suffix("'s")
        .map(str::to_string)
        .unwrap_or(lower);

    if word.chars().all(|c| c.is_numeric()) {
        return None;
    }
    // Single ASCII letters carry nothing; a single CJK character can be a word
    if word.chars().count() < 2 && word.is_ascii() {
        return None;
    }
    Some(word)
}

/// Count words in `text` and keep the `max_words` most frequent.
///
/// Ordered by descending count, ties alphabetically.
pub fn word_frequencies(text: &str, max_words: usize) -> Vec<WordFrequency> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for token in text.unicode_words() {
        if let Some(word) = normalize(token) {
            *counts.entry(word).or_insert(0) += 1;
        }
    }

    let mut frequencies: Vec<WordFrequency> = counts
        .into_iter()
        .map(|(word, count)| WordFrequency { word, count })
        .collect();
    frequencies.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.word.cmp(&b.word)));
    frequencies.truncate(max_words);
    frequencies
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(freqs: &[WordFrequency]) -> Vec<(&str, usize)> {
        freqs.iter().map(|f| (f.word.as_str(), f.count)).collect()
    }

    #[test]
    fn test_counts_ignore_case_and_stopwords() {
        let freqs = word_frequencies("The cat and the Cat saw a dog. The DOG ran!", 100);
        assert_eq!(words(&freqs), vec![("cat", 2), ("dog", 2), ("ran", 1), ("saw", 1)]);
    }

    #[test]
    fn test_possessives_and_numbers() {
        let freqs = word_frequencies("Anna's book, Anna’s pen, 2024 books", 100);
        assert_eq!(
            words(&freqs),
            vec![("anna", 2), ("book", 1), ("books", 1), ("pen", 1)]
        );
    }

    #[test]
    fn test_max_words_truncates() {
        let freqs = word_frequencies("alpha alpha alpha beta beta gamma", 2);
        assert_eq!(words(&freqs), vec![("alpha", 3), ("beta", 2)]);
    }

    #[test]
    fn test_non_latin_scripts() {
        let freqs = word_frequencies("Привет мир, привет!", 100);
        assert_eq!(words(&freqs), vec![("привет", 2), ("мир", 1)]);

        let cjk = word_frequencies("猫", 100);
        assert_eq!(words(&cjk), vec![("猫", 1)]);
    }

    #[test]
    fn test_nothing_left() {
        assert!(word_frequencies("the and of a I", 100).is_empty());
        assert!(word_frequencies("   ", 100).is_empty());
    }
}
