use unicode_normalization::UnicodeNormalization;

pub trait Preprocessor {
    /// Canonical form of a search query
    fn process(&self, text: &str) -> String {
        let text = text.trim();

        if text.is_empty() {
            return String::new();
        }

        // Canonical composition only; compatibility folding would change the word
        let text: String = text.nfc().collect();

        // Typed or pasted line breaks collapse into single spaces
        text.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

pub struct DefaultPreprocessor;
impl Preprocessor for DefaultPreprocessor {}
