/// A cleaned, tokenized phrase. Lives for one resolver call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Utterance {
    tokens: Vec<String>,
}

impl Utterance {
    /// Lowercase, trim, strip sentence punctuation, split on whitespace.
    pub fn clean(raw: &str) -> Self {
        let text: String = raw
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| !matches!(c, '.' | ',' | '?' | '!'))
            .collect();

        Self {
            tokens: text.split_whitespace().map(str::to_string).collect(),
        }
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Normalized text, tokens joined by single spaces.
    pub fn text(&self) -> String {
        self.tokens.join(" ")
    }
}
