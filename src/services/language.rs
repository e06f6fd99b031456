//! Code language detection service.
//!
//! Evaluates an ordered rule table against a code sample and returns the
//! language of the first matching rule.

use crate::models::{Config, Language, LanguageRule};

/// Service for tagging code samples with a language.
#[derive(Debug, Clone)]
pub struct LanguageDetector {
    rules: Vec<LanguageRule>,
}

impl LanguageDetector {
    /// Create a detector over the given rules, in priority order.
    pub fn new(rules: Vec<LanguageRule>) -> Self {
        Self { rules }
    }

    /// Detect the language of `code`. Falls back to [`Language::Text`].
    pub fn detect(&self, code: &str) -> Language {
        self.rules
            .iter()
            .find(|rule| rule.matches(code))
            .map(|rule| rule.language)
            .unwrap_or(Language::Text)
    }
}

impl Default for LanguageDetector {
    fn default() -> Self {
        Self::new(Config::default().language_rules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_annotation_is_typescript() {
        let detector = LanguageDetector::default();
        let code = "@Entry\n@Component\nstruct Index {\n  build() {}\n}";
        assert_eq!(detector.detect(code), Language::Typescript);
    }

    #[test]
    fn test_import_from_is_typescript() {
        let detector = LanguageDetector::default();
        assert_eq!(
            detector.detect("import router from '@ohos.router'"),
            Language::Typescript
        );
    }

    #[test]
    fn test_keywords_are_javascript() {
        let detector = LanguageDetector::default();
        assert_eq!(detector.detect("const a = 1;"), Language::Javascript);
        assert_eq!(detector.detect("function f() {}"), Language::Javascript);
    }

    #[test]
    fn test_import_without_from_falls_through() {
        let detector = LanguageDetector::default();
        assert_eq!(detector.detect("import os"), Language::Text);
    }

    #[test]
    fn test_first_matching_rule_wins() {
        let detector = LanguageDetector::default();
        // Matches both the annotation rule and the keyword rule.
        let code = "@Component\nconst x = 1";
        assert_eq!(detector.detect(code), Language::Typescript);
    }

    #[test]
    fn test_custom_table_order() {
        let detector = LanguageDetector::new(vec![
            LanguageRule::any_of(["const"], Language::Javascript),
            LanguageRule::any_of(["@Component"], Language::Typescript),
        ]);
        assert_eq!(
            detector.detect("@Component\nconst x = 1"),
            Language::Javascript
        );
    }

    #[test]
    fn test_plain_text() {
        let detector = LanguageDetector::default();
        assert_eq!(detector.detect("hdc shell ls"), Language::Text);
    }
}
