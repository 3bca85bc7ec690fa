use crate::error::{MetadataError, Result};
use crate::types::MetadataKind;

/// One classified mutation token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    Set(&'a str, &'a str),
    Remove(&'a str),
}

impl<'a> Token<'a> {
    fn classify(raw: &'a str) -> Option<Self> {
        if raw.contains('=') {
            let mut pieces = raw.split('=');
            return match (pieces.next(), pieces.next(), pieces.next()) {
                (Some(key), Some(value), None) if !key.is_empty() => Some(Token::Set(key, value)),
                _ => None,
            };
        }

        match raw.strip_suffix('-') {
            Some(key) if !key.is_empty() => Some(Token::Remove(key)),
            _ => None,
        }
    }
}

/// Parsed intent of a set invocation: keys to add and keys to remove.
///
/// Both lists keep first-appearance order. A repeated add overrides the
/// earlier value in place; a repeated remove is a no-op. The two lists are
/// independent, so a key may appear in both.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MutationSpec {
    adds: Vec<(String, String)>,
    removes: Vec<String>,
}

impl MutationSpec {
    /// Parse `KEY=VAL` and `KEY-` tokens.
    ///
    /// Fails on the first token that matches neither shape; nothing from a
    /// failed parse is returned.
    pub fn parse<S: AsRef<str>>(kind: MetadataKind, tokens: &[S]) -> Result<Self> {
        let mut spec = Self::default();

        for raw in tokens {
            let raw = raw.as_ref();
            match Token::classify(raw) {
                Some(Token::Set(key, value)) => spec.add(key, value),
                Some(Token::Remove(key)) => spec.remove(key),
                None => {
                    return Err(MetadataError::MalformedToken {
                        hint: kind.format_hint(),
                        token: raw.to_string(),
                    })
                }
            }
        }

        tracing::debug!(
            adds = spec.adds.len(),
            removes = spec.removes.len(),
            "Parsed {} mutation",
            kind.field()
        );

        Ok(spec)
    }

    pub fn adds(&self) -> &[(String, String)] {
        &self.adds
    }

    pub fn removes(&self) -> &[String] {
        &self.removes
    }

    pub fn is_empty(&self) -> bool {
        self.adds.is_empty() && self.removes.is_empty()
    }

    fn add(&mut self, key: &str, value: &str) {
        match self.adds.iter_mut().find(|(existing, _)| existing == key) {
            Some(entry) => entry.1 = value.to_string(),
            None => self.adds.push((key.to_string(), value.to_string())),
        }
    }

    fn remove(&mut self, key: &str) {
        if !self.removes.iter().any(|existing| existing == key) {
            self.removes.push(key.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(tokens: &[&str]) -> Result<MutationSpec> {
        MutationSpec::parse(MetadataKind::Labels, tokens)
    }

    fn adds(spec: &MutationSpec) -> Vec<(&str, &str)> {
        spec.adds()
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect()
    }

    #[test]
    fn test_partitions_adds_and_removes() {
        let spec = parse(&["env=prod", "tier-", "team=core"]).unwrap();

        assert_eq!(adds(&spec), vec![("env", "prod"), ("team", "core")]);
        assert_eq!(spec.removes(), &["tier".to_string()]);
        assert!(!spec.is_empty());
    }

    #[test]
    fn test_later_duplicate_add_wins() {
        let spec = parse(&["env=dev", "tier=gold", "env=prod"]).unwrap();

        assert_eq!(adds(&spec), vec![("env", "prod"), ("tier", "gold")]);
    }

    #[test]
    fn test_duplicate_remove_collapses() {
        let spec = parse(&["owner-", "owner-"]).unwrap();
        assert_eq!(spec.removes(), &["owner".to_string()]);
    }

    #[test]
    fn test_add_and_remove_lists_are_independent() {
        let spec = parse(&["tier=gold", "tier-"]).unwrap();

        assert_eq!(adds(&spec), vec![("tier", "gold")]);
        assert_eq!(spec.removes(), &["tier".to_string()]);
    }

    #[test]
    fn test_empty_value_is_allowed() {
        let spec = parse(&["note="]).unwrap();
        assert_eq!(adds(&spec), vec![("note", "")]);
    }

    #[test]
    fn test_only_one_dash_is_stripped() {
        let spec = parse(&["weird--"]).unwrap();
        assert_eq!(spec.removes(), &["weird-".to_string()]);
    }

    #[test]
    fn test_value_may_end_with_dash() {
        // Exactly one '=' makes this a set, whatever the last character
        let spec = parse(&["range=1-"]).unwrap();
        assert_eq!(adds(&spec), vec![("range", "1-")]);
        assert!(spec.removes().is_empty());
    }

    #[test]
    fn test_no_tokens_is_empty() {
        let spec = parse(&[]).unwrap();
        assert!(spec.is_empty());
    }

    #[test]
    fn test_malformed_tokens_fail() {
        for bad in ["plain", "a=b=c", "a=b=c-", "=value", "-", "=", ""] {
            let err = parse(&["good=1", bad, "other-"]).unwrap_err();
            match err {
                MetadataError::MalformedToken { hint, token } => {
                    assert_eq!(hint, "Labels must be in the format of KEY=VAL or KEY-");
                    assert_eq!(token, bad);
                }
                other => panic!("unexpected error for {:?}: {:?}", bad, other),
            }
        }
    }

    #[test]
    fn test_annotations_hint() {
        let err = MutationSpec::parse(MetadataKind::Annotations, &["nope"]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Annotations must be in the format of KEY=VAL or KEY- (got 'nope')"
        );
    }

    #[test]
    fn test_first_malformed_token_is_reported() {
        let err = parse(&["first", "second"]).unwrap_err();
        assert!(matches!(err, MetadataError::MalformedToken { token, .. } if token == "first"));
    }
}
