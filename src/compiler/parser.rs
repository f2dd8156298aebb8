//! Configuration document parsing.
//!
//! The document is a YAML mapping from label to either a single pattern string
//! or a list of pattern strings:
//!
//! ```yaml
//! bug: "/crash|exception/i"
//! question:
//!   - "/\\?$/"
//!   - "how do i"
//! ```
//!
//! Only the first YAML document of a stream supplies rules, but every document
//! must be well-formed. Key order is preserved.

use crate::diagnostics::{ConfigRuleError, Diagnostics};
use crate::error::Result;
use crate::ir::LabelRule;
use serde::de::{
    self, Deserialize, Deserializer, EnumAccess, IgnoredAny, MapAccess, SeqAccess, VariantAccess,
    Visitor,
};
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

/// A YAML node reduced to what rule validation needs.
///
/// Mappings keep only their shape, so a nested mapping with repeated keys is
/// still just a bad rule value rather than a parse failure.
#[derive(Debug, Clone, PartialEq)]
enum RawValue {
    Null,
    Bool(bool),
    Number(String),
    String(String),
    Sequence(Vec<RawValue>),
    Mapping,
    Tagged,
}

impl<'de> Deserialize<'de> for RawValue {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(RawValueVisitor)
    }
}

struct RawValueVisitor;

impl<'de> Visitor<'de> for RawValueVisitor {
    type Value = RawValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any YAML value")
    }

    fn visit_unit<E: de::Error>(self) -> std::result::Result<RawValue, E> {
        Ok(RawValue::Null)
    }

    fn visit_none<E: de::Error>(self) -> std::result::Result<RawValue, E> {
        Ok(RawValue::Null)
    }

    fn visit_some<D>(self, deserializer: D) -> std::result::Result<RawValue, D::Error>
    where
        D: Deserializer<'de>,
    {
        RawValue::deserialize(deserializer)
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> std::result::Result<RawValue, E> {
        Ok(RawValue::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<RawValue, E> {
        Ok(RawValue::Number(v.to_string()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<RawValue, E> {
        Ok(RawValue::Number(v.to_string()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<RawValue, E> {
        Ok(RawValue::Number(format!("{v:?}")))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<RawValue, E> {
        Ok(RawValue::String(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> std::result::Result<RawValue, E> {
        Ok(RawValue::String(v))
    }

    fn visit_seq<A>(self, mut seq: A) -> std::result::Result<RawValue, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element::<RawValue>()? {
            items.push(item);
        }
        Ok(RawValue::Sequence(items))
    }

    fn visit_map<A>(self, mut map: A) -> std::result::Result<RawValue, A::Error>
    where
        A: MapAccess<'de>,
    {
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        Ok(RawValue::Mapping)
    }

    // serde_yaml hands `!tag value` nodes over as enums.
    fn visit_enum<A>(self, data: A) -> std::result::Result<RawValue, A::Error>
    where
        A: EnumAccess<'de>,
    {
        let (IgnoredAny, variant) = data.variant::<IgnoredAny>()?;
        variant.newtype_variant::<IgnoredAny>()?;
        Ok(RawValue::Tagged)
    }
}

/// Top-level entries in document order, before any validation.
#[derive(Debug, Default)]
struct RawDocument {
    entries: Vec<(RawValue, RawValue)>,
}

impl<'de> Deserialize<'de> for RawDocument {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(RawDocumentVisitor)
    }
}

struct RawDocumentVisitor;

impl<'de> Visitor<'de> for RawDocumentVisitor {
    type Value = RawDocument;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a mapping from label to pattern(s)")
    }

    fn visit_unit<E: de::Error>(self) -> std::result::Result<Self::Value, E> {
        Ok(RawDocument::default())
    }

    fn visit_none<E: de::Error>(self) -> std::result::Result<Self::Value, E> {
        Ok(RawDocument::default())
    }

    // Entries are read one by one so that repeated keys reach us instead of
    // being rejected by `serde_yaml::Mapping`.
    fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((key, value)) = map.next_entry::<RawValue, RawValue>()? {
            entries.push((key, value));
        }
        Ok(RawDocument { entries })
    }
}

/// Parsed rules plus the per-rule problems found on the way.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleSet {
    pub rules: Vec<LabelRule>,
    pub diagnostics: Diagnostics,
}

impl RuleSet {
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LabelRule> {
        self.rules.iter()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|r| r.label())
    }

    pub fn get(&self, label: &str) -> Option<&LabelRule> {
        self.rules.iter().find(|r| r.label() == label)
    }
}

/// Turns a configuration document into an ordered [`RuleSet`].
///
/// # Examples
///
/// ```rust
/// use issue_labeler::ConfigParser;
///
/// let rules = ConfigParser::new()
///     .parse("bug: \"/crash/i\"\nquestion: [\"/\\\\?$/\", \"how do i\"]\n")?;
///
/// assert_eq!(rules.labels().collect::<Vec<_>>(), vec!["bug", "question"]);
/// assert_eq!(rules.rules[1].patterns.len(), 2);
/// # Ok::<(), issue_labeler::LabelerError>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigParser;

impl ConfigParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse a configuration document.
    ///
    /// # Errors
    /// Returns [`crate::LabelerError::ConfigParse`] if any document in the text is
    /// not well-formed YAML, or the first document's top level is not a mapping.
    /// Malformed rule values are reported in [`RuleSet::diagnostics`] instead.
    pub fn parse(&self, text: &str) -> Result<RuleSet> {
        let mut documents = serde_yaml::Deserializer::from_str(text);
        let document = match documents.next() {
            Some(first) => RawDocument::deserialize(first)?,
            None => RawDocument::default(),
        };

        for (index, rest) in documents.enumerate() {
            IgnoredAny::deserialize(rest)?;
            debug!("Ignoring YAML document #{} of the configuration", index + 2);
        }

        Ok(build_rule_set(document))
    }
}

/// Parse a configuration document with the default parser.
pub fn parse_rules(text: &str) -> Result<RuleSet> {
    ConfigParser::new().parse(text)
}

fn build_rule_set(document: RawDocument) -> RuleSet {
    let mut diagnostics = Diagnostics::new();
    // Repeated labels keep their first position and take the last value.
    let mut slots: Vec<(String, Option<Vec<String>>)> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for (key, value) in document.entries {
        let label = match label_from_key(&key) {
            Ok(label) => label,
            Err(reason) => {
                diagnostics.record(ConfigRuleError {
                    label: describe(&key),
                    reason,
                });
                continue;
            }
        };

        let patterns = match patterns_from_value(value) {
            Ok(patterns) => Some(patterns),
            Err(reason) => {
                diagnostics.record(ConfigRuleError {
                    label: label.clone(),
                    reason,
                });
                None
            }
        };

        match positions.get(&label) {
            Some(&index) => {
                debug!("Label '{label}' declared more than once, using the last value");
                slots[index].1 = patterns;
            }
            None => {
                positions.insert(label.clone(), slots.len());
                slots.push((label, patterns));
            }
        }
    }

    let rules = slots
        .into_iter()
        .filter_map(|(label, patterns)| patterns.map(|p| LabelRule::new(label, p)))
        .collect();

    RuleSet { rules, diagnostics }
}

fn label_from_key(key: &RawValue) -> std::result::Result<String, String> {
    let label = match key {
        RawValue::String(s) => s.clone(),
        RawValue::Number(n) => n.clone(),
        RawValue::Bool(b) => b.to_string(),
        other => {
            return Err(format!(
                "label must be a string, found {}",
                type_name(other)
            ))
        }
    };

    if label.is_empty() {
        Err("label must not be empty".to_string())
    } else {
        Ok(label)
    }
}

fn patterns_from_value(value: RawValue) -> std::result::Result<Vec<String>, String> {
    match value {
        RawValue::String(pattern) => Ok(vec![pattern]),
        RawValue::Sequence(items) if items.is_empty() => Err("pattern list is empty".to_string()),
        RawValue::Sequence(items) => items
            .into_iter()
            .enumerate()
            .map(|(index, item)| match item {
                RawValue::String(pattern) => Ok(pattern),
                other => Err(format!(
                    "pattern #{} must be a string, found {}",
                    index + 1,
                    type_name(&other)
                )),
            })
            .collect(),
        other => Err(format!(
            "expected a string or a list of strings, found {}",
            type_name(&other)
        )),
    }
}

fn type_name(value: &RawValue) -> &'static str {
    match value {
        RawValue::Null => "null",
        RawValue::Bool(_) => "a boolean",
        RawValue::Number(_) => "a number",
        RawValue::String(_) => "a string",
        RawValue::Sequence(_) => "a list",
        RawValue::Mapping => "a mapping",
        RawValue::Tagged => "a tagged value",
    }
}

fn describe(key: &RawValue) -> String {
    match key {
        RawValue::String(s) => s.clone(),
        other => format!("<{}>", type_name(other)),
    }
}
