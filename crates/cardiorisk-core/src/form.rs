//! Form field serialization.
//!
//! Raw form entries arrive as `(name, value)` string pairs in document order.
//! Each value becomes a JSON number when a leading decimal float can be read
//! from it, and stays as text otherwise.
//!
//! # Prefix rules
//!
//! - Leading whitespace is skipped
//! - Optional `+`/`-` sign, then digits with an optional `.` fraction
//!   (at least one digit on either side of the point)
//! - Optional exponent `e`/`E`, only consumed when followed by digits
//! - `Infinity` (optionally signed) is accepted
//! - Trailing garbage after a valid prefix is ignored: `"12abc"` → 12

use serde::ser::{Serialize, SerializeMap, Serializer};

/// A single serialized form value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Number(f64),
    Text(String),
}

impl FieldValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(_) => None,
        }
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            // serde_json writes non-finite floats as `null`.
            Self::Number(n) => serializer.serialize_f64(*n),
            Self::Text(s) => serializer.serialize_str(s),
        }
    }
}

/// Form fields keyed by name, kept in form order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormPayload {
    entries: Vec<(String, FieldValue)>,
}

impl FormPayload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serialize raw form entries.
    ///
    /// A repeated name overwrites the earlier value in place.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        let mut payload = Self::new();
        for (name, raw) in pairs {
            payload.insert(name, parse_field(raw.as_ref()));
        }
        payload
    }

    pub fn insert(&mut self, name: impl Into<String>, value: FieldValue) {
        let name = name.into();
        match self.entries.iter_mut().find(|(k, _)| *k == name) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl Serialize for FormPayload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Convert a raw form value to a number when a float prefix parses.
pub fn parse_field(raw: &str) -> FieldValue {
    match parse_float_prefix(raw) {
        Some(n) => FieldValue::Number(n),
        None => FieldValue::Text(raw.to_string()),
    }
}

fn parse_float_prefix(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut i = 0;

    if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
        i += 1;
    }

    if s[i..].starts_with("Infinity") {
        let inf = f64::INFINITY;
        return Some(if bytes.first() == Some(&b'-') { -inf } else { inf });
    }

    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let mut digits = i - int_start;

    if i < bytes.len() && bytes[i] == b'.' {
        let frac_start = i + 1;
        let mut j = frac_start;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        digits += j - frac_start;
        // A lone "." only counts when digits precede it.
        if digits > 0 {
            i = j;
        }
    }

    if digits == 0 {
        return None;
    }

    // Exponent is only taken when at least one digit follows it.
    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mut j = i + 1;
        if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            i = j;
        }
    }

    s[..i].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(raw: &str) -> f64 {
        match parse_field(raw) {
            FieldValue::Number(n) => n,
            other => panic!("expected number for {raw:?}, got {other:?}"),
        }
    }

    fn is_text(raw: &str) -> bool {
        matches!(parse_field(raw), FieldValue::Text(ref t) if t == raw)
    }

    #[test]
    fn plain_numbers() {
        assert_eq!(num("54"), 54.0);
        assert_eq!(num("2.5"), 2.5);
        assert_eq!(num("-1"), -1.0);
        assert_eq!(num("+3"), 3.0);
    }

    #[test]
    fn leading_whitespace_skipped() {
        assert_eq!(num("  2.5"), 2.5);
        assert_eq!(num("\t7"), 7.0);
    }

    #[test]
    fn trailing_garbage_ignored() {
        assert_eq!(num("12abc"), 12.0);
        assert_eq!(num("3.5 mm"), 3.5);
        assert_eq!(num("1.2.3"), 1.2);
    }

    #[test]
    fn fraction_without_integer_part() {
        assert_eq!(num(".5"), 0.5);
        assert_eq!(num("-.25"), -0.25);
        assert_eq!(num("5."), 5.0);
    }

    #[test]
    fn exponent_forms() {
        assert_eq!(num("1e3"), 1000.0);
        assert_eq!(num("2.5E-1"), 0.25);
        // Dangling exponent marker is not part of the number.
        assert_eq!(num("4e"), 4.0);
        assert_eq!(num("4e+"), 4.0);
    }

    #[test]
    fn infinity_accepted() {
        assert_eq!(num("Infinity"), f64::INFINITY);
        assert_eq!(num("-Infinity"), f64::NEG_INFINITY);
    }

    #[test]
    fn non_numeric_kept_as_text() {
        assert!(is_text("abc"));
        assert!(is_text(""));
        assert!(is_text("   "));
        assert!(is_text("."));
        assert!(is_text("-"));
        assert!(is_text("e5"));
        assert!(is_text("inf"));
    }

    #[test]
    fn payload_keeps_form_order() {
        let payload = FormPayload::from_pairs([("age", "54"), ("sex", "1"), ("note", "n/a")]);
        let json = serde_json::to_string(&payload).unwrap();
        assert_eq!(json, r#"{"age":54.0,"sex":1.0,"note":"n/a"}"#);
    }

    #[test]
    fn payload_repeated_name_overwrites_in_place() {
        let payload = FormPayload::from_pairs([("age", "54"), ("sex", "1"), ("age", "60")]);
        assert_eq!(payload.len(), 2);
        assert_eq!(payload.get("age"), Some(&FieldValue::Number(60.0)));
        let names: Vec<&str> = payload.iter().map(|(k, _)| k).collect();
        assert_eq!(names, ["age", "sex"]);
    }

    #[test]
    fn non_finite_serializes_as_null() {
        let payload = FormPayload::from_pairs([("x", "Infinity")]);
        let json = serde_json::to_string(&payload).unwrap();
        assert_eq!(json, r#"{"x":null}"#);
    }

    #[test]
    fn empty_payload() {
        let payload = FormPayload::new();
        assert!(payload.is_empty());
        assert_eq!(serde_json::to_string(&payload).unwrap(), "{}");
    }
}
