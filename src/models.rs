//! Domain models shared by the form, the scorer client, and the results
//! table. The field list is fixed: every bank row carries the same thirteen
//! inputs, and the scorer reads them back by wire key.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// One of the fixed inputs on a bank row. The variant order is the order the
/// fields appear on screen.
pub enum BankField {
    BankName,
    Kppm,
    Ab,
    Apb,
    Ckpn,
    NplGross,
    NplNet,
    Roa,
    Roe,
    Nim,
    Bopo,
    Cir,
    Ldr,
}

impl BankField {
    /// Every field in form order.
    pub const ALL: [BankField; 13] = [
        BankField::BankName,
        BankField::Kppm,
        BankField::Ab,
        BankField::Apb,
        BankField::Ckpn,
        BankField::NplGross,
        BankField::NplNet,
        BankField::Roa,
        BankField::Roe,
        BankField::Nim,
        BankField::Bopo,
        BankField::Cir,
        BankField::Ldr,
    ];

    /// Permanent form name. Identifiers are derived from it as
    /// `{name}-{position}`.
    pub fn name(self) -> &'static str {
        match self {
            BankField::BankName => "bank-name",
            BankField::Kppm => "kppm",
            BankField::Ab => "ab",
            BankField::Apb => "apb",
            BankField::Ckpn => "ckpn",
            BankField::NplGross => "npl-gross",
            BankField::NplNet => "npl-net",
            BankField::Roa => "roa",
            BankField::Roe => "roe",
            BankField::Nim => "nim",
            BankField::Bopo => "bopo",
            BankField::Cir => "cir",
            BankField::Ldr => "ldr",
        }
    }

    /// JSON key the scorer expects for this field.
    pub fn wire_key(self) -> &'static str {
        match self {
            BankField::BankName => "name",
            BankField::NplGross => "npl_gross",
            BankField::NplNet => "npl_net",
            other => other.name(),
        }
    }

    /// Label shown next to the input.
    pub fn label(self) -> &'static str {
        match self {
            BankField::BankName => "Bank Name",
            BankField::Kppm => "KPMM (%)",
            BankField::Ab => "AB (%)",
            BankField::Apb => "APB (%)",
            BankField::Ckpn => "CKPN (%)",
            BankField::NplGross => "NPL Gross (%)",
            BankField::NplNet => "NPL Net (%)",
            BankField::Roa => "ROA (%)",
            BankField::Roe => "ROE (%)",
            BankField::Nim => "NIM (%)",
            BankField::Bopo => "BOPO (%)",
            BankField::Cir => "CIR (%)",
            BankField::Ldr => "LDR (%)",
        }
    }

    pub fn required(self) -> bool {
        true
    }

    pub fn is_numeric(self) -> bool {
        self != BankField::BankName
    }

    /// Whether `ch` may be typed into this field.
    pub fn accepts(self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        if self.is_numeric() {
            ch.is_ascii_digit() || ch == '.' || ch == '-'
        } else {
            true
        }
    }
}

impl fmt::Display for BankField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Validated payload for one bank, keyed by wire key. Serializes as a flat
/// JSON object of strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BankMetrics(BTreeMap<String, String>);

impl BankMetrics {
    pub fn insert(&mut self, field: BankField, value: impl Into<String>) {
        self.0.insert(field.wire_key().to_string(), value.into());
    }

    pub fn get(&self, field: BankField) -> Option<&str> {
        self.0.get(field.wire_key()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The scorer may send `ldr` back either as the submitted string or as a
/// parsed number; both display the same way.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Ratio {
    Number(f64),
    Text(String),
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ratio::Number(value) => write!(f, "{value}"),
            Ratio::Text(text) => f.write_str(text),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
/// One scored bank as returned by the scorer. Rank 1 is best.
pub struct RankedBank {
    pub rank: u32,
    pub name: String,
    pub ldr: Ratio,
    pub total_points: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_keys_match_scorer_names() {
        let keys: Vec<_> = BankField::ALL.iter().map(|f| f.wire_key()).collect();
        assert_eq!(
            keys,
            [
                "name", "kppm", "ab", "apb", "ckpn", "npl_gross", "npl_net", "roa", "roe", "nim",
                "bopo", "cir", "ldr"
            ]
        );
    }

    #[test]
    fn numeric_fields_reject_letters() {
        assert!(BankField::Roa.accepts('7'));
        assert!(BankField::Roa.accepts('.'));
        assert!(!BankField::Roa.accepts('x'));
        assert!(BankField::BankName.accepts('x'));
        assert!(!BankField::BankName.accepts('\n'));
    }

    #[test]
    fn ranked_bank_accepts_numeric_or_text_ldr() {
        let parsed: Vec<RankedBank> = serde_json::from_str(
            r#"[{"rank":1,"name":"A","ldr":"80","total_points":95},
                {"rank":2,"name":"B","ldr":75.5,"total_points":88.0}]"#,
        )
        .expect("valid payload");
        assert_eq!(parsed[0].ldr.to_string(), "80");
        assert_eq!(parsed[1].ldr.to_string(), "75.5");
        assert_eq!(parsed[1].total_points.to_string(), "88");
    }

    #[test]
    fn metrics_serialize_as_flat_object() {
        let mut metrics = BankMetrics::default();
        metrics.insert(BankField::BankName, "Alpha");
        metrics.insert(BankField::NplGross, "2.1");
        let json = serde_json::to_string(&metrics).expect("serialize");
        assert_eq!(json, r#"{"name":"Alpha","npl_gross":"2.1"}"#);
    }
}
