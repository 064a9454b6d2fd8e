//! Client sanitizer: the security boundary between the internal audit
//! and anything a customer can see.
//!
//! Redaction is correct by construction: an explicit recursive copy
//! over [`serde_json::Value`] that never emits a denylisted key. The
//! string-scan validator exists as a second line of defense for tests
//! only; production paths must not rely on it.

use once_cell::sync::Lazy;
use serde_json::{Map, Value};

/// Field names (normalized: lowercased, underscores removed) that must
/// never reach a client-facing artifact.
static DENYLIST: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        // cost fields
        "cost",
        "costs",
        "totalcost",
        "directcost",
        "unitcost",
        "costbasis",
        "costbreakdown",
        "primecost",
        // margin fields, every variant in the data model
        "margin",
        "margins",
        "marginpercentage",
        "marginfraction",
        "desiredmargin",
        "ancmargin",
        "integratormargin",
        "margindollars",
        "markup",
        // structural/vendor rate tables
        "rates",
        "rateconfig",
        "hardwareratetiers",
        "structurefactor",
        "structurefactorindoor",
        "structurefactoroutdoor",
        "steelrate",
        "laborrate",
        "fieldlaborrateperhour",
        "installratepersqft",
        "shippingrateperlb",
        "bondrate",
        // AI provenance from RFP auto-fill
        "aiprovenance",
        "extractionconfidence",
        "extractionmodel",
        "rawnotes",
        "autofilled",
    ]
});

/// Zero values under these keys read as "we forgot to price this";
/// export an explicit placeholder instead of an ambiguous $0.
static PLACEHOLDERS: Lazy<Vec<(&'static str, &'static str)>> = Lazy::new(|| {
    vec![
        ("sellprice", "[PENDING PRICING]"),
        ("price", "[PENDING PRICING]"),
        ("subtotal", "[PENDING PRICING]"),
        ("finaltotal", "[PENDING PRICING]"),
    ]
});

fn normalize_key(key: &str) -> String {
    key.chars()
        .filter(|c| *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

fn is_denylisted(key: &str) -> bool {
    let normalized = normalize_key(key);
    DENYLIST.iter().any(|entry| *entry == normalized)
}

fn placeholder_for(key: &str) -> Option<&'static str> {
    let normalized = normalize_key(key);
    PLACEHOLDERS
        .iter()
        .find(|(field, _)| *field == normalized)
        .map(|(_, placeholder)| *placeholder)
}

fn is_zero_number(value: &Value) -> bool {
    match value {
        Value::Number(n) => n.as_f64() == Some(0.0),
        // Decimals serialize as strings
        Value::String(s) => matches!(s.parse::<f64>(), Ok(v) if v == 0.0),
        Value::Null => true,
        _ => false,
    }
}

/// A line item row whose category names structural scope leaks the
/// existence and size of the steel package even when zeroed, so the
/// whole row is dropped.
fn is_structural_line_item(value: &Value) -> bool {
    let Value::Object(map) = value else {
        return false;
    };
    ["category", "label", "name"].iter().any(|field| {
        map.get(*field)
            .and_then(Value::as_str)
            .map(|s| {
                let lower = s.to_lowercase();
                lower.contains("structur") || lower.contains("steel")
            })
            .unwrap_or(false)
    })
}

/// Deep-copy `data` with every denylisted key stripped, structural line
/// items dropped, and ambiguous zero prices replaced with placeholders.
///
/// Never mutates its input. Idempotent: stripped keys cannot reappear,
/// so `sanitize_for_client(&sanitize_for_client(x)) == sanitize_for_client(x)`.
pub fn sanitize_for_client(data: &Value) -> Value {
    match data {
        Value::Object(map) => {
            let mut out = Map::with_capacity(map.len());
            for (key, value) in map {
                if is_denylisted(key) {
                    continue;
                }
                if let Some(placeholder) = placeholder_for(key) {
                    if is_zero_number(value) {
                        out.insert(key.clone(), Value::String(placeholder.to_string()));
                        continue;
                    }
                }
                out.insert(key.clone(), sanitize_for_client(value));
            }
            Value::Object(out)
        }
        Value::Array(items) => Value::Array(
            items
                .iter()
                .filter(|item| !is_structural_line_item(item))
                .map(sanitize_for_client)
                .collect(),
        ),
        scalar => scalar.clone(),
    }
}

/// Heuristic re-scan of serialized output for leaked denylist names.
///
/// Intended for tests and assertions, not request paths: it matches
/// text, not structure, and can false-positive on string content that
/// happens to look like a key.
pub fn validate_sanitized(data: &Value) -> bool {
    let serialized = match serde_json::to_string(data) {
        Ok(s) => s,
        Err(_) => return false,
    };
    let normalized: String = serialized
        .chars()
        .filter(|c| *c != '_')
        .flat_map(char::to_lowercase)
        .collect();
    !DENYLIST
        .iter()
        .any(|entry| normalized.contains(&format!("\"{}\":", entry)))
}
