#![forbid(unsafe_code)]

//! Ticket records and the tolerant normalizer that produces them.
//!
//! Raw ticket data arrives as loosely-typed JSON. [`normalize`] turns it into
//! display-ready [`Ticket`] values without ever failing:
//!
//! | input                           | result                     |
//! |---------------------------------|----------------------------|
//! | not an array                    | empty list                 |
//! | element not an object           | element dropped            |
//! | `id` missing or `null`          | element dropped            |
//! | bad `title`                     | `"Untitled"`               |
//! | bad `price_cents`               | price `0`                  |
//! | unrecognized `currency`         | [`Currency::Usd`]          |
//!
//! Each field rule is its own total function (`coerce_*`) so the rules can be
//! tested in isolation.
//!
//! # Usage
//!
//! ```
//! use serde_json::json;
//! use tix_core::ticket::{Currency, normalize};
//!
//! let tickets = normalize(&json!([
//!     { "id": 7, "title": "Opera", "price_cents": 4550, "currency": "EUR" },
//!     { "id": null, "title": "dropped" },
//! ]));
//!
//! assert_eq!(tickets.len(), 1);
//! assert_eq!(tickets[0].id, "7");
//! assert_eq!(tickets[0].price, 45.5);
//! assert_eq!(tickets[0].currency, Currency::Eur);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Title used when the raw title is missing, not a string, or blank.
pub const UNTITLED: &str = "Untitled";

/// Supported currencies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    #[default]
    #[serde(rename = "USD")]
    Usd,
    #[serde(rename = "EUR")]
    Eur,
    #[serde(rename = "GBP")]
    Gbp,
}

impl Currency {
    /// All supported currencies.
    pub const ALL: [Currency; 3] = [Currency::Usd, Currency::Eur, Currency::Gbp];

    /// Parse an ISO code. Matching is exact (`"usd"` is not recognized).
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "USD" => Some(Self::Usd),
            "EUR" => Some(Self::Eur),
            "GBP" => Some(Self::Gbp),
            _ => None,
        }
    }

    /// ISO 4217 code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Usd => "USD",
            Self::Eur => "EUR",
            Self::Gbp => "GBP",
        }
    }

    /// Display symbol.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Usd => "$",
            Self::Eur => "€",
            Self::Gbp => "£",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A normalized, display-ready ticket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    /// Source id, stringified.
    pub id: String,
    /// Title, never blank.
    pub title: String,
    /// Price in currency units (`price_cents / 100`).
    pub price: f64,
    /// Currency of `price`.
    pub currency: Currency,
}

impl Ticket {
    /// Price with its currency symbol and two decimals, e.g. `$12.34`.
    #[must_use]
    pub fn display_price(&self) -> String {
        let symbol = self.currency.symbol();
        if self.price < 0.0 {
            format!("-{symbol}{:.2}", -self.price)
        } else {
            format!("{symbol}{:.2}", self.price)
        }
    }
}

/// Normalize an arbitrary JSON value into tickets.
///
/// Never fails; see the module docs for the substitution rules.
#[must_use]
pub fn normalize(input: &Value) -> Vec<Ticket> {
    let Some(items) = input.as_array() else {
        crate::trace!(kind = value_kind(input), "ticket input is not an array");
        return Vec::new();
    };

    let tickets: Vec<Ticket> = items
        .iter()
        .filter_map(|item| {
            let ticket = normalize_record(item);
            if ticket.is_none() {
                crate::trace!("dropping ticket record without id");
            }
            ticket
        })
        .collect();

    crate::debug!(
        input = items.len(),
        kept = tickets.len(),
        "normalized tickets"
    );
    tickets
}

/// Parse JSON text, then [`normalize`] it.
///
/// Only malformed JSON is an error; every well-formed document normalizes.
pub fn normalize_json(text: &str) -> Result<Vec<Ticket>, serde_json::Error> {
    let value: Value = serde_json::from_str(text)?;
    Ok(normalize(&value))
}

/// Normalize one raw element. `None` means the element is dropped.
#[must_use]
pub fn normalize_record(item: &Value) -> Option<Ticket> {
    let record = item.as_object()?;
    let id = coerce_id(record.get("id")?)?;
    Some(Ticket {
        id,
        title: coerce_title(record.get("title")),
        price: coerce_price(record.get("price_cents")),
        currency: coerce_currency(record.get("currency")),
    })
}

/// Stringify a raw id. `None` for `null`.
///
/// Numbers print the way JavaScript's `String()` does: integral floats have
/// no fractional part (`1.0` → `"1"`), and magnitudes at or above `1e21` or
/// below `1e-6` use exponent form (`"1e+21"`, `"1.5e-7"`).
#[must_use]
pub fn coerce_id(raw: &Value) -> Option<String> {
    match raw {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(number_to_string(n)),
        Value::Array(_) | Value::Object(_) => Some(raw.to_string()),
    }
}

/// Title rule: non-blank strings pass through untouched, anything else is
/// [`UNTITLED`].
#[must_use]
pub fn coerce_title(raw: Option<&Value>) -> String {
    match raw {
        Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
        _ => UNTITLED.to_string(),
    }
}

/// Price rule: finite numeric cents divided by 100, otherwise `0`.
#[must_use]
pub fn coerce_price(raw: Option<&Value>) -> f64 {
    raw.and_then(Value::as_f64)
        .filter(|cents| cents.is_finite())
        .map_or(0.0, |cents| cents / 100.0)
}

/// Currency rule: exact supported codes pass, anything else is USD.
#[must_use]
pub fn coerce_currency(raw: Option<&Value>) -> Currency {
    raw.and_then(Value::as_str)
        .and_then(Currency::from_code)
        .unwrap_or_default()
}

fn number_to_string(n: &serde_json::Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        Some(f) if f == 0.0 => "0".to_string(),
        Some(f) if f.abs() >= 1e21 || f.abs() < 1e-6 => exponent_form(f),
        Some(f) if f.fract() == 0.0 => format!("{f:.0}"),
        Some(f) => f.to_string(),
        None => n.to_string(),
    }
}

/// `1.5e-7`, `1e+21`: shortest digits, explicit sign on positive exponents.
fn exponent_form(f: f64) -> String {
    let s = format!("{f:e}");
    match s.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
        _ => s,
    }
}

#[cfg(feature = "tracing")]
fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn ticket(id: &str, title: &str, price: f64, currency: Currency) -> Ticket {
        Ticket {
            id: id.to_string(),
            title: title.to_string(),
            price,
            currency,
        }
    }

    #[test]
    fn non_array_input_is_empty() {
        for input in [
            Value::Null,
            json!("x"),
            json!(42),
            json!({}),
            json!(true),
            json!({ "id": 1 }),
        ] {
            assert!(normalize(&input).is_empty(), "input {input} should be empty");
        }
    }

    #[test]
    fn empty_array_is_empty() {
        assert!(normalize(&json!([])).is_empty());
    }

    #[test]
    fn null_title_becomes_untitled() {
        let out = normalize(&json!([
            { "id": 1, "title": null, "price_cents": 1234, "currency": "USD" }
        ]));
        assert_eq!(out, vec![ticket("1", "Untitled", 12.34, Currency::Usd)]);
    }

    #[test]
    fn non_numeric_price_becomes_zero() {
        let out = normalize(&json!([
            { "id": 1, "title": "T", "price_cents": "bad", "currency": "USD" }
        ]));
        assert_eq!(out, vec![ticket("1", "T", 0.0, Currency::Usd)]);
    }

    #[test]
    fn unknown_currency_defaults_to_usd() {
        let out = normalize(&json!([
            { "id": 1, "title": "T", "price_cents": 1000, "currency": "JPY" }
        ]));
        assert_eq!(out, vec![ticket("1", "T", 10.0, Currency::Usd)]);
    }

    #[test]
    fn missing_ids_are_dropped_in_order() {
        let out = normalize(&json!([
            { "id": "a", "title": "First" },
            { "id": null, "title": "Gone" },
            { "id": "c", "title": "Third" },
            { "title": "Also gone" },
            { "id": 4, "title": "Fourth" },
        ]));
        let ids: Vec<&str> = out.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["a", "c", "4"]);
    }

    #[test]
    fn one_null_id_of_four_yields_three() {
        let out = normalize(&json!([
            { "id": 1 }, { "id": 2 }, { "id": null }, { "id": 3 }
        ]));
        assert_eq!(out.len(), 3);
        assert_eq!(out[2].id, "3");
    }

    #[test]
    fn non_object_elements_are_dropped() {
        let out = normalize(&json!([1, "two", null, [3], { "id": 5 }]));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, "5");
    }

    #[test]
    fn extra_fields_are_ignored() {
        let out = normalize(&json!([
            { "id": 9, "title": "Gig", "price_cents": 500, "currency": "GBP", "venue": "Hall" }
        ]));
        let json = serde_json::to_value(&out[0]).unwrap();
        assert_eq!(
            json,
            json!({ "id": "9", "title": "Gig", "price": 5.0, "currency": "GBP" })
        );
    }

    #[test]
    fn id_stringification() {
        assert_eq!(coerce_id(&json!(1)), Some("1".into()));
        assert_eq!(coerce_id(&json!(-12)), Some("-12".into()));
        assert_eq!(coerce_id(&json!(1.0)), Some("1".into()));
        assert_eq!(coerce_id(&json!(1.5)), Some("1.5".into()));
        assert_eq!(coerce_id(&json!("abc")), Some("abc".into()));
        assert_eq!(coerce_id(&json!(false)), Some("false".into()));
        assert_eq!(coerce_id(&json!(0)), Some("0".into()));
        assert_eq!(coerce_id(&Value::Null), None);
    }

    #[test]
    fn title_rules() {
        assert_eq!(coerce_title(None), UNTITLED);
        assert_eq!(coerce_title(Some(&json!(""))), UNTITLED);
        assert_eq!(coerce_title(Some(&json!("   \t"))), UNTITLED);
        assert_eq!(coerce_title(Some(&json!(12))), UNTITLED);
        assert_eq!(coerce_title(Some(&json!("  Spaced  "))), "  Spaced  ");
    }

    #[test]
    fn price_rules() {
        assert_eq!(coerce_price(Some(&json!(1234))), 12.34);
        assert_eq!(coerce_price(Some(&json!(99.5))), 0.995);
        assert_eq!(coerce_price(Some(&json!("1234"))), 0.0);
        assert_eq!(coerce_price(Some(&Value::Null)), 0.0);
        assert_eq!(coerce_price(Some(&Value::from(f64::NAN))), 0.0);
        assert_eq!(coerce_price(None), 0.0);
    }

    #[test]
    fn currency_rules() {
        assert_eq!(coerce_currency(Some(&json!("EUR"))), Currency::Eur);
        assert_eq!(coerce_currency(Some(&json!("GBP"))), Currency::Gbp);
        assert_eq!(coerce_currency(Some(&json!("eur"))), Currency::Usd);
        assert_eq!(coerce_currency(Some(&json!("CAD"))), Currency::Usd);
        assert_eq!(coerce_currency(Some(&Value::Null)), Currency::Usd);
        assert_eq!(coerce_currency(None), Currency::Usd);
    }

    #[test]
    fn normalize_json_parses_text() {
        let out = normalize_json(r#"[{"id": "x1", "price_cents": 250}]"#).unwrap();
        assert_eq!(out, vec![ticket("x1", "Untitled", 2.5, Currency::Usd)]);
        assert!(normalize_json("{not json").is_err());
        assert!(normalize_json("\"text\"").unwrap().is_empty());
    }

    #[test]
    fn display_price_formats_symbol() {
        assert_eq!(ticket("1", "t", 12.34, Currency::Usd).display_price(), "$12.34");
        assert_eq!(ticket("1", "t", 10.0, Currency::Eur).display_price(), "€10.00");
        assert_eq!(ticket("1", "t", 0.5, Currency::Gbp).display_price(), "£0.50");
        assert_eq!(ticket("1", "t", -5.0, Currency::Usd).display_price(), "-$5.00");
    }

    #[test]
    fn normalize_is_deterministic() {
        let input = json!([
            { "id": 1, "title": "A", "price_cents": 100 },
            { "id": 2, "title": "", "currency": "EUR" },
        ]);
        assert_eq!(normalize(&input), normalize(&input));
    }

    #[test]
    fn float_ids_use_exponent_form_at_the_extremes() {
        assert_eq!(coerce_id(&json!(1.5e-7)).as_deref(), Some("1.5e-7"));
        assert_eq!(coerce_id(&json!(-2e-9)).as_deref(), Some("-2e-9"));
        assert_eq!(coerce_id(&json!(1e21)).as_deref(), Some("1e+21"));
        assert_eq!(coerce_id(&json!(1.25e22)).as_deref(), Some("1.25e+22"));
        assert_eq!(coerce_id(&json!(1e20)).as_deref(), Some("100000000000000000000"));
        assert_eq!(coerce_id(&json!(0.000001)).as_deref(), Some("0.000001"));
        assert_eq!(coerce_id(&json!(2.5)).as_deref(), Some("2.5"));
    }
}
