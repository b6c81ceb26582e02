use crate::domain::amount::Amount;
use crate::domain::error::ValidationError;
use serde::Serialize;
use serde_json::Value;

/// A purchase receipt that has passed boundary validation.
///
/// Field order is significant: it is the key order of the canonical
/// serialization used for receipt identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub retailer: String,
    pub purchase_date: PurchaseDate,
    pub purchase_time: PurchaseTime,
    pub items: Vec<Item>,
    pub total: Amount,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub short_description: String,
    pub price: Amount,
}

/// Purchase date exactly as submitted, shaped `DDDD-DD-DD`.
///
/// Only the shape is checked; the text is kept verbatim so it hashes as sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PurchaseDate(String);

impl PurchaseDate {
    pub fn parse(s: &str) -> Option<Self> {
        has_shape(s, b"0000-00-00").then(|| Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn day(&self) -> u32 {
        two_digits(&self.0.as_bytes()[8..10])
    }
}

/// Purchase time exactly as submitted, shaped `DD:DD`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PurchaseTime(String);

impl PurchaseTime {
    pub fn parse(s: &str) -> Option<Self> {
        has_shape(s, b"00:00").then(|| Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn hour(&self) -> u32 {
        two_digits(&self.0.as_bytes()[0..2])
    }

    pub fn minute(&self) -> u32 {
        two_digits(&self.0.as_bytes()[3..5])
    }
}

// `0` in the template stands for any ASCII digit; every other byte must match exactly.
fn has_shape(s: &str, template: &[u8]) -> bool {
    s.len() == template.len()
        && s.bytes().zip(template).all(|(b, &t)| match t {
            b'0' => b.is_ascii_digit(),
            _ => b == t,
        })
}

fn two_digits(digits: &[u8]) -> u32 {
    digits
        .iter()
        .fold(0, |acc, d| acc * 10 + u32::from(d - b'0'))
}

impl Receipt {
    /// Validates an untrusted JSON request body and converts it into a `Receipt`.
    ///
    /// Checks run in a fixed order and the first failing check decides the error:
    /// required fields, the items array, each item, the total, then the date and time.
    pub fn from_json(body: &Value) -> Result<Self, ValidationError> {
        let retailer = non_empty_str(body.get("retailer"));
        let purchase_date = non_empty_str(body.get("purchaseDate"));
        let purchase_time = non_empty_str(body.get("purchaseTime"));
        let items = body.get("items").filter(|v| is_truthy(v));
        let total = body.get("total").filter(|v| is_truthy(v));

        let (Some(retailer), Some(purchase_date), Some(purchase_time), Some(items), Some(total)) =
            (retailer, purchase_date, purchase_time, items, total)
        else {
            return Err(ValidationError::MissingFields);
        };

        let items = items
            .as_array()
            .filter(|items| !items.is_empty())
            .ok_or(ValidationError::InvalidItems)?
            .iter()
            .map(Item::from_json)
            .collect::<Result<Vec<_>, _>>()?;

        let total = total
            .as_str()
            .and_then(|s| s.parse::<Amount>().ok())
            .ok_or(ValidationError::InvalidTotal)?;

        let purchase_date =
            PurchaseDate::parse(purchase_date).ok_or(ValidationError::InvalidPurchaseDateTime)?;
        let purchase_time =
            PurchaseTime::parse(purchase_time).ok_or(ValidationError::InvalidPurchaseDateTime)?;

        Ok(Self {
            retailer: retailer.to_string(),
            purchase_date,
            purchase_time,
            items,
            total,
        })
    }
}

impl Item {
    fn from_json(value: &Value) -> Result<Self, ValidationError> {
        let short_description =
            non_empty_str(value.get("shortDescription")).ok_or(ValidationError::InvalidItem)?;
        let price = value
            .get("price")
            .and_then(Value::as_str)
            .and_then(|s| s.parse::<Amount>().ok())
            .ok_or(ValidationError::InvalidItem)?;

        Ok(Self {
            short_description: short_description.to_string(),
            price,
        })
    }
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|s| !s.is_empty())
}

// Absent, null, "", false and 0 all count as a missing field.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
