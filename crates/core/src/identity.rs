//! Content-addressed receipt identifiers.
//!
//! A receipt's identifier is the SHA-256 digest of its canonical JSON form:
//! compact, keys in declaration order, amounts as `<whole>.<cc>`, and all
//! text (including the purchase date and time) exactly as submitted. Receipts
//! that serialize identically share an identifier.

use crate::domain::receipt::Receipt;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::borrow::Borrow;
use std::fmt;

/// 64-character lowercase hex SHA-256 digest naming a receipt's content.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ReceiptId(String);

impl ReceiptId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReceiptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for ReceiptId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

pub fn canonical_bytes(receipt: &Receipt) -> Vec<u8> {
    // This should not fail: every field serializes as a string or a sequence of
    // string-keyed structs, and writing into a Vec has no I/O errors.
    serde_json::to_vec(receipt).expect("receipt serialize failed")
}

pub fn identify(receipt: &Receipt) -> ReceiptId {
    let mut hasher = Sha256::new();
    hasher.update(canonical_bytes(receipt));
    ReceiptId(hex::encode(hasher.finalize()))
}
