//! Loyalty points rules.
//!
//! Every rule is evaluated once per receipt and the results are summed; no
//! rule depends on another.

use crate::domain::receipt::{Item, PurchaseTime, Receipt};
use serde::Serialize;

const ROUND_DOLLAR_POINTS: u64 = 50;
const QUARTER_MULTIPLE_POINTS: u64 = 25;
const POINTS_PER_ITEM_PAIR: u64 = 5;
const ODD_DAY_POINTS: u64 = 6;
const AFTERNOON_POINTS: u64 = 10;

/// Points contributed by each rule for a single receipt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PointsBreakdown {
    pub retailer_alphanumerics: u64,
    pub round_dollar_total: u64,
    pub quarter_multiple_total: u64,
    pub item_pairs: u64,
    pub description_lengths: u64,
    pub odd_purchase_day: u64,
    pub afternoon_window: u64,
}

impl PointsBreakdown {
    pub fn total(&self) -> u64 {
        [
            self.retailer_alphanumerics,
            self.round_dollar_total,
            self.quarter_multiple_total,
            self.item_pairs,
            self.description_lengths,
            self.odd_purchase_day,
            self.afternoon_window,
        ]
        .into_iter()
        .fold(0, u64::saturating_add)
    }
}

pub fn breakdown(receipt: &Receipt) -> PointsBreakdown {
    PointsBreakdown {
        retailer_alphanumerics: receipt
            .retailer
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .count() as u64,
        round_dollar_total: award(receipt.total.is_whole_dollars(), ROUND_DOLLAR_POINTS),
        quarter_multiple_total: award(
            receipt.total.is_multiple_of_quarter(),
            QUARTER_MULTIPLE_POINTS,
        ),
        item_pairs: (receipt.items.len() / 2) as u64 * POINTS_PER_ITEM_PAIR,
        description_lengths: receipt
            .items
            .iter()
            .map(description_points)
            .fold(0, u64::saturating_add),
        odd_purchase_day: award(receipt.purchase_date.day() % 2 == 1, ODD_DAY_POINTS),
        afternoon_window: award(in_afternoon_window(&receipt.purchase_time), AFTERNOON_POINTS),
    }
}

pub fn score(receipt: &Receipt) -> u64 {
    breakdown(receipt).total()
}

fn award(condition: bool, points: u64) -> u64 {
    if condition {
        points
    } else {
        0
    }
}

fn description_points(item: &Item) -> u64 {
    // A blank description trims to length 0, which still counts.
    if description_length(&item.short_description) % 3 == 0 {
        item.price.fifth_rounded_up()
    } else {
        0
    }
}

/// Length in UTF-16 code units after trimming ECMAScript whitespace, so
/// `"ab😀"` is 4 long and a leading U+FEFF is trimmed away.
fn description_length(description: &str) -> usize {
    description
        .trim_matches(is_ecmascript_whitespace)
        .encode_utf16()
        .count()
}

// WhiteSpace and LineTerminator code points. Unlike `char::is_whitespace`
// this includes U+FEFF and excludes U+0085.
fn is_ecmascript_whitespace(c: char) -> bool {
    matches!(
        c,
        '\u{0009}'
            | '\u{000A}'
            | '\u{000B}'
            | '\u{000C}'
            | '\u{000D}'
            | '\u{0020}'
            | '\u{00A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

// 14:00 is excluded while all of 15:xx is included.
fn in_afternoon_window(time: &PurchaseTime) -> bool {
    (time.hour() == 14 && time.minute() > 0) || time.hour() == 15
}
