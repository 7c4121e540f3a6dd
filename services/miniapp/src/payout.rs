//! Payout deadline and cashback derivation
//!
//! Pure date math shared by every screen that shows a deal's money side,
//! so the numbers cannot drift between the catalog, the order summary and
//! the seller reports. Callers pass "today" explicitly.

use chrono::{Days, NaiveDate};

use crate::models::{PayoutTime, Product};

/// Cashback the buyer is owed for one deal
pub fn cashback(product: &Product) -> f64 {
    product.wb_price - product.price
}

/// Days until the cashback becomes due, by payout policy
fn policy_days(policy: PayoutTime) -> u64 {
    match policy {
        PayoutTime::AfterReview | PayoutTime::AfterDelivery => 7,
        PayoutTime::On15thDay => 15,
    }
}

/// Payout due date; `None` when the policy is unknown
pub fn due_date(order_date: NaiveDate, policy: Option<PayoutTime>) -> Option<NaiveDate> {
    let days = policy_days(policy?);
    order_date.checked_add_days(Days::new(days))
}

/// Signed day count until `due`; negative once overdue
pub fn days_left(due: NaiveDate, today: NaiveDate) -> i64 {
    (due - today).num_days()
}

/// Russian plural form for a day count
pub fn pluralize_days(n: i64) -> &'static str {
    let n = n.abs();
    let tail = n % 100;
    if (11..=14).contains(&tail) {
        return "дней";
    }
    match n % 10 {
        1 => "день",
        2..=4 => "дня",
        _ => "дней",
    }
}

/// "осталось N дней" while time remains, "просрочено на N дней" otherwise
pub fn deadline_label(due: NaiveDate, today: NaiveDate) -> String {
    let left = days_left(due, today);
    if left > 0 {
        format!("осталось {left} {}", pluralize_days(left))
    } else {
        let overdue = -left;
        format!("просрочено на {overdue} {}", pluralize_days(overdue))
    }
}

/// Buckets seller report lists by how close the payout deadline is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayoutUrgency {
    /// More than four days left
    OnTrack,
    /// Between zero and four days left
    DueSoon,
    /// Past the due date
    Overdue,
}

pub fn classify(due: NaiveDate, today: NaiveDate) -> PayoutUrgency {
    let left = days_left(due, today);
    if left < 0 {
        PayoutUrgency::Overdue
    } else if left > 4 {
        PayoutUrgency::OnTrack
    } else {
        PayoutUrgency::DueSoon
    }
}

/// Dates are shown as dd.mm.yyyy throughout the app
pub fn format_due_date(date: NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}
