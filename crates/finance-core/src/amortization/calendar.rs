//! Due-date lookups over a produced schedule: the next installment owed
//! and the installments falling inside a calendar window.

use chrono::NaiveDate;

use super::schedule::ScheduleRow;

/// First installment due on or after `as_of`, or `None` once the debt has
/// matured.
pub fn next_installment(rows: &[ScheduleRow], as_of: NaiveDate) -> Option<&ScheduleRow> {
    rows.iter().find(|r| r.due_date >= as_of)
}

/// Installments whose due date lies in `from..=to`, in the order the
/// schedule produced them.
pub fn installments_between(
    rows: &[ScheduleRow],
    from: NaiveDate,
    to: NaiveDate,
) -> Vec<&ScheduleRow> {
    if from > to {
        return Vec::new();
    }
    rows.iter()
        .filter(|r| r.due_date >= from && r.due_date <= to)
        .collect()
}
