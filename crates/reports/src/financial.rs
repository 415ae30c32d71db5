//! Financial summaries over an inclusive date range.

use std::collections::BTreeMap;

use chrono::{Datelike, Days, Months, NaiveDate};
use common::Money;
use domain::{HerdStore, TransactionCategory, TransactionKind};
use serde::Serialize;
use store::Collection;

use crate::Result;

/// An inclusive calendar date range.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Creates a range from explicit bounds.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// The calendar month containing `today`, the default summary range.
    pub fn month_of(today: NaiveDate) -> Self {
        let start = today.with_day(1).unwrap_or(today);
        let end = start
            .checked_add_months(Months::new(1))
            .and_then(|next| next.checked_sub_days(Days::new(1)))
            .unwrap_or(today);
        Self { start, end }
    }

    /// Returns true if the date falls inside the range, bounds included.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Expense/revenue totals for one category.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryTotal {
    pub category: TransactionCategory,
    pub expense: Money,
    pub revenue: Money,
}

/// Financial totals over a date range.
#[derive(Debug, Clone, Serialize)]
pub struct FinancialSummary {
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// Sum of revenue records in the range.
    pub revenue: Money,
    /// Sum of expense records in the range.
    pub expense: Money,
    /// `revenue − expense`.
    pub net: Money,
    /// Totals per category, only categories that appeared in the range.
    pub by_category: Vec<CategoryTotal>,
}

pub(crate) async fn financial_summary(
    store: &HerdStore,
    range: DateRange,
) -> Result<FinancialSummary> {
    let records = store
        .financial
        .find(&|r: &domain::FinancialRecord| range.contains(r.date))
        .await?;

    let mut revenue = Money::zero();
    let mut expense = Money::zero();
    let mut categories: BTreeMap<TransactionCategory, (Money, Money)> = BTreeMap::new();

    for record in &records {
        let slot = categories
            .entry(record.category)
            .or_insert((Money::zero(), Money::zero()));
        match record.kind {
            TransactionKind::Expense => {
                expense += record.amount;
                slot.0 += record.amount;
            }
            TransactionKind::Revenue => {
                revenue += record.amount;
                slot.1 += record.amount;
            }
        }
    }

    Ok(FinancialSummary {
        start: range.start,
        end: range.end,
        revenue,
        expense,
        net: revenue - expense,
        by_category: categories
            .into_iter()
            .map(|(category, (expense, revenue))| CategoryTotal {
                category,
                expense,
                revenue,
            })
            .collect(),
    })
}
