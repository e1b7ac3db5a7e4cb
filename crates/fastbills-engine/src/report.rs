//! # Reporting
//!
//! Pure read-side queries over the current bills/products snapshot. No
//! caching: every call recomputes from live state.
//!
//! Window boundaries are calendar boundaries in local time. Daily starts
//! at midnight today, weekly at midnight on the most recent Sunday,
//! monthly at midnight on the first of the month.

use chrono::{DateTime, Datelike, Duration, Local, NaiveDateTime, NaiveTime};

use fastbills_core::{Bill, Money, PaymentMethod, Product, ReportTimeframe, StoreResult};

use crate::store::Store;

// =============================================================================
// Sales Summary
// =============================================================================

/// Aggregate totals over a bill slice, by payment method.
///
/// Pure projection over an already-filtered report; refund bills carry
/// negative amounts and subtract naturally.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesSummary {
    pub bill_count: usize,
    /// Sum of subtotals.
    pub gross: Money,
    pub tax: Money,
    pub discount: Money,
    /// Sum of final amounts.
    pub net: Money,
    pub cash: Money,
    pub card: Money,
    pub upi: Money,
}

/// Totals a bill slice. Callers filter first (time window, void status);
/// this folds whatever it is given.
pub fn summarize_sales(bills: &[Bill]) -> SalesSummary {
    let method_total = |method: PaymentMethod| -> Money {
        bills
            .iter()
            .filter(|bill| bill.payment_method == method)
            .map(|bill| bill.final_amount)
            .sum()
    };

    SalesSummary {
        bill_count: bills.len(),
        gross: bills.iter().map(|bill| bill.total).sum(),
        tax: bills.iter().map(|bill| bill.tax).sum(),
        discount: bills.iter().map(|bill| bill.discount).sum(),
        net: bills.iter().map(|bill| bill.final_amount).sum(),
        cash: method_total(PaymentMethod::Cash),
        card: method_total(PaymentMethod::Card),
        upi: method_total(PaymentMethod::Upi),
    }
}

// =============================================================================
// Window Boundaries
// =============================================================================

/// Start boundary for a report window, as a local civil time.
fn start_of_timeframe(now: DateTime<Local>, timeframe: ReportTimeframe) -> NaiveDateTime {
    let today = now.date_naive();
    let start_day = match timeframe {
        ReportTimeframe::Daily => today,
        ReportTimeframe::Weekly => {
            today - Duration::days(i64::from(now.weekday().num_days_from_sunday()))
        }
        ReportTimeframe::Monthly => today.with_day(1).unwrap_or(today),
    };
    start_day.and_time(NaiveTime::MIN)
}

// =============================================================================
// Report Queries
// =============================================================================

impl Store {
    /// Bills since the window's start boundary, excluding voided bills.
    ///
    /// With a category filter, each bill's item list is reduced to that
    /// category first and bills left with no matching items are dropped
    /// entirely.
    ///
    /// Requires a session; role is not checked at this layer.
    pub fn sales_report(
        &self,
        timeframe: ReportTimeframe,
        category: Option<&str>,
    ) -> StoreResult<Vec<Bill>> {
        self.authorize("generate reports", None)?;
        Ok(self.sales_report_at(Local::now(), timeframe, category))
    }

    fn sales_report_at(
        &self,
        now: DateTime<Local>,
        timeframe: ReportTimeframe,
        category: Option<&str>,
    ) -> Vec<Bill> {
        let start = start_of_timeframe(now, timeframe);

        let in_window = self
            .bills
            .iter()
            .filter(|bill| !bill.is_voided())
            .filter(|bill| bill.date.with_timezone(&Local).naive_local() >= start)
            .cloned();

        match category {
            None => in_window.collect(),
            Some(category) => in_window
                .filter_map(|mut bill| {
                    bill.items.retain(|item| item.product.category == category);
                    if bill.items.is_empty() {
                        None
                    } else {
                        Some(bill)
                    }
                })
                .collect(),
        }
    }

    /// The full product list sorted ascending by stock, so the emptiest
    /// shelves lead. Requires a session.
    pub fn inventory_report(&self) -> StoreResult<Vec<Product>> {
        self.authorize("generate reports", None)?;
        let mut products = self.products.clone();
        products.sort_by_key(|product| product.stock_quantity);
        Ok(products)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
