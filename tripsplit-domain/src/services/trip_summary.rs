use crate::model::{Expense, Money, SettlementResult, TripSummary};

impl TripSummary {
    /// Totals of a trip.
    ///
    /// The trip cost uses the sticker amount of every expense, so it reconciles with the
    /// expense list even when manual overrides disagree with an expense amount.
    pub fn compute(expenses: &[Expense], results: &[SettlementResult]) -> Self {
        let total_trip_cost: Money = expenses.iter().map(|expense| expense.amount).sum();
        let total_paid: Money = results.iter().map(SettlementResult::paid_amount).sum();

        Self {
            total_trip_cost,
            total_paid,
            total_pending: total_trip_cost - total_paid,
        }
    }
}
