use crate::{
    model::{
        Expense, Money, Participant, ParticipantId, SettlementReport, SettlementResult,
        TripSummary,
    },
    services::ExpenseAllocator,
};
use fxhash::FxBuildHasher;
use indexmap::IndexMap;
use rust_decimal::Decimal;

/// Settlement calculation service
pub struct SettlementCalculator;

impl SettlementCalculator {
    /// Calculate the settlement line of every participant
    ///
    /// Prorated participants come first in list order, followed by fixed-contribution
    /// participants in list order. Participants sharing an id are settled once.
    ///
    /// # Arguments
    /// * `participants` - Trip participants, fixed and prorated
    /// * `expenses` - Expenses to allocate
    pub fn calculate(
        &self,
        participants: &[Participant],
        expenses: &[Expense],
    ) -> Vec<SettlementResult> {
        let mut raw_shares: IndexMap<&ParticipantId, (&Participant, Money), FxBuildHasher> =
            IndexMap::default();
        for participant in participants.iter().filter(|p| !p.is_fixed()) {
            raw_shares
                .entry(&participant.id)
                .or_insert((participant, Money::ZERO));
        }

        let allocator = ExpenseAllocator::new(participants);
        for expense in expenses {
            let allocation = allocator.allocate(expense);
            for credit in &allocation.credits {
                if let Some((_, raw_share)) = raw_shares.get_mut(credit.participant_id) {
                    *raw_share += credit.amount;
                }
            }
        }

        let fixed: Vec<&Participant> = participants.iter().filter(|p| p.is_fixed()).collect();
        let total_fixed_contribution: Money = fixed.iter().map(|p| p.fixed_contribution()).sum();
        let discount_per_person = if raw_shares.is_empty() {
            Money::ZERO
        } else {
            total_fixed_contribution / Decimal::from(raw_shares.len() as u64)
        };

        tracing::debug!(
            prorated_count = raw_shares.len(),
            fixed_count = fixed.len(),
            expense_count = expenses.len(),
            total_fixed_contribution = %total_fixed_contribution,
            discount_per_person = %discount_per_person,
            "Calculated trip settlement"
        );

        let mut results = Vec::with_capacity(raw_shares.len() + fixed.len());

        for (participant, raw_share) in raw_shares.into_values() {
            let final_amount = (raw_share - discount_per_person).non_negative();
            results.push(SettlementResult {
                participant_id: participant.id.clone(),
                participant_name: participant.name.clone(),
                raw_share,
                discount: discount_per_person,
                final_amount,
                prepaid_amount: participant.prepaid_amount,
                remaining_amount: final_amount - participant.prepaid_amount,
                is_fixed: false,
                is_paid: participant.is_paid,
                stay_days: participant.stay_days,
            });
        }

        for participant in fixed {
            let contribution = participant.fixed_contribution();
            results.push(SettlementResult {
                participant_id: participant.id.clone(),
                participant_name: participant.name.clone(),
                raw_share: contribution,
                discount: Money::ZERO,
                final_amount: contribution,
                prepaid_amount: participant.prepaid_amount,
                remaining_amount: contribution - participant.prepaid_amount,
                is_fixed: true,
                is_paid: participant.is_paid,
                stay_days: participant.stay_days,
            });
        }

        results
    }

    /// Calculate the settlement lines together with the trip totals
    pub fn settle(&self, participants: &[Participant], expenses: &[Expense]) -> SettlementReport {
        let results = self.calculate(participants, expenses);
        let summary = TripSummary::compute(expenses, &results);
        SettlementReport { results, summary }
    }
}
