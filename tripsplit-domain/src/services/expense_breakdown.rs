use crate::{
    model::{Expense, Money, Participant, ParticipantId},
    services::{ExpenseAllocator, ShareSource},
};
use fxhash::FxHashSet;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BreakdownCell {
    pub amount: Money,
    pub source: ShareSource,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BreakdownRow<'a> {
    pub expense: &'a Expense,
    /// One entry per column; `None` when the participant has no share on this expense.
    pub cells: Vec<Option<BreakdownCell>>,
}

/// Expense x participant share matrix
///
/// Columns are the prorated participants. Column totals equal each participant's raw
/// share; the grand total is the sum of expense amounts.
#[derive(Clone, Debug, PartialEq)]
pub struct ExpenseBreakdown<'a> {
    pub columns: Vec<&'a Participant>,
    pub rows: Vec<BreakdownRow<'a>>,
    pub column_totals: Vec<Money>,
    pub grand_total: Money,
}

impl<'a> ExpenseBreakdown<'a> {
    pub fn build(participants: &'a [Participant], expenses: &'a [Expense]) -> Self {
        let mut seen: FxHashSet<&ParticipantId> = FxHashSet::default();
        let columns: Vec<&'a Participant> = participants
            .iter()
            .filter(|p| !p.is_fixed() && seen.insert(&p.id))
            .collect();

        let allocator = ExpenseAllocator::new(participants);
        let mut column_totals = vec![Money::ZERO; columns.len()];
        let mut rows = Vec::with_capacity(expenses.len());

        for expense in expenses {
            let allocation = allocator.allocate(expense);
            let cells: Vec<Option<BreakdownCell>> = columns
                .iter()
                .map(|participant| {
                    allocation
                        .credit_for(&participant.id)
                        .map(|credit| BreakdownCell {
                            amount: credit.amount,
                            source: credit.source,
                        })
                })
                .collect();

            for (total, cell) in column_totals.iter_mut().zip(&cells) {
                if let Some(cell) = cell {
                    *total += cell.amount;
                }
            }

            rows.push(BreakdownRow { expense, cells });
        }

        Self {
            columns,
            rows,
            column_totals,
            grand_total: expenses.iter().map(|expense| expense.amount).sum(),
        }
    }

    pub fn has_manual_cells(&self) -> bool {
        self.rows
            .iter()
            .flat_map(|row| row.cells.iter().flatten())
            .any(|cell| cell.source == ShareSource::Manual)
    }
}
