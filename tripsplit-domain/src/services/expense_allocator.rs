use crate::model::{Expense, Money, Participant, ParticipantId};
use fxhash::{FxBuildHasher, FxHashMap};
use indexmap::IndexSet;
use rust_decimal::Decimal;

/// Origin of a share credited to a participant on one expense
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShareSource {
    Manual,
    Automatic,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShareCredit<'a> {
    pub participant_id: &'a ParticipantId,
    pub amount: Money,
    pub source: ShareSource,
}

/// Credits produced by a single expense
#[derive(Clone, Debug, PartialEq)]
pub struct ExpenseAllocation<'a> {
    /// Manual credits first (override order), then prorated credits (expense order).
    pub credits: Vec<ShareCredit<'a>>,
    /// Amount left for proration after manual overrides, never negative.
    pub remaining: Money,
}

impl<'a> ExpenseAllocation<'a> {
    pub fn credit_for(&self, participant_id: &ParticipantId) -> Option<&ShareCredit<'a>> {
        self.credits
            .iter()
            .find(|credit| credit.participant_id == participant_id)
    }

    pub fn allocated_total(&self) -> Money {
        self.credits.iter().map(|credit| credit.amount).sum()
    }
}

/// Splits expenses among prorated participants.
///
/// Unknown ids and fixed-contribution participants are ignored, manual overrides
/// replace proration for their participant, and the remainder is divided by stay
/// days. Never fails: malformed input degrades to fewer credits.
pub struct ExpenseAllocator<'a> {
    prorated: FxHashMap<&'a ParticipantId, &'a Participant>,
}

impl<'a> ExpenseAllocator<'a> {
    pub fn new(participants: &'a [Participant]) -> Self {
        let mut prorated = FxHashMap::default();
        for participant in participants.iter().filter(|p| !p.is_fixed()) {
            prorated.entry(&participant.id).or_insert(participant);
        }
        Self { prorated }
    }

    pub fn is_prorated(&self, participant_id: &ParticipantId) -> bool {
        self.prorated.contains_key(participant_id)
    }

    pub fn allocate(&self, expense: &'a Expense) -> ExpenseAllocation<'a> {
        let manual = &expense.manual_distributions;
        let remaining = (expense.amount - expense.manual_total()).non_negative();

        let involved: IndexSet<&'a ParticipantId, FxBuildHasher> = expense
            .participant_ids
            .iter()
            .filter(|id| self.prorated.contains_key(id))
            .collect();

        let auto_participants: Vec<&'a Participant> = involved
            .into_iter()
            .filter(|id| !manual.contains_key(*id))
            .filter_map(|id| self.prorated.get(id).copied())
            .collect();

        let mut credits = Vec::with_capacity(manual.len() + auto_participants.len());

        for (participant_id, &amount) in manual {
            if let Some(&participant) = self.prorated.get(participant_id) {
                credits.push(ShareCredit {
                    participant_id: &participant.id,
                    amount,
                    source: ShareSource::Manual,
                });
            }
        }

        if !auto_participants.is_empty() && remaining.is_positive() {
            let total_weight: u64 = auto_participants
                .iter()
                .map(|p| u64::from(p.proration_weight()))
                .sum();

            if total_weight == 0 {
                let split = remaining / Decimal::from(auto_participants.len() as u64);
                credits.extend(auto_participants.iter().copied().map(|p| ShareCredit {
                    participant_id: &p.id,
                    amount: split,
                    source: ShareSource::Automatic,
                }));
            } else {
                let total_weight = Decimal::from(total_weight);
                credits.extend(auto_participants.iter().copied().map(|p| ShareCredit {
                    participant_id: &p.id,
                    amount: weighted_share(remaining, p.proration_weight(), total_weight),
                    source: ShareSource::Automatic,
                }));
            }
        }

        ExpenseAllocation { credits, remaining }
    }
}

/// `remaining * weight / total_weight`, dividing first when the product would leave the
/// `Decimal` range.
fn weighted_share(remaining: Money, weight: u32, total_weight: Decimal) -> Money {
    let weight = Decimal::from(weight);
    match remaining.as_decimal().checked_mul(weight) {
        Some(scaled) => Money::from_decimal(scaled / total_weight),
        None => remaining / total_weight * weight,
    }
}
