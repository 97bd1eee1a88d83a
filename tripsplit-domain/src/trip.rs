use crate::{
    model::{
        Contribution, Expense, ExpenseCategory, ExpenseId, ManualDistributions, Money,
        Participant, ParticipantId, SettlementReport, Task, TaskId, TaskType,
    },
    services::{ExpenseBreakdown, SettlementCalculator},
};

pub const DEFAULT_TRIP_DURATION: u32 = 3;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TripEditError {
    #[error("name must not be blank")]
    BlankName,
    #[error("amount must be positive (got {0})")]
    NonPositiveAmount(Money),
    #[error("amount must not be negative (got {0})")]
    NegativeAmount(Money),
    #[error("amount {0} exceeds the supported maximum")]
    AmountTooLarge(Money),
    #[error("trip duration must be at least one day")]
    InvalidTripDuration,
    #[error("an expense needs at least one participant")]
    NoParticipantsSelected,
    #[error("participant '{0}' not found")]
    ParticipantNotFound(ParticipantId),
    #[error("expense '{0}' not found")]
    ExpenseNotFound(ExpenseId),
    #[error("task '{0}' not found")]
    TaskNotFound(TaskId),
    #[error("id '{0}' is already in use")]
    DuplicateId(String),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParticipantDraft {
    pub name: String,
    /// `Some` registers a fixed-contribution participant.
    pub fixed_contribution: Option<Money>,
    /// Defaults to the trip duration.
    pub stay_days: Option<u32>,
    pub prepaid_amount: Money,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExpenseDraft {
    pub name: String,
    pub amount: Money,
    pub category: ExpenseCategory,
    pub participant_ids: Vec<ParticipantId>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TaskDraft {
    /// May be blank; renderers fall back to the task type label.
    pub name: String,
    pub task_type: TaskType,
    pub participant_id: ParticipantId,
}

/// Snapshot of a trip and the editing rules applied before settlement
#[derive(Clone, Debug, PartialEq)]
pub struct Trip {
    pub trip_duration: u32,
    pub participants: Vec<Participant>,
    pub expenses: Vec<Expense>,
    pub tasks: Vec<Task>,
}

impl Default for Trip {
    fn default() -> Self {
        Self::new(DEFAULT_TRIP_DURATION)
    }
}

impl Trip {
    pub fn new(trip_duration: u32) -> Self {
        Self {
            trip_duration,
            participants: Vec::new(),
            expenses: Vec::new(),
            tasks: Vec::new(),
        }
    }

    pub fn settle(&self) -> SettlementReport {
        SettlementCalculator.settle(&self.participants, &self.expenses)
    }

    pub fn breakdown(&self) -> ExpenseBreakdown<'_> {
        ExpenseBreakdown::build(&self.participants, &self.expenses)
    }

    pub fn participant(&self, id: &ParticipantId) -> Option<&Participant> {
        self.participants.iter().find(|p| &p.id == id)
    }

    pub fn expense(&self, id: &ExpenseId) -> Option<&Expense> {
        self.expenses.iter().find(|e| &e.id == id)
    }

    pub fn set_trip_duration(&mut self, days: u32) -> Result<(), TripEditError> {
        if days == 0 {
            return Err(TripEditError::InvalidTripDuration);
        }
        self.trip_duration = days;
        Ok(())
    }

    pub fn add_participant(
        &mut self,
        id: ParticipantId,
        draft: ParticipantDraft,
    ) -> Result<&Participant, TripEditError> {
        let name = non_blank(&draft.name)?;
        if self.participant(&id).is_some() {
            return Err(TripEditError::DuplicateId(id.to_string()));
        }
        ensure_non_negative(draft.prepaid_amount)?;
        let contribution = match draft.fixed_contribution {
            Some(amount) => {
                ensure_non_negative(amount)?;
                Contribution::Fixed(amount)
            }
            None => Contribution::Prorated,
        };

        let index = self.participants.len();
        self.participants.push(Participant {
            id,
            name,
            contribution,
            is_paid: false,
            stay_days: draft.stay_days.unwrap_or(self.trip_duration),
            prepaid_amount: draft.prepaid_amount,
        });
        Ok(&self.participants[index])
    }

    /// Removes a participant along with every reference to it.
    pub fn remove_participant(&mut self, id: &ParticipantId) -> Result<Participant, TripEditError> {
        let index = self
            .participants
            .iter()
            .position(|p| &p.id == id)
            .ok_or_else(|| TripEditError::ParticipantNotFound(id.clone()))?;
        let removed = self.participants.remove(index);

        for expense in &mut self.expenses {
            expense.participant_ids.retain(|pid| pid != id);
            expense.manual_distributions.shift_remove(id);
        }
        self.tasks.retain(|task| &task.participant_id != id);

        Ok(removed)
    }

    pub fn set_stay_days(&mut self, id: &ParticipantId, days: u32) -> Result<(), TripEditError> {
        self.participant_mut(id)?.stay_days = days;
        Ok(())
    }

    pub fn set_prepaid_amount(
        &mut self,
        id: &ParticipantId,
        amount: Money,
    ) -> Result<(), TripEditError> {
        ensure_non_negative(amount)?;
        self.participant_mut(id)?.prepaid_amount = amount;
        Ok(())
    }

    /// Flips the settled flag and returns the new value.
    pub fn toggle_paid(&mut self, id: &ParticipantId) -> Result<bool, TripEditError> {
        let participant = self.participant_mut(id)?;
        participant.is_paid = !participant.is_paid;
        Ok(participant.is_paid)
    }

    pub fn add_expense(
        &mut self,
        id: ExpenseId,
        draft: ExpenseDraft,
    ) -> Result<&Expense, TripEditError> {
        let name = non_blank(&draft.name)?;
        if !draft.amount.is_positive() {
            return Err(TripEditError::NonPositiveAmount(draft.amount));
        }
        ensure_within_limit(draft.amount)?;
        if draft.participant_ids.is_empty() {
            return Err(TripEditError::NoParticipantsSelected);
        }
        if self.expense(&id).is_some() {
            return Err(TripEditError::DuplicateId(id.to_string()));
        }
        if let Some(missing) = draft
            .participant_ids
            .iter()
            .find(|pid| self.participant(pid).is_none())
        {
            return Err(TripEditError::ParticipantNotFound(missing.clone()));
        }

        let index = self.expenses.len();
        self.expenses.push(Expense {
            id,
            name,
            amount: draft.amount,
            category: draft.category,
            participant_ids: draft.participant_ids,
            manual_distributions: ManualDistributions::default(),
        });
        Ok(&self.expenses[index])
    }

    pub fn remove_expense(&mut self, id: &ExpenseId) -> Result<Expense, TripEditError> {
        let index = self
            .expenses
            .iter()
            .position(|e| &e.id == id)
            .ok_or_else(|| TripEditError::ExpenseNotFound(id.clone()))?;
        Ok(self.expenses.remove(index))
    }

    /// Sets or clears the manual share of a participant on one expense.
    ///
    /// Either way the participant ends up on the expense, so clearing an override
    /// makes them fall back to proration.
    pub fn set_manual_distribution(
        &mut self,
        expense_id: &ExpenseId,
        participant_id: &ParticipantId,
        amount: Option<Money>,
    ) -> Result<(), TripEditError> {
        if self.participant(participant_id).is_none() {
            return Err(TripEditError::ParticipantNotFound(participant_id.clone()));
        }
        let expense = self
            .expenses
            .iter_mut()
            .find(|e| &e.id == expense_id)
            .ok_or_else(|| TripEditError::ExpenseNotFound(expense_id.clone()))?;

        match amount {
            Some(amount) => {
                ensure_non_negative(amount)?;
                expense
                    .manual_distributions
                    .insert(participant_id.clone(), amount);
            }
            None => {
                expense.manual_distributions.shift_remove(participant_id);
            }
        }
        if !expense.involves(participant_id) {
            expense.participant_ids.push(participant_id.clone());
        }
        Ok(())
    }

    pub fn add_task(&mut self, id: TaskId, draft: TaskDraft) -> Result<&Task, TripEditError> {
        if self.participant(&draft.participant_id).is_none() {
            return Err(TripEditError::ParticipantNotFound(draft.participant_id));
        }
        if self.tasks.iter().any(|task| task.id == id) {
            return Err(TripEditError::DuplicateId(id.to_string()));
        }

        let index = self.tasks.len();
        self.tasks.push(Task {
            id,
            name: draft.name.trim().to_owned(),
            task_type: draft.task_type,
            participant_id: draft.participant_id,
        });
        Ok(&self.tasks[index])
    }

    pub fn remove_task(&mut self, id: &TaskId) -> Result<Task, TripEditError> {
        let index = self
            .tasks
            .iter()
            .position(|task| &task.id == id)
            .ok_or_else(|| TripEditError::TaskNotFound(id.clone()))?;
        Ok(self.tasks.remove(index))
    }

    /// Checks every stored amount against [`Money::max_amount`]. Snapshots built
    /// outside the editing methods (decoded documents) go through this.
    pub fn validate_amounts(&self) -> Result<(), TripEditError> {
        let participant_amounts = self
            .participants
            .iter()
            .flat_map(|p| [p.prepaid_amount, p.fixed_contribution()]);
        let expense_amounts = self
            .expenses
            .iter()
            .flat_map(|e| {
                std::iter::once(e.amount).chain(e.manual_distributions.values().copied())
            });
        participant_amounts
            .chain(expense_amounts)
            .try_for_each(ensure_within_limit)
    }

    fn participant_mut(&mut self, id: &ParticipantId) -> Result<&mut Participant, TripEditError> {
        self.participants
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or_else(|| TripEditError::ParticipantNotFound(id.clone()))
    }
}

fn non_blank(name: &str) -> Result<String, TripEditError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        Err(TripEditError::BlankName)
    } else {
        Ok(trimmed.to_owned())
    }
}

fn ensure_non_negative(amount: Money) -> Result<(), TripEditError> {
    if amount.is_negative() {
        Err(TripEditError::NegativeAmount(amount))
    } else {
        ensure_within_limit(amount)
    }
}

fn ensure_within_limit(amount: Money) -> Result<(), TripEditError> {
    if amount.is_within_limit() {
        Ok(())
    } else {
        Err(TripEditError::AmountTooLarge(amount))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use rust_decimal::Decimal;

    #[fixture]
    fn trip() -> Trip {
        let mut trip = Trip::new(4);
        trip.add_participant(
            "a".into(),
            ParticipantDraft {
                name: "  Ana ".to_owned(),
                ..ParticipantDraft::default()
            },
        )
        .expect("add ana");
        trip.add_participant(
            "b".into(),
            ParticipantDraft {
                name: "Bia".to_owned(),
                stay_days: Some(2),
                ..ParticipantDraft::default()
            },
        )
        .expect("add bia");
        trip.add_expense(
            "e".into(),
            ExpenseDraft {
                name: "Casa".to_owned(),
                amount: Money::from_i64(120),
                category: ExpenseCategory::Accommodation,
                participant_ids: vec!["a".into()],
            },
        )
        .expect("add expense");
        trip
    }

    #[rstest]
    fn new_participant_defaults_to_trip_duration(trip: Trip) {
        let ana = trip.participant(&"a".into()).expect("ana");
        assert_eq!(ana.name, "Ana");
        assert_eq!(ana.stay_days, 4);
        assert!(!ana.is_paid);
        assert_eq!(trip.participant(&"b".into()).map(|p| p.stay_days), Some(2));
    }

    #[rstest]
    fn manual_distribution_adds_participant_to_expense(mut trip: Trip) {
        trip.set_manual_distribution(&"e".into(), &"b".into(), Some(Money::from_i64(20)))
            .expect("set manual");

        let expense = trip.expense(&"e".into()).expect("expense");
        assert!(expense.involves(&"b".into()));
        assert_eq!(expense.manual_amount(&"b".into()), Some(Money::from_i64(20)));

        let report = trip.settle();
        assert_eq!(
            report.result_for(&"a".into()).map(|r| r.raw_share),
            Some(Money::from_i64(100))
        );
    }

    #[rstest]
    fn clearing_manual_distribution_keeps_membership(mut trip: Trip) {
        let expense_id: ExpenseId = "e".into();
        let bia: ParticipantId = "b".into();
        trip.set_manual_distribution(&expense_id, &bia, Some(Money::from_i64(20)))
            .expect("set manual");
        trip.set_manual_distribution(&expense_id, &bia, None)
            .expect("clear manual");

        let expense = trip.expense(&expense_id).expect("expense");
        assert!(expense.involves(&bia));
        assert!(expense.manual_distributions.is_empty());
    }

    #[rstest]
    fn clearing_absent_override_adds_participant(mut trip: Trip) {
        let bia: ParticipantId = "b".into();

        trip.set_manual_distribution(&"e".into(), &bia, None)
            .expect("clear manual");

        let expense = trip.expense(&"e".into()).expect("expense");
        assert_eq!(expense.participant_ids, [ParticipantId::from("a"), bia]);
        assert!(expense.manual_distributions.is_empty());
        assert_eq!(
            trip.settle().result_for(&"a".into()).map(|r| r.raw_share),
            Some(Money::from_i64(80))
        );
    }

    #[rstest]
    #[case::prepaid(None)]
    #[case::fixed(Some(Money::max_amount() + Money::from_i64(1)))]
    fn rejects_oversized_participant_amounts(mut trip: Trip, #[case] fixed: Option<Money>) {
        let oversized = Money::max_amount() + Money::from_i64(1);
        let draft = ParticipantDraft {
            name: "Caio".to_owned(),
            fixed_contribution: fixed,
            prepaid_amount: if fixed.is_some() { Money::ZERO } else { oversized },
            ..ParticipantDraft::default()
        };

        assert_eq!(
            trip.add_participant("c".into(), draft).map(|p| p.id.clone()),
            Err(TripEditError::AmountTooLarge(oversized))
        );
    }

    #[rstest]
    fn rejects_oversized_expense(mut trip: Trip) {
        let oversized = Money::max_amount() * Decimal::from(2);
        let draft = ExpenseDraft {
            name: "Iate".to_owned(),
            amount: oversized,
            category: ExpenseCategory::Other,
            participant_ids: vec!["a".into()],
        };

        assert_eq!(
            trip.add_expense("e2".into(), draft).map(|e| e.id.clone()),
            Err(TripEditError::AmountTooLarge(oversized))
        );
    }

    #[rstest]
    fn validate_amounts_reports_oversized_snapshot_values(mut trip: Trip) {
        assert_eq!(trip.validate_amounts(), Ok(()));

        let oversized = Money::max_amount() * Decimal::from(10);
        trip.expenses[0]
            .manual_distributions
            .insert("a".into(), oversized);

        assert_eq!(
            trip.validate_amounts(),
            Err(TripEditError::AmountTooLarge(oversized))
        );
    }

    #[rstest]
    fn removing_participant_cascades(mut trip: Trip) {
        let bia: ParticipantId = "b".into();
        trip.set_manual_distribution(&"e".into(), &bia, Some(Money::from_i64(20)))
            .expect("set manual");
        trip.add_task(
            "t".into(),
            TaskDraft {
                name: String::new(),
                task_type: TaskType::Dishes,
                participant_id: bia.clone(),
            },
        )
        .expect("add task");

        let removed = trip.remove_participant(&bia).expect("remove");

        assert_eq!(removed.name, "Bia");
        let expense = trip.expense(&"e".into()).expect("expense");
        assert!(!expense.involves(&bia));
        assert_eq!(expense.manual_amount(&bia), None);
        assert!(trip.tasks.is_empty());
        assert_eq!(
            trip.settle().result_for(&"a".into()).map(|r| r.raw_share),
            Some(Money::from_i64(120))
        );
    }

    #[rstest]
    fn toggle_paid_flips_flag(mut trip: Trip) {
        assert_eq!(trip.toggle_paid(&"a".into()), Ok(true));
        assert_eq!(trip.toggle_paid(&"a".into()), Ok(false));
    }

    #[rstest]
    #[case::blank_name("  ", 10, vec!["a"], TripEditError::BlankName)]
    #[case::zero_amount("Pizza", 0, vec!["a"], TripEditError::NonPositiveAmount(Money::ZERO))]
    #[case::no_participants("Pizza", 10, vec![], TripEditError::NoParticipantsSelected)]
    #[case::unknown_participant(
        "Pizza",
        10,
        vec!["ghost"],
        TripEditError::ParticipantNotFound("ghost".into())
    )]
    fn add_expense_validates_draft(
        mut trip: Trip,
        #[case] name: &str,
        #[case] amount: i64,
        #[case] participant_ids: Vec<&str>,
        #[case] expected: TripEditError,
    ) {
        let result = trip.add_expense(
            "e2".into(),
            ExpenseDraft {
                name: name.to_owned(),
                amount: Money::from_i64(amount),
                category: ExpenseCategory::Food,
                participant_ids: participant_ids.into_iter().map(Into::into).collect(),
            },
        );

        assert_eq!(result.err(), Some(expected));
        assert_eq!(trip.expenses.len(), 1);
    }

    #[rstest]
    fn rejects_negative_prepaid(mut trip: Trip) {
        assert_eq!(
            trip.set_prepaid_amount(&"a".into(), Money::from_i64(-5)),
            Err(TripEditError::NegativeAmount(Money::from_i64(-5)))
        );
        assert_eq!(
            trip.set_stay_days(&"ghost".into(), 2),
            Err(TripEditError::ParticipantNotFound("ghost".into()))
        );
    }

    #[rstest]
    fn rejects_zero_trip_duration(mut trip: Trip) {
        assert_eq!(trip.set_trip_duration(0), Err(TripEditError::InvalidTripDuration));
        assert_eq!(trip.set_trip_duration(7), Ok(()));
        assert_eq!(trip.trip_duration, 7);
    }

    #[rstest]
    fn fixed_participant_is_registered_with_contribution(mut trip: Trip) {
        let guest = trip
            .add_participant(
                "g".into(),
                ParticipantDraft {
                    name: "Guest".to_owned(),
                    fixed_contribution: Some(Money::from_i64(40)),
                    ..ParticipantDraft::default()
                },
            )
            .expect("add guest");

        assert_eq!(guest.fixed_contribution(), Money::from_i64(40));
        assert_eq!(
            trip.add_participant(
                "g".into(),
                ParticipantDraft {
                    name: "Other".to_owned(),
                    ..ParticipantDraft::default()
                },
            )
            .err(),
            Some(TripEditError::DuplicateId("g".to_owned()))
        );
    }
}
