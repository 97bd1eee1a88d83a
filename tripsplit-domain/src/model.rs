use fxhash::FxBuildHasher;
use indexmap::IndexMap;
use rust_decimal::{Decimal, RoundingStrategy};
use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign},
};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

string_id!(
    /// Opaque participant identifier (UUID strings in stored trips)
    ParticipantId
);
string_id!(ExpenseId);
string_id!(TaskId);

const MAX_AMOUNT_UNITS: i64 = 1_000_000_000_000_000;

/// Monetary amount with exact decimal arithmetic
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn zero() -> Self {
        Self::ZERO
    }

    pub fn from_i64(value: i64) -> Self {
        Self(Decimal::from(value))
    }

    pub fn from_u64(value: u64) -> Self {
        Self(Decimal::from(value))
    }

    pub fn from_decimal(value: Decimal) -> Self {
        Self(value)
    }

    /// Largest magnitude accepted for a single amount. Totals of any realistic number
    /// of such amounts stay far below the `Decimal` range.
    pub fn max_amount() -> Self {
        Self(Decimal::from(MAX_AMOUNT_UNITS))
    }

    pub fn is_within_limit(self) -> bool {
        self.0.abs() <= Decimal::from(MAX_AMOUNT_UNITS)
    }

    pub fn as_decimal(self) -> Decimal {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    pub fn is_positive(self) -> bool {
        self.0 > Decimal::ZERO
    }

    pub fn is_negative(self) -> bool {
        self.0 < Decimal::ZERO
    }

    pub fn abs(self) -> Self {
        Self(self.0.abs())
    }

    /// Clamps negative amounts to zero.
    pub fn non_negative(self) -> Self {
        self.max(Self::ZERO)
    }

    /// Rounds half away from zero to `dp` decimal places.
    pub fn round_dp(self, dp: u32) -> Self {
        Self(
            self.0
                .round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero),
        )
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

impl From<Decimal> for Money {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

// Arithmetic saturates at the `Decimal` bounds instead of panicking.
impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 = self.0.saturating_sub(rhs.0);
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl Mul<Decimal> for Money {
    type Output = Self;

    fn mul(self, rhs: Decimal) -> Self::Output {
        Self(self.0.saturating_mul(rhs))
    }
}

impl Div<Decimal> for Money {
    type Output = Self;

    fn div(self, rhs: Decimal) -> Self::Output {
        Self(self.0 / rhs)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// How a participant pays for the trip.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Contribution {
    /// Share computed from expenses, weighted by stay days.
    #[default]
    Prorated,
    /// Flat amount; funds the discount of every prorated participant.
    Fixed(Money),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
    pub contribution: Contribution,
    pub is_paid: bool,
    pub stay_days: u32,
    pub prepaid_amount: Money,
}

impl Participant {
    pub fn new(id: impl Into<ParticipantId>, name: impl Into<String>, stay_days: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            contribution: Contribution::Prorated,
            is_paid: false,
            stay_days,
            prepaid_amount: Money::ZERO,
        }
    }

    pub fn fixed(id: impl Into<ParticipantId>, name: impl Into<String>, amount: Money) -> Self {
        Self {
            contribution: Contribution::Fixed(amount),
            ..Self::new(id, name, 0)
        }
    }

    pub fn with_prepaid(mut self, amount: Money) -> Self {
        self.prepaid_amount = amount;
        self
    }

    pub fn with_paid(mut self, is_paid: bool) -> Self {
        self.is_paid = is_paid;
        self
    }

    pub fn is_fixed(&self) -> bool {
        matches!(self.contribution, Contribution::Fixed(_))
    }

    /// Flat contribution, zero for prorated participants.
    pub fn fixed_contribution(&self) -> Money {
        match self.contribution {
            Contribution::Fixed(amount) => amount,
            Contribution::Prorated => Money::ZERO,
        }
    }

    /// Weight used when prorating an expense. A zero stay counts as one day.
    pub fn proration_weight(&self) -> u32 {
        if self.stay_days == 0 { 1 } else { self.stay_days }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ExpenseCategory {
    Accommodation,
    #[default]
    Food,
    Drinks,
    Transport,
    Fuel,
    Decoration,
    Other,
}

impl ExpenseCategory {
    pub const ALL: [Self; 7] = [
        Self::Accommodation,
        Self::Food,
        Self::Drinks,
        Self::Transport,
        Self::Fuel,
        Self::Decoration,
        Self::Other,
    ];
}

/// Per-participant override amounts of one expense, in insertion order.
pub type ManualDistributions = IndexMap<ParticipantId, Money, FxBuildHasher>;

#[derive(Clone, Debug, PartialEq)]
pub struct Expense {
    pub id: ExpenseId,
    pub name: String,
    pub amount: Money,
    pub category: ExpenseCategory,
    pub participant_ids: Vec<ParticipantId>,
    pub manual_distributions: ManualDistributions,
}

impl Expense {
    pub fn new<I, P>(
        id: impl Into<ExpenseId>,
        name: impl Into<String>,
        amount: Money,
        participant_ids: I,
    ) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<ParticipantId>,
    {
        Self {
            id: id.into(),
            name: name.into(),
            amount,
            category: ExpenseCategory::default(),
            participant_ids: participant_ids.into_iter().map(Into::into).collect(),
            manual_distributions: ManualDistributions::default(),
        }
    }

    pub fn with_category(mut self, category: ExpenseCategory) -> Self {
        self.category = category;
        self
    }

    /// Adds a manual override without touching `participant_ids`.
    pub fn with_manual(mut self, participant_id: impl Into<ParticipantId>, amount: Money) -> Self {
        self.manual_distributions
            .insert(participant_id.into(), amount);
        self
    }

    pub fn manual_amount(&self, participant_id: &ParticipantId) -> Option<Money> {
        self.manual_distributions.get(participant_id).copied()
    }

    pub fn manual_total(&self) -> Money {
        self.manual_distributions.values().sum()
    }

    pub fn involves(&self, participant_id: &ParticipantId) -> bool {
        self.participant_ids.contains(participant_id)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TaskType {
    #[default]
    Cleaning,
    Cooking,
    Decoration,
    Dishes,
    FoodShopping,
    DrinksShopping,
    Other,
}

impl TaskType {
    pub const ALL: [Self; 7] = [
        Self::Cleaning,
        Self::Cooking,
        Self::Decoration,
        Self::Dishes,
        Self::FoodShopping,
        Self::DrinksShopping,
        Self::Other,
    ];
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Task {
    pub id: TaskId,
    pub name: String,
    pub task_type: TaskType,
    pub participant_id: ParticipantId,
}

/// Settlement line of one participant.
#[derive(Clone, Debug, PartialEq)]
pub struct SettlementResult {
    pub participant_id: ParticipantId,
    pub participant_name: String,
    pub raw_share: Money,
    pub discount: Money,
    /// Quota before prepayments.
    pub final_amount: Money,
    pub prepaid_amount: Money,
    /// Negative when the participant is owed a refund.
    pub remaining_amount: Money,
    pub is_fixed: bool,
    pub is_paid: bool,
    pub stay_days: u32,
}

impl SettlementResult {
    /// Amount counted as already paid in the trip summary.
    pub fn paid_amount(&self) -> Money {
        if self.is_paid {
            self.final_amount
        } else {
            self.prepaid_amount
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TripSummary {
    pub total_trip_cost: Money,
    pub total_paid: Money,
    /// May be negative when payments exceed the billed cost.
    pub total_pending: Money,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SettlementReport {
    pub results: Vec<SettlementResult>,
    pub summary: TripSummary,
}

impl SettlementReport {
    pub fn result_for(&self, participant_id: &ParticipantId) -> Option<&SettlementResult> {
        self.results
            .iter()
            .find(|result| &result.participant_id == participant_id)
    }
}
