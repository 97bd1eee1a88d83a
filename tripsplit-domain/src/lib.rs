#![warn(clippy::uninlined_format_args)]

pub mod model;
pub mod services;
pub mod trip;

pub use model::{
    Contribution, Expense, ExpenseCategory, ExpenseId, ManualDistributions, Money, Participant,
    ParticipantId, SettlementReport, SettlementResult, Task, TaskId, TaskType, TripSummary,
};
pub use services::{
    BreakdownCell, BreakdownRow, ExpenseAllocation, ExpenseAllocator, ExpenseBreakdown,
    SettlementCalculator, ShareCredit, ShareSource,
};
pub use trip::{
    DEFAULT_TRIP_DURATION, ExpenseDraft, ParticipantDraft, TaskDraft, Trip, TripEditError,
};
