pub mod expense_allocator;
pub mod expense_breakdown;
pub mod settlement_calculator;
pub mod trip_summary;

pub use expense_allocator::{ExpenseAllocation, ExpenseAllocator, ShareCredit, ShareSource};
pub use expense_breakdown::{BreakdownCell, BreakdownRow, ExpenseBreakdown};
pub use settlement_calculator::SettlementCalculator;
