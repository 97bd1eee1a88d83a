use tripsplit_domain::{ExpenseCategory, Money, SettlementResult, Task, TaskType};
use tripsplit_i18n as i18n;

/// Rounds to cents and formats with the locale currency prefix and separators.
pub fn format_money(amount: Money) -> String {
    let rounded = amount.round_dp(2);
    // Rounding can leave a negative zero behind.
    let rounded = if rounded.is_zero() {
        Money::ZERO
    } else {
        rounded
    };
    i18n::format_amount(&rounded.as_decimal().to_string())
}

pub fn category_label(category: ExpenseCategory) -> &'static str {
    match category {
        ExpenseCategory::Accommodation => i18n::CATEGORY_ACCOMMODATION,
        ExpenseCategory::Food => i18n::CATEGORY_FOOD,
        ExpenseCategory::Drinks => i18n::CATEGORY_DRINKS,
        ExpenseCategory::Transport => i18n::CATEGORY_TRANSPORT,
        ExpenseCategory::Fuel => i18n::CATEGORY_FUEL,
        ExpenseCategory::Decoration => i18n::CATEGORY_DECORATION,
        ExpenseCategory::Other => i18n::CATEGORY_OTHER,
    }
}

pub fn task_type_label(task_type: TaskType) -> &'static str {
    match task_type {
        TaskType::Cleaning => i18n::TASK_CLEANING,
        TaskType::Cooking => i18n::TASK_COOKING,
        TaskType::Decoration => i18n::TASK_DECORATION,
        TaskType::Dishes => i18n::TASK_DISHES,
        TaskType::FoodShopping => i18n::TASK_FOOD_SHOPPING,
        TaskType::DrinksShopping => i18n::TASK_DRINKS_SHOPPING,
        TaskType::Other => i18n::TASK_OTHER,
    }
}

/// Blank task names display as their type.
pub fn task_label(task: &Task) -> &str {
    if task.name.trim().is_empty() {
        task_type_label(task.task_type)
    } else {
        &task.name
    }
}

pub fn status_label(result: &SettlementResult) -> &'static str {
    if result.is_paid {
        i18n::PAID
    } else if result.remaining_amount.is_negative() {
        i18n::REFUND
    } else {
        i18n::OPEN
    }
}

/// Stay length, or the fixed marker for flat contributors.
pub fn days_label(result: &SettlementResult) -> String {
    if result.is_fixed {
        i18n::FIXED.to_owned()
    } else {
        i18n::stay_days(result.stay_days)
    }
}
