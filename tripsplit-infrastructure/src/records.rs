//! Wire shape of the persisted trip blob.
//!
//! Field names and category/task labels follow the documents produced by the web
//! client (`{ tripDuration, participants, expenses, tasks }`). Decoding is lenient:
//! absent optional fields fall back to the same defaults the client used.

use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tripsplit_domain::{
    Contribution, Expense, ExpenseCategory, ManualDistributions, Money, Participant, Task,
    TaskType, Trip,
};

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TripRecord {
    #[serde(default)]
    pub trip_duration: Option<u32>,
    #[serde(default)]
    pub participants: Vec<ParticipantRecord>,
    #[serde(default)]
    pub expenses: Vec<ExpenseRecord>,
    #[serde(default)]
    pub tasks: Vec<TaskRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ParticipantRecord {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub is_fixed: bool,
    #[serde(default)]
    pub fixed_contribution: Option<Decimal>,
    #[serde(default)]
    pub is_paid: bool,
    #[serde(default)]
    pub stay_days: Option<u32>,
    #[serde(default)]
    pub prepaid_amount: Option<Decimal>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ExpenseRecord {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub amount: Decimal,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub participant_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manual_distributions: Option<IndexMap<String, Decimal>>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TaskRecord {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub task_type: Option<String>,
    pub participant_id: String,
}

impl TripRecord {
    pub fn into_trip(self, default_trip_duration: u32) -> Trip {
        Trip {
            trip_duration: self
                .trip_duration
                .filter(|&days| days > 0)
                .unwrap_or(default_trip_duration),
            participants: self
                .participants
                .into_iter()
                .map(ParticipantRecord::into_participant)
                .collect(),
            expenses: self
                .expenses
                .into_iter()
                .map(ExpenseRecord::into_expense)
                .collect(),
            tasks: self.tasks.into_iter().map(TaskRecord::into_task).collect(),
        }
    }

    pub fn from_trip(trip: &Trip) -> Self {
        Self {
            trip_duration: Some(trip.trip_duration),
            participants: trip.participants.iter().map(ParticipantRecord::from).collect(),
            expenses: trip.expenses.iter().map(ExpenseRecord::from).collect(),
            tasks: trip.tasks.iter().map(TaskRecord::from).collect(),
        }
    }
}

impl ParticipantRecord {
    fn into_participant(self) -> Participant {
        let contribution = if self.is_fixed {
            Contribution::Fixed(money_or_zero(self.fixed_contribution))
        } else {
            Contribution::Prorated
        };
        Participant {
            id: self.id.into(),
            name: self.name,
            contribution,
            is_paid: self.is_paid,
            stay_days: self.stay_days.unwrap_or(0),
            prepaid_amount: money_or_zero(self.prepaid_amount),
        }
    }
}

impl From<&Participant> for ParticipantRecord {
    fn from(participant: &Participant) -> Self {
        Self {
            id: participant.id.to_string(),
            name: participant.name.clone(),
            is_fixed: participant.is_fixed(),
            fixed_contribution: Some(participant.fixed_contribution().as_decimal()),
            is_paid: participant.is_paid,
            stay_days: Some(participant.stay_days),
            prepaid_amount: Some(participant.prepaid_amount.as_decimal()),
        }
    }
}

impl ExpenseRecord {
    fn into_expense(self) -> Expense {
        let manual_distributions: ManualDistributions = self
            .manual_distributions
            .unwrap_or_default()
            .into_iter()
            .map(|(id, amount)| (id.into(), Money::from_decimal(amount)))
            .collect();
        Expense {
            id: self.id.into(),
            name: self.name,
            amount: Money::from_decimal(self.amount),
            category: self
                .category
                .as_deref()
                .map(category_from_label)
                .unwrap_or_default(),
            participant_ids: self.participant_ids.into_iter().map(Into::into).collect(),
            manual_distributions,
        }
    }
}

impl From<&Expense> for ExpenseRecord {
    fn from(expense: &Expense) -> Self {
        let manual_distributions = (!expense.manual_distributions.is_empty()).then(|| {
            expense
                .manual_distributions
                .iter()
                .map(|(id, amount)| (id.to_string(), amount.as_decimal()))
                .collect()
        });
        Self {
            id: expense.id.to_string(),
            name: expense.name.clone(),
            amount: expense.amount.as_decimal(),
            category: Some(category_label(expense.category).to_owned()),
            participant_ids: expense.participant_ids.iter().map(ToString::to_string).collect(),
            manual_distributions,
        }
    }
}

impl TaskRecord {
    fn into_task(self) -> Task {
        Task {
            id: self.id.into(),
            name: self.name,
            task_type: self
                .task_type
                .as_deref()
                .map(task_type_from_label)
                .unwrap_or(TaskType::Other),
            participant_id: self.participant_id.into(),
        }
    }
}

impl From<&Task> for TaskRecord {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id.to_string(),
            name: task.name.clone(),
            task_type: Some(task_type_label(task.task_type).to_owned()),
            participant_id: task.participant_id.to_string(),
        }
    }
}

fn money_or_zero(value: Option<Decimal>) -> Money {
    value.map(Money::from_decimal).unwrap_or(Money::ZERO)
}

const CATEGORY_LABELS: [(ExpenseCategory, &str); 7] = [
    (ExpenseCategory::Accommodation, "Hospedagem"),
    (ExpenseCategory::Food, "Alimentação"),
    (ExpenseCategory::Drinks, "Bebidas"),
    (ExpenseCategory::Transport, "Transporte"),
    (ExpenseCategory::Fuel, "Gasolina"),
    (ExpenseCategory::Decoration, "Decoração"),
    (ExpenseCategory::Other, "Outros"),
];

const TASK_TYPE_LABELS: [(TaskType, &str); 7] = [
    (TaskType::Cleaning, "Limpeza"),
    (TaskType::Cooking, "Cozinhar"),
    (TaskType::Decoration, "Decoração"),
    (TaskType::Dishes, "Lavar Louças"),
    (TaskType::FoodShopping, "Compras de Comida"),
    (TaskType::DrinksShopping, "Compras de Bebidas"),
    (TaskType::Other, "Outros"),
];

pub(crate) fn category_label(category: ExpenseCategory) -> &'static str {
    CATEGORY_LABELS
        .iter()
        .find(|(candidate, _)| *candidate == category)
        .map_or("Outros", |(_, label)| *label)
}

/// Unknown labels map to [`ExpenseCategory::Other`].
pub(crate) fn category_from_label(label: &str) -> ExpenseCategory {
    CATEGORY_LABELS
        .iter()
        .find(|(_, candidate)| *candidate == label)
        .map_or(ExpenseCategory::Other, |(category, _)| *category)
}

pub(crate) fn task_type_label(task_type: TaskType) -> &'static str {
    TASK_TYPE_LABELS
        .iter()
        .find(|(candidate, _)| *candidate == task_type)
        .map_or("Outros", |(_, label)| *label)
}

pub(crate) fn task_type_from_label(label: &str) -> TaskType {
    TASK_TYPE_LABELS
        .iter()
        .find(|(_, candidate)| *candidate == label)
        .map_or(TaskType::Other, |(task_type, _)| *task_type)
}
