#[cfg(all(feature = "pt", feature = "en"))]
compile_error!("Cannot enable both 'pt' and 'en' features at the same time");

#[cfg(feature = "pt")]
pub mod strings {
    pub const PARTICIPANT: &str = "Participante";
    pub const DAYS: &str = "Dias";
    pub const FIXED: &str = "Fixo";
    pub const RAW_SHARE: &str = "Cota bruta";
    pub const DISCOUNT: &str = "Desconto";
    pub const FINAL_AMOUNT: &str = "Cota total";
    pub const PREPAID: &str = "Adiantado";
    pub const REMAINING: &str = "A pagar";
    pub const STATUS: &str = "Status";
    pub const PAID: &str = "Pago";
    pub const OPEN: &str = "Pendente";
    pub const REFUND: &str = "A receber";
    pub const EXPENSE: &str = "Despesa";
    pub const AMOUNT: &str = "Valor";
    pub const CATEGORY: &str = "Categoria";
    pub const TOTAL: &str = "Total";
    pub const TOTAL_TRIP_COST: &str = "Custo total";
    pub const TOTAL_PAID: &str = "Total pago";
    pub const TOTAL_PENDING: &str = "Falta pagar";
    pub const TASK: &str = "Tarefa";
    pub const TASK_TYPE: &str = "Tipo";
    pub const MANUAL_MARKER_NOTE: &str = "* valor definido manualmente";
    pub const SETTLEMENT_TITLE: &str = "Divisão de custos";
    pub const BREAKDOWN_TITLE: &str = "Despesas por participante";
    pub const TASKS_TITLE: &str = "Tarefas";
    pub const NO_PARTICIPANTS: &str = "Nenhum participante cadastrado.";

    pub const CATEGORY_ACCOMMODATION: &str = "Hospedagem";
    pub const CATEGORY_FOOD: &str = "Alimentação";
    pub const CATEGORY_DRINKS: &str = "Bebidas";
    pub const CATEGORY_TRANSPORT: &str = "Transporte";
    pub const CATEGORY_FUEL: &str = "Gasolina";
    pub const CATEGORY_DECORATION: &str = "Decoração";
    pub const CATEGORY_OTHER: &str = "Outros";

    pub const TASK_CLEANING: &str = "Limpeza";
    pub const TASK_COOKING: &str = "Cozinhar";
    pub const TASK_DECORATION: &str = "Decoração";
    pub const TASK_DISHES: &str = "Lavar Louças";
    pub const TASK_FOOD_SHOPPING: &str = "Compras de Comida";
    pub const TASK_DRINKS_SHOPPING: &str = "Compras de Bebidas";
    pub const TASK_OTHER: &str = "Outros";

    pub const CURRENCY_PREFIX: &str = "R$ ";
    pub const DECIMAL_SEPARATOR: char = ',';
    pub const THOUSANDS_SEPARATOR: char = '.';
}

#[cfg(not(feature = "pt"))]
pub mod strings {
    pub const PARTICIPANT: &str = "Participant";
    pub const DAYS: &str = "Days";
    pub const FIXED: &str = "Fixed";
    pub const RAW_SHARE: &str = "Raw share";
    pub const DISCOUNT: &str = "Discount";
    pub const FINAL_AMOUNT: &str = "Quota";
    pub const PREPAID: &str = "Prepaid";
    pub const REMAINING: &str = "Remaining";
    pub const STATUS: &str = "Status";
    pub const PAID: &str = "Paid";
    pub const OPEN: &str = "Open";
    pub const REFUND: &str = "Refund";
    pub const EXPENSE: &str = "Expense";
    pub const AMOUNT: &str = "Amount";
    pub const CATEGORY: &str = "Category";
    pub const TOTAL: &str = "Total";
    pub const TOTAL_TRIP_COST: &str = "Trip cost";
    pub const TOTAL_PAID: &str = "Paid";
    pub const TOTAL_PENDING: &str = "Pending";
    pub const TASK: &str = "Task";
    pub const TASK_TYPE: &str = "Type";
    pub const MANUAL_MARKER_NOTE: &str = "* manually set amount";
    pub const SETTLEMENT_TITLE: &str = "Cost split";
    pub const BREAKDOWN_TITLE: &str = "Expenses by participant";
    pub const TASKS_TITLE: &str = "Tasks";
    pub const NO_PARTICIPANTS: &str = "No participants yet.";

    pub const CATEGORY_ACCOMMODATION: &str = "Accommodation";
    pub const CATEGORY_FOOD: &str = "Food";
    pub const CATEGORY_DRINKS: &str = "Drinks";
    pub const CATEGORY_TRANSPORT: &str = "Transport";
    pub const CATEGORY_FUEL: &str = "Fuel";
    pub const CATEGORY_DECORATION: &str = "Decoration";
    pub const CATEGORY_OTHER: &str = "Other";

    pub const TASK_CLEANING: &str = "Cleaning";
    pub const TASK_COOKING: &str = "Cooking";
    pub const TASK_DECORATION: &str = "Decoration";
    pub const TASK_DISHES: &str = "Dishes";
    pub const TASK_FOOD_SHOPPING: &str = "Food shopping";
    pub const TASK_DRINKS_SHOPPING: &str = "Drinks shopping";
    pub const TASK_OTHER: &str = "Other";

    pub const CURRENCY_PREFIX: &str = "$";
    pub const DECIMAL_SEPARATOR: char = '.';
    pub const THOUSANDS_SEPARATOR: char = ',';
}

pub use strings::*;

#[cfg(feature = "pt")]
pub fn stay_days(days: u32) -> String {
    if days == 1 {
        "1 dia".to_owned()
    } else {
        format!("{days} dias")
    }
}

#[cfg(not(feature = "pt"))]
pub fn stay_days(days: u32) -> String {
    if days == 1 {
        "1 day".to_owned()
    } else {
        format!("{days} days")
    }
}

#[cfg(feature = "pt")]
pub fn trip_header(trip_duration: u32, participant_count: usize) -> String {
    format!("{trip_duration} dias de viagem, {participant_count} participantes")
}

#[cfg(not(feature = "pt"))]
pub fn trip_header(trip_duration: u32, participant_count: usize) -> String {
    format!("{trip_duration}-day trip, {participant_count} participants")
}

/// Formats a plain decimal string such as `-1234.5` as a currency amount with two
/// decimals and the locale separators.
pub fn format_amount(plain: &str) -> String {
    let (negative, digits) = match plain.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, plain),
    };
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits, ""));
    let frac: String = frac_part.chars().chain("00".chars()).take(2).collect();

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (idx, c) in int_part.chars().enumerate() {
        if idx > 0 && (int_part.len() - idx) % 3 == 0 {
            grouped.push(THOUSANDS_SEPARATOR);
        }
        grouped.push(c);
    }
    if grouped.is_empty() {
        grouped.push('0');
    }

    let sign = if negative { "-" } else { "" };
    format!("{sign}{CURRENCY_PREFIX}{grouped}{DECIMAL_SEPARATOR}{frac}")
}
