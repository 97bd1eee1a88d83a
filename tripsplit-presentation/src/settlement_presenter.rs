use crate::{
    labels::{category_label, days_label, format_money, status_label, task_label, task_type_label},
    svg_table::{render_svg, stack_svgs},
    table::{Alignment, Table},
    text_table::render_text,
};
use std::borrow::Cow;
use tripsplit_domain::{
    BreakdownCell, ExpenseBreakdown, Money, SettlementReport, SettlementResult, ShareSource,
    Trip, TripSummary,
};
use tripsplit_i18n as i18n;

pub struct SettlementPresenter;

pub struct SettlementView {
    pub settlement_table_svg: String,
    pub summary_table_svg: String,
    /// `None` when the trip has no expenses.
    pub breakdown_table_svg: Option<String>,
    /// `None` when the trip has no tasks.
    pub tasks_table_svg: Option<String>,
}

impl SettlementView {
    /// All tables stacked into one SVG document.
    pub fn report_svg(&self) -> Option<String> {
        let tables: Vec<&str> = [
            Some(self.settlement_table_svg.as_str()),
            Some(self.summary_table_svg.as_str()),
            self.breakdown_table_svg.as_deref(),
            self.tasks_table_svg.as_deref(),
        ]
        .into_iter()
        .flatten()
        .collect();
        stack_svgs(&tables)
    }
}

impl SettlementPresenter {
    pub fn render(trip: &Trip) -> SettlementView {
        let report = trip.settle();
        let breakdown = trip.breakdown();

        SettlementView {
            settlement_table_svg: render_svg(&Self::settlement_table(trip, &report)),
            summary_table_svg: render_svg(&Self::summary_table(&report.summary)),
            breakdown_table_svg: (!breakdown.rows.is_empty())
                .then(|| render_svg(&Self::breakdown_table(&breakdown))),
            tasks_table_svg: (!trip.tasks.is_empty())
                .then(|| render_svg(&Self::tasks_table(trip))),
        }
    }

    /// Same tables as [`render`](Self::render), as terminal text separated by blank lines.
    pub fn render_text(trip: &Trip) -> String {
        let report = trip.settle();
        let breakdown = trip.breakdown();

        let mut sections = vec![
            render_text(&Self::settlement_table(trip, &report)),
            render_text(&Self::summary_table(&report.summary)),
        ];
        if !breakdown.rows.is_empty() {
            sections.push(render_text(&Self::breakdown_table(&breakdown)));
        }
        if !trip.tasks.is_empty() {
            sections.push(render_text(&Self::tasks_table(trip)));
        }
        sections.join("\n")
    }

    pub fn settlement_table<'a>(trip: &Trip, report: &'a SettlementReport) -> Table<'a> {
        let title = format!(
            "{} ({})",
            i18n::SETTLEMENT_TITLE,
            i18n::trip_header(trip.trip_duration, trip.participants.len())
        );
        let mut table = Table::new()
            .title(title)
            .headers([
                i18n::PARTICIPANT,
                i18n::DAYS,
                i18n::RAW_SHARE,
                i18n::DISCOUNT,
                i18n::FINAL_AMOUNT,
                i18n::PREPAID,
                i18n::REMAINING,
                i18n::STATUS,
            ])
            .alignments([
                Alignment::Left,
                Alignment::Center,
                Alignment::Right,
                Alignment::Right,
                Alignment::Right,
                Alignment::Right,
                Alignment::Right,
                Alignment::Center,
            ])
            .rows(report.results.iter().map(settlement_row));

        if report.results.is_empty() {
            return table.note(i18n::NO_PARTICIPANTS);
        }

        let total = |field: fn(&SettlementResult) -> Money| -> Cow<'a, str> {
            Cow::Owned(format_money(report.results.iter().map(field).sum()))
        };
        table = table.footer(vec![
            Cow::Borrowed(i18n::TOTAL),
            Cow::Borrowed(""),
            total(|r| r.raw_share),
            total(|r| r.discount),
            total(|r| r.final_amount),
            total(|r| r.prepaid_amount),
            total(|r| r.remaining_amount),
            Cow::Borrowed(""),
        ]);
        table
    }

    pub fn summary_table(summary: &TripSummary) -> Table<'static> {
        Table::new()
            .headers([i18n::TOTAL_TRIP_COST, i18n::TOTAL_PAID, i18n::TOTAL_PENDING])
            .alignments([Alignment::Right; 3])
            .row(vec![
                Cow::Owned(format_money(summary.total_trip_cost)),
                Cow::Owned(format_money(summary.total_paid)),
                Cow::Owned(format_money(summary.total_pending)),
            ])
    }

    /// Expense rows against prorated participant columns. Manual shares carry a `*`.
    pub fn breakdown_table<'a>(breakdown: &ExpenseBreakdown<'a>) -> Table<'a> {
        let headers = [i18n::EXPENSE, i18n::CATEGORY, i18n::AMOUNT]
            .into_iter()
            .map(Cow::Borrowed)
            .chain(
                breakdown
                    .columns
                    .iter()
                    .map(|participant| Cow::Borrowed(participant.name.as_str())),
            );
        let alignments = [Alignment::Left, Alignment::Left]
            .into_iter()
            .chain(std::iter::repeat_n(
                Alignment::Right,
                breakdown.columns.len() + 1,
            ));

        let rows = breakdown.rows.iter().map(|row| {
            let mut cells = vec![
                Cow::Borrowed(row.expense.name.as_str()),
                Cow::Borrowed(category_label(row.expense.category)),
                Cow::Owned(format_money(row.expense.amount)),
            ];
            cells.extend(row.cells.iter().map(|cell| Cow::Owned(breakdown_cell(*cell))));
            cells
        });

        let mut footer = vec![
            Cow::Borrowed(i18n::TOTAL),
            Cow::Borrowed(""),
            Cow::Owned(format_money(breakdown.grand_total)),
        ];
        footer.extend(
            breakdown
                .column_totals
                .iter()
                .map(|&total| Cow::Owned(format_money(total))),
        );

        let table = Table::new()
            .title(i18n::BREAKDOWN_TITLE)
            .headers(headers)
            .alignments(alignments)
            .rows(rows)
            .footer(footer);
        if breakdown.has_manual_cells() {
            table.note(i18n::MANUAL_MARKER_NOTE)
        } else {
            table
        }
    }

    pub fn tasks_table(trip: &Trip) -> Table<'_> {
        let rows = trip.tasks.iter().map(|task| {
            let assignee = trip
                .participant(&task.participant_id)
                .map_or(task.participant_id.as_str(), |p| p.name.as_str());
            vec![
                Cow::Borrowed(task_label(task)),
                Cow::Borrowed(task_type_label(task.task_type)),
                Cow::Borrowed(assignee),
            ]
        });

        Table::new()
            .title(i18n::TASKS_TITLE)
            .headers([i18n::TASK, i18n::TASK_TYPE, i18n::PARTICIPANT])
            .rows(rows)
    }
}

fn settlement_row(result: &SettlementResult) -> Vec<Cow<'_, str>> {
    vec![
        Cow::Borrowed(result.participant_name.as_str()),
        Cow::Owned(days_label(result)),
        Cow::Owned(format_money(result.raw_share)),
        Cow::Owned(format_money(result.discount)),
        Cow::Owned(format_money(result.final_amount)),
        Cow::Owned(format_money(result.prepaid_amount)),
        Cow::Owned(format_money(result.remaining_amount)),
        Cow::Borrowed(status_label(result)),
    ]
}

fn breakdown_cell(cell: Option<BreakdownCell>) -> String {
    match cell {
        Some(BreakdownCell {
            amount,
            source: ShareSource::Manual,
        }) => format!("{}*", format_money(amount)),
        Some(BreakdownCell { amount, .. }) => format_money(amount),
        None => String::new(),
    }
}

#[cfg(all(test, not(feature = "pt")))]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use tripsplit_domain::{Expense, ExpenseCategory, Participant, Task, TaskType};

    #[fixture]
    fn trip() -> Trip {
        Trip {
            participants: vec![
                Participant::new("a", "Ana", 3).with_prepaid(Money::from_i64(60)),
                Participant::new("b", "Bia", 1).with_paid(true),
                Participant::fixed("g", "Guest", Money::from_i64(40)),
            ],
            expenses: vec![
                Expense::new("e1", "House", Money::from_i64(100), ["a", "b"])
                    .with_category(ExpenseCategory::Accommodation),
            ],
            tasks: vec![Task {
                id: "t".into(),
                name: String::new(),
                task_type: TaskType::Cooking,
                participant_id: "b".into(),
            }],
            ..Trip::new(3)
        }
    }

    #[rstest]
    fn text_report_lists_every_section(trip: Trip) {
        let text = SettlementPresenter::render_text(&trip);

        assert!(text.starts_with("Cost split (3-day trip, 3 participants)\n"));
        for expected in ["Expenses by participant", "Tasks", "Accommodation", "Cooking"] {
            assert!(text.contains(expected), "missing {expected}");
        }
        assert!(!text.contains(i18n::MANUAL_MARKER_NOTE));
    }

    #[rstest]
    fn settlement_rows_show_discount_and_status(trip: Trip) {
        let report = trip.settle();
        let table = SettlementPresenter::settlement_table(&trip, &report);

        let ana = &table.rows[0];
        assert_eq!(ana[1], "3 days");
        assert_eq!(ana[2], "$75.00");
        assert_eq!(ana[3], "$20.00");
        assert_eq!(ana[4], "$55.00");
        assert_eq!(ana[6], "-$5.00");
        assert_eq!(ana[7], "Refund");

        let bia = &table.rows[1];
        assert_eq!(bia[4], "$5.00");
        assert_eq!(bia[7], "Paid");

        let guest = &table.rows[2];
        assert_eq!(guest[1], "Fixed");
        assert_eq!(guest[4], "$40.00");
        assert_eq!(guest[7], "Open");

        let footer = table.footer.as_ref().expect("totals row");
        assert_eq!(footer[4], "$100.00");
    }

    #[rstest]
    fn breakdown_marks_manual_cells(mut trip: Trip) {
        trip.expenses[0] = trip.expenses[0].clone().with_manual("b", Money::from_i64(10));
        let breakdown = trip.breakdown();

        let table = SettlementPresenter::breakdown_table(&breakdown);

        assert_eq!(table.headers[3], "Ana");
        assert_eq!(table.headers[4], "Bia");
        assert_eq!(table.rows[0][3], "$90.00");
        assert_eq!(table.rows[0][4], "$10.00*");
        assert_eq!(table.note.as_deref(), Some(i18n::MANUAL_MARKER_NOTE));
    }

    #[test]
    fn empty_trip_renders_placeholder_note() {
        let view = SettlementPresenter::render(&Trip::default());

        assert!(view.settlement_table_svg.contains(i18n::NO_PARTICIPANTS));
        assert!(view.breakdown_table_svg.is_none());
        assert!(view.tasks_table_svg.is_none());

        let report = view.report_svg().expect("report");
        assert!(report.contains(i18n::TOTAL_TRIP_COST));
    }

    #[rstest]
    fn task_with_unknown_assignee_shows_id(mut trip: Trip) {
        trip.tasks[0].participant_id = "ghost".into();

        let table = SettlementPresenter::tasks_table(&trip);

        assert_eq!(table.rows[0][0], "Cooking");
        assert_eq!(table.rows[0][2], "ghost");
    }
}
