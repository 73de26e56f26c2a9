use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use cohort_model::{CaseId, FailureKind, OutcomeStatus};

use crate::types::PassResult;

pub fn print_summary(result: &PassResult) {
    println!("Run: {}", result.run_id);
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Archive"),
        header_cell("Session"),
        header_cell("Groups"),
        header_cell("Passed"),
        header_cell("Failed"),
        header_cell("Unrecognized"),
        header_cell("Report"),
    ]);
    apply_session_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    align_column(&mut table, 5, CellAlignment::Right);
    let mut total_passed = 0usize;
    let mut total_failed = 0usize;
    for summary in &result.sessions {
        total_passed += summary.report.passed_count();
        total_failed += summary.report.failed_count();
        table.add_row(vec![
            Cell::new(&summary.session.archive_name),
            Cell::new(summary.session.id.to_string()),
            Cell::new(summary.report.group_count()),
            passed_cell(summary.report.passed_count()),
            count_cell(summary.report.failed_count(), Color::Red),
            count_cell(summary.report.unrecognized().len(), Color::Yellow),
            Cell::new(summary.report_path.display().to_string()),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(format!("{} sessions", result.sessions.len())).fg(Color::Cyan),
        dim_cell("-"),
        passed_cell(total_passed).add_attribute(Attribute::Bold),
        count_cell(total_failed, Color::Red).add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
    ]);
    println!("{table}");
    print_failure_table(result);
    if !result.errors.is_empty() {
        eprintln!("Errors:");
        for error in &result.errors {
            eprintln!("- {error}");
        }
    }
}

fn print_failure_table(result: &PassResult) {
    let mut rows: Vec<(String, CaseId, String, FailureKind, String)> = Vec::new();
    for summary in &result.sessions {
        for (case, entries) in summary.report.cases() {
            for entry in entries {
                if entry.status != OutcomeStatus::Failed {
                    continue;
                }
                let Some(failure) = entry.failure.as_ref() else {
                    continue;
                };
                rows.push((
                    summary.session.archive_name.clone(),
                    *case,
                    entry.group.to_string(),
                    failure.kind,
                    excerpt(&failure.message),
                ));
            }
        }
    }
    if rows.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Archive"),
        header_cell("Case"),
        header_cell("Group"),
        header_cell("Kind"),
        header_cell("Message"),
    ]);
    apply_failure_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);
    align_column(&mut table, 3, CellAlignment::Center);
    for (archive, case, group, kind, message) in rows {
        table.add_row(vec![
            Cell::new(archive),
            Cell::new(case.to_string()),
            Cell::new(group),
            kind_cell(kind),
            Cell::new(message),
        ]);
    }
    println!();
    println!("Failures:");
    println!("{table}");
}

/// Condensed style for reference tables (`categories`).
pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_session_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(165);
    if table.column_count() >= 7 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Fixed(24)),
            ColumnConstraint::UpperBoundary(Width::Fixed(38)),
            ColumnConstraint::LowerBoundary(Width::Fixed(7)),
            ColumnConstraint::LowerBoundary(Width::Fixed(7)),
            ColumnConstraint::LowerBoundary(Width::Fixed(7)),
            ColumnConstraint::LowerBoundary(Width::Fixed(7)),
            ColumnConstraint::UpperBoundary(Width::Percentage(40)),
        ]);
    }
}

fn apply_failure_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(165);
    if table.column_count() >= 5 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Fixed(24)),
            ColumnConstraint::UpperBoundary(Width::Fixed(12)),
            ColumnConstraint::UpperBoundary(Width::Fixed(20)),
            ColumnConstraint::UpperBoundary(Width::Fixed(14)),
            ColumnConstraint::UpperBoundary(Width::Percentage(50)),
        ]);
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn passed_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count)
            .fg(Color::Green)
            .add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn kind_cell(kind: FailureKind) -> Cell {
    match kind {
        FailureKind::IncompleteGroup => Cell::new("INCOMPLETE").fg(Color::Yellow),
        FailureKind::MissingInput => Cell::new("MISSING INPUT").fg(Color::Yellow),
        FailureKind::Timeout => Cell::new("TIMEOUT").fg(Color::Red),
        FailureKind::ValidatorRejected => Cell::new("REJECTED").fg(Color::Red),
        FailureKind::Transport => Cell::new("TRANSPORT").fg(Color::Red),
        FailureKind::Internal => Cell::new("INTERNAL").fg(Color::Red),
    }
}

fn excerpt(message: &str) -> String {
    const LIMIT: usize = 120;
    if message.len() <= LIMIT {
        return message.to_string();
    }
    let mut cut = LIMIT;
    while !message.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}...", &message[..cut])
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
