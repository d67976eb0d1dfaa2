//! Task list pane.

use chrono::NaiveDate;
use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Row, Table, TableState},
    Frame,
};

use crate::dates::{format_due_relative, ISO_DATE};
use crate::fields::StatusFilter;
use crate::task::Task;
use crate::tui::colors::{DARK_GREEN, GOLD};

/// Style for a row; completed tasks are dimmed and struck through.
pub fn row_style(task: &Task) -> Style {
    if task.completed {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::CROSSED_OUT)
    } else {
        Style::default().fg(Color::White)
    }
}

pub fn render_task_list(
    f: &mut Frame,
    area: Rect,
    tasks: &[&Task],
    total: usize,
    filter: StatusFilter,
    today: NaiveDate,
    focused: bool,
    state: &mut TableState,
) {
    let header_cells = ["ID", "Done", "Due", "When", "Name"]
        .iter()
        .map(|h| Cell::from(*h).style(Style::default().add_modifier(Modifier::BOLD)));
    let header = Row::new(header_cells)
        .style(Style::default().bg(DARK_GREEN).fg(Color::White))
        .height(1);

    let rows: Vec<Row> = tasks
        .iter()
        .map(|task| {
            Row::new(vec![
                Cell::from(task.id.to_string()),
                Cell::from(if task.completed { "[x]" } else { "[ ]" }),
                Cell::from(task.due_date.format(ISO_DATE).to_string()),
                Cell::from(format_due_relative(task.due_date, today)),
                Cell::from(task.name.clone()),
            ])
            .style(row_style(task))
        })
        .collect();

    let widths = [
        Constraint::Length(14), // ID
        Constraint::Length(5),  // Done
        Constraint::Length(11), // Due
        Constraint::Length(10), // When
        Constraint::Min(20),    // Name
    ];

    let border_style = if focused {
        Style::default().fg(GOLD)
    } else {
        Style::default()
    };
    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(format!("{} ({}/{}) - Press 'h' for help", filter.label(), tasks.len(), total)),
        )
        .row_highlight_style(Style::default().bg(Color::Gray).fg(Color::Black))
        .highlight_symbol(">> ");

    f.render_stateful_widget(table, area, state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn completed_rows_are_distinguished() {
        let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let mut task = Task::new(1, "a", day);
        assert!(!row_style(&task).add_modifier.contains(Modifier::CROSSED_OUT));
        task.completed = true;
        assert!(row_style(&task).add_modifier.contains(Modifier::CROSSED_OUT));
    }
}
