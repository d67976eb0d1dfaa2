//! Calendar pane: a month grid with days that have tasks due highlighted.
//!
//! Grid layout is delegated to ratatui's `Monthly` widget. Annotation always
//! looks at the full task sequence, never the filtered list.

use std::collections::BTreeSet;

use chrono::{Datelike, Duration, Months, NaiveDate};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{
        calendar::{CalendarEventStore, Monthly},
        Block, Borders, Paragraph, Wrap,
    },
    Frame,
};

use crate::dates::ISO_DATE;
use crate::task::Task;
use crate::tui::colors::{DARK_PURPLE, GOLD};
use crate::tui::enums::CalendarMove;

/// Whether any task is due on `day`.
pub fn has_task_on(tasks: &[Task], day: NaiveDate) -> bool {
    tasks.iter().any(|t| t.due_date == day)
}

/// Days of the given month with at least one task due.
pub fn days_with_tasks(tasks: &[Task], year: i32, month: u32) -> BTreeSet<NaiveDate> {
    tasks
        .iter()
        .map(|t| t.due_date)
        .filter(|d| d.year() == year && d.month() == month)
        .collect()
}

pub fn tasks_due_on(tasks: &[Task], day: NaiveDate) -> Vec<&Task> {
    tasks.iter().filter(|t| t.due_date == day).collect()
}

/// Apply a navigation step to the selected date. Steps past the supported
/// date range leave the date unchanged.
pub fn navigate(date: NaiveDate, step: CalendarMove, today: NaiveDate) -> NaiveDate {
    let moved = match step {
        CalendarMove::PrevDay => date.pred_opt(),
        CalendarMove::NextDay => date.succ_opt(),
        CalendarMove::PrevWeek => date.checked_sub_signed(Duration::days(7)),
        CalendarMove::NextWeek => date.checked_add_signed(Duration::days(7)),
        CalendarMove::PrevMonth => date.checked_sub_months(Months::new(1)),
        CalendarMove::NextMonth => date.checked_add_months(Months::new(1)),
        CalendarMove::Today => Some(today),
    };
    moved.unwrap_or(date)
}

fn to_time_date(d: NaiveDate) -> Option<time::Date> {
    let month = time::Month::try_from(u8::try_from(d.month()).ok()?).ok()?;
    time::Date::from_calendar_date(d.year(), month, u8::try_from(d.day()).ok()?).ok()
}

/// Build the per-day styles for the month containing `selected`.
fn event_store(tasks: &[Task], selected: NaiveDate) -> CalendarEventStore {
    let marked = Style::default().fg(GOLD).add_modifier(Modifier::BOLD);
    let mut events = CalendarEventStore::default();
    for day in days_with_tasks(tasks, selected.year(), selected.month()) {
        if let Some(d) = to_time_date(day) {
            events.add(d, marked);
        }
    }
    let base = if has_task_on(tasks, selected) {
        marked
    } else {
        Style::default()
    };
    if let Some(d) = to_time_date(selected) {
        events.add(d, base.bg(DARK_PURPLE).add_modifier(Modifier::REVERSED));
    }
    events
}

/// Render the month grid and the list of tasks due on the selected day.
pub fn render_calendar(f: &mut Frame, area: Rect, tasks: &[Task], selected: NaiveDate, focused: bool) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(10), Constraint::Min(0)])
        .split(area);

    let border_style = if focused {
        Style::default().fg(GOLD)
    } else {
        Style::default()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title("Calendar");

    match to_time_date(selected) {
        Some(display) => {
            let calendar = Monthly::new(display, event_store(tasks, selected))
                .show_month_header(Style::default().add_modifier(Modifier::BOLD))
                .show_weekdays_header(Style::default().fg(Color::Cyan))
                .show_surrounding(Style::default().fg(Color::DarkGray))
                .default_style(Style::default().fg(Color::White))
                .block(block);
            f.render_widget(calendar, chunks[0]);
        }
        None => {
            f.render_widget(Paragraph::new("Date out of range").block(block), chunks[0]);
        }
    }

    let due = tasks_due_on(tasks, selected);
    let mut lines: Vec<Line> = if due.is_empty() {
        vec![Line::from("Nothing due")]
    } else {
        due.iter()
            .map(|t| {
                let marker = if t.completed { "[x]" } else { "[ ]" };
                Line::from(format!("{marker} {}", t.name))
            })
            .collect()
    };
    lines.insert(0, Line::from(""));
    let summary = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Due {}", selected.format(ISO_DATE))),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(summary, chunks[1]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, ISO_DATE).unwrap()
    }

    fn tasks() -> Vec<Task> {
        let tasks = ops::add_task(&[], 1, "Call mom", date("2024-03-05"));
        let tasks = ops::add_task(&tasks, 2, "Dentist", date("2024-03-20"));
        let tasks = ops::add_task(&tasks, 3, "Taxes", date("2024-04-15"));
        ops::toggle_completion(&tasks, 2)
    }

    #[test]
    fn marks_days_regardless_of_completion() {
        let days = days_with_tasks(&tasks(), 2024, 3);
        let expected: BTreeSet<_> = [date("2024-03-05"), date("2024-03-20")].into_iter().collect();
        assert_eq!(days, expected);
        assert!(has_task_on(&tasks(), date("2024-03-20")));
        assert!(!has_task_on(&tasks(), date("2024-03-21")));
    }

    #[test]
    fn tasks_due_on_selected_day() {
        let all = tasks();
        let due = tasks_due_on(&all, date("2024-04-15"));
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].name, "Taxes");
    }

    #[test]
    fn navigation_steps() {
        let today = date("2024-06-01");
        let d = date("2024-01-31");
        assert_eq!(navigate(d, CalendarMove::NextDay, today), date("2024-02-01"));
        assert_eq!(navigate(d, CalendarMove::PrevDay, today), date("2024-01-30"));
        assert_eq!(navigate(d, CalendarMove::NextWeek, today), date("2024-02-07"));
        assert_eq!(navigate(d, CalendarMove::PrevWeek, today), date("2024-01-24"));
        assert_eq!(navigate(d, CalendarMove::NextMonth, today), date("2024-02-29"));
        assert_eq!(navigate(d, CalendarMove::PrevMonth, today), date("2023-12-31"));
        assert_eq!(navigate(d, CalendarMove::Today, today), today);
    }

    #[test]
    fn converts_to_calendar_widget_dates() {
        let d = to_time_date(date("2024-02-29")).unwrap();
        assert_eq!(d.year(), 2024);
        assert_eq!(d.month(), time::Month::February);
        assert_eq!(d.day(), 29);
    }

    #[test]
    fn event_store_covers_marked_and_selected_days() {
        use ratatui::widgets::calendar::DateStyler;

        let events = event_store(&tasks(), date("2024-03-10"));
        let style = |s: &str| events.get_style(to_time_date(date(s)).unwrap());
        assert_eq!(style("2024-03-05").fg, Some(GOLD));
        assert_eq!(style("2024-03-20").fg, Some(GOLD));
        assert_eq!(style("2024-03-10").bg, Some(DARK_PURPLE));
        assert_eq!(style("2024-03-11"), Style::default());
    }
}
