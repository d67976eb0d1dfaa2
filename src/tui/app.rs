//! Main application logic for the terminal user interface.
//!
//! `App` wraps the [`Shell`] with screen state: which overlay is open, which
//! pane has focus, the list selection and the status bar. Key presses are
//! translated into shell intents; the screen is redrawn from shell state after
//! every event.

use std::io;
use std::time::Duration;

use chrono::{Local, NaiveDate};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, TableState, Wrap},
    Frame, Terminal,
};

use crate::error::Result;
use crate::fields::StatusFilter;
use crate::shell::Shell;
use crate::store::BlobStore;
use crate::tui::{
    calendar::{navigate, render_calendar},
    colors::{DARK_GREEN, DARK_RED},
    enums::{AppState, CalendarMove, Focus},
    task_form::{TaskForm, DUE_FIELD, NAME_FIELD},
    task_list::render_task_list,
    utils::centered_rect,
};

const CALENDAR_WIDTH: u16 = 26;

pub struct App<S: BlobStore> {
    shell: Shell<S>,
    state: AppState,
    focus: Focus,
    task_list_state: TableState,
    task_form: TaskForm,
    status_message: String,
    status_is_error: bool,
    confirm_target: Option<u64>,
    today: NaiveDate,
}

impl<S: BlobStore> App<S> {
    pub fn new(store: S) -> Self {
        Self::with_today(store, Local::now().date_naive())
    }

    pub fn with_today(store: S, today: NaiveDate) -> Self {
        let mut app = App {
            shell: Shell::start(store, today),
            state: AppState::TaskList,
            focus: Focus::List,
            task_list_state: TableState::default(),
            task_form: TaskForm::new(),
            status_message: String::new(),
            status_is_error: false,
            confirm_target: None,
            today,
        };
        app.clamp_selection();
        app
    }

    pub fn shell(&self) -> &Shell<S> {
        &self.shell
    }

    pub fn state(&self) -> AppState {
        self.state
    }

    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    fn set_status_message(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
        self.status_is_error = false;
    }

    fn set_error_message(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
        self.status_is_error = true;
    }

    fn clear_status_message(&mut self) {
        self.status_message.clear();
        self.status_is_error = false;
    }

    /// Id of the highlighted row in the filtered list.
    fn selected_id(&self) -> Option<u64> {
        let idx = self.task_list_state.selected()?;
        self.shell.visible_tasks().get(idx).map(|t| t.id)
    }

    /// Keep the selection on a visible row after the list changes.
    fn clamp_selection(&mut self) {
        let len = self.shell.visible_tasks().len();
        let selected = match (self.task_list_state.selected(), len) {
            (_, 0) => None,
            (Some(i), len) => Some(i.min(len - 1)),
            (None, _) => Some(0),
        };
        self.task_list_state.select(selected);
    }

    fn select_task(&mut self, id: u64) {
        let idx = self.shell.visible_tasks().iter().position(|t| t.id == id);
        if idx.is_some() {
            self.task_list_state.select(idx);
        }
    }

    /// Report the outcome of a mutation. In-memory state is already updated.
    fn report<T>(&mut self, result: Result<T>, on_ok: impl FnOnce(T) -> String) {
        match result {
            Ok(value) => {
                let msg = on_ok(value);
                self.set_status_message(msg);
            }
            Err(e) => self.set_error_message(format!("Error saving: {e}")),
        }
        self.clamp_selection();
    }

    fn open_add_form(&mut self) {
        self.task_form = match self.focus {
            Focus::Calendar => TaskForm::with_due(self.shell.selected_date()),
            Focus::List => TaskForm::new(),
        };
        self.state = AppState::AddTask;
    }

    fn toggle_selected(&mut self) {
        if let Some(id) = self.selected_id() {
            let result = self.shell.toggle(id);
            let completed = self.shell.get(id).map(|t| t.completed).unwrap_or(false);
            self.report(result, |_| {
                if completed {
                    "Task completed".to_string()
                } else {
                    "Task reopened".to_string()
                }
            });
        }
    }

    fn delete_confirmed(&mut self) {
        if let Some(id) = self.confirm_target.take() {
            let result = self.shell.delete(id);
            self.report(result, |_| format!("Deleted task #{id}"));
        }
        self.state = AppState::TaskList;
    }

    fn sort_tasks(&mut self) {
        let keep = self.selected_id();
        let result = self.shell.sort_by_due_date();
        self.report(result, |_| "Sorted by due date".to_string());
        if let Some(id) = keep {
            self.select_task(id);
        }
    }

    fn set_filter(&mut self, filter: StatusFilter) {
        self.shell.set_filter(filter);
        self.task_list_state.select(None);
        self.clamp_selection();
        self.set_status_message(format!("Showing: {}", filter.label()));
    }

    fn move_selection(&mut self, down: bool) {
        let len = self.shell.visible_tasks().len();
        if len == 0 {
            return;
        }
        let next = match self.task_list_state.selected() {
            Some(i) if down => (i + 1).min(len - 1),
            Some(i) => i.saturating_sub(1),
            None => 0,
        };
        self.task_list_state.select(Some(next));
    }

    fn move_calendar(&mut self, step: CalendarMove) {
        let date = navigate(self.shell.selected_date(), step, self.today);
        self.shell.set_selected_date(date);
    }

    /// Handle keyboard input on the main screen. Returns true to quit.
    fn handle_task_list_input(&mut self, key: KeyCode, modifiers: KeyModifiers) -> bool {
        match key {
            KeyCode::Char('c') | KeyCode::Char('q') if modifiers.contains(KeyModifiers::CONTROL) => {
                return true
            }
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Tab | KeyCode::BackTab => self.focus = self.focus.toggle(),
            KeyCode::Char('a') => self.open_add_form(),
            KeyCode::Char('f') => self.set_filter(self.shell.filter().cycle()),
            KeyCode::Char('1') => self.set_filter(StatusFilter::All),
            KeyCode::Char('2') => self.set_filter(StatusFilter::Completed),
            KeyCode::Char('3') => self.set_filter(StatusFilter::Pending),
            KeyCode::Char('s') => self.sort_tasks(),
            KeyCode::Char('h') | KeyCode::Char('?') => self.state = AppState::Help,
            _ => match self.focus {
                Focus::List => self.handle_list_focus(key),
                Focus::Calendar => self.handle_calendar_focus(key),
            },
        }
        false
    }

    fn handle_list_focus(&mut self, key: KeyCode) {
        match key {
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(false),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(true),
            KeyCode::Enter | KeyCode::Char(' ') => self.toggle_selected(),
            KeyCode::Char('d') | KeyCode::Delete => {
                if let Some(id) = self.selected_id() {
                    self.confirm_target = Some(id);
                    self.state = AppState::Confirm;
                }
            }
            _ => {}
        }
    }

    fn handle_calendar_focus(&mut self, key: KeyCode) {
        let step = match key {
            KeyCode::Left => CalendarMove::PrevDay,
            KeyCode::Right => CalendarMove::NextDay,
            KeyCode::Up => CalendarMove::PrevWeek,
            KeyCode::Down => CalendarMove::NextWeek,
            KeyCode::PageUp => CalendarMove::PrevMonth,
            KeyCode::PageDown => CalendarMove::NextMonth,
            KeyCode::Char('t') => CalendarMove::Today,
            _ => return,
        };
        self.move_calendar(step);
    }

    fn handle_form_input(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => {
                self.state = AppState::TaskList;
                self.set_status_message("Add cancelled");
            }
            KeyCode::Tab | KeyCode::Down => self.task_form.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.task_form.prev_field(),
            KeyCode::Left => self.task_form.current_input_mut().move_cursor_left(),
            KeyCode::Right => self.task_form.current_input_mut().move_cursor_right(),
            KeyCode::Backspace => self.task_form.current_input_mut().handle_backspace(),
            KeyCode::Delete => self.task_form.current_input_mut().handle_delete(),
            KeyCode::Enter => match self.task_form.submit(self.today) {
                Ok(intent) => {
                    let result = self.shell.add(&intent.name, intent.due_date);
                    self.state = AppState::TaskList;
                    let name = intent.name;
                    self.report(result, |_| format!("Added '{name}'"));
                    if let Some(last) = self.shell.tasks().last().map(|t| t.id) {
                        self.select_task(last);
                    }
                }
                Err(e) => self.set_error_message(e.to_string()),
            },
            KeyCode::Char(c) => self.task_form.current_input_mut().handle_char(c),
            _ => {}
        }
    }

    fn handle_confirm_input(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => self.delete_confirmed(),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.confirm_target = None;
                self.state = AppState::TaskList;
                self.set_status_message("Delete cancelled");
            }
            _ => {}
        }
    }

    fn handle_help_input(&mut self, key: KeyCode) {
        if matches!(
            key,
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('h') | KeyCode::Char('?')
        ) {
            self.state = AppState::TaskList;
        }
    }

    /// Dispatch a key press to the active screen. Returns true to quit.
    pub fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) -> bool {
        if self.state != AppState::AddTask {
            self.clear_status_message();
        }
        match self.state {
            AppState::TaskList => return self.handle_task_list_input(key, modifiers),
            AppState::AddTask => self.handle_form_input(key),
            AppState::Confirm => self.handle_confirm_input(key),
            AppState::Help => self.handle_help_input(key),
        }
        false
    }

    /// Poll for and handle one keyboard event. Returns true to quit.
    fn handle_input(&mut self) -> io::Result<bool> {
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    return Ok(self.handle_key(key.code, key.modifiers));
                }
            }
        }
        Ok(false)
    }

    fn render_header(&self, f: &mut Frame, area: Rect) {
        let pending = self.shell.tasks().iter().filter(|t| !t.completed).count();
        let header = Paragraph::new(Line::from(vec![
            Span::styled("TASK TRACKER", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            Span::styled(
                format!(
                    "Filter: {}  Pending: {}/{}",
                    self.shell.filter().label(),
                    pending,
                    self.shell.tasks().len()
                ),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::ITALIC),
            ),
        ]))
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center);
        f.render_widget(header, area);
    }

    fn render_task_form(&self, f: &mut Frame, area: Rect) {
        let area = centered_rect(60, 30, area);
        f.render_widget(Clear, area);
        let block = Block::default().borders(Borders::ALL).title("Add Task");
        let inner = block.inner(area);
        f.render_widget(block, area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(inner);

        let fields = [
            (NAME_FIELD, "Name: ", &self.task_form.name, rows[0]),
            (DUE_FIELD, "Due:  ", &self.task_form.due, rows[2]),
        ];
        for (order, label, input, row) in fields {
            let style = if input.active {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let line = Line::from(vec![
                Span::styled(label, style),
                Span::raw(input.value.as_str()),
            ]);
            f.render_widget(Paragraph::new(line), row);
            if order == self.task_form.current_field {
                let x = row.x + label.len() as u16 + input.cursor as u16;
                f.set_cursor_position((x.min(row.right().saturating_sub(1)), row.y));
            }
        }

        let hint = Paragraph::new("Enter to add, Tab to switch field, Esc to cancel. Due: YYYY-MM-DD, today, tomorrow, in Nd")
            .style(Style::default().fg(Color::DarkGray))
            .wrap(Wrap { trim: true });
        f.render_widget(hint, rows[4]);
    }

    fn render_confirm(&self, f: &mut Frame, area: Rect) {
        let block = Block::default()
            .title("Confirm Action")
            .borders(Borders::ALL)
            .style(Style::default().bg(DARK_RED));

        let area = centered_rect(50, 20, area);
        f.render_widget(Clear, area);

        let target = self
            .confirm_target
            .and_then(|id| self.shell.get(id))
            .map(|t| format!("Delete '{}'", t.name))
            .unwrap_or_default();
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Are you sure you want to:",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(target),
            Line::from(""),
            Line::from("Press 'y' to confirm, 'n' to cancel"),
        ];

        let paragraph = Paragraph::new(text)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_help(&self, f: &mut Frame, area: Rect) {
        let area = centered_rect(60, 70, area);
        f.render_widget(Clear, area);
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let text = vec![
            Line::from(Span::styled("Tasks", bold)),
            Line::from("  a          add a task"),
            Line::from("  Space/Enter toggle completion"),
            Line::from("  d          delete selected task"),
            Line::from("  s          sort by due date"),
            Line::from("  f / 1 2 3  filter: all, completed, pending"),
            Line::from(""),
            Line::from(Span::styled("Calendar (Tab to focus)", bold)),
            Line::from("  arrows     move by day / week"),
            Line::from("  PgUp/PgDn  move by month"),
            Line::from("  t          jump to today"),
            Line::from("  a          add a task due on the selected day"),
            Line::from(""),
            Line::from("  q / Esc    quit"),
        ];
        let help = Paragraph::new(text).block(Block::default().borders(Borders::ALL).title("Help"));
        f.render_widget(help, area);
    }

    fn render_status_bar(&self, f: &mut Frame, area: Rect) {
        let text = if !self.status_message.is_empty() {
            self.status_message.clone()
        } else {
            match self.state {
                AppState::TaskList => match self.focus {
                    Focus::List => "a add | Space toggle | d delete | s sort | f filter | Tab calendar | h help".to_string(),
                    Focus::Calendar => "arrows move | PgUp/PgDn month | t today | a add on day | Tab list".to_string(),
                },
                AppState::AddTask => "Add New Task".to_string(),
                AppState::Help => "Help".to_string(),
                AppState::Confirm => "Confirm Action".to_string(),
            }
        };
        let bg = if self.status_is_error { DARK_RED } else { DARK_GREEN };
        let status = Paragraph::new(text)
            .style(Style::default().bg(bg).fg(Color::White))
            .alignment(Alignment::Left);
        f.render_widget(status, area);
    }

    /// Draw the whole screen from current state.
    pub fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(1)])
            .split(f.area());
        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(40), Constraint::Length(CALENDAR_WIDTH)])
            .split(chunks[1]);

        self.render_header(f, chunks[0]);

        let visible = self.shell.visible_tasks();
        render_task_list(
            f,
            body[0],
            &visible,
            self.shell.tasks().len(),
            self.shell.filter(),
            self.today,
            self.focus == Focus::List,
            &mut self.task_list_state,
        );
        render_calendar(
            f,
            body[1],
            self.shell.tasks(),
            self.shell.selected_date(),
            self.focus == Focus::Calendar,
        );

        match self.state {
            AppState::TaskList => {}
            AppState::AddTask => self.render_task_form(f, chunks[1]),
            AppState::Confirm => self.render_confirm(f, chunks[1]),
            AppState::Help => self.render_help(f, chunks[1]),
        }

        self.render_status_bar(f, chunks[2]);
    }

    /// Main event loop: draw, then handle one event, until the user quits.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            self.today = Local::now().date_naive();
            terminal.draw(|f| self.render(f))?;

            if self.handle_input()? {
                break;
            }
        }
        Ok(())
    }
}
