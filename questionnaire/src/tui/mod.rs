//! Terminal questionnaire wizard.
//!
//! Layout:
//! - Centered window frame titled "Questionnaire"
//! - Progress gauge on top, section rail on the left, current question on the right
//! - Bottom button row: [ ← ] [ Entrée ↵ ] [ Quitter ]
//! - Modal confirmation on quit, message modal for errors and export results
//!
//! Note: Logging is file-only in TUI mode (stdout logging is disabled) to avoid corrupting the
//! terminal UI.

use crate::models::answers::Section;
use crate::submit::JsonFileSubmitter;
use crate::wizard::question::{ChoiceOption, Input, Question};
use crate::wizard::session::{InputEvent, Session};
use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use log::{error, info};
use ratatui::backend::{Backend, CrosstermBackend, TestBackend};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, Gauge, Paragraph, Wrap};
use ratatui::Terminal;
use std::io::{self, Stdout};
use std::path::PathBuf;
use std::time::{Duration, Instant};

const NO_OPTIONS: &str = "(aucune option : répondez d'abord à la question précédente)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ButtonFocus {
    Back,
    Next,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FocusTarget {
    /// 0 = main input, 1 = auxiliary input
    Field(usize),
    Button(ButtonFocus),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Modal {
    ConfirmQuit { confirm_focused: bool },
    Message { title: String, body: String },
}

/// Single-line editor. `cursor` counts characters, not bytes.
#[derive(Debug, Clone, Default)]
struct TextInput {
    value: String,
    cursor: usize,
}

impl TextInput {
    fn set(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.value.chars().count();
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    fn len(&self) -> usize {
        self.value.chars().count()
    }

    /// Returns true when the key was consumed.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char(c) => {
                let at = self.byte_index(self.cursor);
                self.value.insert(at, c);
                self.cursor += 1;
                true
            }
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    let at = self.byte_index(self.cursor);
                    self.value.remove(at);
                }
                true
            }
            KeyCode::Delete => {
                if self.cursor < self.len() {
                    let at = self.byte_index(self.cursor);
                    self.value.remove(at);
                }
                true
            }
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                true
            }
            KeyCode::Right => {
                self.cursor = (self.cursor + 1).min(self.len());
                true
            }
            KeyCode::Home => {
                self.cursor = 0;
                true
            }
            KeyCode::End => {
                self.cursor = self.len();
                true
            }
            _ => false,
        }
    }

    /// Value with a `|` caret, for the focused field.
    fn display_with_caret(&self) -> String {
        let at = self.byte_index(self.cursor);
        format!("{}|{}", &self.value[..at], &self.value[at..])
    }
}

struct ShellState {
    session: Session,
    submitter: JsonFileSubmitter,
    focus: FocusTarget,
    modal: Option<Modal>,
    editor: TextInput,
    aux_editor: TextInput,
    /// Highlighted option (or weight row) of the current question.
    highlight: usize,
    quit: bool,
}

impl ShellState {
    fn new(export_dir: PathBuf) -> Result<Self> {
        let session = Session::from_catalog()?;
        let submitter = JsonFileSubmitter::new(export_dir, session.id());
        let mut state = Self {
            session,
            submitter,
            focus: FocusTarget::Field(0),
            modal: None,
            editor: TextInput::default(),
            aux_editor: TextInput::default(),
            highlight: 0,
            quit: false,
        };
        sync_editors(&mut state);
        Ok(state)
    }

    fn question(&self) -> Question {
        *self.session.current()
    }
}

pub fn run(export_dir: PathBuf) -> Result<()> {
    info!("[PHASE: tui] [STEP: start] Starting questionnaire TUI");

    let mut state = ShellState::new(export_dir)?;
    let mut terminal = setup_terminal()?;
    let result = run_loop(&mut terminal, &mut state);
    restore_terminal(&mut terminal)?;

    result
}

/// Non-interactive smoke mode: render question `number` (1-based) once and return the frame text.
pub fn smoke(export_dir: PathBuf, number: usize) -> Result<String> {
    info!(
        "[PHASE: tui] [STEP: smoke] Rendering single-frame smoke for question {}",
        number
    );

    let mut state = ShellState::new(export_dir)?;
    for _ in 1..number {
        if !state.session.apply(InputEvent::Next)? {
            break;
        }
    }
    sync_editors(&mut state);

    // In-memory backend: no raw mode, no alternate screen.
    render_to_string(&state, 100, 30)
}

fn render_to_string(state: &ShellState, width: u16, height: u16) -> Result<String> {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend)?;
    terminal.draw(|f| draw(f.size(), f, state))?;

    let buffer = terminal.backend().buffer();
    let mut out = String::new();
    for (i, cell) in buffer.content.iter().enumerate() {
        out.push_str(cell.symbol());
        if (i + 1) % usize::from(width) == 0 {
            out.push('\n');
        }
    }
    Ok(out)
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn run_loop<B: Backend>(terminal: &mut Terminal<B>, state: &mut ShellState) -> Result<()> {
    let tick_rate = Duration::from_millis(100);
    let mut last_tick = Instant::now();

    while !state.quit {
        terminal.draw(|f| draw(f.size(), f, state))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_millis(0));

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_key(state, key);
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }
    }

    Ok(())
}

/// Reload editors and reset per-question focus after the cursor moved.
fn sync_editors(state: &mut ShellState) {
    let q = state.question();
    let store = state.session.store();
    let main = match q.input {
        Input::Text { field, .. } => store.text(q.section, field).to_string(),
        _ => String::new(),
    };
    let aux = q
        .auxiliary
        .map(|a| store.text(q.section, a.field).to_string())
        .unwrap_or_default();
    state.editor.set(main);
    state.aux_editor.set(aux);
    state.highlight = 0;
    state.focus = FocusTarget::Field(0);
}

fn has_visible_auxiliary(state: &ShellState) -> bool {
    state
        .session
        .current()
        .auxiliary(state.session.store())
        .is_some()
}

fn focus_order(state: &ShellState) -> Vec<FocusTarget> {
    let mut order = vec![FocusTarget::Field(0)];
    if has_visible_auxiliary(state) {
        order.push(FocusTarget::Field(1));
    }
    order.extend([
        FocusTarget::Button(ButtonFocus::Back),
        FocusTarget::Button(ButtonFocus::Next),
        FocusTarget::Button(ButtonFocus::Quit),
    ]);
    order
}

fn cycle_focus(state: &mut ShellState, forward: bool) {
    let order = focus_order(state);
    let idx = order.iter().position(|f| *f == state.focus).unwrap_or(0);
    let next = if forward {
        (idx + 1) % order.len()
    } else {
        (idx + order.len() - 1) % order.len()
    };
    state.focus = order[next];
}

/// Send one event to the session; failures surface as a message modal.
fn dispatch(state: &mut ShellState, event: InputEvent) -> bool {
    let navigation = matches!(event, InputEvent::Next | InputEvent::Back);
    match state.session.apply(event) {
        Ok(changed) => {
            if navigation && changed {
                sync_editors(state);
            }
            changed
        }
        Err(e) => {
            error!("[PHASE: tui] [STEP: input] Rejected input: {}", e);
            state.modal = Some(Modal::Message {
                title: "Saisie refusée".to_string(),
                body: e.to_string(),
            });
            false
        }
    }
}

fn export_answers(state: &mut ShellState) {
    let (title, body) = match state.submitter.export(state.session.store().record()) {
        Ok(path) => (
            "Réponses exportées".to_string(),
            format!("Fichier écrit : {}", path.display()),
        ),
        Err(e) => {
            error!("[PHASE: tui] [STEP: export] Export failed: {}", e);
            ("Échec de l'export".to_string(), e.to_string())
        }
    };
    state.modal = Some(Modal::Message { title, body });
}

fn handle_key(state: &mut ShellState, key: KeyEvent) {
    let code = key.code;

    // Modal handling
    if let Some(modal) = state.modal.clone() {
        match modal {
            Modal::ConfirmQuit { confirm_focused } => match code {
                KeyCode::Left | KeyCode::Right | KeyCode::Tab => {
                    state.modal = Some(Modal::ConfirmQuit {
                        confirm_focused: !confirm_focused,
                    });
                }
                KeyCode::Enter => {
                    state.modal = None;
                    if confirm_focused {
                        info!("[PHASE: tui] [STEP: quit] User confirmed quit");
                        state.quit = true;
                    }
                }
                KeyCode::Esc => state.modal = None,
                _ => {}
            },
            Modal::Message { .. } => {
                if matches!(code, KeyCode::Enter | KeyCode::Esc) {
                    state.modal = None;
                }
            }
        }
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match code {
            KeyCode::Char('s') => export_answers(state),
            KeyCode::Char('c') => {
                state.modal = Some(Modal::ConfirmQuit {
                    confirm_focused: false,
                })
            }
            _ => {}
        }
        return;
    }

    match code {
        KeyCode::Esc => {
            state.modal = Some(Modal::ConfirmQuit {
                confirm_focused: false,
            });
            return;
        }
        KeyCode::Tab => {
            cycle_focus(state, true);
            return;
        }
        KeyCode::BackTab => {
            cycle_focus(state, false);
            return;
        }
        KeyCode::PageDown => {
            dispatch(state, InputEvent::Next);
            return;
        }
        KeyCode::PageUp => {
            dispatch(state, InputEvent::Back);
            return;
        }
        _ => {}
    }

    match state.focus {
        FocusTarget::Button(button) => handle_button_key(state, button, code),
        FocusTarget::Field(1) => {
            if code == KeyCode::Enter {
                dispatch(state, InputEvent::Next);
            } else {
                edit_auxiliary(state, code);
            }
        }
        FocusTarget::Field(_) => {
            if code == KeyCode::Enter {
                dispatch(state, InputEvent::Next);
            } else {
                handle_field_key(state, code);
            }
        }
    }
}

fn handle_button_key(state: &mut ShellState, button: ButtonFocus, code: KeyCode) {
    match code {
        KeyCode::Left => {
            let prev = match button {
                ButtonFocus::Back => ButtonFocus::Back,
                ButtonFocus::Next => ButtonFocus::Back,
                ButtonFocus::Quit => ButtonFocus::Next,
            };
            state.focus = FocusTarget::Button(prev);
        }
        KeyCode::Right => {
            let next = match button {
                ButtonFocus::Back => ButtonFocus::Next,
                ButtonFocus::Next => ButtonFocus::Quit,
                ButtonFocus::Quit => ButtonFocus::Quit,
            };
            state.focus = FocusTarget::Button(next);
        }
        KeyCode::Enter | KeyCode::Char(' ') => match button {
            ButtonFocus::Back => {
                if dispatch(state, InputEvent::Back) {
                    state.focus = FocusTarget::Button(ButtonFocus::Back);
                }
            }
            ButtonFocus::Next => {
                if dispatch(state, InputEvent::Next) {
                    state.focus = FocusTarget::Button(ButtonFocus::Next);
                }
            }
            ButtonFocus::Quit => {
                state.modal = Some(Modal::ConfirmQuit {
                    confirm_focused: false,
                });
            }
        },
        _ => {}
    }
}

fn move_highlight(state: &mut ShellState, code: KeyCode, len: usize) -> bool {
    if len == 0 {
        state.highlight = 0;
        return matches!(code, KeyCode::Up | KeyCode::Down);
    }
    match code {
        KeyCode::Up => {
            state.highlight = state.highlight.min(len - 1).saturating_sub(1);
            true
        }
        KeyCode::Down => {
            state.highlight = (state.highlight + 1).min(len - 1);
            true
        }
        _ => false,
    }
}

fn highlighted(options: &[ChoiceOption], highlight: usize) -> Option<&ChoiceOption> {
    if options.is_empty() {
        return None;
    }
    options.get(highlight.min(options.len() - 1))
}

fn handle_field_key(state: &mut ShellState, code: KeyCode) {
    let q = state.question();
    let section = q.section;

    match q.input {
        Input::Text { field, .. } => {
            let before = state.editor.value.clone();
            if state.editor.handle_key(code) && state.editor.value != before {
                let value = state.editor.value.clone();
                dispatch(
                    state,
                    InputEvent::SetText {
                        section,
                        field: field.to_string(),
                        value,
                    },
                );
            }
        }
        Input::Choice { field, .. } => {
            let options = q.options(state.session.store());
            if move_highlight(state, code, options.len()) {
                return;
            }
            if code == KeyCode::Char(' ') {
                if let Some(opt) = highlighted(&options, state.highlight) {
                    let value = opt.value.clone();
                    dispatch(
                        state,
                        InputEvent::Choose {
                            section,
                            field: field.to_string(),
                            value,
                        },
                    );
                }
            }
        }
        Input::MultiSelect { field, .. } => {
            let options = q.options(state.session.store());
            if move_highlight(state, code, options.len()) {
                return;
            }
            if code == KeyCode::Char(' ') {
                if let Some(opt) = highlighted(&options, state.highlight) {
                    let item = opt.value.clone();
                    dispatch(
                        state,
                        InputEvent::Toggle {
                            section,
                            field: field.to_string(),
                            item,
                        },
                    );
                }
            }
        }
        Input::Ranked {
            field, max_rank, ..
        } => {
            let options = q.options(state.session.store());
            if move_highlight(state, code, options.len()) {
                return;
            }
            let item = highlighted(&options, state.highlight).map(|o| o.value.clone());
            match code {
                KeyCode::Char(c) if c.is_ascii_digit() => {
                    let position = c.to_digit(10).unwrap_or(0) as usize;
                    if let Some(item) = item.filter(|_| (1..=max_rank).contains(&position)) {
                        dispatch(
                            state,
                            InputEvent::Rank {
                                section,
                                field: field.to_string(),
                                position,
                                item,
                            },
                        );
                    }
                }
                KeyCode::Delete | KeyCode::Backspace => {
                    // The highlighted item's slot first, then any slot whose value
                    // left the option list.
                    let slots = state.session.store().ranked(section, field);
                    let held = item.as_deref().and_then(|item| {
                        slots.iter().position(|slot| slot.as_deref() == Some(item))
                    });
                    let target = held.or_else(|| {
                        slots.iter().position(|slot| {
                            slot.as_deref()
                                .is_some_and(|v| !options.iter().any(|o| o.value == v))
                        })
                    });
                    if let Some(index) = target {
                        dispatch(
                            state,
                            InputEvent::ClearRank {
                                section,
                                field: field.to_string(),
                                position: index + 1,
                            },
                        );
                    }
                }
                _ => {}
            }
        }
        Input::Weights { rows, .. } => {
            if move_highlight(state, code, rows.len()) {
                return;
            }
            let Some(row) = rows.get(state.highlight.min(rows.len().saturating_sub(1))) else {
                return;
            };
            let delta = match code {
                KeyCode::Left | KeyCode::Char('-') => -1,
                KeyCode::Right | KeyCode::Char('+') => 1,
                _ => return,
            };
            dispatch(
                state,
                InputEvent::AdjustWeight {
                    section,
                    field: row.field.to_string(),
                    delta,
                },
            );
        }
    }
}

fn edit_auxiliary(state: &mut ShellState, code: KeyCode) {
    let q = state.question();
    let Some(aux) = q.auxiliary(state.session.store()).copied() else {
        // condition no longer holds; fall back to the main input
        state.focus = FocusTarget::Field(0);
        return;
    };
    let before = state.aux_editor.value.clone();
    if state.aux_editor.handle_key(code) && state.aux_editor.value != before {
        let value = state.aux_editor.value.clone();
        dispatch(
            state,
            InputEvent::SetText {
                section: q.section,
                field: aux.field.to_string(),
                value,
            },
        );
    }
}

// -----------------------------------------------------------------------------
// Drawing
// -----------------------------------------------------------------------------

fn draw(area: Rect, f: &mut ratatui::Frame<'_>, state: &ShellState) {
    let window_area = centered_window(area, 100, 30);

    let outer_block = Block::default()
        .borders(Borders::ALL)
        .title("Questionnaire");
    f.render_widget(outer_block, window_area);

    // Inner layout: progress + body + buttons row
    let inner = window_area.inner(&ratatui::layout::Margin {
        vertical: 1,
        horizontal: 1,
    });
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ]
            .as_ref(),
        )
        .split(inner);

    draw_progress(f, rows[0], state);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(22), Constraint::Min(0)].as_ref())
        .split(rows[1]);

    draw_section_rail(f, cols[0], state);
    draw_question(f, cols[1], state);
    draw_buttons(f, rows[2], state);

    match &state.modal {
        Some(Modal::ConfirmQuit { confirm_focused }) => {
            draw_quit_modal(f, window_area, *confirm_focused)
        }
        Some(Modal::Message { title, body }) => draw_message_modal(f, window_area, title, body),
        None => {}
    }
}

fn centered_window(area: Rect, width: u16, height: u16) -> Rect {
    let w = width.min(area.width.saturating_sub(2)).max(60).min(area.width);
    let h = height.min(area.height.saturating_sub(2)).max(20).min(area.height);
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect {
        x,
        y,
        width: w,
        height: h,
    }
}

fn draw_progress(f: &mut ratatui::Frame<'_>, area: Rect, state: &ShellState) {
    let steps = state.session.steps();
    let ratio = steps.progress_fraction().clamp(0.0, 1.0);
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Blue).bg(Color::Black))
        .ratio(ratio)
        .label(format!("{:.0}%", ratio * 100.0));
    f.render_widget(gauge, area);
}

fn draw_section_rail(f: &mut ratatui::Frame<'_>, area: Rect, state: &ShellState) {
    let current = state.session.current().section;
    let questions = state.session.steps().questions();

    let mut lines = Vec::new();
    for (i, section) in Section::ALL.iter().enumerate() {
        let count = questions.iter().filter(|q| q.section == *section).count();
        let label = format!("{}. {} ({})", i + 1, section.title(), count);
        let style = if *section == current {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        };
        lines.push(Line::from(Span::styled(label, style)));
    }

    let rail = Paragraph::new(Text::from(lines))
        .block(Block::default().borders(Borders::ALL).title("Sections"))
        .wrap(Wrap { trim: true });
    f.render_widget(rail, area);
}

fn marker(selected: bool, multi: bool) -> &'static str {
    match (multi, selected) {
        (true, true) => "[x]",
        (true, false) => "[ ]",
        (false, true) => "(x)",
        (false, false) => "( )",
    }
}

fn pointer(state: &ShellState, index: usize) -> &'static str {
    if state.focus == FocusTarget::Field(0) && state.highlight == index {
        ">"
    } else {
        " "
    }
}

fn question_lines(state: &ShellState) -> Vec<Line<'static>> {
    let q = state.question();
    let store = state.session.store();
    let (n, total) = state.session.steps().question_number();

    let mut lines = vec![
        Line::from(Span::styled(
            format!("{}/{}", n, total),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        Line::from(Span::styled(
            q.prompt.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    let options = q.options(store);
    match q.input {
        Input::Text { placeholder, .. } => {
            let focused = state.focus == FocusTarget::Field(0);
            let shown = if focused {
                state.editor.display_with_caret()
            } else {
                state.editor.value.clone()
            };
            if shown.is_empty() || (focused && state.editor.value.is_empty()) {
                lines.push(Line::from(vec![
                    Span::raw(if focused { "> |" } else { "  " }),
                    Span::styled(placeholder.to_string(), Style::default().fg(Color::DarkGray)),
                ]));
            } else {
                lines.push(Line::from(format!(
                    "{} {}",
                    if focused { ">" } else { " " },
                    shown
                )));
            }
        }
        Input::Choice { field, options: source } => {
            if options.is_empty() && source.is_derived() {
                lines.push(Line::from(NO_OPTIONS));
            }
            let current = store.text(q.section, field);
            for (i, opt) in options.iter().enumerate() {
                lines.push(Line::from(format!(
                    "{} {} {}",
                    pointer(state, i),
                    marker(opt.value == current, false),
                    opt.label
                )));
            }
        }
        Input::MultiSelect { field, options: source } => {
            if options.is_empty() && source.is_derived() {
                lines.push(Line::from(NO_OPTIONS));
            }
            let selected = store.selection(q.section, field);
            for (i, opt) in options.iter().enumerate() {
                lines.push(Line::from(format!(
                    "{} {} {}",
                    pointer(state, i),
                    marker(selected.contains(&opt.value), true),
                    opt.label
                )));
            }
        }
        Input::Ranked { field, .. } => {
            if options.is_empty() {
                lines.push(Line::from(NO_OPTIONS));
            }
            let slots = store.ranked(q.section, field);
            for (i, opt) in options.iter().enumerate() {
                let rank = slots
                    .iter()
                    .position(|s| s.as_deref() == Some(opt.value.as_str()))
                    .map(|p| format!("#{}", p + 1))
                    .unwrap_or_else(|| "  ".to_string());
                lines.push(Line::from(format!(
                    "{} {} {}",
                    pointer(state, i),
                    rank,
                    opt.label
                )));
            }
            lines.push(Line::from(""));
            let summary: Vec<String> = slots
                .iter()
                .enumerate()
                .map(|(i, s)| format!("{}. {}", i + 1, s.as_deref().unwrap_or("—")))
                .collect();
            lines.push(Line::from(summary.join("   ")));
        }
        Input::Weights { rows, max } => {
            for (i, row) in rows.iter().enumerate() {
                let w = store.weight(q.section, row.field);
                let bar: String = (0..max)
                    .map(|step| if step < w { '█' } else { '·' })
                    .collect();
                lines.push(Line::from(format!(
                    "{} {:<24} {} {:>2}/{}",
                    pointer(state, i),
                    row.label,
                    bar,
                    w,
                    max
                )));
            }
        }
    }

    if let Some(aux) = q.auxiliary(store) {
        let focused = state.focus == FocusTarget::Field(1);
        let value = if focused {
            state.aux_editor.display_with_caret()
        } else if state.aux_editor.value.is_empty() {
            aux.placeholder.to_string()
        } else {
            state.aux_editor.value.clone()
        };
        lines.push(Line::from(""));
        lines.push(Line::from(aux.prompt.to_string()));
        lines.push(Line::from(format!(
            "{} {}",
            if focused { ">" } else { " " },
            value
        )));
    }

    let orphans: Vec<String> = match q.input {
        // ranked orphans carry their rank so Suppr can be aimed at them
        Input::Ranked { field, .. } => store
            .ranked(q.section, field)
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| {
                let v = slot.as_deref()?;
                (!options.iter().any(|o| o.value == v)).then(|| format!("#{} {}", i + 1, v))
            })
            .collect(),
        _ => q.orphaned(store),
    };
    if !orphans.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("Réponse hors liste : {}", orphans.join(", ")),
            Style::default().fg(Color::Yellow),
        )));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        help_text(&q).to_string(),
        Style::default().fg(Color::DarkGray),
    )));
    lines
}

fn help_text(q: &Question) -> &'static str {
    match q.input {
        Input::Text { .. } => "Saisissez votre réponse. Entrée = suivant, Tab = boutons.",
        Input::Choice { .. } => "Haut/Bas pour naviguer, Espace pour choisir.",
        Input::MultiSelect { .. } => "Haut/Bas pour naviguer, Espace pour cocher/décocher.",
        Input::Ranked { .. } => "Haut/Bas puis 1-3 pour classer, Suppr pour retirer.",
        Input::Weights { .. } => "Haut/Bas pour choisir, Gauche/Droite pour ajuster.",
    }
}

fn draw_question(f: &mut ratatui::Frame<'_>, area: Rect, state: &ShellState) {
    let title = state.session.current().section.title();
    let p = Paragraph::new(Text::from(question_lines(state)))
        .block(Block::default().borders(Borders::ALL).title(title))
        .wrap(Wrap { trim: false });
    f.render_widget(p, area);
}

fn draw_buttons(f: &mut ratatui::Frame<'_>, area: Rect, state: &ShellState) {
    let steps = state.session.steps();

    let back = button_text(
        "←",
        state.focus == FocusTarget::Button(ButtonFocus::Back),
        steps.can_retreat(),
    );
    let next = button_text(
        "Entrée ↵",
        state.focus == FocusTarget::Button(ButtonFocus::Next),
        steps.can_advance(),
    );
    let quit = button_text(
        "Quitter",
        state.focus == FocusTarget::Button(ButtonFocus::Quit),
        true,
    );

    let line = Line::from(vec![
        Span::styled(
            "Ctrl+S exporter  ",
            Style::default().fg(Color::DarkGray),
        ),
        back,
        Span::raw(" "),
        next,
        Span::raw(" "),
        quit,
    ]);

    let p = Paragraph::new(Text::from(line)).alignment(Alignment::Right);
    f.render_widget(p, area);
}

fn button_text(label: &str, focused: bool, enabled: bool) -> Span<'static> {
    let mut style = Style::default();
    if !enabled {
        style = style.fg(Color::DarkGray);
    }
    if focused && enabled {
        style = style.add_modifier(Modifier::REVERSED);
    }
    Span::styled(format!("[ {} ]", label), style)
}

fn modal_area(window_area: Rect, width: u16, height: u16) -> Rect {
    let w = width.min(window_area.width.saturating_sub(4)).max(40);
    let h = height.min(window_area.height.saturating_sub(2));
    Rect {
        x: window_area.x + (window_area.width.saturating_sub(w)) / 2,
        y: window_area.y + (window_area.height.saturating_sub(h)) / 2,
        width: w,
        height: h,
    }
}

fn draw_quit_modal(f: &mut ratatui::Frame<'_>, window_area: Rect, confirm_focused: bool) {
    let area = modal_area(window_area, 56, 7);
    f.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title("Quitter le questionnaire ?");
    let body = Paragraph::new(Text::from(vec![
        Line::from("Les réponses non exportées seront perdues."),
        Line::from(""),
        Line::from(""),
    ]))
    .block(block)
    .wrap(Wrap { trim: false });
    f.render_widget(body, area);

    let buttons_area = Rect {
        x: area.x + 1,
        y: area.y + area.height.saturating_sub(2),
        width: area.width.saturating_sub(2),
        height: 1,
    };
    let reversed = Style::default().add_modifier(Modifier::REVERSED);
    let yes = Span::styled(
        "[ Oui, quitter ]",
        if confirm_focused { reversed } else { Style::default() },
    );
    let no = Span::styled(
        "[ Non ]",
        if confirm_focused { Style::default() } else { reversed },
    );
    let p = Paragraph::new(Text::from(Line::from(vec![yes, Span::raw(" "), no])))
        .alignment(Alignment::Right);
    f.render_widget(p, buttons_area);
}

fn draw_message_modal(f: &mut ratatui::Frame<'_>, window_area: Rect, title: &str, body: &str) {
    let area = modal_area(window_area, 70, 9);
    f.render_widget(Clear, area);

    let p = Paragraph::new(Text::from(vec![
        Line::from(body.to_string()),
        Line::from(""),
        Line::from(Span::styled(
            "Entrée pour fermer",
            Style::default().fg(Color::DarkGray),
        )),
    ]))
    .block(Block::default().borders(Borders::ALL).title(title.to_string()))
    .wrap(Wrap { trim: false });
    f.render_widget(p, area);
}
