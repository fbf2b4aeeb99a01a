//! TUI (Terminal User Interface) module for Hangman
//!
//! This module provides a full-screen terminal interface using Ratatui.
//!
//! # Layout
//! - Title
//! - Board: gallows drawing beside the secret word and the letter table
//! - Message line for the last command
//! - Status line and key help

use crate::board::Board;
use crate::driver::{GameInterface, LOAD_KEY, Notice, RESET_KEY, SAVE_KEY, UserAction, parse_key};
use crate::game_state::Status;
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use std::io;
use std::time::Duration;

const EVENT_POLL_TIMEOUT_MS: u64 = 100;
const ASCII_CONTROL_CHAR_THRESHOLD: u32 = 32;
const GALLOWS_WIDTH: u16 = 15;

// Style constants for consistent UI
const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const LOST_STYLE: Style = Style::new().fg(Color::Red).add_modifier(Modifier::BOLD);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Cyan);
const CORRECT_STYLE: Style = Style::new().fg(Color::Black).bg(Color::Green);
const INCORRECT_STYLE: Style = Style::new().fg(Color::White).bg(Color::Red);
const HIDDEN_STYLE: Style = Style::new().fg(Color::White).bg(Color::DarkGray);

/// Main TUI interface component.
///
/// Owns the terminal for its lifetime; raw mode and the alternate screen are
/// released on drop.
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    board: Option<Board>,
    notice: Notice,
}

impl TuiInterface {
    pub fn new() -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        info_log!("Terminal setup complete: raw mode, alternate screen, cursor hidden");

        Ok(Self {
            terminal,
            board: None,
            notice: Notice::Welcome,
        })
    }

    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    fn draw(&mut self) -> Result<(), io::Error> {
        let Some(board) = &self.board else {
            return Ok(());
        };
        let notice = &self.notice;
        self.terminal.draw(|f| render_static(f, board, notice))?;
        Ok(())
    }

    fn draw_or_log(&mut self) {
        if let Err(e) = self.draw() {
            debug_log!("Draw error: {}", e);
        }
    }

    fn handle_input(&mut self) -> Result<Option<UserAction>, io::Error> {
        if !event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            return Ok(None);
        }

        match event::read()? {
            Event::Key(key) => Ok(Self::handle_key(key)),
            Event::Resize(_, _) => {
                debug_log!("handle_input() - Redrawing after resize");
                self.draw_or_log();
                Ok(None)
            }
            other => {
                debug_log!("handle_input() - Ignoring event: {:?}", other);
                Ok(None)
            }
        }
    }

    fn handle_key(key: KeyEvent) -> Option<UserAction> {
        // Only process Press events, ignore Release and Repeat to avoid double input
        if key.kind != KeyEventKind::Press {
            return None;
        }
        if key
            .modifiers
            .intersects(KeyModifiers::ALT | KeyModifiers::CONTROL)
        {
            // Ctrl-C still quits while raw mode swallows the signal
            if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                return Some(UserAction::Exit);
            }
            debug_log!("handle_key() - Ignoring key with modifier: {:?}", key.modifiers);
            return None;
        }

        match key.code {
            KeyCode::Esc => {
                info_log!("handle_key() - ESC pressed, returning Exit");
                Some(UserAction::Exit)
            }
            // Replacement and control characters arrive from escape sequences when alt-tabbing
            KeyCode::Char(c) if c == '\u{FFFD}' || (c as u32) < ASCII_CONTROL_CHAR_THRESHOLD => {
                debug_log!("handle_key() - Ignoring invalid character: {:?}", c);
                None
            }
            KeyCode::Char(c) => parse_key(c).map(UserAction::Command),
            _ => None,
        }
    }
}

fn render_static(f: &mut Frame, board: &Board, notice: &Notice) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Title
            Constraint::Length(10), // Gallows and word
            Constraint::Length(5),  // Letter table
            Constraint::Length(3),  // Message
            Constraint::Min(3),     // Status
            Constraint::Length(3),  // Instructions
        ])
        .split(f.area());

    render_title(f, chunks[0]);
    render_board(f, chunks[1], board);
    render_letters(f, chunks[2], board);
    render_message(f, chunks[3], notice);
    render_status(f, chunks[4], board);
    render_instructions(f, chunks[5], board.status);
}

fn render_title(f: &mut Frame, area: Rect) {
    let title = Paragraph::new("HANGMAN")
        .style(HEADER_STYLE)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, area);
}

fn render_board(f: &mut Frame, area: Rect, board: &Board) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(GALLOWS_WIDTH), Constraint::Min(10)])
        .split(area);

    let gallows: Vec<Line> = board.gallows().iter().map(|&l| Line::from(l)).collect();
    f.render_widget(
        Paragraph::new(gallows).block(Block::default().borders(Borders::ALL)),
        columns[0],
    );

    let mut spans = Vec::new();
    for slot in &board.word {
        let span = match slot {
            Some(c) if board.status == Status::Lost && !board.correct.contains(c) => {
                Span::styled(format!(" {c} "), INCORRECT_STYLE)
            }
            Some(c) => Span::styled(format!(" {c} "), CORRECT_STYLE),
            None => Span::styled(" _ ", HIDDEN_STYLE),
        };
        spans.push(span);
        spans.push(Span::raw(" "));
    }
    let word = Paragraph::new(vec![Line::from(""), Line::from(spans)]).block(
        Block::default()
            .title(board.word_label())
            .borders(Borders::ALL),
    );
    f.render_widget(word, columns[1]);
}

fn render_letters(f: &mut Frame, area: Rect, board: &Board) {
    let lines: Vec<Line> = board
        .letter_rows()
        .into_iter()
        .map(|(label, letters)| {
            let style = match label {
                "Correct" => CORRECT_STYLE,
                "Incorrect" => INCORRECT_STYLE,
                _ => Style::default(),
            };
            let mut spans = vec![Span::raw(format!("{label:<10}"))];
            for c in letters {
                if c == ' ' {
                    spans.push(Span::raw("  "));
                } else {
                    spans.push(Span::styled(c.to_string(), style));
                    spans.push(Span::raw(" "));
                }
            }
            Line::from(spans)
        })
        .collect();
    f.render_widget(
        Paragraph::new(lines).block(Block::default().title("Letters").borders(Borders::ALL)),
        area,
    );
}

fn render_message(f: &mut Frame, area: Rect, notice: &Notice) {
    let style = if notice.is_error() {
        ERROR_STYLE
    } else {
        MESSAGE_STYLE
    };
    let paragraph = Paragraph::new(notice.to_string())
        .style(style)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

fn render_status(f: &mut Frame, area: Rect, board: &Board) {
    let style = match board.status {
        Status::InProgress => HEADER_STYLE,
        Status::Won => SUCCESS_STYLE,
        Status::Lost => LOST_STYLE,
    };
    let paragraph = Paragraph::new(board.status_line())
        .style(style)
        .block(Block::default().borders(Borders::ALL).title("Status"));
    f.render_widget(paragraph, area);
}

fn instructions(status: Status) -> String {
    let guess = match status {
        Status::InProgress => "a-z: Guess | ",
        Status::Won | Status::Lost => "",
    };
    format!("{guess}{SAVE_KEY}: Save | {LOAD_KEY}: Load | {RESET_KEY}: Reset | ESC: Quit")
}

fn render_instructions(f: &mut Frame, area: Rect, status: Status) {
    let paragraph = Paragraph::new(instructions(status))
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

impl GameInterface for TuiInterface {
    fn render(&mut self, board: &Board, notice: &Notice) {
        self.board = Some(board.clone());
        self.notice = notice.clone();
        self.draw_or_log();
    }

    fn read_action(&mut self) -> Option<UserAction> {
        loop {
            match self.handle_input() {
                Ok(Some(action)) => {
                    debug_log!("read_action() - Action received: {:?}", action);
                    return Some(action);
                }
                Ok(None) => {}
                Err(e) => {
                    log::error!("terminal input failed: {e}");
                    return Some(UserAction::Exit);
                }
            }
        }
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
