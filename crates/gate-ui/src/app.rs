//! TUI event loop for the report view.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Frame, Terminal};

use gate_data::report::EmployeeReport;

use crate::report_view;
use crate::themes::Theme;

const APP_TITLE: &str = "Gate Reports";

/// What the screen shows.
#[derive(Debug, Clone)]
pub enum Screen {
    /// A loaded report.
    Report(EmployeeReport),
    /// A message in place of a report (fetch failure, nothing selected).
    Message(String),
}

/// Root application state for the report TUI.
pub struct App {
    /// Active colour theme.
    pub theme: Theme,
    pub screen: Screen,
}

impl App {
    pub fn new(theme_name: &str, screen: Screen) -> Self {
        Self {
            theme: Theme::from_name(theme_name),
            screen,
        }
    }

    /// Draw the screen until `q`, `Q`, or `Ctrl+C`.
    pub fn run(self) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let tick_rate = Duration::from_millis(250);

        let result = loop {
            if let Err(e) = terminal.draw(|frame| self.render(frame)) {
                break Err(e);
            }

            match event::poll(tick_rate) {
                Ok(true) => match event::read() {
                    Ok(Event::Key(key)) if is_quit_key(key.code, key.modifiers) => break Ok(()),
                    Ok(_) => {}
                    Err(e) => break Err(e),
                },
                Ok(false) => {}
                Err(e) => break Err(e),
            }
        };

        // Restore terminal state unconditionally.
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    /// Render the current screen into `frame`.
    pub fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        match &self.screen {
            Screen::Report(report) if report.is_empty() => report_view::render_message(
                frame,
                area,
                APP_TITLE,
                &format!("No access attempts recorded for {}", report.title()),
                &self.theme,
            ),
            Screen::Report(report) => {
                report_view::render_report_view(frame, area, report, &self.theme)
            }
            Screen::Message(message) => {
                report_view::render_message(frame, area, APP_TITLE, message, &self.theme)
            }
        }
    }
}

fn is_quit_key(code: KeyCode, modifiers: KeyModifiers) -> bool {
    match code {
        KeyCode::Char('c') => modifiers.contains(KeyModifiers::CONTROL),
        KeyCode::Char('q') | KeyCode::Char('Q') => true,
        _ => false,
    }
}
