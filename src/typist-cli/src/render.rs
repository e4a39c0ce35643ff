//! Render sinks for the terminal.
//!
//! - [`TerminalSink`] redraws a one-line inline viewport in place.
//! - [`LineSink`] writes every frame on its own line, for pipes and logs.

use std::io::{self, Stdout, Write};

use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::{Terminal, TerminalOptions, Viewport};
use tracing::trace;
use typist_core::RenderSink;

/// Block cursor drawn after the typed text.
pub const CURSOR: &str = "▌";

/// Builds the styled line for one frame.
pub fn frame_line(text: &str) -> Line<'_> {
    Line::from(vec![
        Span::raw(text),
        Span::styled(
            CURSOR,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::SLOW_BLINK),
        ),
    ])
}

/// Draws each frame into a ratatui terminal.
pub struct TerminalSink<B: Backend> {
    terminal: Terminal<B>,
}

impl TerminalSink<CrosstermBackend<Stdout>> {
    /// One-line inline viewport on stdout, below the current cursor.
    pub fn inline() -> io::Result<Self> {
        let terminal = Terminal::with_options(
            CrosstermBackend::new(io::stdout()),
            TerminalOptions {
                viewport: Viewport::Inline(1),
            },
        )?;
        Ok(Self { terminal })
    }
}

impl<B: Backend> TerminalSink<B> {
    /// Wraps an existing terminal.
    pub fn new(terminal: Terminal<B>) -> Self {
        Self { terminal }
    }

    /// The underlying terminal.
    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    fn draw(&mut self, text: &str) {
        let result = self.terminal.draw(|frame| {
            frame.render_widget(Paragraph::new(frame_line(text)), frame.area());
        });
        if result.is_err() {
            trace!("terminal draw failed");
        }
    }
}

impl<B> RenderSink for TerminalSink<B>
where
    B: Backend + Send + 'static,
{
    fn render(&mut self, text: &str) {
        self.draw(text);
    }
}

/// Writes one line per frame.
#[derive(Debug)]
pub struct LineSink<W> {
    writer: W,
}

impl LineSink<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> LineSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W> RenderSink for LineSink<W>
where
    W: Write + Send + 'static,
{
    fn render(&mut self, text: &str) {
        // Broken pipes are not worth crashing the animation over
        let _ = writeln!(self.writer, "{text}").and_then(|_| self.writer.flush());
    }
}
