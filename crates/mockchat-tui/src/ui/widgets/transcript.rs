//! Scrollable transcript of message bubbles.
//!
//! User bubbles hug the right edge, assistant bubbles the left. Each
//! bubble is wrapped to a share of the available width and padded by
//! one cell on either side.

use mockchat_engine::{Message, Panel, Role};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use textwrap::{Options, WrapAlgorithm};
use unicode_width::UnicodeWidthStr;

use crate::ui::theme::Styles;

/// Narrowest bubble share accepted from config.
const MIN_WIDTH_PERCENT: u16 = 20;

/// Horizontal padding inside a bubble, per side.
const BUBBLE_PADDING: usize = 1;

/// Widest text line a bubble may hold in a transcript `width` cells wide.
pub fn bubble_text_width(width: u16, max_width_percent: u16) -> usize {
    let percent = usize::from(max_width_percent.clamp(MIN_WIDTH_PERCENT, 100));
    let bubble = usize::from(width) * percent / 100;
    bubble.saturating_sub(BUBBLE_PADDING * 2).max(1)
}

fn role_label(role: Role) -> &'static str {
    match role {
        Role::User => "You",
        Role::Assistant => "Assistant",
    }
}

fn bubble_style(role: Role) -> Style {
    match role {
        Role::User => Styles::user_bubble(),
        Role::Assistant => Styles::assistant_bubble(),
    }
}

/// Lines for one message: a label, the bubble, and a blank spacer.
fn message_lines(message: &Message, width: u16, max_width_percent: u16) -> Vec<Line<'static>> {
    let text_width = bubble_text_width(width, max_width_percent);
    let options = Options::new(text_width).wrap_algorithm(WrapAlgorithm::FirstFit);
    let wrapped: Vec<String> = textwrap::wrap(message.text(), options)
        .into_iter()
        .map(std::borrow::Cow::into_owned)
        .collect();

    let inner = wrapped.iter().map(|l| l.width()).max().unwrap_or(0);
    let bubble_width = inner + BUBBLE_PADDING * 2;
    let indent = match message.role() {
        Role::User => usize::from(width).saturating_sub(bubble_width),
        Role::Assistant => 0,
    };
    let pad = " ".repeat(BUBBLE_PADDING);
    let style = bubble_style(message.role());

    let mut lines = Vec::with_capacity(wrapped.len() + 2);

    let label = role_label(message.role());
    let label_line = Line::styled(label, Styles::dim());
    lines.push(match message.role() {
        Role::User => label_line.alignment(Alignment::Right),
        Role::Assistant => label_line.alignment(Alignment::Left),
    });

    for text in wrapped {
        let fill = " ".repeat(inner.saturating_sub(text.width()));
        lines.push(Line::from(vec![
            Span::styled(" ".repeat(indent), Styles::default()),
            Span::styled(format!("{pad}{text}{fill}{pad}"), style),
        ]));
    }

    lines.push(Line::default());
    lines
}

/// All transcript lines for `messages`, in display order.
pub fn transcript_lines(
    messages: &[Message],
    width: u16,
    max_width_percent: u16,
) -> Vec<Line<'static>> {
    messages
        .iter()
        .flat_map(|m| message_lines(m, width, max_width_percent))
        .collect()
}

/// Bordered transcript block.
pub fn transcript_block(title: &str) -> Block<'static> {
    Block::default()
        .title(format!(" {title} "))
        .title_style(Styles::title())
        .borders(Borders::ALL)
        .border_style(Styles::border())
        .style(Styles::default())
}

/// Transcript pane widget.
pub struct Transcript<'a> {
    panel: &'a Panel,
    title: &'a str,
    max_width_percent: u16,
}

impl<'a> Transcript<'a> {
    pub fn new(panel: &'a Panel, title: &'a str) -> Self {
        Self {
            panel,
            title,
            max_width_percent: 70,
        }
    }

    /// Set the widest a bubble may grow, as a percentage of the width.
    #[must_use]
    pub fn max_width_percent(mut self, percent: u16) -> Self {
        self.max_width_percent = percent;
        self
    }
}

impl Widget for Transcript<'_> {
    #[allow(clippy::cast_possible_truncation)]
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = transcript_block(self.title);
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        if self.panel.is_empty() {
            Paragraph::new("Say something to start the conversation.")
                .style(Styles::dim())
                .alignment(Alignment::Center)
                .render(inner, buf);
            return;
        }

        let lines = transcript_lines(self.panel.messages(), inner.width, self.max_width_percent);
        let offset = self.panel.scroll_offset().min(u16::MAX as usize) as u16;
        Paragraph::new(lines)
            .style(Styles::default())
            .scroll((offset, 0))
            .render(inner, buf);
    }
}
