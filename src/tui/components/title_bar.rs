//! # TitleBar Component
//!
//! Top status line. Purely presentational: every field is a prop.
//!
//! ```text
//! taxgrid (https://api.example.io) | 2/14 records | Saved Marco Huel
//! ```
//!
//! The record counter reads `visible/total` while a filter narrows the view
//! and just `total` otherwise.

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

pub struct TitleBar {
    pub base_url: String,
    pub status_message: String,
    pub visible: usize,
    pub total: usize,
}

impl TitleBar {
    pub fn new(base_url: String, status_message: String, visible: usize, total: usize) -> Self {
        Self {
            base_url,
            status_message,
            visible,
            total,
        }
    }

    fn text(&self) -> String {
        let counter = if self.visible == self.total {
            format!("{} records", self.total)
        } else {
            format!("{}/{} records", self.visible, self.total)
        };
        let mut text = format!("taxgrid ({}) | {}", self.base_url, counter);
        if !self.status_message.is_empty() {
            text.push_str(" | ");
            text.push_str(&self.status_message);
        }
        text
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let line = Line::from(Span::styled(self.text(), Style::default().fg(Color::Gray)));
        frame.render_widget(line, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render(title_bar: &mut TitleBar) -> String {
        let backend = TestBackend::new(100, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                title_bar.render(f, f.area());
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_title_bar_unfiltered() {
        let mut title_bar = TitleBar::new("http://api".to_string(), String::new(), 4, 4);
        let text = render(&mut title_bar);
        assert!(text.contains("taxgrid (http://api)"));
        assert!(text.contains("4 records"));
        assert!(!text.contains("4/4"));
        assert_eq!(text.matches('|').count(), 1);
    }

    #[test]
    fn test_title_bar_filtered_with_status() {
        let mut title_bar =
            TitleBar::new("http://api".to_string(), "Saved Ann".to_string(), 1, 2);
        let text = render(&mut title_bar);
        assert!(text.contains("1/2 records"));
        assert!(text.contains("| Saved Ann"));
    }
}
