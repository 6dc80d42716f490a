use crate::render::{Card, Content, NoticeKind, PosterSlot, NO_IMAGE_TEXT, NO_RESULTS_TEXT};
use crate::tui::app::App;
use crate::tui::colors;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    frame.render_widget(Block::default().style(Style::default().bg(colors::BG)), area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Length(3), // Search bar
            Constraint::Min(5),    // Cards
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    draw_header(frame, chunks[0]);
    draw_search_bar(frame, app, chunks[1]);
    draw_results(frame, app, chunks[2]);
    draw_status_bar(frame, app, chunks[3]);

    if let Some(notice) = app.display.notice() {
        draw_notice(frame, notice.kind, &notice.title, &notice.message, area);
    } else if app.search.focused {
        // Border (1) + search icon and spaces (4 display cols)
        let cursor_x = chunks[1].x + 1 + 4 + app.search.cursor_column() as u16;
        let cursor_y = chunks[1].y + 1;
        frame.set_cursor_position(Position::new(cursor_x, cursor_y));
    }
}

fn draw_header(frame: &mut Frame, area: Rect) {
    let title = Line::from(vec![Span::styled(
        format!(" \u{1F3AC} {} ", crate::APP_NAME),
        Style::default()
            .fg(colors::TEXT)
            .add_modifier(Modifier::BOLD),
    )]);
    frame.render_widget(
        Paragraph::new(title).style(Style::default().bg(colors::HEADER)),
        area,
    );
}

fn draw_search_bar(frame: &mut Frame, app: &App, area: Rect) {
    let border_style = if app.search.focused {
        Style::default().fg(colors::ACCENT)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let title = if app.runner.is_busy() {
        " Search (searching...) "
    } else {
        " Search "
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(title);

    let search_text = format!(" \u{1F50D} {}", app.search.query);
    let paragraph = Paragraph::new(search_text)
        .block(block)
        .style(Style::default().fg(colors::TEXT));

    frame.render_widget(paragraph, area);
}

fn draw_results(frame: &mut Frame, app: &mut App, area: Rect) {
    match app.display.content() {
        Content::Empty => {}
        Content::NoResults => {
            let placeholder = Paragraph::new(NO_RESULTS_TEXT)
                .alignment(Alignment::Center)
                .style(Style::default().fg(colors::MUTED_TEXT));
            let inner = Rect {
                y: area.y + 1,
                height: area.height.saturating_sub(1),
                ..area
            };
            frame.render_widget(placeholder, inner);
        }
        Content::Cards(cards) => {
            let inner_width = area.width.saturating_sub(4) as usize;
            let mut y = area.y;
            let mut shown = 0;

            for (index, card) in cards.iter().enumerate().skip(app.list.scroll_offset) {
                let lines = card_lines(card, &app.image_base_url, inner_width);
                let height = lines.len() as u16 + 2;
                let remaining = area.bottom().saturating_sub(y);
                if remaining < height && shown > 0 {
                    break;
                }

                let selected = app.list.selected == Some(index);
                let border_style = if selected && !app.search.focused {
                    Style::default().fg(colors::ACCENT)
                } else {
                    Style::default().fg(Color::DarkGray)
                };
                let block = Block::default()
                    .borders(Borders::ALL)
                    .border_style(border_style)
                    .style(Style::default().bg(colors::CARD));

                let rect = Rect {
                    x: area.x + 1,
                    y,
                    width: area.width.saturating_sub(2),
                    height: height.min(remaining),
                };
                frame.render_widget(Paragraph::new(lines).block(block), rect);

                y += height;
                shown += 1;
            }

            app.list.visible_cards = shown.max(1);
        }
    }
}

/// Text lines of one card, wrapped to `width` columns
fn card_lines<'a>(card: &'a Card, image_base_url: &str, width: usize) -> Vec<Line<'a>> {
    let mut lines = vec![
        Line::from(Span::styled(
            card.title.as_str(),
            Style::default()
                .fg(colors::TEXT)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            card.meta_line.as_str(),
            Style::default().fg(colors::ACCENT),
        )),
    ];

    for row in wrap_text(&card.overview, width) {
        lines.push(Line::from(Span::styled(
            row,
            Style::default().fg(colors::MUTED_TEXT),
        )));
    }

    let poster = match &card.poster {
        PosterSlot::Deferred { path } => format!("\u{1F5BC} {}{}", image_base_url, path),
        PosterSlot::Image(_) => "\u{1F5BC} poster loaded".to_string(),
        PosterSlot::Missing | PosterSlot::Unavailable { .. } => format!("[{}]", NO_IMAGE_TEXT),
    };
    lines.push(Line::from(Span::styled(
        poster,
        Style::default().fg(Color::DarkGray),
    )));
    lines
}

/// Greedy word wrap by display width. Words wider than `width` are split.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut rows = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for word in text.split_whitespace() {
        let word_width = word.width();

        if current_width > 0 && current_width + 1 + word_width > width {
            rows.push(std::mem::take(&mut current));
            current_width = 0;
        }

        if word_width > width {
            for c in word.chars() {
                let w = c.width().unwrap_or(0);
                if current_width + w > width && current_width > 0 {
                    rows.push(std::mem::take(&mut current));
                    current_width = 0;
                }
                current.push(c);
                current_width += w;
            }
            continue;
        }

        if current_width > 0 {
            current.push(' ');
            current_width += 1;
        }
        current.push_str(word);
        current_width += word_width;
    }

    if !current.is_empty() {
        rows.push(current);
    }
    rows
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let left_text = format!(" {}", app.status_message);
    let right_text = " Enter:Search  Tab:Focus  \u{2191}\u{2193}:Scroll  Esc:Quit ";

    let available_width = area.width as usize;
    let left_len = left_text.width();
    let right_len = right_text.width();

    let status_str = if left_len + right_len < available_width {
        let padding = available_width - left_len - right_len;
        format!("{}{:padding$}{}", left_text, "", right_text, padding = padding)
    } else {
        left_text
    };

    let status = Paragraph::new(status_str)
        .style(Style::default().fg(colors::TEXT).bg(colors::HEADER));
    frame.render_widget(status, area);
}

fn draw_notice(frame: &mut Frame, kind: NoticeKind, title: &str, message: &str, area: Rect) {
    let accent = match kind {
        NoticeKind::Warning => colors::WARNING,
        NoticeKind::Error => colors::ERROR,
    };

    let width = (message.width() as u16 + 6).clamp(30, area.width.max(30));
    let popup = centered_rect(width, 6, area);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent))
        .title(format!(" {} ", title))
        .style(Style::default().bg(colors::CARD));

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(message, Style::default().fg(colors::TEXT))),
        Line::from(""),
        Line::from(Span::styled(
            "[ OK ]",
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        )),
    ];
    frame.render_widget(
        Paragraph::new(text).alignment(Alignment::Center).block(block),
        popup,
    );
}

/// Helper to create a centered popup area
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_on_word_boundaries() {
        let rows = wrap_text("a thief who steals corporate secrets", 12);
        assert_eq!(rows, ["a thief who", "steals", "corporate", "secrets"]);
        assert!(rows.iter().all(|r| r.width() <= 12));
    }

    #[test]
    fn splits_overlong_words() {
        let rows = wrap_text("supercalifragilistic", 8);
        assert_eq!(rows, ["supercal", "ifragili", "stic"]);
    }

    #[test]
    fn empty_text_has_no_rows() {
        assert!(wrap_text("", 10).is_empty());
        assert!(wrap_text("   ", 10).is_empty());
    }

    #[test]
    fn centered_rect_fits_inside_area() {
        let area = Rect::new(0, 0, 20, 10);
        let rect = centered_rect(40, 6, area);
        assert_eq!(rect.width, 20);
        assert_eq!(rect.y, 2);
    }
}
