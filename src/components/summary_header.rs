use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tui_dispatch::DataResource;

use super::Component;
use crate::action::Action;
use crate::state::PageState;
use crate::stats::PageSummary;

const BG_PANEL: Color = Color::Rgb(20, 32, 46);
const TEXT_MAIN: Color = Color::Rgb(232, 242, 244);
const TEXT_DIM: Color = Color::Rgb(176, 195, 207);
const ACCENT_TEAL: Color = Color::Rgb(72, 204, 184);
const ACCENT_GOLD: Color = Color::Rgb(228, 176, 88);
const ACCENT_RED: Color = Color::Rgb(220, 96, 96);

/// Aggregates for the page, only once every detail fetch has finished
pub fn settled_summary(page: &PageState) -> Option<PageSummary> {
    if !page.is_settled() {
        return None;
    }
    Some(PageSummary::from_details(&page.details()))
}

pub struct SummaryHeader;

pub struct SummaryHeaderProps<'a> {
    pub page: &'a PageState,
}

impl Component<Action> for SummaryHeader {
    type Props<'a> = SummaryHeaderProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let page = props.page;
        let label = Style::default().fg(TEXT_DIM);

        let summary_line = match (&page.listing, settled_summary(page)) {
            (DataResource::Failed(error), _) => Line::from(vec![
                Span::styled("Page failed: ", Style::default().fg(ACCENT_RED)),
                Span::styled(error.clone(), label),
            ]),
            (_, Some(_)) if page.is_empty_page() => Line::from(Span::styled("No results", label)),
            (_, Some(summary)) => Line::from(vec![
                Span::styled("Total weight: ", label),
                Span::styled(
                    summary.total_weight.to_string(),
                    Style::default().fg(ACCENT_TEAL),
                ),
                Span::styled(" | Most exp: ", label),
                Span::styled(
                    summary.top_experience.unwrap_or_else(|| "-".to_string()),
                    Style::default().fg(ACCENT_GOLD),
                ),
            ]),
            (DataResource::Loaded(_), None) => Line::from(Span::styled(
                format!("Loading {}/{}", page.settled_count(), page.slots.len()),
                label,
            )),
            (DataResource::Empty, _) => Line::from(Span::styled("Nothing loaded yet", label)),
            _ => Line::from(Span::styled("Loading page...", label)),
        };

        let mut lines = vec![summary_line];
        if let Some(listing) = page.listing() {
            let mut position = format!("{} on this page", listing.items.len());
            if let Some(count) = listing.count {
                position.push_str(&format!(" of {count}"));
            }
            if page.failed_count() > 0 {
                position.push_str(&format!(", {} failed", page.failed_count()));
            }
            lines.push(Line::from(Span::styled(position, label)));
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN))
            .border_style(Style::default().fg(TEXT_DIM))
            .title(Span::styled(
                "POKEPAGER",
                Style::default()
                    .fg(ACCENT_TEAL)
                    .add_modifier(Modifier::BOLD),
            ));
        frame.render_widget(Paragraph::new(Text::from(lines)).block(block), area);
    }
}
