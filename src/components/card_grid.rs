use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::Line,
    widgets::Paragraph,
    Frame,
};
use tui_dispatch::DataResource;

use super::card::{CARD_HEIGHT, CARD_WIDTH};
use super::page_view::grid_height;
use super::{Component, PokemonCard, PokemonCardProps};
use crate::action::Action;
use crate::state::PageState;

const TEXT_DIM: Color = Color::Rgb(176, 195, 207);
const ACCENT_RED: Color = Color::Rgb(220, 96, 96);

/// Cards per row for a grid `width` cells wide
pub fn columns(width: u16) -> usize {
    usize::from((width / CARD_WIDTH).max(1))
}

/// Card rows that fit in a grid `height` cells tall
pub fn visible_rows(height: u16) -> usize {
    usize::from((height / CARD_HEIGHT).max(1))
}

/// Largest useful scroll offset for `cards` cards on a terminal of the given size
pub fn max_scroll_row(cards: usize, width: u16, height: u16) -> usize {
    let rows = cards.div_ceil(columns(width));
    rows.saturating_sub(visible_rows(grid_height(height)))
}

/// Cards for the current page, in listing order, starting at `scroll_row`
pub struct CardGrid {
    card: PokemonCard,
}

impl Default for CardGrid {
    fn default() -> Self {
        Self { card: PokemonCard }
    }
}

pub struct CardGridProps<'a> {
    pub page: &'a PageState,
    pub scroll_row: usize,
}

impl Component<Action> for CardGrid {
    type Props<'a> = CardGridProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let page = props.page;
        let notice = match &page.listing {
            DataResource::Empty => Some(("Nothing loaded yet", TEXT_DIM)),
            DataResource::Loading => Some(("Loading page...", TEXT_DIM)),
            DataResource::Failed(_) => Some(("Page could not be loaded", ACCENT_RED)),
            DataResource::Loaded(listing) if listing.items.is_empty() => {
                Some(("No results", TEXT_DIM))
            }
            DataResource::Loaded(_) => None,
        };
        if let Some((text, color)) = notice {
            let paragraph = Paragraph::new(Line::from(text))
                .style(Style::default().fg(color))
                .alignment(Alignment::Center);
            frame.render_widget(paragraph, area);
            return;
        }

        let Some(listing) = page.listing() else {
            return;
        };
        let cols = columns(area.width);
        let rows = visible_rows(area.height);
        let skip = props.scroll_row * cols;

        let cards = listing
            .items
            .iter()
            .zip(&page.slots)
            .filter(|(_, slot)| !slot.is_pending())
            .skip(skip)
            .take(cols * rows);

        for (position, (item, slot)) in cards.enumerate() {
            let col = (position % cols) as u16;
            let row = (position / cols) as u16;
            let card_area = Rect {
                x: area.x + col * CARD_WIDTH,
                y: area.y + row * CARD_HEIGHT,
                width: CARD_WIDTH.min(area.width),
                height: CARD_HEIGHT.min(area.height),
            };
            self.card.render(
                frame,
                card_area.intersection(area),
                PokemonCardProps {
                    name: &item.name,
                    slot,
                },
            );
        }
    }
}
