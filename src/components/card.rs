use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::Component;
use crate::action::Action;
use crate::state::{DetailSlot, PokemonDetail};
use crate::stats::{ability_line, capitalize, to_decimeter, to_hectograms};

pub const CARD_WIDTH: u16 = 30;
pub const CARD_HEIGHT: u16 = 7;

const TEXT_MAIN: Color = Color::Rgb(232, 242, 244);
const TEXT_DIM: Color = Color::Rgb(176, 195, 207);
const ACCENT_TEAL: Color = Color::Rgb(72, 204, 184);
const ACCENT_GOLD: Color = Color::Rgb(228, 176, 88);
const ACCENT_RED: Color = Color::Rgb(220, 96, 96);
const BG_PANEL: Color = Color::Rgb(20, 32, 46);

/// One card in the grid
pub struct PokemonCard;

pub struct PokemonCardProps<'a> {
    /// Listing name, used as the title when the detail never arrived
    pub name: &'a str,
    pub slot: &'a DetailSlot,
}

impl Component<Action> for PokemonCard {
    type Props<'a> = PokemonCardProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let (title, border, lines) = match props.slot {
            DetailSlot::Loaded(detail) => {
                (capitalize(&detail.name), ACCENT_TEAL, card_lines(detail))
            }
            DetailSlot::Failed(error) => (
                capitalize(props.name),
                ACCENT_RED,
                vec![
                    Line::from(Span::styled(
                        "Could not load",
                        Style::default().fg(ACCENT_RED),
                    )),
                    Line::from(Span::styled(error.clone(), Style::default().fg(TEXT_DIM))),
                ],
            ),
            DetailSlot::Pending => (
                capitalize(props.name),
                TEXT_DIM,
                vec![Line::from(Span::styled(
                    "Loading...",
                    Style::default().fg(TEXT_DIM),
                ))],
            ),
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN))
            .title(Span::styled(
                title,
                Style::default()
                    .fg(ACCENT_GOLD)
                    .add_modifier(Modifier::BOLD),
            ));
        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }
}

/// Body lines of a loaded card
pub fn card_lines(detail: &PokemonDetail) -> Vec<Line<'static>> {
    let label = Style::default().fg(TEXT_DIM);
    let value = Style::default().fg(TEXT_MAIN);
    let sprite = match detail.sprite_url.as_deref() {
        Some(url) => Span::styled(sprite_label(url), value),
        None => Span::styled("no sprite", Style::default().fg(ACCENT_RED)),
    };
    vec![
        Line::from(vec![Span::styled("Sprite ", label), sprite]),
        Line::from(vec![
            Span::styled("Wt ", label),
            Span::styled(
                format!("{:.2} hg", to_hectograms(f64::from(detail.weight))),
                value,
            ),
        ]),
        Line::from(vec![
            Span::styled("Ht ", label),
            Span::styled(
                format!("{:.2} dm", to_decimeter(f64::from(detail.height))),
                value,
            ),
        ]),
        Line::from(vec![
            Span::styled("Abilities: ", label),
            Span::styled(ability_line(&detail.abilities), value),
        ]),
    ]
}

/// Last path segment of a sprite URL, e.g. `25.png`
fn sprite_label(url: &str) -> String {
    url.trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty())
        .unwrap_or(url)
        .to_string()
}
