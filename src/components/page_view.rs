use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Layout},
    prelude::{Frame, Rect},
    style::{Color, Style},
    text::Span,
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    StatusBar, StatusBarHint, StatusBarItem, StatusBarProps, StatusBarSection, StatusBarStyle,
};

use super::card_grid::visible_rows;
use super::nav_bar::page_buttons;
use super::{
    CardGrid, CardGridProps, Component, NavBar, NavBarProps, SummaryHeader, SummaryHeaderProps,
};
use crate::action::Action;
use crate::state::AppState;

/// Summary block (4) plus the nav row (1)
pub const HEADER_HEIGHT: u16 = 5;
pub const STATUS_HEIGHT: u16 = 1;

const ACCENT_GOLD: Color = Color::Rgb(228, 176, 88);

/// Rows left for the card grid on a terminal `height` cells tall
pub fn grid_height(height: u16) -> u16 {
    height.saturating_sub(HEADER_HEIGHT + STATUS_HEIGHT)
}

pub struct PageViewProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// Header, nav controls, card grid and status bar
pub struct PageView {
    header: SummaryHeader,
    nav: NavBar,
    grid: CardGrid,
    status_bar: StatusBar,
}

impl PageView {
    pub fn new() -> Self {
        Self {
            header: SummaryHeader,
            nav: NavBar,
            grid: CardGrid::default(),
            status_bar: StatusBar::new(),
        }
    }
}

impl Default for PageView {
    fn default() -> Self {
        Self::new()
    }
}

impl Component<Action> for PageView {
    type Props<'a> = PageViewProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }
        let state = props.state;

        // Nav controls exist once the page has settled
        if state.page.is_settled() {
            let (prev, next) = page_buttons(&state.page);
            let nav: Vec<Action> = self
                .nav
                .handle_event(
                    event,
                    NavBarProps {
                        prev,
                        next,
                        is_focused: true,
                    },
                )
                .into_iter()
                .collect();
            if !nav.is_empty() {
                return nav;
            }
        }

        let page_rows = visible_rows(grid_height(state.terminal_size.1)) as i16;
        let action = match event {
            EventKind::Key(key) => match key.code {
                KeyCode::Char('r') | KeyCode::F(5) => Some(Action::PageReload),
                KeyCode::Up | KeyCode::Char('k') => Some(Action::CardScroll(-1)),
                KeyCode::Down | KeyCode::Char('j') => Some(Action::CardScroll(1)),
                KeyCode::PageUp => Some(Action::CardScroll(-page_rows)),
                KeyCode::PageDown => Some(Action::CardScroll(page_rows)),
                KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
                _ => None,
            },
            EventKind::Scroll { delta, .. } => Some(Action::CardScroll(*delta as i16)),
            _ => None,
        };
        action.into_iter().collect()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let state = props.state;
        let chunks = Layout::vertical([
            Constraint::Length(HEADER_HEIGHT - 1),
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(STATUS_HEIGHT),
        ])
        .split(area);

        self.header
            .render(frame, chunks[0], SummaryHeaderProps { page: &state.page });

        if state.page.is_settled() {
            let (prev, next) = page_buttons(&state.page);
            self.nav.render(
                frame,
                chunks[1],
                NavBarProps {
                    prev,
                    next,
                    is_focused: props.is_focused,
                },
            );
        }

        self.grid.render(
            frame,
            chunks[2],
            CardGridProps {
                page: &state.page,
                scroll_row: state.scroll_row,
            },
        );

        let message = state.message.as_deref().unwrap_or("");
        let status_items = [StatusBarItem::span(Span::styled(
            message,
            Style::default().fg(ACCENT_GOLD),
        ))];
        <StatusBar as Component<Action>>::render(
            &mut self.status_bar,
            frame,
            chunks[3],
            StatusBarProps {
                left: StatusBarSection::empty(),
                center: StatusBarSection::hints(&[
                    StatusBarHint::new("n", "next"),
                    StatusBarHint::new("p", "prev"),
                    StatusBarHint::new("r", "reload"),
                    StatusBarHint::new("↑↓/jk", "scroll"),
                    StatusBarHint::new("q", "quit"),
                ]),
                right: StatusBarSection::items(&status_items),
                style: StatusBarStyle::default(),
                is_focused: false,
            },
        );
    }
}
