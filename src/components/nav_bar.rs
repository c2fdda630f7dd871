use crossterm::event::KeyCode;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tui_dispatch::EventKind;

use super::Component;
use crate::action::Action;
use crate::state::PageState;

const ACCENT_TEAL: Color = Color::Rgb(72, 204, 184);
const TEXT_DISABLED: Color = Color::Rgb(90, 104, 116);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavDirection {
    Previous,
    Next,
}

impl NavDirection {
    fn label(self) -> &'static str {
        match self {
            NavDirection::Previous => "< Previous",
            NavDirection::Next => "Next >",
        }
    }
}

/// A page navigation control carrying the action it dispatches
#[derive(Clone, Debug, PartialEq)]
pub struct NavButton {
    pub direction: NavDirection,
    pub on_press: Action,
    pub enabled: bool,
}

impl NavButton {
    pub fn new(direction: NavDirection, on_press: Action) -> Self {
        Self {
            direction,
            on_press,
            enabled: true,
        }
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.enabled = !disabled;
        self
    }

    /// Action to dispatch, if the control is enabled
    pub fn press(&self) -> Option<Action> {
        self.enabled.then(|| self.on_press.clone())
    }

    fn line(&self) -> Line<'static> {
        let style = if self.enabled {
            Style::default()
                .fg(ACCENT_TEAL)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
                .fg(TEXT_DISABLED)
                .add_modifier(Modifier::CROSSED_OUT)
        };
        Line::from(Span::styled(format!("[ {} ]", self.direction.label()), style))
    }
}

/// Both controls for `page`, disabled where the listing has no link
pub fn page_buttons(page: &PageState) -> (NavButton, NavButton) {
    let prev = NavButton::new(NavDirection::Previous, Action::PagePrev);
    let next = NavButton::new(NavDirection::Next, Action::PageNext);
    (
        prev.disabled(!page.has_previous()),
        next.disabled(!page.has_next()),
    )
}

pub struct NavBar;

pub struct NavBarProps {
    pub prev: NavButton,
    pub next: NavButton,
    pub is_focused: bool,
}

impl Component<Action> for NavBar {
    type Props<'a> = NavBarProps;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return None;
        }

        match event {
            EventKind::Key(key) => match key.code {
                KeyCode::Char('p') | KeyCode::Left => props.prev.press(),
                KeyCode::Char('n') | KeyCode::Right => props.next.press(),
                _ => None,
            },
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let chunks = Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).split(area);
        frame.render_widget(
            Paragraph::new(props.prev.line()).alignment(Alignment::Left),
            chunks[0],
        );
        frame.render_widget(
            Paragraph::new(props.next.line()).alignment(Alignment::Right),
            chunks[1],
        );
    }
}
