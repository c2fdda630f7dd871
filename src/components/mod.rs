pub mod card;
pub mod card_grid;
pub mod nav_bar;
pub mod page_view;
pub mod summary_header;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use card::{PokemonCard, PokemonCardProps};
pub use card_grid::{CardGrid, CardGridProps};
pub use nav_bar::{NavBar, NavBarProps, NavButton, NavDirection};
pub use page_view::{PageView, PageViewProps};
pub use summary_header::{SummaryHeader, SummaryHeaderProps};
