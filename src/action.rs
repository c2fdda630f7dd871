//! Actions - every event the pagination controller reacts to

use serde::{Deserialize, Serialize};

use crate::error::FetchFailure;
use crate::state::{PageListing, PokemonDetail};

#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[action(infer_categories)]
pub enum Action {
    /// Load the root listing
    Init,

    // ===== Page category =====
    /// Navigate to the listing's `next` URL
    PageNext,
    /// Navigate to the listing's `previous` URL
    PagePrev,
    /// Load the current page URL again
    PageReload,

    // ===== Listing results (tagged with the page generation that asked) =====
    ListingDidLoad {
        generation: u64,
        listing: PageListing,
    },
    ListingDidError {
        generation: u64,
        error: FetchFailure,
    },

    // ===== Detail results =====
    DetailDidLoad {
        generation: u64,
        index: usize,
        detail: PokemonDetail,
    },
    DetailDidError {
        generation: u64,
        index: usize,
        error: FetchFailure,
    },

    // ===== Card grid =====
    CardScroll(i16),

    UiTerminalResize(u16, u16),
    Quit,
}
