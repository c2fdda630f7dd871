//! Application state - single source of truth

use serde::{Deserialize, Serialize};
use tui_dispatch::DataResource;
use tui_dispatch_debug::debug::{ron_string, DebugSection, DebugState};

use crate::config::DEFAULT_LISTING_URL;

/// One stub in a listing page
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ListingItem {
    pub name: String,
    pub detail_url: String,
}

/// One page of paginated results
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PageListing {
    /// URL this page was fetched from
    pub url: String,
    pub items: Vec<ListingItem>,
    pub next: Option<String>,
    pub previous: Option<String>,
    /// Total number of items across all pages, when the API reports it
    pub count: Option<u32>,
}

/// Full record for a single Pokemon
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PokemonDetail {
    pub name: String,
    pub sprite_url: Option<String>,
    /// Hectograms
    pub weight: u32,
    /// Decimeters
    pub height: u32,
    pub abilities: Vec<String>,
    pub base_experience: Option<u32>,
}

/// Fetch state of one listing item's detail
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum DetailSlot {
    Pending,
    Loaded(PokemonDetail),
    Failed(String),
}

impl DetailSlot {
    pub fn is_pending(&self) -> bool {
        matches!(self, DetailSlot::Pending)
    }

    pub fn detail(&self) -> Option<&PokemonDetail> {
        match self {
            DetailSlot::Loaded(detail) => Some(detail),
            _ => None,
        }
    }
}

/// Everything belonging to the page currently on screen.
///
/// `slots` is index-aligned with the listing items, so loaded details and
/// weights can never outlive the listing they were fetched for.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PageState {
    /// Bumped on every navigation; results tagged with an older value are dropped
    pub generation: u64,
    pub url: String,
    pub listing: DataResource<PageListing>,
    pub slots: Vec<DetailSlot>,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            generation: 0,
            url: String::new(),
            listing: DataResource::Empty,
            slots: Vec::new(),
        }
    }
}

impl PageState {
    /// Start loading `url` as a fresh page, superseding this one
    pub fn begin(&self, url: String) -> PageState {
        PageState {
            generation: self.generation.wrapping_add(1),
            url,
            listing: DataResource::Loading,
            slots: Vec::new(),
        }
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    /// Install a freshly fetched listing, one pending slot per item
    pub fn accept_listing(&mut self, listing: PageListing) {
        self.slots = vec![DetailSlot::Pending; listing.items.len()];
        self.listing = DataResource::Loaded(listing);
    }

    pub fn listing(&self) -> Option<&PageListing> {
        self.listing.data()
    }

    pub fn item_name(&self, index: usize) -> Option<&str> {
        self.listing()
            .and_then(|listing| listing.items.get(index))
            .map(|item| item.name.as_str())
    }

    /// Loaded details in listing order
    pub fn details(&self) -> Vec<&PokemonDetail> {
        self.slots.iter().filter_map(DetailSlot::detail).collect()
    }

    /// Weights of loaded details, aligned with [`PageState::details`]
    pub fn weights(&self) -> Vec<u32> {
        self.details().iter().map(|detail| detail.weight).collect()
    }

    pub fn pending_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_pending()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| matches!(slot, DetailSlot::Failed(_)))
            .count()
    }

    /// Slots that have finished, loaded or failed
    pub fn settled_count(&self) -> usize {
        self.slots.len() - self.pending_count()
    }

    /// Listing loaded and every detail fetch finished
    pub fn is_settled(&self) -> bool {
        self.listing.is_loaded() && self.pending_count() == 0
    }

    pub fn is_empty_page(&self) -> bool {
        self.listing()
            .map(|listing| listing.items.is_empty())
            .unwrap_or(false)
    }

    pub fn next_url(&self) -> Option<&str> {
        self.listing().and_then(|listing| listing.next.as_deref())
    }

    pub fn previous_url(&self) -> Option<&str> {
        self.listing().and_then(|listing| listing.previous.as_deref())
    }

    pub fn has_next(&self) -> bool {
        self.next_url().is_some()
    }

    pub fn has_previous(&self) -> bool {
        self.previous_url().is_some()
    }

    /// Number of cards the grid shows (loaded and failed slots)
    pub fn card_count(&self) -> usize {
        self.settled_count()
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct AppState {
    /// First page loaded on startup
    pub root_url: String,
    pub page: PageState,
    /// First visible row of the card grid
    pub scroll_row: usize,
    pub terminal_size: (u16, u16),
    pub message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(DEFAULT_LISTING_URL.to_string())
    }
}

impl AppState {
    pub fn new(root_url: String) -> Self {
        Self {
            root_url,
            page: PageState::default(),
            scroll_row: 0,
            terminal_size: (80, 24),
            message: None,
        }
    }
}

impl DebugState for AppState {
    fn debug_sections(&self) -> Vec<DebugSection> {
        vec![
            DebugSection::new("Page")
                .entry("url", ron_string(&self.page.url))
                .entry("generation", ron_string(&self.page.generation))
                .entry("items", ron_string(&self.page.slots.len()))
                .entry("pending", ron_string(&self.page.pending_count()))
                .entry("failed", ron_string(&self.page.failed_count()))
                .entry("settled", ron_string(&self.page.is_settled())),
            DebugSection::new("Navigation")
                .entry("next", ron_string(&self.page.next_url()))
                .entry("previous", ron_string(&self.page.previous_url()))
                .entry("scroll_row", ron_string(&self.scroll_row)),
            DebugSection::new("Status").entry("message", ron_string(&self.message)),
        ]
    }
}
