//! Reducer - pure function: (state, action) -> DispatchResult

use tui_dispatch::{DataResource, DispatchResult};

use crate::action::Action;
use crate::components::card_grid;
use crate::effect::Effect;
use crate::state::{AppState, DetailSlot};

pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        Action::Init => {
            let url = state.root_url.clone();
            begin_page(state, url)
        }

        // ===== Navigation =====
        Action::PageNext => match state.page.next_url() {
            Some(url) => {
                let url = url.to_string();
                begin_page(state, url)
            }
            None => DispatchResult::unchanged(),
        },

        Action::PagePrev => match state.page.previous_url() {
            Some(url) => {
                let url = url.to_string();
                begin_page(state, url)
            }
            None => DispatchResult::unchanged(),
        },

        Action::PageReload => {
            if state.page.listing.is_loading() {
                return DispatchResult::unchanged();
            }
            let url = if state.page.url.is_empty() {
                state.root_url.clone()
            } else {
                state.page.url.clone()
            };
            begin_page(state, url)
        }

        // ===== Listing results =====
        Action::ListingDidLoad {
            generation,
            listing,
        } => {
            if !state.page.is_current(generation) {
                tracing::debug!(
                    generation,
                    current = state.page.generation,
                    "stale listing dropped"
                );
                return DispatchResult::unchanged();
            }

            let effects: Vec<Effect> = listing
                .items
                .iter()
                .enumerate()
                .map(|(index, item)| Effect::FetchDetail {
                    generation,
                    index,
                    url: item.detail_url.clone(),
                })
                .collect();
            tracing::info!(url = %listing.url, items = effects.len(), "listing loaded");
            state.page.accept_listing(listing);
            state.message = None;

            if effects.is_empty() {
                DispatchResult::changed()
            } else {
                DispatchResult::changed_with_many(effects)
            }
        }

        Action::ListingDidError { generation, error } => {
            if !state.page.is_current(generation) {
                return DispatchResult::unchanged();
            }
            tracing::warn!(url = %state.page.url, %error, "listing failed");
            state.message = Some(if error.kind.is_retryable() {
                format!("Listing error: {error} (r to reload)")
            } else {
                format!("Listing error: {error}")
            });
            state.page.listing = DataResource::Failed(error.message);
            DispatchResult::changed()
        }

        // ===== Detail results =====
        Action::DetailDidLoad {
            generation,
            index,
            detail,
        } => settle_slot(state, generation, index, DetailSlot::Loaded(detail)),

        Action::DetailDidError {
            generation,
            index,
            error,
        } => {
            if state.page.is_current(generation) {
                let name = state.page.item_name(index).unwrap_or("?");
                tracing::warn!(index, name, %error, "detail failed");
            }
            settle_slot(state, generation, index, DetailSlot::Failed(error.message))
        }

        // ===== Card grid =====
        Action::CardScroll(delta) => {
            let (width, height) = state.terminal_size;
            let max_row = card_grid::max_scroll_row(state.page.card_count(), width, height);
            let next = if delta < 0 {
                state.scroll_row.saturating_sub(delta.unsigned_abs() as usize)
            } else {
                state.scroll_row.saturating_add(delta as usize)
            }
            .min(max_row);
            if next == state.scroll_row {
                return DispatchResult::unchanged();
            }
            state.scroll_row = next;
            DispatchResult::changed()
        }

        Action::UiTerminalResize(width, height) => {
            if state.terminal_size == (width, height) {
                return DispatchResult::unchanged();
            }
            state.terminal_size = (width, height);
            let max_row = card_grid::max_scroll_row(state.page.card_count(), width, height);
            state.scroll_row = state.scroll_row.min(max_row);
            DispatchResult::changed()
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

/// Replace the page with a fresh load of `url` and request its listing
fn begin_page(state: &mut AppState, url: String) -> DispatchResult<Effect> {
    state.page = state.page.begin(url);
    state.scroll_row = 0;
    state.message = None;
    tracing::info!(
        generation = state.page.generation,
        url = %state.page.url,
        "page load started"
    );
    DispatchResult::changed_with(Effect::FetchListing {
        generation: state.page.generation,
        url: state.page.url.clone(),
    })
}

fn settle_slot(
    state: &mut AppState,
    generation: u64,
    index: usize,
    outcome: DetailSlot,
) -> DispatchResult<Effect> {
    if !state.page.is_current(generation) {
        tracing::debug!(
            generation,
            index,
            current = state.page.generation,
            "stale detail dropped"
        );
        return DispatchResult::unchanged();
    }
    let Some(slot) = state.page.slots.get_mut(index) else {
        tracing::debug!(index, "detail for unknown slot dropped");
        return DispatchResult::unchanged();
    };
    if !slot.is_pending() {
        return DispatchResult::unchanged();
    }
    *slot = outcome;

    if state.page.is_settled() {
        tracing::info!(
            generation,
            loaded = state.page.details().len(),
            failed = state.page.failed_count(),
            "page settled"
        );
    }
    DispatchResult::changed()
}
