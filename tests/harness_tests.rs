//! Page load flows driven through EffectStoreTestHarness
//!
//! Async fetch completions are simulated with `complete_action`, so the
//! order in which detail responses arrive is under the test's control.

use pokepager::{
    action::Action,
    components::{Component, PageView, PageViewProps},
    effect::Effect,
    error::{FetchErrorKind, FetchFailure},
    reducer::reducer,
    state::{AppState, DetailSlot, ListingItem, PageListing, PokemonDetail},
};
use tui_dispatch::testing::*;
use tui_dispatch::NumericComponentId;

const ROOT: &str = "https://pokeapi.co/api/v2/pokemon?limit=2";
const PAGE_TWO: &str = "https://pokeapi.co/api/v2/pokemon?offset=2&limit=2";

fn listing(
    url: &str,
    names: &[&str],
    next: Option<&str>,
    previous: Option<&str>,
) -> PageListing {
    PageListing {
        url: url.into(),
        items: names
            .iter()
            .map(|name| ListingItem {
                name: name.to_string(),
                detail_url: format!("https://pokeapi.co/api/v2/pokemon/{name}/"),
            })
            .collect(),
        next: next.map(str::to_string),
        previous: previous.map(str::to_string),
        count: Some(1302),
    }
}

fn detail(name: &str, weight: u32, base_experience: u32) -> PokemonDetail {
    PokemonDetail {
        name: name.into(),
        sprite_url: Some(format!("https://sprites.test/{name}.png")),
        weight,
        height: 7,
        abilities: vec!["overgrow".into()],
        base_experience: Some(base_experience),
    }
}

fn network_error() -> FetchFailure {
    FetchFailure {
        kind: FetchErrorKind::Network,
        message: "network error: connection reset".into(),
    }
}

/// Render the whole page view at 90x24
macro_rules! render_page {
    ($harness:expr) => {{
        let mut view = PageView::new();
        $harness.render_plain(90, 24, |frame, area, state| {
            let props = PageViewProps {
                state,
                is_focused: true,
            };
            view.render(frame, area, props);
        })
    }};
}

/// Harness with the root listing loaded and both detail fetches requested
macro_rules! harness_with_listing {
    ($next:expr) => {{
        let mut harness = EffectStoreTestHarness::new(AppState::new(ROOT.into()), reducer);
        harness.dispatch_collect(Action::Init);
        harness.drain_effects();
        harness.dispatch_collect(Action::ListingDidLoad {
            generation: 1,
            listing: listing(ROOT, &["bulbasaur", "ivysaur"], $next, None),
        });
        harness.drain_effects();
        harness
    }};
}

// ============================================================================
// Initial load
// ============================================================================

#[test]
fn test_init_fetches_listing_then_fans_out() {
    let mut harness = EffectStoreTestHarness::new(AppState::new(ROOT.into()), reducer);

    harness.dispatch_collect(Action::Init);
    harness.assert_state(|s| s.page.listing.is_loading());

    let effects = harness.drain_effects();
    effects.effects_count(1);
    effects.effects_first_matches(
        |e| matches!(e, Effect::FetchListing { generation: 1, url } if url == ROOT),
    );

    harness.dispatch_collect(Action::ListingDidLoad {
        generation: 1,
        listing: listing(ROOT, &["bulbasaur", "ivysaur"], Some(PAGE_TWO), None),
    });

    let effects = harness.drain_effects();
    effects.effects_count(2);
    effects.effects_all_match(|e| matches!(e, Effect::FetchDetail { generation: 1, .. }));
    effects.effects_none_match(|e| matches!(e, Effect::FetchListing { .. }));
    harness.assert_state(|s| s.page.pending_count() == 2);
    harness.assert_state(|s| !s.page.is_settled());
}

#[test]
fn test_out_of_order_details_keep_listing_order() {
    let mut harness = harness_with_listing!(None);

    // ivysaur answers first
    harness.complete_action(Action::DetailDidLoad {
        generation: 1,
        index: 1,
        detail: detail("ivysaur", 130, 142),
    });
    harness.complete_action(Action::DetailDidLoad {
        generation: 1,
        index: 0,
        detail: detail("bulbasaur", 69, 64),
    });
    let (changed, total) = harness.process_emitted();
    assert_eq!(total, 2);
    assert_eq!(changed, 2);

    harness.assert_state(|s| s.page.is_settled());
    harness.assert_state(|s| {
        let names: Vec<_> = s.page.details().iter().map(|d| d.name.clone()).collect();
        names == ["bulbasaur", "ivysaur"]
    });
    harness.assert_state(|s| s.page.weights() == [69, 130]);

    let output = render_page!(harness);
    assert_eq!(output.matches("Wt ").count(), 2, "two cards:\n{output}");
    assert!(output.contains("Total weight: 199"), "{output}");
    assert!(output.contains("Most exp: Ivysaur"), "{output}");
}

#[test]
fn test_header_waits_for_settlement() {
    let mut harness = harness_with_listing!(None);

    harness.dispatch_collect(Action::DetailDidLoad {
        generation: 1,
        index: 0,
        detail: detail("bulbasaur", 69, 64),
    });

    let output = render_page!(harness);
    assert!(output.contains("Bulbasaur"), "card shows at once:\n{output}");
    assert!(output.contains("Loading 1/2"), "{output}");
    assert!(!output.contains("Total weight"), "{output}");
    assert!(!output.contains("Next >"), "nav hidden until settled:\n{output}");
}

#[test]
fn test_failed_detail_still_settles() {
    let mut harness = harness_with_listing!(None);

    harness.complete_action(Action::DetailDidError {
        generation: 1,
        index: 0,
        error: network_error(),
    });
    harness.complete_action(Action::DetailDidLoad {
        generation: 1,
        index: 1,
        detail: detail("ivysaur", 130, 142),
    });
    harness.process_emitted();

    harness.assert_state(|s| s.page.is_settled());
    harness.assert_state(|s| matches!(s.page.slots[0], DetailSlot::Failed(_)));
    harness.assert_state(|s| s.page.weights() == [130]);

    let output = render_page!(harness);
    assert!(output.contains("Could not load"), "{output}");
    assert!(output.contains("Total weight: 130"), "{output}");
    assert!(output.contains("1 failed"), "{output}");
}

// ============================================================================
// Navigation
// ============================================================================

#[test]
fn test_stale_results_after_navigation_are_ignored() {
    let mut harness = harness_with_listing!(Some(PAGE_TWO));
    harness.dispatch_collect(Action::DetailDidLoad {
        generation: 1,
        index: 0,
        detail: detail("bulbasaur", 69, 64),
    });

    // Navigate before the first page finished settling
    harness.dispatch_collect(Action::PageNext);
    let effects = harness.drain_effects();
    effects.effects_count(1);
    effects.effects_first_matches(
        |e| matches!(e, Effect::FetchListing { generation: 2, url } if url == PAGE_TWO),
    );

    harness.complete_action(Action::DetailDidLoad {
        generation: 1,
        index: 1,
        detail: detail("ivysaur", 130, 142),
    });
    harness.complete_action(Action::ListingDidLoad {
        generation: 1,
        listing: listing(ROOT, &["bulbasaur", "ivysaur"], Some(PAGE_TWO), None),
    });
    let (changed, total) = harness.process_emitted();
    assert_eq!(total, 2);
    assert_eq!(changed, 0, "stale results must not touch state");

    harness.assert_state(|s| s.page.url == PAGE_TWO);
    harness.assert_state(|s| s.page.listing.is_loading());
    harness.assert_state(|s| s.page.slots.is_empty());
    harness.assert_state(|s| s.page.weights().is_empty());
}

#[test]
fn test_next_and_prev_round_trip() {
    let mut harness = harness_with_listing!(Some(PAGE_TWO));
    harness.dispatch_all([
        Action::DetailDidLoad {
            generation: 1,
            index: 0,
            detail: detail("bulbasaur", 69, 64),
        },
        Action::DetailDidLoad {
            generation: 1,
            index: 1,
            detail: detail("ivysaur", 130, 142),
        },
    ]);

    harness.dispatch_collect(Action::PageNext);
    harness.drain_effects();
    harness.dispatch_collect(Action::ListingDidLoad {
        generation: 2,
        listing: listing(PAGE_TWO, &["venusaur"], None, Some(ROOT)),
    });
    harness.drain_effects().effects_count(1);
    harness.dispatch_collect(Action::DetailDidLoad {
        generation: 2,
        index: 0,
        detail: detail("venusaur", 1000, 263),
    });
    harness.assert_state(|s| s.page.is_settled() && !s.page.has_next());

    // Next is disabled now; the press is a no-op
    let results = harness.dispatch_all([Action::PageNext]);
    assert_eq!(results, vec![false]);

    harness.dispatch_collect(Action::PagePrev);
    let effects = harness.drain_effects();
    effects.effects_count(1);
    effects.effects_first_matches(
        |e| matches!(e, Effect::FetchListing { generation: 3, url } if url == ROOT),
    );
    harness.assert_state(|s| s.page.weights().is_empty());
}

#[test]
fn test_empty_listing_is_no_results() {
    let mut harness = EffectStoreTestHarness::new(AppState::new(ROOT.into()), reducer);
    harness.dispatch_collect(Action::Init);
    harness.drain_effects();

    harness.dispatch_collect(Action::ListingDidLoad {
        generation: 1,
        listing: listing(ROOT, &[], None, None),
    });
    harness.drain_effects().effects_empty();
    harness.assert_state(|s| s.page.is_settled());

    let output = render_page!(harness);
    assert!(output.contains("No results"), "{output}");
}

#[test]
fn test_listing_failure_then_reload() {
    let mut harness = EffectStoreTestHarness::new(AppState::new(ROOT.into()), reducer);
    harness.dispatch_collect(Action::Init);
    harness.drain_effects();

    harness.complete_action(Action::ListingDidError {
        generation: 1,
        error: network_error(),
    });
    harness.process_emitted();
    harness.assert_state(|s| s.page.listing.is_failed());
    harness.assert_state(|s| {
        s.message
            .as_deref()
            .is_some_and(|message| message.contains("r to reload"))
    });

    let output = render_page!(harness);
    assert!(output.contains("Page could not be loaded"), "{output}");

    harness.dispatch_collect(Action::PageReload);
    let effects = harness.drain_effects();
    effects.effects_first_matches(
        |e| matches!(e, Effect::FetchListing { generation: 2, url } if url == ROOT),
    );
}

// ============================================================================
// Keys through the view
// ============================================================================

#[test]
fn test_next_key_dispatches_after_settle() {
    let mut harness = harness_with_listing!(Some(PAGE_TWO));
    harness.dispatch_all([
        Action::DetailDidLoad {
            generation: 1,
            index: 0,
            detail: detail("bulbasaur", 69, 64),
        },
        Action::DetailDidLoad {
            generation: 1,
            index: 1,
            detail: detail("ivysaur", 130, 142),
        },
    ]);
    let mut view = PageView::new();

    let actions = harness.send_keys::<NumericComponentId, _, _>("n p", |state, event| {
        let props = PageViewProps {
            state,
            is_focused: true,
        };
        view.handle_event(&event.kind, props)
            .into_iter()
            .collect::<Vec<_>>()
    });

    // No previous URL on the first page, so only `n` produces an action
    actions.assert_count(1);
    actions.assert_first(Action::PageNext);
}
