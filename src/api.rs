//! PokeAPI fetch client

use std::sync::OnceLock;

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::FetchError;
use crate::state::{ListingItem, PageListing, PokemonDetail};

#[derive(Clone, Debug, Deserialize)]
struct NamedResource {
    name: String,
    url: String,
}

#[derive(Clone, Debug, Deserialize)]
struct ListingResponse {
    #[serde(default)]
    count: Option<u32>,
    results: Vec<NamedResource>,
    next: Option<String>,
    previous: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonResponse {
    name: String,
    height: u32,
    weight: u32,
    base_experience: Option<u32>,
    #[serde(default)]
    abilities: Vec<PokemonAbilitySlot>,
    #[serde(default)]
    sprites: serde_json::Value,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonAbilitySlot {
    ability: AbilityName,
}

#[derive(Clone, Debug, Deserialize)]
struct AbilityName {
    name: String,
}

/// Fetch one page of the listing at `url`
pub async fn fetch_listing(url: &str) -> Result<PageListing, FetchError> {
    let response: ListingResponse = fetch_json(url).await?;
    let listing = listing_from_response(url, response);
    tracing::debug!(
        url,
        items = listing.items.len(),
        has_next = listing.next.is_some(),
        has_previous = listing.previous.is_some(),
        "listing fetched"
    );
    Ok(listing)
}

/// Fetch the full record behind a listing item
pub async fn fetch_detail(url: &str) -> Result<PokemonDetail, FetchError> {
    let response: PokemonResponse = fetch_json(url).await?;
    let detail = detail_from_response(response);
    tracing::debug!(url, name = %detail.name, "detail fetched");
    Ok(detail)
}

/// GET `url` and decode the JSON body as `T`
pub async fn fetch_json<T: DeserializeOwned>(url: &str) -> Result<T, FetchError> {
    let bytes = fetch_bytes(url).await?;
    Ok(serde_json::from_slice(&bytes)?)
}

pub fn parse_listing(url: &str, bytes: &[u8]) -> Result<PageListing, FetchError> {
    Ok(listing_from_response(url, serde_json::from_slice(bytes)?))
}

pub fn parse_detail(bytes: &[u8]) -> Result<PokemonDetail, FetchError> {
    Ok(detail_from_response(serde_json::from_slice(bytes)?))
}

fn listing_from_response(url: &str, response: ListingResponse) -> PageListing {
    PageListing {
        url: url.to_string(),
        items: response
            .results
            .into_iter()
            .map(|entry| ListingItem {
                name: entry.name,
                detail_url: entry.url,
            })
            .collect(),
        next: response.next,
        previous: response.previous,
        count: response.count,
    }
}

fn detail_from_response(response: PokemonResponse) -> PokemonDetail {
    let sprite_url = pointer_string(&response.sprites, "/front_default");
    PokemonDetail {
        name: response.name,
        sprite_url,
        weight: response.weight,
        height: response.height,
        abilities: response
            .abilities
            .into_iter()
            .map(|slot| slot.ability.name)
            .collect(),
        base_experience: response.base_experience,
    }
}

fn pointer_string(value: &serde_json::Value, pointer: &str) -> Option<String> {
    value
        .pointer(pointer)
        .and_then(|val| val.as_str())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
}

async fn fetch_bytes(url: &str) -> Result<Vec<u8>, FetchError> {
    tracing::trace!(url, "GET");
    let response = http_client().get(url).send().await?;
    let response = response.error_for_status()?;
    Ok(response.bytes().await?.to_vec())
}

fn http_client() -> &'static reqwest::Client {
    static CLIENT: OnceLock<reqwest::Client> = OnceLock::new();
    CLIENT.get_or_init(reqwest::Client::new)
}
