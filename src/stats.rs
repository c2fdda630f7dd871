//! Unit conversions and page aggregates shown in cards and the header

use crate::state::PokemonDetail;

const HECTOGRAM_FACTOR: f64 = 4.5359237;
const DECIMETER_DIVISOR: f64 = 3.937;

/// Weight as displayed on a card
pub fn to_hectograms(weight: f64) -> f64 {
    weight * HECTOGRAM_FACTOR
}

pub fn from_hectograms(value: f64) -> f64 {
    value / HECTOGRAM_FACTOR
}

/// Height as displayed on a card
pub fn to_decimeter(height: f64) -> f64 {
    height / DECIMETER_DIVISOR
}

pub fn from_decimeter(value: f64) -> f64 {
    value * DECIMETER_DIVISOR
}

/// Sum of all weights on the page
pub fn total_weight(weights: &[u32]) -> u64 {
    weights.iter().map(|&weight| u64::from(weight)).sum()
}

/// Capitalized name of the detail with the highest base experience.
///
/// The first strict maximum wins; later entries with an equal value lose.
/// Details without a base experience never win.
pub fn most_base_experience<'a, I>(details: I) -> Option<String>
where
    I: IntoIterator<Item = &'a PokemonDetail>,
{
    let mut best: Option<(u32, &str)> = None;
    for detail in details {
        let Some(exp) = detail.base_experience else {
            continue;
        };
        match best {
            Some((top, _)) if top >= exp => {}
            _ => best = Some((exp, detail.name.as_str())),
        }
    }
    best.map(|(_, name)| capitalize(name))
}

/// Uppercase the first character, leave the rest untouched
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Abilities as a single space separated line
pub fn ability_line(abilities: &[String]) -> String {
    abilities.join(" ")
}

/// Aggregates rendered in the header once a page settles
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageSummary {
    pub total_weight: u64,
    pub top_experience: Option<String>,
}

impl PageSummary {
    pub fn from_details(details: &[&PokemonDetail]) -> Self {
        let weights: Vec<u32> = details.iter().map(|detail| detail.weight).collect();
        Self {
            total_weight: total_weight(&weights),
            top_experience: most_base_experience(details.iter().copied()),
        }
    }
}
