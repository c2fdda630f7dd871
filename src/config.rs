//! Listing endpoint configuration

use reqwest::Url;

use crate::error::ConfigError;

/// Default PokeAPI listing endpoint
pub const DEFAULT_LISTING_URL: &str = "https://pokeapi.co/api/v2/pokemon";

/// Where the first page is loaded from
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListingConfig {
    pub base_url: String,
    /// Page size, sent as `limit`
    pub limit: Option<u32>,
    /// Index of the first item, sent as `offset`
    pub offset: Option<u32>,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_LISTING_URL.to_string(),
            limit: None,
            offset: None,
        }
    }
}

impl ListingConfig {
    /// Build the root listing URL, replacing any `limit`/`offset` already in the query
    pub fn root_url(&self) -> Result<String, ConfigError> {
        let mut url = Url::parse(&self.base_url).map_err(|err| ConfigError::InvalidUrl {
            url: self.base_url.clone(),
            reason: err.to_string(),
        })?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::UnsupportedScheme(url.scheme().to_string()));
        }

        if self.limit.is_none() && self.offset.is_none() {
            return Ok(url.to_string());
        }

        let kept: Vec<(String, String)> = url
            .query_pairs()
            .filter(|(key, _)| {
                let replaced_limit = self.limit.is_some() && key == "limit";
                let replaced_offset = self.offset.is_some() && key == "offset";
                !(replaced_limit || replaced_offset)
            })
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();

        {
            let mut pairs = url.query_pairs_mut();
            pairs.clear();
            for (key, value) in &kept {
                pairs.append_pair(key, value);
            }
            if let Some(offset) = self.offset {
                pairs.append_pair("offset", &offset.to_string());
            }
            if let Some(limit) = self.limit {
                pairs.append_pair("limit", &limit.to_string());
            }
        }
        Ok(url.to_string())
    }
}
