//! Effects - fetches requested by the reducer

#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    /// Fetch the listing page at `url` for page load `generation`
    FetchListing { generation: u64, url: String },
    /// Fetch the detail record for listing item `index`
    FetchDetail {
        generation: u64,
        index: usize,
        url: String,
    },
}
