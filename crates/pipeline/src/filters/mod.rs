//! Filter implementations for the recommendation pipeline.

pub mod already_watched;
pub mod dedup;
pub mod minimum_rating;
pub mod per_seed_limit;

pub use already_watched::AlreadyWatchedFilter;
pub use dedup::DedupByIdFilter;
pub use minimum_rating::MinimumRatingFilter;
pub use per_seed_limit::PerSeedLimitFilter;
