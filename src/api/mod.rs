//! HTTP clients for the icon and verse providers

pub mod bible;
pub mod image_search;
pub mod noun_project;

pub use bible::{BibleClient, BiblePassage, BibleVerse};
pub use image_search::{ImageSearchClient, ImageSearchResponse};
pub use noun_project::{upgrade_thumbnail, IconSearchResponse, NounProjectClient};
