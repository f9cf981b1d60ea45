pub mod photo;

pub use photo::{PhotoAuthor, PhotoRecord, PhotoUrls, SearchResponse};
