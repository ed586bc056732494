//! Movie catalog access for the marquee search session.
//!
//! [`Catalog`] is the seam between the session core and the remote API;
//! [`TmdbClient`] implements it over HTTP. The [`present`] module derives
//! display strings and links from catalog records.

pub mod error;
pub mod model;
pub mod present;
mod source;
mod tmdb;

pub use error::{CatalogError, RequestKind, Result};
pub use model::{CastMember, Credits, Genre, MovieDetails, MovieId, MovieSummary, Video, VideoList};
pub use source::{Catalog, Feed};
pub use tmdb::TmdbClient;
