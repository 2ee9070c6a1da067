//! Domain types shared across UVLHub
//!
//! A [`Dataset`] owns one [`DatasetMetadata`] record (title, tags, publication
//! type, DOIs, authors) and a list of [`FeatureModel`]s, each with its uploaded
//! [`HubFile`]s. Size and file count are never stored: they are derived through
//! [`DerivedProperties`].

mod dataset;
mod publication_type;
pub mod seed;

pub use dataset::{Author, Dataset, DatasetMetadata, DerivedProperties, FeatureModel, HubFile};
pub use publication_type::PublicationType;
