mod loader;

pub use loader::{CollectionLoader, MAX_COLLECTION_BYTES};
