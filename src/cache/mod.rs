mod lookup;

pub use lookup::{TranslationCache, cache_key};
