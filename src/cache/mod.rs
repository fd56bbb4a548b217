pub mod key;
pub mod request_cache;

pub use key::{ParamValue, QueryKey, QueryParams};
pub use request_cache::{CacheStats, RequestCache};
