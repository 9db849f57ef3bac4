//! Request extractors that hand raw values to the domain layer.

mod bearer_token;
mod raw_json;

pub use bearer_token::BearerToken;
pub use raw_json::RawJson;
