mod static_api;

#[cfg(feature = "http")]
mod http;

#[cfg(feature = "http")]
pub use http::HttpDecisionService;
pub use static_api::StaticDecisionService;
