//! Snippet-sharing backend library modules.

pub mod domain;
pub mod html;
pub mod inbound;
pub mod middleware;
pub mod outbound;

pub use middleware::trace::Trace;
