//! Navigation domain module.
//!
//! - `guard`: the admit / redirect / block decision run before each transition
//! - [`Navigator`]: the side effect used when the session is terminated

mod guard;

pub use guard::{LOGIN_PATH, NavigationDecision, ROUTE_RULES, RouteRule, check, evaluate};

/// Performs forced navigation on behalf of the request pipeline.
pub trait Navigator: Send + Sync {
    /// Sends the user to the login entry point.
    fn navigate_to_login(&self);
}
