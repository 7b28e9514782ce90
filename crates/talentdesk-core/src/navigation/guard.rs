//! Route admission policy.

use crate::session::{Role, SessionView};

/// Entry point that is always reachable.
pub const LOGIN_PATH: &str = "/login";

const LOGIN_REQUIRED_NOTICE: &str = "Please log in to access this page.";

/// Outcome of one navigation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationDecision {
    /// Transition proceeds.
    Admit,
    /// Transition is replaced by a navigation to the login path.
    RedirectToLogin { notice: &'static str },
    /// Transition is cancelled; the user stays on the current view.
    Block { notice: &'static str },
}

impl NavigationDecision {
    pub fn is_admitted(&self) -> bool {
        matches!(self, NavigationDecision::Admit)
    }

    pub fn notice(&self) -> Option<&'static str> {
        match self {
            NavigationDecision::Admit => None,
            NavigationDecision::RedirectToLogin { notice }
            | NavigationDecision::Block { notice } => Some(notice),
        }
    }
}

/// A path-prefix admission rule.
#[derive(Debug, Clone, Copy)]
pub struct RouteRule {
    pub prefix: &'static str,
    pub allowed: &'static [Role],
    pub notice: &'static str,
}

impl RouteRule {
    fn applies_to(&self, path: &str) -> bool {
        path.starts_with(self.prefix)
    }

    fn admits(&self, role: Option<Role>) -> bool {
        role.is_some_and(|role| self.allowed.contains(&role))
    }
}

/// Prefix rules, evaluated in order.
pub const ROUTE_RULES: [RouteRule; 3] = [
    RouteRule {
        prefix: "/admin",
        allowed: &[Role::Hr, Role::HrManager],
        notice: "Access denied. HR role required to access this page.",
    },
    RouteRule {
        prefix: "/employee",
        allowed: &[Role::Employee],
        notice: "Access denied. Employee role required to access this page.",
    },
    RouteRule {
        prefix: "/candidate",
        allowed: &[Role::Candidate],
        notice: "Access denied. Candidate role required to access this page.",
    },
];

/// Decides a single transition from the target path, credential presence
/// and the caller's role.
///
/// Stateless: the same inputs always produce the same decision.
pub fn evaluate(target: &str, has_credential: bool, role: Option<Role>) -> NavigationDecision {
    if target == LOGIN_PATH {
        return NavigationDecision::Admit;
    }

    if !has_credential {
        return NavigationDecision::RedirectToLogin {
            notice: LOGIN_REQUIRED_NOTICE,
        };
    }

    for rule in ROUTE_RULES.iter() {
        if rule.applies_to(target) && !rule.admits(role) {
            return NavigationDecision::Block { notice: rule.notice };
        }
    }

    NavigationDecision::Admit
}

/// Same as [`evaluate`], reading credential and role from a session snapshot.
pub fn check(target: &str, session: &dyn SessionView) -> NavigationDecision {
    let snapshot = session.snapshot();
    let decision = evaluate(target, snapshot.is_authenticated(), snapshot.role());
    if !decision.is_admitted() {
        tracing::debug!(target_path = target, ?decision, "Navigation not admitted");
    }
    decision
}
