//! Static route table: path -> view + access policy.
//!
//! Every path resolves to exactly one descriptor. Paths the table does not
//! know resolve to [`NOT_FOUND`], which is itself a public redirect to the
//! landing route, so unknown URLs still go through the guard.

#[cfg(test)]
#[path = "table_test.rs"]
mod table_test;

/// Public sign-in route. Its policy must stay `Public`.
pub const LOGIN_PATH: &str = "/login";
/// Where authenticated users land. Its policy must not exceed `RequiresSession`.
pub const LANDING_PATH: &str = "/dashboard";
/// Role required for machine settings.
pub const ADMIN_ROLE: &str = "admin";

/// Screens supplied by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Login,
    Dashboard,
    DailyReport,
    HistoricalChart,
    Settings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessPolicy {
    Public,
    RequiresSession,
    /// Requires a session whose identity carries exactly this role.
    RequiresRole(&'static str),
}

impl AccessPolicy {
    pub fn requires_session(self) -> bool {
        !matches!(self, Self::Public)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteTarget {
    View(View),
    /// Alias that forwards to another path once its own policy passes.
    Redirect(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteDescriptor {
    pub path: &'static str,
    pub target: RouteTarget,
    pub policy: AccessPolicy,
}

impl RouteDescriptor {
    pub fn is_login(&self) -> bool {
        self.target == RouteTarget::View(View::Login)
    }
}

pub const ROUTES: &[RouteDescriptor] = &[
    RouteDescriptor { path: LOGIN_PATH, target: RouteTarget::View(View::Login), policy: AccessPolicy::Public },
    RouteDescriptor {
        path: LANDING_PATH,
        target: RouteTarget::View(View::Dashboard),
        policy: AccessPolicy::RequiresSession,
    },
    RouteDescriptor {
        path: "/daily-report",
        target: RouteTarget::View(View::DailyReport),
        policy: AccessPolicy::RequiresSession,
    },
    RouteDescriptor {
        path: "/historical-chart",
        target: RouteTarget::View(View::HistoricalChart),
        policy: AccessPolicy::RequiresSession,
    },
    RouteDescriptor {
        path: "/settings",
        target: RouteTarget::View(View::Settings),
        policy: AccessPolicy::RequiresRole(ADMIN_ROLE),
    },
    RouteDescriptor { path: "/", target: RouteTarget::Redirect(LANDING_PATH), policy: AccessPolicy::Public },
];

pub static NOT_FOUND: RouteDescriptor =
    RouteDescriptor { path: "*", target: RouteTarget::Redirect(LANDING_PATH), policy: AccessPolicy::Public };

/// Look up the descriptor for `location` (path, optionally with query/fragment).
pub fn resolve(location: &str) -> &'static RouteDescriptor {
    let path = normalize_path(location);
    ROUTES.iter().find(|route| route.path == path).unwrap_or(&NOT_FOUND)
}

/// Path portion of `location`: query and fragment dropped, trailing `/` removed.
pub fn normalize_path(location: &str) -> &str {
    let end = location.find(['?', '#']).unwrap_or(location.len());
    let path = location[..end].trim_end_matches('/');
    if path.is_empty() { "/" } else { path }
}

impl View {
    pub fn path(self) -> &'static str {
        ROUTES
            .iter()
            .find(|route| route.target == RouteTarget::View(self))
            .map_or(LANDING_PATH, |route| route.path)
    }

    /// Translation key of the view's title.
    pub fn title_key(self) -> &'static str {
        match self {
            Self::Login => "nav.login",
            Self::Dashboard => "nav.dashboard",
            Self::DailyReport => "nav.dailyReport",
            Self::HistoricalChart => "nav.historicalChart",
            Self::Settings => "nav.settings",
        }
    }
}
