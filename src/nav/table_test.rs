use std::collections::HashSet;

use super::*;

#[test]
fn every_path_is_declared_once() {
    let mut seen = HashSet::new();
    for route in ROUTES {
        assert!(seen.insert(route.path), "duplicate route {}", route.path);
    }
}

#[test]
fn every_view_has_exactly_one_route() {
    for view in [View::Login, View::Dashboard, View::DailyReport, View::HistoricalChart, View::Settings] {
        let count = ROUTES.iter().filter(|r| r.target == RouteTarget::View(view)).count();
        assert_eq!(count, 1, "{view:?}");
    }
}

#[test]
fn login_route_is_public() {
    let login = resolve(LOGIN_PATH);
    assert!(login.is_login());
    assert_eq!(login.policy, AccessPolicy::Public);
}

#[test]
fn landing_route_requires_only_a_session() {
    let landing = resolve(LANDING_PATH);
    assert_eq!(landing.target, RouteTarget::View(View::Dashboard));
    assert_eq!(landing.policy, AccessPolicy::RequiresSession);
}

#[test]
fn redirect_aliases_are_public() {
    for route in ROUTES.iter().chain(std::iter::once(&NOT_FOUND)) {
        if matches!(route.target, RouteTarget::Redirect(_)) {
            assert_eq!(route.policy, AccessPolicy::Public, "{}", route.path);
        }
    }
}

#[test]
fn settings_requires_admin() {
    assert_eq!(resolve("/settings").policy, AccessPolicy::RequiresRole(ADMIN_ROLE));
}

#[test]
fn unknown_paths_resolve_to_not_found() {
    assert_eq!(*resolve("/alarms/unknown"), NOT_FOUND);
    assert_eq!(*resolve("dashboard"), NOT_FOUND);
    assert_eq!(NOT_FOUND.target, RouteTarget::Redirect(LANDING_PATH));
}

#[test]
fn resolve_ignores_query_fragment_and_trailing_slash() {
    assert_eq!(resolve("/dashboard/").target, RouteTarget::View(View::Dashboard));
    assert_eq!(resolve("/historical-chart?type=daily").target, RouteTarget::View(View::HistoricalChart));
    assert_eq!(resolve("/login#form").target, RouteTarget::View(View::Login));
    assert_eq!(resolve("").path, "/");
    assert_eq!(resolve("/?x=1").path, "/");
}

#[test]
fn normalize_path_examples() {
    assert_eq!(normalize_path("/daily-report?date=2024-01-01"), "/daily-report");
    assert_eq!(normalize_path("///"), "/");
    assert_eq!(normalize_path("/settings/"), "/settings");
}

#[test]
fn view_paths_round_trip_through_table() {
    for view in [View::Login, View::Dashboard, View::DailyReport, View::HistoricalChart, View::Settings] {
        assert_eq!(resolve(view.path()).target, RouteTarget::View(view));
    }
}

#[test]
fn policy_session_requirement() {
    assert!(!AccessPolicy::Public.requires_session());
    assert!(AccessPolicy::RequiresSession.requires_session());
    assert!(AccessPolicy::RequiresRole("admin").requires_session());
}
