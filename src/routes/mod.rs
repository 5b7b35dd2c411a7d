//! Destination table and guarded navigation.
//!
//! Every destination declares who may see it; `navigate` turns the session
//! gate's verdict into either the destination itself or a redirect path.

use serde::Serialize;

use crate::config::{normalize_path, RouteConfig};
use crate::session::{SessionError, SessionGate, Verdict};
use crate::store::SessionStore;
use crate::types::Role;

/// Who may reach a destination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Access {
    /// Only without a session, e.g. the login screen
    GuestOnly,
    /// Any logged-in user
    Authenticated,
    /// Logged-in users holding this role
    Role(Role),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    pub path: String,
    pub title: String,
    pub access: Access,
}

impl Route {
    pub fn new(path: &str, title: &str, access: Access) -> Self {
        Self {
            path: normalize_path(path),
            title: title.to_string(),
            access,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Navigation {
    Render(Route),
    Redirect { to: String, verdict: Verdict },
}

#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<Route>,
    login_path: String,
    default_path: String,
}

impl RouteTable {
    /// Build a table. The login path must name a guest-only route and the
    /// default path a route open to every logged-in user; otherwise a
    /// redirect could point at a page that redirects again. A configured path
    /// that fails this falls back to the first route that qualifies.
    pub fn new(routes: Vec<Route>, config: &RouteConfig) -> Self {
        let login_path = resolve_target(&routes, &config.login_path, Access::GuestOnly, "login");
        let default_path = resolve_target(&routes, &config.default_path, Access::Authenticated, "default");
        Self {
            routes,
            login_path,
            default_path,
        }
    }

    /// The shop's destinations: reservations for everyone, customer,
    /// therapist and record management for admins.
    pub fn standard(config: &RouteConfig) -> Self {
        let routes = vec![
            Route::new(&config.login_path, "Login", Access::GuestOnly),
            Route::new("/", "Reservations", Access::Authenticated),
            Route::new("/customers", "Customers", Access::Role(Role::Admin)),
            Route::new("/therapists", "Therapists", Access::Role(Role::Admin)),
            Route::new("/management-records", "Management records", Access::Role(Role::Admin)),
        ];
        Self::new(routes, config)
    }

    pub fn find(&self, path: &str) -> Option<&Route> {
        let path = normalize_path(path);
        self.routes.iter().find(|r| r.path == path)
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    pub fn default_path(&self) -> &str {
        &self.default_path
    }

    fn redirect(&self, verdict: Verdict) -> Navigation {
        let to = match verdict {
            Verdict::RedirectToLogin => self.login_path.clone(),
            _ => self.default_path.clone(),
        };
        Navigation::Redirect { to, verdict }
    }
}

fn resolve_target(routes: &[Route], configured: &str, access: Access, kind: &str) -> String {
    let configured = normalize_path(configured);
    if routes.iter().any(|r| r.path == configured && r.access == access) {
        return configured;
    }

    match routes.iter().find(|r| r.access == access) {
        Some(route) => {
            tracing::warn!(
                "Configured {} path '{}' is not a {:?} route, using '{}'",
                kind,
                configured,
                access,
                route.path
            );
            route.path.clone()
        }
        None => configured,
    }
}

/// Verdict for one destination, after reconciling the gate with its store
pub fn check_access<S: SessionStore>(
    gate: &mut SessionGate<S>,
    access: Access,
) -> Result<Verdict, SessionError> {
    match access {
        Access::GuestOnly => {
            if gate.is_authenticated()? {
                Ok(Verdict::RedirectToDefault)
            } else {
                Ok(Verdict::Allow)
            }
        }
        Access::Authenticated => gate.authorize(None),
        Access::Role(role) => gate.authorize(Some(role)),
    }
}

/// Resolve a navigation request. Unknown paths go to the default route.
pub fn navigate<S: SessionStore>(
    gate: &mut SessionGate<S>,
    table: &RouteTable,
    path: &str,
) -> Result<Navigation, SessionError> {
    let route = match table.find(path) {
        Some(route) => route,
        None => {
            tracing::debug!("No route for '{}', falling back to default", path);
            return Ok(table.redirect(Verdict::RedirectToDefault));
        }
    };

    let verdict = check_access(gate, route.access)?;
    tracing::debug!("Navigation to {} -> {:?}", route.path, verdict);

    match verdict {
        Verdict::Allow => Ok(Navigation::Render(route.clone())),
        other => Ok(table.redirect(other)),
    }
}

/// Destinations to offer in the menu bar for the current session
pub fn menu<'a, S: SessionStore>(
    gate: &mut SessionGate<S>,
    table: &'a RouteTable,
) -> Result<Vec<&'a Route>, SessionError> {
    let mut visible = Vec::new();
    for route in table.routes() {
        if route.access == Access::GuestOnly {
            continue;
        }
        if check_access(gate, route.access)? == Verdict::Allow {
            visible.push(route);
        }
    }
    Ok(visible)
}
