// Client-side routes and the role guard
//
// Route surface:
//   /login                      public
//   /                           redirects to /login
//   /student, /student/*        STUDENT
//   /faculty, /faculty/*        FACULTY
//   /admin, /admin/*            ADMIN
//   anything else               not found
//
// The guard runs on every navigation; nothing is cached.

use parking_lot::Mutex;

use crate::role::Role;
use crate::session::Session;

pub const LOGIN_PATH: &str = "/login";
pub const ROOT_PATH: &str = "/";

/// Outcome of the role guard
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Redirect(String),
    Render,
}

/// Decide whether `session` may open a page requiring one of `required`.
///
/// An authenticated user without a matching role is sent to their own home
/// page rather than back to the login screen.
pub fn authorize(session: &Session, required: &[Role]) -> Decision {
    match session.identity() {
        None => Decision::Redirect(LOGIN_PATH.to_string()),
        Some(identity) if !required.contains(&identity.role) => {
            Decision::Redirect(identity.role.home_path().to_string())
        }
        Some(_) => Decision::Render,
    }
}

/// Resolved route for a path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Root,
    Dashboard(Role),
    NotFound,
}

impl Route {
    pub fn resolve(path: &str) -> Route {
        let path = normalize(path);
        if path == ROOT_PATH {
            return Route::Root;
        }
        if path == LOGIN_PATH {
            return Route::Login;
        }

        Role::ALL
            .into_iter()
            .find(|role| {
                let home = role.home_path();
                path == home
                    || path
                        .strip_prefix(home)
                        .is_some_and(|rest| rest.starts_with('/'))
            })
            .map(Route::Dashboard)
            .unwrap_or(Route::NotFound)
    }

    /// Roles allowed to render this route; empty for public routes
    pub fn required_roles(&self) -> &'static [Role] {
        match self {
            Route::Dashboard(Role::Student) => &[Role::Student],
            Route::Dashboard(Role::Faculty) => &[Role::Faculty],
            Route::Dashboard(Role::Admin) => &[Role::Admin],
            Route::Login | Route::Root | Route::NotFound => &[],
        }
    }
}

/// Strip query string, fragment and trailing slashes
fn normalize(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let path = path[..end].trim_end_matches('/');
    if path.is_empty() {
        ROOT_PATH
    } else {
        path
    }
}

/// Entry in a role's dashboard menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub label: &'static str,
    pub href: &'static str,
}

const fn item(label: &'static str, href: &'static str) -> NavItem {
    NavItem { label, href }
}

const STUDENT_NAV: &[NavItem] = &[
    item("Dashboard", "/student"),
    item("Profile", "/student/profile"),
    item("Academics", "/student/academics"),
    item("Results", "/student/results"),
    item("Documents", "/student/documents"),
    item("Schedule", "/student/schedule"),
];

const FACULTY_NAV: &[NavItem] = &[
    item("Dashboard", "/faculty"),
    item("Profile", "/faculty/profile"),
];

const ADMIN_NAV: &[NavItem] = &[
    item("Dashboard", "/admin"),
    item("Users", "/admin/users"),
    item("Academics", "/admin/academics"),
    item("Marks", "/admin/marks"),
    item("Schedule", "/admin/schedule"),
    item("Notices", "/admin/notices"),
];

/// Dashboard menu for a role
pub fn navigation(role: Role) -> &'static [NavItem] {
    match role {
        Role::Student => STUDENT_NAV,
        Role::Faculty => FACULTY_NAV,
        Role::Admin => ADMIN_NAV,
    }
}

/// Menu entry matching `path`, if it is a known dashboard page
pub fn page_for(path: &str) -> Option<&'static NavItem> {
    let path = normalize(path);
    Role::ALL
        .into_iter()
        .flat_map(navigation)
        .find(|item| item.href == path)
}

/// Something that can move the user to another location
pub trait Navigator: Send + Sync {
    fn navigate(&self, path: &str);
}

/// Result of a navigation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Render(String),
    Redirect(String),
    NotFound(String),
}

/// Tracks the current location and applies the guard on each navigation
#[derive(Debug)]
pub struct Router {
    location: Mutex<String>,
}

impl Default for Router {
    fn default() -> Self {
        Self {
            location: Mutex::new(ROOT_PATH.to_string()),
        }
    }
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn location(&self) -> String {
        self.location.lock().clone()
    }

    /// Resolve `path` for `session`, follow any redirect and record where
    /// the user ends up.
    pub fn open(&self, session: &Session, path: &str) -> Navigation {
        let outcome = match Route::resolve(path) {
            Route::Root => Navigation::Redirect(LOGIN_PATH.to_string()),
            Route::Login => Navigation::Render(LOGIN_PATH.to_string()),
            Route::NotFound => Navigation::NotFound(path.to_string()),
            route @ Route::Dashboard(_) => match authorize(session, route.required_roles()) {
                Decision::Render => Navigation::Render(normalize(path).to_string()),
                Decision::Redirect(target) => Navigation::Redirect(target),
            },
        };

        let location = match &outcome {
            Navigation::Render(p) | Navigation::Redirect(p) | Navigation::NotFound(p) => p,
        };
        self.navigate(location);
        outcome
    }
}

impl Navigator for Router {
    fn navigate(&self, path: &str) {
        tracing::debug!(path, "navigating");
        *self.location.lock() = path.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Identity;

    fn signed_in(role: Role) -> Session {
        Session::authenticated(Identity::new("u@uni.edu", role), "h.p.s")
    }

    #[test]
    fn test_anonymous_is_sent_to_login() {
        assert_eq!(
            authorize(&Session::Anonymous, &[Role::Admin]),
            Decision::Redirect("/login".to_string())
        );
    }

    #[test]
    fn test_role_mismatch_redirects_to_own_home() {
        assert_eq!(
            authorize(&signed_in(Role::Student), &[Role::Admin]),
            Decision::Redirect("/student".to_string())
        );
        assert_eq!(
            authorize(&signed_in(Role::Admin), &[Role::Faculty]),
            Decision::Redirect("/admin".to_string())
        );
    }

    #[test]
    fn test_matching_role_renders() {
        assert_eq!(authorize(&signed_in(Role::Faculty), &[Role::Faculty]), Decision::Render);
        assert_eq!(
            authorize(&signed_in(Role::Admin), &[Role::Student, Role::Admin]),
            Decision::Render
        );
    }

    #[test]
    fn test_route_resolution() {
        assert_eq!(Route::resolve("/"), Route::Root);
        assert_eq!(Route::resolve(""), Route::Root);
        assert_eq!(Route::resolve("/login"), Route::Login);
        assert_eq!(Route::resolve("/student"), Route::Dashboard(Role::Student));
        assert_eq!(Route::resolve("/student/results?semester=2"), Route::Dashboard(Role::Student));
        assert_eq!(Route::resolve("/faculty/profile/"), Route::Dashboard(Role::Faculty));
        assert_eq!(Route::resolve("/admin/notices#top"), Route::Dashboard(Role::Admin));
        assert_eq!(Route::resolve("/students"), Route::NotFound);
        assert_eq!(Route::resolve("/nowhere"), Route::NotFound);
    }

    #[test]
    fn test_router_follows_guard() {
        let router = Router::new();

        assert_eq!(
            router.open(&Session::Anonymous, "/admin/users"),
            Navigation::Redirect("/login".to_string())
        );
        assert_eq!(router.location(), "/login");

        assert_eq!(
            router.open(&signed_in(Role::Student), "/admin/users"),
            Navigation::Redirect("/student".to_string())
        );
        assert_eq!(router.location(), "/student");

        assert_eq!(
            router.open(&signed_in(Role::Student), "/student/results/"),
            Navigation::Render("/student/results".to_string())
        );
        assert_eq!(router.location(), "/student/results");
    }

    #[test]
    fn test_root_redirects_to_login_even_when_signed_in() {
        let router = Router::new();
        assert_eq!(
            router.open(&signed_in(Role::Admin), "/"),
            Navigation::Redirect("/login".to_string())
        );
    }

    #[test]
    fn test_unknown_path_is_not_found() {
        let router = Router::new();
        assert_eq!(
            router.open(&Session::Anonymous, "/library"),
            Navigation::NotFound("/library".to_string())
        );
    }

    #[test]
    fn test_navigation_menus() {
        assert_eq!(navigation(Role::Student).len(), 6);
        assert_eq!(navigation(Role::Faculty).len(), 2);
        assert_eq!(navigation(Role::Admin)[0].href, "/admin");
        assert_eq!(page_for("/admin/marks").map(|i| i.label), Some("Marks"));
        assert!(page_for("/admin/unknown").is_none());
    }
}
