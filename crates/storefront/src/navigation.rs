//! Page routes and who may visit them.

use serde::Serialize;

use delicious_bites_core::BlogPostId;

use crate::models::Identity;

/// A page on the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "page", content = "id")]
pub enum Route {
    Home,
    Menu,
    Cart,
    Checkout,
    Contact,
    Login,
    Register,
    Blog,
    BlogPost(BlogPostId),
    Profile,
    OrderTracking,
    Admin,
}

/// What a visitor needs to see a route, from least to most strict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Requirement {
    Public,
    SignedIn,
    Admin,
}

/// Outcome of checking a visitor against a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Access {
    Allow,
    RedirectToLogin,
    Forbidden,
}

/// Where unauthenticated visitors are sent.
pub const LOGIN_PATH: &str = "/login";

impl Route {
    /// Parse a request path. Query strings and a trailing slash are ignored.
    /// Every path under `/admin` is the admin dashboard.
    #[must_use]
    pub fn parse(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let path = if path.len() > 1 {
            path.trim_end_matches('/')
        } else {
            path
        };

        let route = match path {
            "/" | "" => Self::Home,
            "/menu" => Self::Menu,
            "/cart" => Self::Cart,
            "/checkout" => Self::Checkout,
            "/contact" => Self::Contact,
            "/login" => Self::Login,
            "/register" => Self::Register,
            "/blog" => Self::Blog,
            "/profile" => Self::Profile,
            "/order-tracking" => Self::OrderTracking,
            "/admin" => Self::Admin,
            other if other.starts_with("/admin/") => Self::Admin,
            other => {
                let id = other.strip_prefix("/blog/")?.parse().ok()?;
                Self::BlogPost(id)
            }
        };
        Some(route)
    }

    #[must_use]
    pub const fn requirement(self) -> Requirement {
        match self {
            Self::Profile | Self::OrderTracking => Requirement::SignedIn,
            Self::Admin => Requirement::Admin,
            _ => Requirement::Public,
        }
    }
}

impl Requirement {
    #[must_use]
    pub fn check(self, identity: Option<&Identity>) -> Access {
        match (self, identity) {
            (Self::Public, _) => Access::Allow,
            (Self::SignedIn | Self::Admin, None) => Access::RedirectToLogin,
            (Self::SignedIn, Some(_)) => Access::Allow,
            (Self::Admin, Some(identity)) if identity.is_admin() => Access::Allow,
            (Self::Admin, Some(_)) => Access::Forbidden,
        }
    }
}

/// Check whether `identity` may visit `route`.
#[must_use]
pub fn authorize(route: Route, identity: Option<&Identity>) -> Access {
    route.requirement().check(identity)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use delicious_bites_core::{Email, Role, UserId};

    fn identity(role: Role) -> Identity {
        Identity {
            id: UserId::new(2),
            name: "John Doe".to_owned(),
            email: Email::parse("user@example.com").unwrap(),
            role,
        }
    }

    #[test]
    fn test_parse_known_paths() {
        assert_eq!(Route::parse("/"), Some(Route::Home));
        assert_eq!(Route::parse("/menu/"), Some(Route::Menu));
        assert_eq!(
            Route::parse("/order-tracking?orderId=5"),
            Some(Route::OrderTracking)
        );
        assert_eq!(
            Route::parse("/blog/3"),
            Some(Route::BlogPost(BlogPostId::new(3)))
        );
    }

    #[test]
    fn test_parse_unknown_paths() {
        assert_eq!(Route::parse("/nope"), None);
        assert_eq!(Route::parse("/blog/abc"), None);
        assert_eq!(Route::parse("/administrator"), None);
    }

    #[test]
    fn test_parse_admin_subpaths() {
        assert_eq!(Route::parse("/admin/menu/5"), Some(Route::Admin));
        assert_eq!(Route::parse("/admin/orders/1/status"), Some(Route::Admin));
    }

    #[test]
    fn test_requirements_are_ordered_by_strictness() {
        assert!(Requirement::Public < Requirement::SignedIn);
        assert!(Requirement::SignedIn < Requirement::Admin);
        assert_eq!(Requirement::SignedIn.max(Requirement::Admin), Requirement::Admin);
    }

    #[test]
    fn test_public_routes_allow_anyone() {
        assert_eq!(authorize(Route::Menu, None), Access::Allow);
        assert_eq!(authorize(Route::Checkout, None), Access::Allow);
    }

    #[test]
    fn test_protected_routes_redirect_when_signed_out() {
        assert_eq!(authorize(Route::Profile, None), Access::RedirectToLogin);
        assert_eq!(authorize(Route::OrderTracking, None), Access::RedirectToLogin);
        assert_eq!(authorize(Route::Admin, None), Access::RedirectToLogin);
    }

    #[test]
    fn test_admin_requires_admin_role() {
        let user = identity(Role::User);
        let admin = identity(Role::Admin);
        assert_eq!(authorize(Route::Profile, Some(&user)), Access::Allow);
        assert_eq!(authorize(Route::Admin, Some(&user)), Access::Forbidden);
        assert_eq!(authorize(Route::Admin, Some(&admin)), Access::Allow);
    }
}
