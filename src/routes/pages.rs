//! Console page table
//!
//! Static mapping of console paths to pages, with the menu metadata the
//! shell renders. Served to the SPA through `/api/routes`.

use serde::Serialize;

/// Login page; every expired or missing session lands here
pub const LOGIN_ROUTE: &str = "/user/login";

/// Access flag for administrator-only pages
pub const ACCESS_CAN_ADMIN: &str = "canAdmin";

/// One entry of the page table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageRoute {
    pub path: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access: Option<&'static str>,
    /// Rendered inside the menu layout
    pub layout: bool,
}

const fn page(path: &'static str, component: &'static str) -> PageRoute {
    PageRoute {
        path,
        name: None,
        icon: None,
        component: Some(component),
        redirect: None,
        access: None,
        layout: true,
    }
}

const fn menu(
    path: &'static str,
    name: &'static str,
    icon: &'static str,
    component: &'static str,
    access: Option<&'static str>,
) -> PageRoute {
    PageRoute {
        path,
        name: Some(name),
        icon: Some(icon),
        component: Some(component),
        redirect: None,
        access,
        layout: true,
    }
}

pub static ROUTES: &[PageRoute] = &[
    PageRoute {
        path: LOGIN_ROUTE,
        name: Some("login"),
        icon: None,
        component: Some("./user/login"),
        redirect: None,
        access: None,
        layout: false,
    },
    PageRoute {
        path: "/user",
        name: None,
        icon: None,
        component: None,
        redirect: Some(LOGIN_ROUTE),
        access: None,
        layout: false,
    },
    page("/", "./index"),
    menu("/s3Management", "s3Management", "database", "./s3Management", None),
    menu(
        "/userManagement",
        "userManagement",
        "user",
        "./userManagement/list",
        Some(ACCESS_CAN_ADMIN),
    ),
    menu("/monitor", "monitor", "monitor", "./monitor", None),
    menu(
        "/adminManagement",
        "adminManagement",
        "crown",
        "./adminManagement/list",
        Some(ACCESS_CAN_ADMIN),
    ),
];

/// Where a console path leads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Resolution {
    Page { route: PageRoute },
    Redirect { to: &'static str },
    /// Page exists but the operator lacks its access flag
    Forbidden,
    NotFound,
}

/// Resolve `path` against the page table; trailing slashes are ignored
pub fn resolve(path: &str, can_admin: bool) -> Resolution {
    let path = match path.trim_end_matches('/') {
        "" => "/",
        p => p,
    };

    match ROUTES.iter().find(|r| r.path == path) {
        Some(route) => {
            if let Some(to) = route.redirect {
                Resolution::Redirect { to }
            } else if route.access == Some(ACCESS_CAN_ADMIN) && !can_admin {
                Resolution::Forbidden
            } else {
                Resolution::Page { route: *route }
            }
        }
        None => Resolution::NotFound,
    }
}

/// Menu entries visible to the operator
pub fn menu_for(can_admin: bool) -> Vec<PageRoute> {
    ROUTES
        .iter()
        .filter(|r| r.name.is_some() && r.layout)
        .filter(|r| can_admin || r.access.is_none())
        .copied()
        .collect()
}
