use serde::Serialize;

use crate::middleware::rewrite::rewrite_target;

pub struct NavLink {
    pub name: &'static str,
    pub path: &'static str,
}

pub struct NavItem {
    pub name: &'static str,
    pub path: Option<&'static str>,
    pub sub_items: &'static [NavLink],
}

pub const ADMIN_NAV: &[NavItem] = &[
    NavItem {
        name: "Dashboard",
        path: Some("/admin/home"),
        sub_items: &[],
    },
    NavItem {
        name: "Pages",
        path: None,
        sub_items: &[
            NavLink {
                name: "Home",
                path: "/admin/home",
            },
            NavLink {
                name: "About",
                path: "/admin/about",
            },
            NavLink {
                name: "Timeline",
                path: "/admin/timeline",
            },
            NavLink {
                name: "Projects",
                path: "/admin/projects",
            },
        ],
    },
];

pub const PUBLIC_NAV: &[NavLink] = &[
    NavLink {
        name: "Home",
        path: "/",
    },
    NavLink {
        name: "About",
        path: "/about",
    },
    NavLink {
        name: "Skills",
        path: "/skills",
    },
    NavLink {
        name: "Projects",
        path: "/projects",
    },
    NavLink {
        name: "Experiences",
        path: "/experiences",
    },
];

pub fn is_active(item_path: &str, current: &str) -> bool {
    item_path == current
}

/// Index of the submenu holding the current page, if any.
pub fn open_submenu(current: &str) -> Option<usize> {
    ADMIN_NAV.iter().position(|item| {
        item.sub_items
            .iter()
            .any(|sub| is_active(sub.path, current))
    })
}

#[derive(Debug, Serialize)]
pub struct MenuLink {
    pub name: &'static str,
    pub path: &'static str,
    pub active: bool,
}

#[derive(Debug, Serialize)]
pub struct MenuEntry {
    pub name: &'static str,
    pub path: Option<&'static str>,
    pub active: bool,
    pub open: bool,
    pub sub_items: Vec<MenuLink>,
}

/// Admin sidebar as rendered for `current`.
pub fn admin_menu(current: &str) -> Vec<MenuEntry> {
    let open = open_submenu(current);

    ADMIN_NAV
        .iter()
        .enumerate()
        .map(|(index, item)| MenuEntry {
            name: item.name,
            path: item.path,
            active: item.path.is_some_and(|path| is_active(path, current)),
            open: open == Some(index),
            sub_items: item
                .sub_items
                .iter()
                .map(|sub| MenuLink {
                    name: sub.name,
                    path: sub.path,
                    active: is_active(sub.path, current),
                })
                .collect(),
        })
        .collect()
}

#[derive(Debug, Serialize)]
pub struct PublicLink {
    pub label: &'static str,
    pub href: &'static str,
    pub active: bool,
}

/// Public navbar; `current` is the internal page path the request was routed to.
pub fn public_menu(current: &str) -> Vec<PublicLink> {
    PUBLIC_NAV
        .iter()
        .map(|link| PublicLink {
            label: link.name,
            href: link.path,
            active: rewrite_target(link.path).unwrap_or(link.path) == current,
        })
        .collect()
}
