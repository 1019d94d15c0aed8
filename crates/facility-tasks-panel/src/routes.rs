/*
[INPUT]:  URL paths requested by the user or the CLI
[OUTPUT]: Resolved page + params, dispatched to page-show actions
[POS]:    Routing shell - path table and navigation entry point
[UPDATE]: When pages are added, renamed or re-pathed
*/

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

use crate::pages;
use crate::store::Store;

const MAX_REDIRECTS: usize = 8;

/// Pages of the facility management panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageName {
    ClassMgmt,
    ClassEditMgmt,
    ClassEnrollMgmt,
    UserMgmt,
    DataExport,
    FacilityConfig,
}

impl PageName {
    pub fn as_str(&self) -> &'static str {
        match self {
            PageName::ClassMgmt => "CLASS_MGMT_PAGE",
            PageName::ClassEditMgmt => "CLASS_EDIT_MGMT_PAGE",
            PageName::ClassEnrollMgmt => "CLASS_ENROLL_MGMT_PAGE",
            PageName::UserMgmt => "USER_MGMT_PAGE",
            PageName::DataExport => "DATA_EXPORT_PAGE",
            PageName::FacilityConfig => "FACILITY_CONFIG_PAGE",
        }
    }
}

impl fmt::Display for PageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteTarget {
    Page(PageName),
    Redirect(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDef {
    pub path: &'static str,
    pub target: RouteTarget,
}

/// Outcome of resolving a path against the table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRoute {
    pub page: PageName,
    pub path: String,
    pub params: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("no route matches path: {0}")]
    NotFound(String),
    #[error("too many redirects starting at: {0}")]
    RedirectLoop(String),
}

#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<RouteDef>,
}

impl RouteTable {
    pub fn new(routes: Vec<RouteDef>) -> Self {
        Self { routes }
    }

    /// The six facility management pages plus the root redirect
    pub fn facility_management() -> Self {
        Self::new(vec![
            RouteDef {
                path: "/classes",
                target: RouteTarget::Page(PageName::ClassMgmt),
            },
            RouteDef {
                path: "/classes/:id",
                target: RouteTarget::Page(PageName::ClassEditMgmt),
            },
            RouteDef {
                path: "/classes/:id/enroll",
                target: RouteTarget::Page(PageName::ClassEnrollMgmt),
            },
            RouteDef {
                path: "/users",
                target: RouteTarget::Page(PageName::UserMgmt),
            },
            RouteDef {
                path: "/data",
                target: RouteTarget::Page(PageName::DataExport),
            },
            RouteDef {
                path: "/configuration",
                target: RouteTarget::Page(PageName::FacilityConfig),
            },
            RouteDef {
                path: "/",
                target: RouteTarget::Redirect("/classes"),
            },
        ])
    }

    pub fn routes(&self) -> &[RouteDef] {
        &self.routes
    }

    /// Resolve a path to a page, following redirects
    pub fn resolve(&self, path: &str) -> Result<ResolvedRoute, RouteError> {
        let mut current = strip_query(path).to_string();

        for _ in 0..=MAX_REDIRECTS {
            let (route, params) = self
                .routes
                .iter()
                .find_map(|route| match_path(route.path, &current).map(|params| (route, params)))
                .ok_or_else(|| RouteError::NotFound(current.clone()))?;

            match route.target {
                RouteTarget::Page(page) => {
                    return Ok(ResolvedRoute {
                        page,
                        path: current,
                        params,
                    });
                }
                RouteTarget::Redirect(to) => current = to.to_string(),
            }
        }

        Err(RouteError::RedirectLoop(path.to_string()))
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::facility_management()
    }
}

/// Resolve `path` and run the page-show action bound to it.
pub fn navigate(store: &Store, table: &RouteTable, path: &str) -> Result<ResolvedRoute, RouteError> {
    let resolved = table.resolve(path)?;
    let id = resolved.params.get("id").map(String::as_str).unwrap_or_default();

    match resolved.page {
        PageName::ClassMgmt => pages::show_classes_page(store),
        PageName::ClassEditMgmt => pages::show_class_edit_page(store, id),
        PageName::ClassEnrollMgmt => pages::show_class_enroll_page(store, id),
        PageName::UserMgmt => pages::show_user_page(store),
        PageName::DataExport => pages::show_data_page(store),
        PageName::FacilityConfig => pages::show_facility_config_page(store),
    }

    tracing::debug!(page = %resolved.page, path = %resolved.path, "navigated");
    Ok(resolved)
}

fn strip_query(path: &str) -> &str {
    path.split(['?', '#']).next().unwrap_or(path)
}

fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|segment| !segment.is_empty()).collect()
}

fn match_path(pattern: &str, path: &str) -> Option<BTreeMap<String, String>> {
    let pattern_segments = segments(pattern);
    let path_segments = segments(path);
    if pattern_segments.len() != path_segments.len() {
        return None;
    }

    let mut params = BTreeMap::new();
    for (expected, actual) in pattern_segments.iter().zip(path_segments) {
        match expected.strip_prefix(':') {
            Some(name) => {
                params.insert(name.to_string(), actual.to_string());
            }
            None if *expected == actual => {}
            None => return None,
        }
    }
    Some(params)
}
