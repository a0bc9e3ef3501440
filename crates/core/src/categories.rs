//! Grouping of the flat YAPI menu listing into named categories.

use std::collections::{HashMap, HashSet};

use serde::Deserialize;

use crate::error::SelectionError;
use crate::interface::InterfaceSummary;

/// Category name used for entries without one.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// One element of the `interface/list_menu` payload.
///
/// Either a category (with `list`) or a loose interface (without).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MenuEntry {
    /// Category id, or interface id for a loose entry
    #[serde(rename = "_id", default)]
    pub id: u64,
    /// Category name
    #[serde(default)]
    pub name: Option<String>,
    /// Interface title of a loose entry
    #[serde(default)]
    pub title: Option<String>,
    /// Interface path of a loose entry
    #[serde(default)]
    pub path: Option<String>,
    /// Interface method of a loose entry
    #[serde(default)]
    pub method: Option<String>,
    /// Interfaces of a category
    #[serde(default)]
    pub list: Option<Vec<MenuInterface>>,
}

/// An interface inside a menu category.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MenuInterface {
    /// Interface id
    #[serde(rename = "_id", default)]
    pub id: u64,
    /// Display title
    #[serde(default)]
    pub title: Option<String>,
    /// Request path
    #[serde(default)]
    pub path: Option<String>,
    /// HTTP method
    #[serde(default)]
    pub method: Option<String>,
}

/// A named group of interface summaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceCategory {
    /// Category name, never empty
    pub name: String,
    /// Interfaces in listing order
    pub interfaces: Vec<InterfaceSummary>,
}

/// Caller selection over the category index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Every interface, in listing order
    All,
    /// Every interface of the named categories, in listing order
    Categories(Vec<String>),
    /// The given interfaces, in the given order
    Ids(Vec<u64>),
}

fn summary(
    id: u64,
    title: Option<&String>,
    path: Option<&String>,
    method: Option<&String>,
    category_name: &str,
) -> InterfaceSummary {
    InterfaceSummary {
        id,
        title: title.cloned().unwrap_or_default(),
        path: path.cloned().unwrap_or_default(),
        method: method.cloned().unwrap_or_default(),
        category_name: category_name.to_string(),
    }
}

/// Group a menu listing into categories.
///
/// Categories keep first-seen order and same-named ones are merged. Loose
/// interfaces end up in `Uncategorized`, appended at the end unless a category
/// of that name already exists.
pub fn index_categories(menu: &[MenuEntry]) -> Vec<InterfaceCategory> {
    let mut categories: Vec<InterfaceCategory> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut loose: Vec<InterfaceSummary> = Vec::new();

    for entry in menu {
        let Some(list) = &entry.list else {
            loose.push(summary(
                entry.id,
                entry.title.as_ref(),
                entry.path.as_ref(),
                entry.method.as_ref(),
                UNCATEGORIZED,
            ));
            continue;
        };

        let name = entry
            .name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(UNCATEGORIZED);
        let interfaces = list.iter().map(|item| {
            summary(
                item.id,
                item.title.as_ref(),
                item.path.as_ref(),
                item.method.as_ref(),
                name,
            )
        });

        let index = *positions.entry(name.to_string()).or_insert_with(|| {
            categories.push(InterfaceCategory {
                name: name.to_string(),
                interfaces: Vec::new(),
            });
            categories.len() - 1
        });
        categories[index].interfaces.extend(interfaces);
    }

    if !loose.is_empty() {
        match positions.get(UNCATEGORIZED) {
            Some(&index) => categories[index].interfaces.extend(loose),
            None => categories.push(InterfaceCategory {
                name: UNCATEGORIZED.to_string(),
                interfaces: loose,
            }),
        }
    }

    categories
}

/// Resolve a selection into the summaries to generate.
///
/// `All` and `Categories` keep listing order. `Ids` keeps the order given,
/// dropping repeated ids.
pub fn select(
    categories: &[InterfaceCategory],
    selection: &Selection,
) -> Result<Vec<InterfaceSummary>, SelectionError> {
    let all = categories.iter().flat_map(|category| category.interfaces.iter());

    match selection {
        Selection::All => Ok(all.cloned().collect()),
        Selection::Categories(names) => {
            if let Some(unknown) = names
                .iter()
                .find(|name| !categories.iter().any(|category| &category.name == *name))
            {
                return Err(SelectionError::UnknownCategory(unknown.clone()));
            }
            Ok(categories
                .iter()
                .filter(|category| names.contains(&category.name))
                .flat_map(|category| category.interfaces.iter().cloned())
                .collect())
        }
        Selection::Ids(ids) => {
            let by_id: HashMap<u64, &InterfaceSummary> = all.map(|s| (s.id, s)).collect();
            let mut seen = HashSet::new();
            ids.iter()
                .filter(|id| seen.insert(**id))
                .map(|id| {
                    by_id
                        .get(id)
                        .map(|summary| (*summary).clone())
                        .ok_or(SelectionError::UnknownInterface(*id))
                })
                .collect()
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn menu(json: &str) -> Vec<MenuEntry> {
        serde_json::from_str(json).unwrap()
    }

    fn ids(summaries: &[InterfaceSummary]) -> Vec<u64> {
        summaries.iter().map(|s| s.id).collect()
    }

    const LISTING: &str = r#"[
        {"_id": 1, "name": "user", "list": [
            {"_id": 10, "title": "Get user", "path": "/api/user/get", "method": "GET"},
            {"_id": 11, "title": "List users", "path": "/api/user/list", "method": "GET"}
        ]},
        {"_id": 50, "title": "Ping", "path": "/ping", "method": "GET"},
        {"_id": 2, "name": "", "list": [
            {"_id": 20, "title": "Upload", "path": "/upload", "method": "POST"}
        ]},
        {"_id": 3, "name": "order", "list": [
            {"_id": 30, "title": "Create order", "path": "/api/order", "method": "POST"}
        ]},
        {"_id": 4, "name": "user", "list": [
            {"_id": 12, "title": "Delete user", "path": "/api/user/delete", "method": "DELETE"}
        ]}
    ]"#;

    #[test]
    fn test_index_groups_and_merges() {
        let categories = index_categories(&menu(LISTING));
        let names: Vec<_> = categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["user", UNCATEGORIZED, "order"]);

        assert_eq!(ids(&categories[0].interfaces), vec![10, 11, 12]);
        assert!(categories[0].interfaces.iter().all(|s| s.category_name == "user"));

        // nameless category first, then the loose interface
        assert_eq!(ids(&categories[1].interfaces), vec![20, 50]);
        assert!(
            categories[1]
                .interfaces
                .iter()
                .all(|s| s.category_name == UNCATEGORIZED)
        );
    }

    #[test]
    fn test_loose_interfaces_trail() {
        let categories = index_categories(&menu(
            r#"[{"_id": 9, "title": "Ping", "path": "/ping", "method": "GET"},
                {"_id": 1, "name": "user", "list": []}]"#,
        ));
        let names: Vec<_> = categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["user", UNCATEGORIZED]);
        assert!(categories[0].interfaces.is_empty());
        assert_eq!(categories[1].interfaces[0].path, "/ping");
    }

    #[test]
    fn test_null_fields_tolerated() {
        let categories = index_categories(&menu(
            r#"[{"_id": 1, "name": null, "list": [{"_id": 2, "title": null}]}]"#,
        ));
        assert_eq!(categories[0].name, UNCATEGORIZED);
        assert_eq!(categories[0].interfaces[0].title, "");
    }

    #[test]
    fn test_select_all_keeps_listing_order() {
        let categories = index_categories(&menu(LISTING));
        let selected = select(&categories, &Selection::All).unwrap();
        assert_eq!(ids(&selected), vec![10, 11, 12, 20, 50, 30]);
    }

    #[test]
    fn test_select_categories() {
        let categories = index_categories(&menu(LISTING));
        let selected = select(
            &categories,
            &Selection::Categories(vec!["order".into(), "user".into()]),
        )
        .unwrap();
        assert_eq!(ids(&selected), vec![10, 11, 12, 30]);

        let err = select(&categories, &Selection::Categories(vec!["nope".into()])).unwrap_err();
        assert_eq!(err, SelectionError::UnknownCategory("nope".into()));
    }

    #[test]
    fn test_select_ids_in_given_order() {
        let categories = index_categories(&menu(LISTING));
        let selected = select(&categories, &Selection::Ids(vec![30, 10, 30])).unwrap();
        assert_eq!(ids(&selected), vec![30, 10]);

        let err = select(&categories, &Selection::Ids(vec![10, 999])).unwrap_err();
        assert_eq!(err, SelectionError::UnknownInterface(999));
    }
}
