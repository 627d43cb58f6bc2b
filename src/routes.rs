//! Route aggregation across all generated entities.
//!
//! Aggregation is a barrier stage: it runs only after every entity finished
//! composing, because the default redirect and the guard policy depend on the
//! full batch. Entities that failed generation contribute no entries.

use crate::features::FeatureSet;
use crate::naming::EntityNames;

/// Navigation role of one route entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteRole {
    List,
    Create,
    Edit,
}

/// One navigable entry in the aggregated routing table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry {
    /// Path pattern relative to the application root (`users`, `users/new`,
    /// `users/edit/:id`).
    pub path: String,
    pub role: RouteRole,
    /// Entity type name, used for the lazy-loaded component symbol.
    pub type_name: String,
    /// Entity slug, used for the component folder and file names.
    pub slug: String,
    /// Whether the entry requires an authenticated session.
    pub guarded: bool,
}

impl RouteEntry {
    pub fn is_list(&self) -> bool {
        self.role == RouteRole::List
    }
}

/// The aggregated routing table across every successfully generated entity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteTable {
    /// Three entries per entity, in entity-declaration order.
    pub entries: Vec<RouteEntry>,
    /// Guard policy is global: one authenticated entity guards the batch.
    pub guarded: bool,
    /// Path the empty route redirects to. The first entity's list route, or
    /// `login` when the batch is guarded. Empty when there are no entities.
    pub default_redirect: String,
}

impl RouteTable {
    pub fn aggregate(entities: &[(EntityNames, FeatureSet)]) -> RouteTable {
        let guarded = entities.iter().any(|(_, features)| features.auth);

        let mut entries = Vec::with_capacity(entities.len() * 3);
        for (names, _) in entities {
            let segment = &names.route_segment;
            entries.push(RouteEntry {
                path: segment.clone(),
                role: RouteRole::List,
                type_name: names.type_name.clone(),
                slug: names.slug.clone(),
                guarded,
            });
            entries.push(RouteEntry {
                path: format!("{}/new", segment),
                role: RouteRole::Create,
                type_name: names.type_name.clone(),
                slug: names.slug.clone(),
                guarded,
            });
            entries.push(RouteEntry {
                path: format!("{}/edit/:id", segment),
                role: RouteRole::Edit,
                type_name: names.type_name.clone(),
                slug: names.slug.clone(),
                guarded,
            });
        }

        let default_redirect = if guarded {
            "login".to_string()
        } else {
            entries.first().map(|e| e.path.clone()).unwrap_or_default()
        };

        RouteTable {
            entries,
            guarded,
            default_redirect,
        }
    }
}
