//! Result resolution
//!
//! Reads hand back either decoded entities or raw tuple rows. A resolver
//! post-processes them before they reach the caller.

use std::collections::HashMap;

use serde::Serialize;

use crate::session::value::{DatabaseValue, Row};

/// One row as fetched by the repository
#[derive(Debug, Clone, PartialEq)]
pub enum Fetched<M> {
    /// Row decoded into the record type
    Entity(M),
    /// Undecoded row, kept with its column labels
    Tuple(Row),
}

/// One row as returned to the caller
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResolvedRow<M> {
    Entity(M),
    Mapping(HashMap<String, DatabaseValue>),
}

impl<M> ResolvedRow<M> {
    pub fn as_entity(&self) -> Option<&M> {
        match self {
            ResolvedRow::Entity(entity) => Some(entity),
            ResolvedRow::Mapping(_) => None,
        }
    }

    pub fn into_entity(self) -> Option<M> {
        match self {
            ResolvedRow::Entity(entity) => Some(entity),
            ResolvedRow::Mapping(_) => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&HashMap<String, DatabaseValue>> {
        match self {
            ResolvedRow::Mapping(mapping) => Some(mapping),
            ResolvedRow::Entity(_) => None,
        }
    }

    /// Value of a labelled column in a mapping row
    pub fn get(&self, column: &str) -> Option<&DatabaseValue> {
        self.as_mapping().and_then(|mapping| mapping.get(column))
    }
}

/// Post-processing of fetched rows
pub trait Resolver<M>: Send + Sync {
    fn process_items(&self, items: Vec<Fetched<M>>) -> Vec<ResolvedRow<M>>;

    fn process_item(&self, item: Option<Fetched<M>>) -> Option<ResolvedRow<M>>;
}

/// Entities pass through, tuples become column-keyed maps
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultResolver;

impl DefaultResolver {
    fn resolve<M>(item: Fetched<M>) -> ResolvedRow<M> {
        match item {
            Fetched::Entity(entity) => ResolvedRow::Entity(entity),
            Fetched::Tuple(row) => ResolvedRow::Mapping(row.into_mapping()),
        }
    }
}

impl<M> Resolver<M> for DefaultResolver {
    fn process_items(&self, items: Vec<Fetched<M>>) -> Vec<ResolvedRow<M>> {
        items.into_iter().map(Self::resolve).collect()
    }

    fn process_item(&self, item: Option<Fetched<M>>) -> Option<ResolvedRow<M>> {
        item.map(Self::resolve)
    }
}
