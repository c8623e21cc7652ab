use super::PackageId;
use crate::shared::error::CulpritError;
use crate::shared::Result;
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, BTreeSet};

/// What the graph provider knows about a single package
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyRecord {
    /// Direct imports, in the order the provider reported them
    pub imports: Vec<PackageId>,
    /// Every package reachable through any number of imports, excluding itself
    pub transitive_deps: BTreeSet<PackageId>,
}

impl DependencyRecord {
    pub fn new(imports: Vec<PackageId>, transitive_deps: BTreeSet<PackageId>) -> Self {
        Self {
            imports,
            transitive_deps,
        }
    }

    /// A package the provider reports as having no dependencies at all
    pub fn leaf() -> Self {
        Self::default()
    }
}

/// GraphStore aggregate: the dependency graph of one root package
///
/// Populated once by the builder (or loaded from a snapshot) and read-only
/// afterwards. Every import of every recorded package is expected to have
/// its own record; see [`GraphStore::dangling_imports`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphStore {
    root: PackageId,
    built_at: DateTime<Utc>,
    records: BTreeMap<PackageId, DependencyRecord>,
}

impl GraphStore {
    pub fn new(root: PackageId) -> Self {
        Self::with_built_at(root, Utc::now())
    }

    pub fn with_built_at(root: PackageId, built_at: DateTime<Utc>) -> Self {
        Self {
            root,
            built_at,
            records: BTreeMap::new(),
        }
    }

    /// Idempotent upsert: the first record for a package wins.
    ///
    /// Returns `true` if the record was stored, `false` if the package was
    /// already known and the new record was discarded.
    pub fn insert(&mut self, package: PackageId, record: DependencyRecord) -> bool {
        use std::collections::btree_map::Entry;
        match self.records.entry(package) {
            Entry::Vacant(slot) => {
                slot.insert(record);
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    /// Returns the record for `package`.
    ///
    /// # Errors
    /// `CulpritError::NotFound` when the graph has no record for the package.
    /// That means the graph is incomplete, not that the package has no
    /// dependencies.
    pub fn get(&self, package: &PackageId) -> Result<&DependencyRecord> {
        self.records.get(package).ok_or_else(|| {
            CulpritError::NotFound {
                package: package.to_string(),
            }
            .into()
        })
    }

    pub fn contains(&self, package: &PackageId) -> bool {
        self.records.contains_key(package)
    }

    pub fn root(&self) -> &PackageId {
        &self.root
    }

    pub fn built_at(&self) -> DateTime<Utc> {
        self.built_at
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates over all records in identifier order
    pub fn records(&self) -> impl Iterator<Item = (&PackageId, &DependencyRecord)> {
        self.records.iter()
    }

    /// Lists `(package, import)` pairs whose import has no record
    pub fn dangling_imports(&self) -> Vec<(PackageId, PackageId)> {
        self.records
            .iter()
            .flat_map(|(package, record)| {
                record
                    .imports
                    .iter()
                    .filter(|import| !self.records.contains_key(*import))
                    .map(move |import| (package.clone(), import.clone()))
            })
            .collect()
    }
}
