use super::tables::{get_table, ALL_TABLES};
use super::types::TableSchema;
use std::collections::{HashMap, HashSet, VecDeque};

/// Resolves which tables an include or exclude list implies.
///
/// The catalog lists parents before children, so a selection is always
/// returned in catalog order and that order is checked rather than computed.
pub struct DependencyResolver {
    /// Table name -> tables it references
    parents: HashMap<&'static str, HashSet<&'static str>>,
}

impl DependencyResolver {
    pub fn new() -> Self {
        let parents = ALL_TABLES
            .iter()
            .map(|table| (table.name, table.dependencies()))
            .collect();

        Self { parents }
    }

    /// Requested tables plus every table they reference, transitively
    pub fn resolve_includes(
        &self,
        requested: &[&str],
    ) -> Result<Vec<&'static TableSchema>, String> {
        let mut selected: HashSet<&str> = HashSet::new();
        let mut pending: VecDeque<&str> = requested.iter().copied().collect();

        while let Some(name) = pending.pop_front() {
            let Some(table) = get_table(name) else {
                return Err(format!("Unknown table: {}", name));
            };
            if !selected.insert(table.name) {
                continue;
            }
            if let Some(parents) = self.parents.get(table.name) {
                pending.extend(parents.iter().filter(|p| !selected.contains(*p)));
            }
        }

        self.in_catalog_order(&selected)
    }

    /// Every table except the excluded ones and anything referencing them
    pub fn resolve_excludes(&self, excluded: &[&str]) -> Result<Vec<&'static TableSchema>, String> {
        if let Some(unknown) = excluded.iter().find(|name| get_table(name).is_none()) {
            return Err(format!("Unknown table: {}", unknown));
        }

        let mut dropped: HashSet<&str> = excluded.iter().copied().collect();
        for table in ALL_TABLES {
            let orphaned = self
                .parents
                .get(table.name)
                .is_some_and(|parents| parents.iter().any(|p| dropped.contains(p)));
            if orphaned {
                dropped.insert(table.name);
            }
        }

        let kept: HashSet<&str> = ALL_TABLES
            .iter()
            .map(|t| t.name)
            .filter(|name| !dropped.contains(name))
            .collect();

        self.in_catalog_order(&kept)
    }

    pub fn all_tables_ordered(&self) -> Vec<&'static TableSchema> {
        ALL_TABLES.to_vec()
    }

    fn in_catalog_order(&self, names: &HashSet<&str>) -> Result<Vec<&'static TableSchema>, String> {
        let mut created: HashSet<&str> = HashSet::new();
        let mut ordered = Vec::with_capacity(names.len());

        for table in ALL_TABLES.iter().filter(|t| names.contains(t.name)) {
            if let Some(parents) = self.parents.get(table.name) {
                if let Some(late) = parents
                    .iter()
                    .find(|p| **p != table.name && names.contains(*p) && !created.contains(*p))
                {
                    return Err(format!("Table {} is listed before its parent {}", table.name, late));
                }
            }
            created.insert(table.name);
            ordered.push(*table);
        }

        Ok(ordered)
    }
}

impl Default for DependencyResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(tables: &[&TableSchema]) -> Vec<&'static str> {
        tables.iter().map(|t| t.name).collect()
    }

    #[test]
    fn test_catalog_lists_parents_first() {
        let resolver = DependencyResolver::new();
        let all: HashSet<&str> = ALL_TABLES.iter().map(|t| t.name).collect();
        assert_eq!(resolver.in_catalog_order(&all).unwrap().len(), ALL_TABLES.len());
    }

    #[test]
    fn test_resolve_detail_includes_parents() {
        let resolver = DependencyResolver::new();
        let tables = resolver.resolve_includes(&["rainfall_stations"]).unwrap();

        assert_eq!(names(&tables), vec!["systems", "stations", "rainfall_stations"]);
    }

    #[test]
    fn test_resolve_keeps_catalog_order() {
        let resolver = DependencyResolver::new();
        let tables = resolver
            .resolve_includes(&["soil_moisture_stations", "hydrology_stations"])
            .unwrap();

        assert_eq!(
            names(&tables),
            vec!["systems", "stations", "hydrology_stations", "soil_moisture_stations"]
        );
    }

    #[test]
    fn test_exclude_parent_drops_children() {
        let resolver = DependencyResolver::new();
        assert_eq!(names(&resolver.resolve_excludes(&["stations"]).unwrap()), vec!["systems"]);

        let tables = resolver.resolve_excludes(&["evaporation_stations"]).unwrap();
        let names = names(&tables);
        assert!(!names.contains(&"evaporation_stations"));
        assert!(names.contains(&"water_quality_stations"));
        assert_eq!(names.len(), ALL_TABLES.len() - 1);
    }

    #[test]
    fn test_unknown_table_error() {
        let resolver = DependencyResolver::new();
        assert!(resolver.resolve_includes(&["nonexistent"]).is_err());
        assert!(resolver.resolve_excludes(&["nonexistent"]).is_err());
    }
}
