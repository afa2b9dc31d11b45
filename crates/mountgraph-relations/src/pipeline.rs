//! End-to-end generation: definitions → specs → context relations.

use crate::disambiguate::disambiguate;
use crate::discovery::{discover, MountCandidate};
use crate::error::RelationError;
use crate::relations::{Alias, ContextRelation, ContextRelations};
use mountgraph_schema::{normalize, Definitions, ModelConfig, SpecMap};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationStats {
    pub definitions: usize,
    pub resources: usize,
    pub with_meta: usize,
    pub wrappers_collapsed: usize,
    pub list_specs_skipped: usize,
    pub relations: usize,
    pub straight: usize,
    pub ambiguous_groups: usize,
}

/// Both artifacts handed to the emitter, plus run statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Generated {
    pub specs: SpecMap,
    pub relations: ContextRelations,
    pub stats: GenerationStats,
}

/// Runs the whole pipeline. Pure: the same input always yields the same output.
pub fn generate(definitions: &Definitions, config: &ModelConfig) -> Result<Generated, RelationError> {
    let mut specs = normalize(definitions, config)?;
    let mut stats = GenerationStats {
        definitions: definitions.len(),
        resources: specs.values().filter(|s| s.has_kind).count(),
        with_meta: specs.values().filter(|s| s.has_meta).count(),
        wrappers_collapsed: specs.values().filter(|s| s.spec_key.is_some()).count(),
        ..GenerationStats::default()
    };

    let relations = infer_relations(&mut specs, &config.list_meta_id, &mut stats)?;

    tracing::info!(
        definitions = stats.definitions,
        resources = stats.resources,
        relations = stats.relations,
        ambiguous_groups = stats.ambiguous_groups,
        "generated context relations"
    );

    Ok(Generated {
        specs,
        relations,
        stats,
    })
}

/// Discovers and classifies the mounts of every spec.
///
/// Specs referencing `list_meta_id` are list resources and never act as
/// parents. Besides building the index, this relaxes `is_required` along
/// every mount path (see [`relax_required`]).
pub fn infer_relations(
    specs: &mut SpecMap,
    list_meta_id: &str,
    stats: &mut GenerationStats,
) -> Result<ContextRelations, RelationError> {
    let parent_ids: Vec<String> = specs.keys().cloned().collect();
    let mut relations = ContextRelations::default();

    for parent_id in &parent_ids {
        let parent = specs
            .get(parent_id)
            .ok_or_else(|| RelationError::UnresolvedReference {
                id: parent_id.clone(),
                context: "relation inference".to_string(),
            })?;
        if parent.references(list_meta_id) {
            tracing::trace!(parent = %parent_id, "skipping list spec");
            stats.list_specs_skipped += 1;
            continue;
        }

        let candidates = discover(parent, specs).collect::<Result<Vec<_>, _>>()?;
        if candidates.is_empty() {
            continue;
        }

        let mut groups: BTreeMap<String, Vec<MountCandidate>> = BTreeMap::new();
        for candidate in candidates {
            relax_required(specs, parent_id, &candidate.path)?;
            groups.entry(candidate.id.clone()).or_default().push(candidate);
        }

        for (child_id, group) in groups {
            if group.len() == 1 {
                for mount in group {
                    relations.insert(relation(parent_id, mount, None));
                    stats.straight += 1;
                }
                continue;
            }

            stats.ambiguous_groups += 1;
            for (mount, alias) in disambiguate(&child_id, group)? {
                relations.insert(relation(parent_id, mount, Some(alias)));
            }
        }
    }

    stats.relations = relations.len();
    Ok(relations)
}

fn relation(parent_id: &str, mount: MountCandidate, alias: Option<Alias>) -> ContextRelation {
    ContextRelation {
        id: mount.id,
        parent_id: parent_id.to_string(),
        path: mount.path,
        is_array: mount.is_array,
        alias,
    }
}

/// Marks every property along `path` (from `parent_id`) as optional.
///
/// The parent's own `spec_key` segment is skipped. The walk stops quietly at
/// the first segment that is not a property, or whose property does not lead
/// to another known spec.
pub fn relax_required(specs: &mut SpecMap, parent_id: &str, path: &str) -> Result<(), RelationError> {
    let parent = specs
        .get(parent_id)
        .ok_or_else(|| RelationError::UnresolvedReference {
            id: parent_id.to_string(),
            context: format!("mount path `{path}`"),
        })?;

    let mut segments = path.split('.').peekable();
    if let Some(key) = parent.spec_key.as_deref() {
        if segments.peek() == Some(&key) {
            segments.next();
        }
    }

    let mut current = parent_id.to_string();
    for segment in segments {
        let Some(property) = specs.get_mut(&current).and_then(|spec| spec.property_mut(segment)) else {
            break;
        };
        property.is_required = false;
        match property.reference() {
            Some(next) => current = next.to_string(),
            None => break,
        }
    }
    Ok(())
}
