//! Alias derivation for ambiguous mount groups.
//!
//! An ambiguous group is every mount candidate under one parent that resolves
//! to the same child spec. Each mount gets a short alias derived from the part
//! of its path that differs from its siblings, and at most one is flagged as
//! the default.

use crate::discovery::MountCandidate;
use crate::error::RelationError;
use crate::naming::{
    depluralize, ends_with_ignore_case, path_diff, starts_with_ignore_case,
    strip_affix_ignore_case, to_camel_identifier,
};
use crate::relations::Alias;

/// Shared base name of a group: the first alias, provided it is a
/// case-insensitive prefix or suffix of every alias in the group.
pub fn shared_base(aliases: &[String]) -> Option<&str> {
    let first = aliases.first()?;
    aliases
        .iter()
        .all(|alias| starts_with_ignore_case(alias, first) || ends_with_ignore_case(alias, first))
        .then_some(first.as_str())
}

/// True when `alias` names the child type itself (`*.LabelSelector` ↔
/// `labelSelector`).
pub fn names_child(child_id: &str, alias: &str) -> bool {
    child_id
        .to_ascii_lowercase()
        .ends_with(&format!(".{}", alias.to_ascii_lowercase()))
}

/// Assigns an alias to every mount of one ambiguous group.
///
/// Output is ordered by mount path. At most one alias is flagged default. Fails with
/// [`RelationError::DegeneratePathDiff`] for groups of fewer than two mounts.
pub fn disambiguate(
    child_id: &str,
    mut group: Vec<MountCandidate>,
) -> Result<Vec<(MountCandidate, Alias)>, RelationError> {
    group.sort_by(|a, b| a.path.cmp(&b.path));

    let paths: Vec<String> = group.iter().map(|m| m.path.clone()).collect();
    let slices = path_diff(&paths)?;
    let names: Vec<String> = slices
        .iter()
        .map(|slice| to_camel_identifier(&depluralize(slice)))
        .collect();

    let aliases: Vec<Alias> = match shared_base(&names) {
        Some(base) => names
            .iter()
            .zip(slices.iter().zip(&paths))
            .enumerate()
            .map(|(index, (name, (slice, path)))| {
                if index == 0 {
                    return Alias::new(name, true);
                }
                let rest = to_camel_identifier(strip_affix_ignore_case(name, base));
                if !rest.is_empty() {
                    return Alias::new(&rest, false);
                }
                // Depluralized onto the base (`pod` vs `pods`): fall back to
                // the undepluralized slice, then the whole path.
                let slice = to_camel_identifier(slice);
                if slice.eq_ignore_ascii_case(base) {
                    Alias::new(&to_camel_identifier(path), false)
                } else {
                    Alias::new(&slice, false)
                }
            })
            .collect(),
        None => {
            let mut default_taken = false;
            names
                .iter()
                .map(|name| {
                    let is_default = !default_taken && names_child(child_id, name);
                    default_taken |= is_default;
                    Alias::new(name, is_default)
                })
                .collect()
        }
    };

    tracing::debug!(
        child = child_id,
        paths = ?paths,
        aliases = ?aliases.iter().map(|a| a.name.as_str()).collect::<Vec<_>>(),
        "disambiguated mount group"
    );

    Ok(group.into_iter().zip(aliases).collect())
}
