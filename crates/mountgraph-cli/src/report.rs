//! Human-readable output: run summaries and per-spec inspection.

use colored::Colorize;
use mountgraph_relations::{ContextRelation, Generated, GenerationStats};
use mountgraph_schema::{PropertyType, Spec};
use std::fmt::{self, Write};

pub fn summary(stats: &GenerationStats) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(
        &mut out,
        "{} {} definitions → {} resources, {} wrappers collapsed",
        "Generated".green().bold(),
        stats.definitions,
        stats.resources,
        stats.wrappers_collapsed
    )?;
    writeln!(
        &mut out,
        "  relations: {} ({} straight, {} ambiguous groups, {} list specs skipped)",
        stats.relations, stats.straight, stats.ambiguous_groups, stats.list_specs_skipped
    )?;
    Ok(out)
}

/// Renders one spec with its properties and every mount that touches it.
/// `None` if `id` is not a spec in `generated`.
pub fn inspect(generated: &Generated, id: &str) -> Result<Option<String>, fmt::Error> {
    let Some(spec) = generated.specs.get(id) else {
        return Ok(None);
    };
    let mut out = String::new();

    writeln!(&mut out, "{} {}", spec.name.cyan().bold(), spec.module.dimmed())?;
    if !spec.description.is_empty() {
        writeln!(&mut out, "  {}", spec.description)?;
    }
    writeln!(&mut out, "  {}", flags(spec))?;

    writeln!(&mut out, "{}", "properties:".yellow().bold())?;
    for property in &spec.properties {
        let ty = match &property.ty {
            PropertyType::Primitive(p) => p.as_str().to_string(),
            PropertyType::Reference(target) => target.clone(),
            PropertyType::Patched(external) => format!("{} (patched)", external.name),
        };
        let array = if property.is_array { "[]" } else { "" };
        let marker = if property.is_required { "*" } else { " " };
        writeln!(&mut out, "  {marker} {}: {ty}{array}", property.name.bold())?;
    }

    let mounted_in = generated.relations.for_child(id);
    if !mounted_in.is_empty() {
        writeln!(&mut out, "{}", "mounted in:".yellow().bold())?;
        for relation in mounted_in {
            writeln!(&mut out, "  {} @ {}", relation.parent_id, mount(relation)?)?;
        }
    }

    let mounts = generated.relations.for_parent(id);
    if !mounts.is_empty() {
        writeln!(&mut out, "{}", "mounts:".yellow().bold())?;
        for relation in mounts {
            writeln!(&mut out, "  {} @ {}", relation.id, mount(relation)?)?;
        }
    }

    Ok(Some(out))
}

fn flags(spec: &Spec) -> String {
    let mut flags = Vec::new();
    if let Some(gvk) = &spec.gvk {
        flags.push(format!("kind {gvk}"));
    }
    if spec.has_kind {
        flags.push("resource".to_string());
    }
    if spec.has_meta {
        flags.push("metadata".to_string());
    }
    if let Some(key) = &spec.spec_key {
        flags.push(format!("wraps `{key}`"));
    }
    if flags.is_empty() {
        "plain".dimmed().to_string()
    } else {
        flags.join(", ")
    }
}

fn mount(relation: &ContextRelation) -> Result<String, fmt::Error> {
    let mut text = relation.path.clone();
    if relation.is_array {
        text.push_str("[]");
    }
    if let Some(alias) = &relation.alias {
        write!(&mut text, " as {}", alias.name)?;
        if alias.is_default {
            write!(&mut text, " {}", "(default)".green())?;
        }
    }
    Ok(text)
}
