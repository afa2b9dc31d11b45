//! Alias derivation, relation classification and required-flag relaxation.

use mountgraph_relations::disambiguate::{disambiguate, names_child, shared_base};
use mountgraph_relations::*;
use mountgraph_schema::{Primitive, PropertySpec, PropertyType, Spec, SpecMap};

const CONTAINER: &str = "io.k8s.api.core.v1.Container";
const LABEL_SELECTOR: &str = "io.k8s.apimachinery.pkg.apis.meta.v1.LabelSelector";

fn mounts(id: &str, paths: &[&str]) -> Vec<MountCandidate> {
    paths
        .iter()
        .map(|path| MountCandidate {
            id: id.to_string(),
            path: path.to_string(),
            is_array: false,
        })
        .collect()
}

fn aliases(result: &[(MountCandidate, Alias)]) -> Vec<(&str, &str, bool)> {
    result
        .iter()
        .map(|(m, a)| (m.path.as_str(), a.name.as_str(), a.is_default))
        .collect()
}

// ============================================================================
// Alias derivation
// ============================================================================

#[test]
fn test_shared_base_containers() {
    let result = disambiguate(CONTAINER, mounts(CONTAINER, &["spec.initContainers", "spec.containers"]))
        .expect("disambiguate");

    assert_eq!(
        aliases(&result),
        vec![
            ("spec.containers", "container", true),
            ("spec.initContainers", "init", false),
        ]
    );
}

#[test]
fn test_suffix_default_selectors() {
    let result = disambiguate(
        LABEL_SELECTOR,
        mounts(
            LABEL_SELECTOR,
            &["podSelector", "labelSelector", "objectSelector", "namespaceSelector"],
        ),
    )
    .expect("disambiguate");

    assert_eq!(
        aliases(&result),
        vec![
            ("labelSelector", "labelSelector", true),
            ("namespaceSelector", "namespaceSelector", false),
            ("objectSelector", "objectSelector", false),
            ("podSelector", "podSelector", false),
        ]
    );
    assert_eq!(result.iter().filter(|(_, a)| a.is_default).count(), 1);
}

#[test]
fn test_no_base_and_no_suffix_match_has_no_default() {
    let result = disambiguate(
        LABEL_SELECTOR,
        mounts(LABEL_SELECTOR, &["namespaceSelector", "podSelector"]),
    )
    .expect("disambiguate");
    assert!(result.iter().all(|(_, a)| !a.is_default));
}

#[test]
fn test_prefix_base_strips_leading_name() {
    let result = disambiguate(
        "io.example.v1.Volume",
        mounts("io.example.v1.Volume", &["volumeSource", "volume"]),
    )
    .expect("disambiguate");

    assert_eq!(
        aliases(&result),
        vec![("volume", "volume", true), ("volumeSource", "source", false)]
    );
}

#[test]
fn test_singular_and_plural_mounts_share_one_default() {
    let result = disambiguate("x.v1.Pod", mounts("x.v1.Pod", &["spec.pods", "spec.pod"]))
        .expect("disambiguate");

    assert_eq!(
        aliases(&result),
        vec![("spec.pod", "pod", true), ("spec.pods", "pods", false)]
    );
    assert!(result.iter().all(|(_, a)| !a.name.is_empty()));
}

#[test]
fn test_repeated_child_name_without_base_has_one_default() {
    let result = disambiguate(
        LABEL_SELECTOR,
        mounts(LABEL_SELECTOR, &["podSelector", "labelSelectors", "labelSelector"]),
    )
    .expect("disambiguate");

    assert_eq!(
        aliases(&result),
        vec![
            ("labelSelector", "labelSelector", true),
            ("labelSelectors", "labelSelector", false),
            ("podSelector", "podSelector", false),
        ]
    );
}

#[test]
fn test_mount_path_extending_another_gets_named_alias() {
    let result = disambiguate(CONTAINER, mounts(CONTAINER, &["spec.container.sidecar", "spec.container"]))
        .expect("disambiguate");

    assert_eq!(result.iter().filter(|(_, a)| a.is_default).count(), 1);
    assert!(result.iter().all(|(_, a)| !a.name.is_empty()));
    assert_eq!(result[0].1, Alias::new("container", true));
}

#[test]
fn test_nested_paths_use_distinguishing_slice() {
    let result = disambiguate(
        CONTAINER,
        mounts(
            CONTAINER,
            &["spec.template.spec.containers", "spec.template.spec.initContainers"],
        ),
    )
    .expect("disambiguate");
    assert_eq!(result[0].1, Alias::new("container", true));
    assert_eq!(result[1].1, Alias::new("init", false));
}

#[test]
fn test_single_mount_group_is_degenerate() {
    let err = disambiguate(CONTAINER, mounts(CONTAINER, &["spec.containers"])).unwrap_err();
    assert_eq!(err, RelationError::DegeneratePathDiff { count: 1 });
}

#[test]
fn test_base_and_suffix_helpers() {
    let names = vec!["container".to_string(), "initContainer".to_string()];
    assert_eq!(shared_base(&names), Some("container"));
    let names = vec!["labelSelector".to_string(), "podSelector".to_string()];
    assert_eq!(shared_base(&names), None);
    assert!(names_child(LABEL_SELECTOR, "labelSelector"));
    assert!(!names_child(LABEL_SELECTOR, "selector"));
}

// ============================================================================
// Classification and relaxation
// ============================================================================

fn spec(id: &str, properties: Vec<PropertySpec>) -> Spec {
    let (module, name) = id.rsplit_once('.').unwrap();
    Spec {
        id: id.to_string(),
        name: name.to_string(),
        module: module.to_string(),
        description: String::new(),
        has_meta: false,
        has_kind: false,
        properties,
        spec_key: None,
        gvk: None,
    }
}

fn string(name: &str) -> PropertySpec {
    PropertySpec::new(name, PropertyType::Primitive(Primitive::String))
}

fn reference(name: &str, id: &str) -> PropertySpec {
    PropertySpec::new(name, PropertyType::Reference(id.to_string()))
}

fn pod_specs() -> SpecMap {
    let mut pod = spec(
        "x.v1.Pod",
        vec![
            reference("containers", "x.v1.Container").array().required(),
            reference("initContainers", "x.v1.Container").array(),
            reference("volumes", "x.v1.Volume").array(),
            string("nodeName").required(),
        ],
    );
    pod.spec_key = Some("spec".to_string());
    vec![
        pod,
        spec("x.v1.Container", vec![string("name").required()]),
        spec("x.v1.Volume", vec![string("name").required()]),
        spec(
            "x.v1.PodList",
            vec![
                reference("items", "x.v1.Pod").array(),
                reference("metadata", "x.v1.ListMeta"),
            ],
        ),
        spec("x.v1.ListMeta", vec![string("continue"), string("resourceVersion")]),
    ]
    .into_iter()
    .map(|s| (s.id.clone(), s))
    .collect()
}

#[test]
fn test_straight_and_ambiguous_partition() {
    let mut specs = pod_specs();
    let mut stats = GenerationStats::default();
    let relations = infer_relations(&mut specs, "x.v1.ListMeta", &mut stats).expect("infer");

    let under_pod = relations.for_parent("x.v1.Pod");
    assert_eq!(under_pod.len(), 3);
    assert_eq!(stats.straight, 1);
    assert_eq!(stats.ambiguous_groups, 1);
    assert_eq!(stats.relations, 3);
    assert_eq!(stats.list_specs_skipped, 1);

    let volume = relations.for_child("x.v1.Volume");
    assert_eq!(volume.len(), 1);
    assert_eq!(volume[0].path, "spec.volumes");
    assert!(volume[0].alias.is_none());
    assert!(volume[0].is_array);

    let default = relations.default_for("x.v1.Container", "x.v1.Pod").expect("default");
    assert_eq!(default.path, "spec.containers");
    assert_eq!(default.alias, Some(Alias::new("container", true)));
}

#[test]
fn test_list_spec_is_never_a_parent() {
    let mut specs = pod_specs();
    let relations =
        infer_relations(&mut specs, "x.v1.ListMeta", &mut GenerationStats::default()).expect("infer");
    assert!(relations.for_parent("x.v1.PodList").is_empty());
    assert!(relations.parents().all(|p| p != "x.v1.PodList"));
}

#[test]
fn test_mount_paths_relax_required_flags() {
    let mut specs = pod_specs();
    infer_relations(&mut specs, "x.v1.ListMeta", &mut GenerationStats::default()).expect("infer");

    let pod = &specs["x.v1.Pod"];
    assert!(!pod.property("containers").unwrap().is_required);
    assert!(pod.property("nodeName").unwrap().is_required);
    assert!(specs["x.v1.Container"].property("name").unwrap().is_required);
}

#[test]
fn test_relax_walks_nested_path_and_stops_quietly() {
    let mut specs: SpecMap = vec![
        spec("x.v1.Outer", vec![reference("middle", "x.v1.Middle").required()]),
        spec(
            "x.v1.Middle",
            vec![reference("inner", "x.v1.Inner").required(), string("other").required()],
        ),
        spec("x.v1.Inner", vec![string("leaf").required()]),
    ]
    .into_iter()
    .map(|s| (s.id.clone(), s))
    .collect();

    relax_required(&mut specs, "x.v1.Outer", "middle.inner.leaf.beyond").expect("relax");

    assert!(!specs["x.v1.Outer"].property("middle").unwrap().is_required);
    assert!(!specs["x.v1.Middle"].property("inner").unwrap().is_required);
    assert!(!specs["x.v1.Inner"].property("leaf").unwrap().is_required);
    assert!(specs["x.v1.Middle"].property("other").unwrap().is_required);

    relax_required(&mut specs, "x.v1.Outer", "unknown.segment").expect("unknown segment is ignored");
    assert_eq!(
        relax_required(&mut specs, "x.v1.Missing", "a"),
        Err(RelationError::UnresolvedReference {
            id: "x.v1.Missing".to_string(),
            context: "mount path `a`".to_string(),
        })
    );
}

#[test]
fn test_index_serializes_with_camel_case_fields() {
    let relations = ContextRelations::from_relations(vec![ContextRelation {
        id: CONTAINER.to_string(),
        parent_id: "io.k8s.api.core.v1.PodSpec".to_string(),
        path: "initContainers".to_string(),
        is_array: true,
        alias: Some(Alias::new("init", false)),
    }]);
    let json = serde_json::to_value(&relations).expect("serialize");
    let entry = &json["byChild"][CONTAINER][0];
    assert_eq!(entry["parentId"], "io.k8s.api.core.v1.PodSpec");
    assert_eq!(entry["isArray"], true);
    assert_eq!(entry["alias"]["default"], false);
    assert_eq!(relations.len(), 1);
}
