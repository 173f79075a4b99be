//! @acp:module "API Surface"
//! @acp:summary "Element manifests and recursive projection of the visible API"
//! @acp:domain surface
//! @acp:layer service
//!
//! A manifest is the output of some introspection layer: a tree of declared
//! elements with whatever audience and stability markers were found on them.
//! Filtering walks the tree top-down. An excluded element takes its whole
//! subtree with it; children are never evaluated independently of an
//! excluded parent.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{AudienceError, Result};
use crate::visibility::{
    Annotated, Audience, Decision, DecisionStage, ElementFacts, ElementKind, InclusionEvaluator,
    StabilityLevel, VisibilityPolicy,
};

/// @acp:summary "One declared element and its nested declarations"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementNode {
    pub name: String,
    pub kind: ElementKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audience: Option<Audience>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stability: Option<StabilityLevel>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ElementNode>,
}

impl ElementNode {
    pub fn new(name: impl Into<String>, kind: ElementKind) -> Self {
        Self {
            name: name.into(),
            kind,
            audience: None,
            stability: None,
            children: Vec::new(),
        }
    }

    pub fn with_audience(mut self, audience: Audience) -> Self {
        self.audience = Some(audience);
        self
    }

    pub fn with_stability(mut self, stability: StabilityLevel) -> Self {
        self.stability = Some(stability);
        self
    }

    pub fn with_child(mut self, child: ElementNode) -> Self {
        self.children.push(child);
        self
    }

    /// Number of elements in this subtree, including self
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(ElementNode::subtree_len).sum::<usize>()
    }
}

impl Annotated for ElementNode {
    fn facts(&self) -> ElementFacts {
        ElementFacts::new(self.audience, self.stability, self.kind.category())
    }
}

/// @acp:summary "Serialization format of a manifest"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestFormat {
    Json,
    Yaml,
}

impl ManifestFormat {
    /// Pick a format from a file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .as_deref()
        {
            Some("json") => Ok(ManifestFormat::Json),
            Some("yaml") | Some("yml") => Ok(ManifestFormat::Yaml),
            other => Err(AudienceError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}

/// @acp:summary "Collection of top-level elements to filter"
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(rename = "$schema", default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    #[serde(default)]
    pub elements: Vec<ElementNode>,
}

impl Manifest {
    pub fn new(elements: Vec<ElementNode>) -> Self {
        Self {
            schema: None,
            elements,
        }
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let format = ManifestFormat::from_path(path)?;
        let content = std::fs::read_to_string(path)?;
        let manifest = Self::parse(&content, format)?;
        tracing::debug!(
            "Loaded {} top-level elements from {}",
            manifest.elements.len(),
            path.display()
        );
        Ok(manifest)
    }

    pub fn parse(content: &str, format: ManifestFormat) -> Result<Self> {
        Ok(match format {
            ManifestFormat::Json => serde_json::from_str(content)?,
            ManifestFormat::Yaml => serde_yaml::from_str(content)?,
        })
    }

    pub fn element_count(&self) -> usize {
        self.elements.iter().map(ElementNode::subtree_len).sum()
    }
}

/// @acp:summary "Counters gathered while filtering"
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurfaceStats {
    /// Elements that reached the evaluator
    pub evaluated: usize,
    pub included: usize,
    pub excluded: usize,
    /// Elements dropped with an excluded ancestor, never evaluated
    pub pruned: usize,
    /// Verdict count per deciding gate
    pub by_stage: BTreeMap<DecisionStage, usize>,
}

impl SurfaceStats {
    fn record(&mut self, decision: Decision) {
        self.evaluated += 1;
        if decision.included {
            self.included += 1;
        } else {
            self.excluded += 1;
        }
        *self.by_stage.entry(decision.stage).or_insert(0) += 1;
    }

    fn merge(&mut self, other: SurfaceStats) {
        self.evaluated += other.evaluated;
        self.included += other.included;
        self.excluded += other.excluded;
        self.pruned += other.pruned;
        for (stage, count) in other.by_stage {
            *self.by_stage.entry(stage).or_insert(0) += count;
        }
    }
}

/// @acp:summary "Filtered view of a manifest"
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Surface {
    pub generated_at: DateTime<Utc>,
    pub policy: VisibilityPolicy,
    pub stats: SurfaceStats,
    pub elements: Vec<ElementNode>,
}

/// Project a manifest onto the elements the policy admits.
///
/// Top-level elements are filtered in parallel; output order follows the
/// manifest.
pub fn filter_surface(manifest: &Manifest, policy: &VisibilityPolicy) -> Surface {
    let evaluator = InclusionEvaluator::new(*policy);

    let results: Vec<(Option<ElementNode>, SurfaceStats)> = manifest
        .elements
        .par_iter()
        .map(|element| {
            let mut stats = SurfaceStats::default();
            let kept = filter_node(element, &evaluator, &mut stats);
            (kept, stats)
        })
        .collect();

    let mut stats = SurfaceStats::default();
    let mut elements = Vec::new();
    for (kept, partial) in results {
        stats.merge(partial);
        elements.extend(kept);
    }

    tracing::debug!(
        "Filtered surface ({}): {} included, {} excluded, {} pruned",
        policy,
        stats.included,
        stats.excluded,
        stats.pruned
    );

    Surface {
        generated_at: Utc::now(),
        policy: *policy,
        stats,
        elements,
    }
}

fn filter_node(
    node: &ElementNode,
    evaluator: &InclusionEvaluator,
    stats: &mut SurfaceStats,
) -> Option<ElementNode> {
    let decision = evaluator.evaluate(&node.facts());
    stats.record(decision);

    if !decision.included {
        stats.pruned += node.subtree_len() - 1;
        return None;
    }

    let children = node
        .children
        .iter()
        .filter_map(|child| filter_node(child, evaluator, stats))
        .collect();

    Some(ElementNode {
        name: node.name.clone(),
        kind: node.kind,
        audience: node.audience,
        stability: node.stability,
        children,
    })
}

/// @acp:summary "Decision for one evaluated element, keyed by qualified path"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplainedElement {
    /// Dot-joined names from the manifest root
    pub path: String,
    pub kind: ElementKind,
    pub included: bool,
    pub stage: DecisionStage,
    pub reason: String,
}

/// Decision for every evaluated element, in depth-first manifest order
pub fn explain(manifest: &Manifest, policy: &VisibilityPolicy) -> Vec<ExplainedElement> {
    let evaluator = InclusionEvaluator::new(*policy);
    let mut out = Vec::new();
    for element in &manifest.elements {
        explain_node(element, None, &evaluator, &mut out);
    }
    out
}

fn explain_node(
    node: &ElementNode,
    parent: Option<&str>,
    evaluator: &InclusionEvaluator,
    out: &mut Vec<ExplainedElement>,
) {
    let path = match parent {
        Some(parent) => format!("{}.{}", parent, node.name),
        None => node.name.clone(),
    };
    let decision = evaluator.evaluate(&node.facts());

    out.push(ExplainedElement {
        path: path.clone(),
        kind: node.kind,
        included: decision.included,
        stage: decision.stage,
        reason: decision.reason().to_string(),
    });

    if decision.included {
        for child in &node.children {
            explain_node(child, Some(&path), evaluator, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class(name: &str) -> ElementNode {
        ElementNode::new(name, ElementKind::Class)
    }

    fn method(name: &str) -> ElementNode {
        ElementNode::new(name, ElementKind::Method)
    }

    #[test]
    fn test_excluded_parent_prunes_children() {
        let manifest = Manifest::new(vec![class("Internal")
            .with_audience(Audience::Private)
            .with_stability(StabilityLevel::Stable)
            .with_child(
                method("run")
                    .with_audience(Audience::Public)
                    .with_stability(StabilityLevel::Stable),
            )
            .with_child(method("stop"))]);

        let surface = filter_surface(&manifest, &VisibilityPolicy::new());
        assert!(surface.elements.is_empty());
        assert_eq!(surface.stats.evaluated, 1);
        assert_eq!(surface.stats.excluded, 1);
        assert_eq!(surface.stats.pruned, 2);
        assert_eq!(surface.stats.by_stage.get(&DecisionStage::AudienceVeto), Some(&1));
    }

    #[test]
    fn test_included_parent_filters_children() {
        let manifest = Manifest::new(vec![class("Client")
            .with_audience(Audience::Public)
            .with_stability(StabilityLevel::Stable)
            .with_child(method("connect").with_stability(StabilityLevel::Evolving))
            .with_child(method("debugDump").with_audience(Audience::LimitedPrivate))
            .with_child(method("legacy"))]);

        let surface = filter_surface(&manifest, &VisibilityPolicy::new());
        assert_eq!(surface.elements.len(), 1);
        let names: Vec<&str> = surface.elements[0]
            .children
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["connect"]);
        assert_eq!(surface.stats.evaluated, 4);
        assert_eq!(surface.stats.included, 2);
        assert_eq!(surface.stats.excluded, 2);
        assert_eq!(surface.stats.pruned, 0);
    }

    #[test]
    fn test_order_preserved() {
        let elements: Vec<ElementNode> = (0..64)
            .map(|i| {
                class(&format!("Type{i}"))
                    .with_audience(Audience::Public)
                    .with_stability(StabilityLevel::Stable)
            })
            .collect();
        let manifest = Manifest::new(elements.clone());

        let surface = filter_surface(&manifest, &VisibilityPolicy::new());
        assert_eq!(surface.elements, elements);
    }

    #[test]
    fn test_explain_paths() {
        let manifest = Manifest::new(vec![class("Client")
            .with_audience(Audience::Public)
            .with_stability(StabilityLevel::Stable)
            .with_child(method("connect"))]);

        let explained = explain(&manifest, &VisibilityPolicy::new());
        assert_eq!(explained.len(), 2);
        assert_eq!(explained[0].path, "Client");
        assert!(explained[0].included);
        assert_eq!(explained[1].path, "Client.connect");
        assert_eq!(explained[1].stage, DecisionStage::MissingStability);
    }

    #[test]
    fn test_manifest_format_from_path() {
        assert_eq!(
            ManifestFormat::from_path(Path::new("api.json")).unwrap(),
            ManifestFormat::Json
        );
        assert_eq!(
            ManifestFormat::from_path(Path::new("api.YML")).unwrap(),
            ManifestFormat::Yaml
        );
        assert!(ManifestFormat::from_path(Path::new("api.toml")).is_err());
        assert!(ManifestFormat::from_path(Path::new("api")).is_err());
    }

    #[test]
    fn test_parse_yaml_manifest() {
        let yaml = r#"
elements:
  - name: Client
    kind: class
    audience: public
    stability: evolving
    children:
      - name: close
        kind: method
        stability: stable
"#;
        let manifest = Manifest::parse(yaml, ManifestFormat::Yaml).unwrap();
        assert_eq!(manifest.element_count(), 2);
        assert_eq!(manifest.elements[0].audience, Some(Audience::Public));
        assert_eq!(manifest.elements[0].children[0].kind, ElementKind::Method);
    }
}
