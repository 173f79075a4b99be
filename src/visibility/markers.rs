//! @acp:module "Visibility Markers"
//! @acp:summary "Audience and stability markers plus element categories"
//! @acp:domain visibility
//! @acp:layer model
//! @acp:stability stable

use serde::{Deserialize, Serialize};

use crate::error::AudienceError;

/// @acp:summary "Ordered stability level (Unstable < Evolving < Stable)"
///
/// Used both as the marker carried by an element and as the configured
/// threshold. Variant order defines the ordering, so the derived `Ord` is the
/// comparison the stability gate uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StabilityLevel {
    #[default]
    Unstable,
    Evolving,
    Stable,
}

impl StabilityLevel {
    /// All levels, least to most stable
    pub const ALL: [StabilityLevel; 3] = [
        StabilityLevel::Unstable,
        StabilityLevel::Evolving,
        StabilityLevel::Stable,
    ];

    /// Numeric rank: Unstable=0, Evolving=1, Stable=2
    pub fn rank(self) -> u8 {
        match self {
            StabilityLevel::Unstable => 0,
            StabilityLevel::Evolving => 1,
            StabilityLevel::Stable => 2,
        }
    }

    /// True if this level is at least as stable as `threshold`
    pub fn satisfies(self, threshold: StabilityLevel) -> bool {
        self.rank() >= threshold.rank()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StabilityLevel::Unstable => "unstable",
            StabilityLevel::Evolving => "evolving",
            StabilityLevel::Stable => "stable",
        }
    }
}

impl std::str::FromStr for StabilityLevel {
    type Err = AudienceError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        // Accept the doclet-style switch spelling too ("-stable")
        match s.trim().trim_start_matches('-').to_lowercase().as_str() {
            "unstable" => Ok(StabilityLevel::Unstable),
            "evolving" => Ok(StabilityLevel::Evolving),
            "stable" => Ok(StabilityLevel::Stable),
            _ => Err(AudienceError::UnknownStability(s.to_string())),
        }
    }
}

impl std::fmt::Display for StabilityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// @acp:summary "Intended audience of an element"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Audience {
    /// Anyone may depend on the element
    Public,
    /// Only named consumers may depend on the element
    LimitedPrivate,
    /// Internal to the declaring project
    Private,
}

impl Audience {
    /// Private and LimitedPrivate veto inclusion outright
    pub fn is_restricted(self) -> bool {
        matches!(self, Audience::LimitedPrivate | Audience::Private)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Audience::Public => "public",
            Audience::LimitedPrivate => "limited-private",
            Audience::Private => "private",
        }
    }
}

impl std::str::FromStr for Audience {
    type Err = AudienceError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "public" => Ok(Audience::Public),
            "limited-private" | "limited_private" | "limitedprivate" => {
                Ok(Audience::LimitedPrivate)
            }
            "private" => Ok(Audience::Private),
            _ => Err(AudienceError::UnknownAudience(s.to_string())),
        }
    }
}

impl std::fmt::Display for Audience {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// @acp:summary "Coarse element classification used by strict mode"
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ElementCategory {
    /// Class or interface declaration
    TypeLike,
    /// Method, field, package and everything else
    #[default]
    Other,
}

impl ElementCategory {
    pub fn is_type_like(self) -> bool {
        self == ElementCategory::TypeLike
    }
}

/// @acp:summary "Declaration kind as reported by an introspection layer"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ElementKind {
    Package,
    Module,
    Class,
    Interface,
    Enum,
    Record,
    AnnotationType,
    Constructor,
    Method,
    Field,
    EnumConstant,
    Parameter,
    Other,
}

impl ElementKind {
    /// Classes, interfaces and their specialised forms are type-like
    pub fn category(self) -> ElementCategory {
        match self {
            ElementKind::Class
            | ElementKind::Interface
            | ElementKind::Enum
            | ElementKind::Record
            | ElementKind::AnnotationType => ElementCategory::TypeLike,
            _ => ElementCategory::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ElementKind::Package => "package",
            ElementKind::Module => "module",
            ElementKind::Class => "class",
            ElementKind::Interface => "interface",
            ElementKind::Enum => "enum",
            ElementKind::Record => "record",
            ElementKind::AnnotationType => "annotation-type",
            ElementKind::Constructor => "constructor",
            ElementKind::Method => "method",
            ElementKind::Field => "field",
            ElementKind::EnumConstant => "enum-constant",
            ElementKind::Parameter => "parameter",
            ElementKind::Other => "other",
        }
    }
}

impl std::str::FromStr for ElementKind {
    type Err = AudienceError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('_', "-");
        match normalized.as_str() {
            "package" => Ok(ElementKind::Package),
            "module" => Ok(ElementKind::Module),
            "class" => Ok(ElementKind::Class),
            "interface" => Ok(ElementKind::Interface),
            "enum" => Ok(ElementKind::Enum),
            "record" => Ok(ElementKind::Record),
            "annotation-type" | "annotation" => Ok(ElementKind::AnnotationType),
            "constructor" => Ok(ElementKind::Constructor),
            "method" => Ok(ElementKind::Method),
            "field" => Ok(ElementKind::Field),
            "enum-constant" => Ok(ElementKind::EnumConstant),
            "parameter" => Ok(ElementKind::Parameter),
            "other" => Ok(ElementKind::Other),
            _ => Err(AudienceError::UnknownKind(s.to_string())),
        }
    }
}

impl std::fmt::Display for ElementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// @acp:summary "Annotation facts for one element, as seen by the evaluator"
///
/// Populated by whatever layer introspects declarations. `None` means the
/// marker is absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementFacts {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audience: Option<Audience>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stability: Option<StabilityLevel>,
    #[serde(default)]
    pub category: ElementCategory,
}

impl ElementFacts {
    pub fn new(
        audience: Option<Audience>,
        stability: Option<StabilityLevel>,
        category: ElementCategory,
    ) -> Self {
        Self {
            audience,
            stability,
            category,
        }
    }

    /// Unannotated class or interface
    pub fn type_like() -> Self {
        Self::new(None, None, ElementCategory::TypeLike)
    }

    /// Unannotated method, field or other member
    pub fn member() -> Self {
        Self::new(None, None, ElementCategory::Other)
    }

    pub fn with_audience(mut self, audience: Audience) -> Self {
        self.audience = Some(audience);
        self
    }

    pub fn with_stability(mut self, stability: StabilityLevel) -> Self {
        self.stability = Some(stability);
        self
    }

    /// Build facts from every marker instance found on an element.
    ///
    /// An element should carry at most one marker of each kind. When it
    /// carries more, the first one wins and a warning is logged.
    pub fn from_markers(
        audiences: &[Audience],
        stabilities: &[StabilityLevel],
        category: ElementCategory,
    ) -> Self {
        if audiences.len() > 1 {
            tracing::warn!(
                "Element carries {} audience markers, using '{}'",
                audiences.len(),
                audiences[0]
            );
        }
        if stabilities.len() > 1 {
            tracing::warn!(
                "Element carries {} stability markers, using '{}'",
                stabilities.len(),
                stabilities[0]
            );
        }

        Self::new(
            audiences.first().copied(),
            stabilities.first().copied(),
            category,
        )
    }
}
