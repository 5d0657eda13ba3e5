//! Intermediate representation of a generated constants class.
//!
//! Generation builds a [`GeneratedClass`] first and hands it to the
//! [`emitter`](crate::emitter) afterwards, so "which constants exist" stays
//! separate from "how they are written out".

use crate::error::GenerateResult;
use crate::ident::normalize;

/// Which of the generated classes a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassKind {
    Tags,
    Layers,
    Scenes,
    Resources,
}

impl ClassKind {
    /// All kinds in the order they are generated.
    pub const ALL: [ClassKind; 4] = [
        ClassKind::Tags,
        ClassKind::Layers,
        ClassKind::Scenes,
        ClassKind::Resources,
    ];

    /// Lowercase name used in logs and configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            ClassKind::Tags => "tags",
            ClassKind::Layers => "layers",
            ClassKind::Scenes => "scenes",
            ClassKind::Resources => "resources",
        }
    }
}

/// Value of a single constant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstantValue {
    /// `public const string`.
    Str(String),
    /// `public const int`.
    Int(i32),
}

/// One constant in a generated class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    /// Normalized constant name.
    pub identifier: String,
    /// Literal value.
    pub value: ConstantValue,
}

impl Member {
    /// A string constant whose value is the raw name itself.
    pub fn named(raw: &str) -> GenerateResult<Self> {
        Self::string(raw, raw)
    }

    /// A string constant named after `raw` holding an explicit value.
    pub fn string(raw: &str, value: impl Into<String>) -> GenerateResult<Self> {
        Ok(Self {
            identifier: normalize(raw)?,
            value: ConstantValue::Str(value.into()),
        })
    }

    /// An int constant named after `raw`.
    pub fn int(raw: &str, value: i32) -> GenerateResult<Self> {
        Ok(Self {
            identifier: normalize(raw)?,
            value: ConstantValue::Int(value),
        })
    }
}

/// A fully resolved class ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedClass {
    /// Static class name, e.g. `Tags`.
    pub class_name: String,
    /// Enclosing namespace.
    pub namespace: String,
    /// What the class holds; layers also get the mask helpers.
    pub kind: ClassKind,
    /// Constants in discovery order.
    pub members: Vec<Member>,
}

impl GeneratedClass {
    /// Create an empty class.
    pub fn new(class_name: impl Into<String>, namespace: impl Into<String>, kind: ClassKind) -> Self {
        Self {
            class_name: class_name.into(),
            namespace: namespace.into(),
            kind,
            members: Vec::new(),
        }
    }

    /// Builder-style member list.
    pub fn with_members(mut self, members: Vec<Member>) -> Self {
        self.members = members;
        self
    }

    /// Whether this class carries the layer mask helpers.
    pub fn has_layer_helpers(&self) -> bool {
        self.kind == ClassKind::Layers
    }
}

/// Derive the class name from an output file name (`Tags.cs` -> `Tags`).
pub fn class_name_for(file_name: &str) -> &str {
    file_name.strip_suffix(".cs").unwrap_or(file_name)
}
