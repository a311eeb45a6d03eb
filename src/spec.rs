//! Workspace description supplied by the caller
//!
//! A `WorkspaceSpec` can be built in code or read from JSON or TOML:
//!
//! ```toml
//! workspaceType = "collaborative"
//! areaCategory = "medium"
//! equipment = ["whiteboard", { workstations = 8 }]
//! physicalConsiderations = ["back-pain"]
//! ```

use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading a workspace spec
#[derive(Error, Debug)]
pub enum SpecError {
    #[error("Failed to read workspace spec: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse workspace spec JSON: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Failed to parse workspace spec TOML: {0}")]
    TomlError(#[from] toml::de::Error),
}

/// Workspace classification driving which zone recipe applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WorkspaceType {
    Individual,
    Collaborative,
    Hybrid,
}

impl fmt::Display for WorkspaceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkspaceType::Individual => write!(f, "individual"),
            WorkspaceType::Collaborative => write!(f, "collaborative"),
            WorkspaceType::Hybrid => write!(f, "hybrid"),
        }
    }
}

/// Canonical floor-area categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AreaCategory {
    Small,
    Medium,
    Large,
}

impl AreaCategory {
    pub const ALL: [AreaCategory; 3] = [AreaCategory::Small, AreaCategory::Medium, AreaCategory::Large];
}

impl fmt::Display for AreaCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AreaCategory::Small => write!(f, "small"),
            AreaCategory::Medium => write!(f, "medium"),
            AreaCategory::Large => write!(f, "large"),
        }
    }
}

/// Requested floor area: a category or explicit room dimensions in meters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Area {
    Category(AreaCategory),
    Explicit { width: f64, length: f64 },
}

impl From<AreaCategory> for Area {
    fn from(category: AreaCategory) -> Self {
        Area::Category(category)
    }
}

/// Equipment the user asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Equipment {
    AdjustableDesk,
    MonitorArm,
    ExtraMonitor,
    Footrest,
    ErgoKeyboard,
    ErgoMouse,
    TaskLighting,
    Storage,
    Whiteboard,
    /// Requested number of desks
    Workstations(u32),
}

/// Ergonomic concerns; they shape the template, never the placement formulas
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PhysicalConsideration {
    BackPain,
    WristStrain,
    NeckPain,
    EyeStrain,
    LimitedMobility,
    PreferStanding,
}

/// Everything the engine needs to know about the workspace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceSpec {
    pub workspace_type: WorkspaceType,
    pub area_category: Area,
    #[serde(default)]
    pub equipment: BTreeSet<Equipment>,
    #[serde(default)]
    pub physical_considerations: BTreeSet<PhysicalConsideration>,
}

impl WorkspaceSpec {
    /// Create a spec with no equipment or physical considerations
    pub fn new(workspace_type: WorkspaceType, area: impl Into<Area>) -> Self {
        Self {
            workspace_type,
            area_category: area.into(),
            equipment: BTreeSet::new(),
            physical_considerations: BTreeSet::new(),
        }
    }

    /// Create a spec with explicit room dimensions
    pub fn with_dimensions(workspace_type: WorkspaceType, width: f64, length: f64) -> Self {
        Self::new(workspace_type, Area::Explicit { width, length })
    }

    /// Add an equipment tag
    pub fn with_equipment(mut self, equipment: Equipment) -> Self {
        self.equipment.insert(equipment);
        self
    }

    /// Add a physical consideration tag
    pub fn with_consideration(mut self, consideration: PhysicalConsideration) -> Self {
        self.physical_considerations.insert(consideration);
        self
    }

    pub fn has_equipment(&self, equipment: Equipment) -> bool {
        self.equipment.contains(&equipment)
    }

    pub fn has_consideration(&self, consideration: PhysicalConsideration) -> bool {
        self.physical_considerations.contains(&consideration)
    }

    /// Largest requested desk count, if any
    pub fn requested_workstations(&self) -> Option<u32> {
        self.equipment
            .iter()
            .filter_map(|e| match e {
                Equipment::Workstations(n) => Some(*n),
                _ => None,
            })
            .max()
    }

    pub fn from_json(content: &str) -> Result<Self, SpecError> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn from_toml(content: &str) -> Result<Self, SpecError> {
        Ok(toml::from_str(content)?)
    }

    /// Parse JSON when the content looks like an object, TOML otherwise
    pub fn parse(content: &str) -> Result<Self, SpecError> {
        if content.trim_start().starts_with('{') {
            Self::from_json(content)
        } else {
            Self::from_toml(content)
        }
    }

    /// Load a spec file; `.toml` files are read as TOML, everything else as JSON
    pub fn from_file(path: &Path) -> Result<Self, SpecError> {
        let content = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::from_toml(&content),
            Some("json") => Self::from_json(&content),
            _ => Self::parse(&content),
        }
    }

    pub fn to_json(&self) -> Result<String, SpecError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
