use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Filter domain for projects. The backend compares case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    Solar,
    Wind,
    Hydroelectric,
}

impl ProjectType {
    pub const ALL: [Self; 3] = [Self::Solar, Self::Wind, Self::Hydroelectric];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Solar => "solar",
            Self::Wind => "wind",
            Self::Hydroelectric => "hydroelectric",
        }
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Solar),
            1 => Some(Self::Wind),
            2 => Some(Self::Hydroelectric),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Self::Solar => 0,
            Self::Wind => 1,
            Self::Hydroelectric => 2,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "solar" => Some(Self::Solar),
            "wind" => Some(Self::Wind),
            "hydroelectric" => Some(Self::Hydroelectric),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Solar => "Solar",
            Self::Wind => "Wind",
            Self::Hydroelectric => "Hydroelectric",
        }
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectType {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| StoreError::InvalidProjectType(s.to_string()))
    }
}

/// Label for an optional filter, `None` meaning every type.
pub fn filter_label(filter: Option<ProjectType>) -> &'static str {
    filter.map_or("All Types", ProjectType::label)
}

/// Which of the two renderings is active. Exactly one at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Map,
    List,
}

impl ViewMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Map => "map",
            Self::List => "list",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Map => "Map View",
            Self::List => "List View",
        }
    }

    pub const fn toggled(self) -> Self {
        match self {
            Self::Map => Self::List,
            Self::List => Self::Map,
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewMode {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "map" => Ok(Self::Map),
            "list" => Ok(Self::List),
            _ => Err(StoreError::InvalidViewMode(s.to_string())),
        }
    }
}

/// A project record as served by `GET /api/projects`.
///
/// `kind` keeps the raw wire value so records with an unrecognized type
/// still render; use [`Project::project_type`] for the typed view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Project {
    pub fn project_type(&self) -> Option<ProjectType> {
        ProjectType::parse(&self.kind)
    }

    /// Type label with the first letter capitalized, e.g. `Hydroelectric`.
    pub fn type_label(&self) -> String {
        let mut chars = self.kind.chars();
        chars.next().map_or_else(String::new, |first| {
            first.to_uppercase().chain(chars).collect()
        })
    }
}
