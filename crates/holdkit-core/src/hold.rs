//! Hold records as they arrive from the persistence layer.
//!
//! Positions and radii are normalized to the canonical image: `x` and `y` in
//! `[0, 1]`, `radius` as a fraction of the canonical width. The engine reads
//! these values for geometric queries; edits are reported back as a fresh
//! [`HoldGeometry`] for the caller to persist.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::math::Vec2;

/// What a hold is used for on a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HoldRole {
    /// Starting hand/foot position
    Start,
    /// Hand hold
    Hand,
    /// Foot-only hold
    Foot,
    /// Finishing hold
    Finish,
    /// Unrestricted
    #[default]
    Any,
}

impl fmt::Display for HoldRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => write!(f, "start"),
            Self::Hand => write!(f, "hand"),
            Self::Foot => write!(f, "foot"),
            Self::Finish => write!(f, "finish"),
            Self::Any => write!(f, "any"),
        }
    }
}

/// A hold marked on a wall image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hold {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    #[serde(default)]
    pub role: HoldRole,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster_id: Option<String>,
}

fn default_color() -> String {
    "#FFFFFF".to_string()
}

impl Hold {
    /// Creates a hold with a freshly generated id.
    pub fn new(x: f64, y: f64, radius: f64) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), x, y, radius)
    }

    pub fn with_id(id: impl Into<String>, x: f64, y: f64, radius: f64) -> Self {
        Self {
            id: id.into(),
            x,
            y,
            radius,
            role: HoldRole::default(),
            color: default_color(),
            cluster_id: None,
        }
    }

    pub fn role(mut self, role: HoldRole) -> Self {
        self.role = role;
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn cluster(mut self, cluster_id: impl Into<String>) -> Self {
        self.cluster_id = Some(cluster_id.into());
        self
    }

    /// Canonical center of the hold.
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn geometry(&self) -> HoldGeometry {
        HoldGeometry {
            x: self.x,
            y: self.y,
            radius: self.radius,
        }
    }

    /// Copy of this hold (same id, role, color and cluster) at a new geometry.
    pub fn with_geometry(&self, geometry: HoldGeometry) -> Self {
        Self {
            x: geometry.x,
            y: geometry.y,
            radius: geometry.radius,
            ..self.clone()
        }
    }

    pub fn in_cluster(&self, cluster_id: &str) -> bool {
        self.cluster_id.as_deref() == Some(cluster_id)
    }
}

/// Position and size of a hold, reported for every move or resize.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HoldGeometry {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
}

impl HoldGeometry {
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Clamps the center into the canonical unit square.
    pub fn clamped_to_canvas(self) -> Self {
        Self {
            x: self.x.clamp(0.0, 1.0),
            y: self.y.clamp(0.0, 1.0),
            radius: self.radius,
        }
    }
}
