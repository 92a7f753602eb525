#![forbid(unsafe_code)]

//! Layout constants and their validated container.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Every node has unit diameter.
pub const NODE_RADIUS: f64 = 0.5;

/// Center-to-center spacing between nodes on the same level: two node
/// diameters.
pub const MIN_SEPARATION: f64 = 4.0 * NODE_RADIUS;

/// Vertical distance between consecutive levels.
pub const VERTICAL_SPACING: f64 = 3.0 * NODE_RADIUS;

/// Geometry parameters for a layout pass.
///
/// [`Default`] yields the compiled constants [`NODE_RADIUS`],
/// [`MIN_SEPARATION`] and [`VERTICAL_SPACING`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub node_radius: f64,
    /// Lower bound on the horizontal distance between same-depth centers.
    pub min_separation: f64,
    pub vertical_spacing: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_radius: NODE_RADIUS,
            min_separation: MIN_SEPARATION,
            vertical_spacing: VERTICAL_SPACING,
        }
    }
}

impl LayoutConfig {
    /// Set the node radius.
    #[must_use]
    pub fn node_radius(mut self, radius: f64) -> Self {
        self.node_radius = radius;
        self
    }

    /// Set the minimum same-level separation.
    #[must_use]
    pub fn min_separation(mut self, separation: f64) -> Self {
        self.min_separation = separation;
        self
    }

    /// Set the spacing between levels.
    #[must_use]
    pub fn vertical_spacing(mut self, spacing: f64) -> Self {
        self.vertical_spacing = spacing;
        self
    }

    /// Node diameter.
    #[inline]
    pub fn node_diameter(&self) -> f64 {
        2.0 * self.node_radius
    }

    /// Check that the parameters describe a drawable, non-overlapping layout.
    pub fn validate(&self) -> Result<(), LayoutConfigError> {
        for (field, value) in [
            (ConfigField::NodeRadius, self.node_radius),
            (ConfigField::MinSeparation, self.min_separation),
            (ConfigField::VerticalSpacing, self.vertical_spacing),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(LayoutConfigError::NotPositive { field, value });
            }
        }
        let diameter = self.node_diameter();
        for (field, value) in [
            (ConfigField::MinSeparation, self.min_separation),
            (ConfigField::VerticalSpacing, self.vertical_spacing),
        ] {
            if value < diameter {
                return Err(LayoutConfigError::NodesOverlap {
                    field,
                    value,
                    diameter,
                });
            }
        }
        Ok(())
    }
}

/// Names a [`LayoutConfig`] field in errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigField {
    NodeRadius,
    MinSeparation,
    VerticalSpacing,
}

impl fmt::Display for ConfigField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NodeRadius => "node_radius",
            Self::MinSeparation => "min_separation",
            Self::VerticalSpacing => "vertical_spacing",
        })
    }
}

/// Rejected layout configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LayoutConfigError {
    /// Value is zero, negative, NaN or infinite.
    NotPositive { field: ConfigField, value: f64 },
    /// Spacing is below one node diameter, so neighbouring circles would overlap.
    NodesOverlap {
        field: ConfigField,
        value: f64,
        diameter: f64,
    },
}

impl fmt::Display for LayoutConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotPositive { field, value } => {
                write!(f, "{field} must be positive and finite, got {value}")
            }
            Self::NodesOverlap {
                field,
                value,
                diameter,
            } => write!(
                f,
                "{field} of {value} is smaller than the node diameter {diameter}"
            ),
        }
    }
}

impl std::error::Error for LayoutConfigError {}
