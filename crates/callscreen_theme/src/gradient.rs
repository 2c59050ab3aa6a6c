//! Gradient directions
//!
//! Directions map to start/end points in the unit square, (0,0) being the top
//! left corner.

use callscreen_core::Point;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GradientDirection {
    BottomTop,
    LeftRight,
    RightLeft,
    /// From the top-left corner
    DiagonalTl,
    /// From the top-right corner
    DiagonalTr,
    /// From the bottom-left corner
    DiagonalBl,
    /// From the bottom-right corner
    DiagonalBr,
    /// Center outwards
    Radial,
    /// Also the fallback for unknown names
    #[default]
    #[serde(other)]
    TopBottom,
}

impl GradientDirection {
    pub fn all() -> &'static [GradientDirection] {
        const DIRECTIONS: [GradientDirection; 9] = [
            GradientDirection::TopBottom,
            GradientDirection::BottomTop,
            GradientDirection::LeftRight,
            GradientDirection::RightLeft,
            GradientDirection::DiagonalTl,
            GradientDirection::DiagonalTr,
            GradientDirection::DiagonalBl,
            GradientDirection::DiagonalBr,
            GradientDirection::Radial,
        ];
        &DIRECTIONS
    }

    pub fn id(self) -> &'static str {
        match self {
            Self::TopBottom => "top-bottom",
            Self::BottomTop => "bottom-top",
            Self::LeftRight => "left-right",
            Self::RightLeft => "right-left",
            Self::DiagonalTl => "diagonal-tl",
            Self::DiagonalTr => "diagonal-tr",
            Self::DiagonalBl => "diagonal-bl",
            Self::DiagonalBr => "diagonal-br",
            Self::Radial => "radial",
        }
    }

    /// Parse a direction name; anything unknown is top-to-bottom
    pub fn from_id(id: &str) -> Self {
        Self::all()
            .iter()
            .copied()
            .find(|d| d.id() == id)
            .unwrap_or_default()
    }

    /// Start and end points in the unit square
    pub fn vectors(self) -> (Point, Point) {
        let p = Point::new;
        match self {
            Self::TopBottom => (p(0.0, 0.0), p(0.0, 1.0)),
            Self::BottomTop => (p(0.0, 1.0), p(0.0, 0.0)),
            Self::LeftRight => (p(0.0, 0.0), p(1.0, 0.0)),
            Self::RightLeft => (p(1.0, 0.0), p(0.0, 0.0)),
            Self::DiagonalTl => (p(0.0, 0.0), p(1.0, 1.0)),
            Self::DiagonalTr => (p(1.0, 0.0), p(0.0, 1.0)),
            Self::DiagonalBl => (p(0.0, 1.0), p(1.0, 0.0)),
            Self::DiagonalBr => (p(1.0, 1.0), p(0.0, 0.0)),
            Self::Radial => (p(0.5, 0.5), p(1.0, 1.0)),
        }
    }
}

/// Vectors for an optional direction; a missing direction is top-to-bottom
pub fn gradient_vectors(direction: Option<GradientDirection>) -> (Point, Point) {
    direction.unwrap_or_default().vectors()
}
