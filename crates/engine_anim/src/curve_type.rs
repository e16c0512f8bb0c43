//! Interpolation kinds.

use std::fmt;
use std::str::FromStr;

use engine_math::{
    BSplineEvaluator, BezierEvaluator, CurveEvaluator, CurveSettings, LinearEvaluator,
};
use serde::{Deserialize, Serialize};

use crate::error::AnimError;

/// How a curve interpolates between its keyframes.
///
/// The serialized names (`"Linear"`, `"Bezier"`, `"BSpline"`,
/// `"CatmullRom"`) are part of the scene file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CurveType {
    /// Straight segments between keys.
    #[default]
    Linear,
    /// Cubic Bezier segments; keys double as tangent handles.
    Bezier,
    /// Uniform cubic B-spline approximating the keys.
    BSpline,
    /// Declared by the file format but without an evaluator of its own.
    CatmullRom,
}

impl CurveType {
    /// Every curve type, in file-format order.
    pub const ALL: [CurveType; 4] = [
        CurveType::Linear,
        CurveType::Bezier,
        CurveType::BSpline,
        CurveType::CatmullRom,
    ];

    /// The name used in scene files.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            CurveType::Linear => "Linear",
            CurveType::Bezier => "Bezier",
            CurveType::BSpline => "BSpline",
            CurveType::CatmullRom => "CatmullRom",
        }
    }

    /// Whether this type has a dedicated evaluator.
    #[must_use]
    pub const fn has_evaluator(self) -> bool {
        !matches!(self, CurveType::CatmullRom)
    }

    /// Build the evaluator for this curve type.
    ///
    /// `CatmullRom` has no evaluator and falls back to linear evaluation.
    #[must_use]
    pub fn evaluator(self, settings: CurveSettings) -> Box<dyn CurveEvaluator> {
        match self {
            CurveType::Linear | CurveType::CatmullRom => Box::new(LinearEvaluator::new(settings)),
            CurveType::Bezier => Box::new(BezierEvaluator::new(settings)),
            CurveType::BSpline => Box::new(BSplineEvaluator::new(settings)),
        }
    }
}

impl fmt::Display for CurveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CurveType {
    type Err = AnimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CurveType::ALL
            .into_iter()
            .find(|ty| ty.name() == s)
            .ok_or_else(|| AnimError::UnknownCurveType(s.to_string()))
    }
}
