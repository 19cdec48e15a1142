use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the four RICE inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiceField {
    Reach,
    Impact,
    Confidence,
    Effort,
}

impl RiceField {
    pub const ALL: [RiceField; 4] = [
        RiceField::Reach,
        RiceField::Impact,
        RiceField::Confidence,
        RiceField::Effort,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Reach => "reach",
            Self::Impact => "impact",
            Self::Confidence => "confidence",
            Self::Effort => "effort",
        }
    }
}

impl fmt::Display for RiceField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// RICE inputs where any field may still be unknown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartialRice {
    /// Users (or feedback items) affected.
    pub reach: Option<i64>,
    /// Ordinal impact, documented as 1–5.
    pub impact: Option<f64>,
    /// Confidence percentage in [0, 100].
    pub confidence: Option<f64>,
    /// Effort estimate, strictly positive.
    pub effort: Option<f64>,
}

impl PartialRice {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reach(mut self, reach: i64) -> Self {
        self.reach = Some(reach);
        self
    }

    pub fn with_impact(mut self, impact: f64) -> Self {
        self.impact = Some(impact);
        self
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = Some(confidence);
        self
    }

    pub fn with_effort(mut self, effort: f64) -> Self {
        self.effort = Some(effort);
        self
    }

    /// Overlay `other` on top of `self`: every field set in `other` wins.
    pub fn merge(&mut self, other: &PartialRice) {
        if other.reach.is_some() {
            self.reach = other.reach;
        }
        if other.impact.is_some() {
            self.impact = other.impact;
        }
        if other.confidence.is_some() {
            self.confidence = other.confidence;
        }
        if other.effort.is_some() {
            self.effort = other.effort;
        }
    }

    /// Fields still unset, in RICE order.
    pub fn missing_fields(&self) -> Vec<RiceField> {
        let mut missing = Vec::new();
        if self.reach.is_none() {
            missing.push(RiceField::Reach);
        }
        if self.impact.is_none() {
            missing.push(RiceField::Impact);
        }
        if self.confidence.is_none() {
            missing.push(RiceField::Confidence);
        }
        if self.effort.is_none() {
            missing.push(RiceField::Effort);
        }
        missing
    }

    pub fn is_complete(&self) -> bool {
        self.complete().is_some()
    }

    /// All four fields, if every one is set. Values are not range-checked.
    pub fn complete(&self) -> Option<RiceInputs> {
        Some(RiceInputs {
            reach: self.reach?,
            impact: self.impact?,
            confidence: self.confidence?,
            effort: self.effort?,
        })
    }
}

/// A full set of RICE inputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiceInputs {
    pub reach: i64,
    pub impact: f64,
    pub confidence: f64,
    pub effort: f64,
}

impl RiceInputs {
    pub fn new(reach: i64, impact: f64, confidence: f64, effort: f64) -> Self {
        Self {
            reach,
            impact,
            confidence,
            effort,
        }
    }

    /// The raw value of one field, for error reporting.
    pub fn value_of(&self, field: RiceField) -> f64 {
        match field {
            RiceField::Reach => self.reach as f64,
            RiceField::Impact => self.impact,
            RiceField::Confidence => self.confidence,
            RiceField::Effort => self.effort,
        }
    }
}

impl From<RiceInputs> for PartialRice {
    fn from(inputs: RiceInputs) -> Self {
        Self {
            reach: Some(inputs.reach),
            impact: Some(inputs.impact),
            confidence: Some(inputs.confidence),
            effort: Some(inputs.effort),
        }
    }
}
