//! Error types for building the house.

use std::fmt;

use gartenhaus_kernel::KernelError;
use thiserror::Error;

use crate::assembly::AssemblyKind;

/// One rejected configuration parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigIssue {
    /// Dotted path of the offending parameter, e.g. `walls.window.width`.
    pub parameter: String,
    /// What is wrong with it.
    pub message: String,
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.parameter, self.message)
    }
}

/// Every configuration problem found in one validation pass.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConfigErrors {
    /// The individual issues, in discovery order.
    pub issues: Vec<ConfigIssue>,
}

impl ConfigErrors {
    /// Record an issue.
    pub fn push(&mut self, parameter: impl Into<String>, message: impl Into<String>) {
        self.issues.push(ConfigIssue {
            parameter: parameter.into(),
            message: message.into(),
        });
    }

    /// Record an issue unless `ok` holds.
    pub fn check(&mut self, ok: bool, parameter: &str, message: impl Into<String>) {
        if !ok {
            self.push(parameter, message);
        }
    }

    /// Record an issue unless `value` is strictly positive and finite.
    pub fn positive(&mut self, parameter: &str, value: f64) {
        self.check(
            value.is_finite() && value > 0.0,
            parameter,
            format!("must be positive, got {value}"),
        );
    }

    /// Record an issue unless `value` is zero or positive and finite.
    pub fn non_negative(&mut self, parameter: &str, value: f64) {
        self.check(
            value.is_finite() && value >= 0.0,
            parameter,
            format!("must not be negative, got {value}"),
        );
    }

    /// Merge issues found elsewhere.
    pub fn extend(&mut self, other: ConfigErrors) {
        self.issues.extend(other.issues);
    }

    /// No issues recorded.
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// `Ok(())` when empty, otherwise `Err(self)`.
    pub fn into_result(self) -> std::result::Result<(), ConfigErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ConfigErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid configuration ({} issue", self.issues.len())?;
        if self.issues.len() != 1 {
            write!(f, "s")?;
        }
        write!(f, ")")?;
        for issue in &self.issues {
            write!(f, "; {issue}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ConfigErrors {}

/// Errors that stop a house build.
#[derive(Error, Debug)]
pub enum Error {
    /// Dimensions rejected before any boolean work started.
    #[error(transparent)]
    Config(#[from] ConfigErrors),

    /// A cut left a part with no volume.
    #[error("{assembly} part {index} ({tag}) has no volume left after cutting")]
    DegeneratePart {
        /// Sub-assembly that produced the part.
        assembly: AssemblyKind,
        /// Position of the part in its part list.
        index: usize,
        /// Part tag, or `<untagged>`.
        tag: String,
    },

    /// A reduction was asked to union nothing.
    #[error("cannot union an empty part list ({context})")]
    EmptyPartList {
        /// What was being reduced.
        context: String,
    },

    /// The cut dependency graph is not a DAG.
    #[error("cut graph has a cycle through {remaining:?}")]
    CutCycle {
        /// Assemblies that could not be scheduled.
        remaining: Vec<AssemblyKind>,
    },

    /// An assembly was built before one of its producers.
    #[error("{assembly} must be cut against {missing}, which has not been built")]
    MissingDependency {
        /// The dependent assembly.
        assembly: AssemblyKind,
        /// The producer that is missing.
        missing: AssemblyKind,
    },

    /// Two consecutive parts of the fabrication row overlap.
    #[error(
        "fabrication layout: part {index} overlaps part {next} by {overlap:.3} mm; \
         row spacing {spacing} is smaller than the part width"
    )]
    LayoutOverlap {
        /// Row index of the first part.
        index: usize,
        /// Row index of the following part.
        next: usize,
        /// Overlap along the row axis in mm.
        overlap: f64,
        /// The spacing that was used.
        spacing: f64,
    },

    /// Kernel export failure.
    #[error(transparent)]
    Kernel(#[from] KernelError),

    /// Reading a configuration file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A configuration file could not be parsed.
    #[error("invalid TOML configuration: {0}")]
    Toml(#[from] toml::de::Error),

    /// A configuration could not be rendered as TOML.
    #[error("TOML serialization failed: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// The inventory could not be rendered as JSON.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for house building.
pub type Result<T> = std::result::Result<T, Error>;
