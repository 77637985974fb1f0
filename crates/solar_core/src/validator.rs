//! System validation
//!
//! Checks a [`SystemTemplate`] before it becomes a [`SolarSystem`](crate::SolarSystem).
//! The transform evaluator divides by periods and walks parent links without
//! checking, so anything that would break it is rejected here.

use std::collections::{HashMap, HashSet};

use crate::body::BodyKind;
use crate::system_file::SystemTemplate;

/// Validation error found in a body table
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Table has no bodies
    EmptySystem,
    /// Two bodies share a name
    DuplicateName(String),
    /// A body names a parent that is not in the table
    UnknownParent { body: String, parent: String },
    /// A body names itself as its parent
    SelfParent(String),
    /// No body is without a parent
    NoRoot,
    /// More than one body is without a parent
    MultipleRoots(Vec<String>),
    /// The root body is not a star
    RootNotStar(String),
    /// A star has a parent
    StarHasParent(String),
    /// A planet does not orbit the star
    PlanetNotOrbitingStar(String),
    /// A moon does not orbit a planet
    MoonNotOrbitingPlanet(String),
    /// A period is zero, negative, or not a number
    NonPositivePeriod { body: String, value: f32 },
    /// Orbital radius is negative
    NegativeOrbitalRadius { body: String, value: f32 },
    /// Visual radius is zero or negative
    NonPositiveVisualRadius { body: String, value: f32 },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::EmptySystem => write!(f, "System has no bodies"),
            ValidationError::DuplicateName(name) => write!(f, "Duplicate body name: '{}'", name),
            ValidationError::UnknownParent { body, parent } => {
                write!(f, "Body '{}' orbits unknown body '{}'", body, parent)
            }
            ValidationError::SelfParent(name) => write!(f, "Body '{}' orbits itself", name),
            ValidationError::NoRoot => write!(f, "Every body has a parent"),
            ValidationError::MultipleRoots(names) => {
                write!(f, "More than one body has no parent: {}", names.join(", "))
            }
            ValidationError::RootNotStar(name) => write!(f, "Root body '{}' is not a star", name),
            ValidationError::StarHasParent(name) => write!(f, "Star '{}' has a parent", name),
            ValidationError::PlanetNotOrbitingStar(name) => {
                write!(f, "Planet '{}' does not orbit the star", name)
            }
            ValidationError::MoonNotOrbitingPlanet(name) => {
                write!(f, "Moon '{}' does not orbit a planet", name)
            }
            ValidationError::NonPositivePeriod { body, value } => {
                write!(f, "Body '{}' has non-positive period: {}", body, value)
            }
            ValidationError::NegativeOrbitalRadius { body, value } => {
                write!(f, "Body '{}' has negative orbital radius: {}", body, value)
            }
            ValidationError::NonPositiveVisualRadius { body, value } => {
                write!(f, "Body '{}' has non-positive visual radius: {}", body, value)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Body table validator
///
/// # Example
/// ```ignore
/// let errors = SystemValidator::validate(&template);
/// for error in &errors {
///     log::error!("{}", error);
/// }
/// ```
pub struct SystemValidator;

impl SystemValidator {
    /// Validate a body table, returning all errors found
    pub fn validate(template: &SystemTemplate) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if template.bodies.is_empty() {
            errors.push(ValidationError::EmptySystem);
            return errors;
        }

        let mut kinds: HashMap<&str, BodyKind> = HashMap::new();
        for body in &template.bodies {
            if kinds.insert(body.name.as_str(), body.kind).is_some() {
                errors.push(ValidationError::DuplicateName(body.name.clone()));
            }
        }

        // Numeric fields; negated comparisons also catch NaN
        for body in &template.bodies {
            for value in [body.orbital_period_days, body.rotation_period_days] {
                if !(value > 0.0) {
                    errors.push(ValidationError::NonPositivePeriod {
                        body: body.name.clone(),
                        value,
                    });
                }
            }
            if !(body.orbital_radius >= 0.0) {
                errors.push(ValidationError::NegativeOrbitalRadius {
                    body: body.name.clone(),
                    value: body.orbital_radius,
                });
            }
            if !(body.visual_radius > 0.0) {
                errors.push(ValidationError::NonPositiveVisualRadius {
                    body: body.name.clone(),
                    value: body.visual_radius,
                });
            }
        }

        // Roots
        let roots: Vec<_> = template.bodies.iter().filter(|b| b.parent.is_none()).collect();
        match roots.as_slice() {
            [] => errors.push(ValidationError::NoRoot),
            [root] => {
                if root.kind != BodyKind::Star {
                    errors.push(ValidationError::RootNotStar(root.name.clone()));
                }
            }
            many => errors.push(ValidationError::MultipleRoots(
                many.iter().map(|b| b.name.clone()).collect(),
            )),
        }

        // Parent links; kinds must step down Star -> Planet -> Moon
        let mut reported = HashSet::new();
        for body in &template.bodies {
            let Some(parent) = &body.parent else { continue };

            if parent == &body.name {
                errors.push(ValidationError::SelfParent(body.name.clone()));
                continue;
            }

            let Some(&parent_kind) = kinds.get(parent.as_str()) else {
                errors.push(ValidationError::UnknownParent {
                    body: body.name.clone(),
                    parent: parent.clone(),
                });
                continue;
            };

            let misplaced = match body.kind {
                BodyKind::Star => Some(ValidationError::StarHasParent(body.name.clone())),
                BodyKind::Planet if parent_kind != BodyKind::Star => {
                    Some(ValidationError::PlanetNotOrbitingStar(body.name.clone()))
                }
                BodyKind::Moon if parent_kind != BodyKind::Planet => {
                    Some(ValidationError::MoonNotOrbitingPlanet(body.name.clone()))
                }
                _ => None,
            };
            if let Some(error) = misplaced {
                if reported.insert(body.name.as_str()) {
                    errors.push(error);
                }
            }
        }

        errors
    }

    /// Validate and return Result (Ok if no errors, Err with all errors)
    pub fn validate_or_error(template: &SystemTemplate) -> Result<(), Vec<ValidationError>> {
        let errors = Self::validate(template);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
