//! System file serialization
//!
//! Body tables live in RON files. A [`SystemTemplate`] names parents by body
//! name; [`SolarSystem::from_template`](crate::SolarSystem::from_template)
//! validates it and resolves the names into keys.

use serde::{Serialize, Deserialize};
use std::fs;
use std::io;
use std::path::Path;

use crate::body::{Appearance, BodyKind, OrbitalBody};
use crate::system::BodyKey;
use crate::validator::ValidationError;

/// A serializable body table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemTemplate {
    /// System name (for display/debugging)
    pub name: String,
    /// Bodies in declaration order
    pub bodies: Vec<BodyTemplate>,
}

/// A serializable body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyTemplate {
    pub name: String,
    pub kind: BodyKind,
    /// Name of the body this one orbits
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub orbital_radius: f32,
    pub orbital_period_days: f32,
    pub rotation_period_days: f32,
    pub visual_radius: f32,
    pub appearance: Appearance,
}

impl BodyTemplate {
    /// Convert to a body with an already-resolved parent
    pub fn to_body(&self, parent: Option<BodyKey>) -> OrbitalBody {
        OrbitalBody {
            name: self.name.clone(),
            kind: self.kind,
            parent,
            orbital_radius: self.orbital_radius,
            orbital_period_days: self.orbital_period_days,
            rotation_period_days: self.rotation_period_days,
            visual_radius: self.visual_radius,
            appearance: self.appearance.clone(),
        }
    }

    /// Create a template from a body and its parent's name
    pub fn from_body(body: &OrbitalBody, parent: Option<String>) -> Self {
        Self {
            name: body.name.clone(),
            kind: body.kind,
            parent,
            orbital_radius: body.orbital_radius,
            orbital_period_days: body.orbital_period_days,
            rotation_period_days: body.rotation_period_days,
            visual_radius: body.visual_radius,
            appearance: body.appearance.clone(),
        }
    }
}

impl SystemTemplate {
    /// Create a new empty template
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bodies: Vec::new(),
        }
    }

    /// Parse a template from RON text
    pub fn from_ron(contents: &str) -> Result<Self, SystemLoadError> {
        Ok(ron::from_str(contents)?)
    }

    /// Load a template from a RON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SystemLoadError> {
        let contents = fs::read_to_string(path)?;
        Self::from_ron(&contents)
    }

    /// Save a template to a RON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), SystemSaveError> {
        let pretty = ron::ser::PrettyConfig::new()
            .struct_names(false)
            .enumerate_arrays(false);
        let contents = ron::ser::to_string_pretty(self, pretty)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Add a body to this template
    pub fn add_body(&mut self, body: BodyTemplate) {
        self.bodies.push(body);
    }
}

/// Error loading a system file
#[derive(Debug)]
pub enum SystemLoadError {
    /// IO error (file not found, permission denied, etc.)
    Io(io::Error),
    /// Parse error (invalid RON syntax)
    Parse(ron::error::SpannedError),
}

impl From<io::Error> for SystemLoadError {
    fn from(e: io::Error) -> Self {
        SystemLoadError::Io(e)
    }
}

impl From<ron::error::SpannedError> for SystemLoadError {
    fn from(e: ron::error::SpannedError) -> Self {
        SystemLoadError::Parse(e)
    }
}

impl std::fmt::Display for SystemLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SystemLoadError::Io(e) => write!(f, "IO error: {}", e),
            SystemLoadError::Parse(e) => write!(f, "Parse error: {}", e),
        }
    }
}

impl std::error::Error for SystemLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SystemLoadError::Io(e) => Some(e),
            SystemLoadError::Parse(e) => Some(e),
        }
    }
}

/// Error saving a system file
#[derive(Debug)]
pub enum SystemSaveError {
    /// IO error (permission denied, disk full, etc.)
    Io(io::Error),
    /// Serialization error
    Serialize(ron::Error),
}

impl From<io::Error> for SystemSaveError {
    fn from(e: io::Error) -> Self {
        SystemSaveError::Io(e)
    }
}

impl From<ron::Error> for SystemSaveError {
    fn from(e: ron::Error) -> Self {
        SystemSaveError::Serialize(e)
    }
}

impl std::fmt::Display for SystemSaveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SystemSaveError::Io(e) => write!(f, "IO error: {}", e),
            SystemSaveError::Serialize(e) => write!(f, "Serialize error: {}", e),
        }
    }
}

impl std::error::Error for SystemSaveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SystemSaveError::Io(e) => Some(e),
            SystemSaveError::Serialize(e) => Some(e),
        }
    }
}

/// Unified error type for building a system
#[derive(Debug)]
pub enum SystemError {
    /// The file could not be read or parsed
    Load(SystemLoadError),
    /// The table failed validation
    Invalid(Vec<ValidationError>),
    /// A body refers to a name that does not exist
    UnknownBody(String),
}

impl From<SystemLoadError> for SystemError {
    fn from(e: SystemLoadError) -> Self {
        SystemError::Load(e)
    }
}

impl std::fmt::Display for SystemError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SystemError::Load(e) => write!(f, "{}", e),
            SystemError::Invalid(errors) => {
                write!(f, "Invalid system ({} errors)", errors.len())?;
                for error in errors {
                    write!(f, "; {}", error)?;
                }
                Ok(())
            }
            SystemError::UnknownBody(name) => write!(f, "Unknown body: '{}'", name),
        }
    }
}

impl std::error::Error for SystemError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SystemError::Load(e) => Some(e),
            SystemError::Invalid(_) | SystemError::UnknownBody(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EARTH_AND_SUN: &str = r#"
(
    name: "Two Bodies",
    bodies: [
        (
            name: "Sun",
            kind: Star,
            orbital_period_days: 1.0,
            rotation_period_days: 25.38,
            visual_radius: 0.05,
            appearance: Color(rgb: (0.0, 1.0, 0.0)),
        ),
        (
            name: "Earth",
            kind: Planet,
            parent: Some("Sun"),
            orbital_radius: 1.496,
            orbital_period_days: 365.0,
            rotation_period_days: 1.0,
            visual_radius: 0.13,
            appearance: Texture(path: "earth.bmp", fallback: (0.2, 0.2, 1.0)),
        ),
    ],
)
"#;

    #[test]
    fn test_parse_template() {
        let template = SystemTemplate::from_ron(EARTH_AND_SUN).unwrap();
        assert_eq!(template.name, "Two Bodies");
        assert_eq!(template.bodies.len(), 2);

        let sun = &template.bodies[0];
        assert_eq!(sun.parent, None);
        assert_eq!(sun.orbital_radius, 0.0);
        assert_eq!(sun.appearance, Appearance::color(0.0, 1.0, 0.0));

        let earth = &template.bodies[1];
        assert_eq!(earth.parent.as_deref(), Some("Sun"));
        assert_eq!(earth.appearance.texture_path(), Some("earth.bmp"));
    }

    #[test]
    fn test_parse_error() {
        let result = SystemTemplate::from_ron("(name: \"Broken\", bodies: [");
        assert!(matches!(result, Err(SystemLoadError::Parse(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let result = SystemTemplate::load("does/not/exist.ron");
        match result {
            Err(SystemLoadError::Io(e)) => assert_eq!(e.kind(), io::ErrorKind::NotFound),
            other => panic!("Expected Io error, got {:?}", other),
        }
    }

    #[test]
    fn test_save_and_load() {
        let template = SystemTemplate::from_ron(EARTH_AND_SUN).unwrap();
        let path = std::env::temp_dir().join("solar_core_system_file_test.ron");

        template.save(&path).unwrap();
        let loaded = SystemTemplate::load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded, template);
    }

    #[test]
    fn test_error_sources() {
        use std::error::Error;

        let save = SystemSaveError::from(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"));
        assert_eq!(save.source().map(|e| e.to_string()), Some("read-only".to_string()));

        let load = SystemTemplate::load("does/not/exist.ron").unwrap_err();
        let err = SystemError::from(load);
        assert!(err.source().is_some());
        assert!(SystemError::UnknownBody("Vulcan".to_string()).source().is_none());
    }

    #[test]
    fn test_error_display() {
        let err = SystemError::UnknownBody("Vulcan".to_string());
        assert_eq!(format!("{}", err), "Unknown body: 'Vulcan'");

        let err = SystemError::Invalid(vec![ValidationError::EmptySystem]);
        let msg = format!("{}", err);
        assert!(msg.contains("1 errors"));
        assert!(msg.contains("no bodies"));
    }
}
