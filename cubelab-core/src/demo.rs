/// The five cube demos and their constants
use std::fmt;
use std::str::FromStr;

use nalgebra::{Point3, Vector3};

use crate::geometry::VertexAttribute;
use crate::lighting::{Lighting, Shading};
use crate::projection::Camera;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DemoKind {
    /// Flat vertex colors
    Colored,
    /// Directional light evaluated per vertex
    Directional,
    /// Point light evaluated per vertex
    PointVertex,
    /// Point light evaluated per fragment
    PointFragment,
    /// Image texture under a per-fragment point light
    Textured,
}

/// What supplies the base color of a fragment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    VertexColor,
    Texture,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDemoError(String);

impl fmt::Display for ParseDemoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown demo `{}`, expected one of: ", self.0)?;
        let names: Vec<&str> = DemoKind::ALL.iter().map(|kind| kind.name()).collect();
        write!(f, "{}", names.join(", "))
    }
}

impl std::error::Error for ParseDemoError {}

impl DemoKind {
    pub const ALL: [DemoKind; 5] = [
        Self::Colored,
        Self::Directional,
        Self::PointVertex,
        Self::PointFragment,
        Self::Textured,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Colored => "colored",
            Self::Directional => "directional",
            Self::PointVertex => "point-vertex",
            Self::PointFragment => "point-fragment",
            Self::Textured => "textured",
        }
    }

    /// Vertex streams the demo's shader reads
    pub fn attributes(self) -> &'static [VertexAttribute] {
        use VertexAttribute::*;
        match self {
            Self::Colored => &[Position, Color],
            Self::Directional | Self::PointVertex | Self::PointFragment => {
                &[Position, Color, Normal]
            }
            Self::Textured => &[Position, TexCoord, Normal],
        }
    }

    pub fn config(self) -> DemoConfig {
        let white = Vector3::new(1.0, 1.0, 1.0);

        let (camera, model_scale, lighting, shading, surface) = match self {
            Self::Colored => (
                Camera::new(40.0, 1.0, 200.0),
                1.0,
                Lighting::Unlit,
                Shading::PerVertex,
                Surface::VertexColor,
            ),
            Self::Directional => (
                Camera::new(40.0, 1.0, 200.0),
                1.0,
                Lighting::Directional {
                    color: white,
                    direction: Vector3::new(5.0, 5.0, 5.0),
                    ambient: Vector3::repeat(0.2),
                },
                Shading::PerVertex,
                Surface::VertexColor,
            ),
            Self::PointVertex => (
                Camera::new(40.0, 1.0, 200.0),
                1.2,
                Lighting::Point {
                    color: white,
                    position: Point3::new(0.0, 0.0, 4.0),
                    ambient: Vector3::repeat(0.2),
                },
                Shading::PerVertex,
                Surface::VertexColor,
            ),
            Self::PointFragment => (
                Camera::new(40.0, 1.0, 200.0),
                1.2,
                Lighting::Point {
                    color: white,
                    position: Point3::new(0.0, 0.0, 3.0),
                    ambient: Vector3::repeat(0.1),
                },
                Shading::PerFragment,
                Surface::VertexColor,
            ),
            Self::Textured => (
                Camera::new(30.0, 0.1, 150.0),
                1.2,
                Lighting::Point {
                    color: white,
                    position: Point3::new(0.0, 0.0, 5.0),
                    ambient: Vector3::repeat(0.2),
                },
                Shading::PerFragment,
                Surface::Texture,
            ),
        };

        DemoConfig {
            kind: self,
            camera,
            model_scale,
            lighting,
            shading,
            surface,
            clear_color: [0.0, 0.0, 0.0, 1.0],
        }
    }
}

impl fmt::Display for DemoKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DemoKind {
    type Err = ParseDemoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == wanted)
            .ok_or_else(|| ParseDemoError(s.to_string()))
    }
}

/// Everything that distinguishes one demo from another
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DemoConfig {
    pub kind: DemoKind,
    pub camera: Camera,
    /// Uniform scale applied before rotation
    pub model_scale: f32,
    pub lighting: Lighting,
    pub shading: Shading,
    pub surface: Surface,
    pub clear_color: [f32; 4],
}

impl DemoConfig {
    pub fn with_aspect(mut self, width: u32, height: u32) -> Self {
        self.camera.set_viewport(width, height);
        self
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        DemoKind::Colored.config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trip() {
        for kind in DemoKind::ALL {
            assert_eq!(kind.name().parse::<DemoKind>(), Ok(kind));
        }
        assert_eq!(" Point-Fragment ".parse::<DemoKind>(), Ok(DemoKind::PointFragment));
    }

    #[test]
    fn test_parse_error_lists_demos() {
        let err = "wireframe".parse::<DemoKind>().unwrap_err();
        let message = err.to_string();
        assert!(message.contains("wireframe"));
        assert!(message.contains("point-vertex"));
    }

    #[test]
    fn test_attributes_follow_surface() {
        for kind in DemoKind::ALL {
            let config = kind.config();
            let attributes = kind.attributes();
            assert_eq!(attributes[0], VertexAttribute::Position);
            assert_eq!(
                attributes.contains(&VertexAttribute::TexCoord),
                config.surface == Surface::Texture
            );
            assert_eq!(
                attributes.contains(&VertexAttribute::Normal),
                config.lighting != Lighting::Unlit
            );
        }
    }

    #[test]
    fn test_textured_camera() {
        let config = DemoKind::Textured.config();
        assert_eq!(config.camera.fov_degrees, 30.0);
        assert_eq!(config.camera.near, 0.1);
        assert_eq!(config.camera.far, 150.0);
        assert_eq!(config.model_scale, 1.2);
    }

    #[test]
    fn test_with_aspect() {
        let config = DemoKind::Directional.config().with_aspect(640, 480);
        assert!((config.camera.aspect - 640.0 / 480.0).abs() < 1e-6);
        assert_eq!(DemoConfig::default().kind, DemoKind::Colored);
    }
}
