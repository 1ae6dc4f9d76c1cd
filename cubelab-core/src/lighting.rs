/// Lambert lighting models and their CPU evaluation
use nalgebra::{Point3, Vector3};

/// Light setup of a demo
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Lighting {
    /// Vertex colors pass straight through
    Unlit,
    /// Parallel light travelling towards `-direction`
    Directional {
        color: Vector3<f32>,
        direction: Vector3<f32>,
        ambient: Vector3<f32>,
    },
    Point {
        color: Vector3<f32>,
        position: Point3<f32>,
        ambient: Vector3<f32>,
    },
}

/// Where the lighting equation is evaluated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shading {
    /// Once per vertex, colors interpolated across the face
    PerVertex,
    /// Once per fragment from interpolated position and normal
    PerFragment,
}

impl Lighting {
    pub fn ambient(&self) -> Option<Vector3<f32>> {
        match self {
            Self::Unlit => None,
            Self::Directional { ambient, .. } | Self::Point { ambient, .. } => Some(*ambient),
        }
    }

    /// Shade `base` at a world-space `position` with world-space `normal`.
    ///
    /// `light * base * max(dot(L, N), 0) + ambient * base`
    pub fn shade(
        &self,
        base: &Vector3<f32>,
        position: &Point3<f32>,
        normal: &Vector3<f32>,
    ) -> Vector3<f32> {
        let (color, to_light, ambient) = match self {
            Self::Unlit => return *base,
            Self::Directional {
                color,
                direction,
                ambient,
            } => (color, *direction, ambient),
            Self::Point {
                color,
                position: light,
                ambient,
            } => (color, light - position, ambient),
        };

        let n_dot_l = to_light
            .try_normalize(f32::EPSILON)
            .zip(normal.try_normalize(f32::EPSILON))
            .map(|(l, n)| l.dot(&n).max(0.0))
            .unwrap_or(0.0);

        color.component_mul(base) * n_dot_l + ambient.component_mul(base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point_light() -> Lighting {
        Lighting::Point {
            color: Vector3::new(1.0, 1.0, 1.0),
            position: Point3::new(0.0, 0.0, 4.0),
            ambient: Vector3::new(0.2, 0.2, 0.2),
        }
    }

    #[test]
    fn test_unlit_passthrough() {
        let base = Vector3::new(0.3, 0.6, 0.9);
        let shaded = Lighting::Unlit.shade(&base, &Point3::origin(), &Vector3::z());
        assert_eq!(shaded, base);
    }

    #[test]
    fn test_point_light_head_on() {
        let base = Vector3::new(0.0, 1.0, 0.0);
        let shaded = point_light().shade(&base, &Point3::new(0.0, 0.0, 1.0), &Vector3::z());
        assert!((shaded - Vector3::new(0.0, 1.2, 0.0)).norm() < 1e-6);
    }

    #[test]
    fn test_light_behind_face_leaves_ambient() {
        let base = Vector3::new(1.0, 1.0, 0.0);
        let shaded = point_light().shade(&base, &Point3::new(0.0, 0.0, -1.0), &-Vector3::z());
        assert!((shaded - Vector3::new(0.2, 0.2, 0.0)).norm() < 1e-6);
    }

    #[test]
    fn test_directional_ignores_position() {
        let light = Lighting::Directional {
            color: Vector3::new(1.0, 1.0, 1.0),
            direction: Vector3::new(5.0, 5.0, 5.0),
            ambient: Vector3::new(0.2, 0.2, 0.2),
        };
        let base = Vector3::new(1.0, 0.0, 0.0);
        let a = light.shade(&base, &Point3::origin(), &Vector3::y());
        let b = light.shade(&base, &Point3::new(9.0, -3.0, 2.0), &Vector3::y());
        assert_eq!(a, b);

        let expected = 1.0 / 3f32.sqrt() + 0.2;
        assert!((a.x - expected).abs() < 1e-6);
        assert_eq!(light.ambient(), Some(Vector3::new(0.2, 0.2, 0.2)));
    }

    #[test]
    fn test_unnormalized_normal() {
        let base = Vector3::new(1.0, 1.0, 1.0);
        let unit = point_light().shade(&base, &Point3::new(0.0, 0.0, 1.0), &Vector3::z());
        let long = point_light().shade(&base, &Point3::new(0.0, 0.0, 1.0), &(Vector3::z() * 1.44));
        assert!((unit - long).norm() < 1e-6);
    }
}
