/// Geometry primitives for the cube demos
use nalgebra::{Point2, Point3, Vector3};

/// A vertex carrying every attribute any demo consumes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Point3<f32>,
    pub color: Vector3<f32>,
    pub normal: Vector3<f32>,
    pub tex_coord: Point2<f32>,
}

impl Vertex {
    pub fn new(
        position: [f32; 3],
        color: [f32; 3],
        normal: [f32; 3],
        tex_coord: [f32; 2],
    ) -> Self {
        Self {
            position: Point3::from(position),
            color: Vector3::from(color),
            normal: Vector3::from(normal),
            tex_coord: Point2::from(tex_coord),
        }
    }
}

/// Per-vertex attribute streams, uploaded as separate tightly packed buffers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexAttribute {
    Position,
    Color,
    Normal,
    TexCoord,
}

impl VertexAttribute {
    /// Number of `f32` components per vertex.
    pub fn components(self) -> usize {
        match self {
            Self::Position | Self::Color | Self::Normal => 3,
            Self::TexCoord => 2,
        }
    }
}

/// Three vertices resolved from an index triple
#[derive(Debug, Clone)]
pub struct Triangle {
    pub vertices: [Vertex; 3],
}

impl Triangle {
    pub fn new(v0: Vertex, v1: Vertex, v2: Vertex) -> Self {
        Self {
            vertices: [v0, v1, v2],
        }
    }

    /// Calculate the face normal from the triangle's winding
    pub fn face_normal(&self) -> Vector3<f32> {
        let v0 = self.vertices[0].position;
        let v1 = self.vertices[1].position;
        let v2 = self.vertices[2].position;

        let edge1 = v1 - v0;
        let edge2 = v2 - v0;

        edge1.cross(&edge2).normalize()
    }
}

/// An indexed triangle mesh
#[derive(Debug, Clone)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u16>,
}

/// Cube corners, outward normal, and color per face: top, bottom, left, right, front, back.
///
/// ```text
///        4-----------3
///       /|          /|
///      1-----------2 |
///      | 8---------|-7
///      |/          |/
///      5-----------6
/// ```
const CUBE_FACES: [([[f32; 3]; 4], [f32; 3], [f32; 3]); 6] = [
    // top 1 2 3 4, red
    (
        [[-1.0, 1.0, 1.0], [1.0, 1.0, 1.0], [1.0, 1.0, -1.0], [-1.0, 1.0, -1.0]],
        [0.0, 1.0, 0.0],
        [1.0, 0.0, 0.0],
    ),
    // bottom 8 7 6 5, cyan
    (
        [[-1.0, -1.0, -1.0], [1.0, -1.0, -1.0], [1.0, -1.0, 1.0], [-1.0, -1.0, 1.0]],
        [0.0, -1.0, 0.0],
        [0.0, 1.0, 1.0],
    ),
    // left 5 1 4 8, white
    (
        [[-1.0, -1.0, 1.0], [-1.0, 1.0, 1.0], [-1.0, 1.0, -1.0], [-1.0, -1.0, -1.0]],
        [-1.0, 0.0, 0.0],
        [1.0, 1.0, 1.0],
    ),
    // right 2 6 7 3, blue
    (
        [[1.0, 1.0, 1.0], [1.0, -1.0, 1.0], [1.0, -1.0, -1.0], [1.0, 1.0, -1.0]],
        [1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0],
    ),
    // front 2 1 5 6, green
    (
        [[1.0, 1.0, 1.0], [-1.0, 1.0, 1.0], [-1.0, -1.0, 1.0], [1.0, -1.0, 1.0]],
        [0.0, 0.0, 1.0],
        [0.0, 1.0, 0.0],
    ),
    // back 4 3 7 8, yellow
    (
        [[-1.0, 1.0, -1.0], [1.0, 1.0, -1.0], [1.0, -1.0, -1.0], [-1.0, -1.0, -1.0]],
        [0.0, 0.0, -1.0],
        [1.0, 1.0, 0.0],
    ),
];

const FACE_TEX_COORDS: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

impl Mesh {
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            indices: Vec::new(),
        }
    }

    pub fn with_capacity(vertices: usize, indices: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices),
            indices: Vec::with_capacity(indices),
        }
    }

    /// Append a quad as two triangles `0 1 2` and `0 2 3`.
    pub fn add_quad(&mut self, quad: [Vertex; 4]) {
        let base = self.vertices.len() as u16;
        self.vertices.extend_from_slice(&quad);
        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    /// The 2x2x2 cube centred on the origin, 4 vertices per face
    pub fn cube() -> Self {
        let mut mesh = Self::with_capacity(24, 36);

        for (corners, normal, color) in CUBE_FACES {
            let quad =
                [0, 1, 2, 3].map(|i| Vertex::new(corners[i], color, normal, FACE_TEX_COORDS[i]));
            mesh.add_quad(quad);
        }

        mesh
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// Flatten one attribute of every vertex into a packed buffer.
    pub fn attribute_data(&self, attribute: VertexAttribute) -> Vec<f32> {
        let mut data = Vec::with_capacity(self.vertices.len() * attribute.components());
        for vertex in &self.vertices {
            let components = match attribute {
                VertexAttribute::Position => vertex.position.coords.as_slice(),
                VertexAttribute::Color => vertex.color.as_slice(),
                VertexAttribute::Normal => vertex.normal.as_slice(),
                VertexAttribute::TexCoord => vertex.tex_coord.coords.as_slice(),
            };
            data.extend_from_slice(components);
        }
        data
    }

    /// Iterate the mesh as resolved triangles
    pub fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        self.indices.chunks_exact(3).map(|tri| {
            Triangle::new(
                self.vertices[tri[0] as usize],
                self.vertices[tri[1] as usize],
                self.vertices[tri[2] as usize],
            )
        })
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cube_counts() {
        let cube = Mesh::cube();
        assert_eq!(cube.vertices.len(), 24);
        assert_eq!(cube.index_count(), 36);
        assert_eq!(cube.triangles().count(), 12);
        assert!(cube.indices.iter().all(|&i| (i as usize) < cube.vertices.len()));
    }

    #[test]
    fn test_cube_winding_faces_outward() {
        let cube = Mesh::cube();
        for triangle in cube.triangles() {
            let geometric = triangle.face_normal();
            let declared = triangle.vertices[0].normal;
            assert!((geometric - declared).norm() < 1e-6, "{geometric:?} != {declared:?}");

            // Outward: the normal points away from the cube centre
            let centroid = triangle
                .vertices
                .iter()
                .fold(Vector3::zeros(), |acc, v| acc + v.position.coords)
                / 3.0;
            assert!(centroid.dot(&geometric) > 0.0);
        }
    }

    #[test]
    fn test_attribute_data_layout() {
        let cube = Mesh::cube();
        let positions = cube.attribute_data(VertexAttribute::Position);
        let tex_coords = cube.attribute_data(VertexAttribute::TexCoord);
        assert_eq!(positions.len(), 24 * 3);
        assert_eq!(tex_coords.len(), 24 * 2);
        assert_eq!(&positions[..3], &[-1.0, 1.0, 1.0]);
        assert_eq!(&tex_coords[..8], &[0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0]);

        let colors = cube.attribute_data(VertexAttribute::Color);
        // top face red, back face yellow
        assert_eq!(&colors[..3], &[1.0, 0.0, 0.0]);
        assert_eq!(&colors[colors.len() - 3..], &[1.0, 1.0, 0.0]);
    }
}
