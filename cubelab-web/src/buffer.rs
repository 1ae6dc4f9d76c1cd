/// Static vertex and index buffers
use cubelab_core::{Mesh, VertexAttribute};
use js_sys::{Float32Array, Uint16Array};
use web_sys::WebGlBuffer;

use crate::error::RenderError;
use crate::program::ShaderProgram;
use crate::shaders::attribute_name;
use crate::Gl;

/// One uploaded vertex stream and the shader attribute that reads it
pub struct VertexBuffer {
    attribute: VertexAttribute,
    location: u32,
    buffer: WebGlBuffer,
}

impl VertexBuffer {
    /// Upload one attribute of `mesh` and resolve its location in `program`.
    pub fn upload(
        gl: &Gl,
        program: &ShaderProgram,
        mesh: &Mesh,
        attribute: VertexAttribute,
    ) -> Result<Self, RenderError> {
        let name = attribute_name(attribute);
        let location = program.attribute(gl, name)?;
        let buffer = gl.create_buffer().ok_or(RenderError::CreateBuffer(name))?;

        let data = Float32Array::from(mesh.attribute_data(attribute).as_slice());
        gl.bind_buffer(Gl::ARRAY_BUFFER, Some(&buffer));
        gl.buffer_data_with_array_buffer_view(Gl::ARRAY_BUFFER, &data, Gl::STATIC_DRAW);

        Ok(Self {
            attribute,
            location,
            buffer,
        })
    }

    pub fn location(&self) -> u32 {
        self.location
    }

    /// Point the attribute at this buffer and enable it.
    ///
    /// Attribute pointers are context state, so this runs before every draw.
    pub fn bind(&self, gl: &Gl) {
        gl.bind_buffer(Gl::ARRAY_BUFFER, Some(&self.buffer));
        gl.vertex_attrib_pointer_with_i32(
            self.location,
            self.attribute.components() as i32,
            Gl::FLOAT,
            false,
            0,
            0,
        );
        gl.enable_vertex_attrib_array(self.location);
    }
}

/// The uploaded index list
pub struct IndexBuffer {
    buffer: WebGlBuffer,
    count: i32,
}

impl IndexBuffer {
    pub fn upload(gl: &Gl, mesh: &Mesh) -> Result<Self, RenderError> {
        let buffer = gl
            .create_buffer()
            .ok_or(RenderError::CreateBuffer("indices"))?;

        let data = Uint16Array::from(mesh.indices.as_slice());
        gl.bind_buffer(Gl::ELEMENT_ARRAY_BUFFER, Some(&buffer));
        gl.buffer_data_with_array_buffer_view(Gl::ELEMENT_ARRAY_BUFFER, &data, Gl::STATIC_DRAW);

        Ok(Self {
            buffer,
            count: index_count(mesh),
        })
    }

    pub fn count(&self) -> i32 {
        self.count
    }

    pub fn bind(&self, gl: &Gl) {
        gl.bind_buffer(Gl::ELEMENT_ARRAY_BUFFER, Some(&self.buffer));
    }
}

/// Index count as `draw_elements` takes it
fn index_count(mesh: &Mesh) -> i32 {
    i32::try_from(mesh.index_count()).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cube_index_count() {
        assert_eq!(index_count(&Mesh::cube()), 36);
    }
}
