/// Per-demo GL resources, state and draw
use cubelab_core::{DemoConfig, FrameMatrices, Key, Lighting, Mesh, RotationState, Surface};
use nalgebra::Matrix4;
use web_sys::{HtmlImageElement, WebGlTexture, WebGlUniformLocation};

use crate::buffer::{IndexBuffer, VertexBuffer};
use crate::error::RenderError;
use crate::program::ShaderProgram;
use crate::shaders::{self, declares_uniform};
use crate::Gl;

/// Texture unit the sampler reads from
const TEXTURE_UNIT: u32 = 0;

/// Per-frame matrix uniforms; model and normal matrices only where the shader reads them
struct MatrixUniforms {
    mvp: WebGlUniformLocation,
    model: Option<WebGlUniformLocation>,
    normal: Option<WebGlUniformLocation>,
}

/// One cube demo bound to a WebGL context.
///
/// Several demos may share a context; every draw rebinds the program, vertex
/// streams, texture and fixed-function state it depends on.
pub struct CubeDemo {
    gl: Gl,
    config: DemoConfig,
    program: ShaderProgram,
    uniforms: MatrixUniforms,
    rotation: RotationState,
    vertex_buffers: Vec<VertexBuffer>,
    index_buffer: IndexBuffer,
    max_attributes: u32,
    texture: Option<WebGlTexture>,
}

impl CubeDemo {
    /// Compile, upload and configure everything the demo needs.
    ///
    /// Demos that sample a texture are not ready to draw until
    /// [`CubeDemo::attach_image`] has been called.
    pub fn new(gl: Gl, config: DemoConfig) -> Result<Self, RenderError> {
        let kind = config.kind;
        let (vertex_source, fragment_source) = shaders::sources(kind);
        let program = ShaderProgram::new(&gl, vertex_source, fragment_source)?;
        program.bind(&gl);

        let mesh = Mesh::cube();
        let vertex_buffers = kind
            .attributes()
            .iter()
            .map(|&attribute| VertexBuffer::upload(&gl, &program, &mesh, attribute))
            .collect::<Result<Vec<_>, _>>()?;
        let index_buffer = IndexBuffer::upload(&gl, &mesh)?;

        let optional_uniform = |name: &'static str| {
            declares_uniform(kind, name)
                .then(|| program.uniform(&gl, name))
                .transpose()
        };
        let uniforms = MatrixUniforms {
            mvp: program.uniform(&gl, shaders::U_MVP)?,
            model: optional_uniform(shaders::U_MODEL)?,
            normal: optional_uniform(shaders::U_NORMAL_MATRIX)?,
        };

        let max_attributes = gl
            .get_parameter(Gl::MAX_VERTEX_ATTRIBS)?
            .as_f64()
            .map_or(0, |max| max as u32);

        let demo = Self {
            config,
            uniforms,
            rotation: RotationState::zero(),
            vertex_buffers,
            index_buffer,
            max_attributes,
            texture: None,
            program,
            gl,
        };
        demo.upload_lighting()?;

        log::info!("{kind} demo initialized");
        Ok(demo)
    }

    fn upload_lighting(&self) -> Result<(), RenderError> {
        let gl = &self.gl;
        let (color, placement, ambient) = match &self.config.lighting {
            Lighting::Unlit => return Ok(()),
            Lighting::Directional {
                color,
                direction,
                ambient,
            } => (color, (shaders::U_LIGHT_DIRECTION, *direction), ambient),
            Lighting::Point {
                color,
                position,
                ambient,
            } => (color, (shaders::U_LIGHT_POSITION, position.coords), ambient),
        };

        let (placement_name, placement) = placement;
        let uniforms = [
            (shaders::U_LIGHT_COLOR, *color),
            (placement_name, placement),
            (shaders::U_AMBIENT, *ambient),
        ];
        for (name, value) in uniforms {
            let location = self.program.uniform(gl, name)?;
            gl.uniform3fv_with_f32_array(Some(&location), value.as_slice());
        }
        Ok(())
    }

    /// Upload a loaded image as the demo's texture and mark it ready.
    pub fn attach_image(
        &mut self,
        texture: WebGlTexture,
        image: &HtmlImageElement,
    ) -> Result<(), RenderError> {
        let gl = &self.gl;
        self.program.bind(gl);

        gl.pixel_storei(Gl::UNPACK_FLIP_Y_WEBGL, 1);
        gl.active_texture(Gl::TEXTURE0 + TEXTURE_UNIT);
        gl.bind_texture(Gl::TEXTURE_2D, Some(&texture));
        gl.tex_parameteri(Gl::TEXTURE_2D, Gl::TEXTURE_MIN_FILTER, Gl::LINEAR as i32);
        // Non power-of-two images only sample with clamped wrapping in WebGL 1
        gl.tex_parameteri(Gl::TEXTURE_2D, Gl::TEXTURE_WRAP_S, Gl::CLAMP_TO_EDGE as i32);
        gl.tex_parameteri(Gl::TEXTURE_2D, Gl::TEXTURE_WRAP_T, Gl::CLAMP_TO_EDGE as i32);
        gl.tex_image_2d_with_u32_and_u32_and_image(
            Gl::TEXTURE_2D,
            0,
            Gl::RGB as i32,
            Gl::RGB,
            Gl::UNSIGNED_BYTE,
            image,
        )?;

        let sampler = self.program.uniform(gl, shaders::U_SAMPLER)?;
        gl.uniform1i(Some(&sampler), TEXTURE_UNIT as i32);

        self.texture = Some(texture);
        Ok(())
    }

    pub fn config(&self) -> &DemoConfig {
        &self.config
    }

    pub fn rotation(&self) -> RotationState {
        self.rotation
    }

    pub fn is_ready(&self) -> bool {
        match self.config.surface {
            Surface::VertexColor => true,
            Surface::Texture => self.texture.is_some(),
        }
    }

    /// Bind everything this demo draws with.
    fn bind(&self) {
        let gl = &self.gl;
        self.program.bind(gl);

        let used: Vec<u32> = self.vertex_buffers.iter().map(|b| b.location()).collect();
        for location in unused_locations(&used, self.max_attributes) {
            gl.disable_vertex_attrib_array(location);
        }
        for buffer in &self.vertex_buffers {
            buffer.bind(gl);
        }
        self.index_buffer.bind(gl);

        if let Some(texture) = &self.texture {
            gl.active_texture(Gl::TEXTURE0 + TEXTURE_UNIT);
            gl.bind_texture(Gl::TEXTURE_2D, Some(texture));
        }

        gl.enable(Gl::CULL_FACE);
        gl.cull_face(Gl::BACK);
        gl.enable(Gl::DEPTH_TEST);
        let [r, g, b, a] = self.config.clear_color;
        gl.clear_color(r, g, b, a);
    }

    /// Recompute the matrices for the current rotation and draw one frame.
    pub fn draw(&self) {
        if !self.is_ready() {
            return;
        }

        let gl = &self.gl;
        let frame = FrameMatrices::compute(
            &self.config.camera,
            &self.rotation,
            self.config.model_scale,
        );

        self.bind();
        upload_matrix(gl, Some(&self.uniforms.mvp), &frame.mvp);
        upload_matrix(gl, self.uniforms.model.as_ref(), &frame.model);
        upload_matrix(gl, self.uniforms.normal.as_ref(), &frame.normal);

        gl.clear(Gl::COLOR_BUFFER_BIT | Gl::DEPTH_BUFFER_BIT);
        gl.draw_elements_with_i32(
            Gl::TRIANGLES,
            self.index_buffer.count(),
            Gl::UNSIGNED_SHORT,
            0,
        );
    }

    /// Apply a key press and redraw. Returns `false` while the demo is not ready.
    pub fn handle_key(&mut self, key: Key) -> bool {
        if !self.is_ready() {
            return false;
        }

        self.rotation.apply(key);
        log::debug!("rotation x: {}, y: {}", self.rotation.x, self.rotation.y);
        self.draw();
        true
    }
}

fn upload_matrix(gl: &Gl, location: Option<&WebGlUniformLocation>, matrix: &Matrix4<f32>) {
    if location.is_some() {
        // nalgebra storage is column-major, as GL expects
        gl.uniform_matrix4fv_with_f32_array(location, false, matrix.as_slice());
    }
}

/// Attribute locations below `max` that another program may have left enabled
fn unused_locations(used: &[u32], max: u32) -> impl Iterator<Item = u32> + '_ {
    (0..max).filter(move |location| !used.contains(location))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unused_locations() {
        let unused: Vec<u32> = unused_locations(&[0, 2], 5).collect();
        assert_eq!(unused, vec![1, 3, 4]);
        assert_eq!(unused_locations(&[], 0).count(), 0);
    }
}
