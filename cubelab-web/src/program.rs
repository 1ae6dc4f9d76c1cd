/// Shader compilation and program linking
use web_sys::{WebGlProgram, WebGlShader, WebGlUniformLocation};

use crate::error::{RenderError, Stage};
use crate::Gl;

pub fn compile_shader(gl: &Gl, stage: Stage, source: &str) -> Result<WebGlShader, RenderError> {
    let kind = match stage {
        Stage::Vertex => Gl::VERTEX_SHADER,
        Stage::Fragment => Gl::FRAGMENT_SHADER,
    };
    let shader = gl
        .create_shader(kind)
        .ok_or(RenderError::CreateShader(stage))?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);

    if gl
        .get_shader_parameter(&shader, Gl::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(shader)
    } else {
        let log = gl.get_shader_info_log(&shader).unwrap_or_default();
        gl.delete_shader(Some(&shader));
        Err(RenderError::ShaderCompile { stage, log })
    }
}

pub fn link_program(
    gl: &Gl,
    vertex: &WebGlShader,
    fragment: &WebGlShader,
) -> Result<WebGlProgram, RenderError> {
    let program = gl.create_program().ok_or(RenderError::CreateProgram)?;
    gl.attach_shader(&program, vertex);
    gl.attach_shader(&program, fragment);
    gl.link_program(&program);

    if gl
        .get_program_parameter(&program, Gl::LINK_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(program)
    } else {
        let log = gl.get_program_info_log(&program).unwrap_or_default();
        gl.delete_program(Some(&program));
        Err(RenderError::ProgramLink(log))
    }
}

/// A linked program with name-based location lookup
pub struct ShaderProgram {
    program: WebGlProgram,
}

impl ShaderProgram {
    pub fn new(gl: &Gl, vertex_source: &str, fragment_source: &str) -> Result<Self, RenderError> {
        let vertex = compile_shader(gl, Stage::Vertex, vertex_source)?;
        let fragment = compile_shader(gl, Stage::Fragment, fragment_source)?;
        let program = link_program(gl, &vertex, &fragment)?;

        // The program keeps the compiled code
        gl.delete_shader(Some(&vertex));
        gl.delete_shader(Some(&fragment));

        Ok(Self { program })
    }

    pub fn bind(&self, gl: &Gl) {
        gl.use_program(Some(&self.program));
    }

    pub fn attribute(&self, gl: &Gl, name: &'static str) -> Result<u32, RenderError> {
        u32::try_from(gl.get_attrib_location(&self.program, name))
            .map_err(|_| RenderError::AttributeNotFound(name))
    }

    pub fn uniform(
        &self,
        gl: &Gl,
        name: &'static str,
    ) -> Result<WebGlUniformLocation, RenderError> {
        gl.get_uniform_location(&self.program, name)
            .ok_or(RenderError::UniformNotFound(name))
    }
}
