/// Errors raised while setting up or drawing a demo
use std::fmt;

use wasm_bindgen::JsValue;

/// Shader stage, for error messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Vertex,
    Fragment,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vertex => f.write_str("vertex"),
            Self::Fragment => f.write_str("fragment"),
        }
    }
}

/// Everything that can abort setting up a demo
#[derive(Debug, Clone, PartialEq)]
pub enum RenderError {
    MissingWindow,
    MissingDocument,
    CanvasNotFound(String),
    ContextUnavailable,
    UnknownDemo(String),
    CreateShader(Stage),
    ShaderCompile { stage: Stage, log: String },
    CreateProgram,
    ProgramLink(String),
    CreateBuffer(&'static str),
    CreateTexture,
    AttributeNotFound(&'static str),
    UniformNotFound(&'static str),
    Js(String),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingWindow => write!(f, "no global window"),
            Self::MissingDocument => write!(f, "window has no document"),
            Self::CanvasNotFound(id) => write!(f, "get canvas with id `{id}` failed"),
            Self::ContextUnavailable => write!(f, "no WebGL context available"),
            Self::UnknownDemo(message) => f.write_str(message),
            Self::CreateShader(stage) => write!(f, "create {stage} shader failed"),
            Self::ShaderCompile { stage, log } => {
                write!(f, "compile {stage} shader failed: {log}")
            }
            Self::CreateProgram => write!(f, "create program failed"),
            Self::ProgramLink(log) => write!(f, "link program failed: {log}"),
            Self::CreateBuffer(name) => write!(f, "create buffer for {name} failed"),
            Self::CreateTexture => write!(f, "create texture failed"),
            Self::AttributeNotFound(name) => write!(f, "get vertex attribute [{name}] failed"),
            Self::UniformNotFound(name) => write!(f, "get uniform [{name}] failed"),
            Self::Js(message) => write!(f, "javascript error: {message}"),
        }
    }
}

impl std::error::Error for RenderError {}

impl From<JsValue> for RenderError {
    fn from(value: JsValue) -> Self {
        Self::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<RenderError> for JsValue {
    fn from(error: RenderError) -> Self {
        js_sys::Error::new(&error.to_string()).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let error = RenderError::ShaderCompile {
            stage: Stage::Fragment,
            log: "ERROR: 0:3: syntax error".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "compile fragment shader failed: ERROR: 0:3: syntax error"
        );
        assert_eq!(
            RenderError::UniformNotFound("u_mvp").to_string(),
            "get uniform [u_mvp] failed"
        );
    }
}
