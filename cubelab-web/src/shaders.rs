/// GLSL ES 1.00 sources for the five demos

use cubelab_core::{DemoKind, VertexAttribute};

pub const U_MVP: &str = "u_mvp";
pub const U_MODEL: &str = "u_model";
pub const U_NORMAL_MATRIX: &str = "u_normal_matrix";
pub const U_LIGHT_COLOR: &str = "u_light_color";
pub const U_LIGHT_DIRECTION: &str = "u_light_direction";
pub const U_LIGHT_POSITION: &str = "u_light_position";
pub const U_AMBIENT: &str = "u_ambient";
pub const U_SAMPLER: &str = "u_sampler";

/// Name of the shader input fed by a vertex stream
pub fn attribute_name(attribute: VertexAttribute) -> &'static str {
    match attribute {
        VertexAttribute::Position => "a_position",
        VertexAttribute::Color => "a_color",
        VertexAttribute::Normal => "a_normal",
        VertexAttribute::TexCoord => "a_tex_coord",
    }
}

const PASSTHROUGH_FRAG: &str = r#"
precision mediump float;
varying vec4 v_color;

void main() {
    gl_FragColor = v_color;
}
"#;

const COLORED_VERT: &str = r#"
attribute vec4 a_position;
attribute vec4 a_color;
uniform mat4 u_mvp;
varying vec4 v_color;

void main() {
    gl_Position = u_mvp * a_position;
    v_color = a_color;
}
"#;

const DIRECTIONAL_VERT: &str = r#"
attribute vec4 a_position;
attribute vec4 a_color;
attribute vec4 a_normal;
uniform mat4 u_mvp;
uniform mat4 u_normal_matrix;
uniform vec3 u_light_color;
uniform vec3 u_light_direction;
uniform vec3 u_ambient;
varying vec4 v_color;

void main() {
    gl_Position = u_mvp * a_position;
    vec3 normal = normalize((u_normal_matrix * a_normal).xyz);
    float n_dot_l = max(dot(normalize(u_light_direction), normal), 0.0);
    vec3 diffuse = u_light_color * a_color.rgb * n_dot_l;
    vec3 ambient = u_ambient * a_color.rgb;
    v_color = vec4(diffuse + ambient, a_color.a);
}
"#;

const POINT_VERTEX_VERT: &str = r#"
attribute vec4 a_position;
attribute vec4 a_color;
attribute vec4 a_normal;
uniform mat4 u_mvp;
uniform mat4 u_model;
uniform mat4 u_normal_matrix;
uniform vec3 u_light_color;
uniform vec3 u_light_position;
uniform vec3 u_ambient;
varying vec4 v_color;

void main() {
    gl_Position = u_mvp * a_position;
    vec3 normal = normalize((u_normal_matrix * a_normal).xyz);
    vec3 position = (u_model * a_position).xyz;
    float n_dot_l = max(dot(normalize(u_light_position - position), normal), 0.0);
    vec3 diffuse = u_light_color * a_color.rgb * n_dot_l;
    vec3 ambient = u_ambient * a_color.rgb;
    v_color = vec4(diffuse + ambient, a_color.a);
}
"#;

const POINT_FRAGMENT_VERT: &str = r#"
attribute vec4 a_position;
attribute vec4 a_color;
attribute vec3 a_normal;
uniform mat4 u_mvp;
uniform mat4 u_model;
uniform mat4 u_normal_matrix;
varying vec3 v_position;
varying vec3 v_normal;
varying vec4 v_color;

void main() {
    gl_Position = u_mvp * a_position;
    v_position = (u_model * a_position).xyz;
    v_normal = (u_normal_matrix * vec4(a_normal, 0.0)).xyz;
    v_color = a_color;
}
"#;

const POINT_FRAGMENT_FRAG: &str = r#"
precision mediump float;
uniform vec3 u_light_color;
uniform vec3 u_light_position;
uniform vec3 u_ambient;
varying vec3 v_position;
varying vec3 v_normal;
varying vec4 v_color;

void main() {
    vec3 normal = normalize(v_normal);
    float n_dot_l = max(dot(normalize(u_light_position - v_position), normal), 0.0);
    vec3 diffuse = u_light_color * v_color.rgb * n_dot_l;
    vec3 ambient = u_ambient * v_color.rgb;
    gl_FragColor = vec4(diffuse + ambient, v_color.a);
}
"#;

const TEXTURED_VERT: &str = r#"
attribute vec4 a_position;
attribute vec2 a_tex_coord;
attribute vec3 a_normal;
uniform mat4 u_mvp;
uniform mat4 u_model;
uniform mat4 u_normal_matrix;
varying vec3 v_position;
varying vec3 v_normal;
varying vec2 v_tex_coord;

void main() {
    gl_Position = u_mvp * a_position;
    v_position = (u_model * a_position).xyz;
    v_normal = normalize((u_normal_matrix * vec4(a_normal, 0.0)).xyz);
    v_tex_coord = a_tex_coord;
}
"#;

const TEXTURED_FRAG: &str = r#"
precision mediump float;
uniform sampler2D u_sampler;
uniform vec3 u_light_color;
uniform vec3 u_light_position;
uniform vec3 u_ambient;
varying vec3 v_position;
varying vec3 v_normal;
varying vec2 v_tex_coord;

void main() {
    vec3 normal = normalize(v_normal);
    float n_dot_l = max(dot(normalize(u_light_position - v_position), normal), 0.0);
    vec4 base = texture2D(u_sampler, v_tex_coord);
    vec3 diffuse = u_light_color * base.rgb * n_dot_l;
    vec3 ambient = u_ambient * base.rgb;
    gl_FragColor = vec4(diffuse + ambient, base.a);
}
"#;

/// Vertex and fragment source for a demo
pub fn sources(kind: DemoKind) -> (&'static str, &'static str) {
    match kind {
        DemoKind::Colored => (COLORED_VERT, PASSTHROUGH_FRAG),
        DemoKind::Directional => (DIRECTIONAL_VERT, PASSTHROUGH_FRAG),
        DemoKind::PointVertex => (POINT_VERTEX_VERT, PASSTHROUGH_FRAG),
        DemoKind::PointFragment => (POINT_FRAGMENT_VERT, POINT_FRAGMENT_FRAG),
        DemoKind::Textured => (TEXTURED_VERT, TEXTURED_FRAG),
    }
}

/// Whether a uniform is declared by either stage of a demo
pub fn declares_uniform(kind: DemoKind, name: &str) -> bool {
    let (vertex, fragment) = sources(kind);
    let declaration = |source: &str| {
        source
            .lines()
            .filter_map(|line| line.trim().strip_prefix("uniform "))
            .any(|rest| rest.trim_end_matches(';').split_whitespace().last() == Some(name))
    };
    declaration(vertex) || declaration(fragment)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attributes_are_declared() {
        for kind in DemoKind::ALL {
            let (vertex, _) = sources(kind);
            for &attribute in kind.attributes() {
                let name = attribute_name(attribute);
                assert!(
                    vertex.lines().any(|line| line.starts_with("attribute") && line.contains(name)),
                    "{kind} does not declare {name}"
                );
            }
        }
    }

    #[test]
    fn test_declared_uniforms() {
        assert!(declares_uniform(DemoKind::Colored, U_MVP));
        assert!(!declares_uniform(DemoKind::Colored, U_NORMAL_MATRIX));
        assert!(declares_uniform(DemoKind::Directional, U_LIGHT_DIRECTION));
        assert!(!declares_uniform(DemoKind::Directional, U_MODEL));
        assert!(declares_uniform(DemoKind::PointFragment, U_LIGHT_POSITION));
        assert!(declares_uniform(DemoKind::Textured, U_SAMPLER));
        assert!(!declares_uniform(DemoKind::Textured, "u_mv"));
    }
}
