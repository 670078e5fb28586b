// shaderdude
// copyright zipxing@hotmail.com 2022～2025

//! GLSL source for the fixed vertex stage and the wrapper placed around the
//! user's fragment code.
//!
//! The user file only defines `mainImage(out vec4, in vec2)`. The final
//! fragment source is assembled as
//!
//! ```text
//! FRAGMENT_PREFIX          version, interface block, iTime/iResolution/iMouse/iFrame
//! channel declarations     iChannel0..N-1, iChannelResolution[N]  (absent for N = 0)
//! #line 1                  so compiler diagnostics use the user's line numbers
//! <user body>
//! FRAGMENT_SUFFIX          main() calling mainImage
//! ```

pub const GLSL_VERSION: &str = "#version 330 core";

/// Number of vertices drawn for the full-screen quad (two triangles)
pub const QUAD_VERTICES: i32 = 6;

/// Six clip-space vertices picked by gl_VertexID, no vertex buffers
pub const VERTEX_BODY: &str = r#"
out VS_OUT
{
    vec2 uv;
} vs_out;

const vec2 vertices[6] = vec2[6](
    vec2(-1.0, -1.0),
    vec2( 1.0, -1.0),
    vec2(-1.0,  1.0),
    vec2(-1.0,  1.0),
    vec2( 1.0, -1.0),
    vec2( 1.0,  1.0)
);

void main()
{
    vec2 vertex = vertices[gl_VertexID];
    gl_Position = vec4(vertex, 0.0, 1.0);
    vs_out.uv = vertex * 0.5 + 0.5;
}
"#;

pub const FRAGMENT_PREFIX: &str = r#"
in VS_OUT
{
    vec2 uv;
} vs_out;

uniform float iTime;
uniform vec3 iResolution;
uniform vec4 iMouse;
uniform int iFrame;

out vec4 f_color;
"#;

pub const FRAGMENT_SUFFIX: &str = r#"
void main()
{
    vec2 fragCoord = vs_out.uv * iResolution.xy;
    vec4 fragColor = vec4(0.0);
    mainImage(fragColor, fragCoord);
    f_color = fragColor;
}
"#;

/// Name of the sampler uniform bound to texture unit `unit`
pub fn channel_name(unit: usize) -> String {
    format!("iChannel{}", unit)
}

pub const CHANNEL_RESOLUTION: &str = "iChannelResolution";

pub fn vertex_source() -> String {
    format!("{}\n{}", GLSL_VERSION, VERTEX_BODY)
}

/// Declarations for `channels` input textures
pub fn channel_declarations(channels: usize) -> String {
    if channels == 0 {
        return String::new();
    }
    let mut decl = String::new();
    for unit in 0..channels {
        decl.push_str(&format!("uniform sampler2D {};\n", channel_name(unit)));
    }
    decl.push_str(&format!(
        "uniform vec3 {}[{}];\n",
        CHANNEL_RESOLUTION, channels
    ));
    decl
}

/// Wrap the user's fragment code into a complete fragment shader
pub fn fragment_source(body: &str, channels: usize) -> String {
    format!(
        "{}\n{}{}\n#line 1\n{}\n{}",
        GLSL_VERSION,
        FRAGMENT_PREFIX,
        channel_declarations(channels),
        body,
        FRAGMENT_SUFFIX
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: &str = "void mainImage(out vec4 c, in vec2 p){ c = vec4(1,0,0,1); }";

    #[test]
    fn test_no_channels_declares_no_samplers() {
        let src = fragment_source(RED, 0);
        assert_eq!(src.matches("uniform sampler2D").count(), 0);
        assert!(!src.contains(CHANNEL_RESOLUTION));
    }

    #[test]
    fn test_one_channel() {
        let src = fragment_source(RED, 1);
        assert_eq!(src.matches("uniform sampler2D").count(), 1);
        assert!(src.contains("uniform sampler2D iChannel0;"));
        assert!(src.contains("uniform vec3 iChannelResolution[1];"));
    }

    #[test]
    fn test_many_channels() {
        let src = fragment_source(RED, 3);
        assert_eq!(src.matches("uniform sampler2D").count(), 3);
        for unit in 0..3 {
            assert!(src.contains(&format!("uniform sampler2D iChannel{};", unit)));
        }
        assert!(!src.contains("iChannel3"));
        assert!(src.contains("uniform vec3 iChannelResolution[3];"));
    }

    #[test]
    fn test_fragment_layout() {
        let src = fragment_source(RED, 0);
        assert!(src.starts_with(GLSL_VERSION));
        let builtins = src.find("uniform float iTime;").unwrap();
        let line = src.find("#line 1").unwrap();
        let body = src.find(RED).unwrap();
        let entry = src.find("mainImage(fragColor, fragCoord);").unwrap();
        assert!(builtins < line && line < body && body < entry);
    }

    #[test]
    fn test_vertex_source_draws_six_vertices() {
        let src = vertex_source();
        assert!(src.starts_with(GLSL_VERSION));
        assert!(src.contains("vec2[6]"));
        assert!(src.contains("gl_VertexID"));
        assert_eq!(QUAD_VERTICES, 6);
    }
}
