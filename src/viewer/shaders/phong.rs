lazy_static::lazy_static! {
    static ref VERTEX: String =
    "
#version 450

layout(location=0) in vec3 a_position;
layout(location=1) in vec3 a_normal;

layout(set=0, binding=0)
uniform Uniforms {
    mat4 u_view_proj;
    mat4 u_model;
    vec4 u_eye;
};

layout(location=0) out vec3 v_position;
layout(location=1) out vec3 v_normal;

void main() {
    vec4 world_position = u_model * vec4(a_position, 1.0);
    v_position = world_position.xyz;
    v_normal = mat3(u_model) * a_normal;
    gl_Position = u_view_proj * world_position;
}
    ".to_string();

    static ref FRAGMENT: String =
    "
#version 450

layout(location=0) in vec3 v_position;
layout(location=1) in vec3 v_normal;

layout(location=0) out vec4 f_color;

layout(set=0, binding=0)
uniform Uniforms {
    mat4 u_view_proj;
    mat4 u_model;
    vec4 u_eye;
};

layout(set=0, binding=1)
uniform Lights {
    vec4 dir_direction;
    vec4 dir_ambient;
    vec4 dir_diffuse;
    vec4 dir_specular;
    vec4 point_position;
    vec4 point_ambient;
    vec4 point_diffuse;
    vec4 point_specular;
    vec4 spot_position;
    vec4 spot_direction;
    vec4 spot_ambient;
    vec4 spot_diffuse;
    vec4 spot_specular;
    vec4 params;  // x: point quadratic, y: spot quadratic, z: spot cutoff, w: spot exponent
    vec4 toggles; // x: directional on, y: point on, z: spot on
};

const vec3 object_color = vec3(0.6, 0.6, 0.6);
const float shininess = 32.0;

vec3 shade(vec3 light_dir, vec3 ambient, vec3 diffuse, vec3 specular, vec3 normal, vec3 view_dir) {
    float diff = max(dot(normal, light_dir), 0.0);
    vec3 reflect_dir = reflect(-light_dir, normal);
    float spec = pow(max(dot(view_dir, reflect_dir), 0.0), shininess);
    return ambient + diffuse * diff + specular * spec;
}

void main() {
    vec3 normal = normalize(v_normal);
    vec3 view_dir = normalize(u_eye.xyz - v_position);
    vec3 result = vec3(0.0);

    if (toggles.x > 0.5) {
        result += shade(normalize(-dir_direction.xyz), dir_ambient.xyz, dir_diffuse.xyz,
                        dir_specular.xyz, normal, view_dir);
    }

    if (toggles.y > 0.5) {
        vec3 to_light = point_position.xyz - v_position;
        float attenuation = 1.0 / (1.0 + params.x * dot(to_light, to_light));
        result += attenuation * shade(normalize(to_light), point_ambient.xyz, point_diffuse.xyz,
                                      point_specular.xyz, normal, view_dir);
    }

    if (toggles.z > 0.5) {
        vec3 to_light = spot_position.xyz - v_position;
        float attenuation = 1.0 / (1.0 + params.y * dot(to_light, to_light));
        float theta = dot(normalize(-to_light), normalize(spot_direction.xyz));
        float cone = theta > params.z ? pow(theta, params.w) : 0.0;
        result += cone * attenuation * shade(normalize(to_light), spot_ambient.xyz,
                                             spot_diffuse.xyz, spot_specular.xyz, normal, view_dir);
    }

    f_color = vec4(result * object_color, 1.0);
}
    ".to_string();
}

pub fn compile_shaders(
    compiler: &mut shaderc::Compiler,
    device: &wgpu::Device,
) -> (wgpu::ShaderModule, wgpu::ShaderModule) {
    let vert = super::compile_shader(
        &VERTEX,
        "phong.vert",
        shaderc::ShaderKind::Vertex,
        compiler,
        device,
    );
    let frag = super::compile_shader(
        &FRAGMENT,
        "phong.frag",
        shaderc::ShaderKind::Fragment,
        compiler,
        device,
    );
    (vert, frag)
}
