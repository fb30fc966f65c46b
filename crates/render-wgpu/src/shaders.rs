use oceanspace_stream::WaveField;

/// Water surface template. `AMP_X`, `AMP_Y`, `FREQ_X`, `FREQ_Y`, `SPEED_X` and
/// `SPEED_Y` are replaced with WGSL float literals by [`water_shader`].
const WATER_TEMPLATE: &str = r#"
struct Camera {
    view_proj: mat4x4<f32>,
};

struct Water {
    time: f32,
    _pad0: f32,
    _pad1: f32,
    _pad2: f32,
};

@group(0) @binding(0)
var<uniform> camera: Camera;

@group(1) @binding(0)
var<uniform> water: Water;

const AMPLITUDE: vec2<f32> = vec2<f32>(AMP_X, AMP_Y);
const FREQUENCY: vec2<f32> = vec2<f32>(FREQ_X, FREQ_Y);
const SPEED: vec2<f32> = vec2<f32>(SPEED_X, SPEED_Y);

struct PatchVertex {
    @location(0) local: vec2<f32>,
    @location(1) uv: vec2<f32>,
};

struct PatchInstance {
    @location(2) origin: vec2<f32>,
};

struct HostSample {
    @location(3) height: f32,
    @location(4) normal: vec3<f32>,
};

struct WaterOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) uv: vec2<f32>,
    @location(1) wave: f32,
    @location(2) normal: vec3<f32>,
};

fn surface_point(local: vec2<f32>, origin: vec2<f32>, height: f32) -> vec4<f32> {
    // Local +y points toward world -z.
    return vec4<f32>(origin.x + local.x, height, origin.y - local.y, 1.0);
}

@vertex
fn vs_gpu_waves(vertex: PatchVertex, instance: PatchInstance) -> WaterOutput {
    let phase = vertex.local * FREQUENCY + water.time * SPEED;
    let height = AMPLITUDE.x * sin(phase.x) + AMPLITUDE.y * cos(phase.y);
    let dh_dx = AMPLITUDE.x * FREQUENCY.x * cos(phase.x);
    let dh_dy = -AMPLITUDE.y * FREQUENCY.y * sin(phase.y);

    var out: WaterOutput;
    out.clip_position = camera.view_proj * surface_point(vertex.local, instance.origin, height);
    out.uv = vertex.uv;
    out.wave = height;
    out.normal = normalize(vec3<f32>(-dh_dx, 1.0, dh_dy));
    return out;
}

@vertex
fn vs_cpu_waves(vertex: PatchVertex, instance: PatchInstance, sample: HostSample) -> WaterOutput {
    var out: WaterOutput;
    out.clip_position = camera.view_proj * surface_point(vertex.local, instance.origin, sample.height);
    out.uv = vertex.uv;
    out.wave = sample.height;
    out.normal = sample.normal;
    return out;
}

fn random(p: vec2<f32>) -> f32 {
    return fract(sin(dot(p, vec2<f32>(127.1, 311.7))) * 43758.5453123);
}

fn value_noise(p: vec2<f32>) -> f32 {
    let i = floor(p);
    let f = fract(p);
    let a = random(i);
    let b = random(i + vec2<f32>(1.0, 0.0));
    let c = random(i + vec2<f32>(0.0, 1.0));
    let d = random(i + vec2<f32>(1.0, 1.0));
    let u = f * f * (3.0 - 2.0 * f);
    return mix(a, b, u.x) + (c - a) * u.y * (1.0 - u.x) + (d - b) * u.x * u.y;
}

@fragment
fn fs_water(in: WaterOutput) -> @location(0) vec4<f32> {
    let deep_blue = vec3<f32>(0.0, 0.22, 0.4);
    let sea_green = vec3<f32>(0.0, 0.65, 0.6);
    let turquoise = vec3<f32>(0.0, 0.8, 0.85);

    let n = value_noise(in.uv * 5.0 + water.time * 0.1);
    let wave_strength = clamp(in.wave * 0.5 + 0.5, 0.0, 1.0);
    var color = mix(deep_blue, sea_green, wave_strength);
    color = mix(color, turquoise, n * 0.3);

    let glow = 1.0 - smoothstep(0.0, 0.5, distance(in.uv, vec2<f32>(0.5, 0.2)));
    color += glow * vec3<f32>(1.0, 0.9, 0.7) * 0.1;

    let foam = smoothstep(0.6, 0.95, wave_strength + n * 0.2);
    color = mix(color, vec3<f32>(1.0), foam * 0.3);

    let light_dir = normalize(vec3<f32>(20.0, 40.0, 10.0));
    let shade = 0.85 + 0.15 * max(dot(normalize(in.normal), light_dir), 0.0);
    return vec4<f32>(color * shade, 1.0);
}
"#;

/// Generate the water shader with `field`'s coefficients baked in.
///
/// Entry points: `vs_gpu_waves` evaluates heights per vertex from
/// `water.time`; `vs_cpu_waves` reads host-computed heights and normals from
/// a third vertex buffer. Both feed `fs_water`.
pub fn water_shader(field: &WaveField) -> String {
    [
        ("AMP_X", field.amplitude.x),
        ("AMP_Y", field.amplitude.y),
        ("FREQ_X", field.frequency.x),
        ("FREQ_Y", field.frequency.y),
        ("SPEED_X", field.speed.x),
        ("SPEED_Y", field.speed.y),
    ]
    .into_iter()
    .fold(WATER_TEMPLATE.to_string(), |src, (token, value)| {
        src.replace(token, &wgsl_float(value))
    })
}

/// WGSL abstract-float literal for a finite `f32`.
fn wgsl_float(value: f32) -> String {
    // `{:?}` always keeps a decimal point or exponent.
    format!("{value:?}")
}

/// WGSL shader for the vehicle hull placeholder.
pub const VEHICLE_SHADER: &str = r#"
struct Camera {
    view_proj: mat4x4<f32>,
};

struct Hull {
    model: mat4x4<f32>,
    color: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> camera: Camera;

@group(1) @binding(0)
var<uniform> hull: Hull;

struct HullVertex {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
};

struct HullOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_normal: vec3<f32>,
};

@vertex
fn vs_hull(vertex: HullVertex) -> HullOutput {
    var out: HullOutput;
    out.clip_position = camera.view_proj * hull.model * vec4<f32>(vertex.position, 1.0);
    out.world_normal = normalize((hull.model * vec4<f32>(vertex.normal, 0.0)).xyz);
    return out;
}

@fragment
fn fs_hull(in: HullOutput) -> @location(0) vec4<f32> {
    let light_dir = normalize(vec3<f32>(20.0, 40.0, 10.0));
    let lighting = 0.3 + max(dot(in.world_normal, light_dir), 0.0) * 0.7;
    return vec4<f32>(hull.color.rgb * lighting, hull.color.a);
}
"#;
