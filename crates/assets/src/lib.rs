//! Vehicle visual loading.
//!
//! The simulation treats the vehicle's visual representation as an opaque
//! handle produced by one asynchronous load at startup. Handles are identified
//! by a content hash of the source bytes; the renderer consumes handles, never
//! raw file paths.

use std::future::Future;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Content-addressed asset ID computed from the asset data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AssetId(pub u64);

impl AssetId {
    /// First eight bytes of the SHA-256 of `bytes`.
    pub fn of_bytes(bytes: &[u8]) -> Self {
        let digest = Sha256::digest(bytes);
        let mut head = [0u8; 8];
        head.copy_from_slice(&digest[..8]);
        AssetId(u64::from_le_bytes(head))
    }
}

/// A minimal material representation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub name: String,
    pub base_color: [f32; 4],
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: "hull".into(),
            base_color: [0.55, 0.35, 0.2, 1.0],
        }
    }
}

/// Opaque handle to the loaded vehicle visual.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleVisual {
    pub id: AssetId,
    pub meshes: Vec<String>,
    pub materials: Vec<Material>,
    /// Uniform scale applied to the model.
    pub scale: f32,
    /// Height of the model's origin above the water plane.
    pub ride_height: f32,
    pub source: Option<PathBuf>,
}

impl VehicleVisual {
    /// Colour to draw the hull with when only a placeholder shape is rendered.
    pub fn base_color(&self) -> [f32; 4] {
        self.materials
            .first()
            .map(|m| m.base_color)
            .unwrap_or(Material::default().base_color)
    }
}

/// Errors from vehicle loading.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("glTF parse error: {0}")]
    GltfParse(String),
    #[error("unsupported vehicle format: {0}")]
    UnsupportedFormat(String),
    #[error("vehicle load rejected: {0}")]
    Rejected(String),
}

/// Source of the vehicle visual. Loaded exactly once, before the first tick.
pub trait VehicleLoader {
    fn load_vehicle(&self) -> impl Future<Output = Result<VehicleVisual, AssetError>>;
}

/// Placeholder hull used when no model file is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinVehicleLoader;

impl VehicleLoader for BuiltinVehicleLoader {
    async fn load_vehicle(&self) -> Result<VehicleVisual, AssetError> {
        let material = Material::default();
        Ok(VehicleVisual {
            id: AssetId::of_bytes(b"builtin:hull"),
            meshes: vec!["hull".into()],
            materials: vec![material],
            scale: 2.0,
            ride_height: 1.0,
            source: None,
        })
    }
}

/// Loads mesh and material metadata from a `.gltf` or `.glb` file.
///
/// Only the JSON document is read; vertex buffers stay with the rendering
/// collaborator.
#[derive(Debug, Clone)]
pub struct GltfVehicleLoader {
    path: PathBuf,
    scale: f32,
    ride_height: f32,
}

impl GltfVehicleLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            scale: 2.0,
            ride_height: 1.0,
        }
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<VehicleVisual, AssetError> {
        let bytes = std::fs::read(&self.path).map_err(|source| AssetError::Io {
            path: self.path.clone(),
            source,
        })?;

        let extension = self
            .path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        if !matches!(extension.as_str(), "gltf" | "glb") {
            return Err(AssetError::UnsupportedFormat(extension));
        }

        // Handles both the JSON form and the binary container.
        let gltf = gltf::Gltf::from_slice(&bytes).map_err(|e| AssetError::GltfParse(e.to_string()))?;

        let meshes: Vec<String> = gltf
            .document
            .meshes()
            .map(|mesh| format!("{}_{}", mesh.name().unwrap_or("unnamed"), mesh.index()))
            .collect();
        if meshes.is_empty() {
            return Err(AssetError::GltfParse(format!(
                "{} contains no meshes",
                self.path.display()
            )));
        }

        let materials = gltf
            .document
            .materials()
            .enumerate()
            .map(|(i, mat)| Material {
                name: format!("{}_{i}", mat.name().unwrap_or("unnamed")),
                base_color: mat.pbr_metallic_roughness().base_color_factor(),
            })
            .collect();

        Ok(VehicleVisual {
            id: AssetId::of_bytes(&bytes),
            meshes,
            materials,
            scale: self.scale,
            ride_height: self.ride_height,
            source: Some(self.path.clone()),
        })
    }
}

impl VehicleLoader for GltfVehicleLoader {
    async fn load_vehicle(&self) -> Result<VehicleVisual, AssetError> {
        let visual = self.read();
        match &visual {
            Ok(v) => tracing::debug!(
                path = %self.path.display(),
                meshes = v.meshes.len(),
                materials = v.materials.len(),
                "vehicle model loaded"
            ),
            Err(e) => tracing::warn!(path = %self.path.display(), "vehicle model failed: {e}"),
        }
        visual
    }
}

pub fn crate_info() -> &'static str {
    "oceanspace-assets v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SHIP_GLTF: &str = r#"{
        "asset": {"version": "2.0"},
        "buffers": [{"byteLength": 36}],
        "bufferViews": [{"buffer": 0, "byteLength": 36}],
        "accessors": [{
            "bufferView": 0, "componentType": 5126, "count": 3, "type": "VEC3",
            "min": [0.0, 0.0, 0.0], "max": [1.0, 1.0, 0.0]
        }],
        "meshes": [
            {"name": "hull", "primitives": [{"attributes": {"POSITION": 0}}]},
            {"name": "mast", "primitives": [{"attributes": {"POSITION": 0}}]}
        ],
        "materials": [
            {"name": "wood", "pbrMetallicRoughness": {"baseColorFactor": [0.4, 0.3, 0.2, 1.0]}},
            {"name": "sail"}
        ]
    }"#;

    const GLB_MAGIC: &[u8; 4] = b"glTF";
    const GLB_JSON_CHUNK: &[u8; 4] = b"JSON";

    fn write_temp(suffix: &str, bytes: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(bytes).unwrap();
        file
    }

    fn glb(json: &str) -> Vec<u8> {
        let mut chunk = json.as_bytes().to_vec();
        while chunk.len() % 4 != 0 {
            chunk.push(b' ');
        }
        let total = 12 + 8 + chunk.len();
        let mut out = Vec::with_capacity(total);
        out.extend_from_slice(GLB_MAGIC);
        out.extend_from_slice(&2u32.to_le_bytes());
        out.extend_from_slice(&(total as u32).to_le_bytes());
        out.extend_from_slice(&(chunk.len() as u32).to_le_bytes());
        out.extend_from_slice(GLB_JSON_CHUNK);
        out.extend_from_slice(&chunk);
        out
    }

    #[test]
    fn loads_gltf_metadata() {
        let file = write_temp(".gltf", SHIP_GLTF.as_bytes());
        let visual = pollster::block_on(GltfVehicleLoader::new(file.path()).load_vehicle()).unwrap();
        assert_eq!(visual.meshes, vec!["hull_0", "mast_1"]);
        assert_eq!(visual.materials.len(), 2);
        assert_eq!(visual.base_color(), [0.4, 0.3, 0.2, 1.0]);
        // Materials without a factor take the glTF default of opaque white.
        assert_eq!(visual.materials[1].name, "sail_1");
        assert_eq!(visual.materials[1].base_color, [1.0, 1.0, 1.0, 1.0]);
        assert_eq!(visual.scale, 2.0);
        assert_eq!(visual.ride_height, 1.0);
    }

    #[test]
    fn loads_binary_container() {
        let file = write_temp(".glb", &glb(SHIP_GLTF));
        let visual = pollster::block_on(GltfVehicleLoader::new(file.path()).load_vehicle()).unwrap();
        assert_eq!(visual.meshes, vec!["hull_0", "mast_1"]);
        assert_eq!(visual.base_color(), [0.4, 0.3, 0.2, 1.0]);
    }

    #[test]
    fn glb_with_wrong_declared_length_is_rejected() {
        let mut bytes = glb(SHIP_GLTF);
        let wrong = (bytes.len() as u32 + 64).to_le_bytes();
        bytes[8..12].copy_from_slice(&wrong);
        let file = write_temp(".glb", &bytes);
        let err = pollster::block_on(GltfVehicleLoader::new(file.path()).load_vehicle()).unwrap_err();
        assert!(matches!(err, AssetError::GltfParse(_)));
    }

    #[test]
    fn scale_override_is_carried_into_visual() {
        let file = write_temp(".gltf", SHIP_GLTF.as_bytes());
        let loader = GltfVehicleLoader::new(file.path()).with_scale(0.5);
        let visual = pollster::block_on(loader.load_vehicle()).unwrap();
        assert_eq!(visual.scale, 0.5);
        assert_eq!(visual.ride_height, 1.0);
    }

    #[test]
    fn id_is_content_addressed() {
        let a = write_temp(".gltf", SHIP_GLTF.as_bytes());
        let b = write_temp(".gltf", SHIP_GLTF.as_bytes());
        let va = pollster::block_on(GltfVehicleLoader::new(a.path()).load_vehicle()).unwrap();
        let vb = pollster::block_on(GltfVehicleLoader::new(b.path()).load_vehicle()).unwrap();
        assert_eq!(va.id, vb.id);
        assert_ne!(va.id, AssetId::of_bytes(b"something else"));
    }

    #[test]
    fn missing_file_is_io_error() {
        let loader = GltfVehicleLoader::new("/definitely/not/here/ship.glb");
        let err = pollster::block_on(loader.load_vehicle()).unwrap_err();
        assert!(matches!(err, AssetError::Io { .. }));
    }

    #[test]
    fn model_without_meshes_is_rejected() {
        let file = write_temp(".gltf", br#"{"asset": {"version": "2.0"}}"#);
        let err = pollster::block_on(GltfVehicleLoader::new(file.path()).load_vehicle()).unwrap_err();
        assert!(matches!(err, AssetError::GltfParse(_)));
    }

    #[test]
    fn corrupt_glb_is_rejected() {
        let file = write_temp(".glb", b"not a glb at all");
        let err = pollster::block_on(GltfVehicleLoader::new(file.path()).load_vehicle()).unwrap_err();
        assert!(matches!(err, AssetError::GltfParse(_)));
    }

    #[test]
    fn unknown_extension_is_unsupported() {
        let file = write_temp(".obj", b"o ship");
        let err = pollster::block_on(GltfVehicleLoader::new(file.path()).load_vehicle()).unwrap_err();
        assert!(matches!(err, AssetError::UnsupportedFormat(_)));
    }

    #[test]
    fn builtin_loader_always_succeeds() {
        let visual = pollster::block_on(BuiltinVehicleLoader.load_vehicle()).unwrap();
        assert!(visual.source.is_none());
        assert_eq!(visual.meshes, vec!["hull"]);
    }
}
