use anyhow::{ensure, Result};
use glam::{Vec2, Vec3};
use pickray_camera::Camera;
use pickray_input::{CursorAggregator, DEFAULT_CURSOR_SPEED};
use pickray_picking::{Aabb, BoundingSphere, BoundingVolume, Viewport};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use tracing::warn;

pub const DEFAULT_CONFIG_PATH: &str = "config/picker.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PickerConfig {
    pub viewport: ViewportConfig,
    pub cursor: CursorConfig,
    pub camera: CameraConfig,
    pub targets: Vec<TargetConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ViewportConfig {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CursorConfig {
    /// Keyboard/gamepad movement in pixels per second.
    pub speed: f32,
    /// Cursor position before the first frame.
    pub start: [f32; 2],
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: [f32; 3],
    pub target: [f32; 3],
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
}

/// A pickable object and its bounding volume.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TargetConfig {
    Sphere {
        name: String,
        center: [f32; 3],
        radius: f32,
    },
    Aabb {
        name: String,
        min: [f32; 3],
        max: [f32; 3],
    },
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            viewport: ViewportConfig::default(),
            cursor: CursorConfig::default(),
            camera: CameraConfig::default(),
            targets: vec![TargetConfig::Sphere {
                name: "model".to_string(),
                center: [0.0, 0.0, 0.0],
                radius: 1.0,
            }],
        }
    }
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
        }
    }
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            speed: DEFAULT_CURSOR_SPEED,
            start: [100.0, 100.0],
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 10.0],
            target: [0.0, 0.0, 0.0],
            fov_degrees: 45.0,
            near: 1.0,
            far: 100.0,
        }
    }
}

impl TargetConfig {
    pub fn name(&self) -> &str {
        match self {
            TargetConfig::Sphere { name, .. } | TargetConfig::Aabb { name, .. } => name,
        }
    }

    pub fn volume(&self) -> BoundingVolume {
        match self {
            TargetConfig::Sphere { center, radius, .. } => {
                BoundingSphere::new(Vec3::from_array(*center), *radius).into()
            }
            TargetConfig::Aabb { min, max, .. } => {
                Aabb::new(Vec3::from_array(*min), Vec3::from_array(*max)).into()
            }
        }
    }
}

impl PickerConfig {
    /// Load configuration from the default path.
    pub fn load() -> Self {
        Self::load_from_path(Path::new(DEFAULT_CONFIG_PATH))
    }

    /// Load configuration from an explicit path, falling back to defaults on errors.
    pub fn load_from_path(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<PickerConfig>(&contents) {
                Ok(cfg) => cfg,
                Err(err) => {
                    warn!("Failed to parse {}: {err}. Using defaults", path.display());
                    PickerConfig::default()
                }
            },
            Err(err) => {
                if path != Path::new(DEFAULT_CONFIG_PATH)
                    || err.kind() != std::io::ErrorKind::NotFound
                {
                    warn!("Failed to read {}: {err}. Using defaults", path.display());
                } else {
                    tracing::debug!(
                        "Picker config not found at {}. Using defaults",
                        path.display()
                    );
                }
                PickerConfig::default()
            }
        }
    }

    /// Reject values the picker cannot work with.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.viewport.width > 0 && self.viewport.height > 0,
            "viewport must have a non-zero size, got {}x{}",
            self.viewport.width,
            self.viewport.height
        );
        ensure!(
            self.cursor.speed.is_finite(),
            "cursor speed must be finite"
        );
        let cam = &self.camera;
        ensure!(
            cam.fov_degrees > 0.0 && cam.fov_degrees < 180.0,
            "camera fov must be in (0, 180) degrees, got {}",
            cam.fov_degrees
        );
        ensure!(
            cam.near > 0.0 && cam.far > cam.near,
            "camera planes must satisfy 0 < near < far, got near={} far={}",
            cam.near,
            cam.far
        );
        ensure!(
            cam.position != cam.target,
            "camera position and target must differ"
        );
        // The look-at basis uses +Y as up; a vertical view direction has no right vector.
        let forward = (Vec3::from_array(cam.target) - Vec3::from_array(cam.position)).normalize();
        ensure!(
            forward.cross(Vec3::Y).length() > 1e-4,
            "camera must not look straight up or down"
        );
        for target in &self.targets {
            match target {
                TargetConfig::Sphere { name, radius, .. } => {
                    ensure!(*radius >= 0.0, "target {name}: radius must be non-negative");
                }
                TargetConfig::Aabb { name, min, max } => {
                    ensure!(
                        min.iter().zip(max).all(|(lo, hi)| lo <= hi),
                        "target {name}: aabb min must not exceed max"
                    );
                }
            }
        }
        Ok(())
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.viewport.width, self.viewport.height)
    }

    pub fn camera(&self) -> Camera {
        let mut camera = Camera::looking_at(
            Vec3::from_array(self.camera.position),
            Vec3::from_array(self.camera.target),
        );
        camera.fov = self.camera.fov_degrees.to_radians();
        camera.near = self.camera.near;
        camera.far = self.camera.far;
        camera.set_aspect(self.viewport.width, self.viewport.height);
        camera
    }

    pub fn cursor(&self) -> CursorAggregator {
        CursorAggregator::with_speed(Vec2::from_array(self.cursor.start), self.cursor.speed)
    }

    pub fn volumes(&self) -> Vec<BoundingVolume> {
        self.targets.iter().map(TargetConfig::volume).collect()
    }
}
