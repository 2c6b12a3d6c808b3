//! One frame of cursor aggregation followed by a pick against the scene.

use crate::config::PickerConfig;
use pickray_camera::Camera;
use pickray_input::{CursorAggregator, CursorUpdate, FrameInput, ScreenPosition};
use pickray_picking::{BoundingVolume, PickError, PickReport, RayPicker, Viewport};
use pickray_testkit::FrameRecord;
use tracing::{debug, info, trace};

/// Result of one [`PickSession::step`].
#[derive(Debug, Clone)]
pub struct FrameOutcome {
    pub cursor: ScreenPosition,
    pub update: CursorUpdate,
    pub report: PickReport,
}

impl FrameOutcome {
    pub fn hit(&self) -> bool {
        self.report.any()
    }

    pub fn to_record(&self, frame: u64) -> FrameRecord {
        FrameRecord {
            frame,
            cursor: self.cursor.to_array(),
            source: match self.update {
                CursorUpdate::Accumulated(_) => "accumulated",
                CursorUpdate::Overridden(_) => "overridden",
            },
            hit: self.hit(),
            hits: self.report.hits.iter().map(Option::is_some).collect(),
        }
    }
}

/// Owns the cursor and the scene it is aimed at.
pub struct PickSession {
    cursor: CursorAggregator,
    camera: Camera,
    viewport: Viewport,
    names: Vec<String>,
    volumes: Vec<BoundingVolume>,
    picker: RayPicker,
    last_hits: Vec<bool>,
}

impl PickSession {
    pub fn new(config: &PickerConfig) -> Self {
        let volumes = config.volumes();
        Self {
            cursor: config.cursor(),
            camera: config.camera(),
            viewport: config.viewport(),
            names: config.targets.iter().map(|t| t.name().to_string()).collect(),
            last_hits: vec![false; volumes.len()],
            volumes,
            picker: RayPicker::new(),
        }
    }

    pub fn cursor(&self) -> ScreenPosition {
        self.cursor.position()
    }

    /// Advance the cursor with `input`, then pick.
    ///
    /// The cursor update is committed even when picking fails.
    pub fn step(&mut self, input: &FrameInput) -> Result<FrameOutcome, PickError> {
        let update = self.cursor.decide(input, self.viewport.size());
        trace!(?update, "cursor update");
        let cursor = self.cursor.apply(update);

        let camera = self.camera.state();
        let report = self
            .picker
            .pick(cursor, &self.viewport, &camera, &self.volumes)?;
        debug!(x = cursor.x, y = cursor.y, hit = report.any(), "frame picked");

        for (index, name) in self.names.iter().enumerate() {
            let hit = report.is_hit(index);
            if hit != self.last_hits[index] {
                if hit {
                    info!(target_name = %name, "cursor entered target");
                } else {
                    info!(target_name = %name, "cursor left target");
                }
                self.last_hits[index] = hit;
            }
        }

        Ok(FrameOutcome {
            cursor,
            update,
            report,
        })
    }
}
