//! The per-user tracking aggregate.

use std::fmt;

use nalgebra::Point3;
use ndarray::Array2;

use crate::error::TrackError;
use crate::render::Canvas;
use crate::user::limb::{Limb, LimbId};
use crate::user::mask::MaskTexture;
use crate::user::point_cloud::{CloudBuffer, PointCloud};
use crate::user::user_state::UserState;
use crate::user::UserId;

/// Per-user feature toggles and tuning, applied from the next processed
/// frame onward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UserConfig {
    /// Point size used when drawing the cloud.
    pub point_cloud_draw_size: i32,
    /// Sampling step over the depth map; lower is higher resolution.
    pub point_cloud_resolution: usize,
    /// Minimum joint confidence for a limb to count as found.
    pub limb_detection_confidence: f32,
    pub use_mask_pixels: bool,
    pub use_mask_texture: bool,
    pub use_point_cloud: bool,
    pub use_auto_calibration: bool,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            point_cloud_draw_size: 2,
            point_cloud_resolution: 2,
            limb_detection_confidence: 0.3,
            use_mask_pixels: false,
            use_mask_texture: false,
            use_point_cloud: false,
            use_auto_calibration: true,
        }
    }
}

/// One body observed by the sensor: lifecycle state, skeleton limbs,
/// centroid, point cloud, and depth mask.
///
/// All public accessors are side-effect-free reads; every mutation goes
/// through the tracker module via crate-private methods, so consumers hold
/// a read-only capability by construction.
#[derive(Debug, Clone)]
pub struct TrackedUser {
    id: UserId,
    state: UserState,
    center: Point3<f32>,
    limbs: [Limb; LimbId::COUNT],
    cloud: CloudBuffer,
    mask_pixels: Array2<u8>,
    mask_texture: Option<MaskTexture>,
    config: UserConfig,
    new_pixels: bool,
    new_point_cloud: bool,
}

impl TrackedUser {
    pub(crate) fn new(id: UserId, config: UserConfig) -> Self {
        Self {
            id,
            state: UserState::Lost,
            center: Point3::origin(),
            limbs: core::array::from_fn(|i| {
                let (start, end) = LimbId::ALL[i].joints();
                Limb::new(start, end)
            }),
            cloud: CloudBuffer::default(),
            mask_pixels: Array2::zeros((0, 0)),
            mask_texture: None,
            config,
            new_pixels: false,
            new_point_cloud: false,
        }
    }

    /// Device-scoped user id; unique per concurrently tracked body, not
    /// across devices.
    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn state(&self) -> UserState {
        self.state
    }

    pub fn is_found(&self) -> bool {
        self.state.is_found()
    }

    pub fn is_tracking(&self) -> bool {
        self.state.is_tracking()
    }

    pub fn is_skeleton(&self) -> bool {
        self.state.is_skeleton()
    }

    pub fn is_calibrating(&self) -> bool {
        self.state.is_calibrating()
    }

    /// Center of mass in world coordinates.
    pub fn center(&self) -> Point3<f32> {
        self.center
    }

    pub fn num_limbs(&self) -> usize {
        LimbId::COUNT
    }

    pub fn limb(&self, id: LimbId) -> &Limb {
        &self.limbs[id.index()]
    }

    /// Numeric limb lookup; fails with [`TrackError::InvalidLimbIndex`]
    /// when `index` is outside `0..num_limbs()`.
    pub fn limb_at(&self, index: usize) -> Result<&Limb, TrackError> {
        LimbId::from_index(index).map(|id| self.limb(id))
    }

    pub fn limbs(&self) -> &[Limb] {
        &self.limbs
    }

    /// The currently readable point cloud. Empty while the point-cloud
    /// toggle is off.
    pub fn point_cloud(&self) -> &PointCloud {
        self.cloud.front()
    }

    /// The user's 0/255 depth mask. Empty while the mask-pixels toggle is
    /// off.
    pub fn mask_pixels(&self) -> &Array2<u8> {
        &self.mask_pixels
    }

    /// RGBA texture image derived from the mask. `None` while the
    /// mask-texture toggle is off or no pixels have arrived yet.
    pub fn mask_texture(&self) -> Option<&MaskTexture> {
        self.mask_texture.as_ref()
    }

    /// Fresh mask pixels arrived in the last update and have not been
    /// consumed by a texture rebuild.
    pub fn has_new_mask_pixels(&self) -> bool {
        self.new_pixels
    }

    /// The front cloud buffer changed in the last update.
    pub fn has_new_point_cloud(&self) -> bool {
        self.new_point_cloud
    }

    pub fn config(&self) -> &UserConfig {
        &self.config
    }

    pub fn point_cloud_draw_size(&self) -> i32 {
        self.config.point_cloud_draw_size
    }

    pub fn set_point_cloud_draw_size(&mut self, size: i32) {
        self.config.point_cloud_draw_size = size.max(1);
    }

    pub fn point_cloud_resolution(&self) -> usize {
        self.config.point_cloud_resolution
    }

    pub fn set_point_cloud_resolution(&mut self, resolution: usize) {
        self.config.point_cloud_resolution = resolution.max(1);
    }

    pub fn limb_detection_confidence(&self) -> f32 {
        self.config.limb_detection_confidence
    }

    pub fn set_limb_detection_confidence(&mut self, level: f32) {
        self.config.limb_detection_confidence = level.clamp(0.0, 1.0);
    }

    pub fn use_mask_pixels(&self) -> bool {
        self.config.use_mask_pixels
    }

    /// Disabling clears the stored mask so reads return an empty buffer
    /// rather than a stale snapshot.
    pub fn set_use_mask_pixels(&mut self, enabled: bool) {
        self.config.use_mask_pixels = enabled;
        if !enabled {
            self.mask_pixels = Array2::zeros((0, 0));
            self.new_pixels = false;
        }
    }

    pub fn use_mask_texture(&self) -> bool {
        self.config.use_mask_texture
    }

    pub fn set_use_mask_texture(&mut self, enabled: bool) {
        self.config.use_mask_texture = enabled;
        if !enabled {
            self.mask_texture = None;
        }
    }

    pub fn use_point_cloud(&self) -> bool {
        self.config.use_point_cloud
    }

    pub fn set_use_point_cloud(&mut self, enabled: bool) {
        self.config.use_point_cloud = enabled;
        if !enabled {
            self.cloud.clear();
            self.new_point_cloud = false;
        }
    }

    pub fn use_auto_calibration(&self) -> bool {
        self.config.use_auto_calibration
    }

    pub fn set_use_auto_calibration(&mut self, enabled: bool) {
        self.config.use_auto_calibration = enabled;
    }

    /// Human-readable dump of ids, state, and toggles for diagnostics.
    pub fn debug_info(&self) -> String {
        self.to_string()
    }

    /// Draw every found limb. Does nothing unless a skeleton is ready.
    pub fn draw_skeleton(&self, canvas: &mut impl Canvas) {
        if !self.is_skeleton() {
            return;
        }
        for limb in &self.limbs {
            limb.draw(canvas);
        }
    }

    /// Draw the readable point cloud, if any.
    pub fn draw_point_cloud(&self, canvas: &mut impl Canvas) {
        let cloud = self.cloud.front();
        if cloud.is_empty() {
            return;
        }
        canvas.draw_points(
            cloud.vertices(),
            cloud.colors(),
            self.config.point_cloud_draw_size,
        );
    }

    /// Blit the mask texture, if one is maintained.
    pub fn draw_mask(&self, canvas: &mut impl Canvas) {
        if let Some(texture) = &self.mask_texture {
            canvas.draw_image(texture.width(), texture.height(), texture.rgba());
        }
    }

    // ---- tracker-only write path ----

    pub(crate) fn set_state(&mut self, state: UserState) {
        self.state = state;
    }

    pub(crate) fn set_center(&mut self, center: Point3<f32>) {
        self.center = center;
    }

    pub(crate) fn limb_mut(&mut self, id: LimbId) -> &mut Limb {
        &mut self.limbs[id.index()]
    }

    pub(crate) fn clear_limbs(&mut self) {
        for limb in &mut self.limbs {
            limb.clear();
        }
    }

    pub(crate) fn cloud_mut(&mut self) -> &mut CloudBuffer {
        &mut self.cloud
    }

    pub(crate) fn set_mask_pixels(&mut self, pixels: Array2<u8>) {
        self.mask_pixels = pixels;
        self.new_pixels = true;
    }

    pub(crate) fn set_mask_texture(&mut self, texture: MaskTexture) {
        self.mask_texture = Some(texture);
        self.new_pixels = false;
    }

    pub(crate) fn set_new_point_cloud(&mut self, fresh: bool) {
        self.new_point_cloud = fresh;
    }

    /// Reset to the lost state: limbs cleared, buffers emptied, centroid
    /// back at the origin. Configuration survives.
    pub(crate) fn reset(&mut self) {
        self.state = UserState::Lost;
        self.center = Point3::origin();
        self.clear_limbs();
        self.cloud.clear();
        self.mask_pixels = Array2::zeros((0, 0));
        self.mask_texture = None;
        self.new_pixels = false;
        self.new_point_cloud = false;
    }
}

impl fmt::Display for TrackedUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "user {}: state={:?} found={} tracking={} skeleton={} calibrating={} \
             maskPixels={} maskTexture={} pointCloud={} autoCalibration={} \
             newPixels={} newPointCloud={}",
            self.id,
            self.state,
            self.is_found(),
            self.is_tracking(),
            self.is_skeleton(),
            self.is_calibrating(),
            self.config.use_mask_pixels,
            self.config.use_mask_texture,
            self.config.use_point_cloud,
            self.config.use_auto_calibration,
            self.new_pixels,
            self.new_point_cloud,
        )
    }
}
