//! Main per-frame tracking update: the sole writer of user state.

use nalgebra::{Point2, Point3};
use ndarray::Array2;
use tracing::{debug, warn};

use crate::events::{
    GestureEvent, GestureStatus, HandEvent, HandStatus, TrackerEvent, UserEvent, UserStatus,
};
use crate::tracker::frame::{
    BodyPhase, DepthMap, GesturePhase, HandPhase, JointSample, SensorFrame,
};
use crate::user::joint::SkeletonJoint;
use crate::user::limb::LimbId;
use crate::user::mask::{mask_from_labels, MaskTexture};
use crate::user::tracked_user::{TrackedUser, UserConfig};
use crate::user::user_state::UserState;
use crate::user::{Hand, UserId};

/// Configuration for the user tracker.
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// Identifier of the sensor device this tracker consumes.
    pub device_id: u32,
    /// Maximum number of concurrently tracked bodies.
    pub max_users: usize,
    /// Configuration applied to newly appeared users.
    pub user_defaults: UserConfig,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            device_id: 0,
            max_users: 4,
            user_defaults: UserConfig::default(),
        }
    }
}

/// Applies each sensor frame to the tracked-user set and emits lifecycle
/// events.
///
/// This is the single writer in the model: consumers only ever see users
/// through the read accessors, and buffer hand-off happens inside `update`
/// at the frame boundary.
pub struct UserTracker {
    users: Vec<TrackedUser>,
    hands: Vec<Hand>,
    config: TrackerConfig,
    frame_id: u64,
}

impl UserTracker {
    pub fn new(config: TrackerConfig) -> Self {
        Self {
            users: Vec::new(),
            hands: Vec::new(),
            config,
            frame_id: 0,
        }
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn device_id(&self) -> u32 {
        self.config.device_id
    }

    /// Frames processed so far.
    pub fn frame_id(&self) -> u64 {
        self.frame_id
    }

    /// Every user slot, including ones currently lost.
    pub fn users(&self) -> &[TrackedUser] {
        &self.users
    }

    pub fn user(&self, id: UserId) -> Option<&TrackedUser> {
        self.users.iter().find(|u| u.id() == id)
    }

    /// Mutable access for per-user configuration changes; takes effect
    /// from the next processed frame.
    pub fn user_mut(&mut self, id: UserId) -> Option<&mut TrackedUser> {
        self.users.iter_mut().find(|u| u.id() == id)
    }

    /// Users the sensor currently sees.
    pub fn num_tracked_users(&self) -> usize {
        self.users.iter().filter(|u| u.is_found()).count()
    }

    pub fn hands(&self) -> &[Hand] {
        &self.hands
    }

    pub fn hand(&self, id: UserId) -> Option<&Hand> {
        self.hands.iter().find(|h| h.id() == id)
    }

    /// Apply one sensor frame and return the lifecycle events it caused.
    pub fn update(&mut self, frame: SensorFrame) -> Vec<TrackerEvent> {
        self.frame_id += 1;
        let mut events = Vec::new();
        let timestamp = frame.timestamp_millis;
        let device_id = self.config.device_id;

        for body in &frame.bodies {
            let Some(index) = self.find_or_create(body.user_id) else {
                warn!(
                    user_id = body.user_id,
                    max_users = self.config.max_users,
                    "ignoring body beyond tracker capacity"
                );
                continue;
            };
            let user = &mut self.users[index];
            let previous = user.state();

            emit_user_events(
                &mut events,
                device_id,
                body.user_id,
                previous,
                body.phase,
                timestamp,
            );

            if body.phase == BodyPhase::Lost {
                if previous != UserState::Lost {
                    debug!(user_id = body.user_id, "user lost");
                }
                user.reset();
                continue;
            }

            let next = state_for_phase(body.phase);
            if next != previous {
                debug!(user_id = body.user_id, from = ?previous, to = ?next, "user state changed");
            }
            user.set_state(next);
            user.set_center(body.centroid);

            if next == UserState::SkeletonReady {
                update_limbs(user, &body.joints);
            } else {
                user.clear_limbs();
            }

            user.set_new_point_cloud(false);
            if user.use_point_cloud() {
                if let (Some(labels), Some(depth)) = (&frame.scene_labels, &frame.depth) {
                    fill_point_cloud(user, body.user_id, labels, depth);
                    user.cloud_mut().swap();
                    user.set_new_point_cloud(true);
                }
            }

            if user.use_mask_pixels() {
                if let Some(labels) = &frame.scene_labels {
                    user.set_mask_pixels(mask_from_labels(labels, body.user_id as u16));
                }
            }
            // rebuild the texture only for fresh pixels, so consumers can
            // skip redundant uploads
            if user.use_mask_texture() && user.has_new_mask_pixels() {
                let texture = MaskTexture::from_mask(user.mask_pixels());
                user.set_mask_texture(texture);
            }
        }

        for hand in &frame.hands {
            self.apply_hand(hand.hand_id, hand.phase, hand.position, hand.world_position);
            let status = match hand.phase {
                HandPhase::Started => HandStatus::TrackingStarted,
                HandPhase::Updated => HandStatus::TrackingUpdated,
                HandPhase::Stopped => HandStatus::TrackingStopped,
            };
            events.push(TrackerEvent::Hand(HandEvent::new(
                device_id,
                status,
                hand.hand_id,
                hand.position,
                hand.world_position,
                timestamp,
            )));
        }

        for gesture in &frame.gestures {
            let (status, progress) = match gesture.phase {
                GesturePhase::Progress(p) => (GestureStatus::Progress, p.clamp(0.0, 1.0)),
                GesturePhase::Recognized => (GestureStatus::Recognized, 1.0),
            };
            events.push(TrackerEvent::Gesture(GestureEvent::new(
                device_id,
                gesture.name.clone(),
                status,
                progress,
                gesture.position,
                gesture.world_position,
                timestamp,
            )));
        }

        events
    }

    fn find_or_create(&mut self, id: UserId) -> Option<usize> {
        if let Some(index) = self.users.iter().position(|u| u.id() == id) {
            return Some(index);
        }
        if self.users.len() < self.config.max_users {
            self.users
                .push(TrackedUser::new(id, self.config.user_defaults));
            return Some(self.users.len() - 1);
        }
        // recycle a slot whose user the sensor no longer sees
        if let Some(index) = self.users.iter().position(|u| !u.is_found()) {
            self.users[index] = TrackedUser::new(id, self.config.user_defaults);
            return Some(index);
        }
        None
    }

    fn apply_hand(
        &mut self,
        id: UserId,
        phase: HandPhase,
        position: Point2<f32>,
        world_position: Point3<f32>,
    ) {
        match phase {
            HandPhase::Started | HandPhase::Updated => {
                if let Some(hand) = self.hands.iter_mut().find(|h| h.id == id) {
                    hand.position = position;
                    hand.world_position = world_position;
                    hand.tracking = true;
                } else {
                    self.hands.push(Hand::new(id, position, world_position));
                }
            }
            HandPhase::Stopped => {
                self.hands.retain(|h| h.id() != id);
            }
        }
    }
}

/// Total mapping from the sensor's per-frame phase report to the user
/// lifecycle state. Only the five valid states are reachable.
fn state_for_phase(phase: BodyPhase) -> UserState {
    match phase {
        BodyPhase::Detected => UserState::Found,
        BodyPhase::Tracking | BodyPhase::CalibrationFailed => UserState::Tracking,
        BodyPhase::Calibrating => UserState::Calibrating,
        BodyPhase::SkeletonTracked => UserState::SkeletonReady,
        BodyPhase::Lost => UserState::Lost,
    }
}

fn emit_user_events(
    events: &mut Vec<TrackerEvent>,
    device_id: u32,
    user_id: UserId,
    previous: UserState,
    phase: BodyPhase,
    timestamp: u64,
) {
    let mut push = |status| {
        events.push(TrackerEvent::User(UserEvent::new(
            device_id, status, user_id, timestamp,
        )));
    };

    if previous == UserState::Lost && phase != BodyPhase::Lost {
        push(UserStatus::Found);
    }

    match phase {
        BodyPhase::Calibrating => {
            if previous != UserState::Calibrating {
                push(UserStatus::CalibrationStarted);
            }
        }
        BodyPhase::CalibrationFailed => {
            if previous == UserState::Calibrating {
                push(UserStatus::CalibrationFailed);
            }
        }
        BodyPhase::SkeletonTracked => {
            if previous != UserState::SkeletonReady {
                if previous == UserState::Calibrating {
                    push(UserStatus::CalibrationSucceeded);
                }
                push(UserStatus::SkeletonFound);
            }
        }
        BodyPhase::Lost => {
            if previous != UserState::Lost {
                if previous == UserState::SkeletonReady {
                    push(UserStatus::SkeletonLost);
                }
                push(UserStatus::Lost);
            }
        }
        BodyPhase::Detected | BodyPhase::Tracking => {}
    }
}

fn update_limbs(user: &mut TrackedUser, joints: &[JointSample]) {
    let threshold = user.limb_detection_confidence();
    let sample = |joint: SkeletonJoint| joints.iter().find(|s| s.joint == joint).copied();

    for id in LimbId::ALL {
        let (start_joint, end_joint) = id.joints();
        let fitted = match (sample(start_joint), sample(end_joint)) {
            (Some(start), Some(end))
                if start.position_confidence >= threshold
                    && end.position_confidence >= threshold =>
            {
                Some((start, end))
            }
            _ => None,
        };
        match fitted {
            Some((start, end)) => user.limb_mut(id).set_geometry(
                start.position,
                end.position,
                start.world_position,
                end.world_position,
                start.orientation,
            ),
            None => user.limb_mut(id).clear(),
        }
    }
}

fn fill_point_cloud(
    user: &mut TrackedUser,
    user_id: UserId,
    labels: &Array2<u16>,
    depth: &DepthMap,
) {
    let step = user.point_cloud_resolution();
    let (label_height, label_width) = labels.dim();
    let height = depth.height().min(label_height);
    let width = depth.width().min(label_width);
    let label = user_id as u16;

    let back = user.cloud_mut().back_mut();
    back.clear();
    for y in (0..height).step_by(step) {
        for x in (0..width).step_by(step) {
            if labels[[y, x]] == label {
                back.push(depth.point(x, y), depth.color(x, y));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::frame::{BodyObservation, GestureObservation, HandObservation};
    use crate::user::joint::JointOrientation;
    use ndarray::Array2;

    fn body(user_id: UserId, phase: BodyPhase) -> BodyObservation {
        BodyObservation {
            user_id,
            phase,
            centroid: Point3::new(0.0, 0.0, 1500.0),
            joints: Vec::new(),
        }
    }

    fn frame_with(bodies: Vec<BodyObservation>, timestamp_millis: u64) -> SensorFrame {
        SensorFrame {
            timestamp_millis,
            bodies,
            ..SensorFrame::default()
        }
    }

    fn full_skeleton(confidence: f32) -> Vec<JointSample> {
        use SkeletonJoint::*;
        [
            Head, Neck, Torso, LeftShoulder, LeftElbow, LeftHand, RightShoulder, RightElbow,
            RightHand, LeftHip, LeftKnee, LeftFoot, RightHip, RightKnee, RightFoot,
        ]
        .iter()
        .enumerate()
        .map(|(i, &joint)| JointSample {
            joint,
            position: Point2::new(i as f32, i as f32 * 2.0),
            world_position: Point3::new(i as f32, 0.0, 1000.0),
            orientation: JointOrientation::default(),
            position_confidence: confidence,
        })
        .collect()
    }

    fn assert_invariants(user: &TrackedUser) {
        if user.is_skeleton() {
            assert!(user.is_tracking());
        }
        if user.is_tracking() {
            assert!(user.is_found());
        }
        assert!(!(user.is_calibrating() && user.is_skeleton()));
    }

    #[test]
    fn test_lifecycle_found_calibrating_skeleton() {
        let mut tracker = UserTracker::new(TrackerConfig::default());

        let events = tracker.update(frame_with(vec![body(1, BodyPhase::Detected)], 100));
        let user = tracker.user(1).unwrap();
        assert_eq!(user.state(), UserState::Found);
        assert_invariants(user);
        assert_eq!(
            events,
            vec![TrackerEvent::User(UserEvent::new(0, UserStatus::Found, 1, 100))]
        );

        let events = tracker.update(frame_with(vec![body(1, BodyPhase::Calibrating)], 133));
        let user = tracker.user(1).unwrap();
        assert_eq!(user.state(), UserState::Calibrating);
        assert_invariants(user);
        assert_eq!(
            events,
            vec![TrackerEvent::User(UserEvent::new(
                0,
                UserStatus::CalibrationStarted,
                1,
                133
            ))]
        );

        let mut observation = body(1, BodyPhase::SkeletonTracked);
        observation.joints = full_skeleton(0.9);
        let events = tracker.update(frame_with(vec![observation], 166));
        let user = tracker.user(1).unwrap();
        assert_eq!(user.state(), UserState::SkeletonReady);
        assert_invariants(user);
        assert_eq!(
            events,
            vec![
                TrackerEvent::User(UserEvent::new(0, UserStatus::CalibrationSucceeded, 1, 166)),
                TrackerEvent::User(UserEvent::new(0, UserStatus::SkeletonFound, 1, 166)),
            ]
        );
    }

    #[test]
    fn test_lost_resets_in_same_update() {
        let mut tracker = UserTracker::new(TrackerConfig::default());
        let mut observation = body(1, BodyPhase::SkeletonTracked);
        observation.joints = full_skeleton(0.9);
        tracker.update(frame_with(vec![observation], 100));
        assert!(tracker.user(1).unwrap().is_skeleton());

        let events = tracker.update(frame_with(vec![body(1, BodyPhase::Lost)], 200));
        let user = tracker.user(1).unwrap();
        assert!(!user.is_found());
        assert!(!user.is_tracking());
        assert!(!user.is_skeleton());
        assert_eq!(user.center(), Point3::origin());
        assert_eq!(
            events,
            vec![
                TrackerEvent::User(UserEvent::new(0, UserStatus::SkeletonLost, 1, 200)),
                TrackerEvent::User(UserEvent::new(0, UserStatus::Lost, 1, 200)),
            ]
        );
    }

    #[test]
    fn test_calibration_failure_falls_back_to_tracking() {
        let mut tracker = UserTracker::new(TrackerConfig::default());
        tracker.update(frame_with(vec![body(2, BodyPhase::Calibrating)], 10));

        let events = tracker.update(frame_with(vec![body(2, BodyPhase::CalibrationFailed)], 20));
        let user = tracker.user(2).unwrap();
        assert_eq!(user.state(), UserState::Tracking);
        assert_invariants(user);
        assert!(events.contains(&TrackerEvent::User(UserEvent::new(
            0,
            UserStatus::CalibrationFailed,
            2,
            20
        ))));
    }

    #[test]
    fn test_limb_confidence_threshold() {
        let mut tracker = UserTracker::new(TrackerConfig::default());
        let mut observation = body(1, BodyPhase::SkeletonTracked);
        observation.joints = full_skeleton(0.2); // below the 0.3 default
        tracker.update(frame_with(vec![observation], 50));

        let user = tracker.user(1).unwrap();
        assert!(user.is_skeleton());
        assert!(user.limbs().iter().all(|l| !l.is_found()));

        let mut observation = body(1, BodyPhase::SkeletonTracked);
        observation.joints = full_skeleton(0.8);
        tracker.update(frame_with(vec![observation], 83));

        let user = tracker.user(1).unwrap();
        assert!(user.limbs().iter().all(|l| l.is_found()));
        let head = user.limb(LimbId::Head);
        assert!(head.is_point_marker());
        assert_eq!(head.begin(), Point2::new(0.0, 0.0));
    }

    #[test]
    fn test_capacity_ignores_extra_bodies() {
        let config = TrackerConfig {
            max_users: 1,
            ..TrackerConfig::default()
        };
        let mut tracker = UserTracker::new(config);
        tracker.update(frame_with(
            vec![body(1, BodyPhase::Detected), body(2, BodyPhase::Detected)],
            10,
        ));
        assert!(tracker.user(1).is_some());
        assert!(tracker.user(2).is_none());
        assert_eq!(tracker.num_tracked_users(), 1);

        // a lost slot is recycled for the next new body
        tracker.update(frame_with(vec![body(1, BodyPhase::Lost)], 20));
        tracker.update(frame_with(vec![body(3, BodyPhase::Detected)], 30));
        assert!(tracker.user(3).is_some());
        assert!(tracker.user(1).is_none());
    }

    #[test]
    fn test_point_cloud_sampling_and_swap() {
        let config = TrackerConfig {
            user_defaults: UserConfig {
                use_point_cloud: true,
                point_cloud_resolution: 2,
                ..UserConfig::default()
            },
            ..TrackerConfig::default()
        };
        let mut tracker = UserTracker::new(config);

        // 4x4 depth map fully labelled as user 1
        let labels = Array2::from_elem((4, 4), 1u16);
        let points = (0..16)
            .map(|i| Point3::new((i % 4) as f32, (i / 4) as f32, 1000.0))
            .collect();
        let frame = SensorFrame {
            timestamp_millis: 10,
            bodies: vec![body(1, BodyPhase::Tracking)],
            scene_labels: Some(labels),
            depth: Some(DepthMap::new(4, 4, points, None)),
            ..SensorFrame::default()
        };
        tracker.update(frame.clone());

        let user = tracker.user(1).unwrap();
        // step 2 over a 4x4 grid: rows 0 and 2, columns 0 and 2
        assert_eq!(user.point_cloud().len(), 4);
        assert!(user.has_new_point_cloud());
        let first_frame_cloud = user.point_cloud().clone();

        // an identical frame republishes the same cloud through the other slot
        tracker.update(frame);
        let user = tracker.user(1).unwrap();
        assert_eq!(*user.point_cloud(), first_frame_cloud);
    }

    #[test]
    fn test_point_cloud_disabled_stays_empty() {
        let mut tracker = UserTracker::new(TrackerConfig::default());
        let labels = Array2::from_elem((2, 2), 1u16);
        let points = vec![Point3::origin(); 4];
        tracker.update(SensorFrame {
            timestamp_millis: 5,
            bodies: vec![body(1, BodyPhase::Tracking)],
            scene_labels: Some(labels),
            depth: Some(DepthMap::new(2, 2, points, None)),
            ..SensorFrame::default()
        });
        let user = tracker.user(1).unwrap();
        assert!(user.point_cloud().is_empty());
        assert!(!user.has_new_point_cloud());
    }

    #[test]
    fn test_mask_and_texture_rebuild() {
        let config = TrackerConfig {
            user_defaults: UserConfig {
                use_mask_pixels: true,
                use_mask_texture: true,
                ..UserConfig::default()
            },
            ..TrackerConfig::default()
        };
        let mut tracker = UserTracker::new(config);

        let mut labels = Array2::zeros((2, 3));
        labels[[0, 0]] = 1u16;
        labels[[1, 2]] = 1u16;
        tracker.update(SensorFrame {
            timestamp_millis: 5,
            bodies: vec![body(1, BodyPhase::Tracking)],
            scene_labels: Some(labels),
            ..SensorFrame::default()
        });

        let user = tracker.user(1).unwrap();
        assert_eq!(user.mask_pixels().dim(), (2, 3));
        assert_eq!(user.mask_pixels()[[0, 0]], 255);
        assert_eq!(user.mask_pixels()[[0, 1]], 0);
        let texture = user.mask_texture().unwrap();
        assert_eq!((texture.width(), texture.height()), (3, 2));
        // texture rebuild consumed the new-pixels flag
        assert!(!user.has_new_mask_pixels());
    }

    #[test]
    fn test_hand_lifecycle() {
        let mut tracker = UserTracker::new(TrackerConfig::default());
        let started = SensorFrame {
            timestamp_millis: 1,
            hands: vec![HandObservation {
                hand_id: 5,
                phase: HandPhase::Started,
                position: Point2::new(10.0, 20.0),
                world_position: Point3::new(1.0, 2.0, 3.0),
            }],
            ..SensorFrame::default()
        };
        let events = tracker.update(started);
        assert_eq!(
            events,
            vec![TrackerEvent::Hand(HandEvent::new(
                0,
                HandStatus::TrackingStarted,
                5,
                Point2::new(10.0, 20.0),
                Point3::new(1.0, 2.0, 3.0),
                1
            ))]
        );
        let hand = tracker.hand(5).unwrap();
        assert!(hand.is_tracking());

        let stopped = SensorFrame {
            timestamp_millis: 2,
            hands: vec![HandObservation {
                hand_id: 5,
                phase: HandPhase::Stopped,
                position: Point2::new(10.0, 20.0),
                world_position: Point3::new(1.0, 2.0, 3.0),
            }],
            ..SensorFrame::default()
        };
        tracker.update(stopped);
        assert!(tracker.hand(5).is_none());
    }

    #[test]
    fn test_gesture_events() {
        let mut tracker = UserTracker::new(TrackerConfig::default());
        let frame = SensorFrame {
            timestamp_millis: 5000,
            gestures: vec![GestureObservation {
                name: "Wave".into(),
                phase: GesturePhase::Recognized,
                position: Point2::new(10.0, 20.0),
                world_position: Point3::new(100.0, 200.0, 300.0),
            }],
            ..SensorFrame::default()
        };
        let events = tracker.update(frame);
        assert_eq!(
            events,
            vec![TrackerEvent::Gesture(GestureEvent::new(
                0,
                "Wave",
                GestureStatus::Recognized,
                1.0,
                Point2::new(10.0, 20.0),
                Point3::new(100.0, 200.0, 300.0),
                5000
            ))]
        );
    }
}
