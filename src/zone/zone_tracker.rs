//! Per-frame presence zone state machine.

use std::time::Duration;

use log::{debug, warn};

use crate::zone::detection::{Detection, PERSON_CLASS};
use crate::zone::draw::{Color, DrawInstruction};
use crate::zone::error::ZoneError;
use crate::zone::rect::{DEFAULT_ZONE_MARGIN, Rect, contains};
use crate::zone::registry::{TrackId, TrackRegistry};
use crate::zone::track::Track;

/// Configuration for the ZoneTracker.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneConfig {
    /// Time a track must persist before its zone freezes
    pub dwell_threshold: Duration,
    /// Fraction of the box size added on each side of a frozen zone
    pub zone_margin: f32,
    /// Only detections of this class are tracked; `None` accepts every class
    pub class_filter: Option<u32>,
}

impl Default for ZoneConfig {
    fn default() -> Self {
        Self {
            dwell_threshold: Duration::from_secs(2),
            zone_margin: DEFAULT_ZONE_MARGIN,
            class_filter: Some(PERSON_CLASS),
        }
    }
}

impl ZoneConfig {
    pub fn with_dwell_threshold(mut self, dwell_threshold: Duration) -> Self {
        self.dwell_threshold = dwell_threshold;
        self
    }

    pub fn with_zone_margin(mut self, zone_margin: f32) -> Self {
        self.zone_margin = zone_margin;
        self
    }

    pub fn with_class_filter(mut self, class_filter: Option<u32>) -> Self {
        self.class_filter = class_filter;
        self
    }

    pub fn validate(&self) -> Result<(), ZoneError> {
        if !self.zone_margin.is_finite() || self.zone_margin < 0.0 {
            return Err(ZoneError::InvalidConfig(format!(
                "zone_margin must be a finite non-negative ratio, got {}",
                self.zone_margin
            )));
        }
        Ok(())
    }
}

/// A detection dropped at ingestion.
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedDetection {
    /// Position in the frame's detection list
    pub index: usize,
    pub track_id: Option<TrackId>,
    pub error: ZoneError,
}

/// Everything produced by one call to [`ZoneTracker::process_frame`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameOutput {
    /// Outlines in emission order
    pub draws: Vec<DrawInstruction>,
    /// Tracks seen for the first time this frame
    pub created: Vec<TrackId>,
    /// Tracks whose zone froze this frame
    pub zones_fixed: Vec<TrackId>,
    pub rejected: Vec<RejectedDetection>,
    /// Detections without a track id or outside the class filter
    pub skipped: usize,
}

pub struct ZoneTracker {
    registry: TrackRegistry,
    config: ZoneConfig,
    frame_id: u64,
}

impl ZoneTracker {
    pub fn new(config: ZoneConfig) -> Result<Self, ZoneError> {
        config.validate()?;
        Ok(Self {
            registry: TrackRegistry::new(),
            config,
            frame_id: 0,
        })
    }

    pub fn with_default_config() -> Self {
        Self {
            registry: TrackRegistry::new(),
            config: ZoneConfig::default(),
            frame_id: 0,
        }
    }

    /// Process every detection of one frame observed at `now`.
    ///
    /// Detections with invalid boxes are reported in [`FrameOutput::rejected`]
    /// and do not stop the rest of the frame. Registry invariant violations
    /// are returned as errors.
    pub fn process_frame(
        &mut self,
        detections: &[Detection],
        now: Duration,
    ) -> Result<FrameOutput, ZoneError> {
        self.frame_id += 1;
        let mut output = FrameOutput::default();

        for (index, det) in detections.iter().enumerate() {
            let Some(track_id) = det.track_id else {
                output.skipped += 1;
                continue;
            };
            if self.config.class_filter.is_some_and(|class| class != det.class_id) {
                output.skipped += 1;
                continue;
            }
            if let Err(error) = det.bbox.validate() {
                warn!(
                    "frame {}: rejected detection {} of track {}: {}",
                    self.frame_id, index, track_id, error
                );
                output.rejected.push(RejectedDetection {
                    index,
                    track_id: det.track_id,
                    error,
                });
                continue;
            }
            self.observe(track_id, det.bbox, now, &mut output)?;
        }

        Ok(output)
    }

    fn observe(
        &mut self,
        track_id: TrackId,
        bbox: Rect,
        now: Duration,
        output: &mut FrameOutput,
    ) -> Result<(), ZoneError> {
        let (track, is_new) = self.registry.get_or_create(track_id, bbox, now);
        if is_new {
            output.created.push(track_id);
            output
                .draws
                .push(DrawInstruction::detection(track_id, bbox, Color::Neutral));
            return Ok(());
        }

        let mut fixed_zone = track.fixed_zone();
        let dwell = track.dwell(now);
        if fixed_zone.is_none() && dwell >= self.config.dwell_threshold {
            let zone = bbox.expand(self.config.zone_margin);
            self.registry.set_zone(track_id, zone)?;
            debug!(
                "frame {}: track {} dwelled {:?}, zone fixed",
                self.frame_id, track_id, dwell
            );
            output.zones_fixed.push(track_id);
            output
                .draws
                .push(DrawInstruction::zone(track_id, zone, Color::InZone));
            fixed_zone = Some(zone);
        }

        if let Some(zone) = fixed_zone {
            let color = if contains(&bbox, &zone) {
                Color::InZone
            } else {
                Color::OutOfZone
            };
            output
                .draws
                .push(DrawInstruction::detection(track_id, bbox, color));
            output
                .draws
                .push(DrawInstruction::zone(track_id, zone, color));
        }

        self.registry.update_box(track_id, bbox, now)
    }

    /// Remove tracks not observed for longer than `ttl`.
    ///
    /// Never called by [`process_frame`](Self::process_frame); tracks that
    /// leave the scene stay in the registry until the caller evicts them.
    pub fn evict_idle(&mut self, now: Duration, ttl: Duration) -> Vec<TrackId> {
        self.registry.evict_idle(now, ttl)
    }

    pub fn track(&self, track_id: TrackId) -> Option<&Track> {
        self.registry.get(track_id)
    }

    pub fn tracks(&self) -> impl Iterator<Item = &Track> {
        self.registry.iter()
    }

    pub fn registry(&self) -> &TrackRegistry {
        &self.registry
    }

    pub fn config(&self) -> &ZoneConfig {
        &self.config
    }

    /// Number of frames processed since creation or the last reset.
    pub fn frame_count(&self) -> u64 {
        self.frame_id
    }

    /// Forget every track and start a new session.
    pub fn reset(&mut self) {
        self.registry.clear();
        self.frame_id = 0;
    }
}

impl Default for ZoneTracker {
    fn default() -> Self {
        Self::with_default_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zone::draw::OutlineKind;
    use crate::zone::track_state::TrackState;

    fn secs(s: f64) -> Duration {
        Duration::from_secs_f64(s)
    }

    #[test]
    fn test_new_track_gets_neutral_outline_only() {
        let mut tracker = ZoneTracker::default();
        let out = tracker
            .process_frame(&[Detection::new(1, 10.0, 10.0, 50.0, 50.0)], secs(0.0))
            .unwrap();

        assert_eq!(out.created, vec![1]);
        assert_eq!(
            out.draws,
            vec![DrawInstruction::detection(
                1,
                Rect::new(10.0, 10.0, 50.0, 50.0),
                Color::Neutral
            )]
        );
        assert_eq!(tracker.track(1).unwrap().state(), TrackState::New);
        assert_eq!(tracker.frame_count(), 1);
    }

    #[test]
    fn test_pending_track_emits_nothing() {
        let mut tracker = ZoneTracker::default();
        tracker
            .process_frame(&[Detection::new(1, 10.0, 10.0, 50.0, 50.0)], secs(0.0))
            .unwrap();
        let out = tracker
            .process_frame(&[Detection::new(1, 12.0, 12.0, 52.0, 52.0)], secs(1.0))
            .unwrap();

        assert!(out.draws.is_empty());
        let track = tracker.track(1).unwrap();
        assert_eq!(track.state(), TrackState::Pending);
        assert_eq!(track.current_box(), Rect::new(12.0, 12.0, 52.0, 52.0));
        assert_eq!(track.fixed_zone(), None);
    }

    #[test]
    fn test_freezing_frame_draw_order() {
        let mut tracker = ZoneTracker::default();
        tracker
            .process_frame(&[Detection::new(9, 0.0, 0.0, 100.0, 100.0)], secs(0.0))
            .unwrap();
        let out = tracker
            .process_frame(&[Detection::new(9, 0.0, 0.0, 100.0, 100.0)], secs(2.0))
            .unwrap();

        assert_eq!(out.zones_fixed, vec![9]);
        let kinds: Vec<_> = out.draws.iter().map(|d| (d.kind, d.color)).collect();
        assert_eq!(
            kinds,
            vec![
                (OutlineKind::Zone, Color::InZone),
                (OutlineKind::Detection, Color::InZone),
                (OutlineKind::Zone, Color::InZone),
            ]
        );
    }

    #[test]
    fn test_invalid_geometry_is_rejected_without_touching_state() {
        let mut tracker = ZoneTracker::default();
        let frame = [
            Detection::new(1, 50.0, 10.0, 10.0, 50.0),
            Detection::new(2, 0.0, 0.0, 10.0, 10.0),
            Detection::new(3, f32::NAN, 0.0, 10.0, 10.0),
        ];
        let out = tracker.process_frame(&frame, secs(0.0)).unwrap();

        assert_eq!(out.rejected.len(), 2);
        assert_eq!(out.rejected[0].index, 0);
        assert_eq!(out.rejected[0].track_id, Some(1));
        assert!(matches!(
            out.rejected[0].error,
            ZoneError::InvalidGeometry { .. }
        ));
        assert_eq!(out.rejected[1].index, 2);
        assert_eq!(out.created, vec![2]);
        assert!(tracker.track(1).is_none());
        assert!(tracker.track(3).is_none());
    }

    #[test]
    fn test_invalid_update_keeps_previous_box() {
        let mut tracker = ZoneTracker::default();
        tracker
            .process_frame(&[Detection::new(1, 0.0, 0.0, 10.0, 10.0)], secs(0.0))
            .unwrap();
        let out = tracker
            .process_frame(
                &[Detection::new(1, 0.0, 0.0, f32::INFINITY, 10.0)],
                secs(3.0),
            )
            .unwrap();

        assert_eq!(out.rejected.len(), 1);
        let track = tracker.track(1).unwrap();
        assert_eq!(track.current_box(), Rect::new(0.0, 0.0, 10.0, 10.0));
        assert_eq!(track.fixed_zone(), None);
        assert_eq!(track.last_seen_at(), secs(0.0));
    }

    #[test]
    fn test_untracked_and_filtered_detections_are_skipped() {
        let mut tracker = ZoneTracker::default();
        let frame = [
            Detection::from_rect(None, Rect::new(0.0, 0.0, 5.0, 5.0)),
            Detection::new(2, 0.0, 0.0, 5.0, 5.0).with_class(2),
            Detection::new(3, 0.0, 0.0, 5.0, 5.0),
        ];
        let out = tracker.process_frame(&frame, secs(0.0)).unwrap();

        assert_eq!(out.skipped, 2);
        assert_eq!(out.created, vec![3]);
        assert_eq!(tracker.registry().len(), 1);
    }

    #[test]
    fn test_class_filter_disabled() {
        let config = ZoneConfig::default().with_class_filter(None);
        let mut tracker = ZoneTracker::new(config).unwrap();
        let out = tracker
            .process_frame(
                &[Detection::new(2, 0.0, 0.0, 5.0, 5.0).with_class(7)],
                secs(0.0),
            )
            .unwrap();
        assert_eq!(out.created, vec![2]);
    }

    #[test]
    fn test_custom_config() {
        let config = ZoneConfig::default()
            .with_dwell_threshold(Duration::from_millis(500))
            .with_zone_margin(0.5);
        let mut tracker = ZoneTracker::new(config).unwrap();
        tracker
            .process_frame(&[Detection::new(1, 10.0, 10.0, 20.0, 20.0)], secs(0.0))
            .unwrap();
        let out = tracker
            .process_frame(&[Detection::new(1, 10.0, 10.0, 20.0, 20.0)], secs(0.5))
            .unwrap();

        assert_eq!(out.zones_fixed, vec![1]);
        assert_eq!(
            tracker.track(1).unwrap().fixed_zone(),
            Some(Rect::new(5.0, 5.0, 25.0, 25.0))
        );
    }

    #[test]
    fn test_invalid_config() {
        for margin in [-0.1, f32::NAN, f32::INFINITY] {
            let config = ZoneConfig::default().with_zone_margin(margin);
            assert!(matches!(
                ZoneTracker::new(config),
                Err(ZoneError::InvalidConfig(_))
            ));
        }
    }

    #[test]
    fn test_reset() {
        let mut tracker = ZoneTracker::default();
        tracker
            .process_frame(&[Detection::new(1, 0.0, 0.0, 5.0, 5.0)], secs(0.0))
            .unwrap();
        tracker.reset();

        assert!(tracker.registry().is_empty());
        assert_eq!(tracker.frame_count(), 0);
    }
}
