//! Keyframe store: insert, remove and partial updates on an [`Animation`].
//!
//! Unknown ids are never an error. Mutators report whether anything changed so
//! callers can skip redraws, but an unknown id simply leaves the animation as is.

use log::{debug, warn};

use crate::data::{Animation, Keyframe, PropertyPatch, PropertySet};
use crate::ids::KeyframeId;

/// Stable ascending sort by time. NaN times sort last instead of panicking.
pub(crate) fn sort_by_time(keyframes: &mut [Keyframe]) {
    keyframes.sort_by(|a, b| a.time.total_cmp(&b.time));
}

impl Animation {
    /// Insert a keyframe at `time` and re-sort. Ties keep insertion order, so the
    /// new keyframe lands after existing keyframes at the same time.
    pub fn add_keyframe(
        &mut self,
        time: f64,
        properties: PropertySet,
        easing: Option<String>,
    ) -> KeyframeId {
        let mut keyframe = Keyframe::new(time, properties);
        keyframe.easing = easing;
        self.insert_keyframe(keyframe)
    }

    /// Insert a prebuilt keyframe and re-sort.
    pub fn insert_keyframe(&mut self, keyframe: Keyframe) -> KeyframeId {
        let id = keyframe.id;
        debug!("add keyframe {} at {}%", id, keyframe.time);
        self.keyframes.push(keyframe);
        sort_by_time(&mut self.keyframes);
        id
    }

    /// Remove a keyframe, returning it if it existed.
    pub fn remove_keyframe(&mut self, id: KeyframeId) -> Option<Keyframe> {
        match self.keyframes.iter().position(|k| k.id == id) {
            Some(pos) => {
                debug!("remove keyframe {}", id);
                Some(self.keyframes.remove(pos))
            }
            None => {
                warn!("remove_keyframe: unknown keyframe {}", id);
                None
            }
        }
    }

    /// Merge `patch` into the keyframe's properties.
    pub fn update_properties(&mut self, id: KeyframeId, patch: &PropertyPatch) -> bool {
        match self.keyframe_mut(id) {
            Some(kf) => {
                patch.apply_to(&mut kf.properties);
                true
            }
            None => {
                warn!("update_properties: unknown keyframe {}", id);
                false
            }
        }
    }

    pub fn update_easing(&mut self, id: KeyframeId, easing: impl Into<String>) -> bool {
        match self.keyframe_mut(id) {
            Some(kf) => {
                kf.easing = Some(easing.into());
                true
            }
            None => {
                warn!("update_easing: unknown keyframe {}", id);
                false
            }
        }
    }

    /// Set the duration. Range checks belong to the caller.
    pub fn update_duration(&mut self, seconds: f64) {
        debug!("duration {}s -> {}s", self.duration_seconds, seconds);
        self.duration_seconds = seconds;
    }

    #[inline]
    pub fn keyframe(&self, id: KeyframeId) -> Option<&Keyframe> {
        self.keyframes.iter().find(|k| k.id == id)
    }

    #[inline]
    pub fn keyframe_mut(&mut self, id: KeyframeId) -> Option<&mut Keyframe> {
        self.keyframes.iter_mut().find(|k| k.id == id)
    }

    /// Keyframes in ascending time order, regardless of how they are stored.
    pub fn sorted_keyframes(&self) -> Vec<&Keyframe> {
        let mut sorted: Vec<&Keyframe> = self.keyframes.iter().collect();
        sorted.sort_by(|a, b| a.time.total_cmp(&b.time));
        sorted
    }

    /// First keyframe (in storage order) strictly closer than `tolerance` to `time`.
    pub fn keyframe_near(&self, time: f64, tolerance: f64) -> Option<&Keyframe> {
        self.keyframes
            .iter()
            .find(|k| (k.time - time).abs() < tolerance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Channel;

    fn anim() -> Animation {
        Animation::new("test", 2.0, "linear", Vec::new())
    }

    #[test]
    fn add_keeps_keyframes_sorted() {
        let mut a = anim();
        a.add_keyframe(100.0, PropertySet::default(), None);
        a.add_keyframe(0.0, PropertySet::default(), None);
        a.add_keyframe(50.0, PropertySet::default(), None);
        let times: Vec<f64> = a.keyframes.iter().map(|k| k.time).collect();
        assert_eq!(times, vec![0.0, 50.0, 100.0]);
    }

    #[test]
    fn ties_keep_insertion_order() {
        let mut a = anim();
        let first = a.add_keyframe(50.0, PropertySet::default(), None);
        let second = a.add_keyframe(50.0, PropertySet::default(), None);
        assert_eq!(a.keyframes[0].id, first);
        assert_eq!(a.keyframes[1].id, second);
    }

    #[test]
    fn remove_unknown_is_noop() {
        let mut a = anim();
        a.add_keyframe(10.0, PropertySet::default(), None);
        let before = a.clone();
        assert!(a.remove_keyframe(KeyframeId::new()).is_none());
        assert_eq!(a, before);
    }

    #[test]
    fn updates_on_unknown_id_leave_state_untouched() {
        let mut a = anim();
        a.add_keyframe(10.0, PropertySet::default(), None);
        let before = a.clone();
        let patch = PropertyPatch::channel(Channel::Rotation, 90.0);
        assert!(!a.update_properties(KeyframeId::new(), &patch));
        assert!(!a.update_easing(KeyframeId::new(), "linear"));
        assert_eq!(a, before);
    }

    #[test]
    fn easing_and_duration_updates() {
        let mut a = anim();
        let id = a.add_keyframe(10.0, PropertySet::default(), None);
        assert!(a.update_easing(id, "ease-out"));
        assert_eq!(a.keyframe(id).unwrap().easing.as_deref(), Some("ease-out"));
        a.update_duration(0.05);
        assert_eq!(a.duration_seconds, 0.05);
    }

    #[test]
    fn keyframe_near_uses_strict_tolerance() {
        let mut a = anim();
        let id = a.add_keyframe(25.0, PropertySet::default(), None);
        assert_eq!(a.keyframe_near(26.5, 2.0).map(|k| k.id), Some(id));
        assert!(a.keyframe_near(27.0, 2.0).is_none());
    }

    #[test]
    fn sorted_view_does_not_trust_storage_order() {
        let mut a = anim();
        a.keyframes.push(Keyframe::new(80.0, PropertySet::default()));
        a.keyframes.push(Keyframe::new(20.0, PropertySet::default()));
        let times: Vec<f64> = a.sorted_keyframes().iter().map(|k| k.time).collect();
        assert_eq!(times, vec![20.0, 80.0]);
    }
}
