use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::keyframe::{Keyframe, KeyframeData, KeyframeId, Property, Value};
use crate::registry::ObjectId;
use kinema_core::Easing;

/// Storage key of a keyframe: one keyframe may exist per
/// (object, frame, property) triple.
type TrackKey = (ObjectId, u32, Property);

const MIN_FRAME_RATE: u32 = 1;
const MAX_FRAME_RATE: u32 = 120;

/// Keyframes captured by a copy operation, stripped of their ids, plus the
/// minimum source frame used to compute the paste offset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clipboard {
    keyframes: Vec<KeyframeData>,
    source_frame: u32,
}

/// Partial update for a single keyframe. Unset fields keep their value.
#[derive(Debug, Clone, Default)]
pub struct KeyframePatch {
    pub object_id: Option<ObjectId>,
    pub frame: Option<u32>,
    pub property: Option<Property>,
    pub value: Option<Value>,
    pub easing: Option<Easing>,
}

impl KeyframePatch {
    pub fn frame(mut self, frame: u32) -> Self {
        self.frame = Some(frame);
        self
    }

    pub fn value(mut self, value: Value) -> Self {
        self.value = Some(value);
        self
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = Some(easing);
        self
    }
}

/// The authoritative animation timeline: playhead, duration, frame rate,
/// playback flag, keyframe tracks, selection, and the clipboard.
///
/// All transitions are synchronous and total. The surrounding application
/// serializes mutations through a single owner; the store itself imposes
/// no locking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Timeline {
    current_frame: u32,
    duration: u32,
    frame_rate: u32,
    is_playing: bool,
    #[serde(with = "keyframe_map")]
    keyframes: HashMap<TrackKey, Keyframe>,
    selected: Vec<KeyframeId>,
    clipboard: Option<Clipboard>,
}

impl Default for Timeline {
    fn default() -> Self {
        Self {
            current_frame: 0,
            duration: 60,
            frame_rate: 30,
            is_playing: false,
            keyframes: HashMap::new(),
            selected: Vec::new(),
            clipboard: None,
        }
    }
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    // --- Playhead, duration, frame rate ---

    pub fn current_frame(&self) -> u32 {
        self.current_frame
    }

    pub fn duration(&self) -> u32 {
        self.duration
    }

    pub fn frame_rate(&self) -> u32 {
        self.frame_rate
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// Move the playhead, clamped into `[0, duration]`.
    pub fn set_current_frame(&mut self, frame: u32) {
        self.current_frame = frame.min(self.duration);
    }

    /// Set the timeline length in frames (minimum 1). Shrinking the
    /// duration clamps the playhead back into range.
    pub fn set_duration(&mut self, duration: u32) {
        self.duration = duration.max(1);
        self.current_frame = self.current_frame.min(self.duration);
    }

    /// Set the frame rate, clamped into `[1, 120]`.
    pub fn set_frame_rate(&mut self, rate: u32) {
        self.frame_rate = rate.clamp(MIN_FRAME_RATE, MAX_FRAME_RATE);
    }

    /// Timeline length in seconds at the current frame rate.
    pub fn duration_seconds(&self) -> f64 {
        self.duration as f64 / self.frame_rate as f64
    }

    // --- Playback ---

    pub fn play(&mut self) {
        self.is_playing = true;
    }

    pub fn pause(&mut self) {
        self.is_playing = false;
    }

    pub fn toggle_playback(&mut self) {
        self.is_playing = !self.is_playing;
    }

    /// Stop playback and rewind the playhead.
    pub fn stop(&mut self) {
        self.is_playing = false;
        self.current_frame = 0;
    }

    // --- Keyframe mutation ---

    /// Insert a keyframe. An existing keyframe at the same
    /// (object, frame, property) is replaced and the new id wins; the
    /// replaced id is dropped from the selection.
    pub fn add_keyframe(&mut self, keyframe: Keyframe) {
        let key = (
            keyframe.object_id.clone(),
            keyframe.frame,
            keyframe.property,
        );
        let new_id = keyframe.id.clone();
        if let Some(replaced) = self.keyframes.insert(key, keyframe) {
            if replaced.id != new_id {
                self.selected.retain(|id| id != &replaced.id);
            }
        }
    }

    /// Remove a keyframe by id. Unknown ids are a no-op.
    pub fn remove_keyframe(&mut self, id: &KeyframeId) {
        if let Some(key) = self.key_of(id) {
            self.keyframes.remove(&key);
            self.selected.retain(|sel| sel != id);
        }
    }

    /// Apply a partial update to the keyframe with the given id. Changing
    /// frame, property, or owner re-keys the entry; a collision with an
    /// existing keyframe replaces it.
    pub fn update_keyframe(&mut self, id: &KeyframeId, patch: KeyframePatch) {
        let Some(key) = self.key_of(id) else {
            return;
        };
        // take, patch, re-insert through the collision path
        let Some(mut keyframe) = self.keyframes.remove(&key) else {
            return;
        };
        if let Some(object_id) = patch.object_id {
            keyframe.object_id = object_id;
        }
        if let Some(frame) = patch.frame {
            keyframe.frame = frame;
        }
        if let Some(property) = patch.property {
            keyframe.property = property;
        }
        if let Some(value) = patch.value {
            keyframe.value = value;
        }
        if let Some(easing) = patch.easing {
            keyframe.easing = easing;
        }
        self.add_keyframe(keyframe);
    }

    /// Replace the whole keyframe set. Collisions resolve last-wins in
    /// input order.
    pub fn set_keyframes(&mut self, keyframes: Vec<Keyframe>) {
        self.keyframes.clear();
        self.selected.clear();
        for kf in keyframes {
            self.add_keyframe(kf);
        }
    }

    /// Drop every keyframe and the selection.
    pub fn clear_keyframes(&mut self) {
        self.keyframes.clear();
        self.selected.clear();
    }

    // --- Queries (unsorted; temporal ordering is the consumer's job) ---

    pub fn keyframes(&self) -> impl Iterator<Item = &Keyframe> {
        self.keyframes.values()
    }

    pub fn keyframe_count(&self) -> usize {
        self.keyframes.len()
    }

    pub fn get_keyframe(&self, id: &KeyframeId) -> Option<&Keyframe> {
        self.keyframes.values().find(|kf| &kf.id == id)
    }

    pub fn keyframes_for_object(&self, object_id: &ObjectId) -> Vec<&Keyframe> {
        self.keyframes
            .values()
            .filter(|kf| &kf.object_id == object_id)
            .collect()
    }

    pub fn keyframes_at_frame(&self, frame: u32) -> Vec<&Keyframe> {
        self.keyframes
            .values()
            .filter(|kf| kf.frame == frame)
            .collect()
    }

    // --- Selection ---

    pub fn selected_keyframe_ids(&self) -> &[KeyframeId] {
        &self.selected
    }

    /// Select a keyframe, either replacing the selection or adding to it.
    pub fn select_keyframe(&mut self, id: KeyframeId, additive: bool) {
        if additive {
            if !self.selected.contains(&id) {
                self.selected.push(id);
            }
        } else {
            self.selected = vec![id];
        }
    }

    pub fn deselect_keyframe(&mut self, id: &KeyframeId) {
        self.selected.retain(|sel| sel != id);
    }

    /// Replace the selection with every keyframe sitting exactly at `frame`.
    pub fn select_all_at_frame(&mut self, frame: u32) {
        self.selected = self
            .keyframes
            .values()
            .filter(|kf| kf.frame == frame)
            .map(|kf| kf.id.clone())
            .collect();
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    /// Remove every selected keyframe and clear the selection.
    pub fn delete_selected(&mut self) {
        let selected = std::mem::take(&mut self.selected);
        self.keyframes
            .retain(|_, kf| !selected.contains(&kf.id));
    }

    // --- Clipboard ---

    /// Capture the selected keyframes (stripped of ids) and the minimum
    /// frame among them. An empty selection leaves the clipboard untouched.
    pub fn copy_selected(&mut self) {
        let copied: Vec<KeyframeData> = self
            .selected
            .iter()
            .filter_map(|id| self.get_keyframe(id))
            .cloned()
            .map(KeyframeData::from)
            .collect();
        if copied.is_empty() {
            return;
        }
        let source_frame = copied.iter().map(|kf| kf.frame).min().unwrap_or(0);
        self.clipboard = Some(Clipboard {
            keyframes: copied,
            source_frame,
        });
    }

    /// Paste the clipboard at the playhead: each pasted keyframe lands at
    /// `current_frame + (frame - source_frame)`, is re-owned to
    /// `target_object` when one is supplied, and receives a fresh id. The
    /// pasted set becomes the new selection. An empty clipboard is a no-op.
    pub fn paste(&mut self, target_object: Option<&ObjectId>) {
        let Some(clipboard) = self.clipboard.clone() else {
            return;
        };
        if clipboard.keyframes.is_empty() {
            return;
        }

        let mut pasted_ids = Vec::with_capacity(clipboard.keyframes.len());
        for mut data in clipboard.keyframes {
            data.frame = self.current_frame + (data.frame - clipboard.source_frame);
            if let Some(target) = target_object {
                data.object_id = target.clone();
            }
            let keyframe = data.into_keyframe();
            pasted_ids.push(keyframe.id.clone());
            self.add_keyframe(keyframe);
        }
        self.selected = pasted_ids;
    }

    fn key_of(&self, id: &KeyframeId) -> Option<TrackKey> {
        self.keyframes
            .values()
            .find(|kf| &kf.id == id)
            .map(|kf| (kf.object_id.clone(), kf.frame, kf.property))
    }
}

/// Snapshot codec: the track map serializes as a frame-ordered keyframe
/// list (the key is derivable from the entry).
mod keyframe_map {
    use super::*;
    use serde::{Deserializer, Serializer};

    pub fn serialize<S>(map: &HashMap<TrackKey, Keyframe>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut entries: Vec<&Keyframe> = map.values().collect();
        entries.sort_by(|a, b| {
            (&a.object_id.0, a.frame, a.property as u8).cmp(&(
                &b.object_id.0,
                b.frame,
                b.property as u8,
            ))
        });
        serde::Serialize::serialize(&entries, serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<HashMap<TrackKey, Keyframe>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let entries: Vec<Keyframe> = serde::Deserialize::deserialize(deserializer)?;
        Ok(entries
            .into_iter()
            .map(|kf| ((kf.object_id.clone(), kf.frame, kf.property), kf))
            .collect())
    }
}
