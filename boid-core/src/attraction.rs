//! Storage for externally supplied attraction points.
//!
//! Points live in a slot vector and are addressed by [`AttractionHandle`]s
//! carrying the slot's generation. Removing a point bumps the generation, so a
//! stale handle never resolves to a point inserted later into the same slot.

use glam::Vec3;

/// Opaque reference to a point stored in [`AttractionPoints`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AttractionHandle {
    index: u32,
    generation: u32,
}

impl AttractionHandle {
    /// Pack the handle into a single integer for FFI boundaries
    pub fn to_bits(self) -> u64 {
        ((self.generation as u64) << 32) | self.index as u64
    }

    pub fn from_bits(bits: u64) -> Self {
        Self {
            index: bits as u32,
            generation: (bits >> 32) as u32,
        }
    }
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    point: Option<Vec3>,
}

#[derive(Debug, Clone, Default)]
pub struct AttractionPoints {
    slots: Vec<Slot>,
    free: Vec<u32>,
    len: usize,
}

impl AttractionPoints {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a copy of `point` and return its handle
    pub fn insert(&mut self, point: Vec3) -> AttractionHandle {
        self.len += 1;

        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.point = Some(point);
            return AttractionHandle {
                index,
                generation: slot.generation,
            };
        }

        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            point: Some(point),
        });
        AttractionHandle {
            index,
            generation: 0,
        }
    }

    pub fn remove(&mut self, handle: AttractionHandle) -> bool {
        let Some(slot) = self.slot_mut(handle) else {
            return false;
        };

        slot.point = None;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.index);
        self.len -= 1;
        true
    }

    /// Move a stored point; returns false when the handle is unknown
    pub fn update(&mut self, handle: AttractionHandle, point: Vec3) -> bool {
        match self.slot_mut(handle) {
            Some(slot) => {
                slot.point = Some(point);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, handle: AttractionHandle) -> Option<Vec3> {
        self.slots
            .get(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.point)
    }

    pub fn contains(&self, handle: AttractionHandle) -> bool {
        self.get(handle).is_some()
    }

    pub fn clear(&mut self) {
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.point.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(index as u32);
            }
        }
        self.len = 0;
    }

    pub fn iter(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.slots.iter().filter_map(|slot| slot.point)
    }

    pub fn handles(&self) -> impl Iterator<Item = AttractionHandle> + '_ {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.point.map(|_| AttractionHandle {
                index: index as u32,
                generation: slot.generation,
            })
        })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn slot_mut(&mut self, handle: AttractionHandle) -> Option<&mut Slot> {
        self.slots
            .get_mut(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation && slot.point.is_some())
    }
}
