use glam::Vec3;

use crate::host::OverlapKind;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriggerVolume {
    pub kind: OverlapKind,
    pub min: Vec3,
    pub max: Vec3,
}

impl TriggerVolume {
    pub fn new(kind: OverlapKind, center: Vec3, half_extents: Vec3) -> Self {
        let half_extents = half_extents.abs();
        Self {
            kind,
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }
}

/// Axis-aligned trigger regions. Tracks which volumes a point was inside on
/// the previous update so only overlap-begin transitions are reported.
#[derive(Debug, Clone, Default)]
pub struct TriggerSet {
    volumes: Vec<TriggerVolume>,
    inside: Vec<bool>,
}

impl TriggerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, volume: TriggerVolume) -> usize {
        self.volumes.push(volume);
        self.inside.push(false);
        self.volumes.len() - 1
    }

    pub fn volumes(&self) -> &[TriggerVolume] {
        &self.volumes
    }

    pub fn is_inside(&self, index: usize) -> bool {
        self.inside.get(index).copied().unwrap_or(false)
    }

    pub fn update(&mut self, point: Vec3) -> Vec<OverlapKind> {
        let mut began = Vec::new();
        for (volume, inside) in self.volumes.iter().zip(self.inside.iter_mut()) {
            let now_inside = volume.contains(point);
            if now_inside && !*inside {
                began.push(volume.kind);
            }
            *inside = now_inside;
        }
        began
    }
}
