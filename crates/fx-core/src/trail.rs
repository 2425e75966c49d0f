use crate::particle::Particle;
use std::collections::VecDeque;

/// Insertion-ordered particle store with front trimming.
#[derive(Clone, Debug, Default)]
pub struct TrailStore {
    particles: VecDeque<Particle>,
}

impl TrailStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one particle, then drop the oldest entries beyond `capacity`.
    pub fn push_bounded(&mut self, particle: Particle, capacity: usize) {
        self.particles.push_back(particle);
        self.trim_to(capacity);
    }

    /// Append without trimming. Used for press bursts, which may overshoot
    /// the capacity until the next sweep.
    pub fn extend_unbounded(&mut self, burst: impl IntoIterator<Item = Particle>) {
        self.particles.extend(burst);
    }

    /// Remove expired particles, keeping survivors in order. Returns how many
    /// were removed.
    pub fn retain_live(&mut self, now_ms: f64) -> usize {
        let before = self.particles.len();
        self.particles.retain(|p| !p.is_expired(now_ms));
        before - self.particles.len()
    }

    /// Drop oldest entries until at most `capacity` remain.
    pub fn trim_to(&mut self, capacity: usize) -> usize {
        let excess = self.particles.len().saturating_sub(capacity);
        self.particles.drain(..excess);
        excess
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }
}
