use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};

use super::{GradientConfig, GradientError, Palette, ShadeId};
use crate::splitter::{split_paired, BiasMode};

/// A finished warp layout.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientLayout {
    /// Shade of every warp end, edge to edge.
    pub placement: Vec<ShadeId>,
    /// Thread count each shade was allotted.
    pub targets: Vec<u32>,
    /// Position each shade's gaussian draw is centered on.
    pub centers: Vec<usize>,
}

/// Lay out a warp as a left-to-right colour gradient.
///
/// Each shade gets a target thread count (outer shades absorb any surplus)
/// and a center along the warp. Threads are then placed one at a time by
/// drawing a position from a gaussian around the shade's center, falling
/// back to the nearest free slot within `max_jump`. Once `max_tries`
/// consecutive draws land in fully occupied regions the remaining slots are
/// filled deterministically in shade order.
///
/// The same `seed` always yields the same layout.
pub fn generate(
    palette: &Palette,
    config: &GradientConfig,
    seed: u64,
) -> Result<GradientLayout, GradientError> {
    if palette.is_empty() {
        return Err(GradientError::EmptyPalette);
    }
    if !config.sigma.is_finite() || config.sigma <= 0.0 {
        return Err(GradientError::BadSigma(config.sigma));
    }

    let targets = split_paired(config.threads, palette.len(), BiasMode::EdgesHeavy)?;
    let centers = shade_centers(&targets, config.threads);

    let normals = centers
        .iter()
        .map(|&mu| Normal::new(mu as f64, config.sigma))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| GradientError::BadSigma(config.sigma))?;

    let mut engine = Engine {
        config,
        targets: &targets,
        normals,
        rng: ChaCha8Rng::seed_from_u64(seed),
        state: PlacementState::new(config.threads as usize, palette.len()),
    };
    engine.run();

    let placement = engine
        .state
        .slots
        .into_iter()
        .map(|slot| slot.expect("every slot filled after placement"))
        .collect();

    Ok(GradientLayout {
        placement,
        targets,
        centers,
    })
}

/// Anchor positions for the gaussian draws: the first shade pulls toward the
/// left edge, the last toward the right edge, the inner shades toward the
/// middle of their allotted band.
fn shade_centers(targets: &[u32], threads: u32) -> Vec<usize> {
    let mut centers = vec![0usize];
    let mut moving_point = targets[0] as usize;
    for &count in &targets[1..targets.len().saturating_sub(1)] {
        centers.push(moving_point + count as usize / 2);
        moving_point += count as usize;
    }
    if targets.len() > 1 {
        centers.push(threads as usize);
    }
    centers
}

/// All mutable placement bookkeeping, owned by the engine for one run.
struct PlacementState {
    slots: Vec<Option<ShadeId>>,
    placed: Vec<u32>,
    empty: usize,
    misses: u32,
}

impl PlacementState {
    fn new(threads: usize, shades: usize) -> Self {
        Self {
            slots: vec![None; threads],
            placed: vec![0; shades],
            empty: threads,
            misses: 0,
        }
    }

    fn fill(&mut self, slot: usize, shade: usize) {
        self.slots[slot] = Some(ShadeId(shade));
        self.placed[shade] += 1;
        self.empty -= 1;
    }
}

struct Engine<'a> {
    config: &'a GradientConfig,
    targets: &'a [u32],
    normals: Vec<Normal<f64>>,
    rng: ChaCha8Rng,
    state: PlacementState,
}

impl Engine<'_> {
    fn run(&mut self) {
        let shades = self.targets.len();
        if self.config.prefer_edges && shades > 2 {
            // Lock the outer pairs in place first, working inward.
            for i in 0..shades / 2 {
                let pair = [i, shades - 1 - i];
                while pair.iter().any(|&s| self.state.placed[s] < self.targets[s]) {
                    for &shade in &pair {
                        self.place_one(shade);
                    }
                }
            }
            while self.state.empty > 0 {
                for shade in 1..shades - 1 {
                    self.place_one(shade);
                }
            }
        } else {
            while self.state.empty > 0 {
                for shade in 0..shades {
                    self.place_one(shade);
                }
            }
        }
    }

    /// Try to place one thread of `shade`. A draw into a fully occupied
    /// region counts as a miss; enough consecutive misses trigger the
    /// deterministic fill of whatever is left.
    fn place_one(&mut self, shade: usize) {
        if self.state.placed[shade] == self.targets[shade] {
            return;
        }

        let suggestion = self.draw_position(shade);
        if self.state.slots[suggestion].is_none() {
            self.state.fill(suggestion, shade);
            self.state.misses = 0;
            return;
        }

        match self.find_free_near(suggestion) {
            Some(slot) => {
                self.state.fill(slot, shade);
                self.state.misses = 0;
            }
            None => {
                self.state.misses += 1;
                if self.state.misses > self.config.max_tries {
                    self.fill_remaining();
                }
            }
        }
    }

    fn draw_position(&mut self, shade: usize) -> usize {
        let limit = self.state.slots.len() as f64;
        loop {
            let draw = self.normals[shade].sample(&mut self.rng);
            if draw >= 0.0 && draw < limit {
                return draw as usize;
            }
        }
    }

    /// Nearest free slot within `max_jump` of `from`, scanning both ways;
    /// ties go to the left.
    fn find_free_near(&self, from: usize) -> Option<usize> {
        let slots = &self.state.slots;
        let lower = from.saturating_sub(self.config.max_jump);
        let left = (lower + 1..=from).rev().find(|&i| slots[i].is_none());
        let upper = (from + self.config.max_jump).min(slots.len());
        let right = (from..upper).find(|&i| slots[i].is_none());

        match (left, right) {
            (None, None) => None,
            (Some(l), None) => Some(l),
            (None, Some(r)) => Some(r),
            (Some(l), Some(r)) => {
                if from - l <= r - from {
                    Some(l)
                } else {
                    Some(r)
                }
            }
        }
    }

    /// Hand out the remaining threads to the first empty slots, shade by
    /// shade. Used once the random draws keep hitting occupied regions.
    fn fill_remaining(&mut self) {
        for shade in 0..self.targets.len() {
            while self.state.placed[shade] < self.targets[shade] {
                match self.state.slots.iter().position(|slot| slot.is_none()) {
                    Some(slot) => self.state.fill(slot, shade),
                    None => return,
                }
            }
        }
    }
}
