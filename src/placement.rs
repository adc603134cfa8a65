//! Anomaly and decoy placement, plus the click hit test.
//!
//! All arithmetic happens in logical playfield coordinates. Placement is
//! driven by a caller-supplied RNG so tests can seed it deterministically.

use glam::IVec2;
use rand::Rng;
use smallvec::SmallVec;
use tracing::warn;

use crate::constants::{self, PLACEMENT_BUFFER, PLACEMENT_MAX_ATTEMPTS, PLAYFIELD_SIZE};
use crate::error::PlacementError;

/// An axis-aligned rectangle inside the playfield.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnomalyRect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl AnomalyRect {
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    pub fn center(&self) -> IVec2 {
        IVec2::new((self.x + self.w / 2) as i32, (self.y + self.h / 2) as i32)
    }

    /// Strict containment, edges inclusive.
    pub fn contains(&self, point: IVec2) -> bool {
        self.hit(point, 0)
    }

    /// Containment against the rectangle expanded on all sides by `tolerance`.
    ///
    /// The expanded edge itself counts as a hit.
    pub fn hit(&self, point: IVec2, tolerance: u32) -> bool {
        let tolerance = tolerance as i64;
        let (px, py) = (point.x as i64, point.y as i64);
        px >= self.x as i64 - tolerance
            && px <= self.x as i64 + self.w as i64 + tolerance
            && py >= self.y as i64 - tolerance
            && py <= self.y as i64 + self.h as i64 + tolerance
    }

    /// Whether this rectangle comes within `buffer` pixels of `other`.
    pub fn overlaps(&self, other: &AnomalyRect, buffer: u32) -> bool {
        let buffer = buffer as i64;
        let horizontal = (self.x as i64) < other.x as i64 + other.w as i64 + buffer
            && (other.x as i64) < self.x as i64 + self.w as i64 + buffer;
        let vertical = (self.y as i64) < other.y as i64 + other.h as i64 + buffer
            && (other.y as i64) < self.y as i64 + self.h as i64 + buffer;
        horizontal && vertical
    }

    /// Whether the rectangle lies entirely inside the playfield.
    pub fn in_bounds(&self) -> bool {
        self.x + self.w <= PLAYFIELD_SIZE.x && self.y + self.h <= PLAYFIELD_SIZE.y
    }
}

/// Places one random rectangle for `level`, rejecting candidates that come
/// within [`PLACEMENT_BUFFER`] pixels of anything in `occupied`.
///
/// # Errors
///
/// [`PlacementError::Exhausted`] after [`PLACEMENT_MAX_ATTEMPTS`] rejected
/// candidates, or [`PlacementError::DoesNotFit`] if the sector's size range
/// cannot fit the playfield at all.
pub fn place_rect(
    level: usize,
    occupied: &[AnomalyRect],
    rng: &mut impl Rng,
) -> Result<AnomalyRect, PlacementError> {
    let size_range = constants::anomaly_size_range(level);
    if *size_range.end() >= PLAYFIELD_SIZE.x || *size_range.end() >= PLAYFIELD_SIZE.y {
        return Err(PlacementError::DoesNotFit(format!(
            "size range {:?} vs playfield {}x{}",
            size_range, PLAYFIELD_SIZE.x, PLAYFIELD_SIZE.y
        )));
    }

    for _ in 0..PLACEMENT_MAX_ATTEMPTS {
        let w = rng.random_range(size_range.clone());
        let h = rng.random_range(size_range.clone());
        let x = rng.random_range(0..=(PLAYFIELD_SIZE.x - w));
        let y = rng.random_range(0..=(PLAYFIELD_SIZE.y - h));
        let candidate = AnomalyRect::new(x, y, w, h);

        if occupied
            .iter()
            .all(|taken| !candidate.overlaps(taken, PLACEMENT_BUFFER))
        {
            return Ok(candidate);
        }
    }

    Err(PlacementError::Exhausted {
        attempts: PLACEMENT_MAX_ATTEMPTS,
    })
}

/// The full set of distorted rectangles active in one sector: exactly one
/// scoring target plus zero or more decoys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub target: AnomalyRect,
    pub decoys: SmallVec<[AnomalyRect; 2]>,
}

impl Placement {
    /// Generates the target and the sector's decoys.
    ///
    /// The target must place successfully; decoys are best-effort and are
    /// skipped with a warning when no clear spot is found in time.
    pub fn generate(level: usize, rng: &mut impl Rng) -> Result<Placement, PlacementError> {
        let target = place_rect(level, &[], rng)?;

        let mut occupied: SmallVec<[AnomalyRect; 4]> = SmallVec::new();
        occupied.push(target);

        let mut decoys = SmallVec::new();
        for index in 0..constants::decoy_count(level) {
            match place_rect(level, &occupied, rng) {
                Ok(decoy) => {
                    occupied.push(decoy);
                    decoys.push(decoy);
                }
                Err(e) => {
                    warn!(level, decoy = index, error = %e, "Skipping decoy placement");
                }
            }
        }

        Ok(Placement { target, decoys })
    }

    /// All rectangles in this placement, target first.
    pub fn rects(&self) -> impl Iterator<Item = &AnomalyRect> {
        std::iter::once(&self.target).chain(self.decoys.iter())
    }
}
