use fixed::types::U8F8;
use heapless::Vec;

use crate::{
    cluster::Cluster,
    config::{GridConfig, TOUCH_SLOT_CAPACITY},
};

/// One reported touch. `x`/`y` are the force-weighted centroid in cell units
/// (8.8 fixed point). A slot with `force == 0` carries no touch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Touch {
    pub x: U8F8,
    pub y: U8F8,
    pub force: u32,
    pub count: u16,
}

impl Touch {
    pub const EMPTY: Self = Self {
        x: U8F8::ZERO,
        y: U8F8::ZERO,
        force: 0,
        count: 0,
    };

    pub fn is_present(&self) -> bool {
        self.force > 0
    }

    /// Centroid of a cluster. Division truncates toward zero in 8.8 bits;
    /// `None` for a zero-force cluster.
    pub fn from_cluster(cluster: &Cluster) -> Option<Self> {
        if cluster.force == 0 {
            return None;
        }
        Some(Self {
            x: centroid_axis(cluster.moment_x, cluster.force),
            y: centroid_axis(cluster.moment_y, cluster.force),
            force: cluster.force,
            count: cluster.count,
        })
    }
}

fn centroid_axis(moment: u32, force: u32) -> U8F8 {
    // Shift before dividing so the quotient keeps 8 fractional bits. A
    // centroid never exceeds the largest cell index (< 50), so it fits.
    let bits = ((moment as u64) << U8F8::FRAC_NBITS) / force as u64;
    U8F8::from_bits(bits.min(u16::MAX as u64) as u16)
}

/// `max_touch_count` touch slots, strongest first, followed by one overflow
/// slot that only carries force.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TouchReport {
    slots: Vec<Touch, TOUCH_SLOT_CAPACITY>,
}

impl TouchReport {
    pub fn new(config: &GridConfig) -> Self {
        let mut report = Self { slots: Vec::new() };
        report.reset(config.max_touch_count());
        report
    }

    pub(crate) fn reset(&mut self, max_touch_count: usize) {
        self.slots.clear();
        // max_touch_count is bounded by GridConfig validation.
        let _ = self.slots.resize(max_touch_count + 1, Touch::EMPTY);
    }

    /// Reports the first `max_touch_count` of `ranked` and folds the rest into
    /// the overflow slot.
    pub(crate) fn fill(&mut self, max_touch_count: usize, ranked: &[Cluster]) {
        self.reset(max_touch_count);
        let split = ranked.len().min(max_touch_count);
        let (reported, remaining) = ranked.split_at(split);

        for (slot, cluster) in self.slots.iter_mut().zip(reported) {
            if let Some(touch) = Touch::from_cluster(cluster) {
                *slot = touch;
            }
        }

        let overflow: u32 = remaining.iter().map(|cluster| cluster.force).sum();
        if let Some(slot) = self.slots.last_mut() {
            slot.force = overflow;
        }
    }

    pub fn max_touch_count(&self) -> usize {
        self.slots.len().saturating_sub(1)
    }

    /// Every slot, overflow last.
    pub fn slots(&self) -> &[Touch] {
        &self.slots
    }

    /// Touch slots only, including empty ones.
    pub fn touches(&self) -> &[Touch] {
        &self.slots[..self.max_touch_count()]
    }

    pub fn detected(&self) -> impl Iterator<Item = &Touch> + '_ {
        self.touches().iter().filter(|touch| touch.is_present())
    }

    pub fn touch_count(&self) -> usize {
        self.detected().count()
    }

    pub fn overflow_force(&self) -> u32 {
        self.slots.last().map(|slot| slot.force).unwrap_or(0)
    }

    pub fn total_force(&self) -> u32 {
        self.slots.iter().map(|slot| slot.force).sum()
    }
}

impl Default for TouchReport {
    fn default() -> Self {
        Self::new(&GridConfig::DEFAULT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cluster(force: u32, count: u16, moment_x: u32, moment_y: u32) -> Cluster {
        Cluster {
            force,
            count,
            moment_x,
            moment_y,
            ..Cluster::default()
        }
    }

    #[test]
    fn centroid_truncates_to_eight_fraction_bits() {
        let touch = Touch::from_cluster(&cluster(10, 3, 4, 5)).unwrap();
        // 0.4 * 256 = 102.4
        assert_eq!(touch.x.to_bits(), 102);
        assert_eq!(touch.y, U8F8::from_num(0.5));
        assert_eq!(touch.force, 10);
        assert_eq!(touch.count, 3);
    }

    #[test]
    fn zero_force_cluster_is_not_a_touch() {
        assert_eq!(Touch::from_cluster(&cluster(0, 0, 0, 0)), None);
    }

    #[test]
    fn fill_reports_top_slots_and_sums_the_rest() {
        let config = GridConfig::new(3, 4, 2).unwrap();
        let mut report = TouchReport::new(&config);
        let ranked = [
            cluster(10, 3, 4, 5),
            cluster(8, 2, 24, 12),
            cluster(5, 1, 0, 5),
            cluster(4, 1, 4, 0),
            cluster(4, 1, 12, 4),
            cluster(0, 0, 0, 0),
        ];
        report.fill(2, &ranked);

        assert_eq!(report.slots().len(), 3);
        assert_eq!(report.touch_count(), 2);
        assert_eq!(report.touches()[1].x, U8F8::from_num(3));
        assert_eq!(report.touches()[1].y, U8F8::from_num(1.5));
        assert_eq!(report.overflow_force(), 13);
        let overflow = report.slots()[2];
        assert_eq!((overflow.x, overflow.y, overflow.count), (U8F8::ZERO, U8F8::ZERO, 0));
    }

    #[test]
    fn fill_leaves_zero_force_slots_empty() {
        let mut report = TouchReport::default();
        report.fill(2, &[cluster(6, 1, 0, 0), cluster(0, 0, 0, 0)]);
        assert!(report.touches()[0].is_present());
        assert_eq!(report.touches()[1], Touch::EMPTY);
        assert_eq!(report.overflow_force(), 0);
    }

    #[test]
    fn fill_resets_previous_contents() {
        let mut report = TouchReport::default();
        report.fill(2, &[cluster(6, 1, 0, 0), cluster(5, 1, 5, 5), cluster(1, 1, 0, 0)]);
        report.fill(2, &[]);
        assert!(report.slots().iter().all(|slot| *slot == Touch::EMPTY));
    }
}
