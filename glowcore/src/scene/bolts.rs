//! bolts — jagged lightning polylines with a finite life

use crate::rng::{uniform, SceneRng};
use egui::{pos2, Pos2};

/// Walk from `start` towards `end` in random downward steps, then finish
/// exactly at `end`. Each step moves `±jitter` horizontally and
/// `step.0..step.1` down.
pub fn bolt_path(rng: &mut SceneRng, start: Pos2, end: Pos2, jitter: f32, step: (f32, f32)) -> Vec<Pos2> {
    let mut points = vec![start];
    let mut current = start;
    // a non-positive step would never reach the target
    if step.0 > 0.0 {
        while current.y < end.y {
            current = pos2(
                current.x + uniform(rng, -jitter, jitter),
                current.y + uniform(rng, step.0, step.1),
            );
            points.push(current);
        }
    }
    points.push(end);
    points
}

/// A bolt with remaining `life` out of `max_life`.
#[derive(Clone, Debug, PartialEq)]
pub struct Bolt {
    pub points: Vec<Pos2>,
    pub life: f32,
    pub max_life: f32,
}

impl Bolt {
    pub fn new(points: Vec<Pos2>, life: f32) -> Self {
        Self {
            points,
            life,
            max_life: life,
        }
    }

    /// Remaining life as a fraction of the initial life.
    pub fn strength(&self) -> f32 {
        if self.max_life <= 0.0 {
            0.0
        } else {
            crate::safety::clamp_unit(self.life / self.max_life)
        }
    }

    pub fn is_dead(&self) -> bool {
        self.life <= 0.0
    }

    pub fn tip(&self) -> Option<Pos2> {
        self.points.last().copied()
    }
}

/// Decay every bolt by `decay` and drop the dead ones. Used for storms
/// where bolts come and go in a bounded list.
pub fn decay(bolts: &mut Vec<Bolt>, decay: f32) {
    for bolt in bolts.iter_mut() {
        bolt.life -= decay;
    }
    bolts.retain(|b| !b.is_dead());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::seeded;

    #[test]
    fn test_path_reaches_target_and_descends() {
        let mut rng = seeded(8);
        let start = pos2(100.0, 0.0);
        let end = pos2(400.0, 300.0);
        let path = bolt_path(&mut rng, start, end, 30.0, (20.0, 40.0));
        assert_eq!(path[0], start);
        assert_eq!(*path.last().unwrap(), end);
        // intermediate points step downward within bounds
        for pair in path[..path.len() - 1].windows(2) {
            let dy = pair[1].y - pair[0].y;
            assert!((20.0..=40.0).contains(&dy));
            assert!((pair[1].x - pair[0].x).abs() <= 30.0);
        }
        assert!(path.len() >= 300 / 40 + 2);
    }

    #[test]
    fn test_zero_step_does_not_loop() {
        let mut rng = seeded(8);
        let path = bolt_path(&mut rng, pos2(0.0, 0.0), pos2(0.0, 100.0), 10.0, (0.0, 0.0));
        assert_eq!(path.len(), 2);
    }

    #[test]
    fn test_decay_removes_dead() {
        let mut bolts = vec![Bolt::new(vec![Pos2::ZERO], 5.0), Bolt::new(vec![Pos2::ZERO], 0.2)];
        decay(&mut bolts, 0.2);
        assert_eq!(bolts.len(), 1);
        assert!((bolts[0].strength() - 0.96).abs() < 1e-6);
    }
}
