//! network — proximity links between nodes and packets travelling on them
//!
//! Link discovery is a plain O(N²) pairwise scan; widgets only ever have
//! tens to a few hundred nodes.

use egui::Pos2;

/// Every pair `(i, j, distance)` with `i < j` and `distance < threshold`.
pub fn pairs_within(points: &[Pos2], threshold: f32) -> Vec<(usize, usize, f32)> {
    let mut pairs = Vec::new();
    for i in 0..points.len() {
        for j in (i + 1)..points.len() {
            let d = points[i].distance(points[j]);
            if d < threshold {
                pairs.push((i, j, d));
            }
        }
    }
    pairs
}

/// Opacity of a link that fades out linearly at `fade_distance`.
pub fn link_alpha(distance: f32, fade_distance: f32, max_alpha: f32) -> f32 {
    if fade_distance <= 0.0 {
        return 0.0;
    }
    crate::safety::non_negative(max_alpha * (1.0 - distance / fade_distance))
}

/// A packet moving along link `link` (index into the owner's link list).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Packet {
    pub link: usize,
    pub progress: f32,
    pub speed: f32,
}

impl Packet {
    pub fn new(link: usize, speed: f32) -> Self {
        Self {
            link,
            progress: 0.0,
            speed,
        }
    }

    pub fn position(&self, from: Pos2, to: Pos2) -> Pos2 {
        crate::derive::lerp_pos(from, to, crate::safety::clamp_unit(self.progress))
    }
}

/// Advance packets and drop those that arrived.
pub fn advance_packets(packets: &mut Vec<Packet>) {
    for p in packets.iter_mut() {
        p.progress += p.speed;
    }
    packets.retain(|p| p.progress < 1.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    #[test]
    fn test_pairs_within() {
        let pts = [pos2(0.0, 0.0), pos2(3.0, 4.0), pos2(100.0, 0.0)];
        let pairs = pairs_within(&pts, 10.0);
        assert_eq!(pairs, vec![(0, 1, 5.0)]);
        assert!(pairs_within(&pts, 0.0).is_empty());
    }

    #[test]
    fn test_link_alpha() {
        assert_eq!(link_alpha(0.0, 300.0, 255.0), 255.0);
        assert_eq!(link_alpha(150.0, 300.0, 255.0), 127.5);
        assert_eq!(link_alpha(400.0, 300.0, 255.0), 0.0);
        assert_eq!(link_alpha(1.0, 0.0, 255.0), 0.0);
    }

    #[test]
    fn test_packets_arrive() {
        let mut packets = vec![Packet::new(0, 0.5), Packet::new(1, 0.02)];
        advance_packets(&mut packets);
        assert_eq!(packets.len(), 2);
        advance_packets(&mut packets);
        assert_eq!(packets.len(), 1);
        assert_eq!(packets[0].link, 1);
        let mid = Packet {
            link: 0,
            progress: 0.5,
            speed: 0.0,
        };
        assert_eq!(mid.position(pos2(0.0, 0.0), pos2(10.0, 20.0)), pos2(5.0, 10.0));
    }
}
