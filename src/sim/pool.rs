//! Obstacle generator
//!
//! Keeps a fixed population of obstacles crossing the playfield right to
//! left. Each update runs three phases in order, each finishing before the
//! next starts: cull bodies that have left on the left, replenish up to the
//! quota just past the right edge, then advance everything ballistically.

use glam::Vec2;
use rand::Rng;

use super::body::Body;
use super::collision::overlaps;
use crate::config::{ConfigError, ObstacleConfig, Playfield};

/// Pool of ballistic obstacles
#[derive(Debug, Clone)]
pub struct ObstaclePool {
    /// Prototype for spawned bodies; its `quota` is the target population
    template: ObstacleConfig,
    playfield: Playfield,
    /// Live obstacles in spawn order
    pub members: Vec<Body>,
    next_id: u32,
}

impl ObstaclePool {
    /// Empty pool; ids start at `first_id`. The template and playfield are
    /// checked here so spawning can never draw from an empty range.
    pub fn new(
        template: ObstacleConfig,
        playfield: Playfield,
        first_id: u32,
    ) -> Result<Self, ConfigError> {
        template.validate()?;
        playfield.validate()?;
        Ok(Self {
            template,
            playfield,
            members: Vec::with_capacity(template.quota),
            next_id: first_id,
        })
    }

    /// Target population
    pub fn quota(&self) -> usize {
        self.template.quota
    }

    pub fn template(&self) -> &ObstacleConfig {
        &self.template
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Cull, replenish, advance
    pub fn update<R: Rng>(&mut self, dt: f32, rng: &mut R) {
        self.cull();
        self.replenish(rng);
        self.advance(dt);
    }

    /// Drop every member that has scrolled fully past the left edge.
    /// Returns how many were removed.
    pub fn cull(&mut self) -> usize {
        let before = self.members.len();
        self.members.retain(|m| m.pos.x >= -m.width);
        let culled = before - self.members.len();
        if culled > 0 {
            log::trace!("Culled {} obstacles", culled);
        }
        culled
    }

    /// Spawn one obstacle per missing slot, just off the right edge
    pub fn replenish<R: Rng>(&mut self, rng: &mut R) {
        let missing = self.quota().saturating_sub(self.members.len());
        for _ in 0..missing {
            let body = self.spawn(rng);
            log::debug!(
                "Spawned obstacle {} at y={:.1} vx={:.1}",
                body.id,
                body.pos.y,
                body.vel.x
            );
            self.members.push(body);
        }
    }

    /// Integrate every member by `dt`
    pub fn advance(&mut self, dt: f32) {
        for member in &mut self.members {
            member.integrate(dt);
        }
    }

    /// True if any member overlaps `body`; stops at the first hit
    pub fn collides_with(&self, body: &Body) -> bool {
        self.members.iter().any(|m| overlaps(m, body))
    }

    /// First member overlapping `body`, in spawn order
    pub fn first_hit(&self, body: &Body) -> Option<&Body> {
        self.members.iter().find(|m| overlaps(m, body))
    }

    fn spawn<R: Rng>(&mut self, rng: &mut R) -> Body {
        let id = self.next_id;
        self.next_id += 1;

        let t = &self.template;
        let y = rng.random_range(0.0..self.playfield.height);
        let speed = rng.random_range(t.min_speed..=t.max_speed);
        Body::ballistic(
            id,
            Vec2::new(self.playfield.width + 1.0, y),
            Vec2::new(-speed, 0.0),
            t.width,
            t.height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn playfield() -> Playfield {
        Playfield {
            width: 1024.0,
            height: 768.0,
        }
    }

    fn new_pool(quota: usize, first_id: u32) -> ObstaclePool {
        ObstaclePool::new(template(quota), playfield(), first_id).unwrap()
    }

    fn template(quota: usize) -> ObstacleConfig {
        ObstacleConfig {
            quota,
            width: 32.0,
            height: 32.0,
            min_speed: 200.0,
            max_speed: 600.0,
        }
    }

    #[test]
    fn test_fills_to_quota() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut pool = new_pool(10, 100);
        pool.update(0.0, &mut rng);
        assert_eq!(pool.len(), 10);
        for m in &pool.members {
            assert_eq!(m.pos.x, 1025.0);
            assert!(m.pos.y >= 0.0 && m.pos.y < 768.0);
            assert!(m.vel.x <= -200.0 && m.vel.x >= -600.0);
            assert_eq!(m.vel.y, 0.0);
        }
        // ids are unique and ascending in spawn order
        let ids: Vec<u32> = pool.members.iter().map(|m| m.id).collect();
        assert_eq!(ids, (100..110).collect::<Vec<_>>());
    }

    #[test]
    fn test_exited_member_is_replaced() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut pool = new_pool(1, 1);
        pool.members.push(Body::ballistic(
            0,
            Vec2::new(-32.0 - 1.0, 50.0),
            Vec2::new(-300.0, 0.0),
            32.0,
            32.0,
        ));

        pool.update(0.0, &mut rng);
        assert_eq!(pool.len(), 1);
        assert_ne!(pool.members[0].id, 0);
        assert_eq!(pool.members[0].pos.x, 1024.0 + 1.0);
    }

    #[test]
    fn test_member_on_left_edge_is_kept() {
        let mut pool = new_pool(1, 1);
        pool.members.push(Body::ballistic(
            0,
            Vec2::new(-32.0, 50.0),
            Vec2::new(-300.0, 0.0),
            32.0,
            32.0,
        ));
        assert_eq!(pool.cull(), 0);
        assert_eq!(pool.members[0].id, 0);
    }

    #[test]
    fn test_phases_run_in_order() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut pool = new_pool(2, 10);
        // One survivor, one already gone
        pool.members.push(Body::ballistic(1, Vec2::new(500.0, 0.0), Vec2::new(-100.0, 0.0), 32.0, 32.0));
        pool.members.push(Body::ballistic(2, Vec2::new(-40.0, 0.0), Vec2::new(-100.0, 0.0), 32.0, 32.0));

        pool.update(0.5, &mut rng);
        assert_eq!(pool.len(), 2);
        // Survivor keeps its slot and advanced
        assert_eq!(pool.members[0].id, 1);
        assert_eq!(pool.members[0].pos.x, 450.0);
        // Replacement spawned at the edge, then advanced in the same update
        let fresh = &pool.members[1];
        assert_eq!(fresh.id, 10);
        assert!((fresh.pos.x - (1025.0 + fresh.vel.x * 0.5)).abs() < 1e-3);
    }

    #[test]
    fn test_collides_with() {
        let mut pool = new_pool(2, 1);
        pool.members.push(Body::ballistic(1, Vec2::new(500.0, 0.0), Vec2::ZERO, 20.0, 20.0));
        pool.members.push(Body::ballistic(2, Vec2::new(115.0, 105.0), Vec2::ZERO, 20.0, 20.0));

        let body = Body::ballistic(99, Vec2::new(100.0, 100.0), Vec2::ZERO, 20.0, 20.0);
        assert!(pool.collides_with(&body));
        assert_eq!(pool.first_hit(&body).map(|b| b.id), Some(2));

        let far = Body::ballistic(99, Vec2::new(0.0, 700.0), Vec2::ZERO, 20.0, 20.0);
        assert!(!pool.collides_with(&far));
        assert!(pool.first_hit(&far).is_none());
    }

    #[test]
    fn test_empty_quota_stays_empty() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut pool = new_pool(0, 1);
        pool.update(0.1, &mut rng);
        assert!(pool.is_empty());
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let mut a = new_pool(5, 1);
        let mut b = new_pool(5, 1);
        let mut rng_a = Pcg32::seed_from_u64(42);
        let mut rng_b = Pcg32::seed_from_u64(42);
        for _ in 0..50 {
            a.update(1.0 / 60.0, &mut rng_a);
            b.update(1.0 / 60.0, &mut rng_b);
        }
        assert_eq!(a.members, b.members);
    }

    #[test]
    fn test_rejects_inverted_speed_range() {
        let inverted = ObstacleConfig {
            min_speed: 600.0,
            max_speed: 200.0,
            ..template(3)
        };
        assert!(matches!(
            ObstaclePool::new(inverted, playfield(), 1),
            Err(ConfigError::InvalidSpeedRange { .. })
        ));
    }

    #[test]
    fn test_rejects_degenerate_playfield() {
        let flat = Playfield {
            width: 1024.0,
            height: 0.0,
        };
        assert!(matches!(
            ObstaclePool::new(template(3), flat, 1),
            Err(ConfigError::NonPositive {
                field: "playfield.height",
                ..
            })
        ));
    }

    #[test]
    fn test_quota_comes_from_template() {
        let pool = new_pool(4, 1);
        assert_eq!(pool.quota(), 4);
        assert_eq!(pool.template().quota, 4);
    }

    proptest! {
        #[test]
        fn prop_quota_holds_after_every_update(
            seed in any::<u64>(),
            quota in 0usize..20,
            steps in proptest::collection::vec(0.0f32..0.5, 1..40),
        ) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut pool = new_pool(quota, 1);
            for dt in steps {
                pool.update(dt, &mut rng);
                prop_assert_eq!(pool.len(), quota);
            }
        }
    }
}
