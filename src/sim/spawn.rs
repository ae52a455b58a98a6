//! Entity spawning
//!
//! All randomness goes through the caller's RNG so a seeded `Pcg32` gives
//! identical runs. Coordinates are drawn as whole pixels.

use glam::Vec2;
use rand::Rng;

use super::rect::Rect;
use super::state::{Collectible, CollectibleKind, Edge, Player, Projectile, ProjectileKind};
use crate::consts::*;

/// Uniform whole-pixel coordinate in `[margin, dim - margin]`
///
/// Falls back to the midpoint when the range is empty (tiny arenas).
fn coord_within<R: Rng + ?Sized>(rng: &mut R, margin: f32, dim: f32) -> f32 {
    let lo = margin.round() as i32;
    let hi = (dim - margin).round() as i32;
    if hi < lo {
        return (dim / 2.0).round();
    }
    rng.random_range(lo..=hi) as f32
}

/// Uniform pick from a fixed catalogue
fn pick<R: Rng + ?Sized, T: Copy>(rng: &mut R, catalogue: &[T]) -> T {
    catalogue[rng.random_range(0..catalogue.len())]
}

/// Place a new player somewhere away from the walls
pub fn spawn_player<R: Rng + ?Sized>(rng: &mut R, arena: &Rect, velocity: f32) -> Player {
    let center = Vec2::new(
        coord_within(rng, PLAYER_SPAWN_MARGIN, arena.size.x),
        coord_within(rng, PLAYER_SPAWN_MARGIN, arena.size.y),
    );
    Player::new(center, velocity)
}

/// New collectible with a random look at a random in-bounds spot
pub fn spawn_collectible<R: Rng + ?Sized>(
    rng: &mut R,
    arena_width: f32,
    arena_height: f32,
) -> Collectible {
    let kind = pick(rng, &CollectibleKind::ALL);
    let center = Vec2::new(
        coord_within(rng, SPAWN_MARGIN, arena_width),
        coord_within(rng, SPAWN_MARGIN, arena_height),
    );
    Collectible {
        kind,
        rect: Rect::from_center(center, Vec2::splat(ITEM_SIZE)),
    }
}

/// New projectile centred on a random point of a random edge
///
/// Speed is not stored here: every projectile reads the run's shared speed.
pub fn spawn_projectile<R: Rng + ?Sized>(
    rng: &mut R,
    arena_width: f32,
    arena_height: f32,
) -> Projectile {
    let kind = pick(rng, &ProjectileKind::ALL);
    let origin = pick(rng, &Edge::ALL);
    let center = match origin {
        Edge::Top => Vec2::new(coord_within(rng, SPAWN_MARGIN, arena_width), 0.0),
        Edge::Right => Vec2::new(arena_width, coord_within(rng, SPAWN_MARGIN, arena_height)),
        Edge::Bottom => Vec2::new(coord_within(rng, SPAWN_MARGIN, arena_width), arena_height),
        Edge::Left => Vec2::new(0.0, coord_within(rng, SPAWN_MARGIN, arena_height)),
    };
    Projectile {
        kind,
        origin,
        rect: Rect::from_center(center, Vec2::splat(ITEM_SIZE)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use std::collections::HashSet;

    #[test]
    fn test_collectible_center_in_range() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..500 {
            let c = spawn_collectible(&mut rng, 800.0, 600.0);
            let center = c.rect.center();
            assert!((32.0..=768.0).contains(&center.x));
            assert!((32.0..=568.0).contains(&center.y));
            assert_eq!(c.rect.size, Vec2::splat(ITEM_SIZE));
        }
    }

    #[test]
    fn test_collectible_kinds_all_appear() {
        let mut rng = Pcg32::seed_from_u64(11);
        let kinds: HashSet<_> = (0..200)
            .map(|_| spawn_collectible(&mut rng, 800.0, 800.0).kind)
            .collect();
        assert_eq!(kinds.len(), CollectibleKind::ALL.len());
    }

    #[test]
    fn test_projectile_pinned_to_origin_edge() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut edges = HashSet::new();
        for _ in 0..400 {
            let p = spawn_projectile(&mut rng, 800.0, 800.0);
            let c = p.rect.center();
            match p.origin {
                Edge::Top => assert_eq!(c.y, 0.0),
                Edge::Right => assert_eq!(c.x, 800.0),
                Edge::Bottom => assert_eq!(c.y, 800.0),
                Edge::Left => assert_eq!(c.x, 0.0),
            }
            match p.origin {
                Edge::Top | Edge::Bottom => assert!((32.0..=768.0).contains(&c.x)),
                Edge::Left | Edge::Right => assert!((32.0..=768.0).contains(&c.y)),
            }
            edges.insert(p.origin);
        }
        assert_eq!(edges.len(), 4);
    }

    #[test]
    fn test_player_spawn_margin() {
        let mut rng = Pcg32::seed_from_u64(5);
        let arena = Rect::new(0.0, 0.0, 800.0, 800.0);
        for _ in 0..200 {
            let p = spawn_player(&mut rng, &arena, 7.0);
            let c = p.rect.center();
            assert!((100.0..=700.0).contains(&c.x));
            assert!((100.0..=700.0).contains(&c.y));
        }
    }

    #[test]
    fn test_same_seed_same_spawns() {
        let mut a = Pcg32::seed_from_u64(42);
        let mut b = Pcg32::seed_from_u64(42);
        for _ in 0..20 {
            assert_eq!(
                spawn_projectile(&mut a, 800.0, 800.0),
                spawn_projectile(&mut b, 800.0, 800.0)
            );
        }
    }

    #[test]
    fn test_tiny_arena_falls_back_to_middle() {
        let mut rng = Pcg32::seed_from_u64(1);
        let c = spawn_collectible(&mut rng, 40.0, 40.0);
        assert_eq!(c.rect.center(), Vec2::new(20.0, 20.0));
    }
}
