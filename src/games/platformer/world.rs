use rand::Rng;

use crate::config::PlatformerConfig;
use crate::physics::Aabb;

const FIRST_X: f32 = 80.0;
const FIRST_Y: f32 = 430.0;
const BASE_WIDTH: f32 = 150.0;
const GROUND_Y: f32 = 462.0;
const TOP_LIMIT: f32 = 90.0;

/// Build the level: a staircase of floating platforms that wraps back to the
/// left edge, followed by a full-width ground slab. The ground is always last.
pub fn generate_platforms<R: Rng>(config: &PlatformerConfig, rng: &mut R) -> Vec<Aabb> {
    let mut platforms = Vec::with_capacity(config.platform_count + 1);
    let mut x = FIRST_X;
    let mut y = FIRST_Y;

    for _ in 0..config.platform_count {
        platforms.push(Aabb::new(
            x,
            y,
            BASE_WIDTH + rng.gen_range(0.0..60.0),
            config.platform_height,
        ));
        x += 160.0 + rng.gen_range(0.0..110.0);
        y -= 38.0 + rng.gen_range(0.0..38.0);
        if x > config.world_width - 220.0 {
            x = 120.0 + rng.gen_range(0.0..80.0);
        }
        if y < TOP_LIMIT {
            y = FIRST_Y - rng.gen_range(0.0..90.0);
        }
    }

    platforms.push(Aabb::new(
        0.0,
        GROUND_Y,
        config.world_width,
        config.platform_height + 4.0,
    ));
    platforms
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_ground_is_last_and_spans_world() {
        let config = PlatformerConfig::default();
        let mut rng = StdRng::seed_from_u64(7);
        let platforms = generate_platforms(&config, &mut rng);

        assert_eq!(platforms.len(), config.platform_count + 1);
        let ground = platforms.last().unwrap();
        assert_eq!(ground.x, 0.0);
        assert_eq!(ground.width, config.world_width);
        assert_eq!(ground.height, config.platform_height + 4.0);
    }

    #[test]
    fn test_floating_platforms_stay_in_bounds() {
        let config = PlatformerConfig::default();
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let platforms = generate_platforms(&config, &mut rng);
            for plat in &platforms[..platforms.len() - 1] {
                assert!(plat.y >= TOP_LIMIT && plat.y <= FIRST_Y);
                assert!(plat.width >= BASE_WIDTH && plat.width < BASE_WIDTH + 60.0);
                assert!(plat.right() < config.world_width);
            }
        }
    }

    #[test]
    fn test_same_seed_same_level() {
        let config = PlatformerConfig::default();
        let a = generate_platforms(&config, &mut StdRng::seed_from_u64(3));
        let b = generate_platforms(&config, &mut StdRng::seed_from_u64(3));
        assert_eq!(a, b);
    }
}
