//! Collision detection and resolution
//!
//! Everything collides as circles except the sword, which uses an
//! axis-aligned square around the player that ignores facing. Each pass
//! walks the collections by index, records what to remove, and compacts at
//! the end, so removals never disturb iteration.

use glam::Vec2;
use rand::Rng;

use super::entities::EntityManager;
use super::graze::GrazingSystem;
use super::player::Player;
use super::powerup::{PowerUpKind, PowerUpSystem};
use crate::consts::{SWORD_DAMAGE, SWORD_GRAZE_REWARD, SWORD_HIT_SCORE};

/// Anything with a circular hit area
pub trait Collider {
    fn center(&self) -> Vec2;
    fn radius(&self) -> f32;
}

/// Circle-circle overlap: center distance strictly less than the radius sum
#[inline]
pub fn collides_with(a: &impl Collider, b: &impl Collider) -> bool {
    a.center().distance(b.center()) < a.radius() + b.radius()
}

/// Whether `point` lies in the square of half-width `half` around `center`.
/// Half-open like a pixel rect: left/top edges inside, right/bottom outside.
#[inline]
pub fn in_square(center: Vec2, half: f32, point: Vec2) -> bool {
    let d = point - center;
    (-half..half).contains(&d.x) && (-half..half).contains(&d.y)
}

/// What happened during one round of collision passes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionReport {
    pub enemies_killed: u32,
    /// Hazards that touched the player (shielded or not)
    pub player_hits: u32,
    pub pickup: Option<PowerUpKind>,
    pub melee_hits: u32,
}

/// Run every pass in order
pub fn resolve<R: Rng>(
    player: &mut Player,
    entities: &mut EntityManager,
    powerups: &PowerUpSystem,
    graze: &mut GrazingSystem,
    rng: &mut R,
) -> CollisionReport {
    let mut report = CollisionReport {
        enemies_killed: bullets_vs_enemies(entities, rng),
        ..Default::default()
    };
    report.player_hits += enemy_bullets_vs_player(player, entities);
    report.player_hits += enemies_vs_player(player, entities);
    report.pickup = powerups_vs_player(player, entities, powerups);
    let (melee_hits, melee_kills) = melee_vs_enemies(player, entities, graze, rng);
    report.melee_hits = melee_hits;
    report.enemies_killed += melee_kills;
    report
}

/// Pass 1: friendly bullets damage the first enemy they overlap.
///
/// Non-piercing bullets are spent on that hit. Dead enemies are removed,
/// scored and burst into particles. Returns the number of kills.
pub fn bullets_vs_enemies<R: Rng>(entities: &mut EntityManager, rng: &mut R) -> u32 {
    let mut spent = vec![false; entities.bullets.len()];
    let mut dead = vec![false; entities.enemies.len()];
    let mut deaths: Vec<Vec2> = Vec::new();

    for (bi, bullet) in entities.bullets.iter().enumerate() {
        let hit = entities
            .enemies
            .iter()
            .enumerate()
            .find(|(ei, enemy)| !dead[*ei] && collides_with(bullet, *enemy))
            .map(|(ei, _)| ei);

        if let Some(ei) = hit {
            let enemy = &mut entities.enemies[ei];
            enemy.take_damage(bullet.damage);
            if !bullet.is_piercing() {
                spent[bi] = true;
            }
            if enemy.is_dead() {
                dead[ei] = true;
                entities.score += enemy.score_value;
                deaths.push(enemy.pos);
                log::debug!("{:?} #{} destroyed", enemy.kind, enemy.id);
            }
        }
    }

    compact(&mut entities.bullets, &spent);
    compact(&mut entities.enemies, &dead);
    for pos in &deaths {
        entities.add_particles(*pos, rng);
    }
    deaths.len() as u32
}

/// Pass 2: enemy bullets touching the player are consumed; they hurt
/// unless the shield is up. Returns the number of bullets that connected.
pub fn enemy_bullets_vs_player(player: &mut Player, entities: &mut EntityManager) -> u32 {
    let mut consumed = vec![false; entities.enemy_bullets.len()];
    for (i, bullet) in entities.enemy_bullets.iter().enumerate() {
        if collides_with(&*player, bullet) {
            consumed[i] = true;
            if !player.shield_active {
                player.take_damage();
            }
        }
    }
    compact(&mut entities.enemy_bullets, &consumed);
    consumed.iter().filter(|c| **c).count() as u32
}

/// Pass 3: body contact. Every overlapping enemy hurts the unshielded player
/// every tick the overlap lasts.
pub fn enemies_vs_player(player: &mut Player, entities: &EntityManager) -> u32 {
    let mut contacts = 0;
    for enemy in &entities.enemies {
        if collides_with(&*player, enemy) {
            contacts += 1;
            if !player.shield_active {
                player.take_damage();
            }
        }
    }
    contacts
}

/// Pass 4: pick up the first overlapping power-up
pub fn powerups_vs_player(
    player: &mut Player,
    entities: &mut EntityManager,
    powerups: &PowerUpSystem,
) -> Option<PowerUpKind> {
    let index = entities
        .powerups
        .iter()
        .position(|p| collides_with(&*player, p))?;
    let kind = entities.powerups.remove(index).kind;
    powerups.activate(player, kind, entities);
    Some(kind)
}

/// Pass 5: sword. Only while the swing window is open; every enemy whose
/// center is inside the square of half-width 2×size takes melee damage and
/// feeds the graze meter. Returns (hits, kills).
pub fn melee_vs_enemies<R: Rng>(
    player: &Player,
    entities: &mut EntityManager,
    graze: &mut GrazingSystem,
    rng: &mut R,
) -> (u32, u32) {
    if !player.sword_active() {
        return (0, 0);
    }

    let half = player.size * 2.0;
    let mut hits = 0;
    let mut dead = vec![false; entities.enemies.len()];
    let mut deaths: Vec<Vec2> = Vec::new();

    for (i, enemy) in entities.enemies.iter_mut().enumerate() {
        if !in_square(player.pos, half, enemy.pos) {
            continue;
        }
        enemy.take_damage(SWORD_DAMAGE);
        graze.add_meter(SWORD_GRAZE_REWARD);
        hits += 1;
        entities.score += SWORD_HIT_SCORE;
        if enemy.is_dead() {
            dead[i] = true;
            entities.score += enemy.score_value;
            deaths.push(enemy.pos);
        }
    }

    compact(&mut entities.enemies, &dead);
    for pos in &deaths {
        entities.add_particles(*pos, rng);
    }
    (hits, deaths.len() as u32)
}

/// Remove every element whose mark is set, preserving order
fn compact<T>(items: &mut Vec<T>, marks: &[bool]) {
    let mut i = 0;
    items.retain(|_| {
        let keep = !marks.get(i).copied().unwrap_or(false);
        i += 1;
        keep
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::arena::Arena;
    use crate::sim::bullet::{Bullet, BulletKind};
    use crate::sim::enemy::EnemyKind;
    use crate::sim::player::Weapon;
    use crate::sim::powerup::PowerUp;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    struct Circle(Vec2, f32);

    impl Collider for Circle {
        fn center(&self) -> Vec2 {
            self.0
        }

        fn radius(&self) -> f32 {
            self.1
        }
    }

    fn setup() -> (Player, EntityManager, Pcg32) {
        let arena = Arena::default();
        (
            Player::new(arena.center()),
            EntityManager::new(arena),
            Pcg32::seed_from_u64(5),
        )
    }

    #[test]
    fn test_circle_overlap_is_strict() {
        let a = Circle(Vec2::ZERO, 5.0);
        let b = Circle(Vec2::new(10.0, 0.0), 5.0);
        assert!(!collides_with(&a, &b));
        let c = Circle(Vec2::new(9.9, 0.0), 5.0);
        assert!(collides_with(&a, &c));
    }

    #[test]
    fn test_kill_scores_and_bursts() {
        let (_, mut em, mut rng) = setup();
        let pos = Vec2::new(200.0, 200.0);
        em.add_enemy(EnemyKind::Normal, pos);
        em.bullets.push(Bullet::friendly(pos + Vec2::new(5.0, 0.0), 0.0));

        let kills = bullets_vs_enemies(&mut em, &mut rng);
        assert_eq!(kills, 1);
        assert!(em.enemies.is_empty());
        assert!(em.bullets.is_empty());
        assert_eq!(em.score, EnemyKind::Normal.score_value());
        assert_eq!(em.particles.len(), PARTICLE_BURST);
        assert!(em.particles.iter().all(|p| p.pos == pos));
    }

    #[test]
    fn test_one_enemy_per_bullet_per_tick() {
        let (_, mut em, mut rng) = setup();
        let pos = Vec2::new(200.0, 200.0);
        em.add_enemy(EnemyKind::Tough, pos);
        em.add_enemy(EnemyKind::Tough, pos);
        em.bullets.push(Bullet::friendly(pos, 0.0).with_kind(BulletKind::Piercing).with_damage(1));
        bullets_vs_enemies(&mut em, &mut rng);
        assert_eq!(em.enemies[0].health, 2);
        assert_eq!(em.enemies[1].health, 3);
    }

    #[test]
    fn test_piercing_survives_hit() {
        let (_, mut em, mut rng) = setup();
        let pos = Vec2::new(200.0, 200.0);
        em.add_enemy(EnemyKind::Normal, pos);
        em.bullets.push(Bullet::friendly(pos, 0.0).with_kind(BulletKind::Piercing));
        bullets_vs_enemies(&mut em, &mut rng);
        assert!(em.enemies.is_empty());
        assert_eq!(em.bullets.len(), 1);
    }

    #[test]
    fn test_dead_enemy_not_hit_twice() {
        let (_, mut em, mut rng) = setup();
        let pos = Vec2::new(200.0, 200.0);
        em.add_enemy(EnemyKind::Normal, pos);
        em.add_enemy(EnemyKind::Normal, pos + Vec2::new(1.0, 0.0));
        em.bullets.push(Bullet::friendly(pos, 0.0));
        em.bullets.push(Bullet::friendly(pos, 0.0));
        assert_eq!(bullets_vs_enemies(&mut em, &mut rng), 2);
        assert!(em.enemies.is_empty());
        assert!(em.bullets.is_empty());
    }

    #[test]
    fn test_enemy_bullet_hurts_player() {
        let (mut player, mut em, _) = setup();
        player.hits_remaining = 2;
        em.enemy_bullets.push(Bullet::hostile(player.pos, 0.0, 5.0));
        em.enemy_bullets.push(Bullet::hostile(player.pos + Vec2::new(100.0, 0.0), 0.0, 5.0));
        assert_eq!(enemy_bullets_vs_player(&mut player, &mut em), 1);
        assert_eq!(player.hits_remaining, 1);
        assert_eq!(em.enemy_bullets.len(), 1);
    }

    #[test]
    fn test_shield_absorbs_bullet() {
        let (mut player, mut em, _) = setup();
        player.activate_shield();
        em.enemy_bullets.push(Bullet::hostile(player.pos, 0.0, 5.0));
        enemy_bullets_vs_player(&mut player, &mut em);
        assert_eq!(player.hits_remaining, 1);
        assert!(player.alive);
        assert!(em.enemy_bullets.is_empty());
    }

    #[test]
    fn test_body_contact_every_tick() {
        let (mut player, mut em, _) = setup();
        player.hits_remaining = 3;
        em.add_enemy(EnemyKind::Normal, player.pos + Vec2::new(10.0, 0.0));
        enemies_vs_player(&mut player, &em);
        enemies_vs_player(&mut player, &em);
        assert_eq!(player.hits_remaining, 1);
        assert_eq!(em.enemies.len(), 1);

        player.activate_shield();
        enemies_vs_player(&mut player, &em);
        assert_eq!(player.hits_remaining, 1);
    }

    #[test]
    fn test_pickup_first_only() {
        let (mut player, mut em, _) = setup();
        let system = PowerUpSystem::new();
        em.powerups.push(PowerUp::new(player.pos, PowerUpKind::Laser));
        em.powerups.push(PowerUp::new(player.pos, PowerUpKind::Spread));
        assert_eq!(powerups_vs_player(&mut player, &mut em, &system), Some(PowerUpKind::Laser));
        assert_eq!(player.weapon, Weapon::Laser);
        assert_eq!(em.powerups.len(), 1);
    }

    #[test]
    fn test_melee_square() {
        let (mut player, mut em, mut rng) = setup();
        let mut graze = GrazingSystem::new();
        let half = player.size * 2.0;
        // Corner of the square is inside even though it is outside a circle of that radius
        em.add_enemy(EnemyKind::Tough, player.pos + Vec2::new(half - 1.0, half - 1.0));
        em.add_enemy(EnemyKind::Normal, player.pos + Vec2::new(-half, 0.0));
        em.add_enemy(EnemyKind::Normal, player.pos + Vec2::new(half, 0.0));

        assert_eq!(melee_vs_enemies(&player, &mut em, &mut graze, &mut rng), (0, 0));

        player.sword_attack();
        let (hits, kills) = melee_vs_enemies(&player, &mut em, &mut graze, &mut rng);
        assert_eq!(hits, 2);
        assert_eq!(kills, 2);
        assert_eq!(em.enemies.len(), 1);
        assert_eq!(graze.meter, 2.0 * SWORD_GRAZE_REWARD);
        assert_eq!(
            em.score,
            2 * SWORD_HIT_SCORE + EnemyKind::Tough.score_value() + EnemyKind::Normal.score_value()
        );
    }

    #[test]
    fn test_resolve_report() {
        let (mut player, mut em, mut rng) = setup();
        let system = PowerUpSystem::new();
        let mut graze = GrazingSystem::new();
        player.hits_remaining = 5;
        em.add_enemy(EnemyKind::Normal, Vec2::new(100.0, 100.0));
        em.bullets.push(Bullet::friendly(Vec2::new(100.0, 100.0), 0.0));
        em.enemy_bullets.push(Bullet::hostile(player.pos, 0.0, 5.0));
        em.powerups.push(PowerUp::new(player.pos, PowerUpKind::Shield));

        let report = resolve(&mut player, &mut em, &system, &mut graze, &mut rng);
        assert_eq!(report.enemies_killed, 1);
        assert_eq!(report.player_hits, 1);
        assert_eq!(report.pickup, Some(PowerUpKind::Shield));
        assert_eq!(player.hits_remaining, 4);
        assert!(player.shield_active);
    }

    proptest! {
        #[test]
        fn prop_collision_symmetric(
            ax in -500.0f32..500.0, ay in -500.0f32..500.0, ar in 0.0f32..50.0,
            bx in -500.0f32..500.0, by in -500.0f32..500.0, br in 0.0f32..50.0,
        ) {
            let a = Circle(Vec2::new(ax, ay), ar);
            let b = Circle(Vec2::new(bx, by), br);
            prop_assert_eq!(collides_with(&a, &b), collides_with(&b, &a));
        }
    }
}
