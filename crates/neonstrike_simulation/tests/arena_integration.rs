//! Arena integration tests
//!
//! Сценарии полного цикла: спавн-волны → обнаружение → chase → attack
//! pulses → урон игроку → kill → respawn. Всё гоняется через явную Δt
//! (1/64 s — float-точный шаг), поэтому timing-asserts точные.

use std::time::Duration;

use bevy::prelude::*;
use neonstrike_simulation::*;

/// 1/64 секунды — степень двойки, countdown'ы считаются без float-мусора
const DT: Duration = Duration::from_nanos(15_625_000);

fn create_sim_app(seed: u64) -> App {
    let mut app = create_headless_app(seed);
    app.add_plugins(SimulationPlugin);
    app
}

fn step(app: &mut App) {
    step_simulation(app, DT);
}

fn set_player_position(app: &mut App, position: Vec3) {
    app.world_mut().resource_mut::<PlayerState>().position = position;
}

fn active_adversaries(app: &mut App) -> Vec<Entity> {
    let world = app.world_mut();
    let mut query = world.query::<(Entity, &Adversary, &Health)>();
    query
        .iter(world)
        .filter(|(_, adversary, health)| adversary.active && health.is_alive())
        .map(|(entity, ..)| entity)
        .collect()
}

/// Spawn одного противника и телепорт его в `position`
/// (детерминированная расстановка сценария вместо случайного кольца)
fn spawn_one_at(app: &mut App, position: Vec3) -> Entity {
    app.world_mut().send_event(SpawnWave { count: 1 });
    step(app);
    let active = active_adversaries(app);
    assert_eq!(active.len(), 1, "exactly one adversary expected");
    let entity = active[0];
    app.world_mut()
        .get_mut::<Transform>(entity)
        .unwrap()
        .translation = position;
    entity
}

// ============================================================================
// Spawn & pool
// ============================================================================

#[test]
fn test_empty_arena_seeds_initial_wave() {
    let mut app = create_sim_app(42);
    // Игрок далеко в стороне, чтобы волна не сагрилась мгновенно
    set_player_position(&mut app, Vec3::new(500.0, 0.0, 0.0));

    // Тик 1: director замечает пустую арену, тик 2: волна активируется
    step(&mut app);
    step(&mut app);

    let entities = active_adversaries(&mut app);
    assert_eq!(entities.len(), 5, "initial wave is 5 at zero score");

    let world = app.world_mut();
    let mut query = world.query::<(&Adversary, &Health, &Transform, &AIState)>();
    for (adversary, health, transform, state) in query.iter(world) {
        if !adversary.active {
            continue;
        }
        assert_eq!(health.current, health.max);
        assert_eq!(state.kind(), AIStateKind::Patrol);

        // Спавн-кольцо вокруг центра арены: [20, 50)
        // (один тик патруля мог сдвинуть максимум на speed·Δt < 0.04)
        let distance = transform.translation.length();
        assert!(
            distance > 19.9 && distance < 50.1,
            "spawn distance {} outside ring",
            distance
        );
    }
}

#[test]
fn test_spawn_wave_respects_pool_capacity() {
    let mut app = create_sim_app(42);
    set_player_position(&mut app, Vec3::new(500.0, 0.0, 0.0));

    app.world_mut().send_event(SpawnWave { count: 50 });
    step(&mut app);

    assert_eq!(
        active_adversaries(&mut app).len(),
        20,
        "wave silently capped at pool capacity"
    );
}

#[test]
fn test_spawn_wave_caps_at_free_slots() {
    let mut app = create_sim_app(42);
    set_player_position(&mut app, Vec3::new(500.0, 0.0, 0.0));

    app.world_mut().send_event(SpawnWave { count: 18 });
    step(&mut app);
    assert_eq!(active_adversaries(&mut app).len(), 18);

    // Свободно 2 слота — из 5 активируются ровно 2
    app.world_mut().send_event(SpawnWave { count: 5 });
    step(&mut app);
    assert_eq!(active_adversaries(&mut app).len(), 20);
}

#[test]
fn test_spawn_jitter_envelope() {
    let mut app = create_sim_app(7);
    set_player_position(&mut app, Vec3::new(500.0, 0.0, 0.0));

    app.world_mut().send_event(SpawnWave { count: 20 });
    step(&mut app);

    let world = app.world_mut();
    let mut query = world.query::<(&Adversary, &AdversaryStats)>();
    for (adversary, stats) in query.iter(world) {
        if !adversary.active {
            continue;
        }
        // speed = 2.0 ± 0.25, damage = 15 + floor([-5, 5)) → [10, 19]
        assert!(stats.speed >= 1.75 && stats.speed < 2.25, "speed {}", stats.speed);
        assert!(
            stats.damage >= 10 && stats.damage <= 19,
            "damage {}",
            stats.damage
        );
    }
}

// ============================================================================
// FSM scenario (patrol → chase → attack)
// ============================================================================

#[test]
fn test_patrol_to_chase_to_attack_chain() {
    let mut app = create_sim_app(42);
    set_player_position(&mut app, Vec3::new(500.0, 0.0, 0.0));
    let entity = spawn_one_at(&mut app, Vec3::new(30.0, 0.0, 0.0));

    // Дистанция 30 > detection 25 — остаёмся в Patrol
    set_player_position(&mut app, Vec3::ZERO);
    step(&mut app);
    assert_eq!(
        app.world().get::<AIState>(entity).unwrap().kind(),
        AIStateKind::Patrol
    );

    // Игрок подошёл на 20 < 25 — Chase на следующем тике
    let adversary_pos = app.world().get::<Transform>(entity).unwrap().translation;
    set_player_position(&mut app, adversary_pos - Vec3::new(20.0, 0.0, 0.0));
    step(&mut app);
    assert_eq!(
        app.world().get::<AIState>(entity).unwrap().kind(),
        AIStateKind::Chase
    );

    // Дистанция 2 < attack range 3 — Attack
    let adversary_pos = app.world().get::<Transform>(entity).unwrap().translation;
    set_player_position(&mut app, adversary_pos - Vec3::new(2.0, 0.0, 0.0));
    step(&mut app);
    assert_eq!(
        app.world().get::<AIState>(entity).unwrap().kind(),
        AIStateKind::Attack
    );
}

#[test]
fn test_chase_hysteresis() {
    let mut app = create_sim_app(42);
    set_player_position(&mut app, Vec3::new(500.0, 0.0, 0.0));
    let entity = spawn_one_at(&mut app, Vec3::new(20.0, 0.0, 0.0));

    set_player_position(&mut app, Vec3::ZERO);
    step(&mut app);
    assert_eq!(
        app.world().get::<AIState>(entity).unwrap().kind(),
        AIStateKind::Chase
    );

    // 30 > detection 25, но < 1.5×25 — Chase держится (гистерезис)
    let adversary_pos = app.world().get::<Transform>(entity).unwrap().translation;
    set_player_position(&mut app, adversary_pos + Vec3::new(30.0, 0.0, 0.0));
    step(&mut app);
    assert_eq!(
        app.world().get::<AIState>(entity).unwrap().kind(),
        AIStateKind::Chase
    );

    // 40 > 37.5 — игрок потерян, обратно в Patrol
    let adversary_pos = app.world().get::<Transform>(entity).unwrap().translation;
    set_player_position(&mut app, adversary_pos + Vec3::new(40.0, 0.0, 0.0));
    step(&mut app);
    assert_eq!(
        app.world().get::<AIState>(entity).unwrap().kind(),
        AIStateKind::Patrol
    );
}

// ============================================================================
// Attack pulses & player damage
// ============================================================================

#[test]
fn test_attack_pulse_cadence_and_player_damage() {
    let mut app = create_sim_app(42);
    set_player_position(&mut app, Vec3::new(500.0, 0.0, 0.0));
    let entity = spawn_one_at(&mut app, Vec3::new(2.0, 0.0, 0.0));
    let pulse_damage = app.world().get::<AdversaryStats>(entity).unwrap().damage;

    set_player_position(&mut app, Vec3::ZERO);

    // Тик A: Patrol → Chase, тик B: Chase → Attack + мгновенный первый pulse
    step(&mut app);
    assert_eq!(app.world().resource::<PlayerState>().health, 100);
    step(&mut app);
    let after_first = app.world().resource::<PlayerState>().health;
    assert_eq!(
        after_first,
        100 - pulse_damage,
        "first pulse lands on the tick Attack is entered"
    );

    // Cooldown 2.0 s = 128 тиков: до следующего pulse урона нет
    for _ in 0..127 {
        step(&mut app);
        assert_eq!(app.world().resource::<PlayerState>().health, after_first);
    }

    // 128-й тик после pulse — второй pulse
    step(&mut app);
    assert_eq!(
        app.world().resource::<PlayerState>().health,
        after_first - pulse_damage,
        "second pulse exactly one cooldown later"
    );
}

#[test]
fn test_pulse_out_of_range_deals_no_damage() {
    let mut app = create_sim_app(42);
    set_player_position(&mut app, Vec3::new(500.0, 0.0, 0.0));
    let entity = spawn_one_at(&mut app, Vec3::new(2.0, 0.0, 0.0));

    set_player_position(&mut app, Vec3::ZERO);
    step(&mut app);
    step(&mut app); // Вошли в Attack, первый pulse прошёл

    let health_after_first = app.world().resource::<PlayerState>().health;
    assert!(health_after_first < 100);

    // Отходим на 3.3: внутри disengage (3.6) — Attack держится,
    // но вне attack range (3.0) — pulses сгорают при агрегации
    let adversary_pos = app.world().get::<Transform>(entity).unwrap().translation;
    set_player_position(&mut app, adversary_pos + Vec3::new(3.3, 0.0, 0.0));

    for _ in 0..300 {
        step(&mut app);
        assert_eq!(
            app.world().get::<AIState>(entity).unwrap().kind(),
            AIStateKind::Attack
        );
        assert_eq!(
            app.world().resource::<PlayerState>().health,
            health_after_first,
            "out-of-range pulse must not damage the player"
        );
    }
}

#[test]
fn test_player_defeat_latches_once() {
    let mut app = create_sim_app(42);
    set_player_position(&mut app, Vec3::new(500.0, 0.0, 0.0));
    let entity = spawn_one_at(&mut app, Vec3::new(2.0, 0.0, 0.0));
    // Без jitter-лотереи: гарантированно добиваем за ≤10 pulses
    app.world_mut()
        .get_mut::<AdversaryStats>(entity)
        .unwrap()
        .damage = 50;

    set_player_position(&mut app, Vec3::ZERO);

    // 50 урона каждые 128 тиков — смерть на втором pulse
    for _ in 0..200 {
        step(&mut app);
    }

    let player = app.world().resource::<PlayerState>();
    assert_eq!(player.health, 0, "health clamps at zero");
    assert!(player.defeated);

    let defeats: Vec<PlayerDefeated> = app
        .world_mut()
        .resource_mut::<Events<PlayerDefeated>>()
        .drain()
        .collect();
    assert_eq!(defeats.len(), 1, "defeat event fires exactly once");

    // Дальше — тишина: latch не перевзводится
    for _ in 0..200 {
        step(&mut app);
    }
    let defeats: Vec<PlayerDefeated> = app
        .world_mut()
        .resource_mut::<Events<PlayerDefeated>>()
        .drain()
        .collect();
    assert!(defeats.is_empty());
}

// ============================================================================
// Damage arbitration
// ============================================================================

#[test]
fn test_lethal_hit_frees_slot_and_awards_score() {
    let mut app = create_sim_app(42);
    set_player_position(&mut app, Vec3::new(500.0, 0.0, 0.0));
    let entity = spawn_one_at(&mut app, Vec3::new(30.0, 0.0, 0.0));

    // Overkill: урон больше health — clamp на нуле, не подписной
    app.world_mut().send_event(HitReport {
        target: entity,
        amount: 10_000,
        impact_point: Vec3::new(30.0, 1.0, 0.0),
    });
    step(&mut app);

    let adversary = app.world().get::<Adversary>(entity).unwrap();
    let health = app.world().get::<Health>(entity).unwrap();
    assert!(!adversary.active, "kill frees the slot");
    assert!(!health.is_alive());
    assert_eq!(health.current, 0);
    assert_eq!(
        app.world().get::<AIState>(entity).unwrap().kind(),
        AIStateKind::Dead
    );
    assert_eq!(app.world().resource::<PlayerState>().score, KILL_SCORE);

    let kills: Vec<AdversaryKilled> = app
        .world_mut()
        .resource_mut::<Events<AdversaryKilled>>()
        .drain()
        .collect();
    assert_eq!(kills.len(), 1);
}

#[test]
fn test_nonlethal_hit_provokes_chase() {
    let mut app = create_sim_app(42);
    set_player_position(&mut app, Vec3::new(500.0, 0.0, 0.0));
    let entity = spawn_one_at(&mut app, Vec3::new(30.0, 0.0, 0.0));

    set_player_position(&mut app, Vec3::ZERO); // d=30 — вне detection
    app.world_mut().send_event(HitReport {
        target: entity,
        amount: 30,
        impact_point: Vec3::new(30.0, 1.0, 0.0),
    });
    step(&mut app);

    let health = app.world().get::<Health>(entity).unwrap();
    assert_eq!(health.current, 70, "health strictly decreases by amount");
    assert!(health.is_alive());
    // Попадание провоцирует даже вне detection range
    assert_eq!(
        app.world().get::<AIState>(entity).unwrap().kind(),
        AIStateKind::Chase
    );
    assert_eq!(app.world().resource::<PlayerState>().score, 0);

    let damaged: Vec<AdversaryDamaged> = app
        .world_mut()
        .resource_mut::<Events<AdversaryDamaged>>()
        .drain()
        .collect();
    assert_eq!(damaged.len(), 1);
    assert!((damaged[0].health_fraction - 0.7).abs() < 1e-6);
    assert_eq!(damaged[0].tint, damage_tint(0.7));
}

#[test]
fn test_hit_on_free_slot_is_noop() {
    let mut app = create_sim_app(42);
    set_player_position(&mut app, Vec3::new(500.0, 0.0, 0.0));

    // Двое: после kill первого арена не пустеет и director слот не recycle'ит
    app.world_mut().send_event(SpawnWave { count: 2 });
    step(&mut app);
    let active = active_adversaries(&mut app);
    assert_eq!(active.len(), 2);
    let victim = active[0];

    // Убиваем, потом стреляем в труп
    app.world_mut().send_event(HitReport {
        target: victim,
        amount: 10_000,
        impact_point: Vec3::ZERO,
    });
    step(&mut app);
    assert_eq!(app.world().resource::<PlayerState>().score, KILL_SCORE);
    assert!(!app.world().get::<Adversary>(victim).unwrap().active);

    app.world_mut().send_event(HitReport {
        target: victim,
        amount: 10_000,
        impact_point: Vec3::ZERO,
    });
    step(&mut app);

    // Ни очков, ни изменения записи
    assert_eq!(app.world().resource::<PlayerState>().score, KILL_SCORE);
    assert!(!app.world().get::<Adversary>(victim).unwrap().active);
}

#[test]
fn test_same_tick_kill_cancels_pulse() {
    let mut app = create_sim_app(42);
    set_player_position(&mut app, Vec3::new(500.0, 0.0, 0.0));
    let entity = spawn_one_at(&mut app, Vec3::new(2.0, 0.0, 0.0));

    set_player_position(&mut app, Vec3::ZERO);
    step(&mut app); // Patrol → Chase

    // На следующем тике противник войдёт в Attack и выпустит pulse,
    // но kill в combat set того же тика сжигает его до агрегации
    app.world_mut().send_event(HitReport {
        target: entity,
        amount: 10_000,
        impact_point: Vec3::ZERO,
    });
    step(&mut app);

    assert!(!app.world().get::<Adversary>(entity).unwrap().active);
    assert_eq!(
        app.world().resource::<PlayerState>().health,
        100,
        "pulse from an adversary killed this tick must not land"
    );
}

// ============================================================================
// Respawn director
// ============================================================================

#[test]
fn test_respawn_wave_scales_with_score() {
    let mut app = create_sim_app(42);
    set_player_position(&mut app, Vec3::new(500.0, 0.0, 0.0));

    // Первая волна (5) приходит сама
    step(&mut app);
    step(&mut app);
    let wave1 = active_adversaries(&mut app);
    assert_eq!(wave1.len(), 5);

    // Выносим волну целиком → score 500, director просит новую пятёрку
    for entity in &wave1 {
        app.world_mut().send_event(HitReport {
            target: *entity,
            amount: 10_000,
            impact_point: Vec3::ZERO,
        });
    }
    step(&mut app);
    assert_eq!(active_adversaries(&mut app).len(), 0);
    assert_eq!(app.world().resource::<PlayerState>().score, 500);

    step(&mut app);
    let wave2 = active_adversaries(&mut app);
    assert_eq!(wave2.len(), 5, "wave size still 5 below 1000 score");

    // Вторая волна добивает счёт до 1000 → волна растёт до 6
    for entity in &wave2 {
        app.world_mut().send_event(HitReport {
            target: *entity,
            amount: 10_000,
            impact_point: Vec3::ZERO,
        });
    }
    step(&mut app);
    assert_eq!(app.world().resource::<PlayerState>().score, 1000);
    step(&mut app);
    assert_eq!(
        active_adversaries(&mut app).len(),
        6,
        "5 + floor(1000/1000) = 6"
    );
}

// ============================================================================
// HUD & snapshots
// ============================================================================

#[test]
fn test_hud_and_snapshots_published() {
    let mut app = create_sim_app(42);
    set_player_position(&mut app, Vec3::new(500.0, 0.0, 0.0));
    step(&mut app);
    step(&mut app); // Волна из 5

    let hud = app.world().resource::<HudState>().clone();
    assert_eq!(hud.ammo, "30/90");
    assert_eq!(hud.weapon_name, "Assault Rifle");
    assert_eq!(hud.adversaries_alive, 5);
    assert_eq!(hud.health_percent, 100);
    assert_eq!(hud.health_band, HealthBand::Good);

    let snapshots = app.world().resource::<AdversarySnapshots>();
    assert_eq!(snapshots.0.len(), 5);
    for pair in snapshots.0.windows(2) {
        assert!(pair[0].slot < pair[1].slot, "snapshots sorted by slot");
    }
    for snapshot in &snapshots.0 {
        assert_eq!(snapshot.health_fraction, 1.0);
        assert_eq!(snapshot.state, AIStateKind::Patrol);
    }
}

#[test]
fn test_hud_health_banding() {
    let mut app = create_sim_app(42);
    set_player_position(&mut app, Vec3::new(500.0, 0.0, 0.0));

    app.world_mut().resource_mut::<PlayerState>().health = 45;
    step(&mut app);
    assert_eq!(
        app.world().resource::<HudState>().health_band,
        HealthBand::Caution
    );

    app.world_mut().resource_mut::<PlayerState>().health = 10;
    step(&mut app);
    assert_eq!(
        app.world().resource::<HudState>().health_band,
        HealthBand::Critical
    );
}
