//! Headless симуляция NEONSTRIKE
//!
//! Прогоняет арену без рендера со скриптованным игроком: стоим в центре,
//! противники сами находят и атакуют. Для проверки детерминизма и
//! поведения популяции.

use std::time::Duration;

use neonstrike_simulation::{
    create_headless_app, step_simulation, Adversary, Health, HudState, PlayerState,
    SimulationPlugin,
};

fn main() {
    let seed = 42;
    println!("Starting NEONSTRIKE headless simulation (seed: {})", seed);

    let mut app = create_headless_app(seed);
    app.add_plugins(SimulationPlugin);

    // 1000 тиков по 16ms ≈ 16 секунд арены
    let dt = Duration::from_millis(16);
    for tick in 0..1000 {
        step_simulation(&mut app, dt);

        if tick % 100 == 0 {
            let alive = {
                let world = app.world_mut();
                let mut query = world.query::<(&Adversary, &Health)>();
                query
                    .iter(world)
                    .filter(|(adversary, health)| adversary.active && health.is_alive())
                    .count()
            };
            let player = app.world().resource::<PlayerState>();
            let hud = app.world().resource::<HudState>();
            println!(
                "Tick {}: {} adversaries, player hp {} ({}), ammo {}",
                tick,
                alive,
                player.health,
                hud.health_percent,
                hud.ammo
            );
        }
    }

    let player = app.world().resource::<PlayerState>();
    println!(
        "Simulation complete! score {} defeated {}",
        player.score, player.defeated
    );
}
