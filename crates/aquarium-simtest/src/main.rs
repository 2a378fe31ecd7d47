//! Aquarium Headless Simulation Harness
//!
//! Drives the engine through scripted scenarios and long invariant sweeps.
//! Runs entirely in-process: no window, no renderer.
//!
//! Usage:
//!   cargo run -p aquarium-simtest
//!   cargo run -p aquarium-simtest -- --verbose
//!   cargo run -p aquarium-simtest -- --config tank.toml --json

use std::collections::HashSet;

use aquarium_core::prelude::*;

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

impl TestResult {
    fn new(name: &str, passed: bool, detail: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed,
            detail: detail.into(),
        }
    }
}

struct Options {
    verbose: bool,
    json: bool,
    config_path: Option<String>,
}

fn parse_args() -> Options {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config_path = args
        .iter()
        .position(|a| a == "--config")
        .and_then(|i| args.get(i + 1).cloned());
    Options {
        verbose: args.iter().any(|a| a == "--verbose"),
        json: args.iter().any(|a| a == "--json"),
        config_path,
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let options = parse_args();
    println!("=== Aquarium Simulation Harness ===\n");

    let config = match &options.config_path {
        Some(path) => match TankConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::error!("Could not load {}: {}", path, e);
                std::process::exit(2);
            }
        },
        None => TankConfig::default(),
    };
    tracing::info!("Running with seed {:#x}", config.seed);

    let mut results = Vec::new();

    // 1. Configuration
    results.extend(validate_config(&config, options.verbose));

    // 2. Fresh tank seeding
    results.extend(validate_seeding(&config, options.verbose));

    // 3. Long sweep with invariant checks
    let (sweep, final_snapshot) = run_invariant_sweep(&config, options.verbose);
    results.extend(sweep);

    // 4. Feeding, death and water quality scenarios
    results.extend(validate_feeding(&config, options.verbose));
    results.extend(validate_old_age(&config, options.verbose));
    results.extend(validate_water_quality(&config, options.verbose));

    // 5. Host input handling
    results.extend(validate_input(&config, options.verbose));

    // 6. Pause, replay and persistence
    results.extend(validate_replay(&config, options.verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || options.verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if options.json {
        match final_snapshot.and_then(|s| s.to_json().ok()) {
            Some(json) => println!("{}", json),
            None => tracing::warn!("No snapshot to dump"),
        }
    }

    if failed > 0 {
        std::process::exit(1);
    }
}

fn empty_tank(config: &TankConfig) -> Option<AquariumEngine> {
    let mut config = config.clone();
    config.population.clear();
    AquariumEngine::empty(config).ok()
}

fn run(engine: &mut AquariumEngine, seconds: f32, dt: f32) {
    let ticks = (seconds / dt).round() as usize;
    for _ in 0..ticks {
        engine.advance(dt);
    }
}

// ── 1. Configuration ────────────────────────────────────────────────────

fn validate_config(config: &TankConfig, verbose: bool) -> Vec<TestResult> {
    println!("--- Configuration ---");
    let mut results = Vec::new();

    results.push(match config.validate() {
        Ok(()) => TestResult::new("config_valid", true, "configuration validates"),
        Err(e) => TestResult::new("config_valid", false, e.to_string()),
    });

    let roundtrip = config
        .to_toml_string()
        .and_then(|s| TankConfig::from_toml_str(&s));
    results.push(match roundtrip {
        Ok(back) => TestResult::new(
            "config_toml_roundtrip",
            back.seed == config.seed && back.population.len() == config.population.len(),
            "TOML render parses back to the same tank",
        ),
        Err(e) => TestResult::new("config_toml_roundtrip", false, e.to_string()),
    });

    if verbose {
        let bounds = config.bounds();
        println!(
            "  tank {}x{} at ({}, {}), waterline {}, floor {}",
            bounds.width,
            bounds.height,
            bounds.x,
            bounds.y,
            config.water_top(),
            config.floor_y()
        );
    }

    results
}

// ── 2. Seeding ──────────────────────────────────────────────────────────

fn validate_seeding(config: &TankConfig, verbose: bool) -> Vec<TestResult> {
    println!("--- Seeding ---");
    let mut results = Vec::new();

    let engine = match AquariumEngine::new(config.clone()) {
        Ok(engine) => engine,
        Err(e) => {
            results.push(TestResult::new("seed_tank", false, e.to_string()));
            return results;
        }
    };

    results.push(TestResult::new(
        "seed_seaweed",
        engine.seaweed_count() == config.seaweed.clumps as usize,
        format!("{} seaweed clumps planted", engine.seaweed_count()),
    ));
    results.push(TestResult::new(
        "seed_population",
        engine.fish_count() == config.population.len(),
        format!("{} fish spawned", engine.fish_count()),
    ));

    let snapshot = engine.snapshot();
    let in_water = snapshot
        .fish
        .iter()
        .all(|f| f.position.y >= snapshot.water_top && f.position.y <= snapshot.floor_y);
    results.push(TestResult::new(
        "seed_fish_in_water",
        in_water,
        "every fish starts below the waterline and above the floor",
    ));

    let rooted = snapshot
        .seaweed
        .iter()
        .all(|w| (w.root.y - snapshot.floor_y).abs() < f32::EPSILON);
    results.push(TestResult::new(
        "seed_seaweed_rooted",
        rooted,
        "every clump is rooted on the floor",
    ));

    if verbose {
        for fish in &snapshot.fish {
            println!(
                "  {} {} size {:.0}/{:.0} at ({:.0}, {:.0}) {:?}",
                fish.id,
                fish.kind.label(),
                fish.size,
                fish.max_size,
                fish.position.x,
                fish.position.y,
                fish.species.pattern
            );
        }
    }

    results
}

// ── 3. Invariant sweep ──────────────────────────────────────────────────

fn run_invariant_sweep(
    config: &TankConfig,
    verbose: bool,
) -> (Vec<TestResult>, Option<TankSnapshot>) {
    println!("--- Invariant sweep (10 simulated minutes) ---");
    let mut results = Vec::new();

    let Ok(mut engine) = AquariumEngine::new(config.clone()) else {
        results.push(TestResult::new("sweep_start", false, "tank failed to build"));
        return (results, None);
    };
    let bounds = config.bounds();
    let dt = 1.0 / 30.0;

    let mut bad_env = 0usize;
    let mut oversize = 0usize;
    let mut escaped = 0usize;
    let mut double_conversions = 0usize;
    let mut converted = HashSet::new();
    let mut kills = 0usize;
    let mut meals = 0u32;

    for tick in 0..18_000u32 {
        match tick % 900 {
            0 => engine.submit(Command::FeedAt {
                x: bounds.x + bounds.width * ((tick / 900) % 7 + 1) as f32 / 8.0,
            }),
            300 if tick % 2700 == 300 => engine.submit(Command::Spawn {
                kind: FishKind::ALL[(tick / 2700) as usize % 3],
                size: None,
            }),
            450 if tick % 3600 == 450 => engine.submit(Command::DisturbAt {
                at: bounds.center(),
            }),
            _ => {}
        }

        let report = engine.advance(dt);
        kills += report.kills.len();
        meals += report.feeding.pellets_eaten;
        for id in report.corpses_created {
            if !converted.insert(id) {
                double_conversions += 1;
            }
        }

        let env = engine.environment();
        if !(0.0..=100.0).contains(&env.dirt) || !(0.0..=100.0).contains(&env.algae) {
            bad_env += 1;
        }
        let snapshot = engine.snapshot();
        oversize += snapshot
            .fish
            .iter()
            .filter(|f| f.size > f.max_size + 1e-4)
            .count();
        escaped += snapshot
            .fish
            .iter()
            .filter(|f| {
                f.position.y < snapshot.water_top
                    || f.position.y > snapshot.floor_y
                    || f.position.x < bounds.left()
                    || f.position.x > bounds.right()
            })
            .count();

        if verbose && tick % 1800 == 0 {
            println!("  {}", engine.status());
        }
    }

    results.push(TestResult::new(
        "sweep_env_bounds",
        bad_env == 0,
        format!("{} ticks with dirt/algae outside 0..=100", bad_env),
    ));
    results.push(TestResult::new(
        "sweep_size_cap",
        oversize == 0,
        format!("{} fish-ticks above max size", oversize),
    ));
    results.push(TestResult::new(
        "sweep_fish_in_water",
        escaped == 0,
        format!("{} fish-ticks outside the water", escaped),
    ));
    results.push(TestResult::new(
        "sweep_single_conversion",
        double_conversions == 0,
        format!(
            "{} deaths, {} by predation, {} pellets eaten",
            converted.len(),
            kills,
            meals
        ),
    ));
    results.push(TestResult::new(
        "sweep_clock",
        (engine.elapsed() - 600.0).abs() < 0.5,
        format!("elapsed {:.2}s", engine.elapsed()),
    ));

    let snapshot = engine.snapshot();
    (results, Some(snapshot))
}

// ── 4. Scenarios ────────────────────────────────────────────────────────

fn validate_feeding(config: &TankConfig, verbose: bool) -> Vec<TestResult> {
    println!("--- Feeding ---");
    let mut results = Vec::new();
    let Some(mut engine) = empty_tank(config) else {
        results.push(TestResult::new("feed_setup", false, "tank failed to build"));
        return results;
    };

    let Ok(id) = engine.spawn_fish(FishKind::Midwater, Some(18.0)) else {
        results.push(TestResult::new("feed_setup", false, "spawn rejected"));
        return results;
    };
    if let Some(entity) = engine.find_fish(id) {
        if let Ok(mut appetite) = engine.world.get::<&mut Appetite>(entity) {
            appetite.hunger = 0.9;
        }
    }
    let x = engine.fish(id).map(|f| f.position.x).unwrap_or(480.0);
    if let Err(e) = engine.feed_at(x) {
        results.push(TestResult::new("feed_setup", false, format!("feed rejected: {}", e)));
        return results;
    }

    let mut eaten_after = None;
    let mut drop = 0.0;
    for tick in 0..1200 {
        let before = engine.fish(id).map(|f| f.hunger).unwrap_or(0.0);
        if engine.advance(0.05).feeding.pellets_eaten > 0 {
            drop = before - engine.fish(id).map(|f| f.hunger).unwrap_or(0.0);
            eaten_after = Some(tick as f32 * 0.05);
            break;
        }
    }

    results.push(TestResult::new(
        "feed_pellet_eaten",
        eaten_after.is_some() && engine.pellet_count() == 0,
        match eaten_after {
            Some(t) => format!("pellet eaten after {:.1}s", t),
            None => "fish never reached the pellet".into(),
        },
    ));
    let satiety = config.feeding.pellet_satiety;
    results.push(TestResult::new(
        "feed_hunger_drop",
        (drop - satiety).abs() < 0.02,
        format!("hunger fell by {:.3} (meal worth {:.2})", drop, satiety),
    ));

    if verbose {
        println!("  {}", engine.status());
    }
    results
}

fn validate_old_age(config: &TankConfig, verbose: bool) -> Vec<TestResult> {
    println!("--- Old age ---");
    let mut results = Vec::new();
    let Some(mut engine) = empty_tank(config) else {
        results.push(TestResult::new("old_age_setup", false, "tank failed to build"));
        return results;
    };
    let Ok(id) = engine.spawn_fish(FishKind::BottomFeeder, None) else {
        results.push(TestResult::new("old_age_setup", false, "spawn rejected"));
        return results;
    };
    if let Some(entity) = engine.find_fish(id) {
        if let Ok(mut life) = engine.world.get::<&mut Life>(entity) {
            life.age = life.lifespan - 0.01;
        }
    }

    let report = engine.advance(0.1);
    results.push(TestResult::new(
        "old_age_death",
        report.old_age_deaths == vec![id] && engine.fish(id).is_none(),
        format!("{} died this tick: {:?}", id, report.old_age_deaths),
    ));
    results.push(TestResult::new(
        "old_age_one_corpse",
        engine.corpse_count() == 1 && report.corpses_created == vec![id],
        format!("{} corpse(s) after death", engine.corpse_count()),
    ));

    run(&mut engine, 30.0, 0.1);
    let settled = engine.snapshot().corpses.first().map(|c| c.settled);
    results.push(TestResult::new(
        "old_age_corpse_settles",
        settled == Some(true),
        format!("corpse settled: {:?}", settled),
    ));

    if verbose {
        println!("  {}", engine.status());
    }
    results
}

fn validate_water_quality(config: &TankConfig, verbose: bool) -> Vec<TestResult> {
    println!("--- Water quality ---");
    let mut results = Vec::new();
    let Some(mut engine) = empty_tank(config) else {
        results.push(TestResult::new("water_setup", false, "tank failed to build"));
        return results;
    };
    if engine.environment().filter_on {
        engine.toggle_filter();
    }

    let mut monotone = true;
    let mut last = engine.environment().dirt;
    for _ in 0..5000 {
        engine.advance(0.1);
        let dirt = engine.environment().dirt;
        monotone &= dirt >= last;
        last = dirt;
    }
    results.push(TestResult::new(
        "water_unfiltered_dirt_rises",
        monotone && last >= 100.0,
        format!("dirt reached {:.1} without the filter", last),
    ));

    engine.toggle_filter();
    run(&mut engine, 30.0, 0.1);
    results.push(TestResult::new(
        "water_filter_cleans",
        engine.environment().dirt < last,
        format!("dirt {:.1} after 30s of filtering", engine.environment().dirt),
    ));

    if verbose {
        println!("  {}", engine.status());
    }
    results
}

// ── 5. Input ────────────────────────────────────────────────────────────

fn validate_input(config: &TankConfig, verbose: bool) -> Vec<TestResult> {
    println!("--- Host input ---");
    let mut results = Vec::new();
    let Ok(mut engine) = AquariumEngine::new(config.clone()) else {
        results.push(TestResult::new("input_setup", false, "tank failed to build"));
        return results;
    };
    let bounds = config.bounds();
    let fish_before = engine.fish_count();

    engine.submit(Command::Spawn {
        kind: FishKind::Midwater,
        size: Some(-4.0),
    });
    engine.submit(Command::FeedAt {
        x: bounds.right() + 100.0,
    });
    engine.submit(Command::Click {
        at: Vec2::new(bounds.left() - 10.0, bounds.top() - 10.0),
        secondary: false,
    });
    engine.advance(0.01);
    results.push(TestResult::new(
        "input_rejects_bad_commands",
        engine.fish_count() == fish_before && engine.pellet_count() == 0,
        "negative spawn and out-of-tank clicks change nothing",
    ));

    engine.submit(Command::Click {
        at: Vec2::new(bounds.center().x, config.water_top() - 5.0),
        secondary: false,
    });
    engine.advance(0.01);
    results.push(TestResult::new(
        "input_click_feeds",
        engine.pellet_count() == 1,
        format!("{} pellet(s) after a click in the air band", engine.pellet_count()),
    ));

    engine.submit(Command::Click {
        at: bounds.center(),
        secondary: false,
    });
    engine.advance(0.01);
    let scared = engine.snapshot().fish.iter().filter(|f| f.scared).count();
    results.push(TestResult::new(
        "input_click_scares",
        scared == engine.fish_count(),
        format!("{}/{} fish scared by a click in the water", scared, engine.fish_count()),
    ));

    if verbose {
        println!("  {}", engine.status());
    }
    results
}

// ── 6. Replay and persistence ───────────────────────────────────────────

fn scripted(config: &TankConfig, engine: &mut AquariumEngine, ticks: u32) {
    let bounds = config.bounds();
    for tick in 0..ticks {
        if tick % 240 == 0 {
            engine.submit(Command::FeedAt {
                x: bounds.left() + (tick % 880) as f32 + 20.0,
            });
        }
        if tick % 500 == 250 {
            engine.submit(Command::PointerMoved {
                at: Some(bounds.center()),
            });
        }
        engine.advance(1.0 / 30.0);
    }
}

fn validate_replay(config: &TankConfig, verbose: bool) -> Vec<TestResult> {
    println!("--- Replay & persistence ---");
    let mut results = Vec::new();

    let (Ok(mut a), Ok(mut b)) = (
        AquariumEngine::new(config.clone()),
        AquariumEngine::new(config.clone()),
    ) else {
        results.push(TestResult::new("replay_setup", false, "tank failed to build"));
        return results;
    };
    scripted(config, &mut a, 1500);
    scripted(config, &mut b, 1500);
    results.push(TestResult::new(
        "replay_deterministic",
        a.snapshot() == b.snapshot(),
        "same seed and inputs give the same tank",
    ));

    a.toggle_pause();
    let frozen = a.snapshot();
    for _ in 0..50 {
        a.advance(0.1);
    }
    results.push(TestResult::new(
        "replay_pause_idempotent",
        a.snapshot() == frozen,
        "50 paused advances change nothing",
    ));
    a.toggle_pause();

    let mut buffer = Vec::new();
    let restored = a
        .save(&mut buffer)
        .and_then(|_| AquariumEngine::load(&buffer[..]));
    match restored {
        Ok(mut loaded) => {
            scripted(config, &mut a, 600);
            scripted(config, &mut loaded, 600);
            results.push(TestResult::new(
                "persist_continues_identically",
                a.snapshot() == loaded.snapshot(),
                format!("{} byte save resumes in lockstep", buffer.len()),
            ));
        }
        Err(e) => results.push(TestResult::new("persist_roundtrip", false, e.to_string())),
    }

    if verbose {
        println!("  {}", a.status());
    }
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feeding_scenario_passes_on_default_tank() {
        let results = validate_feeding(&TankConfig::default(), false);
        assert!(!results.is_empty());
        assert!(results.iter().all(|r| r.name != "feed_setup"));
        assert!(results.iter().all(|r| r.passed), "{:?}", results.iter().map(|r| &r.detail).collect::<Vec<_>>());
    }
}
