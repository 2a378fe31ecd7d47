//! Property tests: whatever a host throws at the tank, the bookkeeping holds.

use std::collections::{HashMap, HashSet};

use aquarium_core::prelude::*;
use proptest::prelude::*;

fn command() -> impl Strategy<Value = Command> {
    prop_oneof![
        (0.0f32..960.0, 0.0f32..620.0)
            .prop_map(|(x, y)| Command::PointerMoved { at: Some(Vec2::new(x, y)) }),
        Just(Command::PointerMoved { at: None }),
        (-100.0f32..1100.0, -100.0f32..700.0, any::<bool>())
            .prop_map(|(x, y, secondary)| Command::Click { at: Vec2::new(x, y), secondary }),
        (-50.0f32..1000.0).prop_map(|x| Command::FeedAt { x }),
        (0.0f32..960.0, 0.0f32..620.0)
            .prop_map(|(x, y)| Command::DisturbAt { at: Vec2::new(x, y) }),
        Just(Command::ToggleFilter),
        Just(Command::ReduceAlgae),
        Just(Command::TogglePause),
        (0usize..3, prop::option::of(-10.0f32..40.0)).prop_map(|(kind, size)| Command::Spawn {
            kind: FishKind::ALL[kind],
            size,
        }),
    ]
}

fn step() -> impl Strategy<Value = (Option<Command>, f32)> {
    (
        prop::option::weighted(0.2, command()),
        prop_oneof![
            8 => 0.001f32..0.12,
            1 => Just(0.0f32),
            1 => Just(-0.5f32),
            1 => Just(2.0f32),
        ],
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn tank_invariants_hold(seed in any::<u64>(), steps in prop::collection::vec(step(), 1..400)) {
        let config = TankConfig { seed, ..TankConfig::default() };
        let mut engine = AquariumEngine::new(config).unwrap();
        let water_top = engine.config().water_top();
        let floor = engine.config().floor_y();
        let bounds = engine.config().bounds();

        let mut sizes: HashMap<FishId, f32> = HashMap::new();
        let mut converted: HashSet<FishId> = HashSet::new();

        for (command, dt) in steps {
            let idle_while_paused = command.is_none() && engine.is_paused();
            let before = idle_while_paused.then(|| engine.snapshot());

            if let Some(command) = command {
                engine.submit(command);
            }
            let report = engine.advance(dt);

            if let Some(before) = before {
                prop_assert_eq!(&engine.snapshot(), &before);
            }

            for id in report.corpses_created {
                prop_assert!(converted.insert(id), "{} converted twice", id);
            }

            let snapshot = engine.snapshot();
            let env = snapshot.environment;
            prop_assert!((0.0..=100.0).contains(&env.dirt));
            prop_assert!((0.0..=100.0).contains(&env.algae));

            for fish in &snapshot.fish {
                prop_assert!(fish.alive);
                prop_assert!(!converted.contains(&fish.id));
                prop_assert!(fish.size <= fish.max_size + 1e-4);
                prop_assert!((0.0..=1.0).contains(&fish.hunger));
                prop_assert!(fish.position.is_finite());
                prop_assert!(fish.position.x >= bounds.left() && fish.position.x <= bounds.right());
                prop_assert!(fish.position.y >= water_top && fish.position.y <= floor);

                let last = sizes.insert(fish.id, fish.size).unwrap_or(0.0);
                prop_assert!(fish.size >= last, "{} shrank", fish.id);
            }

            let mut sources = HashSet::new();
            for corpse in &snapshot.corpses {
                prop_assert!(converted.contains(&corpse.source));
                prop_assert!(sources.insert(corpse.source));
                prop_assert!((0.0..=1.0).contains(&corpse.decay));
                prop_assert!(corpse.position.y <= floor);
            }
            for pellet in snapshot.pellets.iter().chain(&snapshot.poops) {
                prop_assert!(pellet.position.y <= floor);
            }
        }
    }
}
