//! Generated drill content over long runs
//!
//! Long sequences must stay natural: recovery only after a lunge, never two
//! recoveries in a row, no weapon-forbidden commands, and the trainee kept
//! near the starting line.

use fencing_drill::core::types::{CommandId, Difficulty, Weapon};
use fencing_drill::position::PositionTracker;
use fencing_drill::sequencer::{
    generate_for_mode, generate_interval_work_commands, generate_random_commands, IntervalConfig,
    ModeConfig, PatternConfig,
};
use fencing_drill::DrillLibrary;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn library() -> DrillLibrary {
    DrillLibrary::standard().unwrap()
}

#[test]
fn test_no_consecutive_remise() {
    let library = library();
    for seed in 0..20 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let commands =
            generate_random_commands(&library, Difficulty::Advanced, 300, Weapon::Foil, &mut rng)
                .unwrap();
        for pair in commands.windows(2) {
            assert!(
                !(pair[0] == CommandId::Remise && pair[1] == CommandId::Remise),
                "seed {}",
                seed
            );
        }
    }
}

#[test]
fn test_recovery_share_stays_low() {
    let library = library();
    let mut rng = ChaCha8Rng::seed_from_u64(99);
    let commands =
        generate_random_commands(&library, Difficulty::Intermediate, 500, Weapon::Foil, &mut rng)
            .unwrap();
    let remise = commands.iter().filter(|c| **c == CommandId::Remise).count();
    assert!(remise * 4 <= commands.len(), "remise {} of {}", remise, commands.len());
}

#[test]
fn test_weapon_specific_exclusions() {
    let library = library();
    let mut rng = ChaCha8Rng::seed_from_u64(7);

    let sabre =
        generate_random_commands(&library, Difficulty::Advanced, 1000, Weapon::Sabre, &mut rng)
            .unwrap();
    assert!(!sabre.contains(&CommandId::Balancez));

    for weapon in [Weapon::Foil, Weapon::Epee] {
        let commands =
            generate_random_commands(&library, Difficulty::Advanced, 1000, weapon, &mut rng)
                .unwrap();
        assert!(!commands.contains(&CommandId::Fleche));
    }
}

#[test]
fn test_generated_drills_keep_position_bounded() {
    let library = library();
    let mut rng = ChaCha8Rng::seed_from_u64(1234);
    let commands =
        generate_random_commands(&library, Difficulty::Advanced, 2000, Weapon::Epee, &mut rng)
            .unwrap();

    let mut tracker = PositionTracker::new();
    let mut worst: f32 = 0.0;
    for cmd in commands {
        tracker.apply_command(&library.catalog, cmd);
        worst = worst.max(tracker.position().abs());
    }
    assert!(worst < 15.0, "drifted to {}", worst);
}

#[test]
fn test_interval_work_phase_uses_intermediate_set() {
    let library = library();
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let commands =
        generate_interval_work_commands(&IntervalConfig::default(), &library, &mut rng).unwrap();

    assert_eq!(commands.len(), 45);
    let intermediate = library.command_sets.for_difficulty(Difficulty::Intermediate);
    assert!(commands.iter().all(|c| intermediate.contains(c)));

    let mut doubles = 0;
    let mut remise = 0;
    let mut total = 0;
    for seed in 0..20 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let commands =
            generate_interval_work_commands(&IntervalConfig::default(), &library, &mut rng)
                .unwrap();
        doubles += commands
            .windows(2)
            .filter(|w| w[0] == CommandId::Remise && w[1] == CommandId::Remise)
            .count();
        remise += commands.iter().filter(|c| **c == CommandId::Remise).count();
        total += commands.len();
    }
    assert_eq!(doubles, 0);
    assert_eq!(total, 900);
    assert!(remise * 4 <= total, "remise {} of {}", remise, total);
}

#[test]
fn test_interval_mode_output_never_repeats_remise() {
    let library = library();
    let config = ModeConfig::Interval(IntervalConfig {
        sets: 10,
        work_seconds: 60,
        tempo_bpm: 90,
        ..IntervalConfig::default()
    });
    for seed in 0..10 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let commands = generate_for_mode(&config, &library, &mut rng).unwrap();
        assert_eq!(commands.len(), 900);
        for pair in commands.windows(2) {
            assert!(
                !(pair[0] == CommandId::Remise && pair[1] == CommandId::Remise),
                "seed {}",
                seed
            );
        }
    }
}

#[test]
fn test_pattern_mode_is_exact() {
    let library = library();
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let config = ModeConfig::Pattern(PatternConfig {
        pattern_id: "C".into(),
        repetitions: 2,
        ..PatternConfig::default()
    });
    let commands = generate_for_mode(&config, &library, &mut rng).unwrap();
    assert_eq!(commands.len(), 12);
    assert_eq!(&commands[..6], &commands[6..]);
}
