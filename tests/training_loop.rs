mod common;

use common::{small_config, temp_dir, ScriptedEnv, Step};
use evodrive_core::{
    EnvEvent, EpisodeEnd, EvolutionError, MemoryArchive, TickOutcome, Trainer, TrainerState,
};
use evodrive_io::{read_history, GenerationLogger, WeightStore};
use evodrive_lib::app;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::cell::RefCell;
use std::rc::Rc;

fn trainer(population_size: usize) -> Trainer<ChaCha8Rng> {
    Trainer::new(&small_config(population_size), ChaCha8Rng::seed_from_u64(3)).unwrap()
}

/// Ticks until the current trial ends.
fn run_trial(trainer: &mut Trainer<ChaCha8Rng>, env: &mut ScriptedEnv, dt: f64) -> TickOutcome {
    for _ in 0..1000 {
        let outcome = trainer.tick(dt, env).unwrap();
        if outcome != TickOutcome::Running {
            return outcome;
        }
    }
    panic!("trial did not end");
}

fn report_of(outcome: &TickOutcome) -> &evodrive_core::EpisodeReport {
    match outcome {
        TickOutcome::EpisodeEnded(report) | TickOutcome::GenerationAdvanced(report, _) => report,
        TickOutcome::Running => panic!("no report while running"),
    }
}

#[test]
fn test_quiet_trial_times_out_with_penalty() {
    let mut env = ScriptedEnv::new(2);
    let mut trainer = trainer(4);
    trainer.start(&mut env).unwrap();

    let outcome = run_trial(&mut trainer, &mut env, 0.1);
    let report = report_of(&outcome);
    assert_eq!(report.cause, EpisodeEnd::Timeout);
    assert_eq!(report.fitness, -5.0);
    assert!(report.elapsed >= 3.0 && report.elapsed < 3.2);
    assert_eq!(report.index, 0);
    assert_eq!(trainer.population().genomes[0].fitness, -5.0);
    assert_eq!(trainer.current_index(), 1);
    assert_eq!(trainer.elapsed(), 0.0);
}

#[test]
fn test_boundary_ends_trial_early() {
    let mut env = ScriptedEnv::new(2)
        .quiet_for(4)
        .then(Step::Events(vec![EnvEvent::BoundaryViolation]));
    let mut trainer = trainer(4);
    trainer.start(&mut env).unwrap();

    let outcome = run_trial(&mut trainer, &mut env, 0.1);
    let report = report_of(&outcome);
    assert_eq!(report.cause, EpisodeEnd::Boundary);
    assert_eq!(report.fitness, -5.0);
    assert!((report.elapsed - 0.5).abs() < 1e-9);
    assert_eq!(env.actions.len(), 5);
}

#[test]
fn test_milestone_reward_then_timeout() {
    let mut env = ScriptedEnv::new(2).then(Step::Events(vec![EnvEvent::MilestoneReached]));
    let mut trainer = trainer(4);
    trainer.start(&mut env).unwrap();

    assert_eq!(trainer.tick(0.1, &mut env).unwrap(), TickOutcome::Running);
    assert_eq!(trainer.fitness(), 4.0);

    let outcome = run_trial(&mut trainer, &mut env, 0.1);
    assert_eq!(report_of(&outcome).fitness, -1.0);
}

#[test]
fn test_environment_failure_aborts_only_the_trial() {
    let mut env = ScriptedEnv::new(2)
        .then(Step::Events(vec![EnvEvent::MilestoneReached]))
        .then(Step::Fail);
    let mut trainer = trainer(4);
    trainer.start(&mut env).unwrap();

    let outcome = run_trial(&mut trainer, &mut env, 0.1);
    let report = report_of(&outcome);
    assert_eq!(report.cause, EpisodeEnd::Aborted);
    assert_eq!(report.fitness, 4.0);
    assert_eq!(trainer.state(), TrainerState::Evaluating);
    assert_eq!(trainer.current_index(), 1);
}

#[test]
fn test_any_collaborator_error_aborts_only_the_trial() {
    let mut env = ScriptedEnv::new(2).quiet_for(1).then(Step::Reject);
    let mut trainer = trainer(4);
    trainer.start(&mut env).unwrap();

    assert_eq!(trainer.tick(0.1, &mut env).unwrap(), TickOutcome::Running);
    let outcome = trainer.tick(0.1, &mut env).unwrap();
    let report = report_of(&outcome);
    assert_eq!(report.cause, EpisodeEnd::Aborted);
    assert_eq!(report.fitness, 0.0);
    assert_eq!(trainer.state(), TrainerState::Evaluating);
    assert_eq!(trainer.current_index(), 1);
    assert_eq!(trainer.elapsed(), 0.0);
}

#[test]
fn test_forced_end_carries_no_penalty() {
    let mut env = ScriptedEnv::new(2);
    let mut trainer = trainer(4);
    trainer.start(&mut env).unwrap();
    trainer.tick(0.1, &mut env).unwrap();

    let outcome = trainer.force_end_episode(&mut env).unwrap();
    assert_eq!(report_of(&outcome).cause, EpisodeEnd::Forced);
    assert_eq!(report_of(&outcome).fitness, 0.0);
}

#[test]
fn test_input_size_mismatch_aborts_trial() {
    let mut env = ScriptedEnv::new(3);
    let mut trainer = trainer(4);
    trainer.start(&mut env).unwrap();

    let outcome = trainer.tick(0.1, &mut env).unwrap();
    assert_eq!(report_of(&outcome).cause, EpisodeEnd::Aborted);
    assert!(env.actions.is_empty());
}

#[test]
fn test_generation_rollover_archives_best_genome() {
    let dir = temp_dir("rollover");
    let store = WeightStore::new(&dir, "best_generation_").unwrap();
    let history = GenerationLogger::new_at(dir.join("history.jsonl")).unwrap();
    let memory = Rc::new(RefCell::new(MemoryArchive::default()));

    let mut env = ScriptedEnv::new(2)
        .then(Step::Events(vec![EnvEvent::MilestoneReached]))
        .then(Step::Events(vec![EnvEvent::BoundaryViolation]))
        .then(Step::Events(vec![EnvEvent::BoundaryViolation]));
    let mut trainer = trainer(2)
        .with_archive(store.clone())
        .with_archive(history)
        .with_archive(Rc::clone(&memory));
    trainer.start(&mut env).unwrap();
    let first_genome = trainer.network().export_parameters();

    let first = run_trial(&mut trainer, &mut env, 0.1);
    assert!(matches!(first, TickOutcome::EpisodeEnded(_)));
    let second = run_trial(&mut trainer, &mut env, 0.1);
    let (report, summary) = match second {
        TickOutcome::GenerationAdvanced(report, summary) => (report, summary),
        other => panic!("expected generation change, got {other:?}"),
    };

    assert_eq!(report.index, 1);
    assert_eq!(summary.generation, 0);
    assert_eq!(summary.best_fitness, -1.0);
    assert_eq!(summary.worst_fitness, -5.0);
    assert_eq!(summary.best_index, 0);
    assert_eq!(trainer.generation(), 1);
    assert_eq!(trainer.current_index(), 0);
    assert!(trainer.population().genomes.iter().all(|g| g.fitness == 0.0));
    assert_eq!(trainer.history(), &[summary.clone()]);

    assert_eq!(store.load(0).unwrap(), Some(first_genome.clone()));
    assert_eq!(memory.borrow().best, vec![(0, first_genome)]);
    assert_eq!(memory.borrow().summaries, vec![summary.clone()]);
    let logged = read_history(dir.join("history.jsonl")).unwrap();
    assert_eq!(logged, vec![summary]);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_train_then_replay_latest_generation() {
    let dir = temp_dir("train_replay");
    let mut config = small_config(3);
    config.storage.enabled = true;
    config.storage.directory = dir.to_string_lossy().into_owned();
    config.storage.history_file = Some(dir.join("history.jsonl").to_string_lossy().into_owned());

    let mut env = ScriptedEnv::new(2);
    let run = app::train_in(&config, 2, 0.25, &mut env).unwrap();
    assert_eq!(run.history.len(), 2);
    assert_eq!(run.metrics.generations(), 2);
    assert_eq!(run.metrics.episodes(), 6);
    assert!(run.history.iter().all(|s| s.best_fitness == -5.0));
    assert_eq!(app::history(&config).unwrap(), run.history);

    let replay = app::replay_in(&config, None, 0.25, &mut env).unwrap();
    assert_eq!(replay.generation, 1);
    assert_eq!(replay.cause, EpisodeEnd::Timeout);
    assert_eq!(replay.fitness, -5.0);

    let missing = app::replay_in(&config, Some(9), 0.25, &mut env);
    assert!(missing.is_err());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_unavailable_storage_does_not_stop_training() {
    let dir = temp_dir("blocked_storage");
    std::fs::create_dir_all(&dir).unwrap();
    let blocker = dir.join("file");
    std::fs::write(&blocker, "not a directory").unwrap();

    let mut config = small_config(2);
    config.storage.enabled = true;
    config.storage.directory = blocker.join("weights").to_string_lossy().into_owned();
    config.storage.history_file =
        Some(blocker.join("history.jsonl").to_string_lossy().into_owned());

    let mut env = ScriptedEnv::new(2);
    let run = app::train_in(&config, 1, 0.5, &mut env).unwrap();
    assert_eq!(run.history.len(), 1);
    assert_eq!(run.metrics.generations(), 1);
    assert!(!blocker.join("weights").exists());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_history_requires_configured_file() {
    let config = small_config(2);
    assert!(config.storage.history_file.is_none());
    assert!(app::history(&config).is_err());
}

#[test]
fn test_tick_after_config_error_never_starts() {
    let mut config = small_config(4);
    config.evolution.top_k = 5;
    assert!(matches!(
        Trainer::new(&config, ChaCha8Rng::seed_from_u64(0)),
        Err(EvolutionError::InvalidArgument(_))
    ));
}
