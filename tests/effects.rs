mod common;

mod tests {
    use myrtio_vfx_engine::effect::phase::{self, Follower, Segment};
    use myrtio_vfx_engine::effect::{BURST_MS, FirePattern, Noise, flash_brightness, victory_shade};
    use myrtio_vfx_engine::{Duration, EffectId, EffectSlot, OutputSink, Timestamp, Zone};

    use crate::common::Recorder;

    fn ms(millis: u32) -> Timestamp {
        Timestamp::from_millis(millis)
    }

    struct Stage {
        zones: Vec<Zone>,
        outputs: OutputSink,
        driver: Recorder,
    }

    impl Stage {
        fn new(zones: Vec<Zone>) -> Self {
            let mut outputs = OutputSink::new();
            outputs.sync(&zones);
            Self {
                zones,
                outputs,
                driver: Recorder::default(),
            }
        }

        fn trigger(&mut self, slot: &mut EffectSlot, targets: &[u8], duration: u64, now: u32) {
            slot.trigger(
                targets,
                Duration::from_millis(duration),
                ms(now),
                &self.zones,
                &mut self.outputs,
            );
        }

        fn tick(&mut self, slot: &mut EffectSlot, now: u32) {
            self.outputs.sync(&self.zones);
            slot.update(ms(now), &self.zones, &mut self.outputs);
            self.outputs.flush(&mut self.driver);
        }
    }

    #[test]
    fn test_flash_brightness_patterns() {
        assert_eq!(flash_brightness(FirePattern::Full, 0), 255);
        assert_eq!(flash_brightness(FirePattern::Full, 24), 255);
        assert_eq!(flash_brightness(FirePattern::Full, 25), 0);
        assert_eq!(flash_brightness(FirePattern::Full, 50), 255);
        assert_eq!(flash_brightness(FirePattern::Full, 374), 255);
        assert_eq!(flash_brightness(FirePattern::Full, 375), 0);
        assert_eq!(flash_brightness(FirePattern::Full, BURST_MS), 0);

        assert_eq!(flash_brightness(FirePattern::Dimmed, 10), 204);
        assert_eq!(flash_brightness(FirePattern::Alternating, 0), 153);
        assert_eq!(flash_brightness(FirePattern::Alternating, 50), 255);
        assert_eq!(flash_brightness(FirePattern::Diminishing, 0), 255);
        assert_eq!(flash_brightness(FirePattern::Diminishing, 50), 235);
        assert_eq!(flash_brightness(FirePattern::Diminishing, 350), 115);
    }

    #[test]
    fn test_weapon_fire_stops_itself_at_400ms() {
        let mut stage = Stage::new(vec![Zone::single(1, 5, "Weapons")]);
        let mut slot = EffectId::WeaponFire.to_slot(1);
        stage.trigger(&mut slot, &[], 1500, 0);

        stage.tick(&mut slot, 0);
        assert!(stage.outputs.brightness(1) > 0);

        stage.tick(&mut slot, 399);
        assert!(slot.is_enabled());

        stage.tick(&mut slot, 400);
        assert!(!slot.is_enabled());
        assert_eq!(stage.outputs.brightness(1), 0);
    }

    #[test]
    fn test_phase_sample_boundaries() {
        let segments = [
            Segment::ramp(1500, 80, 255),
            Segment::hold(1000, 255),
            Segment::ramp(1500, 255, 80),
        ];
        assert_eq!(phase::total(&segments), 4000);

        let start = phase::sample(&segments, 0).unwrap();
        assert_eq!((start.phase, start.level, start.into), (0, 80, 0));

        let hold = phase::sample(&segments, 1500).unwrap();
        assert_eq!((hold.phase, hold.level, hold.into), (1, 255, 0));

        assert_eq!(phase::sample(&segments, 2499).unwrap().phase, 1);
        assert_eq!(phase::sample(&segments, 2500).unwrap().phase, 2);
        assert_eq!(phase::sample(&segments, 3999).unwrap().level, 81);
        assert!(phase::sample(&segments, 4000).is_none());
        assert!(phase::sample(&[], 0).is_none());
    }

    #[test]
    fn test_follower_is_rate_limited() {
        let mut follower = Follower::new(80);
        assert_eq!(follower.step(ms(0), 50, 255, 8), Some(88));
        assert_eq!(follower.step(ms(10), 50, 255, 8), None);
        assert_eq!(follower.step(ms(50), 50, 255, 8), Some(96));
        assert_eq!(follower.level(), 96);
    }

    #[test]
    fn test_victory_phases() {
        let level = |elapsed| victory_shade(elapsed).map(|shade| shade.intensity);
        assert_eq!(level(0), Some(255));
        assert_eq!(level(80), Some(230));
        assert_eq!(level(400), Some(255));
        assert_eq!(level(2400), Some(130));
        assert_eq!(level(3000), Some(170));
        assert_eq!(level(4500), Some(200));
        assert_eq!(level(4750), Some(100));
        assert_eq!(level(5000), None);
    }

    #[test]
    fn test_victory_writes_final_dark_frame_and_holds() {
        let mut stage = Stage::new(vec![Zone::single(1, 5, "Hull")]);
        let mut slot = EffectId::Victory.to_slot(1);
        stage.trigger(&mut slot, &[], 0, 0);

        stage.tick(&mut slot, 4750);
        assert_eq!(stage.outputs.brightness(1), 100);
        stage.tick(&mut slot, 5000);
        assert_eq!(stage.outputs.brightness(1), 0);

        let writes = stage.driver.writes.len();
        stage.tick(&mut slot, 5100);
        assert!(slot.is_enabled());
        assert_eq!(stage.driver.writes.len(), writes);
    }

    #[test]
    fn test_engine_rev_ramps_at_most_eight_per_step() {
        let mut stage = Stage::new(vec![Zone::single(1, 5, "Engine")]);
        let mut slot = EffectId::EngineRev.to_slot(1);
        stage.trigger(&mut slot, &[], 0, 0);

        let mut previous = 80;
        for step in 0..30 {
            stage.tick(&mut slot, step * 50);
            let level = stage.outputs.brightness(1);
            assert!(level >= previous && level - previous <= 8);
            previous = level;
        }
        // The ramp is slower than the rate limit, so the level tracks it.
        assert_eq!(previous, 249);
    }

    #[test]
    fn test_flamethrower_burns_between_180_and_255() {
        let mut stage = Stage::new(vec![Zone::single(1, 5, "Weapons")]);
        let mut slot = EffectId::Flamethrower.to_slot(9);
        stage.trigger(&mut slot, &[], 0, 0);

        for step in 0..=110 {
            stage.tick(&mut slot, step * 30);
            let level = stage.outputs.brightness(1);
            if (600..2750).contains(&(step * 30)) {
                assert!(level >= 180, "level {level} at {}", step * 30);
            }
        }

        stage.tick(&mut slot, 3500);
        assert_eq!(stage.outputs.brightness(1), 0);
    }

    #[test]
    fn test_rocket_launcher_flashes_then_goes_dark() {
        let mut stage = Stage::new(vec![Zone::pixels(1, 5, 8, "Weapons")]);
        let mut slot = EffectId::RocketLauncher.to_slot(1);
        stage.trigger(&mut slot, &[], 0, 0);

        for step in 0..=16 {
            stage.tick(&mut slot, step * 25);
        }
        // 400 ms: inside the launch flash
        assert_eq!(stage.outputs.brightness(1), 255);
        assert_eq!(stage.outputs.color(1).b, 255);

        stage.tick(&mut slot, 2000);
        assert_eq!(stage.outputs.brightness(1), 0);
    }

    #[test]
    fn test_destroyed_staggers_zone_start() {
        let mut stage = Stage::new(vec![
            Zone::single(1, 5, "Hull"),
            Zone::single(2, 6, "Hull"),
        ]);
        let mut slot = EffectId::Destroyed.to_slot(1);
        stage.trigger(&mut slot, &[1, 2], 0, 0);

        stage.tick(&mut slot, 20);
        assert_eq!(stage.outputs.brightness(1), 251);
        assert_eq!(stage.outputs.brightness(2), 0);

        stage.tick(&mut slot, 50);
        assert_eq!(stage.outputs.brightness(2), 255);
    }

    #[test]
    fn test_destroyed_ends_dark_and_stays_enabled() {
        let mut stage = Stage::new(vec![Zone::single(1, 5, "Hull")]);
        let mut slot = EffectId::Destroyed.to_slot(1);
        stage.trigger(&mut slot, &[], 0, 0);

        stage.tick(&mut slot, 7500);
        assert_eq!(stage.outputs.brightness(1), 25);
        stage.tick(&mut slot, 8000);
        assert_eq!(stage.outputs.brightness(1), 0);
        assert!(slot.is_enabled());
    }

    #[test]
    fn test_destroyed_replays_after_retrigger() {
        let mut stage = Stage::new(vec![Zone::single(1, 5, "Hull")]);
        let mut slot = EffectId::Destroyed.to_slot(1);
        stage.trigger(&mut slot, &[], 0, 0);
        stage.tick(&mut slot, 8000);
        assert_eq!(stage.outputs.brightness(1), 0);

        stage.trigger(&mut slot, &[], 0, 9000);
        stage.tick(&mut slot, 9000);
        assert_eq!(stage.outputs.brightness(1), 255);
    }

    #[test]
    fn test_victory_replays_after_retrigger() {
        let mut stage = Stage::new(vec![Zone::single(1, 5, "Hull")]);
        let mut slot = EffectId::Victory.to_slot(1);
        stage.trigger(&mut slot, &[], 0, 0);
        stage.tick(&mut slot, 5000);
        assert_eq!(stage.outputs.brightness(1), 0);

        stage.trigger(&mut slot, &[], 0, 6000);
        stage.tick(&mut slot, 6080);
        assert_eq!(stage.outputs.brightness(1), 230);
    }

    #[test]
    fn test_candle_stays_in_range_and_follows_zone_set() {
        let mut stage = Stage::new(vec![
            Zone::single(1, 5, "Hull"),
            Zone::pixels(2, 6, 4, "Hull"),
        ]);
        let mut slot = EffectId::Candle.to_slot(5);
        stage.trigger(&mut slot, &[], 0, 0);
        assert_eq!(slot.zone_count(), 2);

        for step in 1..=200 {
            stage.tick(&mut slot, step * 20);
            let level = stage.outputs.brightness(1);
            assert!((40..=255).contains(&level));
        }

        stage.zones.pop();
        stage.tick(&mut slot, 4020);
        assert_eq!(slot.zone_count(), 1);
    }

    #[test]
    fn test_disabled_zone_is_left_alone() {
        let mut stage = Stage::new(vec![Zone::single(1, 5, "Hull").disabled()]);
        let mut slot = EffectId::Victory.to_slot(1);
        stage.trigger(&mut slot, &[], 0, 0);
        stage.tick(&mut slot, 10);
        assert!(stage.driver.writes.is_empty());
    }

    #[test]
    fn test_noise_is_reproducible_and_bounded() {
        let mut a = Noise::new(42);
        let mut b = Noise::new(42);
        for _ in 0..1000 {
            let value = a.range(-100, 100);
            assert_eq!(value, b.range(-100, 100));
            assert!((-100..100).contains(&value));
        }
        assert_eq!(a.range(5, 5), 5);
        assert!(!a.chance(0));
        assert!(a.chance(100));
    }
}
