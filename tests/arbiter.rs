mod tests {
    use myrtio_vfx_engine::effect::EFFECT_COUNT;
    use myrtio_vfx_engine::{
        ArbiterEdge, Duration, EffectId, EffectSlot, OutputSink, PriorityArbiter, Timestamp, Zone,
    };

    struct Rig {
        zones: [Zone; 1],
        effects: [EffectSlot; EFFECT_COUNT],
        outputs: OutputSink,
        arbiter: PriorityArbiter,
    }

    impl Rig {
        fn new() -> Self {
            let zones = [Zone::single(1, 5, "Hull")];
            let mut outputs = OutputSink::new();
            outputs.sync(&zones);
            Self {
                zones,
                effects: EffectId::ALL.map(|id| id.to_slot(3)),
                outputs,
                arbiter: PriorityArbiter::new(),
            }
        }

        fn start(&mut self, id: EffectId) {
            self.effects[id.index()].trigger(
                &[],
                Duration::from_millis(0),
                Timestamp::from_millis(0),
                &self.zones,
                &mut self.outputs,
            );
        }

        fn stop(&mut self, id: EffectId) {
            self.effects[id.index()].stop(&mut self.outputs);
        }

        fn enabled(&self, id: EffectId) -> bool {
            self.effects[id.index()].is_enabled()
        }

        fn resolve(&mut self) -> Option<ArbiterEdge> {
            self.arbiter.resolve(&mut self.effects, &mut self.outputs)
        }
    }

    #[test]
    fn test_global_suspends_and_restores_lower_tiers() {
        let mut rig = Rig::new();
        rig.start(EffectId::Candle);
        assert_eq!(rig.resolve(), None);

        rig.start(EffectId::Damage);
        assert_eq!(rig.resolve(), Some(ArbiterEdge::Acquired(EffectId::Damage)));
        assert!(!rig.enabled(EffectId::Candle));
        assert!(!rig.enabled(EffectId::EngineIdle));
        assert!(rig.arbiter.is_suppressed(EffectId::Candle.index()));
        assert_eq!(rig.arbiter.current(), Some(EffectId::Damage.index()));

        // Steady state: no new edge.
        assert_eq!(rig.resolve(), None);

        rig.stop(EffectId::Damage);
        assert_eq!(rig.resolve(), Some(ArbiterEdge::Released(EffectId::Damage)));
        assert!(rig.enabled(EffectId::Candle));
        // Effects that were off before the takeover stay off.
        assert!(!rig.enabled(EffectId::EngineIdle));
        assert_eq!(rig.arbiter.current(), None);
    }

    #[test]
    fn test_late_enable_is_suppressed_then_resumed() {
        let mut rig = Rig::new();
        rig.start(EffectId::Damage);
        rig.resolve();

        rig.start(EffectId::WeaponFire);
        assert_eq!(rig.resolve(), None);
        assert!(!rig.enabled(EffectId::WeaponFire));

        rig.stop(EffectId::Damage);
        rig.resolve();
        assert!(rig.enabled(EffectId::WeaponFire));
    }

    #[test]
    fn test_first_global_in_catalog_order_wins_and_hands_over() {
        let mut rig = Rig::new();
        rig.start(EffectId::Candle);
        rig.start(EffectId::Destroyed);
        rig.start(EffectId::Damage);

        assert_eq!(rig.resolve(), Some(ArbiterEdge::Acquired(EffectId::Damage)));

        rig.stop(EffectId::Damage);
        assert_eq!(
            rig.resolve(),
            Some(ArbiterEdge::Handoff {
                from: EffectId::Damage,
                to: EffectId::Destroyed,
            })
        );
        assert!(!rig.enabled(EffectId::Candle));

        rig.stop(EffectId::Destroyed);
        assert_eq!(rig.resolve(), Some(ArbiterEdge::Released(EffectId::Destroyed)));
        assert!(rig.enabled(EffectId::Candle));
    }

    #[test]
    fn test_forget_keeps_effect_off_after_release() {
        let mut rig = Rig::new();
        rig.start(EffectId::Candle);
        rig.start(EffectId::Damage);
        rig.resolve();

        rig.arbiter.forget(EffectId::Candle.index());
        rig.stop(EffectId::Damage);
        rig.resolve();

        assert!(!rig.enabled(EffectId::Candle));
    }

    #[test]
    fn test_release_restores_immediately() {
        let mut rig = Rig::new();
        rig.start(EffectId::Candle);
        rig.start(EffectId::Damage);
        rig.resolve();

        rig.stop(EffectId::Damage);
        rig.arbiter.release(&mut rig.effects, &mut rig.outputs);
        assert!(rig.enabled(EffectId::Candle));
        assert_eq!(rig.arbiter.current(), None);
        assert_eq!(rig.resolve(), None);
    }

    #[test]
    fn test_clear_drops_snapshot() {
        let mut rig = Rig::new();
        rig.start(EffectId::Candle);
        rig.start(EffectId::Damage);
        rig.resolve();

        rig.arbiter.clear();
        assert_eq!(rig.arbiter.current(), None);
        assert!(!rig.arbiter.is_suppressed(EffectId::Candle.index()));
    }
}
