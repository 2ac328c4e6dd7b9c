mod tests {
    use myrtio_vfx_engine::{EffectId, Tier};

    #[test]
    fn test_effect_id_parse_candle() {
        assert_eq!(
            EffectId::parse_from_str("CandleFlicker"),
            Some(EffectId::Candle)
        );
        assert_eq!(EffectId::parse_from_str("candleflicker"), None);
    }

    #[test]
    fn test_effect_id_from_raw_destroyed() {
        // Destroyed is last in the catalog; current ID is 8.
        assert_eq!(EffectId::from_raw(8), Some(EffectId::Destroyed));
        assert_eq!(EffectId::from_raw(9), None);
    }

    #[test]
    fn test_effect_id_as_str_rocket_launcher() {
        assert_eq!(EffectId::RocketLauncher.as_str(), "RocketLauncher");
    }

    #[test]
    fn test_effect_id_catalog_order() {
        for (index, id) in EffectId::ALL.into_iter().enumerate() {
            assert_eq!(id.index(), index);
            assert_eq!(EffectId::from_index(index), Some(id));
            assert_eq!(EffectId::parse_from_str(id.as_str()), Some(id));
            assert_eq!(id.to_slot(0).id(), id);
        }
        assert_eq!(EffectId::from_index(9), None);
    }

    #[test]
    fn test_effect_id_tiers() {
        let tiers = EffectId::ALL.map(EffectId::tier);
        assert_eq!(
            tiers,
            [
                Tier::Ambient,
                Tier::Ambient,
                Tier::Active,
                Tier::Active,
                Tier::Active,
                Tier::Active,
                Tier::Active,
                Tier::Global,
                Tier::Global,
            ]
        );
        assert!(Tier::Global > Tier::Active && Tier::Active > Tier::Ambient);
    }
}
