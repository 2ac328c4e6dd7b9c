mod tests {
    use myrtio_vfx_engine::scene::MAX_TARGET_GROUPS;
    use myrtio_vfx_engine::zone::{MAX_ZONES, NAME_LEN, name};
    use myrtio_vfx_engine::{
        Duration, EffectId, SceneConfig, SceneStore, SceneTable, Tier, Zone, ZoneError,
        ZoneModel, ZoneTable,
    };

    #[test]
    fn test_zone_table_keeps_id_order() {
        let mut table = ZoneTable::new();
        table.add(Zone::single(3, 7, "Hull")).unwrap();
        table.add(Zone::single(1, 5, "Weapons")).unwrap();
        table.add(Zone::pixels(2, 6, 12, "Hull")).unwrap();

        let ids: Vec<_> = table.all_zones().iter().map(|zone| zone.id).collect();
        assert_eq!(ids, [1, 2, 3]);
        assert_eq!(table.zone(2).map(|zone| zone.pixel_count), Some(12));
    }

    #[test]
    fn test_zone_table_rejects_shared_output() {
        let mut table = ZoneTable::new();
        table.add(Zone::single(1, 5, "Weapons")).unwrap();

        assert_eq!(
            table.add(Zone::single(2, 5, "Hull")),
            Err(ZoneError::OutputInUse { output: 5, owner: 1 })
        );
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_zone_table_replaces_same_id() {
        let mut table = ZoneTable::new();
        table.add(Zone::single(1, 5, "Weapons")).unwrap();
        table
            .add(Zone::single(1, 5, "Weapons").with_max_brightness(90))
            .unwrap();

        assert_eq!(table.len(), 1);
        assert_eq!(table.zone(1).map(|zone| zone.max_brightness), Some(90));
    }

    #[test]
    fn test_zone_table_full() {
        let mut table = ZoneTable::new();
        for id in 0..MAX_ZONES as u8 {
            table.add(Zone::single(id, id, "Hull")).unwrap();
        }
        assert_eq!(table.add(Zone::single(200, 200, "Hull")), Err(ZoneError::Full));
    }

    #[test]
    fn test_groups_are_derived_from_zones() {
        let mut table = ZoneTable::new();
        table.add(Zone::single(1, 5, "Weapons")).unwrap();
        table.add(Zone::single(2, 6, "Hull")).unwrap();
        table.add(Zone::single(3, 7, "Weapons")).unwrap();

        assert_eq!(table.group_members("Weapons").as_slice(), &[1, 3]);
        assert_eq!(table.group_names().as_slice(), &["Weapons", "Hull"]);
        assert_eq!(table.zones_in_group("Hull").count(), 1);

        table.remove(2);
        assert!(table.group_members("Hull").is_empty());
    }

    #[test]
    fn test_long_names_are_truncated() {
        let long = "A".repeat(NAME_LEN + 6);
        assert_eq!(name(&long).len(), NAME_LEN);
    }

    #[test]
    fn test_scene_config_defaults_to_effect_tier() {
        let scene = SceneConfig::new("Hit", EffectId::Damage)
            .with_target_group("Hull")
            .with_target_group("Hull")
            .with_duration(Duration::from_millis(1000))
            .with_audio(4);

        assert_eq!(scene.tier, Tier::Global);
        assert_eq!(scene.target_groups.len(), 1);
        assert_eq!(scene.audio_file, Some(4));
        assert!(!scene.is_infinite());
        assert!(!scene.is_ambient());
        assert!(!SceneConfig::new("Idle", EffectId::Candle).with_audio(0).has_audio());
    }

    #[test]
    fn test_scene_config_caps_target_groups() {
        let mut scene = SceneConfig::new("Everything", EffectId::Victory);
        for group in ["A", "B", "C", "D", "E", "F"] {
            scene = scene.with_target_group(group);
        }
        assert_eq!(scene.target_groups.len(), MAX_TARGET_GROUPS);
    }

    #[test]
    fn test_scene_table_upsert_and_lookup() {
        let mut table = SceneTable::new();
        table
            .add(SceneConfig::new("MachineGun", EffectId::WeaponFire))
            .unwrap();
        table
            .add(SceneConfig::new("MachineGun", EffectId::WeaponFire).with_audio(3))
            .unwrap();

        assert_eq!(table.len(), 1);
        assert_eq!(table.scene("MachineGun").and_then(|scene| scene.audio_file), Some(3));
        assert!(table.scene("Unknown").is_none());
        assert!(table.remove("MachineGun").is_some());
        assert!(table.is_empty());
    }
}
