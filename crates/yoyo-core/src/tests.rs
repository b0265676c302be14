#[cfg(test)]
mod tests {
    use crate::enums::*;
    use crate::events::{RejectReason, YoyoEvent};
    use crate::items::*;
    use crate::state::SessionSnapshot;
    use crate::types::{BlockCoord, OwnerId, Position, SimTime, Velocity};

    #[test]
    fn test_collected_stack_merges_same_item() {
        let mut stack = CollectedStack::new();
        stack.push(ItemStack::new("wool", 2));
        stack.push(ItemStack::new("seeds", 1));
        stack.push(ItemStack::new("wool", 3));

        assert_eq!(stack.stacks().len(), 2);
        assert_eq!(stack.stacks()[0], ItemStack::new("wool", 5));
        assert_eq!(stack.total(), 6);
    }

    #[test]
    fn test_collected_stack_splits_instead_of_overflowing() {
        let mut stack = CollectedStack::new();
        stack.push(ItemStack::new("wool", u32::MAX - 1));
        stack.push(ItemStack::new("wool", 3));
        stack.push(ItemStack::new("wool", 4));

        assert_eq!(
            stack.stacks(),
            &[ItemStack::new("wool", u32::MAX), ItemStack::new("wool", 6)]
        );
        assert_eq!(stack.total(), u32::MAX as u64 + 6);
    }

    #[test]
    fn test_collected_stack_ignores_empty_drops() {
        let mut stack = CollectedStack::new();
        stack.push(ItemStack::new("wool", 0));
        assert!(stack.is_empty());
    }

    #[test]
    fn test_collected_stack_drain_empties_buffer() {
        let mut stack = CollectedStack::new();
        stack.push(ItemStack::new("wheat", 4));
        let drained = stack.drain();
        assert_eq!(drained, vec![ItemStack::new("wheat", 4)]);
        assert!(stack.is_empty());
        assert_eq!(stack.total(), 0);
    }

    #[test]
    fn test_damage_bonus_by_creature() {
        let ench = Enchantments {
            sharpness: 3,
            smite: 2,
            bane_of_arthropods: 1,
            ..Default::default()
        };
        // Sharpness III: 1 + 2 * 0.5
        assert_eq!(ench.damage_bonus(CreatureKind::Undefined), 2.0);
        assert_eq!(ench.damage_bonus(CreatureKind::Undead), 7.0);
        assert_eq!(ench.damage_bonus(CreatureKind::Arthropod), 4.5);
        assert_eq!(Enchantments::default().damage_bonus(CreatureKind::Undead), 0.0);
    }

    #[test]
    fn test_item_usability() {
        let mut item = YoyoItem {
            max_damage: 10,
            damage: 10,
            ..Default::default()
        };
        assert!(item.is_usable(), "wear equal to max is still usable");
        item.damage = 11;
        assert!(!item.is_usable());
        item.unbreakable = true;
        assert!(item.is_usable());
    }

    #[test]
    fn test_creative_item_always_collects() {
        let item = YoyoItem::creative();
        assert!(item.collecting_level() > 0);
        assert_eq!(YoyoItem::default().collecting_level(), 0);
    }

    #[test]
    fn test_strategies_follow_modifiers() {
        let plain = YoyoItem::default();
        assert_eq!(plain.entity_interaction(), EntityInteraction::Attack);
        assert_eq!(plain.block_interaction(), BlockInteraction::Ignore);

        let shears = YoyoItem {
            modifiers: vec![YoyoModifier::Shearing, YoyoModifier::Gardening],
            ..Default::default()
        };
        assert_eq!(shears.entity_interaction(), EntityInteraction::Shear);
        assert_eq!(shears.block_interaction(), BlockInteraction::Tend);
        assert!(shears.block_interaction().harvests());
        assert!(shears.block_interaction().gardens());
    }

    #[test]
    fn test_block_of_negative_position_floors() {
        let p = Position::new(-0.5, 64.2, 3.9);
        assert_eq!(p.block(), BlockCoord::new(-1, 64, 3));
        assert_eq!(BlockCoord::new(2, 3, 4).origin(), Position::new(2.0, 3.0, 4.0));
    }

    #[test]
    fn test_distance_and_speed() {
        let a = Position::new(0.0, 0.0, 0.0);
        let b = Position::new(3.0, 4.0, 0.0);
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-12);
        assert!((Velocity::new(0.0, 3.0, 4.0).speed() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_sim_time_since() {
        let mut time = SimTime::default();
        time.advance();
        time.advance();
        assert_eq!(time.since(1), 1);
        assert_eq!(time.since(10), 0);
    }

    #[test]
    fn test_event_is_tagged() {
        let event = YoyoEvent::ThrowRejected {
            owner: OwnerId(7),
            reason: RejectReason::AlreadyActive,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"ThrowRejected\""));
        let back: YoyoEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, back);
    }

    #[test]
    fn test_item_deserializes_with_defaults() {
        let json = r#"{ "stats": { "length": 12.0 }, "max_damage": 100,
                        "modifiers": [{ "type": "Lubricated", "level": 2 }] }"#;
        let item: YoyoItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.stats.length, 12.0);
        assert_eq!(item.stats.weight, 1.0);
        assert_eq!(item.modifiers, vec![YoyoModifier::Lubricated { level: 2 }]);
        assert!(!item.unbreakable);
    }

    #[test]
    fn test_empty_snapshot_serializes() {
        let snapshot = SessionSnapshot::default();
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: SessionSnapshot = serde_json::from_str(&json).unwrap();
        assert!(back.yoyos.is_empty());
        assert_eq!(back.time.tick, 0);
    }
}
