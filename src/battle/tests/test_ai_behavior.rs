#[cfg(test)]
mod tests {
    use crate::battle::state::{BattleEvent, Side, TurnRng};
    use crate::battle::tests::common::{
        single_controller, team_controller_with_actives, TestCombatantBuilder,
    };
    use pretty_assertions::assert_eq;

    #[test]
    fn ai_switches_defensively_and_still_attacks() {
        // The player's hit drops the active opponent to 6/100, under the
        // 20% threshold, with a full bench behind it.
        let mut controller = team_controller_with_actives(
            TestCombatantBuilder::new("hero").build(),
            TestCombatantBuilder::new("wounded").with_hp(25).build(),
        );

        // Rolls: player spread, bench pick, move pick, AI spread.
        let bus = controller
            .submit_player_attack(0, TurnRng::new_for_test(vec![100, 1, 1, 100]))
            .unwrap();

        let state = controller.state();
        assert_ne!(state.opponent_team.active().name, "wounded");
        assert!(!state.opponent_team.active().is_fainted);

        let events = bus.events();
        let withdrew = events
            .iter()
            .position(|e| matches!(e, BattleEvent::OpponentWithdrew { .. }))
            .expect("the AI withdrew its wounded combatant");
        let attacked = events
            .iter()
            .position(|e| matches!(e, BattleEvent::MoveUsed { side: Side::Opponent, .. }))
            .expect("the replacement attacked in the same turn");
        assert!(withdrew < attacked);

        // The replacement's attack landed on the player.
        assert_eq!(state.player_team.active().current_hp, 81);
        // The withdrawn combatant keeps its remaining HP.
        assert_eq!(state.opponent_team.member(0).unwrap().current_hp, 6);
    }

    #[test]
    fn switched_in_opponent_carries_no_repetition_restriction() {
        let mut controller = team_controller_with_actives(
            TestCombatantBuilder::new("hero").with_max_hp(500).build(),
            TestCombatantBuilder::new("wounded").with_hp(25).build(),
        );

        let bus = controller
            .submit_player_attack(0, TurnRng::new_for_test(vec![100, 1, 1, 100]))
            .unwrap();

        // The replacement's move is recorded fresh.
        assert_eq!(
            controller.state().last_move(Side::Opponent),
            Some("tackle")
        );
        assert!(bus
            .events()
            .iter()
            .any(|e| matches!(e, BattleEvent::OpponentSentOut { .. })));
    }

    #[test]
    fn ai_stays_in_without_a_bench() {
        let mut controller = single_controller(
            TestCombatantBuilder::new("hero").build(),
            TestCombatantBuilder::new("cornered").with_hp(25).build(),
        );

        // Rolls: player spread, move pick, AI spread. No bench pick happens.
        let bus = controller
            .submit_player_attack(0, TurnRng::new_for_test(vec![100, 1, 100]))
            .unwrap();

        let state = controller.state();
        assert_eq!(state.opponent_team.active().name, "cornered");
        assert_eq!(state.opponent_team.active().current_hp, 6);
        assert!(!bus
            .events()
            .iter()
            .any(|e| matches!(e, BattleEvent::OpponentWithdrew { .. })));
        // It attacked instead.
        assert_eq!(state.player_team.active().current_hp, 81);
    }
}
