#[cfg(test)]
mod tests {
    use crate::sim::battle::{GameType, Player, Stat, Status};
    use crate::sim::{ChoiceErrorKind, SimFrame, SimMessage, parse_sim_frame, parse_sim_message};

    fn parse_one(line: &str) -> SimMessage {
        parse_sim_message(line).unwrap().unwrap()
    }

    fn update_messages(raw: &str) -> Vec<SimMessage> {
        match parse_sim_frame(raw).unwrap().unwrap() {
            SimFrame::Update { messages } => messages,
            other => panic!("expected update frame, got {:?}", other),
        }
    }

    // === Frames ===

    #[test]
    fn test_empty_message_yields_no_frame() {
        assert!(parse_sim_frame("").unwrap().is_none());
        assert!(parse_sim_frame("   \n\n  ").unwrap().is_none());
    }

    #[test]
    fn test_unrecognized_keyword_yields_no_frame() {
        assert!(parse_sim_frame("deltastream\n|turn|1").unwrap().is_none());
    }

    #[test]
    fn test_update_frame_with_turn() {
        let messages = update_messages("update\n|turn|5");
        assert_eq!(messages, vec![SimMessage::Turn(5)]);
    }

    #[test]
    fn test_sideupdate_frame() {
        let frame = parse_sim_frame("sideupdate\np1\n|request|{}")
            .unwrap()
            .unwrap();

        match frame {
            SimFrame::SideUpdate { player, messages } => {
                assert_eq!(player, Player::P1);
                assert_eq!(messages, vec![SimMessage::Request("{}".to_string())]);
            }
            other => panic!("expected sideupdate, got {:?}", other),
        }
    }

    #[test]
    fn test_sideupdate_with_bad_token_yields_no_frame() {
        assert!(parse_sim_frame("sideupdate\nspectator\n|turn|1")
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_end_frame_keeps_log_opaque() {
        let frame = parse_sim_frame("end\n{\"winner\":\"Alice\"}\n|raw log|line")
            .unwrap()
            .unwrap();

        match frame {
            SimFrame::End { log } => {
                assert_eq!(log, "{\"winner\":\"Alice\"}\n|raw log|line");
            }
            other => panic!("expected end, got {:?}", other),
        }
    }

    #[test]
    fn test_element_order_is_preserved() {
        let messages = update_messages(
            "update\n|gametype|singles\n|gen|9\n|turn|1\n|-weather|RainDance\n|turn|2",
        );

        assert_eq!(
            messages,
            vec![
                SimMessage::GameType(GameType::Singles),
                SimMessage::Gen(9),
                SimMessage::Turn(1),
                SimMessage::Weather {
                    weather: "RainDance".to_string(),
                    upkeep: false,
                    tags: vec![],
                },
                SimMessage::Turn(2),
            ]
        );
    }

    #[test]
    fn test_parsing_is_idempotent() {
        let raw = "update\n|switch|p1a: Chompy|Garchomp, L50, F|200/200\n|turn|3";
        let first = parse_sim_frame(raw).unwrap();
        let second = parse_sim_frame(raw).unwrap();
        assert_eq!(first, second);
    }

    // === Split constructs ===

    #[test]
    fn test_split_wraps_two_damage_elements() {
        let raw = "update\n|split|p1\n|damage|p1a: Foo|50/100\n|damage|p1a: Foo|50/100";
        let messages = update_messages(raw);
        assert_eq!(messages.len(), 1);

        let SimMessage::Split(split) = &messages[0] else {
            panic!("expected split, got {:?}", messages[0]);
        };

        assert_eq!(split.player, Player::P1);
        assert_eq!(split.secret, split.public);
        assert!(matches!(*split.secret, SimMessage::Damage { .. }));
    }

    #[test]
    fn test_split_secret_and_public_can_differ_in_fields() {
        let raw = "update\n|split|p2\n|-damage|p2a: Blissey|312/714\n|-damage|p2a: Blissey|44/100";
        let messages = update_messages(raw);

        let SimMessage::Split(split) = &messages[0] else {
            panic!("expected split");
        };
        let SimMessage::Damage { hp: Some(secret), .. } = split.secret.as_ref() else {
            panic!("expected secret damage hp");
        };
        let SimMessage::Damage { hp: Some(public), .. } = split.public.as_ref() else {
            panic!("expected public damage hp");
        };

        assert_eq!(secret.max, Some(714));
        assert_eq!(public.max, Some(100));
    }

    #[test]
    fn test_truncated_split_is_dropped() {
        let messages = update_messages("update\n|turn|1\n|split|p1\n|-damage|p1a: Foo|50/100");
        assert_eq!(messages, vec![SimMessage::Turn(1)]);
    }

    #[test]
    fn test_split_with_failing_sub_parse_is_dropped() {
        // Malformed hp in the secret line drops the construct, not the frame
        let raw = "update\n|turn|1\n|split|p1\n|-damage|p1a: Foo|bad/100\n|-damage|p1a: Foo|50/100";
        assert_eq!(update_messages(raw), vec![SimMessage::Turn(1)]);
    }

    #[test]
    fn test_split_with_mismatched_kinds_is_dropped() {
        let raw = "update\n|split|p1\n|-damage|p1a: Foo|50/100\n|-heal|p1a: Foo|50/100";
        assert!(update_messages(raw).is_empty());
    }

    #[test]
    fn test_split_advances_past_its_two_lines() {
        let raw = "update\n|split|p1\n|-sethp|p1a: Foo|120/240\n|-sethp|p1a: Foo|50/100\n|upkeep";
        let messages = update_messages(raw);
        assert_eq!(messages.len(), 2);
        assert!(matches!(messages[0], SimMessage::Split(_)));
        assert_eq!(messages[1], SimMessage::Upkeep);
    }

    // === Element dispatch ===

    #[test]
    fn test_unknown_command_keeps_original_line() {
        let message = parse_one("|totallynewcommand|x|y");
        assert_eq!(
            message,
            SimMessage::Unknown("|totallynewcommand|x|y".to_string())
        );
    }

    #[test]
    fn test_too_few_segments_falls_back_to_unknown() {
        // |teamsize| needs a player and a count
        assert_eq!(
            parse_one("|teamsize|p1"),
            SimMessage::Unknown("|teamsize|p1".to_string())
        );
    }

    #[test]
    fn test_non_protocol_line_is_skipped() {
        assert!(parse_sim_message("just chatter").unwrap().is_none());
        assert!(parse_sim_message("").unwrap().is_none());
    }

    #[test]
    fn test_spacer_line() {
        assert_eq!(parse_one("|"), SimMessage::Spacer);
    }

    #[test]
    fn test_malformed_turn_number_is_fatal() {
        assert!(parse_sim_message("|turn|notanumber").is_err());
    }

    #[test]
    fn test_malformed_gen_is_fatal() {
        assert!(parse_sim_message("|gen|nine").is_err());
    }

    #[test]
    fn test_unknown_status_is_fatal() {
        assert!(parse_sim_message("|-status|p1a: Foo|dazzled").is_err());
    }

    #[test]
    fn test_unknown_stat_is_fatal() {
        assert!(parse_sim_message("|-boost|p1a: Foo|luck|2").is_err());
    }

    #[test]
    fn test_unknown_gametype_is_fatal() {
        assert!(parse_sim_message("|gametype|rotation").is_err());
    }

    #[test]
    fn test_minor_dash_prefix_is_normalized() {
        assert_eq!(parse_one("|-damage|p1a: Foo|50/100"), parse_one("|damage|p1a: Foo|50/100"));
    }

    #[test]
    fn test_bare_start_vs_volatile_start() {
        assert_eq!(parse_one("|start"), SimMessage::BattleStart);

        let message = parse_one("|-start|p1a: Foo|confusion");
        let SimMessage::VolatileStart { pokemon, effect, .. } = message else {
            panic!("expected volatile start");
        };
        assert_eq!(pokemon.name, "Foo");
        assert_eq!(effect, "confusion");
    }

    // === Field fidelity ===

    #[test]
    fn test_player_message_fields() {
        let message = parse_one("|player|p2|Bob|266|1500");
        assert_eq!(
            message,
            SimMessage::BattlePlayer {
                player: Player::P2,
                username: "Bob".to_string(),
                avatar: "266".to_string(),
                rating: Some(1500),
            }
        );
    }

    #[test]
    fn test_move_interprets_its_tags() {
        let message = parse_one("|move|p1a: Pikachu|Thunder|p2a: Gyarados|[miss]|[anim] Thunderbolt|[from]lockedmove");

        let SimMessage::Move {
            pokemon,
            move_name,
            target,
            miss,
            still,
            anim,
            tags,
        } = message
        else {
            panic!("expected move");
        };

        assert_eq!(pokemon.name, "Pikachu");
        assert_eq!(move_name, "Thunder");
        assert_eq!(target.unwrap().name, "Gyarados");
        assert!(miss);
        assert!(!still);
        assert_eq!(anim.as_deref(), Some("Thunderbolt"));
        assert_eq!(tags, vec!["[from]lockedmove".to_string()]);
    }

    #[test]
    fn test_switch_fields_and_tags() {
        let message = parse_one("|switch|p1a: Chompy|Garchomp, L50, F|200/200|[from] Baton Pass");

        let SimMessage::Switch {
            pokemon,
            details,
            hp,
            tags,
        } = message
        else {
            panic!("expected switch");
        };

        assert_eq!(pokemon.player, Player::P1);
        assert_eq!(details.species, "Garchomp");
        assert_eq!(details.level, Some(50));
        assert_eq!(hp.unwrap().max, Some(200));
        assert_eq!(tags, vec!["[from] Baton Pass".to_string()]);
    }

    #[test]
    fn test_boost_fields() {
        let message = parse_one("|-boost|p2a: Gyarados|atk|2");
        assert_eq!(
            message,
            SimMessage::Boost {
                pokemon: crate::sim::battle::PokemonId::parse("p2a: Gyarados").unwrap(),
                stat: Stat::Atk,
                amount: 2,
                tags: vec![],
            }
        );
    }

    #[test]
    fn test_curestatus_closed_vocab() {
        let message = parse_one("|-curestatus|p1a: Foo|SLP|[silent]");
        let SimMessage::CureStatus { status, tags, .. } = message else {
            panic!("expected curestatus");
        };
        assert_eq!(status, Status::Sleep);
        assert_eq!(tags, vec!["[silent]".to_string()]);
    }

    #[test]
    fn test_weather_upkeep_flag() {
        let message = parse_one("|-weather|SunnyDay|[upkeep]");
        assert_eq!(
            message,
            SimMessage::Weather {
                weather: "SunnyDay".to_string(),
                upkeep: true,
                tags: vec![],
            }
        );
    }

    #[test]
    fn test_swapboost_stat_list() {
        let message = parse_one("|-swapboost|p1a: Foo|p2a: Bar|atk, spa");
        let SimMessage::SwapBoost { stats, .. } = message else {
            panic!("expected swapboost");
        };
        assert_eq!(stats, vec![Stat::Atk, Stat::Spa]);
    }

    #[test]
    fn test_error_classification() {
        let message = parse_one("|error|[Invalid choice] Can't move: Pikachu is fainted");
        let SimMessage::Error { kind, message } = message else {
            panic!("expected error");
        };
        assert_eq!(kind, ChoiceErrorKind::InvalidChoice);
        assert!(message.contains("Pikachu"));

        let message = parse_one("|error|[Unavailable choice] New request pending");
        assert!(matches!(
            message,
            SimMessage::Error {
                kind: ChoiceErrorKind::UnavailableChoice,
                ..
            }
        ));

        let message = parse_one("|error|something went wrong");
        let SimMessage::Error { kind, message } = message else {
            panic!("expected error");
        };
        assert_eq!(kind, ChoiceErrorKind::Other);
        assert_eq!(message, "something went wrong");
    }

    #[test]
    fn test_timestamp_message() {
        assert_eq!(parse_one("|t:|1700000000"), SimMessage::Timestamp(1700000000));
    }

    #[test]
    fn test_request_payload_with_pipes_is_rejoined() {
        let message = parse_one(r#"|request|{"side":{"name":"a|b"}}"#);
        assert_eq!(
            message,
            SimMessage::Request(r#"{"side":{"name":"a|b"}}"#.to_string())
        );
    }

    #[test]
    fn test_minor_action_classification() {
        assert!(parse_one("|-damage|p1a: Foo|50/100").is_minor_action());
        assert!(parse_one("|-crit|p1a: Foo").is_minor_action());
        assert!(!parse_one("|turn|4").is_minor_action());
        assert!(!parse_one("|switch|p1a: Foo|Ditto|100/100").is_minor_action());
    }

    #[test]
    fn test_init_sequence() {
        let messages = update_messages(
            "update\n|player|p1|Alice|60|\n|teamsize|p1|6\n|gametype|singles\n|gen|7\n|tier|[Gen 7] Random Battle\n|rule|Sleep Clause Mod: Limit one foe put to sleep\n|clearpoke\n|poke|p1|Pikachu, L88, M|item\n|teampreview\n|start",
        );

        assert_eq!(messages.len(), 10);
        assert_eq!(
            messages[1],
            SimMessage::TeamSize {
                player: Player::P1,
                size: 6,
            }
        );
        assert_eq!(messages[2], SimMessage::GameType(GameType::Singles));
        assert_eq!(messages[9], SimMessage::BattleStart);

        let SimMessage::Poke {
            player,
            details,
            has_item,
        } = &messages[7]
        else {
            panic!("expected poke");
        };
        assert_eq!(*player, Player::P1);
        assert_eq!(details.species, "Pikachu");
        assert!(has_item);
    }

    #[test]
    fn test_faint_and_win() {
        let messages = update_messages("update\n|faint|p2a: Gyarados\n|\n|win|Alice");
        assert_eq!(messages.len(), 3);
        assert!(matches!(messages[0], SimMessage::Faint(_)));
        assert_eq!(messages[1], SimMessage::Spacer);
        assert_eq!(messages[2], SimMessage::Win("Alice".to_string()));
    }
}
