#[cfg(test)]
mod unit_tests {
    use super::super::*;

    fn folder_config() -> StyleConfig {
        StyleConfig {
            text_color: "#000000".parse().unwrap(),
            nonprintable_text_color: "#777777".parse().unwrap(),
            folder_background_color: "#112233".parse().unwrap(),
            folder_text_color: "#445566".parse().unwrap(),
        }
    }

    #[test]
    fn test_block_type_matches_request() {
        let config = StyleConfig::default();
        for ty in ElementType::ALL {
            assert_eq!(resolve(ty, &config).block_type(), ty);
        }
    }

    #[test]
    fn test_parenthetical_decoration() {
        let profile = resolve(ElementType::Parenthetical, &StyleConfig::default());
        assert!(profile.has_decoration());
        assert_eq!(profile.prefix(), "(");
        assert_eq!(profile.postfix(), ")");
        assert!(!profile.is_first_uppercase());

        for ty in ElementType::ALL {
            if ty != ElementType::Parenthetical {
                assert!(!resolve(ty, &StyleConfig::default()).has_decoration());
            }
        }
    }

    #[test]
    fn test_only_title_header_is_read_only() {
        let config = StyleConfig::default();
        for ty in ElementType::ALL {
            let profile = resolve(ty, &config);
            assert_eq!(profile.is_can_modify(), ty != ElementType::TitleHeader);
            assert_eq!(profile.is_header(), ty == ElementType::TitleHeader);
        }
    }

    #[test]
    fn test_only_title_has_header() {
        let config = StyleConfig::default();
        let title = resolve(ElementType::Title, &config);
        assert!(title.has_header());
        assert_eq!(title.header_type(), ElementType::TitleHeader);
        assert_eq!(title.header(), "Title:");

        for ty in ElementType::ALL {
            if ty != ElementType::Title {
                let profile = resolve(ty, &config);
                assert!(!profile.has_header());
                assert_eq!(profile.header(), "");
                assert_eq!(profile.header_type(), ElementType::Undefined);
            }
        }
    }

    #[test]
    fn test_embeddable_footer_pairing() {
        let registry = StyleRegistry::default();
        assert_eq!(
            registry.embeddable_footer(ElementType::SceneGroupHeader),
            ElementType::SceneGroupFooter
        );
        assert_eq!(
            registry.embeddable_footer(ElementType::FolderHeader),
            ElementType::FolderFooter
        );

        for ty in ElementType::ALL {
            let profile = registry.resolve(ty);
            assert_eq!(profile.embeddable_footer(), registry.embeddable_footer(ty));
            if !matches!(ty, ElementType::SceneGroupHeader | ElementType::FolderHeader) {
                assert_eq!(registry.embeddable_footer(ty), ElementType::Undefined);
                assert!(!profile.is_embeddable_header());
            }
        }
    }

    #[test]
    fn test_embeddable_predicate() {
        let registry = StyleRegistry::default();
        for ty in ElementType::ALL {
            let expected = matches!(
                ty,
                ElementType::SceneGroupHeader
                    | ElementType::SceneGroupFooter
                    | ElementType::FolderHeader
                    | ElementType::FolderFooter
            );
            assert_eq!(registry.resolve(ty).is_embeddable(), expected, "{}", ty);
        }
    }

    #[test]
    fn test_round_trip_through_block_tag() {
        let registry = StyleRegistry::new(folder_config());
        for ty in ElementType::ALL {
            let mut block = ScenarioBlock::new("text");
            assert_eq!(registry.type_of(&block), ElementType::Undefined);

            block.apply(&registry.resolve(ty));
            assert_eq!(registry.type_of(&block), ty);
        }
    }

    #[test]
    fn test_nonprintable_color_is_isolated() {
        let before = folder_config();
        let after = StyleConfig {
            nonprintable_text_color: Color::rgb(0xff, 0x00, 0x00),
            ..before.clone()
        };

        for ty in ElementType::ALL {
            let old = resolve(ty, &before);
            let new = resolve(ty, &after);
            if ty == ElementType::NoprintableText {
                assert_ne!(old.foreground(), new.foreground());
                assert_eq!(new.foreground(), Color::rgb(0xff, 0x00, 0x00));
            } else {
                assert_eq!(old, new, "{} changed", ty);
            }
        }
    }

    #[test]
    fn test_folder_header_scenario() {
        let profile = resolve(ElementType::FolderHeader, &folder_config());
        assert_eq!(profile.top_margin(), 15);
        assert_eq!(profile.background().map(|c| c.to_string()).as_deref(), Some("#112233"));
        assert_eq!(profile.foreground().to_string(), "#445566");
        assert_eq!(profile.capitalization(), Capitalization::AllUppercase);
    }

    #[test]
    fn test_text_color_is_default_foreground() {
        let config = folder_config();
        for ty in ElementType::ALL {
            let expected = match ty {
                ElementType::NoprintableText => config.nonprintable_text_color,
                ElementType::FolderHeader | ElementType::FolderFooter => config.folder_text_color,
                _ => config.text_color,
            };
            assert_eq!(resolve(ty, &config).foreground(), expected);
        }
    }

    #[test]
    fn test_display_text_per_type() {
        let registry = StyleRegistry::default();
        let show = |ty, text: &str| ScenarioBlock::styled(text, &registry.resolve(ty)).display_text();

        insta::assert_snapshot!(show(ElementType::TimeAndPlace, "int. kitchen - night"), @"INT. KITCHEN - NIGHT");
        insta::assert_snapshot!(show(ElementType::Action, "the kettle whistles."), @"The kettle whistles.");
        insta::assert_snapshot!(show(ElementType::Parenthetical, "quietly"), @"(quietly)");
        insta::assert_snapshot!(show(ElementType::Parenthetical, "(beat)"), @"(beat)");
        insta::assert_snapshot!(show(ElementType::Transition, "cut to:"), @"CUT TO:");
        insta::assert_snapshot!(show(ElementType::Dialog, "who's there?"), @"Who's there?");
    }

    #[test]
    fn test_profile_serializes_for_tooling() {
        let profile = resolve(ElementType::FolderFooter, &folder_config());
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["block_type"], "folder_footer");
        assert_eq!(json["block_format"]["background"], "#112233");
        assert_eq!(json["char_format"]["capitalization"], "all_uppercase");

        let back: StyleProfile = serde_json::from_value(json).unwrap();
        assert_eq!(back, profile);
    }
}
