use std::collections::BTreeSet;

use bestiary_core::{sort, Bestiary, SortDirection, SortField};
use bestiary_types::catalog::keys;
use bestiary_types::{
    AbilityScores, Accessor, Attacks, Creature, DamageReduction, FilterKind, FilterState,
    HitPoints, MatchMode, RangeBound, RecordId, Resistance, Source, SpecialAbility, Speeds,
};

fn scenario() -> Bestiary {
    let make = |id: &str, kind: &str, cr: f64, subtypes: &[&str]| Creature {
        id: id.into(),
        name: id.into(),
        creature_type: Some(kind.into()),
        challenge_rating: Some(cr),
        subtypes: subtypes.iter().map(|s| s.to_string()).collect(),
        ..Default::default()
    };
    Bestiary::new(vec![
        make("A", "dragon", 5.0, &["fire"]),
        make("B", "dragon", 10.0, &["cold"]),
        make("C", "undead", 5.0, &[]),
    ])
}

fn ids_of(bestiary: &Bestiary, state: &FilterState) -> Vec<String> {
    bestiary
        .evaluate(state)
        .into_iter()
        .map(|c| c.id.clone())
        .collect()
}

fn menagerie() -> Vec<Creature> {
    let strings = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();
    vec![
        Creature {
            id: "ancient-red-dragon".into(),
            name: "Ancient Red Dragon".into(),
            creature_type: Some("dragon".into()),
            size: Some("Gargantuan".into()),
            alignment: Some("CE".into()),
            environment: Some("warm mountains".into()),
            challenge_rating: Some(19.0),
            armor_class: Some(39.0),
            initiative: Some(4.0),
            hit_points: HitPoints {
                total: Some(362.0),
                ..Default::default()
            },
            speeds: Speeds {
                base: Some(40.0),
                fly: Some(250.0),
                ..Default::default()
            },
            ability_scores: AbilityScores {
                strength: Some(35.0),
                charisma: Some(24.0),
                ..Default::default()
            },
            attacks: Attacks {
                melee: strings(&["bite +33", "2 claws +33"]),
                special: strings(&["breath weapon"]),
                ..Default::default()
            },
            subtypes: strings(&["fire"]),
            languages: strings(&["Common", "Draconic", "Abyssal"]),
            immunities: strings(&["fire", "sleep", "paralysis"]),
            weaknesses: strings(&["vulnerability to cold"]),
            senses: strings(&["darkvision 120 ft.", "blindsense 60 ft."]),
            damage_reduction: vec![DamageReduction {
                amount: Some(15.0),
                types: strings(&["magic"]),
            }],
            spells: strings(&["fireball"]),
            auras: strings(&["fire aura"]),
            sources: vec![Source {
                name: "Bestiary".into(),
                page: Some(98),
            }],
            feats: strings(&["Power Attack", "Cleave"]),
            ..Default::default()
        },
        Creature {
            id: "troll".into(),
            name: "Troll".into(),
            creature_type: Some("humanoid".into()),
            size: Some("Large".into()),
            alignment: Some("CE".into()),
            challenge_rating: Some(5.0),
            armor_class: Some(16.0),
            initiative: Some(2.0),
            hit_points: HitPoints {
                total: Some(63.0),
                regeneration: Some(5.0),
                ..Default::default()
            },
            ability_scores: AbilityScores {
                strength: Some(21.0),
                ..Default::default()
            },
            attacks: Attacks {
                melee: strings(&["bite +8", "2 claws +8"]),
                ..Default::default()
            },
            subtypes: strings(&["giant"]),
            languages: strings(&["Giant"]),
            feats: strings(&["Power Attack"]),
            sources: vec![Source {
                name: "Bestiary".into(),
                page: Some(268),
            }],
            ..Default::default()
        },
        Creature {
            id: "pixie".into(),
            name: "Pixie".into(),
            creature_type: Some("fey".into()),
            size: Some("Small".into()),
            challenge_rating_display: Some("4".into()),
            speeds: Speeds {
                base: Some(20.0),
                fly: Some(60.0),
                ..Default::default()
            },
            attacks: Attacks {
                ranged: strings(&["longbow +10"]),
                ..Default::default()
            },
            spell_like_abilities: strings(&["dancing lights"]),
            languages: strings(&["Common", "Sylvan"]),
            defensive_abilities: strings(&["invisibility"]),
            damage_reduction: vec![DamageReduction {
                amount: Some(10.0),
                types: strings(&["cold iron"]),
            }],
            sources: vec![Source {
                name: "Bestiary 2".into(),
                page: None,
            }],
            ..Default::default()
        },
        Creature {
            id: "ghoul".into(),
            name: "Ghoul".into(),
            creature_type: Some("undead".into()),
            size: Some("Medium".into()),
            challenge_rating: Some(1.0),
            armor_class: Some(14.0),
            hit_points: HitPoints {
                total: Some(13.0),
                ..Default::default()
            },
            special_abilities: vec![SpecialAbility {
                name: "Fast Healing".into(),
                description: Some("Regains 2 hp per round".into()),
            }],
            immunities: strings(&["undead traits"]),
            senses: strings(&["darkvision 60 ft."]),
            languages: strings(&["Common"]),
            ..Default::default()
        },
        Creature {
            id: "fire-elemental".into(),
            name: "Small Fire Elemental".into(),
            creature_type: Some("outsider".into()),
            size: Some("Small".into()),
            challenge_rating_display: Some("1/2".into()),
            armor_class: Some(16.0),
            speeds: Speeds {
                base: Some(50.0),
                other: vec!["flame glide".into()],
                ..Default::default()
            },
            subtypes: strings(&["elemental", "extraplanar", "fire"]),
            immunities: strings(&["fire", "elemental traits"]),
            resistances: vec![Resistance {
                kind: "electricity".into(),
                amount: Some(5.0),
            }],
            psychic_magic: strings(&["burning hands"]),
            ..Default::default()
        },
        Creature {
            id: "unknown".into(),
            name: "Unclassified Horror".into(),
            ..Default::default()
        },
    ]
}

/// Builds a state with exactly one active predicate that `creature` satisfies
/// by direct inspection, for every predicate it can satisfy.
fn satisfied_predicates(bestiary: &Bestiary, creature: &Creature) -> Vec<FilterState> {
    let mut states = Vec::new();
    for def in bestiary.catalog().iter() {
        match def.kind {
            FilterKind::MultiSelect => {
                def.accessor.for_each_value(creature, |value| {
                    let mut state = FilterState::new();
                    state.select(def.key, value);
                    states.push(state);
                });
            }
            FilterKind::Range => {
                if let Some(value) = def.accessor.number(creature) {
                    let mut state = FilterState::new();
                    state.set_range(def.key, RangeBound::between(value, value));
                    states.push(state);
                }
            }
            FilterKind::Boolean => {
                let mut state = FilterState::new();
                state.set_flag(def.key, Some(def.accessor.flag(creature)));
                states.push(state);
            }
        }
    }
    states
}

#[test]
fn scenario_filters() {
    let bestiary = scenario();

    let mut state = FilterState::new();
    state.select(keys::TYPE, "dragon");
    assert_eq!(ids_of(&bestiary, &state), vec!["A", "B"]);

    state.set_min(keys::CR, Some(8.0));
    assert_eq!(ids_of(&bestiary, &state), vec!["B"]);

    let mut state = FilterState::new();
    state.select(keys::SUBTYPES, "fire");
    state.set_exclude(keys::SUBTYPES, true);
    assert_eq!(ids_of(&bestiary, &state), vec!["B", "C"]);
}

#[test]
fn scenario_sort_by_cr_is_stable() {
    let bestiary = scenario();
    let sorted = bestiary.sorted(
        &FilterState::new(),
        SortField::ChallengeRating,
        SortDirection::Ascending,
    );
    let ids: Vec<_> = sorted.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["A", "C", "B"]);
}

#[test]
fn index_and_direct_inspection_agree() {
    let bestiary = Bestiary::new(menagerie());
    for (id, creature) in bestiary.records().iter().enumerate() {
        for state in satisfied_predicates(&bestiary, creature) {
            let hits = bestiary.evaluate_ids(&state);
            assert!(
                hits.contains(&(id as RecordId)),
                "{} missing from {:?}",
                creature.id,
                state
            );
        }
    }
}

#[test]
fn residual_and_indexed_ranges_agree_with_accessors() {
    let bestiary = Bestiary::new(menagerie());
    let records = bestiary.records();
    for def in bestiary.catalog().of_kind(FilterKind::Range) {
        let Accessor::Number(_) = def.accessor else {
            panic!("range filter `{}` without numeric accessor", def.key);
        };
        let mut state = FilterState::new();
        state.set_range(def.key, RangeBound::between(10.0, 40.0));
        let expected: Vec<RecordId> = records
            .iter()
            .enumerate()
            .filter(|(_, c)| {
                def.accessor
                    .number(c)
                    .is_some_and(|v| (10.0..=40.0).contains(&v))
            })
            .map(|(i, _)| i as RecordId)
            .collect();
        assert_eq!(bestiary.evaluate_ids(&state), expected, "filter {}", def.key);
    }
}

#[test]
fn empty_state_is_identity() {
    let bestiary = Bestiary::new(menagerie());
    let hits = bestiary.evaluate_ids(&FilterState::new());
    assert_eq!(hits.len(), bestiary.len());
    let expected: Vec<RecordId> = (0..bestiary.len() as RecordId).collect();
    assert_eq!(hits, expected);
}

#[test]
fn adding_filters_never_grows_results() {
    let bestiary = Bestiary::new(menagerie());
    let mut state = FilterState::new();
    let mut previous = bestiary.count(&state);

    let steps: Vec<Box<dyn Fn(&mut FilterState)>> = vec![
        Box::new(|s: &mut FilterState| s.select(keys::LANGUAGES, "common")),
        Box::new(|s: &mut FilterState| s.set_max(keys::CR, Some(20.0))),
        Box::new(|s: &mut FilterState| s.set_flag(keys::HAS_MELEE_ATTACKS, Some(false))),
        Box::new(|s: &mut FilterState| s.set_range(keys::BASE_SPEED, RangeBound::at_least(10.0))),
        Box::new(|s: &mut FilterState| s.set_search("i")),
        Box::new(|s: &mut FilterState| s.select(keys::MOVEMENT_TYPES, "fly")),
    ];

    for step in steps {
        step(&mut state);
        let count = bestiary.count(&state);
        assert!(count <= previous, "{count} > {previous} after {state:?}");
        previous = count;
    }
    assert_eq!(previous, 1);
}

#[test]
fn exclude_and_include_partition_the_dataset() {
    let bestiary = Bestiary::new(menagerie());
    let selections: [(&str, &[&str]); 4] = [
        (keys::SUBTYPES, &["fire"]),
        (keys::LANGUAGES, &["common", "giant"]),
        (keys::IMMUNITIES, &["fire", "sleep"]),
        (keys::SIZE, &["small"]),
    ];

    for (key, values) in selections {
        let mut include = FilterState::new();
        for value in values {
            include.select(key, *value);
        }
        let mut exclude = include.clone();
        exclude.set_exclude(key, true);

        let a: BTreeSet<RecordId> = bestiary.evaluate_ids(&include).into_iter().collect();
        let b: BTreeSet<RecordId> = bestiary.evaluate_ids(&exclude).into_iter().collect();
        assert!(a.is_disjoint(&b), "{key} overlaps");
        assert_eq!(a.len() + b.len(), bestiary.len(), "{key} does not cover");
    }
}

#[test]
fn all_mode_is_subset_of_any_mode() {
    let bestiary = Bestiary::new(menagerie());
    let selections: [(&str, &[&str]); 3] = [
        (keys::LANGUAGES, &["common", "draconic"]),
        (keys::IMMUNITIES, &["fire", "sleep"]),
        (keys::FEATS, &["power attack", "cleave"]),
    ];

    for (key, values) in selections {
        let mut any = FilterState::new();
        for value in values {
            any.select(key, *value);
        }
        let mut all = any.clone();
        all.set_match_mode(key, MatchMode::All);

        let any_hits: BTreeSet<RecordId> = bestiary.evaluate_ids(&any).into_iter().collect();
        let all_hits: BTreeSet<RecordId> = bestiary.evaluate_ids(&all).into_iter().collect();
        assert!(all_hits.is_subset(&any_hits), "{key}");
        assert!(!all_hits.is_empty(), "{key}");
    }
}

#[test]
fn range_boundaries() {
    let bestiary = Bestiary::new(menagerie());
    let hp = |bound: RangeBound| {
        let mut state = FilterState::new();
        state.set_range(keys::HP, bound);
        bestiary
            .evaluate(&state)
            .into_iter()
            .map(|c| c.id.as_str())
            .collect::<Vec<_>>()
    };

    assert_eq!(hp(RangeBound::between(13.0, 63.0)), vec!["troll", "ghoul"]);
    assert_eq!(hp(RangeBound::between(13.0 + 1e-9, 63.0)), vec!["troll"]);
    assert_eq!(hp(RangeBound::between(13.0, 63.0 - 1e-9)), vec!["ghoul"]);
    // No record without hit points ever matches an hp bound.
    assert_eq!(
        hp(RangeBound::between(f64::MIN, f64::MAX)),
        vec!["ancient-red-dragon", "troll", "ghoul"]
    );
}

#[test]
fn prediction_never_mutates() {
    let bestiary = Bestiary::new(menagerie());
    let mut state = FilterState::new();
    state.select(keys::LANGUAGES, "common");
    state.set_exclude(keys::SUBTYPES, true);
    let snapshot = state.clone();
    let before = bestiary.evaluate_ids(&state);

    for value in ["common", "draconic", "sylvan", "giant", "common"] {
        bestiary.predicted_count(&state, keys::LANGUAGES, value);
    }

    assert_eq!(state, snapshot);
    assert_eq!(bestiary.evaluate_ids(&state), before);
}

#[test]
fn name_sort_reverses_exactly() {
    let records = menagerie();
    let mut asc: Vec<&Creature> = records.iter().collect();
    sort(&mut asc, SortField::Name, SortDirection::Ascending);
    let mut desc = asc.clone();
    sort(&mut desc, SortField::Name, SortDirection::Descending);
    desc.reverse();
    let a: Vec<_> = asc.iter().map(|c| &c.name).collect();
    let d: Vec<_> = desc.iter().map(|c| &c.name).collect();
    assert_eq!(a, d);
}

#[test]
fn derived_attributes_are_indexed() {
    let bestiary = Bestiary::new(menagerie());
    let hits = |configure: &dyn Fn(&mut FilterState)| {
        let mut state = FilterState::new();
        configure(&mut state);
        bestiary
            .evaluate(&state)
            .into_iter()
            .map(|c| c.id.as_str())
            .collect::<Vec<_>>()
    };

    assert_eq!(
        hits(&|s: &mut FilterState| s.select(keys::MOVEMENT_TYPES, "fly")),
        vec!["ancient-red-dragon", "pixie"]
    );
    assert_eq!(
        hits(&|s: &mut FilterState| s.select(keys::MOVEMENT_TYPES, "Flame Glide")),
        vec!["fire-elemental"]
    );
    assert_eq!(hits(&|s: &mut FilterState| s.select(keys::DR_TYPES, "cold iron")), vec!["pixie"]);
    assert_eq!(
        hits(&|s: &mut FilterState| s.set_range(keys::DR_AMOUNT, RangeBound::at_least(12.0))),
        vec!["ancient-red-dragon"]
    );
    assert_eq!(
        hits(&|s: &mut FilterState| s.select(keys::RESISTANCE_TYPES, "Electricity")),
        vec!["fire-elemental"]
    );
    assert_eq!(
        hits(&|s: &mut FilterState| s.set_flag(keys::HAS_REGENERATION, Some(true))),
        vec!["troll"]
    );
    assert_eq!(
        hits(&|s: &mut FilterState| s.set_flag(keys::HAS_FAST_HEALING, Some(true))),
        vec!["ghoul"]
    );
    assert_eq!(
        hits(&|s: &mut FilterState| s.set_range(keys::CR, RangeBound::at_most(0.5))),
        vec!["fire-elemental"]
    );
    assert_eq!(hits(&|s: &mut FilterState| s.select(keys::SOURCES, "bestiary 2")), vec!["pixie"]);
    assert_eq!(
        hits(&|s: &mut FilterState| s.set_flag(keys::HAS_PSYCHIC_MAGIC, Some(true))),
        vec!["fire-elemental"]
    );
}

#[test]
fn active_filter_count_matches_sidebar_badge() {
    let bestiary = Bestiary::new(menagerie());
    let mut state = FilterState::new();
    state.set_search("dragon");
    state.select(keys::TYPE, "dragon");
    state.set_range(keys::CR, RangeBound::at_least(10.0));
    state.set_flag(keys::HAS_SPELLS, Some(true));
    state.set_exclude(keys::SUBTYPES, true);
    assert_eq!(state.active_filter_count(bestiary.catalog()), 4);
    assert_eq!(bestiary.count(&state), 1);
}

#[test]
fn predicted_toggle_uses_index_equality() {
    let bestiary = Bestiary::new(menagerie());
    let mut state = FilterState::new();
    state.select(keys::DR_TYPES, "cold iron");
    assert_eq!(bestiary.count(&state), 1);
    // Clicking the same option, spelled with extra spacing, clears the filter.
    assert_eq!(
        bestiary.predicted_count(&state, keys::DR_TYPES, " Cold   Iron "),
        bestiary.len()
    );
}
