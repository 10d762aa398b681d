//! The filter catalog.
//!
//! A [`FilterDefinition`] pairs a key with a [`FilterKind`] and a closed
//! [`Accessor`] describing how to pull the relevant value(s) out of a
//! [`Creature`]. Accessors are enums rather than closures so the engine can
//! tell statically which index structure serves each filter.

use serde::{Deserialize, Serialize};

use crate::creature::Creature;

/// Filter keys used by [`FilterCatalog::standard`].
pub mod keys {
    #![allow(missing_docs)]

    pub const TYPE: &str = "type";
    pub const SIZE: &str = "size";
    pub const ALIGNMENT: &str = "alignment";
    pub const ENVIRONMENT: &str = "environment";
    pub const SOURCES: &str = "sources";
    pub const SUBTYPES: &str = "subtypes";
    pub const LANGUAGES: &str = "languages";
    pub const SPECIAL_ABILITIES: &str = "specialAbilities";
    pub const DEFENSIVE_ABILITIES: &str = "defensiveAbilities";
    pub const IMMUNITIES: &str = "immunities";
    pub const WEAKNESSES: &str = "weaknesses";
    pub const SENSES: &str = "senses";
    pub const MOVEMENT_TYPES: &str = "movementTypes";
    pub const DR_TYPES: &str = "drTypes";
    pub const RESISTANCE_TYPES: &str = "resistanceTypes";
    pub const FEATS: &str = "feats";

    pub const CR: &str = "cr";
    pub const HP: &str = "hp";
    pub const AC: &str = "ac";
    pub const INITIATIVE: &str = "initiative";
    pub const MR: &str = "mr";
    pub const XP: &str = "xp";
    pub const TOUCH_AC: &str = "touchAc";
    pub const FLAT_FOOTED_AC: &str = "flatFootedAc";
    pub const FORT: &str = "fort";
    pub const REF: &str = "ref";
    pub const WILL: &str = "will";
    pub const BAB: &str = "bab";
    pub const CMB: &str = "cmb";
    pub const CMD: &str = "cmd";
    pub const SR: &str = "sr";
    pub const SPACE: &str = "space";
    pub const REACH: &str = "reach";
    pub const BASE_SPEED: &str = "baseSpeed";
    pub const BURROW_SPEED: &str = "burrowSpeed";
    pub const CLIMB_SPEED: &str = "climbSpeed";
    pub const FLY_SPEED: &str = "flySpeed";
    pub const SWIM_SPEED: &str = "swimSpeed";
    pub const DR_AMOUNT: &str = "drAmount";
    pub const RESISTANCE_AMOUNT: &str = "resistanceAmount";
    pub const STR: &str = "str";
    pub const DEX: &str = "dex";
    pub const CON: &str = "con";
    pub const INT: &str = "int";
    pub const WIS: &str = "wis";
    pub const CHA: &str = "cha";

    pub const HAS_SPELLS: &str = "hasSpells";
    pub const HAS_SPELL_LIKE_ABILITIES: &str = "hasSpellLikeAbilities";
    pub const HAS_PSYCHIC_MAGIC: &str = "hasPsychicMagic";
    pub const HAS_REGENERATION: &str = "hasRegeneration";
    pub const HAS_FAST_HEALING: &str = "hasFastHealing";
    pub const HAS_AURAS: &str = "hasAuras";
    pub const HAS_MELEE_ATTACKS: &str = "hasMeleeAttacks";
    pub const HAS_RANGED_ATTACKS: &str = "hasRangedAttacks";
    pub const HAS_SPECIAL_ATTACKS: &str = "hasSpecialAttacks";
}

/// The shape of a filter's state and the index structure that serves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterKind {
    /// Numeric `[min, max]` bound, either side optional.
    Range,
    /// A set of selected string values.
    MultiSelect,
    /// Tri-state flag: unset, must have, must not have.
    Boolean,
}

impl core::fmt::Display for FilterKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            FilterKind::Range => "range",
            FilterKind::MultiSelect => "multiSelect",
            FilterKind::Boolean => "boolean",
        })
    }
}

/// Whether a filter is answered from a prebuilt index or by scanning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexStrategy {
    /// Served by a value map, sorted range array or flag set.
    Indexed,
    /// Checked per record over the already-reduced candidate set.
    Residual,
}

/// Sidebar grouping for a filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum FilterCategory {
    Basic,
    Challenge,
    Combat,
    Abilities,
    Saves,
    Defenses,
    Movement,
    Special,
    Environment,
    Attacks,
}

impl FilterCategory {
    /// Human-readable group heading.
    pub const fn label(self) -> &'static str {
        match self {
            FilterCategory::Basic => "Basic Info",
            FilterCategory::Challenge => "Challenge & Experience",
            FilterCategory::Combat => "Combat Stats",
            FilterCategory::Abilities => "Ability Scores",
            FilterCategory::Saves => "Saving Throws",
            FilterCategory::Defenses => "Defenses",
            FilterCategory::Movement => "Movement & Speed",
            FilterCategory::Special => "Special Abilities",
            FilterCategory::Environment => "Environment & Senses",
            FilterCategory::Attacks => "Attacks & Actions",
        }
    }
}

/// Slider bounds a UI may offer for a range filter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeHint {
    /// Lowest slider value.
    pub min: f64,
    /// Highest slider value.
    pub max: f64,
    /// Slider step.
    pub step: f64,
}

impl RangeHint {
    /// Creates a new hint.
    pub const fn new(min: f64, max: f64, step: f64) -> Self {
        Self { min, max, step }
    }
}

/// Single-valued string attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum TextField {
    CreatureType,
    Size,
    Alignment,
    Environment,
}

impl TextField {
    /// Returns the trimmed value, or `None` when absent or blank.
    pub fn get(self, creature: &Creature) -> Option<&str> {
        let raw = match self {
            TextField::CreatureType => creature.creature_type.as_deref(),
            TextField::Size => creature.size.as_deref(),
            TextField::Alignment => creature.alignment.as_deref(),
            TextField::Environment => creature.environment.as_deref(),
        };
        raw.map(str::trim).filter(|s| !s.is_empty())
    }
}

/// Multi-valued string attributes, some flattened from nested structures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum ListField {
    Subtypes,
    Languages,
    SpecialAbilities,
    DefensiveAbilities,
    Immunities,
    Weaknesses,
    Senses,
    MovementTypes,
    DamageReductionTypes,
    ResistanceTypes,
    Sources,
    Feats,
}

impl ListField {
    /// Calls `f` with every non-blank value, trimmed. Duplicates are not removed.
    pub fn for_each<'c, F>(self, creature: &'c Creature, mut f: F)
    where
        F: FnMut(&'c str),
    {
        let mut emit = |value: &'c str| {
            let value = value.trim();
            if !value.is_empty() {
                f(value);
            }
        };

        match self {
            ListField::Subtypes => creature.subtypes.iter().for_each(|s| emit(s)),
            ListField::Languages => creature.languages.iter().for_each(|s| emit(s)),
            ListField::SpecialAbilities => {
                creature.special_abilities.iter().for_each(|a| emit(&a.name))
            }
            ListField::DefensiveAbilities => {
                creature.defensive_abilities.iter().for_each(|s| emit(s))
            }
            ListField::Immunities => creature.immunities.iter().for_each(|s| emit(s)),
            ListField::Weaknesses => creature.weaknesses.iter().for_each(|s| emit(s)),
            ListField::Senses => creature.senses.iter().for_each(|s| emit(s)),
            ListField::MovementTypes => {
                let speeds = &creature.speeds;
                let named = [
                    ("burrow", speeds.burrow),
                    ("climb", speeds.climb),
                    ("fly", speeds.fly),
                    ("swim", speeds.swim),
                ];
                for (name, speed) in named {
                    if speed.is_some_and(|s| s.is_finite()) {
                        emit(name);
                    }
                }
                speeds
                    .other
                    .iter()
                    .filter(|s| !s.trim().eq_ignore_ascii_case("base"))
                    .for_each(|s| emit(s));
            }
            ListField::DamageReductionTypes => creature
                .damage_reduction
                .iter()
                .flat_map(|dr| dr.types.iter())
                .for_each(|s| emit(s)),
            ListField::ResistanceTypes => {
                creature.resistances.iter().for_each(|r| emit(&r.kind))
            }
            ListField::Sources => creature.sources.iter().for_each(|s| emit(&s.name)),
            ListField::Feats => creature.feats.iter().for_each(|s| emit(s)),
        }
    }

    /// Collects the values into a vector.
    pub fn values(self, creature: &Creature) -> Vec<&str> {
        let mut out = Vec::new();
        self.for_each(creature, |v| out.push(v));
        out
    }
}

/// Numeric attributes. Non-finite values read as absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum NumberField {
    ChallengeRating,
    MythicRank,
    ExperiencePoints,
    ArmorClass,
    TouchAc,
    FlatFootedAc,
    HitPoints,
    Initiative,
    Fortitude,
    Reflex,
    Will,
    BaseAttackBonus,
    CombatManeuverBonus,
    CombatManeuverDefense,
    SpellResistance,
    Space,
    Reach,
    BaseSpeed,
    BurrowSpeed,
    ClimbSpeed,
    FlySpeed,
    SwimSpeed,
    DamageReductionAmount,
    ResistanceAmount,
    Strength,
    Dexterity,
    Constitution,
    Intelligence,
    Wisdom,
    Charisma,
}

impl NumberField {
    /// Returns the value if present and finite.
    pub fn get(self, creature: &Creature) -> Option<f64> {
        let scores = &creature.ability_scores;
        let value = match self {
            NumberField::ChallengeRating => creature.challenge_rating(),
            NumberField::MythicRank => creature.mythic_rank,
            NumberField::ExperiencePoints => creature.experience_points,
            NumberField::ArmorClass => creature.armor_class,
            NumberField::TouchAc => creature.touch_ac,
            NumberField::FlatFootedAc => creature.flat_footed_ac,
            NumberField::HitPoints => creature.hit_points.total,
            NumberField::Initiative => creature.initiative,
            NumberField::Fortitude => creature.fortitude,
            NumberField::Reflex => creature.reflex,
            NumberField::Will => creature.will,
            NumberField::BaseAttackBonus => creature.base_attack_bonus,
            NumberField::CombatManeuverBonus => creature.combat_maneuver_bonus,
            NumberField::CombatManeuverDefense => creature.combat_maneuver_defense,
            NumberField::SpellResistance => creature.spell_resistance,
            NumberField::Space => creature.space,
            NumberField::Reach => creature.reach,
            NumberField::BaseSpeed => creature.speeds.base,
            NumberField::BurrowSpeed => creature.speeds.burrow,
            NumberField::ClimbSpeed => creature.speeds.climb,
            NumberField::FlySpeed => creature.speeds.fly,
            NumberField::SwimSpeed => creature.speeds.swim,
            NumberField::DamageReductionAmount => creature.damage_reduction_amount(),
            NumberField::ResistanceAmount => creature.resistance_amount(),
            NumberField::Strength => scores.strength,
            NumberField::Dexterity => scores.dexterity,
            NumberField::Constitution => scores.constitution,
            NumberField::Intelligence => scores.intelligence,
            NumberField::Wisdom => scores.wisdom,
            NumberField::Charisma => scores.charisma,
        };
        value.filter(|v| v.is_finite())
    }
}

/// Derived boolean flags, computed from richer nested structures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum FlagField {
    Spells,
    SpellLikeAbilities,
    PsychicMagic,
    Regeneration,
    FastHealing,
    Auras,
    MeleeAttacks,
    RangedAttacks,
    SpecialAttacks,
}

impl FlagField {
    /// Evaluates the defining predicate.
    pub fn test(self, creature: &Creature) -> bool {
        match self {
            FlagField::Spells => !creature.spells.is_empty(),
            FlagField::SpellLikeAbilities => !creature.spell_like_abilities.is_empty(),
            FlagField::PsychicMagic => !creature.psychic_magic.is_empty(),
            FlagField::Regeneration => {
                creature.hit_points.regeneration.is_some_and(|v| v > 0.0)
                    || creature.has_special_ability("regeneration")
            }
            FlagField::FastHealing => {
                creature.hit_points.fast_healing.is_some_and(|v| v > 0.0)
                    || creature.has_special_ability("fast healing")
            }
            FlagField::Auras => !creature.auras.is_empty(),
            FlagField::MeleeAttacks => !creature.attacks.melee.is_empty(),
            FlagField::RangedAttacks => !creature.attacks.ranged.is_empty(),
            FlagField::SpecialAttacks => !creature.attacks.special.is_empty(),
        }
    }
}

/// How a filter extracts its value(s) from a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Accessor {
    /// A single string field.
    Text(TextField),
    /// A list of strings, possibly flattened from nested data.
    List(ListField),
    /// A numeric field.
    Number(NumberField),
    /// A derived boolean.
    Flag(FlagField),
}

impl Accessor {
    /// The filter kind this accessor can serve.
    pub const fn natural_kind(self) -> FilterKind {
        match self {
            Accessor::Text(_) | Accessor::List(_) => FilterKind::MultiSelect,
            Accessor::Number(_) => FilterKind::Range,
            Accessor::Flag(_) => FilterKind::Boolean,
        }
    }

    /// Calls `f` with each string value. Numeric and flag accessors emit nothing.
    pub fn for_each_value<'c, F>(self, creature: &'c Creature, mut f: F)
    where
        F: FnMut(&'c str),
    {
        match self {
            Accessor::Text(field) => {
                if let Some(value) = field.get(creature) {
                    f(value);
                }
            }
            Accessor::List(field) => field.for_each(creature, f),
            Accessor::Number(_) | Accessor::Flag(_) => {}
        }
    }

    /// Numeric value, `None` for non-numeric accessors.
    pub fn number(self, creature: &Creature) -> Option<f64> {
        match self {
            Accessor::Number(field) => field.get(creature),
            _ => None,
        }
    }

    /// Flag value, `false` for non-flag accessors.
    pub fn flag(self, creature: &Creature) -> bool {
        match self {
            Accessor::Flag(field) => field.test(creature),
            _ => false,
        }
    }
}

/// Declarative description of one filter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterDefinition {
    /// State key, e.g. `"subtypes"` or `"cr"`.
    pub key: &'static str,
    /// Display label.
    pub label: &'static str,
    /// Sidebar group.
    pub category: FilterCategory,
    /// Declared kind. Must agree with `accessor.natural_kind()`.
    pub kind: FilterKind,
    /// Value extraction strategy.
    pub accessor: Accessor,
    /// Indexed or residual evaluation.
    pub strategy: IndexStrategy,
    /// Slider bounds for range filters.
    pub bounds: Option<RangeHint>,
}

impl FilterDefinition {
    /// A multi-select filter over a text or list accessor.
    pub const fn multi_select(
        key: &'static str,
        label: &'static str,
        category: FilterCategory,
        accessor: Accessor,
    ) -> Self {
        Self {
            key,
            label,
            category,
            kind: FilterKind::MultiSelect,
            accessor,
            strategy: IndexStrategy::Indexed,
            bounds: None,
        }
    }

    /// A range filter answered by binary search over a sorted value array.
    pub const fn indexed_range(
        key: &'static str,
        label: &'static str,
        category: FilterCategory,
        field: NumberField,
        bounds: RangeHint,
    ) -> Self {
        Self {
            key,
            label,
            category,
            kind: FilterKind::Range,
            accessor: Accessor::Number(field),
            strategy: IndexStrategy::Indexed,
            bounds: Some(bounds),
        }
    }

    /// A range filter checked per record after indexed filters have narrowed the set.
    pub const fn residual_range(
        key: &'static str,
        label: &'static str,
        category: FilterCategory,
        field: NumberField,
        bounds: RangeHint,
    ) -> Self {
        Self {
            key,
            label,
            category,
            kind: FilterKind::Range,
            accessor: Accessor::Number(field),
            strategy: IndexStrategy::Residual,
            bounds: Some(bounds),
        }
    }

    /// A boolean filter over a derived flag.
    pub const fn boolean(
        key: &'static str,
        label: &'static str,
        category: FilterCategory,
        field: FlagField,
    ) -> Self {
        Self {
            key,
            label,
            category,
            kind: FilterKind::Boolean,
            accessor: Accessor::Flag(field),
            strategy: IndexStrategy::Indexed,
            bounds: None,
        }
    }

    /// Returns `true` if the declared kind matches the accessor.
    #[inline(always)]
    pub fn is_consistent(&self) -> bool {
        self.kind == self.accessor.natural_kind()
    }
}

/// An immutable, ordered table of filter definitions.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCatalog {
    definitions: Vec<FilterDefinition>,
}

impl Default for FilterCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl FilterCatalog {
    /// Creates a catalog from explicit definitions.
    pub fn new(definitions: Vec<FilterDefinition>) -> Self {
        Self { definitions }
    }

    /// The full statblock catalog: 16 multi-select, 30 range and 9 boolean filters.
    pub fn standard() -> Self {
        use self::keys::*;
        use FilterCategory as C;
        use FilterDefinition as D;

        let r = RangeHint::new;

        Self::new(vec![
            D::multi_select(
                TYPE,
                "Creature Types",
                C::Basic,
                Accessor::Text(TextField::CreatureType),
            ),
            D::multi_select(SIZE, "Size", C::Basic, Accessor::Text(TextField::Size)),
            D::multi_select(
                ALIGNMENT,
                "Alignment",
                C::Basic,
                Accessor::Text(TextField::Alignment),
            ),
            D::multi_select(
                SUBTYPES,
                "Subtypes",
                C::Basic,
                Accessor::List(ListField::Subtypes),
            ),
            D::multi_select(
                SOURCES,
                "Sources",
                C::Basic,
                Accessor::List(ListField::Sources),
            ),
            D::indexed_range(
                CR,
                "Challenge Rating",
                C::Challenge,
                NumberField::ChallengeRating,
                r(0.0, 30.0, 0.5),
            ),
            D::residual_range(
                MR,
                "Mythic Rank",
                C::Challenge,
                NumberField::MythicRank,
                r(1.0, 10.0, 1.0),
            ),
            D::residual_range(
                XP,
                "Experience Points",
                C::Challenge,
                NumberField::ExperiencePoints,
                r(0.0, 1_000_000.0, 100.0),
            ),
            D::indexed_range(
                AC,
                "Total AC",
                C::Combat,
                NumberField::ArmorClass,
                r(1.0, 50.0, 1.0),
            ),
            D::residual_range(
                TOUCH_AC,
                "Touch AC",
                C::Combat,
                NumberField::TouchAc,
                r(1.0, 30.0, 1.0),
            ),
            D::residual_range(
                FLAT_FOOTED_AC,
                "Flat-Footed AC",
                C::Combat,
                NumberField::FlatFootedAc,
                r(1.0, 50.0, 1.0),
            ),
            D::indexed_range(
                HP,
                "Hit Points",
                C::Combat,
                NumberField::HitPoints,
                r(1.0, 1000.0, 1.0),
            ),
            D::indexed_range(
                INITIATIVE,
                "Initiative",
                C::Combat,
                NumberField::Initiative,
                r(-10.0, 20.0, 1.0),
            ),
            D::residual_range(
                BAB,
                "Base Attack Bonus",
                C::Combat,
                NumberField::BaseAttackBonus,
                r(0.0, 30.0, 1.0),
            ),
            D::residual_range(
                CMB,
                "Combat Maneuver Bonus",
                C::Combat,
                NumberField::CombatManeuverBonus,
                r(-10.0, 40.0, 1.0),
            ),
            D::residual_range(
                CMD,
                "Combat Maneuver Defense",
                C::Combat,
                NumberField::CombatManeuverDefense,
                r(1.0, 50.0, 1.0),
            ),
            D::residual_range(
                SPACE,
                "Space",
                C::Combat,
                NumberField::Space,
                r(0.0, 30.0, 5.0),
            ),
            D::residual_range(
                REACH,
                "Reach",
                C::Combat,
                NumberField::Reach,
                r(0.0, 30.0, 5.0),
            ),
            D::residual_range(
                FORT,
                "Fortitude Save",
                C::Saves,
                NumberField::Fortitude,
                r(-5.0, 30.0, 1.0),
            ),
            D::residual_range(
                REF,
                "Reflex Save",
                C::Saves,
                NumberField::Reflex,
                r(-5.0, 30.0, 1.0),
            ),
            D::residual_range(
                WILL,
                "Will Save",
                C::Saves,
                NumberField::Will,
                r(-5.0, 30.0, 1.0),
            ),
            D::residual_range(
                STR,
                "Strength",
                C::Abilities,
                NumberField::Strength,
                r(1.0, 50.0, 1.0),
            ),
            D::residual_range(
                DEX,
                "Dexterity",
                C::Abilities,
                NumberField::Dexterity,
                r(1.0, 50.0, 1.0),
            ),
            D::residual_range(
                CON,
                "Constitution",
                C::Abilities,
                NumberField::Constitution,
                r(1.0, 50.0, 1.0),
            ),
            D::residual_range(
                INT,
                "Intelligence",
                C::Abilities,
                NumberField::Intelligence,
                r(1.0, 50.0, 1.0),
            ),
            D::residual_range(
                WIS,
                "Wisdom",
                C::Abilities,
                NumberField::Wisdom,
                r(1.0, 50.0, 1.0),
            ),
            D::residual_range(
                CHA,
                "Charisma",
                C::Abilities,
                NumberField::Charisma,
                r(1.0, 50.0, 1.0),
            ),
            D::residual_range(
                BASE_SPEED,
                "Base Speed",
                C::Movement,
                NumberField::BaseSpeed,
                r(0.0, 200.0, 5.0),
            ),
            D::residual_range(
                BURROW_SPEED,
                "Burrow Speed",
                C::Movement,
                NumberField::BurrowSpeed,
                r(5.0, 100.0, 5.0),
            ),
            D::residual_range(
                CLIMB_SPEED,
                "Climb Speed",
                C::Movement,
                NumberField::ClimbSpeed,
                r(5.0, 100.0, 5.0),
            ),
            D::residual_range(
                FLY_SPEED,
                "Fly Speed",
                C::Movement,
                NumberField::FlySpeed,
                r(10.0, 300.0, 5.0),
            ),
            D::residual_range(
                SWIM_SPEED,
                "Swim Speed",
                C::Movement,
                NumberField::SwimSpeed,
                r(5.0, 100.0, 5.0),
            ),
            D::multi_select(
                MOVEMENT_TYPES,
                "Movement Types",
                C::Movement,
                Accessor::List(ListField::MovementTypes),
            ),
            D::residual_range(
                SR,
                "Spell Resistance",
                C::Defenses,
                NumberField::SpellResistance,
                r(5.0, 40.0, 1.0),
            ),
            D::multi_select(
                DEFENSIVE_ABILITIES,
                "Defensive Abilities",
                C::Defenses,
                Accessor::List(ListField::DefensiveAbilities),
            ),
            D::multi_select(
                DR_TYPES,
                "DR Types",
                C::Defenses,
                Accessor::List(ListField::DamageReductionTypes),
            ),
            D::residual_range(
                DR_AMOUNT,
                "DR Amount",
                C::Defenses,
                NumberField::DamageReductionAmount,
                r(1.0, 30.0, 1.0),
            ),
            D::multi_select(
                RESISTANCE_TYPES,
                "Resistance Types",
                C::Defenses,
                Accessor::List(ListField::ResistanceTypes),
            ),
            D::residual_range(
                RESISTANCE_AMOUNT,
                "Resistance Amount",
                C::Defenses,
                NumberField::ResistanceAmount,
                r(5.0, 30.0, 5.0),
            ),
            D::multi_select(
                IMMUNITIES,
                "Immunities",
                C::Defenses,
                Accessor::List(ListField::Immunities),
            ),
            D::multi_select(
                WEAKNESSES,
                "Weaknesses",
                C::Defenses,
                Accessor::List(ListField::Weaknesses),
            ),
            D::multi_select(
                SPECIAL_ABILITIES,
                "Special Abilities",
                C::Special,
                Accessor::List(ListField::SpecialAbilities),
            ),
            D::multi_select(FEATS, "Feats", C::Special, Accessor::List(ListField::Feats)),
            D::multi_select(
                LANGUAGES,
                "Languages",
                C::Environment,
                Accessor::List(ListField::Languages),
            ),
            D::multi_select(
                ENVIRONMENT,
                "Environment",
                C::Environment,
                Accessor::Text(TextField::Environment),
            ),
            D::multi_select(
                SENSES,
                "Senses",
                C::Environment,
                Accessor::List(ListField::Senses),
            ),
            D::boolean(
                HAS_MELEE_ATTACKS,
                "Has Melee Attacks",
                C::Attacks,
                FlagField::MeleeAttacks,
            ),
            D::boolean(
                HAS_RANGED_ATTACKS,
                "Has Ranged Attacks",
                C::Attacks,
                FlagField::RangedAttacks,
            ),
            D::boolean(
                HAS_SPECIAL_ATTACKS,
                "Has Special Attacks",
                C::Attacks,
                FlagField::SpecialAttacks,
            ),
            D::boolean(HAS_SPELLS, "Has Spells", C::Special, FlagField::Spells),
            D::boolean(
                HAS_SPELL_LIKE_ABILITIES,
                "Has Spell-Like Abilities",
                C::Special,
                FlagField::SpellLikeAbilities,
            ),
            D::boolean(
                HAS_PSYCHIC_MAGIC,
                "Has Psychic Magic",
                C::Special,
                FlagField::PsychicMagic,
            ),
            D::boolean(
                HAS_REGENERATION,
                "Has Regeneration",
                C::Special,
                FlagField::Regeneration,
            ),
            D::boolean(
                HAS_FAST_HEALING,
                "Has Fast Healing",
                C::Special,
                FlagField::FastHealing,
            ),
            D::boolean(HAS_AURAS, "Has Auras", C::Special, FlagField::Auras),
        ])
    }

    /// Number of definitions.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Returns `true` if the catalog has no definitions.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// All definitions in declaration order.
    #[inline(always)]
    pub fn definitions(&self) -> &[FilterDefinition] {
        &self.definitions
    }

    /// Iterates definitions in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &FilterDefinition> {
        self.definitions.iter()
    }

    /// Position of the definition with this key.
    pub fn position(&self, key: &str) -> Option<usize> {
        self.definitions.iter().position(|d| d.key == key)
    }

    /// Looks up a definition by key.
    pub fn get(&self, key: &str) -> Option<&FilterDefinition> {
        self.definitions.iter().find(|d| d.key == key)
    }

    /// Definitions of one kind.
    pub fn of_kind(&self, kind: FilterKind) -> impl Iterator<Item = &FilterDefinition> {
        self.definitions.iter().filter(move |d| d.kind == kind)
    }
}
