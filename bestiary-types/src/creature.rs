//! Creature records.
//!
//! The record shape mirrors the finalized dataset emitted by the upstream
//! cleaning step: numeric fields are already coerced where derivable and
//! list fields are arrays. Everything is optional at the serde level so that
//! a record missing one block still loads; the filter accessors treat absent
//! data as "no value" rather than failing.

use core::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// A creature statblock.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Creature {
    /// Stable, unique identity key.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Creature type, e.g. "dragon" or "magical beast".
    #[serde(rename = "type")]
    pub creature_type: Option<String>,
    /// Size category on the Fine → Colossal scale.
    pub size: Option<String>,
    /// Alignment string, e.g. "CE" or "Usually NG".
    pub alignment: Option<String>,
    /// Environment description, e.g. "temperate forests".
    pub environment: Option<String>,

    /// Numeric challenge rating, if the upstream step could derive it.
    pub challenge_rating: Option<f64>,
    /// Display form of the challenge rating, e.g. "1/2".
    pub challenge_rating_display: Option<String>,
    /// Mythic rank.
    pub mythic_rank: Option<f64>,
    /// Experience point award.
    pub experience_points: Option<f64>,

    /// Total armor class.
    pub armor_class: Option<f64>,
    /// Touch armor class.
    pub touch_ac: Option<f64>,
    /// Flat-footed armor class.
    pub flat_footed_ac: Option<f64>,
    /// Fortitude save bonus.
    pub fortitude: Option<f64>,
    /// Reflex save bonus.
    pub reflex: Option<f64>,
    /// Will save bonus.
    pub will: Option<f64>,
    /// Base attack bonus.
    pub base_attack_bonus: Option<f64>,
    /// Combat maneuver bonus.
    pub combat_maneuver_bonus: Option<f64>,
    /// Combat maneuver defense.
    pub combat_maneuver_defense: Option<f64>,
    /// Initiative modifier.
    pub initiative: Option<f64>,
    /// Numeric spell resistance.
    pub spell_resistance: Option<f64>,
    /// Space in feet.
    pub space: Option<f64>,
    /// Reach in feet.
    pub reach: Option<f64>,

    /// Hit point block.
    pub hit_points: HitPoints,
    /// Movement speeds.
    pub speeds: Speeds,
    /// The six ability scores.
    pub ability_scores: AbilityScores,
    /// Attack entries by category.
    pub attacks: Attacks,

    /// Subtypes, e.g. "fire", "extraplanar".
    #[serde(deserialize_with = "nullable_list")]
    pub subtypes: Vec<String>,
    /// Spoken or understood languages.
    #[serde(deserialize_with = "nullable_list")]
    pub languages: Vec<String>,
    /// Named special abilities.
    #[serde(deserialize_with = "nullable_list")]
    pub special_abilities: Vec<SpecialAbility>,
    /// Defensive abilities, e.g. "channel resistance +4".
    #[serde(deserialize_with = "nullable_list")]
    pub defensive_abilities: Vec<String>,
    /// Immunities.
    #[serde(deserialize_with = "nullable_list")]
    pub immunities: Vec<String>,
    /// Weaknesses.
    #[serde(deserialize_with = "nullable_list")]
    pub weaknesses: Vec<String>,
    /// Sense types, e.g. "darkvision", "scent".
    #[serde(deserialize_with = "nullable_list")]
    pub senses: Vec<String>,
    /// Damage reduction entries.
    #[serde(deserialize_with = "nullable_list")]
    pub damage_reduction: Vec<DamageReduction>,
    /// Energy resistances.
    #[serde(deserialize_with = "nullable_list")]
    pub resistances: Vec<Resistance>,
    /// Source books the statblock appears in.
    #[serde(deserialize_with = "nullable_list")]
    pub sources: Vec<Source>,
    /// Feats.
    #[serde(deserialize_with = "nullable_list")]
    pub feats: Vec<String>,
    /// Prepared or known spells.
    #[serde(deserialize_with = "nullable_list")]
    pub spells: Vec<String>,
    /// Spell-like abilities.
    #[serde(deserialize_with = "nullable_list")]
    pub spell_like_abilities: Vec<String>,
    /// Psychic magic entries.
    #[serde(deserialize_with = "nullable_list")]
    pub psychic_magic: Vec<String>,
    /// Auras.
    #[serde(deserialize_with = "nullable_list")]
    pub auras: Vec<String>,

    /// One-line description.
    pub description_short: Option<String>,
    /// Full description.
    pub description_long: Option<String>,
}

/// Hit point block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HitPoints {
    /// Total hit points.
    pub total: Option<f64>,
    /// Regeneration amount per round.
    pub regeneration: Option<f64>,
    /// Fast healing amount per round.
    pub fast_healing: Option<f64>,
}

/// Movement speeds in feet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Speeds {
    /// Land speed.
    pub base: Option<f64>,
    /// Burrow speed.
    pub burrow: Option<f64>,
    /// Climb speed.
    pub climb: Option<f64>,
    /// Fly speed.
    pub fly: Option<f64>,
    /// Swim speed.
    pub swim: Option<f64>,
    /// Any other named movement modes, e.g. "jet" or "earth glide".
    #[serde(deserialize_with = "nullable_list")]
    pub other: Vec<String>,
}

/// Ability scores. A creature without a score (e.g. an undead's CON) has `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AbilityScores {
    /// Strength score.
    #[serde(alias = "STR")]
    pub strength: Option<f64>,
    /// Dexterity score.
    #[serde(alias = "DEX")]
    pub dexterity: Option<f64>,
    /// Constitution score.
    #[serde(alias = "CON")]
    pub constitution: Option<f64>,
    /// Intelligence score.
    #[serde(alias = "INT")]
    pub intelligence: Option<f64>,
    /// Wisdom score.
    #[serde(alias = "WIS")]
    pub wisdom: Option<f64>,
    /// Charisma score.
    #[serde(alias = "CHA")]
    pub charisma: Option<f64>,
}

/// Attack entries by category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Attacks {
    /// Melee attack lines.
    #[serde(deserialize_with = "nullable_list")]
    pub melee: Vec<String>,
    /// Ranged attack lines.
    #[serde(deserialize_with = "nullable_list")]
    pub ranged: Vec<String>,
    /// Special attacks.
    #[serde(deserialize_with = "nullable_list")]
    pub special: Vec<String>,
}

/// A named special ability.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpecialAbility {
    /// Ability name, e.g. "Regeneration".
    pub name: String,
    /// Rules text.
    pub description: Option<String>,
}

/// One damage reduction entry, e.g. "10/cold iron and good".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DamageReduction {
    /// Points of damage ignored.
    pub amount: Option<f64>,
    /// Materials or alignments that bypass the reduction.
    #[serde(deserialize_with = "nullable_list")]
    pub types: Vec<String>,
}

/// One energy resistance, e.g. "fire 10".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Resistance {
    /// Energy kind.
    #[serde(alias = "type")]
    pub kind: String,
    /// Points resisted.
    pub amount: Option<f64>,
}

/// A source book reference.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Source {
    /// Book title.
    pub name: String,
    /// Page number.
    pub page: Option<u32>,
}

fn nullable_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[inline(always)]
fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

impl Creature {
    /// Numeric challenge rating.
    ///
    /// Falls back to parsing the display string when the numeric field is
    /// absent, so a record carrying only `"1/2"` still lands at 0.5.
    pub fn challenge_rating(&self) -> Option<f64> {
        finite(self.challenge_rating).or_else(|| {
            self.challenge_rating_display
                .as_deref()
                .and_then(parse_challenge_rating)
        })
    }

    /// Display form of the challenge rating, `"-"` when unknown.
    pub fn challenge_rating_label(&self) -> String {
        match self.challenge_rating_display.as_deref() {
            Some(display) if !display.trim().is_empty() => display.trim().to_string(),
            _ => self
                .challenge_rating()
                .map(format_challenge_rating)
                .unwrap_or_else(|| "-".to_string()),
        }
    }

    /// Parsed size category.
    pub fn size_class(&self) -> Option<Size> {
        self.size.as_deref().and_then(Size::parse)
    }

    /// Returns `true` if a special ability with this name exists (case-insensitive).
    pub fn has_special_ability(&self, name: &str) -> bool {
        self.special_abilities
            .iter()
            .any(|a| a.name.trim().eq_ignore_ascii_case(name))
    }

    /// Largest damage reduction amount across all entries.
    pub fn damage_reduction_amount(&self) -> Option<f64> {
        max_finite(self.damage_reduction.iter().map(|dr| dr.amount))
    }

    /// Largest energy resistance amount.
    pub fn resistance_amount(&self) -> Option<f64> {
        max_finite(self.resistances.iter().map(|r| r.amount))
    }
}

fn max_finite(values: impl Iterator<Item = Option<f64>>) -> Option<f64> {
    values
        .filter_map(finite)
        .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |a| a.max(v))))
}

/// Parses a challenge rating display string.
///
/// Accepts integers, decimals and vulgar fractions, optionally prefixed with
/// "CR". Returns `None` for placeholders such as `"-"` or unparseable input.
///
/// # Example
/// ```
/// use bestiary_types::parse_challenge_rating;
///
/// assert_eq!(parse_challenge_rating("1/2"), Some(0.5));
/// assert_eq!(parse_challenge_rating("CR 7"), Some(7.0));
/// assert_eq!(parse_challenge_rating("-"), None);
/// ```
pub fn parse_challenge_rating(display: &str) -> Option<f64> {
    let mut text = display.trim();
    if text.get(..2).is_some_and(|prefix| prefix.eq_ignore_ascii_case("cr")) {
        text = text[2..].trim_start();
    }
    if text.is_empty() {
        return None;
    }

    let value = match text.split_once('/') {
        Some((num, den)) => {
            let num: f64 = num.trim().parse().ok()?;
            let den: f64 = den.trim().parse().ok()?;
            if den == 0.0 {
                return None;
            }
            num / den
        }
        None => text.parse().ok()?,
    };

    value.is_finite().then_some(value)
}

/// Formats a numeric challenge rating the way statblocks print it.
///
/// Common fractional ratings become vulgar fractions (`0.5` → `"1/2"`);
/// whole ratings print without a decimal point.
pub fn format_challenge_rating(value: f64) -> String {
    const DENOMINATORS: [u32; 5] = [2, 3, 4, 6, 8];

    if value > 0.0 && value < 1.0 {
        for den in DENOMINATORS {
            if (value - 1.0 / den as f64).abs() < 1e-6 {
                return format!("1/{den}");
            }
        }
    }
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

/// Size category on the nine-step Fine → Colossal scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
#[allow(missing_docs)]
pub enum Size {
    Fine = 0,
    Diminutive = 1,
    Tiny = 2,
    Small = 3,
    Medium = 4,
    Large = 5,
    Huge = 6,
    Gargantuan = 7,
    Colossal = 8,
}

impl Size {
    /// All sizes, smallest first.
    pub const ALL: [Size; 9] = [
        Size::Fine,
        Size::Diminutive,
        Size::Tiny,
        Size::Small,
        Size::Medium,
        Size::Large,
        Size::Huge,
        Size::Gargantuan,
        Size::Colossal,
    ];

    /// Parses a size name case-insensitively.
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|size| size.as_str().eq_ignore_ascii_case(name))
    }

    /// Canonical capitalized name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Size::Fine => "Fine",
            Size::Diminutive => "Diminutive",
            Size::Tiny => "Tiny",
            Size::Small => "Small",
            Size::Medium => "Medium",
            Size::Large => "Large",
            Size::Huge => "Huge",
            Size::Gargantuan => "Gargantuan",
            Size::Colossal => "Colossal",
        }
    }

    /// Position on the scale, 0 for Fine.
    #[inline(always)]
    pub const fn ordinal(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
