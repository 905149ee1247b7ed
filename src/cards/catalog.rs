//! The standard card set.
//!
//! A compact catalog that exercises every effect kind, named ability,
//! unit special and interaction mode the engine supports. It is built once
//! on first use and shared for the life of the process.

use once_cell::sync::Lazy;

use super::definition::{CardTemplate, PermanentBonus, Rarity, School, Special};
use super::instance::SilenceScope;
use super::registry::CardCatalog;
use crate::effects::{Effect, InteractionKind, NamedAbility, UnitSpecial};

/// Id of the token a lethal hex leaves behind.
pub const INERT_HUSK: &str = "inert_husk";

static STANDARD: Lazy<CardCatalog> = Lazy::new(build_standard);

/// The shared standard catalog.
#[must_use]
pub fn standard_catalog() -> &'static CardCatalog {
    &STANDARD
}

/// The husk token template.
#[must_use]
pub fn inert_husk() -> CardTemplate {
    CardTemplate::unit(INERT_HUSK, "Inert Husk", 0, 0, 1)
        .with_text("What remains after a hex.")
        .token()
}

fn build_standard() -> CardCatalog {
    use School::*;

    let mut catalog = CardCatalog::new();
    let mut add = |template: CardTemplate| catalog.register(template);

    // Cheap units
    add(CardTemplate::unit("ember_whelp", "Ember Whelp", 1, 2, 1).with_schools(&[Flame]));
    add(CardTemplate::unit("tide_sprite", "Tide Sprite", 1, 1, 2).with_schools(&[Tide]));
    add(CardTemplate::unit("grove_sapling", "Grove Sapling", 1, 1, 3).with_schools(&[Grove]));
    add(CardTemplate::unit("gutter_rat", "Gutter Rat", 1, 2, 1).with_schools(&[Shadow]));
    add(CardTemplate::unit("iron_recruit", "Iron Recruit", 2, 2, 3).with_schools(&[Iron]));

    // Midrange units
    add(CardTemplate::unit("flame_lancer", "Flame Lancer", 3, 4, 2)
        .with_schools(&[Flame, Iron])
        .with_charge()
        .with_text("Charge."));
    add(CardTemplate::unit("tide_caller", "Tide Caller", 3, 2, 4)
        .with_schools(&[Tide, Arcane])
        .with_effect(Effect::draw(1))
        .with_text("Draw a card."));
    add(CardTemplate::unit("grove_warden", "Grove Warden", 4, 3, 6)
        .with_schools(&[Grove, Iron])
        .with_rarity(Rarity::Rare));
    add(CardTemplate::unit("shadow_stalker", "Shadow Stalker", 3, 3, 3)
        .with_schools(&[Shadow])
        .with_charge()
        .with_text("Charge."));
    add(CardTemplate::unit("storm_drake", "Storm Drake", 5, 5, 5)
        .with_schools(&[Flame, Tide])
        .with_rarity(Rarity::Rare));
    add(CardTemplate::unit("stone_colossus", "Stone Colossus", 6, 6, 8)
        .with_schools(&[Iron])
        .with_rarity(Rarity::Epic));

    // Units with activated specials
    add(CardTemplate::unit("arcane_adept", "Arcane Adept", 2, 2, 2)
        .with_schools(&[Arcane])
        .with_special(Special::Activated(UnitSpecial::Volley { amount: 1 }))
        .with_text("Once per turn: deal 1 damage to the enemy player."));
    add(CardTemplate::unit("war_drummer", "War Drummer", 3, 2, 3)
        .with_schools(&[Iron])
        .with_special(Special::Activated(UnitSpecial::Rally { amount: 1 }))
        .with_text("Once per turn: your attackers deal +1 this turn."));
    add(CardTemplate::unit("spring_healer", "Spring Healer", 2, 1, 3)
        .with_schools(&[Grove, Tide])
        .with_special(Special::Activated(UnitSpecial::Mend { amount: 2 }))
        .with_text("Once per turn: heal 2."));

    // Units with on-play abilities
    add(CardTemplate::unit("chaos_imp", "Chaos Imp", 2, 0, 0)
        .with_schools(&[Shadow, Arcane])
        .with_special(Special::OnPlay(NamedAbility::ChaosStats { min: 1, max: 5 }))
        .with_text("Enters with random attack and health from 1 to 5."));
    add(CardTemplate::unit("twin_blade", "Twin Blade", 3, 3, 2)
        .with_schools(&[Iron, Shadow])
        .with_special(Special::OnPlay(NamedAbility::DoubleStrike))
        .with_text("Your cheapest unit may attack twice this turn."));
    add(CardTemplate::unit("tide_scholar", "Tide Scholar", 3, 2, 2)
        .with_schools(&[Arcane])
        .with_special(Special::OnPlay(NamedAbility::Tutor {
            first: Flame,
            second: Tide,
        }))
        .with_text("Draw a Flame card and a Tide card from your deck."));
    add(CardTemplate::unit("relic_hunter", "Relic Hunter", 4, 3, 3)
        .with_schools(&[Arcane, Shadow])
        .with_rarity(Rarity::Epic)
        .with_special(Special::OnPlay(NamedAbility::DrawLegendary))
        .with_text("Add a random legendary card to your hand."));

    // Legendaries
    add(CardTemplate::unit("inferno_titan", "Inferno Titan", 8, 8, 8)
        .with_schools(&[Flame])
        .with_rarity(Rarity::Legendary)
        .with_effect(Effect::damage(4))
        .with_text("Deal 4 damage to the enemy player."));
    add(CardTemplate::unit("abyssal_leviathan", "Abyssal Leviathan", 7, 7, 9)
        .with_schools(&[Tide])
        .with_rarity(Rarity::Legendary)
        .with_effect(Effect::draw(1))
        .with_text("Draw a card."));
    add(CardTemplate::unit("elder_treant", "Elder Treant", 7, 6, 10)
        .with_schools(&[Grove])
        .with_rarity(Rarity::Legendary)
        .with_effect(Effect::heal(10))
        .with_text("Heal 10."));

    // Generic spells
    add(CardTemplate::spell("fire_bolt", "Fire Bolt", 2)
        .with_schools(&[Flame])
        .with_effect(Effect::damage(5))
        .with_text("Deal 5 damage to the enemy player."));
    add(CardTemplate::spell("mending_rain", "Mending Rain", 2)
        .with_schools(&[Tide])
        .with_effect(Effect::heal(8))
        .with_text("Heal 8."));
    add(CardTemplate::spell("insight", "Insight", 3)
        .with_schools(&[Arcane])
        .with_effect(Effect::draw(2))
        .with_text("Draw 2 cards."));
    add(CardTemplate::spell("mana_surge", "Mana Surge", 1)
        .with_schools(&[Arcane])
        .with_effect(Effect::GainMana { amount: 2 })
        .with_text("Gain 2 mana this turn."));
    add(CardTemplate::spell("frost_lock", "Frost Lock", 2)
        .with_schools(&[Tide])
        .with_effect(Effect::LockMana { amount: 2 })
        .with_text("Your opponent refills 2 less mana next turn."));
    add(CardTemplate::spell("discord", "Discord", 3)
        .with_schools(&[Shadow])
        .with_effect(Effect::BlockSynergy { turns: 1 })
        .with_text("Enemy synergies are blocked for a turn."));
    add(CardTemplate::spell("thorn_wall", "Thorn Wall", 3)
        .with_schools(&[Grove])
        .with_effect(Effect::BlockAttacks { turns: 1 })
        .with_text("Your opponent cannot attack units next turn."));
    add(CardTemplate::spell("aegis", "Aegis", 3)
        .with_schools(&[Iron])
        .with_effect(Effect::Protect { turns: 1 })
        .with_text("Your units cannot drop below 1 health until your next turn."));
    add(CardTemplate::spell("battle_cry", "Battle Cry", 2)
        .with_schools(&[Iron])
        .with_effect(Effect::Rally { amount: 2 })
        .with_text("Your attackers deal +2 this turn."));
    add(CardTemplate::spell("cinder_storm", "Cinder Storm", 5)
        .with_schools(&[Flame])
        .with_rarity(Rarity::Rare)
        .with_effect(Effect::Sweep { amount: 3 })
        .with_text("Deal 3 damage to every enemy unit."));

    // Targeted spells
    add(CardTemplate::spell("rallying_hymn", "Rallying Hymn", 3)
        .with_special(Special::Targeted(InteractionKind::Empower))
        .with_text("Give up to three of your units +1/+1."));
    add(CardTemplate::spell("iron_blessing", "Iron Blessing", 3)
        .with_schools(&[Iron])
        .with_special(Special::Targeted(InteractionKind::Fortify))
        .with_text("Give one of your units +3/+3."));
    add(CardTemplate::spell("shroud", "Shroud", 1)
        .with_schools(&[Shadow])
        .with_special(Special::Targeted(InteractionKind::Veil))
        .with_text("One of your units cannot be targeted until your next turn."));
    add(CardTemplate::spell("ascension_rite", "Ascension Rite", 4)
        .with_schools(&[Arcane])
        .with_rarity(Rarity::Rare)
        .with_special(Special::Targeted(InteractionKind::Ascend))
        .with_text("At the start of your next turn, one of your units ascends (+3/+3)."));
    add(CardTemplate::spell("withering_hex", "Withering Hex", 3)
        .with_schools(&[Shadow])
        .with_special(Special::Targeted(InteractionKind::Hex { amount: 3 }))
        .with_text("An enemy unit gets -3/-3. If that would kill it, it becomes an Inert Husk."));
    add(CardTemplate::spell("mind_seize", "Mind Seize", 6)
        .with_schools(&[Shadow, Arcane])
        .with_rarity(Rarity::Epic)
        .with_special(Special::Targeted(InteractionKind::Seize))
        .with_text("Take control of an enemy unit until end of turn. It can attack."));
    add(CardTemplate::spell("smite", "Smite", 5)
        .with_schools(&[Flame])
        .with_special(Special::Targeted(InteractionKind::Smite))
        .with_text("Destroy an enemy unit."));
    add(CardTemplate::spell("hush", "Hush", 2)
        .with_schools(&[Arcane])
        .with_special(Special::Targeted(InteractionKind::Silence {
            scope: SilenceScope::Abilities,
        }))
        .with_text("Silence an enemy unit's ability until your next turn."));
    add(CardTemplate::spell("null_field", "Null Field", 4)
        .with_schools(&[Arcane])
        .with_rarity(Rarity::Rare)
        .with_special(Special::Targeted(InteractionKind::Silence {
            scope: SilenceScope::Full,
        }))
        .with_text("An enemy unit is silenced and deals no damage until your next turn."));
    add(CardTemplate::spell("scrying_pool", "Scrying Pool", 1)
        .with_schools(&[Tide])
        .with_special(Special::Targeted(InteractionKind::Foresight { depth: 3 }))
        .with_text("Look at the top 3 cards of your deck. Take one."));

    // Permanents
    add(CardTemplate::permanent("sanctuary", "Sanctuary", 3, PermanentBonus::Heal(2))
        .with_schools(&[Grove])
        .with_text("Heal 2 at the start of your turn."));
    add(CardTemplate::permanent("grand_library", "Grand Library", 4, PermanentBonus::Draw(1))
        .with_schools(&[Arcane])
        .with_rarity(Rarity::Rare)
        .with_text("Draw an extra card at the start of your turn."));
    add(CardTemplate::permanent(
        "flame_forge",
        "Flame Forge",
        3,
        PermanentBonus::SchoolAttack {
            school: Flame,
            amount: 1,
        },
    )
    .with_schools(&[Flame])
    .with_text("Your Flame units deal +1 damage when attacking."));

    add(inert_husk());

    catalog
}
