//! Effect resolution.
//!
//! `EffectResolver` applies one generic `Effect` to a caster/enemy player
//! pair and returns the log line describing what happened. It never looks
//! past the two `PlayerState`s it is handed: no catalog, no RNG, no other
//! snapshot fields.
//!
//! Units killed by `Sweep` are left on the board with health at or below
//! zero; the dispatcher buries them once the whole command has resolved.

use crate::core::{DrawOutcome, MatchRules, PlayerState};

use super::{Effect, Side};

/// Applies generic effects to player state.
pub struct EffectResolver;

impl EffectResolver {
    /// Resolve one effect and describe it.
    pub fn resolve(
        caster: &mut PlayerState,
        enemy: &mut PlayerState,
        effect: &Effect,
        rules: &MatchRules,
    ) -> String {
        match effect {
            Effect::Damage { amount, side } => {
                let target = Self::pick(caster, enemy, *side);
                target.life -= amount;
                format!("{} takes {} damage.", target.name, amount)
            }

            Effect::Heal { amount, side } => {
                let target = Self::pick(caster, enemy, *side);
                let before = target.life;
                target.heal(*amount);
                format!("{} heals {}.", target.name, target.life - before)
            }

            Effect::Draw { count, side } => {
                let target = Self::pick(caster, enemy, *side);
                Self::draw(target, *count, rules.hand_limit)
            }

            Effect::GainMana { amount } => {
                caster.mana = (caster.mana + amount).min(rules.mana_cap);
                format!("{} gains {} mana.", caster.name, amount)
            }

            Effect::LockMana { amount } => {
                enemy.locked_mana += amount;
                format!("{} will refill {} less mana.", enemy.name, amount)
            }

            Effect::BlockSynergy { turns } => {
                enemy.synergy_block_turns = enemy.synergy_block_turns.max(*turns);
                format!("{}'s synergies are blocked.", enemy.name)
            }

            Effect::BlockAttacks { turns } => {
                enemy.attack_block_turns = enemy.attack_block_turns.max(*turns);
                format!("{} cannot attack units.", enemy.name)
            }

            Effect::Protect { turns } => {
                caster.protection_turns = caster.protection_turns.max(*turns);
                format!("{}'s units are protected.", caster.name)
            }

            Effect::Rally { amount } => {
                caster.rally_bonus += amount;
                format!("{}'s attackers deal +{} this turn.", caster.name, amount)
            }

            Effect::Sweep { amount } => {
                let floored: Vec<i32> = enemy
                    .board
                    .iter()
                    .map(|unit| enemy.health_after(unit.health, *amount))
                    .collect();
                for (unit, health) in enemy.board.iter_mut().zip(floored) {
                    unit.health = health;
                }
                format!("{} damage to each of {}'s units.", amount, enemy.name)
            }
        }
    }

    fn pick<'a>(
        caster: &'a mut PlayerState,
        enemy: &'a mut PlayerState,
        side: Side,
    ) -> &'a mut PlayerState {
        match side {
            Side::Caster => caster,
            Side::Enemy => enemy,
        }
    }

    fn draw(player: &mut PlayerState, count: u32, hand_limit: usize) -> String {
        let mut kept = 0;
        let mut burned = 0;
        for _ in 0..count {
            match player.draw(hand_limit) {
                DrawOutcome::Kept => kept += 1,
                DrawOutcome::Burned => burned += 1,
                DrawOutcome::Empty => break,
            }
        }

        match burned {
            0 => format!("{} draws {}.", player.name, kept),
            _ => format!(
                "{} draws {} and burns {} (hand full).",
                player.name, kept, burned
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{BoardUnit, CardInstance, CardTemplate};
    use crate::core::{InstanceId, PlayerId};

    fn players() -> (PlayerState, PlayerState) {
        (
            PlayerState::new(PlayerId::FIRST, "Ann", 20),
            PlayerState::new(PlayerId::SECOND, "Bo", 20),
        )
    }

    fn card(id: u32) -> CardInstance {
        CardInstance::new(InstanceId(id), CardTemplate::unit("u", "Unit", 1, 2, 3))
    }

    #[test]
    fn test_damage_enemy() {
        let (mut a, mut b) = players();
        let line = EffectResolver::resolve(&mut a, &mut b, &Effect::damage(5), &MatchRules::default());
        assert_eq!(b.life, 15);
        assert_eq!(a.life, 20);
        assert_eq!(line, "Bo takes 5 damage.");
    }

    #[test]
    fn test_heal_is_capped() {
        let (mut a, mut b) = players();
        a.life = 18;
        let line = EffectResolver::resolve(&mut a, &mut b, &Effect::heal(5), &MatchRules::default());
        assert_eq!(a.life, 20);
        assert_eq!(line, "Ann heals 2.");
    }

    #[test]
    fn test_draw_burns_past_limit() {
        let (mut a, mut b) = players();
        for i in 0..3 {
            a.deck.push_back(card(i));
        }
        a.hand.push_back(card(10));

        let rules = MatchRules::default().with_hand_limit(2);
        EffectResolver::resolve(&mut a, &mut b, &Effect::draw(3), &rules);

        assert_eq!(a.hand.len(), 2);
        assert_eq!(a.discard.len(), 2);
        assert!(a.deck.is_empty());
    }

    #[test]
    fn test_gain_mana_respects_cap() {
        let (mut a, mut b) = players();
        a.mana = 11;
        EffectResolver::resolve(&mut a, &mut b, &Effect::GainMana { amount: 3 }, &MatchRules::default());
        assert_eq!(a.mana, 12);
    }

    #[test]
    fn test_status_counters_land_on_the_right_side() {
        let (mut a, mut b) = players();
        let rules = MatchRules::default();
        EffectResolver::resolve(&mut a, &mut b, &Effect::LockMana { amount: 2 }, &rules);
        EffectResolver::resolve(&mut a, &mut b, &Effect::BlockSynergy { turns: 1 }, &rules);
        EffectResolver::resolve(&mut a, &mut b, &Effect::Protect { turns: 1 }, &rules);
        EffectResolver::resolve(&mut a, &mut b, &Effect::Rally { amount: 2 }, &rules);

        assert_eq!(b.locked_mana, 2);
        assert_eq!(b.synergy_block_turns, 1);
        assert_eq!(a.protection_turns, 1);
        assert_eq!(a.rally_bonus, 2);
        assert_eq!(a.locked_mana, 0);
    }

    #[test]
    fn test_sweep_respects_protection() {
        let (mut a, mut b) = players();
        b.board.push_back(BoardUnit::summon(card(1), 1));
        b.board.push_back(BoardUnit::summon(card(2), 1));
        b.protection_turns = 1;

        EffectResolver::resolve(&mut a, &mut b, &Effect::Sweep { amount: 5 }, &MatchRules::default());
        assert!(b.board.iter().all(|u| u.health == 1));

        b.protection_turns = 0;
        EffectResolver::resolve(&mut a, &mut b, &Effect::Sweep { amount: 5 }, &MatchRules::default());
        assert!(b.board.iter().all(|u| u.is_dead()));
    }
}
