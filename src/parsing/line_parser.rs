use crate::parsing::regex::*;

/// Structured meaning of one transcript line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogEvent {
    Attack { actor: String },
    Damage { target: String, amount: u32 },
    TurnEnd,
    Narrative,
}

const NAME_PUNCTUATION: &[char] = &['!', '.', ',', ':', ';', '?', '\'', '"', '(', ')'];

/// Case-insensitive name comparison used for every attribution.
pub fn names_match(a: &str, b: &str) -> bool {
    let a = a.trim();
    let b = b.trim();
    !a.is_empty() && a.to_lowercase() == b.to_lowercase()
}

pub fn clean_name(token: &str) -> &str {
    token.trim_matches(|c: char| NAME_PUNCTUATION.contains(&c))
}

fn parse_amount(token: &str) -> Option<u32> {
    let caps = RE_LEADING_AMOUNT.captures(token)?;
    caps["amount"].parse().ok()
}

/// Decodes a line into a [`LogEvent`]. First match wins: attack, damage, remaining.
/// Lines that look like damage but cannot be decoded are narrative.
pub fn classify_line(line: &str) -> LogEvent {
    if RE_ATTACK.is_match(line) {
        let actor = line.split_whitespace().next().map(clean_name).unwrap_or("");
        return LogEvent::Attack { actor: actor.to_string() };
    }

    if RE_DAMAGE.is_match(line) {
        return parse_damage(line).unwrap_or(LogEvent::Narrative);
    }

    if RE_REMAINING.is_match(line) {
        return LogEvent::TurnEnd;
    }

    LogEvent::Narrative
}

fn parse_damage(line: &str) -> Option<LogEvent> {
    // "<attacker> hits <target> for <n> damage": target at 2, amount at 4
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if let (Some(target), Some(amount)) = (tokens.get(2), tokens.get(4)) {
        let target = clean_name(target);
        if let Some(amount) = parse_amount(amount) {
            if target.chars().any(char::is_alphabetic) {
                return Some(LogEvent::Damage { target: target.to_string(), amount });
            }
        }
    }

    for re in [&*RE_TOOK_DAMAGE, &*RE_DAMAGE_TO] {
        if let Some(caps) = re.captures(line) {
            let target = clean_name(&caps["target"]);
            if !target.is_empty() {
                if let Ok(amount) = caps["amount"].parse::<u32>() {
                    return Some(LogEvent::Damage { target: target.to_string(), amount });
                }
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn damage(target: &str, amount: u32) -> LogEvent {
        LogEvent::Damage { target: target.to_string(), amount }
    }

    #[test]
    fn attack_extracts_first_token() {
        assert_eq!(classify_line("Bulbasaur attacks!"), LogEvent::Attack { actor: "Bulbasaur".into() });
        assert_eq!(classify_line("pikachu ATTACKS with Thunderbolt"), LogEvent::Attack { actor: "pikachu".into() });
    }

    #[test]
    fn attack_wins_over_damage() {
        assert_eq!(
            classify_line("Squirtle attacks Pikachu for 20 damage"),
            LogEvent::Attack { actor: "Squirtle".into() }
        );
    }

    #[test]
    fn positional_damage() {
        assert_eq!(classify_line("Squirtle hits Pikachu for 20 damage"), damage("Pikachu", 20));
        assert_eq!(classify_line("Squirtle hits pikachu, for 12 damage!"), damage("pikachu", 12));
    }

    #[test]
    fn numeric_token_is_not_a_target() {
        assert_eq!(classify_line("It dealt 30 damage at 9 power"), LogEvent::Narrative);
    }

    #[test]
    fn took_damage_phrasing() {
        assert_eq!(classify_line("Charmander took 15 damage."), damage("Charmander", 15));
        assert_eq!(classify_line("Pikachu takes 3 damage"), damage("Pikachu", 3));
        assert_eq!(classify_line("Charmander was hit and took 9 damage"), damage("Charmander", 9));
    }

    #[test]
    fn damage_to_phrasing() {
        assert_eq!(classify_line("Bulbasaur deals 9 damage to Charmander!"), damage("Charmander", 9));
    }

    #[test]
    fn undecodable_damage_is_narrative() {
        assert_eq!(classify_line("No damage was dealt."), LogEvent::Narrative);
        assert_eq!(classify_line("damage"), LogEvent::Narrative);
    }

    #[test]
    fn remaining_is_turn_end() {
        assert_eq!(classify_line("Charmander has 5 HP remaining."), LogEvent::TurnEnd);
    }

    #[test]
    fn damage_wins_over_remaining() {
        assert_eq!(
            classify_line("Charmander took 5 damage, 15 HP remaining"),
            damage("Charmander", 5)
        );
    }

    #[test]
    fn tokens_are_whole_words() {
        assert_eq!(classify_line("Charmander was damaged by the burn."), LogEvent::Narrative);
        assert_eq!(classify_line("Battle between eevee and ditto begins!"), LogEvent::Narrative);
        assert_eq!(classify_line("Bulbasaur wins!"), LogEvent::Narrative);
    }

    #[test]
    fn name_matching_ignores_case_and_padding() {
        assert!(names_match("Charizard", "charizard"));
        assert!(names_match(" MEW ", "mew"));
        assert!(!names_match("Mew", "Mewtwo"));
        assert!(!names_match("", ""));
    }
}
