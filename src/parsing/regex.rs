use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Classification tokens, checked in this order
    pub static ref RE_ATTACK: Regex = Regex::new(r"(?i)\battacks\b").unwrap();
    pub static ref RE_DAMAGE: Regex = Regex::new(r"(?i)\bdamage\b").unwrap();
    pub static ref RE_REMAINING: Regex = Regex::new(r"(?i)\bremaining\b").unwrap();

    // Damage phrasings tried after the positional split fails; the subject of "took" is the first word
    pub static ref RE_TOOK_DAMAGE: Regex = Regex::new(r"(?i)^(?P<target>\S+)\s+(?:.*\s)?(?:took|takes)\s+(?P<amount>\d+)\s+damage\b").unwrap();
    pub static ref RE_DAMAGE_TO: Regex = Regex::new(r"(?i)\b(?P<amount>\d+)\s+damage\s+to\s+(?P<target>\S+)").unwrap();

    pub static ref RE_LEADING_AMOUNT: Regex = Regex::new(r"^(?P<amount>\d+)").unwrap();
}
