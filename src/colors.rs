//! Display colors for teams and tyre compounds

/// Color used when a team or compound is not known.
pub const NEUTRAL_COLOR: &str = "#FFFFFF";

const TEAM_COLORS: &[(&str, &str)] = &[
    ("Red Bull Racing", "#3671C6"),
    ("Mercedes", "#6CD3BF"),
    ("Ferrari", "#F91536"),
    ("McLaren", "#F58020"),
    ("Aston Martin", "#358C75"),
    ("Alpine", "#2293D1"),
    ("Williams", "#37BEDD"),
    ("AlphaTauri", "#6692FF"),
    ("Alfa Romeo", "#C92D4B"),
    ("Haas F1 Team", "#B6BABD"),
];

const TYRE_COLORS: &[(&str, &str)] = &[
    ("SOFT", "#FF0000"),
    ("MEDIUM", "#FFF200"),
    ("HARD", "#FFFFFF"),
    ("INTERMEDIATE", "#43B02A"),
    ("WET", "#0067FF"),
];

/// Team color by name.
///
/// Matches the full name ignoring case first. Otherwise the query may name the
/// leading words of a team ("Red Bull" finds "Red Bull Racing") or contain a
/// team's full name as whole words ("Scuderia Ferrari" finds "Ferrari").
pub fn team_color(team_name: &str) -> Option<&'static str> {
    let wanted = words(team_name);
    if wanted.is_empty() {
        return None;
    }

    TEAM_COLORS
        .iter()
        .find(|(name, _)| words(name) == wanted)
        .or_else(|| {
            TEAM_COLORS.iter().find(|(name, _)| {
                let name = words(name);
                name.starts_with(&wanted) || wanted.windows(name.len()).any(|run| run == name.as_slice())
            })
        })
        .map(|(_, color)| *color)
}

fn words(name: &str) -> Vec<String> {
    name.split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Tyre compound color, neutral for unknown compounds.
pub fn tyre_color(compound: &str) -> &'static str {
    let wanted = compound.trim().to_uppercase();
    TYRE_COLORS
        .iter()
        .find(|(name, _)| *name == wanted)
        .map_or(NEUTRAL_COLOR, |(_, color)| *color)
}
