//! Plain-text Pokémon summaries

use pokeapi_client::{Pokemon, PokemonSpecies, TypeSlot};

pub const NO_DATA: &str = "No data available.";
pub const NO_DESCRIPTION: &str = "No description available.";

const STAT_LABELS: &[(&str, &str)] = &[
    ("hp", "HP"),
    ("attack", "Atk"),
    ("defense", "Def"),
    ("special-attack", "SpA"),
    ("special-defense", "SpD"),
    ("speed", "Spe"),
];

/// Render the four-line summary shown to callers.
///
/// ```text
/// Charizard (#6)
/// Type: fire / flying
/// Abilities: blaze, solar-power (hidden)
/// Base stats: HP 78, Atk 84, Def 78, SpA 109, SpD 85, Spe 100
/// ```
///
/// A payload with no `types` or no `stats` field renders as [`NO_DATA`]; an
/// empty list still renders.
pub fn render_summary(pokemon: &Pokemon) -> String {
    let (Some(types), Some(_)) = (&pokemon.types, &pokemon.stats) else {
        return NO_DATA.to_string();
    };
    if pokemon.name.is_empty() {
        return NO_DATA.to_string();
    }

    let types = type_names(types).join(" / ");

    let abilities = pokemon
        .abilities
        .iter()
        .map(|a| {
            if a.is_hidden {
                format!("{} (hidden)", a.ability.name)
            } else {
                a.ability.name.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(", ");
    let abilities = if abilities.is_empty() {
        "—".to_string()
    } else {
        abilities
    };

    let stats = STAT_LABELS
        .iter()
        .map(|(stat, label)| match pokemon.base_stat(stat) {
            Some(value) => format!("{} {}", label, value),
            None => format!("{} ?", label),
        })
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "{} (#{})\nType: {}\nAbilities: {}\nBase stats: {}",
        display_name(&pokemon.name),
        pokemon.id,
        types,
        abilities,
        stats
    )
}

/// Render the Pokédex card: headline, types, height, weight, abilities and
/// the English flavor text.
///
/// `headline` replaces the default `"Name (#id)"` title prefix, e.g.
/// `"Random Kanto Pokémon"` gives `"# Random Kanto Pokémon: Bulbasaur (#1)"`.
pub fn render_details(
    pokemon: &Pokemon,
    species: &PokemonSpecies,
    headline: Option<&str>,
) -> String {
    let title = format!("{} (#{})", capitalize(&pokemon.name), pokemon.id);
    let title = match headline {
        Some(prefix) => format!("{}: {}", prefix, title),
        None => title,
    };

    let types = pokemon
        .types
        .as_deref()
        .map(type_names)
        .unwrap_or_default()
        .into_iter()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(", ");
    let abilities = pokemon
        .abilities
        .iter()
        .map(|a| capitalize(&a.ability.name))
        .collect::<Vec<_>>()
        .join(", ");
    let description = species
        .english_flavor_text()
        .unwrap_or_else(|| NO_DESCRIPTION.to_string());

    format!(
        "# {}\n\n**Types:** {}\n**Height:** {}m\n**Weight:** {}kg\n**Abilities:** {}\n\n**Description:** {}",
        title,
        types,
        tenths(pokemon.height),
        tenths(pokemon.weight),
        abilities,
        description
    )
}

/// `"kanto"` -> `"Random Kanto Pokémon"`
pub fn random_headline(group: &str) -> String {
    format!("Random {} Pokémon", capitalize(&group.trim().to_lowercase()))
}

/// Type names ordered by slot
fn type_names(types: &[TypeSlot]) -> Vec<&str> {
    let mut types: Vec<_> = types.iter().collect();
    types.sort_by_key(|t| t.slot);
    types.into_iter().map(|t| t.kind.name.as_str()).collect()
}

/// Decimetres and hectograms as metres and kilograms: `17` -> `"1.7"`, `20` -> `"2"`
fn tenths(value: Option<u32>) -> String {
    match value {
        Some(v) if v % 10 == 0 => (v / 10).to_string(),
        Some(v) => format!("{}.{}", v / 10, v % 10),
        None => "?".to_string(),
    }
}

pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `"mr-mime"` -> `"Mr mime"`
fn display_name(name: &str) -> String {
    capitalize(&name.replace('-', " "))
}
