use std::fs;

use pokedex::domain::STAT_NAMES;
use pokedex::pokeapi::{
    EvolutionChainResponse, ListResponse, PokemonResponse, SpeciesResponse, decode_chain_link,
    decode_detail, decode_species, decode_summaries,
};

#[test]
fn decode_list_fixture() {
    let raw = fs::read_to_string("tests/fixtures/pokemon_list.json").unwrap();
    let response: ListResponse = serde_json::from_str(&raw).unwrap();
    let summaries =
        decode_summaries(response, "https://pokeapi.co/api/v2/pokemon?limit=3").unwrap();

    assert_eq!(summaries.len(), 3);
    assert_eq!(summaries[0].id, 1);
    assert_eq!(summaries[0].name, "bulbasaur");
    assert_eq!(
        summaries[2].detail_url,
        "https://pokeapi.co/api/v2/pokemon/3/"
    );
}

#[test]
fn decode_pokemon_fixture() {
    let raw = fs::read_to_string("tests/fixtures/pokemon_bulbasaur.json").unwrap();
    let response: PokemonResponse = serde_json::from_str(&raw).unwrap();
    let detail = decode_detail(response);

    assert_eq!(detail.id, 1);
    assert_eq!(detail.name, "bulbasaur");
    assert_eq!(detail.types, vec!["grass", "poison"]);
    assert_eq!(detail.abilities, vec!["overgrow", "chlorophyll"]);
    assert_eq!(detail.height_decimeters, 7);
    assert_eq!(detail.weight_hectograms, 69);
    assert_eq!(detail.base_experience, Some(64));
    assert!(detail.sprite_url.as_deref().unwrap().ends_with("/1.png"));
    assert!(
        detail
            .artwork_url
            .as_deref()
            .unwrap()
            .contains("official-artwork")
    );
    assert!(detail.species_url.ends_with("/pokemon-species/1/"));

    for name in STAT_NAMES {
        assert!(detail.stat(name) > 0, "stat {name} should be present");
    }
    assert_eq!(detail.stat("special-attack"), 65);
    assert_eq!(detail.stat_total(), 318);
}

#[test]
fn decode_species_fixture() {
    let raw = fs::read_to_string("tests/fixtures/species_bulbasaur.json").unwrap();
    let response: SpeciesResponse = serde_json::from_str(&raw).unwrap();
    let species = decode_species(response);

    assert_eq!(species.id, 1);
    assert_eq!(species.capture_rate, 45);
    assert_eq!(species.base_happiness, Some(50));
    assert_eq!(species.gender_rate, 1);
    assert_eq!(species.growth_rate, "medium-slow");
    assert_eq!(species.egg_groups, vec!["monster", "plant"]);
    assert_eq!(species.english_genus(), Some("Seed Pokémon"));
    assert_eq!(species.hatch_steps(), Some(5100));
    assert!(species.evolution_chain_url.ends_with("/evolution-chain/1/"));
}

#[test]
fn decode_evolution_chain_fixture() {
    let raw = fs::read_to_string("tests/fixtures/evolution_chain_1.json").unwrap();
    let response: EvolutionChainResponse = serde_json::from_str(&raw).unwrap();
    let root = decode_chain_link(response.chain);

    assert_eq!(root.species_name, "bulbasaur");
    assert_eq!(root.min_level_to_evolve, Some(16));
    assert_eq!(root.children.len(), 1);

    let ivysaur = &root.children[0];
    assert_eq!(ivysaur.species_name, "ivysaur");
    assert_eq!(ivysaur.min_level_to_evolve, Some(32));

    let venusaur = &ivysaur.children[0];
    assert_eq!(venusaur.species_name, "venusaur");
    assert_eq!(venusaur.min_level_to_evolve, None);
    assert!(venusaur.children.is_empty());
}
