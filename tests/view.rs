use pokedex::domain::{CatalogEntryDetail, StatValue};
use pokedex::view::{SortDirection, SortField, ViewState, derive_view};

fn entry(id: u32, name: &str, types: &[&str], stats: &[(&str, u32)]) -> CatalogEntryDetail {
    CatalogEntryDetail {
        id,
        name: name.to_string(),
        sprite_url: None,
        artwork_url: None,
        types: types.iter().map(|t| t.to_string()).collect(),
        stats: stats
            .iter()
            .map(|(stat, value)| StatValue {
                name: stat.to_string(),
                base_value: *value,
            })
            .collect(),
        abilities: Vec::new(),
        height_decimeters: 0,
        weight_hectograms: 0,
        base_experience: None,
        species_url: String::new(),
        sprite: None,
    }
}

fn kanto_starters() -> Vec<CatalogEntryDetail> {
    vec![
        entry(
            1,
            "bulbasaur",
            &["grass", "poison"],
            &[("hp", 45), ("attack", 49), ("defense", 49), ("speed", 45)],
        ),
        entry(
            4,
            "charmander",
            &["fire"],
            &[("hp", 39), ("attack", 52), ("defense", 43), ("speed", 65)],
        ),
        entry(
            7,
            "squirtle",
            &["water"],
            &[("hp", 44), ("attack", 48), ("defense", 65), ("speed", 43)],
        ),
    ]
}

fn ids(entries: &[&CatalogEntryDetail]) -> Vec<u32> {
    entries.iter().map(|entry| entry.id).collect()
}

#[test]
fn every_name_substring_matches_any_case() {
    let all = kanto_starters();
    let name = "charmander";
    for start in 0..name.len() {
        for end in (start + 1)..=name.len() {
            let needle = name[start..end].to_uppercase();
            let view = ViewState {
                search_text: needle.clone(),
                ..ViewState::default()
            };
            let visible = derive_view(&all, &view);
            assert!(
                visible.iter().any(|entry| entry.id == 4),
                "substring {needle:?} should match charmander"
            );
        }
    }
}

#[test]
fn absent_type_yields_empty_view() {
    let all = kanto_starters();
    let view = ViewState {
        selected_type: Some("dragon".to_string()),
        ..ViewState::default()
    };
    assert!(derive_view(&all, &view).is_empty());
}

#[test]
fn search_char_keeps_only_charmander() {
    let all = vec![
        entry(1, "bulbasaur", &["grass"], &[]),
        entry(4, "charmander", &["fire"], &[]),
    ];
    let view = ViewState {
        search_text: "char".to_string(),
        ..ViewState::default()
    };
    assert_eq!(ids(&derive_view(&all, &view)), vec![4]);
}

#[test]
fn sorting_is_a_permutation_and_descending_reverses_ascending() {
    let all = kanto_starters();
    for field in [SortField::Total, SortField::Name, SortField::Id] {
        let ascending = derive_view(
            &all,
            &ViewState {
                sort_field: Some(field.clone()),
                direction: SortDirection::Ascending,
                ..ViewState::default()
            },
        );
        let descending = derive_view(
            &all,
            &ViewState {
                sort_field: Some(field.clone()),
                direction: SortDirection::Descending,
                ..ViewState::default()
            },
        );
        assert_eq!(ascending.len(), all.len(), "field {field}");
        assert_eq!(descending.len(), all.len(), "field {field}");

        let mut ascending_ids = ids(&ascending);
        let mut descending_ids = ids(&descending);
        let mut reversed = ids(&ascending);
        reversed.reverse();
        assert_eq!(reversed, descending_ids, "field {field}");

        ascending_ids.sort_unstable();
        descending_ids.sort_unstable();
        let mut expected: Vec<u32> = all.iter().map(|entry| entry.id).collect();
        expected.sort_unstable();
        assert_eq!(ascending_ids, expected, "field {field}");
        assert_eq!(descending_ids, expected, "field {field}");
    }
}

#[test]
fn total_sort_orders_by_stat_sum() {
    let all = vec![
        entry(4, "charmander", &[], &[("hp", 150), ("attack", 159)]),
        entry(1, "bulbasaur", &[], &[("hp", 150), ("attack", 150)]),
    ];
    let ascending = derive_view(
        &all,
        &ViewState {
            sort_field: Some(SortField::Total),
            direction: SortDirection::Ascending,
            ..ViewState::default()
        },
    );
    assert_eq!(ids(&ascending), vec![1, 4]);

    let descending = derive_view(
        &all,
        &ViewState {
            sort_field: Some(SortField::Total),
            direction: SortDirection::Descending,
            ..ViewState::default()
        },
    );
    assert_eq!(ids(&descending), vec![4, 1]);
}

#[test]
fn filters_compose_with_sort() {
    let all = kanto_starters();
    let view = ViewState {
        search_text: "a".to_string(),
        selected_type: Some("grass".to_string()),
        sort_field: Some(SortField::Stat("speed".to_string())),
        direction: SortDirection::Descending,
    };
    // "a" matches bulbasaur and charmander; the type filter keeps bulbasaur.
    assert_eq!(ids(&derive_view(&all, &view)), vec![1]);
}
