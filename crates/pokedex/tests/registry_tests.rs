//! Registry operation tests

use pokedex::*;
use pretty_assertions::assert_eq;

const CATALOG: &str = "\
ID,Name,Type,HP,Attack,Can Evolve
252,Treecko,Grass,40,45,TRUE
253,Grovyle,Grass,50,65,TRUE
254,Sceptile,Grass,70,85,FALSE
255,Torchic,Fire,45,60,TRUE
256,Combusken,Fire,60,85,TRUE
258,Mudkip,Water,50,70,TRUE
263,Zigzagoon,Normal,38,30,TRUE
264,Linoone,Normal,78,70,FALSE
";

fn registry() -> Registry {
    Registry::new(Catalog::parse(CATALOG).unwrap())
}

fn ids(reg: &Registry, owner: &str) -> Vec<i64> {
    reg.find_owner(owner)
        .unwrap()
        .collection()
        .iter()
        .map(|r| r.id)
        .collect()
}

// ═══════════════════════════════════════════════════════════════════════
// Owner Lifecycle
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_create_and_find_owner() {
    let mut reg = registry();
    let starter = reg.create_owner("Ash", Starter::Treecko).unwrap();
    assert_eq!(starter.id, 252);
    assert_eq!(reg.find_owner("ASH").unwrap().name(), "Ash");
    assert_eq!(ids(&reg, "Ash"), vec![252]);
}

#[test]
fn test_traverse_visits_owners_in_tree_order() {
    let mut reg = registry();
    for name in ["Bob", "Amy", "Zoe"] {
        reg.create_owner(name, Starter::Treecko).unwrap();
    }
    let names = |order: Traversal| -> Vec<String> {
        reg.traverse(order)
            .iter()
            .map(|n| n.name().to_string())
            .collect()
    };
    assert_eq!(names(Traversal::PreOrder), vec!["Bob", "Amy", "Zoe"]);
    assert_eq!(names(Traversal::InOrder), vec!["Amy", "Bob", "Zoe"]);
    assert_eq!(names(Traversal::PostOrder), vec!["Amy", "Zoe", "Bob"]);
}

#[test]
fn test_delete_owner_removes_only_that_owner() {
    let mut reg = registry();
    for (name, starter) in [
        ("Bob", Starter::Treecko),
        ("Amy", Starter::Torchic),
        ("Zoe", Starter::Mudkip),
    ] {
        reg.create_owner(name, starter).unwrap();
    }
    reg.delete_owner("bob").unwrap();

    assert!(reg.find_owner("Bob").is_err());
    assert_eq!(ids(&reg, "Amy"), vec![255]);
    assert_eq!(ids(&reg, "Zoe"), vec![258]);
    assert_eq!(
        reg.delete_owner("Bob").unwrap_err(),
        PokedexError::OwnerNotFound("Bob".into())
    );
}

// ═══════════════════════════════════════════════════════════════════════
// Collection Operations
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_add_is_idempotent_on_duplicate_id() {
    let mut once = registry();
    once.create_owner("Ash", Starter::Treecko).unwrap();
    once.add_creature("Ash", 263).unwrap();

    let mut twice = registry();
    twice.create_owner("Ash", Starter::Treecko).unwrap();
    twice.add_creature("Ash", 263).unwrap();
    assert!(matches!(
        twice.add_creature("Ash", 263),
        Err(PokedexError::DuplicateCreature { id: 263, .. })
    ));

    assert_eq!(ids(&once, "Ash"), ids(&twice, "Ash"));
}

#[test]
fn test_release_then_readd_goes_to_end() {
    let mut reg = registry();
    reg.create_owner("Ash", Starter::Treecko).unwrap();
    reg.add_creature("Ash", 263).unwrap();
    reg.release_creature("Ash", "treecko").unwrap();
    reg.add_creature("Ash", 252).unwrap();
    assert_eq!(ids(&reg, "Ash"), vec![263, 252]);
}

#[test]
fn test_evolve_scenario() {
    let mut reg = registry();
    reg.create_owner("Ash", Starter::Treecko).unwrap();

    let outcome = reg.evolve_creature("Ash", "Treecko").unwrap();
    assert!(matches!(outcome, Evolution::Evolved { .. }));
    assert_eq!(ids(&reg, "Ash"), vec![253]);
    assert_eq!(reg.find_owner("Ash").unwrap().collection()[0].name, "Grovyle");

    assert_eq!(
        reg.evolve_creature("Ash", "Treecko").unwrap_err(),
        PokedexError::CreatureNotFound {
            owner: "Ash".into(),
            name: "Treecko".into(),
        }
    );
    assert_eq!(ids(&reg, "Ash"), vec![253]);
}

#[test]
fn test_evolve_unevolvable_is_noop() {
    let mut reg = registry();
    reg.create_owner("Ash", Starter::Treecko).unwrap();
    reg.add_creature("Ash", 264).unwrap();
    reg.add_creature("Ash", 263).unwrap();
    let before = ids(&reg, "Ash");

    assert_eq!(
        reg.evolve_creature("Ash", "linoone").unwrap_err(),
        PokedexError::Unevolvable("Linoone".into())
    );
    assert_eq!(ids(&reg, "Ash"), before);
}

#[test]
fn test_evolve_into_present_form_drops_one_entry() {
    let mut reg = registry();
    reg.create_owner("Ash", Starter::Torchic).unwrap();
    reg.add_creature("Ash", 256).unwrap();
    reg.add_creature("Ash", 263).unwrap();

    let outcome = reg.evolve_creature("Ash", "Torchic").unwrap();
    assert!(matches!(outcome, Evolution::ReleasedDuplicate { .. }));
    assert_eq!(outcome.evolved().name, "Combusken");
    assert_eq!(ids(&reg, "Ash"), vec![256, 263]);
}

#[test]
fn test_operations_isolated_between_owners() {
    let mut reg = registry();
    reg.create_owner("Ash", Starter::Treecko).unwrap();
    reg.create_owner("May", Starter::Treecko).unwrap();
    reg.evolve_creature("May", "Treecko").unwrap();
    assert_eq!(ids(&reg, "Ash"), vec![252]);
    assert_eq!(ids(&reg, "May"), vec![253]);
}

// ═══════════════════════════════════════════════════════════════════════
// Filters and Reports
// ═══════════════════════════════════════════════════════════════════════

fn full_owner() -> Registry {
    let mut reg = registry();
    reg.create_owner("Ash", Starter::Treecko).unwrap();
    for id in [253, 254, 255, 256, 258, 263, 264] {
        reg.add_creature("Ash", id).unwrap();
    }
    reg
}

#[test]
fn test_attack_filter_for_every_threshold() {
    let reg = full_owner();
    let collection = reg.find_owner("Ash").unwrap().collection().to_vec();
    let min = collection.iter().map(|r| r.attack).min().unwrap();
    let max = collection.iter().map(|r| r.attack).max().unwrap();

    for threshold in (min - 1)..=(max + 1) {
        let got: Vec<i64> = reg
            .list_filtered("Ash", &Filter::AttackAbove(threshold))
            .unwrap()
            .iter()
            .map(|r| r.id)
            .collect();
        let expected: Vec<i64> = collection
            .iter()
            .filter(|r| r.attack > threshold)
            .map(|r| r.id)
            .collect();
        assert_eq!(got, expected, "threshold {}", threshold);
    }
    assert!(reg
        .list_filtered("Ash", &Filter::AttackAbove(max))
        .unwrap()
        .is_empty());
}

#[test]
fn test_filters_leave_collection_untouched() {
    let reg = full_owner();
    let before = ids(&reg, "Ash");
    let grass = reg.list_filtered("Ash", &Filter::Type("grass".into())).unwrap();
    assert_eq!(grass.len(), 3);
    let evolvable = reg.list_filtered("Ash", &Filter::CanEvolve).unwrap();
    assert_eq!(evolvable.len(), 6);
    let z = reg.list_filtered("Ash", &Filter::NamePrefix("Z".into())).unwrap();
    assert_eq!(z.len(), 1);
    let hp = reg.list_filtered("Ash", &Filter::HpAbove(70)).unwrap();
    assert_eq!(hp.iter().map(|r| r.id).collect::<Vec<_>>(), vec![264]);
    assert_eq!(ids(&reg, "Ash"), before);
}

#[test]
fn test_sort_report_by_size_then_name() {
    let mut reg = registry();
    reg.create_owner("misty", Starter::Mudkip).unwrap();
    reg.create_owner("Brock", Starter::Torchic).unwrap();
    reg.create_owner("Ash", Starter::Treecko).unwrap();
    reg.add_creature("Brock", 263).unwrap();
    reg.add_creature("Brock", 264).unwrap();
    reg.add_creature("misty", 263).unwrap();
    reg.add_creature("Ash", 263).unwrap();

    let report: Vec<(String, usize)> = reg
        .sort_report()
        .into_iter()
        .map(|s| (s.name, s.size))
        .collect();
    assert_eq!(
        report,
        vec![
            ("Ash".to_string(), 2),
            ("misty".to_string(), 2),
            ("Brock".to_string(), 3),
        ]
    );
}

#[test]
fn test_sort_report_empty_registry() {
    assert!(registry().sort_report().is_empty());
}

#[test]
fn test_records_serialize_for_json_output() {
    let reg = full_owner();
    let listing = reg.list_filtered("Ash", &Filter::NamePrefix("tree".into())).unwrap();
    let json = serde_json::to_value(&listing).unwrap();
    assert_eq!(
        json,
        serde_json::json!([{
            "id": 252,
            "name": "Treecko",
            "type": "Grass",
            "hp": 40,
            "attack": 45,
            "can_evolve": true
        }])
    );
}
