//! End-to-end: YAML text in, resolved config and wiki text out.

use std::rc::Rc;

use factorymod_report::models::RandomOutput;
use factorymod_report::{Error, RecipeType, Seconds, load_and_resolve, load_config, load_file, render};

const SMELTERS: &str = r#"
default_fuel:
  charcoal:
    material: CHARCOAL
default_fuel_consumption_intervall: 5s
factories:
  smelter:
    type: FCC
    name: Smelter
    setupcost:
      stone:
        material: STONE
        amount: 32
    recipes: [smelt_iron, upgrade_smelter, not_a_recipe]
  smelter_mk2:
    type: FCC
    name: Smelter MK2
    recipes: [smelt_iron, gamble]
recipes:
  smelt_iron:
    name: Smelt Iron
    type: PRODUCTION
    production_time: 10s
    input:
      ore:
        material: IRON_ORE
        amount: 4
    output:
      ingot:
        material: IRON_INGOT
        amount: 4
  upgrade_smelter:
    name: Upgrade Smelter
    type: UPGRADE
    production_time: 1m
    factory: Smelter MK2
    input:
      diamond:
        material: DIAMOND
        amount: 2
  gamble:
    name: Gamble
    type: RANDOM
    production_time: 1m30s
    outputs:
      rare:
        chance: 0.001
        gem:
          material: EMERALD
      common:
        chance: 0.999
        dirt:
          material: DIRT
"#;

#[test]
fn smelter_upgrade_graph() {
    let (config, diagnostics) = load_and_resolve(SMELTERS).unwrap();

    let to = config.upgrades_to("Smelter");
    assert_eq!(to.len(), 1);
    assert_eq!(to[0].factory, "Smelter MK2");
    assert_eq!(to[0].recipe.display_name(), "Upgrade Smelter");

    let from = config.upgrades_from("Smelter MK2");
    assert_eq!(from.len(), 1);
    assert_eq!(from[0].factory, "Smelter");
    assert!(Rc::ptr_eq(&from[0].recipe, &to[0].recipe));

    assert_eq!(
        diagnostics.unresolved_recipes,
        [("Smelter".to_string(), "not_a_recipe".to_string())]
    );
}

#[test]
fn unknown_recipe_names_are_dropped() {
    let (config, _) = load_and_resolve(SMELTERS).unwrap();
    let names = config.factory("Smelter").unwrap().recipe_names();
    assert_eq!(names, ["smelt_iron", "upgrade_smelter"]);
}

#[test]
fn durations_and_types_are_typed() {
    let config = load_config(SMELTERS).unwrap();
    let gamble = config.recipes().iter().find(|r| r.id() == "gamble").unwrap();
    assert!(gamble.is_type(RecipeType::Random));
    assert_eq!(gamble.production_time.unwrap().seconds(), Seconds::Whole(90));
    assert_eq!(
        config.default_fuel_consumption_intervall.unwrap().seconds(),
        Seconds::Whole(5)
    );
}

#[test]
fn random_outputs_keep_their_chances() {
    let config = load_config(SMELTERS).unwrap();
    let gamble = config.recipes().iter().find(|r| r.id() == "gamble").unwrap();
    let chances: Vec<_> = gamble
        .random_outputs()
        .iter()
        .map(|o: &RandomOutput| o.chance.unwrap())
        .collect();
    assert_eq!(chances, [0.001, 0.999]);
    assert_eq!(
        gamble.random_outputs()[0].quantities[0].material.as_deref(),
        Some("EMERALD")
    );
}

#[test]
fn rendered_page_lists_rare_output_last() {
    let (config, _) = load_and_resolve(SMELTERS).unwrap();
    let text = render(&config, config.factory("Smelter MK2").unwrap()).unwrap();

    let common = text.find("|99.9%").unwrap();
    let rare = text.find("|0.1%").unwrap();
    assert!(common < rare);
    assert!(text.contains("|[[#Gamble_outputs|Random]]"));
    assert!(text.contains("|Smelt Iron\n|4 [[File:Iron Ore.png|23px|middle]]\n|4 [[File:Iron Ingot.png|23px|middle]]\n|10\n|50 [[File:Charcoal.png|23px|middle]]"));
    assert!(text.contains("|Smelter\n|2 [[File:Diamond.png|23px|middle]]"));
}

#[test]
fn resolving_again_changes_nothing() {
    let (mut config, _) = load_and_resolve(SMELTERS).unwrap();
    let first = config.clone();
    let diagnostics = factorymod_report::resolve(&mut config).unwrap();
    assert_eq!(config, first);
    assert!(diagnostics.is_clean());
}

#[test]
fn bad_documents_are_rejected() {
    assert!(matches!(load_config("- a\n- b\n"), Err(Error::NotAMapping)));
    assert!(matches!(load_config("factories: [\n"), Err(Error::Yaml(_))));
    assert!(matches!(
        load_config("default_update_time: 5x\n"),
        Err(Error::InvalidField { record: "Config", field: "default_update_time", .. })
    ));
    assert!(matches!(
        load_file(std::path::Path::new("/nonexistent/factorymod.yaml")),
        Err(Error::Io { .. })
    ));
}
