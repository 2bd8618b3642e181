//! Recipe resolution and upgrade graph construction

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::models::{Config, Factory, FactoryRecipes, Recipe, RecipeType, UpgradeEdge, UpgradeMap};

/// Problems resolution worked around instead of failing on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    /// `(factory, recipe name)` pairs naming a recipe that does not exist.
    pub unresolved_recipes: Vec<(String, String)>,
    /// Upgrade recipes without a `factory:` target.
    pub missing_upgrade_targets: Vec<String>,
    /// `(recipe, target)` pairs whose target names no factory.
    pub unknown_upgrade_targets: Vec<(String, String)>,
}

impl Diagnostics {
    pub fn is_clean(&self) -> bool {
        self.unresolved_recipes.is_empty()
            && self.missing_upgrade_targets.is_empty()
            && self.unknown_upgrade_targets.is_empty()
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} unresolved recipe references, {} upgrade recipes without a target, {} upgrade recipes with an unknown target",
            self.unresolved_recipes.len(),
            self.missing_upgrade_targets.len(),
            self.unknown_upgrade_targets.len()
        )
    }
}

/// Swap every factory's recipe names for the recipes themselves and build
/// `upgrades_to` / `upgrades_from`.
///
/// Unknown recipe names are dropped with a warning. Upgrade recipes with no
/// target, or a target naming no factory, are left out of the graph. A
/// target naming several factories is an error.
///
/// Running this again on a resolved config rebuilds the same graph.
pub fn resolve(config: &mut Config) -> Result<Diagnostics> {
    let mut diagnostics = Diagnostics::default();

    let lookup: HashMap<&str, &Rc<Recipe>> = config.recipes().iter().map(|r| (r.id(), r)).collect();
    let mut resolved_lists = Vec::with_capacity(config.factories().len());
    for factory in config.factories() {
        resolved_lists.push(resolve_factory(factory, &lookup, &mut diagnostics));
    }
    drop(lookup);

    if let Some(factories) = config.factories.as_mut() {
        for (factory, recipes) in factories.iter_mut().zip(resolved_lists) {
            factory.recipes = FactoryRecipes::Resolved(recipes);
        }
    }

    let (upgrades_to, upgrades_from) = build_upgrade_graph(config.factories(), &mut diagnostics)?;
    config.upgrades_to = upgrades_to;
    config.upgrades_from = upgrades_from;

    if !diagnostics.is_clean() {
        warn!(%diagnostics, "config resolved with problems");
    }
    Ok(diagnostics)
}

fn resolve_factory(
    factory: &Factory,
    lookup: &HashMap<&str, &Rc<Recipe>>,
    diagnostics: &mut Diagnostics,
) -> Vec<Rc<Recipe>> {
    let names = match &factory.recipes {
        FactoryRecipes::Resolved(recipes) => return recipes.clone(),
        FactoryRecipes::Names(names) => names,
    };

    let mut recipes = Vec::with_capacity(names.len());
    for name in names {
        match lookup.get(name.as_str()) {
            Some(recipe) => recipes.push(Rc::clone(recipe)),
            None => {
                warn!(
                    factory = %factory.name,
                    recipe = %name,
                    "recipe not found in list of recipes, skipping"
                );
                diagnostics
                    .unresolved_recipes
                    .push((factory.name.clone(), name.clone()));
            }
        }
    }
    recipes
}

fn build_upgrade_graph(
    factories: &[Factory],
    diagnostics: &mut Diagnostics,
) -> Result<(UpgradeMap, UpgradeMap)> {
    let mut upgrades_to = UpgradeMap::new();
    let mut upgrades_from = UpgradeMap::new();

    for factory in factories {
        for recipe in factory.recipes() {
            if !recipe.is_type(RecipeType::Upgrade) {
                continue;
            }

            // Upgrade_to_Wood_Processor_2 in civcraft 3.0 has no factory key
            let Some(target) = recipe.factory.as_deref() else {
                warn!(
                    factory = %factory.name,
                    recipe = %recipe.id(),
                    "upgrade recipe has no target factory, leaving it out of the upgrade graph"
                );
                diagnostics.missing_upgrade_targets.push(recipe.id().to_string());
                continue;
            };

            let matches: Vec<&Factory> = factories.iter().filter(|f| f.name == target).collect();
            let next = match matches.as_slice() {
                [next] => *next,
                [] => {
                    warn!(
                        factory = %factory.name,
                        recipe = %recipe.id(),
                        upgrade_target = %target,
                        "upgrade target is not a known factory, leaving it out of the upgrade graph"
                    );
                    diagnostics
                        .unknown_upgrade_targets
                        .push((recipe.id().to_string(), target.to_string()));
                    continue;
                }
                many => {
                    return Err(Error::AmbiguousUpgradeTarget {
                        recipe: recipe.id().to_string(),
                        target: target.to_string(),
                        count: many.len(),
                    });
                }
            };

            debug!(from = %factory.name, to = %next.name, recipe = %recipe.id(), "upgrade edge");
            upgrades_to
                .entry(factory.name.clone())
                .or_default()
                .push(UpgradeEdge {
                    recipe: Rc::clone(recipe),
                    factory: next.name.clone(),
                });
            upgrades_from
                .entry(next.name.clone())
                .or_default()
                .push(UpgradeEdge {
                    recipe: Rc::clone(recipe),
                    factory: factory.name.clone(),
                });
        }
    }

    Ok((upgrades_to, upgrades_from))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::load_config;

    const SMELTERS: &str = r#"
factories:
  smelter:
    type: FCC
    name: Smelter
    recipes: [smelt_iron, upgrade_smelter, missing_recipe, repair_smelter]
  smelter_mk2:
    type: FCC
    name: Smelter MK2
    recipes: [smelt_iron]
recipes:
  smelt_iron:
    name: Smelt Iron
    type: PRODUCTION
    production_time: 10s
  upgrade_smelter:
    name: Upgrade
    type: UPGRADE
    production_time: 1m
    factory: Smelter MK2
  repair_smelter:
    name: Repair Smelter
    type: REPAIR
    health_gained: 50
"#;

    fn ids(recipes: &[Rc<Recipe>]) -> Vec<&str> {
        recipes.iter().map(|r| r.id()).collect()
    }

    #[test]
    fn test_upgrade_edges_are_symmetric() {
        let mut config = load_config(SMELTERS).unwrap();
        resolve(&mut config).unwrap();

        let to = config.upgrades_to("Smelter");
        assert_eq!(to.len(), 1);
        assert_eq!(to[0].recipe.display_name(), "Upgrade");
        assert_eq!(to[0].factory, "Smelter MK2");

        let from = config.upgrades_from("Smelter MK2");
        assert_eq!(from.len(), 1);
        assert_eq!(from[0].recipe.display_name(), "Upgrade");
        assert_eq!(from[0].factory, "Smelter");

        assert!(config.upgrades_from("Smelter").is_empty());
        assert!(config.upgrades_to("Smelter MK2").is_empty());
    }

    #[test]
    fn test_unknown_recipe_is_dropped() {
        let mut config = load_config(SMELTERS).unwrap();
        let diagnostics = resolve(&mut config).unwrap();

        let smelter = config.factory("Smelter").unwrap();
        assert_eq!(
            ids(smelter.recipes()),
            ["smelt_iron", "upgrade_smelter", "repair_smelter"]
        );
        assert_eq!(
            diagnostics.unresolved_recipes,
            [("Smelter".to_string(), "missing_recipe".to_string())]
        );
        assert_eq!(ids(config.factory("Smelter MK2").unwrap().recipes()), ["smelt_iron"]);
    }

    #[test]
    fn test_resolved_recipes_are_shared() {
        let mut config = load_config(SMELTERS).unwrap();
        resolve(&mut config).unwrap();
        let a = &config.factory("Smelter").unwrap().recipes()[0];
        let b = &config.factory("Smelter MK2").unwrap().recipes()[0];
        assert!(Rc::ptr_eq(a, b));
    }

    #[test]
    fn test_missing_target_is_counted_not_fatal() {
        let mut config = load_config(
            r#"
factories:
  mill: {name: Wood Processor, recipes: [to_mill_2]}
recipes:
  to_mill_2: {name: Upgrade to Wood Processor 2, type: UPGRADE}
"#,
        )
        .unwrap();
        let diagnostics = resolve(&mut config).unwrap();
        assert_eq!(diagnostics.missing_upgrade_targets, ["to_mill_2"]);
        assert!(config.upgrades_to.is_empty());
        assert!(config.upgrades_from.is_empty());
    }

    #[test]
    fn test_unknown_target_is_counted() {
        let mut config = load_config(
            r#"
factories:
  mill: {name: Mill, recipes: [up]}
recipes:
  up: {name: Up, type: UPGRADE, factory: Nowhere}
"#,
        )
        .unwrap();
        let diagnostics = resolve(&mut config).unwrap();
        assert_eq!(
            diagnostics.unknown_upgrade_targets,
            [("up".to_string(), "Nowhere".to_string())]
        );
        assert!(config.upgrades_to.is_empty());
    }

    #[test]
    fn test_ambiguous_target_is_fatal() {
        let mut config = load_config(
            r#"
factories:
  a: {name: Mill, recipes: [up]}
  b: {name: Mill 2}
  c: {name: Mill 2}
recipes:
  up: {name: Up, type: UPGRADE, factory: Mill 2}
"#,
        )
        .unwrap();
        let err = resolve(&mut config).unwrap_err();
        assert!(matches!(
            err,
            Error::AmbiguousUpgradeTarget { count: 2, .. }
        ));
    }

    #[test]
    fn test_edges_keep_discovery_order() {
        let mut config = load_config(
            r#"
factories:
  a: {name: A, recipes: [a_to_c, a_to_b]}
  b: {name: B, recipes: [b_to_c]}
  c: {name: C}
recipes:
  a_to_c: {type: UPGRADE, factory: C}
  a_to_b: {type: UPGRADE, factory: B}
  b_to_c: {type: UPGRADE, factory: C}
"#,
        )
        .unwrap();
        resolve(&mut config).unwrap();
        let to: Vec<_> = config.upgrades_to("A").iter().map(|e| e.factory.as_str()).collect();
        assert_eq!(to, ["C", "B"]);
        let from: Vec<_> = config.upgrades_from("C").iter().map(|e| e.factory.as_str()).collect();
        assert_eq!(from, ["A", "B"]);
    }

    #[test]
    fn test_resolving_twice_is_stable() {
        let mut config = load_config(SMELTERS).unwrap();
        resolve(&mut config).unwrap();
        let first = config.clone();
        resolve(&mut config).unwrap();
        assert_eq!(config, first);
    }
}
