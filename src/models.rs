//! Data models for FactoryMod factories, recipes and items

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use serde_yaml::{Mapping, Value};

use crate::duration::Duration;
use crate::error::Result;
use crate::schema::{
    FieldPath, FieldType, FieldValue, Record, Schema, deserialize_keyed, key_text,
};

/// Declares a string-labelled enum readable as a schema field.
macro_rules! labelled_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $label:literal,)+ }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant,)+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant,)+];

            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> std::result::Result<Self, String> {
                match s {
                    $($label => Ok($name::$variant),)+
                    other => Err(format!("unknown {} '{}'", stringify!($name), other)),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FieldValue for $name {
            const TYPE: FieldType = FieldType::Enum(stringify!($name));

            fn from_value(raw: &Value, at: &FieldPath) -> Result<Self> {
                match raw {
                    Value::String(s) => s.parse().map_err(|_| at.violation(Self::TYPE, raw)),
                    _ => Err(at.violation(Self::TYPE, raw)),
                }
            }
        }
    };
}

labelled_enum! {
    /// What a recipe does when run in a factory.
    RecipeType {
        Upgrade => "UPGRADE",
        Production => "PRODUCTION",
        Repair => "REPAIR",
        Compact => "COMPACT",
        Decompact => "DECOMPACT",
        PrintingPlate => "PRINTINGPLATE",
        PrintingPlateJson => "PRINTINGPLATEJSON",
        WordBank => "WORDBANK",
        PrintBook => "PRINTBOOK",
        PrintNote => "PRINTNOTE",
        Random => "RANDOM",
        // civcraft 3.0
        WoodMapping => "WOODMAPPING",
        Pylon => "PYLON",
        Enchant => "ENCHANT",
        LoreEnchant => "LOREENCHANT",
        CostReturn => "COSTRETURN",
        // civmc
        HeliodorCreate => "HELIODOR_CREATE",
        HeliodorFinish => "HELIODOR_FINISH",
        HeliodorRefill => "HELIODOR_REFILL",
    }
}

labelled_enum! {
    /// Physical layout of a factory.
    FactoryType {
        // furnace, chest, crafting table
        Fcc => "FCC",
        FccUpgrade => "FCCUPGRADE",
        Pipe => "PIPE",
        Sorter => "SORTER",
    }
}

/// Anything listed with an amount and an item name.
pub trait ItemStack {
    fn amount(&self) -> Option<i64>;

    /// The item identifier, whichever key this schema revision used for it.
    fn item_name(&self) -> Option<&str>;
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Enchantment {
    pub key: Option<String>,
    pub enchant: Option<String>,
    pub level: Option<i64>,
}

impl Record for Enchantment {
    const NAME: &'static str = "Enchantment";

    fn schema() -> Schema<Self> {
        Schema::new()
            .field("enchant", |e: &mut Enchantment, v| e.enchant = v)
            .field("level", |e: &mut Enchantment, v| e.level = v)
    }

    fn set_key(&mut self, key: String) {
        self.key = Some(key);
    }
}

/// Bukkit item meta, as serialized by civmc.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemMeta {
    pub display_name: Option<String>,
    pub lore: Option<Vec<String>>,
    pub stored_enchants: Vec<Enchantment>,
}

impl Record for ItemMeta {
    const NAME: &'static str = "ItemMeta";

    fn schema() -> Schema<Self> {
        Schema::new()
            .renamed("display_name", "display-name", |m: &mut ItemMeta, v| {
                m.display_name = v
            })
            .field("lore", |m: &mut ItemMeta, v| m.lore = v)
            .special(
                "stored_enchants",
                FieldType::RecordList(Enchantment::NAME),
                flat_enchants,
                |m: &mut ItemMeta, v| m.stored_enchants = v,
            )
    }

    fn set_key(&mut self, _key: String) {}
}

/// `stored-enchants: {DURABILITY: 3}` style enchantments.
fn flat_enchants(data: &Mapping, path: &FieldPath) -> Result<Vec<Enchantment>> {
    match data.get("stored-enchants") {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Mapping(entries)) => entries
            .iter()
            .map(|(name, level)| {
                Ok(Enchantment {
                    key: None,
                    enchant: Some(key_text(name)),
                    level: Some(i64::from_value(level, path)?),
                })
            })
            .collect(),
        Some(raw) => Err(path.violation("enchant to level mapping", raw)),
    }
}

/// `stored_enchants: {key: {enchant: ..., level: ...}}` style enchantments.
fn keyed_enchants(data: &Mapping, path: &FieldPath) -> Result<Vec<Enchantment>> {
    match data.get("stored_enchants") {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Mapping(entries)) => deserialize_keyed(entries, path),
        Some(raw) => Err(path.violation(FieldType::RecordList(Enchantment::NAME), raw)),
    }
}

/// An item amount used as recipe input or output.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Quantity {
    pub key: Option<String>,
    pub material: Option<String>,
    pub amount: Option<i64>,
    pub lore: Option<Vec<String>>,
    /// Replaces `material` in civmc configs.
    pub item_type: Option<String>,
    pub custom_key: Option<String>,
    pub meta: Option<ItemMeta>,
    pub enchantments: Vec<Enchantment>,
}

impl Record for Quantity {
    const NAME: &'static str = "Quantity";

    fn schema() -> Schema<Self> {
        Schema::new()
            .field("material", |q: &mut Quantity, v| q.material = v)
            .field_or("amount", 1, |q: &mut Quantity, v| q.amount = v)
            .field("lore", |q: &mut Quantity, v| q.lore = v)
            .field("type", |q: &mut Quantity, v| q.item_type = v)
            .renamed("custom_key", "custom-key", |q: &mut Quantity, v| {
                q.custom_key = v
            })
            .nested("meta", |q: &mut Quantity, v| q.meta = v)
            .special(
                "enchantments",
                FieldType::RecordList(Enchantment::NAME),
                keyed_enchants,
                |q: &mut Quantity, v| q.enchantments = v,
            )
    }

    fn set_key(&mut self, key: String) {
        self.key = Some(key);
    }

    /// Both enchantment layouts end up in `enchantments`.
    fn finish(&mut self) -> Result<()> {
        if self.enchantments.is_empty() {
            if let Some(meta) = &self.meta {
                self.enchantments = meta.stored_enchants.clone();
            }
        }
        Ok(())
    }
}

impl ItemStack for Quantity {
    fn amount(&self) -> Option<i64> {
        self.amount
    }

    fn item_name(&self) -> Option<&str> {
        self.material
            .as_deref()
            .or(self.item_type.as_deref())
            .or(self.custom_key.as_deref())
    }
}

/// One possible result of a random recipe.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RandomOutput {
    pub key: Option<String>,
    pub chance: Option<f64>,
    pub quantities: Vec<Quantity>,
}

impl Record for RandomOutput {
    const NAME: &'static str = "RandomOutput";

    fn schema() -> Schema<Self> {
        Schema::new()
            .field("chance", |o: &mut RandomOutput, v| o.chance = v)
            // the item keys are arbitrary (often the recipe's own name), so
            // everything beside `chance` is an item
            .special(
                "quantities",
                FieldType::RecordList(Quantity::NAME),
                |data, path| {
                    let items: Mapping = data
                        .iter()
                        .filter(|(key, _)| key.as_str() != Some("chance"))
                        .map(|(key, value)| (key.clone(), value.clone()))
                        .collect();
                    deserialize_keyed::<Quantity>(&items, path)
                },
                |o: &mut RandomOutput, v| o.quantities = v,
            )
    }

    fn set_key(&mut self, key: String) {
        self.key = Some(key);
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Recipe {
    pub key: Option<String>,
    pub production_time: Option<Duration>,
    pub fuel_consumption_intervall: Option<Duration>,
    pub name: Option<String>,
    pub recipe_type: Option<RecipeType>,
    pub input: Option<Vec<Quantity>>,
    pub output: Option<Vec<Quantity>>,
    /// Random outputs, used instead of `output` by RANDOM recipes.
    pub outputs: Option<Vec<RandomOutput>>,
    pub health_gained: Option<i64>,
    pub compact_lore: Option<String>,
    pub excluded_materials: Option<Vec<String>>,
    /// Target factory of an UPGRADE recipe.
    pub factory: Option<String>,
}

impl Record for Recipe {
    const NAME: &'static str = "Recipe";

    fn schema() -> Schema<Self> {
        Schema::new()
            .field("production_time", |r: &mut Recipe, v| r.production_time = v)
            .field("fuel_consumption_intervall", |r: &mut Recipe, v| {
                r.fuel_consumption_intervall = v
            })
            .field("name", |r: &mut Recipe, v| r.name = v)
            .field("type", |r: &mut Recipe, v| r.recipe_type = v)
            .records("input", |r: &mut Recipe, v| r.input = v)
            .records("output", |r: &mut Recipe, v| r.output = v)
            .records("outputs", |r: &mut Recipe, v| r.outputs = v)
            .field("health_gained", |r: &mut Recipe, v| r.health_gained = v)
            .field("compact_lore", |r: &mut Recipe, v| r.compact_lore = v)
            .field("excluded_materials", |r: &mut Recipe, v| {
                r.excluded_materials = v
            })
            .field("factory", |r: &mut Recipe, v| r.factory = v)
    }

    fn set_key(&mut self, key: String) {
        self.key = Some(key);
    }
}

impl Recipe {
    /// Identifier factories use to reference this recipe.
    pub fn id(&self) -> &str {
        self.key.as_deref().or(self.name.as_deref()).unwrap_or("")
    }

    /// Display name, falling back to the identifier.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or_else(|| self.id())
    }

    pub fn is_type(&self, recipe_type: RecipeType) -> bool {
        self.recipe_type == Some(recipe_type)
    }

    pub fn inputs(&self) -> &[Quantity] {
        self.input.as_deref().unwrap_or_default()
    }

    pub fn random_outputs(&self) -> &[RandomOutput] {
        self.outputs.as_deref().unwrap_or_default()
    }

    /// Whether the recipe yields a random output table instead of a fixed output.
    pub fn has_random_output(&self) -> bool {
        self.output.as_ref().is_none_or(|o| o.is_empty()) && !self.random_outputs().is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SetupCost {
    pub key: Option<String>,
    pub material: Option<String>,
    pub amount: Option<i64>,
    /// civmc items look like `{v: 3839, ==: org.bukkit.inventory.ItemStack, type: CHARCOAL}`
    pub item_type: Option<String>,
    pub custom_key: Option<String>,
}

impl Record for SetupCost {
    const NAME: &'static str = "SetupCost";

    fn schema() -> Schema<Self> {
        Schema::new()
            .field("material", |c: &mut SetupCost, v| c.material = v)
            .field("amount", |c: &mut SetupCost, v| c.amount = v)
            .field("type", |c: &mut SetupCost, v| c.item_type = v)
            .renamed("custom_key", "custom-key", |c: &mut SetupCost, v| {
                c.custom_key = v
            })
    }

    fn set_key(&mut self, key: String) {
        self.key = Some(key);
    }
}

impl ItemStack for SetupCost {
    fn amount(&self) -> Option<i64> {
        self.amount
    }

    fn item_name(&self) -> Option<&str> {
        self.material
            .as_deref()
            .or(self.item_type.as_deref())
            .or(self.custom_key.as_deref())
    }
}

/// A factory's recipes: names as written in the config until
/// [`crate::resolve::resolve`] swaps them for the recipes themselves.
#[derive(Debug, Clone, PartialEq)]
pub enum FactoryRecipes {
    Names(Vec<String>),
    Resolved(Vec<Rc<Recipe>>),
}

impl Default for FactoryRecipes {
    fn default() -> Self {
        FactoryRecipes::Names(Vec::new())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Factory {
    pub key: Option<String>,
    pub factory_type: Option<FactoryType>,
    pub name: String,
    pub citadel_break_reduction: Option<f64>,
    pub setupcost: Option<Vec<SetupCost>>,
    pub recipes: FactoryRecipes,
}

impl Record for Factory {
    const NAME: &'static str = "Factory";

    fn schema() -> Schema<Self> {
        Schema::new()
            .field("type", |f: &mut Factory, v| f.factory_type = v)
            .field("name", |f: &mut Factory, v: Option<String>| {
                f.name = v.unwrap_or_default()
            })
            .field("citadelBreakReduction", |f: &mut Factory, v| {
                f.citadel_break_reduction = v
            })
            .records("setupcost", |f: &mut Factory, v| f.setupcost = v)
            .field("recipes", |f: &mut Factory, v: Option<Vec<String>>| {
                f.recipes = FactoryRecipes::Names(v.unwrap_or_default())
            })
    }

    fn set_key(&mut self, key: String) {
        self.key = Some(key);
    }
}

impl Factory {
    pub fn setup_costs(&self) -> &[SetupCost] {
        self.setupcost.as_deref().unwrap_or_default()
    }

    /// Resolved recipes; empty until resolution has run.
    pub fn recipes(&self) -> &[Rc<Recipe>] {
        match &self.recipes {
            FactoryRecipes::Resolved(recipes) => recipes,
            FactoryRecipes::Names(_) => &[],
        }
    }

    pub fn recipe_names(&self) -> Vec<&str> {
        match &self.recipes {
            FactoryRecipes::Names(names) => names.iter().map(String::as_str).collect(),
            FactoryRecipes::Resolved(recipes) => recipes.iter().map(|r| r.id()).collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fuel {
    pub key: Option<String>,
    pub material: Option<String>,
    pub item_type: Option<String>,
}

impl Record for Fuel {
    const NAME: &'static str = "Fuel";

    fn schema() -> Schema<Self> {
        Schema::new()
            .field("material", |f: &mut Fuel, v| f.material = v)
            .field("type", |f: &mut Fuel, v| f.item_type = v)
    }

    fn set_key(&mut self, key: String) {
        self.key = Some(key);
    }
}

impl Fuel {
    pub fn item_name(&self) -> Option<&str> {
        self.material.as_deref().or(self.item_type.as_deref())
    }
}

/// One edge of the upgrade graph: the upgrade recipe and the factory on the
/// other end of it.
#[derive(Debug, Clone, PartialEq)]
pub struct UpgradeEdge {
    pub recipe: Rc<Recipe>,
    pub factory: String,
}

/// Factory name to its upgrade edges, in discovery order.
pub type UpgradeMap = BTreeMap<String, Vec<UpgradeEdge>>;

/// A whole FactoryMod config document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub default_update_time: Option<Duration>,
    pub default_fuel: Option<Vec<Fuel>>,
    pub default_fuel_consumption_intervall: Option<Duration>,
    pub default_return_rate: Option<f64>,
    pub default_break_grace_period: Option<Duration>,
    pub decay_intervall: Option<Duration>,
    pub decay_amount: Option<i64>,
    pub default_health: Option<i64>,
    pub disable_nether: Option<bool>,
    pub use_recipe_yamlidentifiers: Option<bool>,
    pub log_inventories: Option<bool>,
    pub force_include_default: Option<bool>,

    pub factories: Option<Vec<Factory>>,
    pub recipes: Option<Vec<Rc<Recipe>>>,

    /// Filled in by resolution.
    pub upgrades_to: UpgradeMap,
    pub upgrades_from: UpgradeMap,
}

impl Record for Config {
    const NAME: &'static str = "Config";

    fn schema() -> Schema<Self> {
        Schema::new()
            .field("default_update_time", |c: &mut Config, v| {
                c.default_update_time = v
            })
            .records("default_fuel", |c: &mut Config, v| c.default_fuel = v)
            .field("default_fuel_consumption_intervall", |c: &mut Config, v| {
                c.default_fuel_consumption_intervall = v
            })
            .field("default_return_rate", |c: &mut Config, v| {
                c.default_return_rate = v
            })
            .field("default_break_grace_period", |c: &mut Config, v| {
                c.default_break_grace_period = v
            })
            .field("decay_intervall", |c: &mut Config, v| c.decay_intervall = v)
            .field("decay_amount", |c: &mut Config, v| c.decay_amount = v)
            .field("default_health", |c: &mut Config, v| c.default_health = v)
            .field("disable_nether", |c: &mut Config, v| c.disable_nether = v)
            .field("use_recipe_yamlidentifiers", |c: &mut Config, v| {
                c.use_recipe_yamlidentifiers = v
            })
            .field("log_inventories", |c: &mut Config, v| c.log_inventories = v)
            .field("force_include_default", |c: &mut Config, v| {
                c.force_include_default = v
            })
            .records("factories", |c: &mut Config, v| c.factories = v)
            .records("recipes", |c: &mut Config, v: Option<Vec<Recipe>>| {
                c.recipes = v.map(|recipes| recipes.into_iter().map(Rc::new).collect())
            })
    }

    fn set_key(&mut self, _key: String) {}
}

impl Config {
    pub fn factories(&self) -> &[Factory] {
        self.factories.as_deref().unwrap_or_default()
    }

    pub fn recipes(&self) -> &[Rc<Recipe>] {
        self.recipes.as_deref().unwrap_or_default()
    }

    pub fn fuels(&self) -> &[Fuel] {
        self.default_fuel.as_deref().unwrap_or_default()
    }

    pub fn factory(&self, name: &str) -> Option<&Factory> {
        self.factories().iter().find(|f| f.name == name)
    }

    pub fn upgrades_to(&self, factory: &str) -> &[UpgradeEdge] {
        self.upgrades_to.get(factory).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn upgrades_from(&self, factory: &str) -> &[UpgradeEdge] {
        self.upgrades_from.get(factory).map(Vec::as_slice).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::duration::Seconds;
    use crate::error::Error;
    use crate::schema::deserialize;

    fn mapping(yaml: &str) -> Mapping {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_enum_labels_round_trip() {
        for t in RecipeType::ALL {
            assert_eq!(t.label().parse::<RecipeType>().unwrap(), *t);
        }
        assert_eq!("FCC".parse::<FactoryType>().unwrap(), FactoryType::Fcc);
        assert!("fcc".parse::<FactoryType>().is_err());
    }

    #[test]
    fn test_unknown_enum_label_is_schema_violation() {
        let err = deserialize::<Recipe>(&mapping("type: SMELT")).unwrap_err();
        assert!(matches!(
            err,
            Error::SchemaViolation { record: "Recipe", field: "type", .. }
        ));
    }

    #[test]
    fn test_malformed_duration_aborts_recipe() {
        let err = deserialize::<Recipe>(&mapping("production_time: 5x")).unwrap_err();
        match err {
            Error::InvalidField {
                record: "Recipe",
                field: "production_time",
                source,
            } => assert!(matches!(*source, Error::InvalidDurationUnit { unit: 'x', .. })),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_malformed_duration_message_names_field_and_value() {
        let msg = crate::load_config("recipes:\n  smelt_iron:\n    production_time: 5x\n")
            .unwrap_err()
            .to_string();
        assert!(msg.starts_with("Recipe.production_time: "), "{}", msg);
        assert!(msg.contains("\"5x\""), "{}", msg);
    }

    #[test]
    fn test_quantity_defaults_and_custom_key() {
        let q: Quantity = deserialize(&mapping("type: CHARCOAL\ncustom-key: heliodor")).unwrap();
        assert_eq!(q.amount, Some(1));
        assert_eq!(q.material, None);
        assert_eq!(q.item_name(), Some("CHARCOAL"));
        assert_eq!(q.custom_key.as_deref(), Some("heliodor"));
        assert!(q.enchantments.is_empty());
    }

    #[test]
    fn test_keyed_stored_enchants() {
        let q: Quantity = deserialize(&mapping(
            "material: ENCHANTED_BOOK\nstored_enchants:\n  e1: {enchant: DURABILITY, level: 3}\n  e2: {enchant: MENDING, level: 1}",
        ))
        .unwrap();
        let enchants: Vec<_> = q
            .enchantments
            .iter()
            .map(|e| (e.enchant.as_deref().unwrap(), e.level.unwrap()))
            .collect();
        assert_eq!(enchants, [("DURABILITY", 3), ("MENDING", 1)]);
    }

    #[test]
    fn test_meta_stored_enchants() {
        let q: Quantity = deserialize(&mapping(
            "type: ENCHANTED_BOOK\nmeta:\n  display-name: Tome\n  stored-enchants:\n    DIG_SPEED: 5",
        ))
        .unwrap();
        assert_eq!(q.meta.as_ref().unwrap().display_name.as_deref(), Some("Tome"));
        assert_eq!(q.enchantments.len(), 1);
        assert_eq!(q.enchantments[0].enchant.as_deref(), Some("DIG_SPEED"));
        assert_eq!(q.enchantments[0].level, Some(5));
    }

    #[test]
    fn test_random_output_quantities_skip_chance() {
        let o: RandomOutput = deserialize(&mapping(
            "chance: 0.25\ndragon_egg:\n  material: DRAGON_EGG\n  amount: 2",
        ))
        .unwrap();
        assert_eq!(o.chance, Some(0.25));
        assert_eq!(o.quantities.len(), 1);
        assert_eq!(o.quantities[0].key.as_deref(), Some("dragon_egg"));
        assert_eq!(o.quantities[0].amount, Some(2));
    }

    #[test]
    fn test_factory_fields() {
        let f: Factory = deserialize(&mapping(
            "type: FCC\nname: Smelter\ncitadelBreakReduction: 0.5\nsetupcost:\n  iron:\n    material: IRON_INGOT\n    amount: 64\nrecipes: [smelt_iron, repair]",
        ))
        .unwrap();
        assert_eq!(f.factory_type, Some(FactoryType::Fcc));
        assert_eq!(f.name, "Smelter");
        assert_eq!(f.citadel_break_reduction, Some(0.5));
        assert_eq!(f.setup_costs()[0].key.as_deref(), Some("iron"));
        assert_eq!(f.recipe_names(), ["smelt_iron", "repair"]);
        assert!(f.recipes().is_empty());
    }

    #[test]
    fn test_config_round_trip_of_declared_fields() {
        let config: Config = deserialize(&mapping(
            r#"
default_update_time: 5s
default_fuel:
  charcoal:
    material: CHARCOAL
default_fuel_consumption_intervall: 2s
default_return_rate: 0.5
default_break_grace_period: 7d
decay_intervall: 1h
decay_amount: 20
default_health: 10000
disable_nether: false
use_recipe_yamlidentifiers: true
log_inventories: true
force_include_default: false
"#,
        ))
        .unwrap();
        assert_eq!(config.default_update_time.unwrap().seconds(), Seconds::Whole(5));
        assert_eq!(config.fuels()[0].item_name(), Some("CHARCOAL"));
        assert_eq!(config.fuels()[0].key.as_deref(), Some("charcoal"));
        assert_eq!(config.default_return_rate, Some(0.5));
        assert_eq!(
            config.default_break_grace_period.unwrap().seconds(),
            Seconds::Whole(604_800)
        );
        assert_eq!(config.decay_intervall.unwrap().seconds(), Seconds::Whole(3600));
        assert_eq!(config.decay_amount, Some(20));
        assert_eq!(config.default_health, Some(10000));
        assert_eq!(config.disable_nether, Some(false));
        assert_eq!(config.use_recipe_yamlidentifiers, Some(true));
        assert_eq!(config.log_inventories, Some(true));
        assert_eq!(config.force_include_default, Some(false));
        assert!(config.factories().is_empty());
        assert!(config.upgrades_to.is_empty());
    }

    #[test]
    fn test_random_recipe_detection() {
        let r: Recipe = deserialize(&mapping(
            "name: Lucky\ntype: RANDOM\noutputs:\n  common:\n    chance: 0.9\n    dirt: {material: DIRT}",
        ))
        .unwrap();
        assert!(r.has_random_output());
        assert_eq!(r.id(), "Lucky");
        assert!(r.is_type(RecipeType::Random));
    }
}
