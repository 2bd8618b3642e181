//! Wiki table rendering for a single resolved factory

use std::rc::Rc;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::duration::Seconds;
use crate::error::{Error, Result};
use crate::models::{Config, Factory, ItemStack, RandomOutput, Recipe, RecipeType, UpgradeEdge};

const NOT_APPLICABLE: &str = "{{n/a}}";
const NOT_APPLICABLE_PAIR: &str = "| colspan=\"2\" {{n/a}}";

/// Chances are printed with at least this many decimals...
const MIN_CHANCE_DECIMALS: usize = 1;
/// ...and at most this many. A chance still zero here cannot be printed.
const MAX_CHANCE_DECIMALS: usize = 6;

/// Bukkit material names whose wiki image is filed under another name.
const IMAGE_ALIASES: &[(&str, &str)] = &[
    ("Sulphur", "Gunpowder"),
    ("Ink Sack", "Ink Sac"),
    ("Exp Bottle", "Bottle O' Enchanting"),
    ("Eye Of Ender", "Eye of Ender"),
    ("Nether Stalk", "Nether Wart"),
    ("Workbench", "Crafting Table"),
    ("Quartz", "Nether Quartz"),
    ("Redstone", "Redstone Dust"),
    ("Iron Fence", "Iron Bars"),
    ("Jack O Lantern", "Jack o'Lantern"),
];

static WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[A-Za-z]+").expect("valid regex"));

fn title_case(text: &str) -> String {
    WORD.replace_all(text, |caps: &Captures| {
        let word = &caps[0];
        let mut chars = word.chars();
        match chars.next() {
            Some(first) => first.to_ascii_uppercase().to_string() + &chars.as_str().to_ascii_lowercase(),
            None => String::new(),
        }
    })
    .into_owned()
}

/// Wiki image markup for a material name like `IRON_INGOT`.
pub fn image(item_name: &str) -> String {
    let title = title_case(&item_name.replace('_', " "));
    let file = IMAGE_ALIASES
        .iter()
        .find(|(from, _)| *from == title)
        .map_or(title.as_str(), |(_, to)| *to);
    format!("[[File:{}.png|23px|middle]]", file)
}

/// `"{amount} {image}"` for each stack, comma separated.
pub fn quantity_cell<T: ItemStack>(items: &[T]) -> String {
    items
        .iter()
        .map(|item| {
            format!(
                "{} {}",
                item.amount().unwrap_or(1),
                image(item.item_name().unwrap_or("Unknown"))
            )
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Fuel burnt by one run of `recipe`.
pub fn fuel_cost(config: &Config, recipe: &Recipe) -> Option<Seconds> {
    Some(recipe.production_time? * config.default_fuel_consumption_intervall?)
}

fn time_cell(recipe: &Recipe) -> String {
    recipe
        .production_time
        .map_or_else(|| NOT_APPLICABLE.to_string(), |t| t.to_string())
}

fn fuel_cell(config: &Config, recipe: &Recipe) -> String {
    let Some(cost) = fuel_cost(config, recipe) else {
        return NOT_APPLICABLE.to_string();
    };
    // TODO: cycle through every default fuel instead of showing the first
    match config.fuels().first().and_then(|f| f.item_name()) {
        Some(fuel) => format!("{} {}", cost, image(fuel)),
        None => cost.to_string(),
    }
}

/// Format a probability as a percentage with as few decimals as keep it
/// non-zero, e.g. `0.001` as `0.1%` and `0.5` as `50%`.
pub fn format_chance(chance: f64) -> Result<String> {
    let percent = chance * 100.0;
    for decimals in MIN_CHANCE_DECIMALS..=MAX_CHANCE_DECIMALS {
        let text = format!("{:.*}", decimals, percent);
        if text.parse::<f64>().is_ok_and(|v| v != 0.0) {
            let trimmed = text.trim_end_matches('0').trim_end_matches('.');
            return Ok(format!("{}%", trimmed));
        }
    }
    Err(Error::RenderingAssumptionViolation(format!(
        "chance {} rounds to 0% at {} decimal places",
        chance, MAX_CHANCE_DECIMALS
    )))
}

fn anchor(recipe: &Recipe) -> String {
    format!("{}_outputs", recipe.display_name().replace(' ', "_"))
}

/// Renders one factory's page. Random-output recipes met while rendering the
/// recipe table are collected and get their own table afterwards.
struct Report<'a> {
    config: &'a Config,
    factory: &'a Factory,
    satellites: Vec<&'a Rc<Recipe>>,
}

impl<'a> Report<'a> {
    fn recipes_of(&self, keep: impl Fn(&Recipe) -> bool) -> impl Iterator<Item = &'a Rc<Recipe>> {
        self.factory.recipes().iter().filter(move |r| {
            let recipe: &Recipe = r;
            keep(recipe)
        })
    }

    fn repair_rows(&self) -> Vec<String> {
        self.recipes_of(|r| r.is_type(RecipeType::Repair))
            .map(|r| {
                [
                    "|-".to_string(),
                    format!("|{}", quantity_cell(r.inputs())),
                    format!(
                        "|{}",
                        r.health_gained
                            .map_or_else(|| NOT_APPLICABLE.to_string(), |h| h.to_string())
                    ),
                    format!("|{}", time_cell(r)),
                    format!("|{}", fuel_cell(self.config, r)),
                ]
                .join("\n")
            })
            .collect()
    }

    fn upgrade_rows(&self) -> Vec<String> {
        let from = self.config.upgrades_from(&self.factory.name);
        let to = self.config.upgrades_to(&self.factory.name);

        if from.is_empty() && to.is_empty() {
            return vec![format!("|-\n{}\n{}", NOT_APPLICABLE_PAIR, NOT_APPLICABLE_PAIR)];
        }

        // the two directions rarely have the same number of edges; pad the
        // shorter one so rows stay aligned
        (0..from.len().max(to.len()))
            .map(|i| {
                format!(
                    "|-\n{}\n{}",
                    upgrade_cells(from.get(i)),
                    upgrade_cells(to.get(i))
                )
            })
            .collect()
    }

    fn meta_table(&self) -> String {
        let mut lines = vec![
            "{| class=\"wikitable\"".to_string(),
            "|+".to_string(),
            "! colspan=\"4\" |Creation Cost".to_string(),
            "|-".to_string(),
            format!("| colspan=\"4\" |{}", quantity_cell(self.factory.setup_costs())),
            "|-".to_string(),
            "! colspan=\"4\" |Repair Cost".to_string(),
            "|-".to_string(),
            "!Cost".to_string(),
            "!Health Repaired".to_string(),
            "!Time".to_string(),
            "!Fuel".to_string(),
        ];
        lines.extend(self.repair_rows());
        lines.extend(
            ["|-", "!Upgrades From", "!Cost", "!Upgrades To", "!Cost"].map(String::from),
        );
        lines.extend(self.upgrade_rows());
        lines.push("|}".to_string());
        lines.join("\n")
    }

    fn output_cell(&mut self, recipe: &'a Rc<Recipe>) -> String {
        if recipe.has_random_output() {
            if !self.satellites.iter().any(|r| Rc::ptr_eq(r, recipe)) {
                self.satellites.push(recipe);
            }
            return format!("[[#{}|Random]]", anchor(recipe));
        }
        quantity_cell(recipe.output.as_deref().unwrap_or_default())
    }

    fn recipes_table(&mut self) -> String {
        let mut lines = ["{| class=\"wikitable\"", "!Recipe", "!Input", "!Output", "!Time", "!Fuel"]
            .map(String::from)
            .to_vec();
        let production: Vec<_> = self
            .recipes_of(|r| !r.is_type(RecipeType::Upgrade) && !r.is_type(RecipeType::Repair))
            .collect();
        for recipe in production {
            lines.push("|-".to_string());
            lines.push(format!("|{}", recipe.display_name()));
            lines.push(format!("|{}", quantity_cell(recipe.inputs())));
            let output = self.output_cell(recipe);
            lines.push(format!("|{}", output));
            lines.push(format!("|{}", time_cell(recipe)));
            lines.push(format!("|{}", fuel_cell(self.config, recipe)));
        }
        lines.push("|}".to_string());
        lines.join("\n")
    }

    fn satellite_table(recipe: &Recipe) -> Result<String> {
        let mut outputs: Vec<&RandomOutput> = recipe.random_outputs().iter().collect();
        let chance = |o: &RandomOutput| o.chance.unwrap_or(f64::NEG_INFINITY);
        outputs.sort_by(|a, b| chance(b).total_cmp(&chance(a)));

        let mut lines = vec![
            format!("{{| class=\"wikitable\" id=\"{}\"", anchor(recipe)),
            format!("|+ {}", recipe.display_name()),
            "!Chance".to_string(),
            "!Output".to_string(),
        ];
        for output in outputs {
            let chance = match output.chance {
                Some(c) => format_chance(c)?,
                None => NOT_APPLICABLE.to_string(),
            };
            lines.push("|-".to_string());
            lines.push(format!("|{}", chance));
            lines.push(format!("|{}", quantity_cell(&output.quantities)));
        }
        lines.push("|}".to_string());
        Ok(lines.join("\n"))
    }
}

fn upgrade_cells(edge: Option<&UpgradeEdge>) -> String {
    match edge {
        Some(edge) => format!("|{}\n|{}", edge.factory, quantity_cell(edge.recipe.inputs())),
        None => NOT_APPLICABLE_PAIR.to_string(),
    }
}

/// Render the wiki text for `factory`: the creation/repair/upgrade table, the
/// recipe table, then one table per random-output recipe.
pub fn render(config: &Config, factory: &Factory) -> Result<String> {
    let mut report = Report {
        config,
        factory,
        satellites: Vec::new(),
    };
    let mut blocks = vec![report.meta_table(), report.recipes_table()];
    for recipe in &report.satellites {
        blocks.push(Report::satellite_table(recipe)?);
    }
    Ok(blocks.join("\n\n"))
}
