//! Sorts a decoded database into entity categories.
//!
//! Flat (non-table) top-level entries are variables; table entries are
//! matched against a fixed set of key heuristics and, when nothing matches,
//! searched recursively for nested entities.

use indexmap::IndexMap;
use serde::Serialize;

use crate::text::{clean_string, clean_table};
use crate::{LuaString, Table, Value};

pub type Entities = IndexMap<LuaString, Table>;

/// Skills, the four attributes, and the two internal voices.
pub const SKILL_NAMES: &[&str] = &[
    "Logic",
    "Encyclopedia",
    "Rhetoric",
    "Drama",
    "Conceptualization",
    "Visual Calculus",
    "Volition",
    "Inland Empire",
    "Empathy",
    "Authority",
    "Suggestion",
    "Esprit de Corps",
    "Endurance",
    "Pain Threshold",
    "Physical Instrument",
    "Electrochemistry",
    "Shivers",
    "Half Light",
    "Hand/Eye Coordination",
    "Perception",
    "Reaction Speed",
    "Savoir Faire",
    "Interfacing",
    "Composure",
    "Intellect",
    "Psyche",
    "Fysique",
    "Motorics",
    "Ancient Reptilian Brain",
    "Limbic System",
];

const TASK_PREFIX: &str = "TASK.";
const SUBSTANCE_PREFIX: &str = "SUBSTANCE.";

const ACTOR_FLAGS: &[&str] = &["IsNPC", "Is_Actor"];
const THOUGHT_KEYS: &[&str] = &["thoughtType", "isThought", "fixtureDescription", "fixtureBonus"];
const ITEM_FLAGS: &[&str] = &["IsItem", "Is_Item"];
const ITEM_KEYS: &[&str] = &["itemType", "itemGroup", "itemValue", "equipOrb", "equipSlot"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Item,
    Npc,
    Thought,
    Skill,
    WorldObject,
    Unclassified,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GameData {
    pub items: Entities,
    pub npcs: Entities,
    pub thoughts: Entities,
    pub skills: Entities,
    pub world_objects: Entities,
    pub unclassified: Entities,

    pub task_variables: Table,
    pub substance_variables: Table,
    pub game_variables: Table,
    pub all_variables: Table,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub items: usize,
    pub npcs: usize,
    pub thoughts: usize,
    pub skills: usize,
    pub world_objects: usize,
    pub unclassified: usize,
    pub task_variables: usize,
    pub substance_variables: usize,
    pub game_variables: usize,
    pub all_variables: usize,
}

impl GameData {
    pub fn entities(&self, category: Category) -> &Entities {
        match category {
            Category::Item => &self.items,
            Category::Npc => &self.npcs,
            Category::Thought => &self.thoughts,
            Category::Skill => &self.skills,
            Category::WorldObject => &self.world_objects,
            Category::Unclassified => &self.unclassified,
        }
    }

    fn entities_mut(&mut self, category: Category) -> &mut Entities {
        match category {
            Category::Item => &mut self.items,
            Category::Npc => &mut self.npcs,
            Category::Thought => &mut self.thoughts,
            Category::Skill => &mut self.skills,
            Category::WorldObject => &mut self.world_objects,
            Category::Unclassified => &mut self.unclassified,
        }
    }

    /// Strips formatting control characters from every entity's strings.
    pub fn clean(mut self) -> Self {
        for entities in [
            &mut self.items,
            &mut self.npcs,
            &mut self.thoughts,
            &mut self.skills,
            &mut self.world_objects,
            &mut self.unclassified,
        ] {
            *entities = clean_entities(entities);
        }
        self
    }

    pub fn summary(&self) -> Summary {
        Summary {
            items: self.items.len(),
            npcs: self.npcs.len(),
            thoughts: self.thoughts.len(),
            skills: self.skills.len(),
            world_objects: self.world_objects.len(),
            unclassified: self.unclassified.len(),
            task_variables: self.task_variables.len(),
            substance_variables: self.substance_variables.len(),
            game_variables: self.game_variables.len(),
            all_variables: self.all_variables.len(),
        }
    }
}

pub fn classify(data: &Table) -> GameData {
    let mut game_data = GameData::default();

    for (key, value) in data {
        if value.is_table() {
            continue;
        }
        game_data.all_variables.insert(key.clone(), value.clone());
        let bucket = if key.starts_with(TASK_PREFIX) {
            &mut game_data.task_variables
        } else if key.starts_with(SUBSTANCE_PREFIX) {
            &mut game_data.substance_variables
        } else {
            &mut game_data.game_variables
        };
        bucket.insert(key.clone(), value.clone());
    }

    walk(data, &mut game_data);
    game_data
}

pub fn clean_entities(entities: &Entities) -> Entities {
    entities
        .iter()
        .map(|(key, object)| (key.clone(), clean_table(object)))
        .collect()
}

fn walk(data: &Table, game_data: &mut GameData) {
    for (key, value) in data {
        let Some(object) = value.as_table() else {
            continue;
        };
        match classify_object(key, object) {
            Some(category) => {
                game_data
                    .entities_mut(category)
                    .insert(key.clone(), object.clone());
            }
            None => walk(object, game_data),
        }
    }
}

/// First matching rule wins; `None` means the object should be searched for
/// nested entities instead.
pub fn classify_object(key: &LuaString, object: &Table) -> Option<Category> {
    let name = display_name(key, object);
    let is_skill_name = name.as_str().is_some_and(|name| SKILL_NAMES.contains(&name));

    if is_skill_name && has_any(object, ACTOR_FLAGS) {
        return Some(Category::Skill);
    }
    if ACTOR_FLAGS.iter().any(|flag| is_truthy(object.get(flag))) {
        return Some(Category::Npc);
    }
    if has_any(object, THOUGHT_KEYS) {
        return Some(Category::Thought);
    }
    if ITEM_FLAGS.iter().any(|flag| is_truthy(object.get(flag))) || has_any(object, ITEM_KEYS) {
        return Some(Category::Item);
    }
    if object.contains_key("character_short_name") && object.contains_key("Articy_Id") {
        return Some(Category::WorldObject);
    }
    if object.contains_key("Articy_Id") && !name.is_empty() && !is_skill_name {
        return Some(Category::Unclassified);
    }
    None
}

fn display_name(key: &LuaString, object: &Table) -> LuaString {
    object
        .get("Name")
        .and_then(Value::as_lua_str)
        .map(clean_string)
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| key.clone())
}

fn has_any(object: &Table, keys: &[&str]) -> bool {
    keys.iter().any(|key| object.contains_key(key))
}

fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Boolean(b)) => *b,
        Some(Value::String(s)) => s
            .as_str()
            .is_some_and(|text| text.eq_ignore_ascii_case("true")),
        _ => false,
    }
}
