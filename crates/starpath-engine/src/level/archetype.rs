use serde::{Deserialize, Serialize};

use crate::api::level::Level;
use crate::assets::session::SessionConfig;
use crate::boss::level::BossLevel;
use crate::level::content;
use crate::level::drag_level::DragLevel;

/// The puzzle families the core can build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Archetype {
    ShapeMatch,
    ColorMatch,
    SizeSort,
    NumberOrder,
    Phonics,
    AnimalMatch,
    CategorySort,
    SequenceOrder,
    Boss,
}

impl Archetype {
    /// The archetype that sits at `level_number` on the level map, if the core builds it.
    pub fn for_level_number(level_number: u32) -> Option<Archetype> {
        match level_number {
            1 => Some(Archetype::ShapeMatch),
            2 => Some(Archetype::ColorMatch),
            3 => Some(Archetype::SizeSort),
            4 => Some(Archetype::NumberOrder),
            5 => Some(Archetype::Phonics),
            6 => Some(Archetype::AnimalMatch),
            7 => Some(Archetype::CategorySort),
            9 => Some(Archetype::SequenceOrder),
            29 => Some(Archetype::Boss),
            _ => None,
        }
    }
}

/// Build the level described by `config`. `seed` drives every shuffle and roll.
pub fn build(archetype: Archetype, config: &SessionConfig, seed: u64) -> Box<dyn Level> {
    let n = config.level_number;
    let timing = config.timing.clone();
    match archetype {
        Archetype::ShapeMatch => Box::new(DragLevel::new(n, content::shape_match(), timing, seed)),
        Archetype::ColorMatch => Box::new(DragLevel::new(n, content::color_match(), timing, seed)),
        Archetype::SizeSort => Box::new(DragLevel::new(n, content::size_sort(), timing, seed)),
        Archetype::NumberOrder => Box::new(DragLevel::new(n, content::number_order(), timing, seed)),
        Archetype::Phonics => Box::new(DragLevel::new(n, content::phonics(), timing, seed)),
        Archetype::AnimalMatch => Box::new(DragLevel::new(n, content::animal_match(), timing, seed)),
        Archetype::CategorySort => Box::new(DragLevel::new(n, content::category_sort(), timing, seed)),
        Archetype::SequenceOrder => Box::new(DragLevel::new(n, content::sequence_order(), timing, seed)),
        Archetype::Boss => Box::new(BossLevel::new(n, timing, seed)),
    }
}
