//! Authored content of the eight drag-and-drop levels.

use serde::Serialize;

use crate::components::item::Visual;
use crate::level::machine::{LevelContent, RoundContent, TargetSpec};
use crate::rules::stars::StarPolicy;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    Circle,
    Square,
    Triangle,
    Star,
    Pentagon,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    Red,
    Blue,
    Green,
    Yellow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Size {
    Big,
    Small,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Animal {
    Dog,
    Cat,
    Lion,
    Rabbit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Terrain {
    Land,
    Sky,
}

pub fn shape_match() -> LevelContent<Shape> {
    let data = [
        (Shape::Circle, "#FF6B6B", "l1_circle"),
        (Shape::Square, "#4ECDC4", "l1_square"),
        (Shape::Triangle, "#FFE66D", "l1_triangle"),
        (Shape::Star, "#FF9F43", "l1_star"),
        (Shape::Pentagon, "#A29BFE", "l1_pentagon"),
    ];
    // Shapes are drawn by the host; the icon stays empty.
    let items = data
        .iter()
        .map(|&(shape, color, _)| (shape, Visual::new("", color)))
        .collect();
    let targets = data
        .iter()
        .map(|&(shape, _, label)| TargetSpec::slot(shape, Visual::new("", "#dfe6e9").with_label(label)))
        .collect();
    LevelContent {
        rounds: vec![RoundContent::new(items, targets)],
        policy: StarPolicy::STANDARD,
    }
}

pub fn color_match() -> LevelContent<Color> {
    let data = [
        (Color::Red, "#FF6B6B", "l2_red", ["🍎", "🍓"]),
        (Color::Blue, "#4ECDC4", "l2_blue", ["🐳", "🚙"]),
        (Color::Green, "#90D056", "l2_green", ["🐸", "🐢"]),
        (Color::Yellow, "#FFE66D", "l2_yellow", ["🍌", "⭐️"]),
    ];
    let mut items = Vec::new();
    let mut targets = Vec::new();
    for (color, css, label, icons) in data {
        for icon in icons {
            items.push((color, Visual::new(icon, css)));
        }
        targets.push(TargetSpec::bin(color, Visual::new("🧺", css).with_label(label)));
    }
    LevelContent {
        rounds: vec![RoundContent::new(items, targets)],
        policy: StarPolicy::STANDARD,
    }
}

pub fn size_sort() -> LevelContent<Size> {
    let icons = ["🍎", "⭐️", "🚙", "🐸"];
    let mut items = Vec::new();
    for icon in icons {
        items.push((Size::Big, Visual::new(icon, "#FF9F43").with_scale(1.6)));
        items.push((Size::Small, Visual::new(icon, "#54a0ff").with_scale(0.7)));
    }
    let targets = vec![
        TargetSpec::bin(Size::Big, Visual::new("🧺", "#FF9F43").with_scale(1.5).with_label("l3_big")),
        TargetSpec::bin(Size::Small, Visual::new("🧺", "#54a0ff").with_scale(0.8).with_label("l3_small")),
    ];
    LevelContent {
        rounds: vec![RoundContent::new(items, targets)],
        policy: StarPolicy::STANDARD,
    }
}

pub fn number_order() -> LevelContent<u8> {
    let colors = ["#FF6B6B", "#4ECDC4", "#FFE66D", "#FF9F43", "#A29BFE"];
    let items = (1..=5u8)
        .zip(colors)
        .map(|(n, color)| (n, Visual::new(n.to_string(), color)))
        .collect();
    let targets = (1..=5u8)
        .map(|n| TargetSpec::ordinal(n, Visual::new("", "#dfe6e9")))
        .collect();
    LevelContent {
        rounds: vec![RoundContent::new(items, targets)],
        policy: StarPolicy::NUMBER_ORDER,
    }
}

pub fn phonics() -> LevelContent<char> {
    let words = [("CAT", "🐱", "#FFB86C"), ("DOG", "🐶", "#FF7675"), ("BUS", "🚌", "#74B9FF")];
    let rounds = words
        .iter()
        .map(|&(word, icon, color)| {
            let items = word
                .chars()
                .map(|c| (c, Visual::new(c.to_string(), color)))
                .collect();
            let targets = word
                .chars()
                .map(|c| TargetSpec::ordinal(c, Visual::new(icon, color)))
                .collect();
            RoundContent::new(items, targets).with_prompt(word)
        })
        .collect();
    LevelContent {
        rounds,
        policy: StarPolicy::Perfect,
    }
}

pub fn animal_match() -> LevelContent<Animal> {
    let data = [
        (Animal::Dog, "🐶", "#FF7675", "l6_dog"),
        (Animal::Cat, "🐱", "#FFE66D", "l6_cat"),
        (Animal::Lion, "🦁", "#fab1a0", "l6_lion"),
        (Animal::Rabbit, "🐰", "#74B9FF", "l6_rabbit"),
    ];
    let items = data
        .iter()
        .map(|&(animal, icon, color, _)| (animal, Visual::new(icon, color)))
        .collect();
    let targets = data
        .iter()
        .map(|&(animal, _, color, name)| TargetSpec::slot(animal, Visual::new("", color).with_label(name)))
        .collect();
    LevelContent {
        rounds: vec![RoundContent::new(items, targets)],
        policy: StarPolicy::MistakeCount,
    }
}

pub fn category_sort() -> LevelContent<Terrain> {
    let land = ["🚗", "🚌", "🏎️", "🚓"];
    let sky = ["✈️", "🚁", "🚀", "🛸"];
    let items = land
        .iter()
        .map(|icon| (Terrain::Land, Visual::new(*icon, "#ffffff")))
        .chain(sky.iter().map(|icon| (Terrain::Sky, Visual::new(*icon, "#ffffff"))))
        .collect();
    let targets = vec![
        TargetSpec::bin(Terrain::Land, Visual::new("🛣️", "#95a5a6").with_label("l7_land")),
        TargetSpec::bin(Terrain::Sky, Visual::new("☁️", "#74b9ff").with_label("l7_sky")),
    ];
    LevelContent {
        rounds: vec![RoundContent::new(items, targets)],
        policy: StarPolicy::MistakeCount,
    }
}

/// Daily routine: the kind is the step number.
pub fn sequence_order() -> LevelContent<u8> {
    let data = [
        (1u8, "🌅", "#ffeaa7", "l9_wakeup"),
        (2, "🪥", "#74b9ff", "l9_brush"),
        (3, "🍳", "#ff7675", "l9_breakfast"),
        (4, "🎒", "#a29bfe", "l9_school"),
    ];
    let items = data
        .iter()
        .map(|&(step, icon, color, label)| (step, Visual::new(icon, color).with_label(label)))
        .collect();
    let targets = data
        .iter()
        .map(|&(step, _, _, _)| TargetSpec::ordinal(step, Visual::new(step.to_string(), "#dfe6e9")))
        .collect();
    LevelContent {
        rounds: vec![RoundContent::new(items, targets)],
        policy: StarPolicy::MistakeCount,
    }
}
