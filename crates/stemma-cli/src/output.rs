//! Output formatting utilities

use serde::Serialize;
use stemma_core::{FamilyTree, ParentChildLink, Person, PersonId, UnionRecord};

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

impl From<&str> for OutputFormat {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Table,
        }
    }
}

/// Render a value as pretty JSON
pub fn to_json<T: Serialize>(data: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(data)?)
}

/// One table line for a person: id, display name, life dates
pub fn person_line(person: &Person) -> String {
    let mut line = format!("{}  {}", person.id, person.display_name());

    let mut dates = Vec::new();
    if let Some(birth) = person.birth_date {
        dates.push(format!("b. {}", birth));
    }
    if let Some(death) = person.death_date {
        dates.push(format!("d. {}", death));
    }
    if !dates.is_empty() {
        line.push_str(&format!(" ({})", dates.join(", ")));
    }
    line
}

/// One table line for a union, with partner names resolved against the tree
pub fn union_line(record: &UnionRecord, tree: &FamilyTree) -> String {
    let partner = |slot: &Option<PersonId>| match slot {
        Some(id) => match tree.find_person(id) {
            Some(person) => person.display_name(),
            None => format!("missing ({})", id),
        },
        None => "unknown".to_string(),
    };

    let mut line = format!(
        "{}  {}: {} <> {}",
        record.id,
        record.kind,
        partner(&record.partner_a),
        partner(&record.partner_b)
    );
    if let Some(start) = record.start_date {
        line.push_str(&format!(" from {}", start));
    }
    if let Some(end) = record.end_date {
        line.push_str(&format!(" until {}", end));
    }
    line
}

/// One table line for a parent-child link, names resolved against the tree
pub fn link_line(link: &ParentChildLink, tree: &FamilyTree) -> String {
    let name = |id: &PersonId| match tree.find_person(id) {
        Some(person) => person.display_name(),
        None => format!("missing ({})", id),
    };

    let marker = if link.adoptive { " (adoptive)" } else { "" };
    format!("{} -> {}{}", name(&link.parent), name(&link.child), marker)
}
