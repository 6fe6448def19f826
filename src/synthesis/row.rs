//! Row and relation extraction
//!
//! A row is the content line under every node of a synthesis tree: tags,
//! source dictionaries and the text itself.

use scraper::ElementRef;
use serde::{Deserialize, Serialize};

use crate::constants::{is_copyrighted, SELECTORS};
use crate::document::{children, element_children, text, trimmed_text};
use crate::options::ParserOptions;

/// Content line of a dictionary entry (definition, example, etymology, ...)
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Row {
    pub tags: Vec<String>,
    pub sources: Vec<String>,
    pub value: String,
}

/// Kinds of relation a row can list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationKind {
    Synonym,
    Antonym,
    Diminutive,
    Augmentative,
}

impl RelationKind {
    /// Map a group label such as `"Sinonime:"` to its kind
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim().to_lowercase();
        let label = label.strip_suffix(':').unwrap_or(&label).trim();
        match label {
            "sinonime" => Some(Self::Synonym),
            "antonime" => Some(Self::Antonym),
            "diminutive" => Some(Self::Diminutive),
            "augmentative" => Some(Self::Augmentative),
            _ => None,
        }
    }
}

/// Related terms of a definition or expression
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Relations {
    pub synonyms: Vec<String>,
    pub antonyms: Vec<String>,
    pub diminutives: Vec<String>,
    pub augmentatives: Vec<String>,
}

impl Relations {
    pub fn get(&self, kind: RelationKind) -> &[String] {
        match kind {
            RelationKind::Synonym => &self.synonyms,
            RelationKind::Antonym => &self.antonyms,
            RelationKind::Diminutive => &self.diminutives,
            RelationKind::Augmentative => &self.augmentatives,
        }
    }

    fn bucket_mut(&mut self, kind: RelationKind) -> &mut Vec<String> {
        match kind {
            RelationKind::Synonym => &mut self.synonyms,
            RelationKind::Antonym => &mut self.antonyms,
            RelationKind::Diminutive => &mut self.diminutives,
            RelationKind::Augmentative => &mut self.augmentatives,
        }
    }
}

/// Extract the row held by `containers` (the `meaningContainer` elements of a
/// tree node).
///
/// Returns `None` when copyrighted content is excluded and every source is a
/// copyrighted dictionary. A row without any source counts as copyrighted.
pub fn extract_row(containers: &[ElementRef<'_>], options: &ParserOptions) -> Option<Row> {
    let selectors = &*SELECTORS;
    let sections: Vec<ElementRef<'_>> = containers
        .iter()
        .flat_map(|container| children(*container, &selectors.meaning_row))
        .collect();

    let sources: Vec<String> = sections
        .iter()
        .flat_map(|section| children(*section, &selectors.meaning_sources))
        .flat_map(element_children)
        .map(trimmed_text)
        .collect();

    if options.exclude_copyrighted && sources.iter().all(|source| is_copyrighted(source)) {
        log::debug!("dropping row sourced only from copyrighted dictionaries: {sources:?}");
        return None;
    }

    let tags = sections
        .iter()
        .flat_map(|section| children(*section, &selectors.meaning_tags))
        .flat_map(element_children)
        .map(text)
        .collect();

    let value = sections
        .iter()
        .flat_map(|section| children(*section, &selectors.meaning_text))
        .map(text)
        .collect::<String>()
        .trim()
        .to_string();

    Some(Row { tags, sources, value })
}

/// Extract the relation groups listed under `containers`.
///
/// The first element of each group is its label; groups with unknown labels
/// are skipped.
pub fn extract_relations(containers: &[ElementRef<'_>]) -> Relations {
    let mut relations = Relations::default();

    let groups = containers
        .iter()
        .flat_map(|container| children(*container, &SELECTORS.meaning_relations))
        .flat_map(element_children);

    for group in groups {
        let mut members = element_children(group);
        let Some(label) = members.next() else {
            continue;
        };

        let label = text(label);
        let Some(kind) = RelationKind::from_label(&label) else {
            log::debug!("skipping relation group with unknown label {label:?}");
            continue;
        };

        relations.bucket_mut(kind).extend(
            members
                .map(trimmed_text)
                .filter(|term| !term.is_empty()),
        );
    }

    relations
}
