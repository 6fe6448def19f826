//! Synthesis tab extraction
//!
//! The synthesis tab lists one heading and one body per lemma. Each body holds
//! a tree of definitions, expressions and examples (nested `meaningTree`
//! lists whose items carry a `type-<kind>` class) and a flat etymology list.

mod row;

pub use row::{extract_relations, extract_row, RelationKind, Relations, Row};

use scraper::{ElementRef, Html};
use serde::{Deserialize, Serialize};

use crate::constants::{SELECTORS, TREE_TYPE};
use crate::document::{children, element_children, text_excluding, trimmed_text};
use crate::options::ParserOptions;

pub type Example = Row;
pub type Etymology = Row;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Definition {
    #[serde(flatten)]
    pub row: Row,
    pub definitions: Vec<Definition>,
    pub examples: Vec<Example>,
    pub expressions: Vec<Expression>,
    pub relations: Relations,
}

/// Set phrase built on the lemma; never contains definitions
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Expression {
    #[serde(flatten)]
    pub row: Row,
    pub examples: Vec<Example>,
    pub expressions: Vec<Expression>,
    pub relations: Relations,
}

/// Children of a tree node, grouped by kind
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Tree {
    pub examples: Vec<Example>,
    pub definitions: Vec<Definition>,
    pub expressions: Vec<Expression>,
}

/// One lemma of the synthesis tab
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DictionaryEntry {
    /// Part of speech, e.g. "substantiv feminin"
    #[serde(rename = "type")]
    pub kind: String,
    pub lemma: String,
    pub examples: Vec<Example>,
    pub definitions: Vec<Definition>,
    pub expressions: Vec<Expression>,
    pub etymology: Vec<Etymology>,
}

/// Part of speech and lemma from a heading
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub kind: String,
    pub lemma: String,
}

/// Kind of a tree node, from its `type-<kind>` class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchKind {
    Example,
    Definition,
    Expression,
}

impl BranchKind {
    /// Classify a tree node. Nodes without a recognized `type-<kind>` class
    /// yield `None`.
    pub fn classify(node: ElementRef<'_>) -> Option<Self> {
        let kind = node
            .value()
            .classes()
            .find_map(|class| TREE_TYPE.captures(class))?;

        match &kind[1] {
            "example" => Some(Self::Example),
            "meaning" => Some(Self::Definition),
            "expression" => Some(Self::Expression),
            other => {
                log::debug!("skipping tree node of unknown kind {other:?}");
                None
            }
        }
    }
}

/// A parsed tree node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Branch {
    Example(Example),
    Definition(Definition),
    Expression(Expression),
}

/// Scrape every lemma of the synthesis tab that passes the matching mode
pub fn scrape(document: &Html, options: &ParserOptions) -> Vec<DictionaryEntry> {
    let selectors = &*SELECTORS;
    let Some(tab) = document.select(&selectors.tab_synthesis).next() else {
        return vec![];
    };

    let headers = children(tab, &selectors.synthesis_heading)
        .flat_map(|heading| children(heading, &selectors.synthesis_heading_container));
    let bodies = children(tab, &selectors.synthesis_body);

    let mut entries = vec![];
    for (header, body) in headers.zip(bodies) {
        let Header { kind, lemma } = parse_header(header);
        if !options.accepts(&lemma) {
            log::debug!("skipping synthesis entry for {lemma:?}: not {:?}", options.word);
            continue;
        }

        let Tree {
            examples,
            definitions,
            expressions,
        } = parse_tree(body, options);
        let etymology = parse_etymology(body, options);

        entries.push(DictionaryEntry {
            kind,
            lemma,
            examples,
            definitions,
            expressions,
            etymology,
        });
    }
    entries
}

/// Parse a heading container: the part of speech, and the lemma written
/// before any comma-separated forms.
pub fn parse_header(header: ElementRef<'_>) -> Header {
    let pos = &SELECTORS.synthesis_pos;
    let kind = children(header, pos)
        .map(trimmed_text)
        .collect::<String>()
        .to_lowercase();

    let forms = text_excluding(header, pos);
    let lemma = forms
        .trim()
        .split(", ")
        .next()
        .unwrap_or_default()
        .to_string();

    Header { kind, lemma }
}

/// Parse the `meaningTree` directly under `node` into its three kinds of
/// children, each in document order.
pub fn parse_tree(node: ElementRef<'_>, options: &ParserOptions) -> Tree {
    parse_subtree(node, options, true)
}

fn parse_subtree(node: ElementRef<'_>, options: &ParserOptions, with_definitions: bool) -> Tree {
    let mut tree = Tree::default();

    let branches = children(node, &SELECTORS.meaning_tree).flat_map(element_children);
    for branch in branches {
        let Some(kind) = BranchKind::classify(branch) else {
            continue;
        };
        if kind == BranchKind::Definition && !with_definitions {
            continue;
        }

        match parse_branch(branch, kind, options) {
            Some(Branch::Example(example)) => tree.examples.push(example),
            Some(Branch::Definition(definition)) => tree.definitions.push(definition),
            Some(Branch::Expression(expression)) => tree.expressions.push(expression),
            None => {}
        }
    }

    tree
}

/// Parse one tree node. A rejected row drops the node with everything under it.
pub fn parse_branch(branch: ElementRef<'_>, kind: BranchKind, options: &ParserOptions) -> Option<Branch> {
    let containers: Vec<ElementRef<'_>> = children(branch, &SELECTORS.meaning_container).collect();
    let row = extract_row(&containers, options)?;

    if kind == BranchKind::Example {
        return Some(Branch::Example(row));
    }

    let relations = extract_relations(&containers);
    let with_definitions = kind == BranchKind::Definition;
    let Tree {
        examples,
        definitions,
        expressions,
    } = parse_subtree(branch, options, with_definitions);

    let branch = if with_definitions {
        Branch::Definition(Definition {
            row,
            definitions,
            examples,
            expressions,
            relations,
        })
    } else {
        Branch::Expression(Expression {
            row,
            examples,
            expressions,
            relations,
        })
    };
    Some(branch)
}

/// Parse the flat etymology list of a body. Rejected rows are dropped one by one.
pub fn parse_etymology(body: ElementRef<'_>, options: &ParserOptions) -> Vec<Etymology> {
    let selectors = &*SELECTORS;
    children(body, &selectors.etymology)
        .flat_map(|section| children(section, &selectors.meaning_tree))
        .flat_map(element_children)
        .flat_map(|item| children(item, &selectors.meaning_container))
        .filter_map(|container| extract_row(&[container], options))
        .collect()
}
