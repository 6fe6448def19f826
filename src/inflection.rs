//! Inflection tab extraction
//!
//! Every inflection model is an HTML table whose cells may span several rows
//! and columns. The table is expanded back into a full rectangular grid, with
//! a spanning cell's text repeated in every slot it covers.

use std::collections::VecDeque;
use std::num::IntErrorKind;

use scraper::{ElementRef, Html};
use serde::{Deserialize, Serialize};

use crate::constants::{ELISION_HIDDEN_CLASS, SELECTORS, TABLE_LEMMA_WITH_INDEX, WHITESPACE_RUN};
use crate::document::{attr, children, element_children, first_child, has_class, text, trimmed_text};
use crate::error::{MalformedMarkup, Result};
use crate::options::{MalformedPolicy, ParserOptions};

/// Largest `colspan` a browser honors
pub const MAX_COLSPAN: usize = 1000;
/// Largest `rowspan` a browser honors
pub const MAX_ROWSPAN: usize = 65534;

/// Heading of an inflection model
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InflectionHeader {
    pub tags: Vec<String>,
    /// Zero-based homonym index (`da²` has index 1)
    pub index: usize,
    pub lemma: String,
}

/// Inflection model with its fully expanded table
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InflectionTable {
    #[serde(flatten)]
    pub header: InflectionHeader,
    /// Rows of the table; every row has the same number of columns
    pub table: Vec<Vec<String>>,
}

/// A table cell as written in the markup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceCell {
    pub text: String,
    pub rowspan: usize,
    pub colspan: usize,
}

impl SourceCell {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            rowspan: 1,
            colspan: 1,
        }
    }

    pub fn spanning(text: impl Into<String>, rowspan: usize, colspan: usize) -> Self {
        Self {
            text: text.into(),
            rowspan: rowspan.max(1),
            colspan: colspan.max(1),
        }
    }

    fn from_element(cell: ElementRef<'_>) -> Self {
        Self::spanning(
            cell_text(cell),
            span(cell, "rowspan", MAX_ROWSPAN),
            span(cell, "colspan", MAX_COLSPAN),
        )
    }
}

/// Scrape every inflection model of the inflection tab that passes the
/// matching mode and has a table.
pub fn scrape(document: &Html, options: &ParserOptions) -> Result<Vec<InflectionTable>> {
    let selectors = &*SELECTORS;
    let Some(tab) = document.select(&selectors.tab_inflection).next() else {
        return Ok(vec![]);
    };

    let mut tables = vec![];
    for entry in tab.select(&selectors.inflection_entry) {
        let paradigm = first_child(entry, &selectors.paradigm);
        match scrape_paradigm(paradigm, options) {
            Ok(Some(table)) => tables.push(table),
            Ok(None) => {}
            Err(error) => match options.on_malformed {
                MalformedPolicy::Abort => return Err(error.into()),
                MalformedPolicy::Skip => log::warn!("skipping inflection model: {error}"),
            },
        }
    }
    Ok(tables)
}

fn scrape_paradigm(
    paradigm: Option<ElementRef<'_>>,
    options: &ParserOptions,
) -> std::result::Result<Option<InflectionTable>, MalformedMarkup> {
    let header = parse_header(paradigm)?;
    if !options.accepts(&header.lemma) {
        log::debug!("skipping inflection model for {:?}: not {:?}", header.lemma, options.word);
        return Ok(None);
    }

    let table = match paradigm.and_then(|p| first_child(p, &SELECTORS.paradigm_table)) {
        Some(table) => materialize(table)?,
        None => vec![],
    };
    if table.is_empty() {
        // Some lemmas are listed in the inflection tab without a table.
        log::debug!("no inflection table for {:?}", header.lemma);
        return Ok(None);
    }

    Ok(Some(InflectionTable { header, table }))
}

/// Parse the heading of a `paraLexeme` block: lemma, homonym index and tags
pub fn parse_header(
    paradigm: Option<ElementRef<'_>>,
) -> std::result::Result<InflectionHeader, MalformedMarkup> {
    let selectors = &*SELECTORS;
    let sections: Vec<ElementRef<'_>> = paradigm
        .into_iter()
        .flat_map(|p| children(p, &selectors.paradigm_header))
        .collect();

    let lemma_element = sections
        .iter()
        .find_map(|section| first_child(*section, &selectors.paradigm_lemma))
        .ok_or(MalformedMarkup::MissingLemmaElement)?;

    let markup = lemma_element.inner_html();
    let captures = TABLE_LEMMA_WITH_INDEX
        .captures(&markup)
        .ok_or_else(|| MalformedMarkup::UnmatchedLemma { markup: markup.clone() })?;

    let lemma = captures[1].to_string();
    let index = match captures.get(3) {
        Some(number) => number
            .as_str()
            .parse::<usize>()
            .map_err(|_| MalformedMarkup::UnmatchedLemma { markup: markup.clone() })?
            .saturating_sub(1),
        None => 0,
    };

    let tags = sections
        .iter()
        .flat_map(|section| children(*section, &selectors.paradigm_tags))
        .flat_map(element_children)
        .map(text)
        .collect();

    Ok(InflectionHeader { tags, index, lemma })
}

/// Expand a `table.lexeme` element into a rectangular grid
pub fn materialize(table: ElementRef<'_>) -> std::result::Result<Vec<Vec<String>>, MalformedMarkup> {
    let selectors = &*SELECTORS;
    let rows: Vec<Vec<SourceCell>> = table
        .select(&selectors.tbody)
        .flat_map(|body| children(body, &selectors.tr))
        .map(|row| children(row, &selectors.td).map(SourceCell::from_element).collect())
        .collect();

    expand_grid(&rows)
}

/// Expand rows of spanning cells into a full grid.
///
/// Each column keeps a count of rows still covered by a cell above it. Those
/// slots are copied down from the previous row; the remaining free slots are
/// filled left to right by the row's own cells. A cell spilling past the last
/// free slot opens a new column.
pub fn expand_grid(rows: &[Vec<SourceCell>]) -> std::result::Result<Vec<Vec<String>>, MalformedMarkup> {
    let initial_width = rows.iter().map(Vec::len).max().unwrap_or(0);
    let mut carry = vec![0usize; initial_width];
    let mut grid: Vec<Vec<Option<String>>> = Vec::with_capacity(rows.len());

    for (i, cells) in rows.iter().enumerate() {
        let mut current: Vec<Option<String>> = vec![None; carry.len()];
        let mut free = VecDeque::new();

        for (j, remaining) in carry.iter_mut().enumerate() {
            if *remaining == 0 {
                free.push_back(j);
                continue;
            }

            let above = i
                .checked_sub(1)
                .and_then(|previous| grid[previous].get(j).cloned().flatten())
                .ok_or(MalformedMarkup::UnassignedCell { row: i, column: j })?;
            current[j] = Some(above);
            *remaining -= 1;
        }

        for cell in cells {
            for _ in 0..cell.colspan {
                let column = free.pop_front().unwrap_or_else(|| {
                    carry.push(0);
                    current.push(None);
                    carry.len() - 1
                });

                current[column] = Some(cell.text.clone());
                if cell.rowspan > 1 {
                    carry[column] = cell.rowspan - 1;
                }
            }
        }

        if !free.is_empty() {
            return Err(MalformedMarkup::UnconsumedColumns {
                row: i,
                remaining: free.len(),
            });
        }
        grid.push(current);
    }

    let width = carry.len();
    grid.into_iter()
        .enumerate()
        .map(|(i, mut row)| {
            row.resize(width, None);
            row.into_iter()
                .enumerate()
                .map(|(j, cell)| cell.ok_or(MalformedMarkup::UnassignedCell { row: i, column: j }))
                .collect::<std::result::Result<Vec<String>, _>>()
        })
        .collect()
}

/// Text of a table cell. List items are joined with ", " (skipping elided
/// ones); plain cells have their whitespace collapsed.
pub fn cell_text(cell: ElementRef<'_>) -> String {
    let selectors = &*SELECTORS;
    let items: Vec<ElementRef<'_>> = children(cell, &selectors.ul)
        .flat_map(|list| children(list, &selectors.li))
        .collect();

    if items.is_empty() {
        return WHITESPACE_RUN.replace_all(text(cell).trim(), " ").into_owned();
    }

    items
        .into_iter()
        .filter(|item| !has_class(*item, ELISION_HIDDEN_CLASS))
        .map(trimmed_text)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Span attribute of a cell, clamped to `1..=max`
fn span(cell: ElementRef<'_>, name: &str, max: usize) -> usize {
    let Some(value) = attr(cell, name) else {
        return 1;
    };
    match value.trim().parse::<usize>() {
        Ok(n) => n.clamp(1, max),
        Err(error) if *error.kind() == IntErrorKind::PosOverflow => max,
        Err(_) => 1,
    }
}
