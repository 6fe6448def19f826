//! Frozen lookup tables: copyrighted dictionaries, relation labels, selectors,
//! patterns and links.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use scraper::Selector;

/// Dictionaries whose content cannot be redistributed without explicit
/// permission. Rows sourced only from these are dropped unless the caller
/// turns `exclude_copyrighted` off.
pub const COPYRIGHTED_DICTIONARIES: &[&str] = &[
    "Petro-Sedim",
    "Legislație",
    "DLR",
    "DEX-școlar",
    "DRAM 2021",
    "DIN",
    "CADE",
    "DGL",
    "DLRLC",
    "Onomastic",
    "GER",
    "Sinonime82",
    "GAER",
    "Etnobotanic",
    "DELLR",
    "psi",
    "Enigmistică",
    "DELRIE",
    "DTLALL",
    "DEI",
    "DFL",
    "DTM",
    "DE",
    "DA",
    "MEO",
    "DMG",
    "DRAM 2015",
    "D.Religios",
    "DEXI",
    "MDTL",
    "Ortografic '01",
    "Antonime",
    "NODEX",
    "DOR",
    "Sinonime",
    "DCR2",
    "GTA",
    "DSL",
    "DS5",
    "DFLR",
    "DAR",
    "DGSSL",
    "DELR",
    "CECC",
    "DFS",
    "DifSem",
    "DAS",
    "DS",
    "DETS",
    "DTL",
    "MDA",
    "MDA2",
    "DOOM 3",
    "Epitete",
    "DGS",
    "DEXLRA",
    "DAN",
    "Șăineanu, ed. I",
    "DASLR",
];

static COPYRIGHTED: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| COPYRIGHTED_DICTIONARIES.iter().copied().collect());

pub fn is_copyrighted(source: &str) -> bool {
    COPYRIGHTED.contains(source)
}

/// Default site root; definition pages live under `definitie/<word>`
pub const BASE_URL: &str = "https://dexonline.ro/";
pub const DEFINITION_PATH: &str = "definitie";
/// Cookie carrying the dictionary flags
pub const PREFERENCES_COOKIE: &str = "prefs[anonymousPrefs]";

/// Tab ids on the definition page
pub const INFLECTION_TAB: &str = "tab_1";
pub const SYNTHESIS_TAB: &str = "tab_2";

/// Class carried by list items hidden behind an elision toggle
pub const ELISION_HIDDEN_CLASS: &str = "elisionHidden";

/// Tree node class, e.g. `type-meaning`
pub static TREE_TYPE: LazyLock<Regex> = LazyLock::new(|| pattern(r"^type-(\w+)$"));
/// Lemma with an optional homonym index, e.g. `da<sup>2</sup>`
pub static TABLE_LEMMA_WITH_INDEX: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"([a-zA-ZăĂâÂîÎșȘțȚ-]+)(<sup>(\d+)</sup>)?"));
pub static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| pattern(r"\s+"));

fn pattern(source: &str) -> Regex {
    Regex::new(source).unwrap_or_else(|e| panic!("invalid built-in pattern {source:?}: {e}"))
}

fn selector(source: &str) -> Selector {
    Selector::parse(source).unwrap_or_else(|e| panic!("invalid built-in selector {source:?}: {e}"))
}

/// Compiled selectors for the page structure
pub struct Selectors {
    pub tab_synthesis: Selector,
    pub tab_inflection: Selector,

    pub synthesis_heading: Selector,
    pub synthesis_heading_container: Selector,
    pub synthesis_pos: Selector,
    pub synthesis_body: Selector,
    pub meaning_container: Selector,
    pub meaning_row: Selector,
    pub meaning_tags: Selector,
    pub meaning_text: Selector,
    pub meaning_sources: Selector,
    pub meaning_relations: Selector,
    pub meaning_tree: Selector,
    pub etymology: Selector,

    pub inflection_entry: Selector,
    pub paradigm: Selector,
    pub paradigm_header: Selector,
    pub paradigm_lemma: Selector,
    pub paradigm_tags: Selector,
    pub paradigm_table: Selector,
    pub tbody: Selector,
    pub tr: Selector,
    pub td: Selector,
    pub ul: Selector,
    pub li: Selector,
}

pub static SELECTORS: LazyLock<Selectors> = LazyLock::new(|| Selectors {
    tab_synthesis: selector(&format!("#{SYNTHESIS_TAB}")),
    tab_inflection: selector(&format!("#{INFLECTION_TAB}")),

    synthesis_heading: selector("h3[class=tree-heading]"),
    synthesis_heading_container: selector("div"),
    synthesis_pos: selector("span[class=tree-pos-info]"),
    synthesis_body: selector("div[class=tree-body]"),
    meaning_container: selector("div[class=meaningContainer]"),
    meaning_row: selector("div[class=meaning-row]"),
    meaning_tags: selector(r#"span[class="tag-group meaning-tags"]"#),
    meaning_text: selector(r#"span[class="def html"]"#),
    meaning_sources: selector(r#"span[class="meaning-sources tag-group"]"#),
    meaning_relations: selector("div[class=meaning-relations]"),
    meaning_tree: selector("ul[class=meaningTree]"),
    etymology: selector("div[class=etymology]"),

    inflection_entry: selector("div[class=card-body]"),
    paradigm: selector("div[class=paraLexeme]"),
    paradigm_header: selector("div"),
    paradigm_lemma: selector("span[class=lexemeName]"),
    // The site really does emit a trailing space in this class attribute.
    paradigm_tags: selector(r#"span[class="tag "]"#),
    paradigm_table: selector("table[class=lexeme]"),
    tbody: selector("tbody"),
    tr: selector("tr"),
    td: selector("td"),
    ul: selector("ul"),
    li: selector("li"),
});
