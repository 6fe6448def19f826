//! Definition page parsing
//!
//! Runs the synthesis and inflection extractors over one parsed page.

use scraper::Html;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::inflection::{self, InflectionTable};
use crate::options::{MatchingMode, ParserOptions};
use crate::synthesis::{self, DictionaryEntry};

/// Everything extracted from a definition page
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Results {
    pub synthesis: Vec<DictionaryEntry>,
    pub inflection: Vec<InflectionTable>,
}

/// Parse the contents of a dexonline definition page
pub fn parse(contents: &str, options: &ParserOptions) -> Result<Results> {
    if options.mode == MatchingMode::Strict && options.word.is_empty() {
        return Err(Error::MissingWord);
    }

    let document = Html::parse_document(contents);

    let synthesis = synthesis::scrape(&document, options);
    let inflection = inflection::scrape(&document, options)?;

    log::debug!(
        "parsed {} synthesis entries and {} inflection models",
        synthesis.len(),
        inflection.len()
    );

    Ok(Results { synthesis, inflection })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MalformedMarkup;
    use crate::options::MalformedPolicy;
    use crate::synthesis::{Definition, Expression, Relations, Row};
    use crate::inflection::InflectionHeader;
    use pretty_assertions::assert_eq;

    const INTREGIME: &str = include_str!("../tests/fixtures/intregime.html");
    const DA: &str = include_str!("../tests/fixtures/da.html");

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn row(tags: &[&str], sources: &[&str], value: &str) -> Row {
        Row {
            tags: strings(tags),
            sources: strings(sources),
            value: value.to_string(),
        }
    }

    fn synonyms(values: &[&str]) -> Relations {
        Relations {
            synonyms: strings(values),
            ..Relations::default()
        }
    }

    #[test]
    fn test_parse_single_entry() {
        let results = parse(INTREGIME, &ParserOptions::default()).unwrap();
        let sources = ["DEX '09", "DEX '98", "DLRLC"];

        assert_eq!(
            results.synthesis,
            vec![DictionaryEntry {
                kind: "substantiv feminin".to_string(),
                lemma: "întregime".to_string(),
                examples: vec![],
                definitions: vec![Definition {
                    row: row(&[], &sources, "Calitatea de a fi întreg."),
                    definitions: vec![Definition {
                        row: row(
                            &["concretizat"],
                            &sources,
                            "Ansamblul elementelor care constituie un tot."
                        ),
                        ..Definition::default()
                    }],
                    examples: vec![],
                    expressions: vec![Expression {
                        row: row(&["locuțiune adverbială"], &sources, "În întregime = de tot."),
                        examples: vec![],
                        expressions: vec![],
                        relations: synonyms(&["complet"]),
                    }],
                    relations: synonyms(&["deplinătate", "integritate", "plenitudine", "totalitate"]),
                }],
                expressions: vec![],
                etymology: vec![row(&[], &["DEX '09", "DEX '98"], "Întreg + sufix -ime.")],
            }]
        );

        assert_eq!(
            results.inflection,
            vec![InflectionTable {
                header: InflectionHeader {
                    tags: strings(&["substantiv feminin"]),
                    index: 0,
                    lemma: "întregime".to_string(),
                },
                table: vec![
                    strings(&[
                        "substantiv feminin (F107) Surse flexiune: DOR",
                        "substantiv feminin (F107) Surse flexiune: DOR",
                        "nearticulat",
                        "articulat",
                    ]),
                    strings(&["nominativ-acuzativ", "singular", "întregime", "întregimea"]),
                    strings(&["nominativ-acuzativ", "plural", "întregimi", "întregimile"]),
                    strings(&["genitiv-dativ", "singular", "întregimi", "întregimii"]),
                    strings(&["genitiv-dativ", "plural", "întregimi", "întregimilor"]),
                    strings(&["vocativ", "singular", "—", "—"]),
                    strings(&["vocativ", "plural", "—", "—"]),
                ],
            }]
        );
    }

    #[test]
    fn test_copyright_can_be_included() {
        let options = ParserOptions {
            exclude_copyrighted: false,
            ..ParserOptions::default()
        };
        let results = parse(INTREGIME, &options).unwrap();

        // The DLRLC-only example under the first definition shows up.
        let definition = &results.synthesis[0].definitions[0];
        assert_eq!(definition.examples.len(), 1);
        assert_eq!(definition.examples[0].sources, strings(&["DLRLC"]));
    }

    #[test]
    fn test_strict_mode() {
        let lax = parse(DA, &ParserOptions::default()).unwrap();
        let lemmas: Vec<&str> = lax.synthesis.iter().map(|e| e.lemma.as_str()).collect();
        assert_eq!(lemmas, ["da", "da", "database"]);
        assert_eq!(lax.inflection.len(), 2);

        let strict = parse(DA, &ParserOptions::strict("da")).unwrap();
        let kinds: Vec<&str> = strict.synthesis.iter().map(|e| e.kind.as_str()).collect();
        assert_eq!(kinds, ["adverb", "verb"]);
        assert!(strict.inflection.iter().all(|table| table.header.lemma == "da"));

        let indices: Vec<usize> = strict.inflection.iter().map(|t| t.header.index).collect();
        assert_eq!(indices, [0, 1]);
        assert_eq!(strict.inflection[0].table, vec![strings(&["adverb (I8) Surse flexiune: DOR", "da"])]);
    }

    #[test]
    fn test_etymology_entries() {
        let results = parse(DA, &ParserOptions::strict("da")).unwrap();
        assert_eq!(
            results.synthesis[0].etymology,
            vec![
                row(
                    &["limba rusă", "limba sârbă, croată"],
                    &["DEX '09", "MDA2", "DEX '98", "NODEX"],
                    "da"
                ),
                row(
                    &["limba bulgară", "limba slavă (veche)"],
                    &["DEX '09", "MDA2", "DEX '98", "NODEX"],
                    "da, да"
                ),
            ]
        );
        assert_eq!(results.synthesis[0].definitions[0].relations.antonyms, strings(&["nu"]));
    }

    #[test]
    fn test_missing_table_is_dropped() {
        // "database" is listed in the inflection tab without a table.
        let results = parse(DA, &ParserOptions::strict("database")).unwrap();
        assert_eq!(results.synthesis.len(), 1);
        assert!(results.inflection.is_empty());
    }

    #[test]
    fn test_tables_are_rectangular() {
        let results = parse(DA, &ParserOptions::default()).unwrap();
        for model in &results.inflection {
            let width = model.table[0].len();
            assert!(model.table.iter().all(|row| row.len() == width));
        }
    }

    #[test]
    fn test_verb_table_spans() {
        let results = parse(DA, &ParserOptions::strict("da")).unwrap();
        let verb = &results.inflection[1];
        let head = "verb (VT93) Surse flexiune: DOR";
        let imperative = "imperativ pers. a II-a";
        let pluperfect = "mai mult ca perfect";

        assert_eq!(verb.header.tags, strings(&["verb", "grupa I", "conjugarea I"]));
        assert_eq!(
            verb.table,
            vec![
                strings(&[head, head, "infinitiv", "infinitiv lung", "participiu", "gerunziu", imperative, imperative]),
                strings(&[head, head, "da", "dare", "dat", "dând", "singular", "plural"]),
                strings(&[head, head, "da", "dare", "dat", "dând", "dă", "dați"]),
                strings(&["", "", "", "", "", "", "", ""]),
                strings(&[
                    "numărul",
                    "persoana",
                    "prezent",
                    "conjunctiv prezent",
                    "imperfect",
                    "perfect simplu",
                    pluperfect,
                    pluperfect,
                ]),
                strings(&[
                    "singular",
                    "I (eu)",
                    "dau",
                    "dau",
                    "dădeam, dedeam",
                    "dădui, dedei, detei",
                    "dădusem, dasem",
                    "dădusem, dasem",
                ]),
                strings(&["singular", "a II-a (tu)", "dai", "dai", "dădeai", "dăduși", "dăduseși", "dăduseși"]),
                strings(&["singular", "a III-a (el, ea)", "dă", "dea, deie", "dădea", "dădu", "dăduse", "dăduse"]),
            ]
        );
    }

    #[test]
    fn test_parse_is_idempotent() {
        let options = ParserOptions::default();
        assert_eq!(parse(DA, &options).unwrap(), parse(DA, &options).unwrap());
    }

    #[test]
    fn test_serialized_shape() {
        let results = parse(INTREGIME, &ParserOptions::default()).unwrap();
        let json = serde_json::to_value(&results).unwrap();

        let entry = &json["synthesis"][0];
        assert_eq!(entry["type"], "substantiv feminin");
        assert_eq!(entry["definitions"][0]["value"], "Calitatea de a fi întreg.");
        assert_eq!(
            entry["definitions"][0]["expressions"][0]["relations"]["synonyms"],
            serde_json::json!(["complet"])
        );

        let table = &json["inflection"][0];
        assert_eq!(table["lemma"], "întregime");
        assert_eq!(table["index"], 0);
        assert_eq!(table["table"].as_array().unwrap().len(), 7);

        let round_trip: Results = serde_json::from_value(json).unwrap();
        assert_eq!(round_trip, results);
    }

    #[test]
    fn test_malformed_table_policy() {
        let page = r#"<html><body><div id="tab_1"><div class="card-body">
            <div class="paraLexeme">
                <div><span class="lexemeName">rău</span></div>
                <table class="lexeme"><tr><td>a</td><td>b</td></tr><tr><td>c</td></tr></table>
            </div>
        </div></div></body></html>"#;

        let error = parse(page, &ParserOptions::default()).unwrap_err();
        assert!(matches!(
            error,
            Error::Malformed(MalformedMarkup::UnconsumedColumns { row: 1, remaining: 1 })
        ));

        let options = ParserOptions {
            on_malformed: MalformedPolicy::Skip,
            ..ParserOptions::default()
        };
        assert!(parse(page, &options).unwrap().inflection.is_empty());
    }

    #[test]
    fn test_strict_mode_requires_word() {
        let options = ParserOptions {
            mode: MatchingMode::Strict,
            ..ParserOptions::default()
        };
        assert!(matches!(parse(DA, &options), Err(Error::MissingWord)));
    }

    #[test]
    fn test_page_without_tabs() {
        let results = parse("<html><body><p>Nu am găsit.</p></body></html>", &ParserOptions::default()).unwrap();
        assert_eq!(results, Results::default());
    }
}
