//! Citation extraction from Brazilian legal texts.
//!
//! Detects articles (`Art. 74, § 1º, CF/88`), laws (`Lei 8.112/90`,
//! `Lei nº 8.112, de 1990`), súmulas (`Súmula 473 STF`, `Súmula Vinculante
//! 13`), and spelled-out codes (`Art. 186 do Código Civil`). Output is
//! normalized, deduplicated, and sorted.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;

/// Article + source-code abbreviation, e.g. `Art. 74, § 1º, CF/88`.
static ART_SOURCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?ix)
        Art(?:igo)?\.?\s+                 # 'Art.' or 'Artigo'
        (\d+)                             # article number
        (?:,?\s*§\s*(\d+º?))?             # optional paragraph
        (?:,?\s*(?:da|do|de)?\s*)?        # optional connector
        (CF(?:/88)?|CRFB(?:/88)?|CP|CC|CLT|CDC|CPC|CPP|ECA|CTN)  # source code
        ",
    )
    .expect("article+source pattern")
});

/// Article + law, e.g. `Art. 6º, inciso XXII, da Lei nº 14.133/21`.
static ART_LEI: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?ix)
        Art(?:igo)?\.?\s+
        (\d+º?)                           # article number (may carry º)
        (?:,?\s*(?:inciso|alínea)\s+([IVXivx]+|[a-z]))?  # optional inciso/alínea
        (?:,?\s*§\s*(\d+º?))?             # optional paragraph
        (?:,?\s*(?:da|do|de)\s+)?         # connector
        Lei\s+(?:nº\s*|n\.?\s*)?          # 'Lei nº'
        (\d+(?:\.\d+)?)                   # law number
        (?:/|,?\s*de\s+)                  # separator
        (\d{2,4})                         # year
        ",
    )
    .expect("article+law pattern")
});

/// Standalone law, e.g. `Lei 8.112/90`.
static LEI_ALONE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?ix)
        Lei\s+(?:nº\s*|n\.?\s*)?
        (\d+(?:\.\d+)?)
        (?:/|,?\s*de\s+)
        (\d{2,4})
        ",
    )
    .expect("standalone law pattern")
});

/// Súmulas, e.g. `Súmula 473 STF`, `Súmula Vinculante 13`.
static SUMULA: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?ix)
        Súmula\s+
        (?:(Vinculante)\s+)?
        (?:nº\s*|n\.?\s*)?
        (\d+)
        (?:\s+(?:do\s+)?(STF|STJ))?
        ",
    )
    .expect("súmula pattern")
});

/// Article + spelled-out code, e.g. `Art. 186 do Código Civil`.
static ART_CODIGO: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?ix)
        Art(?:igo)?\.?\s+
        (\d+º?)
        (?:,?\s*§\s*(\d+º?))?
        (?:\s+do\s+|\s+da\s+)
        (Código\s+(?:Civil|Penal|de\s+Processo\s+(?:Civil|Penal))|Constituição(?:\s+Federal)?)
        ",
    )
    .expect("article+código pattern")
});

/// Two-digit years: `90` → `1990`, `21` → `2021`.
fn normalize_year(year: &str) -> String {
    if year.len() == 2 {
        let n: u32 = year.parse().unwrap_or(0);
        if n <= 50 {
            format!("20{}", year)
        } else {
            format!("19{}", year)
        }
    } else {
        year.to_string()
    }
}

fn normalize_source(source: &str) -> String {
    let upper = source.to_uppercase();
    match upper.as_str() {
        "CF" | "CF/88" | "CRFB" | "CRFB/88" => "CF/88".to_string(),
        _ => upper,
    }
}

/// Extract legal citations from a text. Deduplicated and sorted.
pub fn extract_citations(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }

    let mut citations: BTreeSet<String> = BTreeSet::new();

    // Article + source code.
    for caps in ART_SOURCE.captures_iter(text) {
        let article = &caps[1];
        let source = normalize_source(&caps[3]);
        let citation = match caps.get(2) {
            Some(paragraph) => format!("Art. {}, § {}, {}", article, paragraph.as_str(), source),
            None => format!("Art. {}, {}", article, source),
        };
        citations.insert(citation);
    }

    // Article + law, remembering spans so standalone-law matches inside
    // them are not double counted.
    let mut art_lei_spans: Vec<(usize, usize)> = Vec::new();
    for caps in ART_LEI.captures_iter(text) {
        let whole = caps.get(0).expect("match span");
        art_lei_spans.push((whole.start(), whole.end()));

        let mut parts = vec![format!("Art. {}", &caps[1])];
        if let Some(inciso) = caps.get(2) {
            parts.push(format!("inciso {}", inciso.as_str().to_uppercase()));
        }
        if let Some(paragraph) = caps.get(3) {
            parts.push(format!("§ {}", paragraph.as_str()));
        }
        parts.push(format!("Lei {}/{}", &caps[4], normalize_year(&caps[5])));
        citations.insert(parts.join(", "));
    }

    // Standalone laws outside any article+law span.
    for caps in LEI_ALONE.captures_iter(text) {
        let whole = caps.get(0).expect("match span");
        let overlaps = art_lei_spans
            .iter()
            .any(|&(start, end)| whole.start() < end && whole.end() > start);
        if !overlaps {
            citations.insert(format!("Lei {}/{}", &caps[1], normalize_year(&caps[2])));
        }
    }

    // Súmulas.
    for caps in SUMULA.captures_iter(text) {
        let number = &caps[2];
        let citation = if caps.get(1).is_some() {
            format!("Súmula Vinculante {}", number)
        } else if let Some(court) = caps.get(3) {
            format!("Súmula {} {}", number, court.as_str().to_uppercase())
        } else {
            format!("Súmula {}", number)
        };
        citations.insert(citation);
    }

    // Article + spelled-out code.
    for caps in ART_CODIGO.captures_iter(text) {
        let codigo = caps[3].to_lowercase();
        let source = if codigo.contains("processo civil") {
            "CPC"
        } else if codigo.contains("processo penal") {
            "CPP"
        } else if codigo.contains("civil") {
            "CC"
        } else if codigo.contains("penal") {
            "CP"
        } else if codigo.contains("constituição") {
            "CF/88"
        } else {
            continue;
        };
        let citation = match caps.get(2) {
            Some(paragraph) => format!("Art. {}, § {}, {}", &caps[1], paragraph.as_str(), source),
            None => format!("Art. {}, {}", &caps[1], source),
        };
        citations.insert(citation);
    }

    citations.into_iter().collect()
}
