//! Offline heuristic analyzer.
//!
//! Scans the user's notes against keyword tables and a handful of regular
//! expressions, then renders a markdown report with the same sections the
//! cloud prompt asks for. No network access, and the same input always
//! yields the same report.

pub mod report;
pub mod rules;

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::artifact::{ArtifactDescription, ImageInfo};
use rules::{Category, MaterialFamily, CATEGORY_RULES, CONDITION_TERMS, CULTURE_RULES, MARKING_TERMS, MATERIAL_RULES};

static ERA_SUFFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(\d{1,5})\s*(bce|bc|ce|ad)\b").expect("valid era regex")
});

static ERA_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(ad|ce)\s+(\d{1,4})\b").expect("valid era regex"));

static CENTURY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(\d{1,2})(?:st|nd|rd|th)[\s-]+century(?:\s+(bce|bc|ce|ad))?")
        .expect("valid century regex")
});

static YEAR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(1[0-8]\d\d)(s)?\b(\s*(?:mm|cm|m|inch|inches|kg|g|px|bce|bc|ce|ad)\b)?")
        .expect("valid year regex")
});

static MEASURE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(\d+(?:\.\d+)?(?:\s*[x×]\s*\d+(?:\.\d+)?)*)\s*(mm|cm|m|in|inch|inches|ft|feet|g|kg|grams|oz)\b")
        .expect("valid measurement regex")
});

static PROVENANCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:found|excavated|discovered|unearthed|recovered|acquired|purchased|bought)\s+(?:in|at|near|from|on|off)\s+([^.;,\n]{2,80})",
    )
    .expect("valid provenance regex")
});

const MAX_PROVENANCE_WORDS: usize = 8;

/// How much the notes tell us.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    Low,
    Moderate,
    High,
}

impl Confidence {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::High => "High",
        }
    }
}

/// Overall condition inferred from condition vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionGrade {
    Good,
    Fair,
    Poor,
    Unknown,
}

impl ConditionGrade {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Poor => "Poor",
            Self::Unknown => "Not described",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaterialHit {
    pub name: &'static str,
    pub family: MaterialFamily,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CultureHit {
    pub name: &'static str,
    pub range: &'static str,
}

/// Everything the analyzer extracted from one description.
#[derive(Debug, Clone, Serialize)]
pub struct HeuristicFindings {
    pub category: Option<Category>,
    pub materials: Vec<MaterialHit>,
    pub cultures: Vec<CultureHit>,
    pub dates: Vec<String>,
    pub measurements: Vec<String>,
    pub provenance: Vec<String>,
    pub condition_terms: Vec<&'static str>,
    pub condition: ConditionGrade,
    pub markings: Vec<&'static str>,
    pub image: Option<ImageInfo>,
    pub word_count: usize,
}

impl HeuristicFindings {
    /// Number of independent signal groups found.
    pub fn signal_count(&self) -> usize {
        [
            self.category.is_some(),
            !self.materials.is_empty(),
            !self.dates.is_empty() || !self.cultures.is_empty(),
            !self.provenance.is_empty(),
            !self.markings.is_empty(),
            !self.measurements.is_empty(),
            self.condition != ConditionGrade::Unknown,
        ]
        .iter()
        .filter(|hit| **hit)
        .count()
    }

    pub fn confidence(&self) -> Confidence {
        match self.signal_count() {
            0..=1 => Confidence::Low,
            2..=3 => Confidence::Moderate,
            _ => Confidence::High,
        }
    }

    pub fn period_confidence(&self) -> Confidence {
        if !self.dates.is_empty() {
            Confidence::High
        } else if !self.cultures.is_empty() {
            Confidence::Moderate
        } else {
            Confidence::Low
        }
    }

    /// Distinct material families, in table order.
    pub fn material_families(&self) -> Vec<MaterialFamily> {
        let mut families = Vec::new();
        for hit in &self.materials {
            if !families.contains(&hit.family) {
                families.push(hit.family);
            }
        }
        families
    }
}

/// Deterministic, offline artifact summarizer.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicAnalyzer;

impl HeuristicAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Extract findings from a description.
    pub fn inspect(&self, description: &ArtifactDescription) -> HeuristicFindings {
        let notes = description.trimmed_notes();
        let text = normalize(notes);

        HeuristicFindings {
            category: classify(&text),
            materials: MATERIAL_RULES
                .iter()
                .filter(|rule| contains_any(&text, rule.keywords))
                .map(|rule| MaterialHit { name: rule.name, family: rule.family })
                .collect(),
            cultures: CULTURE_RULES
                .iter()
                .filter(|rule| contains_any(&text, rule.keywords))
                .map(|rule| CultureHit { name: rule.name, range: rule.range })
                .collect(),
            dates: extract_dates(notes),
            measurements: extract_measurements(notes),
            provenance: extract_provenance(notes),
            condition_terms: CONDITION_TERMS
                .iter()
                .filter(|(term, _)| contains_term(&text, term))
                .map(|(term, _)| *term)
                .collect(),
            condition: grade_condition(&text),
            markings: MARKING_TERMS
                .iter()
                .filter(|term| contains_term(&text, term))
                .copied()
                .collect(),
            image: description.image_info(),
            word_count: text.split_whitespace().count(),
        }
    }

    /// Produce the markdown report for a description. Never empty.
    pub fn analyze(&self, description: &ArtifactDescription) -> String {
        let findings = self.inspect(description);
        report::render(&findings)
    }
}

/// Lowercase, replace punctuation with spaces, collapse whitespace and pad
/// with a leading and trailing space so `" term "` lookups work at the edges.
fn normalize(notes: &str) -> String {
    let cleaned: String = notes
        .chars()
        .map(|c| if c.is_alphanumeric() { c.to_ascii_lowercase() } else { ' ' })
        .collect();
    let joined = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    format!(" {} ", joined)
}

/// Whole-word (or whole-phrase) match, accepting simple `s`/`es` plurals.
fn contains_term(text: &str, term: &str) -> bool {
    ["", "s", "es"]
        .iter()
        .any(|suffix| text.contains(&format!(" {}{} ", term, suffix)))
}

fn contains_any(text: &str, terms: &[&str]) -> bool {
    terms.iter().any(|term| contains_term(text, term))
}

fn count_hits(text: &str, terms: &[&str]) -> usize {
    terms.iter().filter(|term| contains_term(text, term)).count()
}

fn classify(text: &str) -> Option<Category> {
    let mut best: Option<(Category, usize)> = None;
    for rule in CATEGORY_RULES {
        let hits = count_hits(text, rule.keywords);
        if hits == 0 {
            continue;
        }
        match best {
            Some((_, top)) if top >= hits => {}
            _ => best = Some((rule.category, hits)),
        }
    }
    best.map(|(category, _)| category)
}

fn grade_condition(text: &str) -> ConditionGrade {
    let (mut damage, mut sound) = (0usize, 0usize);
    for (term, is_damage) in CONDITION_TERMS {
        if contains_term(text, term) {
            if *is_damage {
                damage += 1;
            } else {
                sound += 1;
            }
        }
    }
    match (sound, damage) {
        (0, 0) => ConditionGrade::Unknown,
        (_, 0) => ConditionGrade::Good,
        (s, d) if s >= d => ConditionGrade::Fair,
        (_, d) if d >= 3 => ConditionGrade::Poor,
        _ => ConditionGrade::Fair,
    }
}

fn era_label(raw: &str) -> &'static str {
    match raw.to_ascii_lowercase().as_str() {
        "bc" | "bce" => "BCE",
        _ => "CE",
    }
}

fn ordinal_suffix(n: u32) -> &'static str {
    match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

fn push_unique(items: &mut Vec<String>, item: String) {
    if !items.contains(&item) {
        items.push(item);
    }
}

fn extract_dates(notes: &str) -> Vec<String> {
    let mut dates = Vec::new();

    for caps in CENTURY_RE.captures_iter(notes) {
        let Ok(n) = caps[1].parse::<u32>() else { continue };
        if n == 0 {
            continue;
        }
        let era = caps.get(2).map(|m| era_label(m.as_str())).unwrap_or("CE");
        push_unique(&mut dates, format!("{}{} century {}", n, ordinal_suffix(n), era));
    }
    for caps in ERA_SUFFIX_RE.captures_iter(notes) {
        push_unique(&mut dates, format!("{} {}", &caps[1], era_label(&caps[2])));
    }
    for caps in ERA_PREFIX_RE.captures_iter(notes) {
        push_unique(&mut dates, format!("{} CE", &caps[2]));
    }
    for caps in YEAR_RE.captures_iter(notes) {
        // A trailing unit or era marker means this is not a bare year.
        if caps.get(3).is_some() {
            continue;
        }
        let year = &caps[1];
        let label = if caps.get(2).is_some() {
            format!("{}s CE", year)
        } else {
            format!("{} CE", year)
        };
        push_unique(&mut dates, label);
    }

    dates
}

fn extract_measurements(notes: &str) -> Vec<String> {
    let mut found = Vec::new();
    for caps in MEASURE_RE.captures_iter(notes) {
        let value: String = caps[1].split_whitespace().collect::<Vec<_>>().join(" ");
        let unit = caps[2].to_ascii_lowercase();
        // Bare "in" is only a unit in a dimension like "4 x 6 in".
        if unit == "in" && !value.contains(['x', 'X', '×']) {
            continue;
        }
        push_unique(&mut found, format!("{} {}", value, unit));
    }
    found
}

fn extract_provenance(notes: &str) -> Vec<String> {
    let mut found = Vec::new();
    for caps in PROVENANCE_RE.captures_iter(notes) {
        let place = caps[1]
            .split_whitespace()
            .take(MAX_PROVENANCE_WORDS)
            .collect::<Vec<_>>()
            .join(" ");
        let place = place.trim_end_matches(|c: char| !c.is_alphanumeric()).to_string();
        if !place.is_empty() {
            push_unique(&mut found, place);
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::image::fixtures::png_header;
    use crate::artifact::ArtifactImage;

    fn inspect(notes: &str) -> HeuristicFindings {
        HeuristicAnalyzer::new().inspect(&ArtifactDescription::from_notes(notes))
    }

    #[test]
    fn test_classifies_roman_coin() {
        let f = inspect("Silver Roman denarius with the emperor's head on the obverse, found near Hadrian's Wall.");
        assert_eq!(f.category, Some(Category::Coin));
        assert_eq!(f.materials[0].name, "Silver");
        assert_eq!(f.cultures[0].name, "Roman");
        assert_eq!(f.provenance, vec!["Hadrian's Wall"]);
    }

    #[test]
    fn test_classifies_pottery_with_condition() {
        let f = inspect("Terracotta amphora, cracked and chipped at the rim, with a stamped handle.");
        assert_eq!(f.category, Some(Category::Pottery));
        assert_eq!(f.material_families(), vec![MaterialFamily::Ceramic]);
        assert_eq!(f.condition, ConditionGrade::Fair);
        assert!(f.markings.contains(&"stamped"));
    }

    #[test]
    fn test_multiword_culture_and_plurals() {
        let f = inspect("Two bronze age arrowheads and fragments of a sword");
        assert_eq!(f.category, Some(Category::Weapon));
        assert!(f.cultures.iter().any(|c| c.name == "Bronze Age"));
        assert!(f.condition_terms.contains(&"fragment"));
    }

    #[test]
    fn test_extracts_dates() {
        let f = inspect("Dated to 500 BC, reused in AD 79, repaired in the 3rd century BCE and again in the 1750s.");
        assert_eq!(
            f.dates,
            vec!["3rd century BCE", "500 BCE", "79 CE", "1750s CE"]
        );
        assert_eq!(f.period_confidence(), Confidence::High);
    }

    #[test]
    fn test_year_with_unit_is_a_measurement() {
        let f = inspect("A slab 1200 mm long");
        assert!(f.dates.is_empty());
        assert_eq!(f.measurements, vec!["1200 mm"]);
    }

    #[test]
    fn test_extracts_compound_measurements() {
        let f = inspect("Measures 12 x 8.5 cm and weighs 340 g");
        assert_eq!(f.measurements, vec!["12 x 8.5 cm", "340 g"]);
    }

    #[test]
    fn test_preposition_in_is_not_a_unit() {
        let f = inspect("We found 3 in the tomb, one 1500 in origin");
        assert!(f.measurements.is_empty());
        assert_eq!(inspect("A tile of 4 x 6 in").measurements, vec!["4 x 6 in"]);
        assert_eq!(inspect("About 5 inches tall").measurements, vec!["5 inches"]);
    }

    #[test]
    fn test_century_ordinals() {
        assert_eq!(ordinal_suffix(1), "st");
        assert_eq!(ordinal_suffix(2), "nd");
        assert_eq!(ordinal_suffix(11), "th");
        assert_eq!(ordinal_suffix(12), "th");
        assert_eq!(ordinal_suffix(21), "st");
    }

    #[test]
    fn test_provenance_is_truncated() {
        let f = inspect("Excavated at the northern edge of the old city wall beside the river gate and temple");
        assert_eq!(f.provenance[0].split_whitespace().count(), MAX_PROVENANCE_WORDS);
    }

    #[test]
    fn test_empty_notes_have_no_signals() {
        let f = inspect("   ");
        assert_eq!(f.signal_count(), 0);
        assert_eq!(f.confidence(), Confidence::Low);
        assert_eq!(f.condition, ConditionGrade::Unknown);
        assert_eq!(f.category, None);
    }

    #[test]
    fn test_word_match_does_not_hit_substrings() {
        // "ringing" must not match "ring", "potential" must not match "pot".
        let f = inspect("ringing potential");
        assert_eq!(f.category, None);
    }

    #[test]
    fn test_tie_breaks_by_table_order() {
        // One pottery keyword and one sculpture keyword: pottery is listed first.
        let f = inspect("vase statue");
        assert_eq!(f.category, Some(Category::Pottery));
    }

    #[test]
    fn test_confidence_grows_with_signals() {
        let f = inspect(
            "Gold Egyptian amulet, intact, inscribed with hieroglyphs, 4 cm tall, found in Thebes",
        );
        assert_eq!(f.confidence(), Confidence::High);
        assert_eq!(f.condition, ConditionGrade::Good);
    }

    #[test]
    fn test_image_info_is_carried() {
        let image = ArtifactImage::from_bytes(png_header(800, 600), None).unwrap();
        let description = ArtifactDescription::default().with_image(image);
        let f = HeuristicAnalyzer::new().inspect(&description);
        assert_eq!(f.image.map(|i| i.width), Some(800));
    }

    #[test]
    fn test_analysis_is_deterministic() {
        let description = ArtifactDescription::from_notes("Medieval iron key, corroded, 9 cm");
        let analyzer = HeuristicAnalyzer::new();
        assert_eq!(analyzer.analyze(&description), analyzer.analyze(&description));
    }
}
