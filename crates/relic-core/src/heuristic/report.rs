//! Markdown rendering of heuristic findings.

use std::fmt::Write;

use super::{ConditionGrade, HeuristicFindings};

const DISCLAIMER: &str = "> **Offline heuristic summary.** This report was produced locally by matching keywords in your notes. \
It has not examined the image and cannot authenticate, date or value the object. Treat every section as a starting \
point for expert examination.";

const MORE_DETAIL_HINT: &str = "Add details such as the object type, materials, where it was found, any inscriptions \
or markings, approximate size and suspected period to get a more useful summary.";

/// Render the ten-section report. The output is never empty.
pub fn render(findings: &HeuristicFindings) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "# Artifact Summary (Offline Heuristic)\n");
    let _ = writeln!(
        out,
        "**Overall confidence:** {} ({} of 7 signal groups found in {} words of notes)\n",
        findings.confidence().label(),
        findings.signal_count(),
        findings.word_count
    );
    if findings.signal_count() == 0 {
        let _ = writeln!(out, "_{}_\n", MORE_DETAIL_HINT);
    }

    section(&mut out, 1, "Artifact Type & Classification", &classification(findings));
    section(&mut out, 2, "Estimated Period/Era", &period(findings));
    section(&mut out, 3, "Materials & Composition", &materials(findings));
    section(&mut out, 4, "Dimensions & Scale", &dimensions(findings));
    section(&mut out, 5, "Craftsmanship & Technique", &craftsmanship(findings));
    section(&mut out, 6, "Condition Assessment", &condition(findings));
    section(&mut out, 7, "Cultural & Historical Significance", &significance(findings));
    section(&mut out, 8, "Possible Origin & Geographic Location", &origin(findings));
    section(&mut out, 9, "Similar Artifacts", &similar(findings));
    section(&mut out, 10, "Recommendations for Further Study", &recommendations(findings));

    let _ = writeln!(out, "---\n\n{}", DISCLAIMER);
    out
}

fn section(out: &mut String, number: usize, title: &str, body: &str) {
    let _ = writeln!(out, "## {}. {}\n\n{}\n", number, title, body.trim_end());
}

fn bullets<I, S>(items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    items
        .into_iter()
        .map(|item| format!("- {}", item.as_ref()))
        .collect::<Vec<_>>()
        .join("\n")
}

fn classification(f: &HeuristicFindings) -> String {
    match f.category {
        Some(category) => {
            let mut body = format!("Most likely category: **{}**.", category.label());
            if !f.markings.is_empty() {
                let _ = write!(body, " The notes mention markings ({}).", f.markings.join(", "));
            }
            body
        }
        None => "Category could not be determined from the notes. Name the object type (for example \
                 vessel, coin, figurine, blade, brooch, manuscript)."
            .to_string(),
    }
}

fn period(f: &HeuristicFindings) -> String {
    let mut lines = Vec::new();
    for date in &f.dates {
        lines.push(format!("Stated date: {}", date));
    }
    for culture in &f.cultures {
        lines.push(format!("{} ({})", culture.name, culture.range));
    }
    if lines.is_empty() {
        return format!(
            "Undetermined from the description. Confidence: **{}**.",
            f.period_confidence().label()
        );
    }
    format!(
        "{}\n\nConfidence: **{}**.",
        bullets(lines),
        f.period_confidence().label()
    )
}

fn materials(f: &HeuristicFindings) -> String {
    if f.materials.is_empty() {
        return "No materials named in the notes.".to_string();
    }
    bullets(f.materials.iter().map(|m| m.name))
}

fn dimensions(f: &HeuristicFindings) -> String {
    let mut lines: Vec<String> = f
        .measurements
        .iter()
        .map(|m| format!("Stated measurement: {}", m))
        .collect();

    if let Some(info) = f.image {
        lines.push(format!(
            "Photo: {} x {} px {} ({}, {:.2} MP). Pixel size does not indicate physical scale without a reference object in frame.",
            info.width,
            info.height,
            info.format.label(),
            info.orientation(),
            info.megapixels()
        ));
    }

    if lines.is_empty() {
        return "No measurements given. Record height, width, depth and weight.".to_string();
    }
    bullets(lines)
}

fn craftsmanship(f: &HeuristicFindings) -> String {
    let families = f.material_families();
    if families.is_empty() {
        return "Technique cannot be inferred without knowing the material.".to_string();
    }
    bullets(families.iter().map(|family| family.technique()))
}

fn condition(f: &HeuristicFindings) -> String {
    if f.condition == ConditionGrade::Unknown {
        return "Condition not described. Note any cracks, losses, corrosion, repairs or restoration.".to_string();
    }
    format!(
        "Assessed as **{}** from the terms: {}.",
        f.condition.label(),
        f.condition_terms.join(", ")
    )
}

fn significance(f: &HeuristicFindings) -> String {
    let mut parts = Vec::new();
    if let Some(category) = f.category {
        parts.push(category.significance().to_string());
    }
    if !f.cultures.is_empty() {
        let names: Vec<&str> = f.cultures.iter().map(|c| c.name).collect();
        parts.push(format!(
            "As a possible {} object it may inform the study of that period's material culture.",
            names.join(" / ")
        ));
    }
    if parts.is_empty() {
        return "Significance depends on type, date and context, none of which could be established.".to_string();
    }
    parts.join(" ")
}

fn origin(f: &HeuristicFindings) -> String {
    if f.provenance.is_empty() {
        if f.cultures.is_empty() {
            return "No find-spot or provenance given.".to_string();
        }
        let names: Vec<&str> = f.cultures.iter().map(|c| c.name).collect();
        return format!(
            "No find-spot given; cultural cues point to the {} sphere.",
            names.join(" / ")
        );
    }
    bullets(f.provenance.iter().map(|p| format!("Reported find-spot / source: {}", p)))
}

fn similar(f: &HeuristicFindings) -> String {
    match f.category {
        Some(category) => format!(
            "Compare with catalogued {} in major museum collections, for example {}.",
            category.plural(),
            category.reference_examples()
        ),
        None => "No comparisons possible until the object type is known.".to_string(),
    }
}

fn recommendations(f: &HeuristicFindings) -> String {
    let mut items: Vec<String> = Vec::new();
    for family in f.material_families() {
        items.extend(family.recommendations().iter().map(|r| r.to_string()));
    }
    if !f.markings.is_empty() {
        items.push("Epigraphic or paleographic study of the inscription and markings".to_string());
    }
    if f.provenance.is_empty() {
        items.push("Document the find context and ownership history (provenance)".to_string());
    }
    if f.image.is_none() {
        items.push("Photograph the object from several angles with a scale bar".to_string());
    }
    items.push("Consult a museum curator, conservator or accredited appraiser for hands-on examination".to_string());
    bullets(items)
}

#[cfg(test)]
mod tests {
    use crate::artifact::ArtifactDescription;
    use crate::heuristic::HeuristicAnalyzer;

    fn report(notes: &str) -> String {
        HeuristicAnalyzer::new().analyze(&ArtifactDescription::from_notes(notes))
    }

    #[test]
    fn test_report_has_all_sections() {
        let text = report("Bronze Roman fibula with corrosion");
        for n in 1..=10 {
            assert!(text.contains(&format!("## {}. ", n)), "missing section {}", n);
        }
        assert!(text.contains("Offline heuristic summary"));
    }

    #[test]
    fn test_empty_input_still_produces_report() {
        let text = report("");
        assert!(!text.trim().is_empty());
        assert!(text.contains("Add details such as"));
        assert!(text.contains("**Overall confidence:** Low"));
    }

    #[test]
    fn test_recommendations_follow_material() {
        let text = report("Terracotta oil lamp");
        assert!(text.contains("Thermoluminescence"));
        assert!(!text.contains("X-ray fluorescence"));
    }

    #[test]
    fn test_markings_add_epigraphy_recommendation() {
        let text = report("Marble stele with an inscription");
        assert!(text.contains("Epigraphic"));
        assert!(text.contains("Sculpture & statuary"));
    }
}
