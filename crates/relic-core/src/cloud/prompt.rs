//! Prompt construction for the cloud analysis.

use crate::artifact::ArtifactDescription;

/// Instruction shared by the image and text-only prompts.
const REPORT_OUTLINE: &str = r#"Please include:
1. **Artifact Type & Classification** - What category does this artifact belong to?
2. **Estimated Period/Era** - When was this likely created? (with confidence level)
3. **Materials & Composition** - What materials are visible and their significance?
4. **Dimensions & Scale** - Approximate size and proportions
5. **Craftsmanship & Technique** - How was this made? What skills were required?
6. **Condition Assessment** - Current state of preservation, visible wear, damage
7. **Cultural & Historical Significance** - Why is this important?
8. **Possible Origin & Geographic Location** - Where might this have come from?
9. **Similar Artifacts** - Known comparative examples
10. **Recommendations for Further Study** - What tests or analysis would help?

Format in clear, structured markdown."#;

const ROLE: &str = "You are an expert archaeologist and historian specializing in artifact analysis.";

/// Build the prompt for a description.
pub fn build_prompt(description: &ArtifactDescription) -> String {
    let task = if description.image.is_some() {
        "Analyze the provided image of a historical artifact and generate a comprehensive professional report."
    } else {
        "Analyze the following written description of a historical artifact and generate a comprehensive professional report."
    };
    let disclaimer = if description.image.is_some() {
        "Add brief disclaimers about visual-only analysis limitations."
    } else {
        "Add brief disclaimers about the limitations of analysis from a written description alone."
    };

    let mut prompt = format!("{}\n\n{}\n\n{}\n{}\n", ROLE, task, REPORT_OUTLINE, disclaimer);

    let notes = description.trimmed_notes();
    if !notes.is_empty() {
        prompt.push_str(&format!("\nAdditional Context from User: {}\n", notes));
    }
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::image::fixtures::jpeg_header;
    use crate::artifact::ArtifactImage;

    #[test]
    fn test_prompt_includes_notes_when_present() {
        let prompt = build_prompt(&ArtifactDescription::from_notes("  found in Crete  "));
        assert!(prompt.ends_with("Additional Context from User: found in Crete\n"));
        assert!(prompt.contains("written description"));
    }

    #[test]
    fn test_prompt_omits_blank_notes() {
        let image = ArtifactImage::from_bytes(jpeg_header(10, 10), None).unwrap();
        let prompt = build_prompt(&ArtifactDescription::from_notes("   ").with_image(image));
        assert!(!prompt.contains("Additional Context"));
        assert!(prompt.contains("provided image"));
        assert!(prompt.contains("visual-only"));
    }

    #[test]
    fn test_prompt_lists_ten_sections() {
        let prompt = build_prompt(&ArtifactDescription::default());
        assert!(prompt.contains("1. **Artifact Type & Classification**"));
        assert!(prompt.contains("10. **Recommendations for Further Study**"));
    }
}
