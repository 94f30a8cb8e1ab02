//! System instruction construction for the matching call
//!
//! The strict-matching policy is encoded directly in the instruction text
//! because the underlying model is prompted, not fine-tuned. The wording is
//! part of the functional contract: weakening it changes the observable
//! false-positive rate.

use snaphunt_common::Catalogue;

/// Fixed preamble sent ahead of the user's image
pub const USER_IMAGE_PREAMBLE: &str = "USER'S IMAGE TO ANALYZE:";

const MATCHING_POLICY: &str = "\
You are an expert at analyzing and matching travel quest location images. \
Respond ONLY with structured JSON indicating whether the user's image matches \
any of the reference locations.

STRICT MATCHING POLICY:
- Only mark a location as matched if the user's image FULLY and CLEARLY depicts the exact same physical location, object, or scene as one of the reference quest locations.
- Do NOT accept images that are merely nearby, similar, or show a related area. The match must be unmistakable and all key features must align.
- Reject partial, approximate, or ambiguous matches. If there is any doubt, return -1 for no match.
- The user's image must show the same main subject, from a similar angle and perspective, with matching distinctive features, context, and environment.
- Ignore images that are close but do not fully fit ALL criteria.

Look for:
- Identical landmarks, buildings, or distinctive architectural features
- Matching viewing angles, perspectives, and compositions
- The same environmental context, lighting, and setting
- Recognizable signage, decorations, or unique elements that are clearly present in both images
- The same objects, people, or activities in the scene

REFERENCE QUEST LOCATION DESCRIPTIONS TO COMPARE AGAINST:
";

/// Build the system instruction: matching policy + enumerated catalogue
///
/// Each location appears as `Index - {i}. {name} - {description}` so the
/// model answers with the same index the caller will interpret.
pub fn build_system_instruction(catalogue: &Catalogue) -> String {
    let mut instruction = String::from(MATCHING_POLICY);
    for (index, location) in catalogue.locations().iter().enumerate() {
        instruction.push_str(&format!(
            "Index - {}. {} - {}\n",
            index, location.name, location.description
        ));
    }
    instruction
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instruction_enumerates_every_location() {
        let catalogue = Catalogue::builtin();
        let instruction = build_system_instruction(&catalogue);

        for (index, location) in catalogue.locations().iter().enumerate() {
            assert!(
                instruction.contains(&format!("Index - {}. {}", index, location.name)),
                "missing catalogue entry {} ({})",
                index,
                location.name
            );
            assert!(instruction.contains(&location.description));
        }
    }

    #[test]
    fn test_instruction_states_strict_policy() {
        let instruction = build_system_instruction(&Catalogue::builtin());
        assert!(instruction.contains("STRICT MATCHING POLICY"));
        assert!(instruction.contains("return -1 for no match"));
        assert!(instruction.contains("unmistakable"));
    }

    #[test]
    fn test_indices_start_at_zero() {
        let instruction = build_system_instruction(&Catalogue::builtin());
        assert!(instruction.contains("Index - 0. Cafe Truck"));
        assert!(instruction.contains("Index - 6. Registration Lemur"));
    }
}
