//! The copywriting prompt.

use design_block::Purpose;

use crate::CopyRequest;

/// Render the prompt sent as the single user message.
pub fn build_prompt(request: &CopyRequest) -> String {
    let purpose = Purpose::context(request.purpose);
    let note = request
        .instruction
        .as_deref()
        .map(|i| format!("\nUser's specific instruction: \"{}\"", i.trim()))
        .unwrap_or_default();

    format!(
        r#"You are an expert marketing copywriter. Create copy for a print material that has a QR code. The copy should PERSUADE customers to scan the QR.

Context:
- QR Purpose: {purpose}
- Destination: {destination}{note}

Return ONLY valid JSON in this exact format (no markdown, no code fences):
{{"title": "Short punchy headline (max 10 words)", "bullets": ["Benefit or action point 1", "Benefit or action point 2", "Benefit or action point 3"]}}

Rules:
1. Title: Short, bold, action-oriented headline displayed ABOVE the QR code.
2. Bullets: 3 short benefit/action lines displayed BELOW the QR code (each under 12 words).
3. IMPORTANT: If the user provides specific instructions, phone numbers, or key phrases in the User's specific instruction, you MUST incorporate them directly into the title or bullets. Do NOT ignore user-provided details.
4. Speak directly to the END CUSTOMER who sees this in a physical location.
5. No quotes around the JSON values, no emojis, no hashtags.
6. Match tone to purpose (casual for restaurants, professional for business).

Example for instruction "Call 9958929886":
{{"title": "Scan to Connect or Call Us Directly", "bullets": ["Get instant support at 9958929886", "Find our store location easily", "Browse our latest offerings online"]}}"#,
        destination = request.destination,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn general_context_without_purpose() {
        let prompt = build_prompt(&CopyRequest::new(None, "https://example.com/"));
        assert!(prompt.contains("- QR Purpose: General business use\n"));
        assert!(prompt.contains("- Destination: https://example.com/\n"));
        assert!(!prompt.contains("\nUser's specific instruction: \""));
    }

    #[test]
    fn includes_purpose_and_instruction() {
        let request = CopyRequest::new(Some(Purpose::MenuCatalog), "https://cafe.example/menu")
            .with_instruction("Mention our 2-for-1 Tuesdays");
        let prompt = build_prompt(&request);
        assert!(prompt.contains("- QR Purpose: Menu / Catalog\n"));
        assert!(prompt.contains(
            "https://cafe.example/menu\nUser's specific instruction: \"Mention our 2-for-1 Tuesdays\""
        ));
    }

    #[test]
    fn blank_instruction_is_dropped() {
        let request = CopyRequest::new(None, "https://example.com/").with_instruction("   ");
        assert_eq!(request.instruction, None);
    }

    #[test]
    fn json_template_braces_survive_formatting() {
        let prompt = build_prompt(&CopyRequest::new(None, "https://example.com/"));
        assert!(prompt.contains(r#"{"title": "Short punchy headline (max 10 words)""#));
    }
}
