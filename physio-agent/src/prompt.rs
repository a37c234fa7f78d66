//! Prompt construction for protocol synthesis.

/// Builds the prompts sent to the generative backend.
pub struct PromptAssembler;

impl PromptAssembler {
    /// System prompt describing the role and the exact JSON shape expected back.
    pub fn build_system_prompt() -> String {
        let mut prompt = String::new();

        prompt.push_str("You are a senior physiotherapist writing evidence-based treatment protocols.\n\n");
        prompt.push_str("## TASK\n\n");
        prompt.push_str(
            "Given the name or symptoms of a musculoskeletal or neurological condition, \
             write one treatment protocol covering electrotherapy, therapeutic ultrasound \
             and exercise.\n\n",
        );
        prompt.push_str("## RESPONSE FORMAT\n\n");
        prompt.push_str("Reply with a single JSON object and nothing else:\n\n");
        prompt.push_str(RESPONSE_SCHEMA);
        prompt.push_str("\n\n## RULES\n\n");
        prompt.push_str("- Every field except placement, treatment_duration and expected_recovery is required.\n");
        prompt.push_str("- Parameters must include frequency, pulse width or intensity, and session time.\n");
        prompt.push_str("- If ultrasound is contraindicated, say so in ultrasound.kind and give the safer alternative in purpose.\n");
        prompt.push_str("- reference must name a published guideline or consensus statement.\n");
        prompt.push_str(
            "- If the input is not a recognizable clinical condition, reply with \
             {\"not_applicable\": true} only.\n",
        );

        prompt
    }

    /// User prompt for a single query.
    pub fn build_user_prompt(query: &str) -> String {
        format!("Condition: {}\n\nRespond with the JSON object.", query)
    }
}

const RESPONSE_SCHEMA: &str = r#"{
  "not_applicable": false,
  "disease_name": "Full condition name",
  "keywords": "comma separated aliases and symptoms",
  "description": "One sentence describing the condition",
  "electrotherapy": {
    "kind": "Current type, e.g. TENS (High Rate), IFC, NMES",
    "parameters": "Frequency, pulse width, time",
    "placement": "Electrode placement",
    "purpose": "Clinical goal"
  },
  "ultrasound": {
    "kind": "Indication, e.g. Indicated (Continuous) or Not Indicated",
    "parameters": "Frequency, intensity, duty cycle",
    "purpose": "Clinical goal"
  },
  "exercises": "Numbered exercise list, one per line",
  "treatment_duration": "Session length and frequency",
  "expected_recovery": "Typical recovery timeline",
  "reference": "Guideline or consensus source"
}"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_prompt_sections() {
        let prompt = PromptAssembler::build_system_prompt();

        assert!(prompt.contains("## TASK"));
        assert!(prompt.contains("## RESPONSE FORMAT"));
        assert!(prompt.contains("\"disease_name\""));
        assert!(prompt.contains("not_applicable"));
    }

    #[test]
    fn test_schema_is_valid_json() {
        let value: serde_json::Value = serde_json::from_str(RESPONSE_SCHEMA).unwrap();
        assert!(value.get("electrotherapy").is_some());
    }

    #[test]
    fn test_user_prompt_contains_query() {
        let prompt = PromptAssembler::build_user_prompt("Frozen Shoulder");
        assert!(prompt.contains("Condition: Frozen Shoulder"));
    }
}
