//! Parsing the model's JSON answer

use crate::InferenceError;
use chrono::{DateTime, Utc};
use persona_core::{ActivitySummary, Motivations, Persona, PersonaOrigin, PersonalityAxes};
use serde::de::{self, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::fmt;

fn unknown() -> String {
    "Unknown".to_string()
}

/// Scalar as text; `null` has no text
fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

fn scalar_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn text_or_unknown<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(scalar_text(Value::deserialize(d)?).unwrap_or_else(unknown))
}

fn text_or_empty<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(scalar_text(Value::deserialize(d)?).unwrap_or_default())
}

/// A list of strings; a lone scalar becomes a one-element list, nulls are dropped
fn text_list<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Array(items) => items.into_iter().filter_map(scalar_text).collect(),
        other => scalar_text(other).into_iter().collect(),
    })
}

/// Known axes only; missing or non-numeric values stay neutral
fn lenient_axes<'de, D: Deserializer<'de>>(d: D) -> Result<PersonalityAxes, D::Error> {
    let value = Value::deserialize(d)?;
    let axis = |key: &str| value.get(key).and_then(scalar_number).unwrap_or(0.5);
    Ok(PersonalityAxes {
        introvert_extrovert: axis("introvert_extrovert"),
        intuition_sensing: axis("intuition_sensing"),
        feeling_thinking: axis("feeling_thinking"),
        perceiving_judging: axis("perceiving_judging"),
    })
}

/// Numeric entries in reply order; anything else is skipped
fn lenient_motivations<'de, D: Deserializer<'de>>(d: D) -> Result<Motivations, D::Error> {
    struct LenientVisitor;

    impl<'de> Visitor<'de> for LenientVisitor {
        type Value = Motivations;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a map of motivation names to numbers")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Motivations, A::Error> {
            let mut motivations = Motivations::new();
            while let Some((name, value)) = access.next_entry::<String, Value>()? {
                if let Some(score) = scalar_number(&value) {
                    motivations.set(&name, score);
                }
            }
            Ok(motivations)
        }

        fn visit_seq<A: SeqAccess<'de>>(self, mut access: A) -> Result<Motivations, A::Error> {
            while access.next_element::<IgnoredAny>()?.is_some() {}
            Ok(Motivations::new())
        }

        fn visit_unit<E: de::Error>(self) -> Result<Motivations, E> {
            Ok(Motivations::new())
        }

        fn visit_str<E: de::Error>(self, _: &str) -> Result<Motivations, E> {
            Ok(Motivations::new())
        }

        fn visit_bool<E: de::Error>(self, _: bool) -> Result<Motivations, E> {
            Ok(Motivations::new())
        }

        fn visit_i64<E: de::Error>(self, _: i64) -> Result<Motivations, E> {
            Ok(Motivations::new())
        }

        fn visit_u64<E: de::Error>(self, _: u64) -> Result<Motivations, E> {
            Ok(Motivations::new())
        }

        fn visit_f64<E: de::Error>(self, _: f64) -> Result<Motivations, E> {
            Ok(Motivations::new())
        }
    }

    d.deserialize_any(LenientVisitor)
}

/// Persona fields as returned by the model; anything missing, null or
/// mistyped gets a default instead of failing the whole reply
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PersonaDraft {
    #[serde(default = "unknown", deserialize_with = "text_or_unknown")]
    pub age: String,
    #[serde(default = "unknown", deserialize_with = "text_or_unknown")]
    pub occupation: String,
    #[serde(default = "unknown", deserialize_with = "text_or_unknown")]
    pub status: String,
    #[serde(default = "unknown", deserialize_with = "text_or_unknown")]
    pub location: String,
    #[serde(default = "unknown", deserialize_with = "text_or_unknown")]
    pub tier: String,
    #[serde(default = "unknown", deserialize_with = "text_or_unknown")]
    pub archetype: String,
    #[serde(default, deserialize_with = "lenient_axes")]
    pub personality_traits: PersonalityAxes,
    #[serde(default, deserialize_with = "lenient_motivations")]
    pub motivations: Motivations,
    #[serde(default, deserialize_with = "text_list")]
    pub behavior_habits: Vec<String>,
    #[serde(default, deserialize_with = "text_list")]
    pub frustrations: Vec<String>,
    #[serde(default, deserialize_with = "text_list")]
    pub goals_needs: Vec<String>,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub quote: String,
    #[serde(default, deserialize_with = "text_list")]
    pub interests: Vec<String>,
    #[serde(default, deserialize_with = "text_list")]
    pub brand_preferences: Vec<String>,
}

impl PersonaDraft {
    /// Complete the draft with the fields the model does not produce
    pub fn into_persona(
        self,
        username: &str,
        analysis_date: DateTime<Utc>,
        summary: &ActivitySummary,
        model: &str,
    ) -> Persona {
        Persona {
            username: username.to_string(),
            analysis_date,
            origin: PersonaOrigin::Inferred {
                model: model.to_string(),
            },
            age: self.age,
            occupation: self.occupation,
            status: self.status,
            location: self.location,
            tier: self.tier,
            archetype: self.archetype,
            personality_traits: self.personality_traits,
            motivations: self.motivations,
            behavior_habits: self.behavior_habits,
            frustrations: self.frustrations,
            goals_needs: self.goals_needs,
            quote: self.quote,
            activity_patterns: summary.clone(),
            characteristics: Vec::new(),
            interests: self.interests,
            brand_preferences: self.brand_preferences,
        }
    }
}

/// Remove a surrounding ```json / ``` fence, if any
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

pub fn parse_persona_response(text: &str) -> Result<PersonaDraft, InferenceError> {
    let body = strip_code_fence(text);
    let mut draft: PersonaDraft =
        serde_json::from_str(body).map_err(|e| InferenceError::Parse(e.to_string()))?;
    draft.personality_traits = draft.personality_traits.clamped();
    Ok(draft)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = r#"{
        "age": "25-30",
        "occupation": "Software Engineer",
        "status": "Single",
        "location": "Seattle",
        "tier": "Power User",
        "archetype": "The Explorer",
        "personality_traits": {"introvert_extrovert": 0.2, "intuition_sensing": 1.4,
                               "feeling_thinking": 0.6, "perceiving_judging": 0.4},
        "motivations": {"learning": 0.9, "speed": 0.4},
        "behavior_habits": ["Posts late at night"],
        "frustrations": ["Flaky CI"],
        "goals_needs": ["Ship side project"],
        "quote": "It works on my machine.",
        "interests": ["rust", "climbing"],
        "brand_preferences": ["JetBrains"]
    }"#;

    #[test]
    fn test_strip_code_fence_variants() {
        assert_eq!(strip_code_fence("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fence("```\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fence("  {\"a\":1}  "), "{\"a\":1}");
        assert_eq!(strip_code_fence("```json\n{\"a\":1}"), "{\"a\":1}");
    }

    #[test]
    fn test_parse_full_response() {
        let draft = parse_persona_response(FULL).unwrap();
        assert_eq!(draft.occupation, "Software Engineer");
        assert_eq!(draft.personality_traits.introvert_extrovert, 0.2);
        // out-of-range values are clamped
        assert_eq!(draft.personality_traits.intuition_sensing, 1.0);
        assert_eq!(draft.motivations.get("learning"), Some(0.9));
        assert_eq!(draft.interests, vec!["rust", "climbing"]);
    }

    #[test]
    fn test_parse_fenced_response() {
        let fenced = format!("```json\n{}\n```", FULL);
        assert_eq!(
            parse_persona_response(&fenced).unwrap(),
            parse_persona_response(FULL).unwrap()
        );
    }

    #[test]
    fn test_missing_fields_default() {
        let draft = parse_persona_response(r#"{"occupation": "Chef"}"#).unwrap();
        assert_eq!(draft.occupation, "Chef");
        assert_eq!(draft.age, "Unknown");
        assert_eq!(draft.personality_traits, PersonalityAxes::neutral());
        assert!(draft.motivations.is_empty());
        assert!(draft.quote.is_empty());
    }

    #[test]
    fn test_into_persona_fills_identity() {
        let when = Utc::now();
        let persona = parse_persona_response(FULL)
            .unwrap()
            .into_persona("ferris", when, &ActivitySummary::default(), "llama3-8b-8192");
        assert_eq!(persona.username, "ferris");
        assert_eq!(persona.analysis_date, when);
        assert_eq!(
            persona.origin,
            PersonaOrigin::Inferred {
                model: "llama3-8b-8192".to_string()
            }
        );
        assert_eq!(persona.quote, "It works on my machine.");
        assert!(persona.characteristics.is_empty());
        assert!(!persona.is_fallback());
    }

    #[test]
    fn test_null_fields_take_defaults() {
        let draft =
            parse_persona_response(r#"{"occupation": "Chef", "quote": null, "location": null,
                "interests": null, "personality_traits": null, "motivations": null}"#)
                .unwrap();
        assert_eq!(draft.occupation, "Chef");
        assert_eq!(draft.location, "Unknown");
        assert_eq!(draft.quote, "");
        assert!(draft.interests.is_empty());
        assert_eq!(draft.personality_traits, PersonalityAxes::neutral());
        assert!(draft.motivations.is_empty());
    }

    #[test]
    fn test_scalar_fields_are_stringified() {
        let draft = parse_persona_response(
            r#"{"age": 31, "status": true, "interests": ["chess", 42, null, false],
                "goals_needs": "Run a marathon",
                "personality_traits": {"introvert_extrovert": "0.8", "feeling_thinking": null},
                "motivations": {"learning": 0.9, "speed": "high", "comfort": "0.25"}}"#,
        )
        .unwrap();
        assert_eq!(draft.age, "31");
        assert_eq!(draft.status, "true");
        assert_eq!(draft.interests, vec!["chess", "42", "false"]);
        assert_eq!(draft.goals_needs, vec!["Run a marathon"]);
        assert_eq!(draft.personality_traits.introvert_extrovert, 0.8);
        assert_eq!(draft.personality_traits.feeling_thinking, 0.5);
        assert_eq!(draft.motivations.get("learning"), Some(0.9));
        assert_eq!(draft.motivations.get("speed"), None);
        assert_eq!(draft.motivations.get("comfort"), Some(0.25));
        let order: Vec<&str> = draft.motivations.iter().map(|(name, _)| name).collect();
        assert_eq!(order, vec!["learning", "comfort"]);
    }

    #[test]
    fn test_non_object_reply_is_parse_error() {
        assert!(matches!(
            parse_persona_response("[1, 2, 3]"),
            Err(InferenceError::Parse(_))
        ));
    }

    #[test]
    fn test_prose_is_parse_error() {
        let err = parse_persona_response("Sure! Here is the persona you asked for.").unwrap_err();
        assert!(matches!(err, InferenceError::Parse(_)));
    }
}
