//! Fixed prompt templates, one per page that talks to the model.
//!
//! Each template takes exactly one free-text parameter. The structure of the
//! remedy template matters beyond presentation: remedy names are pulled back
//! out of the numbered list it asks for (see [`crate::extract`]).

use serde::{Deserialize, Serialize};

use super::ChatMessage;
use crate::session::Query;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PromptTemplate {
    #[serde(rename = "medicine-analysis")]
    MedicineAnalysis,
    #[serde(rename = "symptom-to-remedy")]
    SymptomRemedies,
    #[serde(rename = "emergency-to-firstaid")]
    EmergencyFirstAid,
}

impl PromptTemplate {
    /// Stable identifier used in logs and API payloads
    pub fn id(&self) -> &'static str {
        match self {
            PromptTemplate::MedicineAnalysis => "medicine-analysis",
            PromptTemplate::SymptomRemedies => "symptom-to-remedy",
            PromptTemplate::EmergencyFirstAid => "emergency-to-firstaid",
        }
    }

    /// Build the chat payload for this template
    pub fn messages(&self, parameter: &Query) -> Vec<ChatMessage> {
        let prompt = match self {
            PromptTemplate::MedicineAnalysis => medicine_analysis(parameter.as_str()),
            PromptTemplate::SymptomRemedies => symptom_remedies(parameter.as_str()),
            PromptTemplate::EmergencyFirstAid => emergency_first_aid(parameter.as_str()),
        };
        vec![ChatMessage::user(prompt)]
    }
}

fn medicine_analysis(medicine_name: &str) -> String {
    format!(
        r#"Provide a detailed analysis of the medicine '{medicine_name}' in the following format:

**Generic Name:**
[Generic name of the medicine]

**Drug Class:**
[The class/category of the medicine]

**Primary Uses:**
- [Main use 1]
- [Main use 2]
- [Main use 3]

**Common Side Effects:**
- [Side effect 1]
- [Side effect 2]
- [Side effect 3]

**Precautions:**
- [Important precaution 1]
- [Important precaution 2]

**Typical Dosage:**
[Standard dosage information]

**Storage Requirements:**
[How to properly store the medicine]

**Important Notes:**
- [Additional important information]
- [Interactions with other medications if any]"#
    )
}

fn symptom_remedies(symptoms: &str) -> String {
    format!(
        r#"As a professional naturopathic doctor, provide a detailed natural remedy recommendation for the following symptoms: {symptoms}

Format the response as:

**Condition Assessment:**
[Brief assessment of the described symptoms]

**Top Natural Remedies:**
1. [Remedy 1 Name]
   - Key Ingredients: [List main ingredients]
   - Benefits: [How it helps]
   - Simple Preparation Method

2. [Remedy 2 Name]
   - Key Ingredients: [List main ingredients]
   - Benefits: [How it helps]
   - Simple Preparation Method

3. [Remedy 3 Name]
   - Key Ingredients: [List main ingredients]
   - Benefits: [How it helps]
   - Simple Preparation Method

**Lifestyle Recommendations:**
- [Recommendation 1]
- [Recommendation 2]
- [Recommendation 3]

**Important Notes:**
- [Safety precaution 1]
- [Safety precaution 2]

**When to See a Doctor:**
[List specific symptoms or conditions that require professional medical attention]"#
    )
}

fn emergency_first_aid(emergency_type: &str) -> String {
    format!(
        r#"As a professional emergency doctor, provide exactly 5 precise, clear steps for immediate first aid treatment for {emergency_type}.
Format the response as:

**Immediate Steps to Take:**
1. [First immediate action]
2. [Second immediate action]
3. [Third immediate action]
4. [Fourth immediate action]
5. [Fifth immediate action]

**Warning Signs to Watch For:**
- [Critical warning sign 1]
- [Critical warning sign 2]
- [Critical warning sign 3]

**Additional Notes:**
[Important information about when to seek immediate medical attention]"#
    )
}
