//! Deterministic text rendering for embedding and prompts.
//!
//! The query and item texts sent to the embedding service are produced here,
//! so retrieval quality and reproducibility both hinge on these functions
//! being pure: identical input renders identical text.

use std::collections::BTreeMap;

use crate::types::{Card, Preferences};

/// Renders a card into the fixed multi-line block used for item embedding.
pub fn card_to_text(card: &Card) -> String {
    format!(
        "Name: {}\nIssuer: {}\nJoining Fee: {}\nAnnual Fee: {}\nReward Type: {}\nReward Rate: {}\nEligibility: {}\nPerks: {}",
        card.name,
        card.issuer,
        card.joining_fee,
        card.annual_fee,
        card.reward_type,
        card.reward_rate,
        card.eligibility,
        card.special_perks,
    )
}

/// Renders only the present preference fields into a semicolon-joined summary
/// in fixed field order. Absent or empty fields are omitted entirely, never
/// rendered as empty placeholders.
pub fn preferences_to_summary(prefs: &Preferences) -> String {
    let mut parts: Vec<String> = Vec::new();

    if let Some(age) = prefs.age {
        parts.push(format!("Age: {age}"));
    }
    if let Some(income) = prefs.income {
        match prefs.income_period {
            Some(period) => parts.push(format!("Income: {income} ({})", period.label())),
            None => parts.push(format!("Income: {income}")),
        }
    }
    let spending = render_spending(&prefs.spending);
    if !spending.is_empty() {
        parts.push(format!("Spending: {spending}"));
    }
    let custom = render_spending(&prefs.custom_spending);
    if !custom.is_empty() {
        parts.push(format!("Custom Spending: {custom}"));
    }
    if !prefs.reward_preferences.is_empty() {
        parts.push(format!(
            "Reward Preferences: {}",
            prefs.reward_preferences.join(", ")
        ));
    }
    if let Some(ref bank) = prefs.bank_preference {
        parts.push(format!("Bank Preference: {bank}"));
    }
    if !prefs.special_features.is_empty() {
        parts.push(format!(
            "Special Features: {}",
            prefs.special_features.join(", ")
        ));
    }
    if let Some(fee) = prefs.annual_fee_preference {
        parts.push(format!("Annual Fee Preference: {fee}"));
    }
    if let Some(ref score) = prefs.credit_score {
        parts.push(format!("Credit Score: {score}"));
    }
    if !prefs.existing_cards.is_empty() {
        parts.push(format!("Existing Cards: {}", prefs.existing_cards.join(", ")));
    }

    parts.join("; ")
}

/// Compact user profile summary for the reason prompt: present fields only.
pub fn profile_summary(prefs: &Preferences) -> String {
    let mut parts: Vec<String> = Vec::new();

    if let Some(income) = prefs.income {
        parts.push(format!("Income: {income}"));
    }
    if let Some(age) = prefs.age {
        parts.push(format!("Age: {age}"));
    }
    let spending = render_spending(&prefs.spending);
    if !spending.is_empty() {
        parts.push(format!("Spending: {spending}"));
    }
    if !prefs.reward_preferences.is_empty() {
        parts.push(format!(
            "Preferred benefits: {}",
            prefs.reward_preferences.join(", ")
        ));
    }
    if !prefs.special_features.is_empty() {
        parts.push(format!(
            "Special perks: {}",
            prefs.special_features.join(", ")
        ));
    }
    if let Some(ref bank) = prefs.bank_preference {
        parts.push(format!("Preferred issuer: {bank}"));
    }
    if prefs.annual_fee_preference == Some(true) {
        parts.push("Prefers low/waived fee".to_string());
    }

    parts.join("; ")
}

/// Compact card summary for the reason prompt, fixed field order.
pub fn card_summary(card: &Card) -> String {
    format!(
        "Card: {}\nIssuer: {}\nAnnual Fee: {}\nReward Type: {}\nReward Rate: {}\nSpecial Perks: {}",
        card.name, card.issuer, card.annual_fee, card.reward_type, card.reward_rate, card.special_perks,
    )
}

/// Renders non-zero spending entries as "category: ₹amount/mo", comma-joined.
fn render_spending(map: &BTreeMap<String, u64>) -> String {
    map.iter()
        .filter(|(_, amount)| **amount > 0)
        .map(|(category, amount)| format!("{category}: ₹{amount}/mo"))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::IncomePeriod;

    fn full_prefs() -> Preferences {
        Preferences {
            age: Some(30),
            income: Some(80000),
            income_period: Some(IncomePeriod::Monthly),
            spending: [("dining".to_string(), 1000), ("fuel".to_string(), 2000)]
                .into_iter()
                .collect(),
            custom_spending: [("toys".to_string(), 500)].into_iter().collect(),
            reward_preferences: vec!["cashback".to_string()],
            bank_preference: Some("HDFC".to_string()),
            special_features: vec!["lounge access".to_string()],
            annual_fee_preference: Some(true),
            credit_score: Some("750".to_string()),
            existing_cards: vec!["Amazon Pay ICICI".to_string()],
        }
    }

    #[test]
    fn summary_includes_every_present_field_once_in_order() {
        let summary = preferences_to_summary(&full_prefs());
        let expected = [
            "Age: 30",
            "Income: 80000 (monthly)",
            "Spending: dining: ₹1000/mo, fuel: ₹2000/mo",
            "Custom Spending: toys: ₹500/mo",
            "Reward Preferences: cashback",
            "Bank Preference: HDFC",
            "Special Features: lounge access",
            "Annual Fee Preference: true",
            "Credit Score: 750",
            "Existing Cards: Amazon Pay ICICI",
        ];
        assert_eq!(summary, expected.join("; "));
    }

    #[test]
    fn summary_omits_absent_fields() {
        let prefs = Preferences {
            age: Some(25),
            ..Default::default()
        };
        assert_eq!(preferences_to_summary(&prefs), "Age: 25");

        assert_eq!(preferences_to_summary(&Preferences::default()), "");
    }

    #[test]
    fn summary_skips_zero_spending_amounts() {
        let prefs = Preferences {
            spending: [("fuel".to_string(), 0), ("dining".to_string(), 100)]
                .into_iter()
                .collect(),
            ..Default::default()
        };
        assert_eq!(preferences_to_summary(&prefs), "Spending: dining: ₹100/mo");
    }

    #[test]
    fn income_without_period_has_no_parenthetical() {
        let prefs = Preferences {
            income: Some(50000),
            ..Default::default()
        };
        assert_eq!(preferences_to_summary(&prefs), "Income: 50000");
    }

    #[test]
    fn card_text_is_deterministic() {
        let card = Card {
            name: "Regalia Gold".to_string(),
            issuer: "HDFC".to_string(),
            joining_fee: "₹2500".to_string(),
            annual_fee: "₹2500".to_string(),
            reward_type: "points".to_string(),
            reward_rate: "4 points per ₹150".to_string(),
            eligibility: "Income above ₹1L/month".to_string(),
            special_perks: "Lounge access".to_string(),
            image_url: None,
            apply_link: None,
        };
        assert_eq!(card_to_text(&card), card_to_text(&card.clone()));
        assert!(card_to_text(&card).starts_with("Name: Regalia Gold\nIssuer: HDFC\n"));
    }

    #[test]
    fn profile_summary_notes_fee_preference_only_when_true() {
        let mut prefs = full_prefs();
        assert!(profile_summary(&prefs).contains("Prefers low/waived fee"));
        prefs.annual_fee_preference = Some(false);
        assert!(!profile_summary(&prefs).contains("Prefers low/waived fee"));
    }
}
