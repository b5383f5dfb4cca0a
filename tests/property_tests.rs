/// Property-based tests using proptest
/// Tests invariants that should hold for all inputs
use partner_leads::bulk::CsvLeadRow;
use partner_leads::dashboard::{compute_metrics, COMMISSION_RATE};
use partner_leads::models::{Lead, LeadStage};
use partner_leads::validation::{
    coerce_deal_value, is_valid_email, is_valid_phone, validate_lead_form, LeadFormInput,
};
use proptest::prelude::*;

fn any_stage() -> impl Strategy<Value = LeadStage> {
    prop::sample::select(vec![
        LeadStage::New,
        LeadStage::InProgress,
        LeadStage::Qualified,
        LeadStage::Closed,
        LeadStage::Converted,
    ])
}

fn lead(budget: f64, stage: LeadStage) -> Lead {
    Lead {
        id: "p".to_string(),
        lead_name: "Prop".to_string(),
        contact_details: String::new(),
        phone: String::new(),
        email: String::new(),
        p_code: String::new(),
        budget,
        stage,
        last_interaction: String::new(),
        additional_details: None,
    }
}

// Property: validation should never panic
proptest! {
    #[test]
    fn email_validation_never_panics(email in "\\PC*") {
        let _ = is_valid_email(&email);
    }

    #[test]
    fn phone_validation_never_panics(phone in "\\PC*") {
        let _ = is_valid_phone(&phone);
    }

    #[test]
    fn form_validation_never_panics(
        lead_name in "\\PC*",
        email in "\\PC*",
        phone in "\\PC*",
        deal_value in "\\PC*",
        stage in "\\PC*",
        last_interaction in "\\PC*",
        additional_details in "\\PC*",
    ) {
        let input = LeadFormInput {
            lead_name,
            email,
            phone,
            deal_value,
            stage,
            last_interaction,
            additional_details,
        };
        let _ = validate_lead_form(&input);
    }
}

// Property: non-positive deal values are always rejected client-side
proptest! {
    #[test]
    fn non_positive_deal_values_rejected(value in -1.0e9f64..=0.0f64) {
        let input = LeadFormInput {
            lead_name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone: "9876543211".to_string(),
            deal_value: format!("{}", value),
            stage: "New".to_string(),
            last_interaction: "Long enough summary".to_string(),
            additional_details: String::new(),
        };
        let errors = validate_lead_form(&input).unwrap_err();
        prop_assert!(errors.iter().any(|e| e.field == "dealValue"));
    }

    #[test]
    fn positive_deal_values_accepted(value in 0.01f64..1.0e9f64) {
        let input = LeadFormInput {
            lead_name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone: "9876543211".to_string(),
            deal_value: format!("{}", value),
            stage: "New".to_string(),
            last_interaction: "Long enough summary".to_string(),
            additional_details: String::new(),
        };
        let draft = validate_lead_form(&input);
        prop_assert!(draft.is_ok());
    }
}

// Property: stage strings round-trip through parse
proptest! {
    #[test]
    fn stage_round_trips(stage in any_stage()) {
        prop_assert_eq!(LeadStage::parse(stage.as_str()), Some(stage));
    }
}

// Property: bulk coercion is total and agrees with the strict coercer
proptest! {
    #[test]
    fn csv_coercion_never_panics_and_is_finite(
        lead_name in "\\PC*",
        contact in "\\PC*",
        deal_value in "\\PC*",
        stage in "\\PC*",
    ) {
        let row = CsvLeadRow {
            lead_name,
            contact_details: contact,
            deal_value: deal_value.clone(),
            stage,
            last_interaction: String::new(),
            additional_details: None,
        };
        let draft = row.coerce();
        prop_assert!(draft.deal_value.is_finite());

        // Zero fallback exactly when the strict coercer gives nothing.
        match coerce_deal_value(&deal_value) {
            Some(v) => prop_assert_eq!(draft.deal_value, v),
            None => prop_assert_eq!(draft.deal_value, 0.0),
        }
    }
}

// Property: commission counts Closed leads only
proptest! {
    #[test]
    fn commission_sums_closed_stage_only(
        leads in prop::collection::vec((0.0f64..1.0e6f64, any_stage()), 0..50)
    ) {
        let collection: Vec<Lead> = leads
            .iter()
            .map(|(budget, stage)| lead(*budget, *stage))
            .collect();
        let metrics = compute_metrics(&collection);

        prop_assert_eq!(metrics.total_leads, collection.len());

        let expected_qualified = collection
            .iter()
            .filter(|l| matches!(l.stage, LeadStage::Qualified | LeadStage::Closed))
            .count();
        prop_assert_eq!(metrics.qualified_leads, expected_qualified);

        let expected_commission: f64 = collection
            .iter()
            .filter(|l| l.stage == LeadStage::Closed)
            .map(|l| l.budget * COMMISSION_RATE)
            .sum();
        prop_assert!((metrics.total_commission - expected_commission).abs() < 1e-6);
    }
}
