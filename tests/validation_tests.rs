/// Unit tests for lead schema validation
/// Tests email/phone rules, stage coercion, and the form-level contract
use partner_leads::validation::{
    coerce_deal_value, is_valid_email, is_valid_phone, validate_lead_form, LeadFormInput,
};

#[cfg(test)]
mod email_validation_tests {
    use super::*;

    #[test]
    fn test_valid_emails() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("test.user@example.com"));
        assert!(is_valid_email("user+tag@example.co.uk"));
        assert!(is_valid_email("user_name@example-domain.com"));
        assert!(is_valid_email("jane.doe@example.com"));
    }

    #[test]
    fn test_invalid_emails_basic() {
        // Missing @ or .
        assert!(!is_valid_email("userexample.com"));
        assert!(!is_valid_email("user@examplecom"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("user@"));

        // Too short
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_invalid_emails_malformed() {
        assert!(!is_valid_email("user @example.com")); // space
        assert!(!is_valid_email("user@exam ple.com")); // space in domain
        assert!(!is_valid_email("user@@example.com"));
    }
}

#[cfg(test)]
mod phone_validation_tests {
    use super::*;

    #[test]
    fn test_valid_phones() {
        assert!(is_valid_phone("9876543211"));
        assert!(is_valid_phone("0000000000"));
    }

    #[test]
    fn test_invalid_phones() {
        // Wrong length
        assert!(!is_valid_phone("987654321"));
        assert!(!is_valid_phone("98765432110"));
        assert!(!is_valid_phone(""));

        // Non-digits
        assert!(!is_valid_phone("98765-4321"));
        assert!(!is_valid_phone("(987) 65432"));
        assert!(!is_valid_phone("98765abcde"));
    }
}

#[cfg(test)]
mod deal_value_tests {
    use super::*;

    #[test]
    fn test_coercion() {
        assert_eq!(coerce_deal_value("5000"), Some(5000.0));
        assert_eq!(coerce_deal_value(" 12.5 "), Some(12.5));
        assert_eq!(coerce_deal_value("-3"), Some(-3.0));
        assert_eq!(coerce_deal_value("abc"), None);
        assert_eq!(coerce_deal_value(""), None);
        assert_eq!(coerce_deal_value("inf"), None);
        assert_eq!(coerce_deal_value("NaN"), None);
    }
}

#[cfg(test)]
mod form_tests {
    use super::*;

    fn valid_input() -> LeadFormInput {
        LeadFormInput {
            lead_name: "Acme Industries".to_string(),
            email: "purchasing@acme.example".to_string(),
            phone: "9876543211".to_string(),
            deal_value: "12000".to_string(),
            stage: "In Progress".to_string(),
            last_interaction: "Demo scheduled for Friday".to_string(),
            additional_details: "Two decision makers".to_string(),
        }
    }

    #[test]
    fn test_valid_form_produces_draft() {
        let draft = validate_lead_form(&valid_input()).unwrap();
        assert_eq!(draft.lead_name, "Acme Industries");
        assert_eq!(draft.deal_value, 12000.0);
        assert_eq!(draft.additional_details, "Two decision makers");
    }

    #[test]
    fn test_name_minimum_length() {
        let mut input = valid_input();
        input.lead_name = "A".to_string();
        let errors = validate_lead_form(&input).unwrap_err();
        assert!(errors.iter().any(|e| e.field == "leadName"));

        input.lead_name = "Al".to_string();
        assert!(validate_lead_form(&input).is_ok());
    }

    #[test]
    fn test_interaction_minimum_length() {
        let mut input = valid_input();
        input.last_interaction = "call".to_string();
        let errors = validate_lead_form(&input).unwrap_err();
        assert!(errors.iter().any(|e| e.field == "lastInteraction"));

        input.last_interaction = "calls".to_string();
        assert!(validate_lead_form(&input).is_ok());
    }

    #[test]
    fn test_unknown_stage_rejected_blank_defaults() {
        let mut input = valid_input();
        input.stage = "Archived".to_string();
        let errors = validate_lead_form(&input).unwrap_err();
        assert!(errors.iter().any(|e| e.field == "stage"));

        input.stage = "".to_string();
        let draft = validate_lead_form(&input).unwrap();
        assert_eq!(draft.stage.as_str(), "New");
    }

    #[test]
    fn test_whitespace_is_trimmed() {
        let mut input = valid_input();
        input.lead_name = "  Acme Industries  ".to_string();
        input.email = " purchasing@acme.example ".to_string();
        input.deal_value = " 12000 ".to_string();
        let draft = validate_lead_form(&input).unwrap();
        assert_eq!(draft.lead_name, "Acme Industries");
        assert_eq!(draft.email, "purchasing@acme.example");
        assert_eq!(draft.deal_value, 12000.0);
    }

    #[test]
    fn test_default_input_is_not_submittable() {
        // The reset values themselves must never validate.
        let errors = validate_lead_form(&LeadFormInput::default()).unwrap_err();
        assert!(!errors.is_empty());
    }
}
