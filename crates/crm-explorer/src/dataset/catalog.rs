//! Demo tags, custom field definitions and deals.

use crm_seeker::Record;

use super::contacts::{iso_date, iso_timestamp, CONTACT_COUNT};

const TAGS: [(&str, &str); 12] = [
    ("vip", "segment"),
    ("newsletter", "marketing"),
    ("webinar", "marketing"),
    ("trial", "lifecycle"),
    ("customer", "lifecycle"),
    ("partner", "segment"),
    ("churn-risk", "lifecycle"),
    ("enterprise", "segment"),
    ("smb", "segment"),
    ("event-2024", "marketing"),
    ("onboarding", "lifecycle"),
    ("do-not-contact", "compliance"),
];

pub(super) fn tags() -> Vec<Record> {
    TAGS.iter()
        .enumerate()
        .map(|(i, (name, category))| {
            Record::new()
                .with("id", i + 1)
                .with("name", *name)
                .with("category", *category)
                .with("contactCount", (i * 17 + 3) % 90)
                .with("createdAt", iso_timestamp((i * 11) as i64, 600))
        })
        .collect()
}

struct FieldDefinition {
    name: &'static str,
    label: &'static str,
    field_type: &'static str,
    required: bool,
    options: &'static [&'static str],
}

const CUSTOM_FIELDS: [FieldDefinition; 6] = [
    FieldDefinition {
        name: "leadSource",
        label: "Lead Source",
        field_type: "dropdown",
        required: true,
        options: &["website", "referral", "webinar", "paid_ads", "trade_show"],
    },
    FieldDefinition {
        name: "industry",
        label: "Industry",
        field_type: "dropdown",
        required: false,
        options: &[
            "software",
            "healthcare",
            "manufacturing",
            "finance",
            "retail",
            "education",
        ],
    },
    FieldDefinition {
        name: "annualRevenue",
        label: "Annual Revenue",
        field_type: "currency",
        required: false,
        options: &[],
    },
    FieldDefinition {
        name: "preferredContact",
        label: "Preferred Contact Method",
        field_type: "radio",
        required: false,
        options: &["email", "phone", "sms"],
    },
    FieldDefinition {
        name: "renewalDate",
        label: "Renewal Date",
        field_type: "date",
        required: false,
        options: &[],
    },
    FieldDefinition {
        name: "accountNotes",
        label: "Account Notes",
        field_type: "textarea",
        required: false,
        options: &[],
    },
];

pub(super) fn custom_fields() -> Vec<Record> {
    CUSTOM_FIELDS
        .iter()
        .enumerate()
        .map(|(i, def)| {
            Record::new()
                .with("id", i + 1)
                .with("name", def.name)
                .with("label", def.label)
                .with("fieldType", def.field_type)
                .with("required", def.required)
                .with("options", def.options.to_vec())
                .with("createdAt", iso_timestamp((i * 4) as i64, 480))
        })
        .collect()
}

const DEAL_COUNT: usize = 40;

const STAGES: [(&str, f64); 5] = [
    ("prospecting", 10.0),
    ("qualified", 25.0),
    ("proposal", 50.0),
    ("negotiation", 75.0),
    ("closed_won", 100.0),
];

const OWNERS: [&str; 4] = ["Sam Rivera", "Priya Patel", "Jordan Lee", "Alex Kim"];

const PRODUCTS: [&str; 5] = [
    "Automation Suite",
    "Onboarding Package",
    "Annual Support",
    "Data Migration",
    "Custom Integration",
];

pub(super) fn deals() -> Vec<Record> {
    (0..DEAL_COUNT)
        .map(|i| {
            let (stage, probability) = STAGES[i % STAGES.len()];
            let contact_id = (i * 13) % CONTACT_COUNT + 1;
            Record::new()
                .with("id", i + 1)
                .with(
                    "title",
                    format!("{} #{}", PRODUCTS[i % PRODUCTS.len()], 1000 + i),
                )
                .with("contactId", contact_id)
                .with("stage", stage)
                .with("value", ((i * 389) % 45 + 5) * 500)
                .with("probability", probability)
                .with("owner", OWNERS[i % OWNERS.len()])
                .with("expectedCloseDate", iso_date(90 + (i * 9) as i64))
                .with("createdAt", iso_timestamp((i * 6) as i64, 615))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crm_seeker::FieldValue;

    #[test]
    fn tags_have_unique_names() {
        let tags = tags();
        let mut names: Vec<String> = tags.iter().map(|t| t.get("name").unwrap().to_text()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), tags.len());
    }

    #[test]
    fn custom_field_options_are_lists() {
        let fields = custom_fields();
        let lead_source = &fields[0];
        assert_eq!(lead_source.get("name"), Some(&FieldValue::from("leadSource")));
        assert_eq!(lead_source.get("options").and_then(FieldValue::as_list).map(|o| o.len()), Some(5));
        assert_eq!(fields[2].get("options"), Some(&FieldValue::List(Vec::new())));
    }

    #[test]
    fn deals_reference_existing_contacts() {
        for deal in deals() {
            let contact = deal.get("contactId").and_then(FieldValue::as_f64).unwrap();
            assert!(contact >= 1.0 && contact <= CONTACT_COUNT as f64);
        }
    }
}
