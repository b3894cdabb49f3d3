//! Demo contacts.
//!
//! Contacts come out of a CRM with their custom fields nested in a
//! sub-object. The explorer works on flat records, so [`ContactSeed::flatten`]
//! hoists each custom field to a top-level key and drops the nesting.

use chrono::{DateTime, Duration, Utc};
use crm_seeker::Record;

/// Number of demo contacts.
pub const CONTACT_COUNT: usize = 120;

/// Days from the Unix epoch to 2024-01-01.
const EPOCH_DAYS_2024: i64 = 19_723;

const FIRST_NAMES: [&str; 12] = [
    "Ada", "Grace", "Alan", "Linus", "Margaret", "Dennis", "Barbara", "Ken", "Frances", "Edsger",
    "Radia", "John",
];

const LAST_NAMES: [&str; 10] = [
    "Lovelace", "Hopper", "Turing", "Torvalds", "Hamilton", "Ritchie", "Liskov", "Thompson",
    "Allen", "Perlman",
];

const COMPANIES: [(&str, &str); 8] = [
    ("Acme Corp", "acme.com"),
    ("Globex", "globex.com"),
    ("Initech", "initech.com"),
    ("Umbrella Health", "umbrella.health"),
    ("Stark Industries", "stark.io"),
    ("Wayne Enterprises", "wayne.co"),
    ("Hooli", "hooli.xyz"),
    ("Soylent, Inc.", "soylent.com"),
];

const STATUSES: [&str; 4] = ["active", "active", "lead", "inactive"];

const TAGS: [&str; 6] = ["vip", "newsletter", "webinar", "trial", "partner", "churn-risk"];

const LEAD_SOURCES: [&str; 5] = ["website", "referral", "webinar", "paid_ads", "trade_show"];

const INDUSTRIES: [&str; 6] = [
    "software",
    "healthcare",
    "manufacturing",
    "finance",
    "retail",
    "education",
];

const PREFERRED_CONTACT: [&str; 3] = ["email", "phone", "sms"];

/// Custom field values as the CRM nests them.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct CustomFieldValues {
    pub lead_source: &'static str,
    pub industry: &'static str,
    pub annual_revenue: Option<f64>,
    pub preferred_contact: &'static str,
}

/// A contact before flattening.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct ContactSeed {
    pub id: usize,
    pub first_name: &'static str,
    pub last_name: &'static str,
    pub email: String,
    pub phone: String,
    pub company: &'static str,
    pub status: &'static str,
    pub tags: Vec<&'static str>,
    pub score: usize,
    pub opt_in: bool,
    pub created_at: String,
    pub last_activity: String,
    pub custom_fields: CustomFieldValues,
}

impl ContactSeed {
    /// Builds the `i`th demo contact (0-based).
    pub fn generate(i: usize) -> Self {
        let first_name = FIRST_NAMES[i % FIRST_NAMES.len()];
        let last_name = LAST_NAMES[(i * 7 / 3) % LAST_NAMES.len()];
        let (company, domain) = COMPANIES[(i * 5) % COMPANIES.len()];
        let created_day = ((i * 3) % 365) as i64;
        let created_minute = (540 + (i * 53) % 600) as i64;

        let tags = TAGS
            .iter()
            .enumerate()
            .filter(|(t, _)| (i + t * 2) % 5 == 0)
            .map(|(_, tag)| *tag)
            .collect();

        ContactSeed {
            id: i + 1,
            first_name,
            last_name,
            email: format!(
                "{}.{}{}@{}",
                first_name.to_lowercase(),
                last_name.to_lowercase(),
                i + 1,
                domain
            ),
            phone: format!("+1-555-{:04}", (i * 137) % 10_000),
            company,
            status: STATUSES[i % STATUSES.len()],
            tags,
            score: (i * 37) % 100,
            opt_in: i % 3 != 0,
            created_at: iso_timestamp(created_day, created_minute),
            last_activity: iso_timestamp(created_day + (i % 30) as i64, created_minute + 95),
            custom_fields: CustomFieldValues {
                lead_source: LEAD_SOURCES[i % LEAD_SOURCES.len()],
                industry: INDUSTRIES[(i / 2) % INDUSTRIES.len()],
                annual_revenue: (i % 7 != 3).then(|| (((i * 7919) % 50 + 1) * 10_000) as f64),
                preferred_contact: PREFERRED_CONTACT[i % PREFERRED_CONTACT.len()],
            },
        }
    }

    /// Produces the flat record, custom fields hoisted to the top level.
    pub fn flatten(self) -> Record {
        let ContactSeed {
            id,
            first_name,
            last_name,
            email,
            phone,
            company,
            status,
            tags,
            score,
            opt_in,
            created_at,
            last_activity,
            custom_fields,
        } = self;

        Record::new()
            .with("id", id)
            .with("firstName", first_name)
            .with("lastName", last_name)
            .with("email", email)
            .with("phone", phone)
            .with("company", company)
            .with("status", status)
            .with("tags", tags)
            .with("score", score)
            .with("optIn", opt_in)
            .with("createdAt", created_at)
            .with("lastActivity", last_activity)
            .with("leadSource", custom_fields.lead_source)
            .with("industry", custom_fields.industry)
            .with("annualRevenue", custom_fields.annual_revenue)
            .with("preferredContact", custom_fields.preferred_contact)
    }
}

/// All demo contacts, flattened.
pub(super) fn flattened_contacts() -> Vec<Record> {
    (0..CONTACT_COUNT)
        .map(|i| ContactSeed::generate(i).flatten())
        .collect()
}

/// ISO-8601 UTC timestamp `days` after 2024-01-01, at `minutes` past midnight.
pub(super) fn iso_timestamp(days: i64, minutes: i64) -> String {
    let at = DateTime::<Utc>::UNIX_EPOCH
        + Duration::days(EPOCH_DAYS_2024 + days)
        + Duration::minutes(minutes);
    at.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

/// Calendar date `days` after 2024-01-01.
pub(super) fn iso_date(days: i64) -> String {
    let at = DateTime::<Utc>::UNIX_EPOCH + Duration::days(EPOCH_DAYS_2024 + days);
    at.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crm_seeker::FieldValue;

    #[test]
    fn flatten_hoists_custom_fields() {
        let record = ContactSeed::generate(0).flatten();
        assert!(!record.contains_key("customFields"));
        for key in ["leadSource", "industry", "annualRevenue", "preferredContact"] {
            assert!(record.contains_key(key), "missing {key}");
        }
        assert_eq!(record.get("leadSource"), Some(&FieldValue::from("website")));
        assert_eq!(record.keys().next(), Some("id"));
    }

    #[test]
    fn some_revenues_are_null() {
        let contacts = flattened_contacts();
        let nulls = contacts
            .iter()
            .filter(|r| r.get("annualRevenue") == Some(&FieldValue::Null))
            .count();
        assert!(nulls > 0 && nulls < contacts.len());
    }

    #[test]
    fn ids_are_unique_and_sequential() {
        let contacts = flattened_contacts();
        assert_eq!(contacts.len(), CONTACT_COUNT);
        for (i, record) in contacts.iter().enumerate() {
            assert_eq!(record.get("id"), Some(&FieldValue::from(i + 1)));
        }
    }

    #[test]
    fn timestamps_are_iso() {
        assert_eq!(iso_timestamp(0, 540), "2024-01-01T09:00:00.000Z");
        assert_eq!(iso_timestamp(31, 0), "2024-02-01T00:00:00.000Z");
        assert_eq!(iso_date(59), "2024-02-29");
    }
}
