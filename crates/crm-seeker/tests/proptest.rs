//! Property-based tests for seeker using proptest.

use crm_seeker::{
    apply_filters, paginate, sort_records, ConditionValue, FieldValue, FilterCondition, Operator,
    Record, RecordQuery, SortOrder,
};
use proptest::prelude::*;

// ============================================================================
// Test helpers
// ============================================================================

fn field_value_strategy() -> impl Strategy<Value = FieldValue> {
    prop_oneof![
        Just(FieldValue::Null),
        any::<bool>().prop_map(FieldValue::Bool),
        (-1000i64..1000).prop_map(FieldValue::from),
        "[a-zA-Z0-9 ]{0,8}".prop_map(FieldValue::from),
        prop::collection::vec("[a-z]{1,4}", 0..3).prop_map(FieldValue::List),
    ]
}

fn record_strategy() -> impl Strategy<Value = Record> {
    (
        field_value_strategy(),
        field_value_strategy(),
        prop::option::of(-100i64..100),
    )
        .prop_map(|(status, name, score)| {
            let mut record = Record::new().with("status", status).with("name", name);
            if let Some(score) = score {
                record.insert("score", score);
            }
            record
        })
}

fn condition_strategy() -> impl Strategy<Value = FilterCondition> {
    let op = prop_oneof![
        Just(Operator::Eq),
        Just(Operator::Neq),
        Just(Operator::Gt),
        Just(Operator::Gte),
        Just(Operator::Lt),
        Just(Operator::Lte),
        Just(Operator::Contains),
        Just(Operator::StartsWith),
        Just(Operator::Between),
        Just(Operator::Unknown("like".to_string())),
    ];
    let value = prop_oneof![
        (-100i64..100).prop_map(ConditionValue::from),
        "[a-z0-9]{0,3}".prop_map(ConditionValue::from),
    ];
    (
        prop_oneof![Just("status"), Just("name"), Just("score"), Just("missing")],
        op,
        value,
        -100i64..100,
    )
        .prop_map(|(column, op, value, high)| {
            if op.is_range() {
                FilterCondition::range(column, op, value, high)
            } else {
                FilterCondition::new(column, op, value)
            }
        })
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    /// Page length never exceeds the page size.
    #[test]
    fn page_is_bounded(
        items in prop::collection::vec(any::<u8>(), 0..200),
        page in -5i64..20,
        page_size in 1usize..60,
    ) {
        let result = paginate(items.clone(), page, page_size).unwrap();
        prop_assert!(result.records.len() <= page_size);
        prop_assert!(result.page >= 1 && result.page <= result.total_pages);
        prop_assert_eq!(result.total_records, items.len());
    }

    /// Walking every page yields the whole collection exactly once.
    #[test]
    fn pages_cover_everything(
        items in prop::collection::vec(any::<u16>(), 0..200),
        page_size in 1usize..60,
    ) {
        let total_pages = paginate(items.clone(), 1, page_size).unwrap().total_pages;
        let mut seen = Vec::new();
        for page in 1..=total_pages {
            seen.extend(paginate(items.clone(), page as i64, page_size).unwrap().records);
        }
        prop_assert_eq!(seen, items);
    }

    /// Pages past the end serve the last page.
    #[test]
    fn pages_past_the_end_are_clamped(
        items in prop::collection::vec(any::<u8>(), 0..200),
        page_size in 1usize..60,
        overshoot in 1i64..100,
    ) {
        let last = paginate(items.clone(), i64::MAX, page_size).unwrap();
        let beyond = paginate(items, last.total_pages as i64 + overshoot, page_size).unwrap();
        prop_assert_eq!(beyond.page, last.total_pages);
        prop_assert_eq!(beyond.records, last.records);
    }

    /// Re-applying the same filters changes nothing.
    #[test]
    fn filtering_is_idempotent(
        records in prop::collection::vec(record_strategy(), 0..40),
        conditions in prop::collection::vec(condition_strategy(), 0..4),
    ) {
        let once = apply_filters(records, &conditions);
        let twice = apply_filters(once.clone(), &conditions);
        prop_assert_eq!(once, twice);
    }

    /// Filtering never grows the collection.
    #[test]
    fn filter_never_grows_collection(
        records in prop::collection::vec(record_strategy(), 0..40),
        conditions in prop::collection::vec(condition_strategy(), 0..4),
    ) {
        let before = records.len();
        prop_assert!(apply_filters(records, &conditions).len() <= before);
    }

    /// Exactly one of eq/neq holds for the same column and value.
    #[test]
    fn eq_and_neq_are_complementary(
        record in record_strategy(),
        column in prop_oneof![Just("status"), Just("name"), Just("score"), Just("missing")],
        value in "[a-z0-9]{0,3}",
    ) {
        let eq = FilterCondition::new(column, Operator::Eq, value.as_str()).matches(&record);
        let neq = FilterCondition::new(column, Operator::Neq, value.as_str()).matches(&record);
        prop_assert!(eq != neq);
    }

    /// Sorting a sorted set again leaves it unchanged.
    #[test]
    fn sorting_is_idempotent(
        records in prop::collection::vec(record_strategy(), 0..40),
        desc in any::<bool>(),
    ) {
        let order = if desc { SortOrder::Desc } else { SortOrder::Asc };
        let once = sort_records(&records, "score", order);
        let twice = sort_records(&once, "score", order);
        prop_assert_eq!(once, twice);
    }

    /// Numeric sort puts values in order with absent values at the start.
    #[test]
    fn numeric_sort_orders_values(
        scores in prop::collection::vec(prop::option::of(-1000i64..1000), 0..40),
    ) {
        let records: Vec<Record> = scores
            .iter()
            .map(|s| match s {
                Some(n) => Record::new().with("score", *n),
                None => Record::new(),
            })
            .collect();
        let sorted = sort_records(&records, "score", SortOrder::Asc);
        let values: Vec<Option<f64>> = sorted
            .iter()
            .map(|r| r.get("score").and_then(FieldValue::as_f64))
            .collect();
        let mut expected: Vec<Option<f64>> = scores.iter().map(|s| s.map(|n| n as f64)).collect();
        expected.sort_by(|a, b| a.partial_cmp(b).unwrap());
        prop_assert_eq!(values, expected);
    }

    /// The query pipeline's total equals the filtered count.
    #[test]
    fn total_records_equals_count(
        records in prop::collection::vec(record_strategy(), 0..60),
        conditions in prop::collection::vec(condition_strategy(), 0..3),
        search in "[a-z ]{0,2}",
        page in 1i64..5,
    ) {
        let query = RecordQuery::new()
            .filters(conditions)
            .search(search)
            .order_asc("name")
            .page(page)
            .page_size(7);
        let count = query.count(records.clone());
        let page = query.execute(records).unwrap();
        prop_assert_eq!(page.total_records, count);
    }
}

// ============================================================================
// Edge cases
// ============================================================================

#[test]
fn empty_collection_returns_one_empty_page() {
    let page = RecordQuery::new()
        .and_eq("status", "active")
        .page(4)
        .execute(Vec::new())
        .unwrap();

    assert!(page.records.is_empty());
    assert_eq!(page.page, 1);
    assert_eq!(page.total_pages, 1);
}

#[test]
fn page_size_zero_is_an_error() {
    let records = vec![Record::new().with("id", 1)];
    assert!(RecordQuery::new().page_size(0).execute(records).is_err());
}
