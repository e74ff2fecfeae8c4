use crate::compile::compile;
use crate::error::FilterError;
use crate::predicate::Predicate;
use crate::translate::translate;
use fql_syntax::{builder, normalize::normalize, schema::Schema};
use tracing::debug;

/// Parse `filter` against the logical schema, then retarget the compiled
/// predicate to the physical schema.
///
/// An absent or blank filter matches everything. Anything else either
/// yields a fully translated predicate or an error; there is no partial
/// result.
pub fn parse_and_translate(
    filter: Option<&str>,
    logical: &Schema,
    physical: &Schema,
) -> Result<Predicate, FilterError> {
    match filter {
        Some(text) if !text.trim().is_empty() => {
            let predicate = parse_against(text, logical)?;
            Ok(translate(&predicate, physical)?)
        }
        _ => Ok(Predicate::always(&physical.name)),
    }
}

/// Parse `filter` into a predicate over the schema the client sees,
/// without retargeting.
pub fn parse_filter(filter: Option<&str>, schema: &Schema) -> Result<Predicate, FilterError> {
    match filter {
        Some(text) if !text.trim().is_empty() => parse_against(text, schema),
        _ => Ok(Predicate::always(&schema.name)),
    }
}

fn parse_against(text: &str, schema: &Schema) -> Result<Predicate, FilterError> {
    let normalized = normalize(text);
    debug!(schema = %schema.name, "compiling filter");
    let ast = builder::parse(&normalized, schema)?;
    Ok(compile(&ast, schema))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TranslateError;
    use chrono::NaiveDate;
    use fql_syntax::errors::FilterParseError;
    use fql_syntax::schema::FieldKind;
    use model::core::value::Value;
    use model::records::record::Record;

    fn logical() -> Schema {
        Schema::new("RunDto")
            .with_field("date", FieldKind::DateTime)
            .with_field("distance", FieldKind::Integer)
            .with_field("duration", FieldKind::Integer)
    }

    fn physical() -> Schema {
        Schema::new("RunDb")
            .with_field("id", FieldKind::Integer)
            .with_field("date", FieldKind::DateTime)
            .with_field("distance", FieldKind::Integer)
            .with_field("duration", FieldKind::Integer)
    }

    fn date_value(y: i32, m: u32, d: u32) -> Value {
        Value::DateTime(
            NaiveDate::from_ymd_opt(y, m, d)
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .expect("valid date"),
        )
    }

    fn run(id: i64, date: Value, distance: i64) -> Record {
        Record::from_pairs(vec![
            ("id", Value::Int(id)),
            ("date", date),
            ("distance", Value::Int(distance)),
            ("duration", Value::Int(60)),
        ])
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let logical = logical();
        let physical = physical();

        for filter in [None, Some(""), Some("   ")] {
            let predicate = parse_and_translate(filter, &logical, &physical).expect("parse");
            assert!(predicate.matches(&run(1, date_value(2016, 5, 1), 0)));
            assert_eq!(predicate.schema_name(), "RunDb");
        }
    }

    #[test]
    fn test_simple_comparison_round_trip() {
        let predicate =
            parse_and_translate(Some("distance gt 20"), &logical(), &physical()).expect("parse");

        assert!(predicate.matches(&run(1, date_value(2016, 5, 1), 21)));
        assert!(!predicate.matches(&run(2, date_value(2016, 5, 1), 20)));
        assert!(!predicate.matches(&run(3, date_value(2016, 5, 1), 19)));
    }

    #[test]
    fn test_precedence_selects_the_matching_subset() {
        let filter = "(date eq '2016-05-01') and ((distance gt 20) or (distance lt 10))";
        let predicate =
            parse_and_translate(Some(filter), &logical(), &physical()).expect("parse");

        let matching_date = date_value(2016, 5, 1);
        let other_date = date_value(2016, 6, 1);

        let records = vec![
            run(1, matching_date.clone(), 21),
            run(2, matching_date.clone(), 9),
            run(3, other_date.clone(), 9),
            run(4, matching_date.clone(), 15),
            run(5, other_date, 9),
        ];

        let selected: Vec<i64> = records
            .iter()
            .filter(|r| predicate.matches(r))
            .map(|r| match r.get_value("id") {
                Value::Int(id) => id,
                other => panic!("unexpected id value {:?}", other),
            })
            .collect();

        assert_eq!(selected, vec![1, 2]);
    }

    #[test]
    fn test_keyword_case_is_irrelevant() {
        let logical = logical();
        let physical = physical();

        let upper =
            parse_and_translate(Some("Date GT '2020-02-02'"), &logical, &physical).expect("parse");
        let lower =
            parse_and_translate(Some("date gt '2020-02-02'"), &logical, &physical).expect("parse");

        assert_eq!(upper, lower);
    }

    #[test]
    fn test_unknown_field_surfaces_as_filter_error() {
        let err =
            parse_and_translate(Some("speed gt 20"), &logical(), &physical()).unwrap_err();
        assert!(err.to_string().contains("Couldn't parse the filter"));
        match err {
            FilterError::Parse(FilterParseError::UnknownField { name, .. }) => {
                assert_eq!(name, "speed");
            }
            other => panic!("Expected unknown field error, got {:?}", other),
        }
    }

    #[test]
    fn test_field_mismatch_surfaces_at_translation() {
        let bare_physical = Schema::new("RunDb").with_field("date", FieldKind::DateTime);
        let err = parse_and_translate(Some("distance gt 20"), &logical(), &bare_physical)
            .unwrap_err();
        assert!(matches!(
            err,
            FilterError::Translate(TranslateError::FieldMapping { .. })
        ));
    }

    #[test]
    fn test_parse_filter_stays_on_the_logical_schema() {
        let predicate = parse_filter(Some("distance gt 20"), &logical()).expect("parse");
        assert_eq!(predicate.schema_name(), "RunDto");

        let record = Record::from_pairs(vec![
            ("date", date_value(2016, 5, 1)),
            ("distance", Value::Int(21)),
            ("duration", Value::Int(60)),
        ]);
        assert!(predicate.matches(&record));
    }
}
