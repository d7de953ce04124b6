//! End-to-end conversions of small documents.

use jcal_core::policy::{InvalidValue, NumericPolicy};
use serde_json::json;

use crate::error::RfcError;
use crate::rfc::ical::core::ValueType;
use crate::rfc::ical::parse::parse_components;
use crate::rfc::jcal::{
    Converter, Diagnostic, JCal, JCalError, ical_to_jcal, ical_to_jcal_string, jcal_str_to_ical,
    jcal_to_ical, parse_jcal,
};

fn wrap(kind: &str, lines: &str) -> String {
    format!("BEGIN:{kind}\r\n{lines}END:{kind}\r\n")
}

fn convert(converter: &mut Converter, input: &str) -> Result<serde_json::Value, JCalError> {
    let components = parse_components(input).unwrap();
    converter
        .to_jcal(&components)
        .map(|jcal| serde_json::to_value(jcal).unwrap())
}

#[test]
fn date_start_and_summary() {
    let input = wrap("VEVENT", "DTSTART;VALUE=DATE:20240101\r\nSUMMARY:Test\r\n");

    let jcal = ical_to_jcal(&input).unwrap();
    assert_eq!(
        serde_json::to_value(&jcal).unwrap(),
        json!([
            "vevent",
            [
                ["dtstart", {}, "date", "2024-01-01"],
                ["summary", {}, "text", "Test"]
            ],
            []
        ])
    );

    assert_eq!(jcal_to_ical(&jcal).unwrap(), input);
}

#[test]
fn geo_with_explicit_float() {
    let input = wrap("VEVENT", "GEO;VALUE=FLOAT:37.5;-122.25\r\n");

    let json = ical_to_jcal_string(&input).unwrap();
    assert_eq!(json, r#"["vevent",[["geo",{},"float",[37.5,-122.25]]],[]]"#);
    assert_eq!(
        jcal_str_to_ical(&json).unwrap(),
        wrap("VEVENT", "GEO:37.5;-122.25\r\n")
    );
}

#[test_log::test]
fn malformed_numbers_use_policy_defaults() {
    let input = wrap("VTODO", "PRIORITY:high\r\nGEO:north;1.5\r\n");
    let policy: NumericPolicy =
        serde_json::from_value(json!({"float": 0.0, "integer": 0})).unwrap();
    let mut converter = Converter::with_policy(policy);

    let json = convert(&mut converter, &input).unwrap();
    assert_eq!(
        json,
        json!([
            "vtodo",
            [
                ["priority", {}, "integer", 0],
                ["geo", {}, "float", [0.0, 1.5]]
            ],
            []
        ])
    );

    let diagnostics = converter.take_diagnostics();
    assert_eq!(diagnostics.len(), 2);
    assert_eq!(
        diagnostics[0],
        Diagnostic::NumericDefaultSubstituted {
            property: "priority".to_string(),
            value_type: ValueType::Integer,
            value: "high".to_string(),
            substitute: "0".to_string(),
        }
    );
    assert_eq!(diagnostics[1].property(), "geo");
}

#[test]
fn malformed_numbers_raise_by_default() {
    let mut converter = Converter::with_policy(NumericPolicy::STRICT);

    let err = convert(&mut converter, &wrap("VTODO", "PRIORITY:high\r\n")).unwrap_err();
    assert_eq!(
        err,
        JCalError::InvalidNumericValue {
            property: "priority".to_string(),
            value_type: ValueType::Integer,
            value: "high".to_string(),
        }
    );

    let err = convert(&mut converter, &wrap("VEVENT", "GEO:north;1.5\r\n")).unwrap_err();
    assert!(matches!(
        err,
        JCalError::InvalidNumericValue { ref property, value_type: ValueType::Float, .. }
            if property == "geo"
    ));
    assert!(converter.diagnostics().is_empty());
}

#[test]
fn float_policy_can_raise_while_integer_substitutes() {
    let policy = NumericPolicy {
        float: InvalidValue::Raise,
        integer: InvalidValue::Default(-1),
    };
    let mut converter = Converter::with_policy(policy);

    let json = convert(&mut converter, &wrap("VTODO", "PRIORITY:high\r\n")).unwrap();
    assert_eq!(json[1][0], json!(["priority", {}, "integer", -1]));
    assert!(convert(&mut converter, &wrap("VEVENT", "GEO:north;1.5\r\n")).is_err());
}

#[test]
fn malformed_jcal_numbers_follow_policy() {
    let jcal = parse_jcal(r#"["vtodo",[["priority",{},"integer","high"]],[]]"#).unwrap();

    let err = Converter::with_policy(NumericPolicy::STRICT)
        .from_jcal(&jcal)
        .unwrap_err();
    assert!(matches!(err, JCalError::InvalidNumericValue { .. }));

    let mut converter = Converter::with_policy(NumericPolicy::LENIENT);
    let components = converter.from_jcal(&jcal).unwrap();
    assert_eq!(
        crate::rfc::ical::build::serialize_components(&components),
        wrap("VTODO", "PRIORITY:0\r\n")
    );
}

#[test]
fn zoned_and_utc_date_times_from_jcal() {
    let json = r#"["vevent",[
        ["dtstart",{"tzid":"Europe/Berlin"},"date-time","2024-03-01T10:00:00"],
        ["dtend",{},"date-time","2024-03-01T11:00:00Z"],
        ["recurrence-id",{},"date-time","2024-03-01T12:00:00"]
    ],[]]"#;

    assert_eq!(
        jcal_str_to_ical(json).unwrap(),
        wrap(
            "VEVENT",
            "DTSTART;TZID=Europe/Berlin:20240301T100000\r\n\
             DTEND:20240301T110000Z\r\n\
             RECURRENCE-ID:20240301T120000\r\n"
        )
    );
}

#[test]
fn utc_tzid_alias_becomes_z() {
    let input = wrap("VEVENT", "DTSTART;TZID=UTC:20240301T100000\r\n");
    let json = serde_json::to_value(ical_to_jcal(&input).unwrap()).unwrap();
    assert_eq!(
        json[1][0],
        json!(["dtstart", {}, "date-time", "2024-03-01T10:00:00Z"])
    );
}

#[test]
fn period_forms_from_jcal() {
    let json = r#"["vfreebusy",[
        ["freebusy",{},"period",["1997-03-08T16:00:00Z","PT8H30M"]],
        ["freebusy",{},"period","1997-03-08T23:00:00Z/1997-03-09T00:00:00Z"]
    ],[]]"#;

    assert_eq!(
        jcal_str_to_ical(json).unwrap(),
        wrap(
            "VFREEBUSY",
            "FREEBUSY:19970308T160000Z/PT8H30M\r\n\
             FREEBUSY:19970308T230000Z/19970309T000000Z\r\n"
        )
    );
}

#[test]
fn rdate_periods_get_value_param() {
    let input = wrap("VEVENT", "RDATE;VALUE=PERIOD:19970101T180000Z/PT5H30M\r\n");
    let jcal = ical_to_jcal(&input).unwrap();
    assert_eq!(
        serde_json::to_value(&jcal).unwrap()[1][0],
        json!(["rdate", {}, "period", ["1997-01-01T18:00:00Z", "PT5H30M"]])
    );
    assert_eq!(jcal_to_ical(&jcal).unwrap(), input);
}

#[test_log::test]
fn mixed_rdate_is_tagged_with_first_type() {
    let mut converter = Converter::with_policy(NumericPolicy::STRICT);
    let json = convert(
        &mut converter,
        &wrap("VEVENT", "RDATE:19970101,19970102T090000Z\r\n"),
    )
    .unwrap();

    assert_eq!(
        json[1][0],
        json!(["rdate", {}, "date", "1997-01-01", "1997-01-02T09:00:00Z"])
    );
    assert_eq!(
        converter.diagnostics(),
        &[Diagnostic::MixedValueTypes {
            property: "rdate".to_string(),
            used: ValueType::Date,
            found: ValueType::DateTime,
        }]
    );

    let jcal = parse_jcal(&json.to_string()).unwrap();
    let components = converter.from_jcal(&jcal).unwrap();
    assert_eq!(
        crate::rfc::ical::build::serialize_components(&components),
        wrap("VEVENT", "RDATE:19970101,19970102T090000Z\r\n")
    );
    assert_eq!(converter.diagnostics().len(), 2);
}

#[test_log::test]
fn mixed_date_lists_round_trip() {
    for lines in [
        "EXDATE:20240101,20240102T090000Z\r\n",
        "RDATE:20240101,20240102T090000Z/PT1H\r\n",
        "RDATE:20240102T090000Z/PT1H,20240103T090000Z\r\n",
    ] {
        let input = wrap("VEVENT", lines);
        let json = ical_to_jcal_string(&input).unwrap();
        assert_eq!(jcal_str_to_ical(&json).unwrap(), input, "{json}");
    }
}

#[test]
fn repeated_parameters_are_kept() {
    let input = wrap("VEVENT", "ATTENDEE;X-TAG=a;CN=Jo;X-TAG=b:mailto:jo@example.com\r\n");
    let json = serde_json::to_value(ical_to_jcal(&input).unwrap()).unwrap();
    assert_eq!(
        json[1][0],
        json!([
            "attendee",
            {"x-tag": ["a", "b"], "cn": "Jo"},
            "cal-address",
            "mailto:jo@example.com"
        ])
    );
}

#[test]
fn extension_property_value_types_survive() {
    let input = wrap(
        "VEVENT",
        "X-START-TIME;VALUE=TIME:083000\r\nX-ALARM-AT;VALUE=DATE-TIME:20240101T080000Z\r\n",
    );

    let json = ical_to_jcal_string(&input).unwrap();
    assert_eq!(
        json,
        r#"["vevent",[["x-start-time",{},"time","08:30:00"],["x-alarm-at",{},"date-time","2024-01-01T08:00:00Z"]],[]]"#
    );
    assert_eq!(jcal_str_to_ical(&json).unwrap(), input);
}

#[test]
fn recurrence_rules_from_jcal() {
    let json = r#"["vevent",[
        ["rrule",{},"recur",{"freq":"MONTHLY","byday":["1mo","-1fr"],"until":"2024-12-31"}]
    ],[]]"#;
    assert_eq!(
        jcal_str_to_ical(json).unwrap(),
        wrap("VEVENT", "RRULE:FREQ=MONTHLY;UNTIL=20241231;BYDAY=1MO,-1FR\r\n")
    );

    let bad = r#"["vevent",[["rrule",{},"recur",{"freq":["daily","weekly"]}]],[]]"#;
    let err = jcal_str_to_ical(bad).unwrap_err();
    assert!(matches!(
        err,
        RfcError::JCalError(JCalError::InvalidRecurrenceField { ref field, .. }) if field == "freq"
    ));
}

#[test]
fn malformed_values_are_errors() {
    let err = jcal_str_to_ical(r#"["vevent",[["dtstart",{},"date","2024-13-45"]],[]]"#)
        .unwrap_err();
    assert!(matches!(
        err,
        RfcError::JCalError(JCalError::MalformedValue { ref property, .. }) if property == "dtstart"
    ));

    let err = jcal_str_to_ical(r#"["vevent",[["attach",{},"binary","not base64!"]],[]]"#)
        .unwrap_err();
    assert!(matches!(
        err,
        RfcError::JCalError(JCalError::MalformedValue { .. })
    ));
}

#[test]
fn malformed_documents_are_errors() {
    assert!(matches!(
        parse_jcal("[").unwrap_err(),
        RfcError::JsonError(_)
    ));
    assert!(matches!(
        parse_jcal("[]").unwrap_err(),
        RfcError::JCalError(JCalError::InvalidStructure(_))
    ));
    assert!(matches!(
        parse_jcal(r#"["vevent",[["summary",{},"text"]],[]]"#).unwrap_err(),
        RfcError::JCalError(JCalError::InvalidStructure(_))
    ));
    assert!(matches!(
        ical_to_jcal("SUMMARY:no component\r\n").unwrap_err(),
        RfcError::ParseError(_)
    ));
}

#[test]
fn sequence_documents_from_jcal() {
    let json = r#"[["vcalendar",[],[]],["vcalendar",[],[]]]"#;
    let jcal = parse_jcal(json).unwrap();
    assert!(matches!(&jcal, JCal::Many(items) if items.len() == 2));
    assert_eq!(
        jcal_to_ical(&jcal).unwrap(),
        "BEGIN:VCALENDAR\r\nEND:VCALENDAR\r\nBEGIN:VCALENDAR\r\nEND:VCALENDAR\r\n"
    );
}
