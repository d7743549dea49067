//! # Models Module Unit Tests / Models 模块单元测试
//!
//! This module contains unit tests for the `models.rs` module, testing the
//! test-type mapping, case values, statuses and the run-report aggregation.
//!
//! 此模块包含 `models.rs` 模块的单元测试，测试测试类型映射、
//! 用例值、状态和运行报告聚合。

use sample_runner::core::models::{
    ArtifactInfo, ArtifactMap, Case, CaseResult, CaseStatus, CaseValue, RunReport, TestType,
};
use sample_runner::core::objects::ValidationError;
use serde_json::json;

fn passed_case(id: &str) -> CaseResult {
    let mut artifacts = ArtifactMap::new();
    artifacts.insert("0001.264".to_string(), ArtifactInfo { size: 1024 });
    CaseResult {
        id: id.to_string(),
        status: CaseStatus::Pass,
        artifacts,
    }
}

fn failed_case(id: &str) -> CaseResult {
    CaseResult {
        id: id.to_string(),
        status: CaseStatus::Fail,
        artifacts: ArtifactMap::new(),
    }
}

#[cfg(test)]
mod test_type_tests {
    use super::*;

    #[test]
    fn test_parse_all_types() {
        assert_eq!("decode".parse::<TestType>().unwrap(), TestType::Decode);
        assert_eq!("encode".parse::<TestType>().unwrap(), TestType::Encode);
        assert_eq!(
            "transcode".parse::<TestType>().unwrap(),
            TestType::Transcode
        );
        assert_eq!("vpp".parse::<TestType>().unwrap(), TestType::Vpp);
    }

    #[test]
    fn test_parse_unknown_type() {
        let err = "render".parse::<TestType>().unwrap_err();
        assert_eq!(err, ValidationError::UnknownTestType("render".to_string()));
    }

    #[test]
    fn test_tool_names() {
        assert_eq!(TestType::Decode.tool_name(), "sample_decode");
        assert_eq!(TestType::Encode.tool_name(), "sample_encode");
        assert_eq!(TestType::Transcode.tool_name(), "sample_multi_transcode");
        assert_eq!(TestType::Vpp.tool_name(), "sample_vpp");
    }

    #[test]
    fn test_display_matches_spec_field() {
        for kind in TestType::ALL {
            assert_eq!(kind.to_string().parse::<TestType>().unwrap(), kind);
        }
    }
}

#[cfg(test)]
mod case_value_tests {
    use super::*;

    #[test]
    fn test_scalar_conversion() {
        assert_eq!(
            CaseValue::from_scalar("k", &json!("text")).unwrap(),
            CaseValue::Text("text".to_string())
        );
        assert_eq!(
            CaseValue::from_scalar("k", &json!(42)).unwrap(),
            CaseValue::Integer(42)
        );
        assert_eq!(
            CaseValue::from_scalar("k", &json!(2.5)).unwrap(),
            CaseValue::Float(2.5)
        );
        assert_eq!(
            CaseValue::from_scalar("k", &json!(true)).unwrap(),
            CaseValue::Boolean(true)
        );
    }

    #[test]
    fn test_nested_values_rejected() {
        assert_eq!(
            CaseValue::from_scalar("bitrate", &json!([1, 2])).unwrap_err(),
            ValidationError::BadValue("bitrate".to_string())
        );
        assert_eq!(
            CaseValue::from_scalar("opts", &json!({"a": 1})).unwrap_err(),
            ValidationError::BadValue("opts".to_string())
        );
        assert_eq!(
            CaseValue::from_scalar("x", &serde_json::Value::Null).unwrap_err(),
            ValidationError::BadValue("x".to_string())
        );
    }

    #[test]
    fn test_case_describe_in_order() {
        let mut case = Case::new();
        case.insert("stream", CaseValue::Text("foreman_cif".to_string()));
        case.insert("bitrate", CaseValue::Integer(1000));

        assert_eq!(case.describe(), "stream=foreman_cif bitrate=1000");
    }
}

#[cfg(test)]
mod case_status_tests {
    use super::*;

    #[test]
    fn test_status_display() {
        assert_eq!(CaseStatus::Pass.to_string(), "PASS");
        assert_eq!(CaseStatus::Fail.to_string(), "FAIL");
    }

    #[test]
    fn test_status_serialization() {
        assert_eq!(serde_json::to_value(CaseStatus::Pass).unwrap(), json!("PASS"));
        assert_eq!(serde_json::to_value(CaseStatus::Fail).unwrap(), json!("FAIL"));
    }
}

#[cfg(test)]
mod run_report_tests {
    use super::*;

    #[test]
    fn test_aggregate_counts() {
        let mut report = RunReport::new("smoke");
        report.cases.push(passed_case("0001"));
        report.cases.push(failed_case("0002"));
        report.cases.push(passed_case("0003"));

        assert_eq!(report.aggregate(), (3, 2));
        assert!(!report.all_passed());
        let failed: Vec<&str> = report.failed_cases().map(|c| c.id.as_str()).collect();
        assert_eq!(failed, vec!["0002"]);
    }

    #[test]
    fn test_empty_report_passes() {
        let report = RunReport::new("empty");
        assert_eq!(report.aggregate(), (0, 0));
        assert!(report.all_passed());
    }

    #[test]
    fn test_report_serialization_shape() {
        let mut report = RunReport::new("smoke");
        report.cases.push(passed_case("0001"));

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(
            value,
            json!({
                "test": "smoke",
                "cases": [
                    {
                        "id": "0001",
                        "status": "PASS",
                        "artifacts": {"0001.264": {"size": 1024}}
                    }
                ]
            })
        );
    }
}
