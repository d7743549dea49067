//! # Data Models Module / 数据模型模块
//!
//! This module defines the core data structures used throughout the sample runner.
//! It includes models for test types, resolved cases, artifact mappings and the
//! per-test run report.
//!
//! 此模块定义了整个示例运行器中使用的核心数据结构。
//! 它包括测试类型、已解析用例、产物映射和每个测试的运行报告的模型。

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::core::objects::{Encoder, ParFile, Stream, TargetUsage, ValidationError};

/// The kind of external sample tool a test drives.
/// Parsed from the `type` field of a test specification.
///
/// 测试驱动的外部示例工具的种类。
/// 从测试规格的 `type` 字段解析而来。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestType {
    /// Drives `sample_decode` / 驱动 `sample_decode`
    Decode,
    /// Drives `sample_encode` / 驱动 `sample_encode`
    Encode,
    /// Drives `sample_multi_transcode` / 驱动 `sample_multi_transcode`
    Transcode,
    /// Drives `sample_vpp` / 驱动 `sample_vpp`
    Vpp,
}

impl TestType {
    /// All supported test types, in specification order.
    pub const ALL: [TestType; 4] = [
        TestType::Decode,
        TestType::Encode,
        TestType::Transcode,
        TestType::Vpp,
    ];

    /// The default binary name of the external tool for this test type.
    /// 此测试类型的外部工具的默认二进制名称。
    pub fn tool_name(self) -> &'static str {
        match self {
            TestType::Decode => "sample_decode",
            TestType::Encode => "sample_encode",
            TestType::Transcode => "sample_multi_transcode",
            TestType::Vpp => "sample_vpp",
        }
    }
}

impl FromStr for TestType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "decode" => Ok(TestType::Decode),
            "encode" => Ok(TestType::Encode),
            "transcode" => Ok(TestType::Transcode),
            "vpp" => Ok(TestType::Vpp),
            other => Err(ValidationError::UnknownTestType(other.to_string())),
        }
    }
}

impl fmt::Display for TestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TestType::Decode => "decode",
            TestType::Encode => "encode",
            TestType::Transcode => "transcode",
            TestType::Vpp => "vpp",
        };
        write!(f, "{name}")
    }
}

/// A single resolved value inside a generated case.
/// Scalars come straight from the JSON specification; descriptor variants are
/// the validated value objects the scalars resolve into.
///
/// 生成用例中的单个已解析值。
/// 标量直接来自 JSON 规格；描述符变体是标量解析成的经过验证的值对象。
#[derive(Debug, Clone, PartialEq)]
pub enum CaseValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Stream(Stream),
    Codec(Encoder),
    Usage(TargetUsage),
    ParFile(ParFile),
}

impl CaseValue {
    /// Converts a raw JSON scalar into a case value.
    /// Nested arrays and objects are not valid axis members.
    ///
    /// 将原始 JSON 标量转换为用例值。
    /// 嵌套数组和对象不是有效的轴成员。
    pub fn from_scalar(key: &str, value: &Value) -> Result<Self, ValidationError> {
        match value {
            Value::String(s) => Ok(CaseValue::Text(s.clone())),
            Value::Bool(b) => Ok(CaseValue::Boolean(*b)),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(CaseValue::Integer(i))
                } else if let Some(x) = n.as_f64() {
                    Ok(CaseValue::Float(x))
                } else {
                    Err(ValidationError::BadValue(key.to_string()))
                }
            }
            _ => Err(ValidationError::BadValue(key.to_string())),
        }
    }
}

impl fmt::Display for CaseValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaseValue::Text(s) => write!(f, "{s}"),
            CaseValue::Integer(i) => write!(f, "{i}"),
            CaseValue::Float(x) => write!(f, "{x}"),
            CaseValue::Boolean(b) => write!(f, "{b}"),
            CaseValue::Stream(s) => write!(f, "{s}"),
            CaseValue::Codec(c) => write!(f, "{c}"),
            CaseValue::Usage(u) => write!(f, "{u}"),
            CaseValue::ParFile(p) => write!(f, "{p}"),
        }
    }
}

/// One fully resolved, validated parameter set derived from a test
/// specification. Parameter order matches the declaration order of the
/// specification and is a guaranteed property.
///
/// 从测试规格派生的一个完全解析、经过验证的参数集。
/// 参数顺序与规格的声明顺序一致，这是一个受保证的属性。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Case {
    values: IndexMap<String, CaseValue>,
}

impl Case {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a value, replacing in place when the key already exists so the
    /// declaration position is preserved.
    /// 插入一个值；当键已存在时原位替换，以保留声明位置。
    pub fn insert(&mut self, key: impl Into<String>, value: CaseValue) {
        self.values.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&CaseValue> {
        self.values.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &CaseValue)> {
        self.values.iter()
    }

    /// The resolved stream descriptor, when the case has one.
    pub fn stream(&self) -> Option<&Stream> {
        match self.values.get("stream") {
            Some(CaseValue::Stream(s)) => Some(s),
            _ => None,
        }
    }

    /// The resolved codec descriptor, when the case has one.
    pub fn codec(&self) -> Option<&Encoder> {
        match self.values.get("codec") {
            Some(CaseValue::Codec(c)) => Some(c),
            _ => None,
        }
    }

    /// The resolved target-usage descriptor, when the case has one.
    pub fn target_usage(&self) -> Option<&TargetUsage> {
        match self.values.get("target_usage") {
            Some(CaseValue::Usage(u)) => Some(u),
            _ => None,
        }
    }

    /// The resolved par-file descriptor, when the case has one.
    pub fn par_file(&self) -> Option<&ParFile> {
        match self.values.get("parfile") {
            Some(CaseValue::ParFile(p)) => Some(p),
            _ => None,
        }
    }

    /// One-line `key=value` rendering of the case, in declaration order.
    /// Used by the dry-run listing.
    ///
    /// 用例的单行 `key=value` 渲染，按声明顺序。用于试运行列表。
    pub fn describe(&self) -> String {
        self.values
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Metadata recorded for a single artifact produced by an external tool.
/// 为外部工具产生的单个产物记录的元数据。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactInfo {
    /// Size of the produced file in bytes / 产生文件的字节大小
    pub size: u64,
}

/// Mapping from produced filename to artifact metadata.
/// An empty mapping means the tool run failed.
///
/// 从产生的文件名到产物元数据的映射。
/// 空映射表示工具运行失败。
pub type ArtifactMap = IndexMap<String, ArtifactInfo>;

/// Outcome of a single case / 单个用例的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CaseStatus {
    Pass,
    Fail,
}

impl CaseStatus {
    pub fn is_pass(self) -> bool {
        matches!(self, CaseStatus::Pass)
    }
}

impl fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaseStatus::Pass => write!(f, "PASS"),
            CaseStatus::Fail => write!(f, "FAIL"),
        }
    }
}

/// The recorded result of one executed case.
/// 一个已执行用例的记录结果。
#[derive(Debug, Clone, Serialize)]
pub struct CaseResult {
    /// 1-based, 4-digit zero-padded case identifier / 从 1 开始、4 位补零的用例标识符
    pub id: String,
    pub status: CaseStatus,
    /// Artifacts the external tool produced; empty on failure.
    /// 外部工具产生的产物；失败时为空。
    pub artifacts: ArtifactMap,
}

/// Structured report of one test run: per-case results in generation order
/// plus the aggregate counts derived from them.
///
/// 一次测试运行的结构化报告：按生成顺序的每用例结果，
/// 以及从中派生的聚合计数。
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// The test name (specification file stem) / 测试名称（规格文件主干名）
    pub test: String,
    /// Per-case results, preserving generation order / 每用例结果，保留生成顺序
    pub cases: Vec<CaseResult>,
}

impl RunReport {
    pub fn new(test: impl Into<String>) -> Self {
        Self {
            test: test.into(),
            cases: Vec::new(),
        }
    }

    pub fn total(&self) -> usize {
        self.cases.len()
    }

    pub fn passed(&self) -> usize {
        self.cases
            .iter()
            .filter(|case| case.status.is_pass())
            .count()
    }

    /// The `(total, passed)` pair. Pure function of the recorded case list.
    /// `(total, passed)` 对。是记录的用例列表的纯函数。
    pub fn aggregate(&self) -> (usize, usize) {
        (self.total(), self.passed())
    }

    pub fn all_passed(&self) -> bool {
        self.total() == self.passed()
    }

    pub fn failed_cases(&self) -> impl Iterator<Item = &CaseResult> {
        self.cases.iter().filter(|case| !case.status.is_pass())
    }
}
