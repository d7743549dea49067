//! # Case Generator Module / 用例生成模块
//!
//! Expands a test specification into the concrete ordered list of validated
//! cases: the cartesian product of all field axes in declaration order, with
//! every case resolved against the runner configuration and checked by the
//! type-specific validation rules. One invalid case aborts the whole
//! generation; no partial case lists are ever executed.
//!
//! 将测试规格展开为具体的、有序的、经过验证的用例列表：
//! 按声明顺序对所有字段轴取笛卡尔积，每个用例都相对于运行器配置解析，
//! 并由特定类型的验证规则检查。一个无效用例会中止整个生成；
//! 绝不会执行部分用例列表。

use serde_json::Value;
use std::path::Path;

use crate::core::config::{RunnerConfig, TestSpec};
use crate::core::models::{Case, CaseValue, TestType};
use crate::core::objects::{Encoder, ParFile, TargetUsage, ValidationError};

/// Expands the specification into its ordered case list.
///
/// The product is taken over the fields in declaration order with the
/// rightmost axis varying fastest; scalar fields count as one-element axes.
///
/// 将规格展开为其有序用例列表。
///
/// 乘积按声明顺序在字段上进行，最右边的轴变化最快；
/// 标量字段算作单元素轴。
pub fn generate_cases(
    spec: &TestSpec,
    base_dir: &Path,
    cfg: &RunnerConfig,
) -> Result<Vec<Case>, ValidationError> {
    let keys: Vec<&String> = spec.fields().keys().collect();
    let axes: Vec<Vec<&Value>> = spec
        .fields()
        .values()
        .map(|value| match value {
            Value::Array(items) => items.iter().collect(),
            other => vec![other],
        })
        .collect();

    let mut cases = Vec::new();
    for combination in Product::new(&axes) {
        let case = build_case(spec.test_type, &keys, &combination, base_dir, cfg)?;
        cases.push(case);
    }
    Ok(cases)
}

/// Builds and validates one case from a single product combination.
/// 从单个乘积组合构建并验证一个用例。
fn build_case(
    test_type: TestType,
    keys: &[&String],
    combination: &[&Value],
    base_dir: &Path,
    cfg: &RunnerConfig,
) -> Result<Case, ValidationError> {
    let mut case = Case::new();
    for (key, raw) in keys.iter().zip(combination) {
        case.insert(key.as_str(), CaseValue::from_scalar(key, raw)?);
    }

    resolve_stream(&mut case, test_type, base_dir, cfg)?;
    resolve_codec(&mut case)?;
    resolve_par_file(&mut case, base_dir, cfg)?;

    if test_type == TestType::Transcode && !case.contains("parfile") {
        return Err(ValidationError::MissingParFile);
    }
    if test_type == TestType::Encode && !case.contains("codec") {
        return Err(ValidationError::MissingCodec);
    }

    Ok(case)
}

/// Resolves the `stream` field via the named-stream table. Only transcode
/// cases may omit it.
fn resolve_stream(
    case: &mut Case,
    test_type: TestType,
    base_dir: &Path,
    cfg: &RunnerConfig,
) -> Result<(), ValidationError> {
    match case.get("stream") {
        Some(CaseValue::Text(name)) => {
            let stream = cfg.stream_by_name(name, base_dir)?;
            case.insert("stream", CaseValue::Stream(stream));
            Ok(())
        }
        Some(_) => Err(ValidationError::BadValue("stream".to_string())),
        None if test_type != TestType::Transcode => {
            Err(ValidationError::MissingStream(test_type))
        }
        None => Ok(()),
    }
}

/// Resolves the `codec` field and applies the codec-specific rules: JPEG
/// requires `quality` and rejects `target_usage` and rate control; every
/// other codec requires exactly one of `bitrate`/`qp`.
///
/// 解析 `codec` 字段并应用特定于编解码器的规则：JPEG 要求 `quality`
/// 并拒绝 `target_usage` 和码率控制；其他编解码器恰好要求
/// `bitrate`/`qp` 之一。
fn resolve_codec(case: &mut Case) -> Result<(), ValidationError> {
    let encoder = match case.get("codec") {
        Some(CaseValue::Text(name)) => Encoder::new(name)?,
        Some(other) => return Err(ValidationError::UnknownCodec(other.to_string())),
        None => return Ok(()),
    };
    case.insert("codec", CaseValue::Codec(encoder));

    if encoder.is_jpeg() {
        if !case.contains("quality") {
            return Err(ValidationError::JpegQualityMissing);
        }
        if case.contains("target_usage") {
            return Err(ValidationError::JpegTargetUsage);
        }
        if case.contains("bitrate") || case.contains("qp") {
            return Err(ValidationError::JpegRateControl);
        }
    } else {
        if let Some(value) = case.get("target_usage") {
            let usage = match value {
                CaseValue::Integer(number) => TargetUsage::from_number(*number)?,
                CaseValue::Text(name) => TargetUsage::from_name(name)?,
                other => return Err(ValidationError::BadTargetUsage(other.to_string())),
            };
            case.insert("target_usage", CaseValue::Usage(usage));
        }
        if !case.contains("bitrate") && !case.contains("qp") {
            return Err(ValidationError::RateControlMissing);
        }
        if case.contains("bitrate") && case.contains("qp") {
            return Err(ValidationError::RateControlConflict);
        }
    }
    Ok(())
}

/// Resolves the `parfile` field into a par-file descriptor.
fn resolve_par_file(
    case: &mut Case,
    base_dir: &Path,
    cfg: &RunnerConfig,
) -> Result<(), ValidationError> {
    match case.get("parfile") {
        Some(CaseValue::Text(name)) => {
            let par_file = ParFile::new(name, base_dir, cfg)?;
            case.insert("parfile", CaseValue::ParFile(par_file));
            Ok(())
        }
        Some(_) => Err(ValidationError::BadValue("parfile".to_string())),
        None => Ok(()),
    }
}

/// Cartesian-product iterator over borrowed axes. With no axes it yields a
/// single empty combination; with any empty axis it yields nothing.
///
/// 借用轴上的笛卡尔积迭代器。没有轴时产生单个空组合；
/// 任何轴为空时不产生任何东西。
struct Product<'a> {
    axes: &'a [Vec<&'a Value>],
    indices: Vec<usize>,
    done: bool,
}

impl<'a> Product<'a> {
    fn new(axes: &'a [Vec<&'a Value>]) -> Self {
        Self {
            axes,
            indices: vec![0; axes.len()],
            done: axes.iter().any(|axis| axis.is_empty()),
        }
    }
}

impl<'a> Iterator for Product<'a> {
    type Item = Vec<&'a Value>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let combination: Vec<&'a Value> = self
            .indices
            .iter()
            .zip(self.axes)
            .map(|(&index, axis)| axis[index])
            .collect();

        // Odometer step: rightmost axis varies fastest.
        self.done = true;
        for position in (0..self.indices.len()).rev() {
            if self.indices[position] + 1 < self.axes[position].len() {
                self.indices[position] += 1;
                self.done = false;
                break;
            }
            self.indices[position] = 0;
        }

        Some(combination)
    }
}
