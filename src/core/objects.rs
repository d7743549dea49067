//! # Value Objects Module / 值对象模块
//!
//! Validated value objects that raw case fields resolve into during case
//! generation: stream descriptors, codec descriptors, target-usage
//! descriptors and par-file descriptors. Construction of each object may
//! fail validation; those failures abort the whole generation.
//!
//! 用例生成期间原始用例字段解析成的经过验证的值对象：
//! 流描述符、编解码器描述符、target-usage 描述符和 par 文件描述符。
//! 每个对象的构造都可能验证失败；这些失败会中止整个生成过程。

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::core::config::RunnerConfig;
use crate::core::models::TestType;

/// Errors raised while expanding a test specification into concrete cases.
/// Any one of them aborts the generation before a single case executes.
///
/// 将测试规格展开为具体用例时引发的错误。
/// 其中任何一个都会在任何用例执行之前中止生成。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The specification has no `type` field / 规格没有 `type` 字段
    MissingTestType,
    /// The `type` field is not one of decode/encode/transcode/vpp
    /// `type` 字段不是 decode/encode/transcode/vpp 之一
    UnknownTestType(String),
    /// A non-transcode case lacks a `stream` field
    /// 非 transcode 用例缺少 `stream` 字段
    MissingStream(TestType),
    /// The `stream` name is not declared in the runner configuration
    /// `stream` 名称未在运行器配置中声明
    UnknownStream(String),
    /// The codec name is not supported / 不支持的编解码器名称
    UnknownCodec(String),
    /// A JPEG case lacks the mandatory `quality` field
    /// JPEG 用例缺少必需的 `quality` 字段
    JpegQualityMissing,
    /// JPEG cases reject `target_usage` / JPEG 用例拒绝 `target_usage`
    JpegTargetUsage,
    /// JPEG cases reject rate-control knobs / JPEG 用例拒绝码率控制参数
    JpegRateControl,
    /// Neither `bitrate` nor `qp` is set / `bitrate` 和 `qp` 均未设置
    RateControlMissing,
    /// Both `bitrate` and `qp` are set / `bitrate` 和 `qp` 同时设置
    RateControlConflict,
    /// A transcode case lacks a `parfile` field / transcode 用例缺少 `parfile` 字段
    MissingParFile,
    /// An encode case lacks a `codec` field / encode 用例缺少 `codec` 字段
    MissingCodec,
    /// The referenced par file does not exist / 引用的 par 文件不存在
    ParFileNotFound(PathBuf),
    /// The target-usage value is outside 1..=7 and not a known alias
    /// target-usage 值不在 1..=7 范围内，也不是已知别名
    BadTargetUsage(String),
    /// A field value is not a scalar (or a list of scalars)
    /// 字段值不是标量（或标量列表）
    BadValue(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::MissingTestType => write!(f, "test type is not defined"),
            ValidationError::UnknownTestType(kind) => write!(f, "unknown test type: {kind}"),
            ValidationError::MissingStream(kind) => write!(f, "stream is not defined: {kind}"),
            ValidationError::UnknownStream(name) => write!(f, "unknown stream: {name}"),
            ValidationError::UnknownCodec(name) => write!(f, "unknown codec: {name}"),
            ValidationError::JpegQualityMissing => write!(f, "undefined JPEG quality"),
            ValidationError::JpegTargetUsage => {
                write!(f, "JPEG encoder does not support target usage")
            }
            ValidationError::JpegRateControl => {
                write!(f, "JPEG encoder does not support bitrate or QP setting")
            }
            ValidationError::RateControlMissing => write!(f, "undefined bitrate or QP"),
            ValidationError::RateControlConflict => write!(f, "both bitrate and QP defined"),
            ValidationError::MissingParFile => write!(f, "unknown parfile for transcode test"),
            ValidationError::MissingCodec => write!(f, "unknown codec for encode test"),
            ValidationError::ParFileNotFound(path) => {
                write!(f, "par file does not exist: {}", path.display())
            }
            ValidationError::BadTargetUsage(value) => {
                write!(f, "unsupported target usage: {value}")
            }
            ValidationError::BadValue(key) => write!(f, "unsupported value for field: {key}"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Codecs the sample tools understand / 示例工具支持的编解码器
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Codec {
    H264,
    H265,
    Mpeg2,
    Vp9,
    Av1,
    Jpeg,
}

impl Codec {
    /// Canonical name as passed on the tool command line.
    /// 在工具命令行上传递的规范名称。
    pub fn name(self) -> &'static str {
        match self {
            Codec::H264 => "h264",
            Codec::H265 => "h265",
            Codec::Mpeg2 => "mpeg2",
            Codec::Vp9 => "vp9",
            Codec::Av1 => "av1",
            Codec::Jpeg => "jpeg",
        }
    }

    /// File extension used for elementary-stream output.
    /// 基本流输出使用的文件扩展名。
    pub fn extension(self) -> &'static str {
        match self {
            Codec::H264 => "264",
            Codec::H265 => "265",
            Codec::Mpeg2 => "m2v",
            Codec::Vp9 => "ivf",
            Codec::Av1 => "ivf",
            Codec::Jpeg => "mjpeg",
        }
    }
}

impl FromStr for Codec {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // hevc is the common alias in existing test matrices
        match s {
            "h264" | "avc" => Ok(Codec::H264),
            "h265" | "hevc" => Ok(Codec::H265),
            "mpeg2" => Ok(Codec::Mpeg2),
            "vp9" => Ok(Codec::Vp9),
            "av1" => Ok(Codec::Av1),
            "jpeg" | "mjpeg" => Ok(Codec::Jpeg),
            other => Err(ValidationError::UnknownCodec(other.to_string())),
        }
    }
}

impl fmt::Display for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A named input stream resolved from the runner configuration.
/// The path is resolved against the configured streams folder; existence is
/// checked by the external tool, not here.
///
/// 从运行器配置解析的命名输入流。
/// 路径相对于配置的流文件夹解析；存在性由外部工具检查，而非此处。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stream {
    pub name: String,
    pub path: PathBuf,
    /// Elementary-stream codec; raw streams carry none.
    /// 基本流的编解码器；原始流没有。
    pub codec: Option<Codec>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl fmt::Display for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Validated codec descriptor for encode cases.
/// encode 用例的经过验证的编解码器描述符。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Encoder {
    pub codec: Codec,
}

impl Encoder {
    pub fn new(name: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            codec: name.parse()?,
        })
    }

    pub fn is_jpeg(&self) -> bool {
        self.codec == Codec::Jpeg
    }
}

impl fmt::Display for Encoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.codec)
    }
}

/// Validated target-usage descriptor: the quality/speed trade-off knob of
/// the encoder, 1 (best quality) through 7 (best speed).
///
/// 经过验证的 target-usage 描述符：编码器的质量/速度权衡旋钮，
/// 从 1（最佳质量）到 7（最佳速度）。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetUsage {
    pub value: u32,
}

impl TargetUsage {
    pub fn from_number(value: i64) -> Result<Self, ValidationError> {
        if (1..=7).contains(&value) {
            Ok(Self {
                value: value as u32,
            })
        } else {
            Err(ValidationError::BadTargetUsage(value.to_string()))
        }
    }

    pub fn from_name(name: &str) -> Result<Self, ValidationError> {
        match name {
            "quality" => Ok(Self { value: 1 }),
            "balanced" => Ok(Self { value: 4 }),
            "speed" => Ok(Self { value: 7 }),
            other => Err(ValidationError::BadTargetUsage(other.to_string())),
        }
    }
}

impl fmt::Display for TargetUsage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Parameter-file descriptor used by transcode cases. The named file is
/// looked up under the test base directory first, then under the configured
/// par folder; it must exist at generation time.
///
/// transcode 用例使用的参数文件描述符。命名文件先在测试基目录下查找，
/// 然后在配置的 par 文件夹下查找；它必须在生成时存在。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParFile {
    pub path: PathBuf,
}

impl ParFile {
    pub fn new(
        name: &str,
        base_dir: &Path,
        cfg: &RunnerConfig,
    ) -> Result<Self, ValidationError> {
        let candidate = base_dir.join(name);
        if candidate.is_file() {
            return Ok(Self { path: candidate });
        }
        if let Some(par_dir) = cfg.par_dir(base_dir) {
            let fallback = par_dir.join(name);
            if fallback.is_file() {
                return Ok(Self { path: fallback });
            }
        }
        Err(ValidationError::ParFileNotFound(candidate))
    }
}

impl fmt::Display for ParFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}
