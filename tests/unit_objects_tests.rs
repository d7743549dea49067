//! # Objects Module Unit Tests / Objects 模块单元测试
//!
//! Unit tests for the validated value objects: codec descriptors,
//! target-usage descriptors, par-file descriptors and the validation error
//! messages.
//!
//! 经过验证的值对象的单元测试：编解码器描述符、target-usage 描述符、
//! par 文件描述符和验证错误消息。

mod common;

use common::{base_dir, sample_config, write_par_file};
use sample_runner::core::objects::{Codec, Encoder, ParFile, TargetUsage, ValidationError};
use std::fs;

#[cfg(test)]
mod codec_tests {
    use super::*;

    #[test]
    fn test_codec_parsing() {
        assert_eq!("h264".parse::<Codec>().unwrap(), Codec::H264);
        assert_eq!("mpeg2".parse::<Codec>().unwrap(), Codec::Mpeg2);
        assert_eq!("vp9".parse::<Codec>().unwrap(), Codec::Vp9);
        assert_eq!("av1".parse::<Codec>().unwrap(), Codec::Av1);
        assert_eq!("jpeg".parse::<Codec>().unwrap(), Codec::Jpeg);
    }

    #[test]
    fn test_codec_aliases() {
        assert_eq!("hevc".parse::<Codec>().unwrap(), Codec::H265);
        assert_eq!("h265".parse::<Codec>().unwrap(), Codec::H265);
        assert_eq!("avc".parse::<Codec>().unwrap(), Codec::H264);
        assert_eq!("mjpeg".parse::<Codec>().unwrap(), Codec::Jpeg);
    }

    #[test]
    fn test_unknown_codec() {
        let err = "h263".parse::<Codec>().unwrap_err();
        assert_eq!(err, ValidationError::UnknownCodec("h263".to_string()));
    }

    #[test]
    fn test_codec_extension() {
        assert_eq!(Codec::H264.extension(), "264");
        assert_eq!(Codec::H265.extension(), "265");
        assert_eq!(Codec::Vp9.extension(), "ivf");
    }

    #[test]
    fn test_codec_display() {
        assert_eq!(Codec::H264.to_string(), "h264");
        assert_eq!(Codec::Jpeg.to_string(), "jpeg");
    }
}

#[cfg(test)]
mod encoder_tests {
    use super::*;

    #[test]
    fn test_encoder_construction() {
        let encoder = Encoder::new("hevc").unwrap();
        assert_eq!(encoder.codec, Codec::H265);
        assert!(!encoder.is_jpeg());
    }

    #[test]
    fn test_encoder_jpeg() {
        let encoder = Encoder::new("jpeg").unwrap();
        assert!(encoder.is_jpeg());
    }

    #[test]
    fn test_encoder_rejects_unknown() {
        assert!(Encoder::new("prores").is_err());
    }
}

#[cfg(test)]
mod target_usage_tests {
    use super::*;

    #[test]
    fn test_numeric_range() {
        assert_eq!(TargetUsage::from_number(1).unwrap().value, 1);
        assert_eq!(TargetUsage::from_number(7).unwrap().value, 7);
    }

    #[test]
    fn test_numeric_out_of_range() {
        assert_eq!(
            TargetUsage::from_number(0).unwrap_err(),
            ValidationError::BadTargetUsage("0".to_string())
        );
        assert_eq!(
            TargetUsage::from_number(8).unwrap_err(),
            ValidationError::BadTargetUsage("8".to_string())
        );
    }

    #[test]
    fn test_named_aliases() {
        assert_eq!(TargetUsage::from_name("quality").unwrap().value, 1);
        assert_eq!(TargetUsage::from_name("balanced").unwrap().value, 4);
        assert_eq!(TargetUsage::from_name("speed").unwrap().value, 7);
    }

    #[test]
    fn test_unknown_alias() {
        assert_eq!(
            TargetUsage::from_name("fastest").unwrap_err(),
            ValidationError::BadTargetUsage("fastest".to_string())
        );
    }
}

#[cfg(test)]
mod par_file_tests {
    use super::*;

    #[test]
    fn test_par_file_found_in_base_dir() {
        let dir = base_dir();
        let cfg = sample_config();
        let path = write_par_file(dir.path(), "session.par");

        let par = ParFile::new("session.par", dir.path(), &cfg).unwrap();
        assert_eq!(par.path, path);
    }

    #[test]
    fn test_par_file_found_in_par_folder() {
        let dir = base_dir();
        let mut cfg = sample_config();
        cfg.par_folder = Some("par".to_string());

        let par_dir = dir.path().join("par");
        fs::create_dir_all(&par_dir).unwrap();
        let path = write_par_file(&par_dir, "session.par");

        let par = ParFile::new("session.par", dir.path(), &cfg).unwrap();
        assert_eq!(par.path, path);
    }

    #[test]
    fn test_par_file_missing() {
        let dir = base_dir();
        let cfg = sample_config();

        let err = ParFile::new("absent.par", dir.path(), &cfg).unwrap_err();
        assert_eq!(
            err,
            ValidationError::ParFileNotFound(dir.path().join("absent.par"))
        );
    }
}

#[cfg(test)]
mod validation_error_tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ValidationError::JpegQualityMissing.to_string(),
            "undefined JPEG quality"
        );
        assert_eq!(
            ValidationError::RateControlConflict.to_string(),
            "both bitrate and QP defined"
        );
        assert_eq!(
            ValidationError::MissingParFile.to_string(),
            "unknown parfile for transcode test"
        );
        assert_eq!(
            ValidationError::UnknownStream("x".to_string()).to_string(),
            "unknown stream: x"
        );
    }

    #[test]
    fn test_error_is_std_error() {
        let err: Box<dyn std::error::Error> = Box::new(ValidationError::MissingTestType);
        assert_eq!(err.to_string(), "test type is not defined");
    }
}
