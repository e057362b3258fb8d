use chrono::NaiveDate;
use exif::{In, Reader, Tag, Value};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CaptureDateError {
    #[error("ファイルを開けませんでした: {path}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("EXIFを解析できませんでした: {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: exif::Error,
    },
    #[error("撮影日時タグの値が不正です: {path} ({value})")]
    InvalidDateTime { path: PathBuf, value: String },
}

pub fn read_capture_date(path: &Path) -> Result<Option<NaiveDate>, CaptureDateError> {
    let file = File::open(path).map_err(|source| CaptureDateError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let mut buf = BufReader::new(file);
    let exif = match Reader::new().read_from_container(&mut buf) {
        Ok(exif) => exif,
        Err(exif::Error::NotFound(_)) => return Ok(None),
        Err(source) => {
            return Err(CaptureDateError::Parse {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let Some(field) = exif.get_field(Tag::DateTime, In::PRIMARY) else {
        return Ok(None);
    };

    let raw = match &field.value {
        Value::Ascii(components) => components.first().cloned().unwrap_or_default(),
        _ => Vec::new(),
    };
    if raw.iter().all(|b| b.is_ascii_whitespace()) {
        return Ok(None);
    }

    match parse_datetime(&raw) {
        Some(date) => Ok(Some(date)),
        None => Err(CaptureDateError::InvalidDateTime {
            path: path.to_path_buf(),
            value: String::from_utf8_lossy(&raw).into_owned(),
        }),
    }
}

fn parse_datetime(raw: &[u8]) -> Option<NaiveDate> {
    let datetime = exif::DateTime::from_ascii(raw).ok()?;
    NaiveDate::from_ymd_opt(
        i32::from(datetime.year),
        u32::from(datetime.month),
        u32::from(datetime.day),
    )
}

/// SOI + APP1(Exif/TIFF) + EOI だけの最小JPEGを作る。
#[cfg(test)]
pub(crate) fn jpeg_with_datetime(datetime: &str) -> Vec<u8> {
    jpeg_with_ascii_tag(0x0132, datetime)
}

#[cfg(test)]
fn jpeg_with_ascii_tag(tag: u16, value: &str) -> Vec<u8> {
    let ascii = format!("{value}\0");
    // TIFFヘッダ8 + エントリ数2 + エントリ12 + 次IFDオフセット4 = 26、値はその直後
    let value_offset = 26u32;
    let tiff_len = value_offset as usize + ascii.len();
    let app1_len = (2 + 6 + tiff_len) as u16;

    let mut bytes = vec![0xFF, 0xD8, 0xFF, 0xE1];
    bytes.extend_from_slice(&app1_len.to_be_bytes());
    bytes.extend_from_slice(b"Exif\0\0");
    bytes.extend_from_slice(b"II\x2A\x00");
    bytes.extend_from_slice(&8u32.to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes());
    bytes.extend_from_slice(&tag.to_le_bytes());
    bytes.extend_from_slice(&2u16.to_le_bytes());
    bytes.extend_from_slice(&(ascii.len() as u32).to_le_bytes());
    bytes.extend_from_slice(&value_offset.to_le_bytes());
    bytes.extend_from_slice(&0u32.to_le_bytes());
    bytes.extend_from_slice(ascii.as_bytes());
    bytes.extend_from_slice(&[0xFF, 0xD9]);
    bytes
}
