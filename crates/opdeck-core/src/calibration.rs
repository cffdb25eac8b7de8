//! Calibration payload decoding
//!
//! The calibration daemon stores its result as a small binary blob:
//! one status byte (non-zero means calibrated) followed by three
//! little-endian f64 values, the roll/pitch/yaw calibration in radians.
//! The console only needs the pitch/yaw offsets for the reset-calibration
//! button description; decode failures are non-fatal by design.

use crate::error::{Error, Result};

/// Byte length of a well-formed payload: status + 3 × f64.
pub const PAYLOAD_LEN: usize = 1 + 3 * 8;

/// Decoded calibration state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Calibration {
    /// Whether the calibration daemon has converged.
    pub calibrated: bool,
    /// Pitch offset in degrees. Positive is up.
    pub pitch_deg: f64,
    /// Yaw offset in degrees. Positive is right.
    pub yaw_deg: f64,
}

impl Calibration {
    /// Human-readable two-axis offset, e.g. `"↑ 1.2° / → 0.4°"`.
    pub fn offset_description(&self) -> String {
        format!(
            "{} {:.1}° / {} {:.1}°",
            if self.pitch_deg > 0.0 { "↑" } else { "↓" },
            self.pitch_deg.abs(),
            if self.yaw_deg > 0.0 { "→" } else { "←" },
            self.yaw_deg.abs(),
        )
    }
}

/// Decode a stored calibration payload.
pub fn decode(bytes: &[u8]) -> Result<Calibration> {
    if bytes.len() < PAYLOAD_LEN {
        return Err(Error::calibration(format!(
            "payload too short: {} bytes, expected {}",
            bytes.len(),
            PAYLOAD_LEN
        )));
    }

    let calibrated = bytes[0] != 0;
    let mut rpy = [0.0f64; 3];
    for (i, value) in rpy.iter_mut().enumerate() {
        let start = 1 + i * 8;
        let raw: [u8; 8] = bytes[start..start + 8]
            .try_into()
            .map_err(|_| Error::calibration("misaligned rpy field"))?;
        *value = f64::from_le_bytes(raw);
    }

    if rpy.iter().any(|v| !v.is_finite()) {
        return Err(Error::calibration("non-finite rpy value"));
    }

    Ok(Calibration {
        calibrated,
        pitch_deg: rpy[1].to_degrees(),
        yaw_deg: rpy[2].to_degrees(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(status: u8, rpy_rad: [f64; 3]) -> Vec<u8> {
        let mut out = vec![status];
        for v in rpy_rad {
            out.extend_from_slice(&v.to_le_bytes());
        }
        out
    }

    #[test]
    fn test_decode_calibrated_payload() {
        let payload = encode(1, [0.0, 0.0349066, -0.0174533]); // ~2° pitch, ~-1° yaw
        let calib = decode(&payload).unwrap();
        assert!(calib.calibrated);
        assert!((calib.pitch_deg - 2.0).abs() < 0.01);
        assert!((calib.yaw_deg + 1.0).abs() < 0.01);
    }

    #[test]
    fn test_decode_uncalibrated_status() {
        let payload = encode(0, [0.0, 0.0, 0.0]);
        let calib = decode(&payload).unwrap();
        assert!(!calib.calibrated);
    }

    #[test]
    fn test_decode_short_payload_fails() {
        let err = decode(&[1, 2, 3]).unwrap_err();
        assert!(err.to_string().contains("too short"));
    }

    #[test]
    fn test_decode_non_finite_fails() {
        let payload = encode(1, [0.0, f64::NAN, 0.0]);
        assert!(decode(&payload).is_err());
    }

    #[test]
    fn test_offset_description_directions() {
        let up_right = Calibration {
            calibrated: true,
            pitch_deg: 1.23,
            yaw_deg: 0.4,
        };
        assert_eq!(up_right.offset_description(), "↑ 1.2° / → 0.4°");

        let down_left = Calibration {
            calibrated: true,
            pitch_deg: -2.5,
            yaw_deg: -0.8,
        };
        assert_eq!(down_left.offset_description(), "↓ 2.5° / ← 0.8°");
    }
}
