//! Compact polyline encoding for edge geometries.
//!
//! Valhalla ships road shapes as "encoded polylines": every coordinate is a
//! pair of zig-zag varint deltas (latitude first) against the previous
//! coordinate. Decoding happens here, at the boundary; everything past this
//! module works with [`Coordinate`] values in `(lon, lat)` order.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Precision exponent used by Valhalla shapes (scale factor 10^6).
pub const DEFAULT_PRECISION: u32 = 6;

const CHAR_OFFSET: u8 = 63;
const CONTINUATION_BIT: u64 = 0x20;
const PAYLOAD_MASK: u64 = 0x1f;

/// Largest delta magnitude the zig-zag step can represent in 64 bits.
const MAX_DELTA: i64 = 1 << 62;

/// A geographic position in decimal degrees.
///
/// Field order mirrors the rendering convention: longitude, then latitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lon: f64,
    pub lat: f64,
}

impl Coordinate {
    /// Creates a coordinate from longitude and latitude, in that order.
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

impl From<Coordinate> for [f64; 2] {
    fn from(coord: Coordinate) -> Self {
        [coord.lon, coord.lat]
    }
}

impl From<[f64; 2]> for Coordinate {
    fn from([lon, lat]: [f64; 2]) -> Self {
        Self { lon, lat }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("truncated varint at offset {offset}")]
    TruncatedVarint { offset: usize },

    #[error("invalid polyline character {byte:#04x} at offset {offset}")]
    InvalidCharacter { offset: usize, byte: u8 },

    #[error("value at offset {offset} overflows 64 bits")]
    Overflow { offset: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error("coordinate {index} is not finite")]
    NonFinite { index: usize },

    #[error("coordinate {index} is outside the encodable range")]
    OutOfRange { index: usize },
}

/// Decodes `encoded` into coordinates using a scale factor of `10^precision`.
///
/// An empty string decodes to an empty sequence. Running totals that leave
/// the `i64` range are reported as [`DecodeError::Overflow`] at the offset of
/// the coordinate that overflowed.
pub fn decode(encoded: &str, precision: u32) -> Result<Vec<Coordinate>, DecodeError> {
    let bytes = encoded.as_bytes();
    let factor = 10f64.powi(precision as i32);

    let mut coordinates = Vec::new();
    let mut index = 0;
    let mut lat: i64 = 0;
    let mut lon: i64 = 0;

    while index < bytes.len() {
        let start = index;
        let lat_change = next_delta(bytes, &mut index)?;
        let lon_change = next_delta(bytes, &mut index)?;

        lat = lat
            .checked_add(lat_change)
            .ok_or(DecodeError::Overflow { offset: start })?;
        lon = lon
            .checked_add(lon_change)
            .ok_or(DecodeError::Overflow { offset: start })?;

        coordinates.push(Coordinate::new(lon as f64 / factor, lat as f64 / factor));
    }

    Ok(coordinates)
}

/// [`decode`] with [`DEFAULT_PRECISION`].
pub fn decode_default(encoded: &str) -> Result<Vec<Coordinate>, DecodeError> {
    decode(encoded, DEFAULT_PRECISION)
}

/// Encodes coordinates with a scale factor of `10^precision`.
///
/// Scaled values and the deltas between them must stay within `±2^62`;
/// anything larger, and any non-finite coordinate, is rejected.
pub fn encode(coordinates: &[Coordinate], precision: u32) -> Result<String, EncodeError> {
    let factor = 10f64.powi(precision as i32);
    let mut out = String::new();
    let mut prev_lat: i64 = 0;
    let mut prev_lon: i64 = 0;

    for (index, coord) in coordinates.iter().enumerate() {
        let lat = scaled(coord.lat, factor, index)?;
        let lon = scaled(coord.lon, factor, index)?;
        push_delta(&mut out, checked_delta(lat, prev_lat, index)?);
        push_delta(&mut out, checked_delta(lon, prev_lon, index)?);
        prev_lat = lat;
        prev_lon = lon;
    }

    Ok(out)
}

fn scaled(value: f64, factor: f64, index: usize) -> Result<i64, EncodeError> {
    let scaled = (value * factor).round();
    if !scaled.is_finite() {
        return Err(EncodeError::NonFinite { index });
    }
    if scaled.abs() >= MAX_DELTA as f64 {
        return Err(EncodeError::OutOfRange { index });
    }
    Ok(scaled as i64)
}

fn checked_delta(current: i64, previous: i64, index: usize) -> Result<i64, EncodeError> {
    match current.checked_sub(previous) {
        Some(delta) if (-MAX_DELTA..MAX_DELTA).contains(&delta) => Ok(delta),
        _ => Err(EncodeError::OutOfRange { index }),
    }
}

fn next_delta(bytes: &[u8], index: &mut usize) -> Result<i64, DecodeError> {
    let start = *index;
    let mut shift = 0u32;
    let mut result: u64 = 0;

    loop {
        let Some(&byte) = bytes.get(*index) else {
            return Err(DecodeError::TruncatedVarint { offset: *index });
        };
        if byte < CHAR_OFFSET {
            return Err(DecodeError::InvalidCharacter { offset: *index, byte });
        }
        *index += 1;

        let group = u64::from(byte - CHAR_OFFSET);
        let payload = group & PAYLOAD_MASK;
        // the last group may only carry the bits still left below 64
        if shift >= 64 || (payload << shift) >> shift != payload {
            return Err(DecodeError::Overflow { offset: start });
        }
        result |= payload << shift;
        shift += 5;

        if group < CONTINUATION_BIT {
            break;
        }
    }

    // zig-zag: the low bit carries the sign
    let magnitude = (result >> 1) as i64;
    Ok(if result & 1 == 1 { !magnitude } else { magnitude })
}

/// `delta` must lie within `±2^62`.
fn push_delta(out: &mut String, delta: i64) {
    let zigzag = if delta < 0 { !(delta << 1) } else { delta << 1 };
    let mut value = zigzag as u64;
    while value >= CONTINUATION_BIT {
        let group = (CONTINUATION_BIT | (value & PAYLOAD_MASK)) as u8 + CHAR_OFFSET;
        out.push(group as char);
        value >>= 5;
    }
    out.push((value as u8 + CHAR_OFFSET) as char);
}

/// A decoded edge geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<Coordinate>,
}

impl Polyline {
    /// Creates a new Polyline from decoded coordinates.
    ///
    /// Each point is a `(lon, lat)` [`Coordinate`].
    pub fn new(points: Vec<Coordinate>) -> Self {
        Self { points }
    }

    /// Decodes a shape string at the given precision.
    pub fn decode(encoded: &str, precision: u32) -> Result<Self, DecodeError> {
        decode(encoded, precision).map(Self::new)
    }

    /// Encodes the points back into a shape string at the given precision.
    pub fn encode(&self, precision: u32) -> Result<String, EncodeError> {
        encode(&self.points, precision)
    }

    /// Returns a reference to the coordinate points.
    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }

    /// Consumes the polyline and returns the owned coordinate points.
    pub fn into_points(self) -> Vec<Coordinate> {
        self.points
    }

    /// Returns true when the polyline has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
