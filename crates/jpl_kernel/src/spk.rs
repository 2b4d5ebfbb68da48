//! SPK segment index and Type 2 (Chebyshev position) evaluation.

use std::fmt::{Debug, Formatter};
use std::path::Path;

use tracing::debug;

use crate::chebyshev::series_value_and_slope;
use crate::daf::{self, DafView, Endian};
use crate::error::KernelError;

/// SPK data type with Chebyshev position coefficients only.
pub const TYPE_CHEBYSHEV_POSITION: i32 = 2;

/// One SPK segment descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct SpkSegment {
    pub target: i32,
    pub center: i32,
    pub frame: i32,
    pub data_type: i32,
    /// Coverage start, TDB seconds past J2000.
    pub start_epoch_s: f64,
    /// Coverage end, TDB seconds past J2000.
    pub end_epoch_s: f64,
    pub start_address: usize,
    pub end_address: usize,
    directory: Option<Type2Directory>,
}

impl SpkSegment {
    pub fn covers(&self, epoch_tdb_s: f64) -> bool {
        epoch_tdb_s >= self.start_epoch_s && epoch_tdb_s <= self.end_epoch_s
    }
}

/// Trailer of a Type 2 segment: INIT, INTLEN, RSIZE, N.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Type2Directory {
    init_s: f64,
    interval_s: f64,
    record_len: usize,
    record_count: usize,
}

/// Position and velocity of a target relative to its segment center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpkEvaluation {
    pub position_km: [f64; 3],
    pub velocity_km_s: [f64; 3],
}

/// An SPK file held in memory.
pub struct SpkKernel {
    bytes: Vec<u8>,
    endian: Endian,
    segments: Vec<SpkSegment>,
}

impl Debug for SpkKernel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpkKernel")
            .field("bytes", &self.bytes.len())
            .field("endian", &self.endian)
            .field("segments", &self.segments.len())
            .finish()
    }
}

impl SpkKernel {
    /// Read and index an SPK file.
    pub fn load(path: &Path) -> Result<Self, KernelError> {
        let bytes = std::fs::read(path)?;
        let kernel = Self::from_bytes(bytes)?;
        debug!(
            path = %path.display(),
            segments = kernel.segments.len(),
            "loaded SPK kernel"
        );
        Ok(kernel)
    }

    /// Index an SPK image already in memory.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, KernelError> {
        let file = daf::read_file_record(&bytes)?;
        let summaries = daf::read_summaries(&bytes, &file)?;
        let view = DafView::new(&bytes, file.endian);

        let mut segments = Vec::with_capacity(summaries.len());
        for raw in summaries {
            let [start_epoch_s, end_epoch_s] = raw.doubles[..] else {
                return Err(KernelError::InvalidFormat("summary without epochs".into()));
            };
            let [target, center, frame, data_type, start, end] = raw.ints[..] else {
                return Err(KernelError::InvalidFormat("summary without ids".into()));
            };
            if start < 1 || end < start {
                return Err(KernelError::InvalidFormat(format!(
                    "segment {target} has address range {start}..{end}"
                )));
            }
            let (start_address, end_address) = (start as usize, end as usize);
            let directory = if data_type == TYPE_CHEBYSHEV_POSITION {
                Some(read_type2_directory(&view, start_address, end_address)?)
            } else {
                None
            };
            segments.push(SpkSegment {
                target,
                center,
                frame,
                data_type,
                start_epoch_s,
                end_epoch_s,
                start_address,
                end_address,
                directory,
            });
        }

        Ok(Self {
            bytes,
            endian: file.endian,
            segments,
        })
    }

    pub fn segments(&self) -> &[SpkSegment] {
        &self.segments
    }

    /// Center body of the first segment for `target`, if any.
    pub fn center_for(&self, target: i32) -> Option<i32> {
        self.segments
            .iter()
            .find(|s| s.target == target)
            .map(|s| s.center)
    }

    /// Evaluate `target` relative to `center` at a TDB epoch.
    ///
    /// Later segments take precedence over earlier ones when both cover the epoch.
    pub fn evaluate(
        &self,
        target: i32,
        center: i32,
        epoch_tdb_s: f64,
    ) -> Result<SpkEvaluation, KernelError> {
        let mut matching = self
            .segments
            .iter()
            .rev()
            .filter(|s| s.target == target && s.center == center)
            .peekable();
        if matching.peek().is_none() {
            return Err(KernelError::SegmentNotFound { target, center });
        }
        let segment = matching
            .find(|s| s.covers(epoch_tdb_s))
            .ok_or(KernelError::EpochOutOfRange {
                target,
                center,
                epoch_tdb_s,
            })?;
        self.evaluate_segment(segment, epoch_tdb_s)
    }

    /// SSB-relative state of `body` from this kernel alone.
    pub fn resolve_to_ssb(&self, body: i32, epoch_tdb_s: f64) -> Result<[f64; 6], KernelError> {
        resolve_chain(
            body,
            |code| self.center_for(code),
            |target, center| self.evaluate(target, center, epoch_tdb_s),
        )
    }

    fn evaluate_segment(
        &self,
        segment: &SpkSegment,
        epoch_tdb_s: f64,
    ) -> Result<SpkEvaluation, KernelError> {
        let Some(dir) = segment.directory else {
            return Err(KernelError::UnsupportedType {
                target: segment.target,
                data_type: segment.data_type,
            });
        };

        let last = dir.record_count - 1;
        let raw_index = ((epoch_tdb_s - dir.init_s) / dir.interval_s).floor();
        let index = if raw_index <= 0.0 {
            0
        } else {
            (raw_index as usize).min(last)
        };

        let view = DafView::new(&self.bytes, self.endian);
        let record = view.words(segment.start_address + index * dir.record_len, dir.record_len)?;
        let (mid, radius) = (record[0], record[1]);
        if radius <= 0.0 {
            return Err(KernelError::InvalidFormat(format!(
                "record {index} of segment {} has radius {radius}",
                segment.target
            )));
        }

        let n = (dir.record_len - 2) / 3;
        let s = (epoch_tdb_s - mid) / radius;
        let mut position_km = [0.0; 3];
        let mut velocity_km_s = [0.0; 3];
        for axis in 0..3 {
            let coeffs = &record[2 + axis * n..2 + (axis + 1) * n];
            let (p, dp) = series_value_and_slope(coeffs, s);
            position_km[axis] = p;
            velocity_km_s[axis] = dp / radius;
        }

        Ok(SpkEvaluation {
            position_km,
            velocity_km_s,
        })
    }
}

fn read_type2_directory(
    view: &DafView<'_>,
    start: usize,
    end: usize,
) -> Result<Type2Directory, KernelError> {
    if end < start + 3 {
        return Err(KernelError::InvalidFormat(
            "Type 2 segment too short for its directory".into(),
        ));
    }
    let trailer = view.words(end - 3, 4)?;
    let (init_s, interval_s, rsize, n) = (trailer[0], trailer[1], trailer[2], trailer[3]);
    let record_len = rsize as usize;
    let record_count = n as usize;

    if interval_s <= 0.0 || record_count == 0 || record_len < 5 || (record_len - 2) % 3 != 0 {
        return Err(KernelError::InvalidFormat(format!(
            "bad Type 2 directory (INTLEN={interval_s}, RSIZE={rsize}, N={n})"
        )));
    }
    if start + record_len * record_count + 3 > end {
        return Err(KernelError::InvalidFormat(
            "Type 2 records overrun segment".into(),
        ));
    }

    Ok(Type2Directory {
        init_s,
        interval_s,
        record_len,
        record_count,
    })
}

/// Longest segment chain followed before giving up.
pub const MAX_CHAIN_HOPS: usize = 16;

/// Sum the chain `body -> center -> ... -> 0` into an SSB-relative state
/// `[x, y, z, vx, vy, vz]`.
///
/// `center_for` names the center of each link; a planet body without its own
/// segment falls back to its system barycenter.
pub fn resolve_chain(
    body: i32,
    center_for: impl Fn(i32) -> Option<i32>,
    mut evaluate: impl FnMut(i32, i32) -> Result<SpkEvaluation, KernelError>,
) -> Result<[f64; 6], KernelError> {
    let mut state = [0.0f64; 6];
    let mut code = body;
    let mut hops = 0usize;

    while code != 0 {
        hops += 1;
        if hops > MAX_CHAIN_HOPS {
            return Err(KernelError::InvalidFormat(format!(
                "segment chain for {body} does not reach the barycenter"
            )));
        }
        let Some(center) = center_for(code) else {
            let bary = planet_body_to_barycenter(code);
            if bary == code {
                return Err(KernelError::SegmentNotFound {
                    target: code,
                    center: 0,
                });
            }
            code = bary;
            continue;
        };
        let eval = evaluate(code, center)?;
        for axis in 0..3 {
            state[axis] += eval.position_km[axis];
            state[axis + 3] += eval.velocity_km_s[axis];
        }
        code = center;
    }

    Ok(state)
}

/// Map a planet body code (x99) to its system barycenter (x).
///
/// Codes that are not planet bodies are returned unchanged.
pub const fn planet_body_to_barycenter(code: i32) -> i32 {
    if code >= 199 && code <= 999 && code % 100 == 99 {
        code / 100
    } else {
        code
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::daf::RECORD_BYTES;

    const WORDS_PER_RECORD: usize = RECORD_BYTES / 8;

    struct SegmentSpec {
        target: i32,
        center: i32,
        start_s: f64,
        end_s: f64,
        records: Vec<Vec<f64>>,
        init_s: f64,
        interval_s: f64,
    }

    /// Build a little-endian SPK image: file record, one summary record,
    /// one name record, then segment data.
    fn build_spk(specs: &[SegmentSpec]) -> Vec<u8> {
        let mut words: Vec<f64> = Vec::new();
        let mut ranges = Vec::new();
        let data_start = 3 * WORDS_PER_RECORD + 1;
        for spec in specs {
            let first = data_start + words.len();
            let rsize = spec.records[0].len();
            for rec in &spec.records {
                words.extend_from_slice(rec);
            }
            words.extend_from_slice(&[
                spec.init_s,
                spec.interval_s,
                rsize as f64,
                spec.records.len() as f64,
            ]);
            ranges.push((first, data_start + words.len() - 1));
        }

        let mut bytes = vec![0u8; 3 * RECORD_BYTES];
        bytes[..8].copy_from_slice(b"DAF/SPK ");
        bytes[8..12].copy_from_slice(&2i32.to_le_bytes());
        bytes[12..16].copy_from_slice(&6i32.to_le_bytes());
        bytes[76..80].copy_from_slice(&2i32.to_le_bytes());
        bytes[80..84].copy_from_slice(&2i32.to_le_bytes());
        bytes[88..96].copy_from_slice(b"LTL-IEEE");

        let sr = RECORD_BYTES;
        bytes[sr..sr + 8].copy_from_slice(&0f64.to_le_bytes());
        bytes[sr + 8..sr + 16].copy_from_slice(&0f64.to_le_bytes());
        bytes[sr + 16..sr + 24].copy_from_slice(&(specs.len() as f64).to_le_bytes());
        for (i, (spec, (first, last))) in specs.iter().zip(&ranges).enumerate() {
            let at = sr + 24 + i * 40;
            bytes[at..at + 8].copy_from_slice(&spec.start_s.to_le_bytes());
            bytes[at + 8..at + 16].copy_from_slice(&spec.end_s.to_le_bytes());
            let ints = [spec.target, spec.center, 1, 2, *first as i32, *last as i32];
            for (k, v) in ints.iter().enumerate() {
                let o = at + 16 + k * 4;
                bytes[o..o + 4].copy_from_slice(&v.to_le_bytes());
            }
        }

        for w in words {
            bytes.extend_from_slice(&w.to_le_bytes());
        }
        bytes
    }

    fn moon_segment() -> SegmentSpec {
        // X = 1 + 2s, Y = 3, Z = 5 T_2(s) on [-1000, 1000] s
        SegmentSpec {
            target: 301,
            center: 3,
            start_s: -1000.0,
            end_s: 1000.0,
            records: vec![vec![
                0.0, 1000.0, 1.0, 2.0, 0.0, 3.0, 0.0, 0.0, 0.0, 0.0, 5.0,
            ]],
            init_s: -1000.0,
            interval_s: 2000.0,
        }
    }

    fn constant_segment(target: i32, center: i32, value: f64) -> SegmentSpec {
        SegmentSpec {
            target,
            center,
            start_s: -1000.0,
            end_s: 1000.0,
            records: vec![
                vec![-500.0, 500.0, value, 0.0, 0.0, 0.0, 0.0, 0.0],
                vec![500.0, 500.0, value, 0.0, 0.0, 0.0, 0.0, 0.0],
            ],
            init_s: -1000.0,
            interval_s: 1000.0,
        }
    }

    #[test]
    fn indexes_segment_summaries() {
        let kernel = SpkKernel::from_bytes(build_spk(&[moon_segment()])).unwrap();
        let segs = kernel.segments();
        assert_eq!(segs.len(), 1);
        assert_eq!(segs[0].target, 301);
        assert_eq!(segs[0].center, 3);
        assert_eq!(segs[0].data_type, TYPE_CHEBYSHEV_POSITION);
        assert_eq!(kernel.center_for(301), Some(3));
        assert_eq!(kernel.center_for(10), None);
    }

    #[test]
    fn evaluates_position_and_velocity() {
        let kernel = SpkKernel::from_bytes(build_spk(&[moon_segment()])).unwrap();
        let eval = kernel.evaluate(301, 3, 500.0).unwrap();
        assert!((eval.position_km[0] - 2.0).abs() < 1e-12);
        assert!((eval.position_km[1] - 3.0).abs() < 1e-12);
        assert!((eval.position_km[2] + 2.5).abs() < 1e-12);
        assert!((eval.velocity_km_s[0] - 0.002).abs() < 1e-15);
        assert!(eval.velocity_km_s[1].abs() < 1e-15);
        assert!((eval.velocity_km_s[2] - 0.01).abs() < 1e-15);
    }

    #[test]
    fn picks_record_by_epoch() {
        let mut seg = constant_segment(3, 0, 7.0);
        seg.records[1][2] = 9.0;
        let kernel = SpkKernel::from_bytes(build_spk(&[seg])).unwrap();
        assert_eq!(kernel.evaluate(3, 0, -200.0).unwrap().position_km[0], 7.0);
        assert_eq!(kernel.evaluate(3, 0, 200.0).unwrap().position_km[0], 9.0);
        // Coverage end maps onto the last record.
        assert_eq!(kernel.evaluate(3, 0, 1000.0).unwrap().position_km[0], 9.0);
    }

    #[test]
    fn out_of_range_and_missing_segments() {
        let kernel = SpkKernel::from_bytes(build_spk(&[moon_segment()])).unwrap();
        assert!(matches!(
            kernel.evaluate(301, 3, 5000.0),
            Err(KernelError::EpochOutOfRange { target: 301, .. })
        ));
        assert!(matches!(
            kernel.evaluate(10, 0, 0.0),
            Err(KernelError::SegmentNotFound { target: 10, center: 0 })
        ));
    }

    #[test]
    fn chains_to_barycenter() {
        let kernel = SpkKernel::from_bytes(build_spk(&[
            moon_segment(),
            constant_segment(3, 0, 100.0),
        ]))
        .unwrap();
        let state = kernel.resolve_to_ssb(301, 500.0).unwrap();
        assert!((state[0] - 102.0).abs() < 1e-12);
        assert!((state[1] - 3.0).abs() < 1e-12);
    }

    #[test]
    fn chain_walk_sums_links_and_uses_barycenter_fallback() {
        let centers = |code| match code {
            301 => Some(3),
            3 => Some(0),
            _ => None,
        };
        let mut links = Vec::new();
        let state = resolve_chain(399, centers, |target, center| {
            links.push((target, center));
            Ok(SpkEvaluation {
                position_km: [f64::from(target), 0.0, 0.0],
                velocity_km_s: [0.0, 1.0, 0.0],
            })
        })
        .unwrap();
        assert_eq!(links, vec![(3, 0)]);
        assert_eq!(state, [3.0, 0.0, 0.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn cyclic_chain_is_rejected() {
        let centers = |code| Some(if code == 301 { 399 } else { 301 });
        let mut calls = 0;
        let result = resolve_chain(301, centers, |_, _| {
            calls += 1;
            Ok(SpkEvaluation {
                position_km: [0.0; 3],
                velocity_km_s: [0.0; 3],
            })
        });
        assert!(matches!(result, Err(KernelError::InvalidFormat(_))));
        assert_eq!(calls, MAX_CHAIN_HOPS);
    }

    #[test]
    fn missing_link_is_segment_not_found() {
        let result = resolve_chain(301, |_| None, |_, _| unreachable!());
        assert!(matches!(
            result,
            Err(KernelError::SegmentNotFound { target: 301, center: 0 })
        ));
    }

    #[test]
    fn rejects_non_spk_bytes() {
        let mut bytes = build_spk(&[moon_segment()]);
        bytes[..8].copy_from_slice(b"DAF/CK  ");
        assert!(matches!(
            SpkKernel::from_bytes(bytes),
            Err(KernelError::InvalidFormat(_))
        ));
        assert!(matches!(
            SpkKernel::from_bytes(vec![0u8; 100]),
            Err(KernelError::Truncated { .. })
        ));
    }

    #[test]
    fn barycenter_mapping() {
        assert_eq!(planet_body_to_barycenter(499), 4);
        assert_eq!(planet_body_to_barycenter(399), 3);
        assert_eq!(planet_body_to_barycenter(301), 301);
        assert_eq!(planet_body_to_barycenter(10), 10);
    }
}
