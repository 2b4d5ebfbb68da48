//! NAIF Double precision Array File (DAF) container layout.
//!
//! A DAF is a sequence of 1024-byte records. Record 1 is the file record;
//! summary records form a doubly linked list starting at `FWARD`, each
//! holding up to `NSUM` packed summaries of `ND` doubles followed by `NI`
//! 32-bit integers. Addresses inside the file are 1-based double indices.

use crate::error::KernelError;

/// Size of one DAF record in bytes.
pub const RECORD_BYTES: usize = 1024;

const SPK_ID_WORD: &[u8; 8] = b"DAF/SPK ";

/// Byte order recorded in the file record's `LOCFMT` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endian {
    Little,
    Big,
}

/// Parsed file record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileRecord {
    pub nd: usize,
    pub ni: usize,
    pub first_summary_record: usize,
    pub endian: Endian,
}

impl FileRecord {
    /// Number of doubles occupied by one packed summary.
    pub fn summary_doubles(&self) -> usize {
        self.nd + self.ni.div_ceil(2)
    }
}

/// One raw summary: `nd` doubles and `ni` integers.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSummary {
    pub doubles: Vec<f64>,
    pub ints: Vec<i32>,
}

/// Read-only view over DAF bytes with the file's byte order.
#[derive(Debug, Clone, Copy)]
pub struct DafView<'a> {
    bytes: &'a [u8],
    endian: Endian,
}

impl<'a> DafView<'a> {
    pub fn new(bytes: &'a [u8], endian: Endian) -> Self {
        Self { bytes, endian }
    }

    fn chunk<const N: usize>(&self, offset: usize) -> Result<[u8; N], KernelError> {
        self.bytes
            .get(offset..offset + N)
            .and_then(|s| s.try_into().ok())
            .ok_or(KernelError::Truncated { offset })
    }

    pub fn f64_at(&self, offset: usize) -> Result<f64, KernelError> {
        let raw = self.chunk::<8>(offset)?;
        Ok(match self.endian {
            Endian::Little => f64::from_le_bytes(raw),
            Endian::Big => f64::from_be_bytes(raw),
        })
    }

    pub fn i32_at(&self, offset: usize) -> Result<i32, KernelError> {
        let raw = self.chunk::<4>(offset)?;
        Ok(match self.endian {
            Endian::Little => i32::from_le_bytes(raw),
            Endian::Big => i32::from_be_bytes(raw),
        })
    }

    /// Double at a 1-based DAF word address.
    pub fn word(&self, address: usize) -> Result<f64, KernelError> {
        if address == 0 {
            return Err(KernelError::InvalidFormat("word address 0".into()));
        }
        self.f64_at((address - 1) * 8)
    }

    /// Contiguous doubles `[first, first + count)` at 1-based addresses.
    pub fn words(&self, first: usize, count: usize) -> Result<Vec<f64>, KernelError> {
        (0..count).map(|i| self.word(first + i)).collect()
    }
}

/// Parse the file record and detect byte order.
pub fn read_file_record(bytes: &[u8]) -> Result<FileRecord, KernelError> {
    if bytes.len() < RECORD_BYTES {
        return Err(KernelError::Truncated { offset: bytes.len() });
    }
    if &bytes[..8] != SPK_ID_WORD {
        let id = String::from_utf8_lossy(&bytes[..8]).into_owned();
        return Err(KernelError::InvalidFormat(format!(
            "not an SPK file (id word {id:?})"
        )));
    }

    let endian = match &bytes[88..96] {
        b"LTL-IEEE" => Endian::Little,
        b"BIG-IEEE" => Endian::Big,
        // Pre-N0050 files leave LOCFMT blank; ND is always 2 for SPK.
        _ => {
            let le = i32::from_le_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]);
            if le == 2 { Endian::Little } else { Endian::Big }
        }
    };

    let view = DafView::new(bytes, endian);
    let nd = view.i32_at(8)?;
    let ni = view.i32_at(12)?;
    let fward = view.i32_at(76)?;

    if nd != 2 || ni != 6 {
        return Err(KernelError::InvalidFormat(format!(
            "SPK requires ND=2, NI=6 (found ND={nd}, NI={ni})"
        )));
    }
    if fward < 2 {
        return Err(KernelError::InvalidFormat(format!(
            "bad forward summary pointer {fward}"
        )));
    }

    Ok(FileRecord {
        nd: nd as usize,
        ni: ni as usize,
        first_summary_record: fward as usize,
        endian,
    })
}

/// Walk the summary record chain and return every packed summary.
pub fn read_summaries(bytes: &[u8], file: &FileRecord) -> Result<Vec<RawSummary>, KernelError> {
    let view = DafView::new(bytes, file.endian);
    let stride = file.summary_doubles() * 8;
    let max_per_record = (RECORD_BYTES - 24) / stride;
    let total_records = bytes.len() / RECORD_BYTES;

    let mut out = Vec::new();
    let mut record = file.first_summary_record;
    let mut visited = 0usize;

    while record != 0 {
        visited += 1;
        if visited > total_records {
            return Err(KernelError::InvalidFormat(
                "summary record chain does not terminate".into(),
            ));
        }

        let base = (record - 1) * RECORD_BYTES;
        let next = view.f64_at(base)?;
        let count = view.f64_at(base + 16)? as usize;
        if count > max_per_record {
            return Err(KernelError::InvalidFormat(format!(
                "summary record {record} claims {count} summaries"
            )));
        }

        for i in 0..count {
            let start = base + 24 + i * stride;
            let doubles = (0..file.nd)
                .map(|k| view.f64_at(start + k * 8))
                .collect::<Result<Vec<_>, _>>()?;
            let int_base = start + file.nd * 8;
            let ints = (0..file.ni)
                .map(|k| view.i32_at(int_base + k * 4))
                .collect::<Result<Vec<_>, _>>()?;
            out.push(RawSummary { doubles, ints });
        }

        record = next as usize;
    }

    Ok(out)
}
