//! Header encoding and response validation.
use log::{error, trace};

use super::{FrameError, Result, AVAILABLE_MAX, REQUEST_HEADER_SIZE};

/// Decoded header of a read response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseHeader {
    /// Bytes still pending on the card after this chunk.
    pub available: u8,
    /// Bytes delivered by this chunk.
    pub chunk_len: u8,
}

/// Length prefix written in front of a transmitted payload.
///
/// Returns `None` when `len` can't be expressed in the one byte header.
pub fn transmit_header(len: usize) -> Option<u8> {
    u8::try_from(len).ok()
}

/// Header asking the card to queue `requested` bytes for the next read.
pub fn read_request(requested: u8) -> [u8; REQUEST_HEADER_SIZE] {
    [0x00, requested]
}

/// Number of raw bytes the bus must deliver for a request of `requested`.
pub fn raw_response_len(requested: u8) -> usize {
    requested as usize + REQUEST_HEADER_SIZE
}

pub fn check_raw_count(delivered: usize, requested: u8) -> Result<()> {
    if delivered == 0 {
        Err(FrameError::NoResponse)
    } else if delivered != raw_response_len(requested) {
        error!(
            "raw byte count {} does not match request of {}",
            delivered, requested
        );
        Err(FrameError::UnexpectedRawByteCount)
    } else {
        Ok(())
    }
}

/// Strict upper bound: equal to [`AVAILABLE_MAX`] is still valid.
pub fn check_available(available: u8) -> Result<u8> {
    if available as usize > AVAILABLE_MAX {
        error!("card reports {} pending bytes", available);
        Err(FrameError::AvailableTooLarge)
    } else {
        Ok(available)
    }
}

pub fn check_chunk_len(chunk_len: u8, requested: u8) -> Result<()> {
    if chunk_len != requested {
        error!("chunk of {} bytes, {} requested", chunk_len, requested);
        Err(FrameError::UnexpectedProtocolByteCount)
    } else {
        Ok(())
    }
}

/// Validates a complete raw response and splits it into header and payload.
///
/// Checks run in wire order so a corrupt pending count is rejected before
/// the chunk length is looked at.
pub fn decode_response(raw: &[u8], requested: u8) -> Result<(ResponseHeader, &[u8])> {
    check_raw_count(raw.len(), requested)?;
    let available = check_available(raw[0])?;
    check_chunk_len(raw[1], requested)?;
    trace!("chunk {} bytes, {} pending", requested, available);
    Ok((
        ResponseHeader {
            available,
            chunk_len: requested,
        },
        &raw[REQUEST_HEADER_SIZE..],
    ))
}

/// Card side of [`decode_response`]: writes `[available, len, payload]`
/// into `out` and returns the frame length.
pub fn encode_response(available: u8, payload: &[u8], out: &mut [u8]) -> Option<usize> {
    let chunk_len = u8::try_from(payload.len()).ok()?;
    let total = raw_response_len(chunk_len);
    if payload.len() > AVAILABLE_MAX || out.len() < total {
        return None;
    }
    out[0] = available;
    out[1] = chunk_len;
    out[REQUEST_HEADER_SIZE..total].copy_from_slice(payload);
    Some(total)
}
