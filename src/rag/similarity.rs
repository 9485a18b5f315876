use crate::core::errors::ApiError;

/// Cosine similarity between two equal-length vectors.
///
/// Defined as 0.0 when either vector has zero norm. Unequal lengths fail
/// with `ApiError::LengthMismatch`; callers scoring a batch should skip the
/// offending vector rather than abort the whole search.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32, ApiError> {
    if a.len() != b.len() {
        return Err(ApiError::LengthMismatch {
            left: a.len(),
            right: b.len(),
        });
    }

    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;
    for (x, y) in a.iter().zip(b.iter()) {
        let (x, y) = (f64::from(*x), f64::from(*y));
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom == 0.0 {
        return Ok(0.0);
    }

    Ok((dot / denom).clamp(-1.0, 1.0) as f32)
}
