use bfsweep_core::errors::SweepError;
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::serde::to_canonical_json_bytes;

/// Computes a stable hexadecimal hash for the provided serializable payload.
pub fn stable_hash_string<T: Serialize>(value: &T) -> Result<String, SweepError> {
    let bytes = to_canonical_json_bytes(value)?;
    let digest = Sha256::digest(bytes);
    Ok(format!("{:x}", digest))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::ParameterGrid;

    #[test]
    fn equal_grids_hash_equal() {
        let a = stable_hash_string(&ParameterGrid::default()).expect("hash");
        let b = stable_hash_string(&ParameterGrid::default()).expect("hash");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn dimension_order_changes_hash() {
        let a = ParameterGrid::new(vec![12, 14], vec![14], vec![24]);
        let b = ParameterGrid::new(vec![14, 12], vec![14], vec![24]);
        assert_ne!(
            stable_hash_string(&a).expect("hash"),
            stable_hash_string(&b).expect("hash")
        );
    }
}
