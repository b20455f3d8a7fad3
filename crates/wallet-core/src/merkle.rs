//! Merkle inclusion proof verification.
//!
//! The server asserts that a prior commitment exists in its merkle tree by
//! handing back the root and a sibling path. The client recomputes the
//! root locally and refuses to proceed on mismatch — this is the wallet's
//! defense against a compromised server redirecting funds.
//!
//! Node convention: leaves are `SHA-256(leaf bytes)`; interior nodes hash
//! the byte-lexicographically smaller child first.

use sha2::{Digest, Sha256};

use crate::types::Hash;

/// Verify that `leaf` is contained in the tree with `root`, using the
/// sibling hashes in `proof` (leaf level first).
pub fn verify_contained(leaf: &[u8], root: &Hash, proof: &[Hash]) -> bool {
    let mut node: [u8; 32] = Sha256::digest(leaf).into();

    for sibling in proof {
        let mut hasher = Sha256::new();
        if node.as_slice() <= sibling.as_ref() {
            hasher.update(node);
            hasher.update(sibling);
        } else {
            hasher.update(sibling);
            hasher.update(node);
        }
        node = hasher.finalize().into();
    }

    node == *root.bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hash(hex_str: &str) -> Hash {
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(hex_str, &mut bytes).unwrap();
        Hash::new(bytes)
    }

    // Proof generated by the server implementation for leaf "leaf0" in a
    // tree of 2^16 leaves.
    fn server_proof() -> (Hash, Vec<Hash>) {
        let root = hash("1d92df473ed3fd6326f7ee570ec34547a42a487a7500366ee8ce3bd2e3f5c99c");
        let proof = [
            "d103cfb5e499c566904787533afbdec56f95492d67fc00e2c0d0161ba99653f1",
            "1fe3bed0007741bcb18e6a55d0a1b4742182c2a8a4ca67fe39c8d2f34492d02c",
            "858921767bcad0ecb97bab67588a0c0a3e07098c68918fb47f1cd389ceb532a5",
            "689311a4b926352c5abd99b68ad505a8bc52b9d38a8e8222a69fe31743459e84",
            "349384c18d4631d050d1e6654566f368b03fab67e19e91bf564ee449e70679af",
            "0081045413c64a2bceef711c88c83a474dd45281a5c3802cb19c64297ee2abcd",
            "0d55a20d88a8a3b6ec1bdc0a2917ab8bd6073e2c6b4b7fbe150099bbb9e3cd08",
            "696f022c109b9e4d517b46211d122588a3c8a8484c16fa9ce85b8adf042fbe20",
            "5162aaf0959532c29243ed986e7db0b670efe182a3a233859c50d160333a0e64",
            "c217e4ae5aba97363aae942bc514b73fb3ec3b568ba7502755538ae244c05438",
            "07c3d35566546b2515053df639707588ac3170ed3b14cc46c4db0651a6160542",
            "f4bc1133f8c2cb9cd9e08cabfe06c16ee60a03b832401d4c02c587c22bd2e9f4",
            "1a17b1e27114c2f1f16fa898557ed0f8546e00cf9cc1dd8a07781d8bafbadba5",
            "18ea423c80045847f939c0e57c6d6255d4cc7ed4c72f2c5528cc122fac687733",
            "cd097bb2b70eabc6538d44d1583c0f2712b5a6ff16d3d7f9c22455cf0d786f47",
            "be2ff6be7e99eca6736741b87cb131950f14496bd4eb8061a17a95f45b6fd9e8",
        ]
        .iter()
        .map(|h| hash(h))
        .collect();
        (root, proof)
    }

    #[test]
    fn valid_proof_verifies() {
        let (root, proof) = server_proof();
        assert!(verify_contained(b"leaf0", &root, &proof));
    }

    #[test]
    fn wrong_leaf_fails() {
        let (root, proof) = server_proof();
        assert!(!verify_contained(b"leaf1", &root, &proof));
    }

    #[test]
    fn any_tampered_node_fails() {
        let (root, proof) = server_proof();
        for index in 0..proof.len() {
            let mut tampered = proof.clone();
            let mut bytes = *tampered[index].bytes();
            bytes[31] ^= 0xff;
            tampered[index] = Hash::new(bytes);
            assert!(
                !verify_contained(b"leaf0", &root, &tampered),
                "tampering node {index} must invalidate the proof"
            );
        }
    }

    #[test]
    fn tampered_root_fails() {
        let (root, proof) = server_proof();
        let mut bytes = *root.bytes();
        bytes[0] ^= 0x01;
        assert!(!verify_contained(b"leaf0", &Hash::new(bytes), &proof));
    }

    #[test]
    fn truncated_proof_fails() {
        let (root, proof) = server_proof();
        assert!(!verify_contained(b"leaf0", &root, &proof[..proof.len() - 1]));
    }

    #[test]
    fn small_hand_built_tree() {
        // Two leaves: root = H(sorted(H(a), H(b))).
        let ha: [u8; 32] = Sha256::digest(b"a").into();
        let hb: [u8; 32] = Sha256::digest(b"b").into();
        let (lo, hi) = if ha <= hb { (ha, hb) } else { (hb, ha) };
        let mut hasher = Sha256::new();
        hasher.update(lo);
        hasher.update(hi);
        let root = Hash::new(hasher.finalize().into());

        assert!(verify_contained(b"a", &root, &[Hash::new(hb)]));
        assert!(verify_contained(b"b", &root, &[Hash::new(ha)]));
        assert!(!verify_contained(b"c", &root, &[Hash::new(ha)]));
    }
}
